//! Homepage feature grid fragments.

use std::collections::BTreeSet;

use serde::Serialize;

use marquee_config::FeatureDescriptor;
use marquee_mdx::slugify;

use crate::assets::asset_url;
use crate::markdown::render_inline;

/// A rendered feature card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureFragment {
    /// Stable key: the descriptor id, or a slug of its title
    pub key: String,
    pub title: String,
    pub icon_url: String,
    pub description_html: String,
}

/// Render one fragment per descriptor, keeping input order.
///
/// Keys never depend on position. When two descriptors produce the same
/// key, later ones get the first free `-2`, `-3`, ... suffix.
pub fn render_features(features: &[FeatureDescriptor], base_url: &str) -> Vec<FeatureFragment> {
    let (keys, collided) = assign_keys(features);
    for key in &collided {
        tracing::warn!("Feature key `{}` is not unique; suffixing repeats", key);
    }

    features
        .iter()
        .zip(keys)
        .map(|(feature, key)| FeatureFragment {
            key,
            title: feature.title.clone(),
            icon_url: asset_url(base_url, &feature.icon),
            description_html: render_inline(&feature.description),
        })
        .collect()
}

/// Unique keys in input order, plus the base keys that needed a suffix.
fn assign_keys(features: &[FeatureDescriptor]) -> (Vec<String>, BTreeSet<String>) {
    let mut seen = BTreeSet::new();
    let mut collided = BTreeSet::new();

    let keys = features
        .iter()
        .map(|feature| {
            let base = feature_key(feature);
            let mut key = base.clone();
            let mut n = 1;
            while seen.contains(&key) {
                n += 1;
                key = format!("{}-{}", base, n);
            }
            if n > 1 {
                collided.insert(base);
            }
            seen.insert(key.clone());
            key
        })
        .collect();

    (keys, collided)
}

fn feature_key(feature: &FeatureDescriptor) -> String {
    if let Some(id) = feature.id.as_deref().filter(|id| !id.trim().is_empty()) {
        return id.to_string();
    }
    let slug = slugify(&feature.title);
    if slug.is_empty() {
        "feature".to_string()
    } else {
        slug
    }
}
