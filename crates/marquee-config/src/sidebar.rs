//! Sidebar file loading.
//!
//! The sidebar file maps sidebar ids to ordered categories:
//!
//! ```toml
//! [[tutorialSidebar]]
//! label = "Getting Started"
//! items = ["intro", "getting-started/what-is-nextino"]
//!
//! [[tutorialSidebar]]
//! label = "Core"
//! autogenerated = "core"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Items of a sidebar category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CategoryItems {
    /// Explicit doc ids in declaration order
    Docs(Vec<String>),
    /// Every doc below this directory of the docs tree ("." for all)
    Autogenerated(String),
}

/// A labelled group of documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarCategory {
    pub label: String,
    pub items: CategoryItems,
}

/// All sidebars, keyed by sidebar id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sidebars {
    sidebars: BTreeMap<String, Vec<SidebarCategory>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCategory {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    autogenerated: Option<String>,
}

impl Sidebars {
    /// Create from already validated categories.
    pub fn new(sidebars: BTreeMap<String, Vec<SidebarCategory>>) -> Self {
        Self { sidebars }
    }

    /// Load the sidebar file. A missing file yields no sidebars.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No sidebar file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parse sidebars from TOML text.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, Vec<RawCategory>> =
            toml::from_str(content).map_err(|e| ConfigError::Parse {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let mut sidebars = BTreeMap::new();
        for (id, categories) in raw {
            let mut validated = Vec::with_capacity(categories.len());
            for (index, category) in categories.into_iter().enumerate() {
                let field = format!("{}[{}]", id, index);
                let label = category
                    .label
                    .filter(|l| !l.trim().is_empty())
                    .ok_or_else(|| ConfigError::MissingField(format!("{}.label", field)))?;

                let items = match (category.autogenerated, category.items.is_empty()) {
                    (Some(dir), true) => CategoryItems::Autogenerated(dir),
                    (None, false) => CategoryItems::Docs(category.items),
                    (Some(_), false) => {
                        return Err(ConfigError::Invalid {
                            field,
                            reason: "a category takes either `items` or `autogenerated`, not both"
                                .to_string(),
                        })
                    }
                    (None, true) => {
                        return Err(ConfigError::Invalid {
                            field,
                            reason: "category has no items".to_string(),
                        })
                    }
                };

                validated.push(SidebarCategory { label, items });
            }
            sidebars.insert(id, validated);
        }

        Ok(Self { sidebars })
    }

    /// Categories of a sidebar.
    pub fn get(&self, id: &str) -> Option<&[SidebarCategory]> {
        self.sidebars.get(id).map(Vec::as_slice)
    }

    /// Whether a sidebar with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.sidebars.contains_key(id)
    }

    /// Iterate sidebars in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarCategory])> {
        self.sidebars
            .iter()
            .map(|(id, categories)| (id.as_str(), categories.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }
}
