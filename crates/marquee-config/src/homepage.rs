//! Homepage content: hero, feature list and narrative section.

use serde::{Deserialize, Serialize};

use crate::theme::LinkTarget;

/// Visual weight of a call-to-action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyle {
    #[default]
    Primary,
    Secondary,
    Outline,
}

/// A hero call-to-action link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub target: LinkTarget,
    pub style: ActionStyle,
}

/// Image shown above the hero title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroLogo {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub width: Option<u32>,
}

/// The hero block. Missing title and tagline fall back to the site's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub logo: Option<HeroLogo>,
    pub title: String,
    pub tagline: String,
    pub actions: Vec<CallToAction>,
}

/// A single homepage feature entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureDescriptor {
    /// Stable identifier; a slug of the title is used when absent
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    /// Icon path relative to the static directory
    pub icon: String,
    /// Inline markdown
    #[serde(default)]
    pub description: String,
}

/// Free-form section below the feature grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub heading: String,
    /// Markdown
    pub body: String,
}

/// Homepage content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Homepage {
    /// Document title; defaults to the site title
    pub title: String,
    pub description: Option<String>,
    pub hero: Hero,
    pub features: Vec<FeatureDescriptor>,
    pub narrative: Option<Narrative>,
}
