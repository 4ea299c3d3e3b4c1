//! Validated theme settings: navbar, footer and syntax highlighting.

use serde::{Deserialize, Serialize};

/// Side of the navbar an item is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

/// Navbar logo metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Logo {
    /// Alternative text
    pub alt: String,
    /// Image path relative to the static directory
    pub src: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
}

/// What a navbar item points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "camelCase")]
pub enum NavbarTarget {
    /// First document of the named sidebar
    DocSidebar(String),
    /// A single document by id
    Doc(String),
    /// External URL
    Link(String),
}

/// A validated navbar item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarItem {
    pub label: String,
    pub target: NavbarTarget,
    pub position: Position,
}

/// Navbar settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavbarSettings {
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItem>,
}

/// Target of a footer or call-to-action link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "lowercase")]
pub enum LinkTarget {
    /// Site-relative path, prefixed with base path and locale when rendered
    Internal(String),
    /// Absolute URL, rendered as is
    External(String),
}

/// A labelled footer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    pub label: String,
    pub target: LinkTarget,
}

/// A titled column of footer links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterSection {
    pub title: String,
    pub links: Vec<FooterLink>,
}

/// Footer color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Light,
    Dark,
}

/// Footer settings. `style` stays `None` when the file omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FooterSettings {
    pub style: Option<FooterStyle>,
    pub sections: Vec<FooterSection>,
    pub copyright: Option<String>,
}

/// Syntax highlighting theme names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyntaxSettings {
    pub theme: Option<String>,
    pub dark_theme: Option<String>,
}

/// All theme settings from `[theme]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThemeSettings {
    /// Social card image
    pub image: Option<String>,
    pub navbar: NavbarSettings,
    pub footer: FooterSettings,
    pub prism: SyntaxSettings,
}
