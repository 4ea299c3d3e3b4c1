//! Raw configuration schema as it appears in `site.toml`.
//!
//! These types mirror the file layout one to one. They are only turned into
//! the public, validated types by [`SiteConfig::from_raw`](crate::SiteConfig::from_raw).

use serde::Deserialize;

use crate::homepage::{ActionStyle, FeatureDescriptor, HeroLogo};
use crate::theme::{FooterStyle, Logo, Position};
use crate::{LinkPolicy, MarkdownOptions};

/// Top level of `site.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub favicon: Option<String>,
    pub url: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub on_broken_links: LinkPolicy,
    #[serde(default)]
    pub i18n: RawI18n,
    #[serde(default = "default_presets")]
    pub presets: Vec<RawPreset>,
    #[serde(default)]
    pub markdown: MarkdownOptions,
    #[serde(default)]
    pub theme: RawTheme,
    #[serde(default)]
    pub homepage: Option<RawHomepage>,
    #[serde(default)]
    pub build: RawBuild,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawI18n {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

impl Default for RawI18n {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales: default_locales(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPreset {
    pub name: String,
    #[serde(default)]
    pub docs: Option<RawDocsOptions>,
    #[serde(default)]
    pub theme: Option<RawPresetTheme>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDocsOptions {
    #[serde(default = "default_route_base_path")]
    pub route_base_path: String,
    #[serde(default = "default_docs_path")]
    pub path: String,
    #[serde(default = "default_sidebar_path")]
    pub sidebar_path: String,
    #[serde(default)]
    pub edit_url: Option<String>,
}

impl Default for RawDocsOptions {
    fn default() -> Self {
        Self {
            route_base_path: default_route_base_path(),
            path: default_docs_path(),
            sidebar_path: default_sidebar_path(),
            edit_url: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPresetTheme {
    #[serde(default)]
    pub custom_css: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTheme {
    /// Social card image
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub navbar: RawNavbar,
    #[serde(default)]
    pub footer: RawFooter,
    #[serde(default)]
    pub prism: RawPrism,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNavbar {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub logo: Option<Logo>,
    #[serde(default)]
    pub items: Vec<RawNavbarItem>,
}

/// Navbar item kinds accepted in the `type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RawNavbarKind {
    DocSidebar,
    Doc,
    Link,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNavbarItem {
    #[serde(rename = "type", default)]
    pub kind: Option<RawNavbarKind>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub sidebar_id: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub position: Position,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFooter {
    #[serde(default)]
    pub style: Option<FooterStyle>,
    #[serde(default)]
    pub links: Vec<RawFooterSection>,
    #[serde(default)]
    pub copyright: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFooterSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<RawLink>,
}

/// A labelled link with either an internal `to` or an external `href`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLink {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPrism {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub dark_theme: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawHomepage {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hero: RawHero,
    #[serde(default)]
    pub features: Vec<FeatureDescriptor>,
    #[serde(default)]
    pub narrative: Option<RawNarrative>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawHero {
    #[serde(default)]
    pub logo: Option<HeroLogo>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub actions: Vec<RawAction>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAction {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub style: ActionStyle,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNarrative {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBuild {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_i18n_dir")]
    pub i18n_dir: String,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for RawBuild {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            static_dir: default_static_dir(),
            i18n_dir: default_i18n_dir(),
            minify: default_minify(),
        }
    }
}

fn default_base_url() -> String {
    "/".to_string()
}
fn default_locale() -> String {
    "en".to_string()
}
fn default_locales() -> Vec<String> {
    vec![default_locale()]
}
fn default_presets() -> Vec<RawPreset> {
    vec![RawPreset {
        name: "classic".to_string(),
        docs: Some(RawDocsOptions::default()),
        theme: None,
    }]
}
fn default_route_base_path() -> String {
    "/".to_string()
}
fn default_docs_path() -> String {
    "docs".to_string()
}
fn default_sidebar_path() -> String {
    "sidebars.toml".to_string()
}
fn default_output_dir() -> String {
    "build".to_string()
}
fn default_static_dir() -> String {
    "static".to_string()
}
fn default_i18n_dir() -> String {
    "i18n".to_string()
}
fn default_minify() -> bool {
    true
}
