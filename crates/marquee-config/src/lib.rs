//! Site configuration for marquee.
//!
//! Parses `site.toml` with serde and validates it into an immutable
//! [`SiteConfig`]. Validation is fail-fast: the first violation aborts
//! loading with a [`ConfigError`], before any content is read.
//!
//! CLI settings can be applied during load via [`CliSettings`].

pub mod homepage;
mod raw;
pub mod sidebar;
pub mod theme;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

pub use homepage::{ActionStyle, CallToAction, FeatureDescriptor, Hero, HeroLogo, Homepage, Narrative};
pub use sidebar::{CategoryItems, SidebarCategory, Sidebars};
pub use theme::{
    FooterLink, FooterSection, FooterSettings, FooterStyle, LinkTarget, Logo, NavbarItem,
    NavbarSettings, NavbarTarget, Position, SyntaxSettings, ThemeSettings,
};

use raw::{RawConfig, RawHomepage, RawLink, RawNavbarItem, RawNavbarKind, RawPreset, RawTheme};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "site.toml";

static LOCALE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("locale pattern is valid")
});

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid locale configuration: {0}")]
    Locale(String),

    #[error("Invalid url `{value}`: {reason}")]
    Url { value: String, reason: String },

    #[error("Invalid base_url `{0}`: must start and end with `/`")]
    BaseUrl(String),

    #[error("Missing required field `{0}`")]
    MissingField(String),

    #[error("Invalid field `{field}`: {reason}")]
    Invalid { field: String, reason: String },

    #[error("Unknown preset `{0}`")]
    UnknownPreset(String),
}

/// What to do when a reference points at a document that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkPolicy {
    /// Collect every broken link, then fail the build
    #[default]
    #[serde(rename = "throw")]
    Strict,
    /// Record a warning and leave the link dead
    #[serde(rename = "warn")]
    Lenient,
}

/// Markdown rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownOptions {
    /// Render ```` ```mermaid ```` fences as diagrams
    #[serde(default)]
    pub mermaid: bool,
}

/// Options of the docs plugin of a preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsOptions {
    /// URL prefix for docs, always starting with `/`
    pub route_base_path: String,
    /// Docs directory of the default locale
    pub path: PathBuf,
    /// Sidebar file
    pub sidebar_path: PathBuf,
    /// Prefix for "edit this page" links
    pub edit_url: Option<String>,
}

/// A validated preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub docs: Option<DocsOptions>,
    pub custom_css: Option<PathBuf>,
}

/// CLI settings that override configuration file values.
#[derive(Debug, Default, Clone)]
pub struct CliSettings {
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
    /// Build only this locale.
    pub locale: Option<String>,
    /// Override minification.
    pub minify: Option<bool>,
}

/// Immutable, validated site-wide settings.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    title: String,
    tagline: String,
    favicon: Option<String>,
    url: Url,
    base_url: String,
    organization_name: Option<String>,
    project_name: Option<String>,
    link_policy: LinkPolicy,
    default_locale: String,
    locales: Vec<String>,
    selected_locale: Option<String>,
    presets: Vec<Preset>,
    docs: DocsOptions,
    markdown: MarkdownOptions,
    theme: ThemeSettings,
    homepage: Option<Homepage>,
    root_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: PathBuf,
    i18n_dir: PathBuf,
    minify: bool,
}

impl SiteConfig {
    /// Load and validate a configuration file.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load(path: &Path, cli: &CliSettings) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let config = Self::from_toml_str(&content, &path.display().to_string(), base_dir, cli)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(
        content: &str,
        origin: &str,
        base_dir: &Path,
        cli: &CliSettings,
    ) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        Self::from_raw(raw, base_dir, cli)
    }

    fn from_raw(raw: RawConfig, base_dir: &Path, cli: &CliSettings) -> Result<Self, ConfigError> {
        let title = required("title", Some(raw.title))?;

        validate_locales(&raw.i18n.default_locale, &raw.i18n.locales)?;
        if let Some(selected) = &cli.locale {
            if !raw.i18n.locales.contains(selected) {
                return Err(ConfigError::Locale(format!(
                    "selected locale `{}` is not one of {:?}",
                    selected, raw.i18n.locales
                )));
            }
        }

        let url = parse_site_url(&raw.url)?;

        if !raw.base_url.starts_with('/') || !raw.base_url.ends_with('/') {
            return Err(ConfigError::BaseUrl(raw.base_url));
        }

        let presets = validate_presets(raw.presets, base_dir)?;
        let docs = presets
            .iter()
            .find_map(|p| p.docs.clone())
            .unwrap_or_else(|| DocsOptions {
                route_base_path: "/".to_string(),
                path: base_dir.join("docs"),
                sidebar_path: base_dir.join("sidebars.toml"),
                edit_url: None,
            });

        let theme = validate_theme(raw.theme)?;
        let homepage = raw
            .homepage
            .map(|h| validate_homepage(h, &title, &raw.tagline))
            .transpose()?;

        let output_dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| base_dir.join(&raw.build.output_dir));

        Ok(Self {
            title,
            tagline: raw.tagline,
            favicon: raw.favicon,
            url,
            base_url: raw.base_url,
            organization_name: raw.organization_name,
            project_name: raw.project_name,
            link_policy: raw.on_broken_links,
            default_locale: raw.i18n.default_locale,
            locales: raw.i18n.locales,
            selected_locale: cli.locale.clone(),
            presets,
            docs,
            markdown: raw.markdown,
            theme,
            homepage,
            root_dir: base_dir.to_path_buf(),
            output_dir,
            static_dir: base_dir.join(&raw.build.static_dir),
            i18n_dir: base_dir.join(&raw.build.i18n_dir),
            minify: cli.minify.unwrap_or(raw.build.minify),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tagline(&self) -> &str {
        &self.tagline
    }

    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    /// Canonical production URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Path the site is served under, starting and ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.organization_name.as_deref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn link_policy(&self) -> LinkPolicy {
        self.link_policy
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// All configured locales, default first as declared.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Locales to build: the CLI selection, or every configured locale.
    pub fn build_locales(&self) -> Vec<&str> {
        match &self.selected_locale {
            Some(locale) => vec![locale.as_str()],
            None => self.locales.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_default_locale(&self, locale: &str) -> bool {
        locale == self.default_locale
    }

    pub fn docs(&self) -> &DocsOptions {
        &self.docs
    }

    /// Custom stylesheet of the first preset that sets one.
    pub fn custom_css(&self) -> Option<&Path> {
        self.presets.iter().find_map(|p| p.custom_css.as_deref())
    }

    pub fn markdown(&self) -> &MarkdownOptions {
        &self.markdown
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn homepage(&self) -> Option<&Homepage> {
        self.homepage.as_ref()
    }

    /// Directory the configuration was loaded from.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Root of the per-locale translation trees.
    pub fn i18n_dir(&self) -> &Path {
        &self.i18n_dir
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    /// Docs source directory for a locale.
    ///
    /// The default locale reads from the preset's docs path, every other
    /// locale from `<i18n>/<locale>/docs`.
    pub fn locale_docs_dir(&self, locale: &str) -> PathBuf {
        if self.is_default_locale(locale) {
            self.docs.path.clone()
        } else {
            self.i18n_dir.join(locale).join("docs")
        }
    }

    /// URL segment for a locale: empty for the default, `"<locale>/"` otherwise.
    pub fn locale_prefix(&self, locale: &str) -> String {
        if self.is_default_locale(locale) {
            String::new()
        } else {
            format!("{}/", locale)
        }
    }

    /// Turn a site-relative path into a URL path for a locale.
    ///
    /// `"/getting-started/"` becomes `"/base/ka/getting-started/"`.
    pub fn localized_path(&self, locale: &str, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            self.locale_prefix(locale),
            path.trim_start_matches('/')
        )
    }

    /// URL path of the docs root for a locale.
    pub fn docs_base(&self, locale: &str) -> String {
        self.localized_path(locale, &self.docs.route_base_path)
    }

    /// Load the sidebar file named by the docs preset.
    pub fn load_sidebars(&self) -> Result<Sidebars, ConfigError> {
        Sidebars::load(&self.docs.sidebar_path)
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingField(field.to_string()))
}

fn validate_locales(default_locale: &str, locales: &[String]) -> Result<(), ConfigError> {
    if locales.is_empty() {
        return Err(ConfigError::Locale("locale set is empty".to_string()));
    }

    for (index, locale) in locales.iter().enumerate() {
        if !LOCALE_CODE.is_match(locale) {
            return Err(ConfigError::Locale(format!(
                "`{}` is not a valid locale code",
                locale
            )));
        }
        if locales[..index].contains(locale) {
            return Err(ConfigError::Locale(format!("`{}` is listed twice", locale)));
        }
    }

    if !locales.iter().any(|l| l == default_locale) {
        return Err(ConfigError::Locale(format!(
            "default locale `{}` is not one of {:?}",
            default_locale, locales
        )));
    }

    Ok(())
}

fn parse_site_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::Url {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(value).map_err(|e| invalid(&e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if url.path() != "/" {
        return Err(invalid("set the path through base_url instead"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }

    Ok(url)
}

fn validate_external(field: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::Url {
        value: value.to_string(),
        reason: format!("{} ({})", e, field),
    })?;
    if url.cannot_be_a_base() && url.scheme() != "mailto" {
        return Err(ConfigError::Url {
            value: value.to_string(),
            reason: format!("not an absolute URL ({})", field),
        });
    }
    Ok(value.to_string())
}

fn validate_internal(field: &str, value: &str) -> Result<String, ConfigError> {
    if !value.starts_with('/') {
        return Err(ConfigError::Invalid {
            field: field.to_string(),
            reason: format!("internal path `{}` must start with `/`", value),
        });
    }
    Ok(value.to_string())
}

fn validate_presets(presets: Vec<RawPreset>, base_dir: &Path) -> Result<Vec<Preset>, ConfigError> {
    let mut validated = Vec::with_capacity(presets.len());

    for preset in presets {
        if preset.name != "classic" {
            return Err(ConfigError::UnknownPreset(preset.name));
        }

        let docs = match preset.docs {
            Some(docs) => {
                if validated.iter().any(|p: &Preset| p.docs.is_some()) {
                    return Err(ConfigError::Invalid {
                        field: "presets.docs".to_string(),
                        reason: "only one preset may configure docs".to_string(),
                    });
                }
                validate_internal("presets.docs.route_base_path", &docs.route_base_path)?;
                let edit_url = docs
                    .edit_url
                    .map(|u| validate_external("presets.docs.edit_url", &u))
                    .transpose()?;
                let mut route_base_path = docs.route_base_path;
                if !route_base_path.ends_with('/') {
                    route_base_path.push('/');
                }
                Some(DocsOptions {
                    route_base_path,
                    path: base_dir.join(docs.path),
                    sidebar_path: base_dir.join(docs.sidebar_path),
                    edit_url,
                })
            }
            None => None,
        };

        validated.push(Preset {
            name: preset.name,
            docs,
            custom_css: preset
                .theme
                .and_then(|t| t.custom_css)
                .map(|css| base_dir.join(css)),
        });
    }

    Ok(validated)
}

fn validate_theme(raw: RawTheme) -> Result<ThemeSettings, ConfigError> {
    let items = raw
        .navbar
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_navbar_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let mut sections = Vec::with_capacity(raw.footer.links.len());
    for (index, section) in raw.footer.links.into_iter().enumerate() {
        let field = format!("theme.footer.links[{}]", index);
        let title = required(&format!("{}.title", field), section.title)?;
        let links = section
            .items
            .into_iter()
            .enumerate()
            .map(|(i, link)| validate_link(&format!("{}.items[{}]", field, i), link))
            .collect::<Result<Vec<_>, _>>()?;
        sections.push(FooterSection { title, links });
    }

    Ok(ThemeSettings {
        image: raw.image,
        navbar: NavbarSettings {
            title: raw.navbar.title,
            logo: raw.navbar.logo,
            items,
        },
        footer: FooterSettings {
            style: raw.footer.style,
            sections,
            copyright: raw.footer.copyright,
        },
        prism: SyntaxSettings {
            theme: raw.prism.theme,
            dark_theme: raw.prism.dark_theme,
        },
    })
}

fn validate_navbar_item(index: usize, item: RawNavbarItem) -> Result<NavbarItem, ConfigError> {
    let field = format!("theme.navbar.items[{}]", index);
    let label = required(&format!("{}.label", field), item.label)?;

    let target = match item.kind.unwrap_or(RawNavbarKind::Link) {
        RawNavbarKind::DocSidebar => NavbarTarget::DocSidebar(required(
            &format!("{}.sidebar_id", field),
            item.sidebar_id,
        )?),
        RawNavbarKind::Doc => {
            NavbarTarget::Doc(required(&format!("{}.doc_id", field), item.doc_id)?)
        }
        RawNavbarKind::Link => {
            let href = required(&format!("{}.href", field), item.href)?;
            NavbarTarget::Link(validate_external(&field, &href)?)
        }
    };

    Ok(NavbarItem {
        label,
        target,
        position: item.position,
    })
}

fn link_target(field: &str, to: Option<String>, href: Option<String>) -> Result<LinkTarget, ConfigError> {
    match (to, href) {
        (Some(to), None) => Ok(LinkTarget::Internal(validate_internal(field, &to)?)),
        (None, Some(href)) => Ok(LinkTarget::External(validate_external(field, &href)?)),
        _ => Err(ConfigError::Invalid {
            field: field.to_string(),
            reason: "exactly one of `to` or `href` is required".to_string(),
        }),
    }
}

fn validate_link(field: &str, link: RawLink) -> Result<FooterLink, ConfigError> {
    let label = required(&format!("{}.label", field), link.label)?;
    let target = link_target(field, link.to, link.href)?;
    Ok(FooterLink { label, target })
}

fn validate_homepage(raw: RawHomepage, site_title: &str, site_tagline: &str) -> Result<Homepage, ConfigError> {
    let mut actions = Vec::with_capacity(raw.hero.actions.len());
    for (index, action) in raw.hero.actions.into_iter().enumerate() {
        let field = format!("homepage.hero.actions[{}]", index);
        let label = required(&format!("{}.label", field), action.label)?;
        let target = link_target(&field, action.to, action.href)?;
        actions.push(CallToAction {
            label,
            target,
            style: action.style,
        });
    }

    for (index, feature) in raw.features.iter().enumerate() {
        if feature.title.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "homepage.features[{}].title",
                index
            )));
        }
        if feature.icon.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "homepage.features[{}].icon",
                index
            )));
        }
    }

    let narrative = match raw.narrative {
        Some(n) => Some(Narrative {
            heading: required("homepage.narrative.heading", n.heading)?,
            body: n.body,
        }),
        None => None,
    };

    Ok(Homepage {
        title: raw.title.unwrap_or_else(|| site_title.to_string()),
        description: raw.description,
        hero: Hero {
            logo: raw.hero.logo,
            title: raw.hero.title.unwrap_or_else(|| site_title.to_string()),
            tagline: raw.hero.tagline.unwrap_or_else(|| site_tagline.to_string()),
            actions,
        },
        features: raw.features,
        narrative,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"
title = "Nextino"
url = "https://nextino.cc"
"#;

    fn parse(content: &str) -> Result<SiteConfig, ConfigError> {
        SiteConfig::from_toml_str(content, "site.toml", Path::new("/site"), &CliSettings::default())
    }

    fn with_locales(default_locale: &str, locales: &[&str]) -> String {
        let list = locales
            .iter()
            .map(|l| format!("\"{}\"", l))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}\n[i18n]\ndefault_locale = \"{}\"\nlocales = [{}]\n",
            MINIMAL, default_locale, list
        )
    }

    #[test]
    fn applies_defaults() {
        let config = parse(MINIMAL).unwrap();

        assert_eq!(config.title(), "Nextino");
        assert_eq!(config.base_url(), "/");
        assert_eq!(config.default_locale(), "en");
        assert_eq!(config.locales(), &["en".to_string()]);
        assert_eq!(config.link_policy(), LinkPolicy::Strict);
        assert_eq!(config.docs().route_base_path, "/");
        assert_eq!(config.docs().path, PathBuf::from("/site/docs"));
        assert_eq!(config.output_dir(), Path::new("/site/build"));
        assert!(config.minify());
        assert!(config.homepage().is_none());
    }

    #[test]
    fn default_locale_must_be_member() {
        for (default_locale, locales, ok) in [
            ("en", vec!["en", "ka"], true),
            ("ka", vec!["en", "ka"], true),
            ("fr", vec!["en", "ka"], false),
            ("en", vec!["ka"], false),
        ] {
            let result = parse(&with_locales(default_locale, &locales));
            assert_eq!(result.is_ok(), ok, "{} in {:?}", default_locale, locales);
            if !ok {
                assert!(matches!(result, Err(ConfigError::Locale(_))));
            }
        }
    }

    #[test]
    fn rejects_empty_duplicate_and_malformed_locales() {
        assert!(matches!(
            parse(&with_locales("en", &[])),
            Err(ConfigError::Locale(_))
        ));
        assert!(matches!(
            parse(&with_locales("en", &["en", "en"])),
            Err(ConfigError::Locale(_))
        ));
        assert!(matches!(
            parse(&with_locales("en", &["en", "Not A Locale"])),
            Err(ConfigError::Locale(_))
        ));
    }

    #[test]
    fn rejects_malformed_url_and_base_url() {
        let bad_url = "title = \"X\"\nurl = \"not a url\"\n";
        assert!(matches!(parse(bad_url), Err(ConfigError::Url { .. })));

        let with_path = "title = \"X\"\nurl = \"https://example.com/docs\"\n";
        assert!(matches!(parse(with_path), Err(ConfigError::Url { .. })));

        let bad_base = format!("{}base_url = \"docs\"\n", MINIMAL);
        assert!(matches!(parse(&bad_base), Err(ConfigError::BaseUrl(_))));
    }

    #[test]
    fn rejects_missing_title() {
        let result = parse("title = \"\"\nurl = \"https://nextino.cc\"\n");
        assert!(matches!(result, Err(ConfigError::MissingField(f)) if f == "title"));
    }

    #[test]
    fn rejects_unknown_keys_and_presets() {
        let unknown = format!("{}colour = \"red\"\n", MINIMAL);
        assert!(matches!(parse(&unknown), Err(ConfigError::Parse { .. })));

        let preset = format!("{}[[presets]]\nname = \"blog\"\n", MINIMAL);
        assert!(matches!(parse(&preset), Err(ConfigError::UnknownPreset(p)) if p == "blog"));
    }

    #[test]
    fn validates_navbar_items() {
        let config = parse(&format!(
            r#"{}
[[theme.navbar.items]]
type = "docSidebar"
sidebar_id = "tutorialSidebar"
label = "Documentation"

[[theme.navbar.items]]
type = "doc"
doc_id = "roadmap"
label = "Roadmap"

[[theme.navbar.items]]
href = "https://github.com/magradze/nextino"
label = "GitHub"
position = "right"
"#,
            MINIMAL
        ))
        .unwrap();

        let items = &config.theme().navbar.items;
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0].target,
            NavbarTarget::DocSidebar("tutorialSidebar".to_string())
        );
        assert_eq!(items[1].target, NavbarTarget::Doc("roadmap".to_string()));
        assert_eq!(items[2].position, Position::Right);
    }

    #[test]
    fn navbar_doc_item_requires_doc_id() {
        let result = parse(&format!(
            "{}\n[[theme.navbar.items]]\ntype = \"doc\"\nlabel = \"Roadmap\"\n",
            MINIMAL
        ));
        assert!(
            matches!(result, Err(ConfigError::MissingField(f)) if f == "theme.navbar.items[0].doc_id")
        );
    }

    #[test]
    fn footer_links_need_exactly_one_target() {
        let both = format!(
            "{}\n[[theme.footer.links]]\ntitle = \"Docs\"\n[[theme.footer.links.items]]\nlabel = \"Tutorial\"\nto = \"/intro\"\nhref = \"https://x.dev\"\n",
            MINIMAL
        );
        assert!(matches!(parse(&both), Err(ConfigError::Invalid { .. })));

        let ok = format!(
            "{}\n[[theme.footer.links]]\ntitle = \"Docs\"\n[[theme.footer.links.items]]\nlabel = \"Tutorial\"\nto = \"/intro\"\n",
            MINIMAL
        );
        let config = parse(&ok).unwrap();
        assert_eq!(config.theme().footer.style, None);
        assert_eq!(
            config.theme().footer.sections[0].links[0].target,
            LinkTarget::Internal("/intro".to_string())
        );
    }

    #[test]
    fn homepage_falls_back_to_site_title_and_tagline() {
        let config = parse(&format!(
            r#"tagline = "The next step"
{}
[[homepage.features]]
title = "Modular"
icon = "img/blocks.svg"
description = "Clean **modules**"
"#,
            MINIMAL
        ))
        .unwrap();

        let homepage = config.homepage().unwrap();
        assert_eq!(homepage.hero.title, "Nextino");
        assert_eq!(homepage.hero.tagline, "The next step");
        assert_eq!(homepage.features.len(), 1);
    }

    #[test]
    fn localized_paths() {
        let config = parse(&format!(
            "base_url = \"/site/\"\n{}",
            with_locales("en", &["en", "ka"])
        ))
        .unwrap();

        assert_eq!(config.localized_path("en", "/intro/"), "/site/intro/");
        assert_eq!(config.localized_path("ka", "/intro/"), "/site/ka/intro/");
        assert_eq!(config.docs_base("ka"), "/site/ka/");
        assert_eq!(config.locale_docs_dir("ka"), PathBuf::from("/site/i18n/ka/docs"));
    }

    #[test]
    fn cli_settings_override() {
        let cli = CliSettings {
            output_dir: Some(PathBuf::from("/tmp/out")),
            locale: Some("ka".to_string()),
            minify: Some(false),
        };
        let config = SiteConfig::from_toml_str(
            &with_locales("en", &["en", "ka"]),
            "site.toml",
            Path::new("/site"),
            &cli,
        )
        .unwrap();

        assert_eq!(config.output_dir(), Path::new("/tmp/out"));
        assert_eq!(config.build_locales(), vec!["ka"]);
        assert!(!config.minify());

        let unknown = CliSettings {
            locale: Some("fr".to_string()),
            ..Default::default()
        };
        let result = SiteConfig::from_toml_str(
            &with_locales("en", &["en", "ka"]),
            "site.toml",
            Path::new("/site"),
            &unknown,
        );
        assert!(matches!(result, Err(ConfigError::Locale(_))));
    }

    #[test]
    fn loads_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, MINIMAL).unwrap();

        let config = SiteConfig::load(&path, &CliSettings::default()).unwrap();
        assert_eq!(config.root_dir(), temp.path());

        let missing = SiteConfig::load(&temp.path().join("nope.toml"), &CliSettings::default());
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
