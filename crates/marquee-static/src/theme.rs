//! Theme composition: navbar, footer and syntax themes for one locale.

use serde::Serialize;

use marquee_config::{FooterStyle, LinkTarget, NavbarTarget, Position, SiteConfig};
use marquee_content::DocGraph;

use crate::assets::asset_url;

/// Syntax theme used when the config names none.
pub const DEFAULT_SYNTAX_THEME: &str = "github";
/// Dark syntax theme used when the config names none.
pub const DEFAULT_DARK_SYNTAX_THEME: &str = "dracula";

/// A rendered link. `href` is `None` for a dead link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeLink {
    pub label: String,
    pub href: Option<String>,
    /// Opens outside the site
    pub external: bool,
}

impl ThemeLink {
    fn internal(label: &str, href: Option<String>) -> Self {
        Self {
            label: label.to_string(),
            href,
            external: false,
        }
    }

    fn external(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href.to_string()),
            external: true,
        }
    }

    /// Resolve a footer or call-to-action target for a locale.
    pub fn from_target(config: &SiteConfig, locale: &str, label: &str, target: &LinkTarget) -> Self {
        match target {
            LinkTarget::Internal(path) => {
                Self::internal(label, Some(config.localized_path(locale, path)))
            }
            LinkTarget::External(href) => Self::external(label, href),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoDescriptor {
    pub alt: String,
    /// URL of the image
    pub src: String,
    pub class_name: Option<String>,
    pub height: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarDescriptor {
    pub title: String,
    /// Localized home route
    pub home: String,
    pub logo: Option<LogoDescriptor>,
    pub left: Vec<ThemeLink>,
    pub right: Vec<ThemeLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<ThemeLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterDescriptor {
    pub style: FooterStyle,
    pub columns: Vec<FooterColumn>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxThemes {
    pub light: String,
    pub dark: String,
}

/// Everything the templates need to draw the site chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub locale: String,
    pub navbar: NavbarDescriptor,
    pub footer: FooterDescriptor,
    pub syntax: SyntaxThemes,
    /// Absolute URL of the social card image
    pub image: Option<String>,
}

/// Compose the theme for the locale of `graph`.
///
/// Doc targets become routes of that locale, sidebar targets link to the
/// first document of the sidebar. Targets the graph cannot resolve become
/// dead links.
pub fn compose_theme(config: &SiteConfig, graph: &DocGraph) -> ThemeDescriptor {
    let theme = config.theme();
    let locale = graph.locale();

    let mut left = Vec::new();
    let mut right = Vec::new();
    for item in &theme.navbar.items {
        let link = match &item.target {
            NavbarTarget::Doc(id) => {
                ThemeLink::internal(&item.label, graph.route_of(id).map(str::to_string))
            }
            NavbarTarget::DocSidebar(id) => ThemeLink::internal(
                &item.label,
                graph
                    .sidebar(id)
                    .and_then(|s| s.first_route())
                    .map(str::to_string),
            ),
            NavbarTarget::Link(href) => ThemeLink::external(&item.label, href),
        };
        match item.position {
            Position::Left => left.push(link),
            Position::Right => right.push(link),
        }
    }

    let logo = theme.navbar.logo.as_ref().map(|logo| LogoDescriptor {
        alt: logo.alt.clone(),
        src: asset_url(config.base_url(), &logo.src),
        class_name: logo.class_name.clone(),
        height: logo.height.clone(),
    });

    let columns = theme
        .footer
        .sections
        .iter()
        .map(|section| FooterColumn {
            title: section.title.clone(),
            links: section
                .links
                .iter()
                .map(|link| ThemeLink::from_target(config, locale, &link.label, &link.target))
                .collect(),
        })
        .collect();

    let image = theme.image.as_ref().map(|image| {
        let path = asset_url(config.base_url(), image);
        config
            .url()
            .join(&path)
            .map(|u| u.to_string())
            .unwrap_or(path)
    });

    ThemeDescriptor {
        locale: locale.to_string(),
        navbar: NavbarDescriptor {
            title: theme
                .navbar
                .title
                .clone()
                .unwrap_or_else(|| config.title().to_string()),
            home: config.localized_path(locale, "/"),
            logo,
            left,
            right,
        },
        footer: FooterDescriptor {
            style: theme.footer.style.unwrap_or_default(),
            columns,
            copyright: theme.footer.copyright.clone(),
        },
        syntax: SyntaxThemes {
            light: theme
                .prism
                .theme
                .clone()
                .unwrap_or_else(|| DEFAULT_SYNTAX_THEME.to_string()),
            dark: theme
                .prism
                .dark_theme
                .clone()
                .unwrap_or_else(|| DEFAULT_DARK_SYNTAX_THEME.to_string()),
        },
        image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_config::{CliSettings, LinkPolicy, Sidebars};
    use marquee_content::{ContentResolver, ContentTree};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn graph_for(config: &SiteConfig, locale: &str) -> DocGraph {
        let tree = ContentTree::from_sources([
            ("en", "intro.md", "---\ntitle: Intro\n---\n"),
            ("en", "roadmap.md", "---\ntitle: Roadmap\n---\n"),
        ])
        .unwrap();
        let sidebars = Sidebars::from_toml_str(
            "[[tutorialSidebar]]\nlabel = \"Docs\"\nitems = [\"intro\", \"roadmap\"]\n",
            "sidebars.toml",
        )
        .unwrap();
        let resolution = ContentResolver::new(config)
            .with_policy(LinkPolicy::Lenient)
            .resolve(&tree, &sidebars)
            .unwrap();
        resolution.graph(locale).unwrap().clone()
    }

    fn config(extra: &str) -> SiteConfig {
        let content = format!(
            "title = \"Nextino\"\nurl = \"https://nextino.cc\"\ni18n = {{ default_locale = \"en\", locales = [\"en\", \"ka\"] }}\n{}",
            extra
        );
        SiteConfig::from_toml_str(&content, "site.toml", Path::new("/site"), &CliSettings::default())
            .unwrap()
    }

    #[test]
    fn splits_navbar_items_preserving_order() {
        let config = config(
            r#"
[theme.navbar.logo]
alt = "Nextino Logo"
src = "img/logo.svg"
height = "40px"

[[theme.navbar.items]]
type = "docSidebar"
sidebar_id = "tutorialSidebar"
label = "Documentation"

[[theme.navbar.items]]
href = "https://github.com/magradze/nextino"
label = "GitHub"
position = "right"

[[theme.navbar.items]]
type = "doc"
doc_id = "roadmap"
label = "Roadmap"
"#,
        );
        let theme = compose_theme(&config, &graph_for(&config, "ka"));

        let left: Vec<_> = theme
            .navbar
            .left
            .iter()
            .map(|l| (l.label.as_str(), l.href.as_deref()))
            .collect();
        assert_eq!(
            left,
            vec![
                ("Documentation", Some("/ka/intro/")),
                ("Roadmap", Some("/ka/roadmap/")),
            ]
        );
        assert_eq!(theme.navbar.right.len(), 1);
        assert!(theme.navbar.right[0].external);
        assert_eq!(theme.navbar.home, "/ka/");
        assert_eq!(theme.navbar.logo.as_ref().unwrap().src, "/img/logo.svg");
    }

    #[test]
    fn applies_defaults() {
        let config = config("");
        let theme = compose_theme(&config, &graph_for(&config, "en"));

        assert_eq!(theme.footer.style, FooterStyle::Light);
        assert_eq!(
            theme.syntax,
            SyntaxThemes {
                light: "github".to_string(),
                dark: "dracula".to_string(),
            }
        );
        assert_eq!(theme.navbar.title, "Nextino");
        assert!(theme.navbar.logo.is_none());
        assert!(theme.image.is_none());
    }

    #[test]
    fn localizes_footer_links_and_keeps_syntax_pair() {
        let config = config(
            r#"
[theme]
image = "img/social-card.jpg"

[theme.footer]
style = "dark"
copyright = "Copyright © Nextino."

[[theme.footer.links]]
title = "Docs"
[[theme.footer.links.items]]
label = "Tutorial"
to = "/intro"
[[theme.footer.links.items]]
label = "GitHub"
href = "https://github.com/magradze/Nextino"

[theme.prism]
theme = "oneLight"
dark_theme = "oneDark"
"#,
        );
        let theme = compose_theme(&config, &graph_for(&config, "ka"));

        assert_eq!(theme.footer.style, FooterStyle::Dark);
        let links = &theme.footer.columns[0].links;
        assert_eq!(links[0].href.as_deref(), Some("/ka/intro"));
        assert_eq!(
            links[1].href.as_deref(),
            Some("https://github.com/magradze/Nextino")
        );
        assert_eq!(theme.syntax.light, "oneLight");
        assert_eq!(theme.syntax.dark, "oneDark");
        assert_eq!(
            theme.image.as_deref(),
            Some("https://nextino.cc/img/social-card.jpg")
        );
    }

    #[test]
    fn unresolved_targets_are_dead() {
        let config = config(
            "[[theme.navbar.items]]\ntype = \"doc\"\ndoc_id = \"missing\"\nlabel = \"Missing\"\n",
        );
        let theme = compose_theme(&config, &graph_for(&config, "en"));
        assert_eq!(theme.navbar.left[0].href, None);
    }

    #[test]
    fn composing_twice_is_identical() {
        let config = config("");
        let graph = graph_for(&config, "en");
        assert_eq!(compose_theme(&config, &graph), compose_theme(&config, &graph));
    }
}
