//! Page composition.
//!
//! Pages are typed trees. The homepage is always header, then feature grid,
//! then narrative. Doc pages carry their sidebar, table of contents and
//! sidebar neighbours.

use serde::Serialize;

use marquee_config::{ActionStyle, Homepage, SiteConfig};
use marquee_content::{DocGraph, DocNode, SidebarEntry};

use crate::assets::asset_url;
use crate::features::FeatureFragment;
use crate::markdown::{render_block, render_doc};
use crate::theme::{ThemeDescriptor, ThemeLink};

/// Headings deeper than this stay out of the table of contents.
const TOC_MAX_LEVEL: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub link: ThemeLink,
    pub style: ActionStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroHeader {
    pub logo: Option<Image>,
    pub title: String,
    pub tagline: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureGrid {
    pub features: Vec<FeatureFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeSection {
    pub heading: String,
    pub body_html: String,
}

/// The landing page of a locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub locale: String,
    pub route: String,
    /// Content of `<title>`
    pub document_title: String,
    pub description: Option<String>,
    pub header: HeroHeader,
    /// `None` when no features are configured
    pub features: Option<FeatureGrid>,
    pub narrative: Option<NarrativeSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    pub title: String,
    pub id: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub label: String,
    /// `None` for a dead entry
    pub href: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    pub label: String,
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub label: String,
    pub href: String,
}

/// A rendered documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocPage {
    pub locale: String,
    pub id: String,
    pub route: String,
    pub title: String,
    pub document_title: String,
    pub description: Option<String>,
    pub body_html: String,
    pub toc: Vec<TocItem>,
    pub sidebar: Vec<SidebarGroup>,
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
    pub edit_url: Option<String>,
    /// Shown in the default locale because no translation exists
    pub fallback: bool,
}

/// Compose the landing page of `locale` from the config's homepage content.
pub fn compose_homepage(
    config: &SiteConfig,
    homepage: &Homepage,
    theme: &ThemeDescriptor,
    fragments: Vec<FeatureFragment>,
    locale: &str,
) -> HomePage {
    let hero = &homepage.hero;

    let actions = hero
        .actions
        .iter()
        .map(|action| Action {
            link: ThemeLink::from_target(config, locale, &action.label, &action.target),
            style: action.style,
        })
        .collect();

    let features = if fragments.is_empty() {
        tracing::warn!("Homepage for `{}` has no features, rendering without a grid", locale);
        None
    } else {
        Some(FeatureGrid {
            features: fragments,
        })
    };

    HomePage {
        locale: locale.to_string(),
        route: config.localized_path(locale, "/"),
        document_title: document_title(&homepage.title, theme),
        description: homepage.description.clone(),
        header: HeroHeader {
            logo: hero.logo.as_ref().map(|logo| Image {
                src: asset_url(config.base_url(), &logo.src),
                alt: logo.alt.clone(),
                width: logo.width,
            }),
            title: hero.title.clone(),
            tagline: hero.tagline.clone(),
            actions,
        },
        features,
        narrative: homepage.narrative.as_ref().map(|n| NarrativeSection {
            heading: n.heading.clone(),
            body_html: render_block(&n.body),
        }),
    }
}

/// Compose the page of one document.
pub fn compose_doc_page(
    config: &SiteConfig,
    theme: &ThemeDescriptor,
    graph: &DocGraph,
    node: &DocNode,
) -> DocPage {
    let toc = node
        .body
        .toc
        .iter()
        .filter(|e| (2..=TOC_MAX_LEVEL).contains(&e.level))
        .map(|e| TocItem {
            title: e.title.clone(),
            id: e.id.clone(),
            level: e.level,
        })
        .collect();

    let sidebar = graph
        .sidebar_for(&node.id)
        .map(|sidebar| {
            sidebar
                .categories
                .iter()
                .map(|category| SidebarGroup {
                    label: category.label.clone(),
                    items: category
                        .entries
                        .iter()
                        .map(|entry| SidebarItem {
                            label: entry.label.clone(),
                            href: entry.route.clone(),
                            active: entry.doc_id == node.id,
                        })
                        .collect(),
                })
                .collect()
        })
        .unwrap_or_default();

    let (previous, next) = graph.neighbours(&node.id);

    DocPage {
        locale: node.locale.clone(),
        id: node.id.clone(),
        route: node.route.clone(),
        title: node.title.clone(),
        document_title: document_title(&node.title, theme),
        description: node.description.clone(),
        body_html: render_doc(node, config.markdown()),
        toc,
        sidebar,
        previous: previous.and_then(page_link),
        next: next.and_then(page_link),
        edit_url: edit_url(config, node),
        fallback: node.fallback,
    }
}

fn page_link(entry: &SidebarEntry) -> Option<PageLink> {
    entry.route.as_ref().map(|route| PageLink {
        label: entry.label.clone(),
        href: route.clone(),
    })
}

fn document_title(title: &str, theme: &ThemeDescriptor) -> String {
    if title == theme.navbar.title {
        title.to_string()
    } else {
        format!("{} | {}", title, theme.navbar.title)
    }
}

/// Edit links point into the default docs tree, so translations have none.
fn edit_url(config: &SiteConfig, node: &DocNode) -> Option<String> {
    let base = config.docs().edit_url.as_deref()?;
    if !config.is_default_locale(&node.locale) && !node.fallback {
        return None;
    }
    Some(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        node.source_path
    ))
}
