//! Resolved per-locale document graph.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use marquee_mdx::ParsedDoc;

/// Resolution state of a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "route", rename_all = "lowercase")]
pub enum LinkState {
    /// Points at this route
    Resolved(String),
    /// Target does not exist; rendered as a dead link
    Dead,
}

impl LinkState {
    pub fn route(&self) -> Option<&str> {
        match self {
            Self::Resolved(route) => Some(route),
            Self::Dead => None,
        }
    }
}

/// A link from a document body to another document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    /// Destination as written in the markdown
    pub raw: String,
    pub state: LinkState,
}

/// One resolved, routable content page within a locale.
#[derive(Debug, Clone, PartialEq)]
pub struct DocNode {
    pub id: String,
    /// base path + locale prefix + route base path + slug
    pub route: String,
    pub locale: String,
    pub title: String,
    /// Label in sidebars; the title when the frontmatter sets none
    pub sidebar_label: String,
    pub description: Option<String>,
    pub sidebar_position: Option<f64>,
    /// Path relative to the docs directory it was read from
    pub source_path: String,
    /// True when the locale has no translation and shows default content
    pub fallback: bool,
    pub body: Arc<ParsedDoc>,
    /// Links to other documents, in body order
    pub links: Vec<ResolvedLink>,
}

impl DocNode {
    /// Resolution of a link destination found in this node's body.
    pub fn link(&self, raw: &str) -> Option<&LinkState> {
        self.links.iter().find(|l| l.raw == raw).map(|l| &l.state)
    }
}

/// A sidebar entry pointing at a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    pub doc_id: String,
    pub label: String,
    /// `None` when the document does not exist
    pub route: Option<String>,
}

/// A labelled group of sidebar entries in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCategory {
    pub label: String,
    pub entries: Vec<SidebarEntry>,
}

/// A sidebar resolved against one locale's documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSidebar {
    pub id: String,
    pub categories: Vec<ResolvedCategory>,
}

impl ResolvedSidebar {
    /// Entries of all categories, in display order.
    pub fn entries(&self) -> impl Iterator<Item = &SidebarEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    /// Route of the first entry that resolves.
    pub fn first_route(&self) -> Option<&str> {
        self.entries().find_map(|e| e.route.as_deref())
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.entries().any(|e| e.doc_id == doc_id)
    }
}

/// All documents of one locale plus its sidebars.
#[derive(Debug, Clone, PartialEq)]
pub struct DocGraph {
    locale: String,
    nodes: Vec<DocNode>,
    by_id: BTreeMap<String, usize>,
    sidebars: BTreeMap<String, ResolvedSidebar>,
}

impl DocGraph {
    pub(crate) fn new(
        locale: String,
        nodes: Vec<DocNode>,
        sidebars: BTreeMap<String, ResolvedSidebar>,
    ) -> Self {
        let by_id = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();
        Self {
            locale,
            nodes,
            by_id,
            sidebars,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Nodes in source order.
    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DocNode> {
        self.by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn route_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|n| n.route.as_str())
    }

    pub fn sidebar(&self, id: &str) -> Option<&ResolvedSidebar> {
        self.sidebars.get(id)
    }

    pub fn sidebars(&self) -> impl Iterator<Item = &ResolvedSidebar> {
        self.sidebars.values()
    }

    /// The first sidebar, in id order, that lists this document.
    pub fn sidebar_for(&self, doc_id: &str) -> Option<&ResolvedSidebar> {
        self.sidebars.values().find(|s| s.contains(doc_id))
    }

    /// Previous and next resolved entries around a document in its sidebar.
    pub fn neighbours(&self, doc_id: &str) -> (Option<&SidebarEntry>, Option<&SidebarEntry>) {
        let Some(sidebar) = self.sidebar_for(doc_id) else {
            return (None, None);
        };

        let entries: Vec<&SidebarEntry> = sidebar.entries().filter(|e| e.route.is_some()).collect();
        let Some(position) = entries.iter().position(|e| e.doc_id == doc_id) else {
            return (None, None);
        };

        let previous = position.checked_sub(1).map(|i| entries[i]);
        let next = entries.get(position + 1).copied();
        (previous, next)
    }
}
