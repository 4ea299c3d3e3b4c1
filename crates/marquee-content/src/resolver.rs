//! Document graph resolution.
//!
//! [`ContentResolver`] turns a [`ContentTree`] and the sidebar layout
//! into one [`DocGraph`] per locale. Locales are independent and resolved in
//! parallel. Every reference (sidebar, navbar, footer, homepage actions,
//! links inside documents) is checked against the graph of its locale, and
//! all violations across all locales are collected before deciding the
//! outcome:
//!
//! - [`LinkPolicy::Strict`]: any broken link fails with
//!   [`ResolveError::BrokenLinks`] listing every violation.
//! - [`LinkPolicy::Lenient`]: broken links become warnings and the affected
//!   links are left [`LinkState::Dead`].
//!
//! Duplicate ids and routes fail with [`ResolveError::Conflicts`] under
//! either policy.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use marquee_config::{
    CategoryItems, LinkPolicy, LinkTarget, NavbarTarget, SidebarCategory, Sidebars, SiteConfig,
};
use marquee_mdx::DocReference;

use crate::diagnostic::{merge, DiagnosticKind, LinkDiagnostic};
use crate::graph::{
    DocGraph, DocNode, LinkState, ResolvedCategory, ResolvedLink, ResolvedSidebar, SidebarEntry,
};
use crate::order::order_by_position;
use crate::tree::{ContentTree, SourceDoc};

/// Errors that abort resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{} broken link(s) found", .0.len())]
    BrokenLinks(Vec<LinkDiagnostic>),

    #[error("{} conflicting document(s) found", .0.len())]
    Conflicts(Vec<LinkDiagnostic>),
}

impl ResolveError {
    pub fn diagnostics(&self) -> &[LinkDiagnostic] {
        match self {
            Self::BrokenLinks(d) | Self::Conflicts(d) => d,
        }
    }
}

/// Per-locale graphs plus the warnings recorded in lenient mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    graphs: Vec<DocGraph>,
    warnings: Vec<LinkDiagnostic>,
}

impl Resolution {
    /// Graphs in locale declaration order.
    pub fn graphs(&self) -> &[DocGraph] {
        &self.graphs
    }

    pub fn graph(&self, locale: &str) -> Option<&DocGraph> {
        self.graphs.iter().find(|g| g.locale() == locale)
    }

    pub fn warnings(&self) -> &[LinkDiagnostic] {
        &self.warnings
    }

    /// Number of nodes over all locales.
    pub fn node_count(&self) -> usize {
        self.graphs.iter().map(DocGraph::len).sum()
    }
}

/// Builds validated per-locale document graphs.
pub struct ContentResolver<'a> {
    config: &'a SiteConfig,
    policy: LinkPolicy,
}

impl<'a> ContentResolver<'a> {
    /// Create a resolver using the configured link policy.
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            policy: config.link_policy(),
        }
    }

    /// Override the link policy.
    pub fn with_policy(mut self, policy: LinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    /// Resolve every locale selected for build.
    pub fn resolve(
        &self,
        tree: &ContentTree,
        sidebars: &Sidebars,
    ) -> Result<Resolution, ResolveError> {
        let locales = self.config.build_locales();

        let results: Vec<(DocGraph, Vec<LinkDiagnostic>)> = locales
            .par_iter()
            .map(|locale| self.build_graph(locale, tree, sidebars))
            .collect();

        let mut graphs = Vec::with_capacity(results.len());
        let mut diagnostics = Vec::new();
        for (graph, found) in results {
            tracing::debug!("Resolved {} documents for `{}`", graph.len(), graph.locale());
            graphs.push(graph);
            diagnostics.extend(found);
        }

        let diagnostics = merge(diagnostics);
        let (conflicts, broken): (Vec<_>, Vec<_>) =
            diagnostics.into_iter().partition(|d| d.kind.is_conflict());

        if !conflicts.is_empty() {
            let mut fatal = conflicts;
            if self.policy == LinkPolicy::Strict {
                fatal.extend(broken);
            } else {
                warn_all(&broken);
            }
            for diagnostic in &fatal {
                tracing::error!("{}", diagnostic);
            }
            return Err(ResolveError::Conflicts(fatal));
        }

        match self.policy {
            LinkPolicy::Strict if !broken.is_empty() => {
                for diagnostic in &broken {
                    tracing::error!("{}", diagnostic);
                }
                Err(ResolveError::BrokenLinks(broken))
            }
            _ => {
                warn_all(&broken);
                Ok(Resolution {
                    graphs,
                    warnings: broken,
                })
            }
        }
    }

    fn build_graph(
        &self,
        locale: &str,
        tree: &ContentTree,
        sidebars: &Sidebars,
    ) -> (DocGraph, Vec<LinkDiagnostic>) {
        let mut diagnostics = Vec::new();
        let chosen = self.select_docs(locale, tree, &mut diagnostics);

        // Routes first, links need every route of the locale.
        let home_route = self.config.localized_path(locale, "/");
        let mut routes: BTreeMap<String, &str> = BTreeMap::new();
        if self.config.homepage().is_some() {
            routes.insert(home_route.clone(), "homepage");
        }

        let mut by_id: BTreeMap<&str, String> = BTreeMap::new();
        let mut by_path: BTreeMap<&str, String> = BTreeMap::new();
        let mut placed: Vec<(&SourceDoc, bool, String)> = Vec::with_capacity(chosen.len());

        for (source, fallback) in chosen {
            let route = self.route_for(locale, &source.slug);
            if let Some(existing) = routes.get(&route) {
                tracing::debug!("`{}` and `{}` share {}", existing, source.id, route);
                diagnostics.push(LinkDiagnostic::new(
                    DiagnosticKind::DuplicateRoute,
                    source.file.display().to_string(),
                    route,
                    locale,
                ));
                continue;
            }
            routes.insert(route.clone(), &source.id);
            by_id.insert(&source.id, route.clone());
            by_path.insert(&source.relative_path, route.clone());
            placed.push((source, fallback, route));
        }

        let mut nodes = Vec::with_capacity(placed.len());
        for (source, fallback, route) in placed {
            let links = source
                .doc
                .references
                .iter()
                .map(|reference| {
                    let target = match reference {
                        DocReference::Id { id, .. } => by_id.get(id.as_str()),
                        DocReference::Path { path, .. } => {
                            normalize_relative(source.dir(), path)
                                .and_then(|p| by_path.get(p.as_str()))
                        }
                    };
                    let state = match target {
                        Some(route) => LinkState::Resolved(match reference.fragment() {
                            Some(fragment) => format!("{}#{}", route, fragment),
                            None => route.clone(),
                        }),
                        None => {
                            diagnostics.push(LinkDiagnostic::new(
                                DiagnosticKind::BrokenLink,
                                source.file.display().to_string(),
                                reference.raw(),
                                locale,
                            ));
                            LinkState::Dead
                        }
                    };
                    ResolvedLink {
                        raw: reference.raw().to_string(),
                        state,
                    }
                })
                .collect();

            let frontmatter = &source.doc.frontmatter;
            nodes.push(DocNode {
                id: source.id.clone(),
                route,
                locale: locale.to_string(),
                title: frontmatter.title.clone(),
                sidebar_label: frontmatter
                    .sidebar_label
                    .clone()
                    .unwrap_or_else(|| frontmatter.title.clone()),
                description: frontmatter.description.clone(),
                sidebar_position: frontmatter.sidebar_position,
                source_path: source.relative_path.clone(),
                fallback,
                body: source.doc.clone(),
                links,
            });
        }

        let resolved_sidebars = sidebars
            .iter()
            .map(|(id, categories)| {
                let sidebar = self.resolve_sidebar(locale, id, categories, &nodes, &mut diagnostics);
                (id.to_string(), sidebar)
            })
            .collect();

        let graph = DocGraph::new(locale.to_string(), nodes, resolved_sidebars);
        self.check_theme_links(locale, &graph, sidebars, &routes, &mut diagnostics);

        (graph, diagnostics)
    }

    /// Documents shown in a locale: translations where they exist, default
    /// content otherwise, then translation-only documents.
    fn select_docs<'t>(
        &self,
        locale: &str,
        tree: &'t ContentTree,
        diagnostics: &mut Vec<LinkDiagnostic>,
    ) -> Vec<(&'t SourceDoc, bool)> {
        let default_locale = self.config.default_locale();
        let own = unique_by_id(tree.docs_for(locale), locale, diagnostics);

        if locale == default_locale {
            return own.into_iter().map(|doc| (doc, false)).collect();
        }

        // Duplicates in the default tree are reported by the default locale's graph.
        let defaults = unique_by_id(tree.docs_for(default_locale), locale, &mut Vec::new());
        let translated: BTreeMap<&str, &SourceDoc> =
            own.iter().copied().map(|doc| (doc.id.as_str(), doc)).collect();

        let mut chosen: Vec<(&SourceDoc, bool)> = defaults
            .iter()
            .map(|doc| match translated.get(doc.id.as_str()) {
                Some(translation) => (*translation, false),
                None => (*doc, true),
            })
            .collect();

        let default_ids: BTreeSet<&str> = defaults.iter().map(|d| d.id.as_str()).collect();
        chosen.extend(
            own.into_iter()
                .filter(|doc| !default_ids.contains(doc.id.as_str()))
                .map(|doc| (doc, false)),
        );

        chosen
    }

    fn route_for(&self, locale: &str, slug: &str) -> String {
        let base = self.config.docs_base(locale);
        if slug.is_empty() {
            base
        } else {
            format!("{}{}/", base, slug)
        }
    }

    fn resolve_sidebar(
        &self,
        locale: &str,
        id: &str,
        categories: &[SidebarCategory],
        nodes: &[DocNode],
        diagnostics: &mut Vec<LinkDiagnostic>,
    ) -> ResolvedSidebar {
        let lookup: BTreeMap<&str, &DocNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let categories = categories
            .iter()
            .map(|category| {
                let declared: Vec<(String, Option<f64>)> = match &category.items {
                    CategoryItems::Docs(ids) => ids
                        .iter()
                        .map(|doc_id| {
                            let position =
                                lookup.get(doc_id.as_str()).and_then(|n| n.sidebar_position);
                            (doc_id.clone(), position)
                        })
                        .collect(),
                    CategoryItems::Autogenerated(dir) => nodes
                        .iter()
                        .filter(|n| in_directory(&n.source_path, dir))
                        .map(|n| (n.id.clone(), n.sidebar_position))
                        .collect(),
                };

                let entries = order_by_position(declared)
                    .into_iter()
                    .map(|doc_id| match lookup.get(doc_id.as_str()) {
                        Some(node) => SidebarEntry {
                            label: node.sidebar_label.clone(),
                            route: Some(node.route.clone()),
                            doc_id,
                        },
                        None => {
                            diagnostics.push(LinkDiagnostic::new(
                                DiagnosticKind::BrokenLink,
                                format!("sidebar `{}`", id),
                                doc_id.clone(),
                                locale,
                            ));
                            SidebarEntry {
                                label: doc_id.clone(),
                                route: None,
                                doc_id,
                            }
                        }
                    })
                    .collect();

                ResolvedCategory {
                    label: category.label.clone(),
                    entries,
                }
            })
            .collect();

        ResolvedSidebar {
            id: id.to_string(),
            categories,
        }
    }

    /// Navbar, footer and homepage action targets.
    fn check_theme_links(
        &self,
        locale: &str,
        graph: &DocGraph,
        sidebars: &Sidebars,
        routes: &BTreeMap<String, &str>,
        diagnostics: &mut Vec<LinkDiagnostic>,
    ) {
        let theme = self.config.theme();

        for item in &theme.navbar.items {
            let missing = match &item.target {
                NavbarTarget::Doc(doc_id) => graph.get(doc_id).is_none().then_some(doc_id),
                NavbarTarget::DocSidebar(sidebar_id) => {
                    (!sidebars.contains(sidebar_id)).then_some(sidebar_id)
                }
                NavbarTarget::Link(_) => None,
            };
            if let Some(target) = missing {
                diagnostics.push(LinkDiagnostic::new(
                    DiagnosticKind::BrokenLink,
                    format!("navbar `{}`", item.label),
                    target.clone(),
                    locale,
                ));
            }
        }

        for section in &theme.footer.sections {
            for link in &section.links {
                if let LinkTarget::Internal(path) = &link.target {
                    if !self.internal_exists(locale, path, routes) {
                        diagnostics.push(LinkDiagnostic::new(
                            DiagnosticKind::BrokenLink,
                            format!("footer `{}/{}`", section.title, link.label),
                            path.clone(),
                            locale,
                        ));
                    }
                }
            }
        }

        if let Some(homepage) = self.config.homepage() {
            for action in &homepage.hero.actions {
                if let LinkTarget::Internal(path) = &action.target {
                    if !self.internal_exists(locale, path, routes) {
                        diagnostics.push(LinkDiagnostic::new(
                            DiagnosticKind::BrokenLink,
                            format!("homepage `{}`", action.label),
                            path.clone(),
                            locale,
                        ));
                    }
                }
            }
        }
    }

    /// Whether a site-relative path names a page of the locale or a static file.
    fn internal_exists(&self, locale: &str, path: &str, routes: &BTreeMap<String, &str>) -> bool {
        let path = path.split(['#', '?']).next().unwrap_or("");

        let mut route = self.config.localized_path(locale, path);
        if !route.ends_with('/') {
            route.push('/');
        }
        if routes.contains_key(&route) {
            return true;
        }

        let relative = path.trim_start_matches('/');
        !relative.is_empty() && self.config.static_dir().join(relative).is_file()
    }
}

fn warn_all(diagnostics: &[LinkDiagnostic]) {
    for diagnostic in diagnostics {
        tracing::warn!("{}", diagnostic);
    }
}

/// Keep the first document per id, reporting later ones as duplicates.
fn unique_by_id<'t>(
    docs: impl Iterator<Item = &'t SourceDoc>,
    locale: &str,
    diagnostics: &mut Vec<LinkDiagnostic>,
) -> Vec<&'t SourceDoc> {
    let mut seen = BTreeSet::new();
    let mut unique = Vec::new();
    for doc in docs {
        if seen.insert(doc.id.as_str()) {
            unique.push(doc);
        } else {
            diagnostics.push(LinkDiagnostic::new(
                DiagnosticKind::DuplicateId,
                doc.file.display().to_string(),
                doc.id.clone(),
                locale,
            ));
        }
    }
    unique
}

/// Whether `path` lies below `dir` (`"."` and `""` match everything).
fn in_directory(path: &str, dir: &str) -> bool {
    let dir = dir.trim_matches('/');
    if dir.is_empty() || dir == "." {
        return true;
    }
    path.strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Join a relative link onto the linking file's directory.
///
/// Returns `None` when the path climbs above the docs root.
fn normalize_relative(dir: &str, link: &str) -> Option<String> {
    let mut segments: Vec<&str> = if link.starts_with('/') {
        Vec::new()
    } else {
        dir.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in link.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_config::CliSettings;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const SITE: &str = r#"
title = "Nextino"
url = "https://nextino.cc"
i18n = { default_locale = "en", locales = ["en", "ka"] }
"#;

    fn config(extra: &str) -> SiteConfig {
        SiteConfig::from_toml_str(
            &format!("{}{}", SITE, extra),
            "site.toml",
            Path::new("/nonexistent"),
            &CliSettings::default(),
        )
        .unwrap()
    }

    fn doc(title: &str, extra: &str) -> String {
        format!("---\ntitle: {}\n{}---\n\n# {}\n", title, extra, title)
    }

    fn sidebars(items: &[&str]) -> Sidebars {
        let list = items
            .iter()
            .map(|i| format!("\"{}\"", i))
            .collect::<Vec<_>>()
            .join(", ");
        Sidebars::from_toml_str(
            &format!("[[tutorialSidebar]]\nlabel = \"Docs\"\nitems = [{}]\n", list),
            "sidebars.toml",
        )
        .unwrap()
    }

    fn basic_tree() -> ContentTree {
        let intro = doc("Intro", "sidebar_position: 1\n");
        let roadmap = doc("Roadmap", "");
        ContentTree::from_sources([
            ("en", "intro.md", intro.as_str()),
            ("en", "roadmap.md", roadmap.as_str()),
        ])
        .unwrap()
    }

    #[test]
    fn builds_one_graph_per_locale_with_fallbacks() {
        let config = config("");
        let resolution = ContentResolver::new(&config)
            .resolve(&basic_tree(), &sidebars(&["intro", "roadmap"]))
            .unwrap();

        assert_eq!(resolution.graphs().len(), 2);
        assert_eq!(resolution.node_count(), 4);
        assert!(resolution.warnings().is_empty());

        let en = resolution.graph("en").unwrap();
        assert_eq!(en.route_of("intro"), Some("/intro/"));
        assert!(!en.get("intro").unwrap().fallback);

        let ka = resolution.graph("ka").unwrap();
        assert_eq!(ka.route_of("roadmap"), Some("/ka/roadmap/"));
        assert!(ka.get("roadmap").unwrap().fallback);
    }

    #[test]
    fn routes_are_unique_per_locale() {
        let config = config("");
        let sources: Vec<(String, String)> = (0..20)
            .map(|i| (format!("section-{}/page-{}.md", i % 4, i), doc(&format!("Page {}", i), "")))
            .collect();
        let tree = ContentTree::from_sources(
            sources.iter().map(|(p, s)| ("en", p.as_str(), s.as_str())),
        )
        .unwrap();

        let resolution = ContentResolver::new(&config)
            .resolve(&tree, &Sidebars::default())
            .unwrap();

        for graph in resolution.graphs() {
            assert_eq!(graph.len(), 20);
            let routes: BTreeSet<&str> = graph.nodes().iter().map(|n| n.route.as_str()).collect();
            assert_eq!(routes.len(), 20);
        }
    }

    #[test]
    fn resolving_twice_is_identical() {
        let config = config("");
        let tree = basic_tree();
        let sidebars = sidebars(&["roadmap", "intro"]);
        let resolver = ContentResolver::new(&config);

        let first = resolver.resolve(&tree, &sidebars).unwrap();
        let second = resolver.resolve(&tree, &sidebars).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn translations_replace_default_content() {
        let config = config("");
        let intro = doc("Intro", "");
        let intro_ka = doc("შესავალი", "");
        let extra_ka = doc("Local news", "");
        let tree = ContentTree::from_sources([
            ("en", "intro.md", intro.as_str()),
            ("ka", "intro.md", intro_ka.as_str()),
            ("ka", "news.md", extra_ka.as_str()),
        ])
        .unwrap();

        let resolution = ContentResolver::new(&config)
            .resolve(&tree, &Sidebars::default())
            .unwrap();

        let ka = resolution.graph("ka").unwrap();
        assert_eq!(ka.get("intro").unwrap().title, "შესავალი");
        assert!(!ka.get("intro").unwrap().fallback);
        assert_eq!(ka.route_of("news"), Some("/ka/news/"));
        assert_eq!(resolution.graph("en").unwrap().len(), 1);
    }

    #[test]
    fn sidebar_orders_by_position_then_declaration() {
        let config = config("");
        let a = doc("A", "");
        let b = doc("B", "sidebar_position: 1\n");
        let c = doc("C", "");
        let tree = ContentTree::from_sources([
            ("en", "a.md", a.as_str()),
            ("en", "b.md", b.as_str()),
            ("en", "c.md", c.as_str()),
        ])
        .unwrap();

        let resolution = ContentResolver::new(&config)
            .resolve(&tree, &sidebars(&["a", "c", "b"]))
            .unwrap();
        let sidebar = resolution.graph("en").unwrap().sidebar("tutorialSidebar").unwrap();
        let order: Vec<_> = sidebar.entries().map(|e| e.doc_id.as_str()).collect();

        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn autogenerated_categories_take_a_directory() {
        let config = config("");
        let intro = doc("Intro", "");
        let scheduler = doc("Scheduler", "sidebar_position: 2\n");
        let bus = doc("Event Bus", "sidebar_position: 1\n");
        let tree = ContentTree::from_sources([
            ("en", "intro.md", intro.as_str()),
            ("en", "core/scheduler.md", scheduler.as_str()),
            ("en", "core/event-bus.md", bus.as_str()),
        ])
        .unwrap();
        let sidebars = Sidebars::from_toml_str(
            "[[main]]\nlabel = \"Core\"\nautogenerated = \"core\"\n",
            "sidebars.toml",
        )
        .unwrap();

        let resolution = ContentResolver::new(&config).resolve(&tree, &sidebars).unwrap();
        let graph = resolution.graph("en").unwrap();
        let order: Vec<_> = graph
            .sidebar("main")
            .unwrap()
            .entries()
            .map(|e| e.doc_id.as_str())
            .collect();

        assert_eq!(order, vec!["core/event-bus", "core/scheduler"]);
        assert_eq!(graph.neighbours("core/scheduler").0.unwrap().doc_id, "core/event-bus");
    }

    #[test]
    fn strict_mode_collects_every_broken_link() {
        let config = config("");
        let linking = doc("Intro", "");
        let linking = format!("{}See [gone](./gone.md) and [also gone](doc:nope).\n", linking);
        let roadmap = doc("Roadmap", "");
        let tree = ContentTree::from_sources([
            ("en", "intro.md", linking.as_str()),
            ("en", "roadmap.md", roadmap.as_str()),
        ])
        .unwrap();

        let result = ContentResolver::new(&config)
            .resolve(&tree, &sidebars(&["intro", "roadmap", "missing-doc"]));

        match result {
            Err(ResolveError::BrokenLinks(diagnostics)) => {
                let targets: Vec<_> = diagnostics.iter().map(|d| d.target.as_str()).collect();
                assert_eq!(targets, vec!["./gone.md", "doc:nope", "missing-doc"]);
                assert!(diagnostics.iter().all(|d| d.locales == vec!["en", "ka"]));
            }
            other => panic!("expected broken links, got {:?}", other),
        }
    }

    #[test]
    fn lenient_mode_records_warnings_and_dead_links() {
        let config = config("on_broken_links = \"warn\"\n");
        let intro = format!("{}[gone](./gone.md)\n", doc("Intro", ""));
        let tree = ContentTree::from_sources([("en", "intro.md", intro.as_str())]).unwrap();

        let resolution = ContentResolver::new(&config)
            .resolve(&tree, &sidebars(&["intro", "missing-doc"]))
            .unwrap();

        assert_eq!(resolution.warnings().len(), 2);
        let en = resolution.graph("en").unwrap();
        assert_eq!(en.get("intro").unwrap().link("./gone.md"), Some(&LinkState::Dead));
        let entries: Vec<_> = en.sidebar("tutorialSidebar").unwrap().entries().collect();
        assert_eq!(entries[1].route, None);
    }

    #[test]
    fn same_input_strict_fails_lenient_warns() {
        let config = config("");
        let tree = basic_tree();
        let sidebars = sidebars(&["intro", "roadmap", "missing-doc"]);

        let strict = ContentResolver::new(&config).resolve(&tree, &sidebars);
        assert!(matches!(strict, Err(ResolveError::BrokenLinks(ref d)) if d.len() == 1));

        let lenient = ContentResolver::new(&config)
            .with_policy(LinkPolicy::Lenient)
            .resolve(&tree, &sidebars)
            .unwrap();
        assert_eq!(lenient.warnings().len(), 1);
        assert_eq!(lenient.warnings()[0].target, "missing-doc");
    }

    #[test]
    fn resolves_relative_links_with_fragments() {
        let config = config("");
        let intro = format!("{}[Scheduler](core/scheduler.md#tasks)\n", doc("Intro", ""));
        let scheduler = format!("{}[Back](../intro.md)\n", doc("Scheduler", ""));
        let tree = ContentTree::from_sources([
            ("en", "intro.md", intro.as_str()),
            ("en", "core/scheduler.md", scheduler.as_str()),
        ])
        .unwrap();

        let resolution = ContentResolver::new(&config)
            .resolve(&tree, &Sidebars::default())
            .unwrap();
        let ka = resolution.graph("ka").unwrap();

        assert_eq!(
            ka.get("intro").unwrap().link("core/scheduler.md#tasks"),
            Some(&LinkState::Resolved("/ka/core/scheduler/#tasks".to_string()))
        );
        assert_eq!(
            ka.get("core/scheduler").unwrap().link("../intro.md"),
            Some(&LinkState::Resolved("/ka/intro/".to_string()))
        );
    }

    #[test]
    fn duplicate_ids_and_routes_are_conflicts_in_both_modes() {
        let config = config("on_broken_links = \"warn\"\n");
        let a = doc("A", "id: same\n");
        let b = doc("B", "id: same\n");
        let tree =
            ContentTree::from_sources([("en", "a.md", a.as_str()), ("en", "b.md", b.as_str())])
                .unwrap();

        let result = ContentResolver::new(&config).resolve(&tree, &Sidebars::default());
        match result {
            Err(ResolveError::Conflicts(d)) => {
                assert_eq!(d.len(), 1);
                assert_eq!(d[0].kind, DiagnosticKind::DuplicateId);
                assert_eq!(d[0].target, "same");
            }
            other => panic!("expected conflict, got {:?}", other),
        }

        let c = doc("C", "slug: shared\n");
        let d = doc("D", "slug: /shared/\n");
        let tree =
            ContentTree::from_sources([("en", "c.md", c.as_str()), ("en", "d.md", d.as_str())])
                .unwrap();
        let result = ContentResolver::new(&config).resolve(&tree, &Sidebars::default());
        assert!(
            matches!(result, Err(ResolveError::Conflicts(ref d)) if d[0].kind == DiagnosticKind::DuplicateRoute)
        );
    }

    #[test]
    fn checks_navbar_footer_and_homepage_targets() {
        let config = config(
            r#"
[[theme.navbar.items]]
type = "doc"
doc_id = "roadmap"
label = "Roadmap"

[[theme.navbar.items]]
type = "docSidebar"
sidebar_id = "apiSidebar"
label = "API"

[[theme.footer.links]]
title = "Docs"
[[theme.footer.links.items]]
label = "Tutorial"
to = "/intro"
[[theme.footer.links.items]]
label = "Blog"
to = "/blog"

[homepage.hero]
[[homepage.hero.actions]]
label = "Get Started"
to = "/docs/intro"
"#,
        );
        let intro = doc("Intro", "");
        let tree = ContentTree::from_sources([("en", "intro.md", intro.as_str())]).unwrap();

        let result = ContentResolver::new(&config).resolve(&tree, &sidebars(&["intro"]));
        let diagnostics = match result {
            Err(ResolveError::BrokenLinks(d)) => d,
            other => panic!("expected broken links, got {:?}", other),
        };
        let found: Vec<_> = diagnostics
            .iter()
            .map(|d| (d.source.as_str(), d.target.as_str()))
            .collect();

        assert_eq!(
            found,
            vec![
                ("footer `Docs/Blog`", "/blog"),
                ("homepage `Get Started`", "/docs/intro"),
                ("navbar `API`", "apiSidebar"),
                ("navbar `Roadmap`", "roadmap"),
            ]
        );
    }

    #[test]
    fn normalizes_relative_paths() {
        assert_eq!(normalize_relative("core", "./scheduler.md"), Some("core/scheduler.md".into()));
        assert_eq!(normalize_relative("core", "../intro.md"), Some("intro.md".into()));
        assert_eq!(normalize_relative("core", "/intro.md"), Some("intro.md".into()));
        assert_eq!(normalize_relative("", "../intro.md"), None);
    }

    #[test]
    fn directory_matching() {
        assert!(in_directory("core/scheduler.md", "core"));
        assert!(in_directory("core/deep/x.md", "core/"));
        assert!(!in_directory("corelib.md", "core"));
        assert!(in_directory("anything.md", "."));
    }
}
