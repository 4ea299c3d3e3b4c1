//! Static site builder.
//!
//! A build resolves all content first, checks assets, renders every locale
//! into a staging directory next to the output directory and only then
//! swaps the staging directory into place. A failed build leaves the
//! previous output untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use marquee_config::{ConfigError, SiteConfig};
use marquee_content::{
    ContentError, ContentResolver, ContentTree, DocGraph, LinkDiagnostic, Resolution,
    ResolveError, ResolvedSidebar,
};

use crate::assets::{asset_url, AssetPipeline, MissingAsset};
use crate::features::render_features;
use crate::page::{compose_doc_page, compose_homepage};
use crate::templates::{Alternate, Head, TemplateEngine};
use crate::theme::{compose_theme, ThemeDescriptor};

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated, over all locales
    pub pages: usize,

    /// Locales built
    pub locales: usize,

    /// Broken links tolerated in lenient mode
    pub warnings: Vec<LinkDiagnostic>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("{} referenced asset(s) missing", .0.len())]
    MissingAssets(Vec<MissingAsset>),

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to serialize site metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<minijinja::Error> for BuildError {
    fn from(e: minijinja::Error) -> Self {
        Self::Template(e.to_string())
    }
}

/// Static site builder.
pub struct StaticBuilder {
    config: SiteConfig,
    templates: TemplateEngine,
    inline_script: Option<String>,
}

impl StaticBuilder {
    /// Create a builder for a validated configuration.
    pub fn new(config: SiteConfig) -> Result<Self, BuildError> {
        Ok(Self {
            config,
            templates: TemplateEngine::new()?,
            inline_script: None,
        })
    }

    /// Inline a script into every page, e.g. a live reload client.
    pub fn with_inline_script(mut self, script: impl Into<String>) -> Self {
        self.inline_script = Some(script.into());
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Build the static site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let sidebars = self.config.load_sidebars()?;
        let tree = ContentTree::scan(&self.config)?;
        tracing::info!("Found {} source documents", tree.len());

        let resolution = ContentResolver::new(&self.config).resolve(&tree, &sidebars)?;

        let missing = AssetPipeline::check(&self.config);
        if !missing.is_empty() {
            for asset in &missing {
                tracing::error!("{}", asset);
            }
            return Err(BuildError::MissingAssets(missing));
        }

        let output_dir = self.config.output_dir();
        let parent = output_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(|source| write_error(parent, source))?;

        let staging = tempfile::Builder::new()
            .prefix(".marquee-staging-")
            .tempdir_in(parent)
            .map_err(|source| write_error(parent, source))?;
        tracing::debug!("Staging build in {}", staging.path().display());

        let pages = self.render_site(staging.path(), &resolution)?;

        publish(staging.path(), output_dir)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages,
            locales: resolution.graphs().len(),
            warnings: resolution.warnings().to_vec(),
            duration_ms: duration.as_millis() as u64,
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Render everything into `root`. Returns the number of pages written.
    fn render_site(&self, root: &Path, resolution: &Resolution) -> Result<usize, BuildError> {
        AssetPipeline::copy_static(self.config.static_dir(), root)
            .map_err(|source| write_error(self.config.static_dir(), source))?;
        self.generate_assets(root)?;

        let rendered: Vec<Result<(usize, ThemeDescriptor), BuildError>> = resolution
            .graphs()
            .par_iter()
            .map(|graph| self.render_locale(root, graph, resolution))
            .collect();

        let mut pages = 0;
        let mut themes = BTreeMap::new();
        for result in rendered {
            let (count, theme) = result?;
            pages += count;
            themes.insert(theme.locale.clone(), theme);
        }

        self.generate_sitemap(root, resolution)?;
        self.generate_metadata(root, resolution, themes)?;

        Ok(pages)
    }

    fn render_locale(
        &self,
        root: &Path,
        graph: &DocGraph,
        resolution: &Resolution,
    ) -> Result<(usize, ThemeDescriptor), BuildError> {
        let locale = graph.locale();
        let theme = compose_theme(&self.config, graph);
        let mut pages = 0;

        if let Some(homepage) = self.config.homepage() {
            let fragments = render_features(&homepage.features, self.config.base_url());
            let page = compose_homepage(&self.config, homepage, &theme, fragments, locale);
            let alternates = self
                .config
                .build_locales()
                .into_iter()
                .map(|l| Alternate {
                    lang: l.to_string(),
                    href: self.absolute(&self.config.localized_path(l, "/")),
                })
                .collect();
            let head = self.head(
                locale,
                &page.document_title,
                page.description.as_deref(),
                &page.route,
                alternates,
            );
            let html = self.templates.render_home(&page, &theme, &head)?;
            write_file(&self.route_file(root, &page.route), html)?;
            pages += 1;
        }

        let written: Vec<Result<(), BuildError>> = graph
            .nodes()
            .par_iter()
            .map(|node| {
                let page = compose_doc_page(&self.config, &theme, graph, node);
                let alternates = resolution
                    .graphs()
                    .iter()
                    .filter_map(|g| {
                        g.route_of(&node.id).map(|route| Alternate {
                            lang: g.locale().to_string(),
                            href: self.absolute(route),
                        })
                    })
                    .collect();
                let head = self.head(
                    locale,
                    &page.document_title,
                    page.description.as_deref(),
                    &page.route,
                    alternates,
                );
                let html = self.templates.render_doc(&page, &theme, &head)?;
                write_file(&self.route_file(root, &page.route), html)
            })
            .collect();

        for result in written {
            result?;
            pages += 1;
        }

        let not_found_title = format!("Page Not Found | {}", theme.navbar.title);
        let home = self.config.localized_path(locale, "/");
        let head = self.head(locale, &not_found_title, None, &home, Vec::new());
        let html = self.templates.render_not_found(&theme, &head)?;
        let file = root
            .join(self.config.locale_prefix(locale))
            .join("404.html");
        write_file(&file, html)?;

        tracing::info!("Rendered {} pages for `{}`", pages, locale);
        Ok((pages, theme))
    }

    fn head(
        &self,
        locale: &str,
        title: &str,
        description: Option<&str>,
        route: &str,
        alternates: Vec<Alternate>,
    ) -> Head {
        let base = self.config.base_url();
        let mut stylesheets = vec![format!("{}assets/main.css", base)];
        if self.config.custom_css().is_some() {
            stylesheets.push(format!("{}assets/custom.css", base));
        }

        Head {
            lang: locale.to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            base_url: base.to_string(),
            canonical: self.absolute(route),
            favicon: self.config.favicon().map(|f| asset_url(base, f)),
            stylesheets,
            scripts: vec![format!("{}assets/main.js", base)],
            mermaid: self.config.markdown().mermaid,
            alternates,
            inline_script: self.inline_script.clone(),
        }
    }

    /// Absolute URL of a route on the production site.
    fn absolute(&self, route: &str) -> String {
        self.config
            .url()
            .join(route)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| route.to_string())
    }

    /// `/ka/intro/` -> `<root>/ka/intro/index.html`
    fn route_file(&self, root: &Path, route: &str) -> PathBuf {
        let relative = route
            .strip_prefix(self.config.base_url())
            .unwrap_or(route)
            .trim_matches('/');
        if relative.is_empty() {
            root.join("index.html")
        } else {
            root.join(relative).join("index.html")
        }
    }

    /// Generate stylesheets and scripts.
    fn generate_assets(&self, root: &Path) -> Result<(), BuildError> {
        let assets_dir = root.join("assets");

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify() {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        write_file(&assets_dir.join("main.css"), css)?;
        write_file(&assets_dir.join("main.js"), AssetPipeline::generate_js())?;

        if let Some(custom) = self.config.custom_css() {
            let content =
                fs::read_to_string(custom).map_err(|source| write_error(custom, source))?;
            let content = if self.config.minify() {
                match AssetPipeline::minify_css(&content) {
                    Ok(minified) => minified,
                    Err(e) => {
                        tracing::warn!("Could not minify {}: {}", custom.display(), e);
                        content
                    }
                }
            } else {
                content
            };
            write_file(&assets_dir.join("custom.css"), content)?;
            tracing::info!("Copied stylesheet from {}", custom.display());
        }

        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, root: &Path, resolution: &Resolution) -> Result<(), BuildError> {
        let mut urls: BTreeSet<String> = BTreeSet::new();
        for graph in resolution.graphs() {
            if self.config.homepage().is_some() {
                urls.insert(self.absolute(&self.config.localized_path(graph.locale(), "/")));
            }
            urls.extend(graph.nodes().iter().map(|n| self.absolute(&n.route)));
        }

        let entries: Vec<String> = urls
            .iter()
            .map(|url| format!("  <url>\n    <loc>{}</loc>\n  </url>", url))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>
"#,
            entries.join("\n")
        );
        write_file(&root.join("sitemap.xml"), sitemap)?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}\n",
            self.absolute(&format!("{}sitemap.xml", self.config.base_url()))
        );
        write_file(&root.join("robots.txt"), robots)?;

        Ok(())
    }

    /// Generate `metadata.json`: site identity, then theme, routes and
    /// sidebars per locale.
    fn generate_metadata(
        &self,
        root: &Path,
        resolution: &Resolution,
        mut themes: BTreeMap<String, ThemeDescriptor>,
    ) -> Result<(), BuildError> {
        let locales = resolution
            .graphs()
            .iter()
            .filter_map(|graph| {
                let theme = themes.remove(graph.locale())?;
                Some((
                    graph.locale(),
                    LocaleMetadata {
                        theme,
                        routes: graph
                            .nodes()
                            .iter()
                            .map(|n| (n.id.as_str(), n.route.as_str()))
                            .collect(),
                        fallbacks: graph
                            .nodes()
                            .iter()
                            .filter(|n| n.fallback)
                            .map(|n| n.id.as_str())
                            .collect(),
                        sidebars: graph.sidebars().collect(),
                    },
                ))
            })
            .collect();

        let metadata = SiteMetadata {
            title: self.config.title(),
            url: self.config.url().as_str(),
            base_url: self.config.base_url(),
            organization_name: self.config.organization_name(),
            project_name: self.config.project_name(),
            default_locale: self.config.default_locale(),
            locales,
        };

        let json = serde_json::to_string_pretty(&metadata)?;
        write_file(&root.join("metadata.json"), json)
    }
}

#[derive(Serialize)]
struct SiteMetadata<'a> {
    title: &'a str,
    url: &'a str,
    base_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<&'a str>,
    default_locale: &'a str,
    locales: BTreeMap<&'a str, LocaleMetadata<'a>>,
}

#[derive(Serialize)]
struct LocaleMetadata<'a> {
    theme: ThemeDescriptor,
    routes: BTreeMap<&'a str, &'a str>,
    fallbacks: Vec<&'a str>,
    sidebars: Vec<&'a ResolvedSidebar>,
}

/// Swap the staging directory into place of `output`.
///
/// The previous output is moved aside first and restored if the swap fails.
fn publish(staging: &Path, output: &Path) -> Result<(), BuildError> {
    if !output.exists() {
        return fs::rename(staging, output).map_err(|source| write_error(output, source));
    }

    let parent = output.parent().unwrap_or(Path::new("."));
    let previous = tempfile::Builder::new()
        .prefix(".marquee-previous-")
        .tempdir_in(parent)
        .map_err(|source| write_error(parent, source))?;
    let aside = previous.path().join("output");

    fs::rename(output, &aside).map_err(|source| write_error(output, source))?;
    if let Err(source) = fs::rename(staging, output) {
        if let Err(e) = fs::rename(&aside, output) {
            tracing::error!("Could not restore previous output: {}", e);
        }
        return Err(write_error(output, source));
    }

    tracing::info!("Published {}", output.display());
    Ok(())
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| write_error(parent, source))?;
    }
    fs::write(path, contents).map_err(|source| write_error(path, source))
}

fn write_error(path: &Path, source: std::io::Error) -> BuildError {
    BuildError::Write {
        path: path.to_path_buf(),
        source,
    }
}
