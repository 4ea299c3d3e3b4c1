//! Content source tree: every document of every locale, parsed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use marquee_config::SiteConfig;
use marquee_mdx::{parse_document, ParsedDoc};

/// Errors raised while reading the content tree.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Docs directory not found: {}", .0.display())]
    MissingDocsDir(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{}: locale `{locale}` is not configured", .path.display())]
    UnknownLocale { path: PathBuf, locale: String },
}

/// One parsed source document.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDoc {
    /// Locale the document belongs to
    pub locale: String,
    /// File the document was read from, for diagnostics
    pub file: PathBuf,
    /// Path relative to its locale's docs directory, `/`-separated
    pub relative_path: String,
    /// Document id
    pub id: String,
    /// URL slug below the docs route base, without leading or trailing `/`
    pub slug: String,
    /// Parsed body and frontmatter
    pub doc: Arc<ParsedDoc>,
}

impl SourceDoc {
    /// Parse a document found at `relative_path` in the `tree_locale` tree.
    pub fn parse(
        tree_locale: &str,
        file: PathBuf,
        relative_path: &str,
        source: &str,
    ) -> Result<Self, ContentError> {
        let doc = parse_document(source).map_err(|e| ContentError::Parse {
            path: file.clone(),
            message: e.to_string(),
        })?;

        let stem = strip_extension(relative_path);
        let id = match &doc.frontmatter.id {
            Some(id) => match stem.rsplit_once('/') {
                Some((dir, _)) => format!("{}/{}", dir, id),
                None => id.clone(),
            },
            None => stem.to_string(),
        };

        let slug = match &doc.frontmatter.slug {
            Some(slug) => slug.trim_matches('/').to_string(),
            None => default_slug(stem),
        };

        let locale = doc
            .frontmatter
            .locale
            .clone()
            .unwrap_or_else(|| tree_locale.to_string());

        Ok(Self {
            locale,
            file,
            relative_path: relative_path.to_string(),
            id,
            slug,
            doc: Arc::new(doc),
        })
    }

    pub fn title(&self) -> &str {
        &self.doc.frontmatter.title
    }

    pub fn sidebar_position(&self) -> Option<f64> {
        self.doc.frontmatter.sidebar_position
    }

    /// Directory of the document relative to its docs root (`""` at the root).
    pub fn dir(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }
}

/// All source documents, ordered by locale declaration and then path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentTree {
    docs: Vec<SourceDoc>,
}

impl ContentTree {
    /// Scan the docs directories of the default locale and every locale selected for build.
    ///
    /// The default locale's tree must exist; translation trees are optional.
    pub fn scan(config: &SiteConfig) -> Result<Self, ContentError> {
        let mut locales = vec![config.default_locale()];
        locales.extend(
            config
                .build_locales()
                .into_iter()
                .filter(|l| !config.is_default_locale(l)),
        );

        let mut docs = Vec::new();
        for locale in locales {
            let dir = config.locale_docs_dir(locale);
            if !dir.exists() {
                if config.is_default_locale(locale) {
                    return Err(ContentError::MissingDocsDir(dir));
                }
                tracing::debug!(
                    "No translations for `{}` at {}, using default content",
                    locale,
                    dir.display()
                );
                continue;
            }

            let before = docs.len();
            scan_dir(&dir, locale, &mut docs)?;
            tracing::debug!("Found {} documents for `{}`", docs.len() - before, locale);
        }

        let tree = Self { docs };
        tree.check_locales(config)?;
        Ok(tree)
    }

    /// Build a tree from in-memory `(locale, relative_path, source)` entries.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let docs = sources
            .into_iter()
            .map(|(locale, path, source)| {
                SourceDoc::parse(locale, PathBuf::from(path), path, source)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { docs })
    }

    fn check_locales(&self, config: &SiteConfig) -> Result<(), ContentError> {
        for doc in &self.docs {
            if !config.locales().contains(&doc.locale) {
                return Err(ContentError::UnknownLocale {
                    path: doc.file.clone(),
                    locale: doc.locale.clone(),
                });
            }
        }
        Ok(())
    }

    /// Documents of a locale, in source order.
    pub fn docs_for<'a>(&'a self, locale: &str) -> impl Iterator<Item = &'a SourceDoc> + 'a {
        let locale = locale.to_string();
        self.docs.iter().filter(move |d| d.locale == locale)
    }

    pub fn docs(&self) -> &[SourceDoc] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

fn scan_dir(dir: &Path, locale: &str, docs: &mut Vec<SourceDoc>) -> Result<(), ContentError> {
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "mdx" && ext != "md" {
            continue;
        }

        let relative = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let content = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        docs.push(SourceDoc::parse(locale, path.to_path_buf(), &relative, &content)?);
    }

    Ok(())
}

fn strip_extension(path: &str) -> &str {
    path.strip_suffix(".mdx")
        .or_else(|| path.strip_suffix(".md"))
        .unwrap_or(path)
}

/// `guides/index` -> `guides`, `index` -> ``, `guides/setup` -> `guides/setup`.
fn default_slug(stem: &str) -> String {
    if stem == "index" {
        String::new()
    } else {
        stem.strip_suffix("/index").unwrap_or(stem).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_config::CliSettings;
    use tempfile::tempdir;

    fn doc(title: &str) -> String {
        format!("---\ntitle: {}\n---\n# {}\n", title, title)
    }

    #[test]
    fn derives_id_and_slug_from_path() {
        let source = SourceDoc::parse(
            "en",
            PathBuf::from("docs/getting-started/what-is-nextino.md"),
            "getting-started/what-is-nextino.md",
            &doc("What is Nextino?"),
        )
        .unwrap();

        assert_eq!(source.id, "getting-started/what-is-nextino");
        assert_eq!(source.slug, "getting-started/what-is-nextino");
        assert_eq!(source.dir(), "getting-started");
        assert_eq!(source.locale, "en");
    }

    #[test]
    fn frontmatter_overrides_id_slug_and_locale() {
        let source = SourceDoc::parse(
            "en",
            PathBuf::from("core/01-scheduler.md"),
            "core/01-scheduler.md",
            "---\ntitle: Scheduler\nid: scheduler\nslug: /scheduling\nlocale: ka\n---\n",
        )
        .unwrap();

        assert_eq!(source.id, "core/scheduler");
        assert_eq!(source.slug, "scheduling");
        assert_eq!(source.locale, "ka");
    }

    #[test]
    fn slug_outside_docs_root_is_a_parse_error() {
        let result = SourceDoc::parse(
            "en",
            PathBuf::from("docs/evil.md"),
            "evil.md",
            "---\ntitle: Evil\nslug: ../../escaped\n---\n",
        );

        assert!(matches!(
            result,
            Err(ContentError::Parse { ref path, .. }) if path == Path::new("docs/evil.md")
        ));
    }

    #[test]
    fn index_files_collapse_in_slug() {
        assert_eq!(default_slug("index"), "");
        assert_eq!(default_slug("guides/index"), "guides");
        assert_eq!(default_slug("guides/setup"), "guides/setup");
    }

    #[test]
    fn scans_default_and_translation_trees() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(
            root.join("site.toml"),
            "title = \"Nextino\"\nurl = \"https://nextino.cc\"\n[i18n]\ndefault_locale = \"en\"\nlocales = [\"en\", \"ka\"]\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("docs/core")).unwrap();
        fs::create_dir_all(root.join("i18n/ka/docs")).unwrap();
        fs::write(root.join("docs/intro.md"), doc("Intro")).unwrap();
        fs::write(root.join("docs/core/scheduler.mdx"), doc("Scheduler")).unwrap();
        fs::write(root.join("docs/notes.txt"), "ignored").unwrap();
        fs::write(root.join("i18n/ka/docs/intro.md"), doc("შესავალი")).unwrap();

        let config =
            SiteConfig::load(&root.join("site.toml"), &CliSettings::default()).unwrap();
        let tree = ContentTree::scan(&config).unwrap();

        assert_eq!(tree.len(), 3);
        let en: Vec<_> = tree.docs_for("en").map(|d| d.id.as_str()).collect();
        assert_eq!(en, vec!["core/scheduler", "intro"]);
        let ka: Vec<_> = tree.docs_for("ka").map(|d| d.title()).collect();
        assert_eq!(ka, vec!["შესავალი"]);
    }

    #[test]
    fn docs_for_outlives_the_locale_argument() {
        let tree = ContentTree {
            docs: vec![
                SourceDoc::parse("en", PathBuf::from("docs/intro.md"), "intro.md", &doc("Intro"))
                    .unwrap(),
                SourceDoc::parse("ka", PathBuf::from("i18n/ka/docs/intro.md"), "intro.md", &doc("Intro"))
                    .unwrap(),
            ],
        };

        let docs = {
            let locale = String::from("ka");
            tree.docs_for(&locale)
        };

        assert_eq!(docs.map(|d| d.locale.as_str()).collect::<Vec<_>>(), vec!["ka"]);
    }

    #[test]
    fn missing_default_tree_is_an_error() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(
            root.join("site.toml"),
            "title = \"Nextino\"\nurl = \"https://nextino.cc\"\n",
        )
        .unwrap();

        let config =
            SiteConfig::load(&root.join("site.toml"), &CliSettings::default()).unwrap();
        assert!(matches!(
            ContentTree::scan(&config),
            Err(ContentError::MissingDocsDir(_))
        ));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let result = ContentTree::from_sources([("en", "broken.md", "no frontmatter")]);
        match result {
            Err(ContentError::Parse { path, .. }) => assert_eq!(path, PathBuf::from("broken.md")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
