//! Asset pipeline: stylesheets, scripts, static files and asset checks.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use marquee_config::SiteConfig;

/// URL of an asset referenced from config, relative to the static dir.
///
/// Absolute URLs pass through unchanged.
pub fn asset_url(base_url: &str, src: &str) -> String {
    if is_remote(src) {
        src.to_string()
    } else {
        format!("{}{}", base_url, src.trim_start_matches('/'))
    }
}

fn is_remote(src: &str) -> bool {
    src.contains("://") || src.starts_with("data:")
}

/// What a missing asset was referenced as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    Favicon,
    NavbarLogo,
    SocialCard,
    HeroLogo,
    FeatureIcon,
    CustomCss,
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Favicon => "favicon",
            Self::NavbarLogo => "navbar logo",
            Self::SocialCard => "social card image",
            Self::HeroLogo => "hero logo",
            Self::FeatureIcon => "feature icon",
            Self::CustomCss => "custom stylesheet",
        };
        f.write_str(name)
    }
}

/// A referenced asset that does not exist on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingAsset {
    pub role: AssetRole,
    /// Reference as written in the config
    pub reference: String,
    /// Where it was looked for
    pub path: PathBuf,
}

impl fmt::Display for MissingAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} `{}` not found at {}",
            self.role,
            self.reference,
            self.path.display()
        )
    }
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Check every asset the config references. Returns all that are missing.
    pub fn check(config: &SiteConfig) -> Vec<MissingAsset> {
        let mut references: Vec<(AssetRole, &str)> = Vec::new();

        if let Some(favicon) = config.favicon() {
            references.push((AssetRole::Favicon, favicon));
        }
        let theme = config.theme();
        if let Some(logo) = &theme.navbar.logo {
            references.push((AssetRole::NavbarLogo, &logo.src));
        }
        if let Some(image) = &theme.image {
            references.push((AssetRole::SocialCard, image));
        }
        if let Some(homepage) = config.homepage() {
            if let Some(logo) = &homepage.hero.logo {
                references.push((AssetRole::HeroLogo, &logo.src));
            }
            for feature in &homepage.features {
                references.push((AssetRole::FeatureIcon, &feature.icon));
            }
        }

        let mut missing: Vec<MissingAsset> = references
            .into_iter()
            .filter(|(_, reference)| !is_remote(reference))
            .filter_map(|(role, reference)| {
                let path = config.static_dir().join(reference.trim_start_matches('/'));
                (!path.is_file()).then(|| MissingAsset {
                    role,
                    reference: reference.to_string(),
                    path,
                })
            })
            .collect();

        if let Some(css) = config.custom_css() {
            if !css.is_file() {
                missing.push(MissingAsset {
                    role: AssetRole::CustomCss,
                    reference: css.display().to_string(),
                    path: css.to_path_buf(),
                });
            }
        }

        missing
    }

    /// Copy the static directory into `out`. Returns the number of files copied.
    pub fn copy_static(static_dir: &Path, out: &Path) -> std::io::Result<usize> {
        if !static_dir.is_dir() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(static_dir).unwrap_or(path);
            let target = out.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
            copied += 1;
        }

        Ok(copied)
    }
}

const DEFAULT_CSS: &str = r#"/* marquee default theme */

:root {
  --mq-primary: #2e8555;
  --mq-primary-contrast: #ffffff;
  --mq-background: #ffffff;
  --mq-foreground: #1c1e21;
  --mq-muted: #f5f6f7;
  --mq-muted-foreground: #606770;
  --mq-border: #dadde1;
  --mq-code-background: #f6f7f8;
  --mq-danger: #d9534f;
  --mq-radius: 0.4rem;
  --mq-navbar-height: 3.75rem;
  --mq-sidebar-width: 280px;
  --mq-toc-width: 220px;
  --mq-content-max-width: 820px;
}

[data-theme="dark"] {
  --mq-primary: #25c2a0;
  --mq-background: #1b1b1d;
  --mq-foreground: #e3e3e3;
  --mq-muted: #242526;
  --mq-muted-foreground: #b0b3b8;
  --mq-border: #444950;
  --mq-code-background: #282a36;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  background: var(--mq-background);
  color: var(--mq-foreground);
  line-height: 1.65;
}

a {
  color: var(--mq-primary);
}

.container {
  max-width: 1140px;
  margin: 0 auto;
  padding: 0 1rem;
}

/* Navbar */
.navbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  height: var(--mq-navbar-height);
  padding: 0 1rem;
  border-bottom: 1px solid var(--mq-border);
  position: sticky;
  top: 0;
  background: var(--mq-background);
  z-index: 10;
}

.navbar__items {
  display: flex;
  align-items: center;
  gap: 1rem;
}

.navbar__brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  font-weight: 700;
  color: var(--mq-foreground);
  text-decoration: none;
}

.navbar__link {
  color: var(--mq-foreground);
  text-decoration: none;
  font-weight: 500;
}

.navbar__link:hover {
  color: var(--mq-primary);
}

/* Dead links */
.link--dead {
  color: var(--mq-danger);
  text-decoration: line-through;
  cursor: not-allowed;
}

/* Hero */
.hero {
  padding: 4rem 0;
  text-align: center;
}

.hero--primary {
  background: var(--mq-primary);
  color: var(--mq-primary-contrast);
}

.hero__title {
  font-size: 3rem;
  margin: 1rem 0 0.5rem;
}

.hero__subtitle {
  font-size: 1.5rem;
  margin: 0 0 1.5rem;
}

.buttons {
  display: flex;
  justify-content: center;
  flex-wrap: wrap;
  gap: 0.75rem;
}

.button {
  display: inline-block;
  padding: 0.6rem 1.5rem;
  border-radius: var(--mq-radius);
  border: 2px solid transparent;
  font-weight: 700;
  text-decoration: none;
}

.button--primary {
  background: var(--mq-primary-contrast);
  color: var(--mq-primary);
}

.button--secondary {
  background: var(--mq-muted);
  color: var(--mq-foreground);
}

.button--outline {
  border-color: var(--mq-primary-contrast);
  color: var(--mq-primary-contrast);
}

/* Features */
.features {
  padding: 3rem 0;
}

.features__grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
  gap: 2rem;
}

.feature {
  text-align: center;
}

.feature__icon {
  height: 200px;
  width: 200px;
}

.narrative {
  padding: 2rem 0 4rem;
}

.narrative h2 {
  text-align: center;
}

/* Docs */
.doc-layout {
  display: grid;
  grid-template-columns: var(--mq-sidebar-width) minmax(0, 1fr) var(--mq-toc-width);
  min-height: calc(100vh - var(--mq-navbar-height));
}

.sidebar {
  border-right: 1px solid var(--mq-border);
  padding: 1rem;
  position: sticky;
  top: var(--mq-navbar-height);
  height: calc(100vh - var(--mq-navbar-height));
  overflow-y: auto;
}

.sidebar__category {
  font-weight: 700;
  margin: 1rem 0 0.25rem;
}

.sidebar ul {
  list-style: none;
  margin: 0;
  padding: 0;
}

.sidebar__link {
  display: block;
  padding: 0.3rem 0.75rem;
  border-radius: var(--mq-radius);
  color: var(--mq-muted-foreground);
  text-decoration: none;
}

.sidebar__link--active {
  background: var(--mq-muted);
  color: var(--mq-primary);
  font-weight: 600;
}

.doc {
  padding: 2rem;
  max-width: var(--mq-content-max-width);
}

.doc pre {
  background: var(--mq-code-background);
  border-radius: var(--mq-radius);
  padding: 1rem;
  overflow-x: auto;
  position: relative;
}

.doc code {
  font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
  font-size: 0.9em;
}

.code-block__title {
  background: var(--mq-muted);
  border-radius: var(--mq-radius) var(--mq-radius) 0 0;
  padding: 0.4rem 1rem;
  font-size: 0.85rem;
  font-weight: 600;
}

.code-block__title + pre {
  border-top-left-radius: 0;
  border-top-right-radius: 0;
  margin-top: 0;
}

pre.code-block--line-numbers code {
  counter-reset: line;
}

.code-line::before {
  counter-increment: line;
  content: counter(line);
  display: inline-block;
  width: 2em;
  margin-right: 1em;
  text-align: right;
  opacity: 0.5;
}

pre.mermaid {
  background: none;
  text-align: center;
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  font-size: 0.75rem;
  padding: 0.2rem 0.6rem;
  border: 1px solid var(--mq-border);
  border-radius: var(--mq-radius);
  background: var(--mq-background);
  color: var(--mq-foreground);
  cursor: pointer;
}

.pagination-nav {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 1rem;
  margin-top: 3rem;
}

.pagination-nav__link {
  border: 1px solid var(--mq-border);
  border-radius: var(--mq-radius);
  padding: 1rem;
  text-decoration: none;
}

.pagination-nav__link--next {
  grid-column: 2;
  text-align: right;
}

.pagination-nav__sublabel {
  display: block;
  font-size: 0.8rem;
  color: var(--mq-muted-foreground);
}

.edit-this-page {
  display: inline-block;
  margin-top: 2rem;
}

.fallback-notice {
  background: var(--mq-muted);
  border-left: 4px solid var(--mq-primary);
  padding: 0.5rem 1rem;
  margin-bottom: 1.5rem;
}

.toc {
  padding: 2rem 1rem;
  position: sticky;
  top: var(--mq-navbar-height);
  align-self: start;
  font-size: 0.875rem;
}

.toc ul {
  list-style: none;
  padding: 0;
}

.toc-level-3 {
  padding-left: 1rem;
}

/* Footer */
.footer {
  padding: 2rem 1rem;
  border-top: 1px solid var(--mq-border);
}

.footer--light {
  background: var(--mq-muted);
}

.footer--dark {
  background: #303846;
  color: #ebedf0;
}

.footer--dark a {
  color: #ebedf0;
}

.footer__links {
  display: flex;
  justify-content: space-around;
  flex-wrap: wrap;
  gap: 2rem;
}

.footer__title {
  font-weight: 700;
  margin-bottom: 0.5rem;
}

.footer__items {
  list-style: none;
  padding: 0;
  margin: 0;
}

.footer__copyright {
  text-align: center;
  margin-top: 1.5rem;
}

@media (max-width: 996px) {
  .doc-layout {
    grid-template-columns: 1fr;
  }

  .sidebar,
  .toc {
    display: none;
  }
}
"#;

const DEFAULT_JS: &str = r#"// marquee runtime
(function() {
  'use strict';

  // Color mode
  const root = document.documentElement;
  const stored = localStorage.getItem('theme');
  if (stored) {
    root.setAttribute('data-theme', stored);
  }

  document.querySelectorAll('[data-toggle-theme]').forEach(btn => {
    btn.addEventListener('click', () => {
      const next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
      root.setAttribute('data-theme', next);
      localStorage.setItem('theme', next);
    });
  });

  // Copy code button for pre blocks
  document.querySelectorAll('.doc pre:not(.mermaid)').forEach(pre => {
    if (pre.querySelector('.copy-btn')) return;

    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.textContent = 'Copy';
    btn.setAttribute('type', 'button');

    btn.addEventListener('click', async () => {
      const code = pre.querySelector('code');
      const text = code ? code.textContent : pre.textContent;

      try {
        await navigator.clipboard.writeText(text || '');
        btn.textContent = 'Copied!';
      } catch (err) {
        btn.textContent = 'Error';
      }
      setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
    });

    pre.appendChild(btn);
  });
})();
"#;
