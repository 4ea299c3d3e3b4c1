//! Scaffold a new site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
///
/// Files are created next to `config_path`. Existing files are kept unless
/// `yes` is set.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing marquee site...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    for dir in ["docs", "static/img"] {
        fs::create_dir_all(root.join(dir))
            .with_context(|| format!("Failed to create {} directory", dir))?;
    }

    write(config_path, DEFAULT_CONFIG, yes)?;
    write(&root.join("sidebars.toml"), DEFAULT_SIDEBARS, yes)?;
    write(&root.join("docs/intro.md"), DEFAULT_INTRO, yes)?;
    write(&root.join("docs/configuration.md"), DEFAULT_CONFIGURATION, yes)?;
    write(&root.join("static/img/feature.svg"), DEFAULT_ICON, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'marquee dev' to start the development server.");

    Ok(())
}

fn write(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::debug!("Keeping existing {}", path.display());
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Marquee site configuration

title = "My Site"
tagline = "Documentation that ships"
url = "https://example.com"
base_url = "/"

# "throw" fails the build on broken references, "warn" renders dead links
on_broken_links = "throw"

[i18n]
default_locale = "en"
locales = ["en"]

[[theme.navbar.items]]
type = "docSidebar"
sidebar_id = "docs"
label = "Docs"

[theme.footer]
style = "dark"

[[theme.footer.links]]
title = "Docs"

[[theme.footer.links.items]]
label = "Introduction"
to = "/intro"

[homepage]
title = "Welcome"
description = "A site built with marquee"

[[homepage.hero.actions]]
label = "Get Started"
to = "/intro"

[[homepage.features]]
title = "Write in Markdown"
icon = "img/feature.svg"
description = "Pages are plain **markdown** with front-matter."
"#;

const DEFAULT_SIDEBARS: &str = r#"[[docs]]
label = "Getting Started"
items = ["intro", "configuration"]
"#;

const DEFAULT_INTRO: &str = r#"---
title: Introduction
sidebar_position: 1
---

# Introduction

Welcome to your new site. Edit `docs/intro.md` to change this page.

Continue with [configuration](./configuration.md).
"#;

const DEFAULT_CONFIGURATION: &str = r#"---
title: Configuration
sidebar_position: 2
---

# Configuration

Site settings live in `site.toml` and the sidebar layout in `sidebars.toml`.

## Building

```bash
marquee build
```
"#;

const DEFAULT_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><rect x="3" y="3" width="18" height="18" rx="4"/></svg>
"#;
