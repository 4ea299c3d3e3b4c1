//! Preview server command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use marquee_config::{CliSettings, SiteConfig};

/// Run the serve command.
///
/// The config supplies the output directory and base path. With an explicit
/// `--dir` a missing config is tolerated and the site is served from `/`.
pub async fn run(
    config_path: &Path,
    settings: &CliSettings,
    port: u16,
    dir: Option<PathBuf>,
) -> Result<()> {
    let (dir, base_url) = match (SiteConfig::load(config_path, settings), dir) {
        (Ok(config), dir) => (
            dir.unwrap_or_else(|| config.output_dir().to_path_buf()),
            config.base_url().to_string(),
        ),
        (Err(e), Some(dir)) => {
            tracing::debug!("Serving without config: {}", e);
            (dir, "/".to_string())
        }
        (Err(e), None) => {
            return Err(e).with_context(|| format!("Failed to load {}", config_path.display()))
        }
    };

    if !dir.is_dir() {
        anyhow::bail!(
            "Directory not found: {}. Run 'marquee build' first.",
            dir.display()
        );
    }

    marquee_server::serve_dir(&dir, &base_url, "127.0.0.1", port, true).await?;

    Ok(())
}
