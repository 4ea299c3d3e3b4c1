//! Static site build command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use marquee_config::{CliSettings, SiteConfig};
use marquee_static::StaticBuilder;

/// Run the build command.
pub async fn run(config_path: PathBuf, settings: CliSettings) -> Result<()> {
    tracing::info!("Building static site...");

    let result = tokio::task::spawn_blocking(move || {
        let config = SiteConfig::load(&config_path, &settings)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;
        let builder = StaticBuilder::new(config).context("Failed to set up templates")?;
        builder.build().context("Build failed")
    })
    .await
    .context("Build task panicked")??;

    tracing::info!(
        "Built {} pages for {} locale(s) in {}ms",
        result.pages,
        result.locales,
        result.duration_ms
    );
    if !result.warnings.is_empty() {
        tracing::warn!("{} broken reference(s) rendered as dead links", result.warnings.len());
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
