//! Development server command.

use std::path::PathBuf;

use anyhow::Result;
use marquee_config::CliSettings;
use marquee_server::{DevServer, DevServerConfig};

/// Run the dev server.
pub async fn run(config_path: PathBuf, cli: CliSettings, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let config = DevServerConfig {
        config_path,
        cli,
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
