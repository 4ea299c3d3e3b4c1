//! Marquee CLI: build, preview and scaffold documentation sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use marquee_config::CliSettings;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Static site generator for documentation and marketing sites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, global = true, default_value = "site.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Build only this locale
    #[arg(short, long, global = true)]
    locale: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new site in the current directory
    Init {
        /// Overwrite existing files without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Start development server with live reload
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "7777")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "build")
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Skip CSS minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the configured output directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let settings = CliSettings {
        locale: cli.locale,
        ..Default::default()
    };

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Dev { port, no_open } => {
            commands::dev::run(cli.config, settings, port, !no_open).await?;
        }
        Commands::Build { out_dir, no_minify } => {
            let settings = CliSettings {
                output_dir: out_dir,
                minify: no_minify.then_some(false),
                ..settings
            };
            commands::build::run(cli.config, settings).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(&cli.config, &settings, port, dir).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "marquee", "build", "--locale", "ka", "--config", "site/site.toml", "--no-minify",
        ])
        .unwrap();

        assert_eq!(cli.locale.as_deref(), Some("ka"));
        assert_eq!(cli.config, PathBuf::from("site/site.toml"));
        assert!(matches!(
            cli.command,
            Commands::Build {
                no_minify: true,
                out_dir: None
            }
        ));
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["marquee", "serve"]).unwrap();

        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Serve { port: 4000, dir: None }));
    }
}
