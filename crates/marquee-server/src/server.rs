//! Development and preview servers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use marquee_config::{CliSettings, SiteConfig, CONFIG_FILENAME};
use marquee_static::{BuildError, BuildResult, StaticBuilder};
use tokio::sync::RwLock;
use tower_http::services::{ServeDir, ServeFile};

use crate::watcher::{FileWatcher, WatchEvent, WatchSet};
use crate::websocket::{reload_client_script, ReloadHub, ReloadMessage, RELOAD_PATH};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site configuration file
    pub config_path: PathBuf,

    /// Overrides applied each time the configuration is loaded
    pub cli: CliSettings,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(CONFIG_FILENAME),
            cli: CliSettings::default(),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    Address(String),

    #[error("Failed to bind to {0}: {1}")]
    Bind(SocketAddr, String),

    #[error("Server error: {0}")]
    Serve(String),

    #[error("File watch error: {0}")]
    Watch(String),

    #[error(transparent)]
    Config(#[from] marquee_config::ConfigError),

    #[error("Directory not found: {0}")]
    MissingDir(PathBuf),
}

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    hub: ReloadHub,
    last_error: RwLock<Option<String>>,
}

/// Development server: build, serve, watch, rebuild, reload.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    ///
    /// Runs until the listener fails. A failed build is reported to the
    /// console and to connected browsers while the last good output stays
    /// in place.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = socket_addr(&self.config.host, self.config.port)?;
        let site = SiteConfig::load(&self.config.config_path, &self.config.cli)?;
        let output_dir = site.output_dir().to_path_buf();
        let base_url = site.base_url().to_string();
        let watch_set = WatchSet::for_site(&self.config.config_path, &site);

        let state = Arc::new(ServerState {
            config: self.config.clone(),
            hub: ReloadHub::new(),
            last_error: RwLock::new(None),
        });

        rebuild(&state, Some(site)).await;

        let (watcher, mut rx) =
            FileWatcher::new(watch_set).map_err(|e| ServerError::Watch(e.to_string()))?;

        let watch_state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(batch) = rx.recv().await {
                handle_changes(&watch_state, batch).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = site_router(&output_dir, &base_url)
            .route(RELOAD_PATH, get(ws_handler))
            .with_state(state);

        let url = format!("http://{}{}", addr, base_url);
        tracing::info!("Dev server running at {}", url);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        if self.config.open {
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))
    }
}

/// Serve a built output directory without watching or rebuilding.
pub async fn serve_dir(
    dir: &Path,
    base_url: &str,
    host: &str,
    port: u16,
    open: bool,
) -> Result<(), ServerError> {
    if !dir.is_dir() {
        return Err(ServerError::MissingDir(dir.to_path_buf()));
    }

    let addr = socket_addr(host, port)?;
    let app = site_router::<()>(dir, base_url);

    let url = format!("http://{}{}", addr, base_url);
    tracing::info!("Serving {} at {}", dir.display(), url);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

    if open {
        let _ = open::that(&url);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    let addr = format!("{}:{}", host, port);
    addr.parse().map_err(|_| ServerError::Address(addr))
}

/// Static file router mounted at the site's base path, with the built 404
/// page as fallback.
fn site_router<S>(dir: &Path, base_url: &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let files = ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("404.html")));

    let mount = base_url.trim_end_matches('/');
    if mount.is_empty() {
        Router::new().fallback_service(files)
    } else {
        Router::new().nest_service(mount, files)
    }
}

/// Rebuild after a batch of changes, reloading the configuration first when
/// it changed.
async fn handle_changes(state: &Arc<ServerState>, batch: Vec<WatchEvent>) {
    for event in &batch {
        tracing::info!("Changed: {}", event.path().display());
    }

    let site = if batch.iter().any(|e| matches!(e, WatchEvent::Config(_))) {
        match SiteConfig::load(&state.config.config_path, &state.config.cli) {
            Ok(site) => Some(site),
            Err(e) => {
                report_failure(state, e.to_string()).await;
                return;
            }
        }
    } else {
        None
    };

    rebuild(state, site).await;
}

/// Run a build off the async runtime and notify clients of the outcome.
async fn rebuild(state: &Arc<ServerState>, site: Option<SiteConfig>) {
    let config_path = state.config.config_path.clone();
    let cli = state.config.cli.clone();

    let outcome = tokio::task::spawn_blocking(move || -> Result<BuildResult, String> {
        let site = match site {
            Some(site) => site,
            None => SiteConfig::load(&config_path, &cli).map_err(|e| e.to_string())?,
        };
        StaticBuilder::new(site)
            .map_err(|e| e.to_string())?
            .with_inline_script(reload_client_script())
            .build()
            .map_err(|e| describe(&e))
    })
    .await;

    match outcome {
        Ok(Ok(result)) => {
            tracing::info!(
                "Rebuilt {} pages in {}ms ({} warnings)",
                result.pages,
                result.duration_ms,
                result.warnings.len()
            );
            *state.last_error.write().await = None;
            state.hub.send(ReloadMessage::Reload);
        }
        Ok(Err(message)) => report_failure(state, message).await,
        Err(e) => report_failure(state, format!("build task failed: {}", e)).await,
    }
}

/// Error text for the browser console: the summary plus one line per
/// diagnostic.
fn describe(error: &BuildError) -> String {
    let details: Vec<String> = match error {
        BuildError::Resolve(e) => e.diagnostics().iter().map(|d| d.to_string()).collect(),
        BuildError::MissingAssets(missing) => missing.iter().map(|m| m.to_string()).collect(),
        _ => Vec::new(),
    };

    std::iter::once(error.to_string())
        .chain(details)
        .collect::<Vec<_>>()
        .join("\n")
}

async fn report_failure(state: &ServerState, message: String) {
    tracing::error!("Build failed: {}", message);
    *state.last_error.write().await = Some(message.clone());
    state.hub.send(ReloadMessage::BuildFailed { message });
}

/// Handler for the live reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward reload messages to one client, starting with the current build
/// failure if there is one.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.hub.subscribe();

    let mut greeting = vec![ReloadMessage::Connected];
    if let Some(message) = state.last_error.read().await.clone() {
        greeting.push(ReloadMessage::BuildFailed { message });
    }

    for msg in greeting {
        if send(&mut socket, &msg).await.is_err() {
            return;
        }
    }

    while let Ok(msg) = rx.recv().await {
        if send(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send(socket: &mut WebSocket, msg: &ReloadMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}
