//! Development server with live reload for marquee sites.
//!
//! Builds the site once, serves the output directory and rebuilds whenever
//! content, static assets or configuration change. Connected browsers are
//! told to reload over a WebSocket.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{serve_dir, DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent, WatchSet};
pub use websocket::{reload_client_script, ReloadHub, ReloadMessage, RELOAD_PATH};
