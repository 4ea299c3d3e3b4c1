//! WebSocket-based live reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Route the live reload socket is mounted on.
pub const RELOAD_PATH: &str = "/__marquee/reload";

/// Messages sent to connected browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadMessage {
    /// Connection established
    Connected,

    /// A rebuild finished; reload the page
    Reload,

    /// A rebuild failed; the previous output is still being served
    BuildFailed {
        /// Rendered build error
        message: String,
    },
}

/// Fan-out of reload messages to every connected client.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    sender: broadcast::Sender<ReloadMessage>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: ReloadMessage) {
        // No receivers is fine: nobody has a page open yet.
        let _ = self.sender.send(msg);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Client script inlined into every page the dev server builds.
///
/// The socket URL is derived from `location` so the script works behind any
/// host and port.
pub fn reload_client_script() -> String {
    format!(
        r#"(function() {{
  'use strict';
  var scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  var attempts = 0;

  function connect() {{
    var ws = new WebSocket(scheme + location.host + '{path}');

    ws.onopen = function() {{
      if (attempts > 0) {{
        location.reload();
      }}
      attempts = 0;
    }};

    ws.onmessage = function(event) {{
      var msg = JSON.parse(event.data);
      switch (msg.type) {{
        case 'reload':
          location.reload();
          break;
        case 'build_failed':
          console.error('[marquee] build failed:\n' + msg.message);
          break;
      }}
    }};

    ws.onclose = function() {{
      if (attempts < 10) {{
        attempts++;
        setTimeout(connect, 1000 * attempts);
      }}
    }};
  }}

  connect();
}})();"#,
        path = RELOAD_PATH
    )
}
