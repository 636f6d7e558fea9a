//! Preview server: built site plus the chat proxy route.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::services::ServeDir;

use chatdock_llm::CompletionClient;

use crate::proxy::{chat_handler, ProxyState};

/// Configuration for the preview server.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Built site root to serve
    pub site_dir: PathBuf,

    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Open browser on start
    pub open: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("dist"),
            host: "127.0.0.1".to_string(),
            port: 4000,
            open: false,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}: {1}")]
    Address(String, String),

    #[error("Failed to bind to {0}: {1}")]
    Bind(SocketAddr, String),

    #[error("Server error: {0}")]
    Serve(String),
}

/// Preview server for an injected site.
///
/// The completion client is passed in at construction and flows to the
/// proxy route through router state; nothing is reached through ambient
/// scope.
pub struct PreviewServer {
    config: PreviewConfig,
    state: ProxyState,
}

impl PreviewServer {
    /// Create a preview server around a completion client.
    pub fn new(config: PreviewConfig, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            config,
            state: ProxyState { client },
        }
    }

    /// Build the route table: the chat proxy, then the static site for
    /// everything else.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/chatbot", post(chat_handler))
            .fallback_service(ServeDir::new(&self.config.site_dir))
            .with_state(self.state.clone())
    }

    /// Bind and serve until shutdown.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::Address(
                    format!("{}:{}", self.config.host, self.config.port),
                    e.to_string(),
                )
            })?;

        let app = self.router();

        tracing::info!(
            "Serving {} at http://{} (chat proxy at /chatbot)",
            self.config.site_dir.display(),
            addr
        );

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        Ok(())
    }
}
