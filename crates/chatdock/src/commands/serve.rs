//! Preview server command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chatdock_llm::AnthropicClient;
use chatdock_server::{PreviewConfig, PreviewServer};

use crate::config::ConfigFile;

/// Run the preview server with the chat proxy.
pub async fn run(
    config: &ConfigFile,
    port: Option<u16>,
    dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let site_dir = dir.unwrap_or_else(|| PathBuf::from(&config.site.dir));

    if !site_dir.exists() {
        anyhow::bail!(
            "Site directory not found: {}. Build your site and run 'chatdock inject' first.",
            site_dir.display()
        );
    }

    let settings = config.chat_settings()?;
    let client = Arc::new(AnthropicClient::new(settings)?);

    let preview = PreviewConfig {
        site_dir,
        host: config.server.host.clone(),
        port: port.unwrap_or(config.server.port),
        open,
    };

    PreviewServer::new(preview, client).start().await?;

    Ok(())
}
