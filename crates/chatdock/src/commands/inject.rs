//! Widget injection command.

use std::path::PathBuf;

use anyhow::Result;
use chatdock_inject::{AssetWriter, InjectConfig};

use crate::config::ConfigFile;

/// Run the inject command against a built site.
pub fn run(config: &ConfigFile, dir: Option<PathBuf>) -> Result<()> {
    let site_dir = dir.unwrap_or_else(|| PathBuf::from(&config.site.dir));

    tracing::info!("Injecting chat widget into {}", site_dir.display());

    let report = AssetWriter::new(InjectConfig {
        site_dir,
        pages: None,
    })
    .run()?;

    tracing::info!(
        "Wrote {} assets, injected {} pages ({} without a body tag, {} already injected) in {}ms",
        report.assets_written,
        report.pages_injected,
        report.pages_skipped,
        report.pages_already_injected,
        report.duration_ms
    );

    Ok(())
}
