//! chatdock CLI - chat widget injection and preview for built doc sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "chatdock")]
#[command(about = "Inject a chat widget into a built documentation site and preview it")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to chatdock.toml config file
    #[arg(short, long, default_value = "chatdock.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write widget assets and splice the widget into every page
    Inject {
        /// Site directory (defaults to config or "dist")
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Preview the injected site with the chat proxy
    Serve {
        /// Port to listen on (defaults to config or 4000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory to serve (defaults to config or "dist")
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let config = config::ConfigFile::load(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Inject { dir } => {
            commands::inject::run(&config, dir)?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(&config, port, dir, !no_open).await?;
        }
    }

    Ok(())
}
