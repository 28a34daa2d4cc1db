//! Serve command: runs the persistence API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::services::MemoryStore;
use crate::web::{self, AppState};

/// Run the page persistence API server
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory for saved pages (overrides config)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep pages in memory only; nothing is written to disk
    #[arg(long, conflicts_with = "data_dir")]
    pub ephemeral: bool,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ServeArgs {
    /// Loads config and applies command-line overrides.
    fn resolve_config(&self) -> CliResult<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .map_err(|e| CliError::validation(format!("Failed to load config: {e:#}")))?;

        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir.clone_from(dir);
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e:#}")))?;
        Ok(config)
    }

    /// Execute the serve command
    pub fn execute(&self) -> CliResult<()> {
        let config = self.resolve_config()?;

        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| CliError::validation(format!("Invalid listen address: {e}")))?;

        let state = if self.ephemeral {
            info!("Using in-memory storage");
            AppState::new(Arc::new(MemoryStore::new()))
        } else {
            AppState::from_config(&config)
                .map_err(|e| CliError::io(format!("Failed to open storage: {e:#}")))?
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::io(format!("Failed to start runtime: {e}")))?;

        runtime
            .block_on(web::run_server(state, addr))
            .map_err(|e| CliError::io(format!("Server error: {e:#}")))
    }
}
