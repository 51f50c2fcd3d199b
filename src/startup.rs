//! Startup configuration resolution.
//!
//! Config file (or built-in defaults), then command-line overrides, then the
//! balancer itself. Any error here is an operator mistake and is fatal.

use crate::config::{self, Config, Mode};
use crate::load_balancer::LoadBalancer;
use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Exit status for configuration mistakes (bad mode, weights, config file).
pub const EXIT_MISUSE: u8 = 2;

/// Operator-supplied startup inputs, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config: Option<PathBuf>,
    pub mode: Option<String>,
    pub listen: Option<SocketAddr>,
}

pub async fn setup(options: &StartupOptions) -> Result<(Config, Arc<LoadBalancer>)> {
    let mut config = match &options.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            config::load_config(path).await?
        }
        None => {
            info!("No config file given, using built-in backends");
            Config::default()
        }
    };

    if let Some(mode) = &options.mode {
        config.mode = mode.parse::<Mode>()?;
    }
    if let Some(listen) = options.listen {
        config.listen = listen;
    }

    let balancer = LoadBalancer::from_config(&config)?;

    info!(
        mode = %config.mode,
        backends = ?balancer.backends().iter().map(|b| b.as_str()).collect::<Vec<_>>(),
        "Configuration loaded"
    );

    Ok((config, Arc::new(balancer)))
}
