// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use tcp_load_balancer::{
    config::Config,
    load_balancer::LoadBalancer,
    metrics::{start_metrics_server, MetricsRegistry},
    server::ServerBuilder,
    startup::{setup, StartupOptions, EXIT_MISUSE},
};

#[derive(Debug, Parser)]
#[command(name = "tcp-load-balancer", version, about = "Assigns client connections to backend servers")]
struct Cli {
    /// Balancing mode: round_robin (RR), weighted_round_robin (WRR), ip_hash (IPH) or random (RA)
    mode: Option<String>,

    /// Path to a YAML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to accept client connections on
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    let options = StartupOptions {
        config: cli.config,
        mode: cli.mode,
        listen: cli.listen,
    };

    let (config, balancer) = match setup(&options).await {
        Ok(setup) => setup,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return ExitCode::from(EXIT_MISUSE);
        }
    };

    match run(config, balancer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Load balancer failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tcp_load_balancer=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();
    Ok(())
}

async fn run(config: Config, balancer: Arc<LoadBalancer>) -> Result<()> {
    let metrics_registry = Arc::new(MetricsRegistry::new()?);
    let metrics = metrics_registry.collector();
    metrics.update_backend_count(balancer.backend_count());

    if config.metrics.enabled {
        let metrics_addr: SocketAddr = ([0, 0, 0, 0], config.metrics.port).into();
        start_metrics_server(metrics_addr, metrics_registry.clone(), config.metrics.path.clone())
            .context("Failed to start metrics server")?;
    }

    info!("Starting load balancer on {}", config.listen);

    ServerBuilder::new(config.listen)
        .with_balancer(balancer)
        .with_metrics(metrics)
        .serve_with_shutdown(shutdown_signal())
        .await
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
