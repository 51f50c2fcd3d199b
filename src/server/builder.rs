// ────────────────────────────────
// src/server/builder.rs
// ────────────────────────────────
use crate::load_balancer::LoadBalancer;
use crate::metrics::MetricsCollector;
use crate::server::handler::ConnectionHandler;
use crate::server::listener::bind_tcp;
use anyhow::{Context, Result};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder pattern so `main.rs` can inject its balancer and metrics.
pub struct ServerBuilder {
    addr: SocketAddr,
    balancer: Option<Arc<LoadBalancer>>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl ServerBuilder {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            balancer: None,
            metrics: None,
        }
    }

    pub fn with_balancer(mut self, balancer: Arc<LoadBalancer>) -> Self {
        self.balancer = Some(balancer);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let listener = bind_tcp(self.addr).await?;
        self.run(listener, shutdown).await
    }

    /// Accept on an already bound listener, one task per connection.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let balancer = self
            .balancer
            .context("balancer must be set via with_balancer()")?;
        let handler = ConnectionHandler::new(balancer, self.metrics);

        tracing::info!("Load balancer listening on {}", listener.local_addr()?);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let handler = handler.clone();
                        tokio::spawn(async move {
                            if let Err(err) = handler.handle(stream, peer).await {
                                tracing::trace!(%peer, %err, "connection closed without a backend");
                            }
                        });
                    }
                    Err(err) => tracing::error!(%err, "failed to accept client connection"),
                },
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, no longer accepting connections");
                    break;
                }
            }
        }

        Ok(())
    }
}
