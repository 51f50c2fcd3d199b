// src/server/handler.rs
use crate::backend::Backend;
use crate::load_balancer::{BalancerError, LoadBalancer};
use crate::metrics::MetricsCollector;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Resolves a backend for each accepted connection, then closes it.
///
/// No bytes are relayed; the routing decision is logged and counted.
#[derive(Clone)]
pub struct ConnectionHandler {
    balancer: Arc<LoadBalancer>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl ConnectionHandler {
    pub fn new(balancer: Arc<LoadBalancer>, metrics: Option<Arc<MetricsCollector>>) -> Self {
        Self { balancer, metrics }
    }

    pub async fn handle(&self, mut stream: TcpStream, peer: SocketAddr) -> Result<Backend, BalancerError> {
        let conn_id = Uuid::new_v4();
        let client_key = peer.ip().to_string();

        let result = self.route(conn_id, &client_key);

        if let Err(err) = stream.shutdown().await {
            debug!(%conn_id, %peer, %err, "error closing client connection");
        }

        result
    }

    pub fn route(&self, conn_id: Uuid, client_key: &str) -> Result<Backend, BalancerError> {
        let strategy = self.balancer.strategy_name();
        if let Some(metrics) = &self.metrics {
            metrics.record_connection();
        }

        match self.balancer.select_backend(client_key) {
            Ok(backend) => {
                info!(%conn_id, client = %client_key, %backend, strategy, "Routing connection to backend");
                if let Some(metrics) = &self.metrics {
                    metrics.record_selection(strategy, backend.as_str());
                }
                Ok(backend)
            }
            Err(err) => {
                warn!(%conn_id, client = %client_key, %err, strategy, "Dropping connection");
                if let Some(metrics) = &self.metrics {
                    metrics.record_selection_failure(strategy);
                }
                Err(err)
            }
        }
    }
}
