// src/load_balancer/error.rs

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalancerError {
    #[error("No backend available")]
    NoBackendAvailable,

    #[error("Invalid weight {weight} for backend {backend}: weights must be positive")]
    InvalidWeightConfiguration { backend: String, weight: i64 },

    #[error(
        "Unknown balancing mode '{0}' (expected round_robin, weighted_round_robin, ip_hash or random)"
    )]
    UnknownMode(String),
}

