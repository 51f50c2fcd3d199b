// src/load_balancer/mod.rs
mod algorithm;
mod balancer;
mod error;
mod ip_hash;
mod random;
mod round_robin;
mod weighted_round_robin;

pub use algorithm::SelectionStrategy; // trait
pub use balancer::LoadBalancer;
pub use error::BalancerError;
pub use ip_hash::IpHash;
pub use random::Random;
pub use round_robin::RoundRobin;
pub use weighted_round_robin::WeightedRoundRobin;
pub use crate::config::Mode; // enum exposed if needed

use crate::backend::Backend;
use crate::config::BackendConfig;

/// Build the strategy for `mode`.
///
/// Weighted round robin is loaded with `backends` in order; the other modes
/// only read the registry at selection time. Non-positive weights are
/// rejected whatever the mode.
pub fn create_strategy(
    mode: Mode,
    backends: &[BackendConfig],
) -> Result<Box<dyn SelectionStrategy>, BalancerError> {
    if let Some(bad) = backends.iter().find(|b| b.weight <= 0) {
        return Err(BalancerError::InvalidWeightConfiguration {
            backend: bad.address.clone(),
            weight: bad.weight,
        });
    }

    let strategy: Box<dyn SelectionStrategy> = match mode {
        Mode::RoundRobin => Box::new(RoundRobin::new()),
        Mode::WeightedRoundRobin => {
            let mut wrr = WeightedRoundRobin::new();
            for backend in backends {
                wrr.add_weighted(Backend::new(backend.address.as_str()), backend.weight)?;
            }
            Box::new(wrr)
        }
        Mode::IpHash => Box::new(IpHash::new()),
        Mode::Random => Box::new(Random::new()),
    };

    tracing::debug!("Created {} strategy", strategy.name());
    Ok(strategy)
}
