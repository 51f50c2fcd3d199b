// src/load_balancer/random.rs
use crate::backend::Backend;
use crate::load_balancer::{BalancerError, SelectionStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random selection.
///
/// One generator is seeded from OS entropy when the strategy is built and
/// reused for every call.
#[derive(Debug)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for Random {
    fn select(&mut self, backends: &[Backend], _client_key: &str) -> Result<Backend, BalancerError> {
        if backends.is_empty() {
            return Err(BalancerError::NoBackendAvailable);
        }

        let index = self.rng.gen_range(0..backends.len());
        Ok(backends[index].clone())
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_distribution_is_roughly_uniform() {
        let backends: Vec<Backend> = ["s1", "s2", "s3", "s4"].into_iter().map(Backend::from).collect();
        let mut lb = Random::with_seed(42);
        let mut counts = [0usize; 4];
        let calls = 40_000;

        for _ in 0..calls {
            let picked = lb.select(&backends, "").unwrap();
            let index = backends.iter().position(|b| *b == picked).unwrap();
            counts[index] += 1;
        }

        let expected = calls / backends.len();
        for count in counts {
            let deviation = (count as f64 - expected as f64).abs() / expected as f64;
            assert!(deviation < 0.05, "count {} too far from {}", count, expected);
        }
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let backends: Vec<Backend> = ["s1", "s2", "s3"].into_iter().map(Backend::from).collect();
        let mut a = Random::with_seed(7);
        let mut b = Random::with_seed(7);

        for _ in 0..50 {
            assert_eq!(a.select(&backends, "").unwrap(), b.select(&backends, "").unwrap());
        }
    }

    #[test]
    fn test_single_backend() {
        let mut lb = Random::new();
        let backends = vec![Backend::from("only")];
        assert_eq!(lb.select(&backends, "").unwrap().as_str(), "only");
    }

    #[test]
    fn test_random_empty() {
        let mut lb = Random::new();
        assert_eq!(lb.select(&[], ""), Err(BalancerError::NoBackendAvailable));
    }
}
