// src/load_balancer/round_robin.rs
use crate::backend::Backend;
use crate::load_balancer::{BalancerError, SelectionStrategy};

#[derive(Debug, Default)]
pub struct RoundRobin {
    counter: usize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStrategy for RoundRobin {
    fn select(&mut self, backends: &[Backend], _client_key: &str) -> Result<Backend, BalancerError> {
        if backends.is_empty() {
            return Err(BalancerError::NoBackendAvailable);
        }

        let index = self.counter % backends.len();
        self.counter = self.counter.wrapping_add(1);
        Ok(backends[index].clone())
    }

    fn name(&self) -> &'static str {
        "round_robin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn backends(names: &[&str]) -> Vec<Backend> {
        names.iter().map(|n| Backend::from(*n)).collect()
    }

    #[test]
    fn test_round_robin_cycles_in_order() {
        let mut lb = RoundRobin::new();
        let pool = backends(&["s1", "s2", "s3"]);

        let picks: Vec<String> = (0..5)
            .map(|_| lb.select(&pool, "10.0.0.1").unwrap().to_string())
            .collect();

        assert_eq!(picks, vec!["s1", "s2", "s3", "s1", "s2"]);
    }

    #[test]
    fn test_round_robin_empty() {
        let mut lb = RoundRobin::new();
        assert_eq!(lb.select(&[], "10.0.0.1"), Err(BalancerError::NoBackendAvailable));
    }

    #[test]
    fn test_round_robin_counter_wraps() {
        let mut lb = RoundRobin { counter: usize::MAX };
        let pool = backends(&["s1", "s2"]);

        lb.select(&pool, "").unwrap();
        assert_eq!(lb.counter, 0);
        assert_eq!(lb.select(&pool, "").unwrap().as_str(), "s1");
    }

    proptest! {
        #[test]
        fn prop_round_robin_is_balanced(n in 1usize..16, m in 0usize..200) {
            let names: Vec<String> = (0..n).map(|i| format!("s{}", i)).collect();
            let pool: Vec<Backend> = names.iter().map(|s| Backend::from(s.as_str())).collect();
            let mut lb = RoundRobin::new();
            let mut counts = vec![0usize; n];

            for call in 0..m {
                let picked = lb.select(&pool, "").unwrap();
                prop_assert_eq!(&picked, &pool[call % n]);
                let position = pool.iter().position(|b| b == &picked).unwrap();
                counts[position] += 1;
            }

            let floor = m / n;
            let ceil = (m + n - 1) / n;
            for count in counts {
                prop_assert!(count == floor || count == ceil);
            }
        }
    }
}
