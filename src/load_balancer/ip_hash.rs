// src/load_balancer/ip_hash.rs
use crate::backend::Backend;
use crate::load_balancer::{BalancerError, SelectionStrategy};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Sticky client-to-backend affinity keyed on the client address.
///
/// The first selection for a client hashes its key modulo the backend count
/// and remembers the resulting index. Later selections return that index
/// without rehashing, even if more backends have been registered since.
///
/// Entries are never evicted; the map grows with the number of distinct
/// clients seen over the life of the process.
#[derive(Debug, Default)]
pub struct IpHash {
    sticky: HashMap<String, usize>,
}

impl IpHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clients with a remembered backend.
    pub fn sticky_len(&self) -> usize {
        self.sticky.len()
    }

    pub fn hash_key(client_key: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        client_key.hash(&mut hasher);
        hasher.finish()
    }
}

impl SelectionStrategy for IpHash {
    fn select(&mut self, backends: &[Backend], client_key: &str) -> Result<Backend, BalancerError> {
        if backends.is_empty() {
            return Err(BalancerError::NoBackendAvailable);
        }

        // A remembered index can only be out of range if the caller passed a
        // shorter list than before; fall through and reassign in that case.
        if let Some(backend) = self
            .sticky
            .get(client_key)
            .and_then(|&index| backends.get(index))
        {
            return Ok(backend.clone());
        }

        let index = (Self::hash_key(client_key) % backends.len() as u64) as usize;
        self.sticky.insert(client_key.to_string(), index);
        tracing::trace!(client = client_key, index, "Assigned sticky backend");
        Ok(backends[index].clone())
    }

    fn name(&self) -> &'static str {
        "ip_hash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pool(n: usize) -> Vec<Backend> {
        (0..n).map(|i| Backend::from(format!("10.0.1.{}:80", i))).collect()
    }

    #[test]
    fn test_same_client_same_backend() {
        let mut lb = IpHash::new();
        let backends = pool(3);

        let first = lb.select(&backends, "192.168.1.20").unwrap();
        for _ in 0..10 {
            assert_eq!(lb.select(&backends, "192.168.1.20").unwrap(), first);
        }
        assert_eq!(lb.sticky_len(), 1);
    }

    #[test]
    fn test_index_is_hash_mod_len() {
        let mut lb = IpHash::new();
        let backends = pool(5);

        for key in ["10.0.0.1", "10.0.0.2", "172.16.4.9", "::1"] {
            let expected = (IpHash::hash_key(key) % 5) as usize;
            assert_eq!(lb.select(&backends, key).unwrap(), backends[expected]);
        }
        assert_eq!(lb.sticky_len(), 4);
    }

    #[test]
    fn test_affinity_survives_registry_growth() {
        let mut lb = IpHash::new();
        let mut backends = pool(2);

        let first = lb.select(&backends, "10.9.8.7").unwrap();
        backends.extend(pool(7).into_iter().skip(2));

        assert_eq!(lb.select(&backends, "10.9.8.7").unwrap(), first);
    }

    #[test]
    fn test_stale_index_is_reassigned() {
        let mut lb = IpHash::new();
        lb.sticky.insert("10.0.0.1".into(), 4);
        let backends = pool(2);

        let picked = lb.select(&backends, "10.0.0.1").unwrap();
        let expected = (IpHash::hash_key("10.0.0.1") % 2) as usize;
        assert_eq!(picked, backends[expected]);
        assert_eq!(lb.sticky["10.0.0.1"], expected);
    }

    #[test]
    fn test_ip_hash_empty() {
        let mut lb = IpHash::new();
        assert_eq!(lb.select(&[], "10.0.0.1"), Err(BalancerError::NoBackendAvailable));
        assert_eq!(lb.sticky_len(), 0);
    }

    proptest! {
        #[test]
        fn prop_key_maps_deterministically(key in "[0-9a-f:.]{1,39}", n in 1usize..12) {
            let backends = pool(n);
            let mut a = IpHash::new();
            let mut b = IpHash::new();

            let first = a.select(&backends, &key).unwrap();
            prop_assert_eq!(&b.select(&backends, &key).unwrap(), &first);
            prop_assert_eq!(&a.select(&backends, &key).unwrap(), &first);
        }
    }
}
