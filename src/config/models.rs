// src/config/models.rs
use crate::load_balancer::BalancerError;
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub backends: Vec<BackendConfig>,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub address: String,

    // Signed so that a negative weight reaches `validate` instead of
    // failing as a parse error.
    #[serde(default = "default_weight")]
    pub weight: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_metrics_port")]
    pub port: u16,

    #[serde(default = "default_metrics_path")]
    pub path: String,
}

/// Backend selection strategy chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Mode {
    #[default]
    RoundRobin,
    WeightedRoundRobin,
    IpHash,
    Random,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::RoundRobin,
        Mode::WeightedRoundRobin,
        Mode::IpHash,
        Mode::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::RoundRobin => "round_robin",
            Mode::WeightedRoundRobin => "weighted_round_robin",
            Mode::IpHash => "ip_hash",
            Mode::Random => "random",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = BalancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round_robin" | "rr" => Ok(Mode::RoundRobin),
            "weighted_round_robin" | "wrr" => Ok(Mode::WeightedRoundRobin),
            "ip_hash" | "iph" => Ok(Mode::IpHash),
            "random" | "ra" => Ok(Mode::Random),
            _ => Err(BalancerError::UnknownMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = BalancerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Default for Config {
    /// The three local backends the balancer ships with, weighted 3/1/2.
    fn default() -> Self {
        let backends = [("127.0.0.1:8081", 3), ("127.0.0.1:8082", 1), ("127.0.0.1:8083", 2)]
            .into_iter()
            .map(|(address, weight)| BackendConfig {
                address: address.to_string(),
                weight,
            })
            .collect();

        Self {
            listen: default_listen(),
            mode: Mode::default(),
            backends,
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
            path: default_metrics_path(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        for backend in &self.backends {
            if backend.weight <= 0 {
                return Err(BalancerError::InvalidWeightConfiguration {
                    backend: backend.address.clone(),
                    weight: backend.weight,
                }
                .into());
            }
        }

        if !self.metrics.path.starts_with('/') {
            anyhow::bail!("metrics path must start with '/': {}", self.metrics.path);
        }

        Ok(())
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_weight() -> i64 {
    1
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}
