// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
        }
        _ => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name));
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_yaml_config() {
        let path = write_temp(
            "lb.yaml",
            "listen: 127.0.0.1:9000\nmode: wrr\nbackends:\n  - address: a:1\n    weight: 2\n  - address: b:1\n",
        )
        .await;

        let config = load_config(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(config.mode, Mode::WeightedRoundRobin);
        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.backends.len(), 2);
        assert_eq!(config.backends[0].weight, 2);
    }

    #[tokio::test]
    async fn test_load_json_config() {
        let path = write_temp(
            "lb.json",
            r#"{"mode": "ip_hash", "backends": [{"address": "a:1"}], "metrics": {"enabled": true, "port": 9100}}"#,
        )
        .await;

        let config = load_config(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(config.mode, Mode::IpHash);
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.port, 9100);
    }

    #[tokio::test]
    async fn test_load_rejects_negative_weight() {
        let path = write_temp("bad.yaml", "backends:\n  - address: a:1\n    weight: -3\n").await;

        let err = load_config(&path).await.unwrap_err();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(err.to_string().contains("-3"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_config("/nonexistent/lb.yaml").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
