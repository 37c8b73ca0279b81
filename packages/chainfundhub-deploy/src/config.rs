use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::types::errors::{require_valid_config, DeployError, Result};

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_CONFIRMATIONS: usize = 1;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Settings for a deployment run.
#[derive(Clone)]
pub struct DeployConfig {
    pub rpc_url: String,
    pub private_key: String,
    /// Taken from the node when unset.
    pub chain_id: Option<u64>,
    pub artifacts_dir: PathBuf,
    pub confirmations: usize,
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
    pub manifest_path: Option<PathBuf>,
}

impl std::fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("chain_id", &self.chain_id)
            .field("artifacts_dir", &self.artifacts_dir)
            .field("confirmations", &self.confirmations)
            .field("confirmation_timeout", &self.confirmation_timeout)
            .field("poll_interval", &self.poll_interval)
            .field("manifest_path", &self.manifest_path)
            .finish()
    }
}

impl DeployConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let private_key = get("PRIVATE_KEY")
            .ok_or_else(|| DeployError::Config("PRIVATE_KEY must be set".to_string()))?;

        let confirmations = parse_or(get("CONFIRMATIONS"), "CONFIRMATIONS", DEFAULT_CONFIRMATIONS)?;
        require_valid_config(confirmations > 0, "CONFIRMATIONS must be at least 1")?;

        let timeout_secs = parse_or(
            get("CONFIRMATION_TIMEOUT_SECS"),
            "CONFIRMATION_TIMEOUT_SECS",
            DEFAULT_CONFIRMATION_TIMEOUT_SECS,
        )?;
        require_valid_config(timeout_secs > 0, "CONFIRMATION_TIMEOUT_SECS must be at least 1")?;

        let poll_ms = parse_or(get("POLL_INTERVAL_MS"), "POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        require_valid_config(poll_ms > 0, "POLL_INTERVAL_MS must be at least 1")?;

        let chain_id = match get("CHAIN_ID") {
            Some(raw) => Some(parse::<u64>(&raw, "CHAIN_ID")?),
            None => None,
        };

        Ok(Self {
            rpc_url: get("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            private_key,
            chain_id,
            artifacts_dir: get("ARTIFACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR)),
            confirmations,
            confirmation_timeout: Duration::from_secs(timeout_secs),
            poll_interval: Duration::from_millis(poll_ms),
            manifest_path: get("DEPLOY_MANIFEST").map(PathBuf::from),
        })
    }
}

fn parse<T: FromStr>(raw: &str, key: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| DeployError::Config(format!("{} has invalid value {:?}", key, raw)))
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T> {
    match raw {
        Some(raw) => parse(&raw, key),
        None => Ok(default),
    }
}
