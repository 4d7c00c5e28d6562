//! Configuration management for neon-txcheck

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CheckError, Result};

/// Endpoint configuration, loaded once at startup and passed explicitly into
/// every component call.
///
/// `BTreeMap` keeps endpoint iteration deterministic, so report order is
/// stable across runs.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Operator name -> Neon JSON-RPC endpoint URL
    pub rpc: BTreeMap<String, String>,
    /// Settlement network name -> Solana RPC endpoint URL
    pub solana: BTreeMap<String, String>,
}

impl Config {
    /// Resolve a settlement network name to its RPC endpoint.
    pub fn settlement_url(&self, network: &str) -> Result<&str> {
        self.solana
            .get(network)
            .map(String::as_str)
            .ok_or_else(|| CheckError::Config(format!("Network not found: {}", network)))
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| CheckError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let config: Config = toml::from_str(&config_str)
        .map_err(|e| CheckError::Config(format!("cannot parse {}: {}", path.display(), e)))?;

    // Validate critical values
    if config.rpc.is_empty() {
        return Err(CheckError::Config(
            "at least one operator endpoint must be set under [rpc]".to_string(),
        ));
    }
    if config.solana.is_empty() {
        return Err(CheckError::Config(
            "at least one settlement endpoint must be set under [solana]".to_string(),
        ));
    }

    Ok(config)
}
