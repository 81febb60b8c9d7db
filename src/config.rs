//! Builder defaults loaded from JSON
//!
//! ```json
//! { "network_passphrase": "Test SDF Network ; September 2015", "base_fee": 200, "timeout_secs": 30 }
//! ```
//!
//! Missing fields take their defaults.

use crate::error::{Result, TxAsmError};
use crate::fee_calculator::MIN_BASE_FEE;
use crate::network::{Network, TESTNET_NETWORK_PASSPHRASE};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub network_passphrase: String,
    /// Per-operation fee in stroops.
    pub base_fee: u32,
    /// Applied with `set_timeout` when a builder is created from this config.
    pub timeout_secs: Option<u64>,
    /// `false` builds legacy v0 envelopes.
    pub v1: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            network_passphrase: TESTNET_NETWORK_PASSPHRASE.to_string(),
            base_fee: MIN_BASE_FEE,
            timeout_secs: None,
            v1: true,
        }
    }
}

impl BuilderConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TxAsmError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| TxAsmError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TxAsmError::ConfigError(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_fee < MIN_BASE_FEE {
            return Err(TxAsmError::ConfigError(format!(
                "base_fee {} is below the minimum of {MIN_BASE_FEE}",
                self.base_fee
            )));
        }
        if self.network_passphrase.is_empty() {
            return Err(TxAsmError::ConfigError("network_passphrase is empty".into()));
        }
        Ok(())
    }

    pub fn network(&self) -> Network {
        Network::new(self.network_passphrase.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = BuilderConfig::from_json_str(r#"{ "base_fee": 250 }"#).unwrap();
        assert_eq!(config.base_fee, 250);
        assert_eq!(config.network(), Network::testnet());
        assert!(config.v1);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_rejects_low_base_fee() {
        let err = BuilderConfig::from_json_str(r#"{ "base_fee": 10 }"#).unwrap_err();
        assert!(matches!(err, TxAsmError::ConfigError(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = BuilderConfig {
            timeout_secs: Some(30),
            v1: false,
            ..BuilderConfig::default()
        };
        assert_eq!(BuilderConfig::from_json_str(&config.to_json().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        assert!(BuilderConfig::from_json_file("/nonexistent/txasm.json").is_err());
    }
}
