//! Network identity
//!
//! A network is named by its passphrase; the id used in signature payloads is
//! `sha256(passphrase)`. Ids are memoized per passphrase in a process-wide
//! map. Entries never change once inserted, so concurrent readers only ever
//! observe the same value a fresh hash would produce.

use crate::xdr::Hash;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::OnceLock;

pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
pub const TESTNET_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const FUTURENET_NETWORK_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";
pub const STANDALONE_NETWORK_PASSPHRASE: &str = "Standalone Network ; February 2017";

static NETWORK_IDS: OnceLock<DashMap<String, Hash>> = OnceLock::new();

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// The network id for a passphrase, computed once per passphrase.
pub fn network_id(passphrase: &str) -> Hash {
    let cache = NETWORK_IDS.get_or_init(DashMap::new);
    if let Some(id) = cache.get(passphrase) {
        return *id;
    }
    let id = sha256(passphrase.as_bytes());
    cache.insert(passphrase.to_string(), id);
    id
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network {
    passphrase: String,
}

impl Network {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    pub fn public() -> Self {
        Self::new(PUBLIC_NETWORK_PASSPHRASE)
    }

    pub fn testnet() -> Self {
        Self::new(TESTNET_NETWORK_PASSPHRASE)
    }

    pub fn futurenet() -> Self {
        Self::new(FUTURENET_NETWORK_PASSPHRASE)
    }

    /// The passphrase used by local quickstart networks.
    pub fn standalone() -> Self {
        Self::new(STANDALONE_NETWORK_PASSPHRASE)
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    pub fn network_id(&self) -> Hash {
        network_id(&self.passphrase)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::testnet()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.passphrase)
    }
}

impl From<&str> for Network {
    fn from(passphrase: &str) -> Self {
        Self::new(passphrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_network_ids() {
        assert_eq!(
            hex::encode(Network::testnet().network_id()),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
        assert_eq!(
            hex::encode(Network::public().network_id()),
            "7ac33997544e3175d266bd022439b22cdb16508c01163f26e5cb2a3e1045a979"
        );
    }

    #[test]
    fn test_memoized_id_matches_fresh_hash() {
        let passphrase = "memo test network";
        let first = network_id(passphrase);
        let second = network_id(passphrase);
        assert_eq!(first, second);
        assert_eq!(first, sha256(passphrase.as_bytes()));
    }

    #[test]
    fn test_concurrent_lookups_agree() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| network_id(FUTURENET_NETWORK_PASSPHRASE)))
            .collect();
        let expected = sha256(FUTURENET_NETWORK_PASSPHRASE.as_bytes());
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
