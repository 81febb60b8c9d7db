//! Signer keys and account signers

use crate::error::{Result, TxAsmError};
use crate::serialization::VarOpaque;
use crate::strkey::{self, VersionByte, MAX_SIGNED_PAYLOAD_LEN};
use crate::xdr;
use std::fmt;
use std::str::FromStr;

/// A key that can be added to an account as a signer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignerKey {
    Ed25519([u8; 32]),
    /// Hash of a transaction that is authorized in advance.
    PreAuthTx([u8; 32]),
    /// sha256 of a preimage revealed when signing.
    HashX([u8; 32]),
    Ed25519SignedPayload { key: [u8; 32], payload: Vec<u8> },
}

impl SignerKey {
    pub fn ed25519_public_key(account_id: &str) -> Result<Self> {
        Ok(SignerKey::Ed25519(strkey::decode_account_id(account_id)?))
    }

    pub fn pre_auth_tx(tx_hash: [u8; 32]) -> Self {
        SignerKey::PreAuthTx(tx_hash)
    }

    pub fn sha256_hash(hash: [u8; 32]) -> Self {
        SignerKey::HashX(hash)
    }

    pub fn ed25519_signed_payload(account_id: &str, payload: &[u8]) -> Result<Self> {
        Self::ed25519_signed_payload_raw(strkey::decode_account_id(account_id)?, payload)
    }

    pub fn ed25519_signed_payload_raw(key: [u8; 32], payload: &[u8]) -> Result<Self> {
        if payload.len() > MAX_SIGNED_PAYLOAD_LEN {
            return Err(TxAsmError::invalid_argument(
                "payload",
                format!("{} bytes exceeds {MAX_SIGNED_PAYLOAD_LEN}", payload.len()),
            ));
        }
        Ok(SignerKey::Ed25519SignedPayload {
            key,
            payload: payload.to_vec(),
        })
    }

    /// Parses a `G`, `T`, `X` or `P` StrKey.
    pub fn from_encoded_key(encoded: &str) -> Result<Self> {
        let prefix = encoded.chars().next().and_then(VersionByte::from_prefix);
        match prefix {
            Some(VersionByte::AccountId) => Self::ed25519_public_key(encoded),
            Some(VersionByte::PreAuthTx) => Ok(SignerKey::PreAuthTx(strkey::decode_pre_auth_tx(encoded)?)),
            Some(VersionByte::Sha256Hash) => Ok(SignerKey::HashX(strkey::decode_sha256_hash(encoded)?)),
            Some(VersionByte::SignedPayload) => {
                let (key, payload) = strkey::decode_signed_payload(encoded)?;
                Ok(SignerKey::Ed25519SignedPayload { key, payload })
            }
            _ => Err(TxAsmError::InvalidStrKey {
                expected: "signer key",
                message: format!("`{encoded}` does not start with G, T, X or P"),
            }),
        }
    }

    pub fn encoded_signer_key(&self) -> Result<String> {
        Ok(match self {
            SignerKey::Ed25519(key) => strkey::encode_account_id(key),
            SignerKey::PreAuthTx(hash) => strkey::encode_pre_auth_tx(hash),
            SignerKey::HashX(hash) => strkey::encode_sha256_hash(hash),
            SignerKey::Ed25519SignedPayload { key, payload } => strkey::encode_signed_payload(key, payload)?,
        })
    }

    pub fn signer_key_type(&self) -> xdr::SignerKeyType {
        match self {
            SignerKey::Ed25519(_) => xdr::SignerKeyType::Ed25519,
            SignerKey::PreAuthTx(_) => xdr::SignerKeyType::PreAuthTx,
            SignerKey::HashX(_) => xdr::SignerKeyType::HashX,
            SignerKey::Ed25519SignedPayload { .. } => xdr::SignerKeyType::Ed25519SignedPayload,
        }
    }

    pub fn to_xdr(&self) -> Result<xdr::SignerKey> {
        Ok(match self {
            SignerKey::Ed25519(key) => xdr::SignerKey::Ed25519(*key),
            SignerKey::PreAuthTx(hash) => xdr::SignerKey::PreAuthTx(*hash),
            SignerKey::HashX(hash) => xdr::SignerKey::HashX(*hash),
            SignerKey::Ed25519SignedPayload { key, payload } => {
                xdr::SignerKey::Ed25519SignedPayload(xdr::SignerKeyEd25519SignedPayload {
                    ed25519: *key,
                    payload: VarOpaque::new(payload.clone())?,
                })
            }
        })
    }

    pub fn from_xdr(key: &xdr::SignerKey) -> Self {
        match key {
            xdr::SignerKey::Ed25519(key) => SignerKey::Ed25519(*key),
            xdr::SignerKey::PreAuthTx(hash) => SignerKey::PreAuthTx(*hash),
            xdr::SignerKey::HashX(hash) => SignerKey::HashX(*hash),
            xdr::SignerKey::Ed25519SignedPayload(signed) => SignerKey::Ed25519SignedPayload {
                key: signed.ed25519,
                payload: signed.payload.to_vec(),
            },
        }
    }
}

impl FromStr for SignerKey {
    type Err = TxAsmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_encoded_key(s)
    }
}

impl fmt::Display for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encoded_signer_key() {
            Ok(encoded) => f.write_str(&encoded),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

/// A signer entry as carried by `SetOptions`. Weights above 255 are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

impl Signer {
    pub fn new(key: SignerKey, weight: u32) -> Result<Self> {
        if weight > 255 {
            return Err(TxAsmError::invalid_argument("weight", format!("{weight} exceeds 255")));
        }
        Ok(Self { key, weight })
    }

    pub fn to_xdr(&self) -> Result<xdr::Signer> {
        Ok(xdr::Signer {
            key: self.key.to_xdr()?,
            weight: self.weight,
        })
    }

    pub fn from_xdr(signer: &xdr::Signer) -> Self {
        Self {
            key: SignerKey::from_xdr(&signer.key),
            weight: signer.weight,
        }
    }
}
