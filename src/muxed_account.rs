//! Multiplexed accounts
//!
//! A muxed account is an ed25519 account key with an optional 64-bit
//! sub-account id. Without an id it prints as `G...`, with one as `M...`.

use crate::error::{Result, TxAsmError};
use crate::strkey;
use crate::xdr;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MuxedAccount {
    key: [u8; 32],
    id: Option<u64>,
}

impl MuxedAccount {
    /// An account id (G...) with an optional sub-account id.
    pub fn new(account_id: &str, id: Option<u64>) -> Result<Self> {
        Ok(Self {
            key: strkey::decode_account_id(account_id)?,
            id,
        })
    }

    pub fn from_raw(key: [u8; 32], id: Option<u64>) -> Self {
        Self { key, id }
    }

    /// Accepts either a `G...` account id or an `M...` muxed account.
    pub fn from_account(account: &str) -> Result<Self> {
        match account.chars().next() {
            Some('M') => {
                let (key, id) = strkey::decode_muxed_account(account)?;
                Ok(Self { key, id: Some(id) })
            }
            Some('G') => Self::new(account, None),
            _ => Err(TxAsmError::InvalidStrKey {
                expected: "account id or muxed account",
                message: format!("`{account}` does not start with G or M"),
            }),
        }
    }

    /// The underlying account id (G...).
    pub fn account_id(&self) -> String {
        strkey::encode_account_id(&self.key)
    }

    /// The M... form, present only when a sub-account id is set.
    pub fn account_muxed(&self) -> Option<String> {
        self.id.map(|id| strkey::encode_muxed_account(&self.key, id))
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn raw_key(&self) -> &[u8; 32] {
        &self.key
    }

    pub fn is_muxed(&self) -> bool {
        self.id.is_some()
    }

    /// The M... form when muxed, otherwise the G... form.
    pub fn address(&self) -> String {
        self.account_muxed().unwrap_or_else(|| self.account_id())
    }

    pub fn xdr_account_id(&self) -> xdr::AccountId {
        xdr::PublicKey::Ed25519(self.key)
    }

    pub fn to_xdr(&self) -> xdr::MuxedAccount {
        match self.id {
            None => xdr::MuxedAccount::Ed25519(self.key),
            Some(id) => xdr::MuxedAccount::MuxedEd25519(xdr::MuxedAccountMed25519 {
                id,
                ed25519: self.key,
            }),
        }
    }

    pub fn from_xdr(account: &xdr::MuxedAccount) -> Self {
        match account {
            xdr::MuxedAccount::Ed25519(key) => Self { key: *key, id: None },
            xdr::MuxedAccount::MuxedEd25519(muxed) => Self {
                key: muxed.ed25519,
                id: Some(muxed.id),
            },
        }
    }
}

impl fmt::Display for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

impl FromStr for MuxedAccount {
    type Err = TxAsmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_account(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::XdrCodec;

    const ACCOUNT: &str = "GAQAA5L65LSYH7CQ3VTJ7F3HHLGCL3DSLAR2Y47263D56MNNGHSQSTVY";
    const MUXED: &str = "MAQAA5L65LSYH7CQ3VTJ7F3HHLGCL3DSLAR2Y47263D56MNNGHSQSAAAAAAAAAAE2LP26";

    #[test]
    fn test_muxed_string_roundtrip() {
        let account = MuxedAccount::from_account(MUXED).unwrap();
        assert_eq!(account.id(), Some(1234));
        assert_eq!(account.account_id(), ACCOUNT);
        assert_eq!(account.account_muxed().as_deref(), Some(MUXED));
        assert_eq!(account.to_string(), MUXED);
    }

    #[test]
    fn test_muxed_xdr_vector() {
        let account = MuxedAccount::from_account(MUXED).unwrap();
        assert_eq!(
            account.to_xdr().to_xdr().unwrap(),
            "AAABAAAAAAAAAATSIAB1furlg/xQ3Wafl2c6zCXsclgjrHP69sffMa0x5Qk="
        );
        let decoded = MuxedAccount::from_xdr(&account.to_xdr());
        assert_eq!(decoded, account);
    }

    #[test]
    fn test_plain_account() {
        let account: MuxedAccount = ACCOUNT.parse().unwrap();
        assert!(!account.is_muxed());
        assert_eq!(account.account_muxed(), None);
        assert_eq!(account.address(), ACCOUNT);
        assert!(matches!(account.to_xdr(), xdr::MuxedAccount::Ed25519(_)));
    }

    #[test]
    fn test_rejects_other_keys() {
        assert!(MuxedAccount::from_account("SCZANGBA5YHTNYVVV4C3U252E2B6P6F5T3U6MM63WBSBZATAQI3EBTQ4").is_err());
        assert!(MuxedAccount::from_account("").is_err());
    }
}
