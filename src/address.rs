//! Contract-facing addresses
//!
//! An [`Address`] is anything that can appear as an `ScAddress`: accounts,
//! contracts, muxed accounts, claimable balances and liquidity pools. Each
//! has a StrKey form selected by its leading character.

use crate::error::{Result, TxAsmError};
use crate::strkey::{self, VersionByte};
use crate::xdr;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    Account([u8; 32]),
    Contract([u8; 32]),
    MuxedAccount { key: [u8; 32], id: u64 },
    ClaimableBalance([u8; 32]),
    LiquidityPool([u8; 32]),
}

impl Address {
    /// Parses a `G`, `C`, `M`, `B` or `L` StrKey.
    pub fn from_string(address: &str) -> Result<Self> {
        let prefix = address.chars().next().and_then(VersionByte::from_prefix);
        match prefix {
            Some(VersionByte::AccountId) => Ok(Address::Account(strkey::decode_account_id(address)?)),
            Some(VersionByte::Contract) => Ok(Address::Contract(strkey::decode_contract(address)?)),
            Some(VersionByte::MuxedAccount) => {
                let (key, id) = strkey::decode_muxed_account(address)?;
                Ok(Address::MuxedAccount { key, id })
            }
            Some(VersionByte::ClaimableBalance) => {
                Ok(Address::ClaimableBalance(strkey::decode_claimable_balance(address)?))
            }
            Some(VersionByte::LiquidityPool) => {
                Ok(Address::LiquidityPool(strkey::decode_liquidity_pool(address)?))
            }
            _ => Err(TxAsmError::InvalidStrKey {
                expected: "address",
                message: format!("`{address}` does not start with G, C, M, B or L"),
            }),
        }
    }

    pub fn address_type(&self) -> xdr::ScAddressType {
        match self {
            Address::Account(_) => xdr::ScAddressType::Account,
            Address::Contract(_) => xdr::ScAddressType::Contract,
            Address::MuxedAccount { .. } => xdr::ScAddressType::MuxedAccount,
            Address::ClaimableBalance(_) => xdr::ScAddressType::ClaimableBalance,
            Address::LiquidityPool(_) => xdr::ScAddressType::LiquidityPool,
        }
    }

    pub fn to_sc_address(&self) -> xdr::ScAddress {
        match *self {
            Address::Account(key) => xdr::ScAddress::Account(xdr::PublicKey::Ed25519(key)),
            Address::Contract(id) => xdr::ScAddress::Contract(id),
            Address::MuxedAccount { key, id } => {
                xdr::ScAddress::MuxedAccount(xdr::MuxedEd25519Account { id, ed25519: key })
            }
            Address::ClaimableBalance(hash) => {
                xdr::ScAddress::ClaimableBalance(xdr::ClaimableBalanceId::V0(hash))
            }
            Address::LiquidityPool(id) => xdr::ScAddress::LiquidityPool(id),
        }
    }

    pub fn from_sc_address(address: &xdr::ScAddress) -> Self {
        match address {
            xdr::ScAddress::Account(key) => Address::Account(*key.as_bytes()),
            xdr::ScAddress::Contract(id) => Address::Contract(*id),
            xdr::ScAddress::MuxedAccount(muxed) => Address::MuxedAccount {
                key: muxed.ed25519,
                id: muxed.id,
            },
            xdr::ScAddress::ClaimableBalance(xdr::ClaimableBalanceId::V0(hash)) => {
                Address::ClaimableBalance(*hash)
            }
            xdr::ScAddress::LiquidityPool(id) => Address::LiquidityPool(*id),
        }
    }

    pub fn to_sc_val(&self) -> xdr::ScVal {
        xdr::ScVal::Address(self.to_sc_address())
    }

    pub fn from_sc_val(val: &xdr::ScVal) -> Result<Self> {
        match val {
            xdr::ScVal::Address(address) => Ok(Self::from_sc_address(address)),
            other => Err(TxAsmError::invalid_argument(
                "sc_val",
                format!("expected an address, got {:?}", other.val_type()),
            )),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = match self {
            Address::Account(key) => strkey::encode_account_id(key),
            Address::Contract(id) => strkey::encode_contract(id),
            Address::MuxedAccount { key, id } => strkey::encode_muxed_account(key, *id),
            Address::ClaimableBalance(hash) => strkey::encode_claimable_balance(hash),
            Address::LiquidityPool(id) => strkey::encode_liquidity_pool(id),
        };
        f.write_str(&encoded)
    }
}

impl FromStr for Address {
    type Err = TxAsmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::XdrCodec;

    const ACCOUNT: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";
    const MUXED: &str = "MAQAA5L65LSYH7CQ3VTJ7F3HHLGCL3DSLAR2Y47263D56MNNGHSQSAAAAAAAAAAE2LP26";

    #[test]
    fn test_string_roundtrip_for_every_kind() {
        let addresses = [
            ACCOUNT.to_string(),
            MUXED.to_string(),
            strkey::encode_contract(&[1u8; 32]),
            strkey::encode_claimable_balance(&[2u8; 32]),
            strkey::encode_liquidity_pool(&[3u8; 32]),
        ];
        for encoded in addresses {
            let address = Address::from_string(&encoded).unwrap();
            assert_eq!(address.to_string(), encoded);
        }
    }

    #[test]
    fn test_sc_val_roundtrip() {
        let address = Address::from_string(MUXED).unwrap();
        let val = address.to_sc_val();
        let bytes = val.to_xdr_bytes().unwrap();
        let decoded = xdr::ScVal::from_xdr_bytes(&bytes).unwrap();
        assert_eq!(Address::from_sc_val(&decoded).unwrap(), address);
        assert_eq!(address.address_type(), xdr::ScAddressType::MuxedAccount);
    }

    #[test]
    fn test_rejects_non_address_keys() {
        assert!(Address::from_string("SCZANGBA5YHTNYVVV4C3U252E2B6P6F5T3U6MM63WBSBZATAQI3EBTQ4").is_err());
        assert!(Address::from_sc_val(&xdr::ScVal::Void).is_err());
    }
}
