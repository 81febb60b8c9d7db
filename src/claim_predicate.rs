//! Claim predicates, claimants and claimable balance ids
//!
//! A predicate is a small boolean tree over time conditions. `And` and `Or`
//! always have exactly two children; `Not` always has one. The XDR form
//! allows other arities, so decoding checks them.

use crate::error::{Result, TxAsmError};
use crate::serialization::{VarArray, XdrCodec};
use crate::strkey;
use crate::xdr;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimPredicate {
    Unconditional,
    And(Box<ClaimPredicate>, Box<ClaimPredicate>),
    Or(Box<ClaimPredicate>, Box<ClaimPredicate>),
    Not(Box<ClaimPredicate>),
    /// Claimable before this unix timestamp.
    BeforeAbsoluteTime(i64),
    /// Claimable within this many seconds of the balance being created.
    BeforeRelativeTime(i64),
}

impl ClaimPredicate {
    pub fn unconditional() -> Self {
        ClaimPredicate::Unconditional
    }

    pub fn and(left: ClaimPredicate, right: ClaimPredicate) -> Self {
        ClaimPredicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: ClaimPredicate, right: ClaimPredicate) -> Self {
        ClaimPredicate::Or(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(predicate: ClaimPredicate) -> Self {
        ClaimPredicate::Not(Box::new(predicate))
    }

    pub fn before_absolute_time(abs_before: i64) -> Self {
        ClaimPredicate::BeforeAbsoluteTime(abs_before)
    }

    pub fn before_relative_time(seconds: i64) -> Self {
        ClaimPredicate::BeforeRelativeTime(seconds)
    }

    pub fn to_xdr(&self) -> Result<xdr::ClaimPredicate> {
        Ok(match self {
            ClaimPredicate::Unconditional => xdr::ClaimPredicate::Unconditional,
            ClaimPredicate::And(left, right) => {
                xdr::ClaimPredicate::And(VarArray::new(vec![left.to_xdr()?, right.to_xdr()?])?)
            }
            ClaimPredicate::Or(left, right) => {
                xdr::ClaimPredicate::Or(VarArray::new(vec![left.to_xdr()?, right.to_xdr()?])?)
            }
            ClaimPredicate::Not(inner) => xdr::ClaimPredicate::Not(Some(Box::new(inner.to_xdr()?))),
            ClaimPredicate::BeforeAbsoluteTime(t) => xdr::ClaimPredicate::BeforeAbsoluteTime(*t),
            ClaimPredicate::BeforeRelativeTime(t) => xdr::ClaimPredicate::BeforeRelativeTime(*t),
        })
    }

    pub fn from_xdr(predicate: &xdr::ClaimPredicate) -> Result<Self> {
        Ok(match predicate {
            xdr::ClaimPredicate::Unconditional => ClaimPredicate::Unconditional,
            xdr::ClaimPredicate::And(children) => {
                let (left, right) = Self::pair(children, "and")?;
                ClaimPredicate::And(left, right)
            }
            xdr::ClaimPredicate::Or(children) => {
                let (left, right) = Self::pair(children, "or")?;
                ClaimPredicate::Or(left, right)
            }
            xdr::ClaimPredicate::Not(Some(inner)) => ClaimPredicate::Not(Box::new(Self::from_xdr(inner)?)),
            xdr::ClaimPredicate::Not(None) => {
                return Err(TxAsmError::invalid_argument("predicate", "`not` requires a predicate"))
            }
            xdr::ClaimPredicate::BeforeAbsoluteTime(t) => ClaimPredicate::BeforeAbsoluteTime(*t),
            xdr::ClaimPredicate::BeforeRelativeTime(t) => ClaimPredicate::BeforeRelativeTime(*t),
        })
    }

    fn pair(
        children: &VarArray<xdr::ClaimPredicate, 2>,
        combinator: &str,
    ) -> Result<(Box<ClaimPredicate>, Box<ClaimPredicate>)> {
        match children.as_slice() {
            [left, right] => Ok((Box::new(Self::from_xdr(left)?), Box::new(Self::from_xdr(right)?))),
            other => Err(TxAsmError::invalid_argument(
                "predicate",
                format!("`{combinator}` requires 2 predicates, got {}", other.len()),
            )),
        }
    }
}

/// A destination and the predicate under which it may claim a balance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Claimant {
    destination: String,
    predicate: ClaimPredicate,
}

impl Claimant {
    pub fn new(destination: &str, predicate: ClaimPredicate) -> Result<Self> {
        strkey::decode_account_id(destination)?;
        Ok(Self {
            destination: destination.to_string(),
            predicate,
        })
    }

    pub fn unconditional(destination: &str) -> Result<Self> {
        Self::new(destination, ClaimPredicate::Unconditional)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn predicate(&self) -> &ClaimPredicate {
        &self.predicate
    }

    pub fn to_xdr(&self) -> Result<xdr::Claimant> {
        Ok(xdr::Claimant::V0(xdr::ClaimantV0 {
            destination: xdr::PublicKey::Ed25519(strkey::decode_account_id(&self.destination)?),
            predicate: self.predicate.to_xdr()?,
        }))
    }

    pub fn from_xdr(claimant: &xdr::Claimant) -> Result<Self> {
        match claimant {
            xdr::Claimant::V0(v0) => Ok(Self {
                destination: strkey::encode_account_id(v0.destination.as_bytes()),
                predicate: ClaimPredicate::from_xdr(&v0.predicate)?,
            }),
        }
    }
}

/// A V0 claimable balance id.
///
/// Displays as the hex of its XDR form (type word then hash); parses from
/// that hex or from a `B...` StrKey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClaimableBalanceId(pub xdr::Hash);

impl ClaimableBalanceId {
    pub fn to_xdr(&self) -> xdr::ClaimableBalanceId {
        xdr::ClaimableBalanceId::V0(self.0)
    }

    pub fn from_xdr(id: &xdr::ClaimableBalanceId) -> Self {
        match id {
            xdr::ClaimableBalanceId::V0(hash) => ClaimableBalanceId(*hash),
        }
    }

    pub fn to_strkey(&self) -> String {
        strkey::encode_claimable_balance(&self.0)
    }
}

impl fmt::Display for ClaimableBalanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "00000000{}", hex::encode(self.0))
    }
}

impl FromStr for ClaimableBalanceId {
    type Err = TxAsmError;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with('B') {
            return Ok(ClaimableBalanceId(strkey::decode_claimable_balance(s)?));
        }
        let bytes = hex::decode(s).map_err(|e| TxAsmError::invalid_argument("balance_id", e.to_string()))?;
        let id = xdr::ClaimableBalanceId::from_xdr_bytes(&bytes)
            .map_err(|e| TxAsmError::invalid_argument("balance_id", e.to_string()))?;
        Ok(Self::from_xdr(&id))
    }
}
