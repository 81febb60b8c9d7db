//! Transaction preconditions
//!
//! The wire shape is derived from which fields are set: any of the ledger
//! bounds, sequence constraints or extra signers selects the v2 shape, time
//! bounds alone select the time-bounds shape, and nothing at all selects none.
//!
//! Absent values are `None` and zero values are `Some(0)`. The v2 shape always
//! carries `min_seq_age` and `min_seq_ledger_gap`, so once a value is v2 those
//! two are `Some`, zero included, whether it was decoded or built. See
//! [`Preconditions::normalized`].

use crate::error::{Result, TxAsmError};
use crate::serialization::VarArray;
use crate::signer_key::SignerKey;
use crate::xdr;

/// At most this many extra signers may be required.
pub const MAX_EXTRA_SIGNERS: usize = 2;

/// A closed window of unix timestamps. A `max_time` of zero means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl TimeBounds {
    pub fn new(min_time: u64, max_time: u64) -> Result<Self> {
        if max_time != 0 && min_time > max_time {
            return Err(TxAsmError::invalid_argument(
                "max_time",
                format!("{max_time} is before min_time {min_time}"),
            ));
        }
        Ok(Self { min_time, max_time })
    }

    pub fn to_xdr(&self) -> xdr::TimeBounds {
        xdr::TimeBounds {
            min_time: self.min_time,
            max_time: self.max_time,
        }
    }

    pub fn from_xdr(bounds: &xdr::TimeBounds) -> Self {
        Self {
            min_time: bounds.min_time,
            max_time: bounds.max_time,
        }
    }
}

/// A ledger sequence window. A `max_ledger` of zero means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LedgerBounds {
    pub min_ledger: u32,
    pub max_ledger: u32,
}

impl LedgerBounds {
    pub fn new(min_ledger: u32, max_ledger: u32) -> Result<Self> {
        if max_ledger != 0 && min_ledger > max_ledger {
            return Err(TxAsmError::invalid_argument(
                "max_ledger",
                format!("{max_ledger} is before min_ledger {min_ledger}"),
            ));
        }
        Ok(Self { min_ledger, max_ledger })
    }

    pub fn to_xdr(&self) -> xdr::LedgerBounds {
        xdr::LedgerBounds {
            min_ledger: self.min_ledger,
            max_ledger: self.max_ledger,
        }
    }

    pub fn from_xdr(bounds: &xdr::LedgerBounds) -> Self {
        Self {
            min_ledger: bounds.min_ledger,
            max_ledger: bounds.max_ledger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Preconditions {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    pub min_sequence_number: Option<i64>,
    pub min_sequence_age: Option<u64>,
    pub min_sequence_ledger_gap: Option<u32>,
    pub extra_signers: Vec<SignerKey>,
}

impl Preconditions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_time_bounds(time_bounds: TimeBounds) -> Self {
        Self {
            time_bounds: Some(time_bounds),
            ..Self::default()
        }
    }

    /// True when any field only the v2 shape can carry is set.
    pub fn requires_v2(&self) -> bool {
        self.ledger_bounds.is_some()
            || self.min_sequence_number.is_some()
            || self.min_sequence_age.is_some()
            || self.min_sequence_ledger_gap.is_some()
            || !self.extra_signers.is_empty()
    }

    /// Fills the fields the v2 shape always carries with `Some(0)` when unset.
    /// Other shapes are returned unchanged.
    pub fn normalized(mut self) -> Self {
        if self.requires_v2() {
            self.min_sequence_age.get_or_insert(0);
            self.min_sequence_ledger_gap.get_or_insert(0);
        }
        self
    }

    pub fn precondition_type(&self) -> xdr::PreconditionType {
        if self.requires_v2() {
            xdr::PreconditionType::V2
        } else if self.time_bounds.is_some() {
            xdr::PreconditionType::Time
        } else {
            xdr::PreconditionType::None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.precondition_type() == xdr::PreconditionType::None
    }

    pub fn validate(&self) -> Result<()> {
        if self.extra_signers.len() > MAX_EXTRA_SIGNERS {
            return Err(TxAsmError::PreconditionConflict(format!(
                "{} extra signers, at most {MAX_EXTRA_SIGNERS} are allowed",
                self.extra_signers.len()
            )));
        }
        Ok(())
    }

    pub fn to_xdr(&self) -> Result<xdr::Preconditions> {
        self.validate()?;
        Ok(match self.precondition_type() {
            xdr::PreconditionType::None => xdr::Preconditions::None,
            xdr::PreconditionType::Time => {
                xdr::Preconditions::Time(self.time_bounds.unwrap_or_default().to_xdr())
            }
            xdr::PreconditionType::V2 => {
                let extra_signers = self
                    .extra_signers
                    .iter()
                    .map(SignerKey::to_xdr)
                    .collect::<Result<Vec<_>>>()?;
                xdr::Preconditions::V2(xdr::PreconditionsV2 {
                    time_bounds: self.time_bounds.map(|b| b.to_xdr()),
                    ledger_bounds: self.ledger_bounds.map(|b| b.to_xdr()),
                    min_seq_num: self.min_sequence_number,
                    min_seq_age: self.min_sequence_age.unwrap_or(0),
                    min_seq_ledger_gap: self.min_sequence_ledger_gap.unwrap_or(0),
                    extra_signers: VarArray::new(extra_signers)?,
                })
            }
        })
    }

    pub fn from_xdr(cond: &xdr::Preconditions) -> Self {
        match cond {
            xdr::Preconditions::None => Self::none(),
            xdr::Preconditions::Time(bounds) => Self::with_time_bounds(TimeBounds::from_xdr(bounds)),
            xdr::Preconditions::V2(v2) => Self {
                time_bounds: v2.time_bounds.as_ref().map(TimeBounds::from_xdr),
                ledger_bounds: v2.ledger_bounds.as_ref().map(LedgerBounds::from_xdr),
                min_sequence_number: v2.min_seq_num,
                min_sequence_age: Some(v2.min_seq_age),
                min_sequence_ledger_gap: Some(v2.min_seq_ledger_gap),
                extra_signers: v2.extra_signers.iter().map(SignerKey::from_xdr).collect(),
            },
        }
    }
}
