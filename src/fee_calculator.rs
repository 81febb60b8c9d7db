//! Fee arithmetic for transactions and fee bumps
//!
//! Classic fees are a per-operation inclusion fee. Soroban transactions add a
//! declared resource fee on top. A fee bump pays for one extra operation, the
//! bump itself, and must offer at least the inner transaction's per-operation rate.

use crate::error::{Result, TxAsmError};
use crate::transaction::Transaction;

/// Network minimum base fee in stroops.
pub const MIN_BASE_FEE: u32 = 100;

/// Breakdown of a transaction fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeEstimate {
    /// Fee offered per operation in stroops
    pub base_fee: u32,
    /// Number of operations charged for
    pub operation_count: usize,
    /// `base_fee * operation_count`
    pub inclusion_fee: u64,
    /// Soroban resource fee, zero for classic transactions
    pub resource_fee: i64,
    /// Value written to the transaction's `fee` field
    pub total_fee: u32,
}

/// Computes the `fee` field from a per-operation base fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeCalculator {
    base_fee: u32,
}

impl FeeCalculator {
    /// Calculator charging the network minimum
    pub fn new() -> Self {
        Self {
            base_fee: MIN_BASE_FEE,
        }
    }

    /// Calculator with a custom base fee
    pub fn with_base_fee(base_fee: u32) -> Self {
        Self { base_fee }
    }

    pub fn base_fee(&self) -> u32 {
        self.base_fee
    }

    /// Full fee breakdown for `operation_count` operations
    pub fn estimate(&self, operation_count: usize, resource_fee: i64) -> Result<FeeEstimate> {
        let inclusion_fee = u64::from(self.base_fee)
            .checked_mul(operation_count as u64)
            .ok_or_else(|| TxAsmError::FeeOverflow("inclusion fee exceeds u64".into()))?;
        let resource = u64::try_from(resource_fee).map_err(|_| {
            TxAsmError::invalid_argument("resource_fee", format!("{resource_fee} is negative"))
        })?;
        let total_fee = inclusion_fee
            .checked_add(resource)
            .and_then(|total| u32::try_from(total).ok())
            .ok_or_else(|| {
                TxAsmError::FeeOverflow(format!(
                    "{} x {operation_count} operations + {resource_fee} resource fee does not fit in u32",
                    self.base_fee
                ))
            })?;
        Ok(FeeEstimate {
            base_fee: self.base_fee,
            operation_count,
            inclusion_fee,
            resource_fee,
            total_fee,
        })
    }

    /// The `fee` field: `base_fee * operation_count + resource_fee`
    pub fn transaction_fee(&self, operation_count: usize, resource_fee: i64) -> Result<u32> {
        Ok(self.estimate(operation_count, resource_fee)?.total_fee)
    }
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-operation rate the inner transaction already pays, rounded up.
/// The resource fee is excluded.
pub fn inner_base_fee(inner: &Transaction) -> u64 {
    let inclusion = (i64::from(inner.fee()) - inner.resource_fee()).max(0) as u64;
    let ops = inner.operations().len().max(1) as u64;
    inclusion.div_ceil(ops)
}

/// Total fee for a fee bump of `inner` offering `base_fee` per operation.
///
/// Fails when `base_fee` is below [`MIN_BASE_FEE`] or below the inner
/// transaction's own rate.
pub fn fee_bump_fee(base_fee: u32, inner: &Transaction) -> Result<i64> {
    if base_fee < MIN_BASE_FEE {
        return Err(TxAsmError::FeeBumpBelowMinimum {
            base_fee,
            minimum: MIN_BASE_FEE,
        });
    }
    let inner_rate = inner_base_fee(inner);
    if u64::from(base_fee) < inner_rate {
        return Err(TxAsmError::FeeBumpBelowInnerFee {
            base_fee,
            inner_base_fee: inner_rate,
        });
    }
    let ops = inner.operations().len() as i64 + 1;
    i64::from(base_fee)
        .checked_mul(ops)
        .and_then(|fee| fee.checked_add(inner.resource_fee()))
        .ok_or_else(|| TxAsmError::FeeOverflow("fee bump fee exceeds i64".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::memo::Memo;
    use crate::muxed_account::MuxedAccount;
    use crate::operation::Operation;
    use crate::preconditions::Preconditions;
    use crate::soroban_data::SorobanDataBuilder;
    use crate::transaction::TransactionVersion;

    const SOURCE: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";

    fn inner(fee: u32, ops: usize, resource_fee: Option<i64>) -> Transaction {
        let operations = if resource_fee.is_some() {
            vec![Operation::restore_footprint()]
        } else {
            vec![Operation::payment(SOURCE, Asset::native(), "1").unwrap(); ops]
        };
        let soroban_data = resource_fee.map(|fee| SorobanDataBuilder::new().set_resource_fee(fee).build().unwrap());
        Transaction::new(
            MuxedAccount::new(SOURCE, None).unwrap(),
            fee,
            1,
            Preconditions::none(),
            Memo::none(),
            operations,
            soroban_data,
            TransactionVersion::V1,
        )
        .unwrap()
    }

    #[test]
    fn test_transaction_fee() {
        let calculator = FeeCalculator::new();
        assert_eq!(calculator.transaction_fee(1, 0).unwrap(), 100);
        assert_eq!(calculator.transaction_fee(3, 0).unwrap(), 300);
        assert_eq!(
            FeeCalculator::with_base_fee(250).transaction_fee(2, 1_000).unwrap(),
            1_500
        );
    }

    #[test]
    fn test_fee_overflow() {
        let calculator = FeeCalculator::with_base_fee(u32::MAX);
        assert!(matches!(calculator.transaction_fee(2, 0), Err(TxAsmError::FeeOverflow(_))));
    }

    #[test]
    fn test_estimate_breakdown() {
        let estimate = FeeCalculator::with_base_fee(200).estimate(2, 50).unwrap();
        assert_eq!(estimate.inclusion_fee, 400);
        assert_eq!(estimate.total_fee, 450);
    }

    #[test]
    fn test_inner_base_fee_rounds_up() {
        assert_eq!(inner_base_fee(&inner(301, 3, None)), 101);
        assert_eq!(inner_base_fee(&inner(200, 1, None)), 200);
        assert_eq!(inner_base_fee(&inner(10_100, 1, Some(10_000))), 100);
    }

    #[test]
    fn test_fee_bump_rules() {
        let tx = inner(200, 1, None);
        assert_eq!(
            fee_bump_fee(150, &tx),
            Err(TxAsmError::FeeBumpBelowInnerFee {
                base_fee: 150,
                inner_base_fee: 200
            })
        );
        assert_eq!(fee_bump_fee(200, &tx).unwrap(), 400);
        assert!(matches!(
            fee_bump_fee(99, &inner(10, 1, None)),
            Err(TxAsmError::FeeBumpBelowMinimum { .. })
        ));
        assert_eq!(fee_bump_fee(100, &inner(10_100, 1, Some(10_000))).unwrap(), 10_200);
    }
}
