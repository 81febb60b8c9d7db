//! Frozen transactions
//!
//! A [`Transaction`] is what the builder produces: fields fixed, no
//! signatures. Signatures live on the envelope types in `envelope.rs`.
//!
//! Both v0 and v1 transactions hash in the v1 shape, so the signature base
//! for either is `network_id || ENVELOPE_TYPE_TX || tx`.

use crate::claim_predicate::ClaimableBalanceId;
use crate::error::{Result, TxAsmError};
use crate::memo::Memo;
use crate::muxed_account::MuxedAccount;
use crate::network::{self, Network};
use crate::operation::Operation;
use crate::preconditions::{Preconditions, TimeBounds};
use crate::serialization::{VarArray, XdrCodec};
use crate::xdr;

/// Envelope shape a transaction is encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionVersion {
    /// Legacy shape: plain ed25519 source, time bounds only, no Soroban data.
    V0,
    #[default]
    V1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    source: MuxedAccount,
    fee: u32,
    sequence: i64,
    preconditions: Preconditions,
    memo: Memo,
    operations: Vec<Operation>,
    soroban_data: Option<xdr::SorobanTransactionData>,
    version: TransactionVersion,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        source: MuxedAccount,
        fee: u32,
        sequence: i64,
        preconditions: Preconditions,
        memo: Memo,
        operations: Vec<Operation>,
        soroban_data: Option<xdr::SorobanTransactionData>,
        version: TransactionVersion,
    ) -> Result<Self> {
        let tx = Self {
            source,
            fee,
            sequence,
            preconditions: preconditions.normalized(),
            memo,
            operations,
            soroban_data,
            version,
        };
        tx.validate()?;
        Ok(tx)
    }

    fn validate(&self) -> Result<()> {
        if self.operations.is_empty() {
            return Err(TxAsmError::InvalidTransaction(
                "a transaction needs at least one operation".into(),
            ));
        }
        if self.operations.len() > xdr::MAX_OPS_PER_TX as usize {
            return Err(TxAsmError::InvalidTransaction(format!(
                "{} operations, at most {} are allowed",
                self.operations.len(),
                xdr::MAX_OPS_PER_TX
            )));
        }
        if self.operations.len() > 1 && self.operations.iter().any(Operation::is_soroban) {
            return Err(TxAsmError::InvalidTransaction(
                "a Soroban operation must be the only operation in its transaction".into(),
            ));
        }
        self.preconditions.validate()?;

        if self.version == TransactionVersion::V0 {
            if self.source.is_muxed() {
                return Err(TxAsmError::PreconditionConflict(
                    "a v0 transaction source cannot be a muxed account".into(),
                ));
            }
            if self.preconditions.requires_v2() {
                return Err(TxAsmError::PreconditionConflict(
                    "a v0 transaction only carries time bounds".into(),
                ));
            }
            if self.soroban_data.is_some() {
                return Err(TxAsmError::InvalidTransaction(
                    "a v0 transaction cannot carry Soroban data".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn source(&self) -> &MuxedAccount {
        &self.source
    }

    /// Total fee in stroops, resource fee included.
    pub fn fee(&self) -> u32 {
        self.fee
    }

    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    pub fn preconditions(&self) -> &Preconditions {
        &self.preconditions
    }

    pub fn time_bounds(&self) -> Option<&TimeBounds> {
        self.preconditions.time_bounds.as_ref()
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn soroban_data(&self) -> Option<&xdr::SorobanTransactionData> {
        self.soroban_data.as_ref()
    }

    pub fn version(&self) -> TransactionVersion {
        self.version
    }

    /// The declared Soroban resource fee, zero for classic transactions.
    pub fn resource_fee(&self) -> i64 {
        self.soroban_data.as_ref().map_or(0, |data| data.resource_fee)
    }

    /// True for a single `InvokeHostFunction`, `ExtendFootprintTtl` or
    /// `RestoreFootprint` operation.
    pub fn is_soroban_transaction(&self) -> bool {
        matches!(self.operations.as_slice(), [op] if op.is_soroban())
    }

    /// The same transaction in the v1 shape. v0 transactions convert
    /// losslessly.
    pub fn to_v1(&self) -> Self {
        Self {
            version: TransactionVersion::V1,
            ..self.clone()
        }
    }

    fn operations_to_xdr(&self) -> Result<xdr::Operations> {
        VarArray::new(
            self.operations
                .iter()
                .map(Operation::to_xdr)
                .collect::<Result<Vec<_>>>()?,
        )
    }

    /// The v1 wire form, used for hashing regardless of [`version`](Self::version).
    pub fn to_xdr_v1(&self) -> Result<xdr::Transaction> {
        let ext = match &self.soroban_data {
            Some(data) => xdr::TransactionExt::V1(data.clone()),
            None => xdr::TransactionExt::V0,
        };
        Ok(xdr::Transaction {
            source_account: self.source.to_xdr(),
            fee: self.fee,
            seq_num: self.sequence,
            cond: self.preconditions.to_xdr()?,
            memo: self.memo.to_xdr()?,
            operations: self.operations_to_xdr()?,
            ext,
        })
    }

    pub fn to_xdr_v0(&self) -> Result<xdr::TransactionV0> {
        if self.source.is_muxed() || self.preconditions.requires_v2() || self.soroban_data.is_some() {
            return Err(TxAsmError::InvalidTransaction(
                "transaction does not fit the v0 shape".into(),
            ));
        }
        Ok(xdr::TransactionV0 {
            source_account_ed25519: *self.source.raw_key(),
            fee: self.fee,
            seq_num: self.sequence,
            time_bounds: self.preconditions.time_bounds.map(|b| b.to_xdr()),
            memo: self.memo.to_xdr()?,
            operations: self.operations_to_xdr()?,
            ext: xdr::TransactionV0Ext::V0,
        })
    }

    fn operations_from_xdr(ops: &xdr::Operations) -> Result<Vec<Operation>> {
        ops.iter().map(Operation::from_xdr).collect()
    }

    pub fn from_xdr_v1(tx: &xdr::Transaction) -> Result<Self> {
        let soroban_data = match &tx.ext {
            xdr::TransactionExt::V0 => None,
            xdr::TransactionExt::V1(data) => Some(data.clone()),
        };
        Self::new(
            MuxedAccount::from_xdr(&tx.source_account),
            tx.fee,
            tx.seq_num,
            Preconditions::from_xdr(&tx.cond),
            Memo::from_xdr(&tx.memo),
            Self::operations_from_xdr(&tx.operations)?,
            soroban_data,
            TransactionVersion::V1,
        )
    }

    pub fn from_xdr_v0(tx: &xdr::TransactionV0) -> Result<Self> {
        let preconditions = match &tx.time_bounds {
            Some(bounds) => Preconditions::with_time_bounds(TimeBounds::from_xdr(bounds)),
            None => Preconditions::none(),
        };
        Self::new(
            MuxedAccount::from_raw(tx.source_account_ed25519, None),
            tx.fee,
            tx.seq_num,
            preconditions,
            Memo::from_xdr(&tx.memo),
            Self::operations_from_xdr(&tx.operations)?,
            None,
            TransactionVersion::V0,
        )
    }

    /// `network_id || ENVELOPE_TYPE_TX || tx`, the bytes that get signed.
    pub fn signature_base(&self, network: &Network) -> Result<Vec<u8>> {
        xdr::TransactionSignaturePayload {
            network_id: network.network_id(),
            tagged_transaction: xdr::TransactionSignaturePayloadTaggedTransaction::Tx(self.to_xdr_v1()?),
        }
        .to_xdr_bytes()
    }

    pub fn hash(&self, network: &Network) -> Result<xdr::Hash> {
        Ok(network::sha256(&self.signature_base(network)?))
    }

    /// Id of the balance created by the `CreateClaimableBalance` operation at
    /// `op_index`, known before submission.
    pub fn claimable_balance_id(&self, op_index: usize) -> Result<ClaimableBalanceId> {
        let op = self.operations.get(op_index).ok_or_else(|| {
            TxAsmError::invalid_argument(
                "op_index",
                format!("{op_index} is out of range for {} operations", self.operations.len()),
            )
        })?;
        if op.operation_type() != xdr::OperationType::CreateClaimableBalance {
            return Err(TxAsmError::invalid_argument(
                "op_index",
                format!("operation {op_index} is {:?}, not CreateClaimableBalance", op.operation_type()),
            ));
        }
        let preimage = xdr::HashIdPreimage::OpId(xdr::HashIdPreimageOperationId {
            source_account: self.source.xdr_account_id(),
            seq_num: self.sequence,
            op_num: op_index as u32,
        });
        Ok(ClaimableBalanceId(network::sha256(&preimage.to_xdr_bytes()?)))
    }
}

/// A fee-bump wrapper around a signed v1 transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBumpTransaction {
    fee_source: MuxedAccount,
    fee: i64,
    inner: Transaction,
    inner_signatures: Vec<xdr::DecoratedSignature>,
}

impl FeeBumpTransaction {
    pub(crate) fn new(
        fee_source: MuxedAccount,
        fee: i64,
        inner: Transaction,
        inner_signatures: Vec<xdr::DecoratedSignature>,
    ) -> Self {
        Self {
            fee_source,
            fee,
            inner: inner.to_v1(),
            inner_signatures,
        }
    }

    pub fn fee_source(&self) -> &MuxedAccount {
        &self.fee_source
    }

    pub fn fee(&self) -> i64 {
        self.fee
    }

    pub fn inner_transaction(&self) -> &Transaction {
        &self.inner
    }

    pub fn inner_signatures(&self) -> &[xdr::DecoratedSignature] {
        &self.inner_signatures
    }

    /// Per-operation fee, counting the fee bump itself as one operation.
    pub fn base_fee(&self) -> i64 {
        let ops = self.inner.operations.len() as i64 + 1;
        (self.fee - self.inner.resource_fee()) / ops
    }

    pub fn to_xdr(&self) -> Result<xdr::FeeBumpTransaction> {
        Ok(xdr::FeeBumpTransaction {
            fee_source: self.fee_source.to_xdr(),
            fee: self.fee,
            inner_tx: xdr::FeeBumpTransactionInnerTx::Tx(xdr::TransactionV1Envelope {
                tx: self.inner.to_xdr_v1()?,
                signatures: VarArray::new(self.inner_signatures.clone())?,
            }),
            ext: xdr::FeeBumpTransactionExt::V0,
        })
    }

    pub fn from_xdr(tx: &xdr::FeeBumpTransaction) -> Result<Self> {
        let xdr::FeeBumpTransactionInnerTx::Tx(inner) = &tx.inner_tx;
        Ok(Self {
            fee_source: MuxedAccount::from_xdr(&tx.fee_source),
            fee: tx.fee,
            inner: Transaction::from_xdr_v1(&inner.tx)?,
            inner_signatures: inner.signatures.to_vec(),
        })
    }

    /// `network_id || ENVELOPE_TYPE_TX_FEE_BUMP || fee_bump_tx`.
    pub fn signature_base(&self, network: &Network) -> Result<Vec<u8>> {
        xdr::TransactionSignaturePayload {
            network_id: network.network_id(),
            tagged_transaction: xdr::TransactionSignaturePayloadTaggedTransaction::TxFeeBump(self.to_xdr()?),
        }
        .to_xdr_bytes()
    }

    pub fn hash(&self, network: &Network) -> Result<xdr::Hash> {
        Ok(network::sha256(&self.signature_base(network)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;
    use crate::claim_predicate::Claimant;

    const SOURCE: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";
    const DESTINATION: &str = "GDQERENWDDSQZS7R7WKHZI3BSOYMV3FSWR7TFUYFTKQ447PIX6NREOJM";

    fn payment(amount: &str) -> Operation {
        Operation::payment(DESTINATION, Asset::native(), amount).unwrap()
    }

    fn transaction(operations: Vec<Operation>, version: TransactionVersion) -> Transaction {
        Transaction::new(
            MuxedAccount::new(SOURCE, None).unwrap(),
            100 * operations.len() as u32,
            1,
            Preconditions::with_time_bounds(TimeBounds::new(0, 0).unwrap()),
            Memo::text("hello").unwrap(),
            operations,
            None,
            version,
        )
        .unwrap()
    }

    #[test]
    fn test_v0_and_v1_hash_alike() {
        let network = Network::testnet();
        let v1 = transaction(vec![payment("1")], TransactionVersion::V1);
        let v0 = transaction(vec![payment("1")], TransactionVersion::V0);
        assert_eq!(v0.hash(&network).unwrap(), v1.hash(&network).unwrap());

        let base = v1.signature_base(&network).unwrap();
        assert_eq!(&base[..32], &network.network_id());
        assert_eq!(&base[32..36], &[0, 0, 0, 2]);
        assert_eq!(&base[36..], &v1.to_xdr_v1().unwrap().to_xdr_bytes().unwrap()[..]);
    }

    #[test]
    fn test_v0_roundtrip() {
        let tx = transaction(vec![payment("2.5")], TransactionVersion::V0);
        let wire = tx.to_xdr_v0().unwrap();
        let decoded = Transaction::from_xdr_v0(&xdr::TransactionV0::from_xdr_bytes(&wire.to_xdr_bytes().unwrap()).unwrap())
            .unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn test_network_changes_hash() {
        let tx = transaction(vec![payment("1")], TransactionVersion::V1);
        assert_ne!(
            tx.hash(&Network::testnet()).unwrap(),
            tx.hash(&Network::public()).unwrap()
        );
    }

    #[test]
    fn test_rejects_empty_and_mixed_soroban() {
        let source = MuxedAccount::new(SOURCE, None).unwrap();
        let empty = Transaction::new(
            source,
            100,
            1,
            Preconditions::none(),
            Memo::none(),
            vec![],
            None,
            TransactionVersion::V1,
        );
        assert!(matches!(empty, Err(TxAsmError::InvalidTransaction(_))));

        let mixed = Transaction::new(
            source,
            200,
            1,
            Preconditions::none(),
            Memo::none(),
            vec![payment("1"), Operation::restore_footprint()],
            None,
            TransactionVersion::V1,
        );
        assert!(mixed.is_err());
    }

    #[test]
    fn test_v0_rejects_muxed_source() {
        let muxed = MuxedAccount::new(SOURCE, Some(7)).unwrap();
        let result = Transaction::new(
            muxed,
            100,
            1,
            Preconditions::none(),
            Memo::none(),
            vec![payment("1")],
            None,
            TransactionVersion::V0,
        );
        assert!(matches!(result, Err(TxAsmError::PreconditionConflict(_))));
    }

    #[test]
    fn test_claimable_balance_id() {
        let claim = Operation::create_claimable_balance(
            Asset::native(),
            "10",
            vec![Claimant::unconditional(DESTINATION).unwrap()],
        )
        .unwrap();
        let tx = transaction(vec![payment("1"), claim.clone(), claim], TransactionVersion::V1);

        let first = tx.claimable_balance_id(1).unwrap();
        let second = tx.claimable_balance_id(2).unwrap();
        assert_ne!(first, second);
        assert_eq!(first.to_string().len(), 72);
        assert!(tx.claimable_balance_id(0).is_err());
        assert!(tx.claimable_balance_id(3).is_err());
    }

    #[test]
    fn test_soroban_detection() {
        let tx = transaction(vec![Operation::extend_footprint_ttl(100)], TransactionVersion::V1);
        assert!(tx.is_soroban_transaction());
        assert!(!transaction(vec![payment("1")], TransactionVersion::V1).is_soroban_transaction());
    }

    #[test]
    fn test_fee_bump_base_fee() {
        let inner = transaction(vec![payment("1"), payment("2")], TransactionVersion::V0);
        let bump = FeeBumpTransaction::new(MuxedAccount::new(DESTINATION, None).unwrap(), 600, inner, vec![]);
        assert_eq!(bump.base_fee(), 200);
        assert_eq!(bump.inner_transaction().version(), TransactionVersion::V1);

        let decoded = FeeBumpTransaction::from_xdr(&bump.to_xdr().unwrap()).unwrap();
        assert_eq!(decoded, bump);
    }
}
