//! Transactions, envelopes and the hash preimages derived from them

use super::contract::{ContractIdPreimage, SorobanAuthorizedInvocation, SorobanTransactionData};
use super::operation::Operation;
use super::types::{
    AccountId, Asset, DecoratedSignature, Hash, Memo, MuxedAccount, PoolId, Preconditions,
    SequenceNumber, TimeBounds, Uint256,
};
use crate::serialization::VarArray;

/// Upper bound on operations per transaction.
pub const MAX_OPS_PER_TX: u32 = 100;

pub type Operations = VarArray<Operation, MAX_OPS_PER_TX>;
pub type Signatures = VarArray<DecoratedSignature, 20>;

xdr_union! {
    pub enum TransactionExt {
        V0 = 0,
        V1(SorobanTransactionData) = 1,
    }
}

xdr_struct! {
    pub struct Transaction {
        pub source_account: MuxedAccount,
        pub fee: u32,
        pub seq_num: SequenceNumber,
        pub cond: Preconditions,
        pub memo: Memo,
        pub operations: Operations,
        pub ext: TransactionExt,
    }
}

xdr_union! {
    pub enum TransactionV0Ext {
        V0 = 0,
    }
}

xdr_struct! {
    /// The pre-protocol-13 transaction layout, with a bare ed25519 source.
    pub struct TransactionV0 {
        pub source_account_ed25519: Uint256,
        pub fee: u32,
        pub seq_num: SequenceNumber,
        pub time_bounds: Option<TimeBounds>,
        pub memo: Memo,
        pub operations: Operations,
        pub ext: TransactionV0Ext,
    }
}

xdr_struct! {
    pub struct TransactionV0Envelope {
        pub tx: TransactionV0,
        pub signatures: Signatures,
    }
}

xdr_struct! {
    pub struct TransactionV1Envelope {
        pub tx: Transaction,
        pub signatures: Signatures,
    }
}

xdr_union! {
    pub enum FeeBumpTransactionInnerTx {
        Tx(TransactionV1Envelope) = 2,
    }
}

xdr_union! {
    pub enum FeeBumpTransactionExt {
        V0 = 0,
    }
}

xdr_struct! {
    pub struct FeeBumpTransaction {
        pub fee_source: MuxedAccount,
        pub fee: i64,
        pub inner_tx: FeeBumpTransactionInnerTx,
        pub ext: FeeBumpTransactionExt,
    }
}

xdr_struct! {
    pub struct FeeBumpTransactionEnvelope {
        pub tx: FeeBumpTransaction,
        pub signatures: Signatures,
    }
}

xdr_union! {
    pub enum TransactionEnvelope {
        TxV0(TransactionV0Envelope) = 0,
        Tx(TransactionV1Envelope) = 2,
        TxFeeBump(FeeBumpTransactionEnvelope) = 5,
    }
}

impl TransactionEnvelope {
    pub fn signatures(&self) -> &Signatures {
        match self {
            TransactionEnvelope::TxV0(env) => &env.signatures,
            TransactionEnvelope::Tx(env) => &env.signatures,
            TransactionEnvelope::TxFeeBump(env) => &env.signatures,
        }
    }
}

xdr_union! {
    pub enum TransactionSignaturePayloadTaggedTransaction {
        Tx(Transaction) = 2,
        TxFeeBump(FeeBumpTransaction) = 5,
    }
}

xdr_struct! {
    pub struct TransactionSignaturePayload {
        pub network_id: Hash,
        pub tagged_transaction: TransactionSignaturePayloadTaggedTransaction,
    }
}

xdr_struct! {
    pub struct HashIdPreimageOperationId {
        pub source_account: AccountId,
        pub seq_num: SequenceNumber,
        pub op_num: u32,
    }
}

xdr_struct! {
    pub struct HashIdPreimageRevokeId {
        pub source_account: AccountId,
        pub seq_num: SequenceNumber,
        pub op_num: u32,
        pub liquidity_pool_id: PoolId,
        pub asset: Asset,
    }
}

xdr_struct! {
    pub struct HashIdPreimageContractId {
        pub network_id: Hash,
        pub contract_id_preimage: ContractIdPreimage,
    }
}

xdr_struct! {
    pub struct HashIdPreimageSorobanAuthorization {
        pub network_id: Hash,
        pub nonce: i64,
        pub signature_expiration_ledger: u32,
        pub invocation: SorobanAuthorizedInvocation,
    }
}

xdr_union! {
    pub enum HashIdPreimage {
        OpId(HashIdPreimageOperationId) = 6,
        PoolRevokeOpId(HashIdPreimageRevokeId) = 7,
        ContractId(HashIdPreimageContractId) = 8,
        SorobanAuthorization(HashIdPreimageSorobanAuthorization) = 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::XdrCodec;
    use crate::xdr::{OperationBody, PublicKey};

    fn sample_tx() -> Transaction {
        Transaction {
            source_account: MuxedAccount::Ed25519([5u8; 32]),
            fee: 100,
            seq_num: 1,
            cond: Preconditions::None,
            memo: Memo::None,
            operations: VarArray::new(vec![Operation {
                source_account: None,
                body: OperationBody::Inflation,
            }])
            .unwrap(),
            ext: TransactionExt::V0,
        }
    }

    #[test]
    fn test_envelope_roundtrip() {
        let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: sample_tx(),
            signatures: VarArray::empty(),
        });
        let encoded = envelope.to_xdr().unwrap();
        assert_eq!(TransactionEnvelope::from_xdr(&encoded).unwrap(), envelope);
        assert_eq!(envelope.discriminant(), 2);
    }

    #[test]
    fn test_fee_bump_inner_must_be_v1() {
        let bytes = FeeBumpTransactionInnerTx::Tx(TransactionV1Envelope {
            tx: sample_tx(),
            signatures: VarArray::empty(),
        })
        .to_xdr_bytes()
        .unwrap();
        let mut v0 = bytes.clone();
        v0[3] = 0;
        assert!(FeeBumpTransactionInnerTx::from_xdr_bytes(&v0).is_err());
        assert!(FeeBumpTransactionInnerTx::from_xdr_bytes(&bytes).is_ok());
    }

    #[test]
    fn test_operation_limit() {
        let ops: Vec<Operation> = (0..101)
            .map(|_| Operation {
                source_account: None,
                body: OperationBody::Inflation,
            })
            .collect();
        assert!(Operations::new(ops).is_err());
    }

    #[test]
    fn test_op_id_preimage_layout() {
        let preimage = HashIdPreimage::OpId(HashIdPreimageOperationId {
            source_account: PublicKey::Ed25519([1u8; 32]),
            seq_num: 2,
            op_num: 3,
        });
        let bytes = preimage.to_xdr_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 0, 6]);
        assert_eq!(bytes.len(), 4 + 36 + 8 + 4);
    }
}
