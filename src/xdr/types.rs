//! Core XDR types: keys, accounts, assets, memos and preconditions

use crate::serialization::{VarArray, VarOpaque, XdrString};

pub type Hash = [u8; 32];
pub type Uint256 = [u8; 32];
pub type SequenceNumber = i64;
pub type TimePoint = u64;
pub type Duration = u64;
pub type String32 = XdrString<32>;
pub type String64 = XdrString<64>;
pub type DataValue = VarOpaque<64>;
pub type Signature = VarOpaque<64>;
pub type SignatureHint = [u8; 4];
pub type AssetCode4 = [u8; 4];
pub type AssetCode12 = [u8; 12];
pub type PoolId = Hash;
pub type AccountId = PublicKey;

xdr_enum! {
    pub enum EnvelopeType {
        TxV0 = 0,
        Scp = 1,
        Tx = 2,
        Auth = 3,
        ScpValue = 4,
        TxFeeBump = 5,
        OpId = 6,
        PoolRevokeOpId = 7,
        ContractId = 8,
        SorobanAuthorization = 9,
    }
}

xdr_enum! {
    pub enum CryptoKeyType {
        Ed25519 = 0,
        PreAuthTx = 1,
        HashX = 2,
        Ed25519SignedPayload = 3,
        MuxedEd25519 = 0x100,
    }
}

xdr_enum! {
    pub enum PublicKeyType {
        Ed25519 = 0,
    }
}

xdr_enum! {
    pub enum SignerKeyType {
        Ed25519 = 0,
        PreAuthTx = 1,
        HashX = 2,
        Ed25519SignedPayload = 3,
    }
}

xdr_union! {
    pub enum PublicKey {
        Ed25519(Uint256) = 0,
    }
}

impl PublicKey {
    pub fn as_bytes(&self) -> &Uint256 {
        match self {
            PublicKey::Ed25519(key) => key,
        }
    }
}

xdr_struct! {
    pub struct SignerKeyEd25519SignedPayload {
        pub ed25519: Uint256,
        pub payload: VarOpaque<64>,
    }
}

xdr_union! {
    pub enum SignerKey {
        Ed25519(Uint256) = 0,
        PreAuthTx(Uint256) = 1,
        HashX(Uint256) = 2,
        Ed25519SignedPayload(SignerKeyEd25519SignedPayload) = 3,
    }
}

xdr_struct! {
    pub struct MuxedAccountMed25519 {
        pub id: u64,
        pub ed25519: Uint256,
    }
}

xdr_union! {
    pub enum MuxedAccount {
        Ed25519(Uint256) = 0,
        MuxedEd25519(MuxedAccountMed25519) = 0x100,
    }
}

xdr_struct! {
    pub struct DecoratedSignature {
        pub hint: SignatureHint,
        pub signature: Signature,
    }
}

xdr_enum! {
    pub enum AssetType {
        Native = 0,
        CreditAlphanum4 = 1,
        CreditAlphanum12 = 2,
        PoolShare = 3,
    }
}

xdr_union! {
    pub enum AssetCode {
        CreditAlphanum4(AssetCode4) = 1,
        CreditAlphanum12(AssetCode12) = 2,
    }
}

xdr_struct! {
    pub struct AlphaNum4 {
        pub asset_code: AssetCode4,
        pub issuer: AccountId,
    }
}

xdr_struct! {
    pub struct AlphaNum12 {
        pub asset_code: AssetCode12,
        pub issuer: AccountId,
    }
}

xdr_union! {
    pub enum Asset {
        Native = 0,
        CreditAlphanum4(AlphaNum4) = 1,
        CreditAlphanum12(AlphaNum12) = 2,
    }
}

xdr_struct! {
    pub struct Price {
        pub n: i32,
        pub d: i32,
    }
}

xdr_enum! {
    pub enum LiquidityPoolType {
        ConstantProduct = 0,
    }
}

xdr_struct! {
    pub struct LiquidityPoolConstantProductParameters {
        pub asset_a: Asset,
        pub asset_b: Asset,
        pub fee: i32,
    }
}

xdr_union! {
    pub enum LiquidityPoolParameters {
        ConstantProduct(LiquidityPoolConstantProductParameters) = 0,
    }
}

xdr_union! {
    pub enum ChangeTrustAsset {
        Native = 0,
        CreditAlphanum4(AlphaNum4) = 1,
        CreditAlphanum12(AlphaNum12) = 2,
        PoolShare(LiquidityPoolParameters) = 3,
    }
}

xdr_union! {
    pub enum TrustLineAsset {
        Native = 0,
        CreditAlphanum4(AlphaNum4) = 1,
        CreditAlphanum12(AlphaNum12) = 2,
        PoolShare(PoolId) = 3,
    }
}

xdr_enum! {
    pub enum ClaimPredicateType {
        Unconditional = 0,
        And = 1,
        Or = 2,
        Not = 3,
        BeforeAbsoluteTime = 4,
        BeforeRelativeTime = 5,
    }
}

xdr_union! {
    pub enum ClaimPredicate {
        Unconditional = 0,
        And(VarArray<ClaimPredicate, 2>) = 1,
        Or(VarArray<ClaimPredicate, 2>) = 2,
        Not(Option<Box<ClaimPredicate>>) = 3,
        BeforeAbsoluteTime(i64) = 4,
        BeforeRelativeTime(i64) = 5,
    }
}

xdr_enum! {
    pub enum ClaimantType {
        V0 = 0,
    }
}

xdr_struct! {
    pub struct ClaimantV0 {
        pub destination: AccountId,
        pub predicate: ClaimPredicate,
    }
}

xdr_union! {
    pub enum Claimant {
        V0(ClaimantV0) = 0,
    }
}

xdr_enum! {
    pub enum ClaimableBalanceIdType {
        V0 = 0,
    }
}

xdr_union! {
    pub enum ClaimableBalanceId {
        V0(Hash) = 0,
    }
}

xdr_enum! {
    pub enum MemoType {
        None = 0,
        Text = 1,
        Id = 2,
        Hash = 3,
        Return = 4,
    }
}

xdr_union! {
    pub enum Memo {
        None = 0,
        Text(XdrString<28>) = 1,
        Id(u64) = 2,
        Hash(Hash) = 3,
        Return(Hash) = 4,
    }
}

xdr_struct! {
    pub struct TimeBounds {
        pub min_time: TimePoint,
        pub max_time: TimePoint,
    }
}

xdr_struct! {
    pub struct LedgerBounds {
        pub min_ledger: u32,
        pub max_ledger: u32,
    }
}

xdr_struct! {
    pub struct PreconditionsV2 {
        pub time_bounds: Option<TimeBounds>,
        pub ledger_bounds: Option<LedgerBounds>,
        pub min_seq_num: Option<SequenceNumber>,
        pub min_seq_age: Duration,
        pub min_seq_ledger_gap: u32,
        pub extra_signers: VarArray<SignerKey, 2>,
    }
}

xdr_enum! {
    pub enum PreconditionType {
        None = 0,
        Time = 1,
        V2 = 2,
    }
}

xdr_union! {
    pub enum Preconditions {
        None = 0,
        Time(TimeBounds) = 1,
        V2(PreconditionsV2) = 2,
    }
}

xdr_struct! {
    pub struct Signer {
        pub key: SignerKey,
        pub weight: u32,
    }
}

xdr_union! {
    pub enum ExtensionPoint {
        V0 = 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TxAsmError;
    use crate::serialization::XdrCodec;

    #[test]
    fn test_muxed_account_known_vector() {
        let encoded = "AAABAAAAAAAAAATSIAB1furlg/xQ3Wafl2c6zCXsclgjrHP69sffMa0x5Qk=";
        let muxed = MuxedAccount::from_xdr(encoded).unwrap();
        let key = hex::decode("2000757eeae583fc50dd669f97673acc25ec725823ac73faf6c7df31ad31e509").unwrap();

        match &muxed {
            MuxedAccount::MuxedEd25519(med) => {
                assert_eq!(med.id, 1234);
                assert_eq!(med.ed25519.to_vec(), key);
            }
            other => panic!("unexpected arm: {other:?}"),
        }
        assert_eq!(muxed.to_xdr().unwrap(), encoded);
    }

    #[test]
    fn test_asset_code_padding() {
        let asset = Asset::CreditAlphanum4(AlphaNum4 {
            asset_code: *b"USD\0",
            issuer: PublicKey::Ed25519([7u8; 32]),
        });
        let bytes = asset.to_xdr_bytes().unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 0, 1, b'U', b'S', b'D', 0]);
        assert_eq!(bytes.len(), 4 + 4 + 4 + 32);
    }

    #[test]
    fn test_memo_text_bound() {
        assert!(XdrString::<28>::new(vec![b'a'; 28]).is_ok());
        assert!(XdrString::<28>::new(vec![b'a'; 29]).is_err());

        let mut bytes = vec![0, 0, 0, 1, 0, 0, 0, 29];
        bytes.extend_from_slice(&[b'a'; 32]);
        assert!(Memo::from_xdr_bytes(&bytes).is_err());
    }

    #[test]
    fn test_unknown_discriminant_names_type() {
        let err = Memo::from_xdr_bytes(&[0, 0, 0, 9]).unwrap_err();
        assert_eq!(
            err,
            TxAsmError::UnknownDiscriminant {
                type_name: "Memo",
                value: 9
            }
        );
    }

    #[test]
    fn test_truncated_struct_names_struct() {
        let err = Price::from_xdr_bytes(&[0, 0, 0, 1, 0, 0]).unwrap_err();
        match err {
            TxAsmError::BufferTooSmall { type_name, .. } => assert_eq!(type_name, "Price"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nested_claim_predicate() {
        let predicate = ClaimPredicate::And(
            VarArray::new(vec![
                ClaimPredicate::Not(Some(Box::new(ClaimPredicate::BeforeRelativeTime(3600)))),
                ClaimPredicate::Unconditional,
            ])
            .unwrap(),
        );
        let bytes = predicate.to_xdr_bytes().unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 0, 1, 0, 0, 0, 2]);
        assert_eq!(ClaimPredicate::from_xdr_bytes(&bytes).unwrap(), predicate);
    }

    #[test]
    fn test_deeply_nested_predicate_is_rejected() {
        let mut bytes = Vec::new();
        for _ in 0..2000 {
            bytes.extend_from_slice(&[0, 0, 0, 3, 0, 0, 0, 1]);
        }
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        assert!(ClaimPredicate::from_xdr_bytes(&bytes).is_err());
    }

    #[test]
    fn test_enum_values() {
        assert_eq!(CryptoKeyType::MuxedEd25519.value(), 0x100);
        assert_eq!(EnvelopeType::from_i32(5), Some(EnvelopeType::TxFeeBump));
        assert_eq!(EnvelopeType::from_i32(42), None);
    }
}
