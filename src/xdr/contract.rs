//! Smart-contract XDR types: values, addresses, host functions and authorization

use super::ledger::LedgerFootprint;
use super::types::{AccountId, Asset, ClaimableBalanceId, Duration, Hash, PoolId, TimePoint, Uint256};
use crate::serialization::{VarArray, VarOpaque, XdrString};

pub type ContractId = Hash;
pub type ScBytes = VarOpaque;
pub type ScString = XdrString;
pub type ScSymbol = XdrString<32>;
pub type ScVec = VarArray<ScVal>;
pub type ScMap = VarArray<ScMapEntry>;

xdr_enum! {
    pub enum ScValType {
        Bool = 0,
        Void = 1,
        Error = 2,
        U32 = 3,
        I32 = 4,
        U64 = 5,
        I64 = 6,
        Timepoint = 7,
        Duration = 8,
        U128 = 9,
        I128 = 10,
        U256 = 11,
        I256 = 12,
        Bytes = 13,
        String = 14,
        Symbol = 15,
        Vec = 16,
        Map = 17,
        Address = 18,
        ContractInstance = 19,
        LedgerKeyContractInstance = 20,
        LedgerKeyNonce = 21,
    }
}

xdr_enum! {
    pub enum ScErrorType {
        Contract = 0,
        WasmVm = 1,
        Context = 2,
        Storage = 3,
        Object = 4,
        Crypto = 5,
        Events = 6,
        Budget = 7,
        Value = 8,
        Auth = 9,
    }
}

xdr_enum! {
    pub enum ScErrorCode {
        ArithDomain = 0,
        IndexBounds = 1,
        InvalidInput = 2,
        MissingValue = 3,
        ExistingValue = 4,
        ExceededLimit = 5,
        InvalidAction = 6,
        InternalError = 7,
        UnexpectedType = 8,
        UnexpectedSize = 9,
    }
}

xdr_union! {
    pub enum ScError {
        Contract(u32) = 0,
        WasmVm(ScErrorCode) = 1,
        Context(ScErrorCode) = 2,
        Storage(ScErrorCode) = 3,
        Object(ScErrorCode) = 4,
        Crypto(ScErrorCode) = 5,
        Events(ScErrorCode) = 6,
        Budget(ScErrorCode) = 7,
        Value(ScErrorCode) = 8,
        Auth(ScErrorCode) = 9,
    }
}

xdr_struct! {
    pub struct UInt128Parts {
        pub hi: u64,
        pub lo: u64,
    }
}

xdr_struct! {
    /// A signed 128-bit integer split into limbs. Two's complement spans the
    /// full width, so only `hi` carries the sign.
    pub struct Int128Parts {
        pub hi: i64,
        pub lo: u64,
    }
}

xdr_struct! {
    pub struct UInt256Parts {
        pub hi_hi: u64,
        pub hi_lo: u64,
        pub lo_hi: u64,
        pub lo_lo: u64,
    }
}

xdr_struct! {
    pub struct Int256Parts {
        pub hi_hi: i64,
        pub hi_lo: u64,
        pub lo_hi: u64,
        pub lo_lo: u64,
    }
}

impl From<u128> for UInt128Parts {
    fn from(value: u128) -> Self {
        UInt128Parts {
            hi: (value >> 64) as u64,
            lo: value as u64,
        }
    }
}

impl From<UInt128Parts> for u128 {
    fn from(parts: UInt128Parts) -> Self {
        ((parts.hi as u128) << 64) | parts.lo as u128
    }
}

impl From<i128> for Int128Parts {
    fn from(value: i128) -> Self {
        Int128Parts {
            hi: (value >> 64) as i64,
            lo: value as u64,
        }
    }
}

impl From<Int128Parts> for i128 {
    fn from(parts: Int128Parts) -> Self {
        ((parts.hi as i128) << 64) | parts.lo as i128
    }
}

fn limbs_from_be(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

fn limbs_to_be(limbs: [u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (chunk, limb) in bytes.chunks_exact_mut(8).zip(limbs) {
        chunk.copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

impl UInt256Parts {
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let [hi_hi, hi_lo, lo_hi, lo_lo] = limbs_from_be(bytes);
        UInt256Parts {
            hi_hi,
            hi_lo,
            lo_hi,
            lo_lo,
        }
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        limbs_to_be([self.hi_hi, self.hi_lo, self.lo_hi, self.lo_lo])
    }

    /// The value as a `u128`, if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.hi_hi != 0 || self.hi_lo != 0 {
            return None;
        }
        Some(((self.lo_hi as u128) << 64) | self.lo_lo as u128)
    }
}

impl From<u128> for UInt256Parts {
    fn from(value: u128) -> Self {
        UInt256Parts {
            hi_hi: 0,
            hi_lo: 0,
            lo_hi: (value >> 64) as u64,
            lo_lo: value as u64,
        }
    }
}

impl Int256Parts {
    /// Reads a 32-byte big-endian two's complement integer.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let [hi_hi, hi_lo, lo_hi, lo_lo] = limbs_from_be(bytes);
        Int256Parts {
            hi_hi: hi_hi as i64,
            hi_lo,
            lo_hi,
            lo_lo,
        }
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        limbs_to_be([self.hi_hi as u64, self.hi_lo, self.lo_hi, self.lo_lo])
    }

    /// The value as an `i128`, if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        let low = (((self.lo_hi as u128) << 64) | self.lo_lo as u128) as i128;
        let extension = if low < 0 { u64::MAX } else { 0 };
        if self.hi_hi as u64 != extension || self.hi_lo != extension {
            return None;
        }
        Some(low)
    }
}

impl From<i128> for Int256Parts {
    fn from(value: i128) -> Self {
        let extension = if value < 0 { u64::MAX } else { 0 };
        Int256Parts {
            hi_hi: extension as i64,
            hi_lo: extension,
            lo_hi: (value >> 64) as u64,
            lo_lo: value as u64,
        }
    }
}

xdr_enum! {
    pub enum ScAddressType {
        Account = 0,
        Contract = 1,
        MuxedAccount = 2,
        ClaimableBalance = 3,
        LiquidityPool = 4,
    }
}

xdr_struct! {
    pub struct MuxedEd25519Account {
        pub id: u64,
        pub ed25519: Uint256,
    }
}

xdr_union! {
    pub enum ScAddress {
        Account(AccountId) = 0,
        Contract(ContractId) = 1,
        MuxedAccount(MuxedEd25519Account) = 2,
        ClaimableBalance(ClaimableBalanceId) = 3,
        LiquidityPool(PoolId) = 4,
    }
}

xdr_enum! {
    pub enum ContractExecutableType {
        Wasm = 0,
        StellarAsset = 1,
    }
}

xdr_union! {
    pub enum ContractExecutable {
        Wasm(Hash) = 0,
        StellarAsset = 1,
    }
}

xdr_struct! {
    pub struct ScContractInstance {
        pub executable: ContractExecutable,
        pub storage: Option<ScMap>,
    }
}

xdr_struct! {
    pub struct ScNonceKey {
        pub nonce: i64,
    }
}

xdr_union! {
    /// A contract value. `Vec` and `Map` distinguish an absent collection from
    /// an empty one.
    pub enum ScVal {
        Bool(bool) = 0,
        Void = 1,
        Error(ScError) = 2,
        U32(u32) = 3,
        I32(i32) = 4,
        U64(u64) = 5,
        I64(i64) = 6,
        Timepoint(TimePoint) = 7,
        Duration(Duration) = 8,
        U128(UInt128Parts) = 9,
        I128(Int128Parts) = 10,
        U256(UInt256Parts) = 11,
        I256(Int256Parts) = 12,
        Bytes(ScBytes) = 13,
        String(ScString) = 14,
        Symbol(ScSymbol) = 15,
        Vec(Option<ScVec>) = 16,
        Map(Option<ScMap>) = 17,
        Address(ScAddress) = 18,
        ContractInstance(ScContractInstance) = 19,
        LedgerKeyContractInstance = 20,
        LedgerKeyNonce(ScNonceKey) = 21,
    }
}

impl ScVal {
    pub fn val_type(&self) -> ScValType {
        match self {
            ScVal::Bool(_) => ScValType::Bool,
            ScVal::Void => ScValType::Void,
            ScVal::Error(_) => ScValType::Error,
            ScVal::U32(_) => ScValType::U32,
            ScVal::I32(_) => ScValType::I32,
            ScVal::U64(_) => ScValType::U64,
            ScVal::I64(_) => ScValType::I64,
            ScVal::Timepoint(_) => ScValType::Timepoint,
            ScVal::Duration(_) => ScValType::Duration,
            ScVal::U128(_) => ScValType::U128,
            ScVal::I128(_) => ScValType::I128,
            ScVal::U256(_) => ScValType::U256,
            ScVal::I256(_) => ScValType::I256,
            ScVal::Bytes(_) => ScValType::Bytes,
            ScVal::String(_) => ScValType::String,
            ScVal::Symbol(_) => ScValType::Symbol,
            ScVal::Vec(_) => ScValType::Vec,
            ScVal::Map(_) => ScValType::Map,
            ScVal::Address(_) => ScValType::Address,
            ScVal::ContractInstance(_) => ScValType::ContractInstance,
            ScVal::LedgerKeyContractInstance => ScValType::LedgerKeyContractInstance,
            ScVal::LedgerKeyNonce(_) => ScValType::LedgerKeyNonce,
        }
    }
}

xdr_struct! {
    pub struct ScMapEntry {
        pub key: ScVal,
        pub val: ScVal,
    }
}

xdr_enum! {
    pub enum ContractIdPreimageType {
        FromAddress = 0,
        FromAsset = 1,
    }
}

xdr_struct! {
    pub struct ContractIdPreimageFromAddress {
        pub address: ScAddress,
        pub salt: Uint256,
    }
}

xdr_union! {
    pub enum ContractIdPreimage {
        FromAddress(ContractIdPreimageFromAddress) = 0,
        FromAsset(Asset) = 1,
    }
}

xdr_enum! {
    pub enum HostFunctionType {
        InvokeContract = 0,
        CreateContract = 1,
        UploadContractWasm = 2,
        CreateContractV2 = 3,
    }
}

xdr_struct! {
    pub struct InvokeContractArgs {
        pub contract_address: ScAddress,
        pub function_name: ScSymbol,
        pub args: VarArray<ScVal>,
    }
}

xdr_struct! {
    pub struct CreateContractArgs {
        pub contract_id_preimage: ContractIdPreimage,
        pub executable: ContractExecutable,
    }
}

xdr_struct! {
    pub struct CreateContractArgsV2 {
        pub contract_id_preimage: ContractIdPreimage,
        pub executable: ContractExecutable,
        pub constructor_args: VarArray<ScVal>,
    }
}

xdr_union! {
    pub enum HostFunction {
        InvokeContract(InvokeContractArgs) = 0,
        CreateContract(CreateContractArgs) = 1,
        UploadContractWasm(VarOpaque) = 2,
        CreateContractV2(CreateContractArgsV2) = 3,
    }
}

xdr_enum! {
    pub enum SorobanAuthorizedFunctionType {
        ContractFn = 0,
        CreateContractHostFn = 1,
        CreateContractV2HostFn = 2,
    }
}

xdr_union! {
    pub enum SorobanAuthorizedFunction {
        ContractFn(InvokeContractArgs) = 0,
        CreateContractHostFn(CreateContractArgs) = 1,
        CreateContractV2HostFn(CreateContractArgsV2) = 2,
    }
}

xdr_struct! {
    pub struct SorobanAuthorizedInvocation {
        pub function: SorobanAuthorizedFunction,
        pub sub_invocations: VarArray<SorobanAuthorizedInvocation>,
    }
}

xdr_struct! {
    pub struct SorobanAddressCredentials {
        pub address: ScAddress,
        pub nonce: i64,
        pub signature_expiration_ledger: u32,
        pub signature: ScVal,
    }
}

xdr_enum! {
    pub enum SorobanCredentialsType {
        SourceAccount = 0,
        Address = 1,
    }
}

xdr_union! {
    pub enum SorobanCredentials {
        SourceAccount = 0,
        Address(SorobanAddressCredentials) = 1,
    }
}

xdr_struct! {
    pub struct SorobanAuthorizationEntry {
        pub credentials: SorobanCredentials,
        pub root_invocation: SorobanAuthorizedInvocation,
    }
}

xdr_struct! {
    pub struct SorobanResources {
        pub footprint: LedgerFootprint,
        pub instructions: u32,
        pub disk_read_bytes: u32,
        pub write_bytes: u32,
    }
}

xdr_struct! {
    /// Indices into the read-write footprint of entries that are archived.
    pub struct SorobanResourcesExtV0 {
        pub archived_soroban_entries: VarArray<u32>,
    }
}

xdr_union! {
    pub enum SorobanTransactionDataExt {
        V0 = 0,
        V1(SorobanResourcesExtV0) = 1,
    }
}

xdr_struct! {
    pub struct SorobanTransactionData {
        pub ext: SorobanTransactionDataExt,
        pub resources: SorobanResources,
        pub resource_fee: i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::XdrCodec;

    #[test]
    fn test_i128_minus_one_limbs() {
        let value = ScVal::I128(Int128Parts::from(-1i128));
        let bytes = value.to_xdr_bytes().unwrap();

        let mut expected = vec![0, 0, 0, 10];
        expected.extend_from_slice(&[0xff; 16]);
        assert_eq!(bytes, expected);

        match ScVal::from_xdr_bytes(&bytes).unwrap() {
            ScVal::I128(parts) => {
                assert_eq!(parts.hi, -1);
                assert_eq!(parts.lo, u64::MAX);
                assert_eq!(i128::from(parts), -1);
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_i128_extremes() {
        for value in [i128::MIN, i128::MAX, 0, 1, -(1i128 << 64)] {
            assert_eq!(i128::from(Int128Parts::from(value)), value);
        }
        assert_eq!(u128::from(UInt128Parts::from(u128::MAX)), u128::MAX);
    }

    #[test]
    fn test_i256_sign_extension() {
        let parts = Int256Parts::from(-2i128);
        assert_eq!(parts.hi_hi, -1);
        assert_eq!(parts.hi_lo, u64::MAX);
        assert_eq!(parts.to_i128(), Some(-2));

        let bytes = parts.to_be_bytes();
        assert_eq!(bytes[..31], [0xff; 31]);
        assert_eq!(bytes[31], 0xfe);
        assert_eq!(Int256Parts::from_be_bytes(&bytes), parts);
    }

    #[test]
    fn test_i256_out_of_i128_range() {
        let parts = Int256Parts {
            hi_hi: 0,
            hi_lo: 1,
            lo_hi: 0,
            lo_lo: 0,
        };
        assert_eq!(parts.to_i128(), None);
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let entries = vec![
            ScMapEntry {
                key: ScVal::Symbol(ScSymbol::try_from("zeta").unwrap()),
                val: ScVal::U32(1),
            },
            ScMapEntry {
                key: ScVal::Symbol(ScSymbol::try_from("alpha").unwrap()),
                val: ScVal::U32(2),
            },
        ];
        let map = ScVal::Map(Some(VarArray::new(entries.clone()).unwrap()));
        let decoded = ScVal::from_xdr_bytes(&map.to_xdr_bytes().unwrap()).unwrap();
        match decoded {
            ScVal::Map(Some(decoded)) => assert_eq!(decoded.as_slice(), entries.as_slice()),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_absent_and_empty_vec_differ() {
        let absent = ScVal::Vec(None).to_xdr_bytes().unwrap();
        let empty = ScVal::Vec(Some(VarArray::empty())).to_xdr_bytes().unwrap();
        assert_eq!(absent, vec![0, 0, 0, 16, 0, 0, 0, 0]);
        assert_eq!(empty, vec![0, 0, 0, 16, 0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_sc_error_arms() {
        let err = ScVal::Error(ScError::Auth(ScErrorCode::InvalidAction));
        let bytes = err.to_xdr_bytes().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 2, 0, 0, 0, 9, 0, 0, 0, 6]);
        assert_eq!(ScVal::from_xdr_bytes(&bytes).unwrap(), err);
    }
}
