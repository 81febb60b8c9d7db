//! Property-based tests for the codec and StrKey layers.
//!
//! These hold for every input:
//! - amounts print and parse back to the same stroop count
//! - StrKeys round-trip and never decode under a different version byte
//! - 128 and 256-bit integers survive the ScVal wire form

use proptest::prelude::*;
use stellar_txasm::prelude::*;
use stellar_txasm::{scval, strkey, xdr};

fn key_strategy() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

#[test]
fn prop_amount_string_roundtrip() {
    proptest!(|(stroops in 0i64..=i64::MAX)| {
        let amount = Amount::from_stroops(stroops).unwrap();
        let parsed = Amount::new(&amount.to_string()).unwrap();
        prop_assert_eq!(parsed.stroops(), stroops);
    });
}

#[test]
fn prop_account_id_roundtrip() {
    proptest!(|(key in key_strategy())| {
        let encoded = strkey::encode_account_id(&key);
        prop_assert!(encoded.starts_with('G'));
        prop_assert_eq!(encoded.len(), 56);
        prop_assert_eq!(strkey::decode_account_id(&encoded).unwrap(), key);
        prop_assert!(strkey::decode_secret_seed(&encoded).is_err());
        prop_assert!(strkey::decode_contract(&encoded).is_err());
    });
}

#[test]
fn prop_muxed_account_roundtrip() {
    proptest!(|(key in key_strategy(), id in any::<u64>())| {
        let encoded = strkey::encode_muxed_account(&key, id);
        prop_assert_eq!(encoded.len(), 69);
        prop_assert_eq!(strkey::decode_muxed_account(&encoded).unwrap(), (key, id));

        let account = MuxedAccount::from_account(&encoded).unwrap();
        prop_assert_eq!(account.id(), Some(id));
        prop_assert_eq!(account.account_id(), strkey::encode_account_id(&key));
        let wire = account.to_xdr().to_xdr_bytes().unwrap();
        let decoded = xdr::MuxedAccount::from_xdr_bytes(&wire).unwrap();
        prop_assert_eq!(MuxedAccount::from_xdr(&decoded), account);
    });
}

#[test]
fn prop_int128_wire_roundtrip() {
    proptest!(|(value in any::<i128>())| {
        let bytes = scval::to_int128(value).to_xdr_bytes().unwrap();
        prop_assert_eq!(bytes.len(), 20);
        let decoded = xdr::ScVal::from_xdr_bytes(&bytes).unwrap();
        prop_assert_eq!(scval::from_int128(&decoded).unwrap(), value);
    });
}

#[test]
fn prop_uint128_wire_roundtrip() {
    proptest!(|(value in any::<u128>())| {
        let bytes = scval::to_uint128(value).to_xdr_bytes().unwrap();
        let decoded = xdr::ScVal::from_xdr_bytes(&bytes).unwrap();
        prop_assert_eq!(scval::from_uint128(&decoded).unwrap(), value);
    });
}

#[test]
fn prop_int256_preserves_i128() {
    proptest!(|(value in any::<i128>())| {
        let val = scval::int256_from_i128(value);
        let decoded = xdr::ScVal::from_xdr_bytes(&val.to_xdr_bytes().unwrap()).unwrap();
        prop_assert_eq!(scval::int256_to_i128(&decoded).unwrap(), value);
    });
}

#[test]
fn prop_uint256_bytes_roundtrip() {
    proptest!(|(bytes in key_strategy())| {
        let decoded = xdr::ScVal::from_xdr_bytes(&scval::to_uint256(&bytes).to_xdr_bytes().unwrap()).unwrap();
        prop_assert_eq!(scval::from_uint256(&decoded).unwrap(), bytes);
    });
}

#[test]
fn prop_text_memo_respects_byte_limit() {
    proptest!(|(text in "\\PC{0,40}")| {
        let result = Memo::text(&text);
        prop_assert_eq!(result.is_ok(), text.len() <= 28);
    });
}
