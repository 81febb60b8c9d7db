//! Conversions between native Rust values and contract values
//!
//! Every `to_*` builds an [`ScVal`] and every `from_*` checks the value's type
//! before unwrapping it. Symbols are limited to 32 characters from
//! `[a-zA-Z0-9_]`. Maps keep their entries in the order given.

use crate::address::Address;
use crate::error::{Result, TxAsmError};
use crate::serialization::{VarArray, VarOpaque, XdrString};
use crate::xdr::{
    Int128Parts, Int256Parts, ScMapEntry, ScSymbol, ScVal, ScValType, UInt128Parts, UInt256Parts,
};

/// Longest symbol a contract accepts.
pub const MAX_SYMBOL_LEN: usize = 32;

fn unexpected(expected: ScValType, val: &ScVal) -> TxAsmError {
    TxAsmError::invalid_argument(
        "sc_val",
        format!("expected {expected:?}, got {:?}", val.val_type()),
    )
}

macro_rules! scalar_conversions {
    ($($to:ident, $from:ident, $ty:ty, $variant:ident;)*) => {
        $(
            pub fn $to(value: $ty) -> ScVal {
                ScVal::$variant(value)
            }

            pub fn $from(val: &ScVal) -> Result<$ty> {
                match val {
                    ScVal::$variant(value) => Ok(*value),
                    other => Err(unexpected(ScValType::$variant, other)),
                }
            }
        )*
    };
}

scalar_conversions! {
    to_bool, from_bool, bool, Bool;
    to_uint32, from_uint32, u32, U32;
    to_int32, from_int32, i32, I32;
    to_uint64, from_uint64, u64, U64;
    to_int64, from_int64, i64, I64;
    to_timepoint, from_timepoint, u64, Timepoint;
    to_duration, from_duration, u64, Duration;
}

pub fn to_void() -> ScVal {
    ScVal::Void
}

pub fn from_void(val: &ScVal) -> Result<()> {
    match val {
        ScVal::Void => Ok(()),
        other => Err(unexpected(ScValType::Void, other)),
    }
}

pub fn to_uint128(value: u128) -> ScVal {
    ScVal::U128(UInt128Parts::from(value))
}

pub fn from_uint128(val: &ScVal) -> Result<u128> {
    match val {
        ScVal::U128(parts) => Ok(u128::from(parts.clone())),
        other => Err(unexpected(ScValType::U128, other)),
    }
}

pub fn to_int128(value: i128) -> ScVal {
    ScVal::I128(Int128Parts::from(value))
}

pub fn from_int128(val: &ScVal) -> Result<i128> {
    match val {
        ScVal::I128(parts) => Ok(i128::from(parts.clone())),
        other => Err(unexpected(ScValType::I128, other)),
    }
}

/// A u256 from 32 big-endian bytes.
pub fn to_uint256(value: &[u8; 32]) -> ScVal {
    ScVal::U256(UInt256Parts::from_be_bytes(value))
}

pub fn from_uint256(val: &ScVal) -> Result<[u8; 32]> {
    match val {
        ScVal::U256(parts) => Ok(parts.to_be_bytes()),
        other => Err(unexpected(ScValType::U256, other)),
    }
}

/// An i256 from 32 big-endian two's complement bytes.
pub fn to_int256(value: &[u8; 32]) -> ScVal {
    ScVal::I256(Int256Parts::from_be_bytes(value))
}

pub fn from_int256(val: &ScVal) -> Result<[u8; 32]> {
    match val {
        ScVal::I256(parts) => Ok(parts.to_be_bytes()),
        other => Err(unexpected(ScValType::I256, other)),
    }
}

pub fn uint256_from_u128(value: u128) -> ScVal {
    ScVal::U256(UInt256Parts::from(value))
}

/// Fails when the value does not fit in a `u128`.
pub fn uint256_to_u128(val: &ScVal) -> Result<u128> {
    match val {
        ScVal::U256(parts) => parts
            .to_u128()
            .ok_or_else(|| TxAsmError::invalid_argument("sc_val", "u256 value exceeds u128")),
        other => Err(unexpected(ScValType::U256, other)),
    }
}

pub fn int256_from_i128(value: i128) -> ScVal {
    ScVal::I256(Int256Parts::from(value))
}

/// Fails when the value does not fit in an `i128`.
pub fn int256_to_i128(val: &ScVal) -> Result<i128> {
    match val {
        ScVal::I256(parts) => parts
            .to_i128()
            .ok_or_else(|| TxAsmError::invalid_argument("sc_val", "i256 value exceeds i128")),
        other => Err(unexpected(ScValType::I256, other)),
    }
}

pub fn to_bytes(value: &[u8]) -> Result<ScVal> {
    Ok(ScVal::Bytes(VarOpaque::new(value)?))
}

pub fn from_bytes(val: &ScVal) -> Result<Vec<u8>> {
    match val {
        ScVal::Bytes(bytes) => Ok(bytes.to_vec()),
        other => Err(unexpected(ScValType::Bytes, other)),
    }
}

/// Contract strings are byte strings and need not be UTF-8.
pub fn to_string(value: impl AsRef<[u8]>) -> Result<ScVal> {
    Ok(ScVal::String(XdrString::new(value.as_ref())?))
}

/// The string's bytes decoded as UTF-8.
pub fn from_string(val: &ScVal) -> Result<String> {
    match val {
        ScVal::String(s) => s.to_utf8(),
        other => Err(unexpected(ScValType::String, other)),
    }
}

fn symbol(value: &str) -> Result<ScSymbol> {
    if value.len() > MAX_SYMBOL_LEN {
        return Err(TxAsmError::invalid_argument(
            "symbol",
            format!("`{value}` is longer than {MAX_SYMBOL_LEN} characters"),
        ));
    }
    if !value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(TxAsmError::invalid_argument(
            "symbol",
            format!("`{value}` may only contain a-z, A-Z, 0-9 and _"),
        ));
    }
    XdrString::new(value)
}

pub fn to_symbol(value: &str) -> Result<ScVal> {
    Ok(ScVal::Symbol(symbol(value)?))
}

pub fn from_symbol(val: &ScVal) -> Result<String> {
    match val {
        ScVal::Symbol(s) => s.to_utf8(),
        other => Err(unexpected(ScValType::Symbol, other)),
    }
}

pub fn to_address(address: &Address) -> ScVal {
    address.to_sc_val()
}

pub fn from_address(val: &ScVal) -> Result<Address> {
    Address::from_sc_val(val)
}

pub fn to_vec(items: Vec<ScVal>) -> Result<ScVal> {
    Ok(ScVal::Vec(Some(VarArray::new(items)?)))
}

/// An absent vector reads as empty.
pub fn from_vec(val: &ScVal) -> Result<Vec<ScVal>> {
    match val {
        ScVal::Vec(items) => Ok(items.as_ref().map(|v| v.to_vec()).unwrap_or_default()),
        other => Err(unexpected(ScValType::Vec, other)),
    }
}

/// Builds a map with entries in the given order.
pub fn to_map(entries: Vec<(ScVal, ScVal)>) -> Result<ScVal> {
    let entries = entries
        .into_iter()
        .map(|(key, val)| ScMapEntry { key, val })
        .collect();
    Ok(ScVal::Map(Some(VarArray::new(entries)?)))
}

pub fn from_map(val: &ScVal) -> Result<Vec<(ScVal, ScVal)>> {
    match val {
        ScVal::Map(entries) => Ok(entries
            .iter()
            .flat_map(|m| m.iter())
            .map(|entry| (entry.key.clone(), entry.val.clone()))
            .collect()),
        other => Err(unexpected(ScValType::Map, other)),
    }
}

/// A contract enum case: a vector holding the case name and, for tuple
/// cases, its value.
pub fn to_enum(case: &str, value: Option<ScVal>) -> Result<ScVal> {
    let mut items = vec![to_symbol(case)?];
    items.extend(value);
    to_vec(items)
}

pub fn from_enum(val: &ScVal) -> Result<(String, Option<ScVal>)> {
    let mut items = from_vec(val)?.into_iter();
    let case = match items.next() {
        Some(first) => from_symbol(&first)?,
        None => return Err(TxAsmError::invalid_argument("sc_val", "enum vector is empty")),
    };
    let value = items.next();
    if items.next().is_some() {
        return Err(TxAsmError::invalid_argument("sc_val", "enum vector has more than 2 items"));
    }
    Ok((case, value))
}

/// A contract struct with named fields: a map keyed by field symbols.
pub fn to_struct(fields: Vec<(&str, ScVal)>) -> Result<ScVal> {
    let entries = fields
        .into_iter()
        .map(|(name, val)| Ok((to_symbol(name)?, val)))
        .collect::<Result<Vec<_>>>()?;
    to_map(entries)
}

pub fn from_struct(val: &ScVal) -> Result<Vec<(String, ScVal)>> {
    from_map(val)?
        .into_iter()
        .map(|(key, val)| Ok((from_symbol(&key)?, val)))
        .collect()
}

/// A contract tuple struct: a vector of its fields.
pub fn to_tuple_struct(fields: Vec<ScVal>) -> Result<ScVal> {
    to_vec(fields)
}

pub fn from_tuple_struct(val: &ScVal) -> Result<Vec<ScVal>> {
    from_vec(val)
}
