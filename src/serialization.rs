//! Low-level XDR serialization utilities
//!
//! This module provides the primitive layer of the codec: big-endian scalars,
//! fixed and variable-length opaque data, strings, arrays and optionals, all
//! aligned to 4-byte boundaries as RFC 4506 requires. Composite types in
//! [`crate::xdr`] are built entirely out of these pieces.
//!
//! Decoding is lenient about padding content: the padding bytes must be
//! present, but non-zero padding is skipped rather than rejected.

use crate::error::{Result, TxAsmError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::cell::Cell;
use std::fmt;
use std::io::Cursor;
use std::ops::Deref;

/// Maximum nesting of arrays and boxed values accepted while decoding.
pub const MAX_DECODE_DEPTH: u32 = 256;

/// Trait for types that can be written in XDR form
pub trait XdrEncode {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()>;
}

/// Trait for types that can be read back from XDR
pub trait XdrDecode: Sized {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self>;
}

/// Whole-buffer and base64 conveniences shared by every XDR type.
pub trait XdrCodec: XdrEncode + XdrDecode {
    fn to_xdr_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_xdr(&mut buf)?;
        Ok(buf)
    }

    /// Decodes a complete value, rejecting any bytes left over.
    fn from_xdr_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let value = Self::decode_xdr(&mut cursor)?;
        let remaining = bytes.len() - cursor.position() as usize;
        if remaining != 0 {
            return Err(TxAsmError::TrailingBytes {
                type_name: short_type_name::<Self>(),
                remaining,
            });
        }
        Ok(value)
    }

    fn to_xdr(&self) -> Result<String> {
        Ok(BASE64.encode(self.to_xdr_bytes()?))
    }

    fn from_xdr(encoded: &str) -> Result<Self> {
        let bytes = BASE64.decode(encoded.trim())?;
        Self::from_xdr_bytes(&bytes)
    }

    fn xdr_size(&self) -> Result<usize> {
        Ok(self.to_xdr_bytes()?.len())
    }
}

impl<T: XdrEncode + XdrDecode> XdrCodec for T {}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Borrow the next `len` bytes from the cursor.
fn take<'a>(cursor: &mut Cursor<&'a [u8]>, len: usize, type_name: &'static str) -> Result<&'a [u8]> {
    let position = cursor.position() as usize;
    let data: &'a [u8] = *cursor.get_ref();
    let end = position.checked_add(len).ok_or(TxAsmError::BufferTooSmall {
        type_name,
        needed: usize::MAX,
        available: data.len(),
    })?;

    if end > data.len() {
        return Err(TxAsmError::BufferTooSmall {
            type_name,
            needed: end,
            available: data.len(),
        });
    }

    cursor.set_position(end as u64);
    Ok(&data[position..end])
}

fn take_array<const N: usize>(cursor: &mut Cursor<&[u8]>, type_name: &'static str) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(take(cursor, N, type_name)?);
    Ok(out)
}

/// Encode a u32 in big-endian format
pub fn encode_u32(value: u32, writer: &mut Vec<u8>) -> Result<()> {
    writer.extend_from_slice(&value.to_be_bytes());
    Ok(())
}

/// Decode a big-endian u32
pub fn decode_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32> {
    Ok(u32::from_be_bytes(take_array(cursor, "uint32")?))
}

pub fn encode_i32(value: i32, writer: &mut Vec<u8>) -> Result<()> {
    writer.extend_from_slice(&value.to_be_bytes());
    Ok(())
}

pub fn decode_i32(cursor: &mut Cursor<&[u8]>) -> Result<i32> {
    Ok(i32::from_be_bytes(take_array(cursor, "int32")?))
}

/// Encode a u64 in big-endian format
pub fn encode_u64(value: u64, writer: &mut Vec<u8>) -> Result<()> {
    writer.extend_from_slice(&value.to_be_bytes());
    Ok(())
}

/// Decode a big-endian u64
pub fn decode_u64(cursor: &mut Cursor<&[u8]>) -> Result<u64> {
    Ok(u64::from_be_bytes(take_array(cursor, "uint64")?))
}

pub fn encode_i64(value: i64, writer: &mut Vec<u8>) -> Result<()> {
    writer.extend_from_slice(&value.to_be_bytes());
    Ok(())
}

pub fn decode_i64(cursor: &mut Cursor<&[u8]>) -> Result<i64> {
    Ok(i64::from_be_bytes(take_array(cursor, "int64")?))
}

pub fn encode_f32(value: f32, writer: &mut Vec<u8>) -> Result<()> {
    writer.extend_from_slice(&value.to_be_bytes());
    Ok(())
}

pub fn decode_f32(cursor: &mut Cursor<&[u8]>) -> Result<f32> {
    Ok(f32::from_be_bytes(take_array(cursor, "float")?))
}

pub fn encode_f64(value: f64, writer: &mut Vec<u8>) -> Result<()> {
    writer.extend_from_slice(&value.to_be_bytes());
    Ok(())
}

pub fn decode_f64(cursor: &mut Cursor<&[u8]>) -> Result<f64> {
    Ok(f64::from_be_bytes(take_array(cursor, "double")?))
}

/// Booleans are a 4-byte enum restricted to 0 and 1.
pub fn encode_bool(value: bool, writer: &mut Vec<u8>) -> Result<()> {
    encode_u32(value as u32, writer)
}

pub fn decode_bool(cursor: &mut Cursor<&[u8]>) -> Result<bool> {
    match u32::from_be_bytes(take_array(cursor, "bool")?) {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(TxAsmError::decoding("bool", format!("invalid boolean value {other}"))),
    }
}

/// Fixed-length opaque data: the bytes followed by zero padding, no length prefix.
pub fn encode_fixed_opaque(data: &[u8], writer: &mut Vec<u8>) -> Result<()> {
    writer.extend_from_slice(data);
    helpers::write_padding(data.len(), writer);
    Ok(())
}

pub fn decode_fixed_opaque<const N: usize>(cursor: &mut Cursor<&[u8]>) -> Result<[u8; N]> {
    let value = take_array::<N>(cursor, "opaque")?;
    helpers::skip_padding(cursor, N)?;
    Ok(value)
}

/// Variable-length opaque data: u32 length, bytes, zero padding.
pub fn encode_var_opaque(data: &[u8], max: u32, writer: &mut Vec<u8>) -> Result<()> {
    let len = helpers::checked_len(data.len(), max, "opaque")?;
    encode_u32(len, writer)?;
    encode_fixed_opaque(data, writer)
}

pub fn decode_var_opaque(cursor: &mut Cursor<&[u8]>, max: u32) -> Result<Vec<u8>> {
    let len = decode_u32(cursor)?;
    if len > max {
        return Err(TxAsmError::decoding(
            "opaque",
            format!("length {len} exceeds maximum {max}"),
        ));
    }
    let data = take(cursor, len as usize, "opaque")?.to_vec();
    helpers::skip_padding(cursor, data.len())?;
    Ok(data)
}

/// Guards decoding against unbounded nesting of recursive types.
struct DepthGuard;

thread_local! {
    static DECODE_DEPTH: Cell<u32> = const { Cell::new(0) };
}

impl DepthGuard {
    fn enter(type_name: &'static str) -> Result<Self> {
        DECODE_DEPTH.with(|depth| {
            let next = depth.get() + 1;
            if next > MAX_DECODE_DEPTH {
                return Err(TxAsmError::decoding(
                    type_name,
                    format!("nesting exceeds {MAX_DECODE_DEPTH} levels"),
                ));
            }
            depth.set(next);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DECODE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Variable-length opaque data `opaque<MAX>`.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarOpaque<const MAX: u32 = { u32::MAX }>(Vec<u8>);

impl<const MAX: u32> VarOpaque<MAX> {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        helpers::checked_len(bytes.len(), MAX, "opaque")?;
        Ok(Self(bytes))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl<const MAX: u32> Deref for VarOpaque<MAX> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const MAX: u32> AsRef<[u8]> for VarOpaque<MAX> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const MAX: u32> TryFrom<Vec<u8>> for VarOpaque<MAX> {
    type Error = TxAsmError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(bytes)
    }
}

impl<const MAX: u32> TryFrom<&[u8]> for VarOpaque<MAX> {
    type Error = TxAsmError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes)
    }
}

impl<const MAX: u32> fmt::Debug for VarOpaque<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarOpaque({})", hex::encode(&self.0))
    }
}

impl<const MAX: u32> XdrEncode for VarOpaque<MAX> {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        encode_var_opaque(&self.0, MAX, writer)
    }
}

impl<const MAX: u32> XdrDecode for VarOpaque<MAX> {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        Ok(Self(decode_var_opaque(cursor, MAX)?))
    }
}

/// XDR `string<MAX>`. The wire form is raw bytes, which are not required to
/// be valid UTF-8.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct XdrString<const MAX: u32 = { u32::MAX }>(Vec<u8>);

impl<const MAX: u32> XdrString<MAX> {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        helpers::checked_len(bytes.len(), MAX, "string")?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_utf8(&self) -> Result<String> {
        String::from_utf8(self.0.clone())
            .map_err(|e| TxAsmError::decoding("string", format!("invalid utf-8: {e}")))
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl<const MAX: u32> TryFrom<&str> for XdrString<MAX> {
    type Error = TxAsmError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value.as_bytes())
    }
}

impl<const MAX: u32> TryFrom<String> for XdrString<MAX> {
    type Error = TxAsmError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value.into_bytes())
    }
}

impl<const MAX: u32> fmt::Debug for XdrString<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XdrString({:?})", self.to_string_lossy())
    }
}

impl<const MAX: u32> fmt::Display for XdrString<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<const MAX: u32> XdrEncode for XdrString<MAX> {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        let len = helpers::checked_len(self.0.len(), MAX, "string")?;
        encode_u32(len, writer)?;
        encode_fixed_opaque(&self.0, writer)
    }
}

impl<const MAX: u32> XdrDecode for XdrString<MAX> {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        let len = decode_u32(cursor).map_err(|e| e.within("string"))?;
        if len > MAX {
            return Err(TxAsmError::decoding(
                "string",
                format!("length {len} exceeds maximum {MAX}"),
            ));
        }
        let data = take(cursor, len as usize, "string")?.to_vec();
        helpers::skip_padding(cursor, data.len())?;
        Ok(Self(data))
    }
}

/// Variable-length array `T<MAX>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarArray<T, const MAX: u32 = { u32::MAX }>(Vec<T>);

impl<T, const MAX: u32> VarArray<T, MAX> {
    pub fn new(items: Vec<T>) -> Result<Self> {
        helpers::checked_len(items.len(), MAX, "array")?;
        Ok(Self(items))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    /// Appends an element, failing if the array is already at capacity.
    pub fn push(&mut self, item: T) -> Result<()> {
        helpers::checked_len(self.0.len() + 1, MAX, "array")?;
        self.0.push(item);
        Ok(())
    }
}

impl<T, const MAX: u32> Default for VarArray<T, MAX> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, const MAX: u32> Deref for VarArray<T, MAX> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const MAX: u32> TryFrom<Vec<T>> for VarArray<T, MAX> {
    type Error = TxAsmError;

    fn try_from(items: Vec<T>) -> Result<Self> {
        Self::new(items)
    }
}

impl<T, const MAX: u32> IntoIterator for VarArray<T, MAX> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T, const MAX: u32> IntoIterator for &'a VarArray<T, MAX> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: XdrEncode, const MAX: u32> XdrEncode for VarArray<T, MAX> {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        helpers::encode_array(&self.0, MAX, writer)
    }
}

impl<T: XdrDecode, const MAX: u32> XdrDecode for VarArray<T, MAX> {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        let _guard = DepthGuard::enter("array")?;
        Ok(Self(helpers::decode_array(cursor, MAX)?))
    }
}

impl XdrEncode for u32 {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        encode_u32(*self, writer)
    }
}

impl XdrDecode for u32 {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        decode_u32(cursor)
    }
}

impl XdrEncode for i32 {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        encode_i32(*self, writer)
    }
}

impl XdrDecode for i32 {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        decode_i32(cursor)
    }
}

impl XdrEncode for u64 {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        encode_u64(*self, writer)
    }
}

impl XdrDecode for u64 {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        decode_u64(cursor)
    }
}

impl XdrEncode for i64 {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        encode_i64(*self, writer)
    }
}

impl XdrDecode for i64 {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        decode_i64(cursor)
    }
}

impl XdrEncode for bool {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        encode_bool(*self, writer)
    }
}

impl XdrDecode for bool {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        decode_bool(cursor)
    }
}

impl<const N: usize> XdrEncode for [u8; N] {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        encode_fixed_opaque(self, writer)
    }
}

impl<const N: usize> XdrDecode for [u8; N] {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        decode_fixed_opaque::<N>(cursor)
    }
}

/// Optional data `T*`: a boolean presence flag followed by the value.
impl<T: XdrEncode> XdrEncode for Option<T> {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        match self {
            Some(value) => {
                encode_u32(1, writer)?;
                value.encode_xdr(writer)
            }
            None => encode_u32(0, writer),
        }
    }
}

impl<T: XdrDecode> XdrDecode for Option<T> {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        match decode_u32(cursor).map_err(|e| e.within("optional"))? {
            0 => Ok(None),
            1 => Ok(Some(T::decode_xdr(cursor)?)),
            other => Err(TxAsmError::decoding(
                "optional",
                format!("invalid presence flag {other}"),
            )),
        }
    }
}

impl<T: XdrEncode> XdrEncode for Box<T> {
    fn encode_xdr(&self, writer: &mut Vec<u8>) -> Result<()> {
        self.as_ref().encode_xdr(writer)
    }
}

impl<T: XdrDecode> XdrDecode for Box<T> {
    fn decode_xdr(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        let _guard = DepthGuard::enter("pointer")?;
        Ok(Box::new(T::decode_xdr(cursor)?))
    }
}

/// Shared helpers for length prefixes, padding and arrays
pub mod helpers {
    use super::*;

    /// Number of zero bytes needed to align `len` to 4 bytes.
    pub fn padding_len(len: usize) -> usize {
        (4 - len % 4) % 4
    }

    /// Size of `len` bytes of opaque data once padded.
    pub fn padded_len(len: usize) -> usize {
        len + padding_len(len)
    }

    pub fn write_padding(len: usize, writer: &mut Vec<u8>) {
        writer.extend(std::iter::repeat(0u8).take(padding_len(len)));
    }

    /// Advance past the padding following `len` bytes of data. The padding
    /// must be present but its content is not checked.
    pub fn skip_padding(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<()> {
        take(cursor, padding_len(len), "padding")?;
        Ok(())
    }

    pub fn checked_len(len: usize, max: u32, type_name: &'static str) -> Result<u32> {
        match u32::try_from(len) {
            Ok(len) if len <= max => Ok(len),
            _ => Err(TxAsmError::encoding(
                type_name,
                format!("length {len} exceeds maximum {max}"),
            )),
        }
    }

    /// Serialize a slice with a u32 length prefix
    pub fn encode_array<T: XdrEncode>(items: &[T], max: u32, writer: &mut Vec<u8>) -> Result<()> {
        let len = checked_len(items.len(), max, "array")?;
        encode_u32(len, writer)?;
        for item in items {
            item.encode_xdr(writer)?;
        }
        Ok(())
    }

    pub fn decode_array<T: XdrDecode>(cursor: &mut Cursor<&[u8]>, max: u32) -> Result<Vec<T>> {
        let len = decode_u32(cursor).map_err(|e| e.within("array"))?;
        if len > max {
            return Err(TxAsmError::decoding(
                "array",
                format!("length {len} exceeds maximum {max}"),
            ));
        }

        // Every XDR item takes at least 4 bytes, so a length larger than the
        // remaining input can only fail; don't allocate for it.
        let remaining = cursor.get_ref().len() - cursor.position() as usize;
        if len as usize > remaining / 4 {
            return Err(TxAsmError::BufferTooSmall {
                type_name: "array",
                needed: cursor.position() as usize + len as usize * 4,
                available: cursor.get_ref().len(),
            });
        }

        let mut items = Vec::with_capacity(len as usize);
        for _ in 0..len {
            items.push(T::decode_xdr(cursor)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_big_endian() {
        let mut buf = Vec::new();
        encode_u32(0x01020304, &mut buf).unwrap();
        assert_eq!(buf, vec![1, 2, 3, 4]);

        let mut cursor = Cursor::new(buf.as_slice());
        assert_eq!(decode_u32(&mut cursor).unwrap(), 0x01020304);
    }

    #[test]
    fn test_i64_negative() {
        let mut buf = Vec::new();
        encode_i64(-2, &mut buf).unwrap();
        assert_eq!(buf, vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);

        let mut cursor = Cursor::new(buf.as_slice());
        assert_eq!(decode_i64(&mut cursor).unwrap(), -2);
    }

    #[test]
    fn test_double_encoding() {
        let mut buf = Vec::new();
        encode_f64(1.5, &mut buf).unwrap();
        assert_eq!(buf, 1.5f64.to_be_bytes().to_vec());

        let mut cursor = Cursor::new(buf.as_slice());
        assert_eq!(decode_f64(&mut cursor).unwrap(), 1.5);
    }

    #[test]
    fn test_var_opaque_is_padded() {
        let data = VarOpaque::<64>::new(b"abc".to_vec()).unwrap();
        let bytes = data.to_xdr_bytes().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 3, b'a', b'b', b'c', 0]);
        assert_eq!(VarOpaque::<64>::from_xdr_bytes(&bytes).unwrap(), data);
    }

    #[test]
    fn test_nonzero_padding_is_ignored() {
        let bytes = [0, 0, 0, 1, b'x', 0xaa, 0xbb, 0xcc];
        let decoded = XdrString::<8>::from_xdr_bytes(&bytes).unwrap();
        assert_eq!(decoded.as_bytes(), b"x");
    }

    #[test]
    fn test_missing_padding_is_an_error() {
        let bytes = [0, 0, 0, 1, b'x'];
        assert!(matches!(
            XdrString::<8>::from_xdr_bytes(&bytes),
            Err(TxAsmError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn test_bounds_enforced_both_ways() {
        assert!(XdrString::<4>::new("hello").is_err());

        let bytes = [0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o', 0, 0, 0];
        assert!(matches!(
            XdrString::<4>::from_xdr_bytes(&bytes),
            Err(TxAsmError::DecodingError { .. })
        ));
        assert!(XdrString::<5>::from_xdr_bytes(&bytes).is_ok());
    }

    #[test]
    fn test_bool_rejects_other_values() {
        assert!(bool::from_xdr_bytes(&[0, 0, 0, 1]).unwrap());
        assert!(bool::from_xdr_bytes(&[0, 0, 0, 2]).is_err());
    }

    #[test]
    fn test_optional_flag() {
        let some: Option<u32> = Some(7);
        assert_eq!(some.to_xdr_bytes().unwrap(), vec![0, 0, 0, 1, 0, 0, 0, 7]);
        assert_eq!(None::<u32>.to_xdr_bytes().unwrap(), vec![0, 0, 0, 0]);
        assert!(Option::<u32>::from_xdr_bytes(&[0, 0, 0, 3, 0, 0, 0, 7]).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let err = u32::from_xdr_bytes(&[0, 0, 0, 1, 0]).unwrap_err();
        assert!(matches!(err, TxAsmError::TrailingBytes { remaining: 1, .. }));
    }

    #[test]
    fn test_array_length_beyond_input() {
        let bytes = [0xff, 0xff, 0xff, 0xff];
        assert!(<VarArray<u32>>::from_xdr_bytes(&bytes).is_err());
    }

    #[test]
    fn test_array_push_respects_bound() {
        let mut array = VarArray::<u32, 2>::empty();
        array.push(1).unwrap();
        array.push(2).unwrap();
        assert!(array.push(3).is_err());
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn test_base64_roundtrip() {
        let value: VarArray<u64> = VarArray::new(vec![1, u64::MAX]).unwrap();
        let encoded = value.to_xdr().unwrap();
        assert_eq!(<VarArray<u64>>::from_xdr(&encoded).unwrap(), value);
    }

    #[test]
    fn test_padding_helpers() {
        assert_eq!(helpers::padding_len(0), 0);
        assert_eq!(helpers::padding_len(5), 3);
        assert_eq!(helpers::padded_len(28), 28);
        assert_eq!(helpers::padded_len(29), 32);
    }
}
