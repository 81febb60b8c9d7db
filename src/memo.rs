//! Transaction memos
//!
//! Text memos are bounded by their encoded byte length, not their character
//! count, and may hold arbitrary bytes.

use crate::error::{Result, TxAsmError};
use crate::serialization::XdrString;
use crate::xdr;

/// Maximum length of a text memo in bytes.
pub const MAX_MEMO_TEXT_LEN: usize = 28;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Memo {
    #[default]
    None,
    Text(Vec<u8>),
    Id(u64),
    Hash([u8; 32]),
    Return([u8; 32]),
}

impl Memo {
    pub fn none() -> Self {
        Memo::None
    }

    pub fn text(text: impl AsRef<[u8]>) -> Result<Self> {
        let bytes = text.as_ref();
        if bytes.len() > MAX_MEMO_TEXT_LEN {
            return Err(TxAsmError::InvalidMemo(format!(
                "text is {} bytes, the limit is {MAX_MEMO_TEXT_LEN}",
                bytes.len()
            )));
        }
        Ok(Memo::Text(bytes.to_vec()))
    }

    pub fn id(id: u64) -> Self {
        Memo::Id(id)
    }

    pub fn hash(hash: [u8; 32]) -> Self {
        Memo::Hash(hash)
    }

    pub fn return_hash(hash: [u8; 32]) -> Self {
        Memo::Return(hash)
    }

    /// A hash memo from 64 hex characters.
    pub fn hash_from_hex(hex_str: &str) -> Result<Self> {
        Ok(Memo::Hash(parse_hash(hex_str)?))
    }

    pub fn return_hash_from_hex(hex_str: &str) -> Result<Self> {
        Ok(Memo::Return(parse_hash(hex_str)?))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Memo::None)
    }

    pub fn memo_type(&self) -> xdr::MemoType {
        match self {
            Memo::None => xdr::MemoType::None,
            Memo::Text(_) => xdr::MemoType::Text,
            Memo::Id(_) => xdr::MemoType::Id,
            Memo::Hash(_) => xdr::MemoType::Hash,
            Memo::Return(_) => xdr::MemoType::Return,
        }
    }

    /// The text of a text memo, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Memo::Text(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    pub fn to_xdr(&self) -> Result<xdr::Memo> {
        Ok(match self {
            Memo::None => xdr::Memo::None,
            Memo::Text(bytes) => xdr::Memo::Text(
                XdrString::new(bytes.clone()).map_err(|e| TxAsmError::InvalidMemo(e.to_string()))?,
            ),
            Memo::Id(id) => xdr::Memo::Id(*id),
            Memo::Hash(hash) => xdr::Memo::Hash(*hash),
            Memo::Return(hash) => xdr::Memo::Return(*hash),
        })
    }

    pub fn from_xdr(memo: &xdr::Memo) -> Self {
        match memo {
            xdr::Memo::None => Memo::None,
            xdr::Memo::Text(text) => Memo::Text(text.as_bytes().to_vec()),
            xdr::Memo::Id(id) => Memo::Id(*id),
            xdr::Memo::Hash(hash) => Memo::Hash(*hash),
            xdr::Memo::Return(hash) => Memo::Return(*hash),
        }
    }
}

fn parse_hash(hex_str: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(hex_str).map_err(|e| TxAsmError::InvalidMemo(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| TxAsmError::InvalidMemo("hash must be exactly 32 bytes".to_string()))
}
