//! Error types for stellar-txasm
//!
//! Every failure belongs to one of four families, see [`ErrorKind`]. Callers that
//! only care about the family can match on [`TxAsmError::kind`] instead of the
//! individual variants.

use thiserror::Error;

/// Coarse classification of a [`TxAsmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A domain value was rejected at construction.
    Validation,
    /// Bytes could not be decoded into the requested XDR type.
    Decode,
    /// A transaction or envelope could not be assembled.
    Construction,
    /// Signing or signature verification failed.
    Crypto,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TxAsmError {
    #[error("Invalid value for `{name}`: {message}")]
    InvalidArgument { name: &'static str, message: String },

    #[error("Invalid amount `{value}`: {message}")]
    InvalidAmount { value: String, message: String },

    #[error("Invalid asset code `{0}`: must be 1-12 alphanumeric characters")]
    InvalidAssetCode(String),

    #[error("Invalid memo: {0}")]
    InvalidMemo(String),

    #[error("Invalid {expected} strkey: {message}")]
    InvalidStrKey { expected: &'static str, message: String },

    #[error("Encoding error in {type_name}: {message}")]
    EncodingError { type_name: &'static str, message: String },

    #[error("Decoding error in {type_name}: {message}")]
    DecodingError { type_name: &'static str, message: String },

    #[error("Buffer too small decoding {type_name}: needed {needed} bytes, got {available}")]
    BufferTooSmall {
        type_name: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Unknown discriminant {value} for {type_name}")]
    UnknownDiscriminant { type_name: &'static str, value: i32 },

    #[error("Trailing bytes after {type_name}: {remaining} bytes left")]
    TrailingBytes { type_name: &'static str, remaining: usize },

    #[error("Base64 error: {0}")]
    Base64Error(String),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Conflicting preconditions: {0}")]
    PreconditionConflict(String),

    #[error("Fee bump base fee {base_fee} is below the network minimum of {minimum} stroops")]
    FeeBumpBelowMinimum { base_fee: u32, minimum: u32 },

    #[error("Fee bump base fee {base_fee} is lower than the inner transaction base fee of {inner_base_fee} stroops")]
    FeeBumpBelowInnerFee { base_fee: u32, inner_base_fee: u64 },

    #[error("Fee overflow: {0}")]
    FeeOverflow(String),

    #[error("Signature error: {0}")]
    SignatureError(String),

    #[error("The keypair has no secret key and cannot sign")]
    MissingSecretKey,

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TxAsmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TxAsmError::InvalidArgument { .. }
            | TxAsmError::InvalidAmount { .. }
            | TxAsmError::InvalidAssetCode(_)
            | TxAsmError::InvalidMemo(_)
            | TxAsmError::InvalidStrKey { .. }
            | TxAsmError::ConfigError(_) => ErrorKind::Validation,
            TxAsmError::DecodingError { .. }
            | TxAsmError::BufferTooSmall { .. }
            | TxAsmError::UnknownDiscriminant { .. }
            | TxAsmError::TrailingBytes { .. }
            | TxAsmError::Base64Error(_) => ErrorKind::Decode,
            TxAsmError::EncodingError { .. }
            | TxAsmError::InvalidTransaction(_)
            | TxAsmError::PreconditionConflict(_)
            | TxAsmError::FeeBumpBelowMinimum { .. }
            | TxAsmError::FeeBumpBelowInnerFee { .. }
            | TxAsmError::FeeOverflow(_) => ErrorKind::Construction,
            TxAsmError::SignatureError(_)
            | TxAsmError::MissingSecretKey
            | TxAsmError::InvalidPublicKey(_) => ErrorKind::Crypto,
        }
    }

    pub(crate) fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        TxAsmError::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    pub(crate) fn decoding(type_name: &'static str, message: impl Into<String>) -> Self {
        TxAsmError::DecodingError {
            type_name,
            message: message.into(),
        }
    }

    pub(crate) fn encoding(type_name: &'static str, message: impl Into<String>) -> Self {
        TxAsmError::EncodingError {
            type_name,
            message: message.into(),
        }
    }

    /// Attributes a primitive decode failure to the composite type being decoded.
    ///
    /// Primitive decoders report lowercase XDR names (`uint32`, `opaque`); the
    /// innermost composite that sees the error replaces that name with its own.
    pub(crate) fn within(self, type_name: &'static str) -> Self {
        match self {
            TxAsmError::BufferTooSmall {
                type_name: inner,
                needed,
                available,
            } if is_primitive(inner) => TxAsmError::BufferTooSmall {
                type_name,
                needed,
                available,
            },
            TxAsmError::DecodingError {
                type_name: inner,
                message,
            } if is_primitive(inner) => TxAsmError::DecodingError {
                type_name,
                message: format!("{inner}: {message}"),
            },
            other => other,
        }
    }
}

fn is_primitive(type_name: &str) -> bool {
    type_name.starts_with(|c: char| c.is_ascii_lowercase())
}

impl From<base64::DecodeError> for TxAsmError {
    fn from(err: base64::DecodeError) -> Self {
        TxAsmError::Base64Error(err.to_string())
    }
}

impl From<serde_json::Error> for TxAsmError {
    fn from(err: serde_json::Error) -> Self {
        TxAsmError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TxAsmError>;
