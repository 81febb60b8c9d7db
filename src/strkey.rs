//! StrKey encoding and decoding
//!
//! StrKey is the human-readable form of keys and addresses: RFC 4648 base32
//! (no padding) of a version byte, the payload and a CRC16-XModem checksum of
//! both, the checksum stored little-endian.
//!
//! | Prefix | Kind | Payload |
//! |--------|------|---------|
//! | G | account id | ed25519 public key |
//! | S | secret seed | ed25519 seed |
//! | T | pre-auth tx | transaction hash |
//! | X | sha256 hash | hash(x) signer |
//! | M | muxed account | public key + u64 id |
//! | P | signed payload | public key + `opaque<64>` payload |
//! | C | contract | contract id |
//! | L | liquidity pool | pool id |
//! | B | claimable balance | type byte + balance id |
//!
//! Decoding is strict. The input must be the canonical encoding of its bytes,
//! so padding characters, trailing garbage and non-zero unused bits are all
//! rejected before the version byte and checksum are examined.

use crate::error::{Result, TxAsmError};
use crate::serialization::helpers::padded_len;

const ALPHABET: base32::Alphabet = base32::Alphabet::Rfc4648 { padding: false };

/// Largest payload a signed-payload signer may carry.
pub const MAX_SIGNED_PAYLOAD_LEN: usize = 64;

/// The version byte selects the leading character of the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionByte {
    AccountId,
    Seed,
    PreAuthTx,
    Sha256Hash,
    MuxedAccount,
    SignedPayload,
    Contract,
    LiquidityPool,
    ClaimableBalance,
}

impl VersionByte {
    pub const ALL: [VersionByte; 9] = [
        VersionByte::AccountId,
        VersionByte::Seed,
        VersionByte::PreAuthTx,
        VersionByte::Sha256Hash,
        VersionByte::MuxedAccount,
        VersionByte::SignedPayload,
        VersionByte::Contract,
        VersionByte::LiquidityPool,
        VersionByte::ClaimableBalance,
    ];

    pub fn byte(self) -> u8 {
        match self {
            VersionByte::AccountId => 6 << 3,
            VersionByte::Seed => 18 << 3,
            VersionByte::PreAuthTx => 19 << 3,
            VersionByte::Sha256Hash => 23 << 3,
            VersionByte::MuxedAccount => 12 << 3,
            VersionByte::SignedPayload => 15 << 3,
            VersionByte::Contract => 2 << 3,
            VersionByte::LiquidityPool => 11 << 3,
            VersionByte::ClaimableBalance => 1 << 3,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.byte() == byte)
    }

    /// The leading character every key of this kind starts with.
    pub fn prefix(self) -> char {
        match self {
            VersionByte::AccountId => 'G',
            VersionByte::Seed => 'S',
            VersionByte::PreAuthTx => 'T',
            VersionByte::Sha256Hash => 'X',
            VersionByte::MuxedAccount => 'M',
            VersionByte::SignedPayload => 'P',
            VersionByte::Contract => 'C',
            VersionByte::LiquidityPool => 'L',
            VersionByte::ClaimableBalance => 'B',
        }
    }

    pub fn from_prefix(prefix: char) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.prefix() == prefix)
    }

    pub fn name(self) -> &'static str {
        match self {
            VersionByte::AccountId => "account id",
            VersionByte::Seed => "secret seed",
            VersionByte::PreAuthTx => "pre-auth tx",
            VersionByte::Sha256Hash => "sha256 hash",
            VersionByte::MuxedAccount => "muxed account",
            VersionByte::SignedPayload => "signed payload",
            VersionByte::Contract => "contract",
            VersionByte::LiquidityPool => "liquidity pool",
            VersionByte::ClaimableBalance => "claimable balance",
        }
    }
}

fn invalid(expected: VersionByte, message: impl Into<String>) -> TxAsmError {
    TxAsmError::InvalidStrKey {
        expected: expected.name(),
        message: message.into(),
    }
}

/// Encodes arbitrary payload bytes under a version byte.
///
/// Format: base32(version || data || crc16(version || data))
pub fn encode_check(version: VersionByte, data: &[u8]) -> String {
    let mut payload = Vec::with_capacity(data.len() + 3);
    payload.push(version.byte());
    payload.extend_from_slice(data);

    let checksum = crc16_xmodem(&payload);
    payload.extend_from_slice(&checksum.to_le_bytes());

    base32::encode(ALPHABET, &payload)
}

/// Decodes a StrKey of the expected kind and returns its payload bytes.
pub fn decode_check(expected: VersionByte, encoded: &str) -> Result<Vec<u8>> {
    if encoded.is_empty() || !encoded.bytes().all(|b| matches!(b, b'A'..=b'Z' | b'2'..=b'7')) {
        return Err(invalid(expected, "not an unpadded upper-case base32 string"));
    }

    let decoded =
        base32::decode(ALPHABET, encoded).ok_or_else(|| invalid(expected, "invalid base32"))?;

    // Rejects encodings whose unused trailing bits are set, and lengths that
    // no byte string encodes to.
    if base32::encode(ALPHABET, &decoded) != encoded {
        return Err(invalid(expected, "non-canonical encoding"));
    }

    if decoded.len() < 3 {
        return Err(invalid(expected, "too short"));
    }

    let version = decoded[0];
    if version != expected.byte() {
        let actual = VersionByte::from_byte(version)
            .map(|v| v.name().to_string())
            .unwrap_or_else(|| format!("unknown version byte {version:#04x}"));
        return Err(invalid(expected, format!("got {actual}")));
    }

    let checksum_pos = decoded.len() - 2;
    let checksum = u16::from_le_bytes([decoded[checksum_pos], decoded[checksum_pos + 1]]);
    if checksum != crc16_xmodem(&decoded[..checksum_pos]) {
        return Err(invalid(expected, "checksum mismatch"));
    }

    Ok(decoded[1..checksum_pos].to_vec())
}

fn decode_fixed<const N: usize>(expected: VersionByte, encoded: &str) -> Result<[u8; N]> {
    let data = decode_check(expected, encoded)?;
    data.as_slice()
        .try_into()
        .map_err(|_| invalid(expected, format!("payload length {} != {N}", data.len())))
}

/// Reports whether `encoded` is a valid StrKey of the given kind.
pub fn is_valid(version: VersionByte, encoded: &str) -> bool {
    match version {
        VersionByte::MuxedAccount => decode_muxed_account(encoded).is_ok(),
        VersionByte::SignedPayload => decode_signed_payload(encoded).is_ok(),
        VersionByte::ClaimableBalance => decode_claimable_balance(encoded).is_ok(),
        _ => decode_fixed::<32>(version, encoded).is_ok(),
    }
}

pub fn encode_account_id(key: &[u8; 32]) -> String {
    encode_check(VersionByte::AccountId, key)
}

pub fn decode_account_id(encoded: &str) -> Result<[u8; 32]> {
    decode_fixed(VersionByte::AccountId, encoded)
}

pub fn encode_secret_seed(seed: &[u8; 32]) -> String {
    encode_check(VersionByte::Seed, seed)
}

pub fn decode_secret_seed(encoded: &str) -> Result<[u8; 32]> {
    decode_fixed(VersionByte::Seed, encoded)
}

pub fn encode_pre_auth_tx(hash: &[u8; 32]) -> String {
    encode_check(VersionByte::PreAuthTx, hash)
}

pub fn decode_pre_auth_tx(encoded: &str) -> Result<[u8; 32]> {
    decode_fixed(VersionByte::PreAuthTx, encoded)
}

pub fn encode_sha256_hash(hash: &[u8; 32]) -> String {
    encode_check(VersionByte::Sha256Hash, hash)
}

pub fn decode_sha256_hash(encoded: &str) -> Result<[u8; 32]> {
    decode_fixed(VersionByte::Sha256Hash, encoded)
}

pub fn encode_contract(contract_id: &[u8; 32]) -> String {
    encode_check(VersionByte::Contract, contract_id)
}

pub fn decode_contract(encoded: &str) -> Result<[u8; 32]> {
    decode_fixed(VersionByte::Contract, encoded)
}

pub fn encode_liquidity_pool(pool_id: &[u8; 32]) -> String {
    encode_check(VersionByte::LiquidityPool, pool_id)
}

pub fn decode_liquidity_pool(encoded: &str) -> Result<[u8; 32]> {
    decode_fixed(VersionByte::LiquidityPool, encoded)
}

/// Encodes a V0 claimable balance id. The payload is the balance id type
/// byte (0) followed by the 32-byte hash.
pub fn encode_claimable_balance(balance_id: &[u8; 32]) -> String {
    let mut data = Vec::with_capacity(33);
    data.push(0);
    data.extend_from_slice(balance_id);
    encode_check(VersionByte::ClaimableBalance, &data)
}

pub fn decode_claimable_balance(encoded: &str) -> Result<[u8; 32]> {
    let data: [u8; 33] = decode_fixed(VersionByte::ClaimableBalance, encoded)?;
    if data[0] != 0 {
        return Err(invalid(
            VersionByte::ClaimableBalance,
            format!("unsupported balance id type {}", data[0]),
        ));
    }
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[1..]);
    Ok(hash)
}

/// Encodes a muxed account (M...): the key followed by the big-endian id.
pub fn encode_muxed_account(key: &[u8; 32], id: u64) -> String {
    let mut data = Vec::with_capacity(40);
    data.extend_from_slice(key);
    data.extend_from_slice(&id.to_be_bytes());
    encode_check(VersionByte::MuxedAccount, &data)
}

pub fn decode_muxed_account(encoded: &str) -> Result<([u8; 32], u64)> {
    let data: [u8; 40] = decode_fixed(VersionByte::MuxedAccount, encoded)?;
    let mut key = [0u8; 32];
    key.copy_from_slice(&data[..32]);
    let mut id = [0u8; 8];
    id.copy_from_slice(&data[32..]);
    Ok((key, u64::from_be_bytes(id)))
}

/// Encodes a signed-payload signer (P...). The payload is laid out as the
/// XDR of `{ uint256 ed25519; opaque payload<64>; }`.
pub fn encode_signed_payload(key: &[u8; 32], payload: &[u8]) -> Result<String> {
    if payload.len() > MAX_SIGNED_PAYLOAD_LEN {
        return Err(invalid(
            VersionByte::SignedPayload,
            format!("payload length {} exceeds {MAX_SIGNED_PAYLOAD_LEN}", payload.len()),
        ));
    }
    let mut data = Vec::with_capacity(36 + padded_len(payload.len()));
    data.extend_from_slice(key);
    data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    data.extend_from_slice(payload);
    data.resize(36 + padded_len(payload.len()), 0);
    Ok(encode_check(VersionByte::SignedPayload, &data))
}

pub fn decode_signed_payload(encoded: &str) -> Result<([u8; 32], Vec<u8>)> {
    let version = VersionByte::SignedPayload;
    let data = decode_check(version, encoded)?;
    if data.len() < 36 {
        return Err(invalid(version, format!("payload length {} too short", data.len())));
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&data[32..36]);
    let len = u32::from_be_bytes(len_bytes) as usize;
    if len > MAX_SIGNED_PAYLOAD_LEN {
        return Err(invalid(version, format!("inner payload length {len} exceeds {MAX_SIGNED_PAYLOAD_LEN}")));
    }
    if data.len() != 36 + padded_len(len) {
        return Err(invalid(version, "inner payload length does not match data"));
    }
    if data[36 + len..].iter().any(|b| *b != 0) {
        return Err(invalid(version, "non-zero padding"));
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&data[..32]);
    Ok((key, data[36..36 + len].to_vec()))
}

/// Computes the CRC16-XModem checksum of data.
///
/// Polynomial 0x1021, initial value 0.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}
