//! Ed25519 keypairs
//!
//! A [`Keypair`] always has a public key and may have a secret seed. Keypairs
//! built from a public key alone can verify signatures but fail with
//! [`TxAsmError::MissingSecretKey`] when asked to sign.

use crate::error::{Result, TxAsmError};
use crate::serialization::VarOpaque;
use crate::strkey;
use crate::xdr;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;

#[derive(Clone)]
pub struct Keypair {
    verifying_key: VerifyingKey,
    signing_key: Option<SigningKey>,
}

impl Keypair {
    /// Generates a new keypair using the OS random number generator.
    pub fn random() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self::from_signing_key(SigningKey::generate(&mut csprng))
    }

    /// Creates a keypair from a secret seed (S...).
    pub fn from_secret(secret: &str) -> Result<Self> {
        let seed = strkey::decode_secret_seed(secret)?;
        Ok(Self::from_raw_ed25519_seed(&seed))
    }

    pub fn from_raw_ed25519_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Creates a verify-only keypair from an account id (G...).
    pub fn from_public_key(public_key: &str) -> Result<Self> {
        let raw = strkey::decode_account_id(public_key)?;
        Self::from_raw_ed25519_public_key(&raw)
    }

    pub fn from_raw_ed25519_public_key(raw: &[u8; 32]) -> Result<Self> {
        let verifying_key = VerifyingKey::from_bytes(raw)
            .map_err(|e| TxAsmError::InvalidPublicKey(e.to_string()))?;
        Ok(Self {
            verifying_key,
            signing_key: None,
        })
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        Self {
            verifying_key: signing_key.verifying_key(),
            signing_key: Some(signing_key),
        }
    }

    /// The account id (G...).
    pub fn public_key(&self) -> String {
        strkey::encode_account_id(self.verifying_key.as_bytes())
    }

    pub fn raw_public_key(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// The secret seed (S...).
    pub fn secret(&self) -> Result<String> {
        Ok(strkey::encode_secret_seed(&self.raw_secret_key()?))
    }

    pub fn raw_secret_key(&self) -> Result<[u8; 32]> {
        self.signing_key
            .as_ref()
            .map(SigningKey::to_bytes)
            .ok_or(TxAsmError::MissingSecretKey)
    }

    pub fn can_sign(&self) -> bool {
        self.signing_key.is_some()
    }

    /// The last four bytes of the public key.
    pub fn signature_hint(&self) -> xdr::SignatureHint {
        let key = self.verifying_key.as_bytes();
        let mut hint = [0u8; 4];
        hint.copy_from_slice(&key[28..]);
        hint
    }

    pub fn sign(&self, data: &[u8]) -> Result<[u8; 64]> {
        let signing_key = self.signing_key.as_ref().ok_or(TxAsmError::MissingSecretKey)?;
        Ok(signing_key.sign(data).to_bytes())
    }

    /// Verifies a detached signature over `data`.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let bytes: [u8; 64] = signature.try_into().map_err(|_| {
            TxAsmError::SignatureError(format!("signature must be 64 bytes, got {}", signature.len()))
        })?;
        let signature = ed25519_dalek::Signature::from_bytes(&bytes);
        self.verifying_key
            .verify(data, &signature)
            .map_err(|_| TxAsmError::SignatureError("signature does not match payload".to_string()))
    }

    pub fn sign_decorated(&self, data: &[u8]) -> Result<xdr::DecoratedSignature> {
        let signature = self.sign(data)?;
        Ok(xdr::DecoratedSignature {
            hint: self.signature_hint(),
            signature: VarOpaque::new(signature.to_vec())?,
        })
    }

    /// Signs `payload` for an ed25519 signed-payload signer.
    ///
    /// The hint is the key hint XORed with the last four payload bytes; shorter
    /// payloads are right-padded with zeros first.
    pub fn sign_payload_decorated(&self, payload: &[u8]) -> Result<xdr::DecoratedSignature> {
        let signature = self.sign(payload)?;
        let mut hint = [0u8; 4];
        let tail = &payload[payload.len().saturating_sub(4)..];
        hint[..tail.len()].copy_from_slice(tail);
        for (h, k) in hint.iter_mut().zip(self.signature_hint()) {
            *h ^= k;
        }
        Ok(xdr::DecoratedSignature {
            hint,
            signature: VarOpaque::new(signature.to_vec())?,
        })
    }

    pub fn xdr_account_id(&self) -> xdr::AccountId {
        xdr::PublicKey::Ed25519(self.raw_public_key())
    }

    pub fn xdr_muxed_account(&self) -> xdr::MuxedAccount {
        xdr::MuxedAccount::Ed25519(self.raw_public_key())
    }

    pub fn xdr_signer_key(&self) -> xdr::SignerKey {
        xdr::SignerKey::Ed25519(self.raw_public_key())
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.verifying_key == other.verifying_key
            && self.signing_key.as_ref().map(SigningKey::to_bytes)
                == other.signing_key.as_ref().map(SigningKey::to_bytes)
    }
}

impl Eq for Keypair {}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key())
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "SCZANGBA5YHTNYVVV4C3U252E2B6P6F5T3U6MM63WBSBZATAQI3EBTQ4";

    #[test]
    fn test_secret_roundtrip() {
        let keypair = Keypair::from_secret(SECRET).unwrap();
        assert_eq!(keypair.secret().unwrap(), SECRET);
        assert!(keypair.public_key().starts_with('G'));
    }

    #[test]
    fn test_public_only_cannot_sign() {
        let keypair = Keypair::random();
        let public = Keypair::from_public_key(&keypair.public_key()).unwrap();
        assert!(!public.can_sign());
        assert_eq!(public.sign(b"data"), Err(TxAsmError::MissingSecretKey));
        assert_eq!(public.secret(), Err(TxAsmError::MissingSecretKey));
    }

    #[test]
    fn test_sign_and_verify() {
        let keypair = Keypair::random();
        let signature = keypair.sign(b"hello").unwrap();
        let verifier = Keypair::from_public_key(&keypair.public_key()).unwrap();
        assert!(verifier.verify(b"hello", &signature).is_ok());

        let err = verifier.verify(b"hullo", &signature).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Crypto);
    }

    #[test]
    fn test_hint_is_key_suffix() {
        let keypair = Keypair::from_raw_ed25519_seed(&[3u8; 32]);
        let raw = keypair.raw_public_key();
        assert_eq!(keypair.signature_hint(), [raw[28], raw[29], raw[30], raw[31]]);

        let decorated = keypair.sign_decorated(b"payload").unwrap();
        assert_eq!(decorated.hint, keypair.signature_hint());
        assert_eq!(decorated.signature.len(), 64);
    }

    #[test]
    fn test_signed_payload_hint() {
        let keypair = Keypair::from_raw_ed25519_seed(&[4u8; 32]);
        let key_hint = keypair.signature_hint();

        let decorated = keypair.sign_payload_decorated(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(
            decorated.hint,
            [key_hint[0] ^ 3, key_hint[1] ^ 4, key_hint[2] ^ 5, key_hint[3] ^ 6]
        );

        let short = keypair.sign_payload_decorated(&[0xff]).unwrap();
        assert_eq!(short.hint, [key_hint[0] ^ 0xff, key_hint[1], key_hint[2], key_hint[3]]);
    }

    #[test]
    fn test_rejects_seed_as_public_key() {
        assert!(Keypair::from_public_key(SECRET).is_err());
    }
}
