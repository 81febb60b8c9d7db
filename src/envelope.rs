//! Signed envelopes
//!
//! An envelope is a frozen transaction plus the network it is bound to and
//! the signatures collected so far. The [`Envelope`] trait carries signing
//! and hashing for both plain and fee-bump envelopes; each type only supplies
//! its signature base.

use crate::error::{Result, TxAsmError};
use crate::keypair::Keypair;
use crate::network::{self, Network};
use crate::serialization::{VarArray, VarOpaque, XdrCodec};
use crate::transaction::{FeeBumpTransaction, Transaction, TransactionVersion};
use crate::xdr;
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

/// Most signatures an envelope can carry.
pub const MAX_SIGNATURES: usize = 20;

/// Longest preimage a hash(x) signer accepts.
pub const MAX_HASHX_PREIMAGE_LEN: usize = 64;

pub trait Envelope {
    /// The bytes whose sha256 is signed.
    fn signature_base(&self) -> Result<Vec<u8>>;

    fn signatures(&self) -> &[xdr::DecoratedSignature];

    fn signatures_mut(&mut self) -> &mut Vec<xdr::DecoratedSignature>;

    fn network(&self) -> &Network;

    fn to_envelope_xdr(&self) -> Result<xdr::TransactionEnvelope>;

    fn hash(&self) -> Result<xdr::Hash> {
        Ok(network::sha256(&self.signature_base()?))
    }

    fn hash_hex(&self) -> Result<String> {
        Ok(hex::encode(self.hash()?))
    }

    /// Signs the hash and appends the decorated signature. Signing twice
    /// with the same key appends two signatures.
    fn sign(&mut self, keypair: &Keypair) -> Result<()> {
        let signature = keypair.sign_decorated(&self.hash()?)?;
        debug!(hint = %hex::encode(signature.hint), "signed envelope");
        self.add_decorated_signature(signature)
    }

    /// Appends a hash(x) signature: the preimage itself, hinted by the last
    /// four bytes of its sha256.
    fn sign_hashx(&mut self, preimage: &[u8]) -> Result<()> {
        if preimage.len() > MAX_HASHX_PREIMAGE_LEN {
            return Err(TxAsmError::invalid_argument(
                "preimage",
                format!("{} bytes exceeds {MAX_HASHX_PREIMAGE_LEN}", preimage.len()),
            ));
        }
        let digest = network::sha256(preimage);
        let mut hint = [0u8; 4];
        hint.copy_from_slice(&digest[28..]);
        self.add_decorated_signature(xdr::DecoratedSignature {
            hint,
            signature: VarOpaque::new(preimage)?,
        })
    }

    /// Adds a signature produced elsewhere, after checking it against this
    /// envelope's hash.
    fn add_signature(&mut self, public_key: &str, signature: &str) -> Result<()> {
        let keypair = Keypair::from_public_key(public_key)?;
        let raw = STANDARD
            .decode(signature)
            .map_err(|e| TxAsmError::Base64Error(e.to_string()))?;
        keypair.verify(&self.hash()?, &raw)?;
        self.add_decorated_signature(xdr::DecoratedSignature {
            hint: keypair.signature_hint(),
            signature: VarOpaque::new(raw)?,
        })
    }

    fn add_decorated_signature(&mut self, signature: xdr::DecoratedSignature) -> Result<()> {
        let signatures = self.signatures_mut();
        if signatures.len() >= MAX_SIGNATURES {
            return Err(TxAsmError::SignatureError(format!(
                "an envelope holds at most {MAX_SIGNATURES} signatures"
            )));
        }
        signatures.push(signature);
        Ok(())
    }

    /// Succeeds when any signature hinted for `public_key` verifies.
    fn verify_signature(&self, public_key: &str) -> Result<()> {
        let keypair = Keypair::from_public_key(public_key)?;
        let hint = keypair.signature_hint();
        let hash = self.hash()?;
        let verified = self
            .signatures()
            .iter()
            .filter(|sig| sig.hint == hint)
            .any(|sig| keypair.verify(&hash, &sig.signature).is_ok());
        if verified {
            Ok(())
        } else {
            Err(TxAsmError::SignatureError(format!(
                "no valid signature from {public_key}"
            )))
        }
    }

    fn to_xdr_bytes(&self) -> Result<Vec<u8>> {
        self.to_envelope_xdr()?.to_xdr_bytes()
    }

    /// Base64 of the envelope XDR, ready for submission.
    fn to_xdr(&self) -> Result<String> {
        self.to_envelope_xdr()?.to_xdr()
    }
}

fn signatures_to_xdr(signatures: &[xdr::DecoratedSignature]) -> Result<xdr::Signatures> {
    VarArray::new(signatures.to_vec())
}

/// A plain (v0 or v1) transaction envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    transaction: Transaction,
    network: Network,
    signatures: Vec<xdr::DecoratedSignature>,
}

impl TransactionEnvelope {
    pub fn new(transaction: Transaction, network: Network) -> Self {
        Self {
            transaction,
            network,
            signatures: Vec::new(),
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    /// Decodes a base64 envelope. Fee-bump envelopes are rejected; use
    /// [`ParsedEnvelope::from_xdr`] when either kind may arrive.
    pub fn from_xdr(encoded: &str, network: Network) -> Result<Self> {
        match ParsedEnvelope::from_xdr(encoded, network)? {
            ParsedEnvelope::Transaction(envelope) => Ok(envelope),
            ParsedEnvelope::FeeBump(_) => Err(TxAsmError::InvalidTransaction(
                "expected a transaction envelope, got a fee bump".into(),
            )),
        }
    }
}

impl Envelope for TransactionEnvelope {
    fn signature_base(&self) -> Result<Vec<u8>> {
        self.transaction.signature_base(&self.network)
    }

    fn signatures(&self) -> &[xdr::DecoratedSignature] {
        &self.signatures
    }

    fn signatures_mut(&mut self) -> &mut Vec<xdr::DecoratedSignature> {
        &mut self.signatures
    }

    fn network(&self) -> &Network {
        &self.network
    }

    fn to_envelope_xdr(&self) -> Result<xdr::TransactionEnvelope> {
        let signatures = signatures_to_xdr(&self.signatures)?;
        Ok(match self.transaction.version() {
            TransactionVersion::V0 => xdr::TransactionEnvelope::TxV0(xdr::TransactionV0Envelope {
                tx: self.transaction.to_xdr_v0()?,
                signatures,
            }),
            TransactionVersion::V1 => xdr::TransactionEnvelope::Tx(xdr::TransactionV1Envelope {
                tx: self.transaction.to_xdr_v1()?,
                signatures,
            }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBumpTransactionEnvelope {
    transaction: FeeBumpTransaction,
    network: Network,
    signatures: Vec<xdr::DecoratedSignature>,
}

impl FeeBumpTransactionEnvelope {
    pub fn new(transaction: FeeBumpTransaction, network: Network) -> Self {
        Self {
            transaction,
            network,
            signatures: Vec::new(),
        }
    }

    pub fn transaction(&self) -> &FeeBumpTransaction {
        &self.transaction
    }

    /// The wrapped transaction with its own signatures, bound to the same network.
    pub fn inner_envelope(&self) -> TransactionEnvelope {
        TransactionEnvelope {
            transaction: self.transaction.inner_transaction().clone(),
            network: self.network.clone(),
            signatures: self.transaction.inner_signatures().to_vec(),
        }
    }

    pub fn from_xdr(encoded: &str, network: Network) -> Result<Self> {
        match ParsedEnvelope::from_xdr(encoded, network)? {
            ParsedEnvelope::FeeBump(envelope) => Ok(envelope),
            ParsedEnvelope::Transaction(_) => Err(TxAsmError::InvalidTransaction(
                "expected a fee bump envelope, got a transaction".into(),
            )),
        }
    }
}

impl Envelope for FeeBumpTransactionEnvelope {
    fn signature_base(&self) -> Result<Vec<u8>> {
        self.transaction.signature_base(&self.network)
    }

    fn signatures(&self) -> &[xdr::DecoratedSignature] {
        &self.signatures
    }

    fn signatures_mut(&mut self) -> &mut Vec<xdr::DecoratedSignature> {
        &mut self.signatures
    }

    fn network(&self) -> &Network {
        &self.network
    }

    fn to_envelope_xdr(&self) -> Result<xdr::TransactionEnvelope> {
        Ok(xdr::TransactionEnvelope::TxFeeBump(xdr::FeeBumpTransactionEnvelope {
            tx: self.transaction.to_xdr()?,
            signatures: signatures_to_xdr(&self.signatures)?,
        }))
    }
}

/// Either kind of envelope, as decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEnvelope {
    Transaction(TransactionEnvelope),
    FeeBump(FeeBumpTransactionEnvelope),
}

impl ParsedEnvelope {
    pub fn from_xdr(encoded: &str, network: Network) -> Result<Self> {
        Self::from_envelope_xdr(&xdr::TransactionEnvelope::from_xdr(encoded)?, network)
    }

    pub fn from_xdr_bytes(bytes: &[u8], network: Network) -> Result<Self> {
        Self::from_envelope_xdr(&xdr::TransactionEnvelope::from_xdr_bytes(bytes)?, network)
    }

    pub fn from_envelope_xdr(envelope: &xdr::TransactionEnvelope, network: Network) -> Result<Self> {
        let parsed = match envelope {
            xdr::TransactionEnvelope::TxV0(env) => ParsedEnvelope::Transaction(TransactionEnvelope {
                transaction: Transaction::from_xdr_v0(&env.tx)?,
                network,
                signatures: env.signatures.to_vec(),
            }),
            xdr::TransactionEnvelope::Tx(env) => ParsedEnvelope::Transaction(TransactionEnvelope {
                transaction: Transaction::from_xdr_v1(&env.tx)?,
                network,
                signatures: env.signatures.to_vec(),
            }),
            xdr::TransactionEnvelope::TxFeeBump(env) => ParsedEnvelope::FeeBump(FeeBumpTransactionEnvelope {
                transaction: FeeBumpTransaction::from_xdr(&env.tx)?,
                network,
                signatures: env.signatures.to_vec(),
            }),
        };
        debug!(
            fee_bump = parsed.is_fee_bump(),
            signatures = parsed.envelope().signatures().len(),
            "decoded envelope"
        );
        Ok(parsed)
    }

    pub fn is_fee_bump(&self) -> bool {
        matches!(self, ParsedEnvelope::FeeBump(_))
    }

    /// The envelope as a trait object, for signing or hashing either kind.
    pub fn envelope(&self) -> &dyn Envelope {
        match self {
            ParsedEnvelope::Transaction(env) => env,
            ParsedEnvelope::FeeBump(env) => env,
        }
    }

    pub fn envelope_mut(&mut self) -> &mut dyn Envelope {
        match self {
            ParsedEnvelope::Transaction(env) => env,
            ParsedEnvelope::FeeBump(env) => env,
        }
    }
}

/// Reads only the envelope discriminant.
pub fn is_fee_bump_envelope(encoded: &str) -> Result<bool> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| TxAsmError::Base64Error(e.to_string()))?;
    let mut cursor = std::io::Cursor::new(bytes.as_slice());
    let envelope_type = crate::serialization::decode_i32(&mut cursor)?;
    Ok(envelope_type == xdr::EnvelopeType::TxFeeBump.value())
}
