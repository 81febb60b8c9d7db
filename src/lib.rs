//! stellar-txasm - Stellar XDR codec and transaction builder
//!
//! Builds, encodes, hashes and signs Stellar transactions at the byte level.
//! The crate is layered bottom-up:
//!
//! - [`serialization`] and [`xdr`]: the XDR wire codec and the raw wire types.
//! - [`strkey`], [`keypair`], [`network`]: addresses, ed25519 keys and network ids.
//! - Domain values ([`amount`], [`asset`], [`memo`], [`operation`], ...) that
//!   validate on construction and convert to and from the wire types.
//! - [`transaction`], [`envelope`] and [`builder`]: freezing, hashing and signing.
//!
//! Everything is synchronous and pure; no I/O happens outside
//! [`config::BuilderConfig::from_json_file`].

#[macro_use]
mod macros;

pub mod address;
pub mod amount;
pub mod asset;
pub mod builder;
pub mod claim_predicate;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fee_calculator;
pub mod keypair;
pub mod memo;
pub mod muxed_account;
pub mod network;
pub mod operation;
pub mod preconditions;
pub mod price;
pub mod scval;
pub mod serialization;
pub mod signer_key;
pub mod soroban_data;
pub mod strkey;
pub mod transaction;
pub mod xdr;

pub use error::{ErrorKind, Result, TxAsmError};
pub use builder::{Account, TransactionBuilder};
pub use envelope::{Envelope, FeeBumpTransactionEnvelope, ParsedEnvelope, TransactionEnvelope};
pub use transaction::{FeeBumpTransaction, Transaction};
pub use fee_calculator::FeeCalculator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::address::Address;
    pub use crate::amount::Amount;
    pub use crate::asset::{Asset, LiquidityPoolAsset, LiquidityPoolId};
    pub use crate::builder::{Account, TransactionBuilder, TIMEOUT_INFINITE};
    pub use crate::claim_predicate::{ClaimPredicate, ClaimableBalanceId, Claimant};
    pub use crate::config::BuilderConfig;
    pub use crate::envelope::{Envelope, FeeBumpTransactionEnvelope, ParsedEnvelope, TransactionEnvelope};
    pub use crate::error::{ErrorKind, TxAsmError};
    pub use crate::fee_calculator::FeeCalculator;
    pub use crate::keypair::Keypair;
    pub use crate::memo::Memo;
    pub use crate::muxed_account::MuxedAccount;
    pub use crate::network::Network;
    pub use crate::operation::{Operation, OperationBody, SetOptions};
    pub use crate::preconditions::{LedgerBounds, Preconditions, TimeBounds};
    pub use crate::price::Price;
    pub use crate::serialization::XdrCodec;
    pub use crate::signer_key::{Signer, SignerKey};
    pub use crate::soroban_data::SorobanDataBuilder;
    pub use crate::transaction::{FeeBumpTransaction, Transaction, TransactionVersion};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_library_imports() {
        // Ensure the prelude is enough to build and sign
        let keypair = Keypair::random();
        let account = Account::new(&keypair.public_key(), 1).unwrap();
        let mut builder = TransactionBuilder::new(account, 100, Network::testnet())
            .append_inflation_op(None)
            .unwrap();
        let mut envelope = builder.build_envelope().unwrap();
        envelope.sign(&keypair).unwrap();
        assert!(!envelope.to_xdr().unwrap().is_empty());
    }
}
