//! The XDR type registry
//!
//! Raw wire types for transactions and the ledger entries they reference,
//! declared with the generators in `macros.rs`. Structs encode their fields in
//! declaration order; unions are enums whose arms carry their own payload, so
//! a value can never hold a payload that disagrees with its discriminant.
//!
//! Every type here implements [`XdrEncode`](crate::serialization::XdrEncode)
//! and [`XdrDecode`](crate::serialization::XdrDecode), and through them the
//! [`XdrCodec`](crate::serialization::XdrCodec) conveniences.

pub mod contract;
pub mod ledger;
pub mod operation;
pub mod transaction;
pub mod types;

pub use contract::*;
pub use ledger::*;
pub use operation::*;
pub use transaction::*;
pub use types::*;
