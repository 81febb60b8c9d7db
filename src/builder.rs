//! Fluent transaction builder
//!
//! Each `append_*_op` validates its arguments on the spot and fails fast.
//! [`TransactionBuilder::build`] freezes the accumulated state into a
//! [`Transaction`] and advances the source account's sequence number by one,
//! so several transactions can be built from one account without re-reading
//! the sequence from the network.
//!
//! ```no_run
//! use stellar_txasm::prelude::*;
//!
//! # fn main() -> stellar_txasm::Result<()> {
//! let account = Account::new("GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ", 46)?;
//! let mut builder = TransactionBuilder::new(account, 100, Network::testnet())
//!     .append_payment_op(
//!         "GDQERENWDDSQZS7R7WKHZI3BSOYMV3FSWR7TFUYFTKQ447PIX6NREOJM",
//!         Asset::native(),
//!         "10.5",
//!         None,
//!     )?
//!     .set_timeout(30)?;
//! let tx = builder.build()?;
//! assert_eq!(tx.sequence(), 47);
//! # Ok(())
//! # }
//! ```

use crate::asset::{Asset, ChangeTrustAsset, LiquidityPoolId, TrustLineAsset};
use crate::claim_predicate::Claimant;
use crate::config::BuilderConfig;
use crate::envelope::{Envelope, FeeBumpTransactionEnvelope, ParsedEnvelope, TransactionEnvelope};
use crate::error::{Result, TxAsmError};
use crate::fee_calculator::{self, FeeCalculator};
use crate::memo::Memo;
use crate::muxed_account::MuxedAccount;
use crate::network::Network;
use crate::operation::{Operation, SetOptions};
use crate::preconditions::{LedgerBounds, Preconditions, TimeBounds, MAX_EXTRA_SIGNERS};
use crate::price::Price;
use crate::signer_key::SignerKey;
use crate::transaction::{FeeBumpTransaction, Transaction, TransactionVersion};
use crate::xdr;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// `set_timeout` value for a transaction that never expires.
pub const TIMEOUT_INFINITE: u64 = 0;

/// A source account and its current sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    account: MuxedAccount,
    sequence: i64,
}

impl Account {
    /// `account` is a `G...` or `M...` address.
    pub fn new(account: &str, sequence: i64) -> Result<Self> {
        if sequence < 0 {
            return Err(TxAsmError::invalid_argument("sequence", format!("{sequence} is negative")));
        }
        Ok(Self {
            account: MuxedAccount::from_account(account)?,
            sequence,
        })
    }

    pub fn account(&self) -> &MuxedAccount {
        &self.account
    }

    pub fn account_id(&self) -> String {
        self.account.account_id()
    }

    pub fn sequence_number(&self) -> i64 {
        self.sequence
    }

    pub fn increment_sequence_number(&mut self) -> Result<()> {
        self.sequence = self.next_sequence()?;
        Ok(())
    }

    fn next_sequence(&self) -> Result<i64> {
        self.sequence
            .checked_add(1)
            .ok_or_else(|| TxAsmError::InvalidTransaction("sequence number overflow".into()))
    }
}

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: Account,
    network: Network,
    fee: FeeCalculator,
    memo: Memo,
    preconditions: Preconditions,
    operations: Vec<Operation>,
    soroban_data: Option<xdr::SorobanTransactionData>,
    version: TransactionVersion,
}

impl TransactionBuilder {
    /// `base_fee` is charged per operation, in stroops.
    pub fn new(source: Account, base_fee: u32, network: Network) -> Self {
        Self {
            source,
            network,
            fee: FeeCalculator::with_base_fee(base_fee),
            memo: Memo::None,
            preconditions: Preconditions::none(),
            operations: Vec::new(),
            soroban_data: None,
            version: TransactionVersion::V1,
        }
    }

    /// Applies network, base fee, envelope version and default timeout.
    pub fn from_config(source: Account, config: &BuilderConfig) -> Result<Self> {
        config.validate()?;
        let builder = Self::new(source, config.base_fee, config.network()).set_v1(config.v1)?;
        match config.timeout_secs {
            Some(timeout) => builder.set_timeout(timeout),
            None => Ok(builder),
        }
    }

    /// Decodes either a plain or a fee-bump envelope.
    pub fn from_xdr(encoded: &str, network: Network) -> Result<ParsedEnvelope> {
        ParsedEnvelope::from_xdr(encoded, network)
    }

    pub fn account(&self) -> &Account {
        &self.source
    }

    pub fn into_account(self) -> Account {
        self.source
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn set_base_fee(mut self, base_fee: u32) -> Self {
        self.fee = FeeCalculator::with_base_fee(base_fee);
        self
    }

    pub fn set_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Selects the v1 (default) or legacy v0 envelope. v0 cannot carry a
    /// muxed source, v2 preconditions or Soroban data.
    pub fn set_v1(mut self, v1: bool) -> Result<Self> {
        if !v1 {
            if self.source.account.is_muxed() {
                return Err(TxAsmError::PreconditionConflict(
                    "a muxed source account needs a v1 envelope".into(),
                ));
            }
            if self.preconditions.requires_v2() {
                return Err(TxAsmError::PreconditionConflict(
                    "v2 preconditions need a v1 envelope".into(),
                ));
            }
            if self.soroban_data.is_some() {
                return Err(TxAsmError::PreconditionConflict(
                    "Soroban data needs a v1 envelope".into(),
                ));
            }
        }
        self.version = if v1 {
            TransactionVersion::V1
        } else {
            TransactionVersion::V0
        };
        Ok(self)
    }

    fn require_v1(&self, what: &str) -> Result<()> {
        if self.version == TransactionVersion::V0 {
            return Err(TxAsmError::PreconditionConflict(format!(
                "{what} needs a v1 envelope"
            )));
        }
        Ok(())
    }

    pub fn add_memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn add_text_memo(self, text: impl AsRef<[u8]>) -> Result<Self> {
        Ok(self.add_memo(Memo::text(text)?))
    }

    pub fn add_id_memo(self, id: u64) -> Self {
        self.add_memo(Memo::id(id))
    }

    pub fn add_hash_memo(self, hash: [u8; 32]) -> Self {
        self.add_memo(Memo::hash(hash))
    }

    pub fn add_return_memo(self, hash: [u8; 32]) -> Self {
        self.add_memo(Memo::return_hash(hash))
    }

    /// Fails if time bounds, or a timeout, are already set.
    pub fn add_time_bounds(mut self, min_time: u64, max_time: u64) -> Result<Self> {
        if self.preconditions.time_bounds.is_some() {
            return Err(TxAsmError::PreconditionConflict("time bounds are already set".into()));
        }
        self.preconditions.time_bounds = Some(TimeBounds::new(min_time, max_time)?);
        Ok(self)
    }

    /// Expires the transaction `timeout` seconds from now. [`TIMEOUT_INFINITE`]
    /// sets explicit unbounded time bounds. Fails if time bounds are already set.
    pub fn set_timeout(mut self, timeout: u64) -> Result<Self> {
        if self.preconditions.time_bounds.is_some() {
            return Err(TxAsmError::PreconditionConflict(
                "time bounds are already set, a timeout would overwrite them".into(),
            ));
        }
        let max_time = if timeout == TIMEOUT_INFINITE {
            0
        } else {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|e| TxAsmError::InvalidTransaction(format!("system clock: {e}")))?
                .as_secs();
            now.checked_add(timeout)
                .ok_or_else(|| TxAsmError::invalid_argument("timeout", format!("{timeout} overflows")))?
        };
        self.preconditions.time_bounds = Some(TimeBounds::new(0, max_time)?);
        Ok(self)
    }

    pub fn set_ledger_bounds(mut self, min_ledger: u32, max_ledger: u32) -> Result<Self> {
        self.require_v1("ledger bounds")?;
        self.preconditions.ledger_bounds = Some(LedgerBounds::new(min_ledger, max_ledger)?);
        Ok(self)
    }

    pub fn set_min_sequence_number(mut self, min_sequence_number: i64) -> Result<Self> {
        self.require_v1("a minimum sequence number")?;
        self.preconditions.min_sequence_number = Some(min_sequence_number);
        Ok(self)
    }

    /// Minimum seconds since the source account's sequence number last changed.
    pub fn set_min_sequence_age(mut self, seconds: u64) -> Result<Self> {
        self.require_v1("a minimum sequence age")?;
        self.preconditions.min_sequence_age = Some(seconds);
        Ok(self)
    }

    pub fn set_min_sequence_ledger_gap(mut self, gap: u32) -> Result<Self> {
        self.require_v1("a minimum sequence ledger gap")?;
        self.preconditions.min_sequence_ledger_gap = Some(gap);
        Ok(self)
    }

    pub fn add_extra_signer(mut self, signer: SignerKey) -> Result<Self> {
        self.require_v1("an extra signer")?;
        if self.preconditions.extra_signers.len() >= MAX_EXTRA_SIGNERS {
            return Err(TxAsmError::PreconditionConflict(format!(
                "at most {MAX_EXTRA_SIGNERS} extra signers are allowed"
            )));
        }
        self.preconditions.extra_signers.push(signer);
        Ok(self)
    }

    /// Replaces all preconditions at once.
    pub fn set_preconditions(mut self, preconditions: Preconditions) -> Result<Self> {
        preconditions.validate()?;
        if preconditions.requires_v2() {
            self.require_v1("v2 preconditions")?;
        }
        self.preconditions = preconditions;
        Ok(self)
    }

    pub fn set_soroban_data(mut self, data: xdr::SorobanTransactionData) -> Result<Self> {
        self.require_v1("Soroban data")?;
        self.soroban_data = Some(data);
        Ok(self)
    }

    /// Appends a prebuilt operation.
    pub fn add_operation(mut self, op: Operation) -> Result<Self> {
        if self.operations.len() >= xdr::MAX_OPS_PER_TX as usize {
            return Err(TxAsmError::InvalidTransaction(format!(
                "at most {} operations are allowed",
                xdr::MAX_OPS_PER_TX
            )));
        }
        if !self.operations.is_empty() && (op.is_soroban() || self.operations.iter().any(Operation::is_soroban)) {
            return Err(TxAsmError::InvalidTransaction(
                "a Soroban operation must be the only operation in its transaction".into(),
            ));
        }
        trace!(op = ?op.operation_type(), index = self.operations.len(), "appended operation");
        self.operations.push(op);
        Ok(self)
    }

    pub fn clear_operations(mut self) -> Self {
        self.operations.clear();
        self
    }

    fn append(self, op: Result<Operation>, source: Option<&str>) -> Result<Self> {
        let op = match source {
            Some(source) => op?.with_source(source)?,
            None => op?,
        };
        self.add_operation(op)
    }

    pub fn append_create_account_op(
        self,
        destination: &str,
        starting_balance: &str,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::create_account(destination, starting_balance), source)
    }

    pub fn append_payment_op(
        self,
        destination: &str,
        asset: Asset,
        amount: &str,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::payment(destination, asset, amount), source)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn append_path_payment_strict_receive_op(
        self,
        send_asset: Asset,
        send_max: &str,
        destination: &str,
        dest_asset: Asset,
        dest_amount: &str,
        path: Vec<Asset>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(
            Operation::path_payment_strict_receive(send_asset, send_max, destination, dest_asset, dest_amount, path),
            source,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn append_path_payment_strict_send_op(
        self,
        send_asset: Asset,
        send_amount: &str,
        destination: &str,
        dest_asset: Asset,
        dest_min: &str,
        path: Vec<Asset>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(
            Operation::path_payment_strict_send(send_asset, send_amount, destination, dest_asset, dest_min, path),
            source,
        )
    }

    pub fn append_manage_sell_offer_op(
        self,
        selling: Asset,
        buying: Asset,
        amount: &str,
        price: Price,
        offer_id: i64,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::manage_sell_offer(selling, buying, amount, price, offer_id), source)
    }

    pub fn append_manage_buy_offer_op(
        self,
        selling: Asset,
        buying: Asset,
        buy_amount: &str,
        price: Price,
        offer_id: i64,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::manage_buy_offer(selling, buying, buy_amount, price, offer_id), source)
    }

    pub fn append_create_passive_sell_offer_op(
        self,
        selling: Asset,
        buying: Asset,
        amount: &str,
        price: Price,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::create_passive_sell_offer(selling, buying, amount, price), source)
    }

    pub fn append_set_options_op(self, options: SetOptions, source: Option<&str>) -> Result<Self> {
        self.append(Operation::set_options(options), source)
    }

    pub fn append_change_trust_op(
        self,
        asset: impl Into<ChangeTrustAsset>,
        limit: Option<&str>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::change_trust(asset, limit), source)
    }

    pub fn append_allow_trust_op(
        self,
        trustor: &str,
        asset_code: &str,
        authorize: u32,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::allow_trust(trustor, asset_code, authorize), source)
    }

    pub fn append_account_merge_op(self, destination: &str, source: Option<&str>) -> Result<Self> {
        self.append(Operation::account_merge(destination), source)
    }

    pub fn append_inflation_op(self, source: Option<&str>) -> Result<Self> {
        self.append(Ok(Operation::inflation()), source)
    }

    pub fn append_manage_data_op(
        self,
        data_name: &str,
        data_value: Option<&[u8]>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::manage_data(data_name, data_value), source)
    }

    pub fn append_bump_sequence_op(self, bump_to: i64, source: Option<&str>) -> Result<Self> {
        self.append(Operation::bump_sequence(bump_to), source)
    }

    pub fn append_create_claimable_balance_op(
        self,
        asset: Asset,
        amount: &str,
        claimants: Vec<Claimant>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::create_claimable_balance(asset, amount, claimants), source)
    }

    pub fn append_claim_claimable_balance_op(self, balance_id: &str, source: Option<&str>) -> Result<Self> {
        self.append(Operation::claim_claimable_balance(balance_id), source)
    }

    pub fn append_begin_sponsoring_future_reserves_op(
        self,
        sponsored_id: &str,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::begin_sponsoring_future_reserves(sponsored_id), source)
    }

    pub fn append_end_sponsoring_future_reserves_op(self, source: Option<&str>) -> Result<Self> {
        self.append(Ok(Operation::end_sponsoring_future_reserves()), source)
    }

    pub fn append_revoke_account_sponsorship_op(self, account_id: &str, source: Option<&str>) -> Result<Self> {
        self.append(Operation::revoke_account_sponsorship(account_id), source)
    }

    pub fn append_revoke_trustline_sponsorship_op(
        self,
        account_id: &str,
        asset: impl Into<TrustLineAsset>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::revoke_trustline_sponsorship(account_id, asset), source)
    }

    pub fn append_revoke_offer_sponsorship_op(
        self,
        seller_id: &str,
        offer_id: i64,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::revoke_offer_sponsorship(seller_id, offer_id), source)
    }

    pub fn append_revoke_data_sponsorship_op(
        self,
        account_id: &str,
        data_name: &str,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::revoke_data_sponsorship(account_id, data_name), source)
    }

    pub fn append_revoke_claimable_balance_sponsorship_op(
        self,
        balance_id: &str,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::revoke_claimable_balance_sponsorship(balance_id), source)
    }

    pub fn append_revoke_liquidity_pool_sponsorship_op(
        self,
        liquidity_pool_id: LiquidityPoolId,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Ok(Operation::revoke_liquidity_pool_sponsorship(liquidity_pool_id)), source)
    }

    pub fn append_revoke_signer_sponsorship_op(
        self,
        account_id: &str,
        signer_key: SignerKey,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::revoke_signer_sponsorship(account_id, signer_key), source)
    }

    pub fn append_clawback_op(self, asset: Asset, from: &str, amount: &str, source: Option<&str>) -> Result<Self> {
        self.append(Operation::clawback(asset, from, amount), source)
    }

    pub fn append_clawback_claimable_balance_op(self, balance_id: &str, source: Option<&str>) -> Result<Self> {
        self.append(Operation::clawback_claimable_balance(balance_id), source)
    }

    pub fn append_set_trust_line_flags_op(
        self,
        trustor: &str,
        asset: Asset,
        clear_flags: u32,
        set_flags: u32,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::set_trust_line_flags(trustor, asset, clear_flags, set_flags), source)
    }

    pub fn append_liquidity_pool_deposit_op(
        self,
        liquidity_pool_id: LiquidityPoolId,
        max_amount_a: &str,
        max_amount_b: &str,
        min_price: Price,
        max_price: Price,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(
            Operation::liquidity_pool_deposit(liquidity_pool_id, max_amount_a, max_amount_b, min_price, max_price),
            source,
        )
    }

    pub fn append_liquidity_pool_withdraw_op(
        self,
        liquidity_pool_id: LiquidityPoolId,
        amount: &str,
        min_amount_a: &str,
        min_amount_b: &str,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(
            Operation::liquidity_pool_withdraw(liquidity_pool_id, amount, min_amount_a, min_amount_b),
            source,
        )
    }

    pub fn append_invoke_host_function_op(
        self,
        host_function: xdr::HostFunction,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Ok(Operation::invoke_host_function(host_function, auth)), source)
    }

    pub fn append_invoke_contract_function_op(
        self,
        contract_id: &str,
        function_name: &str,
        parameters: Vec<xdr::ScVal>,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(
            Operation::invoke_contract_function(contract_id, function_name, parameters, auth),
            source,
        )
    }

    pub fn append_upload_contract_wasm_op(
        self,
        wasm: &[u8],
        auth: Vec<xdr::SorobanAuthorizationEntry>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::upload_contract_wasm(wasm, auth), source)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn append_create_contract_op(
        self,
        deployer: &str,
        wasm_id: xdr::Hash,
        salt: Option<[u8; 32]>,
        constructor_args: Option<Vec<xdr::ScVal>>,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(
            Operation::create_contract(deployer, wasm_id, salt, constructor_args, auth),
            source,
        )
    }

    pub fn append_create_stellar_asset_contract_from_asset_op(
        self,
        asset: &Asset,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(Operation::create_stellar_asset_contract_from_asset(asset, auth), source)
    }

    pub fn append_create_stellar_asset_contract_from_address_op(
        self,
        address: &str,
        salt: Option<[u8; 32]>,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
        source: Option<&str>,
    ) -> Result<Self> {
        self.append(
            Operation::create_stellar_asset_contract_from_address(address, salt, auth),
            source,
        )
    }

    pub fn append_extend_footprint_ttl_op(self, extend_to: u32, source: Option<&str>) -> Result<Self> {
        self.append(Ok(Operation::extend_footprint_ttl(extend_to)), source)
    }

    pub fn append_restore_footprint_op(self, source: Option<&str>) -> Result<Self> {
        self.append(Ok(Operation::restore_footprint()), source)
    }

    /// Freezes the builder into a transaction with sequence number
    /// `account.sequence + 1`, then advances the account to that number.
    pub fn build(&mut self) -> Result<Transaction> {
        if self.operations.is_empty() {
            return Err(TxAsmError::InvalidTransaction(
                "a transaction needs at least one operation".into(),
            ));
        }
        let resource_fee = self.soroban_data.as_ref().map_or(0, |data| data.resource_fee);
        let fee = self.fee.transaction_fee(self.operations.len(), resource_fee)?;
        let sequence = self.source.next_sequence()?;

        let tx = Transaction::new(
            self.source.account,
            fee,
            sequence,
            self.preconditions.clone(),
            self.memo.clone(),
            self.operations.clone(),
            self.soroban_data.clone(),
            self.version,
        )?;
        self.source.sequence = sequence;

        debug!(
            source = %self.source.account,
            sequence,
            fee,
            operations = tx.operations().len(),
            "built transaction"
        );
        Ok(tx)
    }

    /// [`build`](Self::build), wrapped in an unsigned envelope for this builder's network.
    pub fn build_envelope(&mut self) -> Result<TransactionEnvelope> {
        Ok(TransactionEnvelope::new(self.build()?, self.network.clone()))
    }

    /// Wraps a signed transaction in a fee bump paid by `fee_source`.
    ///
    /// `base_fee` must be at least the network minimum and at least the inner
    /// transaction's per-operation rate. A v0 inner transaction is converted
    /// to v1; its signatures stay valid because both shapes hash alike.
    pub fn build_fee_bump_transaction(
        fee_source: &str,
        base_fee: u32,
        inner: &TransactionEnvelope,
        network: &Network,
    ) -> Result<FeeBumpTransactionEnvelope> {
        if inner.network() != network {
            return Err(TxAsmError::InvalidTransaction(format!(
                "inner transaction is bound to `{}`, not `{}`",
                inner.network().passphrase(),
                network.passphrase()
            )));
        }
        let fee_source = MuxedAccount::from_account(fee_source)?;
        let fee = fee_calculator::fee_bump_fee(base_fee, inner.transaction())?;
        let bump = FeeBumpTransaction::new(
            fee_source,
            fee,
            inner.transaction().clone(),
            inner.signatures().to_vec(),
        );
        debug!(
            fee_source = %fee_source,
            fee,
            inner_signatures = inner.signatures().len(),
            "built fee bump transaction"
        );
        Ok(FeeBumpTransactionEnvelope::new(bump, network.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soroban_data::SorobanDataBuilder;

    const SOURCE: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";
    const DESTINATION: &str = "GDQERENWDDSQZS7R7WKHZI3BSOYMV3FSWR7TFUYFTKQ447PIX6NREOJM";
    const MUXED: &str = "MAQAA5L65LSYH7CQ3VTJ7F3HHLGCL3DSLAR2Y47263D56MNNGHSQSAAAAAAAAAAE2LP26";

    fn builder(sequence: i64) -> TransactionBuilder {
        TransactionBuilder::new(Account::new(SOURCE, sequence).unwrap(), 100, Network::testnet())
    }

    #[test]
    fn test_build_increments_sequence() {
        let mut builder = builder(46)
            .append_payment_op(DESTINATION, Asset::native(), "1", None)
            .unwrap();
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.sequence(), 47);
        assert_eq!(second.sequence(), 48);
        assert_eq!(builder.account().sequence_number(), 48);
    }

    #[test]
    fn test_fee_scales_with_operations() {
        let mut builder = builder(0)
            .append_payment_op(DESTINATION, Asset::native(), "1", None)
            .unwrap()
            .append_bump_sequence_op(10, Some(MUXED))
            .unwrap()
            .append_inflation_op(None)
            .unwrap();
        let tx = builder.build().unwrap();
        assert_eq!(tx.fee(), 300);
        assert!(tx.operations()[1].source.unwrap().is_muxed());
    }

    #[test]
    fn test_zero_operations_fails() {
        assert!(matches!(
            builder(0).build(),
            Err(TxAsmError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_fail_fast_append() {
        let result = builder(0).append_payment_op("GBAD", Asset::native(), "1", None);
        assert!(result.is_err());
        let result = builder(0).append_payment_op(DESTINATION, Asset::native(), "1", Some("nope"));
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_conflicts_with_time_bounds() {
        let builder = builder(0).add_time_bounds(10, 20).unwrap();
        assert!(matches!(
            builder.clone().set_timeout(30),
            Err(TxAsmError::PreconditionConflict(_))
        ));
        assert!(builder.add_time_bounds(1, 2).is_err());
    }

    #[test]
    fn test_timeout_sets_max_time() {
        let mut builder = builder(0)
            .set_timeout(60)
            .unwrap()
            .append_inflation_op(None)
            .unwrap();
        let tx = builder.build().unwrap();
        let bounds = tx.time_bounds().unwrap();
        assert_eq!(bounds.min_time, 0);
        assert!(bounds.max_time > 60);

        let mut infinite = self::builder(0)
            .set_timeout(TIMEOUT_INFINITE)
            .unwrap()
            .append_inflation_op(None)
            .unwrap();
        assert_eq!(infinite.build().unwrap().time_bounds().unwrap().max_time, 0);
    }

    #[test]
    fn test_precondition_shapes() {
        let mut timed = builder(0).add_time_bounds(0, 100).unwrap().append_inflation_op(None).unwrap();
        assert!(matches!(
            timed.build().unwrap().preconditions().to_xdr().unwrap(),
            xdr::Preconditions::Time(_)
        ));

        let mut v2 = builder(0)
            .set_ledger_bounds(5, 10)
            .unwrap()
            .set_min_sequence_age(0)
            .unwrap()
            .append_inflation_op(None)
            .unwrap();
        assert!(matches!(
            v2.build().unwrap().preconditions().to_xdr().unwrap(),
            xdr::Preconditions::V2(_)
        ));
    }

    #[test]
    fn test_extra_signer_limit() {
        let builder = builder(0)
            .add_extra_signer(SignerKey::sha256_hash([1u8; 32]))
            .unwrap()
            .add_extra_signer(SignerKey::sha256_hash([2u8; 32]))
            .unwrap();
        assert!(matches!(
            builder.add_extra_signer(SignerKey::sha256_hash([3u8; 32])),
            Err(TxAsmError::PreconditionConflict(_))
        ));
    }

    #[test]
    fn test_v0_conflicts() {
        let v0 = builder(0).set_v1(false).unwrap();
        assert!(matches!(
            v0.clone().set_ledger_bounds(1, 2),
            Err(TxAsmError::PreconditionConflict(_))
        ));
        assert!(v0.set_soroban_data(SorobanDataBuilder::new().build().unwrap()).is_err());

        let v2 = builder(0).set_min_sequence_number(5).unwrap();
        assert!(v2.set_v1(false).is_err());

        let muxed = TransactionBuilder::new(Account::new(MUXED, 1).unwrap(), 100, Network::testnet());
        assert!(muxed.set_v1(false).is_err());
    }

    #[test]
    fn test_soroban_resource_fee_added() {
        let data = SorobanDataBuilder::new().set_resource_fee(5_000).build().unwrap();
        let mut builder = builder(0)
            .append_extend_footprint_ttl_op(1_000, None)
            .unwrap()
            .set_soroban_data(data)
            .unwrap();
        let tx = builder.build().unwrap();
        assert_eq!(tx.fee(), 5_100);
        assert!(tx.is_soroban_transaction());
    }

    #[test]
    fn test_soroban_op_must_be_alone() {
        let builder = builder(0).append_inflation_op(None).unwrap();
        assert!(builder.append_restore_footprint_op(None).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = BuilderConfig {
            base_fee: 300,
            timeout_secs: Some(30),
            ..BuilderConfig::default()
        };
        let mut builder = TransactionBuilder::from_config(Account::new(SOURCE, 0).unwrap(), &config)
            .unwrap()
            .append_inflation_op(None)
            .unwrap();
        let tx = builder.build().unwrap();
        assert_eq!(tx.fee(), 300);
        assert!(tx.time_bounds().is_some());
    }

    #[test]
    fn test_fee_bump_network_mismatch() {
        let mut builder = builder(0).append_inflation_op(None).unwrap();
        let envelope = builder.build_envelope().unwrap();
        let result =
            TransactionBuilder::build_fee_bump_transaction(DESTINATION, 200, &envelope, &Network::public());
        assert!(matches!(result, Err(TxAsmError::InvalidTransaction(_))));
    }
}
