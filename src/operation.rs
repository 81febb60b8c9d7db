//! Operations
//!
//! [`Operation`] pairs an optional source account with an [`OperationBody`].
//! Constructors validate their arguments immediately, so an `Operation` that
//! exists always encodes. Amounts are held as [`Amount`] and only become
//! stroop counts in the XDR form.

use crate::address::Address;
use crate::amount::Amount;
use crate::asset::{Asset, ChangeTrustAsset, LiquidityPoolId, TrustLineAsset};
use crate::claim_predicate::{ClaimableBalanceId, Claimant};
use crate::error::{Result, TxAsmError};
use crate::muxed_account::MuxedAccount;
use crate::price::Price;
use crate::serialization::{VarArray, VarOpaque, XdrString};
use crate::signer_key::{Signer, SignerKey};
use crate::strkey;
use crate::xdr;

/// Longest path a path payment may route through.
pub const MAX_PATH_LEN: usize = 5;
/// Most claimants a claimable balance may have.
pub const MAX_CLAIMANTS: usize = 10;
pub const MAX_DATA_NAME_LEN: usize = 64;
pub const MAX_DATA_VALUE_LEN: usize = 64;
pub const MAX_HOME_DOMAIN_LEN: usize = 32;

/// Account flags settable through `SetOptions`.
pub mod account_flags {
    pub const AUTH_REQUIRED: u32 = 0x1;
    pub const AUTH_REVOCABLE: u32 = 0x2;
    pub const AUTH_IMMUTABLE: u32 = 0x4;
    pub const AUTH_CLAWBACK_ENABLED: u32 = 0x8;
}

/// Trust line flags used by `AllowTrust` and `SetTrustLineFlags`.
pub mod trust_line_flags {
    pub const AUTHORIZED: u32 = 0x1;
    pub const AUTHORIZED_TO_MAINTAIN_LIABILITIES: u32 = 0x2;
    pub const TRUSTLINE_CLAWBACK_ENABLED: u32 = 0x4;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetOptions {
    pub inflation_dest: Option<String>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<String>,
    pub signer: Option<Signer>,
}

impl SetOptions {
    fn validate(&self) -> Result<()> {
        if let Some(dest) = &self.inflation_dest {
            strkey::decode_account_id(dest)?;
        }
        let weights = [
            ("master_weight", self.master_weight),
            ("low_threshold", self.low_threshold),
            ("med_threshold", self.med_threshold),
            ("high_threshold", self.high_threshold),
        ];
        for (name, value) in weights {
            if let Some(value) = value.filter(|v| *v > 255) {
                return Err(TxAsmError::invalid_argument(name, format!("{value} exceeds 255")));
            }
        }
        if let Some(domain) = self.home_domain.as_ref().filter(|d| d.len() > MAX_HOME_DOMAIN_LEN) {
            return Err(TxAsmError::invalid_argument(
                "home_domain",
                format!("{} bytes exceeds {MAX_HOME_DOMAIN_LEN}", domain.len()),
            ));
        }
        Ok(())
    }
}

/// The ledger entry or signer whose sponsorship is revoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevokeSponsorship {
    Account { account_id: String },
    TrustLine { account_id: String, asset: TrustLineAsset },
    Offer { seller_id: String, offer_id: i64 },
    Data { account_id: String, data_name: String },
    ClaimableBalance { balance_id: ClaimableBalanceId },
    LiquidityPool { liquidity_pool_id: LiquidityPoolId },
    Signer { account_id: String, signer_key: SignerKey },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationBody {
    CreateAccount {
        destination: String,
        starting_balance: Amount,
    },
    Payment {
        destination: MuxedAccount,
        asset: Asset,
        amount: Amount,
    },
    PathPaymentStrictReceive {
        send_asset: Asset,
        send_max: Amount,
        destination: MuxedAccount,
        dest_asset: Asset,
        dest_amount: Amount,
        path: Vec<Asset>,
    },
    ManageSellOffer {
        selling: Asset,
        buying: Asset,
        amount: Amount,
        price: Price,
        offer_id: i64,
    },
    CreatePassiveSellOffer {
        selling: Asset,
        buying: Asset,
        amount: Amount,
        price: Price,
    },
    SetOptions(SetOptions),
    ChangeTrust {
        asset: ChangeTrustAsset,
        limit: Amount,
    },
    AllowTrust {
        trustor: String,
        asset_code: String,
        authorize: u32,
    },
    AccountMerge {
        destination: MuxedAccount,
    },
    Inflation,
    ManageData {
        data_name: String,
        data_value: Option<Vec<u8>>,
    },
    BumpSequence {
        bump_to: i64,
    },
    ManageBuyOffer {
        selling: Asset,
        buying: Asset,
        buy_amount: Amount,
        price: Price,
        offer_id: i64,
    },
    PathPaymentStrictSend {
        send_asset: Asset,
        send_amount: Amount,
        destination: MuxedAccount,
        dest_asset: Asset,
        dest_min: Amount,
        path: Vec<Asset>,
    },
    CreateClaimableBalance {
        asset: Asset,
        amount: Amount,
        claimants: Vec<Claimant>,
    },
    ClaimClaimableBalance {
        balance_id: ClaimableBalanceId,
    },
    BeginSponsoringFutureReserves {
        sponsored_id: String,
    },
    EndSponsoringFutureReserves,
    RevokeSponsorship(RevokeSponsorship),
    Clawback {
        asset: Asset,
        from: MuxedAccount,
        amount: Amount,
    },
    ClawbackClaimableBalance {
        balance_id: ClaimableBalanceId,
    },
    SetTrustLineFlags {
        trustor: String,
        asset: Asset,
        clear_flags: u32,
        set_flags: u32,
    },
    LiquidityPoolDeposit {
        liquidity_pool_id: LiquidityPoolId,
        max_amount_a: Amount,
        max_amount_b: Amount,
        min_price: Price,
        max_price: Price,
    },
    LiquidityPoolWithdraw {
        liquidity_pool_id: LiquidityPoolId,
        amount: Amount,
        min_amount_a: Amount,
        min_amount_b: Amount,
    },
    InvokeHostFunction {
        host_function: xdr::HostFunction,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
    },
    ExtendFootprintTtl {
        extend_to: u32,
    },
    RestoreFootprint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Overrides the transaction source for this operation.
    pub source: Option<MuxedAccount>,
    pub body: OperationBody,
}

fn account(name: &'static str, account_id: &str) -> Result<String> {
    strkey::decode_account_id(account_id).map_err(|e| TxAsmError::invalid_argument(name, e.to_string()))?;
    Ok(account_id.to_string())
}

fn muxed(name: &'static str, account: &str) -> Result<MuxedAccount> {
    MuxedAccount::from_account(account).map_err(|e| TxAsmError::invalid_argument(name, e.to_string()))
}

fn positive(name: &'static str, amount: &str) -> Result<Amount> {
    let amount = Amount::new(amount)?;
    if amount == Amount::ZERO {
        return Err(TxAsmError::invalid_argument(name, "must be greater than zero"));
    }
    Ok(amount)
}

fn non_negative_offer_id(offer_id: i64) -> Result<i64> {
    if offer_id < 0 {
        return Err(TxAsmError::invalid_argument("offer_id", format!("{offer_id} is negative")));
    }
    Ok(offer_id)
}

fn check_path(path: &[Asset]) -> Result<()> {
    if path.len() > MAX_PATH_LEN {
        return Err(TxAsmError::invalid_argument(
            "path",
            format!("{} assets exceeds {MAX_PATH_LEN}", path.len()),
        ));
    }
    Ok(())
}

fn account_key(account_id: &str) -> Result<xdr::AccountId> {
    Ok(xdr::PublicKey::Ed25519(strkey::decode_account_id(account_id)?))
}

fn account_string(key: &xdr::AccountId) -> String {
    strkey::encode_account_id(key.as_bytes())
}

fn stroops(amount: i64) -> Amount {
    Amount::from_wire(amount)
}

fn assets_to_xdr(assets: &[Asset]) -> Result<VarArray<xdr::Asset, 5>> {
    VarArray::new(assets.iter().map(Asset::to_xdr_asset).collect::<Result<Vec<_>>>()?)
}

fn assets_from_xdr(assets: &VarArray<xdr::Asset, 5>) -> Result<Vec<Asset>> {
    assets.iter().map(Asset::from_xdr_asset).collect()
}

fn asset_code_string(code: &xdr::AssetCode) -> Result<String> {
    let issuer = xdr::PublicKey::Ed25519([0u8; 32]);
    let asset = match code {
        xdr::AssetCode::CreditAlphanum4(code) => xdr::Asset::CreditAlphanum4(xdr::AlphaNum4 {
            asset_code: *code,
            issuer,
        }),
        xdr::AssetCode::CreditAlphanum12(code) => xdr::Asset::CreditAlphanum12(xdr::AlphaNum12 {
            asset_code: *code,
            issuer,
        }),
    };
    Ok(Asset::from_xdr_asset(&asset)?.code().to_string())
}

impl Operation {
    fn new(body: OperationBody) -> Self {
        Self { source: None, body }
    }

    /// Sets the operation source, a `G...` or `M...` account.
    pub fn with_source(mut self, source: &str) -> Result<Self> {
        self.source = Some(muxed("source", source)?);
        Ok(self)
    }

    pub fn operation_type(&self) -> xdr::OperationType {
        use xdr::OperationType as T;
        use OperationBody as B;
        match &self.body {
            B::CreateAccount { .. } => T::CreateAccount,
            B::Payment { .. } => T::Payment,
            B::PathPaymentStrictReceive { .. } => T::PathPaymentStrictReceive,
            B::ManageSellOffer { .. } => T::ManageSellOffer,
            B::CreatePassiveSellOffer { .. } => T::CreatePassiveSellOffer,
            B::SetOptions(_) => T::SetOptions,
            B::ChangeTrust { .. } => T::ChangeTrust,
            B::AllowTrust { .. } => T::AllowTrust,
            B::AccountMerge { .. } => T::AccountMerge,
            B::Inflation => T::Inflation,
            B::ManageData { .. } => T::ManageData,
            B::BumpSequence { .. } => T::BumpSequence,
            B::ManageBuyOffer { .. } => T::ManageBuyOffer,
            B::PathPaymentStrictSend { .. } => T::PathPaymentStrictSend,
            B::CreateClaimableBalance { .. } => T::CreateClaimableBalance,
            B::ClaimClaimableBalance { .. } => T::ClaimClaimableBalance,
            B::BeginSponsoringFutureReserves { .. } => T::BeginSponsoringFutureReserves,
            B::EndSponsoringFutureReserves => T::EndSponsoringFutureReserves,
            B::RevokeSponsorship(_) => T::RevokeSponsorship,
            B::Clawback { .. } => T::Clawback,
            B::ClawbackClaimableBalance { .. } => T::ClawbackClaimableBalance,
            B::SetTrustLineFlags { .. } => T::SetTrustLineFlags,
            B::LiquidityPoolDeposit { .. } => T::LiquidityPoolDeposit,
            B::LiquidityPoolWithdraw { .. } => T::LiquidityPoolWithdraw,
            B::InvokeHostFunction { .. } => T::InvokeHostFunction,
            B::ExtendFootprintTtl { .. } => T::ExtendFootprintTtl,
            B::RestoreFootprint => T::RestoreFootprint,
        }
    }

    /// Soroban operations must be the only operation in their transaction.
    pub fn is_soroban(&self) -> bool {
        matches!(
            self.body,
            OperationBody::InvokeHostFunction { .. }
                | OperationBody::ExtendFootprintTtl { .. }
                | OperationBody::RestoreFootprint
        )
    }

    pub fn create_account(destination: &str, starting_balance: &str) -> Result<Self> {
        Ok(Self::new(OperationBody::CreateAccount {
            destination: account("destination", destination)?,
            starting_balance: Amount::new(starting_balance)?,
        }))
    }

    pub fn payment(destination: &str, asset: Asset, amount: &str) -> Result<Self> {
        Ok(Self::new(OperationBody::Payment {
            destination: muxed("destination", destination)?,
            asset,
            amount: positive("amount", amount)?,
        }))
    }

    pub fn path_payment_strict_receive(
        send_asset: Asset,
        send_max: &str,
        destination: &str,
        dest_asset: Asset,
        dest_amount: &str,
        path: Vec<Asset>,
    ) -> Result<Self> {
        check_path(&path)?;
        Ok(Self::new(OperationBody::PathPaymentStrictReceive {
            send_asset,
            send_max: positive("send_max", send_max)?,
            destination: muxed("destination", destination)?,
            dest_asset,
            dest_amount: positive("dest_amount", dest_amount)?,
            path,
        }))
    }

    pub fn path_payment_strict_send(
        send_asset: Asset,
        send_amount: &str,
        destination: &str,
        dest_asset: Asset,
        dest_min: &str,
        path: Vec<Asset>,
    ) -> Result<Self> {
        check_path(&path)?;
        Ok(Self::new(OperationBody::PathPaymentStrictSend {
            send_asset,
            send_amount: positive("send_amount", send_amount)?,
            destination: muxed("destination", destination)?,
            dest_asset,
            dest_min: positive("dest_min", dest_min)?,
            path,
        }))
    }

    /// An amount of zero deletes the offer.
    pub fn manage_sell_offer(
        selling: Asset,
        buying: Asset,
        amount: &str,
        price: Price,
        offer_id: i64,
    ) -> Result<Self> {
        Ok(Self::new(OperationBody::ManageSellOffer {
            selling,
            buying,
            amount: Amount::new(amount)?,
            price,
            offer_id: non_negative_offer_id(offer_id)?,
        }))
    }

    pub fn manage_buy_offer(
        selling: Asset,
        buying: Asset,
        buy_amount: &str,
        price: Price,
        offer_id: i64,
    ) -> Result<Self> {
        Ok(Self::new(OperationBody::ManageBuyOffer {
            selling,
            buying,
            buy_amount: Amount::new(buy_amount)?,
            price,
            offer_id: non_negative_offer_id(offer_id)?,
        }))
    }

    pub fn create_passive_sell_offer(selling: Asset, buying: Asset, amount: &str, price: Price) -> Result<Self> {
        Ok(Self::new(OperationBody::CreatePassiveSellOffer {
            selling,
            buying,
            amount: positive("amount", amount)?,
            price,
        }))
    }

    pub fn set_options(options: SetOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::new(OperationBody::SetOptions(options)))
    }

    /// `limit` defaults to the maximum amount. A limit of zero removes the trust line.
    pub fn change_trust(asset: impl Into<ChangeTrustAsset>, limit: Option<&str>) -> Result<Self> {
        let limit = match limit {
            Some(limit) => Amount::new(limit)?,
            None => Amount::MAX,
        };
        Ok(Self::new(OperationBody::ChangeTrust {
            asset: asset.into(),
            limit,
        }))
    }

    pub fn allow_trust(trustor: &str, asset_code: &str, authorize: u32) -> Result<Self> {
        // Validates the code with a throwaway issuer; only the code is kept.
        Asset::new(asset_code, &strkey::encode_account_id(&[0u8; 32]))?;
        if authorize > trust_line_flags::AUTHORIZED_TO_MAINTAIN_LIABILITIES {
            return Err(TxAsmError::invalid_argument("authorize", format!("{authorize} is not 0, 1 or 2")));
        }
        Ok(Self::new(OperationBody::AllowTrust {
            trustor: account("trustor", trustor)?,
            asset_code: asset_code.to_string(),
            authorize,
        }))
    }

    pub fn account_merge(destination: &str) -> Result<Self> {
        Ok(Self::new(OperationBody::AccountMerge {
            destination: muxed("destination", destination)?,
        }))
    }

    pub fn inflation() -> Self {
        Self::new(OperationBody::Inflation)
    }

    /// A `None` value deletes the entry.
    pub fn manage_data(data_name: &str, data_value: Option<&[u8]>) -> Result<Self> {
        if data_name.is_empty() || data_name.len() > MAX_DATA_NAME_LEN {
            return Err(TxAsmError::invalid_argument(
                "data_name",
                format!("must be 1-{MAX_DATA_NAME_LEN} bytes, got {}", data_name.len()),
            ));
        }
        if let Some(value) = data_value.filter(|v| v.len() > MAX_DATA_VALUE_LEN) {
            return Err(TxAsmError::invalid_argument(
                "data_value",
                format!("{} bytes exceeds {MAX_DATA_VALUE_LEN}", value.len()),
            ));
        }
        Ok(Self::new(OperationBody::ManageData {
            data_name: data_name.to_string(),
            data_value: data_value.map(<[u8]>::to_vec),
        }))
    }

    pub fn bump_sequence(bump_to: i64) -> Result<Self> {
        if bump_to < 0 {
            return Err(TxAsmError::invalid_argument("bump_to", format!("{bump_to} is negative")));
        }
        Ok(Self::new(OperationBody::BumpSequence { bump_to }))
    }

    pub fn create_claimable_balance(asset: Asset, amount: &str, claimants: Vec<Claimant>) -> Result<Self> {
        if claimants.is_empty() || claimants.len() > MAX_CLAIMANTS {
            return Err(TxAsmError::invalid_argument(
                "claimants",
                format!("must have 1-{MAX_CLAIMANTS} claimants, got {}", claimants.len()),
            ));
        }
        Ok(Self::new(OperationBody::CreateClaimableBalance {
            asset,
            amount: positive("amount", amount)?,
            claimants,
        }))
    }

    /// `balance_id` is the hex XDR form or a `B...` StrKey.
    pub fn claim_claimable_balance(balance_id: &str) -> Result<Self> {
        Ok(Self::new(OperationBody::ClaimClaimableBalance {
            balance_id: balance_id.parse()?,
        }))
    }

    pub fn begin_sponsoring_future_reserves(sponsored_id: &str) -> Result<Self> {
        Ok(Self::new(OperationBody::BeginSponsoringFutureReserves {
            sponsored_id: account("sponsored_id", sponsored_id)?,
        }))
    }

    pub fn end_sponsoring_future_reserves() -> Self {
        Self::new(OperationBody::EndSponsoringFutureReserves)
    }

    pub fn revoke_account_sponsorship(account_id: &str) -> Result<Self> {
        Ok(Self::revoke(RevokeSponsorship::Account {
            account_id: account("account_id", account_id)?,
        }))
    }

    pub fn revoke_trustline_sponsorship(account_id: &str, asset: impl Into<TrustLineAsset>) -> Result<Self> {
        Ok(Self::revoke(RevokeSponsorship::TrustLine {
            account_id: account("account_id", account_id)?,
            asset: asset.into(),
        }))
    }

    pub fn revoke_offer_sponsorship(seller_id: &str, offer_id: i64) -> Result<Self> {
        Ok(Self::revoke(RevokeSponsorship::Offer {
            seller_id: account("seller_id", seller_id)?,
            offer_id: non_negative_offer_id(offer_id)?,
        }))
    }

    pub fn revoke_data_sponsorship(account_id: &str, data_name: &str) -> Result<Self> {
        if data_name.is_empty() || data_name.len() > MAX_DATA_NAME_LEN {
            return Err(TxAsmError::invalid_argument(
                "data_name",
                format!("must be 1-{MAX_DATA_NAME_LEN} bytes, got {}", data_name.len()),
            ));
        }
        Ok(Self::revoke(RevokeSponsorship::Data {
            account_id: account("account_id", account_id)?,
            data_name: data_name.to_string(),
        }))
    }

    pub fn revoke_claimable_balance_sponsorship(balance_id: &str) -> Result<Self> {
        Ok(Self::revoke(RevokeSponsorship::ClaimableBalance {
            balance_id: balance_id.parse()?,
        }))
    }

    pub fn revoke_liquidity_pool_sponsorship(liquidity_pool_id: LiquidityPoolId) -> Self {
        Self::revoke(RevokeSponsorship::LiquidityPool { liquidity_pool_id })
    }

    pub fn revoke_signer_sponsorship(account_id: &str, signer_key: SignerKey) -> Result<Self> {
        Ok(Self::revoke(RevokeSponsorship::Signer {
            account_id: account("account_id", account_id)?,
            signer_key,
        }))
    }

    fn revoke(revoke: RevokeSponsorship) -> Self {
        Self::new(OperationBody::RevokeSponsorship(revoke))
    }

    pub fn clawback(asset: Asset, from: &str, amount: &str) -> Result<Self> {
        if asset.is_native() {
            return Err(TxAsmError::invalid_argument("asset", "the native asset cannot be clawed back"));
        }
        Ok(Self::new(OperationBody::Clawback {
            asset,
            from: muxed("from", from)?,
            amount: positive("amount", amount)?,
        }))
    }

    pub fn clawback_claimable_balance(balance_id: &str) -> Result<Self> {
        Ok(Self::new(OperationBody::ClawbackClaimableBalance {
            balance_id: balance_id.parse()?,
        }))
    }

    pub fn set_trust_line_flags(trustor: &str, asset: Asset, clear_flags: u32, set_flags: u32) -> Result<Self> {
        Ok(Self::new(OperationBody::SetTrustLineFlags {
            trustor: account("trustor", trustor)?,
            asset,
            clear_flags,
            set_flags,
        }))
    }

    pub fn liquidity_pool_deposit(
        liquidity_pool_id: LiquidityPoolId,
        max_amount_a: &str,
        max_amount_b: &str,
        min_price: Price,
        max_price: Price,
    ) -> Result<Self> {
        Ok(Self::new(OperationBody::LiquidityPoolDeposit {
            liquidity_pool_id,
            max_amount_a: Amount::new(max_amount_a)?,
            max_amount_b: Amount::new(max_amount_b)?,
            min_price,
            max_price,
        }))
    }

    pub fn liquidity_pool_withdraw(
        liquidity_pool_id: LiquidityPoolId,
        amount: &str,
        min_amount_a: &str,
        min_amount_b: &str,
    ) -> Result<Self> {
        Ok(Self::new(OperationBody::LiquidityPoolWithdraw {
            liquidity_pool_id,
            amount: Amount::new(amount)?,
            min_amount_a: Amount::new(min_amount_a)?,
            min_amount_b: Amount::new(min_amount_b)?,
        }))
    }

    pub fn invoke_host_function(
        host_function: xdr::HostFunction,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
    ) -> Self {
        Self::new(OperationBody::InvokeHostFunction { host_function, auth })
    }

    /// Calls `function_name` on the contract `contract_id` (C...).
    pub fn invoke_contract_function(
        contract_id: &str,
        function_name: &str,
        parameters: Vec<xdr::ScVal>,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
    ) -> Result<Self> {
        let contract = strkey::decode_contract(contract_id)?;
        crate::scval::to_symbol(function_name)?;
        let host_function = xdr::HostFunction::InvokeContract(xdr::InvokeContractArgs {
            contract_address: xdr::ScAddress::Contract(contract),
            function_name: XdrString::new(function_name)?,
            args: VarArray::new(parameters)?,
        });
        Ok(Self::invoke_host_function(host_function, auth))
    }

    pub fn upload_contract_wasm(wasm: &[u8], auth: Vec<xdr::SorobanAuthorizationEntry>) -> Result<Self> {
        if wasm.is_empty() {
            return Err(TxAsmError::invalid_argument("wasm", "must not be empty"));
        }
        let host_function = xdr::HostFunction::UploadContractWasm(VarOpaque::new(wasm)?);
        Ok(Self::invoke_host_function(host_function, auth))
    }

    /// Deploys an uploaded wasm. A random salt is used when none is given;
    /// constructor arguments select the v2 host function.
    pub fn create_contract(
        deployer: &str,
        wasm_id: xdr::Hash,
        salt: Option<[u8; 32]>,
        constructor_args: Option<Vec<xdr::ScVal>>,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
    ) -> Result<Self> {
        let deployer = Address::from_string(deployer)?;
        let contract_id_preimage = xdr::ContractIdPreimage::FromAddress(xdr::ContractIdPreimageFromAddress {
            address: deployer.to_sc_address(),
            salt: salt.unwrap_or_else(rand::random),
        });
        let executable = xdr::ContractExecutable::Wasm(wasm_id);
        let host_function = match constructor_args {
            Some(args) => xdr::HostFunction::CreateContractV2(xdr::CreateContractArgsV2 {
                contract_id_preimage,
                executable,
                constructor_args: VarArray::new(args)?,
            }),
            None => xdr::HostFunction::CreateContract(xdr::CreateContractArgs {
                contract_id_preimage,
                executable,
            }),
        };
        Ok(Self::invoke_host_function(host_function, auth))
    }

    /// Deploys the built-in asset contract for a classic asset.
    pub fn create_stellar_asset_contract_from_asset(
        asset: &Asset,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
    ) -> Result<Self> {
        let host_function = xdr::HostFunction::CreateContract(xdr::CreateContractArgs {
            contract_id_preimage: xdr::ContractIdPreimage::FromAsset(asset.to_xdr_asset()?),
            executable: xdr::ContractExecutable::StellarAsset,
        });
        Ok(Self::invoke_host_function(host_function, auth))
    }

    pub fn create_stellar_asset_contract_from_address(
        address: &str,
        salt: Option<[u8; 32]>,
        auth: Vec<xdr::SorobanAuthorizationEntry>,
    ) -> Result<Self> {
        let address = Address::from_string(address)?;
        let host_function = xdr::HostFunction::CreateContract(xdr::CreateContractArgs {
            contract_id_preimage: xdr::ContractIdPreimage::FromAddress(xdr::ContractIdPreimageFromAddress {
                address: address.to_sc_address(),
                salt: salt.unwrap_or_else(rand::random),
            }),
            executable: xdr::ContractExecutable::StellarAsset,
        });
        Ok(Self::invoke_host_function(host_function, auth))
    }

    pub fn extend_footprint_ttl(extend_to: u32) -> Self {
        Self::new(OperationBody::ExtendFootprintTtl { extend_to })
    }

    pub fn restore_footprint() -> Self {
        Self::new(OperationBody::RestoreFootprint)
    }

    pub fn to_xdr(&self) -> Result<xdr::Operation> {
        Ok(xdr::Operation {
            source_account: self.source.as_ref().map(MuxedAccount::to_xdr),
            body: self.body.to_xdr()?,
        })
    }

    pub fn from_xdr(op: &xdr::Operation) -> Result<Self> {
        Ok(Self {
            source: op.source_account.as_ref().map(MuxedAccount::from_xdr),
            body: OperationBody::from_xdr(&op.body)?,
        })
    }
}

impl OperationBody {
    pub fn to_xdr(&self) -> Result<xdr::OperationBody> {
        use xdr::OperationBody as X;
        Ok(match self {
            OperationBody::CreateAccount { destination, starting_balance } => {
                X::CreateAccount(xdr::CreateAccountOp {
                    destination: account_key(destination)?,
                    starting_balance: starting_balance.stroops(),
                })
            }
            OperationBody::Payment { destination, asset, amount } => X::Payment(xdr::PaymentOp {
                destination: destination.to_xdr(),
                asset: asset.to_xdr_asset()?,
                amount: amount.stroops(),
            }),
            OperationBody::PathPaymentStrictReceive {
                send_asset,
                send_max,
                destination,
                dest_asset,
                dest_amount,
                path,
            } => X::PathPaymentStrictReceive(xdr::PathPaymentStrictReceiveOp {
                send_asset: send_asset.to_xdr_asset()?,
                send_max: send_max.stroops(),
                destination: destination.to_xdr(),
                dest_asset: dest_asset.to_xdr_asset()?,
                dest_amount: dest_amount.stroops(),
                path: assets_to_xdr(path)?,
            }),
            OperationBody::ManageSellOffer { selling, buying, amount, price, offer_id } => {
                X::ManageSellOffer(xdr::ManageSellOfferOp {
                    selling: selling.to_xdr_asset()?,
                    buying: buying.to_xdr_asset()?,
                    amount: amount.stroops(),
                    price: price.to_xdr(),
                    offer_id: *offer_id,
                })
            }
            OperationBody::CreatePassiveSellOffer { selling, buying, amount, price } => {
                X::CreatePassiveSellOffer(xdr::CreatePassiveSellOfferOp {
                    selling: selling.to_xdr_asset()?,
                    buying: buying.to_xdr_asset()?,
                    amount: amount.stroops(),
                    price: price.to_xdr(),
                })
            }
            OperationBody::SetOptions(options) => X::SetOptions(xdr::SetOptionsOp {
                inflation_dest: options.inflation_dest.as_deref().map(account_key).transpose()?,
                clear_flags: options.clear_flags,
                set_flags: options.set_flags,
                master_weight: options.master_weight,
                low_threshold: options.low_threshold,
                med_threshold: options.med_threshold,
                high_threshold: options.high_threshold,
                home_domain: options.home_domain.as_deref().map(XdrString::new).transpose()?,
                signer: options.signer.as_ref().map(Signer::to_xdr).transpose()?,
            }),
            OperationBody::ChangeTrust { asset, limit } => X::ChangeTrust(xdr::ChangeTrustOp {
                line: asset.to_xdr()?,
                limit: limit.stroops(),
            }),
            OperationBody::AllowTrust { trustor, asset_code, authorize } => {
                let placeholder = strkey::encode_account_id(&[0u8; 32]);
                X::AllowTrust(xdr::AllowTrustOp {
                    trustor: account_key(trustor)?,
                    asset: Asset::new(asset_code, &placeholder)?.to_xdr_asset_code()?,
                    authorize: *authorize,
                })
            }
            OperationBody::AccountMerge { destination } => X::AccountMerge(destination.to_xdr()),
            OperationBody::Inflation => X::Inflation,
            OperationBody::ManageData { data_name, data_value } => X::ManageData(xdr::ManageDataOp {
                data_name: XdrString::new(data_name.as_str())?,
                data_value: data_value.clone().map(VarOpaque::new).transpose()?,
            }),
            OperationBody::BumpSequence { bump_to } => {
                X::BumpSequence(xdr::BumpSequenceOp { bump_to: *bump_to })
            }
            OperationBody::ManageBuyOffer { selling, buying, buy_amount, price, offer_id } => {
                X::ManageBuyOffer(xdr::ManageBuyOfferOp {
                    selling: selling.to_xdr_asset()?,
                    buying: buying.to_xdr_asset()?,
                    buy_amount: buy_amount.stroops(),
                    price: price.to_xdr(),
                    offer_id: *offer_id,
                })
            }
            OperationBody::PathPaymentStrictSend {
                send_asset,
                send_amount,
                destination,
                dest_asset,
                dest_min,
                path,
            } => X::PathPaymentStrictSend(xdr::PathPaymentStrictSendOp {
                send_asset: send_asset.to_xdr_asset()?,
                send_amount: send_amount.stroops(),
                destination: destination.to_xdr(),
                dest_asset: dest_asset.to_xdr_asset()?,
                dest_min: dest_min.stroops(),
                path: assets_to_xdr(path)?,
            }),
            OperationBody::CreateClaimableBalance { asset, amount, claimants } => {
                X::CreateClaimableBalance(xdr::CreateClaimableBalanceOp {
                    asset: asset.to_xdr_asset()?,
                    amount: amount.stroops(),
                    claimants: VarArray::new(
                        claimants.iter().map(Claimant::to_xdr).collect::<Result<Vec<_>>>()?,
                    )?,
                })
            }
            OperationBody::ClaimClaimableBalance { balance_id } => {
                X::ClaimClaimableBalance(xdr::ClaimClaimableBalanceOp {
                    balance_id: balance_id.to_xdr(),
                })
            }
            OperationBody::BeginSponsoringFutureReserves { sponsored_id } => {
                X::BeginSponsoringFutureReserves(xdr::BeginSponsoringFutureReservesOp {
                    sponsored_id: account_key(sponsored_id)?,
                })
            }
            OperationBody::EndSponsoringFutureReserves => X::EndSponsoringFutureReserves,
            OperationBody::RevokeSponsorship(revoke) => X::RevokeSponsorship(revoke.to_xdr()?),
            OperationBody::Clawback { asset, from, amount } => X::Clawback(xdr::ClawbackOp {
                asset: asset.to_xdr_asset()?,
                from: from.to_xdr(),
                amount: amount.stroops(),
            }),
            OperationBody::ClawbackClaimableBalance { balance_id } => {
                X::ClawbackClaimableBalance(xdr::ClawbackClaimableBalanceOp {
                    balance_id: balance_id.to_xdr(),
                })
            }
            OperationBody::SetTrustLineFlags { trustor, asset, clear_flags, set_flags } => {
                X::SetTrustLineFlags(xdr::SetTrustLineFlagsOp {
                    trustor: account_key(trustor)?,
                    asset: asset.to_xdr_asset()?,
                    clear_flags: *clear_flags,
                    set_flags: *set_flags,
                })
            }
            OperationBody::LiquidityPoolDeposit {
                liquidity_pool_id,
                max_amount_a,
                max_amount_b,
                min_price,
                max_price,
            } => X::LiquidityPoolDeposit(xdr::LiquidityPoolDepositOp {
                liquidity_pool_id: liquidity_pool_id.0,
                max_amount_a: max_amount_a.stroops(),
                max_amount_b: max_amount_b.stroops(),
                min_price: min_price.to_xdr(),
                max_price: max_price.to_xdr(),
            }),
            OperationBody::LiquidityPoolWithdraw {
                liquidity_pool_id,
                amount,
                min_amount_a,
                min_amount_b,
            } => X::LiquidityPoolWithdraw(xdr::LiquidityPoolWithdrawOp {
                liquidity_pool_id: liquidity_pool_id.0,
                amount: amount.stroops(),
                min_amount_a: min_amount_a.stroops(),
                min_amount_b: min_amount_b.stroops(),
            }),
            OperationBody::InvokeHostFunction { host_function, auth } => {
                X::InvokeHostFunction(xdr::InvokeHostFunctionOp {
                    host_function: host_function.clone(),
                    auth: VarArray::new(auth.clone())?,
                })
            }
            OperationBody::ExtendFootprintTtl { extend_to } => {
                X::ExtendFootprintTtl(xdr::ExtendFootprintTtlOp {
                    ext: xdr::ExtensionPoint::V0,
                    extend_to: *extend_to,
                })
            }
            OperationBody::RestoreFootprint => X::RestoreFootprint(xdr::RestoreFootprintOp {
                ext: xdr::ExtensionPoint::V0,
            }),
        })
    }

    pub fn from_xdr(body: &xdr::OperationBody) -> Result<Self> {
        use xdr::OperationBody as X;
        Ok(match body {
            X::CreateAccount(op) => OperationBody::CreateAccount {
                destination: account_string(&op.destination),
                starting_balance: stroops(op.starting_balance),
            },
            X::Payment(op) => OperationBody::Payment {
                destination: MuxedAccount::from_xdr(&op.destination),
                asset: Asset::from_xdr_asset(&op.asset)?,
                amount: stroops(op.amount),
            },
            X::PathPaymentStrictReceive(op) => OperationBody::PathPaymentStrictReceive {
                send_asset: Asset::from_xdr_asset(&op.send_asset)?,
                send_max: stroops(op.send_max),
                destination: MuxedAccount::from_xdr(&op.destination),
                dest_asset: Asset::from_xdr_asset(&op.dest_asset)?,
                dest_amount: stroops(op.dest_amount),
                path: assets_from_xdr(&op.path)?,
            },
            X::ManageSellOffer(op) => OperationBody::ManageSellOffer {
                selling: Asset::from_xdr_asset(&op.selling)?,
                buying: Asset::from_xdr_asset(&op.buying)?,
                amount: stroops(op.amount),
                price: Price::from_xdr(&op.price)?,
                offer_id: op.offer_id,
            },
            X::CreatePassiveSellOffer(op) => OperationBody::CreatePassiveSellOffer {
                selling: Asset::from_xdr_asset(&op.selling)?,
                buying: Asset::from_xdr_asset(&op.buying)?,
                amount: stroops(op.amount),
                price: Price::from_xdr(&op.price)?,
            },
            X::SetOptions(op) => OperationBody::SetOptions(SetOptions {
                inflation_dest: op.inflation_dest.as_ref().map(account_string),
                clear_flags: op.clear_flags,
                set_flags: op.set_flags,
                master_weight: op.master_weight,
                low_threshold: op.low_threshold,
                med_threshold: op.med_threshold,
                high_threshold: op.high_threshold,
                home_domain: op.home_domain.as_ref().map(XdrString::to_utf8).transpose()?,
                signer: op.signer.as_ref().map(Signer::from_xdr),
            }),
            X::ChangeTrust(op) => OperationBody::ChangeTrust {
                asset: ChangeTrustAsset::from_xdr(&op.line)?,
                limit: stroops(op.limit),
            },
            X::AllowTrust(op) => OperationBody::AllowTrust {
                trustor: account_string(&op.trustor),
                asset_code: asset_code_string(&op.asset)?,
                authorize: op.authorize,
            },
            X::AccountMerge(destination) => OperationBody::AccountMerge {
                destination: MuxedAccount::from_xdr(destination),
            },
            X::Inflation => OperationBody::Inflation,
            X::ManageData(op) => OperationBody::ManageData {
                data_name: op.data_name.to_utf8()?,
                data_value: op.data_value.as_ref().map(|v| v.to_vec()),
            },
            X::BumpSequence(op) => OperationBody::BumpSequence { bump_to: op.bump_to },
            X::ManageBuyOffer(op) => OperationBody::ManageBuyOffer {
                selling: Asset::from_xdr_asset(&op.selling)?,
                buying: Asset::from_xdr_asset(&op.buying)?,
                buy_amount: stroops(op.buy_amount),
                price: Price::from_xdr(&op.price)?,
                offer_id: op.offer_id,
            },
            X::PathPaymentStrictSend(op) => OperationBody::PathPaymentStrictSend {
                send_asset: Asset::from_xdr_asset(&op.send_asset)?,
                send_amount: stroops(op.send_amount),
                destination: MuxedAccount::from_xdr(&op.destination),
                dest_asset: Asset::from_xdr_asset(&op.dest_asset)?,
                dest_min: stroops(op.dest_min),
                path: assets_from_xdr(&op.path)?,
            },
            X::CreateClaimableBalance(op) => OperationBody::CreateClaimableBalance {
                asset: Asset::from_xdr_asset(&op.asset)?,
                amount: stroops(op.amount),
                claimants: op.claimants.iter().map(Claimant::from_xdr).collect::<Result<_>>()?,
            },
            X::ClaimClaimableBalance(op) => OperationBody::ClaimClaimableBalance {
                balance_id: ClaimableBalanceId::from_xdr(&op.balance_id),
            },
            X::BeginSponsoringFutureReserves(op) => OperationBody::BeginSponsoringFutureReserves {
                sponsored_id: account_string(&op.sponsored_id),
            },
            X::EndSponsoringFutureReserves => OperationBody::EndSponsoringFutureReserves,
            X::RevokeSponsorship(op) => OperationBody::RevokeSponsorship(RevokeSponsorship::from_xdr(op)?),
            X::Clawback(op) => OperationBody::Clawback {
                asset: Asset::from_xdr_asset(&op.asset)?,
                from: MuxedAccount::from_xdr(&op.from),
                amount: stroops(op.amount),
            },
            X::ClawbackClaimableBalance(op) => OperationBody::ClawbackClaimableBalance {
                balance_id: ClaimableBalanceId::from_xdr(&op.balance_id),
            },
            X::SetTrustLineFlags(op) => OperationBody::SetTrustLineFlags {
                trustor: account_string(&op.trustor),
                asset: Asset::from_xdr_asset(&op.asset)?,
                clear_flags: op.clear_flags,
                set_flags: op.set_flags,
            },
            X::LiquidityPoolDeposit(op) => OperationBody::LiquidityPoolDeposit {
                liquidity_pool_id: LiquidityPoolId(op.liquidity_pool_id),
                max_amount_a: stroops(op.max_amount_a),
                max_amount_b: stroops(op.max_amount_b),
                min_price: Price::from_xdr(&op.min_price)?,
                max_price: Price::from_xdr(&op.max_price)?,
            },
            X::LiquidityPoolWithdraw(op) => OperationBody::LiquidityPoolWithdraw {
                liquidity_pool_id: LiquidityPoolId(op.liquidity_pool_id),
                amount: stroops(op.amount),
                min_amount_a: stroops(op.min_amount_a),
                min_amount_b: stroops(op.min_amount_b),
            },
            X::InvokeHostFunction(op) => OperationBody::InvokeHostFunction {
                host_function: op.host_function.clone(),
                auth: op.auth.to_vec(),
            },
            X::ExtendFootprintTtl(op) => OperationBody::ExtendFootprintTtl { extend_to: op.extend_to },
            X::RestoreFootprint(_) => OperationBody::RestoreFootprint,
        })
    }
}

impl RevokeSponsorship {
    pub fn to_xdr(&self) -> Result<xdr::RevokeSponsorshipOp> {
        use xdr::LedgerKey as K;
        let key = match self {
            RevokeSponsorship::Account { account_id } => K::Account(xdr::LedgerKeyAccount {
                account_id: account_key(account_id)?,
            }),
            RevokeSponsorship::TrustLine { account_id, asset } => K::Trustline(xdr::LedgerKeyTrustLine {
                account_id: account_key(account_id)?,
                asset: asset.to_xdr()?,
            }),
            RevokeSponsorship::Offer { seller_id, offer_id } => K::Offer(xdr::LedgerKeyOffer {
                seller_id: account_key(seller_id)?,
                offer_id: *offer_id,
            }),
            RevokeSponsorship::Data { account_id, data_name } => K::Data(xdr::LedgerKeyData {
                account_id: account_key(account_id)?,
                data_name: XdrString::new(data_name.as_str())?,
            }),
            RevokeSponsorship::ClaimableBalance { balance_id } => {
                K::ClaimableBalance(xdr::LedgerKeyClaimableBalance {
                    balance_id: balance_id.to_xdr(),
                })
            }
            RevokeSponsorship::LiquidityPool { liquidity_pool_id } => {
                K::LiquidityPool(xdr::LedgerKeyLiquidityPool {
                    liquidity_pool_id: liquidity_pool_id.0,
                })
            }
            RevokeSponsorship::Signer { account_id, signer_key } => {
                return Ok(xdr::RevokeSponsorshipOp::Signer(xdr::RevokeSponsorshipOpSigner {
                    account_id: account_key(account_id)?,
                    signer_key: signer_key.to_xdr()?,
                }))
            }
        };
        Ok(xdr::RevokeSponsorshipOp::LedgerEntry(key))
    }

    pub fn from_xdr(op: &xdr::RevokeSponsorshipOp) -> Result<Self> {
        use xdr::LedgerKey as K;
        let key = match op {
            xdr::RevokeSponsorshipOp::Signer(signer) => {
                return Ok(RevokeSponsorship::Signer {
                    account_id: account_string(&signer.account_id),
                    signer_key: SignerKey::from_xdr(&signer.signer_key),
                })
            }
            xdr::RevokeSponsorshipOp::LedgerEntry(key) => key,
        };
        Ok(match key {
            K::Account(k) => RevokeSponsorship::Account {
                account_id: account_string(&k.account_id),
            },
            K::Trustline(k) => RevokeSponsorship::TrustLine {
                account_id: account_string(&k.account_id),
                asset: TrustLineAsset::from_xdr(&k.asset)?,
            },
            K::Offer(k) => RevokeSponsorship::Offer {
                seller_id: account_string(&k.seller_id),
                offer_id: k.offer_id,
            },
            K::Data(k) => RevokeSponsorship::Data {
                account_id: account_string(&k.account_id),
                data_name: k.data_name.to_utf8()?,
            },
            K::ClaimableBalance(k) => RevokeSponsorship::ClaimableBalance {
                balance_id: ClaimableBalanceId::from_xdr(&k.balance_id),
            },
            K::LiquidityPool(k) => RevokeSponsorship::LiquidityPool {
                liquidity_pool_id: LiquidityPoolId(k.liquidity_pool_id),
            },
            other => {
                return Err(TxAsmError::invalid_argument(
                    "ledger_key",
                    format!("ledger key type {} has no revocable sponsorship", other.discriminant()),
                ))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim_predicate::ClaimPredicate;
    use crate::serialization::XdrCodec;

    const SOURCE: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";
    const DESTINATION: &str = "GDQERENWDDSQZS7R7WKHZI3BSOYMV3FSWR7TFUYFTKQ447PIX6NREOJM";
    const MUXED: &str = "MAQAA5L65LSYH7CQ3VTJ7F3HHLGCL3DSLAR2Y47263D56MNNGHSQSAAAAAAAAAAE2LP26";

    fn usd() -> Asset {
        Asset::new("USD", SOURCE).unwrap()
    }

    fn roundtrip(op: &Operation) -> Operation {
        let bytes = op.to_xdr().unwrap().to_xdr_bytes().unwrap();
        Operation::from_xdr(&xdr::Operation::from_xdr_bytes(&bytes).unwrap()).unwrap()
    }

    #[test]
    fn test_create_account_keeps_decimal() {
        let op = Operation::create_account(DESTINATION, "12.25").unwrap();
        let decoded = roundtrip(&op);
        match &decoded.body {
            OperationBody::CreateAccount { destination, starting_balance } => {
                assert_eq!(destination, DESTINATION);
                assert_eq!(starting_balance.to_string(), "12.25");
            }
            other => panic!("unexpected body: {other:?}"),
        }
        assert_eq!(decoded, op);
    }

    #[test]
    fn test_source_override() {
        let op = Operation::payment(MUXED, Asset::native(), "1").unwrap().with_source(SOURCE).unwrap();
        let decoded = roundtrip(&op);
        assert_eq!(decoded.source.unwrap().account_id(), SOURCE);
        assert_eq!(decoded, op);
    }

    #[test]
    fn test_fail_fast_validation() {
        assert!(Operation::create_account("GBAD", "1").is_err());
        assert!(Operation::payment(DESTINATION, Asset::native(), "0").is_err());
        assert!(Operation::payment(DESTINATION, Asset::native(), "1.00000001").is_err());
        assert!(Operation::manage_data("", None).is_err());
        assert!(Operation::manage_data("name", Some(&[0u8; 65][..])).is_err());
        assert!(Operation::bump_sequence(-1).is_err());
        assert!(Operation::clawback(Asset::native(), DESTINATION, "1").is_err());
        assert!(Operation::path_payment_strict_send(
            Asset::native(),
            "1",
            DESTINATION,
            usd(),
            "1",
            vec![Asset::native(); 6]
        )
        .is_err());
    }

    #[test]
    fn test_every_body_roundtrips() {
        let pool = LiquidityPoolId([5u8; 32]);
        let balance = ClaimableBalanceId([6u8; 32]).to_string();
        let price = Price::new(3, 2).unwrap();
        let ops = vec![
            Operation::path_payment_strict_receive(usd(), "10", DESTINATION, Asset::native(), "5", vec![usd()])
                .unwrap(),
            Operation::manage_sell_offer(usd(), Asset::native(), "0", price, 7).unwrap(),
            Operation::manage_buy_offer(usd(), Asset::native(), "1.5", price, 0).unwrap(),
            Operation::create_passive_sell_offer(usd(), Asset::native(), "3", price).unwrap(),
            Operation::set_options(SetOptions {
                inflation_dest: Some(DESTINATION.to_string()),
                set_flags: Some(account_flags::AUTH_REQUIRED),
                master_weight: Some(0),
                home_domain: Some("example.com".to_string()),
                signer: Some(Signer::new(SignerKey::sha256_hash([1u8; 32]), 1).unwrap()),
                ..SetOptions::default()
            })
            .unwrap(),
            Operation::change_trust(usd(), None).unwrap(),
            Operation::allow_trust(DESTINATION, "USDCOIN", trust_line_flags::AUTHORIZED).unwrap(),
            Operation::account_merge(MUXED).unwrap(),
            Operation::inflation(),
            Operation::manage_data("config", Some(&b"value"[..])).unwrap(),
            Operation::bump_sequence(1_000).unwrap(),
            Operation::create_claimable_balance(
                usd(),
                "2",
                vec![Claimant::new(DESTINATION, ClaimPredicate::before_relative_time(60)).unwrap()],
            )
            .unwrap(),
            Operation::claim_claimable_balance(&balance).unwrap(),
            Operation::begin_sponsoring_future_reserves(DESTINATION).unwrap(),
            Operation::end_sponsoring_future_reserves(),
            Operation::revoke_trustline_sponsorship(DESTINATION, pool).unwrap(),
            Operation::revoke_signer_sponsorship(DESTINATION, SignerKey::pre_auth_tx([2u8; 32])).unwrap(),
            Operation::clawback(usd(), MUXED, "4").unwrap(),
            Operation::clawback_claimable_balance(&balance).unwrap(),
            Operation::set_trust_line_flags(DESTINATION, usd(), 0, trust_line_flags::AUTHORIZED).unwrap(),
            Operation::liquidity_pool_deposit(pool, "10", "20", price, price).unwrap(),
            Operation::liquidity_pool_withdraw(pool, "1", "0", "0").unwrap(),
            Operation::upload_contract_wasm(b"\0asm", vec![]).unwrap(),
            Operation::extend_footprint_ttl(10_000),
            Operation::restore_footprint(),
        ];
        for op in &ops {
            assert_eq!(&roundtrip(op), op, "{:?}", op.operation_type());
        }
    }

    #[test]
    fn test_allow_trust_code_width() {
        let op = Operation::allow_trust(DESTINATION, "ABCDE", 1).unwrap();
        match op.to_xdr().unwrap().body {
            xdr::OperationBody::AllowTrust(allow) => {
                assert!(matches!(allow.asset, xdr::AssetCode::CreditAlphanum12(_)))
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_invoke_contract_function() {
        let contract = strkey::encode_contract(&[9u8; 32]);
        let op = Operation::invoke_contract_function(
            &contract,
            "increment",
            vec![crate::scval::to_uint32(1)],
            vec![],
        )
        .unwrap();
        assert!(op.is_soroban());
        assert_eq!(roundtrip(&op), op);
        assert!(Operation::invoke_contract_function(&contract, "bad name", vec![], vec![]).is_err());
    }

    #[test]
    fn test_create_contract_shapes() {
        let op = Operation::create_contract(SOURCE, [1u8; 32], Some([2u8; 32]), None, vec![]).unwrap();
        assert!(matches!(
            op.body,
            OperationBody::InvokeHostFunction {
                host_function: xdr::HostFunction::CreateContract(_),
                ..
            }
        ));

        let op = Operation::create_contract(SOURCE, [1u8; 32], None, Some(vec![]), vec![]).unwrap();
        assert!(matches!(
            op.body,
            OperationBody::InvokeHostFunction {
                host_function: xdr::HostFunction::CreateContractV2(_),
                ..
            }
        ));

        let op = Operation::create_stellar_asset_contract_from_asset(&usd(), vec![]).unwrap();
        assert_eq!(roundtrip(&op), op);
    }

    #[test]
    fn test_revoke_unsupported_key() {
        let op = xdr::RevokeSponsorshipOp::LedgerEntry(xdr::LedgerKey::ContractCode(
            xdr::LedgerKeyContractCode { hash: [0u8; 32] },
        ));
        assert!(RevokeSponsorship::from_xdr(&op).is_err());
    }
}
