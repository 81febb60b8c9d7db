//! Operation bodies

use super::contract::{HostFunction, SorobanAuthorizationEntry};
use super::ledger::LedgerKey;
use super::types::{
    AccountId, Asset, AssetCode, ChangeTrustAsset, ClaimableBalanceId, Claimant, DataValue,
    ExtensionPoint, MuxedAccount, PoolId, Price, SequenceNumber, Signer, SignerKey, String32,
    String64,
};
use crate::serialization::VarArray;

xdr_enum! {
    pub enum OperationType {
        CreateAccount = 0,
        Payment = 1,
        PathPaymentStrictReceive = 2,
        ManageSellOffer = 3,
        CreatePassiveSellOffer = 4,
        SetOptions = 5,
        ChangeTrust = 6,
        AllowTrust = 7,
        AccountMerge = 8,
        Inflation = 9,
        ManageData = 10,
        BumpSequence = 11,
        ManageBuyOffer = 12,
        PathPaymentStrictSend = 13,
        CreateClaimableBalance = 14,
        ClaimClaimableBalance = 15,
        BeginSponsoringFutureReserves = 16,
        EndSponsoringFutureReserves = 17,
        RevokeSponsorship = 18,
        Clawback = 19,
        ClawbackClaimableBalance = 20,
        SetTrustLineFlags = 21,
        LiquidityPoolDeposit = 22,
        LiquidityPoolWithdraw = 23,
        InvokeHostFunction = 24,
        ExtendFootprintTtl = 25,
        RestoreFootprint = 26,
    }
}

xdr_struct! {
    pub struct CreateAccountOp {
        pub destination: AccountId,
        pub starting_balance: i64,
    }
}

xdr_struct! {
    pub struct PaymentOp {
        pub destination: MuxedAccount,
        pub asset: Asset,
        pub amount: i64,
    }
}

xdr_struct! {
    pub struct PathPaymentStrictReceiveOp {
        pub send_asset: Asset,
        pub send_max: i64,
        pub destination: MuxedAccount,
        pub dest_asset: Asset,
        pub dest_amount: i64,
        pub path: VarArray<Asset, 5>,
    }
}

xdr_struct! {
    pub struct PathPaymentStrictSendOp {
        pub send_asset: Asset,
        pub send_amount: i64,
        pub destination: MuxedAccount,
        pub dest_asset: Asset,
        pub dest_min: i64,
        pub path: VarArray<Asset, 5>,
    }
}

xdr_struct! {
    pub struct ManageSellOfferOp {
        pub selling: Asset,
        pub buying: Asset,
        pub amount: i64,
        pub price: Price,
        pub offer_id: i64,
    }
}

xdr_struct! {
    pub struct ManageBuyOfferOp {
        pub selling: Asset,
        pub buying: Asset,
        pub buy_amount: i64,
        pub price: Price,
        pub offer_id: i64,
    }
}

xdr_struct! {
    pub struct CreatePassiveSellOfferOp {
        pub selling: Asset,
        pub buying: Asset,
        pub amount: i64,
        pub price: Price,
    }
}

xdr_struct! {
    pub struct SetOptionsOp {
        pub inflation_dest: Option<AccountId>,
        pub clear_flags: Option<u32>,
        pub set_flags: Option<u32>,
        pub master_weight: Option<u32>,
        pub low_threshold: Option<u32>,
        pub med_threshold: Option<u32>,
        pub high_threshold: Option<u32>,
        pub home_domain: Option<String32>,
        pub signer: Option<Signer>,
    }
}

xdr_struct! {
    pub struct ChangeTrustOp {
        pub line: ChangeTrustAsset,
        pub limit: i64,
    }
}

xdr_struct! {
    pub struct AllowTrustOp {
        pub trustor: AccountId,
        pub asset: AssetCode,
        pub authorize: u32,
    }
}

xdr_struct! {
    pub struct ManageDataOp {
        pub data_name: String64,
        pub data_value: Option<DataValue>,
    }
}

xdr_struct! {
    pub struct BumpSequenceOp {
        pub bump_to: SequenceNumber,
    }
}

xdr_struct! {
    pub struct CreateClaimableBalanceOp {
        pub asset: Asset,
        pub amount: i64,
        pub claimants: VarArray<Claimant, 10>,
    }
}

xdr_struct! {
    pub struct ClaimClaimableBalanceOp {
        pub balance_id: ClaimableBalanceId,
    }
}

xdr_struct! {
    pub struct BeginSponsoringFutureReservesOp {
        pub sponsored_id: AccountId,
    }
}

xdr_enum! {
    pub enum RevokeSponsorshipType {
        LedgerEntry = 0,
        Signer = 1,
    }
}

xdr_struct! {
    pub struct RevokeSponsorshipOpSigner {
        pub account_id: AccountId,
        pub signer_key: SignerKey,
    }
}

xdr_union! {
    pub enum RevokeSponsorshipOp {
        LedgerEntry(LedgerKey) = 0,
        Signer(RevokeSponsorshipOpSigner) = 1,
    }
}

xdr_struct! {
    pub struct ClawbackOp {
        pub asset: Asset,
        pub from: MuxedAccount,
        pub amount: i64,
    }
}

xdr_struct! {
    pub struct ClawbackClaimableBalanceOp {
        pub balance_id: ClaimableBalanceId,
    }
}

xdr_struct! {
    pub struct SetTrustLineFlagsOp {
        pub trustor: AccountId,
        pub asset: Asset,
        pub clear_flags: u32,
        pub set_flags: u32,
    }
}

xdr_struct! {
    pub struct LiquidityPoolDepositOp {
        pub liquidity_pool_id: PoolId,
        pub max_amount_a: i64,
        pub max_amount_b: i64,
        pub min_price: Price,
        pub max_price: Price,
    }
}

xdr_struct! {
    pub struct LiquidityPoolWithdrawOp {
        pub liquidity_pool_id: PoolId,
        pub amount: i64,
        pub min_amount_a: i64,
        pub min_amount_b: i64,
    }
}

xdr_struct! {
    pub struct InvokeHostFunctionOp {
        pub host_function: HostFunction,
        pub auth: VarArray<SorobanAuthorizationEntry>,
    }
}

xdr_struct! {
    pub struct ExtendFootprintTtlOp {
        pub ext: ExtensionPoint,
        pub extend_to: u32,
    }
}

xdr_struct! {
    pub struct RestoreFootprintOp {
        pub ext: ExtensionPoint,
    }
}

xdr_union! {
    pub enum OperationBody {
        CreateAccount(CreateAccountOp) = 0,
        Payment(PaymentOp) = 1,
        PathPaymentStrictReceive(PathPaymentStrictReceiveOp) = 2,
        ManageSellOffer(ManageSellOfferOp) = 3,
        CreatePassiveSellOffer(CreatePassiveSellOfferOp) = 4,
        SetOptions(SetOptionsOp) = 5,
        ChangeTrust(ChangeTrustOp) = 6,
        AllowTrust(AllowTrustOp) = 7,
        AccountMerge(MuxedAccount) = 8,
        Inflation = 9,
        ManageData(ManageDataOp) = 10,
        BumpSequence(BumpSequenceOp) = 11,
        ManageBuyOffer(ManageBuyOfferOp) = 12,
        PathPaymentStrictSend(PathPaymentStrictSendOp) = 13,
        CreateClaimableBalance(CreateClaimableBalanceOp) = 14,
        ClaimClaimableBalance(ClaimClaimableBalanceOp) = 15,
        BeginSponsoringFutureReserves(BeginSponsoringFutureReservesOp) = 16,
        EndSponsoringFutureReserves = 17,
        RevokeSponsorship(RevokeSponsorshipOp) = 18,
        Clawback(ClawbackOp) = 19,
        ClawbackClaimableBalance(ClawbackClaimableBalanceOp) = 20,
        SetTrustLineFlags(SetTrustLineFlagsOp) = 21,
        LiquidityPoolDeposit(LiquidityPoolDepositOp) = 22,
        LiquidityPoolWithdraw(LiquidityPoolWithdrawOp) = 23,
        InvokeHostFunction(InvokeHostFunctionOp) = 24,
        ExtendFootprintTtl(ExtendFootprintTtlOp) = 25,
        RestoreFootprint(RestoreFootprintOp) = 26,
    }
}

impl OperationBody {
    pub fn operation_type(&self) -> OperationType {
        use OperationBody as B;
        use OperationType as T;
        match self {
            B::CreateAccount(_) => T::CreateAccount,
            B::Payment(_) => T::Payment,
            B::PathPaymentStrictReceive(_) => T::PathPaymentStrictReceive,
            B::ManageSellOffer(_) => T::ManageSellOffer,
            B::CreatePassiveSellOffer(_) => T::CreatePassiveSellOffer,
            B::SetOptions(_) => T::SetOptions,
            B::ChangeTrust(_) => T::ChangeTrust,
            B::AllowTrust(_) => T::AllowTrust,
            B::AccountMerge(_) => T::AccountMerge,
            B::Inflation => T::Inflation,
            B::ManageData(_) => T::ManageData,
            B::BumpSequence(_) => T::BumpSequence,
            B::ManageBuyOffer(_) => T::ManageBuyOffer,
            B::PathPaymentStrictSend(_) => T::PathPaymentStrictSend,
            B::CreateClaimableBalance(_) => T::CreateClaimableBalance,
            B::ClaimClaimableBalance(_) => T::ClaimClaimableBalance,
            B::BeginSponsoringFutureReserves(_) => T::BeginSponsoringFutureReserves,
            B::EndSponsoringFutureReserves => T::EndSponsoringFutureReserves,
            B::RevokeSponsorship(_) => T::RevokeSponsorship,
            B::Clawback(_) => T::Clawback,
            B::ClawbackClaimableBalance(_) => T::ClawbackClaimableBalance,
            B::SetTrustLineFlags(_) => T::SetTrustLineFlags,
            B::LiquidityPoolDeposit(_) => T::LiquidityPoolDeposit,
            B::LiquidityPoolWithdraw(_) => T::LiquidityPoolWithdraw,
            B::InvokeHostFunction(_) => T::InvokeHostFunction,
            B::ExtendFootprintTtl(_) => T::ExtendFootprintTtl,
            B::RestoreFootprint(_) => T::RestoreFootprint,
        }
    }
}

xdr_struct! {
    pub struct Operation {
        pub source_account: Option<MuxedAccount>,
        pub body: OperationBody,
    }
}
