//! Ledger keys and footprints

use super::contract::{ScAddress, ScVal};
use super::types::{AccountId, ClaimableBalanceId, Hash, PoolId, String64, TrustLineAsset};
use crate::serialization::VarArray;

xdr_enum! {
    pub enum LedgerEntryType {
        Account = 0,
        Trustline = 1,
        Offer = 2,
        Data = 3,
        ClaimableBalance = 4,
        LiquidityPool = 5,
        ContractData = 6,
        ContractCode = 7,
        ConfigSetting = 8,
        Ttl = 9,
    }
}

xdr_enum! {
    pub enum ContractDataDurability {
        Temporary = 0,
        Persistent = 1,
    }
}

xdr_enum! {
    pub enum ConfigSettingId {
        ContractMaxSizeBytes = 0,
        ContractComputeV0 = 1,
        ContractLedgerCostV0 = 2,
        ContractHistoricalDataV0 = 3,
        ContractEventsV0 = 4,
        ContractBandwidthV0 = 5,
        ContractCostParamsCpuInstructions = 6,
        ContractCostParamsMemoryBytes = 7,
        ContractDataKeySizeBytes = 8,
        ContractDataEntrySizeBytes = 9,
        StateArchival = 10,
        ContractExecutionLanes = 11,
        LiveSorobanStateSizeWindow = 12,
        EvictionIterator = 13,
        ContractParallelComputeV0 = 14,
        ContractLedgerCostExtV0 = 15,
        ScpTiming = 16,
    }
}

xdr_struct! {
    pub struct LedgerKeyAccount {
        pub account_id: AccountId,
    }
}

xdr_struct! {
    pub struct LedgerKeyTrustLine {
        pub account_id: AccountId,
        pub asset: TrustLineAsset,
    }
}

xdr_struct! {
    pub struct LedgerKeyOffer {
        pub seller_id: AccountId,
        pub offer_id: i64,
    }
}

xdr_struct! {
    pub struct LedgerKeyData {
        pub account_id: AccountId,
        pub data_name: String64,
    }
}

xdr_struct! {
    pub struct LedgerKeyClaimableBalance {
        pub balance_id: ClaimableBalanceId,
    }
}

xdr_struct! {
    pub struct LedgerKeyLiquidityPool {
        pub liquidity_pool_id: PoolId,
    }
}

xdr_struct! {
    pub struct LedgerKeyContractData {
        pub contract: ScAddress,
        pub key: ScVal,
        pub durability: ContractDataDurability,
    }
}

xdr_struct! {
    pub struct LedgerKeyContractCode {
        pub hash: Hash,
    }
}

xdr_struct! {
    pub struct LedgerKeyConfigSetting {
        pub config_setting_id: ConfigSettingId,
    }
}

xdr_struct! {
    pub struct LedgerKeyTtl {
        pub key_hash: Hash,
    }
}

xdr_union! {
    pub enum LedgerKey {
        Account(LedgerKeyAccount) = 0,
        Trustline(LedgerKeyTrustLine) = 1,
        Offer(LedgerKeyOffer) = 2,
        Data(LedgerKeyData) = 3,
        ClaimableBalance(LedgerKeyClaimableBalance) = 4,
        LiquidityPool(LedgerKeyLiquidityPool) = 5,
        ContractData(LedgerKeyContractData) = 6,
        ContractCode(LedgerKeyContractCode) = 7,
        ConfigSetting(LedgerKeyConfigSetting) = 8,
        Ttl(LedgerKeyTtl) = 9,
    }
}

impl LedgerKey {
    pub fn entry_type(&self) -> LedgerEntryType {
        match self {
            LedgerKey::Account(_) => LedgerEntryType::Account,
            LedgerKey::Trustline(_) => LedgerEntryType::Trustline,
            LedgerKey::Offer(_) => LedgerEntryType::Offer,
            LedgerKey::Data(_) => LedgerEntryType::Data,
            LedgerKey::ClaimableBalance(_) => LedgerEntryType::ClaimableBalance,
            LedgerKey::LiquidityPool(_) => LedgerEntryType::LiquidityPool,
            LedgerKey::ContractData(_) => LedgerEntryType::ContractData,
            LedgerKey::ContractCode(_) => LedgerEntryType::ContractCode,
            LedgerKey::ConfigSetting(_) => LedgerEntryType::ConfigSetting,
            LedgerKey::Ttl(_) => LedgerEntryType::Ttl,
        }
    }
}

xdr_struct! {
    pub struct LedgerFootprint {
        pub read_only: VarArray<LedgerKey>,
        pub read_write: VarArray<LedgerKey>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::XdrCodec;
    use crate::xdr::PublicKey;

    #[test]
    fn test_account_key_layout() {
        let key = LedgerKey::Account(LedgerKeyAccount {
            account_id: PublicKey::Ed25519([1u8; 32]),
        });
        let bytes = key.to_xdr_bytes().unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes.len(), 40);
        assert_eq!(key.entry_type(), LedgerEntryType::Account);
    }

    #[test]
    fn test_contract_data_key_roundtrip() {
        let key = LedgerKey::ContractData(LedgerKeyContractData {
            contract: ScAddress::Contract([9u8; 32]),
            key: ScVal::LedgerKeyContractInstance,
            durability: ContractDataDurability::Persistent,
        });
        let bytes = key.to_xdr_bytes().unwrap();
        assert_eq!(LedgerKey::from_xdr_bytes(&bytes).unwrap(), key);
    }

    #[test]
    fn test_unknown_config_setting() {
        let bytes = [0, 0, 0, 8, 0, 0, 0, 99];
        assert!(LedgerKey::from_xdr_bytes(&bytes).is_err());
    }
}
