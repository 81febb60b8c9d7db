//! Assets, trust lines and liquidity pools
//!
//! Asset codes of 1-4 characters travel as `CreditAlphanum4`, codes of 5-12
//! as `CreditAlphanum12`. On the wire the code is right-padded with NUL bytes;
//! the padding is trimmed again when decoding.

use crate::error::{Result, TxAsmError};
use crate::network::sha256;
use crate::serialization::XdrCodec;
use crate::strkey;
use crate::xdr;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Fee in basis points of constant-product pools.
pub const LIQUIDITY_POOL_FEE_V18: i32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    Credit { code: String, issuer: String },
}

fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() || code.len() > 12 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(TxAsmError::InvalidAssetCode(code.to_string()));
    }
    Ok(())
}

fn code_from_wire(bytes: &[u8]) -> Result<String> {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    let code = String::from_utf8(bytes[..end].to_vec())
        .map_err(|_| TxAsmError::InvalidAssetCode(hex::encode(bytes)))?;
    validate_code(&code)?;
    Ok(code)
}

fn padded_code<const N: usize>(code: &str) -> [u8; N] {
    let mut out = [0u8; N];
    out[..code.len()].copy_from_slice(code.as_bytes());
    out
}

impl Asset {
    pub fn native() -> Self {
        Asset::Native
    }

    /// A credit asset. `issuer` must be an account id (G...).
    pub fn new(code: &str, issuer: &str) -> Result<Self> {
        validate_code(code)?;
        strkey::decode_account_id(issuer)?;
        Ok(Asset::Credit {
            code: code.to_string(),
            issuer: issuer.to_string(),
        })
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    pub fn code(&self) -> &str {
        match self {
            Asset::Native => "XLM",
            Asset::Credit { code, .. } => code,
        }
    }

    pub fn issuer(&self) -> Option<&str> {
        match self {
            Asset::Native => None,
            Asset::Credit { issuer, .. } => Some(issuer),
        }
    }

    pub fn asset_type(&self) -> xdr::AssetType {
        match self {
            Asset::Native => xdr::AssetType::Native,
            Asset::Credit { code, .. } if code.len() <= 4 => xdr::AssetType::CreditAlphanum4,
            Asset::Credit { .. } => xdr::AssetType::CreditAlphanum12,
        }
    }

    /// `native` or `CODE:ISSUER`.
    pub fn canonical(&self) -> String {
        match self {
            Asset::Native => "native".to_string(),
            Asset::Credit { code, issuer } => format!("{code}:{issuer}"),
        }
    }

    pub fn to_xdr_asset(&self) -> Result<xdr::Asset> {
        Ok(match self {
            Asset::Native => xdr::Asset::Native,
            Asset::Credit { code, issuer } => {
                let issuer = xdr::PublicKey::Ed25519(strkey::decode_account_id(issuer)?);
                if code.len() <= 4 {
                    xdr::Asset::CreditAlphanum4(xdr::AlphaNum4 {
                        asset_code: padded_code(code),
                        issuer,
                    })
                } else {
                    xdr::Asset::CreditAlphanum12(xdr::AlphaNum12 {
                        asset_code: padded_code(code),
                        issuer,
                    })
                }
            }
        })
    }

    /// Rejects an alphanum12 asset whose code fits in four characters, since
    /// it would re-encode as alphanum4.
    pub fn from_xdr_asset(asset: &xdr::Asset) -> Result<Self> {
        match asset {
            xdr::Asset::Native => Ok(Asset::Native),
            xdr::Asset::CreditAlphanum4(a) => Self::from_wire(&a.asset_code, &a.issuer),
            xdr::Asset::CreditAlphanum12(a) => {
                let asset = Self::from_wire(&a.asset_code, &a.issuer)?;
                if asset.code().len() <= 4 {
                    return Err(TxAsmError::InvalidAssetCode(format!(
                        "{} is too short for an alphanum12 asset",
                        asset.code()
                    )));
                }
                Ok(asset)
            }
        }
    }

    fn from_wire(code: &[u8], issuer: &xdr::AccountId) -> Result<Self> {
        Ok(Asset::Credit {
            code: code_from_wire(code)?,
            issuer: strkey::encode_account_id(issuer.as_bytes()),
        })
    }

    pub fn to_change_trust_asset(&self) -> Result<xdr::ChangeTrustAsset> {
        Ok(match self.to_xdr_asset()? {
            xdr::Asset::Native => xdr::ChangeTrustAsset::Native,
            xdr::Asset::CreditAlphanum4(a) => xdr::ChangeTrustAsset::CreditAlphanum4(a),
            xdr::Asset::CreditAlphanum12(a) => xdr::ChangeTrustAsset::CreditAlphanum12(a),
        })
    }

    pub fn to_trust_line_asset(&self) -> Result<xdr::TrustLineAsset> {
        Ok(match self.to_xdr_asset()? {
            xdr::Asset::Native => xdr::TrustLineAsset::Native,
            xdr::Asset::CreditAlphanum4(a) => xdr::TrustLineAsset::CreditAlphanum4(a),
            xdr::Asset::CreditAlphanum12(a) => xdr::TrustLineAsset::CreditAlphanum12(a),
        })
    }

    /// The code alone, as `AllowTrust` carries it.
    pub fn to_xdr_asset_code(&self) -> Result<xdr::AssetCode> {
        match self.to_xdr_asset()? {
            xdr::Asset::Native => Err(TxAsmError::invalid_argument(
                "asset",
                "the native asset has no asset code",
            )),
            xdr::Asset::CreditAlphanum4(a) => Ok(xdr::AssetCode::CreditAlphanum4(a.asset_code)),
            xdr::Asset::CreditAlphanum12(a) => Ok(xdr::AssetCode::CreditAlphanum12(a.asset_code)),
        }
    }
}

/// Orders by asset type, then code, then issuer. Liquidity pools require
/// their two assets in this order.
impl Ord for Asset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.asset_type()
            .cmp(&other.asset_type())
            .then_with(|| self.code().cmp(other.code()))
            .then_with(|| self.issuer().cmp(&other.issuer()))
    }
}

impl PartialOrd for Asset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for Asset {
    type Err = TxAsmError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "native" {
            return Ok(Asset::Native);
        }
        let (code, issuer) = s
            .split_once(':')
            .ok_or_else(|| TxAsmError::invalid_argument("asset", format!("`{s}` is not `native` or CODE:ISSUER")))?;
        Asset::new(code, issuer)
    }
}

/// A liquidity pool id, shown as lower-case hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LiquidityPoolId(pub xdr::PoolId);

impl LiquidityPoolId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The L... strkey form.
    pub fn to_strkey(&self) -> String {
        strkey::encode_liquidity_pool(&self.0)
    }

    pub fn from_strkey(encoded: &str) -> Result<Self> {
        Ok(LiquidityPoolId(strkey::decode_liquidity_pool(encoded)?))
    }
}

impl fmt::Display for LiquidityPoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for LiquidityPoolId {
    type Err = TxAsmError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| TxAsmError::invalid_argument("liquidity_pool_id", e.to_string()))?;
        let id: [u8; 32] = bytes.try_into().map_err(|_| {
            TxAsmError::invalid_argument("liquidity_pool_id", "must be 32 bytes of hex")
        })?;
        Ok(LiquidityPoolId(id))
    }
}

/// The share asset of a constant-product pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiquidityPoolAsset {
    asset_a: Asset,
    asset_b: Asset,
    fee: i32,
}

impl LiquidityPoolAsset {
    /// `asset_a` must sort strictly before `asset_b`.
    pub fn new(asset_a: Asset, asset_b: Asset, fee: i32) -> Result<Self> {
        if asset_a >= asset_b {
            return Err(TxAsmError::invalid_argument(
                "asset_a",
                format!("{asset_a} must sort before {asset_b}"),
            ));
        }
        Ok(Self { asset_a, asset_b, fee })
    }

    pub fn with_default_fee(asset_a: Asset, asset_b: Asset) -> Result<Self> {
        Self::new(asset_a, asset_b, LIQUIDITY_POOL_FEE_V18)
    }

    pub fn asset_a(&self) -> &Asset {
        &self.asset_a
    }

    pub fn asset_b(&self) -> &Asset {
        &self.asset_b
    }

    pub fn fee(&self) -> i32 {
        self.fee
    }

    pub fn to_xdr_parameters(&self) -> Result<xdr::LiquidityPoolParameters> {
        Ok(xdr::LiquidityPoolParameters::ConstantProduct(
            xdr::LiquidityPoolConstantProductParameters {
                asset_a: self.asset_a.to_xdr_asset()?,
                asset_b: self.asset_b.to_xdr_asset()?,
                fee: self.fee,
            },
        ))
    }

    pub fn from_xdr_parameters(params: &xdr::LiquidityPoolParameters) -> Result<Self> {
        match params {
            xdr::LiquidityPoolParameters::ConstantProduct(p) => Self::new(
                Asset::from_xdr_asset(&p.asset_a)?,
                Asset::from_xdr_asset(&p.asset_b)?,
                p.fee,
            ),
        }
    }

    /// sha256 of the XDR-encoded pool parameters.
    pub fn liquidity_pool_id(&self) -> Result<LiquidityPoolId> {
        let bytes = self.to_xdr_parameters()?.to_xdr_bytes()?;
        Ok(LiquidityPoolId(sha256(&bytes)))
    }
}

/// What a `ChangeTrust` operation establishes a trust line to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeTrustAsset {
    Asset(Asset),
    LiquidityPool(LiquidityPoolAsset),
}

impl ChangeTrustAsset {
    pub fn to_xdr(&self) -> Result<xdr::ChangeTrustAsset> {
        match self {
            ChangeTrustAsset::Asset(asset) => asset.to_change_trust_asset(),
            ChangeTrustAsset::LiquidityPool(pool) => {
                Ok(xdr::ChangeTrustAsset::PoolShare(pool.to_xdr_parameters()?))
            }
        }
    }

    pub fn from_xdr(asset: &xdr::ChangeTrustAsset) -> Result<Self> {
        let asset = match asset {
            xdr::ChangeTrustAsset::Native => Asset::Native,
            xdr::ChangeTrustAsset::CreditAlphanum4(a) => {
                Asset::from_xdr_asset(&xdr::Asset::CreditAlphanum4(a.clone()))?
            }
            xdr::ChangeTrustAsset::CreditAlphanum12(a) => {
                Asset::from_xdr_asset(&xdr::Asset::CreditAlphanum12(a.clone()))?
            }
            xdr::ChangeTrustAsset::PoolShare(params) => {
                return Ok(ChangeTrustAsset::LiquidityPool(
                    LiquidityPoolAsset::from_xdr_parameters(params)?,
                ))
            }
        };
        Ok(ChangeTrustAsset::Asset(asset))
    }
}

impl From<Asset> for ChangeTrustAsset {
    fn from(asset: Asset) -> Self {
        ChangeTrustAsset::Asset(asset)
    }
}

impl From<LiquidityPoolAsset> for ChangeTrustAsset {
    fn from(pool: LiquidityPoolAsset) -> Self {
        ChangeTrustAsset::LiquidityPool(pool)
    }
}

/// The asset side of a trust line key: a plain asset or a pool share.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrustLineAsset {
    Asset(Asset),
    LiquidityPoolId(LiquidityPoolId),
}

impl TrustLineAsset {
    pub fn to_xdr(&self) -> Result<xdr::TrustLineAsset> {
        match self {
            TrustLineAsset::Asset(asset) => asset.to_trust_line_asset(),
            TrustLineAsset::LiquidityPoolId(id) => Ok(xdr::TrustLineAsset::PoolShare(id.0)),
        }
    }

    pub fn from_xdr(asset: &xdr::TrustLineAsset) -> Result<Self> {
        let asset = match asset {
            xdr::TrustLineAsset::Native => Asset::Native,
            xdr::TrustLineAsset::CreditAlphanum4(a) => {
                Asset::from_xdr_asset(&xdr::Asset::CreditAlphanum4(a.clone()))?
            }
            xdr::TrustLineAsset::CreditAlphanum12(a) => {
                Asset::from_xdr_asset(&xdr::Asset::CreditAlphanum12(a.clone()))?
            }
            xdr::TrustLineAsset::PoolShare(id) => {
                return Ok(TrustLineAsset::LiquidityPoolId(LiquidityPoolId(*id)))
            }
        };
        Ok(TrustLineAsset::Asset(asset))
    }
}

impl From<Asset> for TrustLineAsset {
    fn from(asset: Asset) -> Self {
        TrustLineAsset::Asset(asset)
    }
}

impl From<LiquidityPoolId> for TrustLineAsset {
    fn from(id: LiquidityPoolId) -> Self {
        TrustLineAsset::LiquidityPoolId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";

    #[test]
    fn test_code_validation() {
        assert!(Asset::new("USD", ISSUER).is_ok());
        assert!(Asset::new("ABCDEFGHIJKL", ISSUER).is_ok());
        assert!(Asset::new("", ISSUER).is_err());
        assert!(Asset::new("ABCDEFGHIJKLM", ISSUER).is_err());
        assert!(Asset::new("US-D", ISSUER).is_err());
        assert!(Asset::new("USD", "SCZANGBA5YHTNYVVV4C3U252E2B6P6F5T3U6MM63WBSBZATAQI3EBTQ4").is_err());
    }

    #[test]
    fn test_wire_variant_follows_length() {
        let short = Asset::new("ABCD", ISSUER).unwrap();
        let long = Asset::new("ABCDE", ISSUER).unwrap();
        assert_eq!(short.asset_type(), xdr::AssetType::CreditAlphanum4);
        assert_eq!(long.asset_type(), xdr::AssetType::CreditAlphanum12);

        match long.to_xdr_asset().unwrap() {
            xdr::Asset::CreditAlphanum12(a) => assert_eq!(&a.asset_code, b"ABCDE\0\0\0\0\0\0\0"),
            other => panic!("unexpected asset: {other:?}"),
        }
    }

    #[test]
    fn test_xdr_roundtrip_trims_padding() {
        let asset = Asset::new("USD", ISSUER).unwrap();
        let decoded = Asset::from_xdr_asset(&asset.to_xdr_asset().unwrap()).unwrap();
        assert_eq!(decoded, asset);
        assert_eq!(decoded.code(), "USD");
    }

    #[test]
    fn test_short_code_in_alphanum12_rejected() {
        let xdr_asset = xdr::Asset::CreditAlphanum12(xdr::AlphaNum12 {
            asset_code: *b"USD\0\0\0\0\0\0\0\0\0",
            issuer: xdr::PublicKey::Ed25519([0u8; 32]),
        });
        assert!(Asset::from_xdr_asset(&xdr_asset).is_err());
    }

    #[test]
    fn test_canonical_string() {
        let asset: Asset = format!("USD:{ISSUER}").parse().unwrap();
        assert_eq!(asset.canonical(), format!("USD:{ISSUER}"));
        assert_eq!("native".parse::<Asset>().unwrap(), Asset::Native);
        assert!("USD".parse::<Asset>().is_err());
    }

    #[test]
    fn test_ordering_puts_type_first() {
        let native = Asset::native();
        let four = Asset::new("ZZZ", ISSUER).unwrap();
        let twelve = Asset::new("AAAAA", ISSUER).unwrap();
        assert!(native < four);
        assert!(four < twelve);
    }

    #[test]
    fn test_pool_id() {
        let usd = Asset::new("USD", ISSUER).unwrap();
        let pool = LiquidityPoolAsset::with_default_fee(Asset::native(), usd.clone()).unwrap();
        assert_eq!(
            pool.liquidity_pool_id().unwrap().to_string(),
            "5438f68b36acc4aa8974118896202f1962d262436217a494fa65fcb70f101c5f"
        );
        assert!(LiquidityPoolAsset::with_default_fee(usd, Asset::native()).is_err());
    }

    #[test]
    fn test_pool_id_hex_roundtrip() {
        let id = LiquidityPoolId([0xab; 32]);
        assert_eq!(id.to_string().parse::<LiquidityPoolId>().unwrap(), id);
        assert!("abcd".parse::<LiquidityPoolId>().is_err());
    }
}
