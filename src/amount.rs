//! Decimal asset amounts
//!
//! Amounts are written as decimal strings with at most seven fractional
//! digits and travel on the wire as an int64 count of stroops (10^-7 units).
//! Parsing and formatting use integer arithmetic only.

use crate::error::{Result, TxAsmError};
use std::fmt;
use std::str::FromStr;

pub const STROOPS_PER_UNIT: i64 = 10_000_000;
pub const MAX_DECIMAL_PLACES: usize = 7;

/// An amount held as an exact number of stroops.
///
/// Parsed and constructed amounts are non-negative. Amounts decoded from XDR
/// keep whatever int64 the wire carries, negatives included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const MAX: Amount = Amount(i64::MAX);

    pub fn new(value: &str) -> Result<Self> {
        value.parse()
    }

    pub fn from_stroops(stroops: i64) -> Result<Self> {
        if stroops < 0 {
            return Err(TxAsmError::InvalidAmount {
                value: stroops.to_string(),
                message: "stroop count must not be negative".to_string(),
            });
        }
        Ok(Amount(stroops))
    }

    /// Unchecked, for the decode path.
    pub(crate) fn from_wire(stroops: i64) -> Self {
        Amount(stroops)
    }

    pub fn stroops(&self) -> i64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = TxAsmError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: &str| TxAsmError::InvalidAmount {
            value: s.to_string(),
            message: message.to_string(),
        };

        let digits = s.strip_prefix('+').unwrap_or(s);
        if digits.starts_with('-') {
            return Err(invalid("must not be negative"));
        }

        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("not a decimal number"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }
        if fraction.len() > MAX_DECIMAL_PLACES {
            return Err(invalid("must have at most 7 digits after the decimal point"));
        }

        let too_large = || invalid("exceeds the maximum of 922337203685.4775807");

        let mut units: i64 = 0;
        for b in whole.bytes() {
            units = units
                .checked_mul(10)
                .and_then(|u| u.checked_add((b - b'0') as i64))
                .ok_or_else(too_large)?;
        }

        let mut fractional: i64 = 0;
        for i in 0..MAX_DECIMAL_PLACES {
            let digit = fraction.as_bytes().get(i).map_or(0, |b| (b - b'0') as i64);
            fractional = fractional * 10 + digit;
        }

        units
            .checked_mul(STROOPS_PER_UNIT)
            .and_then(|s| s.checked_add(fractional))
            .map(Amount)
            .ok_or_else(too_large)
    }
}

impl TryFrom<&str> for Amount {
    type Error = TxAsmError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Canonical form: no trailing fractional zeros, no decimal point for whole amounts.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_unit = STROOPS_PER_UNIT as u64;
        let whole = magnitude / per_unit;
        let fraction = magnitude % per_unit;
        if fraction == 0 {
            return write!(f, "{sign}{whole}");
        }
        let fraction = format!("{fraction:07}");
        write!(f, "{sign}{whole}.{}", fraction.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        assert_eq!(Amount::new("12.25").unwrap().stroops(), 122_500_000);
        assert_eq!(Amount::new("0.0000001").unwrap().stroops(), 1);
        assert_eq!(Amount::new("1000").unwrap().stroops(), 10_000_000_000);
        assert_eq!(Amount::new(".5").unwrap().stroops(), 5_000_000);
        assert_eq!(Amount::new("+3.").unwrap().stroops(), 30_000_000);
    }

    #[test]
    fn test_max_amount() {
        let max = Amount::new("922337203685.4775807").unwrap();
        assert_eq!(max, Amount::MAX);
        assert!(Amount::new("922337203685.4775808").is_err());
        assert!(Amount::new("99999999999999999999").is_err());
    }

    #[test]
    fn test_rejections() {
        for bad in ["", ".", "-1", "1.23456789", "1,5", "1e7", " 1", "abc", "1.2.3"] {
            let err = Amount::new(bad).unwrap_err();
            assert!(matches!(err, TxAsmError::InvalidAmount { .. }), "{bad}");
        }
    }

    #[test]
    fn test_canonical_display() {
        assert_eq!(Amount::new("12.2500000").unwrap().to_string(), "12.25");
        assert_eq!(Amount::new("10.0").unwrap().to_string(), "10");
        assert_eq!(Amount::new("0").unwrap().to_string(), "0");
        assert_eq!(Amount::from_stroops(1).unwrap().to_string(), "0.0000001");
        assert_eq!(Amount::MAX.to_string(), "922337203685.4775807");
    }

    #[test]
    fn test_negative_stroops_rejected() {
        assert!(Amount::from_stroops(-1).is_err());
    }

    #[test]
    fn test_wire_amount_keeps_sign() {
        assert_eq!(Amount::from_wire(-1).stroops(), -1);
        assert_eq!(Amount::from_wire(-1).to_string(), "-0.0000001");
        assert_eq!(Amount::from_wire(-122_500_000).to_string(), "-12.25");
        assert_eq!(Amount::from_wire(i64::MIN).to_string(), "-922337203685.4775808");
    }
}
