//! Offer prices as fractions
//!
//! A price is `n / d` with both terms positive 32-bit integers. Decimal input
//! is turned into the closest such fraction by walking the continued fraction
//! of the decimal's exact rational value.

use crate::error::{Result, TxAsmError};
use crate::xdr;
use std::fmt;
use std::str::FromStr;

/// Price of one unit of the selling asset in terms of the buying asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl Price {
    pub fn new(n: i32, d: i32) -> Result<Self> {
        if n <= 0 {
            return Err(TxAsmError::invalid_argument("n", format!("{n} must be positive")));
        }
        if d <= 0 {
            return Err(TxAsmError::invalid_argument("d", format!("{d} must be positive")));
        }
        Ok(Self { n, d })
    }

    /// Best rational approximation of a decimal string such as `"1.25"`.
    pub fn from_decimal_str(value: &str) -> Result<Self> {
        let invalid = |message: &str| TxAsmError::invalid_argument("price", format!("`{value}` {message}"));

        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("is not a decimal number"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("is not a non-negative decimal number"));
        }

        let mut numerator: u128 = 0;
        let mut denominator: u128 = 1;
        for b in whole.bytes() {
            numerator = numerator
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u128))
                .ok_or_else(|| invalid("is too large"))?;
        }
        for b in fraction.bytes() {
            numerator = numerator
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u128))
                .ok_or_else(|| invalid("has too many digits"))?;
            denominator = denominator
                .checked_mul(10)
                .ok_or_else(|| invalid("has too many digits"))?;
        }

        let (n, d) = best_rational(numerator, denominator).ok_or_else(|| invalid("has no positive 32-bit approximation"))?;
        Ok(Self { n, d })
    }

    pub fn to_xdr(&self) -> xdr::Price {
        xdr::Price { n: self.n, d: self.d }
    }

    pub fn from_xdr(price: &xdr::Price) -> Result<Self> {
        Self::new(price.n, price.d)
    }
}

/// Continued-fraction convergents of `num / den`, stopping before either term
/// leaves the `i32` range.
fn best_rational(mut num: u128, mut den: u128) -> Option<(i32, i32)> {
    let limit = i32::MAX as u128;
    let (mut h0, mut h1) = (0u128, 1u128);
    let (mut k0, mut k1) = (1u128, 0u128);

    while den != 0 {
        let a = num / den;
        let h = a.checked_mul(h1).and_then(|v| v.checked_add(h0))?;
        let k = a.checked_mul(k1).and_then(|v| v.checked_add(k0));
        match k {
            Some(k) if h <= limit && k <= limit => {
                (h0, h1) = (h1, h);
                (k0, k1) = (k1, k);
            }
            _ => break,
        }
        let rem = num % den;
        num = den;
        den = rem;
    }

    if h1 == 0 || k1 == 0 {
        return None;
    }
    Some((h1 as i32, k1 as i32))
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

impl FromStr for Price {
    type Err = TxAsmError;

    /// Accepts `n/d` or a decimal.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((n, d)) => {
                let n = n.trim().parse().map_err(|_| TxAsmError::invalid_argument("n", format!("`{n}` is not an i32")))?;
                let d = d.trim().parse().map_err(|_| TxAsmError::invalid_argument("d", format!("`{d}` is not an i32")))?;
                Self::new(n, d)
            }
            None => Self::from_decimal_str(s),
        }
    }
}
