//! Exact conversion between raw on-chain integer amounts and decimal quantities.
//!
//! A raw amount is a `U256` counted in the token's smallest unit. A decimal
//! amount is `value / 10^scale`, held as an integer and a scale so that no
//! binary floating point ever touches an amount.

use alloy::primitives::ruint::UintTryFrom;
use alloy::primitives::{U256, U512};
use std::fmt;
use std::str::FromStr;

use crate::source::QuoteError;

/// Largest decimals count whose scaling factor `10^decimals` fits in `U256`.
pub const MAX_DECIMALS: u8 = 77;

/// Rounding direction applied when a division or rescale drops digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Truncate toward zero.
    Down,
    /// Round to nearest, ties away from zero.
    HalfUp,
}

/// Non-negative decimal quantity, `value / 10^scale`.
///
/// Equality is numeric: `25.0` and `25` compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalAmount {
    value: U256,
    scale: u8,
}

/// Scales a decimal numeral by `10^decimals` into the token's smallest unit.
///
/// Fractional digits beyond `decimals` are rejected with
/// [`QuoteError::PrecisionLoss`] unless they are all zeros.
///
/// ```
/// use univ3_exchange_quote::source::to_raw;
/// use alloy::primitives::U256;
///
/// assert_eq!(to_raw("1", 6).unwrap(), U256::from(1_000_000u64));
/// ```
pub fn to_raw(amount: &str, decimals: u8) -> Result<U256, QuoteError> {
    check_decimals(decimals)?;
    DecimalAmount::parse(amount)
        .map_err(|e| match e {
            QuoteError::PrecisionLoss { amount, .. } => QuoteError::PrecisionLoss { amount, decimals },
            e => e,
        })?
        .to_raw(decimals)
}

/// Divides a raw amount by `10^decimals`, keeping every fractional digit.
pub fn to_decimal(raw: U256, decimals: u8) -> Result<DecimalAmount, QuoteError> {
    check_decimals(decimals)?;
    Ok(DecimalAmount {
        value: raw,
        scale: decimals,
    })
}

/// Validates a decimals count coming from untyped input such as token list JSON.
pub fn checked_decimals(decimals: i64) -> Result<u8, QuoteError> {
    if !(0..=MAX_DECIMALS as i64).contains(&decimals) {
        return Err(QuoteError::InvalidDecimals(decimals));
    }
    Ok(decimals as u8)
}

fn check_decimals(decimals: u8) -> Result<(), QuoteError> {
    if decimals > MAX_DECIMALS {
        return Err(QuoteError::InvalidDecimals(decimals as i64));
    }
    Ok(())
}

fn pow10(exp: u32) -> Result<U256, QuoteError> {
    U256::from(10u64)
        .checked_pow(U256::from(exp))
        .ok_or(QuoteError::Overflow("power of ten exceeds U256"))
}

fn pow10_wide(exp: u32) -> Result<U512, QuoteError> {
    U512::from(10u64)
        .checked_pow(U512::from(exp))
        .ok_or(QuoteError::Overflow("power of ten exceeds U512"))
}

// Intermediate products live in U512, so only the quotient has to fit in U256.
fn divide(num: U512, den: U512, rounding: Rounding) -> Result<U512, QuoteError> {
    if den.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    let quotient = num / den;
    let remainder = num % den;
    match rounding {
        Rounding::HalfUp if !remainder.is_zero() && remainder >= den - remainder => quotient
            .checked_add(U512::from(1u64))
            .ok_or(QuoteError::Overflow("rounded quotient exceeds U512")),
        _ => Ok(quotient),
    }
}

fn narrow(value: U512) -> Result<U256, QuoteError> {
    U256::uint_try_from(value).ok().ok_or(QuoteError::Overflow("quotient exceeds U256"))
}

fn render(value: U256, scale: u8) -> String {
    let digits = value.to_string();
    let scale = scale as usize;
    if scale == 0 {
        return digits;
    }
    let padded = format!("{digits:0>width$}", width = scale + 1);
    let (integer, fraction) = padded.split_at(padded.len() - scale);
    format!("{integer}.{fraction}")
}

impl DecimalAmount {
    pub const ZERO: Self = Self {
        value: U256::ZERO,
        scale: 0,
    };

    /// Parses `digits` or `digits.digits`. Signs, exponents, a bare `.5` or `5.`
    /// are all rejected as [`QuoteError::InvalidAmount`].
    pub fn parse(s: &str) -> Result<Self, QuoteError> {
        let trimmed = s.trim();
        let (integer, fraction) = match trimmed.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (trimmed, None),
        };

        let well_formed = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !well_formed(integer) || fraction.is_some_and(|f| !well_formed(f)) {
            return Err(QuoteError::InvalidAmount(s.to_string()));
        }

        let fraction = fraction.unwrap_or_default().trim_end_matches('0');
        if fraction.len() > MAX_DECIMALS as usize {
            return Err(QuoteError::PrecisionLoss {
                amount: trimmed.to_string(),
                decimals: MAX_DECIMALS,
            });
        }

        let value = U256::from_str_radix(&format!("{integer}{fraction}"), 10)
            .map_err(|_| QuoteError::Overflow("amount exceeds U256"))?;

        Ok(Self {
            value,
            scale: fraction.len() as u8,
        })
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Same quantity with trailing fractional zeros removed.
    pub fn normalized(&self) -> Self {
        let ten = U256::from(10u64);
        let mut value = self.value;
        let mut scale = self.scale;
        while scale > 0 && (value % ten).is_zero() {
            value /= ten;
            scale -= 1;
        }
        Self { value, scale }
    }

    /// Converts back to the token's smallest unit.
    pub fn to_raw(&self, decimals: u8) -> Result<U256, QuoteError> {
        check_decimals(decimals)?;
        if self.scale <= decimals {
            return self
                .value
                .checked_mul(pow10((decimals - self.scale) as u32)?)
                .ok_or(QuoteError::Overflow("raw amount exceeds U256"));
        }

        let divisor = pow10((self.scale - decimals) as u32)?;
        if !(self.value % divisor).is_zero() {
            return Err(QuoteError::PrecisionLoss {
                amount: self.to_string(),
                decimals,
            });
        }
        Ok(self.value / divisor)
    }

    /// Rescales to exactly `precision` fractional digits.
    pub fn round(&self, precision: u8, rounding: Rounding) -> Result<Self, QuoteError> {
        check_decimals(precision)?;
        let value = if precision >= self.scale {
            self.value
                .checked_mul(pow10((precision - self.scale) as u32)?)
                .ok_or(QuoteError::Overflow("rescaled amount exceeds U256"))?
        } else {
            narrow(divide(
                U512::from(self.value),
                pow10_wide((self.scale - precision) as u32)?,
                rounding,
            )?)?
        };
        Ok(Self {
            value,
            scale: precision,
        })
    }

    /// Renders with exactly `precision` fractional digits, rounding half-up.
    pub fn to_fixed(&self, precision: u8) -> Result<String, QuoteError> {
        let rounded = self.round(precision, Rounding::HalfUp)?;
        Ok(render(rounded.value, rounded.scale))
    }

    /// `self / other` carried to `precision` fractional digits.
    pub fn checked_div(
        &self,
        other: &Self,
        precision: u8,
        rounding: Rounding,
    ) -> Result<Self, QuoteError> {
        Ok(Self {
            value: narrow(self.div_wide(other, precision, rounding)?)?,
            scale: precision,
        })
    }

    /// `self / other` truncated to at most `max_precision` fractional digits,
    /// dropping trailing digits until the quotient fits in `U256`.
    pub fn checked_div_fit(&self, other: &Self, max_precision: u8) -> Result<Self, QuoteError> {
        let ten = U512::from(10u64);
        let mut value = self.div_wide(other, max_precision, Rounding::Down)?;
        let mut scale = max_precision;
        loop {
            if let Some(value) = U256::uint_try_from(value).ok() {
                return Ok(Self { value, scale });
            }
            if scale == 0 {
                return Err(QuoteError::Overflow("quotient exceeds U256"));
            }
            value /= ten;
            scale -= 1;
        }
    }

    fn div_wide(&self, other: &Self, precision: u8, rounding: Rounding) -> Result<U512, QuoteError> {
        check_decimals(precision)?;
        if other.is_zero() {
            return Err(QuoteError::DivisionByZero);
        }
        let a = self.normalized();
        let b = other.normalized();

        // a/10^sa / (b/10^sb) * 10^p == a * 10^(sb + p - sa) / b
        let shift = b.scale as i32 + precision as i32 - a.scale as i32;
        let (num, den) = if shift >= 0 {
            let num = U512::from(a.value)
                .checked_mul(pow10_wide(shift as u32)?)
                .ok_or(QuoteError::Overflow("dividend exceeds U512"))?;
            (num, U512::from(b.value))
        } else {
            let den = U512::from(b.value)
                .checked_mul(pow10_wide(shift.unsigned_abs())?)
                .ok_or(QuoteError::Overflow("divisor exceeds U512"))?;
            (U512::from(a.value), den)
        };

        divide(num, den, rounding)
    }
}

impl PartialEq for DecimalAmount {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.normalized(), other.normalized());
        a.value == b.value && a.scale == b.scale
    }
}

impl Eq for DecimalAmount {}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.normalized();
        f.write_str(&render(n.value, n.scale))
    }
}

impl FromStr for DecimalAmount {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    #[test]
    fn to_raw_scales_by_decimals() {
        assert_eq!(to_raw("1", 6).unwrap(), U256::from(1_000_000u64));
        assert_eq!(to_raw("0.000001", 6).unwrap(), U256::from(1u64));
        assert_eq!(
            to_raw("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(
            to_raw("10", 18).unwrap(),
            U256::from(10_000_000_000_000_000_000u128)
        );
        assert_eq!(to_raw("42", 0).unwrap(), U256::from(42u64));
    }

    #[test]
    fn to_raw_handles_amounts_beyond_u64() {
        let raw = to_raw("123456789012345678901234567890", 18).unwrap();
        assert_eq!(
            raw.to_string(),
            "123456789012345678901234567890000000000000000000"
        );
    }

    #[test]
    fn to_raw_rejects_negative_and_malformed() {
        for input in ["-1", "+1", "", " ", "abc", "1e18", ".5", "5.", "1.2.3", "1,5", "0x10"] {
            assert_eq!(
                to_raw(input, 18),
                Err(QuoteError::InvalidAmount(input.to_string())),
                "{input:?}"
            );
        }
    }

    #[test]
    fn to_raw_is_strict_about_precision() {
        assert_eq!(
            to_raw("1.23456789", 6),
            Err(QuoteError::PrecisionLoss {
                amount: "1.23456789".to_string(),
                decimals: 6,
            })
        );
        assert_eq!(to_raw("1.234567", 6).unwrap(), U256::from(1_234_567u64));
    }

    #[test]
    fn to_raw_ignores_trailing_fraction_zeros() {
        assert_eq!(to_raw("1.50", 1).unwrap(), U256::from(15u64));
        assert_eq!(to_raw("7.000000000", 0).unwrap(), U256::from(7u64));
    }

    #[test]
    fn to_raw_trims_whitespace() {
        assert_eq!(to_raw("  2.5\n", 2).unwrap(), U256::from(250u64));
    }

    #[test]
    fn to_raw_overflow() {
        assert_eq!(
            to_raw("1", 78),
            Err(QuoteError::InvalidDecimals(78))
        );
        assert_eq!(
            to_raw(&U256::MAX.to_string(), 1),
            Err(QuoteError::Overflow("raw amount exceeds U256"))
        );
    }

    #[test]
    fn to_decimal_strings() {
        assert_eq!(
            to_decimal(U256::from(1_000_000u64), 6).unwrap().to_string(),
            "1"
        );
        assert_eq!(
            to_decimal(U256::from(1u64), 18).unwrap().to_string(),
            "0.000000000000000001"
        );
        assert_eq!(
            to_decimal(U256::from(25_000_000u64), 6).unwrap(),
            dec("25.0")
        );
        assert_eq!(to_decimal(U256::ZERO, 18).unwrap().to_string(), "0");
        assert_eq!(
            to_decimal(U256::from(1_234_500u64), 3).unwrap().to_string(),
            "1234.5"
        );
    }

    #[test]
    fn to_decimal_rejects_unscalable_decimals() {
        assert_eq!(
            to_decimal(U256::from(1u64), 200),
            Err(QuoteError::InvalidDecimals(200))
        );
        assert!(to_decimal(U256::MAX, MAX_DECIMALS).is_ok());
    }

    #[test]
    fn checked_decimals_rejects_negative() {
        assert_eq!(checked_decimals(-1), Err(QuoteError::InvalidDecimals(-1)));
        assert_eq!(checked_decimals(78), Err(QuoteError::InvalidDecimals(78)));
        assert_eq!(checked_decimals(6), Ok(6));
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(dec("25.000"), dec("25"));
        assert_eq!(dec("0.10"), dec("0.1"));
        assert_ne!(dec("0.1"), dec("0.01"));
        assert_eq!(dec("000.5"), dec("0.5"));
    }

    #[test]
    fn to_fixed_rounds_half_up() {
        assert_eq!(dec("1.23455").to_fixed(4).unwrap(), "1.2346");
        assert_eq!(dec("1.23454").to_fixed(4).unwrap(), "1.2345");
        assert_eq!(dec("0.99995").to_fixed(4).unwrap(), "1.0000");
        assert_eq!(dec("10").to_fixed(4).unwrap(), "10.0000");
        assert_eq!(dec("2.5").to_fixed(0).unwrap(), "3");
        assert_eq!(dec("0.00004").to_fixed(4).unwrap(), "0.0000");
    }

    #[test]
    fn round_down_truncates() {
        let r = dec("1.99999").round(2, Rounding::Down).unwrap();
        assert_eq!(r, dec("1.99"));
        assert_eq!(r.scale(), 2);
    }

    #[test]
    fn checked_div_exact_and_rounded() {
        assert_eq!(
            dec("25").checked_div(&dec("10"), 18, Rounding::Down).unwrap(),
            dec("2.5")
        );
        assert_eq!(
            dec("2").checked_div(&dec("3"), 4, Rounding::Down).unwrap(),
            dec("0.6666")
        );
        assert_eq!(
            dec("2").checked_div(&dec("3"), 4, Rounding::HalfUp).unwrap(),
            dec("0.6667")
        );
        assert_eq!(
            dec("0.000001").checked_div(&dec("1000"), 2, Rounding::HalfUp).unwrap(),
            DecimalAmount::ZERO
        );
    }

    #[test]
    fn checked_div_keeps_large_dividends() {
        let huge = DecimalAmount::parse(&format!("1{}", "0".repeat(60))).unwrap();
        assert_eq!(
            huge.checked_div(&dec("1"), 4, Rounding::HalfUp).unwrap(),
            huge
        );
        assert_eq!(
            huge.checked_div(&dec("3"), 10, Rounding::Down)
                .unwrap()
                .to_string(),
            format!("{}.{}", "3".repeat(60), "3".repeat(10))
        );
    }

    #[test]
    fn checked_div_fit_drops_digits_that_do_not_fit() {
        let huge = DecimalAmount::parse(&format!("1{}", "0".repeat(60))).unwrap();
        let rate = huge.checked_div_fit(&dec("1"), 18).unwrap();
        assert_eq!(rate, huge);
        assert!(rate.scale() < 18);

        let third = dec("1").checked_div_fit(&dec("3"), 18).unwrap();
        assert_eq!(third, dec("0.333333333333333333"));

        assert_eq!(
            huge.checked_div(&dec("1"), 18, Rounding::Down),
            Err(QuoteError::Overflow("quotient exceeds U256"))
        );
    }

    #[test]
    fn checked_div_by_zero() {
        assert_eq!(
            dec("1").checked_div(&dec("0.000"), 4, Rounding::Down),
            Err(QuoteError::DivisionByZero)
        );
    }

    fn any_u256() -> impl Strategy<Value = U256> {
        any::<[u64; 4]>().prop_map(U256::from_limbs)
    }

    proptest! {
        #[test]
        fn raw_decimal_round_trip(raw in any_u256(), decimals in 0u8..=MAX_DECIMALS) {
            let decimal = to_decimal(raw, decimals).unwrap();
            prop_assert_eq!(to_raw(&decimal.to_string(), decimals).unwrap(), raw);
        }

        #[test]
        fn to_fixed_matches_half_up_round(raw in any::<u128>(), decimals in 0u8..=18, precision in 0u8..=8) {
            let decimal = to_decimal(U256::from(raw), decimals).unwrap();
            let rounded = decimal.round(precision, Rounding::HalfUp).unwrap();
            let fixed = decimal.to_fixed(precision).unwrap();
            prop_assert_eq!(fixed.parse::<DecimalAmount>().unwrap(), rounded);
        }
    }
}
