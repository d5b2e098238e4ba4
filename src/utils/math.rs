//! Fixed-point conversions

use rust_decimal::prelude::*;
use crate::config::{E8, PRICE_DECIMALS};

/// E8 fixed-point integer to a human-readable decimal.
pub fn e8_to_decimal(value: u128) -> Decimal {
    match i128::try_from(value).ok().and_then(|v| Decimal::try_from_i128_with_scale(v, PRICE_DECIMALS).ok()) {
        Some(decimal) => decimal.normalize(),
        // Beyond Decimal's 96-bit mantissa: drop the fraction
        None => Decimal::from_u128(value / E8).unwrap_or(Decimal::MAX),
    }
}

/// Decimal to E8 fixed point, truncating extra fraction digits.
/// `None` for negative values or values that overflow `u128`.
pub fn decimal_to_e8(value: Decimal) -> Option<u128> {
    if value.is_sign_negative() {
        return None;
    }
    value.checked_mul(Decimal::from(E8 as u64))?.trunc().to_u128()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_between_decimal_and_e8() {
        assert_eq!(e8_to_decimal(100 * E8), dec!(100));
        assert_eq!(e8_to_decimal(99_009_900), dec!(0.990099));
        assert_eq!(decimal_to_e8(dec!(101.5)), Some(10_150_000_000));
        assert_eq!(decimal_to_e8(dec!(0.000000019)), Some(1));
        assert_eq!(decimal_to_e8(dec!(-1)), None);
    }
}
