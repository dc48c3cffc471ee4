//! Shared fixed-point utilities
//!
//! All engine math runs on WAD-scale integers with 256-bit
//! intermediates. The single rounding policy is truncation: results
//! are floored at every evaluation, never rounded to nearest, so
//! repeated calls are deterministic and monotone.

use uint::construct_uint;

use crate::errors::{DerivedTokenError, TokenResult};
use crate::types::Amount;

construct_uint! {
    /// 256-bit integer for precise intermediate math.
    pub struct U256(4);
}

/// Narrow a 256-bit intermediate back to an [`Amount`].
pub(crate) fn narrow(value: U256) -> TokenResult<Amount> {
    if value > U256::from(Amount::MAX) {
        return Err(DerivedTokenError::Overflow);
    }
    Ok(value.low_u128())
}

/// `floor(a * b / den)` with a 256-bit intermediate product.
///
/// The product of two 128-bit values always fits in 256 bits, so the
/// only failure modes are a zero denominator and a quotient that does
/// not narrow back to 128 bits.
pub fn mul_div(a: Amount, b: Amount, den: Amount) -> TokenResult<Amount> {
    if den == 0 {
        return Err(DerivedTokenError::InvalidParameters(
            "division by zero".to_string(),
        ));
    }
    narrow(U256::from(a) * U256::from(b) / U256::from(den))
}

/// `10^exp` as a 256-bit integer. Callers validate `exp <= 18`.
pub(crate) fn pow10(exp: u8) -> U256 {
    U256::from(10u8).pow(U256::from(exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_truncates() {
        assert_eq!(mul_div(7, 3, 2).unwrap(), 10); // 21 / 2 floored
        assert_eq!(mul_div(1, 1, 3).unwrap(), 0);
        assert_eq!(mul_div(0, u128::MAX, 1).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        // a * b overflows u128 but the quotient fits.
        assert_eq!(mul_div(u128::MAX, 100, u128::MAX).unwrap(), 100);
        // 2^128 - 1 is divisible by 5, so 80% of it is exact.
        assert_eq!(mul_div(u128::MAX, 80, 100).unwrap(), u128::MAX / 5 * 4);
    }

    #[test]
    fn test_mul_div_overflow() {
        assert_eq!(
            mul_div(u128::MAX, u128::MAX, 1),
            Err(DerivedTokenError::Overflow)
        );
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        assert!(matches!(
            mul_div(1, 1, 0),
            Err(DerivedTokenError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), U256::from(1u8));
        assert_eq!(pow10(6), U256::from(1_000_000u64));
        assert_eq!(pow10(18), U256::from(crate::types::WAD));
    }
}
