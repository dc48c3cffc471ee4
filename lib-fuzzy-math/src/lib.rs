//! Fuzzy Math: integer-only fractional exponentiation
//!
//! Computes `floor(x^(a/b))` for positive integers using nothing but
//! integer comparison. The execution environments this math targets
//! meter every primitive operation and have no native floats, so the
//! interior algorithm is a bounded binary search rather than any kind
//! of iterative refinement.
//!
//! # Algorithm
//! The result is the unique integer `r` satisfying
//! `r^b <= x^a < (r+1)^b`. `x^a` is materialized once in a 256-bit
//! integer; candidates are raised to the `b`-th power with
//! exponentiation by squaring, with overflow read as "too big". An
//! exponential doubling pass brackets the root, then binary search
//! narrows it. Total work is O(log(bound)) steps.
//!
//! # Examples
//! ```
//! use lib_fuzzy_math::frax_exp;
//!
//! assert_eq!(frax_exp(64, 1, 2).unwrap(), 8);  // perfect square
//! assert_eq!(frax_exp(5, 1, 2).unwrap(), 2);   // floored
//! assert_eq!(frax_exp(8, 2, 1).unwrap(), 64);  // growth: a > b
//! ```

use thiserror::Error;
use uint::construct_uint;

construct_uint! {
    /// 256-bit integer for intermediate powers.
    pub struct U256(4);
}

/// Error during fractional exponentiation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyMathError {
    /// Exponent numerator or denominator is zero
    #[error("invalid exponent input: a and b must be >= 1")]
    InvalidExponentInput,

    /// Intermediate or final value exceeds the representable range
    #[error("arithmetic overflow")]
    Overflow,
}

/// Result type for fuzzy math operations
pub type FuzzyMathResult<T> = Result<T, FuzzyMathError>;

/// Compute `floor(x^(a/b))` using integer arithmetic only.
///
/// Exact for perfect powers, floored otherwise. `x = 0` is a defined
/// fixed point (`0^(a/b) = 0` for `a, b >= 1`) and returns without
/// entering the search, as do `x = 1` and `a == b`.
///
/// # Errors
/// * [`FuzzyMathError::InvalidExponentInput`] if `a == 0` or `b == 0`
/// * [`FuzzyMathError::Overflow`] if `x^a` exceeds 256 bits or the
///   result exceeds 128 bits
pub fn frax_exp(x: u128, a: u32, b: u32) -> FuzzyMathResult<u128> {
    if a == 0 || b == 0 {
        return Err(FuzzyMathError::InvalidExponentInput);
    }

    // Fixed points: no search required.
    if x == 0 {
        return Ok(0);
    }
    if x == 1 || a == b {
        return Ok(x);
    }

    let xa = U256::from(x)
        .checked_pow(U256::from(a))
        .ok_or(FuzzyMathError::Overflow)?;

    // Whole exponent: the power itself is the answer.
    if b == 1 {
        return narrow(xa);
    }

    // Bracket the root by doubling. For b >= 2 the root fits well
    // below 2^129, so the shift cannot wrap.
    let mut hi = U256::one();
    while pow_le(hi, b, xa) {
        hi <<= 1;
    }
    let mut lo = hi >> 1;

    // Invariant: lo^b <= x^a < hi^b.
    while hi - lo > U256::one() {
        let mid = (lo + hi) >> 1;
        if pow_le(mid, b, xa) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    narrow(lo)
}

/// `candidate^b <= limit`, with overflow of the power read as false.
fn pow_le(candidate: U256, b: u32, limit: U256) -> bool {
    match candidate.checked_pow(U256::from(b)) {
        Some(power) => power <= limit,
        None => false,
    }
}

fn narrow(value: U256) -> FuzzyMathResult<u128> {
    if value > U256::from(u128::MAX) {
        return Err(FuzzyMathError::Overflow);
    }
    Ok(value.low_u128())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Independent floor(sqrt(n)) via Newton's method on u128.
    fn isqrt(n: u128) -> u128 {
        if n < 2 {
            return n;
        }
        let mut guess = 1u128 << ((128 - n.leading_zeros()).div_ceil(2));
        loop {
            let next = (guess + n / guess) / 2;
            if next >= guess {
                return guess;
            }
            guess = next;
        }
    }

    fn fibs(limit: u128) -> Vec<u128> {
        let mut list = vec![1u128, 1];
        loop {
            let next = list[list.len() - 1] + list[list.len() - 2];
            if next > limit {
                return list;
            }
            list.push(next);
        }
    }

    #[test]
    fn test_perfect_squares() {
        for n in fibs(30_000) {
            assert_eq!(frax_exp(n * n, 1, 2).unwrap(), n, "sqrt of {}^2", n);
        }
    }

    #[test]
    fn test_perfect_cube_roots() {
        for n in fibs(1_000) {
            assert_eq!(frax_exp(n * n * n, 1, 3).unwrap(), n, "cbrt of {}^3", n);
        }
    }

    #[test]
    fn test_perfect_roots_arbitrary_fractional_exponents() {
        // All single-digit (a, b) pairs on i^b for i in [1, 9].
        for b in 2u32..10 {
            for a in 1u32..10 {
                for i in 1u128..10 {
                    let input = i.pow(b);
                    assert_eq!(
                        frax_exp(input, a, b).unwrap(),
                        i.pow(a),
                        "({}^{})^({}/{})",
                        i,
                        b,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_imperfect_square_roots() {
        let mut n = 1u128;
        while n < 1_000_000_000 {
            assert_eq!(frax_exp(n, 1, 2).unwrap(), isqrt(n), "sqrt of {}", n);
            n += n;
        }
    }

    #[test]
    fn test_imperfect_inputs_floor() {
        assert_eq!(frax_exp(5, 1, 2).unwrap(), 2);
        assert_eq!(frax_exp(63, 1, 2).unwrap(), 7);
        assert_eq!(frax_exp(65, 1, 2).unwrap(), 8);
        assert_eq!(frax_exp(26, 1, 3).unwrap(), 2);
        assert_eq!(frax_exp(4_782_969, 8, 7).unwrap(), 43_046_721); // (3^14)^(8/7) = 3^16
    }

    #[test]
    fn test_identity_and_fixed_points() {
        assert_eq!(frax_exp(7, 1, 1).unwrap(), 7);
        assert_eq!(frax_exp(7, 4, 4).unwrap(), 7);
        assert_eq!(frax_exp(0, 3, 2).unwrap(), 0);
        assert_eq!(frax_exp(1, 9, 2).unwrap(), 1);
    }

    #[test]
    fn test_growth_exponents() {
        // a > b: result exceeds x.
        assert_eq!(frax_exp(8, 2, 1).unwrap(), 64);
        assert_eq!(frax_exp(4, 3, 2).unwrap(), 8);
        assert_eq!(frax_exp(27, 4, 3).unwrap(), 81);
    }

    #[test]
    fn test_invalid_exponent_input() {
        assert_eq!(frax_exp(4, 0, 2), Err(FuzzyMathError::InvalidExponentInput));
        assert_eq!(frax_exp(4, 2, 0), Err(FuzzyMathError::InvalidExponentInput));
        assert_eq!(frax_exp(0, 0, 0), Err(FuzzyMathError::InvalidExponentInput));
    }

    #[test]
    fn test_overflow_detection() {
        // x^a beyond 256 bits.
        assert_eq!(frax_exp(u128::MAX, 3, 1), Err(FuzzyMathError::Overflow));
        // x^a fits in 256 bits but the result exceeds 128 bits.
        assert_eq!(frax_exp(u128::MAX, 2, 1), Err(FuzzyMathError::Overflow));
        // Root of the same quantity narrows fine.
        assert_eq!(frax_exp(u128::MAX, 2, 2).unwrap(), u128::MAX);
    }

    #[test]
    fn test_large_inputs_stay_exact() {
        let n = 3_037_000_499u128; // floor(sqrt(2^63))
        assert_eq!(frax_exp(n * n, 1, 2).unwrap(), n);
        assert_eq!(frax_exp(n * n + 1, 1, 2).unwrap(), n);
        assert_eq!(frax_exp(n * n - 1, 1, 2).unwrap(), n - 1);
    }
}
