//! Core types for the bonding-curve reserve engine
//!
//! All external quantities (supply, balances, costs, refunds) are
//! fixed-point integers at the WAD scale: "1.0" = 10^18 base units.
//! Identifiers are fixed-size byte newtypes; no dynamic identifiers in
//! engine state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DerivedTokenError, TokenResult};

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Token amounts at WAD scale (supports up to ~340 undecillion base units)
pub type Amount = u128;

/// Fixed-point base-unit scale: "1.0"
pub const WAD: Amount = 1_000_000_000_000_000_000;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// 32-byte account address
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Create a new Address from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a zeroed Address
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// 32-byte token identifier
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub struct TokenId(pub [u8; 32]);

impl TokenId {
    /// Create a new TokenId from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for TokenId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// ============================================================================
// CURVE PARAMETERS
// ============================================================================

/// Immutable bonding-curve parameters, fixed at construction
///
/// The linear price curve is `price = price_slope / 10^price_slope_decimals
/// * supply`. `mint_burn_ratio` is the percentage of the mint integral
/// returned on burn; the remainder is retained as treasury spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Positive numerator of the linear price-curve slope
    pub price_slope: u64,
    /// Decimal places the slope is expressed in
    pub price_slope_decimals: u8,
    /// Percentage of the mint integral returned on burn, in [0, 100]
    pub mint_burn_ratio: u8,
    /// Identity of the external fungible ledger used as collateral
    pub reserve_token: TokenId,
}

impl CurveParams {
    /// Validate parameter ranges
    pub fn validate(&self) -> TokenResult<()> {
        if self.price_slope == 0 {
            return Err(DerivedTokenError::InvalidParameters(
                "price slope must be positive".to_string(),
            ));
        }
        if self.price_slope_decimals > 18 {
            return Err(DerivedTokenError::InvalidParameters(
                "price slope decimals must be <= 18".to_string(),
            ));
        }
        if self.mint_burn_ratio > 100 {
            return Err(DerivedTokenError::InvalidParameters(
                "mint/burn ratio must be <= 100".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(slope: u64, decimals: u8, ratio: u8) -> CurveParams {
        CurveParams {
            price_slope: slope,
            price_slope_decimals: decimals,
            mint_burn_ratio: ratio,
            reserve_token: TokenId::default(),
        }
    }

    #[test]
    fn test_valid_params() {
        assert!(params(1000, 6, 80).validate().is_ok());
        assert!(params(1, 0, 0).validate().is_ok());
        assert!(params(1, 18, 100).validate().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            params(0, 6, 80).validate(),
            Err(DerivedTokenError::InvalidParameters(_))
        ));
        assert!(matches!(
            params(1000, 19, 80).validate(),
            Err(DerivedTokenError::InvalidParameters(_))
        ));
        assert!(matches!(
            params(1000, 6, 101).validate(),
            Err(DerivedTokenError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_address_display() {
        let addr = Address::new([0xab; 32]);
        assert_eq!(format!("{}", addr), "ab".repeat(32));
        assert_eq!(format!("{:?}", addr), "Address(abababababababab)");
    }
}
