//! Linear Bonding Curve Pricing
//!
//! Closed-form quadratic integration of the linear price curve
//! `p(x) = scale * x` where `scale = price_slope / 10^price_slope_decimals`:
//!
//! ```text
//!   AreaUnderCurve(s) = ∫ p(x) dx from 0 to s = scale/2 * s^2
//! ```
//!
//! Evaluated on WAD-scale integers with 256-bit intermediates and a
//! uniform truncation policy, so every evaluation is deterministic and
//! the area is monotone in supply. The exponent approximator in
//! `lib-fuzzy-math` is not needed here; it exists for curve shapes
//! without a closed-form integral.

use serde::{Deserialize, Serialize};

use crate::errors::{DerivedTokenError, TokenResult};
use crate::fixed::{mul_div, narrow, pow10, U256};
use crate::types::{Amount, WAD};

/// Linear price curve, immutable after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCurve {
    price_slope: u64,
    price_slope_decimals: u8,
}

impl LinearCurve {
    /// Create a linear curve with slope `price_slope / 10^price_slope_decimals`
    pub fn new(price_slope: u64, price_slope_decimals: u8) -> TokenResult<Self> {
        if price_slope == 0 {
            return Err(DerivedTokenError::InvalidParameters(
                "price slope must be positive".to_string(),
            ));
        }
        if price_slope_decimals > 18 {
            return Err(DerivedTokenError::InvalidParameters(
                "price slope decimals must be <= 18".to_string(),
            ));
        }
        Ok(Self {
            price_slope,
            price_slope_decimals,
        })
    }

    /// Area under the price curve from zero to `supply`, floored
    ///
    /// `= price_slope * supply^2 / (2 * 10^price_slope_decimals * WAD)`,
    /// with `supply` and the result at WAD scale.
    pub fn area_under_curve(&self, supply: Amount) -> TokenResult<Amount> {
        let s = U256::from(supply);
        let numerator = (s * s)
            .checked_mul(U256::from(self.price_slope))
            .ok_or(DerivedTokenError::Overflow)?;
        let denominator = U256::from(2u8) * pow10(self.price_slope_decimals) * U256::from(WAD);
        narrow(numerator / denominator)
    }

    /// Cost of minting `amount` on top of `supply`
    ///
    /// `= area(supply + amount) - area(supply)`. Strictly increasing in
    /// `amount` and well-defined at any supply.
    pub fn mint_cost(&self, supply: Amount, amount: Amount) -> TokenResult<Amount> {
        let new_supply = supply
            .checked_add(amount)
            .ok_or(DerivedTokenError::Overflow)?;
        let upper = self.area_under_curve(new_supply)?;
        let lower = self.area_under_curve(supply)?;
        upper.checked_sub(lower).ok_or(DerivedTokenError::Overflow)
    }

    /// Instantaneous marginal price `scale * supply`
    ///
    /// Equals the derivative of [`area_under_curve`](Self::area_under_curve).
    /// Observability only; mint/burn pricing always goes through the
    /// integral.
    pub fn spot_price(&self, supply: Amount) -> TokenResult<Amount> {
        mul_div(
            supply,
            self.price_slope as Amount,
            10u128.pow(self.price_slope_decimals as u32),
        )
    }

    /// Slope numerator
    pub fn price_slope(&self) -> u64 {
        self.price_slope
    }

    /// Slope decimal places
    pub fn price_slope_decimals(&self) -> u8 {
        self.price_slope_decimals
    }
}
