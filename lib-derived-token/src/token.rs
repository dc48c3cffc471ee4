//! Derived Token Contract
//!
//! A derived token prices mint and burn against a linear bonding curve
//! and holds a reserve-token collateral position. The engine is
//! serialized: each operation runs to completion, and every fallible
//! computation happens before the first mutation, so callers see full
//! success or full rollback.
//!
//! # Invariants
//! - `reserve_requirement == mint_burn_ratio% * AreaUnderCurve(total_supply)`
//!   after every successful operation
//! - `treasury_balance == reserve held - reserve_requirement` under the
//!   mint/burn flow
//! - Administrative supply changes never move reserve tokens and never
//!   touch `treasury_balance`; the requirement is recomputed from the
//!   curve alone. This can leave the position under-collateralized
//!   relative to actual holdings; a known economic caveat, not a bug.

use serde::{Deserialize, Serialize};

use crate::curve::LinearCurve;
use crate::errors::{DerivedTokenError, TokenResult};
use crate::events::DerivedTokenEvent;
use crate::ledger::{FungibleLedger, InMemoryLedger};
use crate::types::{Address, Amount, CurveParams, TokenId};

/// Derived token governed by a linear bonding curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedToken {
    // === Identity ===
    /// Unique token identifier
    token_id: TokenId,
    /// Token name
    name: String,
    /// Token symbol
    symbol: String,
    /// Token decimals (WAD scale)
    decimals: u8,

    // === Authority ===
    /// Owner allowed to adjust supply administratively
    owner: Address,
    /// Address holding the reserve collateral
    contract_address: Address,

    // === Curve ===
    /// Immutable curve parameters
    params: CurveParams,
    /// Pricing curve derived from the parameters
    curve: LinearCurve,

    // === State ===
    /// Balance book for the derived token itself
    ledger: InMemoryLedger,
    /// `mint_burn_ratio% * AreaUnderCurve(total_supply)`, floored
    reserve_requirement: Amount,
    /// Cumulative spread retained from mint/burn flow
    treasury_balance: Amount,
}

impl DerivedToken {
    /// Deploy a new derived token at zero supply
    pub fn new(
        token_id: TokenId,
        name: String,
        symbol: String,
        owner: Address,
        contract_address: Address,
        params: CurveParams,
    ) -> TokenResult<Self> {
        if name.is_empty() {
            return Err(DerivedTokenError::InvalidParameters(
                "name cannot be empty".to_string(),
            ));
        }
        if symbol.is_empty() {
            return Err(DerivedTokenError::InvalidParameters(
                "symbol cannot be empty".to_string(),
            ));
        }
        params.validate()?;
        let curve = LinearCurve::new(params.price_slope, params.price_slope_decimals)?;

        Ok(Self {
            token_id,
            name,
            symbol,
            decimals: crate::DEFAULT_DECIMALS,
            owner,
            contract_address,
            params,
            curve,
            ledger: InMemoryLedger::new(),
            reserve_requirement: 0,
            treasury_balance: 0,
        })
    }

    // ========================================================================
    // PRICING (read-only)
    // ========================================================================

    /// Reserve requirement the curve formula demands at `supply`
    fn reserve_requirement_at(&self, supply: Amount) -> TokenResult<Amount> {
        let area = self.curve.area_under_curve(supply)?;
        crate::fixed::mul_div(area, self.params.mint_burn_ratio as Amount, 100)
    }

    /// Cost in reserve tokens of minting `amount` at the current supply
    pub fn calculate_mint_cost(&self, amount: Amount) -> TokenResult<Amount> {
        self.curve.mint_cost(self.ledger.total_supply(), amount)
    }

    /// Reserve tokens returned for burning `amount` at the current supply
    ///
    /// Computed as the reserve-requirement delta, which equals
    /// `mint_burn_ratio% * (area(supply) - area(supply - amount))` under
    /// the uniform truncation policy and keeps the treasury exact to
    /// the base unit.
    ///
    /// # Errors
    /// [`DerivedTokenError::BurnExceedsSupply`] if `amount` exceeds the
    /// outstanding supply.
    pub fn calculate_burn_return(&self, amount: Amount) -> TokenResult<Amount> {
        let supply = self.ledger.total_supply();
        if amount > supply {
            return Err(DerivedTokenError::BurnExceedsSupply);
        }

        let current = self.reserve_requirement_at(supply)?;
        let remaining = self.reserve_requirement_at(supply - amount)?;
        current
            .checked_sub(remaining)
            .ok_or(DerivedTokenError::Overflow)
    }

    // ========================================================================
    // MINT / BURN
    // ========================================================================

    /// Mint `amount` derived tokens to `caller` against reserve collateral
    ///
    /// Debits the mint cost from `caller`'s reserve allowance, credits
    /// the derived tokens, and books the spread between cost and the
    /// reserve-requirement increase into the treasury. The reserve
    /// transfer is the only fallible step after validation, so a
    /// shortfall (`InsufficientAllowance` / `InsufficientBalance`)
    /// leaves no state change.
    pub fn mint(
        &mut self,
        reserve: &mut dyn FungibleLedger,
        caller: Address,
        amount: Amount,
    ) -> TokenResult<(Amount, DerivedTokenEvent)> {
        if amount == 0 {
            return Err(DerivedTokenError::ZeroAmount);
        }

        let supply = self.ledger.total_supply();
        let new_supply = supply
            .checked_add(amount)
            .ok_or(DerivedTokenError::Overflow)?;
        let cost = self.curve.mint_cost(supply, amount)?;
        let new_requirement = self.reserve_requirement_at(new_supply)?;
        let requirement_delta = new_requirement
            .checked_sub(self.reserve_requirement)
            .ok_or(DerivedTokenError::Overflow)?;
        let spread = cost
            .checked_sub(requirement_delta)
            .ok_or(DerivedTokenError::Overflow)?;
        let new_treasury = self
            .treasury_balance
            .checked_add(spread)
            .ok_or(DerivedTokenError::Overflow)?;

        reserve.transfer_from(self.contract_address, caller, self.contract_address, cost)?;

        // Cannot fail: new_supply was checked above.
        self.ledger.mint(caller, amount)?;
        self.reserve_requirement = new_requirement;
        self.treasury_balance = new_treasury;

        tracing::debug!(
            token = %self.token_id,
            %caller,
            amount,
            cost,
            total_supply = new_supply,
            "minted derived tokens"
        );

        let event = DerivedTokenEvent::Minted {
            token_id: self.token_id,
            caller,
            amount,
            cost,
            total_supply: new_supply,
        };
        Ok((cost, event))
    }

    /// Burn `amount` of `caller`'s derived tokens for a reserve refund
    ///
    /// The refund is the reserve-requirement delta; the treasury is
    /// untouched, which is what makes the retained spread permanent.
    pub fn burn(
        &mut self,
        reserve: &mut dyn FungibleLedger,
        caller: Address,
        amount: Amount,
    ) -> TokenResult<(Amount, DerivedTokenEvent)> {
        if amount == 0 {
            return Err(DerivedTokenError::ZeroAmount);
        }

        let balance = self.ledger.balance_of(&caller);
        if amount > balance {
            return Err(DerivedTokenError::BurnExceedsBalance);
        }

        // Supply check is implied by the balance check but performed
        // independently as defense in depth.
        let refund = self.calculate_burn_return(amount)?;
        let supply = self.ledger.total_supply();
        let new_supply = supply
            .checked_sub(amount)
            .ok_or(DerivedTokenError::Overflow)?;
        let new_requirement = self.reserve_requirement_at(new_supply)?;

        reserve.transfer(self.contract_address, caller, refund)?;

        // Cannot fail: balance was checked above.
        self.ledger.burn(caller, amount)?;
        self.reserve_requirement = new_requirement;

        tracing::debug!(
            token = %self.token_id,
            %caller,
            amount,
            refund,
            total_supply = new_supply,
            "burned derived tokens"
        );

        let event = DerivedTokenEvent::Burned {
            token_id: self.token_id,
            caller,
            amount,
            refund,
            total_supply: new_supply,
        };
        Ok((refund, event))
    }

    // ========================================================================
    // ADMINISTRATIVE SUPPLY OVERRIDES (owner only)
    // ========================================================================

    /// Mint `amount` to the owner without moving reserve tokens
    ///
    /// The reserve requirement is recomputed from the curve; the
    /// treasury is left untouched because no collateral moved.
    pub fn increase_supply(
        &mut self,
        caller: Address,
        amount: Amount,
    ) -> TokenResult<DerivedTokenEvent> {
        if caller != self.owner {
            return Err(DerivedTokenError::NotOwner);
        }
        if amount == 0 {
            return Err(DerivedTokenError::ZeroAmount);
        }

        let new_supply = self
            .ledger
            .total_supply()
            .checked_add(amount)
            .ok_or(DerivedTokenError::Overflow)?;
        let new_requirement = self.reserve_requirement_at(new_supply)?;

        self.ledger.mint(self.owner, amount)?;
        self.reserve_requirement = new_requirement;

        tracing::info!(
            token = %self.token_id,
            amount,
            total_supply = new_supply,
            reserve_requirement = new_requirement,
            "owner increased supply"
        );

        Ok(DerivedTokenEvent::SupplyIncreased {
            token_id: self.token_id,
            amount,
            total_supply: new_supply,
            reserve_requirement: new_requirement,
        })
    }

    /// Burn `amount` from the owner without moving reserve tokens
    pub fn decrease_supply(
        &mut self,
        caller: Address,
        amount: Amount,
    ) -> TokenResult<DerivedTokenEvent> {
        if caller != self.owner {
            return Err(DerivedTokenError::NotOwner);
        }
        if amount == 0 {
            return Err(DerivedTokenError::ZeroAmount);
        }
        if amount > self.ledger.balance_of(&self.owner) {
            return Err(DerivedTokenError::BurnExceedsBalance);
        }

        let new_supply = self
            .ledger
            .total_supply()
            .checked_sub(amount)
            .ok_or(DerivedTokenError::Overflow)?;
        let new_requirement = self.reserve_requirement_at(new_supply)?;

        self.ledger.burn(self.owner, amount)?;
        self.reserve_requirement = new_requirement;

        tracing::info!(
            token = %self.token_id,
            amount,
            total_supply = new_supply,
            reserve_requirement = new_requirement,
            "owner decreased supply"
        );

        Ok(DerivedTokenEvent::SupplyDecreased {
            token_id: self.token_id,
            amount,
            total_supply: new_supply,
            reserve_requirement: new_requirement,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Outstanding derived-token supply
    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Derived-token balance of a holder
    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.ledger.balance_of(holder)
    }

    /// Reserve the curve formula requires at the current supply
    pub fn reserve_requirement(&self) -> Amount {
        self.reserve_requirement
    }

    /// Spread retained from mint/burn flow
    pub fn treasury_balance(&self) -> Amount {
        self.treasury_balance
    }

    /// Instantaneous marginal price at the current supply
    pub fn exchange_rate(&self) -> TokenResult<Amount> {
        self.curve.spot_price(self.ledger.total_supply())
    }

    pub fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Address holding the reserve collateral
    pub fn contract_address(&self) -> &Address {
        &self.contract_address
    }

    pub fn price_slope(&self) -> u64 {
        self.params.price_slope
    }

    pub fn price_slope_decimals(&self) -> u8 {
        self.params.price_slope_decimals
    }

    pub fn mint_burn_ratio(&self) -> u8 {
        self.params.mint_burn_ratio
    }

    /// Identity of the reserve (collateral) token
    pub fn reserve_token(&self) -> &TokenId {
        &self.params.reserve_token
    }
}
