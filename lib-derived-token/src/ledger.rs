//! Fungible Ledger Capability
//!
//! The reserve engine consumes an external fungible-ledger token as
//! collateral and keeps its own derived-token balance book. Both sides
//! go through the [`FungibleLedger`] trait so the engine can be tested
//! against an in-memory ledger without any execution-context baggage.
//!
//! Shortfall errors (`InsufficientBalance`, `InsufficientAllowance`,
//! `BurnExceedsBalance`) originate here and are propagated by the
//! engine, not generated locally.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{DerivedTokenError, TokenResult};
use crate::types::{Address, Amount};

/// Minimal fungible-ledger interface
///
/// Mirrors the standard balance / allowance / delegated-transfer
/// surface. `mint` and `burn` are permissioned operations: only the
/// ledger's controlling contract calls them.
pub trait FungibleLedger {
    /// Balance of a holder
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Total supply in circulation
    fn total_supply(&self) -> Amount;

    /// Remaining allowance granted by `owner` to `spender`
    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Grant `spender` an allowance over `owner`'s balance
    fn approve(&mut self, owner: Address, spender: Address, amount: Amount);

    /// Move `amount` from `from` to `to`
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> TokenResult<()>;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> TokenResult<()>;

    /// Create `amount` new units credited to `to`
    fn mint(&mut self, to: Address, amount: Amount) -> TokenResult<()>;

    /// Destroy `amount` units held by `from`
    fn burn(&mut self, from: Address, amount: Amount) -> TokenResult<()>;
}

/// In-memory fungible ledger
///
/// Backs the derived token's own balance book and stands in for the
/// reserve token in tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FungibleLedger for InMemoryLedger {
    fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> TokenResult<()> {
        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(DerivedTokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        // Self-transfer is a funded no-op.
        if from == to {
            return Ok(());
        }

        let to_balance = self.balance_of(&to);
        let new_to_balance = to_balance
            .checked_add(amount)
            .ok_or(DerivedTokenError::Overflow)?;

        self.balances.insert(from, from_balance - amount);
        self.balances.insert(to, new_to_balance);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> TokenResult<()> {
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            return Err(DerivedTokenError::InsufficientAllowance {
                have: allowed,
                need: amount,
            });
        }

        self.transfer(from, to, amount)?;
        self.allowances.insert((from, spender), allowed - amount);
        Ok(())
    }

    fn mint(&mut self, to: Address, amount: Amount) -> TokenResult<()> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(DerivedTokenError::Overflow)?;
        let new_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(DerivedTokenError::Overflow)?;

        self.total_supply = new_supply;
        self.balances.insert(to, new_balance);
        Ok(())
    }

    fn burn(&mut self, from: Address, amount: Amount) -> TokenResult<()> {
        let balance = self.balance_of(&from);
        if balance < amount {
            return Err(DerivedTokenError::BurnExceedsBalance);
        }

        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(DerivedTokenError::Overflow)?;
        self.balances.insert(from, balance - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(id: u8) -> Address {
        Address::new([id; 32])
    }

    #[test]
    fn test_mint_and_burn() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(addr(1), 1_000).unwrap();
        ledger.mint(addr(2), 500).unwrap();

        assert_eq!(ledger.total_supply(), 1_500);
        assert_eq!(ledger.balance_of(&addr(1)), 1_000);

        ledger.burn(addr(1), 400).unwrap();
        assert_eq!(ledger.balance_of(&addr(1)), 600);
        assert_eq!(ledger.total_supply(), 1_100);
    }

    #[test]
    fn test_burn_exceeds_balance() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(addr(1), 100).unwrap();

        let result = ledger.burn(addr(1), 101);
        assert_eq!(result, Err(DerivedTokenError::BurnExceedsBalance));
        // Nothing changed.
        assert_eq!(ledger.balance_of(&addr(1)), 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn test_transfer() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(addr(1), 1_000).unwrap();

        ledger.transfer(addr(1), addr(2), 300).unwrap();
        assert_eq!(ledger.balance_of(&addr(1)), 700);
        assert_eq!(ledger.balance_of(&addr(2)), 300);

        let result = ledger.transfer(addr(1), addr(2), 701);
        assert_eq!(
            result,
            Err(DerivedTokenError::InsufficientBalance {
                have: 700,
                need: 701
            })
        );
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(addr(1), 1_000).unwrap();
        ledger.approve(addr(1), addr(9), 600);

        ledger.transfer_from(addr(9), addr(1), addr(2), 400).unwrap();
        assert_eq!(ledger.balance_of(&addr(2)), 400);
        assert_eq!(ledger.allowance(&addr(1), &addr(9)), 200);

        let result = ledger.transfer_from(addr(9), addr(1), addr(2), 300);
        assert_eq!(
            result,
            Err(DerivedTokenError::InsufficientAllowance {
                have: 200,
                need: 300
            })
        );
    }

    #[test]
    fn test_transfer_from_insufficient_balance_keeps_allowance() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(addr(1), 100).unwrap();
        ledger.approve(addr(1), addr(9), 500);

        let result = ledger.transfer_from(addr(9), addr(1), addr(2), 200);
        assert_eq!(
            result,
            Err(DerivedTokenError::InsufficientBalance {
                have: 100,
                need: 200
            })
        );
        assert_eq!(ledger.allowance(&addr(1), &addr(9)), 500);
    }
}
