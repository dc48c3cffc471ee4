//! Derived Token Events
//!
//! Every supply-changing operation returns an event describing the
//! transition, for callers that index or audit curve activity.

use serde::{Deserialize, Serialize};

use crate::types::{Address, Amount, TokenId};

/// Derived-token state-change events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DerivedTokenEvent {
    /// Tokens minted against reserve collateral
    Minted {
        /// Token identifier
        token_id: TokenId,
        /// Minting account
        caller: Address,
        /// Derived tokens created
        amount: Amount,
        /// Reserve tokens collected
        cost: Amount,
        /// Supply after the mint
        total_supply: Amount,
    },

    /// Tokens burned for a reserve refund
    Burned {
        /// Token identifier
        token_id: TokenId,
        /// Burning account
        caller: Address,
        /// Derived tokens destroyed
        amount: Amount,
        /// Reserve tokens refunded
        refund: Amount,
        /// Supply after the burn
        total_supply: Amount,
    },

    /// Owner increased supply without moving reserve tokens
    SupplyIncreased {
        /// Token identifier
        token_id: TokenId,
        /// Derived tokens created
        amount: Amount,
        /// Supply after the adjustment
        total_supply: Amount,
        /// Recomputed reserve requirement
        reserve_requirement: Amount,
    },

    /// Owner decreased supply without moving reserve tokens
    SupplyDecreased {
        /// Token identifier
        token_id: TokenId,
        /// Derived tokens destroyed
        amount: Amount,
        /// Supply after the adjustment
        total_supply: Amount,
        /// Recomputed reserve requirement
        reserve_requirement: Amount,
    },
}

impl DerivedTokenEvent {
    /// Get the token ID associated with this event
    pub fn token_id(&self) -> &TokenId {
        match self {
            DerivedTokenEvent::Minted { token_id, .. } => token_id,
            DerivedTokenEvent::Burned { token_id, .. } => token_id,
            DerivedTokenEvent::SupplyIncreased { token_id, .. } => token_id,
            DerivedTokenEvent::SupplyDecreased { token_id, .. } => token_id,
        }
    }

    /// Supply after the transition
    pub fn total_supply(&self) -> Amount {
        match self {
            DerivedTokenEvent::Minted { total_supply, .. } => *total_supply,
            DerivedTokenEvent::Burned { total_supply, .. } => *total_supply,
            DerivedTokenEvent::SupplyIncreased { total_supply, .. } => *total_supply,
            DerivedTokenEvent::SupplyDecreased { total_supply, .. } => *total_supply,
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DerivedTokenEvent::Minted { .. } => "minted",
            DerivedTokenEvent::Burned { .. } => "burned",
            DerivedTokenEvent::SupplyIncreased { .. } => "supply_increased",
            DerivedTokenEvent::SupplyDecreased { .. } => "supply_decreased",
        }
    }
}
