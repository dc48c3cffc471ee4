//! Derived Token Errors

use crate::types::Amount;
use thiserror::Error;

/// Error during derived-token operations
///
/// Every error is terminal for the triggering call: no local recovery,
/// no partial state commit. The caller may resubmit with corrected
/// inputs (e.g. after raising an allowance).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivedTokenError {
    /// Burn or burn-return calculation against more than outstanding supply
    #[error("burn amount exceeds total supply")]
    BurnExceedsSupply,

    /// Burn against more than the holder's own balance
    #[error("burn amount exceeds balance")]
    BurnExceedsBalance,

    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    /// Administrative call by a non-owner
    #[error("caller is not the owner")]
    NotOwner,

    /// Fixed-point computation would exceed the representable range
    #[error("arithmetic overflow")]
    Overflow,

    #[error("zero amount not allowed")]
    ZeroAmount,

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for derived-token operations
pub type TokenResult<T> = Result<T, DerivedTokenError>;
