//! Derived Token Bonding-Curve Reserve Engine
//!
//! Prices mint and burn of a derived token against a reserve (base)
//! token using a linear bonding curve, tracks the treasury spread
//! between mint cost and burn refund, and enforces supply invariants
//! under owner-controlled overrides.
//!
//! # Architecture
//! - [`DerivedToken`]: the reserve engine and its state machine
//! - [`LinearCurve`]: closed-form quadratic pricing
//! - [`FungibleLedger`]: capability interface for the reserve token,
//!   satisfiable by [`InMemoryLedger`] for tests
//! - `fixed`: WAD-scale fixed-point utilities with 256-bit intermediates
//! - [`DerivedTokenEvent`]: state-transition events for indexing
//!
//! # Execution model
//! Serialized, one operation at a time. Every operation either commits
//! all ledger and state mutations or none; failures surface
//! immediately as [`DerivedTokenError`] with no internal retry.
//! All quantities are fixed-point integers at the 10^18 base-unit
//! scale; no floating point anywhere.

pub mod curve;
pub mod errors;
pub mod events;
pub mod fixed;
pub mod ledger;
pub mod token;
pub mod types;

pub use curve::LinearCurve;
pub use errors::{DerivedTokenError, TokenResult};
pub use events::DerivedTokenEvent;
pub use ledger::{FungibleLedger, InMemoryLedger};
pub use token::DerivedToken;
pub use types::{Address, Amount, CurveParams, TokenId, WAD};

/// Default derived-token decimals (WAD scale)
pub const DEFAULT_DECIMALS: u8 = 18;
