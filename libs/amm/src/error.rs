//! Typed failures for pool and pricing operations
//!
//! Every variant carries the literal values that caused it so callers can
//! decide whether to resubmit with adjusted parameters.

use thiserror::Error;

pub type AmmResult<T> = Result<T, AmmError>;

/// Errors surfaced by the pool ledger model and the pricing engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// A supplied amount is zero or otherwise invalid for the operation
    #[error("Invalid amount for {field}: {value} ({reason})")]
    InvalidAmount {
        field: &'static str,
        value: u64,
        reason: &'static str,
    },

    /// Initialize called on a pool that already has shares outstanding
    #[error("Pool already initialized: {share_supply} shares outstanding")]
    AlreadyInitialized { share_supply: u64 },

    /// The pool cannot pay the computed output without draining a side
    #[error("Insufficient liquidity: reserve {reserve_out} cannot pay out {amount_out}")]
    InsufficientLiquidity { reserve_out: u64, amount_out: u64 },

    /// A deposit would mint zero shares
    #[error("Insufficient liquidity minted: deposit of ({amount_a}, {amount_b}) rounds to zero shares")]
    InsufficientLiquidityMinted { amount_a: u64, amount_b: u64 },

    /// The computed result breaches the caller's bound
    #[error("Slippage exceeded for {field}: computed {computed}, minimum {minimum}")]
    SlippageExceeded {
        field: &'static str,
        computed: u64,
        minimum: u64,
    },

    /// A proposed pool state breaks a ledger invariant
    #[error("Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    /// A result does not fit the reserve width
    #[error("Arithmetic overflow computing {context}")]
    Overflow { context: &'static str },

    /// Fee schedule is malformed or above the allowed maximum
    #[error("Invalid fee {numerator}/{denominator}")]
    InvalidFee { numerator: u64, denominator: u64 },

    /// Both sides of a pair name the same asset
    #[error("Invalid pair: both assets are {asset}")]
    InvalidPair { asset: String },
}

impl AmmError {
    pub fn zero_amount(field: &'static str) -> Self {
        Self::InvalidAmount {
            field,
            value: 0,
            reason: "must be non-zero",
        }
    }

    pub fn slippage(field: &'static str, computed: u64, minimum: u64) -> Self {
        Self::SlippageExceeded {
            field,
            computed,
            minimum,
        }
    }

    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    pub fn overflow(context: &'static str) -> Self {
        Self::Overflow { context }
    }
}
