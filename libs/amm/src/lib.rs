//! # AMM Settlement Core - Constant-Product Pool Engine
//!
//! ## Purpose
//!
//! Prices and settles token swaps and liquidity changes against one pair's
//! pooled reserve, using integer-only constant-product arithmetic
//! (`reserve_a * reserve_b = k`) with every rounding step in the pool's
//! favour. No sequence of operations lets a participant extract more than
//! the formula allows.
//!
//! ## Integration Points
//!
//! - **Input**: a consistent [`Pool`] snapshot plus an [`Operation`]
//!   (swap / deposit / withdraw) with integer base-unit amounts
//! - **Output**: a new [`Pool`] snapshot plus the amounts moved, or a typed
//!   [`AmmError`] carrying the values that caused it
//! - **Persistence**: external. [`PoolBook`] is an in-memory reference ledger
//!   with versioned compare-and-swap commits
//!
//! ## Architecture Role
//!
//! ```text
//! caller ──(Pool, Operation)──▶ PricingEngine ──▶ Pool::with_state (I1/I2 guard)
//!                                     │
//!                                     └──▶ Outcome { pool', amounts } ──▶ ledger commit
//! ```
//!
//! The engine holds no state between calls, so two snapshots can never
//! interfere. Serialising concurrent writers is the ledger's job.
//!
//! ## Rounding
//!
//! - Swap output, withdrawal payouts and minted shares round **down**
//! - The required side of a ratio-matching deposit rounds **up**
//! - Reported swap fee rounds up

pub mod book;
pub mod engine;
pub mod error;
pub mod fees;
pub mod math;
pub mod operation;
pub mod pair;
pub mod pool;

pub use book::{BookError, PoolBook, VersionedPool};
pub use engine::{initialize_pool, PricingEngine};
pub use error::{AmmError, AmmResult};
pub use fees::FeeSchedule;
pub use operation::{
    DepositOutcome, Direction, Operation, Outcome, SwapOutcome, SwapQuote, WithdrawOutcome,
};
pub use pair::{AssetId, PairId};
pub use pool::{Pool, PoolRecord};
