//! Operation requests and their outcomes
//!
//! Requests are a single tagged variant so one engine entry point handles
//! swaps, deposits and withdrawals.

use crate::pool::Pool;
use serde::{Deserialize, Serialize};

/// Which reserve the swap input is paid into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Pay asset A, receive asset B
    AToB,
    /// Pay asset B, receive asset A
    BToA,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::AToB => Direction::BToA,
            Direction::BToA => Direction::AToB,
        }
    }
}

/// A caller's intended operation against one pool snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    Swap {
        amount_in: u64,
        min_amount_out: u64,
        direction: Direction,
    },
    Deposit {
        amount_a_desired: u64,
        amount_b_desired: u64,
        min_shares: u64,
    },
    Withdraw {
        shares_in: u64,
        min_amount_a: u64,
        min_amount_b: u64,
    },
}

/// Read-only preview of a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount_out: u64,
    pub fee_paid: u64,
    /// `floor(amount_in * 10_000 / reserve_in)`; may exceed 10_000 for
    /// trades larger than the input reserve
    pub price_impact_bps: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub pool: Pool,
    pub amount_out: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositOutcome {
    pub pool: Pool,
    pub shares_minted: u64,
    /// Amount of A actually taken, never above the desired amount
    pub amount_a: u64,
    /// Amount of B actually taken, never above the desired amount
    pub amount_b: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawOutcome {
    pub pool: Pool,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Result of [`Operation`] dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Swap(SwapOutcome),
    Deposit(DepositOutcome),
    Withdraw(WithdrawOutcome),
}

impl Outcome {
    /// The new pool snapshot the caller must persist
    pub fn pool(&self) -> &Pool {
        match self {
            Outcome::Swap(outcome) => &outcome.pool,
            Outcome::Deposit(outcome) => &outcome.pool,
            Outcome::Withdraw(outcome) => &outcome.pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_json_is_tagged() {
        let op = Operation::Swap {
            amount_in: 10,
            min_amount_out: 18,
            direction: Direction::AToB,
        };
        let json = serde_json::to_value(op).unwrap();
        assert_eq!(json["kind"], "swap");
        assert_eq!(json["direction"], "a_to_b");

        let parsed: Operation = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, op);
    }

    #[test]
    fn test_direction_reverse() {
        assert_eq!(Direction::AToB.reverse(), Direction::BToA);
        assert_eq!(Direction::BToA.reverse().reverse(), Direction::BToA);
    }
}
