//! Pool ledger model
//!
//! Holds one pair's reserves and share supply and guards every state change
//! against the ledger invariants:
//!
//! - **I1**: both reserves are zero exactly when the share supply is zero
//! - **I2**: a pool with shares outstanding holds both assets
//!
//! The model does no pricing. The engine proposes a new triple and the model
//! either accepts it whole or rejects it with no change.

use crate::error::{AmmError, AmmResult};
use crate::operation::Direction;
use crate::pair::{AssetId, PairId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reserve and share state of one trading pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PoolRecord", into = "PoolRecord")]
pub struct Pool {
    pair: PairId,
    reserve_a: u64,
    reserve_b: u64,
    share_supply: u64,
}

impl Pool {
    /// Empty pool for `pair`; the first deposit sets the price
    pub fn new(pair: PairId) -> Self {
        Self {
            pair,
            reserve_a: 0,
            reserve_b: 0,
            share_supply: 0,
        }
    }

    /// Validated snapshot from stored values
    pub fn from_parts(
        pair: PairId,
        reserve_a: u64,
        reserve_b: u64,
        share_supply: u64,
    ) -> AmmResult<Self> {
        let mut pool = Self::new(pair);
        pool.apply(reserve_a, reserve_b, share_supply)?;
        Ok(pool)
    }

    /// Replace the whole state atomically, or reject and leave it untouched
    pub fn apply(&mut self, reserve_a: u64, reserve_b: u64, share_supply: u64) -> AmmResult<()> {
        validate_state(reserve_a, reserve_b, share_supply)?;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.share_supply = share_supply;
        Ok(())
    }

    /// Copy of this pool with a new validated state
    pub fn with_state(&self, reserve_a: u64, reserve_b: u64, share_supply: u64) -> AmmResult<Self> {
        let mut next = *self;
        next.apply(reserve_a, reserve_b, share_supply)?;
        Ok(next)
    }

    pub fn pair(&self) -> PairId {
        self.pair
    }

    pub fn reserve_a(&self) -> u64 {
        self.reserve_a
    }

    pub fn reserve_b(&self) -> u64 {
        self.reserve_b
    }

    pub fn share_supply(&self) -> u64 {
        self.share_supply
    }

    pub fn is_empty(&self) -> bool {
        self.share_supply == 0
    }

    /// `(reserve_in, reserve_out)` for a swap in `direction`
    pub fn reserves(&self, direction: Direction) -> (u64, u64) {
        match direction {
            Direction::AToB => (self.reserve_a, self.reserve_b),
            Direction::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// Constant product `reserve_a * reserve_b`
    pub fn invariant(&self) -> u128 {
        self.reserve_a as u128 * self.reserve_b as u128
    }

    /// Display price of A in units of B; `None` for an empty pool.
    /// Presentation only: pricing never reads it.
    pub fn spot_price(&self) -> Option<Decimal> {
        if self.reserve_a == 0 {
            return None;
        }
        Decimal::from(self.reserve_b).checked_div(Decimal::from(self.reserve_a))
    }
}

fn validate_state(reserve_a: u64, reserve_b: u64, share_supply: u64) -> AmmResult<()> {
    let reserves_empty = reserve_a == 0 && reserve_b == 0;
    let shares_empty = share_supply == 0;

    if reserves_empty != shares_empty {
        return Err(AmmError::invariant(format!(
            "reserves ({reserve_a}, {reserve_b}) inconsistent with share supply {share_supply}"
        )));
    }
    if !shares_empty && (reserve_a == 0 || reserve_b == 0) {
        return Err(AmmError::invariant(format!(
            "pool with {share_supply} shares must hold both assets, got ({reserve_a}, {reserve_b})"
        )));
    }
    Ok(())
}

/// Pool snapshot as stored by the external ledger: camelCase JSON with
/// integer amounts as decimal strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRecord {
    pub token_a_mint: AssetId,
    pub token_b_mint: AssetId,
    pub reserve_a: String,
    pub reserve_b: String,
    pub total_lp_supply: String,
}

impl From<Pool> for PoolRecord {
    fn from(pool: Pool) -> Self {
        Self {
            token_a_mint: pool.pair.asset_a(),
            token_b_mint: pool.pair.asset_b(),
            reserve_a: pool.reserve_a.to_string(),
            reserve_b: pool.reserve_b.to_string(),
            total_lp_supply: pool.share_supply.to_string(),
        }
    }
}

impl TryFrom<PoolRecord> for Pool {
    type Error = AmmError;

    fn try_from(record: PoolRecord) -> AmmResult<Self> {
        let pair = PairId::new(record.token_a_mint, record.token_b_mint)?;
        let mut reserve_a = parse_amount("reserveA", &record.reserve_a)?;
        let mut reserve_b = parse_amount("reserveB", &record.reserve_b)?;
        let share_supply = parse_amount("totalLpSupply", &record.total_lp_supply)?;

        // Records written with the mints in the other order
        if pair.asset_a() != record.token_a_mint {
            std::mem::swap(&mut reserve_a, &mut reserve_b);
        }

        Pool::from_parts(pair, reserve_a, reserve_b, share_supply)
    }
}

fn parse_amount(field: &str, raw: &str) -> AmmResult<u64> {
    let value: i128 = raw
        .trim()
        .parse()
        .map_err(|_| AmmError::invariant(format!("{field} is not an integer: {raw:?}")))?;

    if value < 0 {
        return Err(AmmError::invariant(format!("{field} is negative: {value}")));
    }
    u64::try_from(value)
        .map_err(|_| AmmError::invariant(format!("{field} exceeds reserve width: {value}")))
}
