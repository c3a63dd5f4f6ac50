//! Constant-product pricing engine
//!
//! Pure functions from a pool snapshot and request parameters to a new
//! snapshot plus the amounts moved. Nothing is cached between calls.
//!
//! Rounding always favours the pool: payouts and minted shares round down,
//! the required side of a ratio deposit rounds up.

use crate::error::{AmmError, AmmResult};
use crate::fees::FeeSchedule;
use crate::math::{self, BPS_SCALE};
use crate::operation::{
    DepositOutcome, Direction, Operation, Outcome, SwapOutcome, SwapQuote, WithdrawOutcome,
};
use crate::pair::PairId;
use crate::pool::Pool;
use tracing::debug;

/// Fresh empty pool for `pair`
pub fn initialize_pool(pair: PairId) -> Pool {
    Pool::new(pair)
}

/// Prices and settles operations against pool snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingEngine {
    fees: FeeSchedule,
}

impl PricingEngine {
    pub fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    pub fn fees(&self) -> FeeSchedule {
        self.fees
    }

    /// Accept an empty pool as the starting point for its first deposit
    pub fn initialize(&self, pool: &Pool) -> AmmResult<Pool> {
        if !pool.is_empty() {
            return Err(AmmError::AlreadyInitialized {
                share_supply: pool.share_supply(),
            });
        }
        Ok(*pool)
    }

    /// Dispatch a tagged request
    pub fn execute(&self, pool: &Pool, operation: Operation) -> AmmResult<Outcome> {
        match operation {
            Operation::Swap {
                amount_in,
                min_amount_out,
                direction,
            } => self
                .swap(pool, amount_in, min_amount_out, direction)
                .map(Outcome::Swap),
            Operation::Deposit {
                amount_a_desired,
                amount_b_desired,
                min_shares,
            } => self
                .deposit(pool, amount_a_desired, amount_b_desired, min_shares)
                .map(Outcome::Deposit),
            Operation::Withdraw {
                shares_in,
                min_amount_a,
                min_amount_b,
            } => self
                .withdraw(pool, shares_in, min_amount_a, min_amount_b)
                .map(Outcome::Withdraw),
        }
    }

    /// Preview a swap without touching the pool.
    ///
    /// Fails exactly when `swap(pool, amount_in, 0, direction)` would.
    pub fn quote(&self, pool: &Pool, amount_in: u64, direction: Direction) -> AmmResult<SwapQuote> {
        let (reserve_in, reserve_out) = pool.reserves(direction);
        let amount_out = self.price(amount_in, reserve_in, reserve_out)?;
        ensure_payable(reserve_out, amount_out)?;
        // Settlement-side failures that swap would also hit
        settle_swap(pool, direction, amount_in, amount_out)?;

        Ok(SwapQuote {
            amount_out,
            fee_paid: self.fees.fee_on(amount_in),
            price_impact_bps: amount_in as u128 * BPS_SCALE as u128 / reserve_in as u128,
        })
    }

    /// Sell `amount_in` of one asset for the other
    pub fn swap(
        &self,
        pool: &Pool,
        amount_in: u64,
        min_amount_out: u64,
        direction: Direction,
    ) -> AmmResult<SwapOutcome> {
        let (reserve_in, reserve_out) = pool.reserves(direction);
        let amount_out = self.price(amount_in, reserve_in, reserve_out)?;

        if amount_out < min_amount_out {
            return Err(AmmError::slippage("amount_out", amount_out, min_amount_out));
        }
        ensure_payable(reserve_out, amount_out)?;

        let next = settle_swap(pool, direction, amount_in, amount_out)?;

        debug!(
            pair = %pool.pair(),
            ?direction,
            amount_in,
            amount_out,
            reserve_a = next.reserve_a(),
            reserve_b = next.reserve_b(),
            "swap settled"
        );

        Ok(SwapOutcome {
            pool: next,
            amount_out,
        })
    }

    /// Add liquidity at the pool's current ratio, or set the ratio if empty
    pub fn deposit(
        &self,
        pool: &Pool,
        amount_a_desired: u64,
        amount_b_desired: u64,
        min_shares: u64,
    ) -> AmmResult<DepositOutcome> {
        if amount_a_desired == 0 {
            return Err(AmmError::zero_amount("amount_a_desired"));
        }
        if amount_b_desired == 0 {
            return Err(AmmError::zero_amount("amount_b_desired"));
        }

        let (amount_a, amount_b, shares_minted) = if pool.is_empty() {
            let shares = math::isqrt(amount_a_desired as u128 * amount_b_desired as u128);
            (
                amount_a_desired,
                amount_b_desired,
                math::to_u64(shares, "initial shares")?,
            )
        } else {
            let (amount_a, amount_b) = optimal_pair(pool, amount_a_desired, amount_b_desired)?;
            let supply = pool.share_supply();
            let from_a = math::mul_div_floor(amount_a, supply, pool.reserve_a())?;
            let from_b = math::mul_div_floor(amount_b, supply, pool.reserve_b())?;
            (
                amount_a,
                amount_b,
                math::to_u64(from_a.min(from_b), "shares minted")?,
            )
        };

        if shares_minted == 0 {
            return Err(AmmError::InsufficientLiquidityMinted { amount_a, amount_b });
        }
        if shares_minted < min_shares {
            return Err(AmmError::slippage("shares_minted", shares_minted, min_shares));
        }

        let next = pool.with_state(
            pool.reserve_a()
                .checked_add(amount_a)
                .ok_or(AmmError::overflow("reserve_a after deposit"))?,
            pool.reserve_b()
                .checked_add(amount_b)
                .ok_or(AmmError::overflow("reserve_b after deposit"))?,
            pool.share_supply()
                .checked_add(shares_minted)
                .ok_or(AmmError::overflow("share supply after deposit"))?,
        )?;

        debug!(
            pair = %pool.pair(),
            amount_a,
            amount_b,
            shares_minted,
            share_supply = next.share_supply(),
            "deposit settled"
        );

        Ok(DepositOutcome {
            pool: next,
            shares_minted,
            amount_a,
            amount_b,
        })
    }

    /// Burn `shares_in` for a proportional slice of both reserves
    pub fn withdraw(
        &self,
        pool: &Pool,
        shares_in: u64,
        min_amount_a: u64,
        min_amount_b: u64,
    ) -> AmmResult<WithdrawOutcome> {
        if shares_in == 0 {
            return Err(AmmError::zero_amount("shares_in"));
        }
        let supply = pool.share_supply();
        if shares_in > supply {
            return Err(AmmError::InvalidAmount {
                field: "shares_in",
                value: shares_in,
                reason: "exceeds share supply",
            });
        }

        // shares_in <= supply keeps both payouts within their reserves
        let amount_a = math::to_u64(
            math::mul_div_floor(shares_in, pool.reserve_a(), supply)?,
            "withdrawal of A",
        )?;
        let amount_b = math::to_u64(
            math::mul_div_floor(shares_in, pool.reserve_b(), supply)?,
            "withdrawal of B",
        )?;

        if amount_a < min_amount_a {
            return Err(AmmError::slippage("amount_a", amount_a, min_amount_a));
        }
        if amount_b < min_amount_b {
            return Err(AmmError::slippage("amount_b", amount_b, min_amount_b));
        }

        let next = pool.with_state(
            pool.reserve_a() - amount_a,
            pool.reserve_b() - amount_b,
            supply - shares_in,
        )?;

        debug!(
            pair = %pool.pair(),
            shares_in,
            amount_a,
            amount_b,
            share_supply = next.share_supply(),
            "withdrawal settled"
        );

        Ok(WithdrawOutcome {
            pool: next,
            amount_a,
            amount_b,
        })
    }

    fn price(&self, amount_in: u64, reserve_in: u64, reserve_out: u64) -> AmmResult<u64> {
        if amount_in == 0 {
            return Err(AmmError::zero_amount("amount_in"));
        }
        if reserve_out == 0 || reserve_in == 0 {
            return Err(AmmError::InsufficientLiquidity {
                reserve_out,
                amount_out: 0,
            });
        }
        math::constant_product_out(
            amount_in,
            reserve_in,
            reserve_out,
            self.fees.kept(),
            self.fees.denominator(),
        )
    }
}

/// A swap may never drain the output side, and must pay something
fn ensure_payable(reserve_out: u64, amount_out: u64) -> AmmResult<()> {
    if amount_out == 0 || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity {
            reserve_out,
            amount_out,
        });
    }
    Ok(())
}

fn settle_swap(
    pool: &Pool,
    direction: Direction,
    amount_in: u64,
    amount_out: u64,
) -> AmmResult<Pool> {
    let (reserve_in, reserve_out) = pool.reserves(direction);
    let new_in = reserve_in
        .checked_add(amount_in)
        .ok_or(AmmError::overflow("input reserve after swap"))?;
    let new_out = reserve_out - amount_out;

    if (new_in as u128) * (new_out as u128) < pool.invariant() {
        return Err(AmmError::invariant(format!(
            "swap would shrink the invariant: ({reserve_in}, {reserve_out}) -> ({new_in}, {new_out})"
        )));
    }

    let (reserve_a, reserve_b) = match direction {
        Direction::AToB => (new_in, new_out),
        Direction::BToA => (new_out, new_in),
    };
    pool.with_state(reserve_a, reserve_b, pool.share_supply())
}

/// Largest ratio-matching deposit within both desired amounts
fn optimal_pair(pool: &Pool, amount_a_desired: u64, amount_b_desired: u64) -> AmmResult<(u64, u64)> {
    let b_required = math::mul_div_ceil(amount_a_desired, pool.reserve_b(), pool.reserve_a())?;
    if b_required <= amount_b_desired as u128 {
        // b_required <= amount_b_desired fits u64
        return Ok((amount_a_desired, b_required as u64));
    }

    let a_required = math::mul_div_ceil(amount_b_desired, pool.reserve_a(), pool.reserve_b())?;
    if a_required > amount_a_desired as u128 {
        return Err(AmmError::invariant(format!(
            "ratio deposit needs {a_required} of A, only {amount_a_desired} offered"
        )));
    }
    Ok((a_required as u64, amount_b_desired))
}
