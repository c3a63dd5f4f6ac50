//! Proportional swap fee
//!
//! The fee is deducted from the swap input before pricing and stays in the
//! pool, growing the invariant for liquidity providers.

use crate::error::{AmmError, AmmResult};
use crate::math::BPS_SCALE;
use serde::Serialize;

/// Default fee numerator (30 / 10_000 = 0.3%)
pub const DEFAULT_FEE_NUMERATOR: u64 = 30;

/// Default fee denominator
pub const DEFAULT_FEE_DENOMINATOR: u64 = 10_000;

/// Upper bound on the fee rate, in basis points (5%)
pub const MAX_FEE_BPS: u64 = 500;

/// Validated fee rate `numerator / denominator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    numerator: u64,
    denominator: u64,
}

impl FeeSchedule {
    /// Fee schedule capped at [`MAX_FEE_BPS`]
    pub fn new(numerator: u64, denominator: u64) -> AmmResult<Self> {
        Self::with_max_bps(numerator, denominator, MAX_FEE_BPS)
    }

    /// Fee schedule capped at `max_fee_bps`
    pub fn with_max_bps(numerator: u64, denominator: u64, max_fee_bps: u64) -> AmmResult<Self> {
        let invalid = AmmError::InvalidFee {
            numerator,
            denominator,
        };

        if denominator == 0 || numerator >= denominator {
            return Err(invalid);
        }
        // numerator / denominator <= max_fee_bps / BPS_SCALE
        if numerator as u128 * BPS_SCALE as u128 > max_fee_bps as u128 * denominator as u128 {
            return Err(invalid);
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Share of each input unit that is priced (`denominator - numerator`)
    pub fn kept(&self) -> u64 {
        self.denominator - self.numerator
    }

    /// Fee charged on `amount_in`, rounded up so that
    /// `amount_in - fee` is the whole-unit part of the priced input
    pub fn fee_on(&self, amount_in: u64) -> u64 {
        let product = amount_in as u128 * self.numerator as u128;
        let denominator = self.denominator as u128;
        let fee = product.div_ceil(denominator);
        // numerator < denominator keeps fee <= amount_in
        fee as u64
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            numerator: DEFAULT_FEE_NUMERATOR,
            denominator: DEFAULT_FEE_DENOMINATOR,
        }
    }
}
