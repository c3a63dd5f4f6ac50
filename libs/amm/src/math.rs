//! Integer arithmetic for constant-product pricing
//!
//! Reserves are u64. Products of two reserves are formed in u128, and the
//! fee-scaled swap quotient (three u64 factors) in 256 bits, so no
//! intermediate can wrap. Rounding direction is always explicit in the name.

use crate::error::{AmmError, AmmResult};

#[allow(clippy::assign_op_pattern, clippy::manual_div_ceil)]
mod wide {
    uint::construct_uint! {
        /// 256-bit unsigned integer for fee-scaled products
        pub struct U256(4);
    }
}

pub use wide::U256;

/// Basis point scale (10_000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// `floor(a * b / denominator)`
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> AmmResult<u128> {
    if denominator == 0 {
        return Err(AmmError::invariant("division by zero reserve or supply"));
    }
    Ok(a as u128 * b as u128 / denominator as u128)
}

/// `ceil(a * b / denominator)`
pub fn mul_div_ceil(a: u64, b: u64, denominator: u64) -> AmmResult<u128> {
    if denominator == 0 {
        return Err(AmmError::invariant("division by zero reserve or supply"));
    }
    let product = a as u128 * b as u128;
    let denominator = denominator as u128;
    let quotient = product / denominator;
    if product % denominator == 0 {
        Ok(quotient)
    } else {
        Ok(quotient + 1)
    }
}

/// Constant-product output with the fee taken from the input:
///
/// `floor(amount_in * fee_kept * reserve_out / (reserve_in * fee_scale + amount_in * fee_kept))`
///
/// where `fee_kept = fee_scale - fee_numerator`.
pub fn constant_product_out(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_kept: u64,
    fee_scale: u64,
) -> AmmResult<u64> {
    let amount_in_after_fee = U256::from(amount_in) * U256::from(fee_kept);
    let numerator = amount_in_after_fee * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) * U256::from(fee_scale) + amount_in_after_fee;

    if denominator.is_zero() {
        return Err(AmmError::invariant("swap denominator is zero"));
    }

    narrow(numerator / denominator, "swap output")
}

/// Floor integer square root (Newton's method)
pub fn isqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }

    let mut x = value;
    let mut y = value / 2 + value % 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

/// Narrow a u128 intermediate back to reserve width
pub fn to_u64(value: u128, context: &'static str) -> AmmResult<u64> {
    u64::try_from(value).map_err(|_| AmmError::overflow(context))
}

fn narrow(value: U256, context: &'static str) -> AmmResult<u64> {
    if value > U256::from(u64::MAX) {
        return Err(AmmError::overflow(context));
    }
    Ok(value.low_u64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt_floors() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(20_000), 141);
        assert_eq!(isqrt(u64::MAX as u128 * u64::MAX as u128), u64::MAX as u128);
    }

    #[test]
    fn test_mul_div_rounding() {
        assert_eq!(mul_div_floor(70, 100, 141).unwrap(), 49);
        assert_eq!(mul_div_ceil(50, 200, 100).unwrap(), 100);
        assert_eq!(mul_div_ceil(1, 1, 3).unwrap(), 1);
        assert_eq!(mul_div_floor(1, 1, 3).unwrap(), 0);
        assert!(mul_div_floor(1, 1, 0).is_err());
    }

    #[test]
    fn test_constant_product_out() {
        // 10 in against (100, 200) at 0.3%
        let out = constant_product_out(10, 100, 200, 9_970, BPS_SCALE).unwrap();
        assert_eq!(out, 18);
    }

    #[test]
    fn test_constant_product_out_handles_max_width() {
        let out =
            constant_product_out(u64::MAX, u64::MAX, u64::MAX, 9_970, BPS_SCALE).unwrap();
        assert!(out < u64::MAX);
        assert!(out > u64::MAX / 3);
    }

    #[test]
    fn test_to_u64_rejects_wide_values() {
        assert_eq!(to_u64(42, "test").unwrap(), 42);
        assert_eq!(
            to_u64(u64::MAX as u128 + 1, "test"),
            Err(AmmError::Overflow { context: "test" })
        );
    }
}
