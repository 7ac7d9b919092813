//! Slippage bounds for submitted trades

use crate::BPS_SCALE;

/// Largest SOL cost a buyer authorizes: `cost + floor(cost · bps / 10_000)`.
///
/// Saturates at `u64::MAX`, the widest bound the program accepts.
pub fn with_slippage_buy(sol_cost: u64, slippage_bps: u64) -> u64 {
    let cushion = (sol_cost as u128 * slippage_bps as u128) / BPS_SCALE as u128;
    let bound = sol_cost as u128 + cushion;
    u64::try_from(bound).unwrap_or(u64::MAX)
}

/// Smallest SOL payout a seller accepts: `proceeds - floor(proceeds · bps / 10_000)`.
///
/// Clamped at 0 when the tolerance is 100% or more.
pub fn with_slippage_sell(sol_proceeds: u64, slippage_bps: u64) -> u64 {
    let cushion = (sol_proceeds as u128 * slippage_bps as u128) / BPS_SCALE as u128;
    (sol_proceeds as u128).saturating_sub(cushion) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SLIPPAGE_BPS;

    #[test]
    fn test_default_slippage() {
        assert_eq!(with_slippage_buy(1000, DEFAULT_SLIPPAGE_BPS), 1050);
        assert_eq!(with_slippage_sell(1000, DEFAULT_SLIPPAGE_BPS), 950);
    }

    #[test]
    fn test_floor_division() {
        // 999 · 5% = 49.95
        assert_eq!(with_slippage_buy(999, 500), 1048);
        assert_eq!(with_slippage_sell(999, 500), 950);
    }

    #[test]
    fn test_zero_tolerance_is_identity() {
        assert_eq!(with_slippage_buy(27_960, 0), 27_960);
        assert_eq!(with_slippage_sell(27_960, 0), 27_960);
    }

    #[test]
    fn test_sell_clamps_at_zero() {
        assert_eq!(with_slippage_sell(1000, 10_000), 0);
        assert_eq!(with_slippage_sell(1000, 25_000), 0);
    }

    #[test]
    fn test_buy_saturates() {
        assert_eq!(with_slippage_buy(u64::MAX, 500), u64::MAX);
        assert_eq!(with_slippage_buy(1000, 20_000), 3000);
    }
}
