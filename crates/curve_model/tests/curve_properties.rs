//! Property tests for the bonding-curve engine
//!
//! Run with: cargo test -p curve_model
//! Increase cases: PROPTEST_CASES=5000 cargo test -p curve_model
//!
//! Covers:
//! - No-op zero buys
//! - Reserve floors on buys and sells
//! - Real SOL cap on standalone sell quotes
//! - Buy price monotonicity
//! - "No mutation on error" for both mutating operations
//! - Buy/sell spread on a round trip

use curve_model::*;
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Arbitrary curve with real tokens strictly inside the virtual depth and
/// real SOL backed by virtual SOL
fn curve_strategy() -> impl Strategy<Value = Amm> {
    (
        1u64..100_000_000_000_000,
        2u64..10_000_000_000_000_000,
        1u64..=INITIAL_VIRTUAL_TOKEN_RESERVES * 4,
    )
        .prop_flat_map(|(vs, vt, scale)| {
            (Just(vs), Just(vt), 0..=vs, 0..vt, Just(scale))
        })
        .prop_map(|(vs, vt, rs, rt, scale)| Amm::new(vs, vt, rs, rt, scale))
}

/// Genesis curve after an arbitrary earlier buy
fn traded_genesis_strategy() -> impl Strategy<Value = Amm> {
    (0u64..INITIAL_REAL_TOKEN_RESERVES).prop_map(|prior| {
        let mut amm = Amm::from_global(&GlobalConfig::default());
        amm.apply_buy(prior).unwrap();
        amm
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_zero_buy_is_noop(mut amm in curve_strategy()) {
        let before = amm;
        let result = amm.apply_buy(0).unwrap();

        prop_assert_eq!(result, TradeResult { token_amount: 0, sol_amount: 0 });
        prop_assert_eq!(amm, before);
    }

    #[test]
    fn prop_buy_keeps_reserves_in_bounds(
        mut amm in curve_strategy(),
        requested in 0u64..u64::MAX
    ) {
        let before = amm;

        match amm.apply_buy(requested) {
            Ok(result) => {
                prop_assert!(result.token_amount <= requested);
                prop_assert!(result.token_amount <= before.real_token_reserves);
                prop_assert_eq!(
                    amm.real_token_reserves,
                    before.real_token_reserves - result.token_amount
                );
                prop_assert_eq!(
                    amm.virtual_token_reserves,
                    before.virtual_token_reserves - result.token_amount
                );
                prop_assert!(amm.virtual_token_reserves > 0, "Virtual token depth drained");
                prop_assert_eq!(
                    amm.real_sol_reserves,
                    before.real_sol_reserves + result.sol_amount
                );
            }
            Err(e) => {
                // real_token_reserves < virtual_token_reserves rules out Domain
                prop_assert_eq!(e, CurveError::Overflow);
                prop_assert_eq!(amm, before, "Failed buy mutated state");
            }
        }
    }

    #[test]
    fn prop_buy_price_monotone(
        amm in curve_strategy(),
        a in 0u64..u64::MAX,
        b in 0u64..u64::MAX
    ) {
        let vt = amm.virtual_token_reserves;
        let small = a.min(b) % vt;
        let large = a.max(b) % vt;
        let (small, large) = (small.min(large), small.max(large));

        let p_small = amm.get_buy_price(small);
        let p_large = amm.get_buy_price(large);

        if let (Ok(ps), Ok(pl)) = (p_small, p_large) {
            prop_assert!(
                ps <= pl,
                "Buy price not monotone: {} -> {} at {} -> {}",
                ps,
                pl,
                small,
                large
            );
        }
        prop_assert!(
            !(p_small.is_err() && p_large.is_ok()),
            "Smaller buy failed where larger succeeded"
        );
    }

    #[test]
    fn prop_sell_never_overdraws_real_sol(
        mut amm in curve_strategy(),
        tokens in 0u64..u64::MAX / 2
    ) {
        let before = amm;

        match amm.apply_sell(tokens) {
            Ok(result) => {
                prop_assert_eq!(result.token_amount, tokens);
                prop_assert!(result.sol_amount <= before.real_sol_reserves);
                prop_assert_eq!(
                    amm.real_sol_reserves,
                    before.real_sol_reserves - result.sol_amount
                );
                prop_assert_eq!(
                    amm.virtual_sol_reserves,
                    before.virtual_sol_reserves - result.sol_amount
                );
                prop_assert_eq!(amm.real_token_reserves, before.real_token_reserves + tokens);
            }
            Err(_) => {
                prop_assert_eq!(amm, before, "Failed sell mutated state");
            }
        }
    }

    #[test]
    fn prop_sell_quote_capped_by_real_sol(
        amm in curve_strategy(),
        tokens in 0u64..=u64::MAX
    ) {
        // Any size, including sells deeper than the virtual token reserves
        let quoted = amm.get_sell_price(tokens).unwrap();
        prop_assert!(quoted <= amm.real_sol_reserves);
    }

    #[test]
    fn prop_sell_quote_total_on_any_reserves(
        vs in 0u64..=u64::MAX,
        vt in 1u64..=u64::MAX,
        rs in 0u64..=u64::MAX,
        scale in 1u64..=u64::MAX,
        tokens in 0u64..=u64::MAX
    ) {
        let amm = Amm::new(vs, vt, rs, 0, scale);
        let quoted = amm.get_sell_price(tokens);

        prop_assert!(quoted.is_ok(), "Sell quote failed: {:?}", quoted);
        prop_assert!(quoted.unwrap() <= rs);
    }

    #[test]
    fn prop_round_trip_spread(
        mut amm in traded_genesis_strategy(),
        tokens in 1u64..100_000_000_000_000
    ) {
        let start = amm;
        let buy = amm.apply_buy(tokens).unwrap();
        let sell = amm.apply_sell(buy.token_amount).unwrap();

        prop_assert!(
            buy.sol_amount >= sell.sol_amount,
            "Round trip paid out more than it cost: buy={} sell={}",
            buy.sol_amount,
            sell.sol_amount
        );
        prop_assert_eq!(amm.virtual_token_reserves, start.virtual_token_reserves);
        prop_assert!(amm.real_sol_reserves >= start.real_sol_reserves);
    }

    #[test]
    fn prop_slippage_brackets_nominal(
        amount in 0u64..u64::MAX,
        bps in 0u64..=BPS_SCALE * 2
    ) {
        prop_assert!(with_slippage_buy(amount, bps) >= amount);
        prop_assert!(with_slippage_sell(amount, bps) <= amount);
    }
}

// ============================================================================
// DETERMINISTIC CASES
// ============================================================================

#[test]
fn test_buying_out_the_curve_drains_real_tokens_only() {
    let mut amm = Amm::from_global(&GlobalConfig::default());
    let result = amm.apply_buy(u64::MAX).unwrap();

    assert_eq!(result.token_amount, INITIAL_REAL_TOKEN_RESERVES);
    assert!(amm.is_exhausted());
    assert_eq!(
        amm.virtual_token_reserves,
        INITIAL_VIRTUAL_TOKEN_RESERVES - INITIAL_REAL_TOKEN_RESERVES
    );
    assert_eq!(amm.real_sol_reserves, result.sol_amount);
}

#[test]
fn test_buy_at_full_virtual_depth_is_domain_error() {
    let amm = Amm::from_global(&GlobalConfig::default());
    assert_eq!(
        amm.get_buy_price(amm.virtual_token_reserves),
        Err(CurveError::Domain)
    );
}
