//! Price quotes against a curve

use anyhow::{Context, Result};
use colored::Colorize;
use curve_model::{
    with_slippage_buy, with_slippage_sell, Amm, BondingCurveSnapshot, TradeResult, DEFAULT_DECIMALS,
};
use std::path::Path;

use crate::config::{self, CurveConfig};

const SOL_DECIMALS: u8 = 9;

/// Engine for a snapshot file, or a fresh curve when none is given
pub fn load_engine(config: &CurveConfig, curve: Option<&Path>) -> Result<Amm> {
    let Some(path) = curve else {
        log::debug!("pricing against a fresh curve");
        return Ok(Amm::from_global(&config.global));
    };

    let snapshot = config::load_snapshot(path)?;
    if snapshot.complete {
        log::warn!("curve {} is complete; quotes will not execute", path.display());
    }

    Ok(Amm::from_bonding_curve(
        &snapshot,
        config.global.initial_virtual_token_reserves,
    ))
}

/// Realized buy on a copy: clamped fill, and no charge for an empty fill
fn preview_buy(amm: &Amm, tokens: u64) -> Result<TradeResult> {
    let mut preview = *amm;
    preview
        .apply_buy(tokens)
        .with_context(|| format!("Cannot price a buy of {} tokens", tokens))
}

pub fn quote_buy(amm: &Amm, tokens: u64, slippage_bps: u64) -> Result<()> {
    let TradeResult {
        token_amount: fillable,
        sol_amount: sol_cost,
    } = preview_buy(amm, tokens)?;
    let max_cost = with_slippage_buy(sol_cost, slippage_bps);

    println!("{}", "=== Buy Quote ===".bright_green().bold());
    println!("{} {}", "Requested:".bright_cyan(), fmt_units(tokens, DEFAULT_DECIMALS));
    println!("{} {}", "Fillable:".bright_cyan(), fmt_units(fillable, DEFAULT_DECIMALS));
    if fillable < tokens {
        println!("{}", "Clamped to remaining curve supply".yellow());
    }
    println!("{} {} SOL", "Cost:".bright_cyan(), fmt_units(sol_cost, SOL_DECIMALS));
    println!(
        "{} {} SOL ({} bps)",
        "Max cost:".bright_cyan(),
        fmt_units(max_cost, SOL_DECIMALS),
        slippage_bps
    );
    Ok(())
}

pub fn quote_sell(amm: &Amm, tokens: u64, slippage_bps: u64) -> Result<()> {
    // Realized payout prices after the tokens land, so run it on a copy
    let mut preview = *amm;
    let result = preview
        .apply_sell(tokens)
        .with_context(|| format!("Cannot price a sell of {} tokens", tokens))?;
    let min_out = with_slippage_sell(result.sol_amount, slippage_bps);

    println!("{}", "=== Sell Quote ===".bright_green().bold());
    println!("{} {}", "Tokens:".bright_cyan(), fmt_units(tokens, DEFAULT_DECIMALS));
    println!(
        "{} {} SOL",
        "Proceeds:".bright_cyan(),
        fmt_units(result.sol_amount, SOL_DECIMALS)
    );
    if amm.sell_payout_capped(tokens)? {
        println!("{}", "Payout capped at real SOL reserves".yellow());
    }
    println!(
        "{} {} SOL ({} bps)",
        "Min out:".bright_cyan(),
        fmt_units(min_out, SOL_DECIMALS),
        slippage_bps
    );
    Ok(())
}

/// Create-and-buy sizing: tokens for `lamports` on a fresh curve
pub fn quote_initial_buy(config: &CurveConfig, lamports: u64, slippage_bps: u64) -> Result<()> {
    let tokens = config.global.initial_buy_price(lamports);
    let amm = Amm::from_global(&config.global);
    let sol_cost = preview_buy(&amm, tokens)?.sol_amount;

    println!("{}", "=== Initial Buy ===".bright_green().bold());
    println!("{} {} SOL", "Spend:".bright_cyan(), fmt_units(lamports, SOL_DECIMALS));
    println!("{} {}", "Tokens:".bright_cyan(), fmt_units(tokens, DEFAULT_DECIMALS));
    println!(
        "{} {} SOL ({} bps)",
        "Max cost:".bright_cyan(),
        fmt_units(with_slippage_buy(sol_cost, slippage_bps), SOL_DECIMALS),
        slippage_bps
    );
    Ok(())
}

/// Account-level quotes: SOL-in buy, fee-net sell, market cap
pub fn quote_curve(
    config: &CurveConfig,
    snapshot: &BondingCurveSnapshot,
    amount: u64,
    slippage_bps: u64,
) -> Result<()> {
    let tokens_out = snapshot.buy_price(amount)?;
    let sol_out = snapshot.sell_price(amount, config.global.fee_basis_points)?;

    println!("{}", "=== Curve Quote ===".bright_green().bold());
    println!(
        "{} {} SOL -> {} tokens",
        "Buy:".bright_cyan(),
        fmt_units(amount, SOL_DECIMALS),
        fmt_units(tokens_out, DEFAULT_DECIMALS)
    );
    println!(
        "{} {} tokens -> {} SOL (fee {} bps, min {} SOL)",
        "Sell:".bright_cyan(),
        fmt_units(amount, DEFAULT_DECIMALS),
        fmt_units(sol_out, SOL_DECIMALS),
        config.global.fee_basis_points,
        fmt_units(with_slippage_sell(sol_out, slippage_bps), SOL_DECIMALS)
    );
    println!(
        "{} {} SOL",
        "Market cap:".bright_cyan(),
        fmt_units(snapshot.market_cap_sol(), SOL_DECIMALS)
    );
    Ok(())
}

/// Render a raw integer amount with a fixed number of decimals
pub fn fmt_units(amount: u64, decimals: u8) -> String {
    let scale = 10u64.pow(decimals as u32);
    format!(
        "{}.{:0width$}",
        amount / scale,
        amount % scale,
        width = decimals as usize
    )
}
