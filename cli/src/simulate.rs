//! Replay a scripted sequence of trades against one curve

use anyhow::{Context, Result};
use colored::Colorize;
use curve_model::{Amm, CurveError, TradeResult, DEFAULT_DECIMALS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::quote::fmt_units;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TradeStep {
    pub side: Side,
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub side: Side,
    pub requested: u64,
    #[serde(flatten)]
    pub result: TradeResult,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<StepReport>,
    pub final_reserves: Amm,
    /// First failing step and its error; later steps were not run
    pub failed: Option<(usize, String)>,
}

pub fn load_script(path: &Path) -> Result<Vec<TradeStep>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trade script: {}", path.display()))?;

    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse trade script JSON: {}", path.display()))
}

/// Apply `script` in order, stopping at the first failing trade.
///
/// Trades before the failure stay applied; the failing one leaves the
/// reserves untouched.
pub fn run(amm: &mut Amm, script: &[TradeStep]) -> SimulationReport {
    let mut steps = Vec::with_capacity(script.len());
    let mut failed = None;

    for (i, trade) in script.iter().enumerate() {
        let outcome: Result<TradeResult, CurveError> = match trade.side {
            Side::Buy => amm.apply_buy(trade.amount),
            Side::Sell => amm.apply_sell(trade.amount),
        };

        match outcome {
            Ok(result) => steps.push(StepReport {
                step: i,
                side: trade.side,
                requested: trade.amount,
                result,
            }),
            Err(e) => {
                log::warn!("step {} ({:?} {}) rejected: {}", i, trade.side, trade.amount, e);
                failed = Some((i, e.to_string()));
                break;
            }
        }
    }

    SimulationReport {
        steps,
        final_reserves: *amm,
        failed,
    }
}

pub fn simulate(mut amm: Amm, script_path: &Path, json: bool) -> Result<()> {
    let script = load_script(script_path)?;
    log::info!("replaying {} trades from {}", script.len(), script_path.display());

    let report = run(&mut amm, &script);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some((step, err)) = &report.failed {
        anyhow::bail!("Simulation stopped at step {}: {}", step, err);
    }
    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!("{}", "=== Simulation ===".bright_green().bold());

    for step in &report.steps {
        let side = match step.side {
            Side::Buy => "BUY ".bright_green(),
            Side::Sell => "SELL".bright_red(),
        };
        println!(
            "#{:<4} {} {} tokens for {} lamports",
            step.step,
            side,
            fmt_units(step.result.token_amount, DEFAULT_DECIMALS),
            step.result.sol_amount
        );
        if step.result.token_amount != step.requested {
            println!("      {}", format!("clamped from {}", step.requested).yellow());
        }
    }

    if let Some((step, err)) = &report.failed {
        println!("{} step {}: {}", "✗".bright_red(), step, err);
    }

    let r = &report.final_reserves;
    println!("\n{}", "Final reserves".bright_cyan().bold());
    println!("  virtual SOL:   {}", r.virtual_sol_reserves);
    println!("  virtual token: {}", r.virtual_token_reserves);
    println!("  real SOL:      {}", r.real_sol_reserves);
    println!("  real token:    {}", r.real_token_reserves);
}
