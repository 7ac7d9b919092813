//! Pumpcurve CLI - Offline bonding-curve pricing
//!
//! Quotes buys and sells against a fresh or observed bonding curve, applies
//! slippage bounds, and replays trade scripts to show how reserves evolve.
//! Nothing here talks to a network: snapshots and scripts come from disk.

use clap::{Parser, Subcommand};
use colored::Colorize;
use curve_model::{with_slippage_buy, with_slippage_sell};
use std::path::PathBuf;

mod config;
mod quote;
mod simulate;

use config::CurveConfig;
use simulate::Side;

#[derive(Parser)]
#[command(name = "pumpcurve")]
#[command(about = "Bonding-curve quote and simulation tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to ~/.config/pumpcurve/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price trades against a curve
    Quote {
        #[command(subcommand)]
        command: QuoteCommands,
    },

    /// Replay a JSON trade script and report reserves
    Simulate {
        /// Trade script: [{"side": "buy", "amount": N}, ...]
        script: PathBuf,

        /// Curve snapshot JSON (fresh curve if omitted)
        #[arg(long)]
        curve: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a slippage tolerance to a nominal SOL amount
    Slippage {
        /// Buy (upper bound) or sell (lower bound)
        side: Side,

        /// Nominal SOL amount (lamports)
        amount: u64,

        /// Tolerance in basis points (config value if omitted)
        #[arg(long)]
        bps: Option<u64>,
    },
}

#[derive(Subcommand)]
enum QuoteCommands {
    /// SOL cost of buying tokens
    Buy {
        /// Token amount (raw units)
        tokens: u64,

        /// Curve snapshot JSON (fresh curve if omitted)
        #[arg(long)]
        curve: Option<PathBuf>,

        /// Slippage tolerance in basis points
        #[arg(long)]
        slippage_bps: Option<u64>,
    },

    /// SOL proceeds of selling tokens
    Sell {
        /// Token amount (raw units)
        tokens: u64,

        /// Curve snapshot JSON (fresh curve if omitted)
        #[arg(long)]
        curve: Option<PathBuf>,

        /// Slippage tolerance in basis points
        #[arg(long)]
        slippage_bps: Option<u64>,
    },

    /// Tokens received for spending SOL on a brand-new curve
    InitialBuy {
        /// SOL to spend (lamports)
        lamports: u64,

        /// Slippage tolerance in basis points
        #[arg(long)]
        slippage_bps: Option<u64>,
    },

    /// Account-level quotes on a snapshot (SOL-in buy, fee-net sell, market cap)
    Curve {
        /// Lamports to spend on the buy side, tokens to sell on the sell side
        amount: u64,

        /// Curve snapshot JSON
        #[arg(long)]
        curve: PathBuf,

        /// Slippage tolerance in basis points
        #[arg(long)]
        slippage_bps: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = CurveConfig::load(cli.config.clone())?;

    if cli.verbose {
        match &config.source {
            Some(path) => println!("{} {}", "Config:".bright_cyan(), path.display()),
            None => println!("{} {}", "Config:".bright_cyan(), "genesis defaults".dimmed()),
        }
        println!("{} {}", "Slippage:".bright_cyan(), config.slippage_bps);
        println!(
            "{} {}",
            "Initial virtual tokens:".bright_cyan(),
            config.global.initial_virtual_token_reserves
        );
    }

    match cli.command {
        Commands::Quote { command } => match command {
            QuoteCommands::Buy { tokens, curve, slippage_bps } => {
                let amm = quote::load_engine(&config, curve.as_deref())?;
                quote::quote_buy(&amm, tokens, slippage_bps.unwrap_or(config.slippage_bps))?;
            }
            QuoteCommands::Sell { tokens, curve, slippage_bps } => {
                let amm = quote::load_engine(&config, curve.as_deref())?;
                quote::quote_sell(&amm, tokens, slippage_bps.unwrap_or(config.slippage_bps))?;
            }
            QuoteCommands::InitialBuy { lamports, slippage_bps } => {
                let bps = slippage_bps.unwrap_or(config.slippage_bps);
                quote::quote_initial_buy(&config, lamports, bps)?;
            }
            QuoteCommands::Curve { amount, curve, slippage_bps } => {
                let snapshot = config::load_snapshot(&curve)?;
                let bps = slippage_bps.unwrap_or(config.slippage_bps);
                quote::quote_curve(&config, &snapshot, amount, bps)?;
            }
        },
        Commands::Simulate { script, curve, json } => {
            let amm = quote::load_engine(&config, curve.as_deref())?;
            simulate::simulate(amm, &script, json)?;
        }
        Commands::Slippage { side, amount, bps } => {
            let bps = bps.unwrap_or(config.slippage_bps);
            let (label, bound) = match side {
                Side::Buy => ("Max SOL cost:", with_slippage_buy(amount, bps)),
                Side::Sell => ("Min SOL out:", with_slippage_sell(amount, bps)),
            };
            println!("{} {} ({} bps)", label.bright_cyan(), bound, bps);
        }
    }

    Ok(())
}
