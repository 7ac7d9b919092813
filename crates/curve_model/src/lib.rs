//! Curve Model - Pure bonding-curve math for token launches
//!
//! Virtual/real reserve bookkeeping for a SOL/token pair, the asymmetric
//! buy/sell pricing rules and slippage bounds. All arithmetic is integer
//! with floor division and must match the on-chain program bit for bit.
//!
//! No I/O, no allocation: callers feed reserves in and read quotes out.

#![no_std]
#![forbid(unsafe_code)]

use core::fmt;

pub mod accounts;
pub mod amm;
pub mod slippage;

pub use accounts::{BondingCurveSnapshot, GlobalConfig};
pub use amm::{Amm, TradeResult};
pub use slippage::{with_slippage_buy, with_slippage_sell};

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Default slippage tolerance (5%)
pub const DEFAULT_SLIPPAGE_BPS: u64 = 500;

/// Protocol fee charged on sells (1%)
pub const FEE_BASIS_POINTS: u64 = 100;

/// Token decimals for curve mints
pub const DEFAULT_DECIMALS: u8 = 6;

/// Genesis virtual SOL reserves (lamports)
pub const INITIAL_VIRTUAL_SOL_RESERVES: u64 = 30_000_000_000;

/// Genesis virtual token reserves. Shared by every curve and used as the
/// sell-side scaling constant.
pub const INITIAL_VIRTUAL_TOKEN_RESERVES: u64 = 1_073_000_000_000_000;

/// Genesis real token reserves (tokens sellable on the curve)
pub const INITIAL_REAL_TOKEN_RESERVES: u64 = 793_100_000_000_000;

/// Total mint supply
pub const TOKEN_TOTAL_SUPPLY: u64 = 1_000_000_000_000_000;

/// Error types for curve operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    /// Pricing denominator is zero or would go negative
    Domain,
    /// Result or intermediate does not fit the integer type
    Overflow,
    /// Curve has completed and no longer trades
    CurveComplete,
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::Domain => f.write_str("pricing denominator is zero or negative"),
            CurveError::Overflow => f.write_str("arithmetic overflow"),
            CurveError::CurveComplete => f.write_str("bonding curve is complete"),
        }
    }
}

impl core::error::Error for CurveError {}
