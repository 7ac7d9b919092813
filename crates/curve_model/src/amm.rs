//! Bonding-curve AMM engine
//!
//! Buys price against the constant product of the virtual reserves:
//! - k = vs · vt
//! - vt1 = vt - Δt
//! - vs1 = floor(k / vt1) + 1
//! - Δs_in = vs1 - vs
//!
//! Sells price linearly against the post-sell virtual token depth, scaled by
//! the genesis virtual token reserves S:
//! - p = floor(Δt · S / (vt + Δt))
//! - Δs_out = min(floor(vs · p / S), rs)

use log::{debug, trace};

use crate::accounts::{BondingCurveSnapshot, GlobalConfig};
use crate::CurveError;

/// Realized amounts of an applied trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeResult {
    /// Tokens actually transacted (buys may be clamped)
    pub token_amount: u64,

    /// SOL charged (buy) or paid out (sell), in lamports
    pub sol_amount: u64,
}

/// Reserve state of a single bonding curve
///
/// Single writer: every mutating call either commits all four reserves or
/// leaves them untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Amm {
    /// Virtual SOL liquidity, pricing only
    pub virtual_sol_reserves: u64,

    /// Virtual token liquidity, pricing only
    pub virtual_token_reserves: u64,

    /// SOL actually held by the curve
    pub real_sol_reserves: u64,

    /// Tokens still sellable on the curve
    pub real_token_reserves: u64,

    initial_virtual_token_reserves: u64,
}

impl Amm {
    pub fn new(
        virtual_sol_reserves: u64,
        virtual_token_reserves: u64,
        real_sol_reserves: u64,
        real_token_reserves: u64,
        initial_virtual_token_reserves: u64,
    ) -> Self {
        Self {
            virtual_sol_reserves,
            virtual_token_reserves,
            real_sol_reserves,
            real_token_reserves,
            initial_virtual_token_reserves,
        }
    }

    /// Fresh curve from the global configuration (no real SOL yet)
    pub fn from_global(global: &GlobalConfig) -> Self {
        Self::new(
            global.initial_virtual_sol_reserves,
            global.initial_virtual_token_reserves,
            0,
            global.initial_real_token_reserves,
            global.initial_virtual_token_reserves,
        )
    }

    /// Mid-life curve from an observed snapshot.
    ///
    /// `initial_virtual_token_reserves` is the network-wide genesis value, not
    /// the snapshot's own virtual token reserves.
    pub fn from_bonding_curve(
        curve: &BondingCurveSnapshot,
        initial_virtual_token_reserves: u64,
    ) -> Self {
        Self::new(
            curve.virtual_sol_reserves,
            curve.virtual_token_reserves,
            curve.real_sol_reserves,
            curve.real_token_reserves,
            initial_virtual_token_reserves,
        )
    }

    /// Sell-side scaling constant
    pub fn initial_virtual_token_reserves(&self) -> u64 {
        self.initial_virtual_token_reserves
    }

    /// True once every real token has been bought
    pub fn is_exhausted(&self) -> bool {
        self.real_token_reserves == 0
    }

    /// SOL needed to buy `token_amount` tokens at the current reserves.
    ///
    /// The `+ 1` on the new virtual SOL reserve keeps the quote at or above
    /// the exact constant-product cost.
    ///
    /// A zero amount still quotes the 1 lamport bias; `apply_buy` skips
    /// pricing for empty buys.
    ///
    /// # Errors
    /// * `Domain` if `token_amount >= virtual_token_reserves`
    /// * `Overflow` if the cost does not fit in u64
    pub fn get_buy_price(&self, token_amount: u64) -> Result<u64, CurveError> {
        if token_amount >= self.virtual_token_reserves {
            return Err(CurveError::Domain);
        }

        let vs = self.virtual_sol_reserves as u128;
        let vt = self.virtual_token_reserves as u128;

        // u64 · u64 always fits u128
        let product = vs * vt;
        let new_vt = vt - token_amount as u128;
        let new_vs = product / new_vt + 1;

        let needed = new_vs.saturating_sub(vs);
        u64::try_from(needed).map_err(|_| CurveError::Overflow)
    }

    /// Buy up to `token_amount` tokens, clamped to the real token reserves.
    ///
    /// Price is taken from the pre-trade reserves.
    pub fn apply_buy(&mut self, token_amount: u64) -> Result<TradeResult, CurveError> {
        let final_token_amount = token_amount.min(self.real_token_reserves);
        if final_token_amount < token_amount {
            trace!(
                "buy clamped from {} to {} tokens",
                token_amount,
                final_token_amount
            );
        }

        if final_token_amount == 0 {
            return Ok(TradeResult::default());
        }

        let sol_amount = self.get_buy_price(final_token_amount)?;

        // get_buy_price rejected final_token_amount >= virtual_token_reserves
        let virtual_token_reserves = self.virtual_token_reserves - final_token_amount;
        let real_token_reserves = self.real_token_reserves - final_token_amount;
        let virtual_sol_reserves = self
            .virtual_sol_reserves
            .checked_add(sol_amount)
            .ok_or(CurveError::Overflow)?;
        let real_sol_reserves = self
            .real_sol_reserves
            .checked_add(sol_amount)
            .ok_or(CurveError::Overflow)?;

        self.virtual_token_reserves = virtual_token_reserves;
        self.real_token_reserves = real_token_reserves;
        self.virtual_sol_reserves = virtual_sol_reserves;
        self.real_sol_reserves = real_sol_reserves;

        debug!(
            "applied buy: tokens={} sol={} vs={} vt={}",
            final_token_amount,
            sol_amount,
            self.virtual_sol_reserves,
            self.virtual_token_reserves
        );

        Ok(TradeResult {
            token_amount: final_token_amount,
            sol_amount,
        })
    }

    /// SOL paid for selling `token_amount` tokens against the current
    /// virtual token reserves, capped by the real SOL reserves.
    ///
    /// `apply_sell` prices against the reserves after the tokens are added,
    /// so this quote is never below what `apply_sell` realizes for the same
    /// state.
    pub fn get_sell_price(&self, token_amount: u64) -> Result<u64, CurveError> {
        self.sell_price_at(token_amount, self.virtual_token_reserves)
    }

    /// Sell `token_amount` tokens. Sells are never clamped.
    pub fn apply_sell(&mut self, token_amount: u64) -> Result<TradeResult, CurveError> {
        let virtual_token_reserves = self
            .virtual_token_reserves
            .checked_add(token_amount)
            .ok_or(CurveError::Overflow)?;
        let real_token_reserves = self
            .real_token_reserves
            .checked_add(token_amount)
            .ok_or(CurveError::Overflow)?;

        // Priced after the token reserves are bumped
        let sol_amount = self.sell_price_at(token_amount, virtual_token_reserves)?;

        let virtual_sol_reserves = self
            .virtual_sol_reserves
            .checked_sub(sol_amount)
            .ok_or(CurveError::Overflow)?;
        // sell_price_at caps at real_sol_reserves
        let real_sol_reserves = self.real_sol_reserves - sol_amount;

        self.virtual_token_reserves = virtual_token_reserves;
        self.real_token_reserves = real_token_reserves;
        self.virtual_sol_reserves = virtual_sol_reserves;
        self.real_sol_reserves = real_sol_reserves;

        debug!(
            "applied sell: tokens={} sol={} vs={} vt={}",
            token_amount,
            sol_amount,
            self.virtual_sol_reserves,
            self.virtual_token_reserves
        );

        Ok(TradeResult {
            token_amount,
            sol_amount,
        })
    }

    /// True when `apply_sell(token_amount)` would be limited by the real SOL
    /// reserves rather than paying the full proportional amount.
    pub fn sell_payout_capped(&self, token_amount: u64) -> Result<bool, CurveError> {
        let virtual_token_reserves = self
            .virtual_token_reserves
            .checked_add(token_amount)
            .ok_or(CurveError::Overflow)?;
        let sol_received = self.gross_sell_at(token_amount, virtual_token_reserves)?;

        Ok(sol_received > self.real_sol_reserves as u128)
    }

    /// Proportional payout before the real SOL cap
    fn gross_sell_at(
        &self,
        token_amount: u64,
        virtual_token_reserves: u64,
    ) -> Result<u128, CurveError> {
        if virtual_token_reserves == 0 || self.initial_virtual_token_reserves == 0 {
            return Err(CurveError::Domain);
        }

        let scale = self.initial_virtual_token_reserves as u128;
        let proportion = (token_amount as u128 * scale) / virtual_token_reserves as u128;

        // Past u128 the payout is at least 2^128 / scale >= 2^64, above any reserve
        Ok((self.virtual_sol_reserves as u128)
            .checked_mul(proportion)
            .map_or(u128::MAX, |product| product / scale))
    }

    fn sell_price_at(
        &self,
        token_amount: u64,
        virtual_token_reserves: u64,
    ) -> Result<u64, CurveError> {
        let sol_received = self.gross_sell_at(token_amount, virtual_token_reserves)?;

        let capped = sol_received.min(self.real_sol_reserves as u128);
        if capped < sol_received {
            trace!(
                "sell payout capped from {} to {} lamports",
                sol_received,
                capped
            );
        }

        // capped <= real_sol_reserves
        Ok(capped as u64)
    }
}
