//! Plain views of the program's global and bonding-curve accounts
//!
//! Callers decode the on-chain accounts and hand the numeric fields over;
//! these types only carry them and answer the account-level quotes.

use crate::{
    CurveError, BPS_SCALE, FEE_BASIS_POINTS, INITIAL_REAL_TOKEN_RESERVES,
    INITIAL_VIRTUAL_SOL_RESERVES, INITIAL_VIRTUAL_TOKEN_RESERVES, TOKEN_TOTAL_SUPPLY,
};

/// Network-wide curve parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobalConfig {
    pub initial_virtual_sol_reserves: u64,
    pub initial_virtual_token_reserves: u64,
    pub initial_real_token_reserves: u64,
    pub token_total_supply: u64,
    pub fee_basis_points: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            initial_virtual_sol_reserves: INITIAL_VIRTUAL_SOL_RESERVES,
            initial_virtual_token_reserves: INITIAL_VIRTUAL_TOKEN_RESERVES,
            initial_real_token_reserves: INITIAL_REAL_TOKEN_RESERVES,
            token_total_supply: TOKEN_TOTAL_SUPPLY,
            fee_basis_points: FEE_BASIS_POINTS,
        }
    }
}

impl GlobalConfig {
    /// Tokens received for spending `sol_amount` lamports on a fresh curve
    pub fn initial_buy_price(&self, sol_amount: u64) -> u64 {
        if sol_amount == 0 {
            return 0;
        }

        let vs = self.initial_virtual_sol_reserves as u128;
        let vt = self.initial_virtual_token_reserves as u128;

        let product = vs * vt;
        let new_vs = vs + sol_amount as u128;
        let new_vt = product / new_vs + 1;
        let tokens = vt.saturating_sub(new_vt);

        tokens.min(self.initial_real_token_reserves as u128) as u64
    }
}

/// Observed bonding-curve account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondingCurveSnapshot {
    pub virtual_token_reserves: u64,
    pub virtual_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub real_sol_reserves: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub token_total_supply: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub complete: bool,
}

impl BondingCurveSnapshot {
    /// Tokens received for spending `sol_amount` lamports, clamped to the
    /// real token reserves. Fails with `CurveComplete` once the curve has
    /// migrated.
    pub fn buy_price(&self, sol_amount: u64) -> Result<u64, CurveError> {
        if self.complete {
            return Err(CurveError::CurveComplete);
        }
        if sol_amount == 0 {
            return Ok(0);
        }

        let vs = self.virtual_sol_reserves as u128;
        let vt = self.virtual_token_reserves as u128;

        let product = vs * vt;
        let new_vs = vs + sol_amount as u128;
        let new_vt = product / new_vs + 1;
        let tokens = vt.saturating_sub(new_vt);

        Ok(tokens.min(self.real_token_reserves as u128) as u64)
    }

    /// SOL received for selling `token_amount` tokens, net of the protocol fee
    pub fn sell_price(&self, token_amount: u64, fee_bps: u64) -> Result<u64, CurveError> {
        if self.complete {
            return Err(CurveError::CurveComplete);
        }
        if token_amount == 0 {
            return Ok(0);
        }

        let depth = self.virtual_token_reserves as u128 + token_amount as u128;
        let gross = (token_amount as u128 * self.virtual_sol_reserves as u128) / depth;
        let fee = (gross * fee_bps as u128) / BPS_SCALE as u128;

        // gross < virtual_sol_reserves
        Ok(gross.saturating_sub(fee) as u64)
    }

    /// Market cap in lamports at the current virtual price
    pub fn market_cap_sol(&self) -> u64 {
        if self.virtual_token_reserves == 0 {
            return 0;
        }

        let cap = (self.token_total_supply as u128 * self.virtual_sol_reserves as u128)
            / self.virtual_token_reserves as u128;
        u64::try_from(cap).unwrap_or(u64::MAX)
    }
}
