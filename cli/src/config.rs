//! Curve configuration and input file loading

use anyhow::{Context, Result};
use curve_model::{BondingCurveSnapshot, GlobalConfig, DEFAULT_SLIPPAGE_BPS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("initial_virtual_token_reserves must be positive")]
    ZeroScale,

    #[error("initial real token reserves ({real}) must be below virtual ({virt})")]
    RealExceedsVirtual { real: u64, virt: u64 },
}

/// On-disk layout; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    slippage_bps: Option<u64>,
    global: GlobalConfig,
}

pub struct CurveConfig {
    pub global: GlobalConfig,
    pub slippage_bps: u64,
    pub source: Option<PathBuf>,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            source: None,
        }
    }
}

impl CurveConfig {
    /// Resolve configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and genesis defaults are used when nothing is there.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path).into());
                }
                path
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("no config file found, using genesis defaults");
                    return Ok(Self::default());
                }
            },
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&text, &path)?;

        log::info!("loaded curve config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let global = file.global;
        if global.initial_virtual_token_reserves == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if global.initial_real_token_reserves >= global.initial_virtual_token_reserves {
            return Err(ConfigError::RealExceedsVirtual {
                real: global.initial_real_token_reserves,
                virt: global.initial_virtual_token_reserves,
            });
        }

        Ok(Self {
            global,
            slippage_bps: file.slippage_bps.unwrap_or(DEFAULT_SLIPPAGE_BPS),
            source: Some(path.to_path_buf()),
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config/pumpcurve/config.toml"))
}

/// Load an observed bonding-curve account from a JSON file
pub fn load_snapshot(path: &Path) -> Result<BondingCurveSnapshot> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read curve snapshot: {}", path.display()))?;

    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse curve snapshot JSON: {}", path.display()))
}
