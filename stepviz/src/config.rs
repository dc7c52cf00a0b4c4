//! Runtime configuration for the engines and their drivers.
//!
//! Every engine is built from a validated config; drivers usually start from
//! `Default` and apply `from_env` overrides.

use std::env;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};
use crate::life::SeedMode;
use crate::sort::Distribution;

/// Largest accepted grid width or height.
pub const MAX_GRID_DIM: usize = 1024;

/// Largest accepted sortable array.
pub const MAX_ARRAY_SIZE: usize = 1000;

/// Auto-play speed presets in milliseconds between steps.
pub const SPEED_PRESETS: &[(&str, u64)] = &[
    ("Very Slow", 1000),
    ("Slow", 500),
    ("Normal", 200),
    ("Fast", 100),
    ("Very Fast", 50),
    ("Ultra Fast", 25),
];

/// Array size presets offered by the drivers.
pub const SIZE_PRESETS: &[usize] = &[20, 30, 40, 50];

/// Grid automaton settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub seed_mode: SeedMode,
    /// Seed for the random fill; entropy when absent.
    pub seed: Option<u64>,
    pub step_interval_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            seed_mode: SeedMode::Pattern("glider".to_string()),
            seed: None,
            step_interval_ms: 200,
        }
    }
}

impl GridConfig {
    /// Defaults overridden by `STEPVIZ_WIDTH`, `STEPVIZ_HEIGHT`, `STEPVIZ_PATTERN`,
    /// `STEPVIZ_INTERVAL_MS` and `STEPVIZ_SEED`.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(width) = env_parse("STEPVIZ_WIDTH")? {
            config.width = width;
        }
        if let Some(height) = env_parse("STEPVIZ_HEIGHT")? {
            config.height = height;
        }
        if let Ok(pattern) = env::var("STEPVIZ_PATTERN") {
            config.seed_mode = SeedMode::from(pattern.as_str());
        }
        if let Some(interval) = env_parse("STEPVIZ_INTERVAL_MS")? {
            config.step_interval_ms = interval;
        }
        config.seed = env_parse("STEPVIZ_SEED")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        check_max("width", self.width, MAX_GRID_DIM)?;
        check_max("height", self.height, MAX_GRID_DIM)?;
        if self.step_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Sorting engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    pub size: usize,
    pub distribution: Distribution,
    pub step_interval_ms: u64,
    /// Seed for array generation; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            size: 30,
            distribution: Distribution::Random,
            step_interval_ms: 100,
            seed: None,
        }
    }
}

impl SortConfig {
    /// Defaults overridden by `STEPVIZ_SIZE`, `STEPVIZ_DISTRIBUTION`,
    /// `STEPVIZ_INTERVAL_MS` and `STEPVIZ_SEED`.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(size) = env_parse("STEPVIZ_SIZE")? {
            config.size = size;
        }
        if let Ok(distribution) = env::var("STEPVIZ_DISTRIBUTION") {
            config.distribution = distribution.parse()?;
        }
        if let Some(interval) = env_parse("STEPVIZ_INTERVAL_MS")? {
            config.step_interval_ms = interval;
        }
        config.seed = env_parse("STEPVIZ_SEED")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        check_max("size", self.size, MAX_ARRAY_SIZE)?;
        if self.step_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

pub(crate) fn check_max(what: &'static str, value: usize, max: usize) -> ConfigResult<()> {
    if value > max {
        return Err(ConfigError::TooLarge { what, value, max });
    }
    Ok(())
}

fn env_parse<T: FromStr>(key: &'static str) -> ConfigResult<Option<T>> {
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

pub(crate) fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> ConfigResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid_number(key, raw))
}
