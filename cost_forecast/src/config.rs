//! Forecast request configuration

use crate::data::{HistoryQuery, MAX_HISTORY_DAYS};
use crate::engine::EngineParams;
use crate::error::{ForecastError, Result};
use crate::models::Horizon;
use crate::noise::RngNoise;
use crate::trend::TrendWindowKind;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Days projected when no horizon is requested
pub const DEFAULT_HORIZON_DAYS: i64 = 90;
/// Days of history read when no window is requested
pub const DEFAULT_HISTORY_DAYS: i64 = 90;

/// Settings for one forecast request.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastConfig {
    /// Number of future days to project
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,
    /// Length of the historical window
    #[serde(default = "default_history_days")]
    pub history_days: i64,
    /// Cloud-name allowlist, empty for all clouds
    #[serde(default)]
    pub clouds: Vec<String>,
    /// Floor negative predictions at zero
    #[serde(default = "default_true")]
    pub clamp_negative: bool,
    /// How the trend windows are cut
    #[serde(default)]
    pub trend_window: TrendWindowKind,
    /// Seed for reproducible noise
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_horizon_days() -> i64 {
    DEFAULT_HORIZON_DAYS
}

fn default_history_days() -> i64 {
    DEFAULT_HISTORY_DAYS
}

fn default_true() -> bool {
    true
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            history_days: DEFAULT_HISTORY_DAYS,
            clouds: Vec::new(),
            clamp_negative: true,
            trend_window: TrendWindowKind::default(),
            seed: None,
        }
    }
}

impl ForecastConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject a horizon or history window outside `1..=36_500` days
    pub fn validate(&self) -> Result<()> {
        Horizon::new(self.horizon_days)?;
        if self.history_days <= 0 || self.history_days > MAX_HISTORY_DAYS {
            return Err(ForecastError::ValidationError(format!(
                "history_days must be between 1 and {}, got {}",
                MAX_HISTORY_DAYS, self.history_days
            )));
        }
        Ok(())
    }

    /// Projection parameters implied by this configuration
    pub fn engine_params(&self) -> EngineParams {
        EngineParams::default().with_clamp_negative(self.clamp_negative)
    }

    /// Historical window ending at `end_date`
    pub fn history_query(&self, end_date: NaiveDate) -> Result<HistoryQuery> {
        Ok(HistoryQuery::new(end_date, self.history_days)?.with_clouds(self.clouds.clone()))
    }

    /// Noise source, seeded when a seed is configured
    pub fn noise_source(&self) -> RngNoise<StdRng> {
        match self.seed {
            Some(seed) => RngNoise::seeded(seed),
            None => RngNoise::from_entropy(),
        }
    }
}

/// Split a comma-separated cloud list, trimming blanks and dropping empties
pub fn parse_cloud_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
