//! Cost projection models

use crate::data::{CloudId, HistoricalCostPoint};
use crate::error::{ForecastError, Result};
use crate::noise::NoiseSource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::RangeInclusive;

pub mod mean_baseline;

pub use mean_baseline::{CloudBaseline, MeanBaseline, TrainedMeanBaseline};

/// Longest horizon accepted, in days
pub const MAX_HORIZON_DAYS: i64 = 36_500;

/// Whether a point was observed or projected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    /// Historical passthrough
    Actual,
    /// Computed projection
    Forecast,
}

/// Projected cost of one cloud on one future day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Future calendar day
    pub date: NaiveDate,
    /// Predicted spend, rounded to cents
    #[serde(rename = "cost")]
    pub predicted_cost: f64,
    /// Cloud the baseline was derived from
    pub cloud_id: CloudId,
    /// Always `Forecast` for engine output
    #[serde(rename = "type")]
    pub kind: PointKind,
    /// Heuristic confidence score in percent
    pub confidence: f64,
}

impl ForecastPoint {
    /// Copy of this point with its predicted cost multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            predicted_cost: self.predicted_cost * factor,
            ..self.clone()
        }
    }
}

/// Validated number of future days to project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Horizon(usize);

impl Horizon {
    /// Create a horizon, rejecting zero and negative day counts
    pub fn new(days: i64) -> Result<Self> {
        if days <= 0 {
            return Err(ForecastError::ValidationError(format!(
                "Horizon must be a positive number of days, got {}",
                days
            )));
        }
        if days > MAX_HORIZON_DAYS {
            return Err(ForecastError::ValidationError(format!(
                "Horizon of {} days exceeds the {} day limit",
                days, MAX_HORIZON_DAYS
            )));
        }
        Ok(Self(days as usize))
    }

    /// Number of days
    pub fn days(&self) -> usize {
        self.0
    }

    /// Day offsets `1..=days`
    pub fn offsets(&self) -> RangeInclusive<usize> {
        1..=self.0
    }
}

impl TryFrom<i64> for Horizon {
    type Error = ForecastError;

    fn try_from(days: i64) -> Result<Self> {
        Self::new(days)
    }
}

/// Trained cost model able to project forward
pub trait TrainedCostModel: Debug {
    /// Project every known cloud over `horizon` days after `reference_date`
    fn project(
        &self,
        horizon: Horizon,
        reference_date: NaiveDate,
        noise: &mut dyn NoiseSource,
    ) -> Result<Vec<ForecastPoint>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Cost model that can be trained on daily history
pub trait CostModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedCostModel;

    /// Train the model on historical points
    fn train(&self, history: &[HistoricalCostPoint]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}
