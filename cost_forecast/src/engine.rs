//! Forecast engine: baseline projection, trend summary and scenarios

use crate::config::ForecastConfig;
use crate::data::HistoricalCostPoint;
use crate::error::{ForecastError, Result};
use crate::models::{CloudBaseline, CostModel, ForecastPoint, Horizon, MeanBaseline, TrainedCostModel};
use crate::noise::{NoiseSource, RngNoise};
use crate::scenarios::ScenarioSet;
use crate::trend::{TrendSummary, TrendWindowKind};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Fewest historical points that still produce a projection
pub const MIN_HISTORY_POINTS: usize = 2;

/// Tuning of the baseline projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Total growth reached on the last horizon day (0.05 = +5%)
    pub growth_rate: f64,
    /// Scale of the noise band relative to the baseline (0.1 = ±5%)
    pub noise_amplitude: f64,
    /// Confidence before any decay
    pub confidence_start: f64,
    /// Confidence lost by the last horizon day
    pub confidence_span: f64,
    /// Floor negative predictions at zero
    pub clamp_negative: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            growth_rate: 0.05,
            noise_amplitude: 0.1,
            confidence_start: 95.0,
            confidence_span: 15.0,
            clamp_negative: true,
        }
    }
}

impl EngineParams {
    /// Create parameters with the default confidence decay
    pub fn new(growth_rate: f64, noise_amplitude: f64, clamp_negative: bool) -> Result<Self> {
        let params = Self {
            growth_rate,
            noise_amplitude,
            clamp_negative,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    /// Toggle the zero floor on predictions
    pub fn with_clamp_negative(mut self, clamp_negative: bool) -> Self {
        self.clamp_negative = clamp_negative;
        self
    }

    /// Check that every parameter is finite and in range
    pub fn validate(&self) -> Result<()> {
        if !self.growth_rate.is_finite() || self.growth_rate < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Growth rate must be a non-negative number, got {}",
                self.growth_rate
            )));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Noise amplitude must be a non-negative number, got {}",
                self.noise_amplitude
            )));
        }
        if !(5.0..=95.0).contains(&self.confidence_start) {
            return Err(ForecastError::InvalidParameter(format!(
                "Confidence start must be between 5 and 95, got {}",
                self.confidence_start
            )));
        }
        if !self.confidence_span.is_finite()
            || self.confidence_span < 0.0
            || self.confidence_start - self.confidence_span < 5.0
        {
            return Err(ForecastError::InvalidParameter(format!(
                "Confidence span {} must keep confidence at or above 5",
                self.confidence_span
            )));
        }
        Ok(())
    }
}

/// Everything computed for one forecast request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastOutput {
    /// Realistic projection, day-major
    pub forecast_points: Vec<ForecastPoint>,
    /// Spend indicators across all clouds
    pub trend: TrendSummary,
    /// Optimistic, realistic and pessimistic series
    pub scenarios: ScenarioSet,
    /// Per-cloud averages the projection was built from
    pub baselines: Vec<CloudBaseline>,
}

/// Stateless forecast engine
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    params: EngineParams,
    trend_window: TrendWindowKind,
}

impl ForecastEngine {
    /// Create an engine with validated parameters
    pub fn new(params: EngineParams, trend_window: TrendWindowKind) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            trend_window,
        })
    }

    /// Create an engine from a loaded configuration
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        Self::new(config.engine_params(), config.trend_window)
    }

    /// Projection parameters in use
    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Trend windowing strategy in use
    pub fn trend_window(&self) -> TrendWindowKind {
        self.trend_window
    }

    /// Forecast `horizon_days` days after `reference_date`.
    ///
    /// `history` is expected in ascending date order. Fewer than
    /// [`MIN_HISTORY_POINTS`] points yield an empty projection while the
    /// trend summary is still computed. A non-positive horizon is rejected.
    pub fn compute(
        &self,
        history: &[HistoricalCostPoint],
        horizon_days: i64,
        reference_date: NaiveDate,
        noise: &mut dyn NoiseSource,
    ) -> Result<ForecastOutput> {
        let horizon = Horizon::new(horizon_days)?;
        let trained = MeanBaseline::new(self.params)?.train(history)?;

        let forecast_points = if history.len() < MIN_HISTORY_POINTS {
            warn!(
                points = history.len(),
                "not enough history to project, returning an empty forecast"
            );
            Vec::new()
        } else {
            trained.project(horizon, reference_date, noise)?
        };

        let trend = TrendSummary::from_history(history, self.trend_window.window())?;
        let scenarios = ScenarioSet::from_realistic(forecast_points.clone());

        info!(
            model = trained.name(),
            clouds = trained.baselines().len(),
            horizon = horizon.days(),
            points = forecast_points.len(),
            %reference_date,
            "computed cost forecast"
        );

        Ok(ForecastOutput {
            forecast_points,
            trend,
            scenarios,
            baselines: trained.baselines().to_vec(),
        })
    }
}

/// Forecast from today's UTC date with default parameters and fresh randomness
pub fn compute_forecast(history: &[HistoricalCostPoint], horizon_days: i64) -> Result<ForecastOutput> {
    ForecastEngine::default().compute(
        history,
        horizon_days,
        Utc::now().date_naive(),
        &mut RngNoise::from_entropy(),
    )
}
