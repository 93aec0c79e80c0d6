//! Mean baseline model: flat per-cloud average with a linear growth ramp

use crate::data::{CloudId, HistoricalCostPoint};
use crate::engine::EngineParams;
use crate::error::{ForecastError, Result};
use crate::models::{CostModel, ForecastPoint, Horizon, PointKind, TrainedCostModel};
use crate::noise::NoiseSource;
use crate::utils::future_dates;
use chrono::NaiveDate;
use cost_math::{linear_decay, linear_ramp, mean, round_to};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Lowest confidence a projected point may carry
pub const CONFIDENCE_FLOOR: f64 = 5.0;
/// Highest confidence a projected point may carry
pub const CONFIDENCE_CEILING: f64 = 95.0;

/// Average daily spend of one cloud
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudBaseline {
    /// Cloud the average belongs to
    pub cloud_id: CloudId,
    /// Arithmetic mean of the cloud's daily totals
    pub average_daily_cost: f64,
    /// Number of historical points behind the mean
    pub observations: usize,
}

/// Mean baseline model
#[derive(Debug, Clone)]
pub struct MeanBaseline {
    /// Name of the model
    name: String,
    /// Growth, noise and confidence settings
    params: EngineParams,
}

/// Trained mean baseline model
#[derive(Debug, Clone)]
pub struct TrainedMeanBaseline {
    /// Name of the model
    name: String,
    /// Growth, noise and confidence settings
    params: EngineParams,
    /// Per-cloud averages in first-seen order
    baselines: Vec<CloudBaseline>,
}

impl MeanBaseline {
    /// Create a new mean baseline model
    pub fn new(params: EngineParams) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            name: format!(
                "Mean Baseline (growth={}, noise={})",
                params.growth_rate, params.noise_amplitude
            ),
            params,
        })
    }
}

impl CostModel for MeanBaseline {
    type Trained = TrainedMeanBaseline;

    fn train(&self, history: &[HistoricalCostPoint]) -> Result<Self::Trained> {
        let mut order: Vec<&CloudId> = Vec::new();
        let mut costs: HashMap<&CloudId, Vec<f64>> = HashMap::new();

        for point in history {
            costs
                .entry(&point.cloud_id)
                .or_insert_with(|| {
                    order.push(&point.cloud_id);
                    Vec::new()
                })
                .push(point.total_cost);
        }

        let mut baselines = Vec::with_capacity(order.len());
        for cloud_id in order {
            let values = costs.get(cloud_id).ok_or_else(|| {
                ForecastError::DataError(format!("Missing costs for cloud {}", cloud_id))
            })?;
            let average_daily_cost = mean(values)?;
            debug!(
                cloud = %cloud_id,
                average_daily_cost,
                observations = values.len(),
                "computed cloud baseline"
            );
            baselines.push(CloudBaseline {
                cloud_id: cloud_id.clone(),
                average_daily_cost,
                observations: values.len(),
            });
        }

        Ok(TrainedMeanBaseline {
            name: self.name.clone(),
            params: self.params,
            baselines,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedMeanBaseline {
    /// Per-cloud averages in the order clouds first appeared
    pub fn baselines(&self) -> &[CloudBaseline] {
        &self.baselines
    }

    /// Confidence of the point `offset` days into `horizon`
    pub fn confidence(&self, offset: usize, horizon: Horizon) -> f64 {
        linear_decay(
            offset,
            horizon.days(),
            self.params.confidence_start,
            self.params.confidence_span,
        )
        .clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
    }

    fn floor(&self, predicted: f64) -> f64 {
        if self.params.clamp_negative {
            predicted.max(0.0)
        } else if predicted == 0.0 {
            // Drop the sign of a negative zero
            0.0
        } else {
            predicted
        }
    }
}

impl TrainedCostModel for TrainedMeanBaseline {
    fn project(
        &self,
        horizon: Horizon,
        reference_date: NaiveDate,
        noise: &mut dyn NoiseSource,
    ) -> Result<Vec<ForecastPoint>> {
        let dates = future_dates(reference_date, horizon)?;
        let mut points = Vec::with_capacity(horizon.days() * self.baselines.len());
        let mut below_zero = 0usize;

        for (offset, date) in horizon.offsets().zip(dates) {
            let growth_factor = linear_ramp(offset, horizon.days(), self.params.growth_rate);
            let confidence = self.confidence(offset, horizon);

            for baseline in &self.baselines {
                let average = baseline.average_daily_cost;
                let noise_term = noise.sample() * self.params.noise_amplitude * average;
                let predicted = round_to(average * growth_factor + noise_term, 2);
                if predicted < 0.0 {
                    below_zero += 1;
                }

                points.push(ForecastPoint {
                    date,
                    predicted_cost: self.floor(predicted),
                    cloud_id: baseline.cloud_id.clone(),
                    kind: PointKind::Forecast,
                    confidence,
                });
            }
        }

        if below_zero > 0 {
            if self.params.clamp_negative {
                warn!(points = below_zero, "negative projections clamped to zero");
            } else {
                warn!(points = below_zero, "projections fell below zero");
            }
        }

        Ok(points)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
