//! Presentation-facing forecast report
//!
//! Shapes engine output into the JSON document a dashboard reads:
//! `historical`, `forecast`, `trends` and `scenarios`, with camelCase keys
//! and trend figures as two-decimal strings.

use crate::data::{CloudDirectory, CloudId, HistoricalCostPoint};
use crate::engine::ForecastOutput;
use crate::error::Result;
use crate::models::{ForecastPoint, PointKind};
use crate::scenarios::ScenarioSet;
use crate::trend::{TrendDirection, TrendSummary};
use chrono::NaiveDate;
use cost_math::format_fixed;
use serde::Serialize;

/// One plotted point, observed or projected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesEntry {
    pub date: NaiveDate,
    pub cost: f64,
    pub cloud_id: CloudId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: PointKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SeriesEntry {
    /// Historical point tagged as actual
    pub fn actual(point: &HistoricalCostPoint, directory: &CloudDirectory) -> Self {
        Self {
            date: point.date,
            cost: point.total_cost,
            cloud_id: point.cloud_id.clone(),
            cloud_name: directory.name(&point.cloud_id).map(str::to_string),
            kind: PointKind::Actual,
            confidence: None,
        }
    }

    /// Projected point with its confidence
    pub fn forecast(point: &ForecastPoint, directory: &CloudDirectory) -> Self {
        Self {
            date: point.date,
            cost: point.predicted_cost,
            cloud_id: point.cloud_id.clone(),
            cloud_name: directory.name(&point.cloud_id).map(str::to_string),
            kind: point.kind,
            confidence: Some(point.confidence),
        }
    }
}

/// Trend figures formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDisplay {
    pub current_daily_average: String,
    pub previous_daily_average: String,
    pub trend_percent: String,
    pub trend_direction: TrendDirection,
    pub projected_monthly_cost: String,
    pub projected_quarterly_cost: String,
}

impl From<&TrendSummary> for TrendDisplay {
    fn from(trend: &TrendSummary) -> Self {
        Self {
            current_daily_average: format_fixed(trend.recent_daily_average, 2),
            previous_daily_average: format_fixed(trend.previous_daily_average, 2),
            trend_percent: format_fixed(trend.trend_percent, 2),
            trend_direction: trend.trend_direction,
            projected_monthly_cost: format_fixed(trend.projected_monthly_cost, 2),
            projected_quarterly_cost: format_fixed(trend.projected_quarterly_cost, 2),
        }
    }
}

/// Complete forecast document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub historical: Vec<SeriesEntry>,
    pub forecast: Vec<ForecastPoint>,
    pub trends: TrendDisplay,
    pub scenarios: ScenarioSet,
    #[serde(skip)]
    directory: CloudDirectory,
}

impl ForecastReport {
    /// Assemble the report from the history fed to the engine and its output
    pub fn build(
        history: &[HistoricalCostPoint],
        output: &ForecastOutput,
        directory: &CloudDirectory,
    ) -> Self {
        Self {
            historical: history
                .iter()
                .map(|p| SeriesEntry::actual(p, directory))
                .collect(),
            forecast: output.forecast_points.clone(),
            trends: TrendDisplay::from(&output.trend),
            scenarios: output.scenarios.clone(),
            directory: directory.clone(),
        }
    }

    /// Historical entries followed by forecast entries, as charted together
    pub fn combined_series(&self) -> Vec<SeriesEntry> {
        self.historical
            .iter()
            .cloned()
            .chain(
                self.forecast
                    .iter()
                    .map(|p| SeriesEntry::forecast(p, &self.directory)),
            )
            .collect()
    }

    /// Compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
