//! Recent-versus-previous spend indicators
//!
//! The summary compares the average of the most recent window of history
//! with the window before it. How the windows are cut is delegated to a
//! [`TrendWindow`], so the literal record slicing can be replaced by a
//! per-date aggregation without touching the engine.

use crate::data::HistoricalCostPoint;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use cost_math::{percent_change, window_average};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::debug;

/// Length of each trend window, also used as the averaging divisor
pub const TREND_WINDOW: usize = 7;
/// Days in a projected month
pub const MONTH_DAYS: f64 = 30.0;
/// Days in a projected quarter
pub const QUARTER_DAYS: f64 = 90.0;

/// Cuts history into a recent and a previous cost window
pub trait TrendWindow: Debug {
    /// Costs of the recent window and of the window just before it
    fn windows(&self, history: &[HistoricalCostPoint]) -> (Vec<f64>, Vec<f64>);

    /// Name of the windowing strategy
    fn name(&self) -> &str;
}

/// Last 7 records versus the 7 records before them.
///
/// Records are taken positionally, so with several clouds per day the
/// windows cover fewer than 7 calendar days.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordTail;

impl TrendWindow for RecordTail {
    fn windows(&self, history: &[HistoricalCostPoint]) -> (Vec<f64>, Vec<f64>) {
        let costs: Vec<f64> = history.iter().map(|p| p.total_cost).collect();
        tail_windows(&costs)
    }

    fn name(&self) -> &str {
        "records"
    }
}

/// Last 7 dates versus the 7 dates before them, summed across clouds
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTotals;

impl TrendWindow for DateTotals {
    fn windows(&self, history: &[HistoricalCostPoint]) -> (Vec<f64>, Vec<f64>) {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for point in history {
            *totals.entry(point.date).or_insert(0.0) += point.total_cost;
        }
        let costs: Vec<f64> = totals.into_values().collect();
        tail_windows(&costs)
    }

    fn name(&self) -> &str {
        "dates"
    }
}

fn tail_windows(costs: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = costs.len();
    let recent_start = n.saturating_sub(TREND_WINDOW);
    let previous_start = n.saturating_sub(2 * TREND_WINDOW);
    (
        costs[recent_start..].to_vec(),
        costs[previous_start..recent_start].to_vec(),
    )
}

/// Selectable trend windowing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendWindowKind {
    /// Positional record slices
    #[default]
    Records,
    /// Per-date totals across clouds
    Dates,
}

impl TrendWindowKind {
    /// The strategy implementing this kind
    pub fn window(&self) -> &'static dyn TrendWindow {
        match self {
            TrendWindowKind::Records => &RecordTail,
            TrendWindowKind::Dates => &DateTotals,
        }
    }
}

impl FromStr for TrendWindowKind {
    type Err = ForecastError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "records" | "record" => Ok(TrendWindowKind::Records),
            "dates" | "date" => Ok(TrendWindowKind::Dates),
            other => Err(ForecastError::ParseError(format!(
                "Unknown trend window: {}",
                other
            ))),
        }
    }
}

/// Direction of the recent trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Spend grew
    Up,
    /// Spend shrank or held flat
    Down,
}

impl TrendDirection {
    /// `Up` only for a strictly positive change; a flat trend counts as `Down`
    pub fn from_percent(trend_percent: f64) -> Self {
        if trend_percent > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }
}

/// Spend indicators across all clouds combined
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub recent_daily_average: f64,
    pub previous_daily_average: f64,
    pub trend_percent: f64,
    pub trend_direction: TrendDirection,
    pub projected_monthly_cost: f64,
    pub projected_quarterly_cost: f64,
}

impl TrendSummary {
    /// Build the summary from the two window averages
    pub fn from_averages(recent_daily_average: f64, previous_daily_average: f64) -> Self {
        let trend_percent = percent_change(recent_daily_average, previous_daily_average);

        Self {
            recent_daily_average,
            previous_daily_average,
            trend_percent,
            trend_direction: TrendDirection::from_percent(trend_percent),
            projected_monthly_cost: recent_daily_average * MONTH_DAYS,
            projected_quarterly_cost: recent_daily_average * QUARTER_DAYS,
        }
    }

    /// Summarize `history` using the given windowing strategy.
    ///
    /// Both windows are divided by the constant [`TREND_WINDOW`], so short
    /// history deflates the averages and empty history yields zeros.
    pub fn from_history(history: &[HistoricalCostPoint], window: &dyn TrendWindow) -> Result<Self> {
        let (recent, previous) = window.windows(history);
        debug!(
            strategy = window.name(),
            recent = recent.len(),
            previous = previous.len(),
            "cut trend windows"
        );

        let recent_average = window_average(&recent, TREND_WINDOW)?;
        let previous_average = window_average(&previous, TREND_WINDOW)?;
        Ok(Self::from_averages(recent_average, previous_average))
    }
}
