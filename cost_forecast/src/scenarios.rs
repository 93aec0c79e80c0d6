//! Best and worst case views over the realistic forecast

use crate::models::ForecastPoint;
use serde::Serialize;

/// Multiplier applied to the realistic series for the optimistic view
pub const OPTIMISTIC_FACTOR: f64 = 0.7;
/// Multiplier applied to the realistic series for the pessimistic view
pub const PESSIMISTIC_FACTOR: f64 = 1.3;

/// Named cost assumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Optimistic,
    Realistic,
    Pessimistic,
}

impl Scenario {
    /// All scenarios, best case first
    pub const ALL: [Scenario; 3] = [
        Scenario::Optimistic,
        Scenario::Realistic,
        Scenario::Pessimistic,
    ];

    /// Multiplier relative to the realistic series
    pub fn factor(&self) -> f64 {
        match self {
            Scenario::Optimistic => OPTIMISTIC_FACTOR,
            Scenario::Realistic => 1.0,
            Scenario::Pessimistic => PESSIMISTIC_FACTOR,
        }
    }
}

/// Three parallel forecast series derived from one realistic projection.
///
/// The scaled series reuse the realistic draws; nothing is re-sampled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioSet {
    pub optimistic: Vec<ForecastPoint>,
    pub realistic: Vec<ForecastPoint>,
    pub pessimistic: Vec<ForecastPoint>,
}

/// Summed predicted cost of each scenario over the horizon
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScenarioTotals {
    pub optimistic: f64,
    pub realistic: f64,
    pub pessimistic: f64,
}

impl ScenarioSet {
    /// Derive the scaled views from the realistic series
    pub fn from_realistic(realistic: Vec<ForecastPoint>) -> Self {
        let scale = |factor: f64| -> Vec<ForecastPoint> {
            realistic.iter().map(|p| p.scaled(factor)).collect()
        };
        let optimistic = scale(OPTIMISTIC_FACTOR);
        let pessimistic = scale(PESSIMISTIC_FACTOR);

        Self {
            optimistic,
            realistic,
            pessimistic,
        }
    }

    /// Series for one scenario
    pub fn series(&self, scenario: Scenario) -> &[ForecastPoint] {
        match scenario {
            Scenario::Optimistic => &self.optimistic,
            Scenario::Realistic => &self.realistic,
            Scenario::Pessimistic => &self.pessimistic,
        }
    }

    /// Check whether the set holds no points
    pub fn is_empty(&self) -> bool {
        self.realistic.is_empty()
    }

    /// Total predicted cost per scenario
    pub fn totals(&self) -> ScenarioTotals {
        let total = |scenario| -> f64 {
            self.series(scenario)
                .iter()
                .map(|p| p.predicted_cost)
                .sum()
        };

        ScenarioTotals {
            optimistic: total(Scenario::Optimistic),
            realistic: total(Scenario::Realistic),
            pessimistic: total(Scenario::Pessimistic),
        }
    }
}
