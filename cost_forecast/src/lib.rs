//! # Cost Forecast
//!
//! Per-cloud daily cost forecasting for multi-cloud billing history.
//!
//! ## Features
//!
//! - Billing record loading (CSV) and daily aggregation per cloud
//! - Mean baseline projection with a linear growth ramp and bounded noise
//! - Linearly decaying confidence per projected day
//! - Recent-versus-previous trend indicators and monthly/quarterly projections
//! - Optimistic, realistic and pessimistic scenario bands
//! - A JSON report shaped for dashboards
//!
//! ## Reproducibility
//!
//! The engine never reads the clock or a global random generator. Callers
//! pass a reference date and a [`NoiseSource`]:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cost_forecast::{ForecastEngine, HistoricalCostPoint, RngNoise};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
//! let history = vec![
//!     HistoricalCostPoint::new(day(1), "aws", 120.0),
//!     HistoricalCostPoint::new(day(2), "aws", 80.0),
//! ];
//!
//! let engine = ForecastEngine::default();
//! let a = engine.compute(&history, 30, day(2), &mut RngNoise::seeded(7)).unwrap();
//! let b = engine.compute(&history, 30, day(2), &mut RngNoise::seeded(7)).unwrap();
//! assert_eq!(a, b);
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use cost_forecast::{CloudDirectory, ForecastConfig, ForecastEngine, ForecastReport, HistoryLoader};
//!
//! let config = ForecastConfig::default();
//! let records = HistoryLoader::from_csv("costs.csv")?;
//! let directory = CloudDirectory::from_records(&records);
//!
//! let today = Utc::now().date_naive();
//! let history = config.history_query(today)?.apply(&records, &directory);
//!
//! let engine = ForecastEngine::from_config(&config)?;
//! let output = engine.compute(&history, config.horizon_days, today, &mut config.noise_source())?;
//!
//! println!("{}", ForecastReport::build(&history, &output, &directory).to_json()?);
//! # Ok::<(), cost_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod noise;
pub mod report;
pub mod scenarios;
pub mod trend;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{parse_cloud_list, ForecastConfig};
pub use crate::data::{
    aggregate_daily, CloudDirectory, CloudId, CostRecord, HistoricalCostPoint, HistoryLoader,
    HistoryQuery,
};
pub use crate::engine::{compute_forecast, EngineParams, ForecastEngine, ForecastOutput};
pub use crate::error::ForecastError;
pub use crate::models::{CloudBaseline, ForecastPoint, Horizon, PointKind};
pub use crate::noise::{FixedNoise, FnNoise, NoiseSource, RngNoise};
pub use crate::report::ForecastReport;
pub use crate::scenarios::{Scenario, ScenarioSet};
pub use crate::trend::{TrendDirection, TrendSummary, TrendWindowKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
