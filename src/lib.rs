//! # Cloud Cost Workspace
//!
//! Facade over the workspace crates:
//!
//! - [`cost_math`]: numeric helpers (means, window averages, percent change, rounding)
//! - [`cost_forecast`]: the per-cloud cost forecast engine, trend summary and scenarios
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use cloud_cost_workspace::forecast::{FixedNoise, ForecastEngine, HistoricalCostPoint};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
//! let history = vec![
//!     HistoricalCostPoint::new(day(1), "aws", 100.0),
//!     HistoricalCostPoint::new(day(2), "aws", 100.0),
//! ];
//!
//! let engine = ForecastEngine::default();
//! let output = engine
//!     .compute(&history, 10, day(3), &mut FixedNoise::new(0.0))
//!     .unwrap();
//!
//! assert_eq!(output.forecast_points.len(), 10);
//! assert_eq!(output.forecast_points[9].predicted_cost, 105.0);
//! ```

pub use cost_forecast as forecast;
pub use cost_math as math;

/// Horizon used when the caller does not ask for one.
pub use cost_forecast::config::DEFAULT_HORIZON_DAYS;
