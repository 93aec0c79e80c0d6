//! Utility functions for the cost_forecast crate

use crate::error::{ForecastError, Result};
use crate::models::Horizon;
use chrono::{Days, NaiveDate};

/// Calendar days `1..=horizon` after `reference_date`
pub fn future_dates(reference_date: NaiveDate, horizon: Horizon) -> Result<Vec<NaiveDate>> {
    horizon
        .offsets()
        .map(|offset| {
            reference_date
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| {
                    ForecastError::ValidationError(format!(
                        "Horizon of {} days runs past the last representable date",
                        horizon.days()
                    ))
                })
        })
        .collect()
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_dates_start_after_reference() {
        let reference = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let dates = future_dates(reference, Horizon::new(3).unwrap()).unwrap();

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn test_future_dates_overflow() {
        assert!(future_dates(NaiveDate::MAX, Horizon::new(1).unwrap()).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-10-05 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 10, 5).unwrap()
        );
        assert!(matches!(
            parse_date("05/10/2024"),
            Err(ForecastError::ParseError(_))
        ));
    }
}
