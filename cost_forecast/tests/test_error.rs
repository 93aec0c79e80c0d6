use cost_forecast::error::ForecastError;
use cost_forecast::utils::parse_date;
use cost_forecast::Horizon;
use std::io;

#[test]
fn test_error_conversion() {
    // Test IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    // Test JSON error conversion
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::SerializationError(_)));

    // Test math error conversion
    let math_error = cost_math::MathError::InsufficientData("empty".to_string());
    let forecast_error = ForecastError::from(math_error);
    assert!(matches!(forecast_error, ForecastError::MathError(_)));

    // Test date parse error conversion
    assert!(matches!(
        parse_date("yesterday"),
        Err(ForecastError::ParseError(_))
    ));
}

#[test]
fn test_error_display() {
    let error = Horizon::new(-7).unwrap_err();
    let error_string = format!("{}", error);

    assert!(error_string.starts_with("Validation error"));
    assert!(error_string.contains("-7"));

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = format!("{}", ForecastError::from(io_error));

    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}
