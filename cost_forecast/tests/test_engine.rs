use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use cost_forecast::{
    EngineParams, FixedNoise, FnNoise, ForecastEngine, ForecastError, HistoricalCostPoint,
    PointKind, RngNoise, TrendDirection, TrendWindowKind,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
}

fn days_before(n: i64) -> NaiveDate {
    reference_date() - Duration::days(n)
}

/// `days` consecutive days of history ending yesterday, one point per cloud per day
fn create_history(clouds: &[(&str, f64)], days: i64) -> Vec<HistoricalCostPoint> {
    let mut history = Vec::new();
    for d in (1..=days).rev() {
        for (cloud, cost) in clouds {
            history.push(HistoricalCostPoint::new(days_before(d), *cloud, *cost));
        }
    }
    history
}

#[test]
fn test_concrete_two_point_scenario() {
    let history = vec![
        HistoricalCostPoint::new(days_before(2), "cloudA", 100.0),
        HistoricalCostPoint::new(days_before(1), "cloudA", 100.0),
    ];
    let engine = ForecastEngine::default();

    let output = engine
        .compute(&history, 10, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();

    assert_eq!(output.baselines.len(), 1);
    assert_relative_eq!(output.baselines[0].average_daily_cost, 100.0);
    assert_eq!(output.forecast_points.len(), 10);

    let last = &output.forecast_points[9];
    assert_eq!(last.date, reference_date() + Duration::days(10));
    assert_eq!(last.predicted_cost, 105.0);
    assert_relative_eq!(last.confidence, 80.0, epsilon = 1e-9);

    // The noise band is ±5% of the baseline
    for draw in [-0.5, 0.5] {
        let output = engine
            .compute(&history, 10, reference_date(), &mut FixedNoise::new(draw))
            .unwrap();
        let cost = output.forecast_points[9].predicted_cost;
        assert_relative_eq!(cost, 105.0 + draw * 10.0, epsilon = 1e-9);
    }

    let output = engine
        .compute(&history, 10, reference_date(), &mut RngNoise::seeded(11))
        .unwrap();
    let cost = output.forecast_points[9].predicted_cost;
    assert!((100.0..=110.0).contains(&cost), "{} outside noise band", cost);
}

#[rstest]
#[case(&[10.0, 20.0, 30.0], 20.0)]
#[case(&[100.0, 100.0], 100.0)]
#[case(&[0.5, 0.25, 0.0, 1.25], 0.5)]
fn test_baseline_is_arithmetic_mean(#[case] costs: &[f64], #[case] expected: f64) {
    let history: Vec<HistoricalCostPoint> = costs
        .iter()
        .enumerate()
        .map(|(i, &c)| HistoricalCostPoint::new(days_before(10 - i as i64), "gcp", c))
        .collect();

    let output = ForecastEngine::default()
        .compute(&history, 5, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();

    assert_relative_eq!(output.baselines[0].average_daily_cost, expected, epsilon = 1e-12);
}

#[rstest]
#[case(1, 1)]
#[case(7, 2)]
#[case(30, 3)]
#[case(90, 3)]
fn test_point_count_is_horizon_times_clouds(#[case] horizon: i64, #[case] clouds: usize) {
    let names = [("aws", 40.0), ("gcp", 25.0), ("azure", 12.5)];
    let history = create_history(&names[..clouds], 5);

    let output = ForecastEngine::default()
        .compute(&history, horizon, reference_date(), &mut RngNoise::seeded(3))
        .unwrap();

    assert_eq!(output.forecast_points.len(), horizon as usize * clouds);
    assert!(output
        .forecast_points
        .iter()
        .all(|p| p.kind == PointKind::Forecast));
}

#[rstest]
#[case(0)]
#[case(-1)]
#[case(-365)]
fn test_non_positive_horizon_is_rejected(#[case] horizon: i64) {
    let history = create_history(&[("aws", 10.0)], 3);
    let result =
        ForecastEngine::default().compute(&history, horizon, reference_date(), &mut FixedNoise::new(0.0));

    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_sparse_history_degrades_to_empty_forecast() {
    let engine = ForecastEngine::default();

    let empty = engine
        .compute(&[], 30, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();
    assert!(empty.forecast_points.is_empty());
    assert!(empty.scenarios.is_empty());
    assert_eq!(empty.trend.recent_daily_average, 0.0);
    assert_eq!(empty.trend.previous_daily_average, 0.0);
    assert_eq!(empty.trend.trend_percent, 0.0);
    assert_eq!(empty.trend.trend_direction, TrendDirection::Down);

    let single = vec![HistoricalCostPoint::new(days_before(1), "aws", 70.0)];
    let output = engine
        .compute(&single, 30, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();
    assert!(output.forecast_points.is_empty());
    // Trend still runs over the single point, divided by the full window
    assert_relative_eq!(output.trend.recent_daily_average, 10.0);
    assert_eq!(output.trend.trend_percent, 0.0);
}

#[rstest]
#[case(1)]
#[case(10)]
#[case(90)]
fn test_confidence_decays_to_eighty(#[case] horizon: i64) {
    let history = create_history(&[("aws", 10.0), ("gcp", 20.0)], 3);
    let output = ForecastEngine::default()
        .compute(&history, horizon, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();

    let confidences: Vec<f64> = output
        .forecast_points
        .iter()
        .map(|p| p.confidence)
        .collect();

    assert!(confidences.windows(2).all(|w| w[1] <= w[0]));
    assert!(confidences.iter().all(|c| (80.0..=95.0).contains(c)));
    assert_relative_eq!(confidences[0], 95.0 - 15.0 / horizon as f64, epsilon = 1e-9);
    assert_relative_eq!(*confidences.last().unwrap(), 80.0, epsilon = 1e-9);
}

#[test]
fn test_growth_ramp_without_noise() {
    let history = create_history(&[("aws", 200.0)], 2);
    let output = ForecastEngine::default()
        .compute(&history, 4, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();

    let costs: Vec<f64> = output
        .forecast_points
        .iter()
        .map(|p| p.predicted_cost)
        .collect();
    assert_eq!(costs, vec![202.5, 205.0, 207.5, 210.0]);
}

#[test]
fn test_scenarios_scale_the_realistic_series_exactly() {
    let history = create_history(&[("aws", 123.45), ("gcp", 67.89)], 20);
    let output = ForecastEngine::default()
        .compute(&history, 15, reference_date(), &mut RngNoise::seeded(99))
        .unwrap();
    let scenarios = &output.scenarios;

    assert_eq!(scenarios.realistic, output.forecast_points);
    for ((optimistic, realistic), pessimistic) in scenarios
        .optimistic
        .iter()
        .zip(&scenarios.realistic)
        .zip(&scenarios.pessimistic)
    {
        assert_eq!(optimistic.predicted_cost, realistic.predicted_cost * 0.7);
        assert_eq!(pessimistic.predicted_cost, realistic.predicted_cost * 1.3);
        assert_eq!(optimistic.date, realistic.date);
        assert_eq!(pessimistic.confidence, realistic.confidence);
    }
}

#[test]
fn test_flat_history_trend_is_down() {
    let history = create_history(&[("aws", 50.0)], 14);
    let output = ForecastEngine::default()
        .compute(&history, 90, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();

    assert_relative_eq!(output.trend.recent_daily_average, 50.0);
    assert_relative_eq!(output.trend.previous_daily_average, 50.0);
    assert_eq!(output.trend.trend_percent, 0.0);
    assert_eq!(output.trend.trend_direction, TrendDirection::Down);
}

#[test]
fn test_forecast_dates_follow_reference_not_history() {
    // History ends a month before the reference date
    let history = vec![
        HistoricalCostPoint::new(days_before(40), "aws", 10.0),
        HistoricalCostPoint::new(days_before(30), "aws", 10.0),
    ];
    let output = ForecastEngine::default()
        .compute(&history, 3, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();

    let dates: Vec<NaiveDate> = output.forecast_points.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![
            reference_date() + Duration::days(1),
            reference_date() + Duration::days(2),
            reference_date() + Duration::days(3),
        ]
    );
}

#[test]
fn test_fixed_noise_is_deterministic() {
    let history = create_history(&[("aws", 31.7), ("azure", 8.2)], 21);
    let engine = ForecastEngine::default();

    let first = engine
        .compute(&history, 45, reference_date(), &mut FixedNoise::new(0.2))
        .unwrap();
    let second = engine
        .compute(&history, 45, reference_date(), &mut FixedNoise::new(0.2))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_noise_draws_are_day_major() {
    let history = create_history(&[("aws", 100.0), ("gcp", 100.0)], 2);
    let mut draws = vec![-0.5, 0.5, 0.0, 0.25].into_iter();
    let mut noise = FnNoise::new(move || draws.next().unwrap_or(0.0));

    let output = ForecastEngine::new(
        EngineParams::new(0.0, 0.1, true).unwrap(),
        TrendWindowKind::Records,
    )
    .unwrap()
    .compute(&history, 2, reference_date(), &mut noise)
    .unwrap();

    let costs: Vec<(String, f64)> = output
        .forecast_points
        .iter()
        .map(|p| (p.cloud_id.to_string(), p.predicted_cost))
        .collect();
    assert_eq!(
        costs,
        vec![
            ("aws".to_string(), 95.0),
            ("gcp".to_string(), 105.0),
            ("aws".to_string(), 100.0),
            ("gcp".to_string(), 102.5),
        ]
    );
}

#[test]
fn test_negative_predictions_follow_clamp_setting() {
    let history = create_history(&[("tiny", 0.004)], 2);
    // A wide noise band pushes a tiny baseline below zero
    let wide = EngineParams::new(0.0, 20.0, true).unwrap();

    let clamped = ForecastEngine::new(wide, TrendWindowKind::Records)
        .unwrap()
        .compute(&history, 1, reference_date(), &mut FixedNoise::new(-0.5))
        .unwrap();
    assert_eq!(clamped.forecast_points[0].predicted_cost, 0.0);

    let raw = ForecastEngine::new(wide.with_clamp_negative(false), TrendWindowKind::Records)
        .unwrap()
        .compute(&history, 1, reference_date(), &mut FixedNoise::new(-0.5))
        .unwrap();
    // 0.004 - 0.5 * 20 * 0.004 = -0.036
    assert_eq!(raw.forecast_points[0].predicted_cost, -0.04);
}

#[test]
fn test_trend_window_strategies_differ_with_many_clouds() {
    // Two clouds per day: 14 records cover only 7 dates
    let mut history = create_history(&[("aws", 10.0), ("gcp", 10.0)], 7);
    history.extend(
        (1..=7)
            .flat_map(|d| {
                [
                    HistoricalCostPoint::new(reference_date() + Duration::days(d), "aws", 20.0),
                    HistoricalCostPoint::new(reference_date() + Duration::days(d), "gcp", 20.0),
                ]
            })
            .collect::<Vec<_>>(),
    );

    let by_records = ForecastEngine::default()
        .compute(&history, 1, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();
    // Both record windows fall inside the last 7 dates
    assert_relative_eq!(by_records.trend.recent_daily_average, 20.0);
    assert_relative_eq!(by_records.trend.previous_daily_average, 20.0);
    assert_eq!(by_records.trend.trend_direction, TrendDirection::Down);

    let by_dates = ForecastEngine::new(EngineParams::default(), TrendWindowKind::Dates)
        .unwrap()
        .compute(&history, 1, reference_date(), &mut FixedNoise::new(0.0))
        .unwrap();
    assert_relative_eq!(by_dates.trend.recent_daily_average, 40.0);
    assert_relative_eq!(by_dates.trend.previous_daily_average, 20.0);
    assert_relative_eq!(by_dates.trend.trend_percent, 100.0);
    assert_eq!(by_dates.trend.trend_direction, TrendDirection::Up);
}
