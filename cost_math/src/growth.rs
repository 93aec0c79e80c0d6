//! Growth ramps, confidence decay and relative change

/// Linear ramp across a horizon: `1 + (step / horizon) * total_growth`.
///
/// At `step == horizon` the factor reaches `1 + total_growth`. A zero
/// horizon yields a flat factor of 1.
pub fn linear_ramp(step: usize, horizon: usize, total_growth: f64) -> f64 {
    if horizon == 0 {
        return 1.0;
    }
    1.0 + (step as f64 / horizon as f64) * total_growth
}

/// Linear decay across a horizon: `start - (step / horizon) * span`.
///
/// At `step == horizon` the value reaches `start - span`.
pub fn linear_decay(step: usize, horizon: usize, start: f64, span: f64) -> f64 {
    if horizon == 0 {
        return start;
    }
    start - (step as f64 / horizon as f64) * span
}

/// Relative change from `previous` to `current`, in percent.
///
/// Returns 0 when `previous` is not positive.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}
