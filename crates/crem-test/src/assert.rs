use crem_core::Precision;

/// Asserts that two values agree to within one unit in the last decimal
/// place `precision` keeps.
#[track_caller]
pub fn assert_within_precision(actual: f64, expected: f64, precision: Precision) {
    let tolerance = 10f64.powi(-(precision.places() as i32));
    assert!(
        (actual - expected).abs() <= tolerance,
        "{actual} and {expected} differ by more than {tolerance}"
    );
}
