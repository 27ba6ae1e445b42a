//! Decimal precision and rounding for variable values.

use serde::{Deserialize, Serialize};

/// Rounds `value` to `places` decimal places, half away from zero.
pub fn round_to_precision(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Number of decimal places a decision variable keeps.
///
/// Every stored value and every staged delta is rounded to this precision,
/// so that repeated incremental updates cannot accumulate drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Precision(u32);

impl Precision {
    /// Three decimal places, used unless a variable says otherwise.
    pub const DEFAULT: Precision = Precision(3);

    pub const fn new(places: u32) -> Self {
        Self(places)
    }

    pub const fn places(self) -> u32 {
        self.0
    }

    pub fn round(self, value: f64) -> f64 {
        round_to_precision(value, self.0)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}
