use crem_core::{BoundDirection, BoundViolation};
use serde::{Deserialize, Serialize};

/// Optional inclusive lower and upper bounds on a variable's value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    minimum: Option<f64>,
    maximum: Option<f64>,
}

impl Bounds {
    pub const fn unbounded() -> Self {
        Self {
            minimum: None,
            maximum: None,
        }
    }

    pub const fn at_most(maximum: f64) -> Self {
        Self {
            minimum: None,
            maximum: Some(maximum),
        }
    }

    pub const fn at_least(minimum: f64) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: None,
        }
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<f64> {
        self.maximum
    }

    pub fn is_bounded(&self) -> bool {
        self.minimum.is_some() || self.maximum.is_some()
    }

    pub fn within_bounds(&self, value: f64) -> bool {
        self.minimum.map_or(true, |minimum| value >= minimum)
            && self.maximum.map_or(true, |maximum| value <= maximum)
    }

    /// Describes how `value` falls outside the bounds, if it does.
    pub fn violation(&self, variable: &str, value: f64) -> Option<BoundViolation> {
        if let Some(minimum) = self.minimum.filter(|minimum| value < *minimum) {
            return Some(BoundViolation {
                variable: variable.to_string(),
                value,
                bound: minimum,
                direction: BoundDirection::BelowMinimum,
            });
        }
        self.maximum
            .filter(|maximum| value > *maximum)
            .map(|maximum| BoundViolation {
                variable: variable.to_string(),
                value,
                bound: maximum,
                direction: BoundDirection::AboveMaximum,
            })
    }
}
