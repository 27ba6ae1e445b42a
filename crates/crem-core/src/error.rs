//! Error types for crem

use std::fmt;

use thiserror::Error;

/// Main error type for crem operations
#[derive(Debug, Error)]
pub enum CremError {
    /// Error in model parameters or configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more decision variables are outside their bounds
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Seeding could not produce a valid starting state
    #[error("Seeding error: {0}")]
    Seeding(String),

    /// A decision variable was looked up by a name the model doesn't know
    #[error("Unknown decision variable: {0}")]
    UnknownVariable(String),

    /// No management action matched the requested identity
    #[error("Unknown management action: {0}")]
    UnknownAction(String),
}

/// Result type alias for crem operations
pub type Result<T> = std::result::Result<T, CremError>;

/// Which side of a bound a value fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundDirection {
    BelowMinimum,
    AboveMaximum,
}

/// A single decision variable value found outside one of its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundViolation {
    pub variable: String,
    pub value: f64,
    pub bound: f64,
    pub direction: BoundDirection,
}

impl BoundViolation {
    /// How far the value lies past the bound, always non-negative.
    pub fn excess(&self) -> f64 {
        (self.value - self.bound).abs()
    }
}

impl fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = match self.direction {
            BoundDirection::BelowMinimum => "< lower bound",
            BoundDirection::AboveMaximum => "> upper bound",
        };
        write!(
            f,
            "{} {:.6} {} {:.6} (by {:.6})",
            self.variable,
            self.value,
            relation,
            self.bound,
            self.excess()
        )
    }
}

/// Composite error collecting every bound violation found in one check.
///
/// A single violation displays on its own; several are listed one per line
/// under the error's context text.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    context: String,
    violations: Vec<BoundViolation>,
}

impl ValidationError {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            violations: Vec::new(),
        }
    }

    pub fn push(&mut self, violation: BoundViolation) {
        self.violations.push(violation);
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn violations(&self) -> &[BoundViolation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns `Ok(())` when nothing was collected, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violations.as_slice() {
            [] => f.write_str(&self.context),
            [single] => write!(f, "{}", single),
            many => {
                write!(f, "{}, composed of: [", self.context)?;
                for violation in many {
                    write!(f, "\n\t{}", violation)?;
                }
                f.write_str("\n]")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
