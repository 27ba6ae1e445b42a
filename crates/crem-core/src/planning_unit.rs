//! Planning unit identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a spatial sub-area of a catchment.
///
/// Planning units are fixed for the lifetime of a model; actions and
/// per-unit variable values are keyed by them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlanningUnitId(pub u64);

impl PlanningUnitId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PlanningUnitId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlanningUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
