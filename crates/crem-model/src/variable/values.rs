use std::collections::BTreeMap;

use crem_core::{PlanningUnitId, Precision};

use crate::command::ValueStore;

/// A single rounded value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarValue {
    value: f64,
    precision: Precision,
}

impl ScalarValue {
    pub fn new(value: f64, precision: Precision) -> Self {
        Self {
            value: precision.round(value),
            precision,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = self.precision.round(value);
    }
}

impl ValueStore<()> for ScalarValue {
    fn load(&self, _key: &()) -> f64 {
        self.value
    }

    fn store(&mut self, _key: &(), value: f64) {
        self.set_value(value);
    }

    fn precision(&self) -> Precision {
        self.precision
    }
}

/// Rounded values per planning unit, with their running total.
///
/// The total is maintained incrementally: writing a unit's value adjusts the
/// total by the difference from the unit's previous value. A unit with no
/// stored value reads as zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanningUnitValues {
    values: BTreeMap<PlanningUnitId, f64>,
    total: f64,
    precision: Precision,
}

impl PlanningUnitValues {
    pub fn new(precision: Precision) -> Self {
        Self {
            values: BTreeMap::new(),
            total: 0.0,
            precision,
        }
    }

    pub fn from_values(
        values: impl IntoIterator<Item = (PlanningUnitId, f64)>,
        precision: Precision,
    ) -> Self {
        let mut store = Self::new(precision);
        for (planning_unit, value) in values {
            store.set(planning_unit, value);
        }
        store
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn get(&self, planning_unit: PlanningUnitId) -> f64 {
        self.values.get(&planning_unit).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, planning_unit: PlanningUnitId) -> bool {
        self.values.contains_key(&planning_unit)
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlanningUnitId, f64)> + '_ {
        self.values.iter().map(|(unit, value)| (*unit, *value))
    }

    pub fn planning_units(&self) -> impl Iterator<Item = PlanningUnitId> + '_ {
        self.values.keys().copied()
    }

    /// Sum of the per-unit values computed from scratch, rounded.
    pub fn sum_of_units(&self) -> f64 {
        self.precision.round(self.values.values().sum())
    }

    /// Stores a unit's value, adjusting the total by the difference.
    pub fn set(&mut self, planning_unit: PlanningUnitId, value: f64) {
        let value = self.precision.round(value);
        let previous = self.values.insert(planning_unit, value).unwrap_or(0.0);
        self.total = self.precision.round(self.total + value - previous);
    }

    /// Forgets a unit's value, taking it out of the total.
    pub fn remove(&mut self, planning_unit: PlanningUnitId) -> Option<f64> {
        let previous = self.values.remove(&planning_unit)?;
        self.total = self.precision.round(self.total - previous);
        Some(previous)
    }

    pub fn to_map(&self) -> BTreeMap<PlanningUnitId, f64> {
        self.values.clone()
    }

    /// Re-rounds every value and the total to a new precision.
    pub fn with_precision(self, precision: Precision) -> Self {
        Self::from_values(self.values, precision)
    }
}

impl ValueStore<PlanningUnitId> for PlanningUnitValues {
    fn load(&self, key: &PlanningUnitId) -> f64 {
        self.get(*key)
    }

    fn store(&mut self, key: &PlanningUnitId, value: f64) {
        self.set(*key, value);
    }

    fn precision(&self) -> Precision {
        self.precision
    }

    fn contains(&self, key: &PlanningUnitId) -> bool {
        PlanningUnitValues::contains(self, *key)
    }

    fn remove(&mut self, key: &PlanningUnitId) {
        PlanningUnitValues::remove(self, *key);
    }
}
