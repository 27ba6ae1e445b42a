use std::collections::BTreeMap;

use crem_core::{PlanningUnitId, Precision, UnitOfMeasure};
use serde::Serialize;

use super::DecisionVariable;

/// Snapshot of a decision variable's committed state, for result encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableReport {
    pub name: String,
    pub value: f64,
    pub unit_of_measure: UnitOfMeasure,
    pub precision: Precision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_per_planning_unit: Option<BTreeMap<PlanningUnitId, f64>>,
}

impl VariableReport {
    pub fn of<V>(variable: &V) -> Self
    where
        V: DecisionVariable + ?Sized,
    {
        Self {
            name: variable.name().to_string(),
            value: variable.value(),
            unit_of_measure: variable.unit_of_measure(),
            precision: variable.precision(),
            values_per_planning_unit: variable
                .values_per_planning_unit()
                .map(|values| values.to_map()),
        }
    }
}
