use crem_core::{PlanningUnitId, Precision, UnitOfMeasure};

use super::{
    Bounds, DecisionVariable, MagnitudeRules, PlanningUnitValues, UndoableDecisionVariable,
    Upstream,
};
use crate::action::ManagementAction;
use crate::command::{ChangeCommand, CommandStatus};
use crate::observer::ActionObserver;

/// An undoable value per planning unit, driven by action magnitudes.
///
/// The variable's value is the total over all planning units. Observing an
/// action stages a change to the action's planning unit only.
#[derive(Debug, Clone)]
pub struct PerPlanningUnitVariable {
    name: String,
    unit_of_measure: UnitOfMeasure,
    bounds: Bounds,
    values: PlanningUnitValues,
    rules: MagnitudeRules,
    command: Option<ChangeCommand<PlanningUnitId>>,
}

impl PerPlanningUnitVariable {
    pub fn new(name: impl Into<String>, rules: MagnitudeRules) -> Self {
        Self {
            name: name.into(),
            unit_of_measure: UnitOfMeasure::NotApplicable,
            bounds: Bounds::unbounded(),
            values: PlanningUnitValues::new(Precision::DEFAULT),
            rules,
            command: None,
        }
    }

    pub fn with_unit_of_measure(mut self, unit_of_measure: UnitOfMeasure) -> Self {
        self.unit_of_measure = unit_of_measure;
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.values = self.values.with_precision(precision);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_planning_unit_value(mut self, planning_unit: PlanningUnitId, value: f64) -> Self {
        self.values.set(planning_unit, value);
        self
    }

    pub fn with_planning_unit_values(
        mut self,
        values: impl IntoIterator<Item = (PlanningUnitId, f64)>,
    ) -> Self {
        for (planning_unit, value) in values {
            self.values.set(planning_unit, value);
        }
        self
    }

    pub fn rules(&self) -> &MagnitudeRules {
        &self.rules
    }

    pub fn planning_unit_value(&self, planning_unit: PlanningUnitId) -> f64 {
        self.values.get(planning_unit)
    }

    fn stage(&mut self, action: &ManagementAction) {
        let change = self.rules.change_for(&self.name, action);
        self.command = Some(ChangeCommand::stage(
            &self.values,
            action.planning_unit(),
            change,
        ));
    }
}

impl DecisionVariable for PerPlanningUnitVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> f64 {
        self.values.total()
    }

    fn unit_of_measure(&self) -> UnitOfMeasure {
        self.unit_of_measure
    }

    fn precision(&self) -> Precision {
        self.values.precision()
    }

    fn values_per_planning_unit(&self) -> Option<&PlanningUnitValues> {
        Some(&self.values)
    }
}

impl ActionObserver for PerPlanningUnitVariable {
    fn observe_action(&mut self, action: &ManagementAction, _upstream: &Upstream<'_>) {
        self.stage(action);
    }

    fn observe_action_initialising(&mut self, action: &ManagementAction, _upstream: &Upstream<'_>) {
        self.stage(action);
        self.apply_done_value();
    }
}

impl UndoableDecisionVariable for PerPlanningUnitVariable {
    fn undoable_value(&self) -> f64 {
        match &self.command {
            Some(command) if command.is_pending() => {
                self.values.precision().round(self.values.total() + command.change())
            }
            _ => self.values.total(),
        }
    }

    fn staged_change(&self) -> f64 {
        match &self.command {
            Some(command) if command.status() != CommandStatus::UnDone => command.change(),
            _ => 0.0,
        }
    }

    fn has_pending_change(&self) -> bool {
        self.command.as_ref().is_some_and(ChangeCommand::is_pending)
    }

    fn apply_done_value(&mut self) -> CommandStatus {
        match &mut self.command {
            Some(command) => command.do_change(&mut self.values),
            None => CommandStatus::NoChange,
        }
    }

    fn apply_undone_value(&mut self) -> CommandStatus {
        match &mut self.command {
            Some(command) => command.undo_change(&mut self.values),
            None => CommandStatus::NoChange,
        }
    }

    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn clone_box(&self) -> Box<dyn UndoableDecisionVariable> {
        Box::new(self.clone())
    }
}
