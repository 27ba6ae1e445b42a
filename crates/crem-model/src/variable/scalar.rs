use crem_core::{Precision, UnitOfMeasure};

use super::{Bounds, DecisionVariable, MagnitudeRules, ScalarValue, UndoableDecisionVariable, Upstream};
use crate::action::ManagementAction;
use crate::command::{ChangeCommand, CommandStatus};
use crate::observer::ActionObserver;

/// A single undoable value driven by action magnitudes.
#[derive(Debug, Clone)]
pub struct ScalarVariable {
    name: String,
    unit_of_measure: UnitOfMeasure,
    bounds: Bounds,
    value: ScalarValue,
    rules: MagnitudeRules,
    command: Option<ChangeCommand<()>>,
}

impl ScalarVariable {
    pub fn new(name: impl Into<String>, rules: MagnitudeRules) -> Self {
        Self {
            name: name.into(),
            unit_of_measure: UnitOfMeasure::NotApplicable,
            bounds: Bounds::unbounded(),
            value: ScalarValue::new(0.0, Precision::DEFAULT),
            rules,
            command: None,
        }
    }

    pub fn with_unit_of_measure(mut self, unit_of_measure: UnitOfMeasure) -> Self {
        self.unit_of_measure = unit_of_measure;
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.value = ScalarValue::new(self.value.value(), precision);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.value.set_value(value);
        self
    }

    fn stage(&mut self, action: &ManagementAction) {
        let change = self.rules.change_for(&self.name, action);
        self.command = Some(ChangeCommand::stage(&self.value, (), change));
    }
}

impl DecisionVariable for ScalarVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> f64 {
        self.value.value()
    }

    fn unit_of_measure(&self) -> UnitOfMeasure {
        self.unit_of_measure
    }

    fn precision(&self) -> Precision {
        self.value.precision()
    }
}

impl ActionObserver for ScalarVariable {
    fn observe_action(&mut self, action: &ManagementAction, _upstream: &Upstream<'_>) {
        self.stage(action);
    }

    fn observe_action_initialising(&mut self, action: &ManagementAction, _upstream: &Upstream<'_>) {
        self.stage(action);
        self.apply_done_value();
    }
}

impl UndoableDecisionVariable for ScalarVariable {
    fn undoable_value(&self) -> f64 {
        match &self.command {
            Some(command) if command.is_pending() => command.done_value(),
            _ => self.value.value(),
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
            Some(command) => command.do_change(&mut self.value),
            None => CommandStatus::NoChange,
        }
    }

    fn apply_undone_value(&mut self) -> CommandStatus {
        match &mut self.command {
            Some(command) => command.undo_change(&mut self.value),
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
