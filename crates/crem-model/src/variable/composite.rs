use crem_core::{PlanningUnitId, Precision, UnitOfMeasure};

use super::{Bounds, DecisionVariable, PlanningUnitValues, UndoableDecisionVariable, Upstream};
use crate::action::ManagementAction;
use crate::command::{ChangeCommand, CommandStatus};
use crate::observer::ActionObserver;

/// A per-planning-unit variable built from other variables.
///
/// Its change for an action is the sum of the changes its components staged
/// for the same action, so the components must be notified before it. Its
/// starting per-unit values are the sums of the components' per-unit values.
#[derive(Debug, Clone)]
pub struct CompositeVariable {
    name: String,
    unit_of_measure: UnitOfMeasure,
    bounds: Bounds,
    values: PlanningUnitValues,
    components: Vec<String>,
    command: Option<ChangeCommand<PlanningUnitId>>,
}

impl CompositeVariable {
    pub fn new<I, S>(name: impl Into<String>, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            unit_of_measure: UnitOfMeasure::NotApplicable,
            bounds: Bounds::unbounded(),
            values: PlanningUnitValues::new(Precision::DEFAULT),
            components: components.into_iter().map(Into::into).collect(),
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

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn planning_unit_value(&self, planning_unit: PlanningUnitId) -> f64 {
        self.values.get(planning_unit)
    }

    fn stage(&mut self, action: &ManagementAction, upstream: &Upstream<'_>) {
        let precision = self.values.precision();
        let change: f64 = self
            .components
            .iter()
            .map(|component| precision.round(upstream.variable(component).staged_change()))
            .sum();
        self.command = Some(ChangeCommand::stage(
            &self.values,
            action.planning_unit(),
            change,
        ));
    }
}

impl DecisionVariable for CompositeVariable {
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

impl ActionObserver for CompositeVariable {
    fn observe_action(&mut self, action: &ManagementAction, upstream: &Upstream<'_>) {
        self.stage(action, upstream);
    }

    fn observe_action_initialising(&mut self, action: &ManagementAction, upstream: &Upstream<'_>) {
        self.stage(action, upstream);
        self.apply_done_value();
    }
}

impl UndoableDecisionVariable for CompositeVariable {
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

    fn dependencies(&self) -> &[String] {
        &self.components
    }

    // Starts from the sum of the components' per-unit values.
    fn bind_upstream(&mut self, upstream: &Upstream<'_>) {
        let precision = self.values.precision();
        let mut values = PlanningUnitValues::new(precision);
        for component in &self.components {
            let Some(component_values) = upstream.variable(component).values_per_planning_unit()
            else {
                panic!(
                    "composite decision variable [{}] needs per-planning-unit values from [{}]",
                    self.name, component
                );
            };
            for (planning_unit, value) in component_values.iter() {
                values.set(planning_unit, values.get(planning_unit) + value);
            }
        }
        self.values = values;
        self.command = None;
    }

    fn clone_box(&self) -> Box<dyn UndoableDecisionVariable> {
        Box::new(self.clone())
    }
}
