use std::fmt::Debug;

use crem_core::{Precision, UnitOfMeasure};

use super::{Bounds, PlanningUnitValues, Upstream};
use crate::command::CommandStatus;
use crate::observer::ActionObserver;

/// A named numeric quantity of a model.
pub trait DecisionVariable: Debug + Send {
    fn name(&self) -> &str;

    /// The committed value.
    fn value(&self) -> f64;

    fn unit_of_measure(&self) -> UnitOfMeasure;

    fn precision(&self) -> Precision;

    /// Committed values per planning unit, for per-unit variables.
    fn values_per_planning_unit(&self) -> Option<&PlanningUnitValues> {
        None
    }
}

/// A decision variable that stages changes for later accept or reject.
///
/// At most one change is pending at a time. Observing an action replaces the
/// staged command; [`apply_done_value`](Self::apply_done_value) commits it
/// and [`apply_undone_value`](Self::apply_undone_value) discards it. Both are
/// idempotent.
pub trait UndoableDecisionVariable: DecisionVariable + ActionObserver {
    /// The value the variable would take if the pending change were committed.
    fn undoable_value(&self) -> f64;

    /// `undoable_value() - value()`.
    fn difference_in_values(&self) -> f64 {
        self.precision().round(self.undoable_value() - self.value())
    }

    /// The delta of the most recently staged change, whether still pending or
    /// already committed. Zero once it has been rejected.
    fn staged_change(&self) -> f64;

    fn has_pending_change(&self) -> bool;

    fn apply_done_value(&mut self) -> CommandStatus;

    fn apply_undone_value(&mut self) -> CommandStatus;

    fn bounds(&self) -> &Bounds;

    fn set_bounds(&mut self, bounds: Bounds);

    /// Names of variables this one reads changes from; they must be notified first.
    fn dependencies(&self) -> &[String] {
        &[]
    }

    // Called once when added to a collection, with every earlier variable.
    fn bind_upstream(&mut self, _upstream: &Upstream<'_>) {}

    fn clone_box(&self) -> Box<dyn UndoableDecisionVariable>;
}

impl Clone for Box<dyn UndoableDecisionVariable> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
