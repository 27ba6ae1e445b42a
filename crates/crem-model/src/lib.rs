//! Incremental, undoable catchment management engine.
//!
//! A model holds a registry of binary management actions, each tied to a
//! planning unit, and a set of decision variables that observe them. Toggling
//! an action stages a change command on every observing variable; the
//! change is then either accepted (committed) or reverted (discarded, and the
//! action toggled back) in constant time per variable.
//!
//! # Architecture
//!
//! - [`action`]: Management actions and their registry
//! - [`observer`]: Handles and dispatch between actions and variables
//! - [`command`]: Reversible value-change commands
//! - [`variable`]: Decision variables, bounds and the variable collection
//! - [`model`]: The core model, seeding and parallel chains
//! - [`catchment`]: Canonical catchment variable wiring

pub mod action;
pub mod catchment;
pub mod command;
pub mod model;
pub mod observer;
pub mod variable;

#[cfg(test)]
pub(crate) mod test_utils;

pub use action::{ActionType, ManagementAction, ManagementActions};
pub use catchment::{CatchmentModelBuilder, PlanningUnitBaseline};
pub use command::{ChangeCommand, CommandStatus, ValueStore};
pub use model::{CoreModel, SeedingError, SeedingSummary};
pub use observer::{ActionObserver, Notification, ObserverId, ObserverRegistry};
pub use variable::{
    Bounds, CompositeVariable, DecisionVariable, DecisionVariables, Magnitude, MagnitudeRule,
    MagnitudeRules, PerPlanningUnitVariable, PlanningUnitValues, ScalarValue, ScalarVariable,
    UndoableDecisionVariable, Upstream, VariableReport,
};
