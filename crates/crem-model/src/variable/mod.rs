//! Decision variables observing management actions.
//!
//! Every variable here is undoable: an observed action stages one
//! [`ChangeCommand`](crate::command::ChangeCommand), which the owning model
//! later accepts or rejects. Variables come in three shapes:
//!
//! - [`ScalarVariable`]: a single value driven by action magnitudes
//! - [`PerPlanningUnitVariable`]: a value per planning unit plus their total,
//!   driven by action magnitudes
//! - [`CompositeVariable`]: a per-planning-unit value whose changes are the
//!   sum of changes staged by upstream variables

mod bounds;
mod collection;
mod composite;
mod magnitude;
mod per_unit;
mod report;
mod scalar;
mod traits;
mod values;

#[cfg(test)]
mod tests;

pub use bounds::Bounds;
pub use collection::{DecisionVariables, Upstream};
pub use composite::CompositeVariable;
pub use magnitude::{Magnitude, MagnitudeRule, MagnitudeRules};
pub use per_unit::PerPlanningUnitVariable;
pub use report::VariableReport;
pub use scalar::ScalarVariable;
pub use traits::{DecisionVariable, UndoableDecisionVariable};
pub use values::{PlanningUnitValues, ScalarValue};
