//! crem - a catchment management engine.
//!
//! Builds a model of binary management actions over planning units and the
//! decision variables they move, for search algorithms that try, accept and
//! revert one action at a time.
//!
//! # Example
//!
//! ```rust
//! use crem::prelude::*;
//!
//! let mut model = CatchmentModelBuilder::new("Catchment")
//!     .with_planning_unit(
//!         PlanningUnitBaseline::new(PlanningUnitId(1)).with_sediment_production(50.0),
//!     )
//!     .with_action(
//!         ActionMagnitudes::new()
//!             .with_sediment(20.0, 5.0)
//!             .with_implementation_cost(1200.0)
//!             .into_action(PlanningUnitId(1), ActionType::GullyRestoration),
//!     )
//!     .build()
//!     .unwrap();
//!
//! model.toggle_action(PlanningUnitId(1), ActionType::GullyRestoration).unwrap();
//! model.accept_change();
//! assert_eq!(model.decision_variables().value("SedimentProduction"), Some(35.0));
//! ```

pub use crem_config::{ConfigError, Parameters, SeedingStrategy, VariableLimit};
pub use crem_core::{
    BoundViolation, CremError, ModelEvent, ModelEventListener, PlanningUnitId, Precision,
    UnitOfMeasure, ValidationError,
};
pub use crem_model::catchment;
pub use crem_model::{
    ActionType, Bounds, CatchmentModelBuilder, CoreModel, DecisionVariable, ManagementAction,
    PlanningUnitBaseline, SeedingError, SeedingSummary, UndoableDecisionVariable,
    VariableReport,
};

#[cfg(feature = "console")]
pub mod console;

/// Builds a catchment model from a parameters file and seeds its actions
/// with the strategy the parameters call for.
///
/// # Errors
///
/// Returns [`CremError::Config`] if the file can't be read or is invalid.
///
/// # Panics
///
/// Panics if seeding can't reach a valid state.
pub fn seeded_model(
    parameters_path: impl AsRef<std::path::Path>,
    builder: CatchmentModelBuilder,
) -> Result<CoreModel, CremError> {
    let parameters = Parameters::load(parameters_path.as_ref())
        .map_err(|err| CremError::Config(err.to_string()))?;
    let mut model = builder.with_parameters(parameters).build()?;
    let summary = model.randomly_initialise_actions();
    tracing::info!(
        event = "model_seeded",
        model = %model.name(),
        strategy = %summary.strategy,
        active = summary.active,
    );
    Ok(model)
}

pub mod prelude {
    pub use super::catchment::ActionMagnitudes;
    pub use super::{
        ActionType, Bounds, CatchmentModelBuilder, CoreModel, CremError, DecisionVariable,
        ManagementAction, Parameters, PlanningUnitBaseline, PlanningUnitId,
        UndoableDecisionVariable,
    };
}
