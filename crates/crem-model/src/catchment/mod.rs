//! Canonical catchment wiring.
//!
//! Builds a [`CoreModel`](crate::CoreModel) with the standard decision
//! variables of a catchment management problem, observing the standard
//! action types. Magnitudes are precomputed per action and carried as
//! attributes; this module only decides which attribute feeds which
//! variable.

pub mod attributes;
mod builder;
mod magnitudes;
mod variables;


pub use builder::{CatchmentModelBuilder, PlanningUnitBaseline};
pub use magnitudes::ActionMagnitudes;
pub use variables::{
    dissolved_nitrogen, implementation_cost, opportunity_cost, particulate_nitrogen,
    sediment_production, total_nitrogen, DISSOLVED_NITROGEN, IMPLEMENTATION_COST,
    OPPORTUNITY_COST, PARTICULATE_NITROGEN, SEDIMENT_PRODUCTION, TOTAL_NITROGEN,
};
