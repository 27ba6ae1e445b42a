//! Small fixtures for unit tests.

use crem_core::{PlanningUnitId, Precision, UnitOfMeasure};

use crate::action::{ActionType, ManagementAction};
use crate::model::CoreModel;
use crate::variable::{
    Bounds, CompositeVariable, MagnitudeRule, MagnitudeRules, PerPlanningUnitVariable,
    ScalarVariable,
};

pub const ORIGINAL_SEDIMENT: &str = "OriginalSediment";
pub const ACTIONED_SEDIMENT: &str = "ActionedSediment";
pub const ORIGINAL_NITROGEN: &str = "OriginalNitrogen";
pub const ACTIONED_NITROGEN: &str = "ActionedNitrogen";
pub const COST: &str = "Cost";

/// A river bank restoration on `unit` with the given magnitudes.
pub fn restoration(unit: u64, sediment: (f64, f64), nitrogen: (f64, f64), cost: f64) -> ManagementAction {
    ManagementAction::new(PlanningUnitId(unit), ActionType::RiverBankRestoration)
        .with_attribute(ORIGINAL_SEDIMENT, sediment.0)
        .with_attribute(ACTIONED_SEDIMENT, sediment.1)
        .with_attribute(ORIGINAL_NITROGEN, nitrogen.0)
        .with_attribute(ACTIONED_NITROGEN, nitrogen.1)
        .with_attribute(COST, cost)
}

pub fn sediment_variable() -> PerPlanningUnitVariable {
    PerPlanningUnitVariable::new(
        "Sediment",
        MagnitudeRules::new().with_rule(
            ActionType::RiverBankRestoration,
            MagnitudeRule::attributes(ORIGINAL_SEDIMENT, ACTIONED_SEDIMENT),
        ),
    )
    .with_unit_of_measure(UnitOfMeasure::TonnesPerYear)
    .with_planning_unit_values((0..4).map(|unit| (PlanningUnitId(unit), 10.0)))
}

pub fn nitrogen_variable() -> PerPlanningUnitVariable {
    PerPlanningUnitVariable::new(
        "Nitrogen",
        MagnitudeRules::new().with_rule(
            ActionType::RiverBankRestoration,
            MagnitudeRule::attributes(ORIGINAL_NITROGEN, ACTIONED_NITROGEN),
        ),
    )
    .with_unit_of_measure(UnitOfMeasure::TonnesPerYear)
    .with_planning_unit_values((0..4).map(|unit| (PlanningUnitId(unit), 2.0)))
}

pub fn load_variable() -> CompositeVariable {
    CompositeVariable::new("Load", ["Sediment", "Nitrogen"])
        .with_unit_of_measure(UnitOfMeasure::TonnesPerYear)
}

pub fn cost_variable(bounds: Bounds) -> ScalarVariable {
    ScalarVariable::new(
        "Cost",
        MagnitudeRules::new().with_rule(ActionType::RiverBankRestoration, MagnitudeRule::cost(COST)),
    )
    .with_unit_of_measure(UnitOfMeasure::Dollars)
    .with_precision(Precision::new(2))
    .with_bounds(bounds)
}

/// Four planning units, one restoration each, observed by sediment,
/// nitrogen, their composite load and a scalar cost.
pub fn small_model(seed: u64, cost_bounds: Bounds) -> CoreModel {
    let mut model = CoreModel::with_seed("Small", seed);
    model.add_planning_units((0..4).map(PlanningUnitId));
    let sediment = model.add_variable(sediment_variable());
    let nitrogen = model.add_variable(nitrogen_variable());
    let load = model.add_variable(load_variable());
    let cost = model.add_variable(cost_variable(cost_bounds));
    model.add_actions([
        restoration(0, (1.0, 0.25), (0.5, 0.1), 1000.0),
        restoration(1, (3.5, 1.0), (0.8, 0.2), 2500.0),
        restoration(2, (0.0, 0.0), (0.0, 0.0), 400.0),
        restoration(3, (2.25, 0.5), (1.2, 0.3), 3100.5),
    ]);
    model.subscribe_actions(&[sediment, nitrogen, load, cost]);
    model
}
