use crem_core::{Precision, UnitOfMeasure};

use super::attributes::{
    self, ACTIONED_DISSOLVED_NITROGEN, ACTIONED_PARTICULATE_NITROGEN, ACTIONED_SEDIMENT,
    ORIGINAL_DISSOLVED_NITROGEN, ORIGINAL_PARTICULATE_NITROGEN, ORIGINAL_SEDIMENT,
};
use crate::action::ActionType;
use crate::variable::{
    CompositeVariable, MagnitudeRule, MagnitudeRules, PerPlanningUnitVariable,
};

pub const SEDIMENT_PRODUCTION: &str = "SedimentProduction";
pub const PARTICULATE_NITROGEN: &str = "ParticulateNitrogen";
pub const DISSOLVED_NITROGEN: &str = "DissolvedNitrogen";
pub const TOTAL_NITROGEN: &str = "TotalNitrogen";
pub const IMPLEMENTATION_COST: &str = "ImplementationCost";
pub const OPPORTUNITY_COST: &str = "OpportunityCost";

const LOAD_PRECISION: Precision = Precision::new(3);
const COST_PRECISION: Precision = Precision::new(2);

fn rules(affected: &[ActionType], rule: MagnitudeRule) -> MagnitudeRules {
    ActionType::APPLICABLE
        .into_iter()
        .fold(MagnitudeRules::new(), |rules, action_type| {
            if affected.contains(&action_type) {
                rules.with_rule(action_type, rule.clone())
            } else {
                rules.with_rule(action_type, MagnitudeRule::unaffected())
            }
        })
}

fn load(name: &str, rules: MagnitudeRules) -> PerPlanningUnitVariable {
    PerPlanningUnitVariable::new(name, rules)
        .with_unit_of_measure(UnitOfMeasure::TonnesPerYear)
        .with_precision(LOAD_PRECISION)
}

fn cost(name: &str, attribute: &str) -> PerPlanningUnitVariable {
    PerPlanningUnitVariable::new(
        name,
        rules(&ActionType::APPLICABLE, MagnitudeRule::cost(attribute)),
    )
    .with_unit_of_measure(UnitOfMeasure::Dollars)
    .with_precision(COST_PRECISION)
}

/// Sediment production, changed by bank, gully and hill slope restoration.
pub fn sediment_production() -> PerPlanningUnitVariable {
    load(
        SEDIMENT_PRODUCTION,
        rules(
            &[
                ActionType::RiverBankRestoration,
                ActionType::GullyRestoration,
                ActionType::HillSlopeRestoration,
            ],
            MagnitudeRule::attributes(ORIGINAL_SEDIMENT, ACTIONED_SEDIMENT),
        ),
    )
}

/// Particulate nitrogen, carried by sediment.
pub fn particulate_nitrogen() -> PerPlanningUnitVariable {
    load(
        PARTICULATE_NITROGEN,
        rules(
            &[
                ActionType::RiverBankRestoration,
                ActionType::GullyRestoration,
                ActionType::HillSlopeRestoration,
            ],
            MagnitudeRule::attributes(ORIGINAL_PARTICULATE_NITROGEN, ACTIONED_PARTICULATE_NITROGEN),
        ),
    )
}

/// Dissolved nitrogen, changed by hill slope restoration and wetlands.
pub fn dissolved_nitrogen() -> PerPlanningUnitVariable {
    load(
        DISSOLVED_NITROGEN,
        rules(
            &[
                ActionType::HillSlopeRestoration,
                ActionType::WetlandsEstablishment,
            ],
            MagnitudeRule::attributes(ORIGINAL_DISSOLVED_NITROGEN, ACTIONED_DISSOLVED_NITROGEN),
        ),
    )
}

/// Particulate plus dissolved nitrogen.
pub fn total_nitrogen() -> CompositeVariable {
    CompositeVariable::new(TOTAL_NITROGEN, [PARTICULATE_NITROGEN, DISSOLVED_NITROGEN])
        .with_unit_of_measure(UnitOfMeasure::TonnesPerYear)
        .with_precision(LOAD_PRECISION)
}

pub fn implementation_cost() -> PerPlanningUnitVariable {
    cost(IMPLEMENTATION_COST, attributes::IMPLEMENTATION_COST)
}

pub fn opportunity_cost() -> PerPlanningUnitVariable {
    cost(OPPORTUNITY_COST, attributes::OPPORTUNITY_COST)
}
