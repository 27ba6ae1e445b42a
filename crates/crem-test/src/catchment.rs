//! A catchment of thirteen planning units with one action each.
//!
//! Implementation costs all end in 13 cents and total 98,876.69, so a cost
//! limit of 65,000 rules out activating everything while leaving plenty of
//! valid subsets.

use crem_config::Parameters;
use crem_core::PlanningUnitId;
use crem_model::catchment::ActionMagnitudes;
use crem_model::{ActionType, CatchmentModelBuilder, CoreModel, ManagementAction, PlanningUnitBaseline};

/// The planning unit whose river bank restoration carries buffer vegetation.
pub const RIVER_BANK_UNIT: PlanningUnitId = PlanningUnitId(18);

pub const FIRST_UNIT: u64 = 12;
pub const UNIT_COUNT: u64 = 13;

pub const IMPLEMENTATION_COSTS: [f64; 13] = [
    4210.13, 8120.13, 3560.13, 12040.13, 6700.13, 9830.13, 2450.13, 15220.13, 7310.13, 5090.13,
    11480.13, 3990.13, 8875.13,
];

pub fn planning_units() -> impl Iterator<Item = PlanningUnitId> {
    (FIRST_UNIT..FIRST_UNIT + UNIT_COUNT).map(PlanningUnitId)
}

pub fn baselines() -> Vec<PlanningUnitBaseline> {
    planning_units()
        .enumerate()
        .map(|(offset, unit)| {
            let scale = 1.0 + offset as f64 / 10.0;
            PlanningUnitBaseline::new(unit)
                .with_sediment_production(120.5 * scale)
                .with_particulate_nitrogen(3.25 * scale)
                .with_dissolved_nitrogen(1.125 * scale)
        })
        .collect()
}

fn action_type_for(offset: usize) -> ActionType {
    ActionType::APPLICABLE[offset % ActionType::APPLICABLE.len()]
}

/// One inactive action per planning unit, cycling through the action types.
pub fn actions() -> Vec<ManagementAction> {
    planning_units()
        .enumerate()
        .map(|(offset, unit)| {
            let scale = 1.0 + offset as f64 / 10.0;
            let cost = IMPLEMENTATION_COSTS[offset];
            let action_type = action_type_for(offset);
            let magnitudes = match action_type {
                ActionType::WetlandsEstablishment => {
                    ActionMagnitudes::new().with_dissolved_nitrogen(0.6 * scale, 0.25 * scale)
                }
                ActionType::HillSlopeRestoration => ActionMagnitudes::new()
                    .with_sediment(40.0 * scale, 12.5 * scale)
                    .with_particulate_nitrogen(1.1 * scale, 0.35 * scale)
                    .with_dissolved_nitrogen(0.3 * scale, 0.2 * scale),
                _ => ActionMagnitudes::new()
                    .with_sediment(55.0 * scale, 8.75 * scale)
                    .with_particulate_nitrogen(1.5 * scale, 0.275 * scale),
            };
            let magnitudes = if unit == RIVER_BANK_UNIT {
                magnitudes.with_buffer_vegetation(0.0, 0.85)
            } else {
                magnitudes
            };
            magnitudes
                .with_implementation_cost(cost)
                .with_opportunity_cost(cost / 20.0)
                .into_action(unit, action_type)
        })
        .collect()
}

/// Builds the fixture catchment with the given parameters.
///
/// # Panics
///
/// Panics if the parameters are invalid.
pub fn testing_model(parameters: Parameters) -> CoreModel {
    CatchmentModelBuilder::new("TestingCatchment")
        .with_parameters(parameters)
        .with_planning_units(baselines())
        .with_actions(actions())
        .build()
        .expect("fixture parameters must be valid")
}
