use crem_core::PlanningUnitId;

use super::attributes::*;
use crate::action::{ActionType, ManagementAction};

/// Precomputed effects of one action, as `(original, actioned)` pairs.
///
/// Pairs left unset become zero-effect attributes, so every catchment
/// variable can read every action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionMagnitudes {
    pub sediment: (f64, f64),
    pub particulate_nitrogen: (f64, f64),
    pub dissolved_nitrogen: (f64, f64),
    pub implementation_cost: f64,
    pub opportunity_cost: f64,
    pub buffer_vegetation: Option<(f64, f64)>,
}

impl ActionMagnitudes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sediment(mut self, original: f64, actioned: f64) -> Self {
        self.sediment = (original, actioned);
        self
    }

    pub fn with_particulate_nitrogen(mut self, original: f64, actioned: f64) -> Self {
        self.particulate_nitrogen = (original, actioned);
        self
    }

    pub fn with_dissolved_nitrogen(mut self, original: f64, actioned: f64) -> Self {
        self.dissolved_nitrogen = (original, actioned);
        self
    }

    pub fn with_implementation_cost(mut self, cost: f64) -> Self {
        self.implementation_cost = cost;
        self
    }

    pub fn with_opportunity_cost(mut self, cost: f64) -> Self {
        self.opportunity_cost = cost;
        self
    }

    pub fn with_buffer_vegetation(mut self, original: f64, actioned: f64) -> Self {
        self.buffer_vegetation = Some((original, actioned));
        self
    }

    /// Creates an inactive action carrying these magnitudes as attributes.
    pub fn into_action(self, planning_unit: PlanningUnitId, action_type: ActionType) -> ManagementAction {
        let action = ManagementAction::new(planning_unit, action_type)
            .with_attribute(ORIGINAL_SEDIMENT, self.sediment.0)
            .with_attribute(ACTIONED_SEDIMENT, self.sediment.1)
            .with_attribute(ORIGINAL_PARTICULATE_NITROGEN, self.particulate_nitrogen.0)
            .with_attribute(ACTIONED_PARTICULATE_NITROGEN, self.particulate_nitrogen.1)
            .with_attribute(ORIGINAL_DISSOLVED_NITROGEN, self.dissolved_nitrogen.0)
            .with_attribute(ACTIONED_DISSOLVED_NITROGEN, self.dissolved_nitrogen.1)
            .with_attribute(IMPLEMENTATION_COST, self.implementation_cost)
            .with_attribute(OPPORTUNITY_COST, self.opportunity_cost);
        match self.buffer_vegetation {
            Some((original, actioned)) => action
                .with_attribute(ORIGINAL_BUFFER_VEGETATION, original)
                .with_attribute(ACTIONED_BUFFER_VEGETATION, actioned),
            None => action,
        }
    }
}
