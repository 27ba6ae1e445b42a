use crem_config::{Parameters, VariableLimit};
use crem_core::{CremError, PlanningUnitId};
use serde::{Deserialize, Serialize};

use super::variables::*;
use crate::action::ManagementAction;
use crate::model::CoreModel;
use crate::variable::{Bounds, UndoableDecisionVariable};

/// Starting loads of one planning unit, before any action is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlanningUnitBaseline {
    pub id: PlanningUnitId,
    #[serde(default)]
    pub sediment_production: f64,
    #[serde(default)]
    pub particulate_nitrogen: f64,
    #[serde(default)]
    pub dissolved_nitrogen: f64,
}

impl PlanningUnitBaseline {
    pub fn new(id: PlanningUnitId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_sediment_production(mut self, value: f64) -> Self {
        self.sediment_production = value;
        self
    }

    pub fn with_particulate_nitrogen(mut self, value: f64) -> Self {
        self.particulate_nitrogen = value;
        self
    }

    pub fn with_dissolved_nitrogen(mut self, value: f64) -> Self {
        self.dissolved_nitrogen = value;
        self
    }
}

/// Builds a catchment [`CoreModel`].
///
/// Variables are added, and subscribed to every action, in the order
/// sediment, particulate nitrogen, dissolved nitrogen, total nitrogen,
/// implementation cost, opportunity cost. Upper bounds come from the
/// parameters' limits.
#[derive(Debug, Clone)]
pub struct CatchmentModelBuilder {
    name: String,
    parameters: Parameters,
    planning_units: Vec<PlanningUnitBaseline>,
    actions: Vec<ManagementAction>,
}

impl CatchmentModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Parameters::default(),
            planning_units: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_planning_unit(mut self, baseline: PlanningUnitBaseline) -> Self {
        self.planning_units.push(baseline);
        self
    }

    pub fn with_planning_units(mut self, baselines: impl IntoIterator<Item = PlanningUnitBaseline>) -> Self {
        self.planning_units.extend(baselines);
        self
    }

    pub fn with_action(mut self, action: ManagementAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = ManagementAction>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Builds the model with every action inactive.
    ///
    /// # Errors
    ///
    /// Returns [`CremError::Config`] if the parameters are invalid.
    ///
    /// # Panics
    ///
    /// Panics if two actions share a planning unit and type, or an action
    /// lacks an attribute the variables read once it is toggled.
    pub fn build(self) -> Result<CoreModel, CremError> {
        self.parameters
            .validate()
            .map_err(|err| CremError::Config(err.to_string()))?;

        let mut model = CoreModel::with_parameters(self.name, self.parameters.clone());
        model.add_planning_units(self.planning_units.iter().map(|baseline| baseline.id));

        let baseline = |select: fn(&PlanningUnitBaseline) -> f64| {
            self.planning_units
                .iter()
                .map(move |unit| (unit.id, select(unit)))
                .collect::<Vec<_>>()
        };

        let observers = [
            model.add_variable(bounded(
                sediment_production()
                    .with_planning_unit_values(baseline(|unit| unit.sediment_production)),
                &self.parameters,
            )),
            model.add_variable(bounded(
                particulate_nitrogen()
                    .with_planning_unit_values(baseline(|unit| unit.particulate_nitrogen)),
                &self.parameters,
            )),
            model.add_variable(
                dissolved_nitrogen()
                    .with_planning_unit_values(baseline(|unit| unit.dissolved_nitrogen)),
            ),
            model.add_variable(total_nitrogen()),
            model.add_variable(bounded(
                implementation_cost().with_planning_unit_values(baseline(|_| 0.0)),
                &self.parameters,
            )),
            model.add_variable(bounded(
                opportunity_cost().with_planning_unit_values(baseline(|_| 0.0)),
                &self.parameters,
            )),
        ];

        model.add_actions(self.actions);
        model.sort_management_actions();
        model.subscribe_actions(&observers);
        model.log_summary();
        Ok(model)
    }
}

// Attaches the parameters' upper bound for the variable, if one is set.
fn bounded<V>(mut variable: V, parameters: &Parameters) -> V
where
    V: UndoableDecisionVariable,
{
    let limit = VariableLimit::ALL
        .into_iter()
        .find(|limit| limit.variable_name() == variable.name())
        .and_then(|limit| parameters.limit(limit));
    if let Some(maximum) = limit {
        variable.set_bounds(Bounds::at_most(maximum));
    }
    variable
}
