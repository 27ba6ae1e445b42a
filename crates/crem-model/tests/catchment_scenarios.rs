//! End-to-end behaviour of a wired catchment model.

use crem_config::Parameters;
use crem_core::PlanningUnitId;
use crem_model::catchment::{IMPLEMENTATION_COST, SEDIMENT_PRODUCTION};
use crem_model::{
    ActionType, CoreModel, DecisionVariable, ManagementAction, ManagementActions, Notification,
    ObserverId, ObserverRegistry,
};
use crem_test::assert_within_precision;
use crem_test::catchment::{testing_model, RIVER_BANK_UNIT};

fn per_unit_snapshot(model: &CoreModel) -> Vec<(String, Vec<(PlanningUnitId, f64)>)> {
    model
        .decision_variables()
        .iter()
        .filter_map(|variable| {
            variable
                .values_per_planning_unit()
                .map(|values| (variable.name().to_string(), values.iter().collect()))
        })
        .collect()
}

#[test]
fn test_river_bank_toggled_two_thousand_times() {
    let mut model = testing_model(Parameters::new());
    let before = per_unit_snapshot(&model);

    for _ in 0..1000 {
        model
            .toggle_action(RIVER_BANK_UNIT, ActionType::RiverBankRestoration)
            .unwrap();
        model.accept_change();
        model
            .toggle_action(RIVER_BANK_UNIT, ActionType::RiverBankRestoration)
            .unwrap();
        model.accept_change();
    }

    let after = per_unit_snapshot(&model);
    assert_eq!(before.len(), after.len());
    for ((name, before), (_, after)) in before.iter().zip(&after) {
        let precision = model.decision_variable(name).unwrap().precision();
        assert_eq!(before.len(), after.len(), "{name}");
        for ((unit, expected), (_, actual)) in before.iter().zip(after) {
            assert_within_precision(*actual, *expected, precision);
            if *unit == RIVER_BANK_UNIT {
                assert_eq!(actual, expected, "{name} drifted at {unit}");
            }
        }
    }
}

#[test]
fn test_toggle_accept_round_trip_restores_sediment() {
    let mut model = testing_model(Parameters::new());
    let sediment = model.decision_variables().value(SEDIMENT_PRODUCTION).unwrap();

    model
        .toggle_action(RIVER_BANK_UNIT, ActionType::RiverBankRestoration)
        .unwrap();
    model.accept_change();
    assert!(model.decision_variables().value(SEDIMENT_PRODUCTION).unwrap() < sediment);

    model
        .toggle_action(RIVER_BANK_UNIT, ActionType::RiverBankRestoration)
        .unwrap();
    model.accept_change();
    assert_eq!(
        model.decision_variables().value(SEDIMENT_PRODUCTION),
        Some(sediment)
    );
}

#[test]
fn test_random_search_keeps_totals_consistent() {
    let mut model = testing_model(Parameters::new().with_random_seed(7));

    for step in 0..100 {
        model.try_random_change();
        if step % 3 == 0 {
            model.revert_change();
        } else {
            model.accept_change();
        }
    }

    for variable in model.decision_variables().iter() {
        if let Some(values) = variable.values_per_planning_unit() {
            assert_within_precision(variable.value(), values.sum_of_units(), variable.precision());
        }
    }

    // Replaying the active set on a fresh model reproduces every value.
    let mut replay = testing_model(Parameters::new());
    for action in model.active_management_actions() {
        replay
            .toggle_action(action.planning_unit(), action.action_type())
            .unwrap();
        replay.accept_change();
    }
    for variable in model.decision_variables().iter() {
        let expected = replay.decision_variable(variable.name()).unwrap();
        assert_within_precision(variable.value(), expected.value(), variable.precision());
    }
}

#[test]
fn test_cost_limited_seeding_stays_under_limit() {
    for seed in 0..20 {
        let parameters = Parameters::new()
            .with_maximum_implementation_cost(65_000.0)
            .with_random_seed(seed);
        let mut model = testing_model(parameters);

        let summary = model.randomly_validly_activate_actions(13);

        assert!(model.state_is_valid().is_ok());
        let cost = model.decision_variables().value(IMPLEMENTATION_COST).unwrap();
        assert!(cost < 65_000.0, "seed {seed} reached {cost}");
        assert!(summary.active > 0);
        assert_eq!(summary.active, model.active_management_actions().count());
        assert!(!model.has_pending_change());
    }
}

#[test]
fn test_seeding_by_parameters_picks_activation() {
    let parameters = Parameters::new()
        .with_maximum_implementation_cost(65_000.0)
        .with_random_seed(3);
    let mut model = testing_model(parameters);

    let summary = model.randomly_initialise_actions();

    assert_eq!(
        summary.strategy,
        crem_config::SeedingStrategy::ActivateFromAllInactive
    );
    assert_eq!(summary.attempts, 13);
    assert!(model.state_is_valid().is_ok());
}

#[test]
#[should_panic(expected = "fatal seeding error")]
fn test_unreachable_sediment_limit_is_fatal() {
    let parameters = Parameters::new()
        .with_maximum_sediment_production(1.0)
        .with_random_seed(11);
    let mut model = testing_model(parameters);

    model.randomly_initialise_actions();
}

#[derive(Default)]
struct CountingRegistry {
    notified: usize,
}

impl ObserverRegistry for CountingRegistry {
    fn notify(
        &mut self,
        _observer: ObserverId,
        _action: &ManagementAction,
        _notification: Notification,
    ) {
        self.notified += 1;
    }
}

#[test]
fn test_actions_run_against_any_registry() {
    let mut actions = ManagementActions::with_seed(5);
    actions.extend(crem_test::catchment::actions());
    actions.subscribe_all(&[ObserverId::new(0), ObserverId::new(1)]);

    let mut registry = CountingRegistry::default();
    let toggled = actions.randomly_toggle_one_activation(&mut registry);

    assert!(toggled.is_active());
    assert_eq!(registry.notified, 2);
}
