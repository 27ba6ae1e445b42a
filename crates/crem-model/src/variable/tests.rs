//! Tests for decision variables and their collection.

use crem_core::{BoundDirection, PlanningUnitId, Precision};

use super::*;
use crate::action::{ActionType, ManagementAction, ManagementActions};
use crate::command::CommandStatus;
use crate::observer::ObserverId;
use crate::test_utils::{
    cost_variable, load_variable, nitrogen_variable, restoration, sediment_variable,
};

fn wired() -> (DecisionVariables, ManagementActions) {
    let mut variables = DecisionVariables::new();
    let ids = [
        variables.add(sediment_variable()),
        variables.add(nitrogen_variable()),
        variables.add(load_variable()),
        variables.add(cost_variable(Bounds::unbounded())),
    ];
    variables.validate_subscription(&ids);

    let mut actions = ManagementActions::with_seed(11);
    actions.extend([
        restoration(0, (1.0, 0.25), (0.5, 0.1), 1000.0),
        restoration(1, (3.5, 1.0), (0.8, 0.2), 2500.0),
        restoration(2, (0.0, 0.0), (0.0, 0.0), 400.0),
        restoration(3, (2.25, 0.5), (1.2, 0.3), 3100.5),
    ]);
    actions.subscribe_all(&ids);
    (variables, actions)
}

#[test]
fn test_bounds() {
    let bounds = Bounds::at_most(10.0).with_minimum(2.0);
    assert!(bounds.is_bounded());
    assert!(bounds.within_bounds(10.0));
    assert!(bounds.within_bounds(2.0));
    assert!(!bounds.within_bounds(10.001));

    let above = bounds.violation("Cost", 12.0).unwrap();
    assert_eq!(above.direction, BoundDirection::AboveMaximum);
    assert_eq!(above.excess(), 2.0);
    let below = bounds.violation("Cost", 1.0).unwrap();
    assert_eq!(below.direction, BoundDirection::BelowMinimum);
    assert!(bounds.violation("Cost", 5.0).is_none());

    assert!(!Bounds::unbounded().is_bounded());
    assert!(Bounds::unbounded().within_bounds(f64::MAX));
    assert!(Bounds::at_least(0.0).within_bounds(0.0));
}

#[test]
fn test_planning_unit_values_keep_running_total() {
    let mut values = PlanningUnitValues::new(Precision::DEFAULT);
    values.set(PlanningUnitId(1), 1.1114);
    values.set(PlanningUnitId(2), 2.0);
    values.set(PlanningUnitId(1), 0.5);

    assert_eq!(values.get(PlanningUnitId(1)), 0.5);
    assert_eq!(values.get(PlanningUnitId(9)), 0.0);
    assert_eq!(values.total(), 2.5);
    assert_eq!(values.total(), values.sum_of_units());
}

#[test]
fn test_observed_change_is_pending_until_accepted() {
    let (mut variables, mut actions) = wired();
    actions.toggle_action(PlanningUnitId(1), ActionType::RiverBankRestoration, &mut variables);

    let sediment = variables.get("Sediment").unwrap();
    assert_eq!(sediment.value(), 40.0);
    assert_eq!(sediment.undoable_value(), 37.5);
    assert_eq!(sediment.difference_in_values(), -2.5);
    assert!(variables.has_pending_changes());

    assert_eq!(variables.accept_all(), 4);
    assert_eq!(variables.value("Sediment"), Some(37.5));
    assert_eq!(variables.value("Cost"), Some(2500.0));
    assert!(!variables.has_pending_changes());

    assert_eq!(variables.accept_all(), 0);
    assert_eq!(variables.value("Sediment"), Some(37.5));
}

#[test]
fn test_rejected_change_restores_values() {
    let (mut variables, mut actions) = wired();
    let before = variables.reports();

    actions.toggle_action(PlanningUnitId(3), ActionType::RiverBankRestoration, &mut variables);
    assert_eq!(variables.reject_all(), 4);
    assert_eq!(variables.reject_all(), 0);

    assert_eq!(variables.reports(), before);
    for variable in variables.iter() {
        assert_eq!(variable.undoable_value(), variable.value());
        assert_eq!(variable.staged_change(), 0.0);
    }
}

#[test]
fn test_composite_sums_component_changes() {
    let (mut variables, mut actions) = wired();
    let load = variables.get("Load").unwrap();
    assert_eq!(load.value(), 48.0);
    assert_eq!(
        load.values_per_planning_unit().unwrap().get(PlanningUnitId(0)),
        12.0
    );

    actions.toggle_action(PlanningUnitId(0), ActionType::RiverBankRestoration, &mut variables);
    let load = variables.get("Load").unwrap();
    assert_eq!(load.difference_in_values(), -1.15);

    variables.accept_all();
    let load = variables.get("Load").unwrap().values_per_planning_unit().unwrap().clone();
    let sediment = variables.get("Sediment").unwrap().values_per_planning_unit().unwrap().clone();
    let nitrogen = variables.get("Nitrogen").unwrap().values_per_planning_unit().unwrap().clone();
    for unit in load.planning_units() {
        assert_eq!(
            load.get(unit),
            Precision::DEFAULT.round(sediment.get(unit) + nitrogen.get(unit))
        );
    }
}

#[test]
fn test_initialising_commits_immediately() {
    let (mut variables, mut actions) = wired();
    actions.initialising_activation(0, &mut variables);

    assert!(!variables.has_pending_changes());
    assert_eq!(variables.value("Sediment"), Some(39.25));
    assert_eq!(variables.value("Load"), Some(46.85));
    assert_eq!(variables.value("Cost"), Some(1000.0));

    assert_eq!(variables.accept_all(), 0);
    assert_eq!(variables.value("Sediment"), Some(39.25));
}

#[test]
fn test_per_unit_sum_invariant_over_many_changes() {
    let (mut variables, mut actions) = wired();
    for step in 0..500 {
        actions.randomly_toggle_one_activation(&mut variables);
        if step % 3 == 0 {
            variables.reject_all();
            actions.toggle_last_activation_unobserved();
        } else {
            variables.accept_all();
        }
        for variable in variables.iter() {
            if let Some(values) = variable.values_per_planning_unit() {
                assert_eq!(variable.value(), values.sum_of_units());
            }
        }
    }
}

#[test]
fn test_cloned_collection_is_independent() {
    let (mut variables, mut actions) = wired();
    let copy = variables.clone();

    actions.toggle_action(PlanningUnitId(1), ActionType::RiverBankRestoration, &mut variables);
    variables.accept_all();

    assert_eq!(copy.value("Sediment"), Some(40.0));
    assert_eq!(variables.value("Sediment"), Some(37.5));
}

#[test]
fn test_check_bounds_collects_every_violation() {
    let mut variables = DecisionVariables::new();
    let sediment = sediment_variable().with_bounds(Bounds::at_most(30.0));
    variables.add(sediment);
    variables.add(cost_variable(Bounds::at_least(100.0)));

    let err = variables.check_bounds("Validation Errors", false).unwrap_err();
    assert_eq!(err.len(), 2);
    assert_eq!(err.violations()[0].variable, "Sediment");
    assert_eq!(err.violations()[1].direction, BoundDirection::BelowMinimum);
}

#[test]
fn test_reports() {
    let (variables, _) = wired();
    let reports = variables.reports();
    assert_eq!(reports.len(), 4);
    assert_eq!(reports[0].name, "Sediment");
    assert_eq!(reports[0].values_per_planning_unit.as_ref().map(|v| v.len()), Some(4));
    assert_eq!(reports[3].name, "Cost");
    assert_eq!(reports[3].precision, Precision::new(2));
    assert!(reports[3].values_per_planning_unit.is_none());
}

#[test]
fn test_scalar_variable_command_states() {
    let mut variables = DecisionVariables::new();
    variables.add(cost_variable(Bounds::unbounded()));
    let mut action = restoration(0, (0.0, 0.0), (0.0, 0.0), 12.346);
    action.subscribe([ObserverId::new(0)]);

    action.toggle_activation(&mut variables);
    let cost = variables.get_mut("Cost").unwrap();
    assert_eq!(cost.undoable_value(), 12.35);
    assert_eq!(cost.apply_undone_value(), CommandStatus::UnDone);
    assert_eq!(cost.apply_undone_value(), CommandStatus::NoChange);
    assert_eq!(cost.value(), 0.0);
}

#[test]
#[should_panic(expected = "Unhandled observation of management action type [GullyRestoration]")]
fn test_unhandled_action_type_panics() {
    let mut variables = DecisionVariables::new();
    let id = variables.add(sediment_variable());
    let mut action = ManagementAction::new(PlanningUnitId(0), ActionType::GullyRestoration);
    action.subscribe([id]);
    action.toggle_activation(&mut variables);
}

#[test]
#[should_panic(expected = "no upstream decision variable [Sediment]")]
fn test_composite_without_component_panics() {
    let mut variables = DecisionVariables::new();
    variables.add(load_variable());
}

#[test]
#[should_panic(expected = "is subscribed without its dependency [Nitrogen]")]
fn test_subscription_must_include_dependencies() {
    let mut variables = DecisionVariables::new();
    let sediment = variables.add(sediment_variable());
    variables.add(nitrogen_variable());
    let load = variables.add(load_variable());
    variables.validate_subscription(&[sediment, load]);
}

#[test]
#[should_panic(expected = "ascending order")]
fn test_subscription_must_be_ordered() {
    let mut variables = DecisionVariables::new();
    let sediment = variables.add(sediment_variable());
    let nitrogen = variables.add(nitrogen_variable());
    variables.validate_subscription(&[nitrogen, sediment]);
}

#[test]
#[should_panic(expected = "duplicate decision variable [Sediment]")]
fn test_duplicate_variable_name_panics() {
    let mut variables = DecisionVariables::new();
    variables.add(sediment_variable());
    variables.add(sediment_variable());
}
