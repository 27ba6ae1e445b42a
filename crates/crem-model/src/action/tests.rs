//! Tests for management actions and their registry.

use crem_core::PlanningUnitId;

use super::*;
use crate::observer::{NoObservers, Notification, ObserverId, ObserverRegistry};

// Records every notification it receives.
#[derive(Debug, Default)]
struct RecordingRegistry {
    seen: Vec<(ObserverId, PlanningUnitId, bool, Notification)>,
}

impl ObserverRegistry for RecordingRegistry {
    fn notify(&mut self, observer: ObserverId, action: &ManagementAction, notification: Notification) {
        self.seen
            .push((observer, action.planning_unit(), action.is_active(), notification));
    }
}

fn registry_of(count: u64) -> ManagementActions {
    let mut actions = ManagementActions::with_seed(42);
    for unit in 0..count {
        actions.add(ManagementAction::new(unit, ActionType::RiverBankRestoration));
    }
    actions
}

#[test]
fn test_toggle_notifies_observers_in_order() {
    let mut action = ManagementAction::new(PlanningUnitId(7), ActionType::GullyRestoration);
    action.subscribe([ObserverId::new(0), ObserverId::new(2)]);
    let mut registry = RecordingRegistry::default();

    action.toggle_activation(&mut registry);

    assert!(action.is_active());
    assert_eq!(
        registry.seen,
        vec![
            (ObserverId::new(0), PlanningUnitId(7), true, Notification::Change),
            (ObserverId::new(2), PlanningUnitId(7), true, Notification::Change),
        ]
    );
}

#[test]
fn test_unobserved_toggle_is_silent() {
    let mut action = ManagementAction::new(PlanningUnitId(7), ActionType::GullyRestoration);
    action.subscribe([ObserverId::new(0)]);

    action.toggle_activation_unobserved();
    assert!(action.is_active());
    action.set_activation_unobserved(false);
    assert!(!action.is_active());
}

#[test]
fn test_initialising_changes_are_idempotent() {
    let mut action = ManagementAction::new(PlanningUnitId(3), ActionType::HillSlopeRestoration);
    action.subscribe([ObserverId::new(0)]);
    let mut registry = RecordingRegistry::default();

    action.initialising_activation(&mut registry);
    action.initialising_activation(&mut registry);
    assert!(action.is_active());
    assert_eq!(registry.seen.len(), 1);
    assert_eq!(registry.seen[0].3, Notification::Initialising);

    action.initialising_deactivation(&mut registry);
    action.initialising_deactivation(&mut registry);
    assert!(!action.is_active());
    assert_eq!(registry.seen.len(), 2);
}

#[test]
fn test_set_activation_only_notifies_on_change() {
    let mut action = ManagementAction::new(PlanningUnitId(3), ActionType::HillSlopeRestoration);
    action.subscribe([ObserverId::new(0)]);
    let mut registry = RecordingRegistry::default();

    assert!(!action.set_activation(false, &mut registry));
    assert!(registry.seen.is_empty());
    assert!(action.set_activation(true, &mut registry));
    assert_eq!(registry.seen.len(), 1);
}

#[test]
fn test_null_action_is_inert() {
    let null = ManagementAction::null();
    assert!(null.is_null());
    assert!(!null.is_active());
    assert!(null.observers().is_empty());

    let mut copy = null.clone();
    copy.subscribe([ObserverId::new(0)]);
    copy.toggle_activation(&mut NoObservers);
    copy.set_activation_unobserved(true);
    assert!(!copy.is_active());
    assert!(copy.observers().is_empty());
}

#[test]
fn test_attributes() {
    let action = ManagementAction::new(PlanningUnitId(1), ActionType::RiverBankRestoration)
        .with_attribute("OriginalBufferVegetation", 0.0)
        .with_attribute("ActionedBufferVegetation", 0.75);

    assert_eq!(action.attribute("ActionedBufferVegetation"), Some(0.75));
    assert_eq!(action.attribute("Missing"), None);
    assert_eq!(action.required_attribute("OriginalBufferVegetation"), 0.0);
    assert_eq!(action.attributes().count(), 2);
}

#[test]
#[should_panic(expected = "has no attribute [Missing]")]
fn test_required_attribute_panics_when_missing() {
    ManagementAction::new(PlanningUnitId(1), ActionType::RiverBankRestoration).required_attribute("Missing");
}

#[test]
fn test_empty_registry_random_toggle_returns_null() {
    let mut actions = ManagementActions::with_seed(1);
    let mut registry = RecordingRegistry::default();

    let picked = actions.randomly_toggle_one_activation(&mut registry);
    assert!(picked.is_null());
    assert!(actions.pick_random().is_null());
    assert!(actions.last_applied().is_null());
    assert!(registry.seen.is_empty());
}

#[test]
fn test_random_toggle_records_last_applied() {
    let mut actions = registry_of(5);
    actions.subscribe_all(&[ObserverId::new(0)]);
    let mut registry = RecordingRegistry::default();

    let identity = actions.randomly_toggle_one_activation(&mut registry).identity();
    assert_eq!(actions.last_applied().identity(), identity);
    assert!(actions.last_applied().is_active());
    assert_eq!(actions.active_actions().count(), 1);

    actions.toggle_last_activation_unobserved();
    assert_eq!(actions.active_actions().count(), 0);
    assert_eq!(registry.seen.len(), 1);
}

#[test]
fn test_toggle_action_by_identity() {
    let mut actions = registry_of(3);
    let mut registry = NoObservers;

    let toggled = actions
        .toggle_action(PlanningUnitId(1), ActionType::RiverBankRestoration, &mut registry)
        .map(ManagementAction::identity);
    assert_eq!(toggled, Some((PlanningUnitId(1), ActionType::RiverBankRestoration)));
    assert!(actions.find(PlanningUnitId(1), ActionType::RiverBankRestoration).unwrap().is_active());

    let missing = actions.toggle_action(PlanningUnitId(1), ActionType::GullyRestoration, &mut registry);
    assert!(missing.is_none());
    assert_eq!(actions.last_applied().planning_unit(), PlanningUnitId(1));
}

#[test]
#[should_panic(expected = "duplicate management action")]
fn test_duplicate_identity_rejected() {
    let mut actions = registry_of(2);
    actions.add(ManagementAction::new(PlanningUnitId(1), ActionType::RiverBankRestoration));
}

#[test]
fn test_sort_by_planning_unit_then_type() {
    let mut actions = ManagementActions::with_seed(3);
    actions.add(ManagementAction::new(PlanningUnitId(9), ActionType::RiverBankRestoration));
    actions.add(ManagementAction::new(PlanningUnitId(2), ActionType::WetlandsEstablishment));
    actions.add(ManagementAction::new(PlanningUnitId(9), ActionType::GullyRestoration));
    actions.add(ManagementAction::new(PlanningUnitId(2), ActionType::HillSlopeRestoration));
    actions.set_activation_unobserved(0, true);

    actions.sort();

    let order: Vec<_> = actions.iter().map(ManagementAction::identity).collect();
    assert_eq!(
        order,
        vec![
            (PlanningUnitId(2), ActionType::HillSlopeRestoration),
            (PlanningUnitId(2), ActionType::WetlandsEstablishment),
            (PlanningUnitId(9), ActionType::GullyRestoration),
            (PlanningUnitId(9), ActionType::RiverBankRestoration),
        ]
    );
    assert_eq!(
        actions.last_applied().identity(),
        (PlanningUnitId(9), ActionType::RiverBankRestoration)
    );
    assert_eq!(actions.position(PlanningUnitId(9), ActionType::GullyRestoration), Some(2));
}

#[test]
fn test_set_activation_by_index() {
    let mut actions = registry_of(4);
    actions.subscribe_all(&[ObserverId::new(0)]);
    let mut registry = RecordingRegistry::default();

    assert!(actions.set_activation(2, true, &mut registry));
    assert!(!actions.set_activation(2, true, &mut registry));
    assert_eq!(registry.seen.len(), 1);
    assert_eq!(actions.last_applied_index(), Some(2));

    assert!(!actions.set_activation(0, false, &mut registry));
    assert_eq!(actions.last_applied_index(), Some(2));

    actions.set_activation_unobserved(3, true);
    assert_eq!(actions.active_actions().count(), 2);
    assert_eq!(registry.seen.len(), 1);
}

#[test]
fn test_seeded_registries_pick_identically() {
    let mut first = registry_of(10);
    let mut second = registry_of(10);

    let first_picks: Vec<_> = (0..20).map(|_| first.random_index()).collect();
    let second_picks: Vec<_> = (0..20).map(|_| second.random_index()).collect();
    assert_eq!(first_picks, second_picks);
}

#[test]
fn test_initialise_all_active_then_inactive() {
    let mut actions = registry_of(4);
    actions.subscribe_all(&[ObserverId::new(0)]);
    let mut registry = RecordingRegistry::default();

    actions.initialise_all_active(&mut registry);
    assert_eq!(actions.active_actions().count(), 4);
    actions.initialise_all_inactive(&mut registry);
    assert_eq!(actions.active_actions().count(), 0);

    assert_eq!(registry.seen.len(), 8);
    assert!(registry
        .seen
        .iter()
        .all(|(_, _, _, notification)| *notification == Notification::Initialising));
    assert!(actions.last_applied().is_null());
}
