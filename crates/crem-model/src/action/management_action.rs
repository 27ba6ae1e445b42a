use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crem_core::PlanningUnitId;
use smallvec::SmallVec;
use tracing::trace;

use super::ActionType;
use crate::observer::{Notification, ObserverId, ObserverRegistry};

static NULL_ACTION: LazyLock<ManagementAction> = LazyLock::new(|| ManagementAction {
    planning_unit: PlanningUnitId::default(),
    action_type: ActionType::Null,
    is_active: false,
    attributes: BTreeMap::new(),
    observers: SmallVec::new(),
});

/// A binary intervention that may be applied to one planning unit.
///
/// Besides its activation state, an action carries a bag of named numeric
/// attributes (precomputed "original" and "actioned" magnitudes, costs) that
/// observing variables read to work out their change, and the ordered list of
/// observers to notify when its activation changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagementAction {
    planning_unit: PlanningUnitId,
    action_type: ActionType,
    is_active: bool,
    attributes: BTreeMap<String, f64>,
    observers: SmallVec<[ObserverId; 8]>,
}

impl ManagementAction {
    /// Creates an inactive action with no attributes and no observers.
    pub fn new(planning_unit: impl Into<PlanningUnitId>, action_type: ActionType) -> Self {
        Self {
            planning_unit: planning_unit.into(),
            action_type,
            is_active: false,
            attributes: BTreeMap::new(),
            observers: SmallVec::new(),
        }
    }

    /// The shared null action, returned where no real action exists.
    ///
    /// It is never active and has no observers. Mutating methods on a null
    /// action are no-ops.
    pub fn null() -> &'static ManagementAction {
        &NULL_ACTION
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: f64) {
        if self.is_null() {
            return;
        }
        self.attributes.insert(name.into(), value);
    }

    pub fn planning_unit(&self) -> PlanningUnitId {
        self.planning_unit
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// `(planning_unit, action_type)`, unique within a registry.
    pub fn identity(&self) -> (PlanningUnitId, ActionType) {
        (self.planning_unit, self.action_type)
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_null(&self) -> bool {
        self.action_type.is_null()
    }

    pub fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).copied()
    }

    /// Returns the named attribute, panicking if the action doesn't carry it.
    ///
    /// Variables are wired against the attributes their action types carry,
    /// so a missing one is a construction defect.
    pub fn required_attribute(&self, name: &str) -> f64 {
        match self.attributes.get(name) {
            Some(value) => *value,
            None => panic!(
                "management action [{}] for planning unit [{}] has no attribute [{}]",
                self.action_type, self.planning_unit, name
            ),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, f64)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    pub fn observers(&self) -> &[ObserverId] {
        &self.observers
    }

    /// Appends observers, in the order they must be notified.
    pub fn subscribe(&mut self, observers: impl IntoIterator<Item = ObserverId>) {
        if self.is_null() {
            return;
        }
        self.observers.extend(observers);
    }

    /// Flips the activation state and notifies every observer to stage a change.
    pub fn toggle_activation<R>(&mut self, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        if self.is_null() {
            return;
        }
        self.is_active = !self.is_active;
        self.notify_observers(registry, Notification::Change);
    }

    /// Flips the activation state without notifying anyone.
    ///
    /// Used when observers have already been reverted independently.
    pub fn toggle_activation_unobserved(&mut self) {
        if self.is_null() {
            return;
        }
        self.is_active = !self.is_active;
    }

    /// Activates the action and has observers commit the change immediately.
    ///
    /// Does nothing if already active.
    pub fn initialising_activation<R>(&mut self, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        if self.is_null() || self.is_active {
            return;
        }
        self.is_active = true;
        self.notify_observers(registry, Notification::Initialising);
    }

    /// Deactivates the action and has observers commit the change immediately.
    ///
    /// Does nothing if already inactive.
    pub fn initialising_deactivation<R>(&mut self, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        if self.is_null() || !self.is_active {
            return;
        }
        self.is_active = false;
        self.notify_observers(registry, Notification::Initialising);
    }

    /// Sets the activation state, notifying observers only if it changed.
    ///
    /// Returns whether it changed.
    pub fn set_activation<R>(&mut self, value: bool, registry: &mut R) -> bool
    where
        R: ObserverRegistry + ?Sized,
    {
        if self.is_null() || self.is_active == value {
            return false;
        }
        self.toggle_activation(registry);
        true
    }

    pub fn set_activation_unobserved(&mut self, value: bool) {
        if self.is_null() {
            return;
        }
        self.is_active = value;
    }

    fn notify_observers<R>(&self, registry: &mut R, notification: Notification)
    where
        R: ObserverRegistry + ?Sized,
    {
        for &observer in &self.observers {
            trace!(
                event = "notify_observer",
                observer = observer.index(),
                planning_unit = self.planning_unit.get(),
                action_type = self.action_type.name(),
                is_active = self.is_active,
                ?notification,
            );
            registry.notify(observer, self, notification);
        }
    }
}

impl fmt::Display for ManagementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ planning unit {} ({})",
            self.action_type,
            self.planning_unit,
            if self.is_active { "active" } else { "inactive" }
        )
    }
}
