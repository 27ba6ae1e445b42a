use crem_core::ValidationError;
use tracing::debug;

use super::{UndoableDecisionVariable, VariableReport};
use crate::action::ManagementAction;
use crate::command::CommandStatus;
use crate::observer::{Notification, ObserverId, ObserverRegistry};

/// Read-only view of the variables registered before the one being notified.
///
/// Composite variables use it to read the changes their components have
/// already staged for the current action.
#[derive(Debug, Clone, Copy)]
pub struct Upstream<'a> {
    variables: &'a [Box<dyn UndoableDecisionVariable>],
}

impl<'a> Upstream<'a> {
    pub fn new(variables: &'a [Box<dyn UndoableDecisionVariable>]) -> Self {
        Self { variables }
    }

    pub fn none() -> Upstream<'static> {
        Upstream { variables: &[] }
    }

    pub fn get(&self, name: &str) -> Option<&'a dyn UndoableDecisionVariable> {
        self.variables
            .iter()
            .find(|variable| variable.name() == name)
            .map(|variable| variable.as_ref())
    }

    /// Looks up an upstream variable by name.
    ///
    /// # Panics
    ///
    /// Panics if no variable of that name precedes the caller.
    pub fn variable(&self, name: &str) -> &'a dyn UndoableDecisionVariable {
        match self.get(name) {
            Some(variable) => variable,
            None => panic!("no upstream decision variable [{}]", name),
        }
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// The decision variables of a model, in dependency order.
///
/// Each variable's [`ObserverId`] is its position here. The collection is
/// the [`ObserverRegistry`] actions notify through.
#[derive(Debug, Clone, Default)]
pub struct DecisionVariables {
    variables: Vec<Box<dyn UndoableDecisionVariable>>,
}

impl DecisionVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable after all existing ones and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if a variable of the same name exists, or if the variable
    /// depends on one that hasn't been added yet.
    pub fn add(&mut self, variable: impl UndoableDecisionVariable + 'static) -> ObserverId {
        self.add_boxed(Box::new(variable))
    }

    pub fn add_boxed(&mut self, mut variable: Box<dyn UndoableDecisionVariable>) -> ObserverId {
        if self.get(variable.name()).is_some() {
            panic!("duplicate decision variable [{}]", variable.name());
        }
        variable.bind_upstream(&Upstream::new(&self.variables));
        self.variables.push(variable);
        ObserverId::new(self.variables.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn UndoableDecisionVariable> {
        self.variables.iter().map(|variable| variable.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|variable| variable.name())
    }

    pub fn ids(&self) -> impl Iterator<Item = ObserverId> {
        (0..self.variables.len()).map(ObserverId::new)
    }

    pub fn by_id(&self, id: ObserverId) -> Option<&dyn UndoableDecisionVariable> {
        self.variables.get(id.index()).map(|variable| variable.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&dyn UndoableDecisionVariable> {
        self.variables
            .iter()
            .find(|variable| variable.name() == name)
            .map(|variable| variable.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn UndoableDecisionVariable + 'static)> {
        self.variables
            .iter_mut()
            .find(|variable| variable.name() == name)
            .map(|variable| variable.as_mut())
    }

    pub fn id_of(&self, name: &str) -> Option<ObserverId> {
        self.variables
            .iter()
            .position(|variable| variable.name() == name)
            .map(ObserverId::new)
    }

    /// Committed value of the named variable.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).map(|variable| variable.value())
    }

    /// Commits every variable's pending change, returning how many changed.
    pub fn accept_all(&mut self) -> usize {
        self.variables
            .iter_mut()
            .map(|variable| variable.apply_done_value())
            .filter(|status| *status != CommandStatus::NoChange)
            .count()
    }

    /// Discards every variable's pending change, returning how many changed.
    pub fn reject_all(&mut self) -> usize {
        self.variables
            .iter_mut()
            .map(|variable| variable.apply_undone_value())
            .filter(|status| *status != CommandStatus::NoChange)
            .count()
    }

    pub fn has_pending_changes(&self) -> bool {
        self.variables
            .iter()
            .any(|variable| variable.has_pending_change())
    }

    /// Checks that notifying `observers` in order satisfies every
    /// variable's dependencies.
    ///
    /// # Panics
    ///
    /// Panics if a handle is unknown, repeated or out of order, or if a
    /// variable is subscribed without the variables it depends on.
    pub fn validate_subscription(&self, observers: &[ObserverId]) {
        for (position, observer) in observers.iter().enumerate() {
            let Some(variable) = self.by_id(*observer) else {
                panic!("no decision variable with observer handle {}", observer);
            };
            if position > 0 && observers[position - 1] >= *observer {
                panic!(
                    "observers must be subscribed in ascending order, found {} after {}",
                    observer,
                    observers[position - 1]
                );
            }
            for dependency in variable.dependencies() {
                let subscribed_before = self
                    .id_of(dependency)
                    .is_some_and(|id| observers[..position].contains(&id));
                if !subscribed_before {
                    panic!(
                        "decision variable [{}] is subscribed without its dependency [{}]",
                        variable.name(),
                        dependency
                    );
                }
            }
        }
    }

    /// Collects every variable whose value, or undoable value when
    /// `undoable` is set, lies outside its bounds.
    pub fn check_bounds(&self, context: &str, undoable: bool) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new(context);
        for variable in &self.variables {
            if !variable.bounds().is_bounded() {
                continue;
            }
            let value = if undoable {
                variable.undoable_value()
            } else {
                variable.value()
            };
            if let Some(violation) = variable.bounds().violation(variable.name(), value) {
                debug!(
                    event = "bound_violation",
                    variable = variable.name(),
                    value = violation.value,
                    bound = violation.bound,
                    direction = ?violation.direction,
                    excess = violation.excess(),
                );
                errors.push(violation);
            }
        }
        errors.into_result()
    }

    pub fn reports(&self) -> Vec<VariableReport> {
        self.iter().map(VariableReport::of).collect()
    }

    fn notify_variable(&mut self, observer: ObserverId, action: &ManagementAction, notification: Notification) {
        let (upstream, rest) = self.variables.split_at_mut(observer.index());
        let Some(variable) = rest.first_mut() else {
            panic!("no decision variable with observer handle {}", observer);
        };
        let upstream = Upstream::new(upstream);
        match notification {
            Notification::Change => variable.observe_action(action, &upstream),
            Notification::Initialising => variable.observe_action_initialising(action, &upstream),
        }
    }
}

impl ObserverRegistry for DecisionVariables {
    fn notify(&mut self, observer: ObserverId, action: &ManagementAction, notification: Notification) {
        self.notify_variable(observer, action, notification);
    }
}
