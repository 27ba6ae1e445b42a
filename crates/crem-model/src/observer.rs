//! Dispatch between management actions and the variables observing them.
//!
//! Actions don't hold references to their observers. Each action keeps a list
//! of [`ObserverId`] handles, and whoever owns the observers implements
//! [`ObserverRegistry`] to resolve a handle and deliver the notification. This
//! keeps the action registry and the variable collection independently owned
//! and makes deep-cloning a model a plain clone.

use std::fmt;

use crate::action::ManagementAction;
use crate::variable::Upstream;

/// Handle of an observer within its registry.
///
/// Handles are positions in registration order. A variable may only depend
/// on variables with a smaller handle, so notifying observers in the order
/// they were subscribed is also their dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(usize);

impl ObserverId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which kind of activation change is being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A search step: the observer stages a pending change.
    Change,
    /// Model initialisation: the observer stages and commits immediately.
    Initialising,
}

/// Reacts to a management action's activation changing.
pub trait ActionObserver {
    // Stages a pending change from the action's new state.
    fn observe_action(&mut self, action: &ManagementAction, upstream: &Upstream<'_>);

    // Stages a change and commits it straight away.
    fn observe_action_initialising(&mut self, action: &ManagementAction, upstream: &Upstream<'_>);
}

/// Resolves observer handles and delivers notifications to them.
pub trait ObserverRegistry {
    fn notify(&mut self, observer: ObserverId, action: &ManagementAction, notification: Notification);
}

/// Registry with no observers, for toggling actions in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObservers;

impl ObserverRegistry for NoObservers {
    fn notify(&mut self, _observer: ObserverId, _action: &ManagementAction, _notification: Notification) {}
}
