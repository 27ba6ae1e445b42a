use std::collections::HashMap;

use crem_core::PlanningUnitId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{ActionType, ManagementAction};
use crate::observer::{ObserverId, ObserverRegistry};

/// Owns a model's management actions and remembers the last one applied.
///
/// Every activation change made through the registry records the changed
/// action as "last applied", which is what a revert toggles back. Random
/// selection draws from the registry's own random source, so a seeded
/// registry replays the same sequence of picks.
#[derive(Debug, Clone)]
pub struct ManagementActions {
    actions: Vec<ManagementAction>,
    positions: HashMap<(PlanningUnitId, ActionType), usize>,
    last_applied: Option<usize>,
    rng: StdRng,
}

impl ManagementActions {
    /// Creates an empty registry seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates an empty registry with a reproducible random source.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            actions: Vec::new(),
            positions: HashMap::new(),
            last_applied: None,
            rng,
        }
    }

    /// Adds an action.
    ///
    /// # Panics
    ///
    /// Panics if the action is the null action, or if an action with the
    /// same planning unit and type is already registered.
    pub fn add(&mut self, action: ManagementAction) {
        assert!(
            !action.is_null(),
            "the null action cannot be added to a registry"
        );
        let identity = action.identity();
        if self.positions.contains_key(&identity) {
            panic!(
                "duplicate management action [{}] for planning unit [{}]",
                identity.1, identity.0
            );
        }
        self.positions.insert(identity, self.actions.len());
        self.actions.push(action);
    }

    pub fn extend(&mut self, actions: impl IntoIterator<Item = ManagementAction>) {
        for action in actions {
            self.add(action);
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn as_slice(&self) -> &[ManagementAction] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManagementAction> {
        self.actions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ManagementAction> {
        self.actions.get(index)
    }

    pub fn active_actions(&self) -> impl Iterator<Item = &ManagementAction> {
        self.actions.iter().filter(|action| action.is_active())
    }

    pub fn position(&self, planning_unit: PlanningUnitId, action_type: ActionType) -> Option<usize> {
        self.positions.get(&(planning_unit, action_type)).copied()
    }

    pub fn find(&self, planning_unit: PlanningUnitId, action_type: ActionType) -> Option<&ManagementAction> {
        self.position(planning_unit, action_type)
            .map(|index| &self.actions[index])
    }

    /// The most recently changed action, or the null action if none has been.
    pub fn last_applied(&self) -> &ManagementAction {
        match self.last_applied {
            Some(index) => &self.actions[index],
            None => ManagementAction::null(),
        }
    }

    pub fn last_applied_index(&self) -> Option<usize> {
        self.last_applied
    }

    /// Subscribes `observers`, in order, to every registered action.
    pub fn subscribe_all(&mut self, observers: &[ObserverId]) {
        for action in &mut self.actions {
            action.subscribe(observers.iter().copied());
        }
    }

    /// Orders actions by planning unit, then by action type.
    pub fn sort(&mut self) {
        let last_identity = self.last_applied.map(|index| self.actions[index].identity());
        self.actions.sort_by_key(ManagementAction::identity);
        self.positions = self
            .actions
            .iter()
            .enumerate()
            .map(|(index, action)| (action.identity(), index))
            .collect();
        self.last_applied = last_identity.and_then(|identity| self.positions.get(&identity).copied());
    }

    /// Replaces the random source with a fresh one seeded from the OS.
    pub fn reseed(&mut self) {
        self.rng = StdRng::from_os_rng();
    }

    pub fn reseed_with(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draws a `u64` from the registry's random source.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Picks a uniformly random action index, or `None` if the registry is empty.
    pub fn random_index(&mut self) -> Option<usize> {
        if self.actions.is_empty() {
            return None;
        }
        Some(self.rng.random_range(0..self.actions.len()))
    }

    /// Picks a uniformly random entry of `candidates`.
    pub fn choose_index(&mut self, candidates: &[usize]) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.random_range(0..candidates.len())])
    }

    /// Picks a random action, or the null action if the registry is empty.
    pub fn pick_random(&mut self) -> &ManagementAction {
        match self.random_index() {
            Some(index) => &self.actions[index],
            None => ManagementAction::null(),
        }
    }

    /// Toggles one random action with observation and returns it.
    ///
    /// Returns the null action, having done nothing, if the registry is empty.
    pub fn randomly_toggle_one_activation<R>(&mut self, registry: &mut R) -> &ManagementAction
    where
        R: ObserverRegistry + ?Sized,
    {
        let Some(index) = self.random_index() else {
            debug!(event = "toggle_skipped", reason = "no management actions");
            return ManagementAction::null();
        };
        self.toggle_at(index, registry)
    }

    /// Activates each action, with immediate commit, on a fair coin flip.
    pub fn randomly_initialise<R>(&mut self, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        for index in 0..self.actions.len() {
            if self.rng.random_bool(0.5) {
                self.initialising_activation(index, registry);
            }
        }
    }

    /// Deactivates every action with immediate commit.
    pub fn initialise_all_inactive<R>(&mut self, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        for action in &mut self.actions {
            action.initialising_deactivation(registry);
        }
        self.last_applied = None;
    }

    /// Activates every action with immediate commit.
    pub fn initialise_all_active<R>(&mut self, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        for action in &mut self.actions {
            action.initialising_activation(registry);
        }
        self.last_applied = None;
    }

    /// Activates the action at `index` with immediate commit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn initialising_activation<R>(&mut self, index: usize, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        self.actions[index].initialising_activation(registry);
        self.last_applied = Some(index);
    }

    /// Deactivates the action at `index` with immediate commit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn initialising_deactivation<R>(&mut self, index: usize, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        self.actions[index].initialising_deactivation(registry);
        self.last_applied = Some(index);
    }

    /// Re-toggles the last applied action with observation.
    ///
    /// Does nothing if no action has been applied.
    pub fn toggle_last_activation<R>(&mut self, registry: &mut R)
    where
        R: ObserverRegistry + ?Sized,
    {
        if let Some(index) = self.last_applied {
            self.actions[index].toggle_activation(registry);
        }
    }

    /// Re-toggles the last applied action without notifying observers.
    pub fn toggle_last_activation_unobserved(&mut self) {
        if let Some(index) = self.last_applied {
            self.actions[index].toggle_activation_unobserved();
        }
    }

    /// Toggles the action with the given identity, with observation.
    ///
    /// Returns `None`, having done nothing, if no such action exists.
    pub fn toggle_action<R>(
        &mut self,
        planning_unit: PlanningUnitId,
        action_type: ActionType,
        registry: &mut R,
    ) -> Option<&ManagementAction>
    where
        R: ObserverRegistry + ?Sized,
    {
        let index = self.position(planning_unit, action_type)?;
        Some(self.toggle_at(index, registry))
    }

    /// Toggles the action with the given identity without notifying observers.
    pub fn toggle_action_unobserved(
        &mut self,
        planning_unit: PlanningUnitId,
        action_type: ActionType,
    ) -> Option<&ManagementAction> {
        let index = self.position(planning_unit, action_type)?;
        self.actions[index].toggle_activation_unobserved();
        self.last_applied = Some(index);
        Some(&self.actions[index])
    }

    /// Sets the activation of the action at `index`, with observation.
    ///
    /// Returns whether the activation changed. An unchanged action notifies
    /// no one and doesn't become the last applied action.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_activation<R>(&mut self, index: usize, value: bool, registry: &mut R) -> bool
    where
        R: ObserverRegistry + ?Sized,
    {
        if !self.actions[index].set_activation(value, registry) {
            return false;
        }
        self.last_applied = Some(index);
        true
    }

    /// Sets the activation of the action at `index` without notifying observers.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_activation_unobserved(&mut self, index: usize, value: bool) {
        self.actions[index].set_activation_unobserved(value);
        self.last_applied = Some(index);
    }

    fn toggle_at<R>(&mut self, index: usize, registry: &mut R) -> &ManagementAction
    where
        R: ObserverRegistry + ?Sized,
    {
        self.actions[index].toggle_activation(registry);
        self.last_applied = Some(index);
        &self.actions[index]
    }
}

impl Default for ManagementActions {
    fn default() -> Self {
        Self::new()
    }
}
