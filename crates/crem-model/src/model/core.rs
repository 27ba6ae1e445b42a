use std::sync::Arc;

use crem_config::Parameters;
use crem_core::{
    CremError, EventCategory, ModelEvent, ModelEventListener, ModelEventSupport, PlanningUnitId,
    ValidationError,
};
use tracing::{debug, info, warn};

use crate::action::{ActionType, ManagementAction, ManagementActions};
use crate::observer::ObserverId;
use crate::variable::{Bounds, DecisionVariables, UndoableDecisionVariable, VariableReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeState {
    Idle,
    Pending,
    // Idle, with the last applied change rejected.
    Reverted,
}

/// A catchment model: management actions, the decision variables observing
/// them, and the accept/revert protocol over both.
///
/// A search step toggles one action ([`try_random_change`](Self::try_random_change)
/// or [`toggle_action`](Self::toggle_action)), which leaves every observing
/// variable with a pending change. The caller inspects the pending values,
/// typically via [`change_is_valid`](Self::change_is_valid), then either
/// [`accept_change`](Self::accept_change)s or
/// [`revert_change`](Self::revert_change)s. Accepting or reverting when
/// nothing is pending does nothing.
#[derive(Debug, Clone)]
pub struct CoreModel {
    name: String,
    id: String,
    parameters: Parameters,
    planning_units: Vec<PlanningUnitId>,
    pub(super) actions: ManagementActions,
    pub(super) variables: DecisionVariables,
    events: ModelEventSupport,
    change: ChangeState,
    pub(super) initialising: bool,
}

impl CoreModel {
    /// Creates an empty model whose random source is seeded from the OS.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_actions(name, ManagementActions::new())
    }

    /// Creates an empty model with a reproducible random source.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::with_actions(name, ManagementActions::with_seed(seed))
    }

    /// Creates an empty model using `parameters`, seeded from
    /// `random_seed` when set.
    pub fn with_parameters(name: impl Into<String>, parameters: Parameters) -> Self {
        let mut model = match parameters.random_seed {
            Some(seed) => Self::with_seed(name, seed),
            None => Self::new(name),
        };
        model.parameters = parameters;
        model
    }

    fn with_actions(name: impl Into<String>, actions: ManagementActions) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            parameters: Parameters::default(),
            planning_units: Vec::new(),
            actions,
            variables: DecisionVariables::new(),
            events: ModelEventSupport::new(),
            change: ChangeState::Idle,
            initialising: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    // === Construction ===

    pub fn add_planning_units(&mut self, planning_units: impl IntoIterator<Item = PlanningUnitId>) {
        self.planning_units.extend(planning_units);
        self.planning_units.sort_unstable();
        self.planning_units.dedup();
    }

    /// Adds a decision variable after all existing ones.
    ///
    /// Variables must be added in dependency order: a composite after its
    /// components.
    pub fn add_variable(&mut self, variable: impl UndoableDecisionVariable + 'static) -> ObserverId {
        self.variables.add(variable)
    }

    pub fn add_action(&mut self, action: ManagementAction) {
        self.actions.add(action);
    }

    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = ManagementAction>) {
        self.actions.extend(actions);
    }

    /// Orders actions by planning unit, then by action type.
    pub fn sort_management_actions(&mut self) {
        self.actions.sort();
    }

    /// Subscribes `observers`, in order, to every action added so far.
    ///
    /// # Panics
    ///
    /// Panics if the order doesn't satisfy the variables' dependencies.
    pub fn subscribe_actions(&mut self, observers: &[ObserverId]) {
        self.variables.validate_subscription(observers);
        self.actions.subscribe_all(observers);
    }

    /// Replaces the bounds of the named variable.
    pub fn set_bounds(&mut self, variable: &str, bounds: Bounds) -> Result<(), CremError> {
        match self.variables.get_mut(variable) {
            Some(variable) => {
                variable.set_bounds(bounds);
                Ok(())
            }
            None => Err(CremError::UnknownVariable(variable.to_string())),
        }
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ModelEventListener>) {
        self.events.add_listener(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.events.clear_listeners();
    }

    // === Queries ===

    pub fn planning_units(&self) -> &[PlanningUnitId] {
        &self.planning_units
    }

    pub fn management_actions(&self) -> &ManagementActions {
        &self.actions
    }

    pub fn active_management_actions(&self) -> impl Iterator<Item = &ManagementAction> {
        self.actions.active_actions()
    }

    pub fn decision_variables(&self) -> &DecisionVariables {
        &self.variables
    }

    pub fn decision_variable(&self, name: &str) -> Option<&dyn UndoableDecisionVariable> {
        self.variables.get(name)
    }

    /// The most recently changed action, or the null action.
    pub fn last_applied_action(&self) -> &ManagementAction {
        self.actions.last_applied()
    }

    pub fn has_pending_change(&self) -> bool {
        self.change == ChangeState::Pending
    }

    pub fn is_initialising(&self) -> bool {
        self.initialising
    }

    pub fn variable_reports(&self) -> Vec<VariableReport> {
        self.variables.reports()
    }

    // === Search steps ===

    /// Toggles one random action, leaving every observer with a pending change.
    ///
    /// Returns the toggled action, or the null action if there are none. A
    /// change already pending is reverted first.
    pub fn try_random_change(&mut self) -> &ManagementAction {
        self.revert_outstanding_change("try_random_change");
        if self
            .actions
            .randomly_toggle_one_activation(&mut self.variables)
            .is_null()
        {
            debug!(event = "try_skipped", model = %self.name, reason = "no management actions");
            return ManagementAction::null();
        }
        self.change = ChangeState::Pending;
        self.note_management_action("Trying Action", self.actions.last_applied());
        self.actions.last_applied()
    }

    /// Toggles the action with the given identity, leaving every observer
    /// with a pending change.
    ///
    /// # Errors
    ///
    /// Returns [`CremError::UnknownAction`], having changed nothing, if the
    /// model has no such action.
    pub fn toggle_action(
        &mut self,
        planning_unit: PlanningUnitId,
        action_type: ActionType,
    ) -> Result<&ManagementAction, CremError> {
        if self.actions.position(planning_unit, action_type).is_none() {
            return Err(CremError::UnknownAction(format!(
                "{} for planning unit {}",
                action_type, planning_unit
            )));
        }
        self.revert_outstanding_change("toggle_action");
        self.note(format!(
            "Toggling action [{}] for planning unit [{}]",
            action_type, planning_unit
        ));
        self.actions
            .toggle_action(planning_unit, action_type, &mut self.variables);
        self.change = ChangeState::Pending;
        Ok(self.actions.last_applied())
    }

    /// Commits every pending variable change.
    pub fn accept_change(&mut self) {
        if self.change != ChangeState::Pending {
            debug!(event = "accept_skipped", model = %self.name, reason = "no pending change");
            return;
        }
        if !self.initialising {
            self.note_management_action("Accepting Action", self.actions.last_applied());
        }
        let changed = self.variables.accept_all();
        self.change = ChangeState::Idle;
        debug!(event = "change_accepted", model = %self.name, variables_changed = changed);
        if !self.initialising && self.events.has_listeners() {
            for variable in self.variables.iter() {
                self.fire_decision_variable(variable, None);
            }
        }
    }

    /// Discards every pending variable change and toggles the action back,
    /// without notifying its observers again.
    pub fn revert_change(&mut self) {
        if self.change != ChangeState::Pending {
            debug!(event = "revert_skipped", model = %self.name, reason = "no pending change");
            return;
        }
        if !self.initialising {
            self.note_management_action("Rejecting Action", self.actions.last_applied());
        }
        let changed = self.variables.reject_all();
        self.actions.toggle_last_activation_unobserved();
        self.change = ChangeState::Reverted;
        debug!(event = "change_reverted", model = %self.name, variables_changed = changed);
    }

    /// Toggles one random action and commits the change.
    pub fn do_random_change(&mut self) {
        self.try_random_change();
        self.accept_change();
    }

    /// Undoes the last applied change.
    ///
    /// A pending change is reverted. Otherwise the last applied action is
    /// toggled back with observation and the reversing change committed.
    /// Nothing happens if the last change was already reverted or undone.
    pub fn undo_change(&mut self) {
        match self.change {
            ChangeState::Pending => {
                self.revert_change();
                return;
            }
            ChangeState::Reverted => {
                debug!(event = "undo_skipped", model = %self.name, reason = "last change reverted");
                return;
            }
            ChangeState::Idle => {}
        }
        if self.actions.last_applied().is_null() {
            debug!(event = "undo_skipped", model = %self.name, reason = "nothing applied");
            return;
        }
        self.note_management_action("Undoing Action", self.actions.last_applied());
        self.actions.toggle_last_activation(&mut self.variables);
        self.variables.accept_all();
        self.change = ChangeState::Reverted;
    }

    /// Sets the activation of the action at `index`, committing the change.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_management_action(&mut self, index: usize, value: bool) {
        self.revert_outstanding_change("set_management_action");
        if self.actions.set_activation(index, value, &mut self.variables) {
            self.variables.accept_all();
            self.change = ChangeState::Idle;
        }
    }

    /// Sets the activation of the action at `index` without touching any
    /// variable. Variables no longer reflect the action afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_management_action_unobserved(&mut self, index: usize, value: bool) {
        self.actions.set_activation_unobserved(index, value);
    }

    // === Validation ===

    /// Checks every bounded variable's pending (undoable) value.
    ///
    /// All violations are collected, not just the first.
    pub fn change_is_valid(&self) -> Result<(), ValidationError> {
        self.variables.check_bounds("Validation Errors", true)
    }

    /// Checks every bounded variable's committed value.
    pub fn state_is_valid(&self) -> Result<(), ValidationError> {
        self.variables.check_bounds("Validation Errors", false)
    }

    // === Cloning ===

    /// Independent copy of the model with a fresh OS-seeded random source.
    ///
    /// Event listeners are shared with the original, so both models' events
    /// reach the same sinks. Call [`clear_listeners`](Self::clear_listeners)
    /// on the copy to detach it.
    pub fn deep_clone(&self) -> CoreModel {
        let mut clone = self.clone();
        clone.actions.reseed();
        clone
    }

    /// Independent copy of the model with a reproducible random source.
    ///
    /// Shares event listeners like [`deep_clone`](Self::deep_clone).
    pub fn deep_clone_with_seed(&self, seed: u64) -> CoreModel {
        let mut clone = self.clone();
        clone.actions.reseed_with(seed);
        clone
    }

    // === Events ===

    /// Emits a free-form note.
    pub fn note(&self, text: impl Into<String>) {
        if !self.events.has_listeners() {
            return;
        }
        self.events.fire(&ModelEvent::note(&self.name, text));
    }

    /// Emits the named variable's committed value, optionally with a note.
    pub fn observe_decision_variable(&self, name: &str, note: Option<&str>) -> Result<(), CremError> {
        let variable = self
            .variables
            .get(name)
            .ok_or_else(|| CremError::UnknownVariable(name.to_string()))?;
        if !self.initialising {
            self.fire_decision_variable(variable, note);
        }
        Ok(())
    }

    pub(super) fn note_management_action(&self, text: &str, action: &ManagementAction) {
        if !self.events.has_listeners() {
            return;
        }
        let event = ModelEvent::new(EventCategory::ManagementAction, &self.name)
            .with_note(text)
            .with_attribute("Type", action.action_type().name())
            .with_attribute("PlanningUnit", action.planning_unit().get())
            .with_attribute("IsActive", action.is_active());
        self.events.fire(&event);
    }

    fn fire_decision_variable(&self, variable: &dyn UndoableDecisionVariable, note: Option<&str>) {
        let mut event = ModelEvent::new(EventCategory::DecisionVariable, &self.name)
            .with_attribute("Name", variable.name())
            .with_attribute("Value", variable.value());
        if let Some(note) = note {
            event = event.with_note(note);
        }
        self.events.fire(&event);
    }

    pub(super) fn revert_outstanding_change(&mut self, caller: &'static str) {
        if self.change == ChangeState::Pending {
            warn!(
                event = "pending_change_replaced",
                model = %self.name,
                caller,
                "a pending change was neither accepted nor reverted; reverting it"
            );
            self.revert_change();
        }
    }

    pub(crate) fn log_summary(&self) {
        info!(
            event = "model_built",
            model = %self.name,
            planning_units = self.planning_units.len(),
            actions = self.actions.len(),
            variables = self.variables.len(),
        );
    }
}
