use std::collections::BTreeMap;

use crate::action::{ActionType, ManagementAction};

/// Where one side of an action's effect comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Magnitude {
    /// Read from the named attribute of the action.
    Attribute(String),
    /// A fixed value, the same for every action of the type.
    Constant(f64),
}

impl Magnitude {
    pub fn attribute(name: impl Into<String>) -> Self {
        Magnitude::Attribute(name.into())
    }

    pub fn resolve(&self, action: &ManagementAction) -> f64 {
        match self {
            Magnitude::Attribute(name) => action.required_attribute(name),
            Magnitude::Constant(value) => *value,
        }
    }
}

/// The value a variable contributes for an action's planning unit with the
/// action inactive (`original`) and active (`actioned`).
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeRule {
    pub original: Magnitude,
    pub actioned: Magnitude,
}

impl MagnitudeRule {
    pub fn new(original: Magnitude, actioned: Magnitude) -> Self {
        Self { original, actioned }
    }

    /// Original and actioned values both read from attributes.
    pub fn attributes(original: impl Into<String>, actioned: impl Into<String>) -> Self {
        Self::new(Magnitude::attribute(original), Magnitude::attribute(actioned))
    }

    /// Zero when inactive, the named attribute when active. Suits costs.
    pub fn cost(attribute: impl Into<String>) -> Self {
        Self::new(Magnitude::Constant(0.0), Magnitude::attribute(attribute))
    }

    /// The action has no effect on the variable.
    pub fn unaffected() -> Self {
        Self::new(Magnitude::Constant(0.0), Magnitude::Constant(0.0))
    }

    /// Change from the action's previous state to its current one.
    pub fn change_for(&self, action: &ManagementAction) -> f64 {
        let original = self.original.resolve(action);
        let actioned = self.actioned.resolve(action);
        if action.is_active() {
            actioned - original
        } else {
            original - actioned
        }
    }
}

/// Per-action-type rules a variable uses to work out its changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MagnitudeRules {
    rules: BTreeMap<ActionType, MagnitudeRule>,
}

impl MagnitudeRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, action_type: ActionType, rule: MagnitudeRule) -> Self {
        self.rules.insert(action_type, rule);
        self
    }

    pub fn rule(&self, action_type: ActionType) -> Option<&MagnitudeRule> {
        self.rules.get(&action_type)
    }

    pub fn handles(&self, action_type: ActionType) -> bool {
        self.rules.contains_key(&action_type)
    }

    pub fn action_types(&self) -> impl Iterator<Item = ActionType> + '_ {
        self.rules.keys().copied()
    }

    /// Change `variable` undergoes from `action`'s latest toggle.
    ///
    /// # Panics
    ///
    /// Panics if no rule covers the action's type: the variable was
    /// subscribed to an action it doesn't understand.
    pub fn change_for(&self, variable: &str, action: &ManagementAction) -> f64 {
        match self.rules.get(&action.action_type()) {
            Some(rule) => rule.change_for(action),
            None => panic!(
                "Unhandled observation of management action type [{}] by decision variable [{}]",
                action.action_type(),
                variable
            ),
        }
    }
}
