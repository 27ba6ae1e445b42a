//! Randomised, constraint-aware choice of the initial active actions.
//!
//! Both validated walks start from the extreme that best satisfies their
//! bound (nothing active for cost limits, everything active for load
//! limits) and move towards the other extreme one random action at a time.
//! A move that leaves the model invalid is cancelled on the spot. Changes
//! here bypass the accept/revert protocol: every notification is an
//! initialising one, which commits immediately.

use crem_config::SeedingStrategy;
use crem_core::{CremError, ValidationError};
use thiserror::Error;
use tracing::{error, info};

use super::CoreModel;

/// Seeding could not produce a valid starting state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeedingError {
    #[error(
        "seeding attempt budget of {limit} exhausted with {remaining} candidate actions untried; \
         raise seeding_attempt_limit"
    )]
    BudgetExhausted { limit: usize, remaining: usize },

    #[error("seeding ({strategy}) ended in an invalid state, the configured limit is unreachable: {violations}")]
    UnreachableBound {
        strategy: SeedingStrategy,
        violations: ValidationError,
    },
}

impl From<SeedingError> for CremError {
    fn from(err: SeedingError) -> Self {
        CremError::Seeding(err.to_string())
    }
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedingSummary {
    pub strategy: SeedingStrategy,
    /// Actions tried.
    pub attempts: usize,
    /// Tried actions that were kept.
    pub kept: usize,
    /// Tried actions that were cancelled for invalidating the model.
    pub cancelled: usize,
    /// Active actions once seeding finished.
    pub active: usize,
}

impl SeedingSummary {
    fn new(strategy: SeedingStrategy) -> Self {
        Self {
            strategy,
            attempts: 0,
            kept: 0,
            cancelled: 0,
            active: 0,
        }
    }
}

impl CoreModel {
    /// Seeds the initial active actions with the strategy the model's
    /// parameters call for.
    ///
    /// # Panics
    ///
    /// Panics if seeding fails; see [`try_randomly_initialise_actions`](Self::try_randomly_initialise_actions).
    pub fn randomly_initialise_actions(&mut self) -> SeedingSummary {
        let result = self.try_randomly_initialise_actions();
        self.unwrap_seeding(result)
    }

    pub fn try_randomly_initialise_actions(&mut self) -> Result<SeedingSummary, SeedingError> {
        let strategy = SeedingStrategy::for_parameters(self.parameters());
        let attempt_limit = self
            .parameters()
            .seeding_attempt_limit_for(self.actions.len());
        self.seed(strategy, attempt_limit)
    }

    /// Activates random actions from an all-inactive start while the model
    /// stays valid.
    ///
    /// # Panics
    ///
    /// Panics if the attempt budget runs out or the result is invalid.
    pub fn randomly_validly_activate_actions(&mut self, attempt_limit: usize) -> SeedingSummary {
        let result = self.try_randomly_validly_activate_actions(attempt_limit);
        self.unwrap_seeding(result)
    }

    pub fn try_randomly_validly_activate_actions(
        &mut self,
        attempt_limit: usize,
    ) -> Result<SeedingSummary, SeedingError> {
        self.seed(SeedingStrategy::ActivateFromAllInactive, attempt_limit)
    }

    /// Deactivates random actions from an all-active start while the model
    /// stays valid.
    ///
    /// # Panics
    ///
    /// Panics if the attempt budget runs out or the result is invalid.
    pub fn randomly_validly_deactivate_actions(&mut self, attempt_limit: usize) -> SeedingSummary {
        let result = self.try_randomly_validly_deactivate_actions(attempt_limit);
        self.unwrap_seeding(result)
    }

    pub fn try_randomly_validly_deactivate_actions(
        &mut self,
        attempt_limit: usize,
    ) -> Result<SeedingSummary, SeedingError> {
        self.seed(SeedingStrategy::DeactivateFromAllActive, attempt_limit)
    }

    /// Activates each action on a coin flip, without validation.
    pub fn randomly_initialise_unbounded(&mut self) -> SeedingSummary {
        let result = self.seed(SeedingStrategy::Unbounded, self.actions.len());
        self.unwrap_seeding(result)
    }

    fn seed(
        &mut self,
        strategy: SeedingStrategy,
        attempt_limit: usize,
    ) -> Result<SeedingSummary, SeedingError> {
        self.revert_outstanding_change("seeding");
        info!(
            event = "seeding_start",
            model = %self.name(),
            %strategy,
            attempt_limit,
            actions = self.actions.len(),
        );
        self.note("Starting randomly initialising model actions");

        self.initialising = true;
        let result = match strategy {
            SeedingStrategy::ActivateFromAllInactive => self.validated_walk(strategy, true, attempt_limit),
            SeedingStrategy::DeactivateFromAllActive => self.validated_walk(strategy, false, attempt_limit),
            SeedingStrategy::Unbounded => Ok(self.coin_flip_walk()),
        };
        self.initialising = false;

        if let Ok(summary) = &result {
            info!(
                event = "seeding_end",
                model = %self.name(),
                %strategy,
                attempts = summary.attempts,
                kept = summary.kept,
                cancelled = summary.cancelled,
                active = summary.active,
            );
        }
        self.note("Finished randomly initialising model actions");
        result
    }

    fn validated_walk(
        &mut self,
        strategy: SeedingStrategy,
        activate: bool,
        attempt_limit: usize,
    ) -> Result<SeedingSummary, SeedingError> {
        if activate {
            self.note("Initialising all actions as inactive");
            self.actions.initialise_all_inactive(&mut self.variables);
        } else {
            self.note("Initialising all actions as active");
            self.actions.initialise_all_active(&mut self.variables);
        }

        let mut summary = SeedingSummary::new(strategy);
        let mut candidates: Vec<usize> = (0..self.actions.len()).collect();
        let mut budget = attempt_limit;

        while !candidates.is_empty() {
            if budget == 0 {
                return Err(SeedingError::BudgetExhausted {
                    limit: attempt_limit,
                    remaining: candidates.len(),
                });
            }
            let Some(index) = self.actions.choose_index(&candidates) else {
                break;
            };
            candidates.retain(|candidate| *candidate != index);
            budget -= 1;
            summary.attempts += 1;

            self.set_initialised(index, activate);
            let text = if activate {
                "Randomly activating action"
            } else {
                "Randomly deactivating action"
            };
            self.note_management_action(text, self.actions.last_applied());

            if self.state_is_valid().is_ok() {
                summary.kept += 1;
            } else {
                self.set_initialised(index, !activate);
                self.note_management_action("Action reverted", self.actions.last_applied());
                summary.cancelled += 1;
            }
        }

        self.state_is_valid()
            .map_err(|violations| SeedingError::UnreachableBound {
                strategy,
                violations,
            })?;
        summary.active = self.actions.active_actions().count();
        Ok(summary)
    }

    fn coin_flip_walk(&mut self) -> SeedingSummary {
        let mut summary = SeedingSummary::new(SeedingStrategy::Unbounded);
        self.actions.randomly_initialise(&mut self.variables);
        summary.attempts = self.actions.len();
        summary.active = self.actions.active_actions().count();
        summary.kept = summary.active;
        summary
    }

    fn set_initialised(&mut self, index: usize, active: bool) {
        if active {
            self.actions.initialising_activation(index, &mut self.variables);
        } else {
            self.actions.initialising_deactivation(index, &mut self.variables);
        }
    }

    fn unwrap_seeding(&self, result: Result<SeedingSummary, SeedingError>) -> SeedingSummary {
        match result {
            Ok(summary) => summary,
            Err(err) => {
                error!(
                    event = "seeding_failed",
                    model = %self.name(),
                    limit = ?self.parameters().seeding_attempt_limit,
                    error = %err,
                );
                panic!("fatal seeding error in model [{}]: {}", self.name(), err);
            }
        }
    }
}
