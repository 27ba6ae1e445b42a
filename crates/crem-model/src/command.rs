//! Reversible value-change commands.
//!
//! A [`ChangeCommand`] captures one staged change to a value store: the value
//! before the change and the value after it. Applying it writes the "done"
//! value, reverting it writes the "undone" value. Status guards make both
//! operations idempotent, so a command can never be applied twice.

use crem_core::Precision;

/// Outcome of applying or reverting a command, and its resulting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The undone value is in place.
    UnDone,
    /// The done value is in place.
    Done,
    /// Nothing was written. A fresh command reports this as its status until
    /// it is first applied or reverted.
    NoChange,
}

/// Something a command can read a keyed value from and write it back to.
///
/// Scalar stores use `()` as their key; per-planning-unit stores key by
/// planning unit.
pub trait ValueStore<K> {
    fn load(&self, key: &K) -> f64;

    fn store(&mut self, key: &K, value: f64);

    fn precision(&self) -> Precision;

    /// Whether `key` holds a stored value, as opposed to reading as zero.
    fn contains(&self, _key: &K) -> bool {
        true
    }

    /// Forgets the value of `key`.
    fn remove(&mut self, _key: &K) {}
}

/// A staged change of one keyed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeCommand<K> {
    key: K,
    undone_value: f64,
    done_value: f64,
    // Whether the key held a value before staging; undoing restores absence.
    undone_present: bool,
    status: CommandStatus,
}

impl<K> ChangeCommand<K> {
    /// Stages `change` against the current value of `key` in `target`.
    ///
    /// The change is rounded to the store's precision before being added.
    pub fn stage<S>(target: &S, key: K, change: f64) -> Self
    where
        S: ValueStore<K> + ?Sized,
    {
        let precision = target.precision();
        let undone_value = target.load(&key);
        let undone_present = target.contains(&key);
        let done_value = precision.round(undone_value + precision.round(change));
        Self {
            key,
            undone_value,
            done_value,
            undone_present,
            status: CommandStatus::NoChange,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn undone_value(&self) -> f64 {
        self.undone_value
    }

    pub fn done_value(&self) -> f64 {
        self.done_value
    }

    /// `done_value - undone_value`, as staged.
    pub fn change(&self) -> f64 {
        self.done_value - self.undone_value
    }

    pub fn status(&self) -> CommandStatus {
        self.status
    }

    /// True until the command has been either applied or reverted.
    pub fn is_pending(&self) -> bool {
        self.status == CommandStatus::NoChange
    }

    /// Writes the done value while the command is pending.
    ///
    /// A command that was already done or undone writes nothing: a rejected
    /// change is never re-applied.
    pub fn do_change<S>(&mut self, target: &mut S) -> CommandStatus
    where
        S: ValueStore<K> + ?Sized,
    {
        if self.status != CommandStatus::NoChange {
            return CommandStatus::NoChange;
        }
        target.store(&self.key, self.done_value);
        self.status = CommandStatus::Done;
        CommandStatus::Done
    }

    /// Writes the undone value, unless already undone.
    pub fn undo_change<S>(&mut self, target: &mut S) -> CommandStatus
    where
        S: ValueStore<K> + ?Sized,
    {
        if self.status == CommandStatus::UnDone {
            return CommandStatus::NoChange;
        }
        if self.undone_present {
            target.store(&self.key, self.undone_value);
        } else {
            target.remove(&self.key);
        }
        self.status = CommandStatus::UnDone;
        CommandStatus::UnDone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::ScalarValue;

    #[test]
    fn test_stage_rounds_change() {
        let store = ScalarValue::new(10.0, Precision::new(2));
        let command = ChangeCommand::stage(&store, (), 1.23456);

        assert_eq!(command.undone_value(), 10.0);
        assert_eq!(command.done_value(), 11.23);
        assert!(command.is_pending());
    }

    #[test]
    fn test_do_and_undo_are_guarded() {
        let mut store = ScalarValue::new(10.0, Precision::DEFAULT);
        let mut command = ChangeCommand::stage(&store, (), 5.0);

        assert_eq!(command.do_change(&mut store), CommandStatus::Done);
        assert_eq!(store.value(), 15.0);
        assert_eq!(command.do_change(&mut store), CommandStatus::NoChange);
        assert_eq!(store.value(), 15.0);

        assert_eq!(command.undo_change(&mut store), CommandStatus::UnDone);
        assert_eq!(store.value(), 10.0);
        assert_eq!(command.undo_change(&mut store), CommandStatus::NoChange);
        assert_eq!(store.value(), 10.0);
        assert_eq!(command.status(), CommandStatus::UnDone);
    }

    #[test]
    fn test_undone_command_is_not_redone() {
        let mut store = ScalarValue::new(10.0, Precision::DEFAULT);
        let mut command = ChangeCommand::stage(&store, (), 5.0);

        assert_eq!(command.undo_change(&mut store), CommandStatus::UnDone);
        assert_eq!(command.do_change(&mut store), CommandStatus::NoChange);
        assert_eq!(store.value(), 10.0);
        assert_eq!(command.status(), CommandStatus::UnDone);
    }

    #[test]
    fn test_undo_to_missing_unit_removes_it() {
        use crate::variable::PlanningUnitValues;
        use crem_core::PlanningUnitId;

        let mut store = PlanningUnitValues::from_values([(PlanningUnitId(1), 3.0)], Precision::DEFAULT);
        let mut command = ChangeCommand::stage(&store, PlanningUnitId(2), 4.5);

        command.do_change(&mut store);
        assert_eq!(store.get(PlanningUnitId(2)), 4.5);
        assert_eq!(store.total(), 7.5);

        command.undo_change(&mut store);
        assert!(!store.contains(PlanningUnitId(2)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.total(), 3.0);
    }

    #[test]
    fn test_undo_of_fresh_command_restores_staged_value() {
        let mut store = ScalarValue::new(4.0, Precision::DEFAULT);
        let mut command = ChangeCommand::stage(&store, (), -1.5);

        assert_eq!(command.undo_change(&mut store), CommandStatus::UnDone);
        assert_eq!(store.value(), 4.0);
        assert_eq!(command.change(), -1.5);
    }
}
