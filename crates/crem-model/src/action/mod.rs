//! Management actions and the registry that owns them.

mod management_action;
mod registry;
mod types;

#[cfg(test)]
mod tests;

pub use management_action::ManagementAction;
pub use registry::ManagementActions;
pub use types::ActionType;
