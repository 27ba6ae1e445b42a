//! The core model: actions and variables wired together, plus seeding and
//! parallel chains.

mod chains;
mod core;
mod seeding;


pub use self::core::CoreModel;
pub use seeding::{SeedingError, SeedingSummary};
