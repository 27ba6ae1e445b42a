//! Core types for crem
//!
//! This crate provides the leaf vocabulary shared by the engine:
//! - Planning unit identities
//! - Numeric precision and rounding
//! - Units of measure
//! - Error types, including composite constraint errors
//! - Structured model events and their listeners

pub mod error;
pub mod event;
pub mod planning_unit;
pub mod precision;
pub mod unit;

pub use error::{BoundDirection, BoundViolation, CremError, Result, ValidationError};
pub use event::{
    AttributeValue, CountingEventListener, EventCategory, LoggingEventListener, ModelEvent,
    ModelEventListener, ModelEventSupport, RecordingEventListener,
};
pub use planning_unit::PlanningUnitId;
pub use precision::{round_to_precision, Precision};
pub use unit::UnitOfMeasure;
