//! Pure domain logic for the level-progression engine.
//!
//! This crate has zero internal deps so it can be used by both the
//! API/repository layer and any future CLI or reporting tooling. All date
//! arithmetic is done in a single configurable reference time zone; nothing
//! here touches the system clock or the database directly.

pub mod answer;
pub mod attendance;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod levels;
pub mod progression;
pub mod roles;
pub mod types;
