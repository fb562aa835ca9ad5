//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` (+ `Validate`) DTO for the corresponding write path

pub mod attendance;
pub mod level_plan;
pub mod question;
pub mod user;
