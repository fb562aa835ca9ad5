//! Well-known role name constants.
//!
//! These must match the `role` values stored in the `users` table.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
