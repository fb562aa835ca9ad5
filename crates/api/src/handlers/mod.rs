pub mod attendance;
pub mod questions;
pub mod users;
