use std::sync::Arc;

use cadence_core::calendar::DayReference;
use cadence_core::clock::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cadence_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Injectable time source; tests swap in a manual clock.
    pub clock: Arc<dyn Clock>,
    /// Reference time zone for calendar-day boundaries.
    pub day_ref: DayReference,
}
