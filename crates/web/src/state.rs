//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::SchedulingService;
use crate::store::PgRosterStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool }),
        }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Scheduling service over this state's pool.
    #[must_use]
    pub fn scheduling(&self) -> SchedulingService<PgRosterStore> {
        SchedulingService::new(PgRosterStore::new(self.inner.pool.clone()))
    }
}
