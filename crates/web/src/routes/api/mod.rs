//! JSON API route handlers.

pub mod assignments;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(assignments::router())
}
