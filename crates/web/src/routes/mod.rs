//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Redirect to /schedule
//!
//! # Schedule
//! GET  /schedule?month=YYYY-MM        - Month grid
//! POST /schedule/auto-assign          - Replace the month with a round-robin plan
//! POST /schedule/clear                - Remove every assignment in the month
//!
//! # Employees
//! GET  /employees                     - List + create form
//! POST /employees                     - Create
//! POST /employees/{id}                - Update
//! POST /employees/{id}/delete         - Deactivate
//!
//! # Shifts
//! GET  /shifts, POST /shifts, POST /shifts/{id}, POST /shifts/{id}/delete
//!
//! # JSON API
//! /api/assignments...                 - See `api::assignments`
//! ```
//!
//! Form handlers answer with a redirect carrying a `notice` or `error` query
//! parameter, which the target page shows as a banner.

pub mod api;
pub mod employees;
pub mod schedule;
pub mod shifts;

use askama::Template;
use axum::{
    Router,
    response::{Html, Redirect},
    routing::get,
};
use serde::Deserialize;

use crate::state::AppState;

/// Build the complete page and API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/schedule") }))
        .merge(schedule::router())
        .merge(employees::router())
        .merge(shifts::router())
        .merge(api::router())
}

/// Banner parameters carried across a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Redirect to `path` with a success banner.
pub(crate) fn redirect_notice(path: &str, message: &str) -> Redirect {
    redirect_with(path, "notice", message)
}

/// Redirect to `path` with an error banner.
pub(crate) fn redirect_error(path: &str, message: &str) -> Redirect {
    redirect_with(path, "error", message)
}

fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!(
        "{path}{separator}{key}={}",
        urlencoding::encode(message)
    ))
}

/// Render a template, falling back to a plain error page.
pub(crate) fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    fn location(redirect: Redirect) -> String {
        redirect
            .into_response()
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_redirect_encodes_message() {
        assert_eq!(
            location(redirect_notice("/employees", "Saved An & Binh")),
            "/employees?notice=Saved%20An%20%26%20Binh"
        );
    }

    #[test]
    fn test_redirect_appends_to_existing_query() {
        assert_eq!(
            location(redirect_error("/schedule?month=2024-05", "nope")),
            "/schedule?month=2024-05&error=nope"
        );
    }
}
