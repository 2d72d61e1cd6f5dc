//! Shift management pages.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use tracing::instrument;

use shift_planner_core::validation::MAX_REQUIRED_EMPLOYEES;
use shift_planner_core::{Shift, ShiftDraft, ShiftId};

use super::{Flash, redirect_error, redirect_notice, render};
use crate::db::{RepositoryError, ShiftRepository};
use crate::state::AppState;

const PATH: &str = "/shifts";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(PATH, get(index).post(create))
        .route("/shifts/{id}", post(update))
        .route("/shifts/{id}/delete", post(deactivate))
}

/// Shift row for templates.
#[derive(Debug, Clone)]
pub struct ShiftView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub window: String,
    pub required_employees: u32,
    pub active: bool,
}

impl From<&Shift> for ShiftView {
    fn from(shift: &Shift) -> Self {
        let time = |t: Option<shift_planner_core::TimeOfDay>| t.map(|t| t.to_string()).unwrap_or_default();
        Self {
            id: shift.id.as_i32(),
            name: shift.name.clone(),
            description: shift.description.clone().unwrap_or_default(),
            start_time: time(shift.window.start),
            end_time: time(shift.window.end),
            window: shift.window.label(),
            required_employees: shift.required_employees,
            active: shift.active,
        }
    }
}

#[derive(Template)]
#[template(path = "shifts/index.html")]
pub struct ShiftsTemplate {
    pub current_path: String,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub shifts: Vec<ShiftView>,
    pub max_required: u32,
}

/// Shift list page with the create form.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(flash): Query<Flash>) -> Html<String> {
    let mut error = flash.error;
    let shifts = match ShiftRepository::new(state.pool()).list_all().await {
        Ok(shifts) => shifts.iter().map(ShiftView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch shifts: {e}");
            error.get_or_insert_with(|| "Could not load shifts".to_string());
            vec![]
        }
    };

    let template = ShiftsTemplate {
        current_path: PATH.to_string(),
        notice: flash.notice,
        error,
        shifts,
        max_required: MAX_REQUIRED_EMPLOYEES,
    };

    render(&template)
}

fn failure_message(action: &str, err: &RepositoryError) -> String {
    match err {
        RepositoryError::Conflict(msg) => msg.clone(),
        RepositoryError::NotFound => "Shift not found".to_string(),
        other => {
            tracing::error!("Failed to {action} shift: {other}");
            format!("Could not {action} shift")
        }
    }
}

/// Create a shift from the form.
#[instrument(skip(state, draft))]
pub async fn create(State(state): State<AppState>, Form(draft): Form<ShiftDraft>) -> Redirect {
    let input = match draft.validate() {
        Ok(input) => input,
        Err(errors) => return redirect_error(PATH, &errors.to_string()),
    };

    match ShiftRepository::new(state.pool()).create(&input).await {
        Ok(shift) => {
            tracing::info!(shift_id = %shift.id, "Shift created");
            redirect_notice(PATH, &format!("Added {}", shift.name))
        }
        Err(e) => redirect_error(PATH, &failure_message("create", &e)),
    }
}

/// Update a shift from the inline edit form.
#[instrument(skip(state, draft))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(draft): Form<ShiftDraft>,
) -> Redirect {
    let input = match draft.validate() {
        Ok(input) => input,
        Err(errors) => return redirect_error(PATH, &errors.to_string()),
    };

    match ShiftRepository::new(state.pool())
        .update(ShiftId::new(id), &input)
        .await
    {
        Ok(shift) => redirect_notice(PATH, &format!("Updated {}", shift.name)),
        Err(e) => redirect_error(PATH, &failure_message("update", &e)),
    }
}

/// Soft delete: the shift leaves the grid and auto-assign.
#[instrument(skip(state))]
pub async fn deactivate(State(state): State<AppState>, Path(id): Path<i32>) -> Redirect {
    match ShiftRepository::new(state.pool())
        .deactivate(ShiftId::new(id))
        .await
    {
        Ok(()) => redirect_notice(PATH, "Shift deactivated"),
        Err(e) => redirect_error(PATH, &failure_message("deactivate", &e)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use shift_planner_core::{ShiftWindow, TimeOfDay};

    use super::*;

    #[test]
    fn test_view_formats_window() {
        let shift = Shift {
            id: ShiftId::new(2),
            name: "Ca Chiều".to_string(),
            description: None,
            window: ShiftWindow::new(TimeOfDay::parse("13:00").ok(), TimeOfDay::parse("17:00").ok()),
            required_employees: 2,
            active: true,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        };

        let view = ShiftView::from(&shift);
        assert_eq!(view.start_time, "13:00");
        assert_eq!(view.end_time, "17:00");
        assert_eq!(view.window, "13:00 - 17:00");
        assert_eq!(view.description, "");
    }
}
