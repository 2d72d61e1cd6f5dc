//! Employee management pages.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use shift_planner_core::{Employee, EmployeeDraft, EmployeeId, EmployeeInput};

use super::{Flash, redirect_error, redirect_notice, render};
use crate::db::{EmployeeRepository, RepositoryError};
use crate::state::AppState;

const PATH: &str = "/employees";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(PATH, get(index).post(create))
        .route("/employees/{id}", post(update))
        .route("/employees/{id}/delete", post(deactivate))
}

/// Employee row for templates.
#[derive(Debug, Clone)]
pub struct EmployeeView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub active: bool,
}

impl From<&Employee> for EmployeeView {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.as_i32(),
            name: employee.name.clone(),
            email: employee
                .email
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            phone: employee
                .phone
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            position: employee.position.clone().unwrap_or_default(),
            active: employee.active,
        }
    }
}

#[derive(Template)]
#[template(path = "employees/index.html")]
pub struct EmployeesTemplate {
    pub current_path: String,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub search: String,
    pub employees: Vec<EmployeeView>,
    pub active_count: i64,
}

/// `?q=` name filter for the list page.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeSearch {
    pub q: Option<String>,
}

impl EmployeeSearch {
    /// The trimmed search prefix, or `None` when the box is empty.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Employee list page with the create form.
///
/// With `?q=` the list narrows to active employees whose name starts with it.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
    Query(search): Query<EmployeeSearch>,
) -> Html<String> {
    let repo = EmployeeRepository::new(state.pool());
    let listing = async {
        match search.term() {
            Some(prefix) => repo.search_by_name(prefix).await,
            None => repo.list_all().await,
        }
    };

    let mut error = flash.error;
    let (employees, active_count): (Vec<EmployeeView>, i64) = match tokio::try_join!(listing, repo.count_active()) {
        Ok((employees, count)) => (employees.iter().map(EmployeeView::from).collect(), count),
        Err(e) => {
            tracing::error!("Failed to fetch employees: {e}");
            error.get_or_insert_with(|| "Could not load employees".to_string());
            (vec![], 0)
        }
    };

    let template = EmployeesTemplate {
        current_path: PATH.to_string(),
        notice: flash.notice,
        error,
        search: search.term().unwrap_or_default().to_string(),
        active_count,
        employees,
    };

    render(&template)
}

/// Reject an email another employee already uses.
async fn ensure_email_free(
    repo: &EmployeeRepository<'_>,
    input: &EmployeeInput,
    exclude: Option<EmployeeId>,
) -> Result<(), RepositoryError> {
    if let Some(email) = &input.email
        && repo.email_exists(email, exclude).await?
    {
        return Err(RepositoryError::Conflict(format!(
            "Email {email} is already used by another employee"
        )));
    }
    Ok(())
}

fn failure_message(action: &str, err: &RepositoryError) -> String {
    match err {
        RepositoryError::Conflict(msg) => msg.clone(),
        RepositoryError::NotFound => "Employee not found".to_string(),
        other => {
            tracing::error!("Failed to {action} employee: {other}");
            format!("Could not {action} employee")
        }
    }
}

/// Create an employee from the form.
#[instrument(skip(state, draft))]
pub async fn create(State(state): State<AppState>, Form(draft): Form<EmployeeDraft>) -> Redirect {
    let input = match draft.validate() {
        Ok(input) => input,
        Err(errors) => return redirect_error(PATH, &errors.to_string()),
    };

    let repo = EmployeeRepository::new(state.pool());
    let result = async {
        ensure_email_free(&repo, &input, None).await?;
        repo.create(&input).await
    }
    .await;

    match result {
        Ok(employee) => {
            tracing::info!(employee_id = %employee.id, "Employee created");
            redirect_notice(PATH, &format!("Added {}", employee.name))
        }
        Err(e) => redirect_error(PATH, &failure_message("create", &e)),
    }
}

/// Update an employee from the inline edit form.
#[instrument(skip(state, draft))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(draft): Form<EmployeeDraft>,
) -> Redirect {
    let input = match draft.validate() {
        Ok(input) => input,
        Err(errors) => return redirect_error(PATH, &errors.to_string()),
    };

    let id = EmployeeId::new(id);
    let repo = EmployeeRepository::new(state.pool());
    let result = async {
        ensure_email_free(&repo, &input, Some(id)).await?;
        repo.update(id, &input).await
    }
    .await;

    match result {
        Ok(employee) => redirect_notice(PATH, &format!("Updated {}", employee.name)),
        Err(e) => redirect_error(PATH, &failure_message("update", &e)),
    }
}

/// Soft delete: the employee disappears from the schedule and auto-assign.
#[instrument(skip(state))]
pub async fn deactivate(State(state): State<AppState>, Path(id): Path<i32>) -> Redirect {
    match EmployeeRepository::new(state.pool())
        .deactivate(EmployeeId::new(id))
        .await
    {
        Ok(()) => redirect_notice(PATH, "Employee deactivated"),
        Err(e) => redirect_error(PATH, &failure_message("deactivate", &e)),
    }
}
