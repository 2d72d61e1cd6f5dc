//! Assignment API handlers.
//!
//! ```text
//! GET    /api/assignments?start&end          - Every assignment in range
//! DELETE /api/assignments?start&end          - Hard delete the range
//! POST   /api/assignments                    - Create
//! GET    /api/assignments/{id}               - Fetch one
//! PATCH  /api/assignments/{id}               - Partial update
//! DELETE /api/assignments/{id}               - Hard delete
//! POST   /api/assignments/{id}/cancel        - Soft delete
//! GET    /api/assignments/on/{date}          - Live assignments on a day
//! GET    /api/employees/{id}/assignments     - Live assignments for an employee
//! GET    /api/shifts/{id}/assignments        - Live assignments for a shift
//! ```

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shift_planner_core::schedule::DateRange;
use shift_planner_core::{
    Assignment, AssignmentId, AssignmentPatch, EmployeeId, NewAssignment, ShiftId,
};

use crate::db::{AssignmentRepository, RepositoryError};
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/assignments",
            get(list_in_range).post(create).delete(delete_range),
        )
        .route(
            "/api/assignments/{id}",
            get(show).patch(update).delete(delete_one),
        )
        .route("/api/assignments/{id}/cancel", post(cancel))
        .route("/api/assignments/on/{date}", get(on_date))
        .route("/api/employees/{id}/assignments", get(for_employee))
        .route("/api/shifts/{id}/assignments", get(for_shift))
}

/// Inclusive `start`/`end` query, both `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TryFrom<RangeQuery> for DateRange {
    type Error = AppError;

    fn try_from(query: RangeQuery) -> Result<Self, Self::Error> {
        Ok(Self::new(query.start, query.end)?)
    }
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub removed: u64,
}

fn not_found(id: AssignmentId) -> AppError {
    AppError::NotFound(format!("assignment {id}"))
}

fn or_not_found(id: AssignmentId) -> impl FnOnce(RepositoryError) -> AppError {
    move |e| match e {
        RepositoryError::NotFound => not_found(id),
        other => other.into(),
    }
}

/// List every assignment in the range, soft-deleted ones included.
#[instrument(skip(state))]
pub async fn list_in_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let range = DateRange::try_from(query)?;
    let assignments = AssignmentRepository::new(state.pool())
        .list_in_range(range)
        .await?;
    Ok(Json(assignments))
}

/// Hard delete every assignment in the range.
#[instrument(skip(state))]
pub async fn delete_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<RemovedResponse>, AppError> {
    let range = DateRange::try_from(query)?;
    let removed = state.scheduling().clear_range(range).await?;
    Ok(Json(RemovedResponse { removed }))
}

#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewAssignment>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let assignment = AssignmentRepository::new(state.pool()).create(&new).await?;
    tracing::info!(assignment_id = %assignment.id, "Assignment created");
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Assignment>, AppError> {
    let id = AssignmentId::new(id);
    AssignmentRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<AssignmentPatch>,
) -> Result<Json<Assignment>, AppError> {
    let id = AssignmentId::new(id);
    let assignment = AssignmentRepository::new(state.pool())
        .update(id, &patch)
        .await
        .map_err(or_not_found(id))?;
    Ok(Json(assignment))
}

/// Soft delete: status becomes `deleted` and the grid stops showing it.
#[instrument(skip(state))]
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Assignment>, AppError> {
    let id = AssignmentId::new(id);
    let assignment = AssignmentRepository::new(state.pool())
        .cancel(id)
        .await
        .map_err(or_not_found(id))?;
    Ok(Json(assignment))
}

#[instrument(skip(state))]
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let id = AssignmentId::new(id);
    AssignmentRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(or_not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn on_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    Ok(Json(AssignmentRepository::new(state.pool()).list_on(date).await?))
}

#[instrument(skip(state))]
pub async fn for_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let range = DateRange::try_from(query)?;
    let assignments = AssignmentRepository::new(state.pool())
        .list_for_employee(EmployeeId::new(id), range)
        .await?;
    Ok(Json(assignments))
}

#[instrument(skip(state))]
pub async fn for_shift(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let range = DateRange::try_from(query)?;
    let assignments = AssignmentRepository::new(state.pool())
        .list_for_shift(ShiftId::new(id), range)
        .await?;
    Ok(Json(assignments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_query_rejects_inverted() {
        let query = RangeQuery {
            start: NaiveDate::from_ymd_opt(2024, 5, 31).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default(),
        };
        assert!(matches!(DateRange::try_from(query), Err(AppError::BadRequest(_))));
    }
}
