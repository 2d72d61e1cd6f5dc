//! Month grid page and the destructive month actions.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::instrument;

use shift_planner_core::schedule::{DoubleBooking, ScheduleGrid, calendar};

use super::{redirect_error, redirect_notice, render};
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(index))
        .route("/schedule/auto-assign", post(auto_assign))
        .route("/schedule/clear", post(clear))
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub month: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Form posted by the auto-assign and clear buttons.
#[derive(Debug, Deserialize)]
pub struct MonthAction {
    pub month: String,
    pub confirm: Option<String>,
}

impl MonthAction {
    fn confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("yes")
    }
}

/// Double booking row for the template.
#[derive(Debug, Clone)]
pub struct DoubleBookingView {
    pub date: String,
    pub employee: String,
    pub shifts: usize,
}

#[derive(Template)]
#[template(path = "schedule/index.html")]
pub struct ScheduleTemplate {
    pub current_path: String,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub month_key: String,
    pub month_title: String,
    pub prev_key: String,
    pub next_key: String,
    pub grid: ScheduleGrid,
    pub double_bookings: Vec<DoubleBookingView>,
    pub employee_count: usize,
    pub shift_count: usize,
}

fn this_month() -> NaiveDate {
    calendar::first_of_month(Local::now().date_naive())
}

fn month_path(anchor: NaiveDate) -> String {
    format!("/schedule?month={}", calendar::format_month(anchor))
}

fn double_booking_view(booking: &DoubleBooking, grid: &ScheduleGrid) -> DoubleBookingView {
    let employee = grid
        .cells()
        .flat_map(|c| c.employees.iter())
        .find(|e| e.id == booking.employee_id)
        .map_or_else(|| format!("#{}", booking.employee_id), |e| e.name.clone());
    DoubleBookingView {
        date: calendar::format_display(booking.date).label,
        employee,
        shifts: booking.shift_ids.len(),
    }
}

/// Month grid page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Html<String>, AppError> {
    let anchor = match query.month.as_deref().filter(|m| !m.is_empty()) {
        Some(key) => calendar::parse_month(key)?,
        None => this_month(),
    };

    let mut error = query.error;
    let (grid, double_bookings, employee_count, shift_count) =
        match state.scheduling().month_schedule(anchor).await {
            Ok(month) => {
                let bookings = month
                    .double_bookings
                    .iter()
                    .map(|b| double_booking_view(b, &month.grid))
                    .collect();
                (month.grid, bookings, month.employee_count, month.shift_count)
            }
            Err(e) => {
                tracing::error!("Failed to load schedule: {e}");
                error.get_or_insert_with(|| "Could not load the schedule".to_string());
                (
                    shift_planner_core::schedule::build_grid(anchor, &[], &[], &[]),
                    Vec::new(),
                    0,
                    0,
                )
            }
        };

    let template = ScheduleTemplate {
        current_path: "/schedule".to_string(),
        notice: query.notice,
        error,
        month_key: calendar::format_month(anchor),
        month_title: anchor.format("%m/%Y").to_string(),
        prev_key: calendar::format_month(calendar::shift_month(anchor, -1)?),
        next_key: calendar::format_month(calendar::shift_month(anchor, 1)?),
        grid,
        double_bookings,
        employee_count,
        shift_count,
    };

    Ok(render(&template))
}

/// Replace the month's assignments with a round-robin plan.
#[instrument(skip(state))]
pub async fn auto_assign(
    State(state): State<AppState>,
    Form(form): Form<MonthAction>,
) -> Result<Redirect, AppError> {
    let anchor = calendar::parse_month(&form.month)?;
    let back = month_path(anchor);

    if !form.confirmed() {
        return Ok(redirect_error(
            &back,
            "Auto-assign replaces every assignment in the month; confirm to continue",
        ));
    }

    match state.scheduling().auto_assign(anchor).await {
        Ok(report) if report.is_complete() => Ok(redirect_notice(&back, &report.summary())),
        Ok(report) => Ok(redirect_error(&back, &report.summary())),
        Err(e) => {
            tracing::error!("Auto-assign failed: {e}");
            Ok(redirect_error(&back, "Auto-assign failed"))
        }
    }
}

/// Remove every assignment in the month.
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    Form(form): Form<MonthAction>,
) -> Result<Redirect, AppError> {
    let anchor = calendar::parse_month(&form.month)?;
    let back = month_path(anchor);

    if !form.confirmed() {
        return Ok(redirect_error(
            &back,
            "Clearing removes every assignment in the month; confirm to continue",
        ));
    }

    match state
        .scheduling()
        .clear_range(calendar::month_range(anchor))
        .await
    {
        Ok(removed) => Ok(redirect_notice(
            &back,
            &format!("Removed {removed} assignments"),
        )),
        Err(e) => {
            tracing::error!("Clear failed: {e}");
            Ok(redirect_error(&back, "Could not clear the month"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_action_requires_literal_yes() {
        let form = |confirm: Option<&str>| MonthAction {
            month: "2024-05".to_string(),
            confirm: confirm.map(str::to_string),
        };
        assert!(form(Some("yes")).confirmed());
        assert!(!form(Some("on")).confirmed());
        assert!(!form(None).confirmed());
    }

    #[test]
    fn test_month_path() {
        let anchor = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap_or_default();
        assert_eq!(month_path(anchor), "/schedule?month=2024-05");
    }
}
