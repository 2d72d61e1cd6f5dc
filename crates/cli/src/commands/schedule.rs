//! Month scheduling from the terminal.
//!
//! ```bash
//! sp-cli schedule show --month 2024-05
//! sp-cli schedule auto-assign --month 2024-05 --yes
//! sp-cli schedule clear --start 2024-05-01 --end 2024-05-07 --yes
//! ```

use chrono::NaiveDate;
use tracing::{info, warn};

use shift_planner_core::schedule::{DateRange, ScheduleGrid, WeekBlock, calendar};
use shift_planner_web::services::SchedulingService;
use shift_planner_web::store::PgRosterStore;

use super::connect;

async fn service() -> Result<SchedulingService<PgRosterStore>, Box<dyn std::error::Error>> {
    Ok(SchedulingService::new(PgRosterStore::new(connect().await?)))
}

fn require_confirmation(confirmed: bool, action: &str) -> Result<(), Box<dyn std::error::Error>> {
    if confirmed {
        Ok(())
    } else {
        Err(format!("Refusing to {action} without --yes").into())
    }
}

/// One text line per row of a week: the day header, then each shift.
fn week_lines(week: &WeekBlock) -> Vec<String> {
    let header = week
        .days
        .iter()
        .map(|day| format!("{} {}", day.label.weekday, day.label.label))
        .collect::<Vec<_>>()
        .join(" | ");

    let mut lines = vec![header];
    lines.extend(week.rows.iter().map(|row| {
        let cells = row
            .cells
            .iter()
            .map(|cell| {
                let names = cell
                    .employees
                    .iter()
                    .map(|e| e.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}] {names}", cell.staffing.as_str())
            })
            .collect::<Vec<_>>()
            .join(" | ");
        format!("{} ({}, {}): {cells}", row.name, row.window, row.required)
    }));
    lines
}

/// Render a grid as plain text lines, one block per week.
#[must_use]
pub fn grid_lines(grid: &ScheduleGrid) -> Vec<String> {
    grid.weeks
        .iter()
        .enumerate()
        .flat_map(|(i, week)| {
            let mut lines = vec![format!("Week {}", i + 1)];
            lines.extend(week_lines(week));
            lines
        })
        .collect()
}

/// Log the grid for the month containing `anchor`.
///
/// # Errors
///
/// Returns an error if the connection or any load fails.
pub async fn show(anchor: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let schedule = service().await?.month_schedule(anchor).await?;

    info!(
        month = %calendar::format_month(anchor),
        employees = schedule.employee_count,
        shifts = schedule.shift_count,
        "Month schedule"
    );
    for line in grid_lines(&schedule.grid) {
        info!("{line}");
    }
    for booking in &schedule.double_bookings {
        warn!(
            employee_id = %booking.employee_id,
            date = %calendar::format_key(booking.date),
            shifts = booking.shift_ids.len(),
            "Double booking"
        );
    }
    Ok(())
}

/// Replace the month containing `anchor` with a round-robin plan.
///
/// # Errors
///
/// Returns an error without `--yes`, or if loading or clearing fails.
pub async fn auto_assign(anchor: NaiveDate, confirmed: bool) -> Result<(), Box<dyn std::error::Error>> {
    require_confirmation(confirmed, "replace every assignment in the month")?;

    let report = service().await?.auto_assign(anchor).await?;
    if report.is_complete() {
        info!("{}", report.summary());
    } else {
        warn!("{}", report.summary());
    }
    Ok(())
}

/// Hard delete every assignment in `[start, end]`.
///
/// # Errors
///
/// Returns an error without `--yes`, for an inverted range, or if the delete fails.
pub async fn clear(
    start: NaiveDate,
    end: NaiveDate,
    confirmed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let range = DateRange::new(start, end)?;
    require_confirmation(confirmed, "delete assignments")?;

    let removed = service().await?.clear_range(range).await?;
    info!(
        start = %calendar::format_key(start),
        end = %calendar::format_key(end),
        removed,
        "Assignments cleared"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_lines_without_shifts_show_day_headers() {
        let anchor = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let grid = shift_planner_core::schedule::build_grid(anchor, &[], &[], &[]);

        let lines = grid_lines(&grid);

        assert_eq!(lines[0], "Week 1");
        assert!(lines[1].starts_with("T5 01/02"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("Week")).count(), 5);
    }

    #[test]
    fn test_confirmation_required() {
        assert!(require_confirmation(false, "clear").is_err());
        assert!(require_confirmation(true, "clear").is_ok());
    }
}
