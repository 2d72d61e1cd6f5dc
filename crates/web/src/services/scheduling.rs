//! Month scheduling: laying out the grid and auto-filling it.
//!
//! Auto-assign runs in four steps:
//! 1. Load the active employees and shifts
//! 2. Hard delete every assignment in the month
//! 3. Plan round-robin assignments for every (shift, day) slot
//! 4. Create the planned records concurrently and count the outcomes
//!
//! Nothing is rolled back when some creates fail; the report says how many.

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use shift_planner_core::schedule::{
    self, DateRange, DoubleBooking, ScheduleGrid, calendar, find_double_bookings, resolve_or_drop,
};

use crate::db::RepositoryError;
use crate::store::RosterStore;

/// Outcome of one auto-assign run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoAssignReport {
    /// First day of the month that was filled.
    pub month: NaiveDate,
    /// Existing assignments removed before planning.
    pub cleared: u64,
    pub planned: usize,
    pub created: usize,
    pub failed: usize,
}

impl AutoAssignReport {
    /// Whether every planned record was created.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed == 0
    }

    /// One-line summary for banners and CLI output.
    #[must_use]
    pub fn summary(&self) -> String {
        let month = calendar::format_month(self.month);
        if self.is_complete() {
            format!(
                "Auto-assigned {} shifts for {month} (replaced {})",
                self.created, self.cleared
            )
        } else {
            format!(
                "Auto-assigned {} of {} shifts for {month}; {} failed (replaced {})",
                self.created, self.planned, self.failed, self.cleared
            )
        }
    }
}

/// A month's grid plus the double bookings inside it.
#[derive(Debug, Clone, Serialize)]
pub struct MonthSchedule {
    pub range: DateRange,
    pub grid: ScheduleGrid,
    pub double_bookings: Vec<DoubleBooking>,
    pub employee_count: usize,
    pub shift_count: usize,
}

/// Scheduling operations over any [`RosterStore`].
pub struct SchedulingService<S> {
    store: S,
}

impl<S: RosterStore> SchedulingService<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Build the grid for the month containing `anchor`.
    ///
    /// Cells resolve against active employees only, so assignments held by
    /// deactivated employees drop out of the view. Double bookings are found
    /// over the same visible assignments.
    ///
    /// # Errors
    ///
    /// Returns the first repository error hit while loading.
    #[instrument(skip(self), fields(month = %calendar::format_month(anchor)))]
    pub async fn month_schedule(&self, anchor: NaiveDate) -> Result<MonthSchedule, RepositoryError> {
        let range = calendar::month_range(anchor);
        let (employees, shifts, assignments) = futures::try_join!(
            self.store.active_employees(),
            self.store.active_shifts(),
            self.store.assignments_between(range),
        )?;

        let grid = schedule::build_grid(anchor, &shifts, &employees, &assignments);
        let visible: Vec<_> = assignments
            .into_iter()
            .filter(|a| {
                resolve_or_drop(&employees, a.employee_id).is_some()
                    && shifts.iter().any(|s| s.id == a.shift_id)
            })
            .collect();
        let double_bookings = find_double_bookings(&visible);

        Ok(MonthSchedule {
            range,
            grid,
            double_bookings,
            employee_count: employees.len(),
            shift_count: shifts.len(),
        })
    }

    /// Replace the month containing `anchor` with a fresh round-robin plan.
    ///
    /// The caller is responsible for confirming the destructive intent.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or clearing fails. Failed creates are
    /// counted in the report instead.
    #[instrument(
        skip(self),
        fields(run_id = %Uuid::new_v4(), month = %calendar::format_month(anchor))
    )]
    pub async fn auto_assign(&self, anchor: NaiveDate) -> Result<AutoAssignReport, RepositoryError> {
        let range = calendar::month_range(anchor);

        let (employees, shifts) =
            futures::try_join!(self.store.active_employees(), self.store.active_shifts())?;

        let cleared = self.store.delete_assignments_between(range).await?;
        info!(cleared, "Cleared month before auto-assign");

        let plan = schedule::plan_month(anchor, &employees, &shifts);
        if employees.is_empty() {
            warn!("No active employees; nothing to assign");
        }

        let results = join_all(
            plan.assignments
                .iter()
                .map(|record| self.store.create_assignment(record)),
        )
        .await;

        let mut created = 0;
        let mut failed = 0;
        for (record, result) in plan.assignments.iter().zip(results) {
            match result {
                Ok(_) => created += 1,
                Err(e) => {
                    failed += 1;
                    warn!(
                        error = %e,
                        employee_id = %record.employee_id,
                        shift_id = %record.shift_id,
                        date = %record.date,
                        "Failed to create assignment"
                    );
                }
            }
        }

        let report = AutoAssignReport {
            month: range.start,
            cleared,
            planned: plan.len(),
            created,
            failed,
        };
        info!(
            planned = report.planned,
            created = report.created,
            failed = report.failed,
            "Auto-assign finished"
        );

        Ok(report)
    }

    /// Hard delete every assignment in `range`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(start = %range.start, end = %range.end))]
    pub async fn clear_range(&self, range: DateRange) -> Result<u64, RepositoryError> {
        let removed = self.store.delete_assignments_between(range).await?;
        info!(removed, "Cleared assignments");
        Ok(removed)
    }
}
