//! Assignment repository.
//!
//! Range reads return every status so callers can decide what to show;
//! the per-employee, per-shift and per-date reads skip `deleted` rows.

use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;
use sqlx::PgPool;

use shift_planner_core::schedule::DateRange;
use shift_planner_core::{
    Assignment, AssignmentId, AssignmentPatch, AssignmentStatus, EmployeeId, NewAssignment,
    ShiftId,
};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    id: i32,
    employee_id: i32,
    shift_id: i32,
    date: NaiveDate,
    status: AssignmentStatus,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: AssignmentId::new(row.id),
            employee_id: EmployeeId::new(row.employee_id),
            shift_id: ShiftId::new(row.shift_id),
            date: row.date,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str =
    "id, employee_id, shift_id, date, status, notes, created_at, updated_at";

/// Repository for assignment database operations.
pub struct AssignmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AssignmentRepository<'a> {
    /// Create a new assignment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All assignments dated inside `range` (inclusive), ordered by date,
    /// shift, then insertion.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_in_range(&self, range: DateRange) -> Result<Vec<Assignment>, RepositoryError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(&format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE date BETWEEN $1 AND $2
             ORDER BY date, shift_id, id"
        ))
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Live assignments for one employee inside `range`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_employee(
        &self,
        employee_id: EmployeeId,
        range: DateRange,
    ) -> Result<Vec<Assignment>, RepositoryError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(&format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE employee_id = $1 AND date BETWEEN $2 AND $3 AND status <> 'deleted'
             ORDER BY date, shift_id, id"
        ))
        .bind(employee_id.as_i32())
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Live assignments for one shift inside `range`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shift(
        &self,
        shift_id: ShiftId,
        range: DateRange,
    ) -> Result<Vec<Assignment>, RepositoryError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(&format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE shift_id = $1 AND date BETWEEN $2 AND $3 AND status <> 'deleted'
             ORDER BY date, id"
        ))
        .bind(shift_id.as_i32())
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Live assignments on a single date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_on(&self, date: NaiveDate) -> Result<Vec<Assignment>, RepositoryError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(&format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE date = $1 AND status <> 'deleted'
             ORDER BY shift_id, id"
        ))
        .bind(date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an assignment by ID, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: AssignmentId) -> Result<Option<Assignment>, RepositoryError> {
        let row = sqlx::query_as::<_, AssignmentRow>(&format!(
            "SELECT {COLUMNS} FROM assignments WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Whether `employee_id` holds a live assignment on `date`, optionally on
    /// a specific shift.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        shift_id: Option<ShiftId>,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM assignments
                 WHERE employee_id = $1 AND date = $2 AND status <> 'deleted'
                   AND ($3::INTEGER IS NULL OR shift_id = $3)
             )",
        )
        .bind(employee_id.as_i32())
        .bind(date)
        .bind(shift_id.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert one assignment. Duplicates of an existing (employee, shift,
    /// date) are accepted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewAssignment) -> Result<Assignment, RepositoryError> {
        let row = sqlx::query_as::<_, AssignmentRow>(&format!(
            "INSERT INTO assignments (employee_id, shift_id, date, status, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(new.employee_id.as_i32())
        .bind(new.shift_id.as_i32())
        .bind(new.date)
        .bind(new.status)
        .bind(new.notes.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Insert every record concurrently, reporting each outcome in input order.
    ///
    /// Failures do not roll back the records that succeeded.
    pub async fn create_many(
        &self,
        records: &[NewAssignment],
    ) -> Vec<Result<Assignment, RepositoryError>> {
        join_all(records.iter().map(|record| self.create(record))).await
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no assignment has this ID.
    pub async fn update(
        &self,
        id: AssignmentId,
        patch: &AssignmentPatch,
    ) -> Result<Assignment, RepositoryError> {
        let row = sqlx::query_as::<_, AssignmentRow>(&format!(
            "UPDATE assignments
             SET employee_id = COALESCE($2, employee_id),
                 shift_id = COALESCE($3, shift_id),
                 date = COALESCE($4, date),
                 status = COALESCE($5, status),
                 notes = COALESCE($6, notes),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(patch.employee_id.map(|id| id.as_i32()))
        .bind(patch.shift_id.map(|id| id.as_i32()))
        .bind(patch.date)
        .bind(patch.status)
        .bind(patch.notes.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Soft delete: mark the assignment `deleted`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no assignment has this ID.
    pub async fn cancel(&self, id: AssignmentId) -> Result<Assignment, RepositoryError> {
        self.update(
            id,
            &AssignmentPatch {
                status: Some(AssignmentStatus::Deleted),
                ..AssignmentPatch::default()
            },
        )
        .await
    }

    /// Hard delete one assignment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no assignment has this ID.
    pub async fn delete(&self, id: AssignmentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Hard delete every assignment dated inside `range`, whatever its status.
    /// Returns how many rows were removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_in_range(&self, range: DateRange) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM assignments WHERE date BETWEEN $1 AND $2")
            .bind(range.start)
            .bind(range.end)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
