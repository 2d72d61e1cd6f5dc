//! Shift repository.

use chrono::{DateTime, NaiveTime, Utc};
use sqlx::PgPool;

use shift_planner_core::{Shift, ShiftId, ShiftInput, ShiftWindow, TimeOfDay};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct ShiftRow {
    id: i32,
    name: String,
    description: Option<String>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    required_employees: i32,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ShiftRow> for Shift {
    type Error = RepositoryError;

    fn try_from(row: ShiftRow) -> Result<Self, Self::Error> {
        let required_employees = u32::try_from(row.required_employees).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative required_employees for shift {}: {}",
                row.id, row.required_employees
            ))
        })?;

        Ok(Self {
            id: ShiftId::new(row.id),
            name: row.name,
            description: row.description,
            window: ShiftWindow::new(
                row.start_time.map(TimeOfDay::from_naive),
                row.end_time.map(TimeOfDay::from_naive),
            ),
            required_employees,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str = "id, name, description, start_time, end_time, required_employees, \
                       active, created_at, updated_at";

fn required_to_db(required: u32) -> Result<i32, RepositoryError> {
    i32::try_from(required)
        .map_err(|_| RepositoryError::Conflict(format!("required_employees out of range: {required}")))
}

/// Repository for shift database operations.
pub struct ShiftRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShiftRepository<'a> {
    /// Create a new shift repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active shifts sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Shift>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {COLUMNS} FROM shifts WHERE active ORDER BY name, id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Every shift, active or not, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Shift>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {COLUMNS} FROM shifts ORDER BY name, id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a shift by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShiftId) -> Result<Option<Shift>, RepositoryError> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            "SELECT {COLUMNS} FROM shifts WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a new shift.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ShiftInput) -> Result<Shift, RepositoryError> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            "INSERT INTO shifts (name, description, start_time, end_time, required_employees, active)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.window.start.map(|t| t.as_naive()))
        .bind(input.window.end.map(|t| t.as_naive()))
        .bind(required_to_db(input.required_employees)?)
        .bind(input.active)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Replace every editable field of a shift.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shift has this ID.
    pub async fn update(&self, id: ShiftId, input: &ShiftInput) -> Result<Shift, RepositoryError> {
        let row = sqlx::query_as::<_, ShiftRow>(&format!(
            "UPDATE shifts
             SET name = $2, description = $3, start_time = $4, end_time = $5,
                 required_employees = $6, active = $7, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.window.start.map(|t| t.as_naive()))
        .bind(input.window.end.map(|t| t.as_naive()))
        .bind(required_to_db(input.required_employees)?)
        .bind(input.active)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Soft delete: hide the shift from active lists and from auto-assignment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shift has this ID.
    pub async fn deactivate(&self, id: ShiftId) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE shifts SET active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id.as_i32())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Hard delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shift has this ID.
    pub async fn delete(&self, id: ShiftId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
