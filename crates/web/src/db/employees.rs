//! Employee repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use shift_planner_core::{Email, Employee, EmployeeId, EmployeeInput, PhoneNumber};

use super::{RepositoryError, escape_like};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    position: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepositoryError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let email = row
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email for employee {}: {e}", row.id))
            })?;
        let phone = row
            .phone
            .as_deref()
            .map(PhoneNumber::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid phone for employee {}: {e}", row.id))
            })?;

        Ok(Self {
            id: EmployeeId::new(row.id),
            name: row.name,
            email,
            phone,
            position: row.position,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str = "id, name, email, phone, position, active, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for employee database operations.
pub struct EmployeeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active employees sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email or phone is invalid.
    pub async fn list_active(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees WHERE active ORDER BY name, id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Every employee, active or not, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees ORDER BY name, id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a new employee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &EmployeeInput) -> Result<Employee, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "INSERT INTO employees (name, email, phone, position, active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(&input.name)
        .bind(input.email.as_ref().map(Email::as_str))
        .bind(input.phone.as_ref().map(PhoneNumber::as_str))
        .bind(input.position.as_deref())
        .bind(input.active)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Replace every editable field of an employee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no employee has this ID.
    pub async fn update(
        &self,
        id: EmployeeId,
        input: &EmployeeInput,
    ) -> Result<Employee, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "UPDATE employees
             SET name = $2, email = $3, phone = $4, position = $5, active = $6,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(&input.name)
        .bind(input.email.as_ref().map(Email::as_str))
        .bind(input.phone.as_ref().map(PhoneNumber::as_str))
        .bind(input.position.as_deref())
        .bind(input.active)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Soft delete: hide the employee from active lists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no employee has this ID.
    pub async fn deactivate(&self, id: EmployeeId) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE employees SET active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id.as_i32())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Hard delete. Assignments that reference the employee are left in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no employee has this ID.
    pub async fn delete(&self, id: EmployeeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Active employees whose name starts with `prefix`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search_by_name(&self, prefix: &str) -> Result<Vec<Employee>, RepositoryError> {
        let pattern = format!("{}%", escape_like(prefix.trim()));
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees
             WHERE active AND name ILIKE $1
             ORDER BY name, id"
        ))
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Whether another employee already uses `email` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists(
        &self,
        email: &Email,
        exclude: Option<EmployeeId>,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM employees
                 WHERE lower(email) = lower($1) AND ($2::INTEGER IS NULL OR id <> $2)
             )",
        )
        .bind(email.as_str())
        .bind(exclude.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Number of active employees.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_active(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE active")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
