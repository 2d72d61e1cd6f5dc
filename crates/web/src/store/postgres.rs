use sqlx::PgPool;

use shift_planner_core::schedule::DateRange;
use shift_planner_core::{Assignment, Employee, NewAssignment, Shift};

use super::RosterStore;
use crate::db::{AssignmentRepository, EmployeeRepository, RepositoryError, ShiftRepository};

/// [`RosterStore`] over the `PostgreSQL` repositories.
#[derive(Debug, Clone)]
pub struct PgRosterStore {
    pool: PgPool,
}

impl PgRosterStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RosterStore for PgRosterStore {
    async fn active_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        EmployeeRepository::new(&self.pool).list_active().await
    }

    async fn active_shifts(&self) -> Result<Vec<Shift>, RepositoryError> {
        ShiftRepository::new(&self.pool).list_active().await
    }

    async fn assignments_between(&self, range: DateRange) -> Result<Vec<Assignment>, RepositoryError> {
        AssignmentRepository::new(&self.pool).list_in_range(range).await
    }

    async fn create_assignment(&self, new: &NewAssignment) -> Result<Assignment, RepositoryError> {
        AssignmentRepository::new(&self.pool).create(new).await
    }

    async fn delete_assignments_between(&self, range: DateRange) -> Result<u64, RepositoryError> {
        AssignmentRepository::new(&self.pool).delete_in_range(range).await
    }
}
