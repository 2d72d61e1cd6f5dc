//! Integration tests for Shift Planner.
//!
//! # Running Tests
//!
//! ```bash
//! # Tests that need nothing external
//! cargo test -p shift-planner-integration-tests
//!
//! # Database and server tests
//! PLANNER_TEST_DATABASE_URL=postgres://... \
//! PLANNER_TEST_BASE_URL=http://127.0.0.1:3000 \
//!     cargo test -p shift-planner-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `scheduling` - Auto-assign and month grids over the in-memory store
//! - `router` - Router smoke tests through `tower::ServiceExt::oneshot`
//! - `repositories` - `PostgreSQL` repositories (ignored by default)
//! - `server` - HTTP tests against a running server (ignored by default)

use chrono::{DateTime, NaiveDate, Utc};
use secrecy::SecretString;
use sqlx::PgPool;

use shift_planner_core::{Employee, EmployeeId, Shift, ShiftId, ShiftWindow, TimeOfDay};

/// Database URL for ignored repository tests.
pub const DATABASE_URL_VAR: &str = "PLANNER_TEST_DATABASE_URL";

/// Base URL of a running server for ignored HTTP tests.
pub const BASE_URL_VAR: &str = "PLANNER_TEST_BASE_URL";

/// A calendar date; panics on an impossible one.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// An active employee with only a name.
#[must_use]
pub fn employee(id: i32, name: &str) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        name: name.to_string(),
        email: None,
        phone: None,
        position: None,
        active: true,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// An active shift with a `start - end` window.
#[must_use]
pub fn shift(id: i32, name: &str, window: (&str, &str), required: u32) -> Shift {
    Shift {
        id: ShiftId::new(id),
        name: name.to_string(),
        description: None,
        window: ShiftWindow::new(
            TimeOfDay::parse(window.0).ok(),
            TimeOfDay::parse(window.1).ok(),
        ),
        required_employees: required,
        active: true,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// The five-person, four-shift demo roster.
#[must_use]
pub fn demo_roster() -> (Vec<Employee>, Vec<Shift>) {
    let employees = [
        "Nguyễn Văn An",
        "Trần Thị Bình",
        "Lê Văn Cường",
        "Phạm Thị Dung",
        "Hoàng Văn Em",
    ]
    .iter()
    .zip(1..)
    .map(|(name, id)| employee(id, name))
    .collect();

    let shifts = vec![
        shift(1, "Ca Sáng", ("08:00", "12:00"), 2),
        shift(2, "Ca Chiều", ("13:00", "17:00"), 2),
        shift(3, "Ca Tối", ("18:00", "22:00"), 1),
        shift(4, "Ca Giao Hàng", ("09:00", "18:00"), 3),
    ];

    (employees, shifts)
}

/// Connect to the test database and apply migrations.
///
/// # Errors
///
/// Returns an error if the variable is unset, the connection fails, or a
/// migration does not apply.
pub async fn test_pool() -> Result<PgPool, Box<dyn std::error::Error>> {
    let url = std::env::var(DATABASE_URL_VAR)
        .map(SecretString::from)
        .map_err(|_| format!("{DATABASE_URL_VAR} not set"))?;
    let pool = shift_planner_web::db::create_pool(&url, 2).await?;
    sqlx::migrate!("../web/migrations").run(&pool).await?;
    Ok(pool)
}

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var(BASE_URL_VAR).unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
}
