//! `PostgreSQL` repository tests.
//!
//! Require `PLANNER_TEST_DATABASE_URL`; run with `--ignored`. Each test works
//! in its own far-future month so runs do not collide.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use shift_planner_core::schedule::{DateRange, calendar};
use shift_planner_core::{
    AssignmentPatch, AssignmentStatus, EmployeeInput, NewAssignment, ShiftInput, ShiftWindow,
    TimeOfDay,
};
use shift_planner_integration_tests::{date, test_pool};
use shift_planner_web::db::{AssignmentRepository, EmployeeRepository, ShiftRepository};
use shift_planner_web::services::SchedulingService;
use shift_planner_web::store::PgRosterStore;

fn employee_input(name: &str) -> EmployeeInput {
    EmployeeInput {
        name: name.to_string(),
        email: None,
        phone: None,
        position: Some("Nhân viên".to_string()),
        active: true,
    }
}

fn shift_input(name: &str, required: u32) -> ShiftInput {
    ShiftInput {
        name: name.to_string(),
        description: None,
        window: ShiftWindow::new(TimeOfDay::parse("08:00").ok(), TimeOfDay::parse("12:00").ok()),
        required_employees: required,
        active: true,
    }
}

#[tokio::test]
#[ignore = "requires PLANNER_TEST_DATABASE_URL"]
async fn test_employee_lifecycle() {
    let pool = test_pool().await.unwrap();
    let repo = EmployeeRepository::new(&pool);

    let created = repo.create(&employee_input("Lifecycle Test")).await.unwrap();
    assert!(created.active);

    let mut renamed = employee_input("Lifecycle Test Renamed");
    renamed.position = None;
    let updated = repo.update(created.id, &renamed).await.unwrap();
    assert_eq!(updated.name, "Lifecycle Test Renamed");
    assert_eq!(updated.position, None);

    let found = repo.search_by_name("Lifecycle Test").await.unwrap();
    assert!(found.iter().any(|e| e.id == created.id));
    assert!(repo.search_by_name("%").await.unwrap().iter().all(|e| e.name.starts_with('%')));
    assert!(repo.count_active().await.unwrap() >= 1);

    repo.deactivate(created.id).await.unwrap();
    let active = repo.list_active().await.unwrap();
    assert!(active.iter().all(|e| e.id != created.id));
    assert!(!repo.get(created.id).await.unwrap().unwrap().active);

    repo.delete(created.id).await.unwrap();
    assert!(repo.get(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires PLANNER_TEST_DATABASE_URL"]
async fn test_shift_round_trips_window() {
    let pool = test_pool().await.unwrap();
    let repo = ShiftRepository::new(&pool);

    let shift = repo.create(&shift_input("Window Test", 2)).await.unwrap();
    let fetched = repo.get(shift.id).await.unwrap().unwrap();

    assert_eq!(fetched.window.label(), "08:00 - 12:00");
    assert_eq!(fetched.required_employees, 2);

    repo.delete(shift.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PLANNER_TEST_DATABASE_URL"]
async fn test_cancel_keeps_row_but_hides_it() {
    let pool = test_pool().await.unwrap();
    let employee = EmployeeRepository::new(&pool)
        .create(&employee_input("Cancel Test"))
        .await
        .unwrap();
    let shift = ShiftRepository::new(&pool)
        .create(&shift_input("Cancel Test", 1))
        .await
        .unwrap();
    let repo = AssignmentRepository::new(&pool);
    let day = date(2031, 3, 14);

    let assignment = repo
        .create(&NewAssignment::assigned(employee.id, shift.id, day))
        .await
        .unwrap();
    assert!(repo.exists(employee.id, day, Some(shift.id)).await.unwrap());

    let cancelled = repo.cancel(assignment.id).await.unwrap();
    assert_eq!(cancelled.status, AssignmentStatus::Deleted);
    assert!(repo.list_on(day).await.unwrap().iter().all(|a| a.id != assignment.id));

    let range = DateRange::new(day, day).unwrap();
    let all = repo.list_in_range(range).await.unwrap();
    assert!(all.iter().any(|a| a.id == assignment.id));

    let patched = repo
        .update(
            assignment.id,
            &AssignmentPatch {
                status: Some(AssignmentStatus::Completed),
                notes: Some("đổi ca".to_string()),
                ..AssignmentPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.status, AssignmentStatus::Completed);
    assert_eq!(patched.notes.as_deref(), Some("đổi ca"));

    assert_eq!(repo.delete_in_range(range).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires PLANNER_TEST_DATABASE_URL"]
async fn test_auto_assign_against_postgres() {
    let pool = test_pool().await.unwrap();
    let service = SchedulingService::new(PgRosterStore::new(pool.clone()));
    let month = date(2032, 2, 1);

    let report = service.auto_assign(month).await.unwrap();
    assert!(report.is_complete());

    let stored = AssignmentRepository::new(&pool)
        .list_in_range(calendar::month_range(month))
        .await
        .unwrap();
    assert_eq!(stored.len(), report.created);

    let again = service.auto_assign(month).await.unwrap();
    assert_eq!(again.cleared, u64::try_from(report.created).unwrap());

    service.clear_range(calendar::month_range(month)).await.unwrap();
}
