//! Auto-assign and month grids over the in-memory store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use shift_planner_core::schedule::{Staffing, calendar};
use shift_planner_core::{AssignmentStatus, EmployeeId, NewAssignment, ShiftId};
use shift_planner_integration_tests::{date, demo_roster};
use shift_planner_web::services::SchedulingService;
use shift_planner_web::store::MemoryRosterStore;

fn demo_service() -> SchedulingService<MemoryRosterStore> {
    let (employees, shifts) = demo_roster();
    SchedulingService::new(MemoryRosterStore::new(employees, shifts))
}

#[tokio::test]
async fn test_demo_month_is_fully_staffed() {
    let service = demo_service();
    let february = date(2024, 2, 1);

    let report = service.auto_assign(february).await.unwrap();

    // 29 days, 2 + 2 + 1 + 3 slots a day
    assert_eq!(report.planned, 29 * 8);
    assert_eq!(report.created, report.planned);
    assert_eq!(report.cleared, 0);
    assert!(report.is_complete());

    let schedule = service.month_schedule(february).await.unwrap();
    assert_eq!(schedule.grid.weeks.len(), 5);
    assert_eq!(schedule.grid.count(Staffing::Full), 29 * 4);
    assert_eq!(schedule.grid.count(Staffing::Under), 0);
    assert_eq!(schedule.employee_count, 5);
    assert_eq!(schedule.shift_count, 4);
}

fn employees_on(
    service: &SchedulingService<MemoryRosterStore>,
    shift: i32,
    day: chrono::NaiveDate,
) -> Vec<EmployeeId> {
    let mut ids: Vec<EmployeeId> = service
        .store()
        .assignments()
        .iter()
        .filter(|a| a.shift_id == ShiftId::new(shift) && a.date == day)
        .map(|a| a.employee_id)
        .collect();
    ids.sort();
    ids
}

fn ids(raw: &[i32]) -> Vec<EmployeeId> {
    raw.iter().copied().map(EmployeeId::new).collect()
}

#[tokio::test]
async fn test_rotation_walks_name_order_across_days_then_shifts() {
    let service = demo_service();
    service.auto_assign(date(2024, 5, 1)).await.unwrap();

    // By name: Hoàng(5), Lê(3), Nguyễn(1), Phạm(4), Trần(2).
    // Shifts by name: Ca Chiều(2), Ca Giao Hàng(4), Ca Sáng(1), Ca Tối(3).
    assert_eq!(employees_on(&service, 2, date(2024, 5, 1)), ids(&[3, 5]));
    assert_eq!(employees_on(&service, 2, date(2024, 5, 2)), ids(&[1, 4]));
    assert_eq!(employees_on(&service, 2, date(2024, 5, 3)), ids(&[2, 5]));

    // Ca Chiều used 62 turns, so Ca Giao Hàng starts at the third name
    assert_eq!(employees_on(&service, 4, date(2024, 5, 1)), ids(&[1, 2, 4]));
}

#[tokio::test]
async fn test_rerun_replaces_only_its_month() {
    let service = demo_service();
    let june_record = service.store().insert(NewAssignment::assigned(
        EmployeeId::new(1),
        ShiftId::new(1),
        date(2024, 6, 1),
    ));

    let first = service.auto_assign(date(2024, 5, 15)).await.unwrap();
    let second = service.auto_assign(date(2024, 5, 1)).await.unwrap();

    assert_eq!(second.cleared, u64::try_from(first.created).unwrap());
    let stored = service.store().assignments();
    assert_eq!(stored.len(), second.created + 1);
    assert!(stored.iter().any(|a| a.id == june_record.id));
}

#[tokio::test]
async fn test_demo_roster_double_books_and_reports_it() {
    let service = demo_service();
    let may = date(2024, 5, 1);
    service.auto_assign(may).await.unwrap();

    let schedule = service.month_schedule(may).await.unwrap();

    // Eight slots a day for five people: some work more than one shift
    assert!(!schedule.double_bookings.is_empty());
    assert!(
        schedule
            .double_bookings
            .iter()
            .all(|b| b.shift_ids.len() > 1 && calendar::month_range(may).contains(b.date))
    );
}

#[tokio::test]
async fn test_soft_deleted_assignments_leave_the_grid() {
    let (employees, shifts) = demo_roster();
    let service = SchedulingService::new(MemoryRosterStore::new(employees, shifts));
    let mut record = NewAssignment::assigned(EmployeeId::new(1), ShiftId::new(3), date(2024, 5, 3));
    record.status = AssignmentStatus::Deleted;
    service.store().insert(record);

    let schedule = service.month_schedule(date(2024, 5, 1)).await.unwrap();

    assert_eq!(schedule.grid.count(Staffing::Empty), 31 * 4);
    assert!(schedule.double_bookings.is_empty());
}

#[tokio::test]
async fn test_clear_range_is_inclusive() {
    let service = demo_service();
    service.auto_assign(date(2024, 5, 1)).await.unwrap();

    let range = calendar::DateRange::new(date(2024, 5, 1), date(2024, 5, 7)).unwrap();
    let removed = service.clear_range(range).await.unwrap();

    assert_eq!(removed, 7 * 8);
    assert!(
        service
            .store()
            .assignments()
            .iter()
            .all(|a| a.date > date(2024, 5, 7))
    );
}
