//! Seed the database with a demo roster.
//!
//! Reads employees, shifts, and optional sample assignments from a YAML file
//! (the bundled `seed/demo.yaml` when no file is given). Everything is
//! validated before a connection is opened.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info, warn};

use shift_planner_core::schedule::calendar;
use shift_planner_core::{
    Employee, EmployeeDraft, EmployeeInput, NewAssignment, Shift, ShiftDraft, ShiftInput,
    ValidationErrors,
};
use shift_planner_web::db::{AssignmentRepository, EmployeeRepository, ShiftRepository};

use super::connect;

/// The roster bundled with the CLI.
pub const DEMO: &str = include_str!("../../seed/demo.yaml");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("{kind} '{name}' is invalid: {errors}")]
    Invalid {
        kind: &'static str,
        name: String,
        errors: ValidationErrors,
    },

    #[error("Sample assignment names unknown employee '{0}'")]
    UnknownEmployee(String),

    #[error("Sample assignment names unknown shift '{0}'")]
    UnknownShift(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
    #[serde(default)]
    pub shifts: Vec<SeedShift>,
    #[serde(default)]
    pub sample_assignments: SampleAssignments,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedEmployee {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedShift {
    pub name: String,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub required_employees: u32,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

/// Employee/shift pairs repeated over the first `days` days of a month.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleAssignments {
    #[serde(default)]
    pub days: usize,
    #[serde(default)]
    pub pairs: Vec<SamplePair>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplePair {
    pub employee: String,
    pub shift: String,
}

const fn active_by_default() -> bool {
    true
}

impl From<&SeedEmployee> for EmployeeDraft {
    fn from(seed: &SeedEmployee) -> Self {
        Self {
            name: seed.name.clone(),
            email: seed.email.clone(),
            phone: seed.phone.clone(),
            position: seed.position.clone(),
            active: Some(seed.active.to_string()),
        }
    }
}

impl From<&SeedShift> for ShiftDraft {
    fn from(seed: &SeedShift) -> Self {
        Self {
            name: seed.name.clone(),
            description: seed.description.clone(),
            start_time: seed.start_time.clone(),
            end_time: seed.end_time.clone(),
            required_employees: Some(seed.required_employees.to_string()),
            active: Some(seed.active.to_string()),
        }
    }
}

impl SeedFile {
    /// Run every record through the same validation the web forms use.
    ///
    /// # Errors
    ///
    /// Returns the first record that fails validation.
    pub fn validate(&self) -> Result<(Vec<EmployeeInput>, Vec<ShiftInput>), SeedError> {
        let employees = self
            .employees
            .iter()
            .map(|seed| {
                EmployeeDraft::from(seed)
                    .validate()
                    .map_err(|errors| SeedError::Invalid {
                        kind: "Employee",
                        name: seed.name.clone(),
                        errors,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let shifts = self
            .shifts
            .iter()
            .map(|seed| {
                ShiftDraft::from(seed)
                    .validate()
                    .map_err(|errors| SeedError::Invalid {
                        kind: "Shift",
                        name: seed.name.clone(),
                        errors,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((employees, shifts))
    }

    /// Resolve the sample pairs by name and lay them over the month of `anchor`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pair names an employee or shift not in the lists.
    pub fn sample_plan(
        &self,
        anchor: NaiveDate,
        employees: &[Employee],
        shifts: &[Shift],
    ) -> Result<Vec<NewAssignment>, SeedError> {
        let pairs = self
            .sample_assignments
            .pairs
            .iter()
            .map(|pair| {
                let employee = employees
                    .iter()
                    .find(|e| e.name == pair.employee)
                    .ok_or_else(|| SeedError::UnknownEmployee(pair.employee.clone()))?;
                let shift = shifts
                    .iter()
                    .find(|s| s.name == pair.shift)
                    .ok_or_else(|| SeedError::UnknownShift(pair.shift.clone()))?;
                Ok((employee.id, shift.id))
            })
            .collect::<Result<Vec<_>, SeedError>>()?;

        Ok(calendar::month_dates(anchor)
            .into_iter()
            .take(self.sample_assignments.days)
            .flat_map(|date| {
                pairs.iter().map(move |&(employee_id, shift_id)| {
                    NewAssignment::assigned(employee_id, shift_id, date)
                })
            })
            .collect())
    }
}

/// Seed the roster.
///
/// Employees whose email is already taken are skipped, so re-running the
/// bundled file does not duplicate people.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, validation fails,
/// or database operations fail.
pub async fn run(
    file_path: Option<&str>,
    with_assignments: bool,
    anchor: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = match file_path {
        Some(file_path) => {
            let path = Path::new(file_path);
            if !path.exists() {
                return Err(format!("File not found: {file_path}").into());
            }
            info!(path = %file_path, "Loading roster from file");
            tokio::fs::read_to_string(path).await?
        }
        None => {
            info!("Loading bundled demo roster");
            DEMO.to_string()
        }
    };

    let seed: SeedFile = serde_yaml::from_str(&content)?;
    let (employee_inputs, shift_inputs) = seed.validate()?;
    info!(
        employees = employee_inputs.len(),
        shifts = shift_inputs.len(),
        "Roster validated"
    );

    let pool = connect().await?;
    let employee_repo = EmployeeRepository::new(&pool);
    let shift_repo = ShiftRepository::new(&pool);

    let mut employees_created = 0_usize;
    for input in &employee_inputs {
        if let Some(email) = &input.email
            && employee_repo.email_exists(email, None).await?
        {
            warn!(name = %input.name, "Skipping employee, email already in use");
            continue;
        }
        employee_repo.create(input).await?;
        employees_created += 1;
    }

    for input in &shift_inputs {
        shift_repo.create(input).await?;
    }

    info!("Seeding complete!");
    info!("  Employees inserted: {employees_created}");
    info!("  Shifts inserted: {}", shift_inputs.len());

    if !with_assignments {
        return Ok(());
    }

    let (employees, shifts) =
        tokio::try_join!(employee_repo.list_active(), shift_repo.list_active())?;
    let plan = seed.sample_plan(anchor, &employees, &shifts)?;

    let results = AssignmentRepository::new(&pool).create_many(&plan).await;
    let failed: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    info!(
        month = %calendar::format_month(anchor),
        "  Sample assignments inserted: {}",
        results.len() - failed.len()
    );
    if !failed.is_empty() {
        error!("  Errors: {}", failed.len());
        for err in failed {
            error!("    - {err}");
        }
    }

    Ok(())
}
