//! Shift Planner CLI - migrations, demo data, and scheduling.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! sp-cli migrate
//!
//! # Seed the bundled demo roster, plus a week of sample assignments
//! sp-cli seed --with-assignments
//!
//! # Print this month's grid
//! sp-cli schedule show
//!
//! # Replace May 2024 with a round-robin plan
//! sp-cli schedule auto-assign --month 2024-05 --yes
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert employees, shifts, and sample assignments from YAML
//! - `schedule` - Show, auto-assign, or clear assignments

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use shift_planner_core::schedule::calendar;

mod commands;

#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(author, version, about = "Shift Planner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed employees and shifts from a YAML file
    Seed {
        /// Roster file (defaults to the bundled demo roster)
        #[arg(short, long)]
        file: Option<String>,

        /// Also insert the file's sample assignments
        #[arg(long)]
        with_assignments: bool,

        /// Month for sample assignments, `YYYY-MM` (defaults to this month)
        #[arg(short, long, value_parser = calendar::parse_month)]
        month: Option<NaiveDate>,
    },
    /// Show or change the month schedule
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },
}

#[derive(Subcommand)]
enum ScheduleAction {
    /// Print the month grid
    Show {
        /// Month, `YYYY-MM` (defaults to this month)
        #[arg(short, long, value_parser = calendar::parse_month)]
        month: Option<NaiveDate>,
    },
    /// Replace every assignment in the month with a round-robin plan
    AutoAssign {
        /// Month, `YYYY-MM` (defaults to this month)
        #[arg(short, long, value_parser = calendar::parse_month)]
        month: Option<NaiveDate>,

        /// Confirm the month's existing assignments may be deleted
        #[arg(long)]
        yes: bool,
    },
    /// Delete every assignment between two dates, inclusive
    Clear {
        /// First day, `YYYY-MM-DD`
        #[arg(long, value_parser = calendar::parse_key)]
        start: NaiveDate,

        /// Last day, `YYYY-MM-DD`
        #[arg(long, value_parser = calendar::parse_key)]
        end: NaiveDate,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn this_month(month: Option<NaiveDate>) -> NaiveDate {
    month.unwrap_or_else(|| calendar::first_of_month(chrono::Local::now().date_naive()))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed {
            file,
            with_assignments,
            month,
        } => {
            commands::seed::run(file.as_deref(), with_assignments, this_month(month)).await?;
        }
        Commands::Schedule { action } => match action {
            ScheduleAction::Show { month } => commands::schedule::show(this_month(month)).await?,
            ScheduleAction::AutoAssign { month, yes } => {
                commands::schedule::auto_assign(this_month(month), yes).await?;
            }
            ScheduleAction::Clear { start, end, yes } => {
                commands::schedule::clear(start, end, yes).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_clear_parses_dates() {
        let cli = Cli::try_parse_from([
            "sp-cli", "schedule", "clear", "--start", "2024-05-01", "--end", "2024-05-07", "--yes",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Schedule {
                action: ScheduleAction::Clear { yes: true, .. }
            })
        ));
    }

    #[test]
    fn test_month_rejects_bad_key() {
        let cli = Cli::try_parse_from(["sp-cli", "schedule", "show", "--month", "2024-13"]);
        assert!(cli.is_err());
    }
}
