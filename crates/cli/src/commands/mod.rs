//! Command implementations for `sp-cli`.

pub mod migrate;
pub mod schedule;
pub mod seed;

use shift_planner_web::config::PlannerConfig;
use shift_planner_web::db;
use sqlx::PgPool;

/// Load configuration from the environment and open a pool.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the connection fails.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = PlannerConfig::from_env()?;
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, config.max_connections).await?;
    Ok(pool)
}
