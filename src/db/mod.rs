pub mod habit_lists;
pub mod habits;
pub mod users;

pub use habit_lists::{HabitListRepo, UpsertOutcome};
pub use habits::HabitRepo;
pub use users::UserRepo;

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::error::Result;

/// Connect to Postgres and bring the schema up to date
pub async fn open_database(database_url: &str) -> Result<PgPool> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;

    run_migrations(&pool).await?;

    tracing::info!("Database initialized successfully");

    Ok(pool)
}

/// Apply the embedded migrations under `./migrations`
pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
