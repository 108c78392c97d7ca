/// Database migration runner
///
/// Migrations live in `migrations/` at the workspace root as paired
/// `{timestamp}_{name}.sql` / `{timestamp}_{name}.down.sql` files and are
/// embedded at compile time via `sqlx::migrate!`.

use sqlx::postgres::PgPool;
use tracing::info;

/// Runs all pending migrations
///
/// Idempotent; already-applied migrations are skipped.
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails to
/// execute, or the connection is lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");
    sqlx::migrate!("../migrations").run(pool).await?;
    info!("Database migrations up to date");
    Ok(())
}
