//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use rollcall_error::{DatabaseError, DatabaseErrorKind};

/// Embedded schema migrations, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Connection pool type used throughout the workspace.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Build a PostgreSQL connection pool.
///
/// Reads the `DATABASE_URL` environment variable to determine the
/// connection string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - The pool cannot establish its initial connection
pub fn establish_pool() -> DatabaseResult<PgPool> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Run any pending migrations.
///
/// Idempotent: tables are created if absent and already-applied migrations
/// are skipped. Called once at process start; failure here is fatal — the
/// bot must not run against a half-initialized registry.
pub fn run_migrations(pool: &PgPool) -> DatabaseResult<()> {
    let mut conn = pool.get().map_err(DatabaseError::from)?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;

    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "Applied pending migrations");
    }
    Ok(())
}
