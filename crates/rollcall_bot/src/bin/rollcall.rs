//! Rollcall bot entry point.

use rollcall_bot::{RollcallBot, RollcallConfig};
use rollcall_core::DashboardRegistry;
use rollcall_database::{establish_pool, run_migrations, PostgresRegistry};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = RollcallConfig::from_env()?;

    // A reachable, migrated registry is a startup requirement; running with
    // half a store would strand every dashboard.
    let pool = establish_pool()?;
    run_migrations(&pool)?;
    let registry: Arc<dyn DashboardRegistry> = Arc::new(PostgresRegistry::new(pool));

    let mut bot = RollcallBot::new(config, registry).await?;
    bot.start().await?;
    Ok(())
}
