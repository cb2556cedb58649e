//! Shared setup for the migration binaries: environment configuration,
//! tracing, and store connection.

pub mod config;
pub mod telemetry;

use anyhow::Context;
use vlex_db::DbPool;

use crate::config::MigrationConfig;

/// Open the pool and make sure the store answers.
///
/// The caller owns the returned pool and must close it when its stage ends,
/// whether the stage succeeded or not.
pub async fn connect(config: &MigrationConfig) -> anyhow::Result<DbPool> {
    let pool = vlex_db::create_pool(config.database.clone(), config.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    if let Err(e) = vlex_db::health_check(&pool).await {
        pool.close().await;
        return Err(e).context("Database health check failed");
    }
    tracing::info!("Database health check passed");
    Ok(pool)
}
