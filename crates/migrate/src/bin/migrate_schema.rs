//! Apply the `files_new` schema migrations and print the resulting columns.

use anyhow::Context;
use vlex_migrate::config::MigrationConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    vlex_migrate::telemetry::init("vlex_migrate=info,migrate_schema=info");

    let config = MigrationConfig::from_env()?;
    let pool = vlex_migrate::connect(&config).await?;

    let result = async {
        vlex_db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");

        vlex_db::table_columns(&pool, "files_new")
            .await
            .context("Failed to read files_new structure")
    }
    .await;
    pool.close().await;

    for column in result? {
        tracing::info!(column = %column.column_name, data_type = %column.data_type, "files_new column");
    }
    Ok(())
}
