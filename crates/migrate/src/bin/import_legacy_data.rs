//! Import stage: insert a `files_new` row for every legacy document whose
//! file is staged, then write the import report.

use anyhow::Context;
use vlex_migrate::config::MigrationConfig;
use vlex_pipeline::{import_stage, PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    vlex_migrate::telemetry::init("vlex_pipeline=info,vlex_migrate=info,import_legacy_data=info");

    let config = MigrationConfig::from_env()?;
    let pool = vlex_migrate::connect(&config).await?;

    let result = async {
        vlex_db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");

        import_stage::run(&PgStore::new(&pool), &config.paths)
            .await
            .map_err(anyhow::Error::from)
    }
    .await;
    pool.close().await;

    let run = result?;
    tracing::info!(
        imported = run.report.summary.success_count,
        total = run.report.summary.total_records,
        rows_in_table = run.verification.total_rows,
        "Import stage finished"
    );
    Ok(())
}
