//! Copy stage: stage every named legacy file and write
//! `<STAGING_DIR>/migration_report.json`.

use vlex_migrate::config::MigrationConfig;
use vlex_pipeline::{copy_stage, PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    vlex_migrate::telemetry::init("vlex_pipeline=info,vlex_migrate=info,copy_legacy_files=info");

    let config = MigrationConfig::from_env()?;
    let pool = vlex_migrate::connect(&config).await?;

    let result = copy_stage::run(&PgStore::new(&pool), &config.paths).await;
    pool.close().await;

    let report = result?;
    tracing::info!(
        copied = report.summary.success_count,
        total = report.summary.total_files,
        "Copy stage finished"
    );
    Ok(())
}
