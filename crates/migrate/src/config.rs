use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;
use vlex_core::error::CoreError;
use vlex_pipeline::StagePaths;

/// Migration configuration loaded from environment variables.
///
/// There are no command-line flags; every stage binary reads the same
/// variables.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Connection options for the store holding both legacy and new tables.
    pub database: PgConnectOptions,
    /// Pool size (default: `5`).
    pub max_connections: u32,
    pub paths: StagePaths,
}

impl MigrationConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default              |
    /// |----------------------|----------------------|
    /// | `DATABASE_URL`       | built from `DB_*`    |
    /// | `DB_HOST`            | libpq default        |
    /// | `DB_PORT`            | libpq default        |
    /// | `DB_NAME`            | libpq default        |
    /// | `DB_USER`            | libpq default        |
    /// | `DB_PASSWORD`        | none                 |
    /// | `DB_MAX_CONNECTIONS` | `5`                  |
    /// | `LEGACY_ROOT`        | `Old_Files`          |
    /// | `STAGING_DIR`        | `uploads/temp`       |
    /// | `IMPORT_REPORT_PATH` | `import_report.json` |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = match var("DATABASE_URL") {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|e| CoreError::Validation(format!("Invalid DATABASE_URL: {e}")))?,
            None => {
                let mut options = PgConnectOptions::new();
                if let Some(host) = var("DB_HOST") {
                    options = options.host(&host);
                }
                if let Some(port) = var("DB_PORT") {
                    let port: u16 = port.trim().parse().map_err(|_| {
                        CoreError::Validation(format!("DB_PORT must be a valid u16, got '{port}'"))
                    })?;
                    options = options.port(port);
                }
                if let Some(name) = var("DB_NAME") {
                    options = options.database(&name);
                }
                if let Some(user) = var("DB_USER") {
                    options = options.username(&user);
                }
                if let Some(password) = var("DB_PASSWORD") {
                    options = options.password(&password);
                }
                options
            }
        };

        let max_connections: u32 = match var("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => 5,
        };

        let path = |key: &str, default: &str| PathBuf::from(var(key).unwrap_or_else(|| default.into()));

        Ok(Self {
            database,
            max_connections,
            paths: StagePaths {
                legacy_root: path("LEGACY_ROOT", "Old_Files"),
                staging_dir: path("STAGING_DIR", "uploads/temp"),
                import_report_path: path("IMPORT_REPORT_PATH", "import_report.json"),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
