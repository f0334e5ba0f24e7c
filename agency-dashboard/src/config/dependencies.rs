//! Dependency initialization and wiring for the dashboard.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use agency_repository::{
    CollectionBackend, EntityStore, LocalCollectionBackend, PostgresCollectionBackend,
};
use agency_shared::Entity;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::DashboardError;

/// Default path of the local store document.
const DEFAULT_LOCAL_STORE_PATH: &str = "agency-store.json";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Which backend the stores talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// PostgreSQL through `DATABASE_URL`.
    Postgres,
    /// A JSON document on the local filesystem.
    Local,
}

/// Connection mode for PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection every retry interval until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from environment variable.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive)
    /// Defaults to "retry" if not set or invalid.
    fn from_env() -> Self {
        match env::var("DATABASE_CONNECTION_MODE")
            .unwrap_or_else(|_| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid DATABASE_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub backend: BackendKind,
    pub database_url: Option<String>,
    pub local_store_path: PathBuf,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    pub run_migrations: bool,
}

impl DashboardConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DASHBOARD_BACKEND`: "postgres" or "local" (default: local)
    /// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
    /// - `LOCAL_STORE_PATH`: Local store document (default: agency-store.json)
    /// - `DATABASE_CONNECTION_MODE`: Connection mode - "fail-fast" or "retry" (default: retry)
    /// - `DATABASE_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `RUN_MIGRATIONS`: Apply migrations on startup (default: true)
    pub fn from_env() -> Result<Self, DashboardError> {
        let backend = match env::var("DASHBOARD_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => BackendKind::Postgres,
            "local" => BackendKind::Local,
            other => {
                return Err(DashboardError::config(format!(
                    "Unknown DASHBOARD_BACKEND '{other}', expected 'postgres' or 'local'"
                )))
            }
        };

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        if backend == BackendKind::Postgres && database_url.is_none() {
            return Err(DashboardError::config(
                "DATABASE_URL must be set when DASHBOARD_BACKEND is 'postgres'",
            ));
        }

        let local_store_path = env::var("LOCAL_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOCAL_STORE_PATH));
        let retry_interval = env::var("DATABASE_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);
        let run_migrations = match env::var("RUN_MIGRATIONS") {
            Ok(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    warn!("Invalid RUN_MIGRATIONS, defaulting to 'true'");
                    true
                }
            },
            Err(_) => true,
        };

        Ok(Self {
            backend,
            database_url,
            local_store_path,
            connection_mode: ConnectionMode::from_env(),
            retry_interval: Duration::from_secs(retry_interval),
            run_migrations,
        })
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    backend: Arc<dyn CollectionBackend>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(DashboardError)` - If configuration is invalid or the backend
    ///   cannot be opened (only in fail-fast mode for PostgreSQL)
    pub async fn new() -> Result<Self, DashboardError> {
        Self::from_config(&DashboardConfig::from_env()?).await
    }

    /// Initialize dependencies from an explicit configuration.
    pub async fn from_config(config: &DashboardConfig) -> Result<Self, DashboardError> {
        info!(
            backend = ?config.backend,
            connection_mode = ?config.connection_mode,
            retry_interval_secs = config.retry_interval.as_secs(),
            "Initializing dependencies"
        );

        let backend: Arc<dyn CollectionBackend> = match config.backend {
            BackendKind::Local => {
                let local = LocalCollectionBackend::open(&config.local_store_path)
                    .await
                    .map_err(|e| {
                        DashboardError::database(format!(
                            "Failed to open local store {}: {}",
                            config.local_store_path.display(),
                            e
                        ))
                    })?;
                info!(path = %config.local_store_path.display(), "Local store opened");
                Arc::new(local)
            }
            BackendKind::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| DashboardError::config("DATABASE_URL is not set"))?;
                let postgres =
                    Self::connect_to_postgres(url, config.connection_mode, config.retry_interval)
                        .await?;
                info!("PostgreSQL connection established");

                if config.run_migrations {
                    postgres
                        .migrate()
                        .await
                        .map_err(|e| DashboardError::migration(e.to_string()))?;
                    info!("Migrations applied");
                }
                Arc::new(postgres)
            }
        };

        Ok(Self { backend })
    }

    /// Wrap an already constructed backend.
    pub fn with_backend(backend: Arc<dyn CollectionBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> Arc<dyn CollectionBackend> {
        self.backend.clone()
    }

    /// A fresh store over collection `T`, with an empty cache.
    pub fn store<T: Entity>(&self) -> EntityStore<T> {
        EntityStore::new(self.backend.clone())
    }

    /// Connect to PostgreSQL with retry logic based on connection mode.
    async fn connect_to_postgres(
        url: &str,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<PostgresCollectionBackend, DashboardError> {
        loop {
            match PostgresCollectionBackend::connect(url).await {
                Ok(backend) => return Ok(backend),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(DashboardError::database(format!(
                            "Failed to connect to PostgreSQL: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to PostgreSQL, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}
