use std::path::PathBuf;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::{AlimentoService, ComandaService, DespesaService};

/// Shared server state
///
/// Cloned into every handler through axum `State`. Every field is a cheap
/// handle around the same SQLite pool.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub alimentos: AlimentoService,
    pub comandas: ComandaService,
    pub despesas: DespesaService,
}

impl ServerState {
    /// Wire the services around an opened database
    pub fn new(config: Config, db: DbService) -> Self {
        Self {
            alimentos: AlimentoService::new(db.pool.clone()),
            comandas: ComandaService::new(db.pool.clone()),
            despesas: DespesaService::new(db.pool.clone()),
            config,
            db,
        }
    }

    /// Create the work directory, open the database and build the services
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        if let Some(parent) = PathBuf::from(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        tracing::info!(work_dir = %config.work_dir, "Server state initialized");
        Ok(Self::new(config.clone(), db))
    }
}
