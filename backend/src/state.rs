//! Shared application state injected into every handler as `web::Data<AppState>`.
//!
//! The classifier and the emission factor table are built once from the
//! configuration at start-up and are read-only afterwards. Handlers never touch
//! global state; they receive these through `AppState`.

use crate::config::AppConfig;
use crate::db;
use crate::engine::classifier::Classifier;
use crate::engine::factors::EmissionFactorTable;
use crate::error::Result;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub database_path: Arc<PathBuf>,
    pub max_upload_bytes: usize,
    pub classifier: Arc<Classifier>,
    pub factors: Arc<EmissionFactorTable>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let factors = EmissionFactorTable::default().with_overrides(&config.factors)?;
        Ok(AppState {
            database_path: Arc::new(config.database_path.clone()),
            max_upload_bytes: config.max_upload_bytes,
            classifier: Arc::new(Classifier::default()),
            factors: Arc::new(factors),
        })
    }

    /// Creates the database schema if it does not exist yet.
    pub fn init_database(&self) -> Result<()> {
        let conn = self.open_db()?;
        db::init_schema(&conn)
    }

    pub fn open_db(&self) -> Result<Connection> {
        db::open(&self.database_path)
    }

    /// Runs `f` with a fresh connection on the blocking thread pool.
    ///
    /// rusqlite calls and CSV decoding are synchronous, so handlers go through
    /// here instead of blocking the actix worker.
    pub async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AppState, &mut Connection) -> Result<T> + Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = state.open_db()?;
            f(&state, &mut conn)
        })
        .await?
    }
}
