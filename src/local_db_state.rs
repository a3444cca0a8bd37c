//! LMDB-backed results store.
//!
//! The collection is a single JSON array stored under one key of a named
//! LMDB database. Every load is one read transaction and every save is one
//! committed write transaction, so a save either lands completely or not at
//! all.

use std::fs;
use std::path::Path;

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info};

use crate::app_response::AppResponse;
use crate::result_store::ResultStore;
use crate::store_config::StoreConfig;
use crate::student_record::StudentRecord;

const RESULTS_DB: &str = "results";

pub struct AppDbState {
    env: Environment,
    db: Database,
    config: StoreConfig,
}

impl AppDbState {
    /// Opens (or creates) the environment at `<name>.lmdb`.
    ///
    /// ```no_run
    /// use student_results_core::local_db_state::AppDbState;
    /// use student_results_core::result_store::ResultStore;
    /// use student_results_core::store_config::StoreConfig;
    ///
    /// let store = AppDbState::init(StoreConfig::new("class_10b"))?;
    /// let records = store.load()?;
    /// # Ok::<(), student_results_core::app_response::AppResponse>(())
    /// ```
    pub fn init(config: StoreConfig) -> Result<Self, AppResponse> {
        let dir = config.lmdb_dir();
        fs::create_dir_all(&dir)?;

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(config.map_size)
            .open(Path::new(&dir))?;
        let db = env.create_db(Some(RESULTS_DB), DatabaseFlags::empty())?;

        info!("Opened results store at {} (key '{}')", dir, config.storage_key);
        Ok(Self { env, db, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Flushes and releases the environment. The state must not be used
    /// afterwards; dropping it has the same effect without the flush.
    pub fn close_database(self) -> Result<(), AppResponse> {
        self.env.sync(true)?;
        info!("Closed results store at {}", self.config.lmdb_dir());
        Ok(())
    }
}

impl ResultStore for AppDbState {
    fn load(&self) -> Result<Vec<StudentRecord>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;

        let records = match txn.get(self.db, &self.config.storage_key) {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(bytes)?,
            Err(lmdb::Error::NotFound) => Vec::new(),
            Err(e) => return Err(AppResponse::from(e)),
        };
        txn.abort();

        debug!("Loaded {} stored results", records.len());
        Ok(records)
    }

    fn save(&self, records: &[StudentRecord]) -> Result<(), AppResponse> {
        let json = serde_json::to_vec(records)?;

        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &self.config.storage_key, &json, WriteFlags::empty())?;
        txn.commit()?;

        debug!("Saved {} results ({} bytes)", records.len(), json.len());
        Ok(())
    }
}
