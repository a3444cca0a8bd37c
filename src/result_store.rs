//! Storage port for the stored collection.
//!
//! Validators, the submission flow and the listing renderer only ever see a
//! [`ResultStore`]. The LMDB implementation lives in
//! [`crate::local_db_state`]; [`MemoryStore`] backs tests and hosts that do
//! not need persistence.

use std::cell::RefCell;

use crate::app_response::AppResponse;
use crate::student_record::StudentRecord;

/// Whole-collection access to a single persistent slot.
///
/// `load` returns the records in insertion order, or an empty vector when
/// nothing has been stored yet. `save` replaces the entire value.
pub trait ResultStore {
    fn load(&self) -> Result<Vec<StudentRecord>, AppResponse>;
    fn save(&self, records: &[StudentRecord]) -> Result<(), AppResponse>;
}

/// A non-persistent store holding the collection in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<StudentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self { records: RefCell::new(records) }
    }
}

impl ResultStore for MemoryStore {
    fn load(&self) -> Result<Vec<StudentRecord>, AppResponse> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[StudentRecord]) -> Result<(), AppResponse> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}
