//! Settings for opening a results store.

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "studentsResults";

/// 10 MiB is far beyond what a class list needs.
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;

/// Where and how the LMDB-backed store keeps its data.
///
/// ```rust
/// use student_results_core::store_config::StoreConfig;
///
/// let config = StoreConfig::new("exam_2024").with_storage_key("term_one");
/// assert_eq!(config.lmdb_dir(), "exam_2024.lmdb");
/// assert_eq!(config.storage_key, "term_one");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Base name of the store; the environment lives in `<name>.lmdb`.
    pub name: String,
    /// The single key holding the serialized collection.
    pub storage_key: String,
    pub map_size: usize,
}

impl StoreConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            map_size: DEFAULT_MAP_SIZE,
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn lmdb_dir(&self) -> String {
        format!("{}.lmdb", self.name)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("student_results")
    }
}
