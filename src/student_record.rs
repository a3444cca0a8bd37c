//! Data model for a stored exam result.
//!
//! [`StudentRecord`] is the only entity this crate persists. The whole stored
//! collection is a JSON array of these records kept under a single key, so the
//! serialized field names are part of the storage format and must not change.

use serde::{Deserialize, Serialize};

/// One student's exam result.
///
/// # Structure
///
/// - **rollNo**: positive integer, unique across the stored collection
/// - **name**: trimmed name, at least 2 characters
/// - **dob**: date of birth as `dd/mm/yyyy`, never in the future
/// - **score**: real number in `[0, 100]`
///
/// Records are only ever built by the submission flow after every field has
/// passed validation; see [`crate::submission::submit`].
///
/// # Serialization
///
/// ```rust
/// use student_results_core::student_record::StudentRecord;
///
/// let record = StudentRecord {
///     roll_no: 7,
///     name: "Ann".to_string(),
///     dob: "01/01/2000".to_string(),
///     score: 88.5,
/// };
///
/// let json = serde_json::to_string(&record)?;
/// assert_eq!(json, r#"{"rollNo":7,"name":"Ann","dob":"01/01/2000","score":88.5}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Primary key of the record. Always greater than zero.
    pub roll_no: i64,

    /// Student name with surrounding whitespace removed.
    pub name: String,

    /// Date of birth, kept in the `dd/mm/yyyy` form it was entered in.
    pub dob: String,

    pub score: f64,
}
