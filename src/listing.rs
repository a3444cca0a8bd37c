//! Listing renderer: the stored collection sorted for display.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::result_store::ResultStore;
use crate::student_record::StudentRecord;

/// One table row, every cell already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub roll_no: String,
    pub name: String,
    pub dob: String,
    pub score: String,
}

impl From<&StudentRecord> for ResultRow {
    fn from(record: &StudentRecord) -> Self {
        Self {
            roll_no: record.roll_no.to_string(),
            name: record.name.clone(),
            dob: record.dob.clone(),
            score: record.score.to_string(),
        }
    }
}

/// What the listing view shows: a placeholder or the table rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "rows")]
pub enum Listing {
    Empty,
    Rows(Vec<ResultRow>),
}

impl Listing {
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            Listing::Empty => &[],
            Listing::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }
}

/// Copy of `records` ordered by roll number. The input is left as is.
pub fn sorted_by_roll_no(records: &[StudentRecord]) -> Vec<StudentRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.roll_no);
    sorted
}

pub fn list_results<S: ResultStore + ?Sized>(store: &S) -> Result<Listing, AppResponse> {
    let records = store.load()?;
    if records.is_empty() {
        debug!("No stored results to list");
        return Ok(Listing::Empty);
    }

    let rows = sorted_by_roll_no(&records).iter().map(ResultRow::from).collect();
    Ok(Listing::Rows(rows))
}
