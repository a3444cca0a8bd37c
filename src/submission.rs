//! Record submission flow.
//!
//! [`submit`] validates all four fields of an [`EntryForm`] against the
//! current stored collection and, only when every field passes, appends one
//! [`StudentRecord`] and saves the collection. A rejected submission leaves
//! storage untouched.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};

use crate::app_response::AppResponse;
use crate::result_store::ResultStore;
use crate::student_record::StudentRecord;
use crate::validation::{validate_dob, validate_name, validate_roll_no, validate_score, FieldVerdict};

/// Raw values of the entry form as typed by the user.
///
/// Hosts normally send every field as a string. JSON numbers are accepted
/// too and validated from their textual form; `null` or a missing field is
/// an empty input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryForm {
    #[serde(default, deserialize_with = "text_or_number")]
    pub roll_no: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub dob: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub score: String,
    /// Set after a rejected submit so per-field errors stay visible.
    #[serde(skip)]
    pub was_validated: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawInput>::deserialize(deserializer)? {
        Some(RawInput::Text(text)) => text,
        Some(RawInput::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

impl EntryForm {
    pub fn new(
        roll_no: impl Into<String>,
        name: impl Into<String>,
        dob: impl Into<String>,
        score: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            dob: dob.into(),
            score: score.into(),
            was_validated: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Verdicts for every field of one submit attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormReport {
    pub roll_no: FieldVerdict,
    pub name: FieldVerdict,
    pub dob: FieldVerdict,
    pub score: FieldVerdict,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.roll_no.valid && self.name.valid && self.dob.valid && self.score.valid
    }
}

/// Confirmation shown after a record is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub roll_no: i64,
    pub name: String,
    pub score: f64,
}

impl Display for Acknowledgment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Student result added successfully!\nRoll No: {}\nName: {}\nScore: {}",
            self.roll_no, self.name, self.score
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Added { record: StudentRecord, acknowledgment: Acknowledgment },
    Rejected(FormReport),
}

/// Validates `form` and, if every field passes, appends the record to
/// `store`.
///
/// On success the form is reset. On rejection `form.was_validated` is set and
/// nothing is written. Only storage failures are returned as errors.
pub fn submit<S: ResultStore + ?Sized>(
    store: &S,
    form: &mut EntryForm,
    today: NaiveDate,
) -> Result<SubmitOutcome, AppResponse> {
    let mut records = store.load()?;

    let roll_no = validate_roll_no(&form.roll_no, &records);
    let name = validate_name(&form.name);
    let dob = validate_dob(&form.dob, today);
    let score = validate_score(&form.score);

    let report = FormReport {
        roll_no: FieldVerdict::from(&roll_no),
        name: FieldVerdict::from(&name),
        dob: FieldVerdict::from(&dob),
        score: FieldVerdict::from(&score),
    };

    let (roll_no, name, score) = match (roll_no, name, dob, score) {
        (Ok(roll_no), Ok(name), Ok(_), Ok(score)) => (roll_no, name, score),
        _ => {
            form.was_validated = true;
            debug!("Rejected submission: {:?}", report);
            return Ok(SubmitOutcome::Rejected(report));
        }
    };

    let record = StudentRecord {
        roll_no,
        name,
        dob: form.dob.trim().to_string(),
        score,
    };

    records.push(record.clone());
    store.save(&records)?;
    form.reset();

    info!("Stored result for roll number {} ({} total)", record.roll_no, records.len());

    let acknowledgment = Acknowledgment {
        roll_no: record.roll_no,
        name: record.name.clone(),
        score: record.score,
    };
    Ok(SubmitOutcome::Added { record, acknowledgment })
}
