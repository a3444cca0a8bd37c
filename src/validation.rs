//! Field validators for the result entry form.
//!
//! Each validator checks one raw field value and returns the parsed value or
//! the first rule it violates, in a fixed order. Only one reason is ever
//! reported per field. [`FieldVerdict`] is the `{valid, message}` view a form
//! shows next to the input.

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::student_record::StudentRecord;

/// The four inputs of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    RollNo,
    Name,
    Dob,
    Score,
}

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required(Field),
    RollNoNotPositive,
    RollNoExists,
    NameTooShort,
    DobFormat,
    DobMonth,
    DobDay,
    DobInvalidDate,
    DobInFuture,
    ScoreNotNumber,
    ScoreOutOfRange,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            FieldError::Required(Field::RollNo) => "Roll number is required",
            FieldError::Required(Field::Name) => "Name is required.",
            FieldError::Required(Field::Dob) => "Date of birth is required.",
            FieldError::Required(Field::Score) => "Score is required.",
            FieldError::RollNoNotPositive => "Roll number must be a positive number",
            FieldError::RollNoExists => "This roll number already exists",
            FieldError::NameTooShort => "Name must be at least 2 characters long.",
            FieldError::DobFormat => "Date must be in dd/mm/yyyy format.",
            FieldError::DobMonth => "Invalid month. Month must be between 01 and 12.",
            FieldError::DobDay => "Invalid day. Day must be between 01 and 31.",
            FieldError::DobInvalidDate => "Invalid date. Please check the day, month, and year.",
            FieldError::DobInFuture => "Date of birth cannot be in the future.",
            FieldError::ScoreNotNumber => "Score must be a number.",
            FieldError::ScoreOutOfRange => "Score must be between 0 and 100.",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for FieldError {}

/// Pass/fail plus the message to attach to the input. The message is empty
/// when the field is valid, which clears any previous message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVerdict {
    pub valid: bool,
    pub message: String,
}

impl FieldVerdict {
    pub fn valid() -> Self {
        Self { valid: true, message: String::new() }
    }
}

impl<T> From<&Result<T, FieldError>> for FieldVerdict {
    fn from(result: &Result<T, FieldError>) -> Self {
        match result {
            Ok(_) => FieldVerdict::valid(),
            Err(e) => FieldVerdict { valid: false, message: e.to_string() },
        }
    }
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The whole trimmed field must be an integer; trailing characters such as
/// `"12abc"` are rejected rather than truncated. Roll numbers are `i64`, so
/// anything above `i64::MAX` is reported as not a positive number.
pub fn validate_roll_no(raw: &str, existing: &[StudentRecord]) -> Result<i64, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required(Field::RollNo));
    }

    let roll_no = match value.parse::<i64>() {
        Ok(n) if n > 0 => n,
        _ => return Err(FieldError::RollNoNotPositive),
    };

    if existing.iter().any(|r| r.roll_no == roll_no) {
        return Err(FieldError::RollNoExists);
    }

    Ok(roll_no)
}

/// Length is counted in Unicode scalar values, so a single astral character
/// such as `"𝒜"` is one character and too short.
pub fn validate_name(raw: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required(Field::Name));
    }
    if value.chars().count() < 2 {
        return Err(FieldError::NameTooShort);
    }
    Ok(value.to_string())
}

/// Checks a `dd/mm/yyyy` date of birth against `today`.
///
/// Month and day get a coarse range check first so the messages stay
/// specific; the calendar check then catches dates like `31/04` or `29/02`
/// in non-leap years. Years below 100 never round-trip and are reported as
/// invalid dates.
pub fn validate_dob(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required(Field::Dob));
    }

    let (day, month, year) = split_dob(value).ok_or(FieldError::DobFormat)?;

    if !(1..=12).contains(&month) {
        return Err(FieldError::DobMonth);
    }
    if !(1..=31).contains(&day) {
        return Err(FieldError::DobDay);
    }

    let date = match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) if year >= 100 && d.day() == day && d.month() == month && d.year() == year => d,
        _ => return Err(FieldError::DobInvalidDate),
    };

    if date > today {
        return Err(FieldError::DobInFuture);
    }

    Ok(date)
}

/// Splits `DD/MM/YYYY` into its numeric parts. Anything else, including
/// non-ASCII digits, is a format error.
fn split_dob(value: &str) -> Option<(u32, u32, i32)> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }

    let digits = |range: std::ops::Range<usize>| -> Option<u32> {
        let part = &bytes[range];
        if !part.iter().all(u8::is_ascii_digit) {
            return None;
        }
        Some(part.iter().fold(0, |acc, b| acc * 10 + u32::from(b - b'0')))
    };

    let day = digits(0..2)?;
    let month = digits(3..5)?;
    let year = digits(6..10)?;
    Some((day, month, year as i32))
}

pub fn validate_score(raw: &str) -> Result<f64, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::Required(Field::Score));
    }

    let score = match value.parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => return Err(FieldError::ScoreNotNumber),
    };

    if !(0.0..=100.0).contains(&score) {
        return Err(FieldError::ScoreOutOfRange);
    }

    Ok(score)
}
