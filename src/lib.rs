//! # Student Results Core
//!
//! A local-first library for recording student exam results. It validates the
//! four fields of a result entry form, persists the records in a single LMDB
//! slot as a JSON array, and produces a roll-number-ordered listing for
//! display. The host UI (Flutter, a web shell, a native form) only renders;
//! every rule lives here.
//!
//! ## Features
//!
//! - **Field validation**: roll number, name, date of birth and score, with
//!   exactly one user-facing message per rejected field
//! - **Duplicate detection**: roll numbers are unique across stored results
//! - **Single-slot storage**: the whole collection is read and written in one
//!   LMDB transaction
//! - **FFI-ready**: C-compatible entry points returning JSON responses
//!
//! ## Quick Start
//!
//! ```rust
//! use student_results_core::listing::list_results;
//! use student_results_core::result_store::MemoryStore;
//! use student_results_core::submission::{submit, EntryForm, SubmitOutcome};
//! use student_results_core::validation::today;
//!
//! let store = MemoryStore::new();
//! let mut form = EntryForm::new("7", "Ann", "01/01/2000", "88.5");
//!
//! let outcome = submit(&store, &mut form, today())?;
//! assert!(matches!(outcome, SubmitOutcome::Added { .. }));
//! assert_eq!(list_results(&store)?.rows().len(), 1);
//! # Ok::<(), student_results_core::app_response::AppResponse>(())
//! ```
//!
//! ## FFI Functions
//!
//! - [`create_store`] - Open or create a results store
//! - [`validate_roll_no`], [`validate_name`], [`validate_dob`], [`validate_score`] - Live field checks
//! - [`submit_result`] - Validate and store a full entry form
//! - [`list_results`] - Sorted listing or the empty state
//! - [`close_store`] - Flush and release a store
//! - [`free_response`] - Release a string returned by any of the above

pub mod app_response;
pub mod listing;
pub mod local_db_state;
pub mod result_store;
pub mod store_config;
pub mod student_record;
pub mod submission;
pub mod validation;
pub mod view_state;

use crate::local_db_state::AppDbState;
use crate::result_store::ResultStore;
use crate::store_config::StoreConfig;
use crate::student_record::StudentRecord;
use crate::submission::{EntryForm, SubmitOutcome};
use crate::validation::FieldVerdict;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use log::{info, warn};
use serde::Serialize;

use crate::app_response::AppResponse;

/// Payload of a successful [`submit_result`].
#[derive(Serialize)]
struct SubmitReply<'a> {
    record: &'a StudentRecord,
    message: String,
}

/// Opens the results store named `name`, creating `<name>.lmdb` if needed.
///
/// # Returns
///
/// A pointer to the [`AppDbState`] on success, or a null pointer on failure.
/// Release it with [`close_store`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use student_results_core::create_store;
///
/// let name = CString::new("class_10b").unwrap();
/// let state = create_store(name.as_ptr());
/// assert!(!state.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(name: *const c_char) -> *mut AppDbState {
    if name.is_null() {
        warn!("Null name pointer passed to create_store");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    if name_str.trim().is_empty() {
        warn!("Empty store name passed to create_store");
        return std::ptr::null_mut();
    }

    match AppDbState::init(StoreConfig::new(name_str)) {
        Ok(state) => {
            info!("Results store '{name_str}' ready");
            Box::into_raw(Box::new(state))
        },
        Err(e) => {
            warn!("Failed to open results store '{name_str}': {e}");
            std::ptr::null_mut()
        },
    }
}

/// Checks a roll number against the rules and the stored results.
///
/// Returns `Ok` wrapping a `{"valid":bool,"message":string}` verdict.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn validate_roll_no(state: *mut AppDbState, raw: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to validate_roll_no".to_string());
            return response_to_c_string(&error);
        }
    };

    let raw = match c_ptr_to_string(raw, "roll number") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match state.load() {
        Ok(records) => {
            let verdict = FieldVerdict::from(&validation::validate_roll_no(&raw, &records));
            verdict_to_c_string(&verdict)
        },
        Err(e) => {
            warn!("Could not read stored results for roll number check: {e}");
            response_to_c_string(&e)
        }
    }
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn validate_name(raw: *const c_char) -> *const c_char {
    match c_ptr_to_string(raw, "name") {
        Ok(raw) => verdict_to_c_string(&FieldVerdict::from(&validation::validate_name(&raw))),
        Err(err) => err,
    }
}

/// Checks a `dd/mm/yyyy` date of birth against today's local date.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn validate_dob(raw: *const c_char) -> *const c_char {
    match c_ptr_to_string(raw, "date of birth") {
        Ok(raw) => {
            let verdict = FieldVerdict::from(&validation::validate_dob(&raw, validation::today()));
            verdict_to_c_string(&verdict)
        },
        Err(err) => err,
    }
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn validate_score(raw: *const c_char) -> *const c_char {
    match c_ptr_to_string(raw, "score") {
        Ok(raw) => verdict_to_c_string(&FieldVerdict::from(&validation::validate_score(&raw))),
        Err(err) => err,
    }
}

/// Validates a whole entry form and stores it when every field passes.
///
/// # JSON Format
///
/// ```json
/// { "rollNo": "7", "name": "Ann", "dob": "01/01/2000", "score": "88.5" }
/// ```
///
/// Fields are normally strings. Numeric `rollNo`/`score` values are taken as
/// their textual form, so `{"rollNo":7,...,"score":88.5}` is validated the
/// same way. Any other JSON type for a field is a `SerializationError`.
///
/// # Returns
///
/// - `Ok` with `{"record":{...},"message":"Student result added successfully!..."}`
/// - `ValidationError` with the per-field report when any field fails;
///   nothing is stored in that case
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn submit_result(state: *mut AppDbState, form_json: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to submit_result".to_string());
            return response_to_c_string(&error);
        }
    };

    let json_str = match c_ptr_to_string(form_json, "form JSON") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let mut form: EntryForm = match serde_json::from_str(&json_str) {
        Ok(f) => f,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid form JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    let outcome = match submission::submit(state, &mut form, validation::today()) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Submission failed on storage: {e}");
            return response_to_c_string(&e);
        }
    };

    let response = match outcome {
        SubmitOutcome::Added { record, acknowledgment } => {
            let reply = SubmitReply { record: &record, message: acknowledgment.to_string() };
            match serde_json::to_string(&reply) {
                Ok(json) => AppResponse::Ok(json),
                Err(e) => AppResponse::SerializationError(format!("Failed to serialize record: {e}")),
            }
        },
        SubmitOutcome::Rejected(report) => match serde_json::to_string(&report) {
            Ok(json) => AppResponse::ValidationError(json),
            Err(e) => AppResponse::SerializationError(format!("Failed to serialize report: {e}")),
        },
    };
    response_to_c_string(&response)
}

/// Returns the stored results sorted by roll number.
///
/// The `Ok` payload is `{"state":"Empty"}` when nothing is stored, otherwise
/// `{"state":"Rows","rows":[{"rollNo":"1","name":..,"dob":..,"score":..}, ..]}`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn list_results(state: *mut AppDbState) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to list_results".to_string());
            return response_to_c_string(&error);
        }
    };

    match listing::list_results(state) {
        Ok(listing) => match serde_json::to_string(&listing) {
            Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
            Err(e) => {
                let error = AppResponse::SerializationError(format!("Error serializing listing: {e:?}"));
                response_to_c_string(&error)
            }
        },
        Err(e) => response_to_c_string(&e),
    }
}

/// Flushes and releases a store opened with [`create_store`].
///
/// The pointer is invalid after this call, whatever the response.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(state: *mut AppDbState) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_store".to_string());
        return response_to_c_string(&error);
    }

    let state = unsafe { Box::from_raw(state) };

    match state.close_database() {
        Ok(_) => response_to_c_string(&AppResponse::success("Store closed successfully")),
        Err(e) => response_to_c_string(&e),
    }
}

/// Releases a string returned by any function in this library.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

fn verdict_to_c_string(verdict: &FieldVerdict) -> *const c_char {
    let response = match serde_json::to_string(verdict) {
        Ok(json) => AppResponse::Ok(json),
        Err(e) => AppResponse::SerializationError(format!("Error serializing verdict: {e}")),
    };
    response_to_c_string(&response)
}

/// Serializes `response` to JSON and hands it out as a C string.
///
/// Returns a null pointer if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String.
///
/// * `Ok(String)` - If conversion was successful
/// * `Err(*const c_char)` - A ready-to-return `BadRequest` response otherwise
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
