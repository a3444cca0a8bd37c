//! Entry/listing view toggle.

use crate::app_response::AppResponse;
use crate::listing::{list_results, Listing};
use crate::result_store::ResultStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Entry,
    Listing,
}

/// Tracks which view is showing. Starts on the entry form.
#[derive(Debug, Default)]
pub struct Navigator {
    view: View,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// The back action only exists on the listing view.
    pub fn back_visible(&self) -> bool {
        self.view == View::Listing
    }

    /// Switches to the listing view and renders it from a fresh read.
    /// The view does not change if the read fails.
    pub fn show_listing<S: ResultStore + ?Sized>(&mut self, store: &S) -> Result<Listing, AppResponse> {
        let listing = list_results(store)?;
        self.view = View::Listing;
        Ok(listing)
    }

    pub fn show_entry(&mut self) {
        self.view = View::Entry;
    }
}
