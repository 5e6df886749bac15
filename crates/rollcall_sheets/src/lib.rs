//! Spreadsheet export for rollcall.
//!
//! Posts the attendance payload to a spreadsheet web app (for example a
//! Google Apps Script deployment) as JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatcher;
mod response;

pub use dispatcher::SheetsDispatcher;
pub use response::SyncResponse;
