//! rollcall: tally reaction categories on a Discord message and export
//! attendance to a spreadsheet.
//!
//! The binary wires [`Settings`] into the aggregation pipeline from
//! `rollcall_core`, the spreadsheet export from `rollcall_sheets` and the
//! gateway client from `rollcall_social`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;
mod settings;

pub use observability::{ObservabilityConfig, init_observability};
pub use settings::Settings;
