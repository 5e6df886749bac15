//! Error types for rollcall.
//!
//! This crate provides the foundation error types used throughout the rollcall workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use rollcall_error::{ConfigError, RollcallResult};
//!
//! fn load() -> RollcallResult<String> {
//!     Err(ConfigError::new("discord_token is not set"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod json;
mod platform;

pub use config::ConfigError;
pub use error::{RollcallError, RollcallErrorKind, RollcallResult};
pub use http::HttpError;
pub use json::JsonError;
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
