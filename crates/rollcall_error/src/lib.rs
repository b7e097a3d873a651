//! Error types for the Rollcall dashboard bot.
//!
//! This crate provides the foundation error types used throughout the
//! Rollcall workspace.
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
//! use rollcall_error::{RollcallResult, ConfigError};
//!
//! fn load_setting() -> RollcallResult<String> {
//!     Err(ConfigError::new("ROLLCALL_POLL_SECS is not a number"))?
//! }
//!
//! match load_setting() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod database;
mod discord;
mod error;

pub use command::{CommandError, CommandErrorKind, CommandResult};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind, DatabaseResult};
pub use discord::{DiscordError, DiscordErrorKind, DiscordResult};
pub use error::{RollcallError, RollcallErrorKind, RollcallResult};
