//! PostgreSQL persistence for Rollcall.
//!
//! This crate provides the durable side of the dashboard registry:
//!
//! - Diesel schema for the `dashboards` and `feats` tables
//! - Embedded migrations, run idempotently at process start
//! - r2d2 connection pooling (one pooled connection per registry call, so
//!   many dashboard tasks can hit the store concurrently)
//! - [`PostgresRegistry`], the production implementation of
//!   `rollcall_core::DashboardRegistry`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod models;
mod registry;

// Public module for external access
pub mod schema;

pub use connection::{establish_pool, run_migrations, PgPool, MIGRATIONS};
pub use models::{DashboardRow, FeatRow, NewDashboardRow, NewFeatRow};
pub use registry::PostgresRegistry;

use rollcall_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
