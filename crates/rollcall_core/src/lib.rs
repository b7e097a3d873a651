//! Domain types and contracts for the Rollcall dashboard bot.
//!
//! This crate holds everything the dashboard engine needs that does not
//! touch Discord or PostgreSQL directly:
//! - **dashboard**: registry row types (`Dashboard`, `FeatAssociation`)
//! - **snapshot**: live role membership snapshots fed to the renderer
//! - **render**: the pure, deterministic dashboard body renderer
//! - **registry**: the `DashboardRegistry` trait implemented by the
//!   PostgreSQL store and by [`InMemoryRegistry`]
//!
//! Keeping these platform-free makes the refresh engine testable without a
//! gateway connection or a database.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dashboard;
mod memory;
mod registry;
mod render;
mod snapshot;

pub use dashboard::{Dashboard, FeatAssociation, NewDashboard, NewFeatAssociation};
pub use memory::InMemoryRegistry;
pub use registry::{DashboardRegistry, RegistryResult};
pub use render::{render_dashboard, OFFLINE_MARKER, ONLINE_MARKER};
pub use snapshot::{FeatMap, RoleMember, RoleSnapshot};
