//! The persistent registry contract.

use crate::{Dashboard, FeatAssociation, NewDashboard, NewFeatAssociation};
use async_trait::async_trait;
use rollcall_error::DatabaseError;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, DatabaseError>;

/// Durable store of active dashboards and feat associations.
///
/// Implementations must tolerate concurrent calls from many dashboard tasks
/// (the PostgreSQL implementation checks one pooled connection out per
/// call). Each task treats its own row as exclusively its concern; the
/// registry itself never coordinates tasks.
#[async_trait]
pub trait DashboardRegistry: Send + Sync {
    /// Persist a new dashboard row.
    ///
    /// Fails if a row for the same `message_id` already exists: at most one
    /// live dashboard per message.
    async fn insert(&self, dashboard: NewDashboard) -> RegistryResult<()>;

    /// Delete the dashboard row for `message_id`, if any.
    async fn delete(&self, message_id: i64) -> RegistryResult<()>;

    /// All persisted dashboards, for restart recovery.
    async fn list_all(&self) -> RegistryResult<Vec<Dashboard>>;

    /// Persist a new feat association. Duplicates are allowed.
    async fn insert_feat(&self, feat: NewFeatAssociation) -> RegistryResult<()>;

    /// Delete every association matching (role, feat role).
    async fn delete_feat(&self, role_id: i64, feat_role_id: i64) -> RegistryResult<()>;

    /// Associations for a tracked role, in insertion order.
    async fn list_feats(&self, role_id: i64) -> RegistryResult<Vec<FeatAssociation>>;
}
