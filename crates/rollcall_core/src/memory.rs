//! In-memory registry implementation.

use crate::{
    Dashboard, DashboardRegistry, FeatAssociation, NewDashboard, NewFeatAssociation,
    RegistryResult,
};
use async_trait::async_trait;
use rollcall_error::{DatabaseError, DatabaseErrorKind};
use tokio::sync::Mutex;

/// Volatile [`DashboardRegistry`] backed by process memory.
///
/// Used by the engine tests and by ephemeral runs where restart recovery is
/// not wanted. Mirrors the PostgreSQL implementation's observable behavior:
/// `insert` rejects a duplicate `message_id`, and `list_feats` returns
/// associations in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    dashboards: Mutex<Vec<Dashboard>>,
    feats: Mutex<Vec<FeatAssociation>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DashboardRegistry for InMemoryRegistry {
    async fn insert(&self, dashboard: NewDashboard) -> RegistryResult<()> {
        let mut rows = self.dashboards.lock().await;
        if rows.iter().any(|row| row.message_id == dashboard.message_id) {
            return Err(DatabaseError::new(DatabaseErrorKind::Query(format!(
                "duplicate key value for message_id {}",
                dashboard.message_id
            ))));
        }
        rows.push(Dashboard {
            message_id: dashboard.message_id,
            role_id: dashboard.role_id,
            channel_id: dashboard.channel_id,
            guild_id: dashboard.guild_id,
            created_at: chrono::Utc::now().naive_utc(),
        });
        Ok(())
    }

    async fn delete(&self, message_id: i64) -> RegistryResult<()> {
        self.dashboards
            .lock()
            .await
            .retain(|row| row.message_id != message_id);
        Ok(())
    }

    async fn list_all(&self) -> RegistryResult<Vec<Dashboard>> {
        Ok(self.dashboards.lock().await.clone())
    }

    async fn insert_feat(&self, feat: NewFeatAssociation) -> RegistryResult<()> {
        self.feats.lock().await.push(FeatAssociation {
            role_id: feat.role_id,
            feat_role_id: feat.feat_role_id,
            feat_description: feat.feat_description,
            created_at: chrono::Utc::now().naive_utc(),
        });
        Ok(())
    }

    async fn delete_feat(&self, role_id: i64, feat_role_id: i64) -> RegistryResult<()> {
        self.feats
            .lock()
            .await
            .retain(|row| !(row.role_id == role_id && row.feat_role_id == feat_role_id));
        Ok(())
    }

    async fn list_feats(&self, role_id: i64) -> RegistryResult<Vec<FeatAssociation>> {
        Ok(self
            .feats
            .lock()
            .await
            .iter()
            .filter(|row| row.role_id == role_id)
            .cloned()
            .collect())
    }
}
