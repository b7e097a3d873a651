//! PostgreSQL registry implementation.

use crate::models::{DashboardRow, FeatRow, NewDashboardRow, NewFeatRow};
use crate::schema::{dashboards, feats};
use crate::PgPool;
use async_trait::async_trait;
use diesel::prelude::*;
use rollcall_core::{
    Dashboard, DashboardRegistry, FeatAssociation, NewDashboard, NewFeatAssociation,
    RegistryResult,
};
use rollcall_error::DatabaseError;
use tracing::instrument;

/// Production [`DashboardRegistry`] backed by PostgreSQL.
///
/// Every operation checks one connection out of the pool, so concurrent
/// calls from many dashboard tasks never share a connection.
///
/// # Example
/// ```no_run
/// use rollcall_database::{establish_pool, run_migrations, PostgresRegistry};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = establish_pool()?;
/// run_migrations(&pool)?;
/// let registry = PostgresRegistry::new(pool);
/// // Use registry.insert(), list_all(), etc.
/// # Ok(())
/// # }
/// ```
pub struct PostgresRegistry {
    pool: PgPool,
}

impl PostgresRegistry {
    /// Create a new registry over an established pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardRegistry for PostgresRegistry {
    #[instrument(skip(self), fields(message_id = dashboard.message_id, role_id = dashboard.role_id))]
    async fn insert(&self, dashboard: NewDashboard) -> RegistryResult<()> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        diesel::insert_into(dashboards::table)
            .values(NewDashboardRow::from(dashboard))
            .execute(&mut conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, message_id: i64) -> RegistryResult<()> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        diesel::delete(dashboards::table.find(message_id))
            .execute(&mut conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RegistryResult<Vec<Dashboard>> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        let rows: Vec<DashboardRow> = dashboards::table
            .order(dashboards::created_at.asc())
            .load(&mut conn)
            .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(Dashboard::from).collect())
    }

    #[instrument(skip(self), fields(role_id = feat.role_id, feat_role_id = feat.feat_role_id))]
    async fn insert_feat(&self, feat: NewFeatAssociation) -> RegistryResult<()> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        diesel::insert_into(feats::table)
            .values(NewFeatRow::from(feat))
            .execute(&mut conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_feat(&self, role_id: i64, feat_role_id: i64) -> RegistryResult<()> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        diesel::delete(
            feats::table
                .filter(feats::role_id.eq(role_id))
                .filter(feats::feat_role_id.eq(feat_role_id)),
        )
        .execute(&mut conn)
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_feats(&self, role_id: i64) -> RegistryResult<Vec<FeatAssociation>> {
        let mut conn = self.pool.get().map_err(DatabaseError::from)?;

        // Serial id order is exact insertion order, which fixes how badges
        // line up on a member line.
        let rows: Vec<FeatRow> = feats::table
            .filter(feats::role_id.eq(role_id))
            .order(feats::id.asc())
            .load(&mut conn)
            .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(FeatAssociation::from).collect())
    }
}
