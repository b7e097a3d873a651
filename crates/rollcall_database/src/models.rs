//! Diesel models for the registry tables.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rollcall_core::{Dashboard, FeatAssociation, NewDashboard, NewFeatAssociation};

/// Database row for the dashboards table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::dashboards)]
#[diesel(primary_key(message_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DashboardRow {
    /// Message the dashboard keeps editing.
    pub message_id: i64,
    /// Tracked role.
    pub role_id: i64,
    /// Channel the message lives in.
    pub channel_id: i64,
    /// Guild the role belongs to.
    pub guild_id: i64,
    /// Registration time, assigned by the database.
    pub created_at: NaiveDateTime,
}

/// Insertable struct for the dashboards table.
///
/// `created_at` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::dashboards)]
pub struct NewDashboardRow {
    /// Message the dashboard will keep editing.
    pub message_id: i64,
    /// Tracked role.
    pub role_id: i64,
    /// Channel the message lives in.
    pub channel_id: i64,
    /// Guild the role belongs to.
    pub guild_id: i64,
}

/// Database row for the feats table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::feats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeatRow {
    /// Serial primary key; orders associations by insertion.
    pub id: i32,
    /// Tracked role the badge decorates.
    pub role_id: i64,
    /// Role whose holders receive the badge.
    pub feat_role_id: i64,
    /// Badge text or emoji.
    pub feat_description: String,
    /// Creation time, assigned by the database.
    pub created_at: NaiveDateTime,
}

/// Insertable struct for the feats table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::feats)]
pub struct NewFeatRow {
    /// Tracked role the badge decorates.
    pub role_id: i64,
    /// Role whose holders receive the badge.
    pub feat_role_id: i64,
    /// Badge text or emoji.
    pub feat_description: String,
}

impl From<DashboardRow> for Dashboard {
    fn from(row: DashboardRow) -> Self {
        Dashboard {
            message_id: row.message_id,
            role_id: row.role_id,
            channel_id: row.channel_id,
            guild_id: row.guild_id,
            created_at: row.created_at,
        }
    }
}

impl From<NewDashboard> for NewDashboardRow {
    fn from(dashboard: NewDashboard) -> Self {
        NewDashboardRow {
            message_id: dashboard.message_id,
            role_id: dashboard.role_id,
            channel_id: dashboard.channel_id,
            guild_id: dashboard.guild_id,
        }
    }
}

impl From<FeatRow> for FeatAssociation {
    fn from(row: FeatRow) -> Self {
        FeatAssociation {
            role_id: row.role_id,
            feat_role_id: row.feat_role_id,
            feat_description: row.feat_description,
            created_at: row.created_at,
        }
    }
}

impl From<NewFeatAssociation> for NewFeatRow {
    fn from(feat: NewFeatAssociation) -> Self {
        NewFeatRow {
            role_id: feat.role_id,
            feat_role_id: feat.feat_role_id,
            feat_description: feat.feat_description,
        }
    }
}
