//! Registry row types.
//!
//! Discord snowflakes are stored as `i64` (the database column type is
//! `BigInt`); conversions at the gateway boundary are bit-preserving casts,
//! so the full unsigned 64-bit range survives a round-trip.

use chrono::NaiveDateTime;

/// One active tracked-role display, bound to one Discord message.
///
/// At most one live dashboard exists per `message_id` (the primary key in
/// the persistent store). `role_id` is not unique: two dashboards may track
/// the same role in different channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// Message the dashboard keeps editing.
    pub message_id: i64,
    /// Tracked role.
    pub role_id: i64,
    /// Channel the message lives in.
    pub channel_id: i64,
    /// Guild the role belongs to.
    pub guild_id: i64,
    /// When the dashboard was registered. Informational only.
    pub created_at: NaiveDateTime,
}

/// Insert payload for a new dashboard row.
///
/// `created_at` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDashboard {
    /// Message the dashboard will keep editing.
    pub message_id: i64,
    /// Tracked role.
    pub role_id: i64,
    /// Channel the message lives in.
    pub channel_id: i64,
    /// Guild the role belongs to.
    pub guild_id: i64,
}

/// One (tracked role, badge role, description) association.
///
/// Uniqueness is not enforced: duplicate triples are allowed and render as
/// duplicate badges. Rows are created and deleted by admin commands, never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatAssociation {
    /// Tracked role the badge decorates.
    pub role_id: i64,
    /// Role whose holders receive the badge.
    pub feat_role_id: i64,
    /// Badge text or emoji appended to the member line.
    pub feat_description: String,
    /// When the association was created. Orders badge rendering.
    pub created_at: NaiveDateTime,
}

/// Insert payload for a new feat association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeatAssociation {
    /// Tracked role the badge decorates.
    pub role_id: i64,
    /// Role whose holders receive the badge.
    pub feat_role_id: i64,
    /// Badge text or emoji.
    pub feat_description: String,
}
