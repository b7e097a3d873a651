//! Live role membership snapshots.

use derive_getters::Getters;
use std::collections::HashMap;

/// Badge lists keyed by member id, as computed by the feat lookup.
pub type FeatMap = HashMap<u64, Vec<String>>;

/// One member of a tracked role at poll time.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RoleMember {
    /// Discord user id.
    user_id: u64,
    /// Stable mention token, e.g. `<@123>`.
    mention: String,
    /// True when presence status is anything but offline.
    online: bool,
}

impl RoleMember {
    /// Create a new role member entry.
    pub fn new(user_id: u64, mention: impl Into<String>, online: bool) -> Self {
        Self {
            user_id,
            mention: mention.into(),
            online,
        }
    }
}

/// A tracked role's membership at poll time.
///
/// Member order is whatever the gateway cache yielded; the renderer imposes
/// its own ordering.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RoleSnapshot {
    /// The tracked role.
    role_id: u64,
    /// Display name of the role, used in the dashboard header.
    role_name: String,
    /// Current members holding the role.
    members: Vec<RoleMember>,
}

impl RoleSnapshot {
    /// Create a new snapshot.
    pub fn new(role_id: u64, role_name: impl Into<String>, members: Vec<RoleMember>) -> Self {
        Self {
            role_id,
            role_name: role_name.into(),
            members,
        }
    }

    /// Number of members whose presence is not offline.
    pub fn online_count(&self) -> usize {
        self.members.iter().filter(|m| *m.online()).count()
    }
}
