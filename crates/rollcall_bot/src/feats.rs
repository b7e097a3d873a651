//! Feat (badge) lookup with TTL caching.

use crate::RoleGateway;
use parking_lot::Mutex;
use rollcall_cache::TtlCache;
use rollcall_core::{DashboardRegistry, FeatMap};
use rollcall_error::RollcallResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Computes the badge list for every member of a tracked role.
///
/// Feats change far less often than presence, so results are cached per
/// `(guild, role)` with a TTL that is a multiple of the poll interval. An
/// empty result is cached too — a role without feats must not cost a store
/// round-trip on every poll. Admin commands call [`FeatLookup::invalidate`]
/// so their changes surface on the next poll instead of waiting out the
/// TTL.
pub struct FeatLookup {
    registry: Arc<dyn DashboardRegistry>,
    cache: Mutex<TtlCache<(u64, u64), FeatMap>>,
    ttl: Duration,
}

impl FeatLookup {
    /// Create a lookup over the given registry with a fixed cache TTL.
    pub fn new(registry: Arc<dyn DashboardRegistry>, ttl: Duration) -> Self {
        Self {
            registry,
            cache: Mutex::new(TtlCache::default()),
            ttl,
        }
    }

    /// Badge lists for every decorated member of `role_id`.
    ///
    /// On cache miss or expiry, recomputes from the feat associations (in
    /// insertion order) and the badge roles' current membership.
    #[instrument(skip(self, gateway))]
    pub async fn get_feats<G>(
        &self,
        gateway: &G,
        guild_id: u64,
        role_id: u64,
    ) -> RollcallResult<FeatMap>
    where
        G: RoleGateway + ?Sized,
    {
        let key = (guild_id, role_id);
        if let Some(cached) = self.cache.lock().get(&key).map(|entry| entry.value().clone()) {
            return Ok(cached);
        }

        let associations = self.registry.list_feats(role_id as i64).await?;
        let mut map = FeatMap::new();
        for association in &associations {
            let holders = gateway
                .role_member_ids(guild_id, association.feat_role_id as u64)
                .await?;
            for user_id in holders {
                map.entry(user_id)
                    .or_default()
                    .push(association.feat_description.clone());
            }
        }

        tracing::debug!(
            associations = associations.len(),
            decorated_members = map.len(),
            "Recomputed feat map"
        );
        self.cache.lock().insert(key, map.clone(), Some(self.ttl));
        Ok(map)
    }

    /// Drop the cached mapping for `(guild, role)`.
    ///
    /// Returns true when an entry was actually cached.
    pub fn invalidate(&self, guild_id: u64, role_id: u64) -> bool {
        self.cache.lock().invalidate(&(guild_id, role_id))
    }
}
