//! Shared test doubles for the engine tests.

#![allow(dead_code)]

use async_trait::async_trait;
use rollcall_bot::RoleGateway;
use rollcall_core::{
    Dashboard, DashboardRegistry, FeatAssociation, NewDashboard, NewFeatAssociation,
    RegistryResult, RoleMember, RoleSnapshot,
};
use rollcall_error::{DiscordError, DiscordErrorKind, DiscordResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct MockInner {
    role_name: String,
    members: Vec<RoleMember>,
    feat_holders: HashMap<u64, Vec<u64>>,
    missing: HashSet<u64>,
    failing_edits: u32,
    edits: Vec<(u64, String)>,
    edit_attempts: u32,
    sent: Vec<(u64, String)>,
    deleted: Vec<u64>,
    confirms: u32,
    next_message_id: u64,
}

/// Scripted [`RoleGateway`] recording every call the engine makes.
pub struct MockGateway {
    inner: Mutex<MockInner>,
}

impl MockGateway {
    pub fn new(role_name: &str) -> Self {
        Self {
            inner: Mutex::new(MockInner {
                role_name: role_name.to_string(),
                next_message_id: 500,
                ..MockInner::default()
            }),
        }
    }

    pub fn set_members(&self, members: Vec<RoleMember>) {
        self.inner.lock().expect("lock").members = members;
    }

    pub fn set_feat_holders(&self, feat_role_id: u64, holders: Vec<u64>) {
        self.inner
            .lock()
            .expect("lock")
            .feat_holders
            .insert(feat_role_id, holders);
    }

    /// Make a message 404 from now on.
    pub fn mark_missing(&self, message_id: u64) {
        self.inner.lock().expect("lock").missing.insert(message_id);
    }

    /// Fail the next `count` edit attempts with a transient error.
    pub fn fail_next_edits(&self, count: u32) {
        self.inner.lock().expect("lock").failing_edits = count;
    }

    /// Successful edits, as (message_id, body).
    pub fn edits(&self) -> Vec<(u64, String)> {
        self.inner.lock().expect("lock").edits.clone()
    }

    /// Edit attempts, failed ones included.
    pub fn edit_attempts(&self) -> u32 {
        self.inner.lock().expect("lock").edit_attempts
    }

    /// Sent messages, as (channel_id, body).
    pub fn sent(&self) -> Vec<(u64, String)> {
        self.inner.lock().expect("lock").sent.clone()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.inner.lock().expect("lock").deleted.clone()
    }

    pub fn confirm_count(&self) -> u32 {
        self.inner.lock().expect("lock").confirms
    }
}

#[async_trait]
impl RoleGateway for MockGateway {
    async fn wait_ready(&self) {}

    async fn role_snapshot(&self, _guild_id: u64, role_id: u64) -> DiscordResult<RoleSnapshot> {
        let inner = self.inner.lock().expect("lock");
        Ok(RoleSnapshot::new(
            role_id,
            inner.role_name.clone(),
            inner.members.clone(),
        ))
    }

    async fn role_member_ids(&self, _guild_id: u64, role_id: u64) -> DiscordResult<Vec<u64>> {
        let inner = self.inner.lock().expect("lock");
        Ok(inner.feat_holders.get(&role_id).cloned().unwrap_or_default())
    }

    async fn confirm_message(&self, _channel_id: u64, message_id: u64) -> DiscordResult<()> {
        let mut inner = self.inner.lock().expect("lock");
        inner.confirms += 1;
        if inner.missing.contains(&message_id) {
            return Err(DiscordError::new(DiscordErrorKind::MessageNotFound(
                message_id,
            )));
        }
        Ok(())
    }

    async fn edit_message(
        &self,
        _channel_id: u64,
        message_id: u64,
        content: &str,
    ) -> DiscordResult<()> {
        let mut inner = self.inner.lock().expect("lock");
        inner.edit_attempts += 1;
        if inner.missing.contains(&message_id) {
            return Err(DiscordError::new(DiscordErrorKind::MessageNotFound(
                message_id,
            )));
        }
        if inner.failing_edits > 0 {
            inner.failing_edits -= 1;
            return Err(DiscordError::new(DiscordErrorKind::Api(
                "rate limited".to_string(),
            )));
        }
        inner.edits.push((message_id, content.to_string()));
        Ok(())
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> DiscordResult<u64> {
        let mut inner = self.inner.lock().expect("lock");
        let message_id = inner.next_message_id;
        inner.next_message_id += 1;
        inner.sent.push((channel_id, content.to_string()));
        Ok(message_id)
    }

    async fn delete_message(&self, _channel_id: u64, message_id: u64) -> DiscordResult<()> {
        let mut inner = self.inner.lock().expect("lock");
        inner.deleted.push(message_id);
        inner.missing.insert(message_id);
        Ok(())
    }
}

/// Registry wrapper counting `list_feats` calls, for cache coherence tests.
pub struct CountingRegistry<R> {
    inner: R,
    list_feats_calls: AtomicU32,
}

impl<R> CountingRegistry<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            list_feats_calls: AtomicU32::new(0),
        }
    }

    pub fn list_feats_calls(&self) -> u32 {
        self.list_feats_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: DashboardRegistry> DashboardRegistry for CountingRegistry<R> {
    async fn insert(&self, dashboard: NewDashboard) -> RegistryResult<()> {
        self.inner.insert(dashboard).await
    }

    async fn delete(&self, message_id: i64) -> RegistryResult<()> {
        self.inner.delete(message_id).await
    }

    async fn list_all(&self) -> RegistryResult<Vec<Dashboard>> {
        self.inner.list_all().await
    }

    async fn insert_feat(&self, feat: NewFeatAssociation) -> RegistryResult<()> {
        self.inner.insert_feat(feat).await
    }

    async fn delete_feat(&self, role_id: i64, feat_role_id: i64) -> RegistryResult<()> {
        self.inner.delete_feat(role_id, feat_role_id).await
    }

    async fn list_feats(&self, role_id: i64) -> RegistryResult<Vec<FeatAssociation>> {
        self.list_feats_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_feats(role_id).await
    }
}
