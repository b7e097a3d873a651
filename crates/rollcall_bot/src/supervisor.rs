//! Ownership of the live dashboard task set.

use crate::{DashboardHandle, DashboardTask, FeatLookup, RoleGateway, RollcallConfig};
use rollcall_core::{DashboardRegistry, NewDashboard, RegistryResult};
use rollcall_error::RollcallResult;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Body of a freshly registered dashboard message, before the first render.
pub const PLACEHOLDER_TEXT: &str = "Rollcall sees this, working...";

/// Timing knobs for the supervisor and its tasks.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Delay between render/diff/edit cycles of every task.
    pub poll_interval: Duration,
    /// Delay between task spawns during restart recovery, to stay friendly
    /// with platform rate limits.
    pub spawn_spacing: Duration,
    /// Tasks re-confirm their target message every N ticks.
    pub existence_check_ticks: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            spawn_spacing: Duration::from_millis(200),
            existence_check_ticks: 100,
        }
    }
}

impl From<&RollcallConfig> for SupervisorConfig {
    fn from(config: &RollcallConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            spawn_spacing: config.spawn_spacing,
            existence_check_ticks: config.existence_check_ticks,
        }
    }
}

/// Owns every live [`DashboardTask`].
///
/// Exactly one task exists per live `message_id`; all spawning goes through
/// the supervisor, never fire-and-forget. A task that terminates on its own
/// (target message lost) has its registry row deleted and its entry removed
/// from the live set by the spawn wrapper.
pub struct Supervisor<G> {
    gateway: Arc<G>,
    registry: Arc<dyn DashboardRegistry>,
    feats: Arc<FeatLookup>,
    config: SupervisorConfig,
    tasks: Arc<Mutex<HashMap<u64, JoinHandle<()>>>>,
}

impl<G: RoleGateway + 'static> Supervisor<G> {
    /// Create a supervisor with an empty task set.
    pub fn new(
        gateway: Arc<G>,
        registry: Arc<dyn DashboardRegistry>,
        feats: Arc<FeatLookup>,
        config: SupervisorConfig,
    ) -> Self {
        Self {
            gateway,
            registry,
            feats,
            config,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Resurrect one task per persisted dashboard row.
    ///
    /// Called on gateway ready. Spawns are spaced apart by the configured
    /// delay. Rows that already have a live task are skipped, so a gateway
    /// reconnect does not double-spawn.
    ///
    /// Returns the number of tasks actually spawned.
    #[instrument(skip(self))]
    pub async fn start(&self) -> RegistryResult<usize> {
        let rows = self.registry.list_all().await?;
        let mut spawned = 0;
        for (index, row) in rows.iter().enumerate() {
            if index > 0 {
                sleep(self.config.spawn_spacing).await;
            }
            if self.spawn_task(DashboardHandle::from(row)).await {
                spawned += 1;
            }
        }
        info!(rows = rows.len(), spawned, "dashboard recovery complete");
        Ok(spawned)
    }

    /// Register a new dashboard for a role in a channel.
    ///
    /// Sends the placeholder message, persists the row, and spawns exactly
    /// one task, which edits the placeholder into the first render.
    ///
    /// Returns the id of the new dashboard message.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        role_id: u64,
        channel_id: u64,
        guild_id: u64,
    ) -> RollcallResult<u64> {
        let message_id = self
            .gateway
            .send_message(channel_id, PLACEHOLDER_TEXT)
            .await?;

        self.registry
            .insert(NewDashboard {
                message_id: message_id as i64,
                role_id: role_id as i64,
                channel_id: channel_id as i64,
                guild_id: guild_id as i64,
            })
            .await?;

        self.spawn_task(DashboardHandle {
            message_id,
            channel_id,
            guild_id,
            role_id,
        })
        .await;

        info!(message_id, role_id, "dashboard registered");
        Ok(message_id)
    }

    /// Tear down the dashboard bound to `message_id`.
    ///
    /// Deletes the Discord message (best effort), removes the registry row,
    /// and aborts the live task if one exists.
    #[instrument(skip(self))]
    pub async fn deregister(&self, channel_id: u64, message_id: u64) -> RollcallResult<()> {
        match self.gateway.delete_message(channel_id, message_id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => debug!("dashboard message already gone"),
            Err(e) => warn!(error = %e, "could not delete dashboard message"),
        }

        self.registry.delete(message_id as i64).await?;

        if let Some(handle) = self.tasks.lock().await.remove(&message_id) {
            handle.abort();
        }
        info!(message_id, "dashboard deregistered");
        Ok(())
    }

    /// Deregister only if `message_id` is a known dashboard.
    ///
    /// Used by the reaction handler, which sees reactions on arbitrary
    /// messages. Returns true when a dashboard was actually torn down.
    pub async fn deregister_if_tracked(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> RollcallResult<bool> {
        let live = self.tasks.lock().await.contains_key(&message_id);
        let tracked = live
            || self
                .registry
                .list_all()
                .await?
                .iter()
                .any(|row| row.message_id == message_id as i64);
        if !tracked {
            return Ok(false);
        }
        self.deregister(channel_id, message_id).await?;
        Ok(true)
    }

    /// Number of currently live tasks.
    pub async fn task_count(&self) -> usize {
        self.tasks.lock().await.len()
    }

    /// Abort every live task and clear the set.
    pub async fn shutdown(&self) {
        let mut tasks = self.tasks.lock().await;
        for (message_id, handle) in tasks.drain() {
            debug!(message_id, "aborting dashboard task");
            handle.abort();
        }
    }

    /// Spawn a task for a dashboard unless one is already live.
    async fn spawn_task(&self, handle: DashboardHandle) -> bool {
        let mut tasks = self.tasks.lock().await;
        if tasks.contains_key(&handle.message_id) {
            warn!(
                message_id = handle.message_id,
                "task already live, not double-spawning"
            );
            return false;
        }

        let task = DashboardTask::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.feats),
            handle,
            self.config.poll_interval,
            self.config.existence_check_ticks,
        );
        let registry = Arc::clone(&self.registry);
        let task_set = Arc::clone(&self.tasks);
        let message_id = handle.message_id;

        let join = tokio::spawn(async move {
            // run() only returns when the target message is gone; an
            // aborted task never reaches this cleanup, which is fine
            // because deregister already removed the row.
            task.run().await;
            if let Err(e) = registry.delete(message_id as i64).await {
                warn!(error = %e, message_id, "could not delete row for lost message");
            }
            task_set.lock().await.remove(&message_id);
        });
        tasks.insert(message_id, join);
        true
    }
}
