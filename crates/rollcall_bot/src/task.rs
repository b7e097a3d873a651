//! The per-dashboard refresh task.

use crate::{FeatLookup, RoleGateway};
use rollcall_core::{render_dashboard, Dashboard};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// The identifiers a dashboard task works with, as raw snowflakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardHandle {
    /// Message the task keeps editing.
    pub message_id: u64,
    /// Channel the message lives in.
    pub channel_id: u64,
    /// Guild the role belongs to.
    pub guild_id: u64,
    /// Tracked role.
    pub role_id: u64,
}

impl From<&Dashboard> for DashboardHandle {
    fn from(row: &Dashboard) -> Self {
        Self {
            message_id: row.message_id as u64,
            channel_id: row.channel_id as u64,
            guild_id: row.guild_id as u64,
            role_id: row.role_id as u64,
        }
    }
}

/// What a single poll tick did.
enum Tick {
    /// Nothing to do, or a transient failure worth retrying next tick.
    Idle,
    /// The message body was updated.
    Edited,
    /// The target message no longer exists; the task must terminate.
    MessageLost,
}

/// One long-lived refresh loop for one dashboard.
///
/// The task polls role membership on a fixed interval, renders the
/// canonical body, and edits the target message only when the body
/// changed since the last successful edit. The last rendered body lives
/// only in memory: after a restart the first successful render always
/// performs one edit, even if the remote content happens to match.
///
/// Termination is voluntary and absorbing: [`DashboardTask::run`] returns
/// only when the target message is confirmed gone, and the supervisor's
/// spawn wrapper then deletes the registry row. Everything else — rate
/// limits, gateway cache misses, registry hiccups — is logged and retried
/// on the next tick.
pub struct DashboardTask<G> {
    gateway: Arc<G>,
    feats: Arc<FeatLookup>,
    handle: DashboardHandle,
    poll_interval: Duration,
    existence_check_ticks: u64,
    last_rendered: Option<String>,
}

impl<G: RoleGateway> DashboardTask<G> {
    /// Create a task for one dashboard row.
    pub fn new(
        gateway: Arc<G>,
        feats: Arc<FeatLookup>,
        handle: DashboardHandle,
        poll_interval: Duration,
        existence_check_ticks: u64,
    ) -> Self {
        Self {
            gateway,
            feats,
            handle,
            poll_interval,
            existence_check_ticks,
            last_rendered: None,
        }
    }

    /// Run the refresh loop until the target message is lost.
    #[instrument(
        skip(self),
        fields(
            message_id = self.handle.message_id,
            role_id = self.handle.role_id,
            guild_id = self.handle.guild_id,
        )
    )]
    pub async fn run(mut self) {
        self.gateway.wait_ready().await;

        // Stale rows survive restarts; confirming the target up front is
        // the self-healing path that clears them out.
        match self
            .gateway
            .confirm_message(self.handle.channel_id, self.handle.message_id)
            .await
        {
            Ok(()) => debug!("target message confirmed, entering poll loop"),
            Err(e) if e.is_not_found() => {
                info!("target message is gone, terminating");
                return;
            }
            Err(e) => warn!(error = %e, "could not confirm target message, polling anyway"),
        }

        let mut tick: u64 = 0;
        loop {
            tick = tick.wrapping_add(1);
            match self.poll(tick).await {
                Tick::Idle | Tick::Edited => {}
                Tick::MessageLost => {
                    info!(tick, "target message is gone, terminating");
                    return;
                }
            }
            sleep(self.poll_interval).await;
        }
    }

    /// One poll cycle: snapshot, render, diff, and edit if needed.
    async fn poll(&mut self, tick: u64) -> Tick {
        // Content diffing alone never notices an externally deleted message
        // while the body is stable, so re-confirm existence every Nth tick.
        if self.existence_check_ticks > 0 && tick % self.existence_check_ticks == 0 {
            match self
                .gateway
                .confirm_message(self.handle.channel_id, self.handle.message_id)
                .await
            {
                Ok(()) => {}
                Err(e) if e.is_not_found() => return Tick::MessageLost,
                Err(e) => warn!(error = %e, tick, "existence check failed"),
            }
        }

        let snapshot = match self
            .gateway
            .role_snapshot(self.handle.guild_id, self.handle.role_id)
            .await
        {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, tick, "role snapshot failed, skipping tick");
                return Tick::Idle;
            }
        };

        let feats = match self
            .feats
            .get_feats(
                self.gateway.as_ref(),
                self.handle.guild_id,
                self.handle.role_id,
            )
            .await
        {
            Ok(feats) => feats,
            Err(e) => {
                warn!(error = %e, tick, "feat lookup failed, skipping tick");
                return Tick::Idle;
            }
        };

        let body = render_dashboard(&snapshot, &feats);
        if self.last_rendered.as_deref() == Some(body.as_str()) {
            return Tick::Idle;
        }

        match self
            .gateway
            .edit_message(self.handle.channel_id, self.handle.message_id, &body)
            .await
        {
            Ok(()) => {
                debug!(tick, members = snapshot.members().len(), "dashboard updated");
                self.last_rendered = Some(body);
                Tick::Edited
            }
            Err(e) if e.is_not_found() => Tick::MessageLost,
            Err(e) => {
                // last_rendered stays untouched so the next tick retries
                // the same pending content.
                warn!(error = %e, tick, "edit failed, will retry");
                Tick::Idle
            }
        }
    }
}
