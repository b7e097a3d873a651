//! Tests for the dashboard task state machine.
//!
//! All tests run under a paused clock; sleeps auto-advance, so simulated
//! hours finish in milliseconds.

mod common;

use common::MockGateway;
use rollcall_bot::{DashboardHandle, DashboardTask, FeatLookup};
use rollcall_core::{DashboardRegistry, InMemoryRegistry, RoleMember};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

const POLL: Duration = Duration::from_secs(5);
const MESSAGE_ID: u64 = 100;

const HANDLE: DashboardHandle = DashboardHandle {
    message_id: MESSAGE_ID,
    channel_id: 1,
    guild_id: 1000,
    role_id: 7,
};

fn feat_lookup() -> Arc<FeatLookup> {
    let registry: Arc<dyn DashboardRegistry> = Arc::new(InMemoryRegistry::new());
    // Long TTL: these tests exercise the task, not cache expiry.
    Arc::new(FeatLookup::new(registry, Duration::from_secs(3600)))
}

fn task(gateway: &Arc<MockGateway>, existence_check_ticks: u64) -> DashboardTask<MockGateway> {
    DashboardTask::new(
        Arc::clone(gateway),
        feat_lookup(),
        HANDLE,
        POLL,
        existence_check_ticks,
    )
}

#[tokio::test(start_paused = true)]
async fn test_first_render_always_edits() {
    let gateway = Arc::new(MockGateway::new("Guild-A"));
    gateway.set_members(vec![RoleMember::new(10, "@Alice", true)]);

    let running = tokio::spawn(task(&gateway, 1_000).run());
    sleep(Duration::from_secs(1)).await;

    // Render state is not persisted, so the first render has nothing to
    // diff against and edits unconditionally.
    assert_eq!(gateway.edits().len(), 1);
    assert_eq!(
        gateway.edits()[0].1,
        "Members of Guild-A:\n🟢 @Alice \n\nOnline: 1 / 1"
    );
    running.abort();
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_membership_skips_edits() {
    let gateway = Arc::new(MockGateway::new("Guild-A"));
    gateway.set_members(vec![
        RoleMember::new(10, "@Alice", true),
        RoleMember::new(11, "@Bob", false),
    ]);

    let running = tokio::spawn(task(&gateway, 1_000).run());
    sleep(POLL * 5).await;

    // Several polls, identical snapshot: exactly the initial edit.
    assert_eq!(gateway.edits().len(), 1);
    assert_eq!(gateway.edit_attempts(), 1);
    running.abort();
}

#[tokio::test(start_paused = true)]
async fn test_membership_change_triggers_edit() {
    let gateway = Arc::new(MockGateway::new("Guild-A"));
    gateway.set_members(vec![RoleMember::new(10, "@Alice", true)]);

    let running = tokio::spawn(task(&gateway, 1_000).run());
    sleep(Duration::from_secs(1)).await;
    assert_eq!(gateway.edits().len(), 1);

    gateway.set_members(vec![
        RoleMember::new(10, "@Alice", true),
        RoleMember::new(11, "@Bob", false),
    ]);
    sleep(POLL * 2).await;

    let edits = gateway.edits();
    assert_eq!(edits.len(), 2);
    assert!(edits[1].1.contains("@Bob"));
    assert!(edits[1].1.ends_with("Online: 1 / 2"));
    running.abort();
}

#[tokio::test(start_paused = true)]
async fn test_transient_edit_failure_retries_same_body() {
    let gateway = Arc::new(MockGateway::new("Guild-A"));
    gateway.set_members(vec![RoleMember::new(10, "@Alice", true)]);
    gateway.fail_next_edits(1);

    let running = tokio::spawn(task(&gateway, 1_000).run());
    sleep(POLL * 5).await;

    // Attempt 1 fails, attempt 2 retries the identical body and sticks;
    // nothing further changes, so attempts stop at 2.
    assert_eq!(gateway.edit_attempts(), 2);
    let edits = gateway.edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].1, "Members of Guild-A:\n🟢 @Alice \n\nOnline: 1 / 1");
    running.abort();
}

#[tokio::test(start_paused = true)]
async fn test_missing_message_at_startup_terminates() {
    let gateway = Arc::new(MockGateway::new("Guild-A"));
    gateway.set_members(vec![RoleMember::new(10, "@Alice", true)]);
    gateway.mark_missing(MESSAGE_ID);

    timeout(Duration::from_secs(30), task(&gateway, 1_000).run())
        .await
        .expect("task should terminate when the message is gone");
    assert!(gateway.edits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_edit_not_found_terminates() {
    let gateway = Arc::new(MockGateway::new("Guild-A"));
    gateway.set_members(vec![RoleMember::new(10, "@Alice", true)]);

    let running = tokio::spawn(task(&gateway, 1_000).run());
    sleep(Duration::from_secs(1)).await;
    assert_eq!(gateway.edits().len(), 1);

    // Deleting the message and changing membership makes the next diff
    // attempt an edit, which reports not-found.
    gateway.mark_missing(MESSAGE_ID);
    gateway.set_members(vec![]);

    timeout(POLL * 4, running)
        .await
        .expect("task should terminate after the failed edit")
        .expect("task does not panic");
}

#[tokio::test(start_paused = true)]
async fn test_periodic_existence_check_catches_deletion() {
    let gateway = Arc::new(MockGateway::new("Guild-A"));
    gateway.set_members(vec![RoleMember::new(10, "@Alice", true)]);

    // Check every 3rd tick so the test stays short.
    let running = tokio::spawn(task(&gateway, 3).run());
    sleep(Duration::from_secs(1)).await;
    assert_eq!(gateway.edits().len(), 1);

    // Message disappears but membership never changes: only the periodic
    // confirm can notice.
    gateway.mark_missing(MESSAGE_ID);

    timeout(POLL * 10, running)
        .await
        .expect("existence check should terminate the task")
        .expect("task does not panic");
    assert_eq!(gateway.edits().len(), 1);
    assert!(gateway.confirm_count() >= 2);
}
