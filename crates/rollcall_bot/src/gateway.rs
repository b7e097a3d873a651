//! The Discord gateway seam.

use async_trait::async_trait;
use rollcall_core::RoleSnapshot;
use rollcall_error::DiscordResult;

/// Every Discord operation the refresh engine issues.
///
/// The dashboard task, supervisor, and feat lookup only ever talk to
/// Discord through this trait, so the whole engine runs against a scripted
/// implementation in tests. The production implementation is
/// [`crate::SerenityGateway`].
#[async_trait]
pub trait RoleGateway: Send + Sync {
    /// Resolve once the gateway session is ready to serve requests.
    async fn wait_ready(&self);

    /// Role name plus current members with presence, for rendering.
    async fn role_snapshot(&self, guild_id: u64, role_id: u64) -> DiscordResult<RoleSnapshot>;

    /// Ids of the members currently holding a role. Used for badge roles,
    /// where presence does not matter.
    async fn role_member_ids(&self, guild_id: u64, role_id: u64) -> DiscordResult<Vec<u64>>;

    /// Check the message still exists.
    ///
    /// Must fail with a not-found error (see
    /// [`rollcall_error::DiscordError::is_not_found`]) when the message was
    /// deleted, as distinct from transient fetch failures.
    async fn confirm_message(&self, channel_id: u64, message_id: u64) -> DiscordResult<()>;

    /// Replace the message body.
    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        content: &str,
    ) -> DiscordResult<()>;

    /// Send a new message, returning its id.
    async fn send_message(&self, channel_id: u64, content: &str) -> DiscordResult<u64>;

    /// Delete a message.
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> DiscordResult<()>;
}
