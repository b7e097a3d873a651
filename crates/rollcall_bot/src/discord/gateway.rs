//! Serenity-backed gateway implementation.

use crate::RoleGateway;
use async_trait::async_trait;
use rollcall_core::{RoleMember, RoleSnapshot};
use rollcall_error::{DiscordError, DiscordErrorKind, DiscordResult};
use serenity::builder::EditMessage;
use serenity::cache::Cache;
use serenity::http::{Http, HttpError, StatusCode};
use serenity::model::id::{ChannelId, GuildId, MessageId, RoleId};
use serenity::model::user::OnlineStatus;
use std::sync::Arc;

/// Production [`RoleGateway`] over Serenity's HTTP client and cache.
///
/// Membership and presence come from the gateway cache (requires the
/// `GUILD_MEMBERS` and `GUILD_PRESENCES` intents); message operations go
/// through the REST API. HTTP 404 responses are translated into the
/// distinct not-found error that drives dashboard task termination.
pub struct SerenityGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityGateway {
    /// Create a gateway over a live session's HTTP client and cache.
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    fn is_http_not_found(err: &serenity::Error) -> bool {
        matches!(
            err,
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
                if response.status_code == StatusCode::NOT_FOUND
        )
    }

    fn map_message_error(err: serenity::Error, message_id: u64) -> DiscordError {
        if Self::is_http_not_found(&err) {
            DiscordError::new(DiscordErrorKind::MessageNotFound(message_id))
        } else {
            DiscordError::from(err)
        }
    }
}

#[async_trait]
impl RoleGateway for SerenityGateway {
    async fn wait_ready(&self) {
        // Constructed inside the ready handler from a live session, so
        // readiness is immediate.
    }

    async fn role_snapshot(&self, guild_id: u64, role_id: u64) -> DiscordResult<RoleSnapshot> {
        let guild = self
            .cache
            .guild(GuildId::new(guild_id))
            .ok_or_else(|| DiscordError::new(DiscordErrorKind::GuildNotFound(guild_id)))?;

        let role = guild
            .roles
            .get(&RoleId::new(role_id))
            .ok_or_else(|| DiscordError::new(DiscordErrorKind::RoleNotFound(role_id)))?;
        let role_name = role.name.clone();

        let mut members = Vec::new();
        for (user_id, member) in &guild.members {
            if !member.roles.contains(&RoleId::new(role_id)) {
                continue;
            }
            // Members without a presence entry are offline; invisible
            // members report as offline and render the same way.
            let online = guild
                .presences
                .get(user_id)
                .map(|presence| presence.status != OnlineStatus::Offline)
                .unwrap_or(false);
            members.push(RoleMember::new(
                user_id.get(),
                format!("<@{}>", user_id.get()),
                online,
            ));
        }

        Ok(RoleSnapshot::new(role_id, role_name, members))
    }

    async fn role_member_ids(&self, guild_id: u64, role_id: u64) -> DiscordResult<Vec<u64>> {
        let guild = self
            .cache
            .guild(GuildId::new(guild_id))
            .ok_or_else(|| DiscordError::new(DiscordErrorKind::GuildNotFound(guild_id)))?;

        Ok(guild
            .members
            .iter()
            .filter(|(_, member)| member.roles.contains(&RoleId::new(role_id)))
            .map(|(user_id, _)| user_id.get())
            .collect())
    }

    async fn confirm_message(&self, channel_id: u64, message_id: u64) -> DiscordResult<()> {
        self.http
            .get_message(ChannelId::new(channel_id), MessageId::new(message_id))
            .await
            .map(|_| ())
            .map_err(|e| Self::map_message_error(e, message_id))
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        content: &str,
    ) -> DiscordResult<()> {
        ChannelId::new(channel_id)
            .edit_message(
                &self.http,
                MessageId::new(message_id),
                EditMessage::new().content(content),
            )
            .await
            .map(|_| ())
            .map_err(|e| Self::map_message_error(e, message_id))
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> DiscordResult<u64> {
        let message = ChannelId::new(channel_id)
            .say(&self.http, content)
            .await
            .map_err(DiscordError::from)?;
        Ok(message.id.get())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> DiscordResult<()> {
        ChannelId::new(channel_id)
            .delete_message(&self.http, MessageId::new(message_id))
            .await
            .map_err(|e| Self::map_message_error(e, message_id))
    }
}
