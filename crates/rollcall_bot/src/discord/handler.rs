//! Serenity event handler.
//!
//! Thin glue between Discord events and the engine: prefix commands are
//! parsed and executed here, removal reactions deregister dashboards, and
//! the ready event triggers restart recovery. Everything stateful lives in
//! the supervisor and registry.

use crate::commands::{usage, Command};
use crate::discord::SerenityGateway;
use crate::supervisor::{Supervisor, SupervisorConfig, PLACEHOLDER_TEXT};
use crate::{FeatLookup, RollcallConfig};
use rollcall_core::{DashboardRegistry, NewFeatAssociation};
use rollcall_error::RollcallResult;
use serenity::async_trait;
use serenity::builder::EditMessage;
use serenity::model::channel::{Message, Reaction, ReactionType};
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::id::{ChannelId, MessageId};
use serenity::prelude::{Context, EventHandler};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, instrument, warn};

/// Event handler wiring Discord events into the dashboard engine.
///
/// The supervisor is built lazily on the first ready event, because the
/// gateway needs the live session's HTTP client and cache.
pub struct RollcallHandler {
    config: Arc<RollcallConfig>,
    registry: Arc<dyn DashboardRegistry>,
    feats: Arc<FeatLookup>,
    supervisor: OnceLock<Arc<Supervisor<SerenityGateway>>>,
}

impl RollcallHandler {
    /// Create the handler.
    pub fn new(
        config: Arc<RollcallConfig>,
        registry: Arc<dyn DashboardRegistry>,
        feats: Arc<FeatLookup>,
    ) -> Self {
        Self {
            config,
            registry,
            feats,
            supervisor: OnceLock::new(),
        }
    }

    /// Gateway intents the bot needs.
    ///
    /// Members and presences feed the role snapshots; message content is
    /// required for prefix commands.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_PRESENCES
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
    }

    /// Whether this user may drive the bot.
    ///
    /// With no configured operator, anyone may.
    fn authorized(&self, user_id: u64) -> bool {
        self.config
            .operator_id
            .map(|operator| operator == user_id)
            .unwrap_or(true)
    }

    fn is_removal_emoji(&self, emoji: &ReactionType) -> bool {
        matches!(emoji, ReactionType::Unicode(symbol) if symbol == &self.config.removal_emoji)
    }

    async fn reply(&self, ctx: &Context, channel_id: ChannelId, text: &str) -> Option<MessageId> {
        match channel_id.say(&ctx.http, text).await {
            Ok(message) => Some(message.id),
            Err(e) => {
                error!(error = %e, "could not send reply");
                None
            }
        }
    }

    async fn edit_reply(
        &self,
        ctx: &Context,
        channel_id: ChannelId,
        message_id: MessageId,
        text: &str,
    ) {
        if let Err(e) = channel_id
            .edit_message(&ctx.http, message_id, EditMessage::new().content(text))
            .await
        {
            error!(error = %e, "could not edit reply");
        }
    }

    #[instrument(skip(self, ctx, supervisor, command, msg), fields(channel_id = msg.channel_id.get()))]
    async fn dispatch(
        &self,
        ctx: &Context,
        supervisor: &Supervisor<SerenityGateway>,
        command: Command,
        guild_id: u64,
        msg: &Message,
    ) {
        // init is special: the supervisor sends the placeholder itself and
        // the new dashboard task takes it over from there.
        if let Command::Init { role_id } = command {
            match supervisor
                .register(role_id, msg.channel_id.get(), guild_id)
                .await
            {
                Ok(message_id) => info!(message_id, role_id, "dashboard registered"),
                Err(e) => {
                    error!(error = %e, role_id, "dashboard registration failed");
                    self.reply(
                        ctx,
                        msg.channel_id,
                        "Could not register the dashboard; see the logs.",
                    )
                    .await;
                }
            }
            return;
        }

        let Some(placeholder) = self.reply(ctx, msg.channel_id, PLACEHOLDER_TEXT).await else {
            return;
        };
        let reply = match command {
            Command::AddFeat {
                role_id,
                feat_role_id,
                description,
            } => self
                .add_feat(guild_id, role_id, feat_role_id, description)
                .await,
            Command::RemoveFeat {
                role_id,
                feat_role_id,
            } => self.remove_feat(guild_id, role_id, feat_role_id).await,
            Command::ListFeat { role_id } => self.list_feat(role_id).await,
            Command::Help | Command::Init { .. } => Ok(usage(&self.config.prefix)),
        };
        let text = reply.unwrap_or_else(|e| {
            error!(error = %e, "command failed");
            format!("Command failed: {}", e)
        });
        self.edit_reply(ctx, msg.channel_id, placeholder, &text).await;
    }

    async fn add_feat(
        &self,
        guild_id: u64,
        role_id: u64,
        feat_role_id: u64,
        description: String,
    ) -> RollcallResult<String> {
        self.registry
            .insert_feat(NewFeatAssociation {
                role_id: role_id as i64,
                feat_role_id: feat_role_id as i64,
                feat_description: description.clone(),
            })
            .await?;
        self.feats.invalidate(guild_id, role_id);
        Ok(format!(
            "Added feat to <@&{}>: holders of <@&{}> get {}",
            role_id, feat_role_id, description
        ))
    }

    async fn remove_feat(
        &self,
        guild_id: u64,
        role_id: u64,
        feat_role_id: u64,
    ) -> RollcallResult<String> {
        self.registry
            .delete_feat(role_id as i64, feat_role_id as i64)
            .await?;
        self.feats.invalidate(guild_id, role_id);
        Ok(format!(
            "Removed feat <@&{}> from <@&{}>",
            feat_role_id, role_id
        ))
    }

    async fn list_feat(&self, role_id: u64) -> RollcallResult<String> {
        let feats = self.registry.list_feats(role_id as i64).await?;
        if feats.is_empty() {
            return Ok(format!("No feats registered for <@&{}>", role_id));
        }
        let lines: Vec<String> = feats
            .iter()
            .map(|feat| format!("<@&{}> {}", feat.feat_role_id, feat.feat_description))
            .collect();
        Ok(format!("Feats for <@&{}>:\n{}", role_id, lines.join("\n")))
    }
}

#[async_trait]
impl EventHandler for RollcallHandler {
    async fn ready(&self, ctx: Context, data_about_bot: Ready) {
        info!(user = %data_about_bot.user.name, "connected to Discord");

        let supervisor = self.supervisor.get_or_init(|| {
            let gateway = Arc::new(SerenityGateway::new(ctx.http.clone(), ctx.cache.clone()));
            Arc::new(Supervisor::new(
                gateway,
                Arc::clone(&self.registry),
                Arc::clone(&self.feats),
                SupervisorConfig::from(self.config.as_ref()),
            ))
        });

        match supervisor.start().await {
            Ok(spawned) => info!(spawned, "dashboard tasks recovered"),
            Err(e) => error!(error = %e, "failed to load dashboards from the registry"),
        }
    }

    async fn message(&self, ctx: Context, new_message: Message) {
        if new_message.author.bot {
            return;
        }
        let content = new_message.content.trim();
        let Some(body) = content.strip_prefix(self.config.prefix.as_str()) else {
            return;
        };
        if !self.authorized(new_message.author.id.get()) {
            return;
        }
        // Dashboards are guild-only; ignore DMs.
        let Some(guild_id) = new_message.guild_id else {
            return;
        };
        let Some(supervisor) = self.supervisor.get() else {
            warn!("command received before ready, ignoring");
            return;
        };

        match Command::parse(body.trim()) {
            Ok(command) => {
                self.dispatch(&ctx, supervisor, command, guild_id.get(), &new_message)
                    .await;
            }
            Err(e) => {
                // Invalid arguments never touch state; the placeholder is
                // edited into a human-readable explanation.
                let Some(placeholder) = self
                    .reply(&ctx, new_message.channel_id, PLACEHOLDER_TEXT)
                    .await
                else {
                    return;
                };
                let text = format!("{}\n\n{}", e.user_message(), usage(&self.config.prefix));
                self.edit_reply(&ctx, new_message.channel_id, placeholder, &text)
                    .await;
            }
        }
    }

    async fn reaction_add(&self, _ctx: Context, add_reaction: Reaction) {
        let Some(supervisor) = self.supervisor.get() else {
            return;
        };
        let Some(user_id) = add_reaction.user_id else {
            return;
        };
        if !self.authorized(user_id.get()) {
            return;
        }
        if !self.is_removal_emoji(&add_reaction.emoji) {
            return;
        }

        match supervisor
            .deregister_if_tracked(add_reaction.channel_id.get(), add_reaction.message_id.get())
            .await
        {
            Ok(true) => info!(
                message_id = add_reaction.message_id.get(),
                "dashboard deregistered by reaction"
            ),
            Ok(false) => {}
            Err(e) => error!(error = %e, "reaction deregistration failed"),
        }
    }
}
