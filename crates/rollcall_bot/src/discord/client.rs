//! Discord bot client setup and lifecycle management.

use crate::discord::RollcallHandler;
use crate::{FeatLookup, RollcallConfig};
use rollcall_core::DashboardRegistry;
use rollcall_error::{DiscordError, DiscordErrorKind};
use serenity::Client;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord client for Rollcall.
///
/// Owns the Serenity client; all bot behavior lives in
/// [`RollcallHandler`] and the supervisor it builds on ready.
///
/// # Example
/// ```no_run
/// use rollcall_bot::{RollcallBot, RollcallConfig};
/// use rollcall_core::{DashboardRegistry, InMemoryRegistry};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = RollcallConfig::from_env()?;
///     let registry: Arc<dyn DashboardRegistry> = Arc::new(InMemoryRegistry::new());
///
///     let mut bot = RollcallBot::new(config, registry).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct RollcallBot {
    client: Client,
}

impl RollcallBot {
    /// Create a new RollcallBot instance.
    ///
    /// # Arguments
    /// * `config` - Bot configuration (token, prefix, timings)
    /// * `registry` - Dashboard registry, usually the PostgreSQL one
    ///
    /// # Errors
    /// Returns an error if the bot token is invalid or the Serenity client
    /// fails to initialize.
    #[instrument(skip(config, registry), fields(prefix = %config.prefix))]
    pub async fn new(
        config: RollcallConfig,
        registry: Arc<dyn DashboardRegistry>,
    ) -> Result<Self, DiscordError> {
        info!("Initializing Rollcall Discord bot");

        let config = Arc::new(config);
        let feats = Arc::new(FeatLookup::new(Arc::clone(&registry), config.feat_ttl()));
        let handler = RollcallHandler::new(Arc::clone(&config), registry, feats);

        let intents = RollcallHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&config.token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");

        Ok(Self { client })
    }

    /// Start the Discord bot.
    ///
    /// This method blocks until the bot is shut down (e.g., via Ctrl+C).
    ///
    /// # Errors
    /// Returns an error if the client fails to start or encounters a fatal
    /// error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }
}
