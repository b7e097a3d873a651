//! Bot configuration, read from the environment.

use rollcall_error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PREFIX: &str = "!rollcall";
const DEFAULT_POLL_SECS: u64 = 5;
const DEFAULT_FEAT_TTL_MULTIPLIER: u32 = 30;
const DEFAULT_REMOVAL_EMOJI: &str = "❌";
const DEFAULT_SPAWN_SPACING_MS: u64 = 200;
const DEFAULT_EXISTENCE_CHECK_TICKS: u64 = 100;

/// Configuration for the Rollcall bot.
///
/// Everything is environment-driven (load a `.env` first via dotenvy if you
/// keep settings in a file). Only `DISCORD_TOKEN` is required; every other
/// value has a default. `DATABASE_URL` is read separately by the pool in
/// `rollcall_database`.
#[derive(Debug, Clone)]
pub struct RollcallConfig {
    /// Discord bot token (`DISCORD_TOKEN`).
    pub token: String,
    /// Command prefix (`ROLLCALL_PREFIX`, default `!rollcall`).
    pub prefix: String,
    /// Delay between render/diff/edit cycles (`ROLLCALL_POLL_SECS`,
    /// default 5).
    pub poll_interval: Duration,
    /// Feat cache TTL as a multiple of the poll interval
    /// (`ROLLCALL_FEAT_TTL_MULTIPLIER`, default 30).
    pub feat_ttl_multiplier: u32,
    /// When set, only this user's commands and removal reactions are
    /// honored (`ROLLCALL_OPERATOR_ID`). Unset means unrestricted.
    pub operator_id: Option<u64>,
    /// Reaction emoji that deregisters a dashboard
    /// (`ROLLCALL_REMOVAL_EMOJI`, default ❌).
    pub removal_emoji: String,
    /// Delay between task spawns during restart recovery
    /// (`ROLLCALL_SPAWN_SPACING_MS`, default 200).
    pub spawn_spacing: Duration,
    /// Re-confirm the target message exists every N ticks
    /// (`ROLLCALL_EXISTENCE_CHECK_TICKS`, default 100).
    pub existence_check_ticks: u64,
}

impl RollcallConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `DISCORD_TOKEN` is unset or any numeric setting
    /// fails to parse. Configuration problems are always fatal at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("DISCORD_TOKEN").map_err(|_| {
            ConfigError::new("DISCORD_TOKEN environment variable not set")
        })?;

        Ok(Self {
            token,
            prefix: env_or("ROLLCALL_PREFIX", DEFAULT_PREFIX),
            poll_interval: Duration::from_secs(env_parse(
                "ROLLCALL_POLL_SECS",
                DEFAULT_POLL_SECS,
            )?),
            feat_ttl_multiplier: env_parse(
                "ROLLCALL_FEAT_TTL_MULTIPLIER",
                DEFAULT_FEAT_TTL_MULTIPLIER,
            )?,
            operator_id: env_parse_opt("ROLLCALL_OPERATOR_ID")?,
            removal_emoji: env_or("ROLLCALL_REMOVAL_EMOJI", DEFAULT_REMOVAL_EMOJI),
            spawn_spacing: Duration::from_millis(env_parse(
                "ROLLCALL_SPAWN_SPACING_MS",
                DEFAULT_SPAWN_SPACING_MS,
            )?),
            existence_check_ticks: env_parse(
                "ROLLCALL_EXISTENCE_CHECK_TICKS",
                DEFAULT_EXISTENCE_CHECK_TICKS,
            )?,
        })
    }

    /// Feat cache TTL: the poll interval times the configured multiplier.
    pub fn feat_ttl(&self) -> Duration {
        self.poll_interval * self.feat_ttl_multiplier
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::new(format!("{} is not valid: {}", key, e))),
        Err(_) => Ok(default),
    }
}

fn env_parse_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::new(format!("{} is not valid: {}", key, e))),
        Err(_) => Ok(None),
    }
}
