//! Discord-specific error types.
//!
//! Covers Serenity API failures, gateway cache misses, and the "target
//! message is gone" condition that drives dashboard task termination.

use derive_getters::Getters;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity API error (HTTP error, gateway error, rate limit).
    #[display("Serenity API error: {_0}")]
    Api(String),

    /// The target message no longer exists (deleted externally).
    #[display("Message not found: {_0}")]
    MessageNotFound(u64),

    /// Guild (server) not found in the gateway cache.
    #[display("Guild not found: {_0}")]
    GuildNotFound(u64),

    /// Role not found in the guild.
    #[display("Role not found: {_0}")]
    RoleNotFound(u64),

    /// Channel not found by ID.
    #[display("Channel not found: {_0}")]
    ChannelNotFound(u64),

    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Bot token is invalid or expired.
    #[display("Invalid or expired bot token")]
    InvalidToken,
}

/// Discord error with source location tracking.
///
/// Captures the error kind along with the file and line where the error
/// occurred.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use rollcall_error::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InvalidToken);
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the error means the target message no longer exists.
    ///
    /// This is the only Discord failure a dashboard task treats as
    /// non-transient: it terminates the task and cleans up the registry row.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, DiscordErrorKind::MessageNotFound(_))
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

// Convenience From implementation for Serenity errors. HTTP 404 responses
// are mapped by the gateway, which knows the message id; everything else
// lands here as a transient API error.
#[cfg(feature = "discord")]
impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        DiscordError::new(DiscordErrorKind::Api(err.to_string()))
    }
}
