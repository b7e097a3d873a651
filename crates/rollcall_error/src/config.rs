//! Configuration error types.

/// Configuration error carrying a human-readable message.
///
/// Raised for missing or malformed environment configuration at process
/// startup. Always fatal: the bot refuses to start with a partial
/// configuration.
///
/// # Examples
///
/// ```
/// use rollcall_error::ConfigError;
///
/// let err = ConfigError::new("DISCORD_TOKEN environment variable not set");
/// assert!(format!("{}", err).contains("DISCORD_TOKEN"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Human-readable description of the problem.
    pub message: String,
    /// Line number where the error was created.
    pub line: u32,
    /// File where the error was created.
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
