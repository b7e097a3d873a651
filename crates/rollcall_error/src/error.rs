//! Top-level error wrapper types.

use crate::{CommandError, ConfigError, DatabaseError, DiscordError};

/// Union of the domain error types in the Rollcall workspace.
///
/// # Examples
///
/// ```
/// use rollcall_error::{RollcallError, ConfigError};
///
/// let cfg_err = ConfigError::new("missing token");
/// let err: RollcallError = cfg_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RollcallErrorKind {
    /// Registry / persistence error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Discord gateway or REST error
    #[from(DiscordError)]
    Discord(DiscordError),
    /// Command parsing error
    #[from(CommandError)]
    Command(CommandError),
    /// Startup configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Rollcall error with kind discrimination.
///
/// # Examples
///
/// ```
/// use rollcall_error::{RollcallResult, DatabaseError, DatabaseErrorKind};
///
/// fn might_fail() -> RollcallResult<()> {
///     Err(DatabaseError::new(DatabaseErrorKind::NotFound))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rollcall Error: {}", _0)]
pub struct RollcallError(Box<RollcallErrorKind>);

impl RollcallError {
    /// Create a new error from a kind.
    pub fn new(kind: RollcallErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RollcallErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to RollcallErrorKind
impl<T> From<T> for RollcallError
where
    T: Into<RollcallErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Rollcall operations.
pub type RollcallResult<T> = std::result::Result<T, RollcallError>;
