//! Command parsing error types.
//!
//! The `Display` text of [`CommandErrorKind`] is shown to the invoking user
//! verbatim (edited into the placeholder reply), so variants read as plain
//! English rather than diagnostics.

use derive_getters::Getters;

/// Specific command error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CommandErrorKind {
    /// The prefix was given with no command after it.
    #[display("no command given; try `help`")]
    Empty,

    /// Command word not recognized.
    #[display("unknown command `{_0}`; try `help`")]
    UnknownCommand(String),

    /// Wrong number of role mentions for the command.
    #[display("expected {expected} role mention(s), found {found}")]
    WrongMentionCount {
        /// How many role mentions the command requires.
        expected: usize,
        /// How many were actually present.
        found: usize,
    },

    /// add-feat was called without a feat description.
    #[display("missing feat description")]
    MissingDescription,
}

/// Command error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Command Error: {} at line {} in {}", kind, line, file)]
pub struct CommandError {
    kind: CommandErrorKind,
    line: u32,
    file: &'static str,
}

impl CommandError {
    /// Create a new CommandError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The user-facing description of what went wrong.
    pub fn user_message(&self) -> String {
        self.kind.to_string()
    }
}

/// Result type for command parsing.
pub type CommandResult<T> = Result<T, CommandError>;
