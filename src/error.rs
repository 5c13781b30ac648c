//! Error types for CLI operations.
//!
//! The `CliError` enum covers registration failures, dispatch diagnostics and
//! errors reported by command handlers.

use core::fmt;

/// CLI error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Several commands match an abbreviated token
    Ambiguous,

    /// No command matches a token
    NoMatch,

    /// Command or menu item requires admin privileges
    InsufficientPrivilege,

    /// Fixed storage capacity exceeded
    BufferFull,

    /// A different command with the same name already exists among the siblings
    DuplicateCommand,

    /// Command has an empty name or refers to an unknown parent
    InvalidCommand,

    /// Wrong number of arguments
    InvalidArgumentCount {
        /// Minimum expected arguments
        expected_min: usize,
        /// Maximum expected arguments
        expected_max: usize,
        /// Number of arguments received
        received: usize,
    },

    /// Submitted secret was rejected
    AuthenticationFailed,

    /// Command executed but reported failure
    CommandFailed(heapless::String<128>),

    /// Generic error with message
    Other(heapless::String<128>),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ambiguous => write!(f, "ambiguity"),
            CliError::NoMatch => write!(f, "no match"),
            CliError::InsufficientPrivilege => write!(f, "Command requires admin privileges"),
            CliError::BufferFull => write!(f, "Buffer full"),
            CliError::DuplicateCommand => write!(f, "Duplicate command name"),
            CliError::InvalidCommand => write!(f, "Invalid command"),
            CliError::InvalidArgumentCount {
                expected_min,
                expected_max,
                received,
            } => {
                if expected_min == expected_max {
                    write!(f, "Expected {} arguments, got {}", expected_min, received)
                } else {
                    write!(
                        f,
                        "Expected {}-{} arguments, got {}",
                        expected_min, expected_max, received
                    )
                }
            }
            CliError::AuthenticationFailed => write!(f, "Authentication failed"),
            CliError::CommandFailed(msg) => write!(f, "{}", msg),
            CliError::Other(msg) => write!(f, "{}", msg),
        }
    }
}
