//! CLI-specific error types and exit code mapping.

use gemgate_proxy::ServeError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or input validation error.
    #[error("{0}")]
    Arguments(String),

    /// IO error talking to the terminal or a gateway.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The listening socket could not be set up.
    #[error("{0}")]
    Bind(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Bind(_) => 69,     // EX_UNAVAILABLE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<ServeError> for CliError {
    fn from(err: ServeError) -> Self {
        Self::Bind(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
