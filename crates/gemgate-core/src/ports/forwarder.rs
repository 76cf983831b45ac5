//! Prompt forwarding port.
//!
//! A forwarder turns one [`Prompt`] into one answer string. Every failure is
//! returned as a [`ForwardError`]; implementations never panic or propagate
//! anything else, so the listener always has something to send back.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Prompt;

/// Errors a forwarder can return.
///
/// The `Display` text is the detail only. [`ForwardError::reply_text`] adds
/// the `ERROR:` framing clients see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    /// No API key is configured. Detected before any network call.
    #[error("GEMINI_API_KEY environment variable is not set on the proxy server.")]
    MissingApiKey,

    /// The upstream answered with a status other than 200.
    #[error("API request failed with status {status}: {body}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// Connecting, sending or reading the body failed.
    #[error("{0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("{0}")]
    Decode(String),

    /// The JSON parsed but the answer path is absent.
    #[error("response has no {0}")]
    MissingField(&'static str),

    /// The upstream refused the prompt and said why.
    #[error("prompt was blocked: {0}")]
    Blocked(String),
}

impl ForwardError {
    /// Prefix every client-visible error line starts with.
    pub const REPLY_PREFIX: &'static str = "ERROR: ";

    /// Render the line sent to the client in place of an answer.
    #[must_use]
    pub fn reply_text(&self) -> String {
        match self {
            Self::MissingApiKey | Self::UpstreamStatus { .. } => {
                format!("{}{self}", Self::REPLY_PREFIX)
            }
            Self::Transport(_) | Self::Decode(_) | Self::MissingField(_) | Self::Blocked(_) => {
                format!(
                    "{}An exception occurred on the proxy server: {self}",
                    Self::REPLY_PREFIX
                )
            }
        }
    }
}

/// Sends a prompt upstream and returns the answer text.
#[async_trait]
pub trait PromptForwarder: Send + Sync {
    /// Forward one prompt. Called once per connection.
    async fn forward(&self, prompt: &Prompt) -> Result<String, ForwardError>;
}
