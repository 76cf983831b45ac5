//! The single string written back to a client.

use crate::ports::ForwardError;

/// Either the upstream answer or a rendered `ERROR:` line.
///
/// This is the boundary where a typed forwarding result becomes the plain
/// text the wire protocol carries. Clients can only tell an error from an
/// answer by its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyText(String);

impl ReplyText {
    /// Wrap an upstream answer verbatim.
    #[must_use]
    pub const fn answer(text: String) -> Self {
        Self(text)
    }

    /// Render a forwarding error as the client-visible line.
    #[must_use]
    pub fn error(err: &ForwardError) -> Self {
        Self(err.reply_text())
    }

    /// The reply text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The exact bytes sent on the wire. No newline is appended.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether this reply carries an error rather than an answer.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.0.starts_with(ForwardError::REPLY_PREFIX)
    }
}

impl From<Result<String, ForwardError>> for ReplyText {
    fn from(result: Result<String, ForwardError>) -> Self {
        match result {
            Ok(text) => Self::answer(text),
            Err(err) => Self::error(&err),
        }
    }
}
