//! The text payload read from a client connection.

use std::fmt;
use std::str::Utf8Error;

/// Maximum number of bytes taken from a client in its single read.
///
/// Anything the client sends beyond this is never read.
pub const READ_CAPACITY: usize = 1024;

/// A decoded, whitespace-trimmed prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Decode the bytes of one read as UTF-8 and trim surrounding whitespace.
    ///
    /// The trailing newline clients send is removed here. Input longer than
    /// [`READ_CAPACITY`] is not rejected; the listener never reads more than
    /// that in the first place.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Utf8Error> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self(text.trim().to_string()))
    }

    /// The prompt text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the prompt and return the text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether nothing but whitespace was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self(text.trim().to_string())
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
