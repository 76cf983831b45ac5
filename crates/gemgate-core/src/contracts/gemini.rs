//! `generateContent` request and response bodies.
//!
//! Only the fields the gateway reads are modeled. Response fields default
//! when absent so a missing answer is reported as a precise
//! [`ForwardError`] instead of a generic deserialization failure.

use serde::{Deserialize, Serialize};

use crate::ports::ForwardError;

/// JSON path of the answer, used in error messages.
pub const ANSWER_PATH: &str = "candidates[0].content.parts[0].text";

/// Request body: `{"contents":[{"parts":[{"text":"..."}]}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Conversation turns. The gateway always sends exactly one.
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text part.
    #[must_use]
    pub fn from_prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(text.into()),
                }],
            }],
        }
    }
}

/// A list of parts, used in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Content parts (typically one text part).
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single content part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Text of this part. Non-text parts leave it empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response body of a successful call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate answers; the first one is used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Present when the prompt itself was rejected.
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One candidate answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    /// Generated content.
    #[serde(default)]
    pub content: Option<Content>,
}

/// Feedback about the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Why the prompt was blocked, if it was.
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Parse a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ForwardError> {
        serde_json::from_slice(body).map_err(|e| ForwardError::Decode(e.to_string()))
    }

    /// Extract `candidates[0].content.parts[0].text`.
    pub fn into_answer(self) -> Result<String, ForwardError> {
        let block_reason = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(block_reason.map_or(
                ForwardError::MissingField(ANSWER_PATH),
                ForwardError::Blocked,
            ));
        };

        candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or(ForwardError::MissingField(ANSWER_PATH))
    }
}
