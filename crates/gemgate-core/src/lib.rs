#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod contracts;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_MODEL, DEFAULT_UPSTREAM_URL, GatewayConfig,
    ListenConfig, UpstreamConfig,
};
pub use contracts::gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, PromptFeedback,
};
pub use domain::{Prompt, READ_CAPACITY, ReplyText};
pub use ports::{ForwardError, PromptForwarder};

// Silence unused dev-dependency warnings for crates only used in async tests
#[cfg(test)]
use tokio as _;
