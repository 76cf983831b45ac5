//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the listener expects from infrastructure.
//! They use only domain types, so the listener can be exercised against
//! fakes without any network.

mod forwarder;

pub use forwarder::{ForwardError, PromptForwarder};
