//! Upstream wire contracts.
//!
//! Plain serde types with no HTTP client types, so they can be shared by the
//! forwarder and by test doubles standing in for the upstream.

pub mod gemini;
