#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod client;
pub mod error;
pub mod forward;
pub mod server;

pub use client::ask;
pub use error::{ConnectionError, ServeError};
pub use forward::GeminiForwarder;
pub use server::{ConnectionOutcome, bind, handle_connection, serve};

// Dev-dependencies only used by the integration tests
#[cfg(test)]
use axum as _;
#[cfg(test)]
use serde_json as _;
