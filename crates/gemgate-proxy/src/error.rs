//! Listener-side error types.
//!
//! Forwarding failures are not here: they are [`gemgate_core::ForwardError`]
//! and always become a reply. These are the failures that leave nothing to
//! reply with.

use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Failure while servicing one client connection.
///
/// Logged by the accept loop; the client gets no bytes and the loop moves
/// on to the next connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Reading the request failed.
    #[error("failed to read from client: {0}")]
    Read(#[source] io::Error),

    /// The request was not valid UTF-8.
    #[error("request is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    /// Writing the reply failed.
    #[error("failed to write reply: {0}")]
    Write(#[source] io::Error),
}

/// Failure to start serving. The only fatal errors in the gateway.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {reason}")]
    BindFailed { address: String, reason: String },

    /// The bound socket could not report its address.
    #[error("Failed to get local address: {0}")]
    LocalAddr(#[source] io::Error),
}
