//! Client side of the gateway protocol.
//!
//! Mirrors what a constrained machine does: connect, write the question and
//! a newline, then read until the gateway closes the connection.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::debug;

/// Send one question to a gateway and return its reply.
///
/// The write half is shut down after sending so the gateway sees a complete
/// request even when it is exactly one read long. An empty string means the
/// gateway closed the connection without replying.
pub async fn ask<A: ToSocketAddrs>(addr: A, question: &str) -> std::io::Result<String> {
    let mut stream = TcpStream::connect(addr).await?;
    debug!(peer = ?stream.peer_addr().ok(), "Connected to gateway");

    let mut request = String::with_capacity(question.len() + 1);
    request.push_str(question);
    request.push('\n');

    stream.write_all(request.as_bytes()).await?;
    stream.shutdown().await?;

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await?;
    Ok(String::from_utf8_lossy(&reply).into_owned())
}
