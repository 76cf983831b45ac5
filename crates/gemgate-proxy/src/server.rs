//! Plain-TCP listener.
//!
//! This module provides `bind()` and `serve()`. The accept loop handles
//! each connection to completion before accepting the next one:
//!
//! 1. accept
//! 2. read once, at most [`READ_CAPACITY`] bytes
//! 3. forward the trimmed prompt and wait for the answer
//! 4. write the reply, close
//!
//! Handling is awaited inline rather than spawned, which is what keeps
//! connections strictly ordered. A slow upstream call therefore holds up
//! every client waiting in the backlog.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use gemgate_core::{
    ForwardError, ListenConfig, Prompt, PromptForwarder, READ_CAPACITY, ReplyText,
};

use crate::error::{ConnectionError, ServeError};

/// What happened on a connection that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// The peer closed before sending anything; nothing was sent back.
    Empty,
    /// A reply was written.
    Replied(ReplyText),
}

/// Bind the listening socket.
///
/// Binds first and reports the real address, so a port of 0 can be used in
/// tests. Failure here is fatal for the gateway.
pub async fn bind(config: &ListenConfig) -> Result<TcpListener, ServeError> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ServeError::BindFailed {
            address: address.clone(),
            reason: e.to_string(),
        })?;

    let bound = listener.local_addr().map_err(ServeError::LocalAddr)?;
    info!("Gateway bound to {bound}");
    Ok(listener)
}

/// Run the accept loop until `cancel` fires.
///
/// Cancellation is only observed between connections; a connection that has
/// been accepted is always handled to the end. Errors from a single
/// connection are logged and never stop the loop.
pub async fn serve(
    listener: TcpListener,
    forwarder: Arc<dyn PromptForwarder>,
    cancel: CancellationToken,
) -> Result<(), ServeError> {
    let addr = listener.local_addr().map_err(ServeError::LocalAddr)?;
    info!("Waiting for connections on {addr}");

    loop {
        let accepted = tokio::select! {
            () = cancel.cancelled() => break,
            accepted = listener.accept() => accepted,
        };

        let (mut stream, peer) = match accepted {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Failed to accept connection: {e}");
                continue;
            }
        };

        info!(%peer, "Connected");
        match handle_connection(&mut stream, forwarder.as_ref()).await {
            Ok(ConnectionOutcome::Empty) => {
                debug!(%peer, "Peer closed without sending a prompt");
            }
            Ok(ConnectionOutcome::Replied(reply)) => {
                info!(%peer, error = reply.is_error(), "Reply sent");
            }
            Err(e) => error!(%peer, "An error occurred: {e}"),
        }

        close(stream, peer).await;
    }

    info!("Gateway shut down");
    Ok(())
}

/// Service one connection: one read, one forward, one write.
///
/// Generic over the stream so it can be driven by in-memory I/O in tests.
/// The caller owns closing the stream.
pub async fn handle_connection<S>(
    stream: &mut S,
    forwarder: &dyn PromptForwarder,
) -> Result<ConnectionOutcome, ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = [0u8; READ_CAPACITY];
    let n = stream.read(&mut buf).await.map_err(ConnectionError::Read)?;
    if n == 0 {
        return Ok(ConnectionOutcome::Empty);
    }

    let prompt = Prompt::from_bytes(&buf[..n])?;
    info!(prompt = %prompt, "Received prompt");

    debug!("Asking upstream");
    let reply = ReplyText::from(forwarder.forward(&prompt).await);
    if let Some(detail) = reply.as_str().strip_prefix(ForwardError::REPLY_PREFIX) {
        warn!("Replying with error: {detail}");
    }

    stream
        .write_all(reply.as_bytes())
        .await
        .map_err(ConnectionError::Write)?;
    stream.flush().await.map_err(ConnectionError::Write)?;

    Ok(ConnectionOutcome::Replied(reply))
}

async fn close(mut stream: tokio::net::TcpStream, peer: SocketAddr) {
    if let Err(e) = stream.shutdown().await {
        debug!(%peer, "Shutdown after reply failed: {e}");
    }
    drop(stream);
    info!(%peer, "Connection closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use tokio_test::io::Builder;

    /// Replies with a fixed result and remembers what it was asked.
    struct Canned {
        result: Result<String, ForwardError>,
        seen: std::sync::Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(result: Result<String, ForwardError>) -> Self {
            Self {
                result,
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PromptForwarder for Canned {
        async fn forward(&self, prompt: &Prompt) -> Result<String, ForwardError> {
            self.seen.lock().unwrap().push(prompt.as_str().to_string());
            self.result.clone()
        }
    }

    /// Answers with the prompt's byte length.
    struct Length;

    #[async_trait]
    impl PromptForwarder for Length {
        async fn forward(&self, prompt: &Prompt) -> Result<String, ForwardError> {
            Ok(prompt.as_str().len().to_string())
        }
    }

    #[tokio::test]
    async fn test_round_trip_writes_answer_exactly() {
        let forwarder = Canned::new(Ok("Hi there".to_string()));
        let mut stream = Builder::new().read(b"Hello\n").write(b"Hi there").build();

        let outcome = handle_connection(&mut stream, &forwarder).await.unwrap();

        assert_eq!(
            outcome,
            ConnectionOutcome::Replied(ReplyText::answer("Hi there".to_string()))
        );
        assert_eq!(forwarder.seen(), vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_read_sends_nothing() {
        let forwarder = Canned::new(Ok("unused".to_string()));
        let mut stream = Builder::new().build();

        let outcome = handle_connection(&mut stream, &forwarder).await.unwrap();

        assert_eq!(outcome, ConnectionOutcome::Empty);
        assert!(forwarder.seen().is_empty());
    }

    #[tokio::test]
    async fn test_forward_error_is_written_as_text() {
        let forwarder = Canned::new(Err(ForwardError::UpstreamStatus {
            status: 500,
            body: "Internal Error".to_string(),
        }));
        let mut stream = Builder::new()
            .read(b"Hello\n")
            .write(b"ERROR: API request failed with status 500: Internal Error")
            .build();

        let outcome = handle_connection(&mut stream, &forwarder).await.unwrap();
        assert!(matches!(outcome, ConnectionOutcome::Replied(reply) if reply.is_error()));
    }

    #[tokio::test]
    async fn test_missing_key_text() {
        let forwarder = Canned::new(Err(ForwardError::MissingApiKey));
        let mut stream = Builder::new()
            .read(b"anything\n")
            .write(b"ERROR: GEMINI_API_KEY environment variable is not set on the proxy server.")
            .build();

        handle_connection(&mut stream, &forwarder).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_connection_error() {
        let forwarder = Canned::new(Ok("unused".to_string()));
        let mut stream = Builder::new().read(&[0xc3, 0x28, b'\n']).build();

        let err = handle_connection(&mut stream, &forwarder)
            .await
            .unwrap_err();

        assert!(matches!(err, ConnectionError::Decode(_)));
        assert!(forwarder.seen().is_empty());
    }

    #[tokio::test]
    async fn test_read_error_is_connection_error() {
        let forwarder = Canned::new(Ok("unused".to_string()));
        let mut stream = Builder::new()
            .read_error(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset",
            ))
            .build();

        let err = handle_connection(&mut stream, &forwarder)
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Read(_)));
    }

    #[tokio::test]
    async fn test_write_error_is_connection_error() {
        let forwarder = Canned::new(Ok("answer".to_string()));
        let mut stream = Builder::new()
            .read(b"question\n")
            .write_error(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "broken pipe",
            ))
            .build();

        let err = handle_connection(&mut stream, &forwarder)
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Write(_)));
    }

    #[tokio::test]
    async fn test_only_first_read_capacity_bytes_are_used() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        client.write_all(&[b'a'; 2000]).await.unwrap();

        let outcome = handle_connection(&mut server, &Length).await.unwrap();
        drop(server);

        let mut reply = String::new();
        client.read_to_string(&mut reply).await.unwrap();
        assert_eq!(reply, READ_CAPACITY.to_string());
        assert_eq!(
            outcome,
            ConnectionOutcome::Replied(ReplyText::answer("1024".to_string()))
        );
    }

    #[tokio::test]
    async fn test_bind_reports_real_port() {
        let listener = bind(&ListenConfig::new("127.0.0.1", 0)).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_is_bind_failed() {
        let first = bind(&ListenConfig::new("127.0.0.1", 0)).await.unwrap();
        let port = first.local_addr().unwrap().port();

        let err = bind(&ListenConfig::new("127.0.0.1", port)).await.unwrap_err();
        assert!(matches!(err, ServeError::BindFailed { .. }));
    }
}
