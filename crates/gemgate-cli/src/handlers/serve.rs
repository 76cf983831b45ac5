//! Serve command handler.
//!
//! Builds the configuration once, binds, and runs the accept loop until
//! Ctrl-C.

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use gemgate_core::GatewayConfig;
use gemgate_proxy::{GeminiForwarder, bind, serve};

use crate::commands::ServeArgs;
use crate::error::CliError;

/// Execute the serve command.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = args.into_config();
    log_startup(&config);

    let forwarder = GeminiForwarder::new(config.upstream.clone())
        .map_err(|e| CliError::Config(format!("failed to build HTTP client: {e}")))?;

    let listener = bind(&config.listen).await.map_err(CliError::from)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, finishing current connection and shutting down");
            on_interrupt.cancel();
        }
    });

    serve(listener, Arc::new(forwarder), cancel)
        .await
        .map_err(CliError::from)?;
    Ok(())
}

fn log_startup(config: &GatewayConfig) {
    info!(
        "Gemini gateway starting on {}",
        config.listen.bind_address()
    );
    info!(
        model = %config.upstream.model(),
        upstream = %config.upstream.base_url(),
        "Forwarding prompts upstream"
    );

    if !config.upstream.has_api_key() {
        warn!("GEMINI_API_KEY environment variable is not set.");
        warn!("The gateway will run but will not be able to contact the Gemini API.");
    }
}
