//! Subcommands and their arguments.

use clap::{Args, Subcommand};

use gemgate_core::{
    DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_MODEL, DEFAULT_UPSTREAM_URL, GatewayConfig,
    ListenConfig, UpstreamConfig,
};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the gateway: answer plain-text prompts over TCP using the Gemini API
    Serve(ServeArgs),

    /// Send one question to a running gateway and print the reply
    Ask(AskArgs),
}

/// Arguments for `gemgate serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Interface to listen on
    #[arg(long, env = "GEMGATE_HOST", default_value = DEFAULT_LISTEN_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "GEMGATE_PORT", default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// Model id used in the generateContent path
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Upstream base URL (scheme and host)
    #[arg(long, env = "GEMGATE_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl ServeArgs {
    /// Build the process-wide configuration.
    #[must_use]
    pub fn into_config(self) -> GatewayConfig {
        GatewayConfig::new(
            ListenConfig::new(self.host, self.port),
            UpstreamConfig::new()
                .with_base_url(self.upstream_url)
                .with_model(self.model)
                .with_optional_api_key(self.api_key),
        )
    }
}

/// Arguments for `gemgate ask`.
#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Gateway host
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Gateway port
    #[arg(short, long, default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// Question to ask (prompted for on stdin when omitted)
    #[arg(short, long)]
    pub query: Option<String>,
}
