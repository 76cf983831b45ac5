//! Process-wide gateway configuration.
//!
//! Built once at startup (the CLI fills it from flags and environment
//! variables) and handed by value to the listener and the forwarder.
//! Nothing in the gateway reads the environment after this point.

/// Default interface the listener binds to (all interfaces).
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";

/// Default port the listener binds to.
pub const DEFAULT_LISTEN_PORT: u16 = 8081;

/// Default upstream base URL (scheme and host, no path).
pub const DEFAULT_UPSTREAM_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model id interpolated into the `generateContent` path.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Complete gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Where the plain-TCP listener binds.
    pub listen: ListenConfig,
    /// Where prompts are forwarded to.
    pub upstream: UpstreamConfig,
}

impl GatewayConfig {
    /// Create a configuration from its two halves.
    #[must_use]
    pub const fn new(listen: ListenConfig, upstream: UpstreamConfig) -> Self {
        Self { listen, upstream }
    }
}

/// Listener bind address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to bind to (0 for auto-assign).
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_LISTEN_HOST.to_string(),
            port: DEFAULT_LISTEN_PORT,
        }
    }
}

impl ListenConfig {
    /// Create a listen configuration for the given host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The `host:port` string passed to the socket bind call.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream `generateContent` endpoint configuration.
///
/// Use the builder methods to customize it.
///
/// # Example
///
/// ```
/// use gemgate_core::UpstreamConfig;
///
/// let config = UpstreamConfig::new()
///     .with_model("gemini-2.5-flash")
///     .with_api_key("secret");
///
/// assert_eq!(
///     config.endpoint_url(),
///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
/// );
/// assert_eq!(config.api_key(), Some("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

// Hand-written so the key never ends up in a log line.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .finish()
    }
}

impl UpstreamConfig {
    /// Create a new configuration with default settings and no API key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upstream base URL.
    ///
    /// Defaults to `https://generativelanguage.googleapis.com`. A trailing
    /// slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the model id used in the request path.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key sent as the `key` query parameter.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional API key.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Model id.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The configured API key, treating an empty value as unset.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Whether requests can be forwarded at all.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Full `generateContent` URL, without the key query parameter.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}
