//! Client configuration

use std::time::Duration;

/// Client configuration for connecting to the Cuisineberg backend
///
/// Session state (the bearer token) lives here and is injected into the
/// components that need it; nothing reads ambient global state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authenticated retail endpoints
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Order feed address (host:port), required for the live feed
    pub feed_addr: Option<String>,

    /// Wrap the feed connection in TLS
    pub feed_tls: bool,

    /// TLS server name for the feed endpoint (defaults to the addr host)
    pub feed_tls_domain: Option<String>,

    /// Extra CA certificate (PEM) trusted in addition to webpki roots
    pub feed_extra_ca: Option<String>,

    /// Delay before the dispatcher's reconciling order re-fetch
    /// (zero disables reconciliation)
    pub reconcile_after: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            feed_addr: None,
            feed_tls: false,
            feed_tls_domain: None,
            feed_extra_ca: None,
            reconcile_after: Duration::from_secs(2),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the order feed address
    pub fn with_feed_addr(mut self, addr: impl Into<String>) -> Self {
        self.feed_addr = Some(addr.into());
        self
    }

    /// Enable TLS on the feed connection
    pub fn with_feed_tls(mut self, domain: impl Into<String>) -> Self {
        self.feed_tls = true;
        self.feed_tls_domain = Some(domain.into());
        self
    }

    /// Trust an extra CA certificate (PEM) for the feed connection
    pub fn with_feed_extra_ca(mut self, ca_pem: impl Into<String>) -> Self {
        self.feed_extra_ca = Some(ca_pem.into());
        self
    }

    /// Set the dispatcher reconcile delay
    pub fn with_reconcile_after(mut self, delay: Duration) -> Self {
        self.reconcile_after = delay;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
