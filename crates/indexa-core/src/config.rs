// ── Runtime portal configuration ──
//
// Describes *how* to reach the portal backend: base URL, environment
// marker, optional bearer token, transport tuning and cache staleness.
// Never touches disk; `indexa-config` builds one and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use indexa_api::Environment;

/// Default staleness window for cached queries.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development backends).
    DangerAcceptInvalid,
}

/// Configuration for talking to one portal backend.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// API base URL (e.g. `https://indexa.example.com/api/v1`).
    pub api_url: Url,
    /// Bearer token. `None` is allowed; queries then fail with
    /// `TOKEN_REQUIRED` before any request is made.
    pub token: Option<SecretString>,
    /// Environment marker forwarded to the backend.
    pub environment: Environment,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Default staleness window for cached queries.
    pub stale_time: Duration,
}

impl PortalConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            token: None,
            environment: Environment::default(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            stale_time: DEFAULT_STALE_TIME,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    /// Whether a non-blank bearer token is configured.
    pub fn has_token(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }

    /// Cache-key segment identifying the backend a list was fetched from.
    ///
    /// The token is deliberately not part of it: secrets never end up in
    /// cache keys, debug logs or events.
    pub fn scope_key(&self) -> String {
        format!("{}#{}", self.api_url, self.environment)
    }
}
