// ── Portal facade ──
//
// Owns the HTTP client, the query cache and the notification sink for one
// backend. Cheaply cloneable; every resource hook borrows from it.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use indexa_api::transport::{TlsMode, TransportConfig};
use indexa_api::{ApiCredentials, PortalClient};

use crate::cache::QueryCache;
use crate::config::{PortalConfig, TlsVerification};
use crate::error::QueryError;
use crate::notify::{Notifier, TracingNotifier};
use crate::resources::{DomainServices, Events, Providers, ReindexJobs};

/// Entry point for consumers.
///
/// Cloning shares the cache and the client. Build one per backend.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    config: PortalConfig,
    scope: String,
    client: PortalClient,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl Portal {
    /// Build a portal that reports mutation outcomes through `tracing`.
    pub fn new(config: PortalConfig) -> Result<Self, QueryError> {
        Self::with_notifier(config, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(
        config: PortalConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, QueryError> {
        Self::with_parts(config, Arc::new(QueryCache::new()), notifier)
    }

    /// Build a portal around an existing cache, e.g. one shared between
    /// several portals pointed at different environments.
    pub fn with_parts(
        config: PortalConfig,
        cache: Arc<QueryCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, QueryError> {
        let credentials = ApiCredentials::new(config.token.clone(), config.environment);
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout: config.timeout,
        };
        let client = PortalClient::new(config.api_url.as_str(), credentials, &transport)?;
        let scope = config.scope_key();
        debug!(
            api_url = %config.api_url,
            environment = %config.environment,
            has_token = config.has_token(),
            "portal created"
        );

        Ok(Self {
            inner: Arc::new(PortalInner {
                config,
                scope,
                client,
                cache,
                notifier,
            }),
        })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.inner.cache
    }

    pub fn client(&self) -> &PortalClient {
        &self.inner.client
    }

    /// Whether a non-empty bearer token is configured.
    pub fn has_token(&self) -> bool {
        self.inner.config.has_token()
    }

    // ── Resource hooks ───────────────────────────────────────────────

    pub fn domain_services(&self) -> DomainServices<'_> {
        DomainServices::new(self)
    }

    pub fn reindex_jobs(&self) -> ReindexJobs<'_> {
        ReindexJobs::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    pub fn providers(&self) -> Providers<'_> {
        Providers::new(self)
    }

    // ── Crate-internal plumbing for the hooks ────────────────────────

    pub(crate) fn scope(&self) -> &str {
        &self.inner.scope
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    pub(crate) fn stale_time(&self, override_: Option<Duration>) -> Duration {
        override_.unwrap_or(self.inner.config.stale_time)
    }

    pub(crate) fn require_token(&self) -> Result<(), QueryError> {
        if self.has_token() {
            Ok(())
        } else {
            Err(QueryError::token_required())
        }
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
