// ── Resource hooks ──
//
// One hook struct per backend resource, borrowed from a `Portal`. Queries
// go through the shared `QueryCache`; mutations check the token, call the
// backend, invalidate the affected key prefixes and notify.

mod domain_services;
mod events;
mod providers;
mod reindex_jobs;

pub use domain_services::{DomainServiceCreate, DomainServices};
pub use events::Events;
pub use providers::Providers;
pub use reindex_jobs::{ReindexJobCreate, ReindexJobs};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::QueryKey;
use crate::error::QueryError;
use crate::notify::Notification;
use crate::portal::Portal;

/// Per-call query options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Disabled queries resolve to `Ok(None)` without touching the network.
    pub enabled: bool,
    /// Overrides the portal's staleness window. Zero always refetches.
    pub stale_time: Option<Duration>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time: None,
        }
    }
}

impl QueryOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            stale_time: None,
        }
    }

    #[must_use]
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Notification titles for one mutation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MutationText {
    pub success: &'static str,
    pub failure: &'static str,
}

/// Cached query with the token check in front.
pub(crate) async fn run_query<T, F, Fut>(
    portal: &Portal,
    key: QueryKey,
    options: QueryOptions,
    fetch: F,
) -> Result<Option<Arc<T>>, QueryError>
where
    T: Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, indexa_api::Error>>,
{
    if !options.enabled {
        return Ok(None);
    }
    portal.require_token()?;

    let stale_time = portal.stale_time(options.stale_time);
    portal
        .cache()
        .fetch(key, stale_time, || async move { fetch().await.map_err(QueryError::from) })
        .await
        .map(Some)
}

/// Mutation with call-time token check, prefix invalidation and
/// notification on both outcomes.
pub(crate) async fn run_mutation<T, F, Fut>(
    portal: &Portal,
    text: MutationText,
    invalidate: &[QueryKey],
    call: F,
) -> Result<T, QueryError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, indexa_api::Error>>,
{
    let result = match portal.require_token() {
        Ok(()) => call().await.map_err(QueryError::from),
        Err(err) => Err(err),
    };

    match result {
        Ok(value) => {
            for prefix in invalidate {
                portal.cache().invalidate(prefix);
            }
            info!(outcome = text.success, "mutation succeeded");
            portal.notifier().notify(Notification::success(text.success));
            Ok(value)
        }
        Err(err) => {
            warn!(outcome = text.failure, error = %err, "mutation failed");
            portal
                .notifier()
                .notify(Notification::error(text.failure, err.description()));
            Err(err)
        }
    }
}

/// Empty ids disable detail queries.
pub(crate) fn detail_options(id: &str, options: QueryOptions) -> QueryOptions {
    options.enabled(options.enabled && !id.trim().is_empty())
}
