// Event listing and re-indexing.

use std::sync::Arc;

use indexa_api::types::{Event, ListParams, Page};

use super::{MutationText, QueryOptions, run_mutation, run_query};
use crate::cache::{Resource, ResourceKeys};
use crate::error::QueryError;
use crate::portal::Portal;

const INDEX: MutationText = MutationText {
    success: "Event indexed successfully!",
    failure: "Failed to index event",
};

pub struct Events<'a> {
    portal: &'a Portal,
}

impl<'a> Events<'a> {
    pub(crate) fn new(portal: &'a Portal) -> Self {
        Self { portal }
    }

    pub fn keys() -> ResourceKeys {
        Resource::Events.keys()
    }

    pub async fn list(
        &self,
        params: &ListParams,
        options: QueryOptions,
    ) -> Result<Option<Arc<Page<Event>>>, QueryError> {
        let key = Self::keys().list(self.portal.scope(), params);
        run_query(self.portal, key, options, || {
            self.portal.client().list_events(params)
        })
        .await
    }

    /// Ask the backend to re-index one event. The response body is opaque.
    pub async fn index(&self, id: &str) -> Result<serde_json::Value, QueryError> {
        run_mutation(self.portal, INDEX, &[Self::keys().lists()], || {
            self.portal.client().index_event(id)
        })
        .await
    }
}
