// Event endpoints

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::types::{Event, ListParams, Page};

const ENDPOINT: &str = "events";

impl PortalClient {
    /// `GET /events?page=&size=&q=`
    pub async fn list_events(&self, params: &ListParams) -> Result<Page<Event>, Error> {
        self.get_with_params(&[ENDPOINT], &params.to_query()).await
    }

    /// `POST /events/{id}/index`
    ///
    /// Pushes one event into the search index. The response shape is not
    /// part of the contract, so it is returned as raw JSON.
    pub async fn index_event(&self, id: &str) -> Result<serde_json::Value, Error> {
        debug!(id, "indexing event");
        self.post_empty(&[ENDPOINT, id, "index"]).await
    }
}
