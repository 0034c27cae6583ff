// Reindex job endpoints
//
// List / detail / create plus the `cancel` and `run` action verbs.

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::types::{CreateReindexJob, ListParams, Page, ReindexJob};

const ENDPOINT: &str = "reindex-jobs";

impl PortalClient {
    /// `GET /reindex-jobs?page=&size=&q=`
    pub async fn list_reindex_jobs(&self, params: &ListParams) -> Result<Page<ReindexJob>, Error> {
        self.get_with_params(&[ENDPOINT], &params.to_query()).await
    }

    /// `GET /reindex-jobs/{id}`
    pub async fn get_reindex_job(&self, id: &str) -> Result<ReindexJob, Error> {
        self.get(&[ENDPOINT, id]).await
    }

    /// `POST /reindex-jobs`
    pub async fn create_reindex_job(&self, data: &CreateReindexJob) -> Result<ReindexJob, Error> {
        debug!(domains = ?data.domains, entity_types = ?data.entity_types, "creating reindex job");
        self.post(&[ENDPOINT], data).await
    }

    /// `POST /reindex-jobs/{id}/cancel`
    pub async fn cancel_reindex_job(&self, id: &str) -> Result<ReindexJob, Error> {
        debug!(id, "cancelling reindex job");
        self.post_empty(&[ENDPOINT, id, "cancel"]).await
    }

    /// `POST /reindex-jobs/{id}/run`
    pub async fn run_reindex_job(&self, id: &str) -> Result<ReindexJob, Error> {
        debug!(id, "running reindex job");
        self.post_empty(&[ENDPOINT, id, "run"]).await
    }
}
