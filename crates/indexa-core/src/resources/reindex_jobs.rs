// Reindex job queries, creation and lifecycle actions.

use std::sync::Arc;

use indexa_api::types::{CreateReindexJob, ListParams, Page, ReindexJob};

use super::{MutationText, QueryOptions, detail_options, run_mutation, run_query};
use crate::cache::{Resource, ResourceKeys};
use crate::error::QueryError;
use crate::portal::Portal;

const CREATE: MutationText = MutationText {
    success: "Reindex job created successfully!",
    failure: "Failed to create reindex job",
};
const CANCEL: MutationText = MutationText {
    success: "Reindex job cancelled successfully!",
    failure: "Failed to cancel reindex job",
};
const RUN: MutationText = MutationText {
    success: "Job is running successfully!",
    failure: "Failed to run reindex job.",
};

pub struct ReindexJobs<'a> {
    portal: &'a Portal,
}

impl<'a> ReindexJobs<'a> {
    pub(crate) fn new(portal: &'a Portal) -> Self {
        Self { portal }
    }

    pub fn keys() -> ResourceKeys {
        Resource::ReindexJobs.keys()
    }

    pub async fn list(
        &self,
        params: &ListParams,
        options: QueryOptions,
    ) -> Result<Option<Arc<Page<ReindexJob>>>, QueryError> {
        let key = Self::keys().list(self.portal.scope(), params);
        run_query(self.portal, key, options, || {
            self.portal.client().list_reindex_jobs(params)
        })
        .await
    }

    pub async fn detail(
        &self,
        id: &str,
        options: QueryOptions,
    ) -> Result<Option<Arc<ReindexJob>>, QueryError> {
        let options = detail_options(id, options);
        run_query(self.portal, Self::keys().detail(id), options, || {
            self.portal.client().get_reindex_job(id)
        })
        .await
    }

    /// Create-mutation handle. Fails immediately without a token.
    pub fn create(&self) -> Result<ReindexJobCreate<'a>, QueryError> {
        self.portal.require_token()?;
        Ok(ReindexJobCreate {
            portal: self.portal,
        })
    }

    pub async fn cancel(&self, id: &str) -> Result<ReindexJob, QueryError> {
        let keys = Self::keys();
        run_mutation(self.portal, CANCEL, &[keys.lists(), keys.details()], || {
            self.portal.client().cancel_reindex_job(id)
        })
        .await
    }

    pub async fn run(&self, id: &str) -> Result<ReindexJob, QueryError> {
        let keys = Self::keys();
        run_mutation(self.portal, RUN, &[keys.lists(), keys.details()], || {
            self.portal.client().run_reindex_job(id)
        })
        .await
    }
}

/// Bound create mutation, obtained from [`ReindexJobs::create`].
pub struct ReindexJobCreate<'a> {
    portal: &'a Portal,
}

impl ReindexJobCreate<'_> {
    pub async fn mutate(&self, data: &CreateReindexJob) -> Result<ReindexJob, QueryError> {
        run_mutation(self.portal, CREATE, &[ReindexJobs::keys().lists()], || {
            self.portal.client().create_reindex_job(data)
        })
        .await
    }
}
