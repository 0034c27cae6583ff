// Domain service queries and mutations.

use std::sync::Arc;

use indexa_api::types::{CreateDomainService, DomainService, ListParams, Page, UpdateDomainService};

use super::{MutationText, QueryOptions, detail_options, run_mutation, run_query};
use crate::cache::{Resource, ResourceKeys};
use crate::error::QueryError;
use crate::portal::Portal;

const CREATE: MutationText = MutationText {
    success: "Domain service created successfully!",
    failure: "Failed to create domain service",
};
const UPDATE: MutationText = MutationText {
    success: "Domain service updated successfully!",
    failure: "Failed to update domain service",
};
const DELETE: MutationText = MutationText {
    success: "Domain service deleted successfully!",
    failure: "Failed to delete domain service",
};

pub struct DomainServices<'a> {
    portal: &'a Portal,
}

impl<'a> DomainServices<'a> {
    pub(crate) fn new(portal: &'a Portal) -> Self {
        Self { portal }
    }

    pub fn keys() -> ResourceKeys {
        Resource::DomainServices.keys()
    }

    pub async fn list(
        &self,
        params: &ListParams,
        options: QueryOptions,
    ) -> Result<Option<Arc<Page<DomainService>>>, QueryError> {
        let key = Self::keys().list(self.portal.scope(), params);
        run_query(self.portal, key, options, || {
            self.portal.client().list_domain_services(params)
        })
        .await
    }

    pub async fn detail(
        &self,
        id: &str,
        options: QueryOptions,
    ) -> Result<Option<Arc<DomainService>>, QueryError> {
        let options = detail_options(id, options);
        run_query(self.portal, Self::keys().detail(id), options, || {
            self.portal.client().get_domain_service(id)
        })
        .await
    }

    /// Create-mutation handle. Fails immediately without a token.
    pub fn create(&self) -> Result<DomainServiceCreate<'a>, QueryError> {
        self.portal.require_token()?;
        Ok(DomainServiceCreate {
            portal: self.portal,
        })
    }

    pub async fn update(
        &self,
        id: &str,
        data: &UpdateDomainService,
    ) -> Result<DomainService, QueryError> {
        let keys = Self::keys();
        run_mutation(self.portal, UPDATE, &[keys.lists(), keys.details()], || {
            self.portal.client().update_domain_service(id, data)
        })
        .await
    }

    /// Returns the deleted entity when the backend echoes it.
    pub async fn delete(&self, id: &str) -> Result<Option<DomainService>, QueryError> {
        let keys = Self::keys();
        run_mutation(self.portal, DELETE, &[keys.lists(), keys.details()], || {
            self.portal.client().delete_domain_service(id)
        })
        .await
    }
}

/// Bound create mutation, obtained from [`DomainServices::create`].
pub struct DomainServiceCreate<'a> {
    portal: &'a Portal,
}

impl DomainServiceCreate<'_> {
    pub async fn mutate(&self, data: &CreateDomainService) -> Result<DomainService, QueryError> {
        run_mutation(self.portal, CREATE, &[DomainServices::keys().lists()], || {
            self.portal.client().create_domain_service(data)
        })
        .await
    }
}
