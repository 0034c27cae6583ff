// Domain service endpoints
//
// Full CRUD under `/domain-services`.

use tracing::debug;

use crate::client::PortalClient;
use crate::error::Error;
use crate::types::{CreateDomainService, DomainService, ListParams, Page, UpdateDomainService};

const ENDPOINT: &str = "domain-services";

impl PortalClient {
    /// `GET /domain-services?page=&size=&q=`
    pub async fn list_domain_services(
        &self,
        params: &ListParams,
    ) -> Result<Page<DomainService>, Error> {
        self.get_with_params(&[ENDPOINT], &params.to_query()).await
    }

    /// `GET /domain-services/{id}`
    pub async fn get_domain_service(&self, id: &str) -> Result<DomainService, Error> {
        self.get(&[ENDPOINT, id]).await
    }

    /// `POST /domain-services`
    pub async fn create_domain_service(
        &self,
        data: &CreateDomainService,
    ) -> Result<DomainService, Error> {
        debug!(name = %data.name, domains = ?data.domains, "creating domain service");
        self.post(&[ENDPOINT], data).await
    }

    /// `PUT /domain-services/{id}`
    pub async fn update_domain_service(
        &self,
        id: &str,
        data: &UpdateDomainService,
    ) -> Result<DomainService, Error> {
        debug!(id, "updating domain service");
        self.put(&[ENDPOINT, id], data).await
    }

    /// `DELETE /domain-services/{id}`
    ///
    /// The backend echoes the deleted record; an empty body decodes to `None`.
    pub async fn delete_domain_service(&self, id: &str) -> Result<Option<DomainService>, Error> {
        debug!(id, "deleting domain service");
        self.delete(&[ENDPOINT, id]).await
    }
}
