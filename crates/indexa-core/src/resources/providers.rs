// Provider status listing.

use std::sync::Arc;

use indexa_api::types::ProviderList;

use super::{QueryOptions, run_query};
use crate::cache::{Resource, ResourceKeys};
use crate::error::QueryError;
use crate::portal::Portal;

pub struct Providers<'a> {
    portal: &'a Portal,
}

impl<'a> Providers<'a> {
    pub(crate) fn new(portal: &'a Portal) -> Self {
        Self { portal }
    }

    pub fn keys() -> ResourceKeys {
        Resource::Providers.keys()
    }

    /// Providers are not paginated; the list key carries only the scope.
    pub async fn list(&self, options: QueryOptions) -> Result<Option<Arc<ProviderList>>, QueryError> {
        let key = Self::keys().lists().child(self.portal.scope());
        run_query(self.portal, key, options, || self.portal.client().list_providers()).await
    }
}
