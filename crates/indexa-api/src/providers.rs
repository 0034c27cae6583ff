// Provider endpoints (read-only)

use crate::client::PortalClient;
use crate::error::Error;
use crate::types::ProviderList;

impl PortalClient {
    /// `GET /providers`
    pub async fn list_providers(&self) -> Result<ProviderList, Error> {
        self.get(&["providers"]).await
    }
}
