//! Categories and campaign banners

use std::sync::Arc;

use storefront_domain::{Campaign, Category, DataEnvelope, Endpoints};

use crate::errors::ClientError;
use crate::http::ApiRequest;
use crate::session::SessionClient;

#[derive(Clone)]
pub struct CatalogService {
    client: Arc<SessionClient>,
    endpoints: Arc<Endpoints>,
}

impl CatalogService {
    pub fn new(client: Arc<SessionClient>, endpoints: Arc<Endpoints>) -> Self {
        Self { client, endpoints }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        let envelope: DataEnvelope<Vec<Category>> =
            self.client.fetch(ApiRequest::get(self.endpoints.categories())).await?;
        Ok(envelope.data)
    }

    /// Campaigns, active ones first; backend order is kept otherwise.
    pub async fn campaigns(&self) -> Result<Vec<Campaign>, ClientError> {
        let envelope: DataEnvelope<Vec<Campaign>> =
            self.client.fetch(ApiRequest::get(self.endpoints.campaigns())).await?;
        let mut campaigns = envelope.data;
        campaigns.sort_by_key(|campaign| !campaign.is_active);
        Ok(campaigns)
    }
}
