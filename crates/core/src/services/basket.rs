//! Shopping basket

use std::sync::Arc;

use storefront_domain::{
    AddToBasketRequest, Basket, Endpoints, MessageResponse, RemoveFromBasketRequest,
};

use crate::errors::ClientError;
use crate::http::ApiRequest;
use crate::session::SessionClient;

#[derive(Clone)]
pub struct BasketService {
    client: Arc<SessionClient>,
    endpoints: Arc<Endpoints>,
}

impl BasketService {
    pub fn new(client: Arc<SessionClient>, endpoints: Arc<Endpoints>) -> Self {
        Self { client, endpoints }
    }

    pub async fn get(&self) -> Result<Basket, ClientError> {
        self.client.fetch(ApiRequest::get(self.endpoints.basket())).await
    }

    /// Add `quantity` units (backend default: one) and return the new basket.
    pub async fn add(&self, product_id: i64, quantity: Option<u32>) -> Result<Basket, ClientError> {
        let request = ApiRequest::post(self.endpoints.basket_add(product_id))
            .with_json(&AddToBasketRequest { product_id, quantity })?;
        self.client.fetch(request).await
    }

    /// Remove one unit of the product and return the new basket.
    pub async fn remove(&self, product_id: i64) -> Result<Basket, ClientError> {
        let request = ApiRequest::post(self.endpoints.basket_remove(product_id))
            .with_json(&RemoveFromBasketRequest { product_id })?;
        self.client.fetch(request).await
    }

    pub async fn clear(&self, basket_id: i64) -> Result<MessageResponse, ClientError> {
        self.client.fetch(ApiRequest::delete(self.endpoints.basket_clear(basket_id))).await
    }

    pub async fn remove_all(&self, basket_id: i64) -> Result<MessageResponse, ClientError> {
        self.client.fetch(ApiRequest::delete(self.endpoints.basket_remove_all(basket_id))).await
    }
}
