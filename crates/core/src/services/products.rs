//! Product listing, detail and favorites

use std::sync::Arc;

use storefront_domain::{
    DataEnvelope, Endpoints, FavoriteToggle, Product, ProductPage, ProductQuery,
};

use crate::errors::ClientError;
use crate::http::ApiRequest;
use crate::session::SessionClient;

#[derive(Clone)]
pub struct ProductService {
    client: Arc<SessionClient>,
    endpoints: Arc<Endpoints>,
}

impl ProductService {
    pub fn new(client: Arc<SessionClient>, endpoints: Arc<Endpoints>) -> Self {
        Self { client, endpoints }
    }

    /// One page of products; unset query fields are not sent.
    pub async fn list(&self, query: &ProductQuery) -> Result<ProductPage, ClientError> {
        let request = ApiRequest::get(self.endpoints.products()).with_query(query.to_pairs());
        self.client.fetch(request).await
    }

    pub async fn detail(&self, product_id: i64) -> Result<Product, ClientError> {
        let envelope: DataEnvelope<Product> =
            self.client.fetch(ApiRequest::get(self.endpoints.product(product_id))).await?;
        Ok(envelope.data)
    }

    /// Flip the favorite flag; the response reports the new state.
    pub async fn toggle_favorite(&self, product_id: i64) -> Result<FavoriteToggle, ClientError> {
        self.client.fetch(ApiRequest::post(self.endpoints.favorite(product_id))).await
    }

    /// Whether the signed-in user has favorited the product.
    pub async fn favorite_status(&self, product_id: i64) -> Result<FavoriteToggle, ClientError> {
        self.client.fetch(ApiRequest::get(self.endpoints.favorite(product_id))).await
    }

    pub async fn favorites(&self) -> Result<Vec<Product>, ClientError> {
        let envelope: DataEnvelope<Vec<Product>> =
            self.client.fetch(ApiRequest::get(self.endpoints.favorites())).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::ErrorCategory;
    use crate::http::{ApiResponse, HttpMethod};
    use crate::services::test_support::harness;
    use crate::testing::{MockCredentialStore, MockTransport, Scripted};

    fn service(transport: Arc<MockTransport>) -> ProductService {
        let h = harness(transport, MockCredentialStore::with_tokens("A", "R"));
        ProductService::new(h.client, h.endpoints)
    }

    #[tokio::test]
    async fn list_sends_only_set_query_fields() {
        let transport = MockTransport::new(|_| {
            Scripted::now(ApiResponse::json_body(
                200,
                &json!({
                    "data": [{ "id": 1, "name": "Apple", "price": 0.8 }],
                    "total": 21, "page": 2, "limit": 10
                }),
            ))
        });
        let products = service(transport.clone());

        let query = ProductQuery { page: Some(2), limit: Some(10), ..Default::default() };
        let page = products.list(&query).await.unwrap();

        assert_eq!(page.data.len(), 1);
        assert!(page.has_more());
        let sent = transport.last().unwrap();
        assert_eq!(sent.path, "/api/tiktak/products");
        assert_eq!(
            sent.query,
            vec![("page".to_string(), "2".to_string()), ("limit".to_string(), "10".to_string())]
        );
    }

    #[tokio::test]
    async fn detail_and_favorites_unwrap_data() {
        let transport = MockTransport::new(|request| {
            let body = if request.path.ends_with("favorites") {
                json!({ "data": [{ "id": 3, "name": "Tea", "price": 4.2 }] })
            } else {
                json!({ "data": { "id": 3, "name": "Tea", "price": 4.2 } })
            };
            Scripted::now(ApiResponse::json_body(200, &body))
        });
        let products = service(transport.clone());

        assert_eq!(products.detail(3).await.unwrap().name, "Tea");
        assert_eq!(transport.last().unwrap().path, "/api/tiktak/products/3");
        assert_eq!(products.favorites().await.unwrap()[0].id, 3);
    }

    #[tokio::test]
    async fn toggle_favorite_posts() {
        let transport = MockTransport::new(|_| {
            Scripted::now(ApiResponse::json_body(
                200,
                &json!({ "message": "Added to favorites", "is_favorite": true }),
            ))
        });
        let products = service(transport.clone());

        let toggle = products.toggle_favorite(12).await.unwrap();

        assert!(toggle.is_favorite);
        let sent = transport.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.path, "/api/tiktak/products/12/favorite");
    }

    #[tokio::test]
    async fn favorite_status_reads_without_toggling() {
        let transport = MockTransport::new(|_| {
            Scripted::now(ApiResponse::json_body(200, &json!({ "is_favorite": false })))
        });
        let products = service(transport.clone());

        let status = products.favorite_status(12).await.unwrap();

        assert!(!status.is_favorite);
        assert!(status.message.is_empty());
        let sent = transport.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.path, "/api/tiktak/products/12/favorite");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn unexpected_body_is_a_decode_error() {
        let transport =
            MockTransport::new(|_| Scripted::now(ApiResponse::json_body(200, &json!([1, 2]))));
        let err = service(transport).detail(1).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Decode);
    }
}
