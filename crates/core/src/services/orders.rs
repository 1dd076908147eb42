//! Order history and checkout

use std::sync::Arc;

use storefront_domain::{
    CheckoutReceipt, CheckoutRequest, DataEnvelope, Endpoints, Order, OrderPage, StorefrontError,
};
use tracing::info;

use crate::errors::ClientError;
use crate::http::ApiRequest;
use crate::session::SessionClient;

#[derive(Clone)]
pub struct OrderService {
    client: Arc<SessionClient>,
    endpoints: Arc<Endpoints>,
}

impl OrderService {
    pub fn new(client: Arc<SessionClient>, endpoints: Arc<Endpoints>) -> Self {
        Self { client, endpoints }
    }

    pub async fn list(&self) -> Result<OrderPage, ClientError> {
        self.client.fetch(ApiRequest::get(self.endpoints.orders())).await
    }

    pub async fn detail(&self, order_id: i64) -> Result<Order, ClientError> {
        let envelope: DataEnvelope<Order> =
            self.client.fetch(ApiRequest::get(self.endpoints.order(order_id))).await?;
        Ok(envelope.data)
    }

    /// Place an order.
    ///
    /// Checkout is not idempotent: when it is retried after a token refresh,
    /// the backend sees it twice if the first attempt was processed before
    /// the 401 was returned.
    ///
    /// # Errors
    /// `Credentials` with `InvalidInput` for an empty item list, else any
    /// [`ClientError`] from the request.
    pub async fn checkout(&self, order: &CheckoutRequest) -> Result<CheckoutReceipt, ClientError> {
        if order.items.is_empty() {
            let reason = "checkout requires at least one item".to_string();
            return Err(StorefrontError::InvalidInput(reason).into());
        }
        let request = ApiRequest::post(self.endpoints.checkout()).with_json(order)?;
        let receipt: CheckoutReceipt = self.client.fetch(request).await?;
        info!(order_id = receipt.order_id, items = order.items.len(), "order placed");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use storefront_domain::{CheckoutLine, OrderStatus};

    use super::*;
    use crate::http::{ApiResponse, RequestBody};
    use crate::services::test_support::harness;
    use crate::testing::{MockCredentialStore, MockTransport, Scripted};

    fn service(transport: Arc<MockTransport>) -> OrderService {
        let h = harness(transport, MockCredentialStore::with_tokens("A", "R"));
        OrderService::new(h.client, h.endpoints)
    }

    #[tokio::test]
    async fn checkout_posts_items_and_returns_receipt() {
        let transport = MockTransport::new(|_| {
            Scripted::now(ApiResponse::json_body(
                201,
                &json!({ "message": "Order created", "order_id": 88 }),
            ))
        });
        let orders = service(transport.clone());
        let order = CheckoutRequest {
            items: vec![CheckoutLine { product_id: 4, quantity: 2 }],
            shipping_address: Some("Nizami 10".into()),
            payment_method: None,
        };

        let receipt = orders.checkout(&order).await.unwrap();

        assert_eq!(receipt.order_id, 88);
        let sent = transport.last().unwrap();
        assert_eq!(sent.path, "/api/tiktak/orders/checkout");
        assert_eq!(
            sent.body,
            RequestBody::Json(json!({
                "items": [{ "product_id": 4, "quantity": 2 }],
                "shipping_address": "Nizami 10"
            }))
        );
    }

    #[tokio::test]
    async fn empty_checkout_never_reaches_backend() {
        let transport = MockTransport::new(|_| panic!("no request expected"));
        let orders = service(transport);
        assert!(orders.checkout(&CheckoutRequest::default()).await.is_err());
    }

    #[tokio::test]
    async fn list_and_detail() {
        let transport = MockTransport::new(|request| {
            let order = json!({ "id": 5, "status": "shipped", "total_amount": 12.5, "items": [] });
            let body = if request.path.ends_with("/5") {
                json!({ "data": order })
            } else {
                json!({ "data": [order], "total": 1, "page": 1, "limit": 10 })
            };
            Scripted::now(ApiResponse::json_body(200, &body))
        });
        let orders = service(transport.clone());

        let page = orders.list().await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(transport.last().unwrap().path, "/api/tiktak/orders/user");

        let order = orders.detail(5).await.unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(transport.last().unwrap().path, "/api/tiktak/orders/user/5");
    }
}
