//! Order and checkout types

use serde::{Deserialize, Serialize};

use super::catalog::Product;
use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl_domain_status_conversions!(OrderStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

impl OrderStatus {
    /// No further transitions happen server-side.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    #[serde(default)]
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Order history page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    #[serde(default)]
    pub data: Vec<Order>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl CheckoutRequest {
    /// Build a checkout for the given basket contents.
    #[must_use]
    pub fn from_basket(basket: &super::Basket) -> Self {
        Self {
            items: basket
                .data
                .iter()
                .map(|item| CheckoutLine { product_id: item.product_id, quantity: item.quantity })
                .collect(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    #[serde(default)]
    pub message: String,
    pub order_id: i64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::{Basket, BasketItem};

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(OrderStatus::from_str("Shipped").unwrap(), OrderStatus::Shipped);
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
        assert!(OrderStatus::from_str("lost").is_err());
    }

    #[test]
    fn status_deserializes_from_lowercase_json() {
        let order: Order =
            serde_json::from_str(r#"{"id":3,"total_amount":12.5,"status":"delivered"}"#).unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.status.is_final());
        assert!(!OrderStatus::Pending.is_final());
    }

    #[test]
    fn checkout_from_basket_copies_lines() {
        let basket = Basket {
            data: vec![BasketItem { id: 1, product_id: 8, quantity: 3, product: None }],
            total_items: 3,
            total_price: 0.0,
        };
        let request = CheckoutRequest::from_basket(&basket);
        assert_eq!(request.items, vec![CheckoutLine { product_id: 8, quantity: 3 }]);
        assert!(request.shipping_address.is_none());
    }
}
