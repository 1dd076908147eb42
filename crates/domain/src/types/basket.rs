//! Basket types

use serde::{Deserialize, Serialize};

use super::catalog::Product;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasketItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl BasketItem {
    /// Line total, zero when the backend omitted the product.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.as_ref().map_or(0.0, |p| p.price * f64::from(self.quantity))
    }
}

/// Basket snapshot as returned by every basket endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    #[serde(default)]
    pub data: Vec<BasketItem>,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub total_price: f64,
}

impl Basket {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.data
            .iter()
            .filter(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToBasketRequest {
    pub product_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromBasketRequest {
    pub product_id: i64,
}
