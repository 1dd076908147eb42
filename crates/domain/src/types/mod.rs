//! Backend resource types
//!
//! Field names follow the backend's JSON. Optional and defaulted fields are
//! lenient because the backend omits them inconsistently across endpoints.

pub mod auth;
pub mod basket;
pub mod catalog;
pub mod order;
pub mod upload;
pub mod user;

use serde::{Deserialize, Serialize};

pub use auth::{LoginRequest, RefreshTokenRequest, SignupRequest, StoredSession, TokenPair};
pub use basket::{AddToBasketRequest, Basket, BasketItem, RemoveFromBasketRequest};
pub use catalog::{Campaign, Category, FavoriteToggle, Product, ProductPage, ProductQuery};
pub use order::{
    CheckoutLine, CheckoutReceipt, CheckoutRequest, Order, OrderItem, OrderPage, OrderStatus,
};
pub use upload::ImageUpload;
pub use user::{ProfileUpdate, UserProfile};

/// `{ "data": T }` wrapper used by several read endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `{ "message": "..." }` acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
