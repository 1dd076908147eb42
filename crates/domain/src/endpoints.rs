//! Backend route table
//!
//! Paths are built from the configured route prefix. Login and refresh come
//! from [`ApiConfig`] because the session client treats those two paths
//! specially.

use std::fmt::Display;

use crate::config::{join_route, ApiConfig};

/// Resolved backend paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    prefix: String,
    login: String,
    refresh: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            prefix: api.route_prefix.clone(),
            login: api.login_path(),
            refresh: api.refresh_path(),
        }
    }

    fn route(&self, route: impl AsRef<str>) -> String {
        join_route(&self.prefix, route.as_ref())
    }

    // Auth

    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    #[must_use]
    pub fn refresh(&self) -> &str {
        &self.refresh
    }

    #[must_use]
    pub fn signup(&self) -> String {
        self.route("auth/signup")
    }

    #[must_use]
    pub fn logout(&self) -> String {
        self.route("auth/logout")
    }

    #[must_use]
    pub fn profile(&self) -> String {
        self.route("profile")
    }

    // Catalog

    #[must_use]
    pub fn products(&self) -> String {
        self.route("products")
    }

    pub fn product(&self, product_id: impl Display) -> String {
        self.route(format!("products/{product_id}"))
    }

    pub fn favorite(&self, product_id: impl Display) -> String {
        self.route(format!("products/{product_id}/favorite"))
    }

    #[must_use]
    pub fn favorites(&self) -> String {
        self.route("products/favorites")
    }

    #[must_use]
    pub fn categories(&self) -> String {
        self.route("categories")
    }

    #[must_use]
    pub fn campaigns(&self) -> String {
        self.route("campaigns")
    }

    // Basket

    #[must_use]
    pub fn basket(&self) -> String {
        self.route("basket")
    }

    pub fn basket_add(&self, product_id: impl Display) -> String {
        self.route(format!("basket/{product_id}/add"))
    }

    pub fn basket_remove(&self, product_id: impl Display) -> String {
        self.route(format!("basket/{product_id}/remove"))
    }

    pub fn basket_clear(&self, basket_id: impl Display) -> String {
        self.route(format!("basket/{basket_id}/clear"))
    }

    pub fn basket_remove_all(&self, basket_id: impl Display) -> String {
        self.route(format!("basket/{basket_id}/remove-all"))
    }

    // Orders

    #[must_use]
    pub fn checkout(&self) -> String {
        self.route("orders/checkout")
    }

    #[must_use]
    pub fn orders(&self) -> String {
        self.route("orders/user")
    }

    pub fn order(&self, order_id: impl Display) -> String {
        self.route(format!("orders/user/{order_id}"))
    }

    // Uploads

    #[must_use]
    pub fn upload_image(&self) -> String {
        self.route("upload/image")
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(&ApiConfig::default())
    }
}
