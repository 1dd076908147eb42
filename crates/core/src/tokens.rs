//! Token-shape normalisation for login and refresh responses
//!
//! The backend has returned token pairs in several envelopes over time. The
//! accepted shapes are a closed set tried in a fixed order; the first shape
//! carrying both tokens as non-empty strings wins.

use serde_json::Value;
use storefront_domain::{TokenPair, UserProfile};

/// Where a token pair was found in a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenShape {
    /// `{ access_token, refresh_token }`
    TopLevel,
    /// `{ tokens: { access_token, refresh_token } }`
    TopLevelTokens,
    /// `{ data: { access_token, refresh_token } }`
    Data,
    /// `{ data: { tokens: { access_token, refresh_token } } }`
    DataTokens,
}

impl TokenShape {
    pub const PRECEDENCE: [TokenShape; 4] =
        [Self::TopLevel, Self::TopLevelTokens, Self::Data, Self::DataTokens];

    /// Object that holds the profile for this shape.
    fn level<'a>(self, body: &'a Value) -> Option<&'a Value> {
        match self {
            Self::TopLevel | Self::TopLevelTokens => Some(body),
            Self::Data | Self::DataTokens => body.get("data"),
        }
    }

    /// Object that holds `access_token` and `refresh_token` for this shape.
    fn token_holder<'a>(self, body: &'a Value) -> Option<&'a Value> {
        let level = self.level(body)?;
        match self {
            Self::TopLevel | Self::Data => Some(level),
            Self::TopLevelTokens | Self::DataTokens => level.get("tokens"),
        }
    }

    fn extract(self, body: &Value) -> Option<TokenPair> {
        let holder = self.token_holder(body)?;
        let access = holder.get("access_token")?.as_str()?;
        let refresh = holder.get("refresh_token")?.as_str()?;
        TokenPair::new(access, refresh)
    }
}

/// Normalised login or refresh payload
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPayload {
    pub tokens: TokenPair,
    pub user: Option<UserProfile>,
    pub shape: TokenShape,
}

/// Extract the token pair and optional profile from an auth response body.
///
/// Returns `None` when no shape carries a complete pair. A profile that does
/// not deserialize is dropped rather than failing the whole payload.
#[must_use]
pub fn normalize_auth_response(body: &Value) -> Option<AuthPayload> {
    TokenShape::PRECEDENCE.into_iter().find_map(|shape| {
        let tokens = shape.extract(body)?;
        let user = shape.level(body).and_then(profile_at);
        Some(AuthPayload { tokens, user, shape })
    })
}

fn profile_at(level: &Value) -> Option<UserProfile> {
    ["profile", "user"]
        .into_iter()
        .filter_map(|key| level.get(key))
        .find(|value| value.is_object())
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}
