//! User profile types

use serde::{Deserialize, Serialize};

/// Profile of the signed-in customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    /// Some backend versions spell this field `adres`
    #[serde(default, alias = "adres", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Partial profile update; unset fields are left unchanged server-side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone.is_none() && self.address.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_misspelt_address_field() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id":1,"full_name":"Aysel","phone":"+994","adres":"Baku"}"#)
                .unwrap();
        assert_eq!(profile.address.as_deref(), Some("Baku"));
    }

    #[test]
    fn update_skips_unset_fields() {
        let update = ProfileUpdate { address: Some("Ganja".into()), ..Default::default() };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"address":"Ganja"}"#);
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }
}
