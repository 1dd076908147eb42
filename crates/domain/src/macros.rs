//! Macro for implementing Display and FromStr for status enums
//!
//! Backend status strings are lowercase; parsing is case-insensitive so
//! values typed by hand in config or logs still round-trip.
//!
//! # Example
//!
//! ```rust
//! use storefront_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DeliverySlot {
//!     Morning,
//!     Evening,
//! }
//!
//! impl_domain_status_conversions!(DeliverySlot {
//!     Morning => "morning",
//!     Evening => "evening",
//! });
//! ```

/// Implements Display and FromStr traits for status enums
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum PaymentState {
        Authorized,
        Captured,
        Refunded,
    }

    impl_domain_status_conversions!(PaymentState {
        Authorized => "authorized",
        Captured => "captured",
        Refunded => "refunded",
    });

    #[test]
    fn display_is_lowercase() {
        assert_eq!(PaymentState::Authorized.to_string(), "authorized");
        assert_eq!(PaymentState::Refunded.to_string(), "refunded");
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(PaymentState::from_str("CAPTURED").unwrap(), PaymentState::Captured);
        assert_eq!(PaymentState::from_str(" Refunded ").unwrap(), PaymentState::Refunded);
    }

    #[test]
    fn parsing_rejects_unknown_values() {
        let err = PaymentState::from_str("voided").unwrap_err();
        assert!(err.contains("Invalid PaymentState: voided"));
        assert!(PaymentState::from_str("").is_err());
    }
}
