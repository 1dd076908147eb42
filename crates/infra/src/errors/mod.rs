//! Infrastructure error conversions

mod conversions;

pub use conversions::{InfraError, IntoTransportError};
