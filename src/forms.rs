//! Form validation: field registry, validators and error markers.

#[cfg(feature = "forms")]
pub use promo_forms::*;
