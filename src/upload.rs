//! Receipt upload widget and the clients posting to the server.

#[cfg(feature = "upload")]
pub use promo_upload::*;
