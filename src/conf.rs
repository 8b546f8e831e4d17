//! Layered settings: defaults, TOML files and environment overrides.
//!
//! # Examples
//!
//! ```
//! use promo::conf::PromoSettings;
//!
//! let settings = PromoSettings::default();
//! assert_eq!(settings.upload.max_bytes, 5 * 1024 * 1024);
//! ```

#[cfg(feature = "conf")]
pub use promo_conf::*;
