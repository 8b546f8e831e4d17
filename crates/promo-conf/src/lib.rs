//! Settings for the promo form scripts
//!
//! Settings are assembled from layered sources, highest priority last:
//!
//! 1. [`DefaultSource`] - values baked into [`PromoSettings::default`]
//! 2. [`TomlFileSource`] - an optional `promo.toml`
//! 3. [`EnvSource`] - `PROMO_*` environment variables (`__` separates sections)
//!
//! ## Example
//!
//! ```
//! use promo_conf::{PromoSettings, SettingsBuilder, TomlStrSource};
//!
//! let settings: PromoSettings = SettingsBuilder::new()
//!     .add_source(TomlStrSource::new("[scroll]\noffset = 90\n"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.scroll.offset, 90);
//! assert_eq!(settings.upload.max_bytes, 5 * 1024 * 1024);
//! ```

pub mod builder;
pub mod settings;
pub mod sources;

pub use builder::{SettingsBuilder, SettingsError};
pub use settings::{
	EndpointSettings, Messages, PromoSettings, RangeSetting, ScrollSettings, UploadSettings,
	ValidationSettings,
};
pub use sources::{
	ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource, TomlStrSource,
};
