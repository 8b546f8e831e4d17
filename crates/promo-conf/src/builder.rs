//! Merges configuration sources by priority and deserializes the result.

use crate::settings::PromoSettings;
use crate::sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},
	#[error("Invalid settings: {0}")]
	Invalid(#[from] serde_json::Error),
}

/// Layered settings builder.
///
/// Sources are applied from lowest to highest priority; nested tables are
/// merged key by key so a later source only overrides what it names.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Defaults, then `path` (if it exists), then `PROMO_*` variables.
	pub fn standard(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let defaults = DefaultSource::from_serializable(&PromoSettings::default()).map_err(
			|error| SettingsError::Source {
				source_name: "Default values".to_string(),
				error,
			},
		)?;
		Ok(Self::new()
			.add_source(defaults)
			.add_source(TomlFileSource::new(path.as_ref()))
			.add_source(EnvSource::new()))
	}

	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merged raw configuration.
	pub fn merged(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		let mut ordered: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
		// Stable: equal priorities keep insertion order.
		ordered.sort_by_key(|s| s.priority());

		let mut merged = IndexMap::new();
		for source in ordered {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"settings source loaded"
			);
			for (key, value) in values {
				match merged.get_mut(&key) {
					Some(existing) => merge_value(existing, value),
					None => {
						merged.insert(key, value);
					}
				}
			}
		}
		Ok(merged)
	}

	pub fn build<T: DeserializeOwned>(&self) -> Result<T, SettingsError> {
		let merged = self.merged()?;
		let object: serde_json::Map<String, Value> = merged.into_iter().collect();
		Ok(serde_json::from_value(Value::Object(object))?)
	}
}

fn merge_value(base: &mut Value, overlay: Value) {
	match (base, overlay) {
		(Value::Object(base), Value::Object(overlay)) => {
			for (key, value) in overlay {
				match base.get_mut(&key) {
					Some(existing) => merge_value(existing, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		// Lower layers fix the type; `PROMO_ENDPOINTS__CSRF_COOKIE=123` stays a string.
		(Value::String(text), overlay @ (Value::Number(_) | Value::Bool(_))) => {
			*text = overlay.to_string();
		}
		(base, overlay) => *base = overlay,
	}
}

impl PromoSettings {
	/// Standard layering rooted at `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		SettingsBuilder::standard(path)?.build()
	}
}
