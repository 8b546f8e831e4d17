//! Configuration sources for layered settings
//!
//! Provides the sources that are merged together in priority order
//! (environment variables > TOML > defaults).

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

fn toml_to_map(content: &str) -> Result<IndexMap<String, Value>, SourceError> {
	let toml_value: toml::Value = toml::from_str(content)?;
	let json_value = serde_json::to_value(toml_value)?;
	let map = json_value
		.as_object()
		.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;
	Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

/// Environment variable configuration source
///
/// `PROMO_UPLOAD__MAX_BYTES=1024` becomes `upload.max_bytes = 1024`.
/// Values that parse as JSON numbers or booleans keep their type, anything
/// else is a string. A typed value landing on a string setting is turned back
/// into text when the layers are merged.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Create a source reading variables that start with `PROMO_`
	///
	/// # Examples
	///
	/// ```
	/// use promo_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new();
	/// assert_eq!(source.priority(), 100);
	/// ```
	pub fn new() -> Self {
		Self {
			prefix: "PROMO_".to_string(),
		}
	}

	/// Set a different prefix filter for environment variables
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	fn parse_value(raw: &str) -> Value {
		match serde_json::from_str::<Value>(raw) {
			Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
			_ => Value::String(raw.to_string()),
		}
	}

	fn insert_path(config: &mut IndexMap<String, Value>, path: &[String], value: Value) {
		match path {
			[] => {}
			[key] => {
				config.insert(key.clone(), value);
			}
			[head, rest @ ..] => {
				let entry = config
					.entry(head.clone())
					.or_insert_with(|| Value::Object(serde_json::Map::new()));
				Self::insert_nested(entry, rest, value);
			}
		}
	}

	fn insert_nested(target: &mut Value, path: &[String], value: Value) {
		if !target.is_object() {
			*target = Value::Object(serde_json::Map::new());
		}
		let Value::Object(obj) = target else {
			return;
		};
		match path {
			[] => {}
			[key] => {
				obj.insert(key.clone(), value);
			}
			[head, rest @ ..] => {
				let entry = obj
					.entry(head.clone())
					.or_insert_with(|| Value::Object(serde_json::Map::new()));
				Self::insert_nested(entry, rest, value);
			}
		}
	}

	/// Build the nested map from an explicit list of variables.
	pub(crate) fn load_from<I>(&self, vars: I) -> IndexMap<String, Value>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut config = IndexMap::new();
		for (key, raw) in vars {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let path: Vec<String> = clean_key
				.split("__")
				.filter(|s| !s.is_empty())
				.map(str::to_lowercase)
				.collect();
			if path.is_empty() {
				continue;
			}
			Self::insert_path(&mut config, &path, Self::parse_value(&raw));
		}
		config
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.load_from(std::env::vars()))
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables ({}*)", self.prefix)
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use promo_conf::sources::TomlFileSource;
	/// use std::path::PathBuf;
	///
	/// let source = TomlFileSource::new(PathBuf::from("promo.toml"));
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "settings file not found, skipping");
			return Ok(IndexMap::new());
		}
		let content = fs::read_to_string(&self.path)?;
		toml_to_map(&content)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// TOML held in memory, e.g. embedded with `include_str!` in a WASM bundle.
pub struct TomlStrSource {
	content: String,
}

impl TomlStrSource {
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
		}
	}
}

impl ConfigSource for TomlStrSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		toml_to_map(&self.content)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		"TOML string".to_string()
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create an empty default values source
	///
	/// # Examples
	///
	/// ```
	/// use promo_conf::sources::DefaultSource;
	/// use serde_json::Value;
	///
	/// let source = DefaultSource::new()
	///     .with_value("scroll", serde_json::json!({ "offset": 150 }));
	/// ```
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
		}
	}

	/// Add a default value for a top-level key
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}

	/// Seed every key from a serializable value (normally `PromoSettings::default()`).
	pub fn from_serializable<T: serde::Serialize>(value: &T) -> Result<Self, SourceError> {
		let json = serde_json::to_value(value)?;
		let map = json
			.as_object()
			.ok_or_else(|| SourceError::Parse("Defaults must serialize to a map".to_string()))?;
		Ok(Self {
			values: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
		})
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}
