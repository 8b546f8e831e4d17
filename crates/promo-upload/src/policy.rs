//! Which files the receipt widget accepts.

use crate::error::UploadError;
use promo_conf::UploadSettings;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata of a file picked or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFile {
	pub name: String,
	pub mime: String,
	pub size: u64,
}

impl PendingFile {
	pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
		Self {
			name: name.into(),
			mime: mime.into(),
			size,
		}
	}
}

/// Why a file was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
	NotAnImage { mime: String },
	TooLarge { size: u64, max: u64 },
}

impl fmt::Display for Rejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotAnImage { mime } => write!(f, "unsupported type `{mime}`"),
			Self::TooLarge { size, max } => write!(f, "{size} bytes exceeds the {max} byte limit"),
		}
	}
}

/// Type and size limits applied to every added file.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
	mime: Regex,
	max_bytes: u64,
}

impl UploadPolicy {
	/// Policy from explicit limits
	///
	/// # Examples
	///
	/// ```
	/// use promo_upload::{PendingFile, UploadPolicy};
	///
	/// let policy = UploadPolicy::new("^image/", 5 * 1024 * 1024).unwrap();
	/// assert!(policy.check(&PendingFile::new("r.png", "image/png", 5_242_880)).is_ok());
	/// assert!(policy.check(&PendingFile::new("r.png", "image/png", 5_242_881)).is_err());
	/// assert!(policy.check(&PendingFile::new("r.pdf", "application/pdf", 10)).is_err());
	/// ```
	pub fn new(mime_pattern: &str, max_bytes: u64) -> Result<Self, UploadError> {
		let mime = Regex::new(mime_pattern).map_err(|source| UploadError::MimePattern {
			pattern: mime_pattern.to_string(),
			source,
		})?;
		Ok(Self { mime, max_bytes })
	}

	pub fn from_settings(settings: &UploadSettings) -> Result<Self, UploadError> {
		Self::new(&settings.mime_pattern, settings.max_bytes)
	}

	pub fn max_bytes(&self) -> u64 {
		self.max_bytes
	}

	pub fn check(&self, file: &PendingFile) -> Result<(), Rejection> {
		if !self.mime.is_match(&file.mime) {
			return Err(Rejection::NotAnImage {
				mime: file.mime.clone(),
			});
		}
		if file.size > self.max_bytes {
			return Err(Rejection::TooLarge {
				size: file.size,
				max: self.max_bytes,
			});
		}
		Ok(())
	}
}
