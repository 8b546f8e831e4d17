//! Typed settings for the campaign page.

use serde::{Deserialize, Serialize};

/// Root settings object. Every section falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromoSettings {
	pub endpoints: EndpointSettings,
	pub upload: UploadSettings,
	pub validation: ValidationSettings,
	pub scroll: ScrollSettings,
	pub messages: Messages,
}

/// Server endpoints the scripts talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
	/// Prepended to every path. When empty the page origin is used, see
	/// [`EndpointSettings::with_origin`].
	pub base_url: String,
	pub receipt: String,
	pub verification: String,
	pub modal: String,
	pub home: String,
	pub register: String,
	pub upload_page: String,
	/// Cookie (and request header) carrying the CSRF token.
	pub csrf_cookie: String,
}

impl Default for EndpointSettings {
	fn default() -> Self {
		Self {
			base_url: String::new(),
			receipt: "/receipts".to_string(),
			verification: "/upload/verify".to_string(),
			modal: "/modal".to_string(),
			home: "/".to_string(),
			register: "/register".to_string(),
			upload_page: "/upload".to_string(),
			csrf_cookie: "CSRF-Token".to_string(),
		}
	}
}

impl EndpointSettings {
	/// Joins `base_url` and `path`.
	///
	/// # Examples
	///
	/// ```
	/// use promo_conf::EndpointSettings;
	///
	/// let mut endpoints = EndpointSettings::default();
	/// assert_eq!(endpoints.url(&endpoints.receipt), "/receipts");
	///
	/// endpoints.base_url = "https://promo.example/".to_string();
	/// assert_eq!(endpoints.url("/receipts"), "https://promo.example/receipts");
	/// ```
	pub fn url(&self, path: &str) -> String {
		if self.base_url.is_empty() {
			return path.to_string();
		}
		format!(
			"{}/{}",
			self.base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}

	/// Makes relative endpoints absolute by rooting them at `origin`.
	///
	/// An explicitly configured `base_url` is kept.
	///
	/// # Examples
	///
	/// ```
	/// use promo_conf::EndpointSettings;
	///
	/// let endpoints = EndpointSettings::default().with_origin("https://promo.example");
	/// assert_eq!(endpoints.url(&endpoints.receipt), "https://promo.example/receipts");
	/// ```
	pub fn with_origin(mut self, origin: &str) -> Self {
		if self.base_url.is_empty() {
			self.base_url = origin.trim_end_matches('/').to_string();
		}
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
	/// Largest accepted file, in bytes (inclusive).
	pub max_bytes: u64,
	/// Regex the file's MIME type must match.
	pub mime_pattern: String,
	/// Element receiving the encoded image.
	pub holder_id: String,
	/// Element whose text (`yes`/`no`) mirrors the ready flag.
	pub ready_flag_id: String,
	/// Class of the persistent "invalid file" warning.
	pub warning_class: String,
	/// Class of the container receiving flash errors.
	pub flash_class: String,
	/// Multipart field carrying the image.
	pub field_name: String,
}

impl Default for UploadSettings {
	fn default() -> Self {
		Self {
			max_bytes: 5 * 1024 * 1024,
			mime_pattern: "^image/".to_string(),
			holder_id: "image-data-holder1".to_string(),
			ready_flag_id: "check-can-pull".to_string(),
			warning_class: "txtMsg".to_string(),
			flash_class: "upload-msg".to_string(),
			field_name: "enc".to_string(),
		}
	}
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSetting {
	pub min: i64,
	pub max: i64,
}

impl RangeSetting {
	pub const fn new(min: i64, max: i64) -> Self {
		Self { min, max }
	}

	pub fn contains(&self, value: i64) -> bool {
		(self.min..=self.max).contains(&value)
	}
}

/// Default ranges for the birth-date selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
	pub year: RangeSetting,
	pub month: RangeSetting,
	pub day: RangeSetting,
}

impl Default for ValidationSettings {
	fn default() -> Self {
		Self {
			year: RangeSetting::new(1947, 2000),
			month: RangeSetting::new(1, 12),
			day: RangeSetting::new(1, 31),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
	/// Pixels left above the first error marker.
	pub offset: i32,
	pub duration_ms: u32,
}

impl Default for ScrollSettings {
	fn default() -> Self {
		Self {
			offset: 150,
			duration_ms: 500,
		}
	}
}

/// User-facing texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
	pub upload_rejected: String,
	pub select_image: String,
	pub generic_error: String,
	pub duplicate_receipt: String,
	pub receipt_success_title: String,
	pub receipt_success: String,
	pub already_submitted: String,
	pub not_registered: String,
	pub invalid_email: String,
}

impl Default for Messages {
	fn default() -> Self {
		Self {
			upload_rejected:
				"Your image cannot exceed 5 MiB in size and must be a PNG, GIF or JPG file"
					.to_string(),
			select_image: "Please select your image by clicking on the box below.".to_string(),
			generic_error: "Something went wrong, please try again.".to_string(),
			duplicate_receipt: "It appears that this receipt has been submitted before. \
				Please submit a new receipt."
				.to_string(),
			receipt_success_title: "Congratulations".to_string(),
			receipt_success: "Thank you! Your submissions has been accepted. \
				Please allow 24-48 hours for us to validate your submission"
				.to_string(),
			already_submitted:
				"You have already submitted a receipt today, please try again tomorrow."
					.to_string(),
			not_registered: "It appears that you have not registered for this program yet. \
				You will need to register in order to participate"
				.to_string(),
			invalid_email: "Please enter a valid email address.".to_string(),
		}
	}
}
