//! `data:` URIs holding the encoded receipt image between the file read and
//! the upload.

use crate::error::UploadError;
use base64::{Engine as _, engine::general_purpose};

/// Decoded `data:{mime};base64,{payload}` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
	pub mime: String,
	pub bytes: Vec<u8>,
}

impl DataUri {
	pub fn new(mime: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
		Self {
			mime: mime.into(),
			bytes: bytes.into(),
		}
	}

	/// Parses a base64 data URI
	///
	/// # Examples
	///
	/// ```
	/// use promo_upload::DataUri;
	///
	/// let uri = DataUri::parse("data:image/png;base64,iVBORw==").unwrap();
	/// assert_eq!(uri.mime, "image/png");
	/// assert_eq!(uri.bytes, vec![0x89, b'P', b'N', b'G']);
	/// ```
	pub fn parse(uri: &str) -> Result<Self, UploadError> {
		let uri = uri.trim();
		let rest = uri
			.strip_prefix("data:")
			.ok_or_else(|| UploadError::DataUri("missing `data:` scheme".to_string()))?;
		let (header, payload) = rest
			.split_once(',')
			.ok_or_else(|| UploadError::DataUri("missing `,` separator".to_string()))?;
		let mime = header
			.strip_suffix(";base64")
			.ok_or_else(|| UploadError::DataUri("payload is not base64".to_string()))?;
		let bytes = general_purpose::STANDARD.decode(payload)?;
		Ok(Self::new(mime, bytes))
	}

	pub fn encode(&self) -> String {
		encode(&self.mime, &self.bytes)
	}
}

pub fn encode(mime: &str, bytes: &[u8]) -> String {
	format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_encode_png_header() {
		let uri = encode("image/png", &[0x89, b'P', b'N', b'G']);

		assert_eq!(uri, "data:image/png;base64,iVBORw==");
	}

	#[rstest]
	fn test_parse_reads_back_encoded_bytes() {
		// Arrange
		let bytes: Vec<u8> = (0..=255).collect();
		let uri = encode("image/jpeg", &bytes);

		// Act
		let parsed = DataUri::parse(&uri).unwrap();

		// Assert
		assert_eq!(parsed, DataUri::new("image/jpeg", bytes));
	}

	#[rstest]
	fn test_surrounding_whitespace_is_ignored() {
		// innerHTML of the holder may be padded by the template
		let parsed = DataUri::parse("\n  data:image/gif;base64,R0lG  \n").unwrap();

		assert_eq!(parsed.mime, "image/gif");
	}

	#[rstest]
	#[case("")]
	#[case("image/png;base64,AAAA")]
	#[case("data:image/png;base64")]
	#[case("data:image/png,AAAA")]
	fn test_malformed_uri(#[case] uri: &str) {
		assert!(matches!(DataUri::parse(uri), Err(UploadError::DataUri(_))));
	}

	#[rstest]
	fn test_bad_payload() {
		let result = DataUri::parse("data:image/png;base64,not base64!");

		assert!(matches!(result, Err(UploadError::Base64(_))));
	}
}
