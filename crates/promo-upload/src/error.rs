/// Errors raised while preparing an upload.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UploadError {
	#[error("Invalid MIME pattern `{pattern}`: {source}")]
	MimePattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
	#[error("Malformed data URI: {0}")]
	DataUri(String),
	#[error("Invalid base64 payload: {0}")]
	Base64(#[from] base64::DecodeError),
}

/// Errors raised while talking to the server.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("Server answered with status {0}")]
	Status(u16),
}
