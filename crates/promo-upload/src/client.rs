//! HTTP clients for the receipt and verification endpoints.
//!
//! Both endpoints take a multipart body, expect the CSRF token in a header
//! named like the cookie it comes from and answer with a short plain-text
//! code.

use crate::data_uri::DataUri;
use crate::error::ClientError;
use promo_conf::{EndpointSettings, UploadSettings};
use reqwest::{Client, RequestBuilder, multipart};

/// Server verdict on an uploaded receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptOutcome {
	/// `d`: the same receipt was submitted before.
	Duplicate,
	/// `s`: stored and queued for review.
	Accepted,
	Unexpected(String),
}

impl ReceiptOutcome {
	pub fn from_body(body: &str) -> Self {
		match body.trim() {
			"d" => Self::Duplicate,
			"s" => Self::Accepted,
			other => Self::Unexpected(other.to_string()),
		}
	}
}

/// Server verdict on an upload-page email check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
	/// `404`: no registration for this address.
	NotRegistered,
	/// `200`: registered, the upload page may be opened.
	Verified,
	/// `400`: the server refused the address itself.
	InvalidEmail,
	Unexpected(String),
}

impl VerifyOutcome {
	pub fn from_body(body: &str) -> Self {
		match body.trim() {
			"404" => Self::NotRegistered,
			"200" => Self::Verified,
			"400" => Self::InvalidEmail,
			other => Self::Unexpected(other.to_string()),
		}
	}
}

#[derive(Debug, Clone)]
struct Endpoint {
	client: Client,
	url: String,
	csrf_header: String,
}

impl Endpoint {
	fn post(&self, form: multipart::Form, csrf_token: Option<&str>) -> RequestBuilder {
		let request = self.client.post(&self.url).multipart(form);
		match csrf_token {
			Some(token) => request.header(self.csrf_header.as_str(), token),
			None => {
				tracing::warn!(url = %self.url, "posting without CSRF token");
				request
			}
		}
	}

	async fn send(&self, request: RequestBuilder) -> Result<String, ClientError> {
		let response = request.send().await?;
		let status = response.status();
		if !status.is_success() {
			tracing::warn!(url = %self.url, %status, "request rejected");
			return Err(ClientError::Status(status.as_u16()));
		}
		Ok(response.text().await?)
	}
}

/// Posts the encoded receipt image.
#[derive(Debug, Clone)]
pub struct ReceiptClient {
	endpoint: Endpoint,
	field_name: String,
}

impl ReceiptClient {
	pub fn new(endpoints: &EndpointSettings, upload: &UploadSettings) -> Self {
		Self::with_client(Client::new(), endpoints, upload)
	}

	pub fn with_client(
		client: Client,
		endpoints: &EndpointSettings,
		upload: &UploadSettings,
	) -> Self {
		Self {
			endpoint: Endpoint {
				client,
				url: endpoints.url(&endpoints.receipt),
				csrf_header: endpoints.csrf_cookie.clone(),
			},
			field_name: upload.field_name.clone(),
		}
	}

	pub async fn submit(
		&self,
		image: &DataUri,
		csrf_token: Option<&str>,
	) -> Result<ReceiptOutcome, ClientError> {
		let part = multipart::Part::bytes(image.bytes.clone())
			.file_name("blob")
			.mime_str(&image.mime)?;
		let form = multipart::Form::new().part(self.field_name.clone(), part);

		tracing::info!(url = %self.endpoint.url, bytes = image.bytes.len(), "submitting receipt");
		let body = self.endpoint.send(self.endpoint.post(form, csrf_token)).await?;
		Ok(ReceiptOutcome::from_body(&body))
	}
}

/// Checks whether an email address is registered before opening the upload page.
#[derive(Debug, Clone)]
pub struct VerificationClient {
	endpoint: Endpoint,
}

impl VerificationClient {
	pub fn new(endpoints: &EndpointSettings) -> Self {
		Self::with_client(Client::new(), endpoints)
	}

	pub fn with_client(client: Client, endpoints: &EndpointSettings) -> Self {
		Self {
			endpoint: Endpoint {
				client,
				url: endpoints.url(&endpoints.verification),
				csrf_header: endpoints.csrf_cookie.clone(),
			},
		}
	}

	pub async fn verify(
		&self,
		email: &str,
		csrf_token: Option<&str>,
	) -> Result<VerifyOutcome, ClientError> {
		let form = multipart::Form::new().text("email", email.to_string());
		let body = self.endpoint.send(self.endpoint.post(form, csrf_token)).await?;
		Ok(VerifyOutcome::from_body(&body))
	}
}
