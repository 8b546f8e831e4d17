//! Turns upload and verification results into what the user sees.

use crate::client::{ReceiptClient, ReceiptOutcome, VerificationClient, VerifyOutcome};
use crate::data_uri::DataUri;
use crate::error::ClientError;
use crate::widget::UploadWidget;
use promo_conf::{EndpointSettings, Messages};
use promo_core::{ErrorMarker, Notice, Page, Selector, html_escape};

/// Dismissible error banner rendered into the flash container.
pub fn flash_html(message: &str) -> String {
	format!(
		"<div class=\"row flashing-position\"> <div class=\"alert alert-danger fade in\">\
		<button id=\"flashBtn\" type=\"button\" class=\"close btn-warning\" \
		data-dismiss=\"alert\">&times;</button>\
		<strong></strong>{}</div></div>",
		html_escape(message)
	)
}

/// Feedback for the receipt upload and the upload-page email check.
#[derive(Debug, Clone)]
pub struct SubmitGate {
	messages: Messages,
	endpoints: EndpointSettings,
	flash_class: String,
}

impl SubmitGate {
	pub fn new(
		messages: Messages,
		endpoints: EndpointSettings,
		flash_class: impl Into<String>,
	) -> Self {
		Self {
			messages,
			endpoints,
			flash_class: flash_class.into(),
		}
	}

	/// The image to upload, if the widget holds one.
	///
	/// Otherwise alerts the user and returns `None`.
	pub fn open(&self, widget: &UploadWidget, page: &mut dyn Page) -> Option<DataUri> {
		let encoded = widget.encoded().filter(|_| widget.is_ready());
		let Some(encoded) = encoded else {
			page.alert(&self.messages.select_image);
			return None;
		};
		match DataUri::parse(encoded) {
			Ok(image) => Some(image),
			Err(error) => {
				tracing::error!(%error, "held image cannot be decoded");
				self.flash_error(page);
				None
			}
		}
	}

	/// Full receipt flow: gate, upload, feedback.
	pub async fn submit_receipt(
		&self,
		widget: &UploadWidget,
		client: &ReceiptClient,
		page: &mut dyn Page,
		csrf_token: Option<&str>,
	) {
		let Some(image) = self.open(widget, page) else {
			return;
		};
		let result = client.submit(&image, csrf_token).await;
		self.present_receipt(page, result);
	}

	pub fn present_receipt(
		&self,
		page: &mut dyn Page,
		result: Result<ReceiptOutcome, ClientError>,
	) {
		self.clear_flash(page);
		match result {
			Ok(ReceiptOutcome::Duplicate) => {
				page.notify(&Notice::warning(&self.messages.duplicate_receipt));
			}
			Ok(ReceiptOutcome::Accepted) => {
				let notice = Notice::success(
					&self.messages.receipt_success_title,
					&self.messages.receipt_success,
				);
				page.notify_then_navigate(&notice, &self.endpoints.home);
			}
			Ok(ReceiptOutcome::Unexpected(body)) => {
				tracing::warn!(body = %body, "unexpected receipt response");
				self.flash_error(page);
			}
			Err(error) => {
				tracing::error!(%error, "receipt upload failed");
				self.flash_error(page);
			}
		}
	}

	/// Full verification flow for the address typed into `field_id`.
	pub async fn verify_email(
		&self,
		client: &VerificationClient,
		page: &mut dyn Page,
		field_id: &str,
		csrf_token: Option<&str>,
	) {
		let email = page.value(field_id).unwrap_or_default();
		let result = client.verify(&email, csrf_token).await;
		self.present_verification(page, field_id, result);
	}

	pub fn present_verification(
		&self,
		page: &mut dyn Page,
		field_id: &str,
		result: Result<VerifyOutcome, ClientError>,
	) {
		match result {
			Ok(VerifyOutcome::NotRegistered) => {
				let go_register = page.confirm(&Notice::warning(&self.messages.not_registered));
				let target = if go_register {
					&self.endpoints.register
				} else {
					&self.endpoints.upload_page
				};
				page.replace_location(target);
			}
			Ok(VerifyOutcome::Verified) => page.replace_location(&self.endpoints.upload_page),
			Ok(VerifyOutcome::InvalidEmail) => {
				let marker = ErrorMarker::new(field_id, &self.messages.invalid_email);
				page.remove(&marker.element_id());
				if let Err(error) = page.insert_marker_after(field_id, &marker) {
					tracing::warn!(%error, "could not mark email field");
				}
			}
			Ok(VerifyOutcome::Unexpected(body)) => {
				tracing::warn!(body = %body, "unexpected verification response");
				self.flash_error(page);
			}
			Err(error) => {
				tracing::error!(%error, "email verification failed");
				self.flash_error(page);
			}
		}
	}

	/// Dismisses the flash banner.
	pub fn clear_flash(&self, page: &mut dyn Page) {
		let _ = page.set_content(&Selector::class(&self.flash_class), "");
	}

	fn flash_error(&self, page: &mut dyn Page) {
		let html = flash_html(&self.messages.generic_error);
		if let Err(error) = page.set_content(&Selector::class(&self.flash_class), &html) {
			// No banner container on this page; fall back to a blocking alert.
			tracing::debug!(%error, "flash container missing");
			page.alert(&self.messages.generic_error);
		}
	}
}
