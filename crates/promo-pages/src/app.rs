//! Assembles the engine, widget and clients a page needs from one set of
//! settings.

use crate::error::{PagesError, PagesResult};
use crate::modal::{HttpModalLoader, ModalTrigger};
use promo_conf::{DefaultSource, PromoSettings, SettingsBuilder, SettingsError, TomlStrSource};
use promo_forms::{FormOrchestrator, definitions};
use promo_upload::{ReceiptClient, SubmitGate, UploadPolicy, UploadWidget, VerificationClient};
use std::fmt;
use std::str::FromStr;

/// Id of the optional `<script type="text/toml">` element overriding the defaults.
pub const SETTINGS_ELEMENT_ID: &str = "promo-settings";

/// Which campaign page is being mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
	Registration,
	Support,
	/// Email check plus receipt upload.
	Upload,
}

impl FromStr for PageKind {
	type Err = PagesError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"registration" | "register" => Ok(Self::Registration),
			"support" => Ok(Self::Support),
			"upload" => Ok(Self::Upload),
			_ => Err(PagesError::Unavailable("unknown page kind")),
		}
	}
}

impl fmt::Display for PageKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Registration => "registration",
			Self::Support => "support",
			Self::Upload => "upload",
		})
	}
}

/// Settings with an optional TOML snippet layered over the defaults.
pub fn page_settings(overrides: Option<&str>) -> Result<PromoSettings, SettingsError> {
	let defaults = DefaultSource::from_serializable(&PromoSettings::default()).map_err(|error| {
		SettingsError::Source {
			source_name: "Default values".to_string(),
			error,
		}
	})?;
	let mut builder = SettingsBuilder::new().add_source(defaults);
	if let Some(toml) = overrides.filter(|t| !t.trim().is_empty()) {
		builder = builder.add_source(TomlStrSource::new(toml));
	}
	builder.build()
}

/// Origin of the page the scripts run in.
#[cfg(target_arch = "wasm32")]
pub fn page_origin() -> Option<String> {
	web_sys::window()?.location().origin().ok()
}

/// Origin of the page the scripts run in (non-WASM stub).
#[cfg(not(target_arch = "wasm32"))]
pub fn page_origin() -> Option<String> {
	None
}

#[derive(Debug, Clone, Default)]
pub struct PromoApp {
	settings: PromoSettings,
}

impl PromoApp {
	pub fn new(settings: PromoSettings) -> Self {
		Self { settings }
	}

	/// Settings for the current page. Relative endpoints are resolved against
	/// the page origin when there is one.
	pub fn from_overrides(overrides: Option<&str>) -> PagesResult<Self> {
		let app = Self::new(page_settings(overrides)?);
		Ok(match page_origin() {
			Some(origin) => app.with_origin(&origin),
			None => app,
		})
	}

	/// Roots relative endpoints at `origin` (`scheme://host[:port]`).
	pub fn with_origin(mut self, origin: &str) -> Self {
		let endpoints = std::mem::take(&mut self.settings.endpoints);
		self.settings.endpoints = endpoints.with_origin(origin);
		self
	}

	pub fn settings(&self) -> &PromoSettings {
		&self.settings
	}

	/// Validation engine for the form on `kind`.
	pub fn form(&self, kind: PageKind) -> PagesResult<FormOrchestrator> {
		let registry = match kind {
			PageKind::Registration => definitions::registration_with(&self.settings.validation)?,
			PageKind::Support => definitions::support()?,
			PageKind::Upload => definitions::upload_verification()?,
		};
		Ok(FormOrchestrator::new(registry).with_scroll(self.settings.scroll.clone()))
	}

	pub fn upload_widget(&self) -> PagesResult<UploadWidget> {
		let policy = UploadPolicy::from_settings(&self.settings.upload)?;
		Ok(UploadWidget::new(
			policy,
			self.settings.upload.clone(),
			&self.settings.messages.upload_rejected,
		))
	}

	pub fn submit_gate(&self) -> SubmitGate {
		SubmitGate::new(
			self.settings.messages.clone(),
			self.settings.endpoints.clone(),
			&self.settings.upload.flash_class,
		)
	}

	pub fn receipt_client(&self) -> ReceiptClient {
		ReceiptClient::new(&self.settings.endpoints, &self.settings.upload)
	}

	pub fn verification_client(&self) -> VerificationClient {
		VerificationClient::new(&self.settings.endpoints)
	}

	pub fn modal_trigger(&self) -> ModalTrigger {
		ModalTrigger::new(&self.settings.endpoints)
	}

	pub fn modal_loader(&self) -> HttpModalLoader {
		HttpModalLoader::new(&self.settings.endpoints.base_url)
	}

	/// CSRF token from the configured cookie.
	pub fn csrf_token(&self) -> Option<String> {
		crate::csrf::csrf_token(&self.settings.endpoints.csrf_cookie)
	}
}
