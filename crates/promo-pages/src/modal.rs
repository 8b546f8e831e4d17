//! Remote modal content
//!
//! Links carrying `data-remote-target="#someModal"` fetch the modal markup
//! from the server and render it into the element the attribute names.

use crate::error::{PagesError, PagesResult};
use async_trait::async_trait;
use promo_conf::EndpointSettings;
use promo_core::{Document, Selector};
use reqwest::Client;

/// Attribute naming the element the modal is rendered into.
pub const REMOTE_TARGET_ATTR: &str = "data-remote-target";

/// Fetches modal markup.
#[async_trait(?Send)]
pub trait ModalLoader {
	async fn load(&self, path: &str) -> PagesResult<String>;
}

/// Loads modal markup over HTTP.
#[derive(Debug, Clone)]
pub struct HttpModalLoader {
	client: Client,
	base_url: String,
}

impl HttpModalLoader {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self::with_client(Client::new(), base_url)
	}

	pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
		Self {
			client,
			base_url: base_url.into(),
		}
	}
}

#[async_trait(?Send)]
impl ModalLoader for HttpModalLoader {
	async fn load(&self, path: &str) -> PagesResult<String> {
		let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
		let response = self.client.get(&url).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(PagesError::Status(status.as_u16()));
		}
		Ok(response.text().await?)
	}
}

/// Parses the value of a `data-remote-target` attribute.
///
/// # Examples
///
/// ```
/// use promo_core::Selector;
/// use promo_pages::modal::parse_target;
///
/// assert_eq!(parse_target("#termsModal"), Some(Selector::id("termsModal")));
/// assert_eq!(parse_target(".modal-body"), Some(Selector::class("modal-body")));
/// assert_eq!(parse_target("div > p"), None);
/// ```
pub fn parse_target(target: &str) -> Option<Selector> {
	let target = target.trim();
	type Make = fn(String) -> Selector;
	let (selector, name): (Make, &str) = if let Some(id) = target.strip_prefix('#') {
		(Selector::Id, id)
	} else if let Some(class) = target.strip_prefix('.') {
		(Selector::Class, class)
	} else {
		return None;
	};
	let simple = !name.is_empty()
		&& name
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
	simple.then(|| selector(name.to_string()))
}

/// Opens remote modals.
#[derive(Debug, Clone)]
pub struct ModalTrigger {
	path: String,
}

impl ModalTrigger {
	pub fn new(endpoints: &EndpointSettings) -> Self {
		Self {
			path: endpoints.modal.clone(),
		}
	}

	/// Loads the modal and renders it into `target`.
	pub async fn open(
		&self,
		loader: &dyn ModalLoader,
		document: &mut dyn Document,
		target: &str,
	) -> PagesResult<()> {
		let Some(selector) = parse_target(target) else {
			crate::warn_log!("unsupported modal target `{}`", target);
			return Ok(());
		};
		let html = loader.load(&self.path).await?;
		tracing::debug!(target = %selector.to_css(), bytes = html.len(), "modal loaded");
		document.set_content(&selector, &html)?;
		Ok(())
	}
}
