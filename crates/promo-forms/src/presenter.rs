//! Error presentation
//!
//! Turns validation outcomes into inline markers on the page. The presenter
//! never decides validity itself; it only replays what a [`ValidationPass`]
//! recorded.

use crate::pass::{Outcome, ValidationPass};
use crate::registry::FormRegistry;
use promo_conf::ScrollSettings;
use promo_core::marker::LOCATOR_CLASS;
use promo_core::{Document, ErrorMarker};

#[derive(Debug, Clone)]
pub struct ErrorPresenter {
	scroll: ScrollSettings,
	form_valid: bool,
}

impl Default for ErrorPresenter {
	fn default() -> Self {
		Self::new(ScrollSettings::default())
	}
}

impl ErrorPresenter {
	pub fn new(scroll: ScrollSettings) -> Self {
		Self {
			scroll,
			form_valid: true,
		}
	}

	/// Whether no error was set since the last [`reset`](Self::reset).
	pub fn is_form_valid(&self) -> bool {
		self.form_valid
	}

	pub fn reset(&mut self) {
		self.form_valid = true;
	}

	/// Replaces any marker on `field_id` with one showing `message`, inserted
	/// right after `anchor_id`.
	///
	/// A missing anchor leaves the page untouched apart from removing the
	/// old marker; the form still counts as invalid.
	pub fn set_error(
		&mut self,
		document: &mut dyn Document,
		field_id: &str,
		anchor_id: &str,
		message: &str,
	) {
		self.form_valid = false;
		let marker = ErrorMarker::new(field_id, message);
		document.remove(&marker.element_id());
		if let Err(error) = document.insert_marker_after(anchor_id, &marker) {
			tracing::warn!(field = field_id, %error, "could not render error marker");
		}
	}

	pub fn clear_error(&mut self, document: &mut dyn Document, field_id: &str) {
		document.remove(&ErrorMarker::element_id_for(field_id));
	}

	/// Replays `pass` in the order its outcomes were recorded.
	pub fn apply(
		&mut self,
		document: &mut dyn Document,
		pass: &ValidationPass,
		registry: &FormRegistry,
	) {
		for outcome in pass.outcomes() {
			match outcome {
				Outcome::Fail { field_id, message } => {
					let anchor = registry
						.field(field_id)
						.map(|f| f.spec().anchor_id())
						.unwrap_or(field_id.as_str());
					self.set_error(document, field_id, anchor, message);
				}
				Outcome::Clear { field_id } => self.clear_error(document, field_id),
			}
		}
	}

	/// Scrolls to the first marker in document order. Returns its element id.
	pub fn scroll_to_first_error(&self, document: &mut dyn Document) -> Option<String> {
		let target = document.first_with_class(LOCATOR_CLASS)?;
		if let Err(error) =
			document.scroll_into_view(&target, self.scroll.offset, self.scroll.duration_ms)
		{
			tracing::warn!(%error, "could not scroll to first error");
		}
		Some(target)
	}
}
