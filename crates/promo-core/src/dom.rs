//! DOM abstraction layer
//!
//! The validation engine and the upload widget never talk to `web-sys`
//! directly. They read and mutate the page through [`Document`] and raise
//! dialogs through [`Window`], so the same code runs against the browser
//! and against [`memory::MemoryPage`] in tests.

pub mod memory;

use crate::marker::ErrorMarker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	#[error("No element with id `{0}`")]
	MissingElement(String),
	#[error("Element `{0}` cannot hold a value")]
	NotAnInput(String),
	#[error("DOM operation failed: {0}")]
	Operation(String),
}

pub type DomResult<T> = Result<T, DomError>;

/// Addresses one element (by id) or every element carrying a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
	Id(String),
	Class(String),
}

impl Selector {
	pub fn id(id: impl Into<String>) -> Self {
		Self::Id(id.into())
	}

	pub fn class(class: impl Into<String>) -> Self {
		Self::Class(class.into())
	}

	/// CSS form of the selector, as handed to `querySelector`.
	///
	/// # Examples
	///
	/// ```
	/// use promo_core::Selector;
	///
	/// assert_eq!(Selector::id("captcha").to_css(), "#captcha");
	/// assert_eq!(Selector::class("txtMsg").to_css(), ".txtMsg");
	/// ```
	pub fn to_css(&self) -> String {
		match self {
			Self::Id(id) => format!("#{id}"),
			Self::Class(class) => format!(".{class}"),
		}
	}
}

/// Read and write access to the page.
pub trait Document {
	/// Current value of a text input or select, `None` if there is no such element.
	fn value(&self, id: &str) -> Option<String>;

	/// Whether a checkbox is checked. Missing elements are unchecked.
	fn is_checked(&self, id: &str) -> bool;

	/// Response token of the CAPTCHA widget rendered in `id`, if solved.
	fn captcha_response(&self, id: &str) -> Option<String>;

	fn contains(&self, id: &str) -> bool;

	/// Inserts `marker` as the next sibling of `anchor_id`.
	fn insert_marker_after(&mut self, anchor_id: &str, marker: &ErrorMarker) -> DomResult<()>;

	/// Removes the element with `id`. Returns whether anything was removed.
	fn remove(&mut self, id: &str) -> bool;

	/// Id of the first element, in document order, carrying `class`.
	fn first_with_class(&self, class: &str) -> Option<String>;

	/// Smooth-scrolls so that `id` sits `offset` pixels below the viewport top.
	fn scroll_into_view(&mut self, id: &str, offset: i32, duration_ms: u32) -> DomResult<()>;

	/// Inner HTML of the element with `id`.
	fn content(&self, id: &str) -> Option<String>;

	/// Replaces the inner HTML of every element matched by `selector`.
	fn set_content(&mut self, selector: &Selector, html: &str) -> DomResult<()>;

	/// Shows or hides every element matched by `selector`.
	fn set_visible(&mut self, selector: &Selector, visible: bool);

	/// Sets (`Some`) or clears (`None`) an inline style property on the root element.
	fn set_root_style(&mut self, property: &str, value: Option<&str>);

	fn root_style(&self, property: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
	Success,
	Warning,
	Error,
}

/// A modal dialog shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
	pub severity: Severity,
	pub title: String,
	pub text: String,
}

impl Notice {
	pub fn warning(text: impl Into<String>) -> Self {
		Self {
			severity: Severity::Warning,
			title: String::new(),
			text: text.into(),
		}
	}

	pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			severity: Severity::Success,
			title: title.into(),
			text: text.into(),
		}
	}
}

/// Browser window services: dialogs and navigation.
pub trait Window {
	/// Blocking alert.
	fn alert(&mut self, message: &str);

	/// Non-blocking dialog with a single acknowledge button.
	fn notify(&mut self, notice: &Notice);

	/// Dialog with confirm and cancel buttons. Returns `true` on confirm.
	fn confirm(&mut self, notice: &Notice) -> bool;

	/// Replaces the current location (no history entry).
	fn replace_location(&mut self, path: &str);

	/// Shows `notice` and navigates to `path` once the user dismissed it.
	///
	/// The default suits implementations whose `notify` blocks.
	fn notify_then_navigate(&mut self, notice: &Notice, path: &str) {
		self.notify(notice);
		self.replace_location(path);
	}
}

/// A page: document access plus window services.
pub trait Page: Document + Window {}

impl<T: Document + Window + ?Sized> Page for T {}
