//! Inline error markers.
//!
//! A marker is the `<span>` rendered right after a field (or after the
//! field's anchor) while that field is invalid. Markers carry the
//! `custom-error-locator` class so the first one can be found and scrolled to.

use std::borrow::Cow;

/// Class shared by every marker; used to locate the first error on the page.
pub const LOCATOR_CLASS: &str = "custom-error-locator";

/// Full class attribute rendered on a marker.
pub const MARKER_CLASSES: &str = "help-block align-error custom-error-locator";

/// Escapes HTML special characters in a string.
///
/// This function replaces the following characters:
/// - `&` → `&amp;`
/// - `<` → `&lt;`
/// - `>` → `&gt;`
/// - `"` → `&quot;`
/// - `'` → `&#x27;`
///
/// Returns a borrowed reference if no escaping is needed,
/// or an owned string if any characters were escaped.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// An inline validation message bound to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMarker {
	field_id: String,
	message: String,
}

impl ErrorMarker {
	/// Creates a marker for `field_id`.
	///
	/// # Examples
	///
	/// ```
	/// use promo_core::ErrorMarker;
	///
	/// let marker = ErrorMarker::new("firstName", "Please enter your first name.");
	/// assert_eq!(marker.element_id(), "error-firstName");
	/// ```
	pub fn new(field_id: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			field_id: field_id.into(),
			message: message.into(),
		}
	}

	/// Element id a marker for `field_id` is rendered with.
	pub fn element_id_for(field_id: &str) -> String {
		format!("error-{field_id}")
	}

	pub fn field_id(&self) -> &str {
		&self.field_id
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn element_id(&self) -> String {
		Self::element_id_for(&self.field_id)
	}

	/// Renders the marker as HTML. The message is escaped, the id is not.
	///
	/// # Examples
	///
	/// ```
	/// use promo_core::ErrorMarker;
	///
	/// let html = ErrorMarker::new("email", "a < b").to_html();
	/// assert_eq!(
	///     html,
	///     r#"<span id="error-email" class="help-block align-error custom-error-locator">a &lt; b</span>"#
	/// );
	/// ```
	pub fn to_html(&self) -> String {
		format!(
			r#"<span id="{}" class="{}">{}</span>"#,
			self.element_id(),
			MARKER_CLASSES,
			html_escape(&self.message)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_html_escape_no_special_chars() {
		assert_eq!(html_escape("Hello World"), Cow::Borrowed("Hello World"));
	}

	#[rstest]
	#[case("a & b", "a &amp; b")]
	#[case("<b>", "&lt;b&gt;")]
	#[case(r#"say "hi""#, "say &quot;hi&quot;")]
	#[case("it's", "it&#x27;s")]
	fn test_html_escape_special_chars(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), expected);
	}

	#[rstest]
	fn test_marker_element_id() {
		// Arrange
		let marker = ErrorMarker::new("dob_birthYear", "Please select your birth year.");

		// Act
		let id = marker.element_id();

		// Assert
		assert_eq!(id, "error-dob_birthYear");
		assert_eq!(ErrorMarker::element_id_for("isAgree"), "error-isAgree");
	}

	#[rstest]
	fn test_marker_html_carries_locator_class() {
		let html = ErrorMarker::new("captcha", "Please check the captcha checkbox.").to_html();

		assert!(html.contains(LOCATOR_CLASS));
		assert!(html.starts_with(r#"<span id="error-captcha""#));
		assert!(html.ends_with("Please check the captcha checkbox.</span>"));
	}
}
