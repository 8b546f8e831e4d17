//! CSRF token lookup
//!
//! The server sets the token in a cookie and expects it back in a request
//! header of the same name (`CSRF-Token` by default).

/// Parses a cookie value from a cookie string.
///
/// The cookie string format is: "name1=value1; name2=value2; ...". The
/// value is percent-decoded; a value that does not decode is returned as is.
///
/// # Examples
///
/// ```
/// use promo_pages::csrf::parse_cookie_value;
///
/// let cookies = "theme=dark; CSRF-Token=abc%3D%3D; lang=en";
/// assert_eq!(parse_cookie_value(cookies, "CSRF-Token").as_deref(), Some("abc=="));
/// assert_eq!(parse_cookie_value(cookies, "session"), None);
/// ```
pub fn parse_cookie_value(cookie_str: &str, name: &str) -> Option<String> {
	for part in cookie_str.split(';') {
		let part = part.trim();
		if let Some((key, value)) = part.split_once('=')
			&& key.trim() == name
		{
			let value = value.trim();
			return Some(
				urlencoding::decode(value)
					.map(|v| v.into_owned())
					.unwrap_or_else(|_| value.to_string()),
			);
		}
	}
	None
}

/// Reads the token from `document.cookie`.
#[cfg(target_arch = "wasm32")]
pub fn csrf_token(cookie_name: &str) -> Option<String> {
	use wasm_bindgen::JsCast;
	use web_sys::{HtmlDocument, window};

	let document = window()?.document()?;
	let html_doc = document.dyn_ref::<HtmlDocument>()?;
	let cookie_str = html_doc.cookie().ok()?;

	parse_cookie_value(&cookie_str, cookie_name)
}

/// Reads the token from the cookie (non-WASM stub).
#[cfg(not(target_arch = "wasm32"))]
pub fn csrf_token(_cookie_name: &str) -> Option<String> {
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("CSRF-Token=abc", Some("abc"))]
	#[case("a=1; CSRF-Token=abc; b=2", Some("abc"))]
	#[case("  CSRF-Token = abc  ", Some("abc"))]
	#[case("CSRF-Token=a%20b", Some("a b"))]
	#[case("CSRF-Token=", Some(""))]
	#[case("X-CSRF-Token=abc", None)]
	#[case("", None)]
	fn test_parse_cookie_value(#[case] cookies: &str, #[case] expected: Option<&str>) {
		assert_eq!(
			parse_cookie_value(cookies, "CSRF-Token").as_deref(),
			expected
		);
	}

	#[rstest]
	fn test_first_matching_cookie_wins() {
		let value = parse_cookie_value("CSRF-Token=first; CSRF-Token=second", "CSRF-Token");

		assert_eq!(value.as_deref(), Some("first"));
	}

	#[rstest]
	fn test_malformed_escape_kept_verbatim() {
		let value = parse_cookie_value("CSRF-Token=%E0%A4%A", "CSRF-Token");

		assert_eq!(value.as_deref(), Some("%E0%A4%A"));
	}

	#[rstest]
	#[cfg(not(target_arch = "wasm32"))]
	fn test_native_build_has_no_cookie_jar() {
		assert_eq!(csrf_token("CSRF-Token"), None);
	}
}
