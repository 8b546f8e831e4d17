//! Page scroll lock used while a modal is open.

use promo_core::Document;

const OVERFLOW: &str = "overflow";

pub struct ScrollLock;

impl ScrollLock {
	/// Stops the page from scrolling.
	pub fn disable(document: &mut dyn Document) {
		document.set_root_style(OVERFLOW, Some("hidden"));
	}

	/// Restores scrolling.
	pub fn enable(document: &mut dyn Document) {
		document.set_root_style(OVERFLOW, None);
	}

	pub fn is_locked(document: &dyn Document) -> bool {
		document.root_style(OVERFLOW).as_deref() == Some("hidden")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use promo_core::MemoryPage;
	use rstest::rstest;

	#[rstest]
	fn test_disable_then_enable() {
		// Arrange
		let mut page = MemoryPage::new();

		// Act
		ScrollLock::disable(&mut page);
		let locked = ScrollLock::is_locked(&page);
		ScrollLock::enable(&mut page);

		// Assert
		assert!(locked);
		assert!(!ScrollLock::is_locked(&page));
		assert_eq!(page.root_style("overflow"), None);
	}

	#[rstest]
	fn test_enable_without_disable_is_harmless() {
		let mut page = MemoryPage::new();

		ScrollLock::enable(&mut page);

		assert!(!ScrollLock::is_locked(&page));
	}
}
