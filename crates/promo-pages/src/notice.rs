use promo_conf::Messages;
use promo_core::{Notice, Window};

/// Element whose click explains that today's receipt was already sent.
pub const RECEIPT_UPLOAD_ID: &str = "receipt-upload";

/// Shown instead of the upload area once a receipt was submitted today.
pub fn already_submitted(window: &mut dyn Window, messages: &Messages) {
	window.notify(&Notice::warning(&messages.already_submitted));
}

#[cfg(test)]
mod tests {
	use super::*;
	use promo_core::{MemoryPage, Severity};
	use rstest::rstest;

	#[rstest]
	fn test_already_submitted_warning() {
		let mut page = MemoryPage::new();

		already_submitted(&mut page, &Messages::default());

		let notice = &page.notices()[0];
		assert_eq!(notice.severity, Severity::Warning);
		assert_eq!(
			notice.text,
			"You have already submitted a receipt today, please try again tomorrow."
		);
	}
}
