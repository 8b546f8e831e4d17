//! Receipt upload widget
//!
//! Holds at most one image. Adding a file evicts the previous one, checks it
//! against the [`UploadPolicy`] and, when accepted, hands out a
//! [`ReadTicket`] for the asynchronous read. Only the read belonging to the
//! file still held may publish its result; earlier reads finishing late are
//! dropped.

use crate::data_uri;
use crate::policy::{PendingFile, Rejection, UploadPolicy};
use promo_conf::UploadSettings;
use promo_core::{Document, Page, Selector};

/// Handle tying an asynchronous file read to the file it was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "pass the ticket to `finish_read` once the file has been read"]
pub struct ReadTicket {
	generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
	pub current: Option<PendingFile>,
	pub ready: bool,
	pub encoded: Option<String>,
	generation: u64,
}

impl UploadState {
	fn bump(&mut self) -> ReadTicket {
		self.generation += 1;
		ReadTicket {
			generation: self.generation,
		}
	}
}

#[derive(Debug, Clone)]
pub struct UploadWidget {
	policy: UploadPolicy,
	settings: UploadSettings,
	rejected_message: String,
	state: UploadState,
}

impl UploadWidget {
	pub fn new(
		policy: UploadPolicy,
		settings: UploadSettings,
		rejected_message: impl Into<String>,
	) -> Self {
		Self {
			policy,
			settings,
			rejected_message: rejected_message.into(),
			state: UploadState::default(),
		}
	}

	pub fn state(&self) -> &UploadState {
		&self.state
	}

	pub fn is_ready(&self) -> bool {
		self.state.ready
	}

	/// Encoded image, once its read has finished.
	pub fn encoded(&self) -> Option<&str> {
		self.state.encoded.as_deref()
	}

	pub fn policy(&self) -> &UploadPolicy {
		&self.policy
	}

	/// Takes `file` in place of whatever was held.
	///
	/// Returns a ticket for reading the file, or `None` when the policy
	/// rejected it (the user has been alerted).
	pub fn add_file(&mut self, page: &mut dyn Page, file: PendingFile) -> Option<ReadTicket> {
		if self.state.current.is_some() {
			tracing::debug!(file = %file.name, "replacing held file");
			self.remove_file();
		}
		if let Err(rejection) = self.policy.check(&file) {
			self.reject_file(page, &file, &rejection);
			return None;
		}
		tracing::debug!(file = %file.name, size = file.size, "file accepted");
		let ticket = self.state.bump();
		self.state.current = Some(file);
		self.state.ready = true;
		Some(ticket)
	}

	/// Publishes the bytes read for `ticket`.
	///
	/// Returns `false` (and changes nothing) when the ticket is stale: the
	/// file it was issued for has since been removed, replaced or rejected.
	pub fn finish_read(
		&mut self,
		document: &mut dyn Document,
		ticket: ReadTicket,
		bytes: &[u8],
	) -> bool {
		let Some(file) = self
			.state
			.current
			.as_ref()
			.filter(|_| ticket.generation == self.state.generation)
		else {
			tracing::debug!(
				ticket = ticket.generation,
				current = self.state.generation,
				"stale read ignored"
			);
			return false;
		};

		let encoded = data_uri::encode(&file.mime, bytes);
		self.publish(document, &Selector::id(&self.settings.holder_id), &encoded);
		self.publish(document, &Selector::id(&self.settings.ready_flag_id), "yes");
		document.set_visible(&Selector::class(&self.settings.warning_class), false);
		self.state.encoded = Some(encoded);
		true
	}

	/// Refuses `file`: clears the widget, shows the persistent warning,
	/// lowers the ready flag and alerts the user.
	pub fn reject_file(&mut self, page: &mut dyn Page, file: &PendingFile, rejection: &Rejection) {
		tracing::info!(file = %file.name, %rejection, "file rejected");
		self.remove_file();
		page.set_visible(&Selector::class(&self.settings.warning_class), true);
		if let Err(error) = page.set_content(&Selector::id(&self.settings.ready_flag_id), "no") {
			tracing::warn!(%error, "could not lower ready flag");
		}
		page.alert(&self.rejected_message);
	}

	/// Drops the held file. Reads still in flight for it become stale.
	pub fn remove_file(&mut self) {
		self.state.current = None;
		self.state.ready = false;
		self.state.encoded = None;
		let _ = self.state.bump();
	}

	fn publish(&self, document: &mut dyn Document, target: &Selector, content: &str) {
		if let Err(error) = document.set_content(target, content) {
			tracing::warn!(%error, "could not update upload widget");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use promo_conf::Messages;
	use promo_core::MemoryPage;
	use rstest::{fixture, rstest};

	#[fixture]
	fn widget() -> UploadWidget {
		let settings = UploadSettings::default();
		UploadWidget::new(
			UploadPolicy::from_settings(&settings).unwrap(),
			settings,
			Messages::default().upload_rejected,
		)
	}

	#[fixture]
	fn page() -> MemoryPage {
		MemoryPage::new()
			.with_element("image-data-holder1", &[])
			.with_element("check-can-pull", &[])
			.with_element("warning", &["txtMsg"])
	}

	fn png(name: &str) -> PendingFile {
		PendingFile::new(name, "image/png", 2048)
	}

	#[rstest]
	fn test_accepted_file_publishes_after_read(mut widget: UploadWidget, mut page: MemoryPage) {
		// Arrange
		let ticket = widget.add_file(&mut page, png("a.png")).unwrap();

		// Act
		let published = widget.finish_read(&mut page, ticket, b"PNG");

		// Assert
		assert!(published);
		assert!(widget.is_ready());
		assert_eq!(widget.encoded(), Some("data:image/png;base64,UE5H"));
		assert_eq!(
			page.content("image-data-holder1").as_deref(),
			Some("data:image/png;base64,UE5H")
		);
		assert_eq!(page.content("check-can-pull").as_deref(), Some("yes"));
		assert!(!page.is_visible("warning"));
	}

	#[rstest]
	fn test_second_file_evicts_first(mut widget: UploadWidget, mut page: MemoryPage) {
		// Arrange
		let first = widget.add_file(&mut page, png("a.png")).unwrap();

		// Act
		let second = widget.add_file(&mut page, png("b.png")).unwrap();

		// Assert
		assert_eq!(widget.state().current.as_ref().unwrap().name, "b.png");
		assert!(!widget.finish_read(&mut page, first, b"AAA"));
		assert!(widget.finish_read(&mut page, second, b"BBB"));
		assert_eq!(widget.encoded(), Some("data:image/png;base64,QkJC"));
	}

	#[rstest]
	fn test_late_read_of_evicted_file_does_not_overwrite(
		mut widget: UploadWidget,
		mut page: MemoryPage,
	) {
		// Arrange
		let first = widget.add_file(&mut page, png("a.png")).unwrap();
		let second = widget.add_file(&mut page, png("b.png")).unwrap();
		assert!(widget.finish_read(&mut page, second, b"BBB"));

		// Act
		let published = widget.finish_read(&mut page, first, b"AAA");

		// Assert
		assert!(!published);
		assert_eq!(
			page.content("image-data-holder1").as_deref(),
			Some("data:image/png;base64,QkJC")
		);
	}

	#[rstest]
	#[case(PendingFile::new("receipt.pdf", "application/pdf", 100))]
	#[case(PendingFile::new("huge.jpg", "image/jpeg", 5 * 1024 * 1024 + 1))]
	fn test_rejected_file(
		mut widget: UploadWidget,
		mut page: MemoryPage,
		#[case] file: PendingFile,
	) {
		// Act
		let ticket = widget.add_file(&mut page, file);

		// Assert
		assert!(ticket.is_none());
		assert!(!widget.is_ready());
		assert!(widget.state().current.is_none());
		assert_eq!(page.content("check-can-pull").as_deref(), Some("no"));
		assert!(page.is_visible("warning"));
		assert_eq!(page.alerts(), &[Messages::default().upload_rejected]);
	}

	#[rstest]
	fn test_rejected_replacement_drops_previous_image(
		mut widget: UploadWidget,
		mut page: MemoryPage,
	) {
		// Arrange
		let ticket = widget.add_file(&mut page, png("a.png")).unwrap();
		widget.finish_read(&mut page, ticket, b"PNG");

		// Act
		widget.add_file(&mut page, PendingFile::new("notes.txt", "text/plain", 10));

		// Assert
		assert!(!widget.is_ready());
		assert_eq!(widget.encoded(), None);
	}

	#[rstest]
	fn test_remove_invalidates_pending_read(mut widget: UploadWidget, mut page: MemoryPage) {
		let ticket = widget.add_file(&mut page, png("a.png")).unwrap();

		widget.remove_file();

		assert!(!widget.is_ready());
		assert!(!widget.finish_read(&mut page, ticket, b"PNG"));
		assert_eq!(page.content("image-data-holder1").as_deref(), Some(""));
	}
}
