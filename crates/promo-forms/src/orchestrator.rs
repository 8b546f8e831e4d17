//! Blur and submit handling for one form.

use crate::pass::ValidationPass;
use crate::presenter::ErrorPresenter;
use crate::registry::FormRegistry;
use crate::validators::{Validation, ValidatorId};
use promo_conf::ScrollSettings;
use promo_core::Document;

/// Order in which a submit runs the validators of every field.
const SUBMIT_PHASES: [ValidatorId; 9] = [
	ValidatorId::Presence,
	ValidatorId::Email,
	ValidatorId::EmailMatch,
	ValidatorId::Length,
	ValidatorId::Year,
	ValidatorId::Month,
	ValidatorId::Day,
	ValidatorId::Date,
	ValidatorId::DenyList,
];

/// Validation engine bound to one form.
#[derive(Debug, Clone)]
pub struct FormOrchestrator {
	registry: FormRegistry,
	presenter: ErrorPresenter,
}

impl FormOrchestrator {
	pub fn new(registry: FormRegistry) -> Self {
		Self {
			registry,
			presenter: ErrorPresenter::default(),
		}
	}

	pub fn with_scroll(mut self, scroll: ScrollSettings) -> Self {
		self.presenter = ErrorPresenter::new(scroll);
		self
	}

	pub fn registry(&self) -> &FormRegistry {
		&self.registry
	}

	/// Runs the full chain of each named field, in the given order, within a
	/// single pass. Unknown ids are skipped. Nothing is presented.
	pub fn run_validators(&self, document: &dyn Document, field_ids: &[&str]) -> ValidationPass {
		let ctx = Validation {
			document,
			registry: &self.registry,
		};
		let mut pass = ValidationPass::new();
		for id in field_ids {
			let Some(field) = self.registry.field(id) else {
				tracing::debug!(form = self.registry.name(), field = id, "no such field");
				continue;
			};
			for (_, validate) in field.chain() {
				validate(&ctx, field.spec(), &mut pass);
			}
		}
		pass
	}

	/// Revalidates one field after it loses focus.
	///
	/// Returns the pass that was presented, or `None` for a field this form
	/// does not declare.
	pub fn blur(&mut self, document: &mut dyn Document, field_id: &str) -> Option<ValidationPass> {
		if self.registry.field(field_id).is_none() {
			tracing::debug!(form = self.registry.name(), field = field_id, "blur on unknown field");
			return None;
		}
		self.presenter.clear_error(document, field_id);
		let pass = self.run_validators(&*document, &[field_id]);
		self.presenter.apply(document, &pass, &self.registry);
		Some(pass)
	}

	/// Validates the whole form.
	///
	/// Returns `true` only when every validator passed; the caller cancels
	/// the native submission otherwise. On failure the page scrolls to the
	/// first marker.
	pub fn submit(&mut self, document: &mut dyn Document) -> bool {
		self.presenter.reset();
		for field in self.registry.fields() {
			self.presenter.clear_error(document, field.id());
		}

		let pass = self.check(&*document);
		self.presenter.apply(document, &pass, &self.registry);

		let valid = pass.is_valid() && self.presenter.is_form_valid();
		if valid {
			tracing::info!(form = self.registry.name(), "form valid");
		} else {
			let target = self.presenter.scroll_to_first_error(document);
			tracing::info!(
				form = self.registry.name(),
				first_error = target.as_deref().unwrap_or("-"),
				"form invalid"
			);
		}
		valid
	}

	/// Runs the submit phases over every field without presenting anything.
	///
	/// Phases run validator by validator (presence, email, email match,
	/// length, year, month, day, date, deny-list), each across all fields
	/// declaring it, so failures appear in phase order.
	pub fn check(&self, document: &dyn Document) -> ValidationPass {
		let ctx = Validation {
			document,
			registry: &self.registry,
		};
		let mut pass = ValidationPass::new();
		for phase in SUBMIT_PHASES {
			for (field, validate) in self.registry.fields_with(phase) {
				validate(&ctx, field.spec(), &mut pass);
			}
		}
		pass
	}
}
