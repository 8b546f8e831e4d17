//! Per-run validation state.
//!
//! A [`ValidationPass`] is created for every blur or submit, threaded through
//! each validator of that run, handed to the presenter and dropped. Facts one
//! validator leaves for a later one (did an email fail its syntax check, did
//! every date component pass its range check) live here and nowhere else.

/// One instruction for the presenter, in the order it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Fail { field_id: String, message: String },
	Clear { field_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPass {
	outcomes: Vec<Outcome>,
	email_syntax_ok: bool,
	date_fragments_ok: bool,
	date_checked: bool,
}

impl Default for ValidationPass {
	fn default() -> Self {
		Self::new()
	}
}

impl ValidationPass {
	pub fn new() -> Self {
		Self {
			outcomes: Vec::new(),
			email_syntax_ok: true,
			date_fragments_ok: true,
			date_checked: false,
		}
	}

	/// Records a failure. A field keeps one failure per pass; a later one
	/// replaces the earlier message.
	pub fn fail(&mut self, field_id: &str, message: &str) {
		tracing::debug!(field = field_id, message, "validation failed");
		let existing = self.outcomes.iter_mut().find(
			|o| matches!(o, Outcome::Fail { field_id: id, .. } if id == field_id),
		);
		match existing {
			Some(Outcome::Fail { message: m, .. }) => *m = message.to_string(),
			_ => self.outcomes.push(Outcome::Fail {
				field_id: field_id.to_string(),
				message: message.to_string(),
			}),
		}
	}

	/// Asks the presenter to drop any marker left on `field_id`.
	pub fn clear(&mut self, field_id: &str) {
		self.outcomes.push(Outcome::Clear {
			field_id: field_id.to_string(),
		});
	}

	pub fn outcomes(&self) -> &[Outcome] {
		&self.outcomes
	}

	/// `(field_id, message)` of every failure, in the order first recorded.
	pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
		self.outcomes.iter().filter_map(|o| match o {
			Outcome::Fail { field_id, message } => Some((field_id.as_str(), message.as_str())),
			Outcome::Clear { .. } => None,
		})
	}

	pub fn failed(&self, field_id: &str) -> bool {
		self.failures().any(|(id, _)| id == field_id)
	}

	pub fn is_valid(&self) -> bool {
		self.failures().next().is_none()
	}

	pub fn email_syntax_ok(&self) -> bool {
		self.email_syntax_ok
	}

	pub(crate) fn mark_email_syntax_failed(&mut self) {
		self.email_syntax_ok = false;
	}

	pub fn date_fragments_ok(&self) -> bool {
		self.date_fragments_ok
	}

	pub(crate) fn mark_date_fragment_failed(&mut self) {
		self.date_fragments_ok = false;
	}

	/// Returns `true` the first time it is called in a pass.
	pub(crate) fn begin_date_check(&mut self) -> bool {
		!std::mem::replace(&mut self.date_checked, true)
	}
}
