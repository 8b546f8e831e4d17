use crate::validators::ValidatorId;
use serde::{Deserialize, Serialize};

/// How a field's state is read from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	Text,
	Select,
	Checkbox,
	/// Third-party CAPTCHA widget; "filled" means a response token exists.
	Captcha,
}

/// Optional per-field constraint consumed by the `length` and range validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
	ExactLength(usize),
	Range { min: i64, max: i64 },
}

/// Static declaration of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
	pub id: String,
	pub kind: FieldKind,
	pub validators: Vec<ValidatorId>,
	pub constraint: Option<Constraint>,
	pub message: String,
	/// Element the error marker is inserted after; the field itself when `None`.
	pub anchor: Option<String>,
}

impl FieldSpec {
	/// Create a field with no validators yet
	///
	/// # Examples
	///
	/// ```
	/// use promo_forms::{FieldKind, FieldSpec, ValidatorId};
	///
	/// let field = FieldSpec::new("firstName", FieldKind::Text, "Please enter your first name.")
	///     .with_validators([ValidatorId::Presence]);
	/// assert_eq!(field.anchor_id(), "firstName");
	/// ```
	pub fn new(id: impl Into<String>, kind: FieldKind, message: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			kind,
			validators: Vec::new(),
			constraint: None,
			message: message.into(),
			anchor: None,
		}
	}

	pub fn text(id: impl Into<String>, message: impl Into<String>) -> Self {
		Self::new(id, FieldKind::Text, message)
	}

	pub fn select(id: impl Into<String>, message: impl Into<String>) -> Self {
		Self::new(id, FieldKind::Select, message)
	}

	pub fn checkbox(id: impl Into<String>, message: impl Into<String>) -> Self {
		Self::new(id, FieldKind::Checkbox, message)
	}

	pub fn captcha(id: impl Into<String>, message: impl Into<String>) -> Self {
		Self::new(id, FieldKind::Captcha, message)
	}

	pub fn with_validators(mut self, validators: impl IntoIterator<Item = ValidatorId>) -> Self {
		self.validators.extend(validators);
		self
	}

	pub fn with_exact_length(mut self, length: usize) -> Self {
		self.constraint = Some(Constraint::ExactLength(length));
		self
	}

	pub fn with_range(mut self, min: i64, max: i64) -> Self {
		self.constraint = Some(Constraint::Range { min, max });
		self
	}

	pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
		self.anchor = Some(anchor.into());
		self
	}

	pub fn anchor_id(&self) -> &str {
		self.anchor.as_deref().unwrap_or(&self.id)
	}

	pub fn exact_length(&self) -> Option<usize> {
		match self.constraint {
			Some(Constraint::ExactLength(n)) => Some(n),
			_ => None,
		}
	}

	pub fn range(&self) -> Option<(i64, i64)> {
		match self.constraint {
			Some(Constraint::Range { min, max }) => Some((min, max)),
			_ => None,
		}
	}

	pub fn has_validator(&self, id: ValidatorId) -> bool {
		self.validators.contains(&id)
	}
}
