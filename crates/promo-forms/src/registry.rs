//! Field registry
//!
//! A [`FormRegistry`] is the immutable description of one form: its fields in
//! declaration order, each with its validator chain already resolved to
//! functions, the fields playing special roles and the optional deny-list.
//! Every structural invariant is checked once by [`FormRegistryBuilder::build`].

use crate::field::FieldSpec;
use crate::validators::{ValidatorFn, ValidatorId};
use promo_conf::ValidationSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("Field `{0}` is declared twice")]
	DuplicateField(String),
	#[error("Field `{0}` has no validators")]
	NoValidators(String),
	#[error("Field `{0}` has an empty error message")]
	EmptyMessage(String),
	#[error("Field `{field}` uses unknown validator `{name}`")]
	UnknownValidator { field: String, name: String },
	#[error("Field `{field}` uses `{validator}`, which needs a {role} field")]
	MissingRole {
		field: String,
		validator: ValidatorId,
		role: &'static str,
	},
	#[error("The {role} role names `{field}`, which is not a field of this form")]
	UnknownRoleField { role: &'static str, field: String },
	#[error("Field `{0}` uses `deny_list` but the form has no deny-list")]
	MissingDenyList(String),
	#[error("Field `{0}` declares both an exact length and a range")]
	ConflictingConstraint(String),
	#[error("Invalid form definition: {0}")]
	Definition(#[from] toml::de::Error),
}

/// Values a form refuses outright, with the message shown for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenyList {
	pub entries: Vec<String>,
	pub message: String,
}

impl DenyList {
	pub fn new<I, S>(entries: I, message: impl Into<String>) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			entries: entries.into_iter().map(Into::into).collect(),
			message: message.into(),
		}
	}

	pub fn contains(&self, value: &str) -> bool {
		self.entries.iter().any(|e| e == value)
	}
}

/// Fields some validators look up by role rather than by their own id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRoles {
	pub email: Option<String>,
	pub confirmation: Option<String>,
	pub birth_year: Option<String>,
	pub birth_month: Option<String>,
	pub birth_day: Option<String>,
}

impl FieldRoles {
	fn named(&self) -> impl Iterator<Item = (&'static str, &str)> {
		[
			("primary email", &self.email),
			("confirmation email", &self.confirmation),
			("birth year", &self.birth_year),
			("birth month", &self.birth_month),
			("birth day", &self.birth_day),
		]
		.into_iter()
		.filter_map(|(role, id)| id.as_deref().map(|id| (role, id)))
	}

	fn has_birth_date(&self) -> bool {
		self.birth_year.is_some() && self.birth_month.is_some() && self.birth_day.is_some()
	}
}

/// A field together with its resolved validator chain.
#[derive(Debug, Clone)]
pub struct RegisteredField {
	spec: FieldSpec,
	chain: Vec<(ValidatorId, ValidatorFn)>,
}

impl RegisteredField {
	fn new(spec: FieldSpec) -> Self {
		let chain = spec.validators.iter().map(|id| (*id, id.resolve())).collect();
		Self { spec, chain }
	}

	pub fn spec(&self) -> &FieldSpec {
		&self.spec
	}

	pub fn id(&self) -> &str {
		&self.spec.id
	}

	/// Validators in declared order.
	pub fn chain(&self) -> impl Iterator<Item = (ValidatorId, ValidatorFn)> + '_ {
		self.chain.iter().copied()
	}

	/// The resolved function for `id`, if this field declares it.
	pub fn validator(&self, id: ValidatorId) -> Option<ValidatorFn> {
		self.chain
			.iter()
			.find_map(|(declared, f)| (*declared == id).then_some(*f))
	}
}

#[derive(Debug, Clone)]
pub struct FormRegistry {
	name: String,
	fields: Vec<RegisteredField>,
	roles: FieldRoles,
	deny_list: Option<DenyList>,
	ranges: ValidationSettings,
}

impl FormRegistry {
	/// Start declaring a form
	///
	/// # Examples
	///
	/// ```
	/// use promo_forms::{FieldSpec, FormRegistry, ValidatorId};
	///
	/// let registry = FormRegistry::builder("newsletter")
	///     .field(FieldSpec::text("email", "Please enter a valid email address.")
	///         .with_validators([ValidatorId::Presence, ValidatorId::Email]))
	///     .primary_email("email")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(registry.fields().len(), 1);
	/// ```
	pub fn builder(name: impl Into<String>) -> FormRegistryBuilder {
		FormRegistryBuilder::new(name)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn fields(&self) -> &[RegisteredField] {
		&self.fields
	}

	pub fn field(&self, id: &str) -> Option<&RegisteredField> {
		self.fields.iter().find(|f| f.id() == id)
	}

	/// Fields declaring `validator`, in declaration order.
	pub fn fields_with(
		&self,
		validator: ValidatorId,
	) -> impl Iterator<Item = (&RegisteredField, ValidatorFn)> {
		self.fields
			.iter()
			.filter_map(move |f| f.validator(validator).map(|v| (f, v)))
	}

	pub fn roles(&self) -> &FieldRoles {
		&self.roles
	}

	pub fn deny_list(&self) -> Option<&DenyList> {
		self.deny_list.as_ref()
	}

	/// Default ranges for the year, month and day validators.
	pub fn ranges(&self) -> &ValidationSettings {
		&self.ranges
	}

	/// Birth year, month and day fields, when the form declares all three.
	pub fn date_fields(&self) -> Option<[&FieldSpec; 3]> {
		Some([
			self.role_field(self.roles.birth_year.as_deref())?,
			self.role_field(self.roles.birth_month.as_deref())?,
			self.role_field(self.roles.birth_day.as_deref())?,
		])
	}

	fn role_field(&self, id: Option<&str>) -> Option<&FieldSpec> {
		id.and_then(|id| self.field(id)).map(RegisteredField::spec)
	}
}

pub struct FormRegistryBuilder {
	name: String,
	fields: Vec<FieldSpec>,
	roles: FieldRoles,
	deny_list: Option<DenyList>,
	ranges: ValidationSettings,
}

impl FormRegistryBuilder {
	fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
			roles: FieldRoles::default(),
			deny_list: None,
			ranges: ValidationSettings::default(),
		}
	}

	pub fn field(mut self, field: FieldSpec) -> Self {
		self.fields.push(field);
		self
	}

	pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
		self.fields.extend(fields);
		self
	}

	pub fn roles(mut self, roles: FieldRoles) -> Self {
		self.roles = roles;
		self
	}

	pub fn primary_email(mut self, id: impl Into<String>) -> Self {
		self.roles.email = Some(id.into());
		self
	}

	pub fn confirmation_email(mut self, id: impl Into<String>) -> Self {
		self.roles.confirmation = Some(id.into());
		self
	}

	pub fn birth_date(
		mut self,
		year: impl Into<String>,
		month: impl Into<String>,
		day: impl Into<String>,
	) -> Self {
		self.roles.birth_year = Some(year.into());
		self.roles.birth_month = Some(month.into());
		self.roles.birth_day = Some(day.into());
		self
	}

	pub fn deny_list(mut self, deny_list: DenyList) -> Self {
		self.deny_list = Some(deny_list);
		self
	}

	pub fn ranges(mut self, ranges: ValidationSettings) -> Self {
		self.ranges = ranges;
		self
	}

	pub fn build(self) -> Result<FormRegistry, RegistryError> {
		let mut seen = HashSet::new();
		for field in &self.fields {
			if !seen.insert(field.id.as_str()) {
				return Err(RegistryError::DuplicateField(field.id.clone()));
			}
			if field.validators.is_empty() {
				return Err(RegistryError::NoValidators(field.id.clone()));
			}
			if field.message.trim().is_empty() {
				return Err(RegistryError::EmptyMessage(field.id.clone()));
			}
			self.check_roles_for(field)?;
		}

		for (role, id) in self.roles.named() {
			if !seen.contains(id) {
				return Err(RegistryError::UnknownRoleField {
					role,
					field: id.to_string(),
				});
			}
		}

		tracing::debug!(form = %self.name, fields = self.fields.len(), "form registry built");
		Ok(FormRegistry {
			name: self.name,
			fields: self.fields.into_iter().map(RegisteredField::new).collect(),
			roles: self.roles,
			deny_list: self.deny_list,
			ranges: self.ranges,
		})
	}

	fn check_roles_for(&self, field: &FieldSpec) -> Result<(), RegistryError> {
		let missing = |validator, role| RegistryError::MissingRole {
			field: field.id.clone(),
			validator,
			role,
		};
		if field.has_validator(ValidatorId::EmailMatch) && self.roles.email.is_none() {
			return Err(missing(ValidatorId::EmailMatch, "primary email"));
		}
		if field.has_validator(ValidatorId::Date) && !self.roles.has_birth_date() {
			return Err(missing(ValidatorId::Date, "birth year, month and day"));
		}
		if field.has_validator(ValidatorId::DenyList) && self.deny_list.is_none() {
			return Err(RegistryError::MissingDenyList(field.id.clone()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn email_field(id: &str) -> FieldSpec {
		FieldSpec::text(id, "Please enter a valid email address.")
			.with_validators([ValidatorId::Presence, ValidatorId::Email])
	}

	#[rstest]
	fn test_chain_resolved_in_declared_order() {
		// Arrange
		let field = FieldSpec::select("dob_birthYear", "Please select your birth year.")
			.with_validators([ValidatorId::Presence, ValidatorId::Year]);

		// Act
		let registry = FormRegistry::builder("dob").field(field).build().unwrap();

		// Assert
		let ids: Vec<_> = registry.fields()[0].chain().map(|(id, _)| id).collect();
		assert_eq!(ids, vec![ValidatorId::Presence, ValidatorId::Year]);
	}

	#[rstest]
	fn test_duplicate_field_rejected() {
		let result = FormRegistry::builder("dup")
			.field(email_field("email"))
			.field(email_field("email"))
			.build();

		assert!(matches!(result, Err(RegistryError::DuplicateField(id)) if id == "email"));
	}

	#[rstest]
	fn test_field_without_validators_rejected() {
		let result = FormRegistry::builder("empty")
			.field(FieldSpec::text("name", "Please enter your name."))
			.build();

		assert!(matches!(result, Err(RegistryError::NoValidators(id)) if id == "name"));
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	fn test_blank_message_rejected(#[case] message: &str) {
		let result = FormRegistry::builder("blank")
			.field(FieldSpec::text("name", message).with_validators([ValidatorId::Presence]))
			.build();

		assert!(matches!(result, Err(RegistryError::EmptyMessage(_))));
	}

	#[rstest]
	fn test_email_match_needs_primary_email() {
		let confirm = FieldSpec::text("confirm", "Confirm email must be the same as email.")
			.with_validators([ValidatorId::EmailMatch]);

		let result = FormRegistry::builder("confirm").field(confirm).build();

		assert!(matches!(
			result,
			Err(RegistryError::MissingRole {
				validator: ValidatorId::EmailMatch,
				..
			})
		));
	}

	#[rstest]
	fn test_date_needs_all_three_roles() {
		let year = FieldSpec::select("year", "Please select your birth year.")
			.with_validators([ValidatorId::Year, ValidatorId::Date]);

		let result = FormRegistry::builder("date").field(year).build();

		assert!(matches!(
			result,
			Err(RegistryError::MissingRole {
				validator: ValidatorId::Date,
				..
			})
		));
	}

	#[rstest]
	fn test_deny_list_validator_needs_a_list() {
		let code = FieldSpec::text("code", "Please enter your code.")
			.with_validators([ValidatorId::DenyList]);

		let result = FormRegistry::builder("codes").field(code).build();

		assert!(matches!(result, Err(RegistryError::MissingDenyList(id)) if id == "code"));
	}

	#[rstest]
	fn test_role_must_name_a_field() {
		let result = FormRegistry::builder("roles")
			.field(email_field("email"))
			.primary_email("emailGroup_email")
			.build();

		assert!(matches!(
			result,
			Err(RegistryError::UnknownRoleField { field, .. }) if field == "emailGroup_email"
		));
	}

	#[rstest]
	fn test_fields_with_filters_by_validator() {
		// Arrange
		let registry = FormRegistry::builder("support")
			.field(
				FieldSpec::text("name", "Please enter your name.")
					.with_validators([ValidatorId::Presence]),
			)
			.field(email_field("email"))
			.build()
			.unwrap();

		// Act
		let ids: Vec<_> = registry
			.fields_with(ValidatorId::Email)
			.map(|(f, _)| f.id())
			.collect();

		// Assert
		assert_eq!(ids, vec!["email"]);
	}

	#[rstest]
	fn test_deny_list_membership_is_exact() {
		let list = DenyList::new(["TEST"], "This code is not valid.");

		assert!(list.contains("TEST"));
		assert!(!list.contains("test"));
		assert!(!list.contains("TEST1"));
	}
}
