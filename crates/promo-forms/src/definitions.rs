//! Built-in forms and TOML form definitions.
//!
//! The campaign site ships three forms: registration, support and the email
//! check in front of the upload page. Anything else can be declared in TOML
//! and built into a registry with [`FormDefinition::build`].

use crate::field::{FieldKind, FieldSpec};
use crate::registry::{DenyList, FieldRoles, FormRegistry, RegistryError};
use crate::validators::ValidatorId;
use promo_conf::{RangeSetting, ValidationSettings};
use serde::{Deserialize, Serialize};

const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Registration form with the default date ranges.
pub fn registration() -> Result<FormRegistry, RegistryError> {
	registration_with(&ValidationSettings::default())
}

pub fn registration_with(ranges: &ValidationSettings) -> Result<FormRegistry, RegistryError> {
	use ValidatorId::*;

	FormRegistry::builder("registration")
		.field(
			FieldSpec::text("firstName", "Please enter your first name.")
				.with_validators([Presence]),
		)
		.field(
			FieldSpec::text("lastName", "Please enter your last name.")
				.with_validators([Presence]),
		)
		.field(
			FieldSpec::text("emailGroup_email", INVALID_EMAIL)
				.with_validators([Presence, Email]),
		)
		.field(
			FieldSpec::text("emailGroup_confirmedEmail", "Confirm email must be the same as email.")
				.with_validators([Presence, Email, EmailMatch]),
		)
		.field(
			FieldSpec::select("dob_birthYear", "Please select your birth year.")
				.with_validators([Presence, Year, Date]),
		)
		.field(
			FieldSpec::select("dob_birthMonth", "Please select your birth month.")
				.with_validators([Presence, Month, Date]),
		)
		.field(
			FieldSpec::select("dob_birthDay", "Please select your birth date.")
				.with_validators([Presence, Day, Date]),
		)
		.field(
			FieldSpec::checkbox(
				"isAgree",
				"Please agree with the terms and conditions of this promotional offer.",
			)
			.with_validators([Presence])
			.with_anchor("checkbox-error"),
		)
		.field(
			FieldSpec::captcha("captcha", "Please check the captcha checkbox.")
				.with_validators([Presence]),
		)
		.primary_email("emailGroup_email")
		.confirmation_email("emailGroup_confirmedEmail")
		.birth_date("dob_birthYear", "dob_birthMonth", "dob_birthDay")
		.ranges(ranges.clone())
		.build()
}

pub fn support() -> Result<FormRegistry, RegistryError> {
	use ValidatorId::*;

	FormRegistry::builder("support")
		.field(FieldSpec::text("name", "Please enter your name.").with_validators([Presence]))
		.field(FieldSpec::text("email", INVALID_EMAIL).with_validators([Presence, Email]))
		.field(FieldSpec::text("message", "The message is required.").with_validators([Presence]))
		.primary_email("email")
		.build()
}

/// Email check run before the receipt upload page is opened.
pub fn upload_verification() -> Result<FormRegistry, RegistryError> {
	FormRegistry::builder("upload_verification")
		.field(
			FieldSpec::text("upload_email", INVALID_EMAIL)
				.with_validators([ValidatorId::Presence, ValidatorId::Email]),
		)
		.primary_email("upload_email")
		.build()
}

/// One field as written in a form definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
	pub id: String,
	#[serde(default = "default_kind")]
	pub kind: FieldKind,
	pub validators: Vec<String>,
	pub message: String,
	#[serde(default)]
	pub anchor: Option<String>,
	#[serde(default)]
	pub exact_length: Option<usize>,
	#[serde(default)]
	pub range: Option<RangeSetting>,
}

fn default_kind() -> FieldKind {
	FieldKind::Text
}

impl FieldDefinition {
	fn to_spec(&self) -> Result<FieldSpec, RegistryError> {
		let validators = self
			.validators
			.iter()
			.map(|name| {
				name.parse::<ValidatorId>()
					.map_err(|_| RegistryError::UnknownValidator {
						field: self.id.clone(),
						name: name.clone(),
					})
			})
			.collect::<Result<Vec<_>, _>>()?;

		let mut spec =
			FieldSpec::new(&self.id, self.kind, &self.message).with_validators(validators);
		spec.anchor = self.anchor.clone();
		spec = match (self.exact_length, self.range) {
			(Some(_), Some(_)) => return Err(RegistryError::ConflictingConstraint(self.id.clone())),
			(Some(length), None) => spec.with_exact_length(length),
			(None, Some(range)) => spec.with_range(range.min, range.max),
			(None, None) => spec,
		};
		Ok(spec)
	}
}

/// A whole form as written in a definition file
///
/// # Examples
///
/// ```
/// use promo_forms::FormDefinition;
/// use promo_conf::ValidationSettings;
///
/// let definition = FormDefinition::from_toml_str(r#"
///     name = "contest"
///
///     [[fields]]
///     id = "postal"
///     validators = ["presence", "length"]
///     message = "Please enter your 6 character postal code."
///     exact_length = 6
/// "#).unwrap();
///
/// let registry = definition.build(&ValidationSettings::default()).unwrap();
/// assert_eq!(registry.name(), "contest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
	pub name: String,
	pub fields: Vec<FieldDefinition>,
	#[serde(default)]
	pub roles: FieldRoles,
	#[serde(default)]
	pub deny_list: Option<DenyList>,
}

impl FormDefinition {
	pub fn from_toml_str(source: &str) -> Result<Self, RegistryError> {
		Ok(toml::from_str(source)?)
	}

	pub fn build(&self, ranges: &ValidationSettings) -> Result<FormRegistry, RegistryError> {
		let fields = self
			.fields
			.iter()
			.map(FieldDefinition::to_spec)
			.collect::<Result<Vec<_>, _>>()?;
		let mut builder = FormRegistry::builder(&self.name)
			.fields(fields)
			.roles(self.roles.clone())
			.ranges(ranges.clone());
		if let Some(deny_list) = &self.deny_list {
			builder = builder.deny_list(deny_list.clone());
		}
		builder.build()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case::registration(registration(), 9)]
	#[case::support(support(), 3)]
	#[case::upload_verification(upload_verification(), 1)]
	fn test_builtin_forms_build(
		#[case] registry: Result<FormRegistry, RegistryError>,
		#[case] fields: usize,
	) {
		let registry = registry.unwrap();

		assert_eq!(registry.fields().len(), fields);
	}

	#[rstest]
	fn test_registration_roles() {
		let registry = registration().unwrap();

		assert_eq!(registry.roles().email.as_deref(), Some("emailGroup_email"));
		assert!(registry.date_fields().is_some());
		assert_eq!(
			registry.field("isAgree").unwrap().spec().anchor_id(),
			"checkbox-error"
		);
	}

	#[rstest]
	fn test_definition_with_roles_and_deny_list() {
		// Arrange
		let source = r#"
			name = "contest"

			[roles]
			email = "email"

			[deny_list]
			entries = ["TEST", "SAMPLE"]
			message = "This code cannot be used."

			[[fields]]
			id = "email"
			validators = ["presence", "email"]
			message = "Please enter a valid email address."

			[[fields]]
			id = "code"
			validators = ["presence", "deny_list"]
			message = "Please enter your code."

			[[fields]]
			id = "age"
			kind = "select"
			validators = ["presence", "year"]
			message = "Please select your birth year."
			range = { min = 1990, max = 2010 }
		"#;

		// Act
		let registry = FormDefinition::from_toml_str(source)
			.unwrap()
			.build(&ValidationSettings::default())
			.unwrap();

		// Assert
		assert_eq!(registry.deny_list().unwrap().entries, vec!["TEST", "SAMPLE"]);
		assert_eq!(registry.field("age").unwrap().spec().range(), Some((1990, 2010)));
		assert_eq!(registry.field("code").unwrap().spec().kind, FieldKind::Text);
	}

	#[rstest]
	fn test_unknown_validator_name_is_reported_with_field() {
		let definition = FormDefinition::from_toml_str(
			r#"
			name = "bad"
			[[fields]]
			id = "name"
			validators = ["presence", "filled"]
			message = "Please enter your name."
			"#,
		)
		.unwrap();

		let result = definition.build(&ValidationSettings::default());

		assert!(matches!(
			result,
			Err(RegistryError::UnknownValidator { field, name })
				if field == "name" && name == "filled"
		));
	}

	#[rstest]
	fn test_both_constraints_rejected() {
		let definition = FormDefinition::from_toml_str(
			r#"
			name = "bad"
			[[fields]]
			id = "code"
			validators = ["length"]
			message = "Bad code."
			exact_length = 4
			range = { min = 1, max = 2 }
			"#,
		)
		.unwrap();

		let result = definition.build(&ValidationSettings::default());

		assert!(matches!(result, Err(RegistryError::ConflictingConstraint(id)) if id == "code"));
	}

	#[rstest]
	fn test_malformed_toml_is_a_definition_error() {
		let result = FormDefinition::from_toml_str("name = ");

		assert!(matches!(result, Err(RegistryError::Definition(_))));
	}
}
