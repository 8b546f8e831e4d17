//! Validator library
//!
//! Every rule is a plain function with the [`ValidatorFn`] signature. It
//! reads the page through [`Validation::document`] and reports only by
//! recording outcomes on the [`ValidationPass`]; none of them can error.
//!
//! [`ValidatorId::resolve`] is the one place that maps an identifier to its
//! function. Registries call it while they are being built, so a typo in a
//! form definition is a build error rather than a silent no-op at blur time.

use crate::field::{FieldKind, FieldSpec};
use crate::pass::ValidationPass;
use crate::registry::FormRegistry;
use chrono::NaiveDate;
use promo_conf::RangeSetting;
use promo_core::Document;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// `local@domain` where the local part is either a dot-separated run of
// characters outside <>()[]\.,;:, whitespace, @ and ", or anything quoted.
// The domain is a bracketed IPv4 literal or labels ending in a 2+ letter TLD.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Whether `value` is a syntactically valid email address.
///
/// # Examples
///
/// ```
/// use promo_forms::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(!is_valid_email("user@.com"));
/// assert!(!is_valid_email("user@com"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}

/// Whether `month/day/year` names a real calendar day (leap years included).
///
/// # Examples
///
/// ```
/// use promo_forms::is_valid_calendar_date;
///
/// assert!(is_valid_calendar_date(2000, 2, 29));
/// assert!(!is_valid_calendar_date(2000, 2, 30));
/// assert!(!is_valid_calendar_date(1999, 4, 31));
/// ```
pub fn is_valid_calendar_date(year: i64, month: i64, day: i64) -> bool {
	let (Ok(year), Ok(month), Ok(day)) = (
		i32::try_from(year),
		u32::try_from(month),
		u32::try_from(day),
	) else {
		return false;
	};
	NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Read-only context shared by the validators of one pass.
pub struct Validation<'a> {
	pub document: &'a dyn Document,
	pub registry: &'a FormRegistry,
}

impl Validation<'_> {
	fn raw_value(&self, id: &str) -> String {
		self.document.value(id).unwrap_or_default()
	}

	fn trimmed_value(&self, id: &str) -> String {
		self.raw_value(id).trim().to_string()
	}
}

/// Signature shared by every validator.
pub type ValidatorFn = fn(&Validation<'_>, &FieldSpec, &mut ValidationPass);

/// Identifier of a validation rule, as written in form definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorId {
	Presence,
	Email,
	EmailMatch,
	Year,
	Month,
	Day,
	Date,
	Length,
	DenyList,
}

impl ValidatorId {
	pub const ALL: [ValidatorId; 9] = [
		Self::Presence,
		Self::Email,
		Self::EmailMatch,
		Self::Year,
		Self::Month,
		Self::Day,
		Self::Date,
		Self::Length,
		Self::DenyList,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Presence => "presence",
			Self::Email => "email",
			Self::EmailMatch => "email_match",
			Self::Year => "year",
			Self::Month => "month",
			Self::Day => "day",
			Self::Date => "date",
			Self::Length => "length",
			Self::DenyList => "deny_list",
		}
	}

	/// The function implementing this rule.
	pub fn resolve(self) -> ValidatorFn {
		match self {
			Self::Presence => presence,
			Self::Email => email,
			Self::EmailMatch => email_match,
			Self::Year => year,
			Self::Month => month,
			Self::Day => day,
			Self::Date => date,
			Self::Length => length,
			Self::DenyList => deny_list,
		}
	}
}

impl fmt::Display for ValidatorId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown validator `{0}`")]
pub struct UnknownValidator(pub String);

impl FromStr for ValidatorId {
	type Err = UnknownValidator;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|id| id.as_str() == s)
			.ok_or_else(|| UnknownValidator(s.to_string()))
	}
}

/// Fails on an empty text/select value, an unchecked checkbox or an
/// unsolved CAPTCHA.
pub fn presence(ctx: &Validation<'_>, field: &FieldSpec, pass: &mut ValidationPass) {
	let filled = match field.kind {
		FieldKind::Text | FieldKind::Select => !ctx.trimmed_value(&field.id).is_empty(),
		FieldKind::Checkbox => ctx.document.is_checked(&field.id),
		FieldKind::Captcha => ctx.document.captcha_response(&field.id).is_some(),
	};
	if !filled {
		pass.fail(&field.id, &field.message);
	}
}

pub fn email(ctx: &Validation<'_>, field: &FieldSpec, pass: &mut ValidationPass) {
	if !is_valid_email(&ctx.trimmed_value(&field.id)) {
		pass.mark_email_syntax_failed();
		pass.fail(&field.id, &field.message);
	}
}

/// Confirmation must equal the primary email verbatim. Only compared when
/// no address failed its syntax check earlier in the pass and the primary
/// address is itself valid; otherwise the syntax check is re-run on the
/// confirmation field instead.
pub fn email_match(ctx: &Validation<'_>, field: &FieldSpec, pass: &mut ValidationPass) {
	let Some(primary_id) = ctx.registry.roles().email.as_deref() else {
		return;
	};
	let primary = ctx.raw_value(primary_id);
	if pass.email_syntax_ok() && is_valid_email(primary.trim()) {
		if ctx.raw_value(&field.id) != primary {
			pass.fail(&field.id, &field.message);
		}
	} else {
		email(ctx, field, pass);
	}
}

fn parse_number(value: &str) -> Option<i64> {
	value.trim().parse().ok()
}

fn effective_range(field: &FieldSpec, default: RangeSetting) -> RangeSetting {
	field
		.range()
		.map(|(min, max)| RangeSetting::new(min, max))
		.unwrap_or(default)
}

fn in_range(ctx: &Validation<'_>, field: &FieldSpec, default: RangeSetting) -> bool {
	let range = effective_range(field, default);
	parse_number(&ctx.raw_value(&field.id)).is_some_and(|n| range.contains(n))
}

fn range_check(
	ctx: &Validation<'_>,
	field: &FieldSpec,
	pass: &mut ValidationPass,
	default: RangeSetting,
) {
	if !in_range(ctx, field, default) {
		pass.mark_date_fragment_failed();
		pass.fail(&field.id, &field.message);
	}
}

pub fn year(ctx: &Validation<'_>, field: &FieldSpec, pass: &mut ValidationPass) {
	range_check(ctx, field, pass, ctx.registry.ranges().year);
}

pub fn month(ctx: &Validation<'_>, field: &FieldSpec, pass: &mut ValidationPass) {
	range_check(ctx, field, pass, ctx.registry.ranges().month);
}

pub fn day(ctx: &Validation<'_>, field: &FieldSpec, pass: &mut ValidationPass) {
	range_check(ctx, field, pass, ctx.registry.ranges().day);
}

/// Composite birth-date check.
///
/// Runs at most once per pass, and only when no range check failed earlier
/// in it. Components not range-checked in this pass are re-checked silently.
/// An invalid day marks day, month and year; a valid one clears all three.
pub fn date(ctx: &Validation<'_>, _field: &FieldSpec, pass: &mut ValidationPass) {
	if !pass.date_fragments_ok() || !pass.begin_date_check() {
		return;
	}
	let Some([year_field, month_field, day_field]) = ctx.registry.date_fields() else {
		return;
	};
	let ranges = ctx.registry.ranges();
	let components = [
		(year_field, ranges.year),
		(month_field, ranges.month),
		(day_field, ranges.day),
	];
	if components
		.iter()
		.any(|(f, _)| ctx.trimmed_value(&f.id).is_empty())
	{
		return;
	}
	if !components.iter().all(|(f, r)| in_range(ctx, f, *r)) {
		return;
	}
	let value = |f: &FieldSpec| parse_number(&ctx.raw_value(&f.id)).unwrap_or_default();
	let valid = is_valid_calendar_date(value(year_field), value(month_field), value(day_field));
	for f in [day_field, month_field, year_field] {
		if valid {
			pass.clear(&f.id);
		} else {
			pass.fail(&f.id, &f.message);
		}
	}
}

/// Trimmed value must have exactly the configured number of characters.
/// Fields without an `ExactLength` constraint are not checked.
pub fn length(ctx: &Validation<'_>, field: &FieldSpec, pass: &mut ValidationPass) {
	let Some(required) = field.exact_length() else {
		return;
	};
	if ctx.trimmed_value(&field.id).chars().count() != required {
		pass.fail(&field.id, &field.message);
	}
}

/// Values on the form's deny-list fail with the deny-list's own message.
pub fn deny_list(ctx: &Validation<'_>, field: &FieldSpec, pass: &mut ValidationPass) {
	let Some(list) = ctx.registry.deny_list() else {
		return;
	};
	if list.contains(&ctx.trimmed_value(&field.id)) {
		pass.fail(&field.id, &list.message);
	}
}
