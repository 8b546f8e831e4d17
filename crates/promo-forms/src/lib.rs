//! Field validation for the promo entry forms
//!
//! One engine serves every form on the site. A form is pure data:
//!
//! - [`FieldSpec`]s declare each field's kind, ordered validators,
//!   optional constraint and message
//! - a [`FormRegistry`] resolves validator ids to functions once, at build
//!   time, and records the fields playing special roles (emails, birth date)
//! - a [`ValidationPass`] carries everything one blur or submit run needs
//!   to share between validators, then is thrown away
//! - the [`ErrorPresenter`] turns a pass into inline markers
//! - the [`FormOrchestrator`] wires it together for blur and submit
//!
//! ## Example
//!
//! ```
//! use promo_core::MemoryPage;
//! use promo_forms::{FormOrchestrator, definitions};
//!
//! let mut page = MemoryPage::new()
//!     .with_input("name", "Ada")
//!     .with_input("email", "not-an-email")
//!     .with_input("message", "Hello");
//! let mut form = FormOrchestrator::new(definitions::support().unwrap());
//!
//! assert!(!form.submit(&mut page));
//! assert_eq!(page.marker_count("email"), 1);
//! ```

pub mod definitions;
pub mod field;
pub mod orchestrator;
pub mod pass;
pub mod presenter;
pub mod registry;
pub mod validators;

pub use definitions::{FieldDefinition, FormDefinition};
pub use field::{Constraint, FieldKind, FieldSpec};
pub use orchestrator::FormOrchestrator;
pub use pass::{Outcome, ValidationPass};
pub use presenter::ErrorPresenter;
pub use registry::{DenyList, FieldRoles, FormRegistry, RegisteredField, RegistryError};
pub use validators::{ValidatorFn, ValidatorId, is_valid_calendar_date, is_valid_email};
