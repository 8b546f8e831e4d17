//! # Promo
//!
//! Client-side scripts for a promotional entry site: the registration and
//! support form validation, the receipt upload widget and the small page
//! helpers around them.
//!
//! ## Feature Flags
//!
//! - `minimal` - Validation engine only
//! - `full` (default) - Forms, upload, settings and the browser glue
//!
//! ### Fine-grained Control
//!
//! - `forms` - Field registry, validators, error presenter, orchestrator
//! - `upload` - Upload widget, receipt and verification clients
//! - `conf` - Layered settings
//! - `pages` - `web-sys` bindings and the `mount` entry point
//!
//! ## Quick Example
//!
//! ```
//! use promo::core::MemoryPage;
//! use promo::forms::{FormOrchestrator, definitions};
//!
//! let mut form = FormOrchestrator::new(definitions::support().unwrap());
//! let mut page = MemoryPage::new()
//!     .with_input("name", "Ada")
//!     .with_input("email", "ada@example")
//!     .with_input("message", "Where is my prize?");
//!
//! assert!(!form.submit(&mut page));
//! assert_eq!(page.marker_count("email"), 1);
//!
//! page.set_value("email", "ada@example.com").unwrap();
//! assert!(form.submit(&mut page));
//! assert!(page.markers().is_empty());
//! ```

pub mod core;

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "pages")]
pub mod pages;
#[cfg(feature = "upload")]
pub mod upload;

pub use promo_core::{Document, MemoryPage, Page, Window};

#[cfg(feature = "forms")]
pub use promo_forms::{FormOrchestrator, FormRegistry};

#[cfg(feature = "upload")]
pub use promo_upload::{SubmitGate, UploadWidget};

#[cfg(feature = "conf")]
pub use promo_conf::PromoSettings;
