//! Receipt upload for the promo site
//!
//! - [`UploadWidget`]: single-image holder with type and size checks and
//!   ticketed asynchronous reads
//! - [`DataUri`]: the encoded image kept in the page between read and upload
//! - [`ReceiptClient`] and [`VerificationClient`]: multipart posts carrying
//!   the CSRF header
//! - [`SubmitGate`]: renders server verdicts as dialogs, redirects and flash
//!   banners
//!
//! ## Example
//!
//! ```
//! use promo_conf::{Messages, UploadSettings};
//! use promo_core::MemoryPage;
//! use promo_upload::{PendingFile, UploadPolicy, UploadWidget};
//!
//! let settings = UploadSettings::default();
//! let policy = UploadPolicy::from_settings(&settings).unwrap();
//! let mut widget = UploadWidget::new(policy, settings, Messages::default().upload_rejected);
//! let mut page = MemoryPage::new()
//!     .with_element("image-data-holder1", &[])
//!     .with_element("check-can-pull", &[]);
//!
//! let ticket = widget
//!     .add_file(&mut page, PendingFile::new("receipt.png", "image/png", 3))
//!     .unwrap();
//! assert!(widget.finish_read(&mut page, ticket, b"PNG"));
//! assert_eq!(widget.encoded(), Some("data:image/png;base64,UE5H"));
//! ```

pub mod client;
pub mod data_uri;
pub mod error;
pub mod gate;
pub mod policy;
pub mod widget;

pub use client::{ReceiptClient, ReceiptOutcome, VerificationClient, VerifyOutcome};
pub use data_uri::DataUri;
pub use error::{ClientError, UploadError};
pub use gate::{SubmitGate, flash_html};
pub use policy::{PendingFile, Rejection, UploadPolicy};
pub use widget::{ReadTicket, UploadState, UploadWidget};
