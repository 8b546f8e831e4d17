//! Page abstraction shared by every other module.
//!
//! # Examples
//!
//! ```
//! use promo::core::{Document, MemoryPage};
//!
//! let page = MemoryPage::new().with_input("email", "ada@example.com");
//! assert_eq!(page.value("email").as_deref(), Some("ada@example.com"));
//! ```

pub use promo_core::*;
