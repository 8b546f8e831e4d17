//! Page abstraction for the promo form scripts
//!
//! Everything that touches the page goes through two traits:
//!
//! - [`Document`]: element values, checkbox/CAPTCHA state, error markers,
//!   visibility, inner content, scrolling and root styles
//! - [`Window`]: blocking alerts, dialogs and navigation
//!
//! [`MemoryPage`] implements both in memory and backs every native test.
//! The browser implementation lives in `promo-pages`.

pub mod dom;
pub mod marker;

pub use dom::memory::{MemoryNode, MemoryPage, ScrollRecord, WindowEvent};
pub use dom::{Document, DomError, DomResult, Notice, Page, Selector, Severity, Window};
pub use marker::{ErrorMarker, html_escape};
