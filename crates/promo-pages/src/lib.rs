//! Browser glue for the promo site
//!
//! Binds the validation engine from `promo-forms` and the receipt widget from
//! `promo-upload` to the live page. Everything that touches `web-sys` lives in
//! the `web` and `bind` modules, which only build for `wasm32`; the rest runs
//! natively and is tested against [`promo_core::MemoryPage`].
//!
//! ## Mounting
//!
//! ```html
//! <script type="text/toml" id="promo-settings">
//! [validation.year]
//! min = 1950
//! max = 2008
//! </script>
//! <script type="module">
//!   import init, { mount } from "./promo_pages.js";
//!   await init();
//!   mount("registration");
//! </script>
//! ```
//!
//! Natively, the same wiring is reachable through [`PromoApp`]:
//!
//! ```
//! use promo_core::MemoryPage;
//! use promo_pages::{PageKind, PromoApp};
//!
//! let app = PromoApp::default();
//! let mut form = app.form(PageKind::Support).unwrap();
//! let mut page = MemoryPage::new().with_input("email", "");
//!
//! assert!(!form.submit(&mut page));
//! ```

pub mod app;
pub mod csrf;
pub mod error;
pub mod logging;
pub mod modal;
pub mod notice;
pub mod scroll;

#[cfg(target_arch = "wasm32")]
pub mod bind;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{PageKind, PromoApp, SETTINGS_ELEMENT_ID, page_settings};
pub use csrf::{csrf_token, parse_cookie_value};
pub use error::{PagesError, PagesResult};
pub use modal::{HttpModalLoader, ModalLoader, ModalTrigger, parse_target};
pub use scroll::ScrollLock;

#[cfg(target_arch = "wasm32")]
pub use web::WebDocument;
