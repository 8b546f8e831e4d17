//! Browser glue. The `web-sys` bindings only exist on `wasm32`.

#[cfg(feature = "pages")]
pub use promo_pages::*;
