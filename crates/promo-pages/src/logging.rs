//! Logging for the page scripts
//!
//! Every crate logs through `tracing`. The `*_log!` macros are the glue's
//! shorthand: each one emits a `tracing` event under the `promo_pages::glue`
//! target, so the engine's events and the glue's land in the same place.
//! On `wasm32`, [`init`] installs a subscriber writing to the browser console;
//! natively the host application brings its own.
//!
//! | Macro | Level | Compiled in |
//! |-------|-------|-------------|
//! | `debug_log!` | `DEBUG` | with the `debug-log` feature |
//! | `info_log!` | `INFO` | always |
//! | `warn_log!` | `WARN` | always |
//! | `error_log!` | `ERROR` | always |
//!
//! ## Example
//!
//! ```
//! use promo_pages::{info_log, warn_log};
//!
//! info_log!("mounted {} fields", 9);
//! warn_log!("no element with id `{}`", "captcha");
//! ```

/// Target of the events emitted by the `*_log!` macros.
pub const TARGET: &str = "promo_pages::glue";

#[doc(hidden)]
pub use tracing as __tracing;

/// Installs the console subscriber and the panic hook. Later calls do nothing.
#[cfg(target_arch = "wasm32")]
pub fn init() {
	console_error_panic_hook::set_once();
	// Fails only when a subscriber is already installed.
	let _ = tracing_wasm::try_set_as_global_default();
}

/// Nothing to install outside the browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {}

/// Logs a debug message (requires the `debug-log` feature)
#[macro_export]
#[cfg(feature = "debug-log")]
macro_rules! debug_log {
	($($arg:tt)*) => {
		$crate::logging::__tracing::debug!(target: $crate::logging::TARGET, $($arg)*)
	};
}

/// No-op without the `debug-log` feature
#[macro_export]
#[cfg(not(feature = "debug-log"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

#[macro_export]
macro_rules! info_log {
	($($arg:tt)*) => {
		$crate::logging::__tracing::info!(target: $crate::logging::TARGET, $($arg)*)
	};
}

#[macro_export]
macro_rules! warn_log {
	($($arg:tt)*) => {
		$crate::logging::__tracing::warn!(target: $crate::logging::TARGET, $($arg)*)
	};
}

#[macro_export]
macro_rules! error_log {
	($($arg:tt)*) => {
		$crate::logging::__tracing::error!(target: $crate::logging::TARGET, $($arg)*)
	};
}
