//! Settings loading integration tests
//!
//! Exercises the standard layering (defaults < promo.toml < PROMO_* env)
//! end to end against real files and process environment.

use promo_conf::{PromoSettings, RangeSetting};
use rstest::rstest;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn clear_env() {
	// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
	// These tests use #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::remove_var("PROMO_UPLOAD__MAX_BYTES");
		std::env::remove_var("PROMO_ENDPOINTS__BASE_URL");
		std::env::remove_var("PROMO_ENDPOINTS__CSRF_COOKIE");
	}
}

#[rstest]
#[serial]
fn test_load_without_file_yields_defaults() {
	// Arrange
	clear_env();
	let temp_dir = TempDir::new().unwrap();

	// Act
	let settings = PromoSettings::load(temp_dir.path().join("promo.toml")).unwrap();

	// Assert
	assert_eq!(settings, PromoSettings::default());
}

#[rstest]
#[serial]
fn test_file_then_env_layering() {
	// Arrange
	clear_env();
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("promo.toml");
	fs::write(
		&path,
		r#"
[upload]
max_bytes = 1048576

[validation.year]
min = 1950
max = 2005

[endpoints]
base_url = "https://file.example"
"#,
	)
	.unwrap();
	// SAFETY: See clear_env.
	unsafe {
		std::env::set_var("PROMO_ENDPOINTS__BASE_URL", "https://env.example");
	}

	// Act
	let settings = PromoSettings::load(&path).unwrap();

	// Assert
	assert_eq!(settings.upload.max_bytes, 1_048_576);
	assert_eq!(settings.validation.year, RangeSetting::new(1950, 2005));
	assert_eq!(settings.validation.month, RangeSetting::new(1, 12));
	assert_eq!(settings.endpoints.base_url, "https://env.example");
	assert_eq!(settings.endpoints.receipt, "/receipts");

	clear_env();
}

#[rstest]
#[serial]
fn test_env_number_override() {
	// Arrange
	clear_env();
	let temp_dir = TempDir::new().unwrap();
	// SAFETY: See clear_env.
	unsafe {
		std::env::set_var("PROMO_UPLOAD__MAX_BYTES", "2048");
	}

	// Act
	let settings = PromoSettings::load(temp_dir.path().join("missing.toml")).unwrap();

	// Assert
	assert_eq!(settings.upload.max_bytes, 2048);

	clear_env();
}

#[rstest]
#[serial]
fn test_numeric_env_value_for_string_setting() {
	// Arrange
	clear_env();
	let temp_dir = TempDir::new().unwrap();
	// SAFETY: See clear_env.
	unsafe {
		std::env::set_var("PROMO_ENDPOINTS__CSRF_COOKIE", "123");
		std::env::set_var("PROMO_UPLOAD__MAX_BYTES", "4096");
	}

	// Act
	let settings = PromoSettings::load(temp_dir.path().join("missing.toml")).unwrap();

	// Assert
	assert_eq!(settings.endpoints.csrf_cookie, "123");
	assert_eq!(settings.upload.max_bytes, 4096);

	clear_env();
}
