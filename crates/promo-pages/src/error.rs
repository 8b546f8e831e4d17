use promo_conf::SettingsError;
use promo_core::DomError;
use promo_forms::RegistryError;
use promo_upload::UploadError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PagesError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("Server answered with status {0}")]
	Status(u16),
	#[error(transparent)]
	Dom(#[from] DomError),
	#[error(transparent)]
	Settings(#[from] SettingsError),
	#[error(transparent)]
	Registry(#[from] RegistryError),
	#[error(transparent)]
	Upload(#[from] UploadError),
	#[error("Browser API unavailable: {0}")]
	Unavailable(&'static str),
	#[error("JavaScript error: {0}")]
	Js(String),
}

pub type PagesResult<T> = Result<T, PagesError>;
