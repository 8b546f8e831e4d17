//! Remote modal loading over HTTP

#![cfg(not(target_arch = "wasm32"))]

use promo_conf::EndpointSettings;
use promo_core::{Document, MemoryPage};
use promo_pages::{HttpModalLoader, ModalLoader, ModalTrigger, PagesError};
use rstest::rstest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[rstest]
#[tokio::test]
async fn test_modal_markup_fetched_and_rendered() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/modal"))
		.respond_with(ResponseTemplate::new(200).set_body_string("<h2>Rules</h2>"))
		.expect(1)
		.mount(&server)
		.await;
	let loader = HttpModalLoader::new(server.uri());
	let trigger = ModalTrigger::new(&EndpointSettings::default());
	let mut page = MemoryPage::new().with_element("rulesModal", &[]);

	// Act
	trigger.open(&loader, &mut page, "#rulesModal").await.unwrap();

	// Assert
	assert_eq!(page.content("rulesModal").as_deref(), Some("<h2>Rules</h2>"));
}

#[rstest]
#[tokio::test]
async fn test_trailing_slash_in_base_url() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/modal"))
		.respond_with(ResponseTemplate::new(200).set_body_string("ok"))
		.mount(&server)
		.await;
	let loader = HttpModalLoader::new(format!("{}/", server.uri()));

	let html = loader.load("/modal").await.unwrap();

	assert_eq!(html, "ok");
}

#[rstest]
#[tokio::test]
async fn test_server_error_leaves_page_untouched() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/modal"))
		.respond_with(ResponseTemplate::new(503))
		.mount(&server)
		.await;
	let loader = HttpModalLoader::new(server.uri());
	let trigger = ModalTrigger::new(&EndpointSettings::default());
	let mut page = MemoryPage::new().with_element("rulesModal", &[]);

	// Act
	let result = trigger.open(&loader, &mut page, "#rulesModal").await;

	// Assert
	assert!(matches!(result, Err(PagesError::Status(503))));
	assert_eq!(page.content("rulesModal").as_deref(), Some(""));
}

#[rstest]
#[tokio::test]
async fn test_unsupported_target_skips_request() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;
	let loader = HttpModalLoader::new(server.uri());
	let trigger = ModalTrigger::new(&EndpointSettings::default());
	let mut page = MemoryPage::new();

	let result = trigger.open(&loader, &mut page, "div.modal").await;

	assert!(result.is_ok());
}
