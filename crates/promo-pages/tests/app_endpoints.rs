//! Clients built by `PromoApp` reach the server the page came from

#![cfg(not(target_arch = "wasm32"))]

use promo_pages::{ModalLoader, PromoApp};
use promo_upload::{DataUri, ReceiptOutcome, VerifyOutcome};
use rstest::rstest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, verb: &str, route: &str, body: &str) {
	Mock::given(method(verb))
		.and(path(route))
		.respond_with(ResponseTemplate::new(200).set_body_string(body))
		.expect(1)
		.mount(server)
		.await;
}

#[rstest]
#[tokio::test]
async fn test_default_endpoints_resolve_against_origin() {
	// Arrange
	let server = MockServer::start().await;
	serve(&server, "POST", "/upload/verify", "200").await;
	serve(&server, "POST", "/receipts", "s").await;
	serve(&server, "GET", "/modal", "<p>Rules</p>").await;
	let app = PromoApp::default().with_origin(&server.uri());

	// Act
	let verified = app
		.verification_client()
		.verify("ada@example.com", None)
		.await
		.unwrap();
	let receipt = app
		.receipt_client()
		.submit(&DataUri::new("image/png", b"PNG".to_vec()), None)
		.await
		.unwrap();
	let modal = app.modal_loader().load("/modal").await.unwrap();

	// Assert
	assert_eq!(verified, VerifyOutcome::Verified);
	assert_eq!(receipt, ReceiptOutcome::Accepted);
	assert_eq!(modal, "<p>Rules</p>");
}

#[rstest]
#[tokio::test]
async fn test_relative_endpoint_is_rejected_before_sending() {
	let app = PromoApp::default();

	let result = app.verification_client().verify("ada@example.com", None).await;

	assert!(result.is_err());
}
