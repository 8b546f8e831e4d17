//! Receipt submission and upload-page verification against a mock server.

use promo_conf::{EndpointSettings, Messages, UploadSettings};
use promo_core::{Document, MemoryPage, Severity};
use promo_upload::{
	PendingFile, ReceiptClient, SubmitGate, UploadPolicy, UploadWidget, VerificationClient,
};
use rstest::rstest;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoints(server: &MockServer) -> EndpointSettings {
	EndpointSettings {
		base_url: server.uri(),
		..EndpointSettings::default()
	}
}

fn gate(endpoints: &EndpointSettings) -> SubmitGate {
	SubmitGate::new(Messages::default(), endpoints.clone(), "upload-msg")
}

fn upload_page() -> MemoryPage {
	MemoryPage::new()
		.with_element("image-data-holder1", &[])
		.with_element("check-can-pull", &[])
		.with_element("warning", &["txtMsg"])
		.with_element("flash", &["upload-msg"])
		.with_input("upload_email", "ada@example.com")
}

fn ready_widget(page: &mut MemoryPage) -> UploadWidget {
	let settings = UploadSettings::default();
	let mut widget = UploadWidget::new(
		UploadPolicy::from_settings(&settings).unwrap(),
		settings,
		Messages::default().upload_rejected,
	);
	let ticket = widget
		.add_file(page, PendingFile::new("receipt.png", "image/png", 3))
		.unwrap();
	assert!(widget.finish_read(page, ticket, b"PNG"));
	widget
}

async fn mock_response(server: &MockServer, route: &str, body: &str) {
	Mock::given(method("POST"))
		.and(path(route))
		.respond_with(ResponseTemplate::new(200).set_body_string(body))
		.mount(server)
		.await;
}

#[rstest]
#[tokio::test]
async fn test_accepted_receipt_posts_image_with_csrf_header() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/receipts"))
		.and(header("CSRF-Token", "token-123"))
		.and(body_string_contains("name=\"enc\""))
		.and(body_string_contains("PNG"))
		.respond_with(ResponseTemplate::new(200).set_body_string("s"))
		.expect(1)
		.mount(&server)
		.await;
	let endpoints = endpoints(&server);
	let client = ReceiptClient::new(&endpoints, &UploadSettings::default());
	let mut page = upload_page();
	let widget = ready_widget(&mut page);

	// Act
	gate(&endpoints)
		.submit_receipt(&widget, &client, &mut page, Some("token-123"))
		.await;

	// Assert
	let notice = &page.notices()[0];
	assert_eq!(notice.severity, Severity::Success);
	assert_eq!(notice.title, "Congratulations");
	assert_eq!(page.locations(), &["/".to_string()]);
}

#[rstest]
#[tokio::test]
async fn test_duplicate_receipt_warns_without_redirect() {
	// Arrange
	let server = MockServer::start().await;
	mock_response(&server, "/receipts", "d").await;
	let endpoints = endpoints(&server);
	let client = ReceiptClient::new(&endpoints, &UploadSettings::default());
	let mut page = upload_page();
	let widget = ready_widget(&mut page);

	// Act
	gate(&endpoints)
		.submit_receipt(&widget, &client, &mut page, Some("t"))
		.await;

	// Assert
	assert_eq!(page.notices()[0].severity, Severity::Warning);
	assert_eq!(page.notices()[0].text, Messages::default().duplicate_receipt);
	assert!(page.locations().is_empty());
}

#[rstest]
#[case::unexpected_body(200, "oops")]
#[case::server_error(500, "s")]
#[tokio::test]
async fn test_failed_upload_shows_flash_banner(#[case] status: u16, #[case] body: &str) {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(status).set_body_string(body))
		.mount(&server)
		.await;
	let endpoints = endpoints(&server);
	let client = ReceiptClient::new(&endpoints, &UploadSettings::default());
	let mut page = upload_page();
	let widget = ready_widget(&mut page);

	// Act
	gate(&endpoints)
		.submit_receipt(&widget, &client, &mut page, Some("t"))
		.await;

	// Assert
	let flash = page.content("flash").unwrap();
	assert!(flash.contains("Something went wrong, please try again."));
	assert!(page.notices().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_submit_without_image_only_alerts() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200).set_body_string("s"))
		.expect(0)
		.mount(&server)
		.await;
	let endpoints = endpoints(&server);
	let settings = UploadSettings::default();
	let client = ReceiptClient::new(&endpoints, &settings);
	let widget = UploadWidget::new(
		UploadPolicy::from_settings(&settings).unwrap(),
		settings,
		"rejected",
	);
	let mut page = upload_page();

	// Act
	gate(&endpoints)
		.submit_receipt(&widget, &client, &mut page, Some("t"))
		.await;

	// Assert
	assert_eq!(
		page.alerts(),
		&["Please select your image by clicking on the box below.".to_string()]
	);
}

#[rstest]
#[case::confirmed(true, "/register")]
#[case::cancelled(false, "/upload")]
#[tokio::test]
async fn test_unregistered_email(#[case] answer: bool, #[case] expected: &str) {
	// Arrange
	let server = MockServer::start().await;
	mock_response(&server, "/upload/verify", "404").await;
	let endpoints = endpoints(&server);
	let client = VerificationClient::new(&endpoints);
	let mut page = upload_page().with_confirm_answer(answer);

	// Act
	gate(&endpoints)
		.verify_email(&client, &mut page, "upload_email", Some("t"))
		.await;

	// Assert
	assert_eq!(page.notices()[0].text, Messages::default().not_registered);
	assert_eq!(page.locations(), &[expected.to_string()]);
}

#[rstest]
#[tokio::test]
async fn test_verified_email_opens_upload_page() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/upload/verify"))
		.and(body_string_contains("ada@example.com"))
		.respond_with(ResponseTemplate::new(200).set_body_string("200"))
		.expect(1)
		.mount(&server)
		.await;
	let endpoints = endpoints(&server);
	let client = VerificationClient::new(&endpoints);
	let mut page = upload_page();

	// Act
	gate(&endpoints)
		.verify_email(&client, &mut page, "upload_email", Some("t"))
		.await;

	// Assert
	assert_eq!(page.locations(), &["/upload".to_string()]);
}

#[rstest]
#[tokio::test]
async fn test_refused_email_gets_inline_marker() {
	// Arrange
	let server = MockServer::start().await;
	mock_response(&server, "/upload/verify", "400").await;
	let endpoints = endpoints(&server);
	let client = VerificationClient::new(&endpoints);
	let mut page = upload_page();
	let gate = gate(&endpoints);

	// Act
	gate.verify_email(&client, &mut page, "upload_email", Some("t"))
		.await;
	gate.verify_email(&client, &mut page, "upload_email", Some("t"))
		.await;

	// Assert
	assert_eq!(page.marker_count("upload_email"), 1);
	assert_eq!(
		page.marker_message("upload_email").as_deref(),
		Some("Please enter a valid email address.")
	);
	assert!(page.locations().is_empty());
}
