//! Event wiring and the `mount` entry point exported to JavaScript.

use crate::app::{PageKind, PromoApp, SETTINGS_ELEMENT_ID};
use crate::error::PagesResult;
use crate::modal::REMOTE_TARGET_ATTR;
use crate::notice::{self, RECEIPT_UPLOAD_ID};
use crate::scroll::ScrollLock;
use crate::web::{WebDocument, js_error};
use crate::{debug_log, error_log, info_log, warn_log};
use promo_upload::{PendingFile, ReadTicket, UploadWidget};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element, EventTarget, File, FileList, FileReader, HtmlInputElement};

pub const FORM_ID: &str = "my-form";
pub const DROP_ZONE_ID: &str = "dropzone-area";
pub const FILE_INPUT_ID: &str = "receipt-file";
pub const SAVE_BUTTON_ID: &str = "save-canvas-test";
pub const VERIFY_BUTTON_ID: &str = "verifyUpload";
pub const FLASH_DISMISS_ID: &str = "flashBtn";
pub const UPLOAD_EMAIL_ID: &str = "upload_email";

fn listen(
	target: &EventTarget,
	event: &str,
	handler: impl FnMut(web_sys::Event) + 'static,
) -> PagesResult<()> {
	let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
	target
		.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
		.map_err(js_error)?;
	closure.forget(); // Lives as long as the page
	Ok(())
}

/// Mounts the scripts for one page.
///
/// `kind` is `registration`, `support` or `upload`. Settings overrides are
/// read from the `promo-settings` element when present.
#[wasm_bindgen]
pub fn mount(kind: &str) -> Result<(), JsValue> {
	crate::logging::init();
	let page = WebDocument::new()?;
	let overrides = page
		.element(SETTINGS_ELEMENT_ID)
		.and_then(|element| element.text_content());
	let app = PromoApp::from_overrides(overrides.as_deref())?;
	let kind: PageKind = kind.parse()?;

	bind_form(&app, kind, &page)?;
	if kind == PageKind::Upload {
		bind_upload(&app, &page)?;
		bind_verification(&app, &page)?;
		bind_flash_dismiss(&app, &page)?;
	}
	bind_modal_triggers(&app, &page)?;
	bind_receipt_notice(&app, &page)?;

	info_log!("mounted {} page", kind);
	Ok(())
}

#[wasm_bindgen(js_name = scrollDisable)]
pub fn scroll_disable() -> Result<(), JsValue> {
	ScrollLock::disable(&mut WebDocument::new()?);
	Ok(())
}

#[wasm_bindgen(js_name = scrollEnable)]
pub fn scroll_enable() -> Result<(), JsValue> {
	ScrollLock::enable(&mut WebDocument::new()?);
	Ok(())
}

fn bind_form(app: &PromoApp, kind: PageKind, page: &WebDocument) -> PagesResult<()> {
	let form = Rc::new(RefCell::new(app.form(kind)?));
	let ids: Vec<String> = form
		.borrow()
		.registry()
		.fields()
		.iter()
		.map(|field| field.id().to_string())
		.collect();

	for id in ids {
		let Some(element) = page.element(&id) else {
			warn_log!("no element with id `{}` to validate", id);
			continue;
		};
		let form = Rc::clone(&form);
		let mut page = page.clone();
		listen(&element, "blur", move |_event| {
			form.borrow_mut().blur(&mut page, &id);
		})?;
	}

	let Some(element) = page.element(FORM_ID) else {
		debug_log!("no `{}` form on this page", FORM_ID);
		return Ok(());
	};
	let mut page = page.clone();
	listen(&element, "submit", move |event| {
		if !form.borrow_mut().submit(&mut page) {
			event.prevent_default();
		}
	})
}

fn bind_upload(app: &PromoApp, page: &WebDocument) -> PagesResult<()> {
	let widget = Rc::new(RefCell::new(app.upload_widget()?));

	if let Some(input) = page.element(FILE_INPUT_ID) {
		let widget = Rc::clone(&widget);
		let page = page.clone();
		listen(&input, "change", move |event| {
			let files = event
				.target()
				.and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
				.and_then(|input| input.files());
			accept_first(&widget, &page, files);
		})?;
	}

	if let Some(zone) = page.element(DROP_ZONE_ID) {
		listen(&zone, "dragover", |event| event.prevent_default())?;
		let widget = Rc::clone(&widget);
		let drop_page = page.clone();
		listen(&zone, "drop", move |event| {
			event.prevent_default();
			let files = event
				.dyn_ref::<DragEvent>()
				.and_then(|drag| drag.data_transfer())
				.and_then(|transfer| transfer.files());
			accept_first(&widget, &drop_page, files);
		})?;
	}

	if let Some(button) = page.element(SAVE_BUTTON_ID) {
		let gate = app.submit_gate();
		let client = app.receipt_client();
		let cookie = app.settings().endpoints.csrf_cookie.clone();
		let page = page.clone();
		listen(&button, "click", move |event| {
			event.prevent_default();
			// Snapshot the held image; later drops do not affect this upload.
			let widget = widget.borrow().clone();
			let gate = gate.clone();
			let client = client.clone();
			let mut page = page.clone();
			let token = crate::csrf::csrf_token(&cookie);
			wasm_bindgen_futures::spawn_local(async move {
				gate.submit_receipt(&widget, &client, &mut page, token.as_deref())
					.await;
			});
		})?;
	}
	Ok(())
}

fn accept_first(widget: &Rc<RefCell<UploadWidget>>, page: &WebDocument, files: Option<FileList>) {
	let Some(file) = files.and_then(|files| files.get(0)) else {
		return;
	};
	let pending = PendingFile::new(file.name(), file.type_(), file.size() as u64);
	let mut document = page.clone();
	let Some(ticket) = widget.borrow_mut().add_file(&mut document, pending) else {
		return;
	};
	let name = file.name();
	if let Err(error) = read_file(Rc::clone(widget), document, file, ticket) {
		error_log!("could not read {}: {}", name, error);
	}
}

fn read_file(
	widget: Rc<RefCell<UploadWidget>>,
	mut page: WebDocument,
	file: File,
	ticket: ReadTicket,
) -> PagesResult<()> {
	let reader = FileReader::new().map_err(js_error)?;
	let loaded = reader.clone();
	let onload = Closure::once(move |_event: web_sys::Event| {
		let Ok(buffer) = loaded.result() else {
			error_log!("file read produced no result");
			return;
		};
		let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
		if !widget.borrow_mut().finish_read(&mut page, ticket, &bytes) {
			debug_log!("dropped a stale file read");
		}
	});
	reader.set_onload(Some(onload.as_ref().unchecked_ref()));
	onload.forget();
	reader.read_as_array_buffer(&file).map_err(js_error)
}

fn bind_verification(app: &PromoApp, page: &WebDocument) -> PagesResult<()> {
	let Some(button) = page.element(VERIFY_BUTTON_ID) else {
		return Ok(());
	};
	let gate = app.submit_gate();
	let client = app.verification_client();
	let cookie = app.settings().endpoints.csrf_cookie.clone();
	let page = page.clone();
	listen(&button, "click", move |event| {
		event.prevent_default();
		let gate = gate.clone();
		let client = client.clone();
		let mut page = page.clone();
		let token = crate::csrf::csrf_token(&cookie);
		wasm_bindgen_futures::spawn_local(async move {
			gate.verify_email(&client, &mut page, UPLOAD_EMAIL_ID, token.as_deref())
				.await;
		});
	})
}

// The banner is re-rendered on every failure, so listen on the document.
fn bind_flash_dismiss(app: &PromoApp, page: &WebDocument) -> PagesResult<()> {
	let gate = app.submit_gate();
	let mut handler_page = page.clone();
	listen(page.document(), "click", move |event| {
		let dismissed = event
			.target()
			.and_then(|target| target.dyn_into::<Element>().ok())
			.is_some_and(|element| element.id() == FLASH_DISMISS_ID);
		if dismissed {
			gate.clear_flash(&mut handler_page);
		}
	})
}

fn bind_modal_triggers(app: &PromoApp, page: &WebDocument) -> PagesResult<()> {
	let selector = format!("[{REMOTE_TARGET_ATTR}]");
	let triggers = page.document().query_selector_all(&selector).map_err(js_error)?;

	for index in 0..triggers.length() {
		let Some(element) = triggers
			.item(index)
			.and_then(|node| node.dyn_into::<Element>().ok())
		else {
			continue;
		};
		let Some(target) = element.get_attribute(REMOTE_TARGET_ATTR) else {
			continue;
		};
		let trigger = app.modal_trigger();
		let loader = app.modal_loader();
		let page = page.clone();
		listen(&element, "click", move |event| {
			event.prevent_default();
			let trigger = trigger.clone();
			let loader = loader.clone();
			let target = target.clone();
			let mut page = page.clone();
			wasm_bindgen_futures::spawn_local(async move {
				if let Err(error) = trigger.open(&loader, &mut page, &target).await {
					error_log!("modal {} failed to load: {}", target, error);
				}
			});
		})?;
	}
	Ok(())
}

fn bind_receipt_notice(app: &PromoApp, page: &WebDocument) -> PagesResult<()> {
	let Some(element) = page.element(RECEIPT_UPLOAD_ID) else {
		return Ok(());
	};
	let messages = app.settings().messages.clone();
	let mut page = page.clone();
	listen(&element, "click", move |_event| {
		notice::already_submitted(&mut page, &messages);
	})
}
