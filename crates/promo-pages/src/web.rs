//! Browser implementation of the page traits.

use crate::error::{PagesError, PagesResult};
use promo_core::{Document, DomError, DomResult, ErrorMarker, Notice, Selector, Severity, Window};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
	Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior,
	ScrollToOptions,
};

pub(crate) fn js_error(value: JsValue) -> PagesError {
	PagesError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

impl From<PagesError> for JsValue {
	fn from(error: PagesError) -> Self {
		JsValue::from_str(&error.to_string())
	}
}

/// Handle on the live `window` and `document`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WebDocument {
	window: web_sys::Window,
	document: web_sys::Document,
}

impl WebDocument {
	pub fn new() -> PagesResult<Self> {
		let window = web_sys::window().ok_or(PagesError::Unavailable("window"))?;
		let document = window.document().ok_or(PagesError::Unavailable("document"))?;
		Ok(Self { window, document })
	}

	pub fn element(&self, id: &str) -> Option<Element> {
		self.document.get_element_by_id(id)
	}

	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}

	fn select_all(&self, selector: &Selector) -> Vec<Element> {
		let Ok(nodes) = self.document.query_selector_all(&selector.to_css()) else {
			return Vec::new();
		};
		(0..nodes.length())
			.filter_map(|i| nodes.item(i))
			.filter_map(|node| node.dyn_into::<Element>().ok())
			.collect()
	}

	fn root(&self) -> Option<HtmlElement> {
		self.document
			.document_element()
			.and_then(|e| e.dyn_into::<HtmlElement>().ok())
	}

	/// Response of the reCAPTCHA widget, through `grecaptcha.getResponse()`
	/// when the library is loaded, else from the widget's hidden textarea.
	fn recaptcha_response(&self, id: &str) -> Option<String> {
		let grecaptcha = js_sys::Reflect::get(&self.window, &JsValue::from_str("grecaptcha")).ok()?;
		if !grecaptcha.is_undefined() {
			let get_response = js_sys::Reflect::get(&grecaptcha, &JsValue::from_str("getResponse"))
				.ok()?
				.dyn_into::<js_sys::Function>()
				.ok()?;
			return get_response.call0(&grecaptcha).ok()?.as_string();
		}
		let css = format!("#{id} textarea[name=\"g-recaptcha-response\"]");
		let textarea = self.document.query_selector(&css).ok()??;
		Some(textarea.dyn_into::<HtmlTextAreaElement>().ok()?.value())
	}

	/// Shows a SweetAlert dialog when the library is present and returns
	/// what `swal` returned (a promise settling once it is dismissed).
	fn sweet_alert(&self, notice: &Notice) -> Option<JsValue> {
		let swal = js_sys::Reflect::get(&self.window, &JsValue::from_str("swal")).ok()?;
		let swal = swal.dyn_into::<js_sys::Function>().ok()?;
		let kind = match notice.severity {
			Severity::Success => "success",
			Severity::Warning => "warning",
			Severity::Error => "error",
		};
		swal.call3(
			&JsValue::NULL,
			&JsValue::from_str(&notice.title),
			&JsValue::from_str(&notice.text),
			&JsValue::from_str(kind),
		)
		.ok()
	}
}

fn alert_text(notice: &Notice) -> String {
	if notice.title.is_empty() {
		notice.text.clone()
	} else {
		format!("{}\n\n{}", notice.title, notice.text)
	}
}

impl Document for WebDocument {
	fn value(&self, id: &str) -> Option<String> {
		let element = self.element(id)?;
		if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
			return Some(input.value());
		}
		if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
			return Some(select.value());
		}
		element.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
	}

	fn is_checked(&self, id: &str) -> bool {
		self.element(id)
			.and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
			.is_some_and(|input| input.checked())
	}

	fn captcha_response(&self, id: &str) -> Option<String> {
		self.recaptcha_response(id).filter(|token| !token.is_empty())
	}

	fn contains(&self, id: &str) -> bool {
		self.element(id).is_some()
	}

	fn insert_marker_after(&mut self, anchor_id: &str, marker: &ErrorMarker) -> DomResult<()> {
		let anchor = self
			.element(anchor_id)
			.ok_or_else(|| DomError::MissingElement(anchor_id.to_string()))?;
		anchor
			.insert_adjacent_html("afterend", &marker.to_html())
			.map_err(|e| DomError::Operation(js_error(e).to_string()))
	}

	fn remove(&mut self, id: &str) -> bool {
		match self.element(id) {
			Some(element) => {
				element.remove();
				true
			}
			None => false,
		}
	}

	fn first_with_class(&self, class: &str) -> Option<String> {
		self.document
			.get_elements_by_class_name(class)
			.item(0)
			.map(|e| e.id())
	}

	fn scroll_into_view(&mut self, id: &str, offset: i32, _duration_ms: u32) -> DomResult<()> {
		let element = self
			.element(id)
			.ok_or_else(|| DomError::MissingElement(id.to_string()))?;
		let scrolled = self.window.scroll_y().unwrap_or_default();
		let top = element.get_bounding_client_rect().top() + scrolled - f64::from(offset);

		// Smooth scrolling runs at the browser's own pace.
		let options = ScrollToOptions::new();
		options.set_top(top);
		options.set_behavior(ScrollBehavior::Smooth);
		self.window.scroll_to_with_scroll_to_options(&options);
		Ok(())
	}

	fn content(&self, id: &str) -> Option<String> {
		self.element(id).map(|e| e.inner_html())
	}

	fn set_content(&mut self, selector: &Selector, html: &str) -> DomResult<()> {
		let elements = self.select_all(selector);
		if elements.is_empty() {
			return Err(DomError::MissingElement(selector.to_css()));
		}
		for element in elements {
			element.set_inner_html(html);
		}
		Ok(())
	}

	fn set_visible(&mut self, selector: &Selector, visible: bool) {
		for element in self.select_all(selector) {
			let Ok(element) = element.dyn_into::<HtmlElement>() else {
				continue;
			};
			let style = element.style();
			let result = if visible {
				style.remove_property("display").map(|_| ())
			} else {
				style.set_property("display", "none")
			};
			if let Err(error) = result {
				crate::warn_log!("could not toggle {}: {:?}", selector.to_css(), error);
			}
		}
	}

	fn set_root_style(&mut self, property: &str, value: Option<&str>) {
		let Some(root) = self.root() else {
			return;
		};
		let style = root.style();
		let result = match value {
			Some(value) => style.set_property(property, value),
			None => style.remove_property(property).map(|_| ()),
		};
		if let Err(error) = result {
			crate::warn_log!("could not set root style {}: {:?}", property, error);
		}
	}

	fn root_style(&self, property: &str) -> Option<String> {
		let value = self.root()?.style().get_property_value(property).ok()?;
		(!value.is_empty()).then_some(value)
	}
}

impl Window for WebDocument {
	fn alert(&mut self, message: &str) {
		if let Err(error) = self.window.alert_with_message(message) {
			crate::error_log!("alert failed: {:?}", error);
		}
	}

	fn notify(&mut self, notice: &Notice) {
		if self.sweet_alert(notice).is_none() {
			self.alert(&alert_text(notice));
		}
	}

	fn confirm(&mut self, notice: &Notice) -> bool {
		self.window
			.confirm_with_message(&notice.text)
			.unwrap_or(false)
	}

	fn replace_location(&mut self, path: &str) {
		if let Err(error) = self.window.location().replace(path) {
			crate::error_log!("navigation to {} failed: {:?}", path, error);
		}
	}

	fn notify_then_navigate(&mut self, notice: &Notice, path: &str) {
		let Some(shown) = self.sweet_alert(notice) else {
			// `alert` blocks until dismissed.
			self.alert(&alert_text(notice));
			self.replace_location(path);
			return;
		};
		let Ok(dismissed) = shown.dyn_into::<js_sys::Promise>() else {
			self.replace_location(path);
			return;
		};
		let mut page = self.clone();
		let path = path.to_string();
		let navigate = Closure::once(move |_: JsValue| page.replace_location(&path));
		let _ = dismissed.then(&navigate);
		navigate.forget();
	}
}
