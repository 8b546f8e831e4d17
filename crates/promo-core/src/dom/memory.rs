//! In-memory page used by native tests.
//!
//! Elements live in a flat list in document order. That is enough for what
//! the form scripts do: look elements up by id or class, insert a sibling
//! right after another element, and find the first element with a class.

use super::{Document, DomError, DomResult, Notice, Selector, Window};
use crate::marker::{ErrorMarker, MARKER_CLASSES};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNode {
	pub id: String,
	pub classes: Vec<String>,
	pub value: Option<String>,
	pub checked: bool,
	pub content: String,
	pub visible: bool,
}

impl MemoryNode {
	fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			classes: Vec::new(),
			value: None,
			checked: false,
			content: String::new(),
			visible: true,
		}
	}

	fn has_class(&self, class: &str) -> bool {
		self.classes.iter().any(|c| c == class)
	}

	fn matches(&self, selector: &Selector) -> bool {
		match selector {
			Selector::Id(id) => &self.id == id,
			Selector::Class(class) => self.has_class(class),
		}
	}
}

/// Window interactions in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
	Alert(String),
	Notify(Notice),
	Confirm(Notice),
	/// The user dismissed the last notice.
	Acknowledged,
	Navigate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRecord {
	pub target: String,
	pub offset: i32,
	pub duration_ms: u32,
}

/// A [`Document`] + [`Window`] held entirely in memory.
///
/// # Examples
///
/// ```
/// use promo_core::{Document, ErrorMarker, MemoryPage};
///
/// let mut page = MemoryPage::new().with_input("firstName", "");
/// page.insert_marker_after("firstName", &ErrorMarker::new("firstName", "Required"))
///     .unwrap();
///
/// assert_eq!(page.marker_message("firstName").as_deref(), Some("Required"));
/// assert_eq!(page.ids(), vec!["firstName", "error-firstName"]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryPage {
	nodes: Vec<MemoryNode>,
	captcha: HashMap<String, String>,
	root_style: HashMap<String, String>,
	scrolls: Vec<ScrollRecord>,
	alerts: Vec<String>,
	notices: Vec<Notice>,
	confirm_answers: VecDeque<bool>,
	locations: Vec<String>,
	events: Vec<WindowEvent>,
}

impl MemoryPage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a text input or select holding `value`.
	pub fn with_input(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
		let mut node = MemoryNode::new(id);
		node.value = Some(value.into());
		self.nodes.push(node);
		self
	}

	pub fn with_checkbox(mut self, id: impl Into<String>, checked: bool) -> Self {
		let mut node = MemoryNode::new(id);
		node.value = Some("on".to_string());
		node.checked = checked;
		self.nodes.push(node);
		self
	}

	/// Appends a plain container element.
	pub fn with_element(mut self, id: impl Into<String>, classes: &[&str]) -> Self {
		let mut node = MemoryNode::new(id);
		node.classes = classes.iter().map(|c| c.to_string()).collect();
		self.nodes.push(node);
		self
	}

	/// Appends a CAPTCHA container; `response` is the solved token, if any.
	pub fn with_captcha(mut self, id: impl Into<String>, response: Option<&str>) -> Self {
		let id = id.into();
		if let Some(token) = response {
			self.captcha.insert(id.clone(), token.to_string());
		}
		self.nodes.push(MemoryNode::new(id));
		self
	}

	/// Queues the answer the next [`Window::confirm`] call returns.
	pub fn with_confirm_answer(mut self, answer: bool) -> Self {
		self.confirm_answers.push_back(answer);
		self
	}

	pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> DomResult<()> {
		let node = self.node_mut(id)?;
		if node.value.is_none() {
			return Err(DomError::NotAnInput(id.to_string()));
		}
		node.value = Some(value.into());
		Ok(())
	}

	pub fn set_checked(&mut self, id: &str, checked: bool) -> DomResult<()> {
		self.node_mut(id)?.checked = checked;
		Ok(())
	}

	pub fn set_captcha_response(&mut self, id: &str, response: Option<&str>) {
		match response {
			Some(token) => {
				self.captcha.insert(id.to_string(), token.to_string());
			}
			None => {
				self.captcha.remove(id);
			}
		}
	}

	pub fn node(&self, id: &str) -> Option<&MemoryNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	fn node_mut(&mut self, id: &str) -> DomResult<&mut MemoryNode> {
		self.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or_else(|| DomError::MissingElement(id.to_string()))
	}

	fn position(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	/// Element ids in document order.
	pub fn ids(&self) -> Vec<&str> {
		self.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	/// Every rendered error marker, in document order.
	pub fn markers(&self) -> Vec<&MemoryNode> {
		self.nodes
			.iter()
			.filter(|n| n.has_class(crate::marker::LOCATOR_CLASS))
			.collect()
	}

	pub fn marker_count(&self, field_id: &str) -> usize {
		let id = ErrorMarker::element_id_for(field_id);
		self.nodes.iter().filter(|n| n.id == id).count()
	}

	/// Message shown by the marker of `field_id`, unescaped.
	pub fn marker_message(&self, field_id: &str) -> Option<String> {
		let id = ErrorMarker::element_id_for(field_id);
		self.node(&id).and_then(|n| n.value.clone())
	}

	/// Whether an element directly follows `anchor_id`, and its id.
	pub fn next_sibling(&self, anchor_id: &str) -> Option<&str> {
		let pos = self.position(anchor_id)?;
		self.nodes.get(pos + 1).map(|n| n.id.as_str())
	}

	pub fn is_visible(&self, id: &str) -> bool {
		self.node(id).is_some_and(|n| n.visible)
	}

	pub fn scrolls(&self) -> &[ScrollRecord] {
		&self.scrolls
	}

	pub fn last_scroll(&self) -> Option<&ScrollRecord> {
		self.scrolls.last()
	}

	pub fn alerts(&self) -> &[String] {
		&self.alerts
	}

	pub fn notices(&self) -> &[Notice] {
		&self.notices
	}

	pub fn locations(&self) -> &[String] {
		&self.locations
	}

	pub fn events(&self) -> &[WindowEvent] {
		&self.events
	}
}

impl Document for MemoryPage {
	fn value(&self, id: &str) -> Option<String> {
		self.node(id).and_then(|n| n.value.clone())
	}

	fn is_checked(&self, id: &str) -> bool {
		self.node(id).is_some_and(|n| n.checked)
	}

	fn captcha_response(&self, id: &str) -> Option<String> {
		self.captcha.get(id).filter(|t| !t.is_empty()).cloned()
	}

	fn contains(&self, id: &str) -> bool {
		self.position(id).is_some()
	}

	fn insert_marker_after(&mut self, anchor_id: &str, marker: &ErrorMarker) -> DomResult<()> {
		let pos = self
			.position(anchor_id)
			.ok_or_else(|| DomError::MissingElement(anchor_id.to_string()))?;
		let mut node = MemoryNode::new(marker.element_id());
		node.classes = MARKER_CLASSES.split(' ').map(str::to_string).collect();
		node.content = crate::marker::html_escape(marker.message()).into_owned();
		// Markers keep their raw message in `value` so tests can read it back.
		node.value = Some(marker.message().to_string());
		self.nodes.insert(pos + 1, node);
		Ok(())
	}

	fn remove(&mut self, id: &str) -> bool {
		match self.position(id) {
			Some(pos) => {
				self.nodes.remove(pos);
				true
			}
			None => false,
		}
	}

	fn first_with_class(&self, class: &str) -> Option<String> {
		self.nodes
			.iter()
			.find(|n| n.has_class(class))
			.map(|n| n.id.clone())
	}

	fn scroll_into_view(&mut self, id: &str, offset: i32, duration_ms: u32) -> DomResult<()> {
		if !self.contains(id) {
			return Err(DomError::MissingElement(id.to_string()));
		}
		self.scrolls.push(ScrollRecord {
			target: id.to_string(),
			offset,
			duration_ms,
		});
		Ok(())
	}

	fn content(&self, id: &str) -> Option<String> {
		self.node(id).map(|n| n.content.clone())
	}

	fn set_content(&mut self, selector: &Selector, html: &str) -> DomResult<()> {
		let mut matched = false;
		for node in self.nodes.iter_mut().filter(|n| n.matches(selector)) {
			node.content = html.to_string();
			matched = true;
		}
		if matched {
			Ok(())
		} else {
			Err(DomError::MissingElement(selector.to_css()))
		}
	}

	fn set_visible(&mut self, selector: &Selector, visible: bool) {
		for node in self.nodes.iter_mut().filter(|n| n.matches(selector)) {
			node.visible = visible;
		}
	}

	fn set_root_style(&mut self, property: &str, value: Option<&str>) {
		match value {
			Some(v) => {
				self.root_style.insert(property.to_string(), v.to_string());
			}
			None => {
				self.root_style.remove(property);
			}
		}
	}

	fn root_style(&self, property: &str) -> Option<String> {
		self.root_style.get(property).cloned()
	}
}

impl Window for MemoryPage {
	fn alert(&mut self, message: &str) {
		self.alerts.push(message.to_string());
		self.events.push(WindowEvent::Alert(message.to_string()));
	}

	fn notify(&mut self, notice: &Notice) {
		self.notices.push(notice.clone());
		self.events.push(WindowEvent::Notify(notice.clone()));
	}

	fn confirm(&mut self, notice: &Notice) -> bool {
		self.notices.push(notice.clone());
		self.events.push(WindowEvent::Confirm(notice.clone()));
		self.confirm_answers.pop_front().unwrap_or(true)
	}

	fn replace_location(&mut self, path: &str) {
		self.locations.push(path.to_string());
		self.events.push(WindowEvent::Navigate(path.to_string()));
	}

	// The simulated user dismisses the dialog at once.
	fn notify_then_navigate(&mut self, notice: &Notice, path: &str) {
		self.notify(notice);
		self.events.push(WindowEvent::Acknowledged);
		self.replace_location(path);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_marker_inserted_directly_after_anchor() {
		// Arrange
		let mut page = MemoryPage::new()
			.with_input("firstName", "")
			.with_input("lastName", "");

		// Act
		page.insert_marker_after("firstName", &ErrorMarker::new("firstName", "Required"))
			.unwrap();

		// Assert
		assert_eq!(page.ids(), vec!["firstName", "error-firstName", "lastName"]);
		assert_eq!(page.next_sibling("firstName"), Some("error-firstName"));
	}

	#[rstest]
	fn test_insert_after_missing_anchor_fails() {
		let mut page = MemoryPage::new();

		let result = page.insert_marker_after("nowhere", &ErrorMarker::new("nowhere", "x"));

		assert_eq!(result, Err(DomError::MissingElement("nowhere".to_string())));
		assert!(page.markers().is_empty());
	}

	#[rstest]
	fn test_first_with_class_follows_document_order() {
		// Arrange
		let mut page = MemoryPage::new()
			.with_input("a", "")
			.with_input("b", "");
		page.insert_marker_after("b", &ErrorMarker::new("b", "B")).unwrap();
		page.insert_marker_after("a", &ErrorMarker::new("a", "A")).unwrap();

		// Act
		let first = page.first_with_class(crate::marker::LOCATOR_CLASS);

		// Assert
		assert_eq!(first.as_deref(), Some("error-a"));
	}

	#[rstest]
	fn test_set_value_on_container_is_rejected() {
		let mut page = MemoryPage::new().with_element("holder", &[]);

		let result = page.set_value("holder", "x");

		assert_eq!(result, Err(DomError::NotAnInput("holder".to_string())));
	}

	#[rstest]
	fn test_visibility_by_class() {
		let mut page = MemoryPage::new()
			.with_element("w1", &["txtMsg"])
			.with_element("w2", &["txtMsg"])
			.with_element("other", &[]);

		page.set_visible(&Selector::class("txtMsg"), false);

		assert!(!page.is_visible("w1"));
		assert!(!page.is_visible("w2"));
		assert!(page.is_visible("other"));
	}

	#[rstest]
	fn test_empty_captcha_token_counts_as_unsolved() {
		let page = MemoryPage::new().with_captcha("captcha", Some(""));

		assert_eq!(page.captcha_response("captcha"), None);
	}

	#[rstest]
	fn test_confirm_answers_are_consumed_in_order() {
		let mut page = MemoryPage::new()
			.with_confirm_answer(false)
			.with_confirm_answer(true);
		let notice = Notice::warning("?");

		assert!(!page.confirm(&notice));
		assert!(page.confirm(&notice));
		// Unscripted confirms default to accepting.
		assert!(page.confirm(&notice));
		assert_eq!(page.notices().len(), 3);
	}

	#[rstest]
	fn test_root_style_set_and_clear() {
		let mut page = MemoryPage::new();

		page.set_root_style("overflow", Some("hidden"));
		assert_eq!(page.root_style("overflow").as_deref(), Some("hidden"));

		page.set_root_style("overflow", None);
		assert_eq!(page.root_style("overflow"), None);
	}
}
