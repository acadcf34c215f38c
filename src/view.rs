use crate::{
	classify::{classify, Classification},
	options::RenderOptions,
};
use std::{cell::Cell, rc::Rc};
use tracing::{instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast, JsValue, UnwrapThrowExt};
use web_sys::{Document, Element, HtmlElement, Window};

const ELEMENT_TYPE: &str = "div";
const KEY_VALUE_CLASS: &str = "key-value";
const KEY_CLASS: &str = "key";
const VALUE_CLASS: &str = "value";
const SUBTREE_CLASS: &str = "subtree";
const COLLAPSED_CLASS: &str = "collapsed";
const EXPANDED_CLASS: &str = "expanded";
const ELLIPSES_CLASS: &str = "ellipses";
const SPINNER_CLASS: &str = "spinner";
const DEFAULT_ROOT_NAME: &str = "root";
const EXPANSION_DELAY_MS: i32 = 10;

/// Raised by [`TreeRenderer::render`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The render target was absent. The message is stable; hosts surface it verbatim.
	#[error("target element must not be null or undefined")]
	InvalidArgument,
}

/// Expansion state of one nested-value row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ToggleState {
	Collapsed,
	Expanded,
}

/// Renders JSON-like values as an expandable tree of DOM elements.
///
/// Rendering appends rows to a target element without clearing it; nested values
/// get an empty subtree container that is only populated when first expanded.
/// The renderer holds the [`Window`] it was given, so it can be pointed at any
/// document rather than the ambient global one.
#[derive(Clone, Debug)]
pub struct TreeRenderer {
	window: Window,
	document: Document,
}

impl TreeRenderer {
	/// Attaches to an explicit [`Window`].
	#[must_use]
	pub fn new(window: Window) -> Self {
		let document = window
			.document()
			.expect_throw("lazy-object-view: the window has no document");
		Self { window, document }
	}

	/// Attaches to the global window.
	#[must_use]
	pub fn from_global_window() -> Self {
		Self::new(web_sys::window().expect_throw("lazy-object-view: no global `window`"))
	}

	/// Renders `value` as one row per own enumerable entry, appended to `target`.
	///
	/// A `null` or `undefined` value renders nothing and is not an error; only an
	/// absent target is. Repeated calls accumulate rows, the target is never
	/// cleared first. Inherited properties are skipped. Cyclic values recurse
	/// without bound when expanded (see the crate docs).
	///
	/// # Errors
	///
	/// [`Error::InvalidArgument`] when `target` is `None`.
	#[instrument(skip(self, value, options))]
	pub fn render(&self, target: Option<&Element>, value: &JsValue, options: &RenderOptions) -> Result<(), Error> {
		let target = target.ok_or(Error::InvalidArgument)?;
		if value.is_null() || value.is_undefined() {
			trace!("Absent value, rendering nothing.");
			return Ok(());
		}

		let mut options = options.clone();
		let mut value = value.clone();
		if options.use_root_element {
			let root_name = match options.root_name.as_deref() {
				Some(root_name) if !root_name.is_empty() => root_name,
				_ => DEFAULT_ROOT_NAME,
			};
			let wrapped = js_sys::Object::new();
			js_sys::Reflect::set(&wrapped, &JsValue::from_str(root_name), &value).unwrap_throw();
			value = wrapped.into();
			// Lazy expansion reuses these options; the wrapper only applies at the top level.
			options.use_root_element = false;
		}

		self.render_entries(target, &value, &Rc::new(options));
		Ok(())
	}

	/// Removes all children of `target`. Collapsing an already empty container is a no-op.
	pub fn collapse(&self, target: &Element) {
		target.set_inner_html("");
	}

	/// Builds a single key-value row without attaching it anywhere.
	///
	/// For nested values the returned [`Row`] carries a [`RowToggle`]; the key
	/// cell's click handler is wired to [`RowToggle::activate`], and the same
	/// methods can be called directly, without going through DOM events.
	#[must_use]
	pub fn build_row(&self, key: &str, value: &JsValue, options: &RenderOptions) -> Row {
		self.construct_row(key, value, &Rc::new(options.clone()))
	}

	#[instrument(skip(self, value, options))]
	fn render_entries(&self, target: &Element, value: &JsValue, options: &Rc<RenderOptions>) {
		let accumulator = self.document.create_document_fragment();
		// `Object.entries` reports own enumerable string-keyed properties in the
		// value's natural iteration order; inherited properties never show up.
		let entries = js_sys::Object::entries(value.unchecked_ref());
		for entry in entries.iter() {
			let entry: js_sys::Array = entry.unchecked_into();
			let key = entry.get(0).as_string().unwrap_throw();
			let row = self.construct_row(&key, &entry.get(1), options);
			accumulator.append_child(&row.element).unwrap_throw();
		}
		trace!("Built {} row(s).", entries.length());
		target.append_child(&accumulator).unwrap_throw();
	}

	fn construct_row(&self, key: &str, value: &JsValue, options: &Rc<RenderOptions>) -> Row {
		let element = self.create_div(KEY_VALUE_CLASS);
		let key_cell = self.create_div(KEY_CLASS);
		key_cell
			.append_child(&self.document.create_text_node(key))
			.unwrap_throw();
		element.append_child(&key_cell).unwrap_throw();

		let classification = classify(value);
		if classification == Classification::Nested {
			let subtree = self.create_div(SUBTREE_CLASS);
			element.append_child(&subtree).unwrap_throw();
			key_cell.set_class_name(&format!("{} {}", KEY_CLASS, COLLAPSED_CLASS));

			let toggle = Rc::new(RowToggle {
				renderer: self.clone(),
				key_cell: key_cell.clone(),
				subtree,
				value: value.clone(),
				options: Rc::clone(options),
				state: Rc::new(Cell::new(ToggleState::Collapsed)),
			});
			let handle = Rc::clone(&toggle);
			attach_click(&key_cell, move || handle.activate());

			return Row {
				element,
				toggle: Some(toggle),
			};
		}

		let mut class_name = format!("{} {}", VALUE_CLASS, classification.type_name());
		if let Some(modifier) = classification.modifier() {
			class_name.push(' ');
			class_name.push_str(modifier);
		}
		let value_cell = self.create_div(&class_name);
		let text = match classification {
			Classification::Undefined => "undefined".to_string(),
			Classification::Null => "null".to_string(),
			Classification::EmptyCollection => "[]".to_string(),
			Classification::Str => format!("\"{}\"", value.as_string().unwrap_throw()),
			Classification::Other(_) => stringify(value),
			Classification::Nested => unreachable!(),
		};
		value_cell
			.append_child(&self.construct_text_element(&text, options))
			.unwrap_throw();
		element.append_child(&value_cell).unwrap_throw();

		Row { element, toggle: None }
	}

	/// Builds the node holding a value's display text, routed through the string
	/// truncation policy when one is configured.
	fn construct_text_element(&self, text: &str, options: &RenderOptions) -> web_sys::Node {
		let (visible, hidden) = match truncation_split(text, options.collapse_strings_over) {
			Some(split) => split,
			None => return self.document.create_text_node(text).into(),
		};

		let parent = self.document.create_element("span").unwrap_throw();
		parent
			.append_child(&self.document.create_text_node(visible))
			.unwrap_throw();

		let ellipses = self.document.create_element("span").unwrap_throw();
		ellipses.set_class_name(ELLIPSES_CLASS);
		ellipses
			.append_child(&self.document.create_text_node(&format!("... [+{}]", hidden)))
			.unwrap_throw();
		parent.append_child(&ellipses).unwrap_throw();

		// One-way: once revealed, the full text stays.
		let document = self.document.clone();
		let full_text = text.to_owned();
		let revealed = parent.clone();
		attach_click(&ellipses, move || {
			revealed.set_inner_html("");
			revealed
				.append_child(&document.create_text_node(&full_text))
				.unwrap_throw();
		});

		parent.into()
	}

	fn create_div(&self, class_name: &str) -> Element {
		let element = self.document.create_element(ELEMENT_TYPE).unwrap_throw();
		element.set_class_name(class_name);
		element
	}
}

/// One key-value row, detached until appended by the caller (or by
/// [`TreeRenderer::render`], which builds rows through the same path).
#[derive(Debug)]
pub struct Row {
	element: Element,
	toggle: Option<Rc<RowToggle>>,
}

impl Row {
	/// The `key-value` row element.
	#[must_use]
	pub fn element(&self) -> &Element {
		&self.element
	}

	/// The row's toggle, present only for nested values.
	#[must_use]
	pub fn toggle(&self) -> Option<&Rc<RowToggle>> {
		self.toggle.as_ref()
	}
}

/// Expansion state and machinery of one nested-value row.
///
/// The state lives here, not in the DOM: a click is interpreted against this flag,
/// so a scheduled-but-unfinished expansion can't be mistaken for an expanded row.
#[derive(Debug)]
pub struct RowToggle {
	renderer: TreeRenderer,
	key_cell: Element,
	subtree: Element,
	value: JsValue,
	options: Rc<RenderOptions>,
	state: Rc<Cell<ToggleState>>,
}

impl RowToggle {
	#[must_use]
	pub fn state(&self) -> ToggleState {
		self.state.get()
	}

	/// Flips the row between its two states; this is what a click on the key cell calls.
	pub fn activate(&self) {
		match self.state.get() {
			ToggleState::Collapsed => self.expand(),
			ToggleState::Expanded => self.collapse(),
		}
	}

	/// Populates the subtree container from the row's value and relabels the key
	/// cell `expanded`.
	///
	/// With `show_loading_indicator` set, a spinner is inserted synchronously and
	/// population runs after a short fixed delay. A collapse click inside that
	/// window takes effect immediately, but the already scheduled population still
	/// runs when the timer fires; nothing cancels it. That matches the behaviour
	/// this widget has always had.
	pub fn expand(&self) {
		if self.options.show_loading_indicator {
			trace!("Deferring expansion behind a spinner.");
			let spinner = self.renderer.create_div(SPINNER_CLASS);
			self.subtree.append_child(&spinner).unwrap_throw();

			let renderer = self.renderer.clone();
			let key_cell = self.key_cell.clone();
			let subtree = self.subtree.clone();
			let value = self.value.clone();
			let options = Rc::clone(&self.options);
			let state = Rc::clone(&self.state);
			let deferred = Closure::once_into_js(move || {
				// The spinner comes out between population and the class swap, so the
				// container never shows both at the moment the row reads as expanded.
				renderer.render_entries(&subtree, &value, &options);
				state.set(ToggleState::Expanded);
				subtree.remove_child(&spinner).unwrap_throw();
				swap_class(&key_cell, COLLAPSED_CLASS, EXPANDED_CLASS);
			});
			self.renderer
				.window
				.set_timeout_with_callback_and_timeout_and_arguments_0(deferred.unchecked_ref(), EXPANSION_DELAY_MS)
				.unwrap_throw();
		} else {
			trace!("Expanding.");
			self.renderer.render_entries(&self.subtree, &self.value, &self.options);
			self.state.set(ToggleState::Expanded);
			swap_class(&self.key_cell, COLLAPSED_CLASS, EXPANDED_CLASS);
		}
	}

	/// Clears the subtree container and relabels the key cell `collapsed`.
	///
	/// Nothing is cached; the next expansion re-renders from the row's value.
	pub fn collapse(&self) {
		trace!("Collapsing.");
		self.renderer.collapse(&self.subtree);
		self.state.set(ToggleState::Collapsed);
		swap_class(&self.key_cell, EXPANDED_CLASS, COLLAPSED_CLASS);
	}
}

fn attach_click(element: &Element, handler: impl FnMut() + 'static) {
	let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
	element
		.unchecked_ref::<HtmlElement>()
		.set_onclick(Some(closure.as_ref().unchecked_ref()));
	// The handler lives as long as the element it is attached to.
	closure.forget();
}

fn swap_class(element: &Element, from: &str, to: &str) {
	element.class_list().replace(from, to).unwrap_throw();
}

/// JavaScript `toString` semantics for the values that aren't handled explicitly.
fn stringify(value: &JsValue) -> String {
	js_sys::JsString::from("").concat(value).into()
}

/// Splits `text` for the truncation marker: the visible prefix and the number of
/// characters hidden behind it. `None` when no limit is set or the text fits.
fn truncation_split(text: &str, limit: Option<usize>) -> Option<(&str, usize)> {
	let limit = limit?;
	let total = text.chars().count();
	if total <= limit {
		return None;
	}
	let visible_end = text
		.char_indices()
		.nth(limit)
		.map_or_else(|| text.len(), |(index, _)| index);
	Some((&text[..visible_end], total - limit))
}
