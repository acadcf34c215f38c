#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use lazy_object_view::{RenderOptions, ToggleState, TreeRenderer};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

static mut LOG_INITIALIZED: bool = false;

fn test_target() -> (TreeRenderer, Element) {
	unsafe {
		if !LOG_INITIALIZED {
			tracing_wasm::set_as_global_default();
			LOG_INITIALIZED = true;
		}
	}

	let window = window().unwrap();
	let target = window.document().unwrap().create_element("div").unwrap();
	target.set_class_name("test-root");
	(TreeRenderer::new(window), target)
}

fn nested_value() -> JsValue {
	let inner = Object::new();
	Reflect::set(&inner, &"nested".into(), &"inner-value".into()).unwrap();
	let outer = Object::new();
	Reflect::set(&outer, &"testkey".into(), &inner).unwrap();
	outer.into()
}

fn click(element: &Element) {
	element.unchecked_ref::<HtmlElement>().click();
}

#[wasm_bindgen_test]
fn expands_on_click_and_collapses_again() {
	let (renderer, target) = test_target();
	renderer.render(Some(&target), &nested_value(), &RenderOptions::default()).unwrap();

	assert_eq!(target.child_element_count(), 1);
	let row = target.first_element_child().unwrap();
	assert_eq!(row.class_name(), "key-value");
	let key_cell = row.first_element_child().unwrap();
	let subtree = row.last_element_child().unwrap();
	assert!(key_cell.class_name().contains("collapsed"));
	assert_eq!(subtree.class_name(), "subtree");
	assert_eq!(subtree.child_element_count(), 0);

	click(&key_cell);
	assert!(key_cell.class_name().contains("expanded"));
	let nested_row = subtree.first_element_child().unwrap();
	assert_eq!(nested_row.first_element_child().unwrap().text_content().unwrap(), "nested");
	assert_eq!(
		nested_row.last_element_child().unwrap().text_content().unwrap(),
		"\"inner-value\""
	);

	click(&key_cell);
	assert!(key_cell.class_name().contains("collapsed"));
	assert_eq!(subtree.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn reexpansion_rerenders_from_the_value() {
	let (renderer, target) = test_target();
	renderer.render(Some(&target), &nested_value(), &RenderOptions::default()).unwrap();

	let key_cell = target.first_element_child().unwrap().first_element_child().unwrap();
	let subtree = target.first_element_child().unwrap().last_element_child().unwrap();

	click(&key_cell);
	click(&key_cell);
	click(&key_cell);
	assert!(key_cell.class_name().contains("expanded"));
	assert_eq!(subtree.child_element_count(), 1);
	assert_eq!(
		subtree.first_element_child().unwrap().last_element_child().unwrap().text_content().unwrap(),
		"\"inner-value\""
	);
}

#[wasm_bindgen_test]
fn collapse_is_idempotent() {
	let (renderer, target) = test_target();
	renderer.collapse(&target);
	renderer.collapse(&target);
	assert_eq!(target.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn row_toggle_can_be_driven_without_events() {
	let (renderer, target) = test_target();
	let inner = Object::new();
	Reflect::set(&inner, &"nested".into(), &"inner-value".into()).unwrap();

	let row = renderer.build_row("testkey", &inner.into(), &RenderOptions::default());
	target.append_child(row.element()).unwrap();
	let toggle = row.toggle().expect("nested rows carry a toggle");
	let subtree = row.element().last_element_child().unwrap();

	assert_eq!(toggle.state(), ToggleState::Collapsed);
	toggle.expand();
	assert_eq!(toggle.state(), ToggleState::Expanded);
	assert_eq!(subtree.child_element_count(), 1);

	toggle.collapse();
	assert_eq!(toggle.state(), ToggleState::Collapsed);
	assert_eq!(subtree.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn scalar_rows_have_no_toggle() {
	let (renderer, _) = test_target();
	let row = renderer.build_row("testkey", &"scalar".into(), &RenderOptions::default());
	assert!(row.toggle().is_none());
}
