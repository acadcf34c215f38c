use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};

/// The shape a value was found to have, deciding how its row is built.
///
/// Checks are ordered: `undefined`, `null` and the empty array are recognised before
/// the general object case, and functions fall through to [`Other`](Classification::Other)
/// (they stringify instead of expanding).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Classification {
	Undefined,
	Null,
	/// An array with no elements, rendered as a literal `[]`.
	EmptyCollection,
	/// A non-null object or non-empty array; gets a collapsed subtree container.
	Nested,
	Str,
	/// Any remaining primitive, carrying its runtime `typeof` name.
	Other(String),
}

impl Classification {
	/// The runtime type token appended to the value cell's class name.
	#[must_use]
	pub fn type_name(&self) -> &str {
		match self {
			Classification::Undefined => "undefined",
			Classification::Null | Classification::EmptyCollection | Classification::Nested => "object",
			Classification::Str => "string",
			Classification::Other(type_name) => type_name,
		}
	}

	/// The extra class token for the special renderings, if any.
	#[must_use]
	pub fn modifier(&self) -> Option<&str> {
		match self {
			Classification::Null => Some("null"),
			Classification::EmptyCollection => Some("empty"),
			_ => None,
		}
	}
}

/// Classifies `value` for row construction.
#[must_use]
pub fn classify(value: &JsValue) -> Classification {
	if value.is_undefined() {
		Classification::Undefined
	} else if value.is_null() {
		Classification::Null
	} else if Array::is_array(value) && value.unchecked_ref::<Array>().length() == 0 {
		Classification::EmptyCollection
	} else if value.is_object() {
		Classification::Nested
	} else if value.is_string() {
		Classification::Str
	} else {
		let type_name = value
			.js_typeof()
			.as_string()
			.expect_throw("lazy-object-view: `typeof` did not yield a string");
		Classification::Other(type_name)
	}
}
