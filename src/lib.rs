#![doc(html_root_url = "https://docs.rs/lazy-object-view/0.1.0")]
#![warn(clippy::pedantic)]

//! A lazily expanding DOM tree view for JSON-like values.
//!
//! [`TreeRenderer::render`] walks a [`JsValue`](wasm_bindgen::JsValue) and appends one
//! row per entry to a target element. Rows holding nested objects start collapsed;
//! their subtree is only rendered when the key cell is first clicked, and is thrown
//! away again on collapse. Long strings can be truncated behind a clickable
//! `… [+K]` marker, and expansion can show a spinner for a short artificial delay.
//!
//! The crate only sets class names and text content. Styling is left to the host
//! stylesheet, against the fixed class vocabulary `key-value`, `key`, `value`,
//! `subtree`, `collapsed`, `expanded`, `ellipses` and `spinner`, plus the runtime
//! type name of each value.
//!
//! Cyclic values are not detected: expanding a self-referential structure recurses
//! without bound. Callers that can receive such values must break the cycle first.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod classify;
pub mod view;

mod options;

pub use options::RenderOptions;
pub use view::{Error, Row, RowToggle, ToggleState, TreeRenderer};
