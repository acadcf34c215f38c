/// Options for one [`render`](crate::TreeRenderer::render) call.
///
/// Every lazily expanded level below that call inherits the same options, except
/// that root wrapping only ever applies at the top.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
	/// Wrap the rendered value under a single synthetic root key.
	pub use_root_element: bool,

	/// Key name used when `use_root_element` is set. `None` (or an empty string)
	/// falls back to `"root"`.
	pub root_name: Option<String>,

	/// Show a spinner and delay each subtree expansion by a short fixed interval.
	pub show_loading_indicator: bool,

	/// Truncate any value text longer than this many characters behind a
	/// clickable `… [+K]` marker. For strings the threshold applies to the quoted
	/// display text.
	pub collapse_strings_over: Option<usize>,
}
