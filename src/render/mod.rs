//! Output formats for a loaded configuration.

pub mod js;
pub mod json;
pub mod text;

pub use js::render_js_module;
pub use json::render_json;
pub use text::render_summary;
