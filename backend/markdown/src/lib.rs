//! Markdown rendering for agent reports.
//!
//! Model output is markdown-capable text: headers, lists, inline emphasis,
//! and occasionally raw HTML. Raw HTML is passed through unescaped — a
//! deliberate trust decision inherited from the source system, not an
//! oversight; deployments that treat model output as untrusted should
//! sanitize the rendered HTML upstream of the browser.

pub mod renderer;

pub use renderer::{excerpt, render_html, to_plain_text};
