//! ng4eb Parser Library
//!
//! Markdown parsing of book parts into content blocks, and HTML rendering
//! of those blocks.

pub mod html;
pub mod markdown;

pub use html::{MARK_CLASS, html_escape, render_html};
pub use markdown::MarkdownParser;
