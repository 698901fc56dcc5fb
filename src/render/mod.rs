//! HTML rendering for upstream content.

pub mod document;
pub mod markdown;

pub use document::pdf_text_page;
pub use markdown::markdown_to_html;
