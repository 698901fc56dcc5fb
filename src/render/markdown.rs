//! Markdown to HTML conversion for reader-service output.

use pulldown_cmark::{html, Options, Parser};

/// Render CommonMark (plus GFM tables, strikethrough and task lists) to HTML.
///
/// GFM literal autolinks are not supported: a bare `https://...` stays plain
/// text. Angle-bracket autolinks (`<https://...>`) and inline links render.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut out, parser);
    out
}
