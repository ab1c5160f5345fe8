//! Segmenting authored text into paragraphs.

use comrak::{Options, markdown_to_html};

/// Split text on blank lines.
///
/// Lines inside a paragraph keep their `\n` separators. Whitespace-only
/// lines count as blank.
pub fn split(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

fn create_options() -> Options {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.autolink = true;
    // Paragraphs may already carry inline HTML; keep it.
    options.render.unsafe_ = true;

    options
}

/// Convert a paragraph's markdown inline formatting to HTML.
///
/// Only paragraphs that render as a single `<p>` are converted. Anything
/// that markdown reads as a block (lists, quotes, headings) is returned
/// unchanged so the screenplay rules still see the author's text.
pub fn render_inline(paragraph: &str) -> String {
    let html = markdown_to_html(paragraph, &create_options());
    html.trim_end()
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
        .filter(|inner| !inner.contains("<p>"))
        .map_or_else(|| paragraph.to_string(), str::to_string)
}

/// Split text and render each paragraph's inline markdown.
pub fn split_rendered(text: &str) -> Vec<String> {
    split(text).iter().map(|p| render_inline(p)).collect()
}
