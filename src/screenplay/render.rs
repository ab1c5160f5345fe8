//! Markup generation and the companion stylesheet.
//!
//! Block content is not escaped: paragraphs may already carry inline
//! markup that must survive.

use std::fmt::Write as _;

use super::color::ColorToken;
use super::types::{DialogueBlock, Screenplay, ScreenplayBlock};

/// Render one block as a single-line HTML fragment.
pub fn render_block(block: &ScreenplayBlock) -> String {
    match block {
        ScreenplayBlock::Heading { text } => {
            format!(r#"<div class="scene-heading">{text}</div>"#)
        }
        ScreenplayBlock::Dialogue(dialogue) => render_dialogue(dialogue),
        ScreenplayBlock::Action { text } => format!(r#"<div class="action">{text}</div>"#),
    }
}

fn render_dialogue(d: &DialogueBlock) -> String {
    format!(
        concat!(
            r#"<div class="dialogue" data-line="{n}">"#,
            r#"<span class="line-number">{n}</span>"#,
            r#"<span class="character {class}">{character}</span>"#,
            r#"<span class="speech">{speech}</span>"#,
            "</div>",
        ),
        n = d.line_number,
        class = d.color.class_name(),
        character = d.character,
        speech = d.speech,
    )
}

/// Render every block, one per line, in order.
pub fn render(screenplay: &Screenplay) -> String {
    screenplay
        .blocks()
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The fixed stylesheet that goes with the markup.
pub fn stylesheet() -> String {
    let mut css = String::from(
        ".screenplay { font-family: 'Courier Prime', 'Courier New', monospace; \
         font-size: 12pt; line-height: 1.4; max-width: 6.5in; margin: 0 auto; }\n\
         .scene-heading { font-weight: bold; text-transform: uppercase; margin: 1.5em 0 0.5em; }\n\
         .action { text-align: center; margin: 0.75em 0; }\n\
         .dialogue { display: grid; grid-template-columns: 2.5em 1fr; margin: 0.75em 0; }\n\
         .dialogue .line-number { grid-row: span 2; color: #888; font-size: 0.85em; }\n\
         .dialogue .character { font-weight: bold; text-align: center; }\n\
         .dialogue .speech { margin: 0 1.5in 0 1in; }\n",
    );
    for color in ColorToken::PALETTE {
        let _ = writeln!(css, ".{} {{ color: {}; }}", color.class_name(), color.hex());
    }
    css
}

/// Wrap markup in a standalone HTML document with the stylesheet inlined.
pub fn export_document(title: &str, markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n{css}</style>\n</head>\n<body>\n<main class=\"screenplay\">\n{markup}\n</main>\n\
         </body>\n</html>\n",
        title = html_escape::encode_text(title),
        css = stylesheet(),
    )
}
