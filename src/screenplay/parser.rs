//! Paragraphs to screenplay blocks.

use tracing::debug;

use super::classify::{Classification, classify};
use super::color::color_for;
use super::paragraphs;
use super::render;
use super::types::{DialogueBlock, Screenplay, ScreenplayBlock};

/// Classify paragraphs into screenplay blocks.
///
/// Blank paragraphs are dropped. Dialogue lines are numbered from 1,
/// counting dialogue only.
///
/// # Example
///
/// ```
/// use scriptdown::screenplay::Screenplay;
///
/// let play = Screenplay::parse(&["[INT. OFFICE]", "JOHN: Hello there.", "He waves."]);
/// assert_eq!(play.blocks().len(), 3);
/// assert_eq!(play.dialogue().count(), 1);
/// ```
impl Screenplay {
    pub fn parse<S: AsRef<str>>(paragraphs: &[S]) -> Self {
        parse(paragraphs)
    }

    /// Render the blocks as markup.
    pub fn to_markup(&self) -> String {
        render::render(self)
    }
}

pub fn parse<S: AsRef<str>>(paragraphs: &[S]) -> Screenplay {
    let mut blocks = Vec::with_capacity(paragraphs.len());
    let mut line_number = 0;

    for paragraph in paragraphs {
        let Some(classification) = classify(paragraph.as_ref()) else {
            continue;
        };
        let block = match classification {
            Classification::Dialogue { character, speech } => {
                line_number += 1;
                let character = character.to_uppercase();
                let color = color_for(&character);
                ScreenplayBlock::Dialogue(DialogueBlock {
                    line_number,
                    character,
                    speech: speech.to_string(),
                    color,
                })
            }
            Classification::Heading(text) => ScreenplayBlock::Heading {
                text: text.to_uppercase(),
            },
            Classification::Action(text) => ScreenplayBlock::Action {
                text: text.to_string(),
            },
        };
        debug!(?classification, "classified paragraph");
        blocks.push(block);
    }

    Screenplay::from_blocks(blocks)
}

/// Format paragraphs into markup.
///
/// If no paragraph is dialogue or a heading, the input is returned as-is
/// (concatenated) rather than as a page of bare action blocks.
pub fn format<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let screenplay = parse(paragraphs);
    if screenplay.is_productive() {
        screenplay.to_markup()
    } else {
        debug!("no dialogue or headings, returning input unchanged");
        let mut raw = String::new();
        for paragraph in paragraphs {
            raw.push_str(paragraph.as_ref());
        }
        raw
    }
}

/// Split authored text on blank lines and format it.
///
/// Falls back to `text` itself when nothing matched.
pub fn format_text(text: &str) -> String {
    let screenplay = parse(&paragraphs::split(text));
    if screenplay.is_productive() {
        screenplay.to_markup()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenplay::color::ColorToken;

    #[test]
    fn test_round_trip_heading_dialogue_action() {
        let play = parse(&["[INT. OFFICE]", "JOHN: Hello there.", "He waves."]);
        assert_eq!(
            play.blocks(),
            &[
                ScreenplayBlock::Heading {
                    text: "INT. OFFICE".to_string()
                },
                ScreenplayBlock::Dialogue(DialogueBlock {
                    line_number: 1,
                    character: "JOHN".to_string(),
                    speech: "Hello there.".to_string(),
                    color: ColorToken::Crimson,
                }),
                ScreenplayBlock::Action {
                    text: "He waves.".to_string()
                },
            ]
        );
        assert_eq!(play.dialogue().count(), 1);
    }

    #[test]
    fn test_line_numbers_count_dialogue_only() {
        let play = parse(&[
            "[EXT. PARK]",
            "Birds sing.",
            "ann: Hi.",
            "Wind.",
            "BOB. Hello.",
            "ann: Bye.",
        ]);
        let numbers: Vec<_> = play.dialogue().map(|d| d.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_character_is_uppercased_and_colored_consistently() {
        let play = parse(&["John: one", "JOHN: two", "john : three"]);
        let lines: Vec<_> = play.dialogue().collect();
        assert!(lines.iter().all(|d| d.character == "JOHN"));
        assert!(lines.iter().all(|d| d.color == lines[0].color));
    }

    #[test]
    fn test_blank_paragraphs_skipped() {
        let play = parse(&["", "   ", "JOHN: hi", "\n"]);
        assert_eq!(play.blocks().len(), 1);
    }

    #[test]
    fn test_heading_uppercased() {
        let play = parse(&["[int. kitchen - night]"]);
        assert_eq!(
            play.blocks(),
            &[ScreenplayBlock::Heading {
                text: "INT. KITCHEN - NIGHT".to_string()
            }]
        );
    }

    #[test]
    fn test_cast_in_first_appearance_order() {
        let play = parse(&["MARY: a", "JOHN: b", "mary: c"]);
        let cast = play.cast();
        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].character, "MARY");
        assert_eq!(cast[0].lines, 2);
        assert_eq!(cast[0].color, ColorToken::Teal);
        assert_eq!(cast[1].character, "JOHN");
    }

    #[test]
    fn test_format_emits_blocks_in_order() {
        let markup = format(&["[INT. OFFICE]", "JOHN: Hello there.", "He waves."]);
        let lines: Vec<_> = markup.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(r#"<div class="scene-heading">"#));
        assert!(lines[1].contains(r#"data-line="1""#));
        assert!(lines[1].contains(">JOHN<"));
        assert!(lines[2].starts_with(r#"<div class="action">"#));
    }

    #[test]
    fn test_format_falls_back_to_input() {
        let input = ["Just some prose", "with no cues"];
        assert_eq!(format(&input), "Just some prosewith no cues");
    }

    #[test]
    fn test_format_empty_input() {
        let input: [&str; 0] = [];
        assert_eq!(format(&input), "");
        assert_eq!(format(&["  "]), "  ");
    }

    #[test]
    fn test_format_text_falls_back_to_raw_text() {
        let text = "One paragraph.\n\nAnother one";
        assert_eq!(format_text(text), text);
    }

    #[test]
    fn test_format_text_splits_on_blank_lines() {
        let markup = format_text("[INT. OFFICE]\n\nJOHN: Hello there.\n\nHe waves.\n");
        assert_eq!(markup.lines().count(), 3);
    }
}
