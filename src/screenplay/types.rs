//! Core screenplay types.

use serde::Serialize;

use super::color::ColorToken;

/// One numbered line of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueBlock {
    /// Position among dialogue lines only, starting at 1.
    pub line_number: usize,
    /// Speaking character, uppercased.
    pub character: String,
    pub speech: String,
    pub color: ColorToken,
}

/// A rendered unit of the screenplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScreenplayBlock {
    /// Scene heading, uppercased.
    Heading { text: String },
    Dialogue(DialogueBlock),
    /// Action or prose, kept verbatim.
    Action { text: String },
}

impl ScreenplayBlock {
    /// Whether a rule other than the action fallback produced this block.
    pub const fn is_structured(&self) -> bool {
        !matches!(self, Self::Action { .. })
    }
}

/// A speaking character and its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastMember {
    pub character: String,
    pub color: ColorToken,
    /// Number of dialogue lines spoken.
    pub lines: usize,
}

/// A formatted screenplay: blocks in paragraph order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Screenplay {
    blocks: Vec<ScreenplayBlock>,
}

impl Screenplay {
    pub(crate) const fn from_blocks(blocks: Vec<ScreenplayBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[ScreenplayBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Dialogue blocks in order.
    pub fn dialogue(&self) -> impl Iterator<Item = &DialogueBlock> {
        self.blocks.iter().filter_map(|block| match block {
            ScreenplayBlock::Dialogue(d) => Some(d),
            _ => None,
        })
    }

    /// Whether any paragraph matched a dialogue or heading rule.
    pub fn is_productive(&self) -> bool {
        self.blocks.iter().any(ScreenplayBlock::is_structured)
    }

    /// Speaking characters in order of first appearance.
    pub fn cast(&self) -> Vec<CastMember> {
        let mut cast: Vec<CastMember> = Vec::new();
        for line in self.dialogue() {
            if let Some(member) = cast.iter_mut().find(|m| m.character == line.character) {
                member.lines += 1;
            } else {
                cast.push(CastMember {
                    character: line.character.clone(),
                    color: line.color,
                    lines: 1,
                });
            }
        }
        cast
    }
}
