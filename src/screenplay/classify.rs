//! Paragraph classification.
//!
//! Rules are tried in a fixed order and the first match wins. A paragraph
//! that matches nothing is action.

use std::sync::LazyLock;

use regex::Regex;

static DIALOGUE_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<name>[^:\[\]\n]+?)\s*:\s*(?P<speech>.+)$")
        .expect("colon dialogue pattern is valid")
});

static DIALOGUE_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<name>[^\[\]\n]+?)\. +(?P<speech>.+)$")
        .expect("period dialogue pattern is valid")
});

/// The role of one paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Dialogue { character: &'a str, speech: &'a str },
    Heading(&'a str),
    Action(&'a str),
}

/// A classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `NAME: speech`
    DialogueColon,
    /// `NAME. speech`
    DialoguePeriod,
    /// `[INT. OFFICE]`
    SceneHeading,
}

/// Rules in precedence order.
pub const RULES: &[Rule] = &[Rule::DialogueColon, Rule::DialoguePeriod, Rule::SceneHeading];

impl Rule {
    /// Try this rule against a trimmed paragraph.
    pub fn apply(self, paragraph: &str) -> Option<Classification<'_>> {
        match self {
            Self::DialogueColon => dialogue(&DIALOGUE_COLON, paragraph),
            Self::DialoguePeriod => dialogue(&DIALOGUE_PERIOD, paragraph),
            Self::SceneHeading => paragraph
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .map(|inner| Classification::Heading(inner.trim())),
        }
    }
}

fn dialogue<'a>(pattern: &Regex, paragraph: &'a str) -> Option<Classification<'a>> {
    let caps = pattern.captures(paragraph)?;
    let character = caps.name("name")?.as_str().trim();
    let speech = caps.name("speech")?.as_str().trim();
    if character.is_empty() || speech.is_empty() {
        return None;
    }
    Some(Classification::Dialogue { character, speech })
}

/// Classify a paragraph. Returns `None` for blank paragraphs.
pub fn classify(paragraph: &str) -> Option<Classification<'_>> {
    let paragraph = paragraph.trim();
    if paragraph.is_empty() {
        return None;
    }
    let classification = RULES
        .iter()
        .find_map(|rule| rule.apply(paragraph))
        .unwrap_or(Classification::Action(paragraph));
    Some(classification)
}
