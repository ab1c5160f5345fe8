//! Toolbar syntax tokens.

use std::str::FromStr;

use crate::error::Error;

/// Prefixes that apply once at the start of the current line.
///
/// Any other prefix wraps the selection instead.
pub const BLOCK_PREFIXES: &[&str] = &["# ", "## ", "### ", "- ", "1. ", "> ", "- [ ] "];

/// A `(prefix, suffix)` pair inserted by a toolbar action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
}

impl<'a> SyntaxToken<'a> {
    pub const fn new(prefix: &'a str, suffix: &'a str) -> Self {
        Self { prefix, suffix }
    }

    /// Whether this token is a line-level (block) transform.
    pub fn is_block(&self) -> bool {
        BLOCK_PREFIXES.contains(&self.prefix)
    }
}

/// The actions a formatting toolbar offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxAction {
    Heading1,
    Heading2,
    Heading3,
    Bullet,
    Numbered,
    Quote,
    Checkbox,
    Bold,
    Italic,
    Strikethrough,
    Code,
    Link,
}

impl SyntaxAction {
    pub const ALL: [Self; 12] = [
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Bullet,
        Self::Numbered,
        Self::Quote,
        Self::Checkbox,
        Self::Bold,
        Self::Italic,
        Self::Strikethrough,
        Self::Code,
        Self::Link,
    ];

    pub const fn token(self) -> SyntaxToken<'static> {
        match self {
            Self::Heading1 => SyntaxToken::new("# ", ""),
            Self::Heading2 => SyntaxToken::new("## ", ""),
            Self::Heading3 => SyntaxToken::new("### ", ""),
            Self::Bullet => SyntaxToken::new("- ", ""),
            Self::Numbered => SyntaxToken::new("1. ", ""),
            Self::Quote => SyntaxToken::new("> ", ""),
            Self::Checkbox => SyntaxToken::new("- [ ] ", ""),
            Self::Bold => SyntaxToken::new("**", "**"),
            Self::Italic => SyntaxToken::new("*", "*"),
            Self::Strikethrough => SyntaxToken::new("~~", "~~"),
            Self::Code => SyntaxToken::new("`", "`"),
            Self::Link => SyntaxToken::new("[", "](url)"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Heading3 => "h3",
            Self::Bullet => "bullet",
            Self::Numbered => "numbered",
            Self::Quote => "quote",
            Self::Checkbox => "checkbox",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
            Self::Link => "link",
        }
    }
}

impl FromStr for SyntaxAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.name() == lower)
            .ok_or_else(|| Error::UnknownSyntax(s.to_string()))
    }
}
