use std::fmt;
use std::ops::Range;

use ropey::Rope;
use serde::{Deserialize, Serialize};

/// A selection range in a text buffer.
///
/// Offsets are zero-based char indices. A collapsed selection
/// (`start == end`) is a plain cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection spanning `start..end`.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a collapsed selection (a cursor) at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Whether the selection is a bare cursor.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars (zero for a reversed selection).
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Re-derive a valid selection for a buffer of `len` chars.
    ///
    /// Offsets past the end clamp to `len`; a reversed range is swapped.
    #[must_use]
    pub fn clamp(self, len: usize) -> Self {
        let a = self.start.min(len);
        let b = self.end.min(len);
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// The selection as a char range.
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<(usize, usize)> for Selection {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Selection> for (usize, usize) {
    fn from(selection: Selection) -> Self {
        (selection.start, selection.end)
    }
}

/// An immutable text value backed by a rope.
///
/// Edits never touch the receiver: [`TextBuffer::splice`] returns a new
/// buffer that shares unchanged chunks with the old one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Length of the buffer in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text in the char range, clamped to the buffer.
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.rope.slice(start..end).to_string()
    }

    /// Offset of the first char of the line containing `offset`.
    ///
    /// A line starts after the nearest preceding `\n`, or at buffer start.
    pub fn line_start(&self, offset: usize) -> usize {
        let offset = offset.min(self.len_chars());
        let mut chars = self.rope.chars_at(offset);
        let mut start = offset;
        while let Some(ch) = chars.prev() {
            if ch == '\n' {
                break;
            }
            start -= 1;
        }
        start
    }

    /// Text from the start of the current line up to `offset`.
    pub fn line_before(&self, offset: usize) -> String {
        self.slice(self.line_start(offset)..offset)
    }

    /// Replace the char range with `insert`, returning the new buffer.
    #[must_use]
    pub fn splice(&self, range: Range<usize>, insert: &str) -> Self {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        let mut rope = self.rope.clone();
        rope.remove(start..end);
        rope.insert(start, insert);
        Self { rope }
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field(
                "rope",
                &format_args!(
                    "Rope({} lines, {} chars)",
                    self.rope.len_lines(),
                    self.rope.len_chars()
                ),
            )
            .finish()
    }
}
