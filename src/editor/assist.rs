//! Keystroke interception and syntax insertion.
//!
//! Every operation takes a buffer and a selection and returns a new buffer
//! with the selection the host should restore. Nothing is mutated in place.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::buffer::{Selection, TextBuffer};
use super::keys::{Key, KeyPress};
use super::syntax::SyntaxToken;

/// Width of one indentation step.
pub const INDENT: &str = "  ";

static LIST_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)((?:[-*+]|\d+\.) (?:\[[ xX]\](?: |$))?|\[[ xX]\](?: |$)|> ?)")
        .expect("list prefix pattern is valid")
});

/// What an intercepted key press or toolbar action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    BlockTransform,
    InlineTransform,
    ListContinue,
    ListExit,
    PlainIndent,
    Outdent,
}

/// A computed edit: the new buffer and where the cursor should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub buffer: TextBuffer,
    pub selection: Selection,
    pub kind: EditKind,
}

/// Result of offering a key press to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The assistant took the key; the host must not run its default.
    Handled(Edit),
    /// Not intercepted; the host performs its default behavior.
    NoOp,
}

impl KeyOutcome {
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// A line-leading list, checkbox or quote marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPrefix<'a> {
    /// Leading whitespace before the marker.
    pub indent: &'a str,
    /// The marker token including its trailing space, e.g. `"- "`.
    pub marker: &'a str,
}

impl<'a> ListPrefix<'a> {
    /// Match a marker at the start of `line`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = LIST_PREFIX.captures(line)?;
        Some(Self {
            indent: caps.get(1).map_or("", |m| m.as_str()),
            marker: caps.get(2).map_or("", |m| m.as_str()),
        })
    }

    /// Whether `line` holds nothing but this marker.
    pub fn is_bare(&self, line: &str) -> bool {
        line.trim() == self.marker.trim()
    }

    /// Text that starts the next item. Numbers are repeated as-is.
    pub fn continuation(&self) -> String {
        format!("\n{}{}", self.indent, self.marker)
    }
}

/// Offer a key press to the assistant.
///
/// Tab indents, Shift+Tab outdents, and Enter continues or exits a list.
/// Everything else is left to the host.
pub fn handle_key_press(buffer: &TextBuffer, selection: Selection, press: KeyPress) -> KeyOutcome {
    let selection = selection.clamp(buffer.len_chars());
    let mods = press.modifiers;
    let outcome = match press.key {
        Key::Tab if mods.is_empty() => KeyOutcome::Handled(indent(buffer, selection)),
        Key::Tab | Key::BackTab if mods.shift && !mods.ctrl && !mods.alt => {
            KeyOutcome::Handled(outdent(buffer, selection))
        }
        Key::Enter if !mods.shift => line_break(buffer, selection),
        _ => KeyOutcome::NoOp,
    };
    if let KeyOutcome::Handled(edit) = &outcome {
        debug!(kind = ?edit.kind, "key press handled");
        trace!(from = ?selection, to = ?edit.selection, "selection moved");
    }
    outcome
}

/// Replace the selection with one indentation step.
pub fn indent(buffer: &TextBuffer, selection: Selection) -> Edit {
    let selection = selection.clamp(buffer.len_chars());
    let width = INDENT.chars().count();
    Edit {
        buffer: buffer.splice(selection.range(), INDENT),
        selection: Selection::caret(selection.start + width),
        kind: EditKind::PlainIndent,
    }
}

/// Remove up to one indentation step from the current line.
pub fn outdent(buffer: &TextBuffer, selection: Selection) -> Edit {
    let selection = selection.clamp(buffer.len_chars());
    let line_start = buffer.line_start(selection.start);
    let width = INDENT.chars().count();
    let removed = buffer
        .slice(line_start..line_start + width)
        .chars()
        .take_while(|&c| c == ' ')
        .count();

    let shift = |offset: usize| {
        if offset >= line_start + removed {
            offset - removed
        } else {
            line_start
        }
    };
    Edit {
        buffer: buffer.splice(line_start..line_start + removed, ""),
        selection: Selection::new(shift(selection.start), shift(selection.end)),
        kind: EditKind::Outdent,
    }
}

/// Continue or exit a list on Enter.
pub fn line_break(buffer: &TextBuffer, selection: Selection) -> KeyOutcome {
    let selection = selection.clamp(buffer.len_chars());
    let line = buffer.line_before(selection.start);
    let Some(prefix) = ListPrefix::parse(&line) else {
        return KeyOutcome::NoOp;
    };

    if prefix.is_bare(&line) {
        // Enter on an empty item ends the list instead of adding another.
        let line_start = buffer.line_start(selection.start);
        return KeyOutcome::Handled(Edit {
            buffer: buffer.splice(line_start..selection.end, ""),
            selection: Selection::caret(line_start),
            kind: EditKind::ListExit,
        });
    }

    let continuation = prefix.continuation();
    KeyOutcome::Handled(Edit {
        buffer: buffer.splice(selection.range(), &continuation),
        selection: Selection::caret(selection.start + continuation.chars().count()),
        kind: EditKind::ListContinue,
    })
}

/// Insert a toolbar token.
///
/// Block prefixes go to the start of the current line (applying one twice
/// duplicates it). Inline tokens wrap the selection; with nothing selected
/// the cursor lands between prefix and suffix, otherwise after the suffix.
pub fn insert_syntax(buffer: &TextBuffer, selection: Selection, token: SyntaxToken<'_>) -> Edit {
    let selection = selection.clamp(buffer.len_chars());
    let prefix_len = token.prefix.chars().count();

    let edit = if token.is_block() {
        let line_start = buffer.line_start(selection.start);
        Edit {
            buffer: buffer.splice(line_start..line_start, token.prefix),
            selection: Selection::new(selection.start + prefix_len, selection.end + prefix_len),
            kind: EditKind::BlockTransform,
        }
    } else {
        let selected = buffer.slice(selection.range());
        let wrapped = format!("{}{selected}{}", token.prefix, token.suffix);
        let cursor = if selection.is_empty() {
            selection.start + prefix_len
        } else {
            selection.start + wrapped.chars().count()
        };
        Edit {
            buffer: buffer.splice(selection.range(), &wrapped),
            selection: Selection::caret(cursor),
            kind: EditKind::InlineTransform,
        }
    };
    debug!(kind = ?edit.kind, prefix = token.prefix, "syntax inserted");
    edit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::keys::Modifiers;
    use crate::editor::syntax::SyntaxAction;

    fn buf(text: &str) -> TextBuffer {
        TextBuffer::from_text(text)
    }

    fn press(buffer: &TextBuffer, selection: Selection, key: KeyPress) -> Edit {
        match handle_key_press(buffer, selection, key) {
            KeyOutcome::Handled(edit) => edit,
            KeyOutcome::NoOp => panic!("expected {key:?} to be handled"),
        }
    }

    // --- List prefix matching ---

    #[test]
    fn test_list_prefix_bullet() {
        let prefix = ListPrefix::parse("- buy milk").unwrap();
        assert_eq!(prefix.indent, "");
        assert_eq!(prefix.marker, "- ");
    }

    #[test]
    fn test_list_prefix_indented_numbered() {
        let prefix = ListPrefix::parse("    12. twelfth").unwrap();
        assert_eq!(prefix.indent, "    ");
        assert_eq!(prefix.marker, "12. ");
    }

    #[test]
    fn test_list_prefix_checkbox_item() {
        let prefix = ListPrefix::parse("- [x] done").unwrap();
        assert_eq!(prefix.marker, "- [x] ");
    }

    #[test]
    fn test_list_prefix_bare_checkbox_and_quote() {
        assert_eq!(ListPrefix::parse("[ ] todo").unwrap().marker, "[ ] ");
        assert_eq!(ListPrefix::parse("> quoted").unwrap().marker, "> ");
        assert_eq!(ListPrefix::parse(">").unwrap().marker, ">");
    }

    #[test]
    fn test_list_prefix_rejects_plain_text() {
        assert!(ListPrefix::parse("hello").is_none());
        assert!(ListPrefix::parse("**bold**").is_none());
        assert!(ListPrefix::parse("-5 degrees").is_none());
        assert!(ListPrefix::parse("").is_none());
    }

    // --- Indent ---

    #[test]
    fn test_tab_inserts_two_spaces() {
        let b = buf("hello");
        let edit = press(&b, Selection::caret(2), KeyPress::plain(Key::Tab));
        assert_eq!(edit.buffer.text(), "he  llo");
        assert_eq!(edit.selection, Selection::caret(4));
        assert_eq!(edit.kind, EditKind::PlainIndent);
    }

    #[test]
    fn test_tab_replaces_selection() {
        let b = buf("hello world");
        let edit = press(&b, Selection::new(5, 11), KeyPress::plain(Key::Tab));
        assert_eq!(edit.buffer.text(), "hello  ");
        assert_eq!(edit.selection, Selection::caret(7));
    }

    #[test]
    fn test_ctrl_tab_is_not_intercepted() {
        let b = buf("hello");
        let key = KeyPress::new(
            Key::Tab,
            Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        );
        assert_eq!(handle_key_press(&b, Selection::caret(0), key), KeyOutcome::NoOp);
    }

    // --- Outdent ---

    #[test]
    fn test_shift_tab_removes_indent() {
        let b = buf("a\n    - item");
        let edit = press(&b, Selection::caret(9), KeyPress::shifted(Key::Tab));
        assert_eq!(edit.buffer.text(), "a\n  - item");
        assert_eq!(edit.selection, Selection::caret(7));
        assert_eq!(edit.kind, EditKind::Outdent);
    }

    #[test]
    fn test_backtab_removes_single_space() {
        let b = buf(" x");
        let edit = press(&b, Selection::caret(2), KeyPress::shifted(Key::BackTab));
        assert_eq!(edit.buffer.text(), "x");
        assert_eq!(edit.selection, Selection::caret(1));
    }

    #[test]
    fn test_outdent_cursor_inside_indent_snaps_to_line_start() {
        let b = buf("  x");
        let edit = press(&b, Selection::caret(1), KeyPress::shifted(Key::Tab));
        assert_eq!(edit.buffer.text(), "x");
        assert_eq!(edit.selection, Selection::caret(0));
    }

    #[test]
    fn test_outdent_without_indent_keeps_buffer() {
        let b = buf("plain");
        let edit = press(&b, Selection::caret(3), KeyPress::shifted(Key::Tab));
        assert_eq!(edit.buffer, b);
        assert_eq!(edit.selection, Selection::caret(3));
    }

    // --- Enter: list continuation ---

    #[test]
    fn test_enter_continues_bullet() {
        let b = buf("- buy milk");
        let edit = press(&b, Selection::caret(10), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "- buy milk\n- ");
        assert_eq!(edit.selection, Selection::caret(13));
        assert_eq!(edit.kind, EditKind::ListContinue);
    }

    #[test]
    fn test_enter_keeps_indentation() {
        let b = buf("intro\n  * nested");
        let edit = press(&b, Selection::caret(16), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "intro\n  * nested\n  * ");
        assert_eq!(edit.selection, Selection::caret(21));
    }

    #[test]
    fn test_enter_repeats_number_verbatim() {
        let b = buf("3. third");
        let edit = press(&b, Selection::caret(8), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "3. third\n3. ");
    }

    #[test]
    fn test_enter_continues_quote_and_checkbox() {
        let b = buf("> said");
        let edit = press(&b, Selection::caret(6), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "> said\n> ");

        let b = buf("- [ ] task");
        let edit = press(&b, Selection::caret(10), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "- [ ] task\n- [ ] ");
    }

    #[test]
    fn test_enter_mid_line_uses_text_before_cursor() {
        let b = buf("- buy milk");
        let edit = press(&b, Selection::caret(5), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "- buy\n-  milk");
        assert_eq!(edit.selection, Selection::caret(8));
    }

    // --- Enter: list exit ---

    #[test]
    fn test_enter_on_bare_marker_exits_list() {
        let b = buf("- one\n- ");
        let edit = press(&b, Selection::caret(8), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "- one\n");
        assert_eq!(edit.selection, Selection::caret(6));
        assert_eq!(edit.kind, EditKind::ListExit);
    }

    #[test]
    fn test_enter_on_bare_checkbox_without_space_exits() {
        let b = buf("- [ ]");
        let edit = press(&b, Selection::caret(5), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "");
        assert_eq!(edit.selection, Selection::caret(0));
        assert_eq!(edit.kind, EditKind::ListExit);

        let b = buf("- a\n[x]");
        let edit = press(&b, Selection::caret(7), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "- a\n");
        assert_eq!(edit.kind, EditKind::ListExit);
    }

    #[test]
    fn test_list_exit_twice_never_goes_negative() {
        let b = buf("- ");
        let edit = press(&b, Selection::caret(2), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "");
        assert_eq!(edit.selection, Selection::caret(0));

        let again = handle_key_press(&edit.buffer, edit.selection, KeyPress::plain(Key::Enter));
        assert_eq!(again, KeyOutcome::NoOp);
    }

    #[test]
    fn test_enter_on_indented_bare_marker_exits() {
        let b = buf("  - ");
        let edit = press(&b, Selection::caret(4), KeyPress::plain(Key::Enter));
        assert_eq!(edit.buffer.text(), "");
    }

    // --- Enter: not intercepted ---

    #[test]
    fn test_enter_on_plain_line_is_noop() {
        let b = buf("just text");
        assert_eq!(
            handle_key_press(&b, Selection::caret(9), KeyPress::plain(Key::Enter)),
            KeyOutcome::NoOp
        );
    }

    #[test]
    fn test_shift_enter_is_noop() {
        let b = buf("- item");
        assert_eq!(
            handle_key_press(&b, Selection::caret(6), KeyPress::shifted(Key::Enter)),
            KeyOutcome::NoOp
        );
    }

    #[test]
    fn test_other_keys_are_noop() {
        let b = buf("- item");
        assert!(!handle_key_press(&b, Selection::caret(6), KeyPress::plain(Key::Char('a'))).is_handled());
        assert!(!handle_key_press(&b, Selection::caret(6), KeyPress::plain(Key::Other)).is_handled());
    }

    // --- Syntax insertion ---

    #[test]
    fn test_inline_on_empty_selection_places_cursor_inside() {
        let b = buf("hello ");
        let edit = insert_syntax(&b, Selection::caret(6), SyntaxAction::Bold.token());
        assert_eq!(edit.buffer.text(), "hello ****");
        assert_eq!(edit.selection, Selection::caret(8));
        assert_eq!(edit.kind, EditKind::InlineTransform);
    }

    #[test]
    fn test_inline_wraps_selection_and_lands_after_suffix() {
        let b = buf("say hello now");
        let edit = insert_syntax(&b, Selection::new(4, 9), SyntaxAction::Italic.token());
        assert_eq!(edit.buffer.text(), "say *hello* now");
        assert_eq!(edit.selection, Selection::caret(11));
    }

    #[test]
    fn test_link_wraps_with_asymmetric_suffix() {
        let b = buf("docs");
        let edit = insert_syntax(&b, Selection::new(0, 4), SyntaxAction::Link.token());
        assert_eq!(edit.buffer.text(), "[docs](url)");
        assert_eq!(edit.selection, Selection::caret(11));
    }

    #[test]
    fn test_block_prefix_goes_to_line_start() {
        let b = buf("first\nsecond line");
        let edit = insert_syntax(&b, Selection::caret(12), SyntaxAction::Heading2.token());
        assert_eq!(edit.buffer.text(), "first\n## second line");
        assert_eq!(edit.selection, Selection::caret(15));
        assert_eq!(edit.kind, EditKind::BlockTransform);
    }

    #[test]
    fn test_block_prefix_twice_duplicates_marker() {
        let b = buf("item");
        let once = insert_syntax(&b, Selection::caret(4), SyntaxAction::Bullet.token());
        let twice = insert_syntax(&once.buffer, once.selection, SyntaxAction::Bullet.token());
        assert_eq!(twice.buffer.text(), "- - item");
        assert_eq!(twice.selection, Selection::caret(8));
    }

    #[test]
    fn test_block_prefix_keeps_selection_span() {
        let b = buf("quote me");
        let edit = insert_syntax(&b, Selection::new(0, 5), SyntaxAction::Quote.token());
        assert_eq!(edit.buffer.text(), "> quote me");
        assert_eq!(edit.selection, Selection::new(2, 7));
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let b = buf("abc");
        let edit = insert_syntax(&b, Selection::new(10, 40), SyntaxAction::Code.token());
        assert_eq!(edit.buffer.text(), "abc``");
        assert_eq!(edit.selection, Selection::caret(4));
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let b = buf("héllo");
        let edit = insert_syntax(&b, Selection::new(0, 5), SyntaxAction::Bold.token());
        assert_eq!(edit.buffer.text(), "**héllo**");
        assert_eq!(edit.selection, Selection::caret(9));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn inline_on_caret_grows_by_token_length(
                text in "[a-z \\n]{0,40}",
                offset in 0..50usize,
                action in prop::sample::select(vec![
                    SyntaxAction::Bold,
                    SyntaxAction::Italic,
                    SyntaxAction::Strikethrough,
                    SyntaxAction::Code,
                    SyntaxAction::Link,
                ]),
            ) {
                let b = TextBuffer::from_text(&text);
                let o = offset.min(b.len_chars());
                let token = action.token();
                let edit = insert_syntax(&b, Selection::caret(o), token);

                let added = token.prefix.chars().count() + token.suffix.chars().count();
                prop_assert_eq!(edit.buffer.len_chars(), b.len_chars() + added);
                prop_assert_eq!(edit.selection, Selection::caret(o + token.prefix.chars().count()));
            }

            #[test]
            fn handled_edits_leave_valid_selection(
                text in "([-*>] |[0-9]\\. |  )?[a-z ]{0,10}(\\n([-*] )?[a-z ]{0,10}){0,3}",
                start in 0..60usize,
                end in 0..60usize,
                key in prop::sample::select(vec![
                    KeyPress::plain(Key::Tab),
                    KeyPress::shifted(Key::Tab),
                    KeyPress::plain(Key::Enter),
                ]),
            ) {
                let b = TextBuffer::from_text(&text);
                if let KeyOutcome::Handled(edit) = handle_key_press(&b, Selection::new(start, end), key) {
                    prop_assert!(edit.selection.start <= edit.selection.end);
                    prop_assert!(edit.selection.end <= edit.buffer.len_chars());
                }
            }

            #[test]
            fn list_exit_is_idempotent(indent in " {0,4}", marker in prop::sample::select(vec!["- ", "* ", "1. ", "> "])) {
                let line = format!("{indent}{marker}");
                let b = TextBuffer::from_text(&line);
                let end = b.len_chars();
                let KeyOutcome::Handled(edit) = handle_key_press(&b, Selection::caret(end), KeyPress::plain(Key::Enter)) else {
                    panic!("bare marker {line:?} should be handled");
                };
                prop_assert_eq!(edit.kind, EditKind::ListExit);
                prop_assert_eq!(edit.buffer.text(), "");
                prop_assert_eq!(edit.selection, Selection::caret(0));
                prop_assert_eq!(
                    handle_key_press(&edit.buffer, edit.selection, KeyPress::plain(Key::Enter)),
                    KeyOutcome::NoOp
                );
            }
        }
    }
}
