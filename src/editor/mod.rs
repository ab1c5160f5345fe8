//! Smart editing assistant for markdown-style authoring.
//!
//! Intercepts indent and line-break keys and toolbar actions against an
//! immutable rope-backed buffer, returning the new value together with
//! the selection the host should restore on its next turn.

mod assist;
mod buffer;
mod keys;
mod surface;
mod syntax;

pub use assist::{
    Edit, EditKind, INDENT, KeyOutcome, ListPrefix, handle_key_press, indent, insert_syntax,
    line_break, outdent,
};
pub use buffer::{Selection, TextBuffer};
pub use keys::{Key, KeyPress, Modifiers};
pub use surface::{Assistant, Deferred, InputSurface, MemorySurface, Propagation};
pub use syntax::{BLOCK_PREFIXES, SyntaxAction, SyntaxToken};
