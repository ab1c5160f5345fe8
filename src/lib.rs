// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditKind)
    clippy::module_name_repetitions
)]

//! # Scriptdown
//!
//! Markdown-style authoring help and screenplay formatting.
//!
//! Scriptdown provides:
//! - An editing assistant for plain text areas (indent, list continuation,
//!   toolbar syntax insertion)
//! - A formatter that turns loosely written paragraphs into a screenplay
//!   with scene headings, action and numbered, color-coded dialogue
//!
//! ## Modules
//!
//! - [`editor`]: Key interception, syntax insertion, host surfaces
//! - [`screenplay`]: Paragraph classification and markup
//! - [`replay`]: Replaying recorded editing sessions
//! - [`config`]: Saved command-line defaults

pub mod config;
pub mod editor;
pub mod error;
pub mod replay;
pub mod screenplay;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::editor::{
        Assistant, Edit, InputSurface, KeyOutcome, KeyPress, Selection, SyntaxAction, TextBuffer,
        handle_key_press, insert_syntax,
    };
    pub use crate::screenplay::{Screenplay, ScreenplayBlock, format, format_text};
}
