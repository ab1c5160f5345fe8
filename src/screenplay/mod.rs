//! Screenplay parsing and formatting.
//!
//! This module handles:
//! - Classifying paragraphs as dialogue, scene headings or action
//! - Numbering dialogue and assigning each character a stable color
//! - Rendering markup and the companion stylesheet

mod classify;
mod color;
pub mod paragraphs;
mod parser;
mod render;
mod types;

pub use classify::{Classification, RULES, Rule, classify};
pub use color::{ColorToken, color_for, color_index, name_hash};
pub use parser::{format, format_text, parse};
pub use render::{export_document, render, render_block, stylesheet};
pub use types::{CastMember, DialogueBlock, Screenplay, ScreenplayBlock};
