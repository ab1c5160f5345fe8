//! Replaying recorded editing sessions.
//!
//! A script is a starting text and selection plus a list of steps:
//!
//! ```json
//! {
//!   "text": "- buy milk",
//!   "selection": [10, 10],
//!   "steps": [{ "key": "enter" }, { "type": "eggs" }, { "syntax": "bold" }]
//! }
//! ```
//!
//! Steps run through an [`Assistant`] over a [`MemorySurface`]; deferred
//! selection restores run between steps, as a host's event loop would.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::{
    Assistant, InputSurface, Key, KeyPress, MemorySurface, Propagation, Selection, SyntaxAction,
};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// A key press by name, e.g. `"shift+tab"`.
    Key(String),
    /// A toolbar action by name, e.g. `"bold"`.
    Syntax(String),
    /// Text typed at the selection.
    Type(String),
    /// Move the selection.
    Select(Selection),
}

/// Final state of a replayed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub text: String,
    pub selection: Selection,
    /// Key presses the assistant intercepted.
    pub handled: usize,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Run every step of the script.
pub fn run(script: &Script) -> Result<Outcome> {
    let mut surface = MemorySurface::new(&script.text, script.selection);
    let mut assistant = Assistant::new();
    let mut handled = 0;

    for step in &script.steps {
        debug!(?step, "replay step");
        match step {
            Step::Key(name) => {
                let press: KeyPress = name.parse()?;
                match assistant.on_key(&mut surface, press) {
                    Propagation::Stop => handled += 1,
                    Propagation::Continue => host_default(&mut surface, press),
                }
            }
            Step::Syntax(name) => {
                let action: SyntaxAction = name.parse()?;
                assistant.on_syntax(&mut surface, action.token());
            }
            Step::Type(text) => surface.insert_text(text),
            Step::Select(selection) => surface.set_selection(*selection),
        }
        assistant.run_deferred(&mut surface);
    }

    Ok(Outcome {
        text: surface.text().to_string(),
        selection: surface.selection(),
        handled,
    })
}

/// What a plain text area does with a key nobody intercepted.
fn host_default(surface: &mut MemorySurface, press: KeyPress) {
    if press.modifiers.ctrl || press.modifiers.alt {
        return;
    }
    match press.key {
        Key::Enter => surface.insert_text("\n"),
        Key::Char(c) => surface.insert_text(c.encode_utf8(&mut [0; 4])),
        Key::Tab | Key::BackTab | Key::Other => {}
    }
}
