//! Driving a host input surface.
//!
//! Hosts reset their caret when their value is replaced from outside, so a
//! computed selection cannot be applied in the same turn as the value. The
//! [`Assistant`] commits the value right away and queues the selection as a
//! [`Deferred`] continuation, which the host runs on its next event-loop
//! turn via [`Assistant::run_deferred`].

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::assist::{Edit, KeyOutcome, handle_key_press, insert_syntax};
use super::buffer::{Selection, TextBuffer};
use super::keys::KeyPress;
use super::syntax::SyntaxToken;

/// The host widget that owns the text.
pub trait InputSurface {
    /// Current value and selection, or `None` when the host is not ready.
    fn snapshot(&self) -> Option<(String, Selection)>;

    /// Replace the whole value. Hosts may move their caret when this runs.
    fn replace_value(&mut self, value: &str);

    /// Set the selection. Only honored once the value is visible.
    fn set_selection(&mut self, selection: Selection);
}

/// Work queued for the host's next event-loop turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    RestoreSelection(Selection),
}

/// Whether the host should still run its own handling for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Handled here; suppress the host default (e.g. tab navigation).
    Stop,
    /// Not handled; let the host run its default.
    Continue,
}

/// Editing assistant bound to one editing session.
#[derive(Debug, Default)]
pub struct Assistant {
    deferred: VecDeque<Deferred>,
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of continuations waiting for the next turn.
    pub fn pending(&self) -> usize {
        self.deferred.len()
    }

    /// Offer a key event from the host.
    pub fn on_key<S: InputSurface + ?Sized>(&mut self, surface: &mut S, press: KeyPress) -> Propagation {
        // Events are handled strictly in sequence.
        self.run_deferred(surface);
        let Some((text, selection)) = surface.snapshot() else {
            trace!("key press ignored, surface not ready");
            return Propagation::Continue;
        };
        let buffer = TextBuffer::from_text(&text);
        match handle_key_press(&buffer, selection, press) {
            KeyOutcome::Handled(edit) => {
                self.commit(surface, &edit);
                Propagation::Stop
            }
            KeyOutcome::NoOp => Propagation::Continue,
        }
    }

    /// Apply a toolbar action. Returns `false` if the host was not ready.
    pub fn on_syntax<S: InputSurface + ?Sized>(&mut self, surface: &mut S, token: SyntaxToken<'_>) -> bool {
        self.run_deferred(surface);
        let Some((text, selection)) = surface.snapshot() else {
            trace!("syntax action ignored, surface not ready");
            return false;
        };
        let buffer = TextBuffer::from_text(&text);
        let edit = insert_syntax(&buffer, selection, token);
        self.commit(surface, &edit);
        true
    }

    /// Run queued continuations. Call after the host committed its update.
    ///
    /// Returns how many ran.
    pub fn run_deferred<S: InputSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let mut ran = 0;
        while let Some(task) = self.deferred.pop_front() {
            match task {
                Deferred::RestoreSelection(selection) => {
                    trace!(?selection, "restoring selection");
                    surface.set_selection(selection);
                }
            }
            ran += 1;
        }
        ran
    }

    fn commit<S: InputSurface + ?Sized>(&mut self, surface: &mut S, edit: &Edit) {
        debug!(kind = ?edit.kind, "committing edit");
        surface.replace_value(&edit.buffer.text());
        self.deferred
            .push_back(Deferred::RestoreSelection(edit.selection));
    }
}

/// An in-memory text area.
///
/// Like a browser text area it moves its caret to the end of the value
/// whenever the value is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    value: String,
    selection: Selection,
    ready: bool,
}

impl MemorySurface {
    pub fn new(value: &str, selection: Selection) -> Self {
        let len = value.chars().count();
        Self {
            value: value.to_string(),
            selection: selection.clamp(len),
            ready: true,
        }
    }

    /// A surface whose host has not mounted yet.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Type text at the selection, as the host does by default.
    pub fn insert_text(&mut self, text: &str) {
        let edit = TextBuffer::from_text(&self.value).splice(self.selection.range(), text);
        let cursor = self.selection.start + text.chars().count();
        self.value = edit.text();
        self.selection = Selection::caret(cursor);
    }

    fn len_chars(&self) -> usize {
        self.value.chars().count()
    }
}

impl InputSurface for MemorySurface {
    fn snapshot(&self) -> Option<(String, Selection)> {
        self.ready.then(|| (self.value.clone(), self.selection))
    }

    fn replace_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.selection = Selection::caret(self.len_chars());
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.len_chars());
    }
}
