//! Composition state
//!
//! The single mutable aggregate the engine owns and renderers observe.

use super::candidate::CandidateList;

/// Keyboard layout selector, independent of composition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyboardLayout {
    #[default]
    Qwerty,
    Symbols,
    Emoji,
}

/// Composition state of the IME
///
/// Invariant: while `pending_buffer` is non-empty, appending its first
/// character to `committed_input` matched nothing when that character was typed.
#[derive(Debug, Clone, Default)]
pub struct CompositionState {
    /// Spelling confirmed to have at least one candidate
    pub(crate) committed_input: String,
    /// Keystrokes typed after `committed_input` stopped matching
    pub(crate) pending_buffer: String,
    /// Candidates for `committed_input`; empty when it is empty
    pub(crate) candidates: CandidateList,
    /// Letters commit as raw ASCII instead of composing
    pub(crate) is_ascii_mode: bool,
    /// Next letter is committed upper-cased (one-shot)
    pub(crate) is_capital_pending: bool,
    pub(crate) keyboard_layout: KeyboardLayout,
}

impl CompositionState {
    pub fn committed_input(&self) -> &str {
        &self.committed_input
    }

    pub fn pending_buffer(&self) -> &str {
        &self.pending_buffer
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn is_ascii_mode(&self) -> bool {
        self.is_ascii_mode
    }

    pub fn is_capital_pending(&self) -> bool {
        self.is_capital_pending
    }

    pub fn keyboard_layout(&self) -> KeyboardLayout {
        self.keyboard_layout
    }

    /// Whether any spelling is in progress
    pub fn is_composing(&self) -> bool {
        !self.committed_input.is_empty() || !self.pending_buffer.is_empty()
    }

    /// The composed view: committed input and pending buffer joined by a
    /// single space when both are non-empty.
    pub fn display_input(&self) -> String {
        match (
            self.committed_input.is_empty(),
            self.pending_buffer.is_empty(),
        ) {
            (true, true) => String::new(),
            (false, true) => self.committed_input.clone(),
            (true, false) => self.pending_buffer.clone(),
            (false, false) => format!("{} {}", self.committed_input, self.pending_buffer),
        }
    }

    /// Clear committed input, pending buffer and candidates.
    /// Modes and layout are kept.
    pub(crate) fn clear_composition(&mut self) {
        self.committed_input.clear();
        self.pending_buffer.clear();
        self.candidates.clear();
    }
}
