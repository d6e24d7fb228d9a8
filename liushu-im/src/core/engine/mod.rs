//! Composition engine - the core state machine and key processing
//!
//! This module contains the `CompositionEngine` that turns key events into a
//! composition, queries the matcher and dispatches committed text to the host.

mod commit;
mod init;
mod input;
mod mode;
mod types;

pub use types::*;

#[cfg(test)]
mod tests;

use tracing::trace;

use super::candidate::{Candidate, CandidateList};
use super::host::{NoopHost, TextHost};
use super::keycode::KeyEvent;
use super::matcher::Matcher;
use super::observer::{CompositionSnapshot, Observers, SubscriptionId};
use super::state::{CompositionState, KeyboardLayout};

/// The composition engine
///
/// Single-threaded and synchronous: every event completes, including all of
/// its matcher queries, before the next one is handled.
pub struct CompositionEngine<M, H = NoopHost> {
    /// Current composition state
    state: CompositionState,
    /// Candidate lookup
    matcher: M,
    /// Text field receiving committed text
    host: H,
    /// Renderer subscriptions
    observers: Observers,
    /// Engine configuration
    config: EngineConfig,
}

impl<M: Matcher> CompositionEngine<M, NoopHost> {
    /// Create an engine with no text field attached.
    /// Composition works as usual; committed text is dropped.
    pub fn without_host(matcher: M) -> Self {
        Self::new(matcher, NoopHost)
    }
}

impl<M: Matcher, H: TextHost> CompositionEngine<M, H> {
    /// Create a new engine
    pub fn new(matcher: M, host: H) -> Self {
        Self::with_config(matcher, host, EngineConfig::default())
    }

    /// Create with configuration
    pub fn with_config(matcher: M, host: H, config: EngineConfig) -> Self {
        let mut state = CompositionState::default();
        state.candidates = CandidateList::default().with_page_size(config.page_size);
        Self {
            state,
            matcher,
            host,
            observers: Observers::default(),
            config,
        }
    }

    /// Get the current state
    pub fn state(&self) -> &CompositionState {
        &self.state
    }

    pub fn committed_input(&self) -> &str {
        self.state.committed_input()
    }

    pub fn pending_buffer(&self) -> &str {
        self.state.pending_buffer()
    }

    /// Committed input and pending buffer as shown to the user
    pub fn display_input(&self) -> String {
        self.state.display_input()
    }

    pub fn candidates(&self) -> &CandidateList {
        self.state.candidates()
    }

    /// Mutable access for renderers paging through candidates
    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.state.candidates
    }

    pub fn is_ascii_mode(&self) -> bool {
        self.state.is_ascii_mode()
    }

    pub fn is_capital_pending(&self) -> bool {
        self.state.is_capital_pending()
    }

    pub fn keyboard_layout(&self) -> KeyboardLayout {
        self.state.keyboard_layout()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn matcher_mut(&mut self) -> &mut M {
        &mut self.matcher
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Read-only snapshot of the observable state
    pub fn snapshot(&self) -> CompositionSnapshot {
        CompositionSnapshot::from(&self.state)
    }

    /// Subscribe to state changes.
    ///
    /// The callback receives the current snapshot immediately, then a new
    /// snapshot after every event that changed it.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&CompositionSnapshot) + 'static,
    ) -> SubscriptionId {
        let current = self.snapshot();
        self.observers.subscribe(current, Box::new(callback))
    }

    /// Remove a subscription. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Process a key event
    pub fn handle_key(&mut self, event: &KeyEvent) {
        trace!(
            "handle_key: {} committed={:?} pending={:?}",
            event, self.state.committed_input, self.state.pending_buffer
        );

        match event {
            KeyEvent::Alpha(c) => self.input_alpha(*c),
            KeyEvent::RawText(text) => self.commit_raw(text),
            KeyEvent::AsciiModeSwitch => self.toggle_ascii_mode(),
            KeyEvent::Enter => self.enter(),
            KeyEvent::Delete => self.delete(),
            KeyEvent::Shift => self.shift(),
            KeyEvent::Comma => self.commit_raw(FULLWIDTH_COMMA),
            KeyEvent::Space => self.commit_raw(FULLWIDTH_SPACE),
            KeyEvent::Period => self.commit_raw(FULLWIDTH_PERIOD),
            KeyEvent::Symbols => self.set_layout(KeyboardLayout::Symbols),
            KeyEvent::Emoji => self.set_layout(KeyboardLayout::Emoji),
            KeyEvent::Abc => self.set_layout(KeyboardLayout::Qwerty),
            KeyEvent::Other => {}
        }

        self.publish();
    }

    /// Commit a user-selected candidate and re-absorb buffered keystrokes
    pub fn commit_candidate(&mut self, candidate: &Candidate) {
        self.commit_and_cascade(candidate);
        self.publish();
    }

    /// Commit the candidate at `index` of the current list.
    /// Returns false (and does nothing) if there is no such candidate.
    pub fn select_candidate(&mut self, index: usize) -> bool {
        let Some(candidate) = self.state.candidates.get(index).cloned() else {
            return false;
        };
        self.commit_candidate(&candidate);
        true
    }

    /// Commit the candidate at 1-based `page_index` on the current page
    pub fn select_on_page(&mut self, page_index: usize) -> bool {
        let Some(candidate) = self.state.candidates.select_on_page(page_index).cloned() else {
            return false;
        };
        self.commit_candidate(&candidate);
        true
    }

    /// Drop the composition without committing.
    /// ASCII mode, capitalization and layout are kept.
    pub fn reset(&mut self) {
        self.state.clear_composition();
        self.publish();
    }

    /// Query the matcher
    fn search(&self, input: &str) -> Vec<Candidate> {
        let result = self.matcher.search(input);
        trace!("search {:?}: {} candidates", input, result.len());
        result
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.observers.publish(snapshot);
    }
}
