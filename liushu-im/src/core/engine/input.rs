//! Key input handling (letters, raw text, Enter, Delete)

use tracing::{debug, trace};

use super::*;

impl<M: Matcher, H: TextHost> CompositionEngine<M, H> {
    /// Handle a letter key.
    ///
    /// A pending capital commits the upper-cased letter, ASCII mode commits it
    /// as typed; otherwise the letter extends the composition.
    pub(super) fn input_alpha(&mut self, c: char) {
        if self.state.is_capital_pending {
            self.state.is_capital_pending = false;
            let upper = c.to_uppercase().collect::<String>();
            self.host.commit_text(&upper);
            return;
        }

        if self.state.is_ascii_mode {
            self.host.commit_text(c.encode_utf8(&mut [0; 4]));
            return;
        }

        self.compose_alpha(c);
    }

    /// Try to extend `committed_input` by `c`.
    ///
    /// On a match the committed input and candidates advance; otherwise `c`
    /// is held in the pending buffer and everything else stays as it was.
    fn compose_alpha(&mut self, c: char) {
        let mut probe = self.state.committed_input.clone();
        probe.push(c);

        let result = self.search(&probe);
        if result.is_empty() {
            self.state.pending_buffer.push(c);
            trace!("no match for {:?}, pending={:?}", probe, self.state.pending_buffer);
        } else {
            self.state.committed_input = probe;
            self.state.candidates.update(result);
        }
    }

    /// Commit text verbatim, bypassing composition
    pub(super) fn commit_raw(&mut self, text: &str) {
        self.host.commit_text(text);
    }

    /// Enter: flush the whole spelling as typed, or delegate to the host
    pub(super) fn enter(&mut self) {
        if !self.state.is_composing() {
            debug!("enter with empty composition, delegating to host");
            self.host.handle_enter();
            return;
        }

        let mut text = std::mem::take(&mut self.state.committed_input);
        text.push_str(&self.state.pending_buffer);
        self.state.clear_composition();
        self.host.commit_text(&text);
    }

    /// Delete: peel the pending buffer first, then the committed input
    /// (re-querying the matcher), or delegate to the host
    pub(super) fn delete(&mut self) {
        if self.state.pending_buffer.pop().is_some() {
            return;
        }

        if self.state.committed_input.pop().is_some() {
            let candidates = if self.state.committed_input.is_empty() {
                Vec::new()
            } else {
                let input = self.state.committed_input.clone();
                self.search(&input)
            };
            self.state.candidates.update(candidates);
            return;
        }

        debug!("delete with empty composition, delegating to host");
        self.host.handle_delete();
    }
}
