//! Candidate commit and the re-absorption cascade

use tracing::debug;

use super::*;

impl<M: Matcher, H: TextHost> CompositionEngine<M, H> {
    /// Commit `candidate`, then greedily move buffered keystrokes back into a
    /// fresh composition one character at a time.
    ///
    /// The cascade stops at the first character that does not extend a match;
    /// that character and everything after it stay in the pending buffer.
    pub(super) fn commit_and_cascade(&mut self, candidate: &Candidate) {
        self.host.commit_text(&candidate.text);
        self.state.committed_input.clear();
        self.state.candidates.clear();

        while let Some(next) = self.state.pending_buffer.chars().next() {
            let mut probe = self.state.committed_input.clone();
            probe.push(next);

            let result = self.search(&probe);
            if result.is_empty() {
                break;
            }

            self.state.committed_input = probe;
            self.state.pending_buffer.drain(..next.len_utf8());
            self.state.candidates.update(result);
        }

        debug!(
            "committed {:?}, cascade left committed={:?} pending={:?}",
            candidate.text, self.state.committed_input, self.state.pending_buffer
        );
    }
}
