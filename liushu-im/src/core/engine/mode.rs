//! Mode switching (ASCII mode, capitalization, keyboard layout)

use tracing::debug;

use super::*;

impl<M: Matcher, H: TextHost> CompositionEngine<M, H> {
    /// Toggle direct ASCII input
    pub(super) fn toggle_ascii_mode(&mut self) {
        self.state.is_ascii_mode = !self.state.is_ascii_mode;
        debug!("ASCII mode toggled: {}", self.state.is_ascii_mode);
    }

    /// Arm one-shot capitalization.
    ///
    /// Only the committed input gates this: Shift still arms while a pending
    /// buffer exists on its own.
    pub(super) fn shift(&mut self) {
        if self.state.committed_input.is_empty() {
            self.state.is_capital_pending = true;
        }
    }

    pub(super) fn set_layout(&mut self, layout: KeyboardLayout) {
        if self.state.keyboard_layout != layout {
            debug!("keyboard layout: {:?} -> {:?}", self.state.keyboard_layout, layout);
            self.state.keyboard_layout = layout;
        }
    }
}
