//! State observation for renderers
//!
//! Subscribers receive a read-only snapshot of the composition whenever it
//! changes. Unchanged snapshots are not re-sent.

use super::candidate::Candidate;
use super::state::{CompositionState, KeyboardLayout};

/// Read-only view of the composition for renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionSnapshot {
    pub display_input: String,
    pub candidates: Vec<Candidate>,
    pub is_ascii_mode: bool,
    pub keyboard_layout: KeyboardLayout,
}

impl From<&CompositionState> for CompositionSnapshot {
    fn from(state: &CompositionState) -> Self {
        Self {
            display_input: state.display_input(),
            candidates: state.candidates().candidates().to_vec(),
            is_ascii_mode: state.is_ascii_mode(),
            keyboard_layout: state.keyboard_layout(),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CompositionSnapshot)>;

/// Subscriber list with publish-on-change semantics
#[derive(Default)]
pub(crate) struct Observers {
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
    last: Option<CompositionSnapshot>,
}

impl Observers {
    /// Add a subscriber and deliver `current` to it immediately
    pub fn subscribe(
        &mut self,
        current: CompositionSnapshot,
        mut callback: Callback,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        callback(&current);
        self.subscribers.push((id, callback));
        self.last = Some(current);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        if self.subscribers.is_empty() {
            self.last = None;
        }
        self.subscribers.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Notify every subscriber if `snapshot` differs from the last one sent
    pub fn publish(&mut self, snapshot: CompositionSnapshot) {
        if self.last.as_ref() == Some(&snapshot) {
            return;
        }
        for (_, callback) in &mut self.subscribers {
            callback(&snapshot);
        }
        self.last = Some(snapshot);
    }
}
