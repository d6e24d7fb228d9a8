//! liushu-im: input composition core for the liushu input method
//!
//! This crate turns a stream of key events into a composition (the spelling the
//! user is typing), queries a matcher for ranked candidates and resolves
//! candidate selection into committed text on a host text field.
//! It uses liushu-engine dictionaries as the default matcher backend.

pub mod config;
pub mod core;

pub use core::candidate::{Candidate, CandidateList, CandidateSource};
pub use core::engine::{CompositionEngine, EngineConfig};
pub use core::host::{BufferHost, NoopHost, TextHost};
pub use core::keycode::{KeyEvent, Keysym};
pub use core::matcher::{Matcher, MatcherManager, NoMatcher, TableMatcher};
pub use core::observer::{CompositionSnapshot, SubscriptionId};
pub use core::state::{CompositionState, KeyboardLayout};
