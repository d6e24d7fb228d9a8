//! Core IME functionality
//!
//! This module contains the composition state machine and the seams it talks
//! through: the matcher, the text host and state observers.

pub mod candidate;
pub mod engine;
pub mod host;
pub mod keycode;
pub mod matcher;
pub mod observer;
pub mod state;
