//! Type definitions for the composition engine

use super::super::candidate::CandidateList;
use crate::config::Settings;

/// Full-width punctuation committed by the punctuation keys
pub const FULLWIDTH_COMMA: &str = "\u{FF0C}"; // ，
pub const FULLWIDTH_SPACE: &str = "\u{3000}";
pub const FULLWIDTH_PERIOD: &str = "\u{3002}"; // 。

/// Configuration for the composition engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of candidates per page
    pub page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: CandidateList::DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<&Settings> for EngineConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            page_size: settings.candidates.page_size,
        }
    }
}
