//! Engine initialization from settings (formula dictionaries)

use tracing::{debug, warn};

use super::*;
use crate::config::Settings;
use crate::core::matcher::MatcherManager;

impl<H: TextHost> CompositionEngine<MatcherManager, H> {
    /// Create an engine whose matcher holds every compiled formula found in
    /// the default target directory.
    ///
    /// Without a target directory or compiled dictionaries the engine still
    /// works; it just never finds a candidate.
    pub fn from_settings(settings: &Settings, host: H) -> Self {
        let matcher = match Settings::target_dir() {
            Some(target_dir) => MatcherManager::from_settings(settings, &target_dir),
            None => {
                warn!("Could not determine data directory, starting without dictionaries");
                MatcherManager::new()
            }
        };
        debug!(
            "engine initialized: {} formula(s), active={:?}",
            matcher.len(),
            matcher.active_id()
        );
        Self::with_config(matcher, host, EngineConfig::from(settings))
    }

    /// Switch the active formula. Returns false if it is not loaded.
    ///
    /// The current composition is dropped since its candidates came from the
    /// previous formula.
    pub fn set_active_formula(&mut self, id: &str) -> bool {
        if !self.matcher.set_active(id) {
            return false;
        }
        self.reset();
        true
    }
}
