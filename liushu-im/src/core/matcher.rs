//! Matcher: the candidate lookup service the engine queries.

use std::collections::HashMap;
use std::path::Path;

use liushu_engine::Dictionary;
use tracing::{debug, warn};

use super::candidate::{Candidate, CandidateSource};
use crate::config::Settings;

/// Candidate lookup for an input spelling.
///
/// Returns candidates in ranking order, or an empty list when nothing matches.
pub trait Matcher {
    fn search(&self, input: &str) -> Vec<Candidate>;
}

impl Matcher for Dictionary {
    fn search(&self, input: &str) -> Vec<Candidate> {
        Dictionary::search(self, input)
            .into_iter()
            .enumerate()
            .map(|(i, item)| Candidate::from(item).with_index(i))
            .collect()
    }
}

impl<T: Matcher + ?Sized> Matcher for Box<T> {
    fn search(&self, input: &str) -> Vec<Candidate> {
        (**self).search(input)
    }
}

impl<T: Matcher + ?Sized> Matcher for &T {
    fn search(&self, input: &str) -> Vec<Candidate> {
        (**self).search(input)
    }
}

/// Matcher that never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMatcher;

impl Matcher for NoMatcher {
    fn search(&self, _input: &str) -> Vec<Candidate> {
        Vec::new()
    }
}

/// Fixed lookup table: each input maps to exactly the listed texts.
#[derive(Debug, Clone, Default)]
pub struct TableMatcher {
    table: HashMap<String, Vec<String>>,
}

impl TableMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the row for `input`
    pub fn with(
        mut self,
        input: impl Into<String>,
        texts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.insert(input, texts);
        self
    }

    pub fn insert(
        &mut self,
        input: impl Into<String>,
        texts: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.table
            .insert(input.into(), texts.into_iter().map(Into::into).collect());
    }
}

impl Matcher for TableMatcher {
    fn search(&self, input: &str) -> Vec<Candidate> {
        self.table
            .get(input)
            .map(|texts| {
                texts
                    .iter()
                    .enumerate()
                    .map(|(i, text)| {
                        Candidate::new(text.clone(), CandidateSource::Table)
                            .with_code(input)
                            .with_index(i)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A set of named matchers with one active.
///
/// Searches go to the active matcher; with no matchers every search is empty.
#[derive(Default)]
pub struct MatcherManager {
    matchers: Vec<(String, Box<dyn Matcher>)>,
    active: usize,
}

impl MatcherManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the compiled dictionary of every configured formula from
    /// `target_dir` and activate `settings.active_formula`.
    ///
    /// Formulas whose dictionary is missing or unreadable are skipped.
    pub fn from_settings(settings: &Settings, target_dir: &Path) -> Self {
        let mut manager = Self::new();
        for formula in &settings.formulas {
            let path = formula.target_path(target_dir);
            if !path.exists() {
                warn!(
                    "Dictionary for formula {} not found at {:?}; run `liushu deploy`",
                    formula.id, path
                );
                continue;
            }
            match Dictionary::load(&path) {
                Ok(dict) => {
                    debug!("Formula {} loaded from {:?} ({:?})", formula.id, path, dict);
                    manager.add(formula.id.clone(), Box::new(dict));
                }
                Err(e) => warn!("Failed to load formula {} from {:?}: {}", formula.id, path, e),
            }
        }
        if let Some(active) = &settings.active_formula
            && !manager.set_active(active)
        {
            warn!("Active formula {} is not loaded", active);
        }
        manager
    }

    /// Register a matcher under `id`, replacing any matcher with the same id
    pub fn add(&mut self, id: impl Into<String>, matcher: Box<dyn Matcher>) {
        let id = id.into();
        if let Some(slot) = self.matchers.iter_mut().find(|(existing, _)| *existing == id) {
            slot.1 = matcher;
        } else {
            self.matchers.push((id, matcher));
        }
    }

    /// Activate the matcher registered under `id`.
    /// Returns false (and keeps the current one) if `id` is unknown.
    pub fn set_active(&mut self, id: &str) -> bool {
        match self.matchers.iter().position(|(existing, _)| existing == id) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.matchers.get(self.active).map(|(id, _)| id.as_str())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for MatcherManager {
    fn search(&self, input: &str) -> Vec<Candidate> {
        match self.matchers.get(self.active) {
            Some((_, matcher)) => matcher.search(input),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liushu_engine::DictItem;

    fn texts(candidates: Vec<Candidate>) -> Vec<String> {
        candidates.into_iter().map(|c| c.text).collect()
    }

    #[test]
    fn test_table_matcher_exact_rows() {
        let matcher = TableMatcher::new().with("ni", ["你", "泥"]);
        let result = matcher.search("ni");
        assert_eq!(texts(result.clone()), vec!["你", "泥"]);
        assert_eq!(result[1].index, 1);
        assert_eq!(result[0].code, "ni");
        assert!(matcher.search("n").is_empty());
    }

    #[test]
    fn test_dictionary_matcher_tags_source() {
        let dict = Dictionary::build_from_items(vec![DictItem {
            text: "你".to_string(),
            code: "ni".to_string(),
            weight: 1,
            comment: None,
        }])
        .unwrap();
        let result = Matcher::search(&dict, "n");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source, CandidateSource::Dictionary);
    }

    #[test]
    fn test_manager_switches_active() {
        let mut manager = MatcherManager::new();
        assert!(manager.search("a").is_empty());
        assert_eq!(manager.active_id(), None);

        manager.add("first", Box::new(TableMatcher::new().with("a", ["一"])));
        manager.add("second", Box::new(TableMatcher::new().with("a", ["二"])));
        assert_eq!(manager.active_id(), Some("first"));
        assert_eq!(texts(manager.search("a")), vec!["一"]);

        assert!(manager.set_active("second"));
        assert_eq!(texts(manager.search("a")), vec!["二"]);

        assert!(!manager.set_active("third"));
        assert_eq!(manager.active_id(), Some("second"));
        assert_eq!(manager.ids().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_manager_add_replaces_same_id() {
        let mut manager = MatcherManager::new();
        manager.add("x", Box::new(NoMatcher));
        manager.add("x", Box::new(TableMatcher::new().with("a", ["一"])));
        assert_eq!(manager.len(), 1);
        assert_eq!(texts(manager.search("a")), vec!["一"]);
    }

    #[test]
    fn test_manager_from_settings_skips_missing() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let formula_dir = source.path().join("sunman");
        std::fs::create_dir_all(&formula_dir).unwrap();
        std::fs::write(formula_dir.join("sunman.dict.tsv"), "你\tni\t1\n").unwrap();

        let mut settings = Settings::default();
        settings.formulas[0].compile(source.path(), target.path()).unwrap();
        settings.formulas.push(liushu_engine::Formula {
            id: "missing".to_string(),
            name: None,
            dictionaries: vec![],
        });

        let manager = MatcherManager::from_settings(&settings, target.path());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.active_id(), Some("sunman"));
        assert_eq!(texts(manager.search("n")), vec!["你"]);
    }
}
