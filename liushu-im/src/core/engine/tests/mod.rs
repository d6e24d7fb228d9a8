//! Tests for the composition engine

use std::cell::{Cell, RefCell};

use super::*;
use crate::core::matcher::TableMatcher;

mod mode;

/// Side effect recorded by `RecordingHost`
#[derive(Debug, Clone, PartialEq, Eq)]
enum HostEvent {
    Commit(String),
    Enter,
    Delete,
}

#[derive(Debug, Default)]
struct RecordingHost {
    events: Vec<HostEvent>,
}

impl RecordingHost {
    fn commits(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Commit(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TextHost for RecordingHost {
    fn commit_text(&mut self, text: &str) {
        self.events.push(HostEvent::Commit(text.to_string()));
    }

    fn handle_enter(&mut self) {
        self.events.push(HostEvent::Enter);
    }

    fn handle_delete(&mut self) {
        self.events.push(HostEvent::Delete);
    }
}

/// Table matcher that records every query
struct CountingMatcher {
    table: TableMatcher,
    queries: Cell<usize>,
    last_query: RefCell<Option<String>>,
}

impl CountingMatcher {
    fn new(table: TableMatcher) -> Self {
        Self {
            table,
            queries: Cell::new(0),
            last_query: Default::default(),
        }
    }

    fn queries(&self) -> usize {
        self.queries.get()
    }

    fn last_query(&self) -> Option<String> {
        self.last_query.borrow().clone()
    }
}

impl Matcher for CountingMatcher {
    fn search(&self, input: &str) -> Vec<Candidate> {
        self.queries.set(self.queries.get() + 1);
        *self.last_query.borrow_mut() = Some(input.to_string());
        self.table.search(input)
    }
}

/// "n" -> 你/呢, "ni" -> 你/泥, "h" -> 好/和, "ha" -> 哈, "hao" -> 好/号
fn pinyin_table() -> TableMatcher {
    TableMatcher::new()
        .with("n", ["你", "呢"])
        .with("ni", ["你", "泥"])
        .with("h", ["好", "和"])
        .with("ha", ["哈"])
        .with("hao", ["好", "号"])
}

type TestEngine = CompositionEngine<CountingMatcher, RecordingHost>;

fn make_engine(table: TableMatcher) -> TestEngine {
    CompositionEngine::new(CountingMatcher::new(table), RecordingHost::default())
}

fn type_str(engine: &mut TestEngine, s: &str) {
    for c in s.chars() {
        engine.handle_key(&KeyEvent::Alpha(c));
    }
}

fn candidate_texts(engine: &TestEngine) -> Vec<String> {
    engine
        .candidates()
        .candidates()
        .iter()
        .map(|c| c.text.clone())
        .collect()
}

fn texts(candidates: Vec<Candidate>) -> Vec<String> {
    candidates.into_iter().map(|c| c.text).collect()
}
