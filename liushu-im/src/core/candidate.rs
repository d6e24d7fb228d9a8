//! Candidate list management
//!
//! Handles the ranked list of candidates for the current composition with
//! pagination support for renderers.

use liushu_engine::DictItem;

/// Where a candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Compiled code dictionary
    Dictionary,
    /// In-memory lookup table
    Table,
}

/// A single candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The text to commit
    pub text: String,
    /// The code that produced this candidate
    pub code: String,
    /// Ranking weight reported by the matcher
    pub weight: u32,
    /// Optional annotation (e.g., dictionary comment)
    pub comment: Option<String>,
    /// Source tag
    pub source: CandidateSource,
    /// Position in the matcher's ranking
    pub index: usize,
}

impl Candidate {
    pub fn new(text: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            text: text.into(),
            code: String::new(),
            weight: 0,
            comment: None,
            source,
            index: 0,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

impl From<DictItem> for Candidate {
    fn from(item: DictItem) -> Self {
        Self {
            text: item.text,
            code: item.code,
            weight: item.weight,
            comment: item.comment,
            source: CandidateSource::Dictionary,
            index: 0,
        }
    }
}

/// An ordered list of candidates with pagination.
///
/// The order is the matcher's ranking and is never changed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    candidates: Vec<Candidate>,
    /// Current page (0-indexed)
    page: usize,
    /// Number of candidates per page
    page_size: usize,
}

impl CandidateList {
    /// Default page size for candidate display
    pub const DEFAULT_PAGE_SIZE: usize = 9;

    /// Create a new candidate list
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            page: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.page = 0;
        self
    }

    /// Create a table-sourced candidate list from strings
    pub fn from_strings(strings: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let candidates = strings
            .into_iter()
            .enumerate()
            .map(|(i, s)| Candidate::new(s, CandidateSource::Table).with_index(i))
            .collect();
        Self::new(candidates)
    }

    /// Get all candidates
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Get the current page number (0-indexed)
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Get the total number of pages
    pub fn total_pages(&self) -> usize {
        self.candidates.len().div_ceil(self.page_size)
    }

    /// Get the start index of the current page
    pub fn page_start(&self) -> usize {
        self.page * self.page_size
    }

    /// Get the candidates for the current page
    pub fn page_candidates(&self) -> &[Candidate] {
        let start = self.page_start().min(self.candidates.len());
        let end = (start + self.page_size).min(self.candidates.len());
        &self.candidates[start..end]
    }

    /// Move to the next page, wrapping to the first.
    pub fn next_page(&mut self) -> bool {
        if self.candidates.is_empty() {
            return false;
        }
        self.page = (self.page + 1) % self.total_pages();
        true
    }

    /// Move to the previous page, wrapping to the last.
    pub fn prev_page(&mut self) -> bool {
        if self.candidates.is_empty() {
            return false;
        }
        self.page = match self.page {
            0 => self.total_pages() - 1,
            page => page - 1,
        };
        true
    }

    /// Candidate by its 1-based position on the current page
    pub fn select_on_page(&self, page_index: usize) -> Option<&Candidate> {
        if page_index == 0 || page_index > self.page_size {
            return None;
        }
        self.candidates.get(self.page_start() + page_index - 1)
    }

    /// Replace the candidates and return to the first page
    pub fn update(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.page = 0;
    }

    pub fn clear(&mut self) {
        self.update(Vec::new());
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
