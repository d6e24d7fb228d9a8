use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use yada::DoubleArray;
use yada::builder::DoubleArrayBuilder;

use crate::code::normalize_code;

/// Errors that can occur during dictionary operations.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON parse error")]
    Json(#[from] serde_json::Error),

    #[error("invalid dictionary format: {0}")]
    Format(String),
}

type Result<T> = std::result::Result<T, DictError>;

const MAGIC: &[u8; 4] = b"LSHU";
const VERSION: u32 = 1;

/// One row of a source dictionary: a word and the code that types it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictItem {
    pub text: String,
    pub code: String,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A word stored under a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub weight: u32,
    pub comment: Option<String>,
}

/// All words sharing one code.
#[derive(Debug, Clone)]
pub struct DictEntry {
    pub code: String,
    pub words: Vec<Word>,
}

impl DictEntry {
    fn items(&self) -> impl Iterator<Item = DictItem> + '_ {
        self.words.iter().map(|w| DictItem {
            text: w.text.clone(),
            code: self.code.clone(),
            weight: w.weight,
            comment: w.comment.clone(),
        })
    }
}

/// A code dictionary.
///
/// Entries are kept sorted by code bytes so that every code sharing a prefix
/// forms one contiguous run; the double-array trie serves exact lookups.
pub struct Dictionary {
    trie: DoubleArray<Vec<u8>>,
    entries: Vec<DictEntry>,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("codes", &self.entries.len())
            .field("words", &self.word_count())
            .finish()
    }
}

impl Dictionary {
    /// Build a Dictionary from entries sorted by code bytes with unique codes.
    fn build_from_entries(entries: Vec<DictEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(DictError::Format("dictionary has no entries".to_string()));
        }

        let keyset: Vec<(&[u8], u32)> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.code.as_bytes(), i as u32))
            .collect();

        let trie_bytes = DoubleArrayBuilder::build(&keyset)
            .ok_or_else(|| DictError::Format("failed to build double-array trie".to_string()))?;

        Ok(Dictionary {
            trie: DoubleArray::new(trie_bytes),
            entries,
        })
    }

    /// Build a Dictionary from loose items.
    ///
    /// Codes are normalized, items are grouped per code in source order and a
    /// repeated `(code, text)` pair keeps its first occurrence.
    pub fn build_from_items(items: impl IntoIterator<Item = DictItem>) -> Result<Self> {
        let mut groups: HashMap<String, Vec<Word>> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for item in items {
            let code = normalize_code(&item.code);
            if code.is_empty() || item.text.is_empty() {
                continue;
            }
            let words = groups.entry(code.clone()).or_insert_with(|| {
                order.push(code);
                Vec::new()
            });
            if !words.iter().any(|w| w.text == item.text) {
                words.push(Word {
                    text: item.text,
                    weight: item.weight,
                    comment: item.comment,
                });
            }
        }

        let mut entries: Vec<DictEntry> = order
            .into_iter()
            .filter_map(|code| groups.remove(&code).map(|words| DictEntry { code, words }))
            .collect();

        // Sort by code bytes for the trie builder and the prefix ranges
        entries.sort_by(|a, b| a.code.as_bytes().cmp(b.code.as_bytes()));

        Self::build_from_entries(entries)
    }

    /// Build a Dictionary from a tab-separated source file.
    ///
    /// Columns are `text\tcode\tweight\tcomment`; only the first two are
    /// required. Lines starting with `#` are comments, empty lines are skipped,
    /// and a leading `text\tcode...` header row is ignored.
    pub fn build_from_tsv(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut items = Vec::new();
        let mut seen_row = false;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let cols: Vec<&str> = line.split('\t').collect();
            if !seen_row {
                seen_row = true;
                if cols.len() >= 2 && cols[0] == "text" && cols[1] == "code" {
                    continue;
                }
            }
            if cols.len() < 2 {
                trace!("line {}: fewer than two columns, skipped", lineno + 1);
                continue;
            }

            let weight = match cols.get(2).map(|w| w.trim()) {
                None | Some("") => 0,
                Some(w) => match w.parse::<u32>() {
                    Ok(weight) => weight,
                    Err(_) => {
                        debug!("line {}: invalid weight {:?}, skipped", lineno + 1, w);
                        continue;
                    }
                },
            };
            let comment = cols
                .get(3)
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string);

            items.push(DictItem {
                text: cols[0].trim().to_string(),
                code: cols[1].to_string(),
                weight,
                comment,
            });
        }

        Self::build_from_items(items)
    }

    /// Build a Dictionary from a JSON array of `{text, code, weight, comment}`.
    pub fn build_from_json(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let items: Vec<DictItem> = serde_json::from_reader(reader)?;
        Self::build_from_items(items)
    }

    /// Save the dictionary to a binary file.
    ///
    /// Format:
    /// ```text
    /// [4B] magic "LSHU"
    /// [4B] version (1u32 LE)
    /// [4B] trie_len (u32 LE)
    /// [trie_len B] trie bytes
    /// [4B] num_entries (u32 LE)
    /// For each entry:
    ///   [2B] code_len (u16 LE)
    ///   [code_len B] code (UTF-8)
    ///   [2B] num_words (u16 LE)
    ///   For each word:
    ///     [2B] text_len (u16 LE)
    ///     [text_len B] text (UTF-8)
    ///     [4B] weight (u32 LE)
    ///     [1B] has_comment (0 or 1)
    ///     if has_comment: [2B] comment_len (u16 LE) + comment (UTF-8)
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut w = BufWriter::new(file);

        w.write_all(MAGIC)?;
        w.write_all(&VERSION.to_le_bytes())?;

        let trie_bytes: &[u8] = &self.trie.0;
        w.write_all(&(trie_bytes.len() as u32).to_le_bytes())?;
        w.write_all(trie_bytes)?;

        w.write_all(&(self.entries.len() as u32).to_le_bytes())?;
        for entry in &self.entries {
            write_str(&mut w, &entry.code)?;
            let num_words = u16::try_from(entry.words.len()).map_err(|_| {
                DictError::Format(format!("too many words for code {:?}", entry.code))
            })?;
            w.write_all(&num_words.to_le_bytes())?;
            for word in &entry.words {
                write_str(&mut w, &word.text)?;
                w.write_all(&word.weight.to_le_bytes())?;
                match &word.comment {
                    Some(comment) => {
                        w.write_all(&[1])?;
                        write_str(&mut w, comment)?;
                    }
                    None => w.write_all(&[0])?,
                }
            }
        }

        w.flush()?;
        Ok(())
    }

    /// Load a dictionary from a binary file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut r = BufReader::new(file);

        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(DictError::Format(
                "invalid magic: expected LSHU".to_string(),
            ));
        }

        let version = read_u32(&mut r)?;
        if version != VERSION {
            return Err(DictError::Format(format!("unsupported version: {version}")));
        }

        let trie_len = read_u32(&mut r)? as usize;
        const MAX_TRIE_LEN: usize = 100 * 1024 * 1024; // 100 MB
        if trie_len > MAX_TRIE_LEN {
            return Err(DictError::Format(format!(
                "trie_len too large: {} (max {})",
                trie_len, MAX_TRIE_LEN
            )));
        }
        let mut trie_bytes = vec![0u8; trie_len];
        r.read_exact(&mut trie_bytes)?;

        let num_entries = read_u32(&mut r)? as usize;
        const MAX_ENTRIES: usize = 10_000_000;
        if num_entries > MAX_ENTRIES {
            return Err(DictError::Format(format!(
                "num_entries too large: {} (max {})",
                num_entries, MAX_ENTRIES
            )));
        }

        let mut entries = Vec::with_capacity(num_entries);
        for _ in 0..num_entries {
            let code = read_string(&mut r, "code")?;
            let num_words = read_u16(&mut r)? as usize;
            let mut words = Vec::with_capacity(num_words);
            for _ in 0..num_words {
                let text = read_string(&mut r, "text")?;
                let weight = read_u32(&mut r)?;
                let mut flag = [0u8; 1];
                r.read_exact(&mut flag)?;
                let comment = match flag[0] {
                    0 => None,
                    1 => Some(read_string(&mut r, "comment")?),
                    other => {
                        return Err(DictError::Format(format!(
                            "invalid comment flag: {other}"
                        )));
                    }
                };
                words.push(Word {
                    text,
                    weight,
                    comment,
                });
            }
            entries.push(DictEntry { code, words });
        }

        Ok(Dictionary {
            trie: DoubleArray::new(trie_bytes),
            entries,
        })
    }

    /// Load a dictionary with auto-detection of format.
    ///
    /// Files starting with the `LSHU` magic bytes load as binary, `.json`
    /// files as JSON, anything else as a tab-separated source.
    pub fn load_auto(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let mut magic = [0u8; 4];
        let bytes_read = file.read(&mut magic)?;

        if bytes_read >= 4 && &magic == MAGIC {
            Dictionary::load(path)
        } else if path.extension().is_some_and(|e| e == "json") {
            Dictionary::build_from_json(path)
        } else {
            Dictionary::build_from_tsv(path)
        }
    }

    /// Merge multiple dictionaries into one.
    ///
    /// Dictionaries earlier in the list have higher priority: for a repeated
    /// `(code, text)` pair the earlier word is kept and its words come first
    /// under a shared code. Returns `None` if the input is empty.
    pub fn merge(dicts: Vec<Dictionary>) -> Result<Option<Self>> {
        if dicts.is_empty() {
            return Ok(None);
        }

        let mut merged: HashMap<String, Vec<Word>> = HashMap::new();
        let mut code_order: Vec<String> = Vec::new();

        for dict in dicts {
            for entry in dict.entries {
                if !merged.contains_key(&entry.code) {
                    code_order.push(entry.code.clone());
                }
                let words = merged.entry(entry.code).or_default();
                for word in entry.words {
                    if !words.iter().any(|w| w.text == word.text) {
                        words.push(word);
                    }
                }
            }
        }

        let mut entries: Vec<DictEntry> = code_order
            .into_iter()
            .filter_map(|code| merged.remove(&code).map(|words| DictEntry { code, words }))
            .collect();

        entries.sort_by(|a, b| a.code.as_bytes().cmp(b.code.as_bytes()));

        Self::build_from_entries(entries).map(Some)
    }

    /// Predictive search: every word whose code starts with `code`.
    ///
    /// A text reachable through several codes appears once, with its highest
    /// weight. Results are ordered by weight (descending), then by code length,
    /// then by dictionary order.
    pub fn search(&self, code: &str) -> Vec<DictItem> {
        let query = normalize_code(code);
        if query.is_empty() {
            return Vec::new();
        }

        let start = self
            .entries
            .partition_point(|e| e.code.as_bytes() < query.as_bytes());

        let mut results: Vec<DictItem> = Vec::new();
        let mut by_text: HashMap<String, usize> = HashMap::new();
        for entry in self.entries[start..]
            .iter()
            .take_while(|e| e.code.starts_with(&query))
        {
            for item in entry.items() {
                match by_text.get(&item.text) {
                    Some(&slot) => {
                        if item.weight > results[slot].weight {
                            results[slot] = item;
                        }
                    }
                    None => {
                        by_text.insert(item.text.clone(), results.len());
                        results.push(item);
                    }
                }
            }
        }

        results.sort_by(|a, b| {
            b.weight
                .cmp(&a.weight)
                .then_with(|| a.code.len().cmp(&b.code.len()))
        });
        results
    }

    /// Exact match search: the words stored under exactly `code`.
    pub fn exact_match(&self, code: &str) -> Vec<DictItem> {
        let query = normalize_code(code);
        if query.is_empty() {
            return Vec::new();
        }
        self.trie
            .exact_match_search(query.as_bytes())
            .and_then(|value| self.entries.get(value as usize))
            .map(|entry| entry.items().collect())
            .unwrap_or_default()
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of words across all codes.
    pub fn word_count(&self) -> usize {
        self.entries.iter().map(|e| e.words.len()).sum()
    }

    /// Write all words in the dictionary to `writer` (for inspection/debugging).
    ///
    /// Each line is tab-separated: `text\tcode\tweight\tcomment`.
    /// Returns the total number of words written.
    pub fn dump_all(&self, writer: &mut dyn Write) -> std::io::Result<usize> {
        let mut count = 0;
        for entry in &self.entries {
            for word in &entry.words {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    word.text,
                    entry.code,
                    word.weight,
                    word.comment.as_deref().unwrap_or("")
                )?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Search words by text (substring match).
    pub fn search_by_text(&self, query: &str) -> Vec<DictItem> {
        self.entries
            .iter()
            .flat_map(|e| e.items())
            .filter(|item| item.text.contains(query))
            .collect()
    }
}

fn write_str(w: &mut impl Write, s: &str) -> Result<()> {
    let len = u16::try_from(s.len())
        .map_err(|_| DictError::Format(format!("string too long: {} bytes", s.len())))?;
    w.write_all(&len.to_le_bytes())?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn read_u16(r: &mut impl Read) -> Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32(r: &mut impl Read) -> Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_string(r: &mut impl Read, what: &str) -> Result<String> {
    let len = read_u16(r)? as usize;
    let mut bytes = vec![0u8; len];
    r.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| DictError::Format(format!("invalid UTF-8 in {what}: {e}")))
}
