//! Banglish normalization: whole-word replacement of romanized tokens with
//! their native-script form, plus a cheap "is this romanized?" heuristic.
//!
//! The table is an immutable value built once at startup and shared behind an
//! `Arc`; nothing here mutates after construction.
use regex::{NoExpand, Regex};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use bnrag_core::{Error, Result};

use crate::builtin::{BUILTIN_MAPPINGS, ROMANIZED_INDICATORS};

#[derive(Debug, Clone)]
struct Entry {
    romanized: String,
    native: String,
    pattern: Regex,
}

/// Ordered romanized → native mapping. Keys are lowercase whole words.
#[derive(Debug, Clone)]
pub struct TransliterationTable {
    entries: Vec<Entry>,
}

/// Collects mappings in insertion order. A repeated key keeps its first
/// position and takes the last value written.
#[derive(Debug, Default)]
pub struct TableBuilder {
    pairs: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableFile {
    Pairs(Vec<(String, String)>),
    Entries { entries: Vec<TableFileEntry> },
}

#[derive(Deserialize)]
struct TableFileEntry {
    romanized: String,
    native: String,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, romanized: &str, native: &str) -> &mut Self {
        let key = romanized.trim().to_lowercase();
        match self.positions.get(&key) {
            Some(&pos) => {
                if self.pairs[pos].1 != native {
                    tracing::warn!(key = %key, previous = %self.pairs[pos].1, replacement = %native, "duplicate transliteration key, last value wins");
                }
                self.pairs[pos].1 = native.to_string();
            }
            None => {
                self.positions.insert(key.clone(), self.pairs.len());
                self.pairs.push((key, native.to_string()));
            }
        }
        self
    }

    pub fn extend<'a, I>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (romanized, native) in pairs {
            self.insert(romanized, native);
        }
        self
    }

    /// Append the mappings stored in a JSON file: either `[["romanized", "native"], ...]`
    /// or `{"entries": [{"romanized": ..., "native": ...}]}`.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<&mut Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Io { path: path.display().to_string(), source })?;
        let file: TableFile =
            serde_json::from_str(&raw).map_err(|source| Error::Json { path: path.display().to_string(), source })?;
        let pairs = match file {
            TableFile::Pairs(pairs) => pairs,
            TableFile::Entries { entries } => entries.into_iter().map(|e| (e.romanized, e.native)).collect(),
        };
        tracing::info!(entries = pairs.len(), path = %path.display(), "loaded transliteration overrides");
        for (romanized, native) in &pairs {
            self.insert(romanized, native);
        }
        Ok(self)
    }

    pub fn build(self) -> Result<TransliterationTable> {
        let mut entries = Vec::with_capacity(self.pairs.len());
        for (romanized, native) in self.pairs {
            if romanized.is_empty() || romanized.chars().any(char::is_whitespace) {
                return Err(Error::config(format!("transliteration key {romanized:?} must be a single word")));
            }
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&romanized)))
                .map_err(|e| Error::config(format!("transliteration key {romanized:?}: {e}")))?;
            entries.push(Entry { romanized, native, pattern });
        }
        Ok(TransliterationTable { entries })
    }
}

impl TransliterationTable {
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// The built-in word list shipped with the crate.
    pub fn builtin() -> Result<Self> {
        let mut builder = TableBuilder::new();
        builder.extend(BUILTIN_MAPPINGS.iter().copied());
        builder.build()
    }

    /// Built-in list extended (and overridden) by an optional JSON file.
    pub fn load(overrides: Option<&Path>) -> Result<Self> {
        let mut builder = TableBuilder::new();
        builder.extend(BUILTIN_MAPPINGS.iter().copied());
        if let Some(path) = overrides {
            builder.extend_from_file(path)?;
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, romanized: &str) -> Option<&str> {
        self.entries.iter().find(|e| e.romanized == romanized).map(|e| e.native.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|e| (e.romanized.as_str(), e.native.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    table: Arc<TransliterationTable>,
    indicators: Vec<String>,
}

impl Normalizer {
    pub fn new(table: Arc<TransliterationTable>) -> Self {
        Self { table, indicators: ROMANIZED_INDICATORS.iter().map(|w| (*w).to_string()).collect() }
    }

    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Arc::new(TransliterationTable::builtin()?)))
    }

    pub fn table(&self) -> &TransliterationTable {
        &self.table
    }

    /// Lower-case `text`, then rewrite each whole-word table key in table order.
    pub fn normalize(&self, text: &str) -> String {
        let mut out = text.to_lowercase();
        for entry in &self.table.entries {
            if !out.contains(entry.romanized.as_str()) {
                continue;
            }
            if let Cow::Owned(replaced) = entry.pattern.replace_all(&out, NoExpand(&entry.native)) {
                out = replaced;
            }
        }
        out
    }

    /// Substring heuristic: any indicator word anywhere in the lower-cased text.
    /// English words such as "ache" or "age" trip it too.
    pub fn is_romanized(&self, text: &str) -> bool {
        self.indicator_count(text) >= 1
    }

    pub fn indicator_count(&self, text: &str) -> usize {
        let lower = text.to_lowercase();
        self.indicators.iter().filter(|w| lower.contains(w.as_str())).count()
    }
}
