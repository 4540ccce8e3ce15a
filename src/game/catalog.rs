//! Word catalog: secret words and the hint prompts used to steer clue generation.
//!
//! The built-in table is compiled in. A replacement catalog may be supplied as JSON:
//!
//! ```json
//! [{"word": "Moth", "hints": ["Describe its relationship with light."]}]
//! ```
//!
//! Catalogs are immutable once built.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Moth",
        &[
            "Describe its relationship with light.",
            "Describe what happens when it appears uninvited.",
            "Describe how it behaves without intention.",
            "Describe the kind of places it is drawn to.",
            "Describe what it ignores while pursuing something else.",
        ],
    ),
    (
        "Penguin",
        &[
            "Describe how it moves compared to its environment.",
            "Describe its relationship with temperature.",
            "Describe how it survives without flight.",
            "Describe its social behavior.",
            "Describe how it navigates land versus elsewhere.",
        ],
    ),
    (
        "Parabola",
        &[
            "Describe its role in motion.",
            "Describe where it naturally appears.",
            "Describe how it balances symmetry and change.",
            "Describe what happens at its most extreme point.",
            "Describe how it redirects paths.",
        ],
    ),
    (
        "Afghanistan",
        &[
            "Describe its geography through resistance.",
            "Describe the Taliban rule there",
            "Describe how outsiders interact with it.",
            "Describe its oppression of woman.",
            "Describe its relationship with borders.",
        ],
    ),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no words")]
    Empty,

    #[error("catalog entry #{index} has a blank word")]
    BlankWord { index: usize },

    #[error("word '{word}' appears more than once")]
    DuplicateWord { word: String },

    #[error("word '{word}' has no hint prompts")]
    NoHints { word: String },

    #[error("word '{word}' has a blank hint prompt at #{index}")]
    BlankHint { word: String, index: usize },

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<WordEntry>,
}

impl Catalog {
    /// The compiled-in word table.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(word, hints)| WordEntry {
                word: (*word).to_string(),
                hints: hints.iter().map(|h| (*h).to_string()).collect(),
            })
            .collect();
        Catalog { entries }
    }

    /// Build a catalog after checking that words are present, non-blank and unique
    /// (ignoring case, since guesses are compared case-insensitively) and that every
    /// word carries at least one hint, none of them blank. Words and hints are stored
    /// trimmed.
    pub fn new(mut entries: Vec<WordEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.word = entry.word.trim().to_string();
            if entry.word.is_empty() {
                return Err(CatalogError::BlankWord { index });
            }
            if !seen.insert(entry.word.to_lowercase()) {
                return Err(CatalogError::DuplicateWord {
                    word: entry.word.clone(),
                });
            }
            if entry.hints.is_empty() {
                return Err(CatalogError::NoHints {
                    word: entry.word.clone(),
                });
            }
            for (hint_index, hint) in entry.hints.iter_mut().enumerate() {
                *hint = hint.trim().to_string();
                if hint.is_empty() {
                    return Err(CatalogError::BlankHint {
                        word: entry.word.clone(),
                        index: hint_index,
                    });
                }
            }
        }
        Ok(Catalog { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<WordEntry> = serde_json::from_str(json)?;
        Catalog::new(entries)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Catalog::from_json(&content)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.word == word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}
