//! Session tracking across rounds.
//!
//! A session is up to three won rounds, one per level. Each win appends a
//! [`RoundRecord`] and raises the level until level 3 is won, at which point the
//! session reports itself complete. Only an explicit [`SessionState::reset`] starts
//! over; the used-word set refills on its own when every word has been drawn.

use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;

use super::catalog::{Catalog, WordEntry};
use super::difficulty::{score_for_level, Difficulty, MAX_LEVEL};
use super::round::RoundWin;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub level: u8,
    pub difficulty: Difficulty,
    pub word: String,
    pub guesses: u32,
    pub hints: u32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    level: u8,
    used_words: BTreeSet<String>,
    history: Vec<RoundRecord>,
    complete: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            level: 1,
            used_words: BTreeSet::new(),
            history: Vec::new(),
            complete: false,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a word nobody has seen this session and mark it used.
    ///
    /// When every catalog word has been used the set is refilled first; the returned
    /// flag reports that refill. Catalogs are never empty, so a word is always drawn.
    pub fn draw_word<'c, R: Rng>(
        &mut self,
        catalog: &'c Catalog,
        rng: &mut R,
    ) -> (&'c WordEntry, bool) {
        let mut candidates: Vec<&WordEntry> = self.unused(catalog);
        let refilled = candidates.is_empty();
        if refilled {
            self.refill_used_words();
            candidates = catalog.entries().iter().collect();
        }
        let entry = candidates[rng.gen_range(0..candidates.len())];
        self.used_words.insert(entry.word.clone());
        (entry, refilled)
    }

    fn unused<'c>(&self, catalog: &'c Catalog) -> Vec<&'c WordEntry> {
        catalog
            .entries()
            .iter()
            .filter(|e| !self.used_words.contains(&e.word))
            .collect()
    }

    /// Append the won round to history and move to the next level.
    ///
    /// Returns the appended record and whether the win completed the session, which
    /// happens when it came at level 3.
    pub fn record_win(&mut self, win: &RoundWin) -> (RoundRecord, bool) {
        let level = win.level.clamp(1, MAX_LEVEL);
        let record = RoundRecord {
            level,
            difficulty: Difficulty::for_level(level),
            word: win.word.clone(),
            guesses: win.guesses,
            hints: win.hints,
            score: score_for_level(level),
        };
        self.history.push(record.clone());
        if self.level >= MAX_LEVEL {
            self.complete = true;
        } else {
            self.level += 1;
        }
        (record, self.complete)
    }

    pub fn reset(&mut self) {
        *self = SessionState::default();
    }

    pub fn refill_used_words(&mut self) {
        self.used_words.clear();
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn used_words(&self) -> &BTreeSet<String> {
        &self.used_words
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn total_score(&self) -> u32 {
        self.history.iter().map(|r| r.score).sum()
    }
}
