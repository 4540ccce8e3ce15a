//! # Game Core
//!
//! The guessing game: a catalog of secret words, a round state machine that escalates
//! clue difficulty, and a session tracker that climbs three levels.
//!
//! - [`catalog`] - word table and validation
//! - [`difficulty`] - tier table, instruction templates, scoring
//! - [`round`] - hint sampling, clue turns, guess evaluation
//! - [`session`] - level progression, history, used words
//! - [`engine`] - composes the above with a [`TextGenerator`](crate::generator::TextGenerator)
//!
//! ## Flow
//!
//! ```text
//! start ──► clue 1 ──► next ... next (≤10 clues) ──► exhausted
//!              │                 │
//!              └──── guess ──────┴──► correct ──► record win ──► level + 1 (max 3)
//! ```

pub mod catalog;
pub mod difficulty;
pub mod engine;
pub mod round;
pub mod session;

pub use catalog::{Catalog, CatalogError, WordEntry};
pub use difficulty::{score_for_level, Difficulty, MAX_CLUES, MAX_LEVEL};
pub use engine::{ClueOutcome, GameEngine, GuessOutcome, RoundSnapshot, RoundStart};
pub use round::RoundState;
pub use session::{RoundRecord, SessionState};
