//! Game engine: one session, at most one live round, one text generator.
//!
//! Every operation takes `&mut self` and runs to completion, generator call included,
//! so a caller that serializes access (the listener wraps the engine in a
//! `tokio::sync::Mutex`) never observes a half-applied update.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Instant;

use super::catalog::Catalog;
use super::difficulty::Difficulty;
use super::round::{ClueRequest, GuessVerdict, RoundState};
use super::session::{RoundRecord, SessionState};
use crate::generator::TextGenerator;
use crate::logutil::escape_log;
use crate::metrics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundStart {
    pub question: u32,
    /// Tier of the session level, which picked the opening instruction.
    pub difficulty: Difficulty,
    pub level: u8,
    pub text: String,
    /// The used-word set ran dry and was refilled before this draw.
    pub refilled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClueOutcome {
    NotStarted,
    AlreadyFinished,
    Exhausted,
    Clue {
        question: u32,
        /// Tier of the clue count, independent of the session level.
        difficulty: Difficulty,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    NotStarted,
    AlreadyFinished,
    Incorrect,
    Correct {
        word: String,
        stats: RoundRecord,
        session_complete: bool,
        history: Vec<RoundRecord>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSnapshot {
    pub question: u32,
    pub finished: bool,
}

pub struct GameEngine<G> {
    catalog: Catalog,
    session: SessionState,
    round: Option<RoundState>,
    rng: StdRng,
    generator: G,
}

impl<G: TextGenerator> GameEngine<G> {
    pub fn new(catalog: Catalog, generator: G, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog,
            session: SessionState::new(),
            round: None,
            rng,
            generator,
        }
    }

    /// Start a new round at the current session level, replacing any previous round.
    ///
    /// With `reset` the session is cleared first. Generator trouble shows up as sentinel
    /// text in `RoundStart::text`; the round starts regardless.
    pub async fn start_round(&mut self, reset: bool) -> RoundStart {
        if reset {
            info!("Session reset requested");
            self.session.reset();
        }
        let level = self.session.level();
        let (entry, refilled) = self.session.draw_word(&self.catalog, &mut self.rng);
        if refilled {
            info!("All words used this session; word pool refilled");
            metrics::inc_pool_refills();
        }

        let mut round = RoundState::begin(entry, level, &mut self.rng);
        debug!(
            "Round started at level {} with {} hint prompts",
            level,
            round.selected_hints().len()
        );
        let started = Instant::now();
        let text = self.generator.generate(round.conversation()).await;
        metrics::observe_generation_latency(started);
        round.push_reply(&text);
        self.round = Some(round);
        metrics::inc_rounds_started();
        metrics::inc_clues_served();

        RoundStart {
            question: 1,
            difficulty: Difficulty::for_level(level),
            level,
            text,
            refilled,
        }
    }

    pub async fn next_clue(&mut self) -> ClueOutcome {
        let Some(round) = self.round.as_mut() else {
            return ClueOutcome::NotStarted;
        };
        match round.request_clue() {
            ClueRequest::AlreadyFinished => ClueOutcome::AlreadyFinished,
            ClueRequest::Exhausted => {
                info!(
                    "Clues exhausted after {} guesses; round over",
                    round.guess_count()
                );
                ClueOutcome::Exhausted
            }
            ClueRequest::Ready {
                question,
                difficulty,
            } => {
                let started = Instant::now();
                let text = self.generator.generate(round.conversation()).await;
                metrics::observe_generation_latency(started);
                round.push_reply(&text);
                metrics::inc_clues_served();
                ClueOutcome::Clue {
                    question,
                    difficulty,
                    text,
                }
            }
        }
    }

    pub fn guess(&mut self, guess: &str) -> GuessOutcome {
        let Some(round) = self.round.as_mut() else {
            return GuessOutcome::NotStarted;
        };
        match round.evaluate_guess(guess) {
            GuessVerdict::AlreadyFinished => GuessOutcome::AlreadyFinished,
            GuessVerdict::Incorrect => {
                metrics::inc_guesses();
                debug!("Wrong guess: {}", escape_log(guess));
                GuessOutcome::Incorrect
            }
            GuessVerdict::Correct(win) => {
                metrics::inc_guesses();
                metrics::inc_wins();
                let (stats, session_complete) = self.session.record_win(&win);
                if session_complete {
                    metrics::inc_sessions_completed();
                }
                info!(
                    "Round won at level {} after {} guesses and {} clues (+{})",
                    stats.level, stats.guesses, stats.hints, stats.score
                );
                GuessOutcome::Correct {
                    word: win.word,
                    stats,
                    session_complete,
                    history: self.session.history().to_vec(),
                }
            }
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        match &self.round {
            Some(round) => RoundSnapshot {
                question: round.clue_count(),
                finished: round.is_finished(),
            },
            None => RoundSnapshot {
                question: 0,
                finished: false,
            },
        }
    }

    /// The live secret word. Debug surface only.
    pub fn secret_word(&self) -> Option<&str> {
        self.round.as_ref().map(|r| r.secret_word())
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}
