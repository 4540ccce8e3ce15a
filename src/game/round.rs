//! Round state machine.
//!
//! A round owns one secret word, a small pool of hint prompts sampled from the catalog,
//! and the conversation sent to the text generator. It ends when the word is guessed or
//! when the clue counter passes [`MAX_CLUES`]. Once finished nothing mutates it again.
//!
//! Generator calls are not made here: the round prepares the conversation and the
//! engine feeds replies back through [`RoundState::push_reply`].

use rand::seq::index::sample;
use rand::Rng;
use serde::Serialize;

use super::catalog::WordEntry;
use super::difficulty::{Difficulty, MAX_CLUES};
use crate::generator::ChatMessage;

const MIN_HINTS: usize = 2;
const MAX_HINTS: usize = 3;

#[derive(Debug, Clone)]
pub struct RoundState {
    secret_word: String,
    /// Session level the round was started at; drives the opening prompt and the score.
    level: u8,
    selected_hints: Vec<String>,
    hint_cursor: usize,
    clue_count: u32,
    guess_count: u32,
    finished: bool,
    conversation: Vec<ChatMessage>,
}

/// What [`RoundState::request_clue`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClueRequest {
    /// The round was already over; nothing changed.
    AlreadyFinished,
    /// The clue budget just ran out; the round is now finished.
    Exhausted,
    /// A user turn was appended and the conversation is ready for the generator.
    Ready {
        question: u32,
        difficulty: Difficulty,
    },
}

/// Statistics for a round that was just won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundWin {
    pub word: String,
    pub level: u8,
    pub guesses: u32,
    pub hints: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessVerdict {
    AlreadyFinished,
    Correct(RoundWin),
    Incorrect,
}

impl RoundState {
    /// Start a round for `entry` at session `level`.
    ///
    /// Samples two or three of the word's hint prompts (never more than it has) and keeps
    /// them in catalog order. The conversation opens with the level's instruction and a
    /// user turn naming the word; the caller generates clue 1 from it.
    pub fn begin<R: Rng>(entry: &WordEntry, level: u8, rng: &mut R) -> Self {
        let selected_hints = sample_hints(&entry.hints, rng);
        let conversation = vec![
            ChatMessage::system(Difficulty::for_level(level).system_prompt()),
            ChatMessage::user(format!("Word: {}", entry.word)),
        ];
        RoundState {
            secret_word: entry.word.clone(),
            level,
            selected_hints,
            hint_cursor: 0,
            clue_count: 1,
            guess_count: 0,
            finished: false,
            conversation,
        }
    }

    /// Advance to the next clue turn.
    ///
    /// Swaps the leading system instruction for the new clue count's tier and appends a
    /// user turn: the next unused hint prompt if any remain, else a generic request.
    pub fn request_clue(&mut self) -> ClueRequest {
        if self.finished {
            return ClueRequest::AlreadyFinished;
        }
        self.clue_count += 1;
        if self.clue_count > MAX_CLUES {
            self.finished = true;
            return ClueRequest::Exhausted;
        }

        let difficulty = Difficulty::for_clue(self.clue_count);
        let system = ChatMessage::system(difficulty.system_prompt());
        match self.conversation.first_mut() {
            Some(first) => *first = system,
            None => self.conversation.push(system),
        }

        let instruction = match self.selected_hints.get(self.hint_cursor) {
            Some(hint) => {
                self.hint_cursor += 1;
                format!("Answer this hint indirectly: {}", hint)
            }
            None => "Give another indirect clue. Do not repeat previous clues.".to_string(),
        };
        self.conversation.push(ChatMessage::user(instruction));

        ClueRequest::Ready {
            question: self.clue_count,
            difficulty,
        }
    }

    /// Record the generator's reply as an assistant turn.
    pub fn push_reply(&mut self, reply: &str) {
        self.conversation.push(ChatMessage::assistant(reply));
    }

    /// Compare a guess against the secret word, ignoring surrounding whitespace and case.
    pub fn evaluate_guess(&mut self, guess: &str) -> GuessVerdict {
        if self.finished {
            return GuessVerdict::AlreadyFinished;
        }
        self.guess_count += 1;
        if normalize(guess) != normalize(&self.secret_word) {
            return GuessVerdict::Incorrect;
        }
        self.finished = true;
        GuessVerdict::Correct(RoundWin {
            word: self.secret_word.clone(),
            level: self.level,
            guesses: self.guess_count,
            hints: self.clue_count,
        })
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn selected_hints(&self) -> &[String] {
        &self.selected_hints
    }

    pub fn hint_cursor(&self) -> usize {
        self.hint_cursor
    }

    pub fn clue_count(&self) -> u32 {
        self.clue_count
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn conversation(&self) -> &[ChatMessage] {
        &self.conversation
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn sample_hints<R: Rng>(hints: &[String], rng: &mut R) -> Vec<String> {
    let wanted = rng.gen_range(MIN_HINTS..=MAX_HINTS).min(hints.len());
    let mut picked = sample(rng, hints.len(), wanted).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| hints[i].clone()).collect()
}
