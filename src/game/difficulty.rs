//! Difficulty tiers.
//!
//! Two signals share this table and are driven independently:
//! - the session level (1..=3) picks the instruction template that opens a round
//! - the clue count (1..=10) picks the label reported alongside each clue
//!
//! Clue counts map to tiers as 1-4 easy, 5-8 medium, 9-10 hard.

use serde::{Deserialize, Serialize};

/// Highest session level; winning a round here completes the session.
pub const MAX_LEVEL: u8 = 3;
/// Clue turns available per round before it ends unsolved.
pub const MAX_CLUES: u32 = 10;

const EASY_PROMPT: &str = "\
You are a friendly forest sprite.
Describe the word using clear metaphors and familiar clues.
Be whimsical and helpful.
Never say the word itself.
Max 3 sentences.
";

const MEDIUM_PROMPT: &str = "\
You are an abstract philosopher.
Describe the word's essence rather than its function.
Avoid shape, color, or direct usage.
Never say the word itself.
Max 3 sentences.
";

const HARD_PROMPT: &str = "\
You describe the given word as an abstract, indirect riddle.

Rules:
\u{2022}  Never say the word itself
\u{2022}  Never define it
\u{2022}  Avoid common associations
\u{2022}  Speak through absence, consequence, or implication
\u{2022}  Write as if hiding the answer from an intelligent adversary
\u{2022}  Use at most 2 sentences
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tier for a session level. Out-of-range levels clamp into 1..=3.
    pub fn for_level(level: u8) -> Self {
        match level.clamp(1, MAX_LEVEL) {
            1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// Tier for the n-th clue of a round.
    pub fn for_clue(clue_count: u32) -> Self {
        match clue_count {
            0..=4 => Difficulty::Easy,
            5..=8 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// System instruction handed to the text generator for this tier.
    pub fn system_prompt(self) -> &'static str {
        match self {
            Difficulty::Easy => EASY_PROMPT,
            Difficulty::Medium => MEDIUM_PROMPT,
            Difficulty::Hard => HARD_PROMPT,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Flat award for winning a round at `level`: 50 / 75 / 100.
///
/// Extra clues and wrong guesses cost nothing.
pub fn score_for_level(level: u8) -> u32 {
    match Difficulty::for_level(level) {
        Difficulty::Easy => 50,
        Difficulty::Medium => 75,
        Difficulty::Hard => 100,
    }
}
