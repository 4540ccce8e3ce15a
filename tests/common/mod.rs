//! Shared fixtures for integration tests.
#![allow(dead_code)]

use riddlebox::game::{Catalog, GameEngine, WordEntry};
use riddlebox::generator::ScriptedGenerator;

pub const SEED: u64 = 42;

/// Engine over the built-in catalog with a scripted generator and fixed seed.
/// The returned generator shares its call counter with the one inside the engine.
pub fn scripted_engine() -> (GameEngine<ScriptedGenerator>, ScriptedGenerator) {
    engine_with(Catalog::builtin())
}

pub fn engine_with(catalog: Catalog) -> (GameEngine<ScriptedGenerator>, ScriptedGenerator) {
    let generator = ScriptedGenerator::default();
    let handle = generator.clone();
    (GameEngine::new(catalog, generator, Some(SEED)), handle)
}

/// Small catalog whose words are easy to type in tests.
pub fn tiny_catalog(words: &[&str]) -> Catalog {
    let entries = words
        .iter()
        .map(|w| WordEntry {
            word: (*w).to_string(),
            hints: vec![
                format!("Describe where {} lives.", w),
                format!("Describe what {} eats.", w),
                format!("Describe how {} sounds.", w),
            ],
        })
        .collect();
    Catalog::new(entries).expect("valid catalog")
}

/// Guess the live word correctly.
pub fn win_round(engine: &mut GameEngine<ScriptedGenerator>) -> riddlebox::game::GuessOutcome {
    let word = engine.secret_word().expect("round in progress").to_string();
    engine.guess(&word)
}
