//! Process-wide game counters, exposed through `GET /stats`.
//! Counters are monotonic for the life of the process; a session reset does not clear them.
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static ROUNDS_STARTED: AtomicU64 = AtomicU64::new(0);
static CLUES_SERVED: AtomicU64 = AtomicU64::new(0);
static GUESSES: AtomicU64 = AtomicU64::new(0);
static WINS: AtomicU64 = AtomicU64::new(0);
static SESSIONS_COMPLETED: AtomicU64 = AtomicU64::new(0);
static POOL_REFILLS: AtomicU64 = AtomicU64::new(0);
static GENERATOR_FAILURES: AtomicU64 = AtomicU64::new(0);
static GENERATION_LATENCY_SUM_MS: AtomicU64 = AtomicU64::new(0);
static GENERATION_LATENCY_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn inc_rounds_started() {
    ROUNDS_STARTED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_clues_served() {
    CLUES_SERVED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_guesses() {
    GUESSES.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_wins() {
    WINS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_sessions_completed() {
    SESSIONS_COMPLETED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_pool_refills() {
    POOL_REFILLS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_generator_failures() {
    GENERATOR_FAILURES.fetch_add(1, Ordering::Relaxed);
}
pub fn observe_generation_latency(started: Instant) {
    let ms = started.elapsed().as_millis() as u64;
    GENERATION_LATENCY_SUM_MS.fetch_add(ms, Ordering::Relaxed);
    GENERATION_LATENCY_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Snapshot {
    pub rounds_started: u64,
    pub clues_served: u64,
    pub guesses: u64,
    pub wins: u64,
    pub sessions_completed: u64,
    pub pool_refills: u64,
    pub generator_failures: u64,
    pub generation_latency_avg_ms: Option<u64>,
}

pub fn snapshot() -> Snapshot {
    let sum = GENERATION_LATENCY_SUM_MS.load(Ordering::Relaxed);
    let count = GENERATION_LATENCY_COUNT.load(Ordering::Relaxed);
    Snapshot {
        rounds_started: ROUNDS_STARTED.load(Ordering::Relaxed),
        clues_served: CLUES_SERVED.load(Ordering::Relaxed),
        guesses: GUESSES.load(Ordering::Relaxed),
        wins: WINS.load(Ordering::Relaxed),
        sessions_completed: SESSIONS_COMPLETED.load(Ordering::Relaxed),
        pool_refills: POOL_REFILLS.load(Ordering::Relaxed),
        generator_failures: GENERATOR_FAILURES.load(Ordering::Relaxed),
        generation_latency_avg_ms: if count > 0 { Some(sum / count) } else { None },
    }
}
