//! Practice-session orchestration.
//!
//! Two modes share the same selection mechanics:
//!
//! - [`ArenaSession`] — unbounded free practice. Each `next()` call draws
//!   one proposition from an entropy-seeded generator; grading gives
//!   immediate feedback with no aggregate score.
//! - [`GauntletSession`] — a graded run. The full 10-item sequence is
//!   materialized up front from the seed, before any answer is accepted,
//!   so the same seed always yields the same quiz. Answers are processed
//!   strictly in order; finalizing computes accuracy and, at 80% or above,
//!   writes the unlock flag through the [`UnlockStore`] seam.

use tracing::{debug, info};

use crate::quiz_engine::{
    error::{EmptyPoolError, SessionError},
    models::{AnswerRecord, Label, Proposition},
    rng::{Mulberry32, RandomSource},
    rotation::{pick, SelectionState},
};

/// Number of items in a graded run.
pub const GAUNTLET_LENGTH: usize = 10;

/// Accuracy percentage at or above which the unlock flag is written.
pub const UNLOCK_THRESHOLD: u32 = 80;

/// Grade one submission against a proposition. `None` means the learner
/// gave no answer, which is always incorrect.
pub fn grade(proposition: &Proposition, submitted: Option<Label>) -> AnswerRecord {
    let correct = proposition.correct_label();
    let is_correct = submitted.as_ref() == Some(&correct);
    AnswerRecord {
        proposition_id: proposition.id.clone(),
        submitted,
        correct,
        is_correct,
    }
}

// ---------------------------------------------------------------------------
// Unlock persistence seam
// ---------------------------------------------------------------------------

/// Persistence sink for the single unlock flag. Implementations must be
/// idempotent: setting the flag twice is the same as setting it once.
pub trait UnlockStore {
    fn set_unlocked(&mut self);
    fn is_unlocked(&self) -> bool;
}

/// In-memory store, for tests and for hosts that wire persistence
/// elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryUnlockStore {
    unlocked: bool,
}

impl MemoryUnlockStore {
    pub fn new() -> Self {
        MemoryUnlockStore::default()
    }
}

impl UnlockStore for MemoryUnlockStore {
    fn set_unlocked(&mut self) {
        self.unlocked = true;
    }

    fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

// ---------------------------------------------------------------------------
// Arena (free practice)
// ---------------------------------------------------------------------------

/// Unbounded practice stream. Owns its selection state and generator;
/// nothing is shared across sessions.
#[derive(Debug)]
pub struct ArenaSession<R: RandomSource = Mulberry32> {
    state: SelectionState,
    rng: R,
}

impl ArenaSession<Mulberry32> {
    /// Entropy-seeded arena — the normal, non-reproducible mode.
    pub fn new() -> Self {
        ArenaSession::with_source(Mulberry32::from_entropy())
    }
}

impl Default for ArenaSession<Mulberry32> {
    fn default() -> Self {
        ArenaSession::new()
    }
}

impl<R: RandomSource> ArenaSession<R> {
    /// Arena over an injected generator, for reproducible streams.
    pub fn with_source(rng: R) -> Self {
        ArenaSession {
            state: SelectionState::new(),
            rng,
        }
    }

    /// Draw the next proposition. Called once per "request next" signal
    /// from the host UI.
    pub fn next<'a>(
        &mut self,
        pool: &'a [Proposition],
    ) -> Result<&'a Proposition, EmptyPoolError> {
        pick(pool, &mut self.state, &mut self.rng)
    }
}

// ---------------------------------------------------------------------------
// Gauntlet (graded run)
// ---------------------------------------------------------------------------

/// Result of finalizing a gauntlet.
#[derive(Debug, Clone, PartialEq)]
pub struct GauntletOutcome {
    pub accuracy_percent: u32,
    pub records: Vec<AnswerRecord>,
    pub unlocked: bool,
}

/// A seed-reproducible 10-item graded run.
///
/// Construction *is* the `NotStarted → InProgress` transition: the sequence
/// is materialized inside [`GauntletSession::start`], so a session that
/// exists is always answerable or completed, never sequence-less.
#[derive(Debug, Clone)]
pub struct GauntletSession {
    sequence: Vec<Proposition>,
    answers: Vec<AnswerRecord>,
}

impl GauntletSession {
    /// Materialize the full sequence for `seed` over `pool`.
    ///
    /// The same seed over the same pool always yields the same ordered
    /// sequence. An empty seed falls back to entropy (a valid but
    /// non-reproducible run).
    pub fn start(seed: &str, pool: &[Proposition]) -> Result<Self, EmptyPoolError> {
        let mut rng = Mulberry32::seed_from_str(seed);
        let mut state = SelectionState::new();
        let mut sequence = Vec::with_capacity(GAUNTLET_LENGTH);
        for _ in 0..GAUNTLET_LENGTH {
            sequence.push(pick(pool, &mut state, &mut rng)?.clone());
        }
        debug!(items = sequence.len(), "gauntlet sequence materialized");
        Ok(GauntletSession {
            sequence,
            answers: Vec::with_capacity(GAUNTLET_LENGTH),
        })
    }

    /// The immutable 10-item sequence for this run.
    pub fn sequence(&self) -> &[Proposition] {
        &self.sequence
    }

    /// Zero-based index of the next item awaiting an answer.
    pub fn position(&self) -> usize {
        self.answers.len()
    }

    /// The item currently awaiting an answer, or `None` once completed.
    pub fn current(&self) -> Option<&Proposition> {
        self.sequence.get(self.position())
    }

    pub fn is_completed(&self) -> bool {
        self.answers.len() == GAUNTLET_LENGTH
    }

    /// Grade `submitted` against the current item and advance. Lock-step:
    /// items cannot be skipped or answered out of order.
    pub fn submit_answer(
        &mut self,
        submitted: Option<Label>,
    ) -> Result<&AnswerRecord, SessionError> {
        let Some(current) = self.current() else {
            return Err(SessionError::AlreadyCompleted);
        };
        let record = grade(current, submitted);
        self.answers.push(record);
        Ok(self.answers.last().expect("answer just pushed"))
    }

    /// Compute the aggregate outcome. Only valid once all items are
    /// answered. Writes the unlock flag when accuracy reaches the
    /// threshold; the store contract makes repeated writes harmless.
    pub fn finalize(&self, store: &mut dyn UnlockStore) -> Result<GauntletOutcome, SessionError> {
        if !self.is_completed() {
            return Err(SessionError::NotFinished {
                answered: self.answers.len(),
                total: GAUNTLET_LENGTH,
            });
        }
        let correct = self.answers.iter().filter(|r| r.is_correct).count();
        let accuracy_percent =
            (100.0 * correct as f64 / GAUNTLET_LENGTH as f64).round() as u32;
        let unlocked = accuracy_percent >= UNLOCK_THRESHOLD;
        if unlocked {
            store.set_unlocked();
        }
        info!(accuracy_percent, unlocked, "gauntlet finalized");
        Ok(GauntletOutcome {
            accuracy_percent,
            records: self.answers.clone(),
            unlocked,
        })
    }
}
