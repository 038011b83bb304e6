//! # fallacy_drill
//!
//! A fully offline, deterministic engine for a logical-fallacy
//! identification quiz.
//!
//! The engine loads two JSON datasets — fallacy definitions and
//! propositions (statements to classify as sound or fallacious) — validates
//! their structural and referential integrity, and drives two practice
//! modes on top of an anti-repetition selection policy.
//!
//! ## How it works
//!
//! 1. Build a [`Dataset`] from the two JSON documents. Schema defects are
//!    fatal; referential defects are counted and logged but leave the
//!    dataset usable.
//! 2. For free practice, create an [`ArenaSession`] and call `next()` per
//!    "give me another one" signal — immediate feedback via [`grade`], no
//!    aggregate score.
//! 3. For a scored run, call [`GauntletSession::start`] with a seed string.
//!    The full 10-item sequence is materialized up front, so the same seed
//!    always yields the same quiz. Submit answers in order, then
//!    [`GauntletSession::finalize`] — 80% or better writes the unlock flag
//!    through an [`UnlockStore`].
//!
//! ## Key features
//!
//! - **Deterministic**: the gauntlet runs on Mulberry32, a generator whose
//!   output stream is identical for a given seed on every platform. Seed
//!   `"abc"` produces the same 10 items today, tomorrow, and in any other
//!   implementation of the same construction.
//! - **Anti-repetition**: the selection policy never repeats the previous
//!   item and rotates away from a fallacy after three consecutive picks,
//!   falling back to the full pool when it is too small to filter.
//! - **Content diagnostics**: [`Dataset::validate`] reports unknown or
//!   deprecated fallacy references, duplicate ids, alias collisions, and a
//!   sound/fallacious ratio outside the expected band — all soft, all
//!   logged for content maintainers.
//!
//! ## Quick start
//!
//! ```rust
//! use fallacy_drill::{Dataset, GauntletSession, Label, MemoryUnlockStore};
//!
//! let fallacies = r#"[{"id": "fal_strawman", "name": "Strawman",
//!     "difficulty": "beginner", "definition": "Misrepresenting an argument."}]"#;
//! let propositions = r#"[
//!     {"id": "prp_001", "text": "You want parks, so you hate business.",
//!      "isSound": false, "difficulty": "beginner",
//!      "explanation": "Distorts the claim.", "fallacyId": "fal_strawman"},
//!     {"id": "prp_002", "text": "All squares have four sides.",
//!      "isSound": true, "difficulty": "beginner",
//!      "explanation": "Definitionally true.", "fallacyId": null}
//! ]"#;
//!
//! let dataset = Dataset::from_json(fallacies, propositions)?;
//! let report = dataset.validate();
//! println!("{} defects, sound ratio {:.2}", report.error_count, report.sound_ratio);
//!
//! let mut session = GauntletSession::start("abc", dataset.propositions())?;
//! while let Some(item) = session.current() {
//!     println!("Q: {}", item.text);
//!     session.submit_answer(Some(Label::Sound)).unwrap();
//! }
//! let mut store = MemoryUnlockStore::new();
//! let outcome = session.finalize(&mut store).unwrap();
//! println!("accuracy: {}%", outcome.accuracy_percent);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod quiz_engine;

// Convenience re-exports so callers can use `fallacy_drill::Dataset`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    grade, parse_fallacies, parse_propositions, pick, simulate, AnswerRecord, ArenaSession,
    Dataset, Difficulty, EmptyPoolError, Fallacy, FallacyStatus, GauntletOutcome,
    GauntletSession, Label, MemoryUnlockStore, Mulberry32, Proposition, RandomSource,
    ReferentialWarning, RotationSummary, SchemaError, SelectionState, SessionError, UnlockStore,
    ValidationReport, GAUNTLET_LENGTH, UNLOCK_THRESHOLD,
};
