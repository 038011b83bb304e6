//! Core quiz engine — dataset validation, deterministic selection, and
//! session orchestration.
//!
//! ## Module overview
//!
//! | Module     | Purpose |
//! |------------|---------|
//! | `models`   | All shared types: fallacies, propositions, labels, answer records |
//! | `error`    | Error taxonomy: fatal schema errors, soft referential warnings, session misuse |
//! | `dataset`  | JSON parsing, schema checks, cross-validation, and the indexed `Dataset` handle |
//! | `rng`      | Mulberry32 deterministic generator and the `RandomSource` seam |
//! | `rotation` | Anti-repeat selection policy over a rolling `SelectionState` |
//! | `session`  | `ArenaSession` (free practice) and `GauntletSession` (graded run) |

pub mod dataset;
pub mod error;
pub mod models;
pub mod rng;
pub mod rotation;
pub mod session;

// Re-export the public API surface so callers can use
// `quiz_engine::Dataset` without reaching into sub-modules.
pub use dataset::{parse_fallacies, parse_propositions, Dataset, ValidationReport};
pub use error::{EmptyPoolError, ReferentialWarning, SchemaError, SessionError};
pub use models::{AnswerRecord, Difficulty, Fallacy, FallacyStatus, Label, Proposition};
pub use rng::{Mulberry32, RandomSource};
pub use rotation::{pick, simulate, RotationSummary, SelectionState};
pub use session::{
    grade, ArenaSession, GauntletOutcome, GauntletSession, MemoryUnlockStore, UnlockStore,
    GAUNTLET_LENGTH, UNLOCK_THRESHOLD,
};
