//! Error taxonomy for the quiz engine.
//!
//! Three severities, matching how the loaders treat the data:
//!
//! - [`SchemaError`] — fatal at load. A malformed dataset aborts
//!   initialization; no session may start on top of it.
//! - [`ReferentialWarning`] — soft finding from post-load cross-checks.
//!   Counted and logged for content maintainers, never blocks a session.
//! - [`EmptyPoolError`] / [`SessionError`] — runtime misuse of the
//!   selection policy or the gauntlet state machine.

use thiserror::Error;

/// Fatal dataset defect detected while parsing a collection.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{collection} must be a JSON array")]
    NotAnArray { collection: &'static str },

    #[error("missing required field `{field}` on {record}")]
    MissingField { field: &'static str, record: String },

    #[error("field `{field}` on {record} must be {expected}")]
    WrongType {
        field: &'static str,
        record: String,
        expected: &'static str,
    },

    #[error("bad id: {0}")]
    BadIdentifier(String),

    #[error("bad difficulty `{difficulty}` on {id}")]
    BadDifficulty { id: String, difficulty: String },

    #[error("bad status `{status}` on {id}")]
    BadStatus { id: String, status: String },

    #[error("sound item must have fallacyId=null ({0})")]
    SoundWithReference(String),

    #[error("fallacious item must set fallacyId ({0})")]
    MissingReference(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Soft cross-referential finding. These indicate content-authoring defects
/// but leave the dataset usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReferentialWarning {
    #[error("bad id: {0}")]
    BadId(String),

    #[error("sound proposition {0} must have a null fallacy reference")]
    SoundWithReference(String),

    #[error("fallacious proposition {0} has no fallacy reference")]
    MissingReference(String),

    #[error("proposition {id} references unknown fallacy {fallacy}")]
    UnknownReference { id: String, fallacy: String },

    #[error("proposition {id} references deprecated fallacy {fallacy}")]
    DeprecatedReference { id: String, fallacy: String },

    #[error("duplicate proposition id {0}")]
    DuplicateId(String),

    #[error("duplicate fallacy id {0}")]
    DuplicateFallacyId(String),

    #[error("alias `{alias}` already maps to {kept}; mapping to {ignored} ignored")]
    AliasCollision {
        alias: String,
        kept: String,
        ignored: String,
    },

    #[error("sound ratio {ratio:.2} outside expected band [0.15, 0.35]")]
    RatioOutOfBand { ratio: f64 },
}

impl ReferentialWarning {
    /// Whether this finding counts toward the validation error total.
    /// Ratio drift and alias collisions are advisory only.
    pub fn counts_as_error(&self) -> bool {
        !matches!(
            self,
            ReferentialWarning::RatioOutOfBand { .. }
                | ReferentialWarning::AliasCollision { .. }
        )
    }
}

/// Selection over a zero-length pool is undefined; fail explicitly instead
/// of indexing out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot select from an empty proposition pool")]
pub struct EmptyPoolError;

/// Misuse of the gauntlet state machine.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("answer submitted after the gauntlet was completed")]
    AlreadyCompleted,

    #[error("gauntlet still in progress ({answered}/{total} answered)")]
    NotFinished { answered: usize, total: usize },

    #[error(transparent)]
    EmptyPool(#[from] EmptyPoolError),
}
