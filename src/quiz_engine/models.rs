use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Content primitives
// ---------------------------------------------------------------------------

/// Difficulty tier shared by fallacies and propositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse the wire form (`"beginner"`, `"intermediate"`, `"advanced"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner"     => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced"     => Some(Difficulty::Advanced),
            _              => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner     => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced     => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a fallacy record. Deprecated fallacies stay browsable
/// but are no longer valid as proposition references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallacyStatus {
    #[default]
    Active,
    Deprecated,
}

impl FallacyStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active"     => Some(FallacyStatus::Active),
            "deprecated" => Some(FallacyStatus::Deprecated),
            _            => None,
        }
    }
}

impl fmt::Display for FallacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallacyStatus::Active     => write!(f, "active"),
            FallacyStatus::Deprecated => write!(f, "deprecated"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset records
// ---------------------------------------------------------------------------

/// A named category of flawed reasoning.
///
/// Identifiers follow the `fal_[a-z0-9_]+` pattern. `aliases` feed the
/// case-insensitive alias index alongside `name`; `confusable_with` lists
/// ids of fallacies learners commonly mix this one up with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallacy {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, rename = "confusableWith", skip_serializing_if = "Vec::is_empty")]
    pub confusable_with: Vec<String>,
    #[serde(default, rename = "rationaleTips", skip_serializing_if = "Vec::is_empty")]
    pub rationale_tips: Vec<String>,
    #[serde(default)]
    pub status: FallacyStatus,
}

impl Fallacy {
    pub fn is_deprecated(&self) -> bool {
        self.status == FallacyStatus::Deprecated
    }
}

/// A statement the learner classifies as sound or as exhibiting a fallacy.
///
/// Invariant (enforced at parse time): `is_sound == true` forces
/// `fallacy_id == None`, and `is_sound == false` forces `fallacy_id == Some`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposition {
    pub id: String,
    pub text: String,
    #[serde(rename = "isSound")]
    pub is_sound: bool,
    pub difficulty: Difficulty,
    pub explanation: String,
    #[serde(rename = "fallacyId")]
    pub fallacy_id: Option<String>,
}

impl Proposition {
    /// The label a learner must submit to be graded correct.
    pub fn correct_label(&self) -> Label {
        match &self.fallacy_id {
            Some(id) => Label::Fallacy(id.clone()),
            None     => Label::Sound,
        }
    }
}

// ---------------------------------------------------------------------------
// Answer types
// ---------------------------------------------------------------------------

/// What a learner claims about a proposition: either "this is sound" or
/// "this exhibits fallacy X".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Sound,
    Fallacy(String),
}

impl Label {
    /// Build a label from a fallacy id string, with `"sound"` as the
    /// sentinel for the sound classification.
    pub fn parse(s: &str) -> Label {
        if s == "sound" {
            Label::Sound
        } else {
            Label::Fallacy(s.to_string())
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Sound       => write!(f, "sound"),
            Label::Fallacy(id) => write!(f, "{}", id),
        }
    }
}

/// One graded answer inside a gauntlet run. `submitted` is `None` when the
/// learner let the item pass without answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub proposition_id: String,
    pub submitted: Option<Label>,
    pub correct: Label,
    pub is_correct: bool,
}
