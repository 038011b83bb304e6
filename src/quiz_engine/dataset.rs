//! Dataset loading, validation, and indexing.
//!
//! Two layers, with deliberately different severities:
//!
//! 1. **Parse** (`parse_fallacies` / `parse_propositions`): field-by-field
//!    schema checks over raw JSON. Any defect here is a hard
//!    [`SchemaError`] — the app must show a load failure and refuse to
//!    start a session.
//! 2. **Cross-validation** ([`Dataset::validate`]): referential checks
//!    between the two collections. Findings are counted and logged but
//!    never fatal, so a partially broken dataset stays browsable.
//!
//! The [`Dataset`] handle owns both collections and their indexes. It is
//! constructed once at startup and passed by reference to every consumer —
//! there is no process-global cache.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::quiz_engine::{
    error::{ReferentialWarning, SchemaError},
    models::{Difficulty, Fallacy, FallacyStatus, Proposition},
};

static FALLACY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fal_[a-z0-9_]+$").expect("valid regex"));
static PROPOSITION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^prp_[a-z0-9_]+$").expect("valid regex"));

/// Expected band for the sound/fallacious proposition ratio.
const SOUND_RATIO_BAND: (f64, f64) = (0.15, 0.35);

// ---------------------------------------------------------------------------
// Raw JSON field access
// ---------------------------------------------------------------------------

/// Label a record for error messages: its `id` when present, otherwise the
/// whole record as compact JSON.
fn record_label(obj: &Value) -> String {
    match obj.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => obj.to_string(),
    }
}

fn require_str(obj: &Value, field: &'static str) -> Result<String, SchemaError> {
    match obj.get(field) {
        None => Err(SchemaError::MissingField {
            field,
            record: record_label(obj),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::WrongType {
            field,
            record: record_label(obj),
            expected: "a string",
        }),
    }
}

fn require_bool(obj: &Value, field: &'static str) -> Result<bool, SchemaError> {
    match obj.get(field) {
        None => Err(SchemaError::MissingField {
            field,
            record: record_label(obj),
        }),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(SchemaError::WrongType {
            field,
            record: record_label(obj),
            expected: "a boolean",
        }),
    }
}

/// Optional array-of-strings field. Absent and `null` both mean empty;
/// any other non-array shape is a schema defect.
fn optional_str_array(obj: &Value, field: &'static str) -> Result<Vec<String>, SchemaError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                _ => Err(SchemaError::WrongType {
                    field,
                    record: record_label(obj),
                    expected: "an array of strings",
                }),
            })
            .collect(),
        Some(_) => Err(SchemaError::WrongType {
            field,
            record: record_label(obj),
            expected: "an array",
        }),
    }
}

fn require_difficulty(obj: &Value, id: &str) -> Result<Difficulty, SchemaError> {
    let raw = require_str(obj, "difficulty")?;
    Difficulty::parse(&raw).ok_or_else(|| SchemaError::BadDifficulty {
        id: id.to_string(),
        difficulty: raw,
    })
}

// ---------------------------------------------------------------------------
// Parsing (hard failures)
// ---------------------------------------------------------------------------

/// Parse and schema-check the fallacy collection.
pub fn parse_fallacies(json: &str) -> Result<Vec<Fallacy>, SchemaError> {
    let data: Value = serde_json::from_str(json)?;
    let items = data.as_array().ok_or(SchemaError::NotAnArray {
        collection: "fallacies",
    })?;

    let mut out = Vec::with_capacity(items.len());
    for obj in items {
        let id = require_str(obj, "id")?;
        if !FALLACY_ID_RE.is_match(&id) {
            return Err(SchemaError::BadIdentifier(id));
        }
        let name = require_str(obj, "name")?;
        let difficulty = require_difficulty(obj, &id)?;
        let definition = require_str(obj, "definition")?;
        let aliases = optional_str_array(obj, "aliases")?;
        let confusable_with = optional_str_array(obj, "confusableWith")?;
        let rationale_tips = optional_str_array(obj, "rationaleTips")?;
        let status = match obj.get("status") {
            None | Some(Value::Null) => FallacyStatus::default(),
            Some(Value::String(s)) => {
                FallacyStatus::parse(s).ok_or_else(|| SchemaError::BadStatus {
                    id: id.clone(),
                    status: s.clone(),
                })?
            }
            Some(_) => {
                return Err(SchemaError::WrongType {
                    field: "status",
                    record: id,
                    expected: "a string",
                })
            }
        };

        out.push(Fallacy {
            id,
            name,
            difficulty,
            definition,
            aliases,
            confusable_with,
            rationale_tips,
            status,
        });
    }
    Ok(out)
}

/// Parse and schema-check the proposition collection.
///
/// The soundness/reference pairing is enforced here as a hard failure:
/// a sound proposition with a fallacy reference (or a fallacious one
/// without) cannot be graded meaningfully.
pub fn parse_propositions(json: &str) -> Result<Vec<Proposition>, SchemaError> {
    let data: Value = serde_json::from_str(json)?;
    let items = data.as_array().ok_or(SchemaError::NotAnArray {
        collection: "propositions",
    })?;

    let mut out = Vec::with_capacity(items.len());
    for obj in items {
        let id = require_str(obj, "id")?;
        if !PROPOSITION_ID_RE.is_match(&id) {
            return Err(SchemaError::BadIdentifier(id));
        }
        let text = require_str(obj, "text")?;
        let is_sound = require_bool(obj, "isSound")?;
        let difficulty = require_difficulty(obj, &id)?;
        let explanation = require_str(obj, "explanation")?;
        let fallacy_id = match obj.get("fallacyId") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(SchemaError::WrongType {
                    field: "fallacyId",
                    record: id,
                    expected: "a string or null",
                })
            }
        };

        if is_sound && fallacy_id.is_some() {
            return Err(SchemaError::SoundWithReference(id));
        }
        if !is_sound && fallacy_id.is_none() {
            return Err(SchemaError::MissingReference(id));
        }

        out.push(Proposition {
            id,
            text,
            is_sound,
            difficulty,
            explanation,
            fallacy_id,
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Validation report
// ---------------------------------------------------------------------------

/// Outcome of [`Dataset::validate`]. `error_count` covers the findings that
/// indicate real content defects; advisory findings (ratio drift, alias
/// collisions) appear in `warnings` without being counted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub error_count: usize,
    pub sound_ratio: f64,
    pub warnings: Vec<ReferentialWarning>,
}

// ---------------------------------------------------------------------------
// Dataset handle
// ---------------------------------------------------------------------------

/// Immutable, indexed view over both collections. Built once, shared by
/// reference; safe for unlimited concurrent reads.
#[derive(Debug, Clone)]
pub struct Dataset {
    fallacies: Vec<Fallacy>,
    propositions: Vec<Proposition>,
    fallacies_by_id: HashMap<String, usize>,
    alias_index: HashMap<String, String>,
    index_warnings: Vec<ReferentialWarning>,
}

impl Dataset {
    /// Build the indexed view from already-parsed collections.
    ///
    /// The alias index is seeded from each fallacy's name plus all aliases,
    /// trimmed and lowercased. First writer wins on collision; a collision
    /// that would re-point an alias at a different fallacy is kept as a
    /// soft warning rather than silently dropped.
    pub fn new(fallacies: Vec<Fallacy>, propositions: Vec<Proposition>) -> Self {
        let mut fallacies_by_id: HashMap<String, usize> = HashMap::new();
        let mut alias_index: HashMap<String, String> = HashMap::new();
        let mut index_warnings = Vec::new();

        for (i, f) in fallacies.iter().enumerate() {
            if fallacies_by_id.contains_key(&f.id) {
                index_warnings.push(ReferentialWarning::DuplicateFallacyId(f.id.clone()));
                continue;
            }
            fallacies_by_id.insert(f.id.clone(), i);
        }

        for f in &fallacies {
            for raw in std::iter::once(&f.name).chain(f.aliases.iter()) {
                let key = raw.trim().to_lowercase();
                if key.is_empty() {
                    continue;
                }
                match alias_index.get(&key) {
                    None => {
                        alias_index.insert(key, f.id.clone());
                    }
                    Some(kept) if kept != &f.id => {
                        index_warnings.push(ReferentialWarning::AliasCollision {
                            alias: key,
                            kept: kept.clone(),
                            ignored: f.id.clone(),
                        });
                    }
                    // Same fallacy listing its own name twice: harmless.
                    Some(_) => {}
                }
            }
        }

        Dataset {
            fallacies,
            propositions,
            fallacies_by_id,
            alias_index,
            index_warnings,
        }
    }

    /// Parse both JSON documents and build the handle. Any schema defect
    /// aborts with the first [`SchemaError`] encountered.
    pub fn from_json(fallacies_json: &str, propositions_json: &str) -> Result<Self, SchemaError> {
        let fallacies = parse_fallacies(fallacies_json)?;
        let propositions = parse_propositions(propositions_json)?;
        Ok(Dataset::new(fallacies, propositions))
    }

    pub fn fallacies(&self) -> &[Fallacy] {
        &self.fallacies
    }

    pub fn propositions(&self) -> &[Proposition] {
        &self.propositions
    }

    /// Look up a fallacy by its identifier.
    pub fn fallacy(&self, id: &str) -> Option<&Fallacy> {
        self.fallacies_by_id.get(id).map(|&i| &self.fallacies[i])
    }

    /// Case-insensitive, whitespace-trimmed lookup by name or alias.
    /// Backs the reference-library search box.
    pub fn resolve_alias(&self, query: &str) -> Option<&Fallacy> {
        let key = query.trim().to_lowercase();
        self.alias_index.get(&key).and_then(|id| self.fallacy(id))
    }

    /// Cross-referential validation of the proposition collection against
    /// the fallacy indexes.
    ///
    /// Every finding is logged for content maintainers. The caller decides
    /// whether to proceed; sessions are never blocked by these.
    pub fn validate(&self) -> ValidationReport {
        let mut warnings: Vec<ReferentialWarning> = self.index_warnings.clone();
        let mut seen_ids: HashSet<&str> = HashSet::new();
        let mut sound = 0usize;

        for p in &self.propositions {
            if !PROPOSITION_ID_RE.is_match(&p.id) {
                warnings.push(ReferentialWarning::BadId(p.id.clone()));
            }
            if !seen_ids.insert(&p.id) {
                warnings.push(ReferentialWarning::DuplicateId(p.id.clone()));
            }
            if p.is_sound {
                sound += 1;
            }
            match (p.is_sound, p.fallacy_id.as_deref()) {
                (true, Some(_)) => {
                    warnings.push(ReferentialWarning::SoundWithReference(p.id.clone()));
                }
                (true, None) => {}
                (false, None) => {
                    warnings.push(ReferentialWarning::MissingReference(p.id.clone()));
                }
                (false, Some(fid)) => match self.fallacy(fid) {
                    None => warnings.push(ReferentialWarning::UnknownReference {
                        id: p.id.clone(),
                        fallacy: fid.to_string(),
                    }),
                    Some(f) if f.is_deprecated() => {
                        warnings.push(ReferentialWarning::DeprecatedReference {
                            id: p.id.clone(),
                            fallacy: fid.to_string(),
                        })
                    }
                    Some(_) => {}
                },
            }
        }

        let sound_ratio = if self.propositions.is_empty() {
            0.0
        } else {
            sound as f64 / self.propositions.len() as f64
        };
        if !self.propositions.is_empty()
            && !(SOUND_RATIO_BAND.0..=SOUND_RATIO_BAND.1).contains(&sound_ratio)
        {
            warnings.push(ReferentialWarning::RatioOutOfBand { ratio: sound_ratio });
        }

        let error_count = warnings.iter().filter(|w| w.counts_as_error()).count();
        for w in &warnings {
            warn!(finding = %w, "dataset validation");
        }

        ValidationReport {
            error_count,
            sound_ratio,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLACIES: &str = r#"[
        {"id": "fal_strawman", "name": "Strawman", "difficulty": "beginner",
         "definition": "Misrepresenting an argument to attack it.",
         "aliases": ["straw man", "Straw Man "]},
        {"id": "fal_ad_hominem", "name": "Ad Hominem", "difficulty": "beginner",
         "definition": "Attacking the person instead of the argument."},
        {"id": "fal_old_appeal", "name": "Appeal to Tradition", "difficulty": "advanced",
         "definition": "It must be right because it is old.", "status": "deprecated"}
    ]"#;

    const PROPOSITIONS: &str = r#"[
        {"id": "prp_001", "text": "You say we should fund schools, so you want open borders.",
         "isSound": false, "difficulty": "beginner",
         "explanation": "Distorts the original claim.", "fallacyId": "fal_strawman"},
        {"id": "prp_002", "text": "All squares have four sides, so this square has four sides.",
         "isSound": true, "difficulty": "beginner",
         "explanation": "Valid deduction.", "fallacyId": null}
    ]"#;

    #[test]
    fn well_formed_dataset_parses_and_indexes() {
        let ds = Dataset::from_json(FALLACIES, PROPOSITIONS).unwrap();
        assert_eq!(ds.fallacies().len(), 3);
        assert_eq!(ds.propositions().len(), 2);
        assert_eq!(ds.fallacy("fal_strawman").unwrap().name, "Strawman");
        assert!(ds.fallacy("fal_nope").is_none());
    }

    #[test]
    fn alias_lookup_is_trimmed_and_case_insensitive() {
        let ds = Dataset::from_json(FALLACIES, PROPOSITIONS).unwrap();
        assert_eq!(ds.resolve_alias("  STRAW MAN ").unwrap().id, "fal_strawman");
        assert_eq!(ds.resolve_alias("ad hominem").unwrap().id, "fal_ad_hominem");
        assert!(ds.resolve_alias("gish gallop").is_none());
    }

    #[test]
    fn missing_required_field_is_fatal() {
        let json = r#"[{"id": "fal_x", "name": "X", "difficulty": "beginner"}]"#;
        let err = parse_fallacies(json).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingField { field: "definition", .. }
        ));
    }

    #[test]
    fn bad_identifier_pattern_is_fatal() {
        let json = r#"[{"id": "FAL-X", "name": "X", "difficulty": "beginner", "definition": "d"}]"#;
        assert!(matches!(
            parse_fallacies(json).unwrap_err(),
            SchemaError::BadIdentifier(_)
        ));
    }

    #[test]
    fn bad_difficulty_tier_is_fatal() {
        let json = r#"[{"id": "fal_x", "name": "X", "difficulty": "expert", "definition": "d"}]"#;
        assert!(matches!(
            parse_fallacies(json).unwrap_err(),
            SchemaError::BadDifficulty { .. }
        ));
    }

    #[test]
    fn wrong_typed_optional_array_is_fatal() {
        let json = r#"[{"id": "fal_x", "name": "X", "difficulty": "beginner",
                        "definition": "d", "aliases": "not-an-array"}]"#;
        assert!(matches!(
            parse_fallacies(json).unwrap_err(),
            SchemaError::WrongType { field: "aliases", .. }
        ));
    }

    #[test]
    fn sound_proposition_with_reference_is_rejected() {
        let json = r#"[{"id": "prp_x", "text": "t", "isSound": true, "difficulty": "beginner",
                        "explanation": "e", "fallacyId": "fal_x"}]"#;
        assert!(matches!(
            parse_propositions(json).unwrap_err(),
            SchemaError::SoundWithReference(_)
        ));
    }

    #[test]
    fn fallacious_proposition_without_reference_is_rejected() {
        let json = r#"[{"id": "prp_x", "text": "t", "isSound": false, "difficulty": "beginner",
                        "explanation": "e", "fallacyId": null}]"#;
        assert!(matches!(
            parse_propositions(json).unwrap_err(),
            SchemaError::MissingReference(_)
        ));
    }

    #[test]
    fn non_array_document_is_rejected() {
        assert!(matches!(
            parse_propositions(r#"{"not": "an array"}"#).unwrap_err(),
            SchemaError::NotAnArray { .. }
        ));
    }

    #[test]
    fn unknown_reference_is_a_soft_finding() {
        let props = r#"[
            {"id": "prp_001", "text": "t", "isSound": false, "difficulty": "beginner",
             "explanation": "e", "fallacyId": "fal_missing"},
            {"id": "prp_002", "text": "t", "isSound": true, "difficulty": "beginner",
             "explanation": "e", "fallacyId": null}
        ]"#;
        let ds = Dataset::from_json(FALLACIES, props).unwrap();
        let report = ds.validate();
        assert_eq!(report.error_count, 1);
        assert!(report.warnings.contains(&ReferentialWarning::UnknownReference {
            id: "prp_001".into(),
            fallacy: "fal_missing".into(),
        }));
    }

    #[test]
    fn deprecated_reference_is_a_soft_finding() {
        let props = r#"[
            {"id": "prp_001", "text": "t", "isSound": false, "difficulty": "advanced",
             "explanation": "e", "fallacyId": "fal_old_appeal"}
        ]"#;
        let ds = Dataset::from_json(FALLACIES, props).unwrap();
        let report = ds.validate();
        assert_eq!(report.error_count, 1);
        assert!(matches!(
            report.warnings[0],
            ReferentialWarning::DeprecatedReference { .. }
        ));
    }

    #[test]
    fn duplicate_proposition_ids_are_flagged_softly() {
        let f = parse_fallacies(FALLACIES).unwrap();
        let p = parse_propositions(PROPOSITIONS).unwrap();
        let mut doubled = p.clone();
        doubled.extend(p);
        let report = Dataset::new(f, doubled).validate();
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ReferentialWarning::DuplicateId(_))));
        assert!(report.error_count >= 2);
    }

    #[test]
    fn ratio_outside_band_warns_without_counting() {
        // 2 propositions, 1 sound: ratio 0.5, above the band.
        let ds = Dataset::from_json(FALLACIES, PROPOSITIONS).unwrap();
        let report = ds.validate();
        assert_eq!(report.error_count, 0);
        assert!((report.sound_ratio - 0.5).abs() < 1e-12);
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ReferentialWarning::RatioOutOfBand { .. })));
    }

    #[test]
    fn alias_collision_keeps_first_writer_and_warns() {
        let fallacies = r#"[
            {"id": "fal_a", "name": "Red Herring", "difficulty": "beginner", "definition": "d"},
            {"id": "fal_b", "name": "Distraction", "difficulty": "beginner",
             "definition": "d", "aliases": ["red herring"]}
        ]"#;
        let ds = Dataset::from_json(fallacies, "[]").unwrap();
        assert_eq!(ds.resolve_alias("red herring").unwrap().id, "fal_a");
        let report = ds.validate();
        assert!(report.warnings.iter().any(|w| matches!(
            w,
            ReferentialWarning::AliasCollision { .. }
        )));
        // Advisory only.
        assert_eq!(report.error_count, 0);
    }

    #[test]
    fn empty_proposition_collection_reports_zero_ratio() {
        let ds = Dataset::from_json(FALLACIES, "[]").unwrap();
        let report = ds.validate();
        assert_eq!(report.error_count, 0);
        assert_eq!(report.sound_ratio, 0.0);
        assert!(report.warnings.is_empty());
    }
}
