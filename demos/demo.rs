//! End-to-end demo of the `fallacy_drill` engine.
//!
//! Run with: `cargo run --example demo`
//!
//! Shows the full flow:
//!
//! 1. **Load + validate** — parse the two JSON collections, build the
//!    indexed dataset, print the validation report.
//! 2. **Arena** — a few free-practice picks with immediate grading.
//! 3. **Gauntlet** — a seeded 10-item graded run. The seed is fixed, so
//!    the output is deterministic and reproducible.

use fallacy_drill::{grade, ArenaSession, Dataset, GauntletSession, Label, MemoryUnlockStore, Mulberry32, UnlockStore};

const FALLACIES: &str = r#"[
    {"id": "fal_strawman", "name": "Strawman", "difficulty": "beginner",
     "definition": "Misrepresenting someone's argument to make it easier to attack.",
     "aliases": ["straw man"],
     "confusableWith": ["fal_slippery_slope"],
     "rationaleTips": ["Ask: is this really what the speaker claimed?"]},
    {"id": "fal_ad_hominem", "name": "Ad Hominem", "difficulty": "beginner",
     "definition": "Attacking the person making the argument rather than the argument itself."},
    {"id": "fal_slippery_slope", "name": "Slippery Slope", "difficulty": "intermediate",
     "definition": "Claiming a first step inevitably leads to a chain of extreme outcomes."},
    {"id": "fal_appeal_to_authority", "name": "Appeal to Authority", "difficulty": "intermediate",
     "definition": "Treating a claim as true solely because an authority endorses it."},
    {"id": "fal_false_dilemma", "name": "False Dilemma", "difficulty": "beginner",
     "definition": "Presenting two options as the only possibilities when more exist.",
     "aliases": ["false dichotomy", "either-or fallacy"]}
]"#;

const PROPOSITIONS: &str = r#"[
    {"id": "prp_001", "text": "You want bike lanes, so you must want to ban all cars.",
     "isSound": false, "difficulty": "beginner",
     "explanation": "Distorts a modest proposal into an extreme one.",
     "fallacyId": "fal_strawman"},
    {"id": "prp_002", "text": "Dr. Ray is divorced, so her tax-policy argument fails.",
     "isSound": false, "difficulty": "beginner",
     "explanation": "Attacks the speaker, not the argument.",
     "fallacyId": "fal_ad_hominem"},
    {"id": "prp_003", "text": "If we allow remote Fridays, soon nobody will come in at all.",
     "isSound": false, "difficulty": "intermediate",
     "explanation": "Asserts an inevitable chain without support.",
     "fallacyId": "fal_slippery_slope"},
    {"id": "prp_004", "text": "A famous actor says this diet works, so it must work.",
     "isSound": false, "difficulty": "intermediate",
     "explanation": "Fame is not expertise in nutrition.",
     "fallacyId": "fal_appeal_to_authority"},
    {"id": "prp_005", "text": "Either we cut the budget or the city goes bankrupt.",
     "isSound": false, "difficulty": "beginner",
     "explanation": "Ignores intermediate options.",
     "fallacyId": "fal_false_dilemma"},
    {"id": "prp_006", "text": "All mammals are warm-blooded; whales are mammals; so whales are warm-blooded.",
     "isSound": true, "difficulty": "beginner",
     "explanation": "Valid syllogism with true premises.",
     "fallacyId": null},
    {"id": "prp_007", "text": "It rained every day this week, so the ground is likely still wet.",
     "isSound": true, "difficulty": "beginner",
     "explanation": "Reasonable inductive inference.",
     "fallacyId": null}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and validate.
    let dataset = Dataset::from_json(FALLACIES, PROPOSITIONS)?;
    let report = dataset.validate();
    println!("loaded {} fallacies, {} propositions", dataset.fallacies().len(), dataset.propositions().len());
    println!(
        "validation: {} defects, sound ratio {:.2}, {} warnings",
        report.error_count,
        report.sound_ratio,
        report.warnings.len()
    );
    println!(
        "alias lookup \"straw man\" -> {}",
        dataset.resolve_alias("straw man").map(|f| f.id.as_str()).unwrap_or("<none>")
    );
    println!();

    // 2. Arena: three free-practice picks with a seeded source so the demo
    //    output is reproducible. Normal hosts use ArenaSession::new().
    println!("=== Arena (free practice) ===");
    let mut arena = ArenaSession::with_source(Mulberry32::new(7));
    for _ in 0..3 {
        let item = arena.next(dataset.propositions())?;
        // The demo "learner" always answers "sound".
        let record = grade(item, Some(Label::Sound));
        let verdict = if record.is_correct {
            "correct".to_string()
        } else {
            format!("wrong (was {})", record.correct)
        };
        println!("[{}] {}\n    answered: sound -> {}", item.id, item.text, verdict);
    }
    println!();

    // 3. Gauntlet: seeded, graded, scored.
    println!("=== Gauntlet (seed \"abc\") ===");
    let mut session = GauntletSession::start("abc", dataset.propositions())?;
    while let Some(item) = session.current() {
        let answer = item.correct_label();
        let record = session
            .submit_answer(Some(answer))
            .expect("session in progress")
            .clone();
        println!(
            "{:>2}. [{}] {} -> {}",
            session.position(),
            record.proposition_id,
            record.correct,
            if record.is_correct { "correct" } else { "wrong" }
        );
    }
    let mut store = MemoryUnlockStore::new();
    let outcome = session.finalize(&mut store).expect("all items answered");
    println!(
        "accuracy: {}% — advanced tier {}",
        outcome.accuracy_percent,
        if store.is_unlocked() { "unlocked" } else { "still locked" }
    );
    Ok(())
}
