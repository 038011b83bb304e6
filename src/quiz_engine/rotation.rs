//! Anti-repetition selection policy.
//!
//! `pick` chooses one proposition from a pool under two filters: never
//! repeat the immediately preceding item, and rotate away from a fallacy
//! once it has run a streak. If the filters empty the candidate list (tiny
//! pools), selection falls back to the whole pool — a valid member is
//! always returned.

use crate::quiz_engine::{
    error::EmptyPoolError,
    models::Proposition,
    rng::RandomSource,
};

/// Rolling state owned by one practice session. Created at session start,
/// updated after every pick, discarded at session end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub last_id: Option<String>,
    pub last_fallacy: Option<String>,
    /// Consecutive same-fallacy repeats. Starts at 0 on the first pick of a
    /// new fallacy and increments on each immediate repeat.
    pub same_streak: u32,
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState::default()
    }
}

/// Streak value at which the same-fallacy filter kicks in.
///
/// The threshold fires once the counter reaches 2, which permits two
/// repeats after the initial pick — three same-fallacy items in a row are
/// observable. Historical seeds depend on this exact threshold; changing it
/// changes every materialized gauntlet sequence.
const SAME_FALLACY_STREAK_CAP: u32 = 2;

/// Choose one proposition from `pool`, honouring the anti-repeat filters,
/// and update `state` to reflect the pick.
///
/// Consumes exactly one value from `rng`. Performs no I/O.
pub fn pick<'a, R: RandomSource>(
    pool: &'a [Proposition],
    state: &mut SelectionState,
    rng: &mut R,
) -> Result<&'a Proposition, EmptyPoolError> {
    if pool.is_empty() {
        return Err(EmptyPoolError);
    }

    let candidates: Vec<&Proposition> = pool
        .iter()
        .filter(|p| {
            if state.last_id.as_deref() == Some(p.id.as_str()) {
                return false;
            }
            if state.same_streak >= SAME_FALLACY_STREAK_CAP {
                if let (Some(last), Some(cur)) =
                    (state.last_fallacy.as_deref(), p.fallacy_id.as_deref())
                {
                    if last == cur {
                        return false;
                    }
                }
            }
            true
        })
        .collect();

    let picked = if candidates.is_empty() {
        // Tiny pool: ignore the filters rather than fail.
        choose(pool.iter().collect::<Vec<_>>().as_slice(), rng)
    } else {
        choose(&candidates, rng)
    };

    if picked.fallacy_id.is_some() && picked.fallacy_id == state.last_fallacy {
        state.same_streak += 1;
    } else {
        state.same_streak = 0;
    }
    state.last_id = Some(picked.id.clone());
    state.last_fallacy = picked.fallacy_id.clone();

    Ok(picked)
}

/// Uniform choice via `floor(rng * len)`, clamped so a draw arbitrarily
/// close to 1.0 can never index out of range.
fn choose<'a, R: RandomSource>(list: &[&'a Proposition], rng: &mut R) -> &'a Proposition {
    let idx = ((rng.next_f64() * list.len() as f64) as usize).min(list.len() - 1);
    list[idx]
}

// ---------------------------------------------------------------------------
// Rotation diagnostics
// ---------------------------------------------------------------------------

/// Aggregate statistics from a simulated rotation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationSummary {
    pub turns: usize,
    pub sound_ratio: f64,
    pub max_streak: u32,
    pub immediate_repeats: usize,
}

/// Run `turns` picks against `pool` and summarize how the policy behaved.
/// Content maintainers use this to sanity-check a dataset's rotation feel
/// before shipping it.
pub fn simulate<R: RandomSource>(
    pool: &[Proposition],
    turns: usize,
    rng: &mut R,
) -> Result<RotationSummary, EmptyPoolError> {
    let mut state = SelectionState::new();
    let mut sound = 0usize;
    let mut max_streak = 0u32;
    let mut immediate_repeats = 0usize;
    let mut prev_id: Option<String> = None;

    for _ in 0..turns {
        let p = pick(pool, &mut state, rng)?;
        if prev_id.as_deref() == Some(p.id.as_str()) {
            immediate_repeats += 1;
        }
        max_streak = max_streak.max(state.same_streak);
        if p.is_sound {
            sound += 1;
        }
        prev_id = Some(p.id.clone());
    }

    let sound_ratio = if turns == 0 {
        0.0
    } else {
        sound as f64 / turns as f64
    };
    Ok(RotationSummary {
        turns,
        sound_ratio,
        max_streak,
        immediate_repeats,
    })
}
