//! Deterministic random stream for reproducible gauntlet runs.
//!
//! The generator is Mulberry32: a 32-bit state advanced by a fixed odd
//! constant, mixed through two multiply-XOR-shift rounds per draw. The
//! output stream for a given seed is identical on every platform — that is
//! the property gauntlet reproducibility rests on, so it is pinned down by
//! known-answer tests rather than assumed.

use rand::RngCore;

/// Uniform `[0, 1)` source consumed by the selection policy.
///
/// Trait seam so tests can script exact draw sequences instead of relying
/// on a real generator.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Mulberry32 generator. Same seed, same infinite stream, bit for bit.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Mulberry32 { state: seed }
    }

    /// Derive the integer seed from a user-supplied string by summing its
    /// character codes (wrapping). An empty string falls back to
    /// [`Mulberry32::from_entropy`], which is non-deterministic and only
    /// acceptable as a default.
    pub fn seed_from_str(seed: &str) -> Self {
        if seed.is_empty() {
            return Mulberry32::from_entropy();
        }
        let sum = seed
            .chars()
            .fold(0u32, |acc, c| acc.wrapping_add(c as u32));
        Mulberry32::new(sum)
    }

    /// Seed from OS entropy. Used by the arena, never by graded runs.
    pub fn from_entropy() -> Self {
        Mulberry32::new(rand::thread_rng().next_u32())
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

impl RandomSource for Mulberry32 {
    fn next_f64(&mut self) -> f64 {
        Mulberry32::next_f64(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_identical_stream() {
        let mut a = Mulberry32::new(12345);
        let mut b = Mulberry32::new(12345);
        for _ in 0..256 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn known_answer_vector_seed_1() {
        // Pinned outputs. If these change, every historical gauntlet seed
        // produces a different quiz.
        let mut g = Mulberry32::new(1);
        let expected = [
            0.6270739405881613,
            0.002735721180215478,
            0.5274470399599522,
            0.9810509674716741,
            0.9683778982143849,
        ];
        for want in expected {
            assert_eq!(g.next_f64(), want);
        }
    }

    #[test]
    fn known_answer_vector_string_seed_abc() {
        // "abc" sums to 97 + 98 + 99 = 294.
        let mut g = Mulberry32::seed_from_str("abc");
        let expected = [
            0.7975328254979104,
            0.0434430418536067,
            0.9192331256344914,
            0.1440823865123093,
            0.8289231155067682,
        ];
        for want in expected {
            assert_eq!(g.next_f64(), want);
        }
    }

    #[test]
    fn string_seed_matches_integer_seed() {
        let mut s = Mulberry32::seed_from_str("abc");
        let mut i = Mulberry32::new(294);
        for _ in 0..32 {
            assert_eq!(s.next_f64(), i.next_f64());
        }
    }

    #[test]
    fn output_stays_in_unit_interval() {
        let mut g = Mulberry32::new(0xDEAD_BEEF);
        for _ in 0..10_000 {
            let v = g.next_f64();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn output_is_roughly_uniform() {
        // Statistical sanity only: the mean over 10k draws sits near 0.5.
        let mut g = Mulberry32::new(42);
        let mean: f64 = (0..10_000).map(|_| g.next_f64()).sum::<f64>() / 10_000.0;
        assert!(
            (mean - 0.5).abs() < 0.01,
            "mean {mean} too far from 0.5"
        );
    }

    #[test]
    fn empty_string_seed_still_yields_valid_output() {
        // Entropy path: cannot assert values, only the contract.
        let mut g = Mulberry32::seed_from_str("");
        for _ in 0..100 {
            let v = g.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
