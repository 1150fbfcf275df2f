//! RNG module - injectable randomness for next-piece selection
//!
//! Every piece is an independent uniform pick among the seven kinds (no bag),
//! drawn with rejection sampling so no kind is favoured.
//! The engine only sees the [`RandomSource`] trait, so callers can plug in the
//! seeded [`SimpleRng`] or a [`ScriptedRng`] that replays an exact sequence.

use crate::types::PieceKind;

/// Source of random numbers for the engine.
pub trait RandomSource {
    /// Next raw value, uniform over the whole `u32` range.
    fn next_u32(&mut self) -> u32;

    /// Value in `[0, bound)`, without modulo bias.
    ///
    /// Raw values below `2^32 mod bound` are redrawn so every residue is
    /// equally likely. `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32 {
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u32();
            if value >= threshold {
                return value % bound;
            }
        }
    }
}

/// Pick a piece kind uniformly.
pub fn random_kind<R: RandomSource + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.next_below(PieceKind::ALL.len() as u32) as usize]
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl SimpleRng {
    /// One LCG step, returning the 16 high bits.
    fn step(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG have short periods.
        self.state >> 16
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        let hi = self.step();
        let lo = self.step();
        (hi << 16) | lo
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of kinds, cycling when it runs out.
///
/// Lets tests force the exact order in which pieces appear.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<PieceKind> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "scripted sequence must not be empty");
        Self { kinds, pos: 0 }
    }
}

impl ScriptedRng {
    fn next_index(&mut self) -> u32 {
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos += 1;
        kind.index() as u32
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.next_index()
    }

    /// Returns the scripted kind's index as-is; it is already below the kind count.
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_index() % bound
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let a: Vec<u32> = (0..8).map(|_| rng1.next_u32()).collect();
        let b: Vec<u32> = (0..8).map(|_| rng2.next_u32()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    /// Replays fixed raw values.
    struct Raw(Vec<u32>);

    impl RandomSource for Raw {
        fn next_u32(&mut self) -> u32 {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_next_below_redraws_the_biased_tail() {
        // 2^32 mod 7 == 4, so raw values 0..4 would favour residues 0..3.
        let mut rng = Raw(vec![0, 3, 4, 11]);
        assert_eq!(rng.next_below(7), 4);
        assert_eq!(rng.0, vec![11]);

        let mut rng = Raw(vec![u32::MAX]);
        assert_eq!(rng.next_below(7), u32::MAX % 7);
    }

    #[test]
    fn test_next_below_power_of_two_never_redraws() {
        let mut rng = Raw(vec![0, 5]);
        assert_eq!(rng.next_below(8), 0);
        assert_eq!(rng.0, vec![5]);
    }

    #[test]
    fn test_simple_rng_uses_all_32_bits() {
        let mut rng = SimpleRng::new(99);
        let high = (0..64).any(|_| rng.next_u32() > u32::from(u16::MAX));
        assert!(high);
    }

    #[test]
    fn test_random_kind_is_roughly_even() {
        let mut rng = SimpleRng::new(2024);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            counts[random_kind(&mut rng).index()] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            assert!((800..1200).contains(&count), "kind {}: {}", i, count);
        }
    }

    #[test]
    fn test_random_kind_covers_every_kind() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[random_kind(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "seen: {:?}", seen);
    }

    #[test]
    fn test_scripted_rng_replays_and_cycles() {
        let mut rng = ScriptedRng::new([PieceKind::S, PieceKind::I]);
        assert_eq!(random_kind(&mut rng), PieceKind::S);
        assert_eq!(random_kind(&mut rng), PieceKind::I);
        assert_eq!(random_kind(&mut rng), PieceKind::S);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_scripted_rng_rejects_empty_script() {
        let _ = ScriptedRng::new(Vec::new());
    }
}
