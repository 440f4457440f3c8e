//! Deterministic random sequencing keyed by a card serial.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed and scheme produce identical draws on every platform
//! - **Explicit**: No ambient RNG state; callers own the sequencer
//! - **Versioned**: Each draw scheme is frozen under its own version number
//!
//! ## Draw schemes
//!
//! **Version 2, `mt19937` (default).** MT19937 seeded like CPython's
//! `random.seed(int)`. Index draws take the top `bit_length(n)` bits of the
//! next output and reject values `>= n`. Sampling follows CPython's
//! `random.sample`: a shrinking pool when the population is small relative
//! to `k`, otherwise repeated draws over the whole population, skipping
//! indices already chosen. A card drawn in Python after
//! `random.seed(serial.int)` comes out identical.
//!
//! **Version 1, `chacha8`.** ChaCha8 keyed with the 128-bit seed in
//! little-endian order in the first 16 key bytes, the remaining 16 bytes
//! zero. Index draws are `u32` range draws and `sample` is a partial
//! Fisher-Yates over an index vector.
//!
//! Changing any of these changes every card ever issued under that scheme.
//!
//! ```
//! use password_card::core::CardRng;
//!
//! let mut rng1 = CardRng::new(42);
//! let mut rng2 = CardRng::new(42);
//!
//! let digits = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
//! assert_eq!(rng1.sample(&digits, 5), rng2.sample(&digits, 5));
//! ```

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::error::CardError;
use super::mt::Mt19937;

/// Version of the default draw scheme.
pub const SEQUENCER_VERSION: u32 = DrawScheme::DEFAULT.version();

/// Algorithm behind every draw of a [`CardRng`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawScheme {
    /// ChaCha8 with a partial Fisher-Yates sample.
    ChaCha8,
    /// MT19937 with CPython's integer seeding and sampling.
    #[default]
    Mt19937,
}

impl DrawScheme {
    pub const DEFAULT: Self = Self::Mt19937;
    pub const ALL: [Self; 2] = [Self::Mt19937, Self::ChaCha8];

    /// Frozen version number of this scheme.
    #[must_use]
    pub const fn version(self) -> u32 {
        match self {
            Self::ChaCha8 => 1,
            Self::Mt19937 => 2,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ChaCha8 => "chacha8",
            Self::Mt19937 => "mt19937",
        }
    }
}

impl fmt::Display for DrawScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrawScheme {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s) || scheme.version().to_string() == s)
            .ok_or_else(|| CardError::UnknownScheme(s.to_string()))
    }
}

#[derive(Clone, Debug)]
enum Source {
    ChaCha(ChaCha8Rng),
    Mt(Mt19937),
}

/// Seeded sequencer through which every randomized choice flows.
#[derive(Clone, Debug)]
pub struct CardRng {
    source: Source,
    scheme: DrawScheme,
    seed: u128,
}

impl CardRng {
    /// Create a new sequencer with the given 128-bit seed and the default
    /// scheme.
    #[must_use]
    pub fn new(seed: u128) -> Self {
        Self::with_scheme(seed, DrawScheme::DEFAULT)
    }

    /// Create a new sequencer with an explicit draw scheme.
    #[must_use]
    pub fn with_scheme(seed: u128, scheme: DrawScheme) -> Self {
        let source = match scheme {
            DrawScheme::ChaCha8 => {
                let mut key = [0u8; 32];
                key[..16].copy_from_slice(&seed.to_le_bytes());
                Source::ChaCha(ChaCha8Rng::from_seed(key))
            }
            DrawScheme::Mt19937 => Source::Mt(Mt19937::from_u128(seed)),
        };
        Self { source, scheme, seed }
    }

    /// The seed this sequencer was created with.
    #[must_use]
    pub fn seed(&self) -> u128 {
        self.seed
    }

    #[must_use]
    pub fn scheme(&self) -> DrawScheme {
        self.scheme
    }

    /// Uniform index in `0..upper`.
    ///
    /// Panics if `upper` is zero or does not fit in a `u32`.
    pub fn below(&mut self, upper: usize) -> usize {
        assert!(upper > 0, "cannot draw from an empty range");
        let upper = u32::try_from(upper).expect("draw range exceeds u32");
        match &mut self.source {
            Source::ChaCha(rng) => rng.gen_range(0..upper) as usize,
            Source::Mt(mt) => {
                let k = u32::BITS - upper.leading_zeros();
                loop {
                    let r = mt.bits(k);
                    if r < upper {
                        return r as usize;
                    }
                }
            }
        }
    }

    /// Draw `k` distinct elements from `population` without replacement.
    ///
    /// The result is ordered by draw. Panics if `k` exceeds the population.
    pub fn sample<T: Clone>(&mut self, population: &[T], k: usize) -> Vec<T> {
        assert!(
            k <= population.len(),
            "cannot sample {k} from a population of {}",
            population.len()
        );

        match self.scheme {
            DrawScheme::ChaCha8 => self.sample_fisher_yates(population, k),
            DrawScheme::Mt19937 if population.len() <= pool_threshold(k) => {
                self.sample_pool(population, k)
            }
            DrawScheme::Mt19937 => self.sample_rejecting(population, k),
        }
    }

    /// Return a permutation of `sequence` as a new vector.
    pub fn shuffle<T: Clone>(&mut self, sequence: &[T]) -> Vec<T> {
        self.sample(sequence, sequence.len())
    }

    fn sample_fisher_yates<T: Clone>(&mut self, population: &[T], k: usize) -> Vec<T> {
        let mut indices: Vec<usize> = (0..population.len()).collect();
        let mut drawn = Vec::with_capacity(k);
        for i in 0..k {
            let j = i + self.below(indices.len() - i);
            indices.swap(i, j);
            drawn.push(population[indices[i]].clone());
        }
        drawn
    }

    /// Draw from a shrinking pool; the last live entry fills each vacancy.
    fn sample_pool<T: Clone>(&mut self, population: &[T], k: usize) -> Vec<T> {
        let n = population.len();
        let mut pool = population.to_vec();
        let mut drawn = Vec::with_capacity(k);
        for i in 0..k {
            let j = self.below(n - i);
            drawn.push(pool[j].clone());
            pool.swap(j, n - i - 1);
        }
        drawn
    }

    /// Redraw over the whole population until an unused index comes up.
    fn sample_rejecting<T: Clone>(&mut self, population: &[T], k: usize) -> Vec<T> {
        let mut selected = FxHashSet::default();
        let mut drawn = Vec::with_capacity(k);
        for _ in 0..k {
            let mut j = self.below(population.len());
            while !selected.insert(j) {
                j = self.below(population.len());
            }
            drawn.push(population[j].clone());
        }
        drawn
    }
}

/// Largest population for which MT sampling uses the pool strategy:
/// 21, plus the smallest power of four not below `3k` once `k > 5`.
fn pool_threshold(k: usize) -> usize {
    let mut threshold = 21;
    if k > 5 {
        let mut table = 1;
        while table < 3 * k {
            table *= 4;
        }
        threshold += table;
    }
    threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        for scheme in DrawScheme::ALL {
            let mut rng1 = CardRng::with_scheme(42, scheme);
            let mut rng2 = CardRng::with_scheme(42, scheme);

            for _ in 0..100 {
                assert_eq!(rng1.below(1000), rng2.below(1000));
            }
        }
    }

    #[test]
    fn test_different_seeds() {
        for scheme in DrawScheme::ALL {
            let mut rng1 = CardRng::with_scheme(1, scheme);
            let mut rng2 = CardRng::with_scheme(2, scheme);

            let seq1: Vec<_> = (0..10).map(|_| rng1.below(1000)).collect();
            let seq2: Vec<_> = (0..10).map(|_| rng2.below(1000)).collect();

            assert_ne!(seq1, seq2);
        }
    }

    #[test]
    fn test_high_seed_bits_matter() {
        for scheme in DrawScheme::ALL {
            let mut low = CardRng::with_scheme(7, scheme);
            let mut high = CardRng::with_scheme(7 | (1u128 << 100), scheme);

            let seq1: Vec<_> = (0..10).map(|_| low.below(1000)).collect();
            let seq2: Vec<_> = (0..10).map(|_| high.below(1000)).collect();

            assert_ne!(seq1, seq2);
        }
    }

    #[test]
    fn test_mt_below_matches_randrange() {
        // random.seed(42); [random.randrange(n) for n in (10, 1, 50, 1000, 3)]
        let mut rng = CardRng::with_scheme(42, DrawScheme::Mt19937);
        let drawn: Vec<_> = [10, 1, 50, 1000, 3].iter().map(|&n| rng.below(n)).collect();
        assert_eq!(drawn, vec![1, 0, 47, 281, 0]);
    }

    #[test]
    fn test_mt_sample_matches_python() {
        let population: Vec<usize> = (0..50).collect();

        // 50 > 21: redraw strategy, then 10 <= 21: pool strategy
        let mut rng = CardRng::with_scheme(42, DrawScheme::Mt19937);
        assert_eq!(rng.sample(&population, 5), vec![40, 7, 1, 47, 17]);
        assert_eq!(rng.sample(&population[..10], 5), vec![3, 9, 2, 5, 0]);

        let mut rng = CardRng::with_scheme(42, DrawScheme::Mt19937);
        assert_eq!(rng.sample(&population[..25], 4), vec![20, 3, 0, 23]);

        let upper: Vec<char> = "ABCDEFGHJKMNPQRSTVWXZY".chars().collect();
        let mut rng = CardRng::with_scheme(7, DrawScheme::Mt19937);
        let drawn: String = rng.sample(&upper, 20).into_iter().collect();
        assert_eq!(drawn, "MEPBCDNKAJTQWGXYRHSZ");
    }

    #[test]
    fn test_chacha_draws_are_frozen() {
        let mut rng = CardRng::with_scheme(42, DrawScheme::ChaCha8);
        let drawn: Vec<_> = [10, 1, 50, 1000, 3].iter().map(|&n| rng.below(n)).collect();
        assert_eq!(drawn, vec![3, 0, 14, 394, 1]);

        let population: Vec<usize> = (0..50).collect();
        let mut rng = CardRng::with_scheme(42, DrawScheme::ChaCha8);
        assert_eq!(rng.sample(&population, 5), vec![17, 5, 15, 21, 26]);
        assert_eq!(rng.sample(&population[..10], 5), vec![8, 2, 4, 1, 5]);
    }

    #[test]
    fn test_pool_threshold() {
        assert_eq!(pool_threshold(0), 21);
        assert_eq!(pool_threshold(5), 21);
        assert_eq!(pool_threshold(6), 21 + 64);
        assert_eq!(pool_threshold(20), 21 + 64);
        assert_eq!(pool_threshold(25), 21 + 256);
    }

    #[test]
    fn test_sample_distinct() {
        for scheme in DrawScheme::ALL {
            let mut rng = CardRng::with_scheme(42, scheme);
            let population: Vec<u32> = (0..100).collect();

            for k in [3, 15, 60] {
                let mut drawn = rng.sample(&population, k);
                assert_eq!(drawn.len(), k);

                drawn.sort_unstable();
                drawn.dedup();
                assert_eq!(drawn.len(), k, "{scheme} k={k}");
                assert!(drawn.iter().all(|x| population.contains(x)));
            }
        }
    }

    #[test]
    fn test_sample_zero() {
        let mut rng = CardRng::new(42);
        assert!(rng.sample(&[1, 2, 3], 0).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot sample")]
    fn test_sample_too_many() {
        let mut rng = CardRng::new(42);
        let _ = rng.sample(&[1, 2, 3], 4);
    }

    #[test]
    fn test_shuffle() {
        for scheme in DrawScheme::ALL {
            let mut rng = CardRng::with_scheme(42, scheme);
            let data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

            let mut shuffled = rng.shuffle(&data);

            // Input untouched, output a different order (very likely)
            assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
            assert_ne!(shuffled, data);

            shuffled.sort_unstable();
            assert_eq!(shuffled, data);
        }
    }

    #[test]
    fn test_seed_and_scheme_accessors() {
        let seed = 0x4f03_bf89_f37e_4af5_8191_59b5_0205_76f0;
        let rng = CardRng::new(seed);
        assert_eq!(rng.seed(), seed);
        assert_eq!(rng.scheme(), DrawScheme::Mt19937);
        assert_eq!(CardRng::with_scheme(seed, DrawScheme::ChaCha8).scheme(), DrawScheme::ChaCha8);
    }

    #[test]
    fn test_scheme_names() {
        assert_eq!(SEQUENCER_VERSION, 2);
        assert_eq!("mt19937".parse::<DrawScheme>().unwrap(), DrawScheme::Mt19937);
        assert_eq!("ChaCha8".parse::<DrawScheme>().unwrap(), DrawScheme::ChaCha8);
        assert_eq!("1".parse::<DrawScheme>().unwrap(), DrawScheme::ChaCha8);
        assert_eq!(DrawScheme::ChaCha8.to_string(), "chacha8");
        assert!(matches!(
            "xorshift".parse::<DrawScheme>(),
            Err(CardError::UnknownScheme(_))
        ));
    }
}
