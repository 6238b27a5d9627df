use rand::{rngs::OsRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::debug;

/// A seeded random source for generating test workloads.
///
/// # Examples
///
/// ```
/// use avl_fuzz::Fuzzer;
///
/// let mut a = Fuzzer::from_u64(7);
/// let mut b = Fuzzer::from_u64(7);
/// assert_eq!(a.random_int(0, 100), b.random_int(0, 100));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed is drawn from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        debug!(seed = ?seed, "fuzzer seeded");

        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Create a fuzzer from a short numeric seed, as used by seed lists in tests.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        for chunk in bytes.chunks_exact_mut(8) {
            chunk.copy_from_slice(&seed.to_le_bytes());
        }
        Self::new(Some(bytes))
    }

    /// Random integer in `[min, max]` (inclusive).
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Random `f64` in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Pick a random element; `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> Option<&'a T> {
        elements.choose(&mut self.rng)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, elements: &mut [T]) {
        elements.shuffle(&mut self.rng);
    }
}
