use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Evenly spaced input sizes in `[lower, upper)`.
///
/// The step is `(upper - lower) / sample_count`, raised to 1 when the span
/// is narrower than `sample_count`. An empty or inverted range yields no sizes.
pub fn sample_sizes(lower: usize, upper: usize, sample_count: usize) -> Vec<usize> {
    if upper <= lower {
        return Vec::new();
    }
    let step = ((upper - lower) / sample_count.max(1)).max(1);
    (lower..upper).step_by(step).collect()
}

/// Produces the random arrays that get sorted.
#[derive(Debug, Clone, Default)]
pub struct InputGenerator {
    seed: Option<u64>,
}

impl InputGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// `elements` integers drawn uniformly from `0..=i64::MAX`.
    ///
    /// With a seed the array for a given size is always the same.
    pub fn generate(&self, elements: usize) -> Vec<i64> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(elements as u64)),
            None => StdRng::from_os_rng(),
        };
        (0..elements)
            .map(|_| rng.random_range(0..=i64::MAX))
            .collect()
    }
}
