//! Stepping sort engines and the pieces they share: array generation,
//! highlight snapshots and the [`SortEngine`] driver interface.

mod bubble;
mod merge;
mod quick;

pub use bubble::BubbleSort;
pub use merge::{MergeSort, MergeState, Task};
pub use quick::{Partition, QuickSort, Span};

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Stepper;
use crate::config::{MAX_ARRAY_SIZE, SortConfig};
use crate::error::{ConfigError, ConfigResult};

/// Shape of a generated array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    /// Uniform integers in `1..=100`.
    #[default]
    Random,
    /// `size, size - 1, ..., 1`.
    Reverse,
    /// `1, 2, ..., size`.
    Sorted,
    /// Sorted, then `size / 10` random pairwise swaps.
    Nearly,
}

impl Distribution {
    pub const ALL: [Distribution; 4] = [
        Distribution::Random,
        Distribution::Reverse,
        Distribution::Sorted,
        Distribution::Nearly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Distribution::Random => "random",
            Distribution::Reverse => "reverse",
            Distribution::Sorted => "sorted",
            Distribution::Nearly => "nearly",
        }
    }
}

impl FromStr for Distribution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Distribution::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownDistribution(s.to_string()))
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds an array of `size` values shaped by `distribution`.
pub fn generate<R: Rng>(size: usize, distribution: Distribution, rng: &mut R) -> Vec<u32> {
    let sorted = || (1..=size as u32).collect::<Vec<_>>();
    match distribution {
        Distribution::Random => (0..size).map(|_| rng.gen_range(1..=100)).collect(),
        Distribution::Reverse => (1..=size as u32).rev().collect(),
        Distribution::Sorted => sorted(),
        Distribution::Nearly => {
            let mut array = sorted();
            if size > 0 {
                for _ in 0..size / 10 {
                    let a = rng.gen_range(0..size);
                    let b = rng.gen_range(0..size);
                    array.swap(a, b);
                }
            }
            array
        }
    }
}

/// Size, distribution and random source an engine regenerates its array from.
#[derive(Clone, Debug)]
pub struct ArraySource {
    size: usize,
    distribution: Distribution,
    rng: StdRng,
}

impl ArraySource {
    pub fn new(config: &SortConfig) -> ConfigResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            size: config.size,
            distribution: config.distribution,
            rng,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn generate(&mut self) -> Vec<u32> {
        generate(self.size, self.distribution, &mut self.rng)
    }
}

/// Per-index display role, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Pivot,
    Swapped,
    Comparing,
    Merging,
    Dividing,
    Partition,
}

/// Indices to emphasise at the current instant. Rebuilt from scratch on every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    pub comparing: Vec<usize>,
    pub swapped: Vec<usize>,
    pub merging: Option<RangeInclusive<usize>>,
    pub dividing: Option<RangeInclusive<usize>>,
    pub pivot: Option<usize>,
    /// Range of the partition in progress.
    pub partition: Option<RangeInclusive<usize>>,
}

impl Highlights {
    pub fn is_empty(&self) -> bool {
        *self == Highlights::default()
    }

    pub fn clear(&mut self) {
        *self = Highlights::default();
    }

    pub fn role(&self, index: usize) -> Option<Role> {
        let in_range = |range: &Option<RangeInclusive<usize>>| {
            range.as_ref().is_some_and(|r| r.contains(&index))
        };

        if self.pivot == Some(index) {
            Some(Role::Pivot)
        } else if self.swapped.contains(&index) {
            Some(Role::Swapped)
        } else if self.comparing.contains(&index) {
            Some(Role::Comparing)
        } else if in_range(&self.merging) {
            Some(Role::Merging)
        } else if in_range(&self.dividing) {
            Some(Role::Dividing)
        } else if in_range(&self.partition) {
            Some(Role::Partition)
        } else {
            None
        }
    }
}

/// Driver-facing interface of the sorting engines.
pub trait SortEngine: Stepper {
    fn name(&self) -> &'static str;

    fn array(&self) -> &[u32];

    fn highlights(&self) -> &Highlights;

    /// Replaces the array and restarts the sort on it.
    fn load_array(&mut self, values: Vec<u32>);

    fn source(&self) -> &ArraySource;

    fn source_mut(&mut self) -> &mut ArraySource;

    /// Regenerates the array with a new size and distribution.
    fn generate(&mut self, size: usize, distribution: Distribution) -> ConfigResult<()> {
        if size > MAX_ARRAY_SIZE {
            return Err(ConfigError::TooLarge {
                what: "size",
                value: size,
                max: MAX_ARRAY_SIZE,
            });
        }
        let source = self.source_mut();
        source.size = size;
        source.distribution = distribution;
        self.reset();
        Ok(())
    }

    /// Changes the array size and regenerates.
    fn set_size(&mut self, size: usize) -> ConfigResult<()> {
        let distribution = self.source().distribution;
        self.generate(size, distribution)
    }

    /// Changes the distribution and regenerates.
    fn set_distribution(&mut self, distribution: Distribution) {
        self.source_mut().distribution = distribution;
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    #[test]
    fn random_values_are_in_range() {
        let array = generate(500, Distribution::Random, &mut rng());
        assert_eq!(array.len(), 500);
        assert!(array.iter().all(|v| (1..=100).contains(v)));
    }

    #[test]
    fn reverse_and_sorted() {
        assert_eq!(generate(4, Distribution::Reverse, &mut rng()), vec![4, 3, 2, 1]);
        assert_eq!(generate(4, Distribution::Sorted, &mut rng()), vec![1, 2, 3, 4]);
        assert!(generate(0, Distribution::Nearly, &mut rng()).is_empty());
    }

    #[test]
    fn nearly_sorted_is_a_permutation() {
        let mut array = generate(40, Distribution::Nearly, &mut rng());
        let displaced = array
            .iter()
            .enumerate()
            .filter(|&(i, &v)| v != i as u32 + 1)
            .count();
        assert!(displaced <= 2 * 4);
        array.sort_unstable();
        assert_eq!(array, (1..=40).collect::<Vec<_>>());
    }

    #[test]
    fn distribution_names_round_trip() {
        for d in Distribution::ALL {
            assert_eq!(d.to_string().parse::<Distribution>(), Ok(d));
        }
        assert_eq!("  Nearly ".parse::<Distribution>(), Ok(Distribution::Nearly));
        assert!(matches!(
            "shuffled".parse::<Distribution>(),
            Err(ConfigError::UnknownDistribution(_))
        ));
    }

    #[test]
    fn role_priority() {
        let highlights = Highlights {
            comparing: vec![1, 2],
            swapped: vec![2],
            merging: Some(0..=5),
            pivot: Some(5),
            ..Highlights::default()
        };
        assert_eq!(highlights.role(2), Some(Role::Swapped));
        assert_eq!(highlights.role(1), Some(Role::Comparing));
        assert_eq!(highlights.role(5), Some(Role::Pivot));
        assert_eq!(highlights.role(0), Some(Role::Merging));
        assert_eq!(highlights.role(6), None);
        assert!(!highlights.is_empty());
        assert!(Highlights::default().is_empty());
    }
}
