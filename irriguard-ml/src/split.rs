//! Seeded train/test split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::errors::{TrainingError, TrainingResult};

/// Row indices of the two partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with `seed` and hold out `ceil(test_fraction · n)` rows
///
/// Fails with [`TrainingError::EmptySplit`] if either side would be empty.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> TrainingResult<TrainTestSplit> {
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(TrainingError::EmptySplit);
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let train = indices.split_off(n_test);
    Ok(TrainTestSplit {
        train,
        test: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighty_twenty() {
        let split = train_test_split(1000, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 200);
        assert_eq!(split.train.len(), 800);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_size_rounds_up() {
        assert_eq!(train_test_split(7, 0.2, 42).unwrap().test.len(), 2);
        assert_eq!(train_test_split(2, 0.2, 42).unwrap().test.len(), 1);
    }

    #[test]
    fn seeded() {
        assert_eq!(train_test_split(50, 0.2, 1), train_test_split(50, 0.2, 1));
        assert_ne!(train_test_split(50, 0.2, 1), train_test_split(50, 0.2, 2));
    }

    #[test]
    fn degenerate_fractions_fail() {
        assert_eq!(train_test_split(10, 0.0, 42), Err(TrainingError::EmptySplit));
        assert_eq!(train_test_split(10, 1.0, 42), Err(TrainingError::EmptySplit));
        assert_eq!(train_test_split(1, 0.2, 42), Err(TrainingError::EmptySplit));
    }
}
