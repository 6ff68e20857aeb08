//! Random forest regressor
//!
//! Bagged ensemble of [`RegressionTree`]s. Tree `i` draws its bootstrap
//! sample from `StdRng::seed_from_u64(seed + i)`, so a forest is reproducible
//! from its config and training rows alone. Every split considers every
//! feature; predictions are the unweighted mean of the tree outputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::errors::{MLError, MLResult, TrainingError, TrainingResult};
use crate::tree::{RegressionTree, TreeConfig};

/// Configuration for the random forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub num_trees: usize,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Fewest rows a node needs before it may split
    pub min_samples_split: usize,
    /// Fewest rows allowed in a leaf
    pub min_samples_leaf: usize,
    /// Resample rows with replacement for each tree
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            num_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 1,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestConfig {
    fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
        }
    }
}

/// Random forest of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    /// Individual trees
    trees: Vec<RegressionTree>,
    /// Configuration
    config: ForestConfig,
    /// Number of samples used for training
    num_samples: usize,
    /// Row width at fit time
    num_features: usize,
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl RandomForestRegressor {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            trees: Vec::new(),
            config,
            num_samples: 0,
            num_features: 0,
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Train the forest; replaces any previous fit
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> TrainingResult<()> {
        if x.is_empty() || x.len() != y.len() {
            return Err(TrainingError::InsufficientData {
                required: 1,
                available: x.len().min(y.len()),
            });
        }

        let n = x.len();
        self.num_samples = n;
        self.num_features = x[0].len();
        self.trees.clear();

        let tree_config = self.config.tree_config();
        for i in 0..self.config.num_trees.max(1) {
            let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(i as u64));
            let indices: Vec<usize> = if self.config.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };

            let mut tree = RegressionTree::new(tree_config);
            tree.fit(x, y, &indices);
            self.trees.push(tree);
        }

        log::debug!(
            "Fit {} trees on {} rows ({} nodes total)",
            self.trees.len(),
            n,
            self.stats().total_nodes
        );
        Ok(())
    }

    /// Mean tree output for one scaled row
    pub fn predict(&self, sample: &[f64]) -> MLResult<f64> {
        if self.trees.is_empty() {
            return Err(MLError::NotTrained);
        }
        if sample.len() != self.num_features {
            return Err(MLError::DimensionMismatch {
                expected: self.num_features,
                found: sample.len(),
            });
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict(sample).ok_or(MLError::NotTrained)?;
        }
        Ok(total / self.trees.len() as f64)
    }

    pub fn predict_batch(&self, samples: &[Vec<f64>]) -> MLResult<Vec<f64>> {
        samples.iter().map(|sample| self.predict(sample)).collect()
    }

    /// Mean decrease in impurity per feature
    ///
    /// Each tree's importances are normalized, averaged over trees, then
    /// normalized again. Falls back to a uniform vector when no tree split.
    pub fn feature_importances(&self) -> Vec<f64> {
        let width = self.num_features;
        if width == 0 {
            return Vec::new();
        }

        let mut summed = vec![0.0; width];
        for tree in &self.trees {
            for (acc, value) in summed.iter_mut().zip(tree.feature_importances()) {
                *acc += value;
            }
        }

        let total: f64 = summed.iter().sum();
        if total <= 0.0 {
            return vec![1.0 / width as f64; width];
        }
        summed.into_iter().map(|s| s / total).collect()
    }

    /// Get forest statistics
    pub fn stats(&self) -> ForestStats {
        ForestStats {
            num_trees: self.trees.len(),
            total_nodes: self.trees.iter().map(RegressionTree::node_count).sum(),
            max_depth: self.trees.iter().map(RegressionTree::depth).max().unwrap_or(0),
            num_samples: self.num_samples,
            num_features: self.num_features,
        }
    }
}

/// Forest statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestStats {
    /// Number of trees
    pub num_trees: usize,
    /// Total nodes across all trees
    pub total_nodes: usize,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Number of training samples
    pub num_samples: usize,
    /// Row width
    pub num_features: usize,
}
