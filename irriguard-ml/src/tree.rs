//! CART regression tree
//!
//! Greedy top-down partitioning on squared error. At every node each feature
//! is sorted once and swept left to right with running sums, so a candidate
//! split costs O(1) to score:
//!
//! ```text
//! SSE(S) = Σy² - (Σy)² / |S|
//! gain   = SSE(node) - SSE(left) - SSE(right)
//! ```
//!
//! Thresholds sit halfway between adjacent distinct values. Ties between
//! equally good splits go to the lowest feature index, then the lowest
//! threshold, so a tree is a pure function of its training rows.
//!
//! A node becomes a leaf when it reaches `max_depth`, holds fewer than
//! `min_samples_split` rows, is already pure, or has no split that leaves
//! `min_samples_leaf` rows on both sides.

use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeType};

/// Gains at or below this are treated as no improvement
const MIN_GAIN: f64 = 1e-12;

/// Configuration for a regression tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Maximum depth of tree
    pub max_depth: usize,
    /// Fewest rows a node needs before it may split
    pub min_samples_split: usize,
    /// Fewest rows allowed in either child
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 1,
        }
    }
}

/// Fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    /// Tree nodes in array representation, root first
    pub nodes: Vec<Node>,
    /// Configuration
    pub config: TreeConfig,
    /// Width of the rows the tree was fit on
    n_features: usize,
    /// Unnormalized impurity decrease per feature
    impurity_decrease: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl RegressionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
            n_features: 0,
            impurity_decrease: Vec::new(),
        }
    }

    /// Fit on the rows of `x` selected by `indices` (repeats allowed)
    ///
    /// An empty `indices` leaves the tree empty.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64], indices: &[usize]) {
        self.nodes.clear();
        self.n_features = x.first().map_or(0, Vec::len);
        self.impurity_decrease = vec![0.0; self.n_features];

        if indices.is_empty() {
            return;
        }

        let mut indices = indices.to_vec();
        self.build(x, y, &mut indices, 0);
    }

    fn build(&mut self, x: &[Vec<f64>], y: &[f64], indices: &mut [usize], depth: usize) -> usize {
        let n = indices.len();
        let (sum, sum_sq) = indices
            .iter()
            .fold((0.0, 0.0), |(s, sq), &i| (s + y[i], sq + y[i] * y[i]));
        let mean = sum / n as f64;
        let node_sse = sse(sum, sum_sq, n);

        // Reserve this slot; children are appended after it
        let node_index = self.nodes.len();
        self.nodes.push(Node::external(mean, n, depth));

        if depth >= self.config.max_depth
            || n < self.config.min_samples_split
            || node_sse <= MIN_GAIN
        {
            return node_index;
        }

        let Some(best) = self.best_split(x, y, indices, sum, sum_sq, node_sse) else {
            return node_index;
        };

        let split_at = partition(indices, |i| x[i][best.feature] <= best.threshold);
        let (left_rows, right_rows) = indices.split_at_mut(split_at);
        if left_rows.is_empty() || right_rows.is_empty() {
            return node_index;
        }

        self.impurity_decrease[best.feature] += best.gain;

        let left = self.build(x, y, left_rows, depth + 1);
        let right = self.build(x, y, right_rows, depth + 1);
        self.nodes[node_index] = Node::internal(best.feature, best.threshold, left, right, depth);

        node_index
    }

    fn best_split(
        &self,
        x: &[Vec<f64>],
        y: &[f64],
        indices: &[usize],
        total_sum: f64,
        total_sq: f64,
        node_sse: f64,
    ) -> Option<BestSplit> {
        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let mut best: Option<BestSplit> = None;
        let mut order = indices.to_vec();

        for feature in 0..self.n_features {
            order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;

            for pos in 0..n - 1 {
                let i = order[pos];
                left_sum += y[i];
                left_sq += y[i] * y[i];

                let here = x[i][feature];
                let next = x[order[pos + 1]][feature];
                if here >= next {
                    continue;
                }

                let n_left = pos + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let children = sse(left_sum, left_sq, n_left)
                    + sse(total_sum - left_sum, total_sq - left_sq, n_right);
                let gain = node_sse - children;

                if gain > MIN_GAIN && best.as_ref().map_or(true, |b| gain > b.gain + MIN_GAIN) {
                    let mut threshold = here + (next - here) / 2.0;
                    if threshold >= next {
                        threshold = here;
                    }
                    best = Some(BestSplit {
                        feature,
                        threshold,
                        gain,
                    });
                }
            }
        }

        best
    }

    /// Predicted value for `sample`
    ///
    /// `None` if the tree is empty or the sample is narrower than the fit rows.
    pub fn predict(&self, sample: &[f64]) -> Option<f64> {
        let mut current = 0;
        loop {
            let node = self.nodes.get(current)?;
            match node.node_type {
                NodeType::External { value, .. } => return Some(value),
                NodeType::Internal { .. } => current = node.traverse(sample)?,
            }
        }
    }

    /// Impurity decrease per feature, normalized to sum to 1
    ///
    /// All zeros when the tree never split.
    pub fn feature_importances(&self) -> Vec<f64> {
        let total: f64 = self.impurity_decrease.iter().sum();
        if total <= 0.0 {
            return vec![0.0; self.n_features];
        }
        self.impurity_decrease.iter().map(|d| d / total).collect()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Get the number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get tree depth
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }
}

/// Sum of squared deviations from the mean, from running sums
fn sse(sum: f64, sum_sq: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (sum_sq - sum * sum / n as f64).max(0.0)
}

/// Move rows satisfying `goes_left` to the front; returns the boundary
fn partition(indices: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut boundary = 0;
    for pos in 0..indices.len() {
        if goes_left(indices[pos]) {
            indices.swap(boundary, pos);
            boundary += 1;
        }
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        // y depends only on feature 1
        let x: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![f64::from(i % 7), f64::from(i)])
            .collect();
        let y = (0..20).map(|i| if i < 10 { 0.0 } else { 1.0 }).collect();
        (x, y)
    }

    fn all(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_tree_creation() {
        let tree = RegressionTree::new(TreeConfig::default());
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.predict(&[1.0]), None);
    }

    #[test]
    fn learns_a_step() {
        let (x, y) = step_data();
        let mut tree = RegressionTree::new(TreeConfig::default());
        tree.fit(&x, &y, &all(20));

        assert_eq!(tree.node_count(), 3);
        match tree.nodes[0].node_type {
            NodeType::Internal { feature, split_value, .. } => {
                assert_eq!(feature, 1);
                assert_relative_eq!(split_value, 9.5);
            }
            NodeType::External { .. } => panic!("root should split"),
        }
        assert_eq!(tree.predict(&[0.0, 3.0]), Some(0.0));
        assert_eq!(tree.predict(&[0.0, 15.0]), Some(1.0));
        assert_eq!(tree.feature_importances(), vec![0.0, 1.0]);
    }

    #[test]
    fn respects_max_depth() {
        let x: Vec<Vec<f64>> = (0..64).map(|i| vec![f64::from(i)]).collect();
        let y: Vec<f64> = (0..64).map(|i| f64::from(i * i % 13)).collect();
        let config = TreeConfig {
            max_depth: 3,
            ..TreeConfig::default()
        };
        let mut tree = RegressionTree::new(config);
        tree.fit(&x, &y, &all(64));

        assert!(tree.depth() <= 3);
        assert!(tree.leaf_count() <= 8);
    }

    #[test]
    fn small_nodes_do_not_split() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![0.0, 1.0, 0.0, 1.0];
        let mut tree = RegressionTree::new(TreeConfig::default());
        tree.fit(&x, &y, &all(4));

        assert_eq!(tree.node_count(), 1);
        assert_relative_eq!(tree.predict(&[7.0]).unwrap(), 0.5);
        assert_eq!(tree.feature_importances(), vec![0.0]);
    }

    #[test]
    fn min_leaf_is_honored() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![f64::from(i)]).collect();
        let mut y = vec![0.0; 10];
        y[9] = 1.0;
        let config = TreeConfig {
            min_samples_leaf: 3,
            ..TreeConfig::default()
        };
        let mut tree = RegressionTree::new(config);
        tree.fit(&x, &y, &all(10));

        for node in &tree.nodes {
            if let NodeType::External { size, .. } = node.node_type {
                assert!(size >= 3);
            }
        }
    }

    #[test]
    fn bootstrap_indices_may_repeat() {
        let (x, y) = step_data();
        let indices = vec![0, 0, 0, 19, 19, 19];
        let mut tree = RegressionTree::new(TreeConfig::default());
        tree.fit(&x, &y, &indices);

        assert_eq!(tree.predict(&x[0]), Some(0.0));
        assert_eq!(tree.predict(&x[19]), Some(1.0));
        assert_eq!(tree.nodes[0].value(), None);
    }

    #[test]
    fn constant_features_make_a_leaf() {
        let x = vec![vec![1.0]; 10];
        let y: Vec<f64> = (0..10).map(f64::from).collect();
        let mut tree = RegressionTree::new(TreeConfig::default());
        tree.fit(&x, &y, &all(10));
        assert_eq!(tree.node_count(), 1);
        assert_relative_eq!(tree.predict(&[1.0]).unwrap(), 4.5);
    }
}
