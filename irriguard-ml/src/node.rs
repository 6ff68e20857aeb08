//! Regression tree node
//!
//! Trees are stored as a flat `Vec<Node>` with the root at index 0. Internal
//! nodes reference their children by index; leaves carry the mean target of
//! the samples that reached them.

use serde::{Deserialize, Serialize};

/// Node type in the regression tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeType {
    /// Internal node with split condition
    Internal {
        /// Feature index to split on
        feature: usize,
        /// Samples with `x[feature] <= split_value` go left
        split_value: f64,
        /// Left child index
        left: usize,
        /// Right child index
        right: usize,
    },
    /// Leaf node (external)
    External {
        /// Mean target of the training samples in this leaf
        value: f64,
        /// Number of samples that reached this leaf
        size: usize,
    },
}

/// Tree node with its depth from the root
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node type and data
    pub node_type: NodeType,
    /// Distance from the root
    pub depth: usize,
}

impl Node {
    /// Create an internal node
    pub fn internal(feature: usize, split_value: f64, left: usize, right: usize, depth: usize) -> Self {
        Self {
            node_type: NodeType::Internal {
                feature,
                split_value,
                left,
                right,
            },
            depth,
        }
    }

    /// Create an external (leaf) node
    pub fn external(value: f64, size: usize, depth: usize) -> Self {
        Self {
            node_type: NodeType::External { value, size },
            depth,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_type, NodeType::External { .. })
    }

    /// Leaf output, `None` on internal nodes
    pub fn value(&self) -> Option<f64> {
        match self.node_type {
            NodeType::External { value, .. } => Some(value),
            NodeType::Internal { .. } => None,
        }
    }

    /// Child index to visit next for `sample`
    ///
    /// `None` on leaves or when the sample is too narrow for the split feature.
    pub fn traverse(&self, sample: &[f64]) -> Option<usize> {
        match self.node_type {
            NodeType::Internal {
                feature,
                split_value,
                left,
                right,
            } => {
                let x = *sample.get(feature)?;
                Some(if x <= split_value { left } else { right })
            }
            NodeType::External { .. } => None,
        }
    }
}
