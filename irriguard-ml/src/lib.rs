//! Irrigation Need Prediction
//!
//! ## Overview
//!
//! Learns the mapping from a sensor snapshot to the probability that the
//! controller would run the pump. The input is five features:
//!
//! ```text
//! [humidity, temperature, light, btn_p, btn_k]  ──▶  relay_status ∈ [0, 1]
//! ```
//!
//! The model is a bagged random forest of CART regression trees over
//! standardized features. The target is binary, so the mean of the tree
//! outputs reads directly as a probability.
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`scaler`] | zero-mean, unit-variance feature transform |
//! | [`node`], [`tree`] | squared-error regression tree |
//! | [`forest`] | bootstrap ensemble and importances |
//! | [`split`], [`metrics`] | held-out evaluation |
//! | [`predictor`] | train / predict state machine |
//! | [`persist`] | JSON model bundles |
//!
//! ## Defaults
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | trees | 100 |
//! | max depth | 10 |
//! | min samples to split | 5 |
//! | min samples per leaf | 1 |
//! | held out | 20% (rounded up) |
//! | seed | 42 (tree `i` uses `42 + i`) |
//!
//! Training is deterministic for a given table and config.

#![deny(unsafe_code)]

pub mod errors;
pub mod forest;
pub mod metrics;
pub mod node;
pub mod persist;
pub mod predictor;
pub mod scaler;
pub mod split;
pub mod tree;

pub use errors::{MLError, MLResult, TrainingError, TrainingResult};
pub use forest::{ForestConfig, ForestStats, RandomForestRegressor};
pub use node::{Node, NodeType};
pub use predictor::{IrrigationPredictor, PredictorConfig, TrainedModel, TrainingReport};
pub use scaler::StandardScaler;
pub use tree::{RegressionTree, TreeConfig};
