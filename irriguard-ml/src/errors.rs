//! Predictor error types
//!
//! [`TrainingError`] covers data that cannot be fit. [`MLError`] is what the
//! public API returns; it wraps training and schema failures together with
//! persistence problems.

use irriguard_core::SchemaError;
use thiserror::Error;

/// Result type for predictor operations
pub type MLResult<T> = Result<T, MLError>;

/// Result type for model fitting
pub type TrainingResult<T> = Result<T, TrainingError>;

/// Data that cannot produce a model
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrainingError {
    /// Too few rows to split and fit
    #[error("Insufficient training data: need at least {required} rows, got {available}")]
    InsufficientData {
        /// Minimum row count
        required: usize,
        /// Rows supplied
        available: usize,
    },

    /// Every target value is identical
    #[error("Target has zero variance")]
    DegenerateTarget,

    /// A feature cell is NaN or infinite
    #[error("Non-finite value in feature {feature}")]
    NonFinite {
        /// Column name
        feature: String,
    },

    /// The train or test partition came out empty
    #[error("Train/test split produced an empty partition")]
    EmptySplit,

    /// Predictor settings that cannot describe a model
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Irrigation predictor errors
#[derive(Debug, Error)]
pub enum MLError {
    /// `predict` or `save_model` called before `train`
    #[error("Model has not been trained")]
    NotTrained,

    /// Input failed schema validation
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Fitting failed
    #[error(transparent)]
    Training(#[from] TrainingError),

    /// Reading or writing a model bundle failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model bundle could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bundle was trained on different features than the predictor expects
    #[error("Feature mismatch: expected {expected:?}, found {found:?}")]
    FeatureMismatch {
        /// Predictor's configured feature names
        expected: Vec<String>,
        /// Feature names stored in the bundle
        found: Vec<String>,
    },

    /// A feature row does not match the width the model was fit on
    #[error("Expected {expected} features, found {found}")]
    DimensionMismatch {
        /// Width at fit time
        expected: usize,
        /// Width of the row supplied
        found: usize,
    },

    /// Bundle written by an incompatible version
    #[error("Unsupported model format version {version}")]
    UnsupportedFormat {
        /// Version found in the bundle
        version: u32,
    },
}
