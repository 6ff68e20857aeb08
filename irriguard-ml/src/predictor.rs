//! Irrigation predictor
//!
//! ## Lifecycle
//!
//! ```text
//!             train                  train
//! Untrained ─────────▶ Trained ◀──────────┐
//!     ▲                   │   └───────────┘
//!     │   load_model      │ predict / predict_batch / save_model
//!     └───────────────────┘
//! ```
//!
//! `predict` and `save_model` on an untrained predictor fail with
//! [`MLError::NotTrained`]. A successful `load_model` moves straight to
//! trained.
//!
//! ## Training Pipeline
//!
//! 1. [`irriguard_core::prepare`] the records over the configured features
//! 2. Reject empty or repeated feature lists, then tiny, constant-target
//!    and non-finite tables
//! 3. Fit a [`StandardScaler`] on every row and transform
//! 4. Seeded 80/20 split
//! 5. Fit a [`RandomForestRegressor`] on the train rows
//! 6. Score MSE and R² on the test rows
//!
//! ```rust
//! use chrono::NaiveDate;
//! use irriguard_ml::{IrrigationPredictor, PredictorConfig};
//! use irriguard_ml::forest::ForestConfig;
//! use irriguard_sim::uniform_sample;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let readings = uniform_sample(200, start, 42);
//!
//! let config = PredictorConfig {
//!     forest: ForestConfig { num_trees: 10, ..ForestConfig::default() },
//!     ..PredictorConfig::default()
//! };
//! let mut predictor = IrrigationPredictor::new(config);
//! let report = predictor.train_readings(&readings)?;
//! assert!(report.r2 > 0.9);
//!
//! let p = predictor.predict_reading(&readings[0])?;
//! assert!((0.0..=1.0).contains(&p));
//! # Ok::<(), irriguard_ml::MLError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::Utc;
use irriguard_core::constants::fields;
use irriguard_core::constants::MIN_RECOMMENDED_TRAINING_READINGS;
use irriguard_core::schema::{self, FeatureTable};
use irriguard_core::{Feature, RawRecord, Reading, SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

use crate::errors::{MLError, MLResult, TrainingError};
use crate::forest::{ForestConfig, RandomForestRegressor};
use crate::metrics::{mean_squared_error, r2_score};
use crate::persist::{self, ModelBundle, FORMAT_VERSION};
use crate::scaler::StandardScaler;
use crate::split::train_test_split;

/// Fewest rows that can be split into train and test
pub const MIN_TRAINING_ROWS: usize = 2;

/// Predictor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Model inputs, in column order
    pub features: Vec<Feature>,
    /// Share of rows held out for scoring
    pub test_fraction: f64,
    /// Seed for the train/test shuffle
    pub split_seed: u64,
    /// Forest hyperparameters
    pub forest: ForestConfig,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            features: Feature::ALL.to_vec(),
            test_fraction: 0.2,
            split_seed: 42,
            forest: ForestConfig::default(),
        }
    }
}

/// Held-out diagnostics from one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Mean squared error on the test split
    pub mse: f64,
    /// R² on the test split
    pub r2: f64,
    /// Mean decrease in impurity per feature; sums to 1
    pub feature_importance: BTreeMap<Feature, f64>,
    /// Rows used to fit the forest
    pub n_train: usize,
    /// Rows used to score it
    pub n_test: usize,
}

/// Fitted scaler and forest with the features they were fit on
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    features: Vec<Feature>,
    scaler: StandardScaler,
    forest: RandomForestRegressor,
}

impl TrainedModel {
    /// Fit on a prepared table
    pub fn fit(table: &FeatureTable, config: &PredictorConfig) -> MLResult<(Self, TrainingReport)> {
        validate_features(table.features())?;

        let target = table.target().ok_or_else(|| SchemaError::MissingFeature {
            feature: fields::RELAY_STATUS.to_string(),
        })?;

        let n = table.len();
        if n < MIN_TRAINING_ROWS {
            return Err(TrainingError::InsufficientData {
                required: MIN_TRAINING_ROWS,
                available: n,
            }
            .into());
        }
        if n < MIN_RECOMMENDED_TRAINING_READINGS {
            log::warn!(
                "Training on {} readings; at least {} are recommended",
                n,
                MIN_RECOMMENDED_TRAINING_READINGS
            );
        }

        require_finite(table)?;

        let first = target[0];
        if target.iter().all(|&y| y == first) {
            return Err(TrainingError::DegenerateTarget.into());
        }

        let scaler = StandardScaler::fit(table.rows());
        let x = scaler.transform(table.rows());

        let split = train_test_split(n, config.test_fraction, config.split_seed)?;
        let gather_x = |idx: &[usize]| idx.iter().map(|&i| x[i].clone()).collect::<Vec<_>>();
        let gather_y = |idx: &[usize]| idx.iter().map(|&i| target[i]).collect::<Vec<_>>();
        let (x_train, y_train) = (gather_x(&split.train), gather_y(&split.train));
        let (x_test, y_test) = (gather_x(&split.test), gather_y(&split.test));

        let mut forest = RandomForestRegressor::new(config.forest.clone());
        forest.fit(&x_train, &y_train)?;

        let predictions = forest.predict_batch(&x_test)?;
        let mse = mean_squared_error(&y_test, &predictions);
        let r2 = r2_score(&y_test, &predictions);

        let feature_importance = table
            .features()
            .iter()
            .copied()
            .zip(forest.feature_importances())
            .collect();

        log::info!(
            "Trained forest of {} trees on {} rows (test {}): MSE {:.4}, R² {:.4}",
            forest.stats().num_trees,
            split.train.len(),
            split.test.len(),
            mse,
            r2
        );

        let report = TrainingReport {
            mse,
            r2,
            feature_importance,
            n_train: split.train.len(),
            n_test: split.test.len(),
        };
        let model = Self {
            features: table.features().to_vec(),
            scaler,
            forest,
        };
        Ok((model, report))
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn forest(&self) -> &RandomForestRegressor {
        &self.forest
    }

    /// Score every row of a prepared table
    pub fn predict_table(&self, table: &FeatureTable) -> MLResult<Vec<f64>> {
        if table.features() != self.features.as_slice() {
            return Err(MLError::FeatureMismatch {
                expected: feature_names(&self.features),
                found: feature_names(table.features()),
            });
        }
        require_finite(table)?;
        table
            .rows()
            .iter()
            .map(|row| self.forest.predict(&self.scaler.transform_row(row)))
            .collect()
    }

    /// Prepare `records` over this model's features and score them
    pub fn predict_records(&self, records: &[RawRecord]) -> MLResult<Vec<f64>> {
        let table = schema::prepare(records, &self.features)?;
        self.predict_table(&table)
    }

    /// Write the model as a JSON bundle
    pub fn save(&self, path: impl AsRef<Path>) -> MLResult<()> {
        let bundle = ModelBundle {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            features: self.features.clone(),
            scaler: self.scaler.clone(),
            forest: self.forest.clone(),
        };
        persist::write_bundle(path.as_ref(), &bundle)
    }

    /// Read a bundle, adopting whatever feature list it holds
    pub fn load(path: impl AsRef<Path>) -> MLResult<Self> {
        let bundle = persist::read_bundle(path.as_ref())?;

        if !bundle.forest.is_fitted() {
            return Err(MLError::NotTrained);
        }

        let width = bundle.features.len();
        for found in [bundle.scaler.width(), bundle.forest.stats().num_features] {
            if found != width {
                return Err(MLError::DimensionMismatch {
                    expected: width,
                    found,
                });
            }
        }

        Ok(Self {
            features: bundle.features,
            scaler: bundle.scaler,
            forest: bundle.forest,
        })
    }
}

/// Train/predict state machine around an optional [`TrainedModel`]
#[derive(Debug, Clone, Default)]
pub struct IrrigationPredictor {
    config: PredictorConfig,
    model: Option<TrainedModel>,
}

impl IrrigationPredictor {
    pub fn new(config: PredictorConfig) -> Self {
        Self { config, model: None }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_ref()
    }

    /// Validate `records` against the configured features
    pub fn prepare(&self, records: &[RawRecord]) -> SchemaResult<FeatureTable> {
        schema::prepare(records, &self.config.features)
    }

    /// Fit a new model, replacing any previous one
    ///
    /// On failure the previous model, if any, is kept.
    pub fn train(&mut self, records: &[RawRecord]) -> MLResult<TrainingReport> {
        let table = self.prepare(records)?;
        self.fit_table(&table)
    }

    pub fn train_readings(&mut self, readings: &[Reading]) -> MLResult<TrainingReport> {
        let table = schema::prepare_readings(readings, &self.config.features)?;
        self.fit_table(&table)
    }

    fn fit_table(&mut self, table: &FeatureTable) -> MLResult<TrainingReport> {
        let (model, report) = TrainedModel::fit(table, &self.config)?;
        self.model = Some(model);
        Ok(report)
    }

    /// Irrigation probability for one record
    pub fn predict(&self, record: &RawRecord) -> MLResult<f64> {
        let model = self.trained()?;
        let scores = model.predict_records(std::slice::from_ref(record))?;
        scores.into_iter().next().ok_or(MLError::NotTrained)
    }

    pub fn predict_reading(&self, reading: &Reading) -> MLResult<f64> {
        self.predict(&reading.to_record())
    }

    /// Irrigation probability for each record, in input order
    pub fn predict_batch(&self, records: &[RawRecord]) -> MLResult<Vec<f64>> {
        self.trained()?.predict_records(records)
    }

    pub fn save_model(&self, path: impl AsRef<Path>) -> MLResult<()> {
        self.trained()?.save(path)
    }

    /// Load a bundle trained on exactly the configured features
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> MLResult<()> {
        let model = TrainedModel::load(path)?;
        if model.features != self.config.features {
            return Err(MLError::FeatureMismatch {
                expected: feature_names(&self.config.features),
                found: feature_names(&model.features),
            });
        }
        self.model = Some(model);
        Ok(())
    }

    fn trained(&self) -> MLResult<&TrainedModel> {
        self.model.as_ref().ok_or(MLError::NotTrained)
    }
}

fn feature_names(features: &[Feature]) -> Vec<String> {
    features.iter().map(|f| f.name().to_string()).collect()
}

fn validate_features(features: &[Feature]) -> Result<(), TrainingError> {
    if features.is_empty() {
        return Err(TrainingError::InvalidConfig("feature list is empty".into()));
    }
    let mut seen = BTreeSet::new();
    for feature in features {
        if !seen.insert(*feature) {
            return Err(TrainingError::InvalidConfig(format!(
                "feature {feature} is listed more than once"
            )));
        }
    }
    Ok(())
}

/// First column holding NaN or an infinity, reported by name
fn require_finite(table: &FeatureTable) -> Result<(), TrainingError> {
    for (col, feature) in table.features().iter().enumerate() {
        if table.rows().iter().any(|row| !row[col].is_finite()) {
            return Err(TrainingError::NonFinite {
                feature: feature.name().to_string(),
            });
        }
    }
    Ok(())
}
