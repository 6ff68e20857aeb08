//! Model bundle persistence
//!
//! A trained model is stored as one JSON document:
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "saved_at": "2024-12-06T18:00:00Z",
//!   "features": ["humidity", "temperature", "light", "btn_p", "btn_k"],
//!   "scaler": { "mean": [...], "scale": [...] },
//!   "forest": { "trees": [...], "config": {...}, ... }
//! }
//! ```
//!
//! Writes go to a `.tmp` sibling that is renamed over the target, so a reader
//! never sees a half-written bundle.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use irriguard_core::Feature;
use serde::{Deserialize, Serialize};

use crate::errors::{MLError, MLResult};
use crate::forest::RandomForestRegressor;
use crate::scaler::StandardScaler;

/// Bundle layout version this build reads and writes
pub const FORMAT_VERSION: u32 = 1;

/// Everything needed to rebuild a [`crate::TrainedModel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub features: Vec<Feature>,
    pub scaler: StandardScaler,
    pub forest: RandomForestRegressor,
}

/// Serialize `bundle` to `path`, replacing any existing file
pub fn write_bundle(path: &Path, bundle: &ModelBundle) -> MLResult<()> {
    let tmp = temp_sibling(path);

    {
        let mut writer = BufWriter::new(fs::File::create(&tmp)?);
        serde_json::to_writer(&mut writer, bundle)?;
        writer.flush()?;
    }

    if let Err(err) = fs::rename(&tmp, path) {
        // Best effort; the rename error is what the caller needs
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }

    log::info!("Saved model bundle to {}", path.display());
    Ok(())
}

/// Read a bundle and check its format version
pub fn read_bundle(path: &Path) -> MLResult<ModelBundle> {
    let reader = BufReader::new(fs::File::open(path)?);
    let bundle: ModelBundle = serde_json::from_reader(reader)?;

    if bundle.format_version != FORMAT_VERSION {
        return Err(MLError::UnsupportedFormat {
            version: bundle.format_version,
        });
    }

    log::info!(
        "Loaded model bundle from {} (saved {})",
        path.display(),
        bundle.saved_at
    );
    Ok(bundle)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
