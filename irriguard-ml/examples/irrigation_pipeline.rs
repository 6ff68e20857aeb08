//! Simulate → store → train → predict → save → reload
//!
//! ```text
//! RUST_LOG=info cargo run -p irriguard-ml --example irrigation_pipeline
//! ```

use std::error::Error;

use chrono::NaiveDate;
use irriguard_core::{MemoryStore, ReadingStore};
use irriguard_ml::IrrigationPredictor;
use irriguard_sim::EnvironmentSimulator;
use serde_json::json;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = NaiveDate::from_ymd_opt(2024, 12, 1).ok_or("bad start date")?;
    let end = NaiveDate::from_ymd_opt(2024, 12, 6).ok_or("bad end date")?;

    let readings = EnvironmentSimulator::default().generate_default(start, end)?;

    let mut store = MemoryStore::new();
    store.connect()?;
    for reading in &readings {
        store.insert_reading(*reading)?;
    }
    let records = store.get_all_records()?;
    let irrigating = readings.iter().filter(|r| r.relay_status == 1).count();
    println!("Stored {} readings ({} with the pump on)", records.len(), irrigating);

    let mut predictor = IrrigationPredictor::default();
    let report = predictor.train(&records)?;

    println!("Held-out MSE: {:.4}", report.mse);
    println!("Held-out R²:  {:.4}", report.r2);
    println!("Feature importance:");
    for (feature, importance) in &report.feature_importance {
        println!("  {:<12} {:.3}", feature, importance);
    }

    let sample = json!({
        "humidity": 65.0,
        "temperature": 25.0,
        "light": 500.0,
        "btn_p": 1,
        "btn_k": 0,
    });
    let serde_json::Value::Object(sample) = sample else {
        return Err("sample is not an object".into());
    };
    let probability = predictor.predict(&sample)?;
    println!("Irrigation probability for sample: {:.3}", probability);

    let dir = std::env::temp_dir().join("irriguard");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("irrigation_model.json");
    predictor.save_model(&path)?;

    let mut restored = IrrigationPredictor::default();
    restored.load_model(&path)?;
    println!(
        "Reloaded model from {} predicts {:.3}",
        path.display(),
        restored.predict(&sample)?
    );

    store.disconnect()?;
    Ok(())
}
