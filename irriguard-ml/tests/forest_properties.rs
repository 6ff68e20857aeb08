//! Forest invariants over arbitrary tables

use irriguard_ml::metrics::r2_score;
use irriguard_ml::{ForestConfig, RandomForestRegressor, StandardScaler};
use proptest::prelude::*;

fn table() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>)> {
    (5usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec(-100.0f64..100.0, 3), n),
            prop::collection::vec(prop::bool::ANY.prop_map(|b| if b { 1.0 } else { 0.0 }), n),
        )
    })
}

fn config(seed: u64) -> ForestConfig {
    ForestConfig {
        num_trees: 8,
        seed,
        ..ForestConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn binary_targets_give_probabilities((x, y) in table(), seed in any::<u64>()) {
        let mut forest = RandomForestRegressor::new(config(seed));
        forest.fit(&x, &y).unwrap();

        for row in &x {
            let p = forest.predict(row).unwrap();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn importances_are_a_distribution((x, y) in table(), seed in any::<u64>()) {
        let mut forest = RandomForestRegressor::new(config(seed));
        forest.fit(&x, &y).unwrap();

        let importances = forest.feature_importances();
        prop_assert_eq!(importances.len(), 3);
        prop_assert!(importances.iter().all(|&v| v >= 0.0));
        prop_assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn depth_never_exceeds_limit((x, y) in table(), max_depth in 1usize..6) {
        let mut forest = RandomForestRegressor::new(ForestConfig {
            num_trees: 4,
            max_depth,
            ..ForestConfig::default()
        });
        forest.fit(&x, &y).unwrap();
        prop_assert!(forest.stats().max_depth <= max_depth);
    }

    #[test]
    fn scaling_is_invertible(rows in prop::collection::vec(prop::collection::vec(-1e3f64..1e3, 4), 1..40)) {
        let scaler = StandardScaler::fit(&rows);
        for row in &rows {
            let z = scaler.transform_row(row);
            for ((zi, xi), (m, s)) in z.iter().zip(row).zip(scaler.mean.iter().zip(&scaler.scale)) {
                prop_assert!((zi * s + m - xi).abs() < 1e-6);
            }
        }
    }
}

#[test]
fn unpruned_forest_fits_training_rows() {
    let x: Vec<Vec<f64>> = (0..40).map(|i| vec![f64::from(i)]).collect();
    let y: Vec<f64> = (0..40).map(|i| f64::from((i / 5) % 2)).collect();
    let mut forest = RandomForestRegressor::new(ForestConfig {
        num_trees: 1,
        bootstrap: false,
        min_samples_split: 2,
        ..ForestConfig::default()
    });
    forest.fit(&x, &y).unwrap();

    let predictions = forest.predict_batch(&x).unwrap();
    assert_eq!(r2_score(&y, &predictions), 1.0);
}
