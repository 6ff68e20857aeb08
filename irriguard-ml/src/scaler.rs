//! Feature standardization
//!
//! ```text
//! z = (x - mean) / scale        scale = population std, or 1 when std = 0
//! ```

use serde::{Deserialize, Serialize};

/// Per-column standard scaler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column means at fit time
    pub mean: Vec<f64>,
    /// Column scales at fit time
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit on `rows`, each of the same width
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let n = rows.len().max(1) as f64;

        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, x) in mean.iter_mut().zip(row) {
                *m += x;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut variance = vec![0.0; width];
        for row in rows {
            for ((v, x), m) in variance.iter_mut().zip(row).zip(&mean) {
                *v += (x - m).powi(2);
            }
        }

        let scale = variance
            .into_iter()
            .map(|v| {
                let std = (v / n).sqrt();
                if std > 0.0 { std } else { 1.0 }
            })
            .collect();

        Self { mean, scale }
    }

    /// Number of columns the scaler was fit on
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn standardizes_columns() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0]];
        let scaler = StandardScaler::fit(&rows);

        assert_eq!(scaler.mean, vec![2.0, 10.0]);
        assert_relative_eq!(scaler.scale[0], 1.0);

        let z = scaler.transform(&rows);
        assert_relative_eq!(z[0][0], -1.0);
        assert_relative_eq!(z[1][0], 1.0);
    }

    #[test]
    fn constant_column_keeps_unit_scale() {
        let rows = vec![vec![5.0], vec![5.0], vec![5.0]];
        let scaler = StandardScaler::fit(&rows);
        assert_eq!(scaler.scale, vec![1.0]);
        assert_eq!(scaler.transform_row(&[5.0]), vec![0.0]);
    }

    #[test]
    fn transformed_columns_have_unit_variance() {
        let rows: Vec<Vec<f64>> = (0..20).map(|i| vec![f64::from(i) * 3.5 - 7.0]).collect();
        let z = StandardScaler::fit(&rows).transform(&rows);

        let mean = z.iter().map(|r| r[0]).sum::<f64>() / 20.0;
        let var = z.iter().map(|r| (r[0] - mean).powi(2)).sum::<f64>() / 20.0;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
        assert_relative_eq!(var, 1.0, epsilon = 1e-12);
    }
}
