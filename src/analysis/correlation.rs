//! Корреляционная матрица Пирсона

use crate::error::{AnalysisError, Result};
use crate::types::{CorrelationMatrix, Dataset};

/// Корреляция по строкам, где заполнены обе колонки.
///
/// Колонка с нулевой дисперсией даёт корреляцию 0.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return 0.0;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

pub fn correlation_matrix<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> Result<CorrelationMatrix> {
    if columns.is_empty() {
        return Err(AnalysisError::InsufficientData("No columns for correlation".to_string()));
    }

    let data: Vec<&[Option<f64>]> = columns
        .iter()
        .map(|c| dataset.numeric(c.as_ref()))
        .collect::<Result<_>>()?;

    let k = data.len();
    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        values[i][i] = 1.0;
        for j in (i + 1)..k {
            let r = pearson(data[i], data[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice_sample() -> Dataset {
        Dataset::from_numeric(&[
            ("MDVP:Fo(Hz)", vec![119.992, 122.400, 116.682]),
            ("MDVP:Fhi(Hz)", vec![157.302, 148.650, 131.111]),
            ("MDVP:Flo(Hz)", vec![74.997, 113.819, 111.555]),
        ])
        .unwrap()
    }

    #[test]
    fn matrix_is_square_symmetric_with_unit_diagonal() {
        let ds = voice_sample();
        let m = correlation_matrix(&ds, &ds.column_names()).unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.values.len(), 3);
        for i in 0..3 {
            assert_eq!(m.values[i].len(), 3);
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!((-1.0..=1.0).contains(&m.get(i, j)));
            }
        }
    }

    #[test]
    fn perfect_linear_relations() {
        let ds = Dataset::from_numeric(&[
            ("a", vec![1.0, 2.0, 3.0, 4.0]),
            ("b", vec![2.0, 4.0, 6.0, 8.0]),
            ("c", vec![4.0, 3.0, 2.0, 1.0]),
        ])
        .unwrap();
        let m = correlation_matrix(&ds, &["a", "b", "c"]).unwrap();
        assert!((m.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((m.get(0, 2) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_correlates_zero() {
        let ds = Dataset::from_numeric(&[("a", vec![1.0, 2.0, 3.0]), ("k", vec![5.0, 5.0, 5.0])]).unwrap();
        let m = correlation_matrix(&ds, &["a", "k"]).unwrap();
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 1), 1.0);
    }
}
