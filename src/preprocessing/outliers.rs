//! Удаление выбросов по z-оценке

use crate::error::Result;
use crate::types::Dataset;

/// Среднее и выборочное (n - 1) стандартное отклонение
pub(crate) fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}

/// Удаляет строки, где |z| в колонке `column` больше порога.
///
/// При нулевом отклонении (или меньше двух значений) строки не удаляются;
/// строки с пропуском в колонке сохраняются.
pub fn remove_outliers(dataset: &Dataset, column: &str, z_threshold: f64) -> Result<Dataset> {
    let values = dataset.numeric(column)?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let (mean, std) = mean_std(&present);

    if std == 0.0 || !std.is_finite() {
        return Ok(dataset.clone());
    }

    let keep: Vec<bool> = values
        .iter()
        .map(|v| match v {
            Some(x) => ((x - mean) / std).abs() <= z_threshold,
            None => true,
        })
        .collect();

    let removed = keep.iter().filter(|&&k| !k).count();
    if removed == 0 {
        return Ok(dataset.clone());
    }

    tracing::debug!("Removing {} outlier rows from '{}' (|z| > {})", removed, column, z_threshold);
    dataset.filter_rows(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_extreme_row() {
        let ds = Dataset::from_numeric(&[
            ("A", vec![10.0, 20.0, 30.0, 1000.0]),
            ("B", vec![1.0, 2.0, 3.0, 4.0]),
        ])
        .unwrap();

        let cleaned = remove_outliers(&ds, "A", 1.3).unwrap();
        assert_eq!(cleaned.n_rows(), 3);
        assert!(!cleaned.numeric_values("A").unwrap().contains(&1000.0));
        assert_eq!(cleaned.numeric_values("B").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn keeps_everything_without_outliers() {
        let ds = Dataset::from_numeric(&[("A", vec![10.0, 20.0, 30.0]), ("B", vec![1.0, 2.0, 3.0])]).unwrap();
        let cleaned = remove_outliers(&ds, "A", 3.0).unwrap();
        assert_eq!(cleaned, ds);
    }

    #[test]
    fn zero_variance_removes_nothing() {
        let ds = Dataset::from_numeric(&[("A", vec![5.0, 5.0, 5.0, 5.0])]).unwrap();
        let cleaned = remove_outliers(&ds, "A", 0.1).unwrap();
        assert_eq!(cleaned.n_rows(), 4);
    }

    #[test]
    fn sample_standard_deviation() {
        let (mean, std) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }
}
