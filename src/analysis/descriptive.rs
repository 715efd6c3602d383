//! Описательная статистика

use crate::error::{AnalysisError, Result};
use crate::preprocessing::outliers::mean_std;
use crate::types::{Dataset, DescriptiveStats};

/// Квантиль с линейной интерполяцией по позиции p * (n - 1)
pub(crate) fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

pub fn describe(column: &str, values: &[f64]) -> Result<DescriptiveStats> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData(format!("Column '{}' has no values", column)));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let (mean, std) = mean_std(values);

    Ok(DescriptiveStats {
        column: column.to_string(),
        count: values.len(),
        mean,
        std: if values.len() < 2 { f64::NAN } else { std },
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

pub fn descriptive_statistics<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> Result<Vec<DescriptiveStats>> {
    columns
        .iter()
        .map(|c| describe(c.as_ref(), &dataset.numeric_values(c.as_ref())?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_columns() {
        let ds = Dataset::from_numeric(&[
            ("MDVP:Fo(Hz)", vec![119.992, 122.400, 116.682]),
            ("MDVP:Fhi(Hz)", vec![157.302, 148.650, 131.111]),
            ("MDVP:Flo(Hz)", vec![74.997, 113.819, 111.555]),
        ])
        .unwrap();

        let stats = descriptive_statistics(&ds, &["MDVP:Fo(Hz)", "MDVP:Fhi(Hz)"]).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].column, "MDVP:Fo(Hz)");
        assert!(stats[0].mean > 0.0);
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[0].min, 116.682);
        assert_eq!(stats[0].median, 119.992);
        assert_eq!(stats[0].max, 122.400);
    }

    #[test]
    fn quartiles_interpolate() {
        let stats = describe("x", &[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!((stats.q25 - 1.75).abs() < 1e-12);
        assert!((stats.median - 2.5).abs() < 1e-12);
        assert!((stats.q75 - 3.25).abs() < 1e-12);
        assert!((stats.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_column_is_an_error() {
        assert!(describe("x", &[]).is_err());
    }
}
