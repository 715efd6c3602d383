//! Сравнение групп: здоровые (0) против пациентов (1)

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{AnalysisError, Result};
use crate::preprocessing::outliers::mean_std;
use crate::types::{Dataset, GroupComparison};

pub const HEALTHY_LABEL: f64 = 0.0;
pub const PARKINSON_LABEL: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct TTest {
    pub statistic: f64,
    pub p_value: f64,
    pub df: f64,
}

/// Двухвыборочный t-тест Стьюдента с объединённой дисперсией, двусторонний
pub fn ttest_ind(a: &[f64], b: &[f64]) -> Result<TTest> {
    let (n1, n2) = (a.len(), b.len());
    if n1 == 0 || n2 == 0 || n1 + n2 < 3 {
        return Err(AnalysisError::InsufficientData(format!(
            "t-test needs both groups non-empty and at least 3 values, got {} and {}",
            n1, n2
        )));
    }

    let (mean1, std1) = mean_std(a);
    let (mean2, std2) = mean_std(b);
    let df = (n1 + n2 - 2) as f64;
    let pooled = ((n1 as f64 - 1.0) * std1.powi(2) + (n2 as f64 - 1.0) * std2.powi(2)) / df;
    if pooled <= 0.0 {
        return Err(AnalysisError::Degenerate("Pooled variance is zero".to_string()));
    }

    let se = (pooled * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt();
    let statistic = (mean1 - mean2) / se;

    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| AnalysisError::Distribution(e.to_string()))?;
    let p_value = (2.0 * (1.0 - dist.cdf(statistic.abs()))).clamp(0.0, 1.0);

    Ok(TTest { statistic, p_value, df })
}

pub fn compare_groups(
    dataset: &Dataset,
    column: &str,
    label_column: &str,
    alpha: f64,
) -> Result<GroupComparison> {
    let healthy = dataset.values_where_label(column, label_column, HEALTHY_LABEL)?;
    let parkinson = dataset.values_where_label(column, label_column, PARKINSON_LABEL)?;
    let test = ttest_ind(&healthy, &parkinson)?;

    Ok(GroupComparison {
        column: column.to_string(),
        healthy_mean: mean_std(&healthy).0,
        parkinson_mean: mean_std(&parkinson).0,
        statistic: test.statistic,
        p_value: test.p_value,
        significant: test.p_value < alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        // Равные дисперсии, разница средних 3, se = sqrt(2.5 * 0.4) = 1
        let test = ttest_ind(&[1.0, 2.0, 3.0, 4.0, 5.0], &[4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        assert!((test.statistic + 3.0).abs() < 1e-12);
        assert_eq!(test.df, 8.0);
        // t = 3, df = 8: p ≈ 0.01707
        assert!((test.p_value - 0.01707).abs() < 1e-4, "p = {}", test.p_value);
    }

    #[test]
    fn identical_groups_are_not_different() {
        let test = ttest_ind(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(test.statistic, 0.0);
        assert!((test.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_groups() {
        assert!(matches!(ttest_ind(&[], &[1.0, 2.0]), Err(AnalysisError::InsufficientData(_))));
        assert!(matches!(ttest_ind(&[1.0, 1.0], &[1.0, 1.0]), Err(AnalysisError::Degenerate(_))));
    }

    #[test]
    fn compares_by_status() {
        let ds = Dataset::from_numeric(&[
            ("MDVP:Fo(Hz)", vec![119.992, 122.400, 116.682, 116.676]),
            ("status", vec![0.0, 1.0, 0.0, 1.0]),
        ])
        .unwrap();

        let result = compare_groups(&ds, "MDVP:Fo(Hz)", "status", 0.05).unwrap();
        assert!((result.healthy_mean - 118.337).abs() < 1e-9);
        assert!((result.parkinson_mean - 119.538).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&result.p_value));
        assert!(!result.significant);
    }
}
