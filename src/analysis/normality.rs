//! Тест Шапиро-Уилка на нормальность
//!
//! Аппроксимация Ройстона (алгоритм AS R94), допустимый размер выборки 3..=5000.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{AnalysisError, Result};
use crate::types::{Dataset, NormalityResult};

const MAX_SAMPLES: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// c[0] + c[1]*x + c[2]*x^2 + ...
fn poly(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| AnalysisError::Distribution(e.to_string()))
}

/// Коэффициенты a для нижней половины упорядоченной выборки
fn coefficients(n: usize, normal: &Normal) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let an = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    let mut a = vec![0.0; half];
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    a[0] = a1;

    let (first, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a1.powi(2) - 2.0 * a2.powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a1.powi(2))).sqrt();
        (1, fac)
    };

    for i in first..half {
        a[i] = -m[i] / fac;
    }
    a
}

/// Возвращает (W, p-value)
pub fn shapiro_wilk(sample: &[f64]) -> Result<(f64, f64)> {
    let n = sample.len();
    if n < 3 {
        return Err(AnalysisError::InsufficientData(format!(
            "Shapiro-Wilk needs at least 3 values, got {}",
            n
        )));
    }
    if n > MAX_SAMPLES {
        tracing::warn!("Shapiro-Wilk p-value may be inaccurate for n = {} > {}", n, MAX_SAMPLES);
    }

    let mut x = sample.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));
    let range = x[n - 1] - x[0];
    if range < 1e-19 {
        return Err(AnalysisError::Degenerate("All values are identical".to_string()));
    }

    let normal = standard_normal()?;
    let a = coefficients(n, &normal);

    // Полный антисимметричный вектор весов
    let mut weights = vec![0.0; n];
    for (i, &ai) in a.iter().enumerate() {
        weights[i] = -ai;
        weights[n - 1 - i] = ai;
    }

    // W = квадрат корреляции между весами и упорядоченной выборкой
    let x_mean = x.iter().sum::<f64>() / n as f64;
    let w_mean = weights.iter().sum::<f64>() / n as f64;
    let (mut sxw, mut sxx, mut sww) = (0.0, 0.0, 0.0);
    for (xi, wi) in x.iter().zip(&weights) {
        let dx = (xi - x_mean) / range;
        let dw = wi - w_mean;
        sxw += dx * dw;
        sxx += dx * dx;
        sww += dw * dw;
    }
    let w = ((sxw * sxw) / (sxx * sww)).min(1.0);

    Ok((w, p_value(w, n, &normal)))
}

fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    if n == 3 {
        let pi6 = 6.0 / std::f64::consts::PI;
        let stqr = std::f64::consts::FRAC_PI_3;
        return (pi6 * (w.sqrt().asin() - stqr)).max(0.0);
    }

    let an = n as f64;
    let mut y = (1.0 - w).ln();
    let (m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };

    (1.0 - normal.cdf((y - m) / s)).clamp(0.0, 1.0)
}

pub fn check_normality(dataset: &Dataset, column: &str, alpha: f64) -> Result<NormalityResult> {
    let values = dataset.numeric_values(column)?;
    let (statistic, p_value) = shapiro_wilk(&values)?;
    Ok(NormalityResult {
        column: column.to_string(),
        statistic,
        p_value,
        is_normal: p_value > alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_scores(n: usize) -> Vec<f64> {
        let normal = Normal::new(0.0, 1.0).unwrap();
        (1..=n)
            .map(|i| 10.0 + 2.0 * normal.inverse_cdf((i as f64 - 0.5) / n as f64))
            .collect()
    }

    #[test]
    fn normal_sample_is_accepted() {
        let (w, p) = shapiro_wilk(&normal_scores(50)).unwrap();
        assert!(w > 0.95 && w <= 1.0);
        assert!(p > 0.05, "p = {}", p);
    }

    #[test]
    fn skewed_sample_is_rejected() {
        let mut sample = vec![1.0; 15];
        sample.extend([2.0, 3.0, 5.0, 40.0, 90.0]);
        let (w, p) = shapiro_wilk(&sample).unwrap();
        assert!(w < 0.7);
        assert!(p < 0.05, "p = {}", p);
    }

    #[test]
    fn small_samples() {
        let (w, p) = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
        assert!((w - 1.0).abs() < 1e-9);
        assert!((p - 1.0).abs() < 1e-6);

        let (w, p) = shapiro_wilk(&[119.992, 122.400, 116.682, 116.676]).unwrap();
        assert!(w > 0.0 && w <= 1.0);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(matches!(shapiro_wilk(&[1.0, 2.0]), Err(AnalysisError::InsufficientData(_))));
        assert!(matches!(shapiro_wilk(&[4.0, 4.0, 4.0, 4.0]), Err(AnalysisError::Degenerate(_))));
    }

    #[test]
    fn column_report_uses_alpha() {
        let ds = Dataset::from_numeric(&[("x", normal_scores(30))]).unwrap();
        let result = check_normality(&ds, "x", 0.05).unwrap();
        assert_eq!(result.column, "x");
        assert!(result.is_normal);
    }
}
