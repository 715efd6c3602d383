//! Логистическая регрессия для предсказания статуса

use linfa::prelude::*;
use linfa::DatasetBase;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{AnalysisError, Result};
use crate::types::{Dataset, RegressionOutput};

/// Индексы train/test после перемешивания с фиксированным сидом.
///
/// Размер теста ceil(n * test_ratio), в каждой части минимум одна строка.
pub fn train_test_split(n_samples: usize, test_ratio: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if n_samples < 2 {
        return Err(AnalysisError::InsufficientData(format!(
            "Need at least 2 rows to split, got {}",
            n_samples
        )));
    }

    let n_test = ((n_samples as f64 * test_ratio).ceil() as usize).clamp(1, n_samples - 1);

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_train = n_samples - n_test;
    let test = indices.split_off(n_train);
    Ok((indices, test))
}

/// Бинарная логистическая регрессия (метки 0/1)
pub struct LogisticModel {
    max_iterations: u64,
    fitted: Option<FittedLogisticRegression<f64, usize>>,
    // linfa берёт положительным более частый класс обучающей выборки
    positive_is_one: bool,
}

impl LogisticModel {
    pub fn new() -> Self {
        Self {
            max_iterations: 200,
            fitted: None,
            positive_is_one: true,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(AnalysisError::Model(format!(
                "Feature rows ({}) and labels ({}) differ",
                x.nrows(),
                y.len()
            )));
        }
        if !(y.iter().any(|&l| l == 0) && y.iter().any(|&l| l == 1)) {
            return Err(AnalysisError::InsufficientData(
                "Training labels must contain both classes 0 and 1".to_string(),
            ));
        }

        let train = DatasetBase::new(x.clone(), y.clone());
        let fitted = LogisticRegression::default()
            .max_iterations(self.max_iterations)
            .fit(&train)?;

        self.positive_is_one = fitted.labels().pos.class == 1;
        self.fitted = Some(fitted);
        Ok(())
    }

    fn fitted(&self) -> Result<&FittedLogisticRegression<f64, usize>> {
        self.fitted
            .as_ref()
            .ok_or_else(|| AnalysisError::Model("Model not trained".to_string()))
    }

    /// Вероятность класса 1 для каждой строки
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let probs = self.fitted()?.predict_probabilities(x);
        if self.positive_is_one {
            Ok(probs)
        } else {
            Ok(probs.mapv(|p| 1.0 - p))
        }
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        Ok(self.fitted()?.predict(x))
    }

    /// Коэффициенты и свободный член для log-odds класса 1
    pub fn coefficients(&self) -> Result<(Vec<f64>, f64)> {
        let fitted = self.fitted()?;
        let sign = if self.positive_is_one { 1.0 } else { -1.0 };
        Ok((
            fitted.params().iter().map(|w| sign * w).collect(),
            sign * fitted.intercept(),
        ))
    }
}

impl Default for LogisticModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Матрица признаков и метки по строкам без пропусков
fn design_matrix<S: AsRef<str>>(
    dataset: &Dataset,
    target: &str,
    features: &[S],
) -> Result<(Array2<f64>, Array1<usize>)> {
    let labels = dataset.numeric(target)?;
    let columns: Vec<&[Option<f64>]> = features
        .iter()
        .map(|f| dataset.numeric(f.as_ref()))
        .collect::<Result<_>>()?;

    let mut flat = Vec::with_capacity(dataset.n_rows() * features.len());
    let mut y = Vec::with_capacity(dataset.n_rows());

    for row in 0..dataset.n_rows() {
        let label = match labels[row] {
            Some(l) if l == 0.0 || l == 1.0 => l as usize,
            Some(l) => {
                return Err(AnalysisError::Model(format!(
                    "Target '{}' must be binary, found {}",
                    target, l
                )))
            }
            None => continue,
        };
        let values: Option<Vec<f64>> = columns.iter().map(|c| c[row]).collect();
        if let Some(values) = values {
            flat.extend(values);
            y.push(label);
        }
    }

    let x = Array2::from_shape_vec((y.len(), features.len()), flat)
        .map_err(|e| AnalysisError::Model(e.to_string()))?;
    Ok((x, Array1::from(y)))
}

pub fn logistic_regression_analysis<S: AsRef<str>>(
    dataset: &Dataset,
    target: &str,
    features: &[S],
    test_ratio: f64,
    seed: u64,
) -> Result<RegressionOutput> {
    if features.is_empty() {
        return Err(AnalysisError::InsufficientData("No feature columns".to_string()));
    }

    let (x, y) = design_matrix(dataset, target, features)?;
    let (train_idx, test_idx) = train_test_split(y.len(), test_ratio, seed)?;

    let x_train = x.select(Axis(0), &train_idx);
    let y_train = y.select(Axis(0), &train_idx);
    let x_test = x.select(Axis(0), &test_idx);
    let y_test = y.select(Axis(0), &test_idx);

    let mut model = LogisticModel::new();
    model.fit(&x_train, &y_train)?;

    let y_pred_probs = model.predict_proba(&x_test)?;
    let y_pred = model.predict(&x_test)?;
    let correct = y_pred.iter().zip(y_test.iter()).filter(|(p, t)| p == t).count();
    let accuracy = correct as f64 / y_test.len() as f64;
    let (coefficients, intercept) = model.coefficients()?;

    tracing::info!(
        "Logistic regression trained on {} rows, tested on {}. Accuracy: {:.3}",
        train_idx.len(),
        test_idx.len(),
        accuracy
    );

    Ok(RegressionOutput {
        features: features.iter().map(|f| f.as_ref().to_string()).collect(),
        target: target.to_string(),
        coefficients,
        intercept,
        x_test: x_test.rows().into_iter().map(|r| r.to_vec()).collect(),
        y_test: y_test.to_vec(),
        y_pred_probs: y_pred_probs.to_vec(),
        accuracy,
    })
}
