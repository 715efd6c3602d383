//! Нормализация данных

use crate::error::{AnalysisError, Result};
use crate::types::Dataset;

/// Min-max масштабирование колонки в [0, 1]
pub struct MinMaxNormalizer {
    min: Option<f64>,
    max: Option<f64>,
    is_fitted: bool,
}

impl MinMaxNormalizer {
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            is_fitted: false,
        }
    }

    /// Пропуски не участвуют в вычислении границ
    pub fn fit(&mut self, values: &[Option<f64>]) -> Result<()> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            return Err(AnalysisError::InsufficientData("Empty column".to_string()));
        }

        self.min = Some(present.iter().copied().fold(f64::INFINITY, f64::min));
        self.max = Some(present.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        self.is_fitted = true;
        Ok(())
    }

    pub fn transform(&self, values: &[Option<f64>]) -> Result<Vec<Option<f64>>> {
        if !self.is_fitted {
            return Err(AnalysisError::Model("Normalizer not fitted".to_string()));
        }

        let min = self.min.ok_or_else(|| AnalysisError::Model("Min not computed".to_string()))?;
        let max = self.max.ok_or_else(|| AnalysisError::Model("Max not computed".to_string()))?;
        let range = max - min;

        // Нулевой диапазон: все значения становятся 0
        Ok(values
            .iter()
            .map(|v| {
                v.map(|x| if range > 0.0 { (x - min) / range } else { 0.0 })
            })
            .collect())
    }

    pub fn fit_transform(&mut self, values: &[Option<f64>]) -> Result<Vec<Option<f64>>> {
        self.fit(values)?;
        self.transform(values)
    }
}

impl Default for MinMaxNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Независимая нормализация каждой указанной колонки
pub fn normalize_columns<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> Result<Dataset> {
    let mut normalized = dataset.clone();
    for column in columns {
        let name = column.as_ref();
        let values = dataset.numeric(name)?;
        let scaled = MinMaxNormalizer::new().fit_transform(values)?;
        normalized.set_numeric(name, scaled)?;
    }
    Ok(normalized)
}
