/// Типы данных: таблица датасета и результаты анализа

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Значения одной колонки; `None` означает пропуск
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            ColumnData::Numeric(values) => values[row].is_none(),
            ColumnData::Text(values) => values[row].is_none(),
        }
    }

    fn retain(&self, mask: &[bool]) -> ColumnData {
        match self {
            ColumnData::Numeric(values) => ColumnData::Numeric(
                values
                    .iter()
                    .zip(mask)
                    .filter(|(_, &keep)| keep)
                    .map(|(v, _)| *v)
                    .collect(),
            ),
            ColumnData::Text(values) => ColumnData::Text(
                values
                    .iter()
                    .zip(mask)
                    .filter(|(_, &keep)| keep)
                    .map(|(v, _)| v.clone())
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }
}

/// Таблица с именованными колонками одинаковой длины.
///
/// Порядок колонок сохраняется от загрузки до записи.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.data.len();
            for column in &columns {
                if column.data.len() != expected {
                    return Err(AnalysisError::LengthMismatch {
                        column: column.name.clone(),
                        expected,
                        actual: column.data.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Таблица из полностью заполненных числовых колонок
    pub fn from_numeric<S: AsRef<str>>(pairs: &[(S, Vec<f64>)]) -> Result<Self> {
        let columns = pairs
            .iter()
            .map(|(name, values)| {
                Column::numeric(name.as_ref(), values.iter().copied().map(Some).collect())
            })
            .collect();
        Self::new(columns)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))
    }

    fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))
    }

    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        match &self.column(name)?.data {
            ColumnData::Numeric(values) => Ok(values),
            ColumnData::Text(_) => Err(AnalysisError::NotNumeric(name.to_string())),
        }
    }

    /// Только присутствующие значения колонки
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self.numeric(name)?.iter().flatten().copied().collect())
    }

    pub fn set_numeric(&mut self, name: &str, values: Vec<Option<f64>>) -> Result<()> {
        let expected = self.n_rows();
        if values.len() != expected {
            return Err(AnalysisError::LengthMismatch {
                column: name.to_string(),
                expected,
                actual: values.len(),
            });
        }
        self.column_mut(name)?.data = ColumnData::Numeric(values);
        Ok(())
    }

    pub fn missing_count(&self) -> usize {
        let rows = self.n_rows();
        self.columns
            .iter()
            .map(|c| (0..rows).filter(|&r| c.data.is_missing(r)).count())
            .sum()
    }

    pub fn row_has_missing(&self, row: usize) -> bool {
        self.columns.iter().any(|c| c.data.is_missing(row))
    }

    /// Новая таблица только из строк, где `mask[i] == true`
    pub fn filter_rows(&self, mask: &[bool]) -> Result<Dataset> {
        if mask.len() != self.n_rows() {
            return Err(AnalysisError::LengthMismatch {
                column: "<row mask>".to_string(),
                expected: self.n_rows(),
                actual: mask.len(),
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                data: c.data.retain(mask),
            })
            .collect();
        Ok(Dataset { columns })
    }

    /// Значения `column`, у которых метка в `label_column` равна `label`
    pub fn values_where_label(&self, column: &str, label_column: &str, label: f64) -> Result<Vec<f64>> {
        let values = self.numeric(column)?;
        let labels = self.numeric(label_column)?;
        Ok(values
            .iter()
            .zip(labels)
            .filter_map(|(v, l)| match (v, l) {
                (Some(v), Some(l)) if *l == label => Some(*v),
                _ => None,
            })
            .collect())
    }

    pub(crate) fn replace_column(&mut self, name: &str, data: ColumnData) -> Result<()> {
        self.column_mut(name)?.data = data;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalityResult {
    pub column: String,
    pub statistic: f64,
    pub p_value: f64,
    pub is_normal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupComparison {
    pub column: String,
    pub healthy_mean: f64,
    pub parkinson_mean: f64,
    pub statistic: f64,
    pub p_value: f64,
    pub significant: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionOutput {
    pub features: Vec<String>,
    pub target: String,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Признаки тестовых строк, по строке на образец
    pub x_test: Vec<Vec<f64>>,
    pub y_test: Vec<usize>,
    /// Вероятность класса 1 для каждой тестовой строки
    pub y_pred_probs: Vec<f64>,
    pub accuracy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::text(
                "name",
                vec![Some("a".to_string()), None, Some("c".to_string())],
            ),
            Column::numeric("x", vec![Some(1.0), Some(2.0), None]),
            Column::numeric("status", vec![Some(0.0), Some(1.0), Some(1.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_ragged_columns() {
        let result = Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::numeric("b", vec![Some(1.0), Some(2.0)]),
        ]);
        assert!(matches!(result, Err(AnalysisError::LengthMismatch { .. })));
    }

    #[test]
    fn counts_missing_cells() {
        let ds = sample();
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.n_cols(), 3);
        assert_eq!(ds.missing_count(), 2);
        assert!(ds.row_has_missing(1));
        assert!(!ds.row_has_missing(0));
    }

    #[test]
    fn numeric_access_checks_type() {
        let ds = sample();
        assert!(matches!(ds.numeric("name"), Err(AnalysisError::NotNumeric(_))));
        assert!(matches!(ds.numeric("nope"), Err(AnalysisError::ColumnNotFound(_))));
        assert_eq!(ds.numeric_values("x").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn filter_rows_keeps_order() {
        let ds = sample();
        let filtered = ds.filter_rows(&[true, false, true]).unwrap();
        assert_eq!(filtered.n_rows(), 2);
        assert_eq!(filtered.numeric("status").unwrap(), &[Some(0.0), Some(1.0)]);
        assert_eq!(filtered.column_names(), vec!["name", "x", "status"]);
    }

    #[test]
    fn splits_values_by_label() {
        let ds = sample();
        assert_eq!(ds.values_where_label("x", "status", 0.0).unwrap(), vec![1.0]);
        assert_eq!(ds.values_where_label("x", "status", 1.0).unwrap(), vec![2.0]);
    }
}
