/// Модуль очистки и предобработки данных

pub mod encoding;
pub mod normalization;
pub mod outliers;

use std::path::Path;

pub use encoding::encode_categorical_columns;
pub use normalization::{normalize_columns, MinMaxNormalizer};
pub use outliers::remove_outliers;

use crate::error::Result;
use crate::types::Dataset;

/// Удаляет строки с пропуском в любой колонке
pub fn drop_missing(dataset: &Dataset) -> Result<Dataset> {
    let keep: Vec<bool> = (0..dataset.n_rows())
        .map(|row| !dataset.row_has_missing(row))
        .collect();
    dataset.filter_rows(&keep)
}

pub fn save_cleaned_data(dataset: &Dataset, path: &Path) -> Result<()> {
    crate::io::save_csv(dataset, path)
}

/// Пропуски -> нормализация -> выбросы по каждой колонке
pub fn clean_dataset<S: AsRef<str>>(dataset: &Dataset, columns: &[S], z_threshold: f64) -> Result<Dataset> {
    let mut cleaned = drop_missing(dataset)?;
    tracing::info!(
        "Dropped {} rows with missing values, {} remain",
        dataset.n_rows() - cleaned.n_rows(),
        cleaned.n_rows()
    );

    cleaned = normalize_columns(&cleaned, columns)?;

    for column in columns {
        let before = cleaned.n_rows();
        cleaned = remove_outliers(&cleaned, column.as_ref(), z_threshold)?;
        if cleaned.n_rows() < before {
            tracing::info!(
                "Removed {} outliers from '{}'",
                before - cleaned.n_rows(),
                column.as_ref()
            );
        }
    }

    Ok(cleaned)
}
