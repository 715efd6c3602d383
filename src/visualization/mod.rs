/// Графики: тепловая карта корреляций, сравнение групп, логистическая регрессия

pub mod group_comparison;
pub mod heatmap;
pub mod regression;

use std::path::{Path, PathBuf};

pub use group_comparison::{plot_group_comparison, GroupMeans};
pub use heatmap::plot_correlation_matrix;
pub use regression::{create_logistic_regression_plot, RegressionCurve};

use crate::error::{AnalysisError, Result};

pub const CHART_SIZE: (u32, u32) = (800, 600);

const INVALID_FILENAME_CHARS: [char; 9] = [':', '/', '\\', '*', '?', '"', '<', '>', '|'];

pub fn sanitize_filename(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect();
    if !sanitized.ends_with(".png") {
        sanitized.push_str(".png");
    }
    sanitized
}

/// Путь для графика в каталоге вывода; каталог создаётся при необходимости
pub fn chart_path(output_dir: &Path, name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    Ok(output_dir.join(sanitize_filename(name)))
}

pub(crate) fn chart_error(err: Box<dyn std::error::Error>) -> AnalysisError {
    AnalysisError::Chart(err.to_string())
}
