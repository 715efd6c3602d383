//! Конвейер: очистка -> регрессия -> графики -> отчёт

use std::path::PathBuf;

use crate::analysis::{logistic_regression_analysis, perform_analysis, AnalysisReport};
use crate::config::PipelineConfig;
use crate::error::{AnalysisError, Result};
use crate::io::load_csv;
use crate::preprocessing::{clean_dataset, save_cleaned_data};
use crate::types::{Dataset, RegressionOutput};
use crate::visualization::{
    chart_path, create_logistic_regression_plot, plot_correlation_matrix, plot_group_comparison, GroupMeans,
};

#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub rows: usize,
    pub regression: RegressionOutput,
    pub charts: Vec<PathBuf>,
    pub report_path: PathBuf,
}

/// Загрузка сырых данных, очистка и сохранение
pub fn clean_data(config: &PipelineConfig) -> Result<Dataset> {
    tracing::info!("Loading raw data from {}", config.raw_data_path.display());
    let raw = load_csv(&config.raw_data_path)?;

    tracing::info!("Cleaning data...");
    let cleaned = clean_dataset(&raw, &config.numeric_columns, config.z_threshold)?;

    save_cleaned_data(&cleaned, &config.cleaned_data_path)?;
    tracing::info!(
        "Data cleaning completed: {} of {} rows kept, saved to {}",
        cleaned.n_rows(),
        raw.n_rows(),
        config.cleaned_data_path.display()
    );
    Ok(cleaned)
}

fn write_report(report: &AnalysisReport, config: &PipelineConfig) -> Result<()> {
    report.save(&config.report_path)?;
    tracing::info!("Analysis report saved to {}", config.report_path.display());
    Ok(())
}

/// Анализ уже очищенных данных. Без очищенного файла возвращает `NotFound`
pub fn analyze(config: &PipelineConfig) -> Result<AnalysisReport> {
    if !config.cleaned_data_path.exists() {
        return Err(AnalysisError::NotFound(config.cleaned_data_path.clone()));
    }

    tracing::info!("Analyzing {}", config.cleaned_data_path.display());
    let data = load_csv(&config.cleaned_data_path)?;
    let report = perform_analysis(&data, &config.numeric_columns, &config.target_column, config.alpha)?;
    write_report(&report, config)?;
    Ok(report)
}

/// Графики строятся по уже посчитанным корреляциям и средним групп
fn generate_charts(
    report: &AnalysisReport,
    regression: &RegressionOutput,
    config: &PipelineConfig,
) -> Result<Vec<PathBuf>> {
    let dir = &config.output_dir;
    let mut charts = Vec::new();

    let path = chart_path(dir, "correlation_matrix")?;
    plot_correlation_matrix(&report.correlation, &path)?;
    charts.push(path);

    for comparison in &report.group_comparisons {
        let path = chart_path(dir, &format!("group_comparison_{}", comparison.column))?;
        plot_group_comparison(&GroupMeans::from(comparison), &path)?;
        charts.push(path);
    }

    let path = chart_path(dir, "logistic_regression")?;
    create_logistic_regression_plot(regression, &path)?;
    charts.push(path);

    Ok(charts)
}

pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    tracing::info!("Starting analysis pipeline...");

    let data = clean_data(config)?;

    tracing::info!("Performing logistic regression...");
    let regression = logistic_regression_analysis(
        &data,
        &config.target_column,
        &[config.regression_feature.as_str()],
        config.test_ratio,
        config.seed,
    )?;

    let report = perform_analysis(&data, &config.numeric_columns, &config.target_column, config.alpha)?;

    tracing::info!("Generating visualizations...");
    let charts = generate_charts(&report, &regression, config)?;

    write_report(&report, config)?;

    tracing::info!("Analysis and visualization completed!");
    Ok(PipelineSummary {
        rows: data.n_rows(),
        regression,
        charts,
        report_path: config.report_path.clone(),
    })
}
