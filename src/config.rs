//! Конфигурация конвейера

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

pub const ALPHA: f64 = 0.05;
pub const Z_THRESHOLD: f64 = 3.0;
pub const TEST_RATIO: f64 = 0.2;
pub const SPLIT_SEED: u64 = 42;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_raw_data_path")]
    pub raw_data_path: PathBuf,
    #[serde(default = "default_cleaned_data_path")]
    pub cleaned_data_path: PathBuf,
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_numeric_columns")]
    pub numeric_columns: Vec<String>,
    #[serde(default = "default_target_column")]
    pub target_column: String,
    #[serde(default = "default_regression_feature")]
    pub regression_feature: String,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_z_threshold")]
    pub z_threshold: f64,
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_raw_data_path() -> PathBuf { PathBuf::from("parkinsons.data") }
fn default_cleaned_data_path() -> PathBuf { PathBuf::from("cleaned_data.csv") }
fn default_report_path() -> PathBuf { PathBuf::from("analysis_results.txt") }
fn default_output_dir() -> PathBuf { PathBuf::from("outputs") }
fn default_numeric_columns() -> Vec<String> {
    vec![
        "MDVP:Fo(Hz)".to_string(),
        "MDVP:Fhi(Hz)".to_string(),
        "MDVP:Flo(Hz)".to_string(),
    ]
}
fn default_target_column() -> String { "status".to_string() }
fn default_regression_feature() -> String { "MDVP:Fo(Hz)".to_string() }
fn default_alpha() -> f64 { ALPHA }
fn default_z_threshold() -> f64 { Z_THRESHOLD }
fn default_test_ratio() -> f64 { TEST_RATIO }
fn default_seed() -> u64 { SPLIT_SEED }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_data_path: default_raw_data_path(),
            cleaned_data_path: default_cleaned_data_path(),
            report_path: default_report_path(),
            output_dir: default_output_dir(),
            numeric_columns: default_numeric_columns(),
            target_column: default_target_column(),
            regression_feature: default_regression_feature(),
            alpha: default_alpha(),
            z_threshold: default_z_threshold(),
            test_ratio: default_test_ratio(),
            seed: default_seed(),
        }
    }
}

impl PipelineConfig {
    /// Загрузка из JSON; отсутствующие поля берутся по умолчанию
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AnalysisError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(AnalysisError::Config(format!("alpha must be in (0, 1), got {}", self.alpha)));
        }
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(AnalysisError::Config(format!(
                "test_ratio must be in (0, 1), got {}",
                self.test_ratio
            )));
        }
        if !(self.z_threshold > 0.0) {
            return Err(AnalysisError::Config(format!(
                "z_threshold must be positive, got {}",
                self.z_threshold
            )));
        }
        if self.numeric_columns.is_empty() {
            return Err(AnalysisError::Config("numeric_columns must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dataset_schema() {
        let config = PipelineConfig::default();
        assert_eq!(config.target_column, "status");
        assert_eq!(config.numeric_columns.len(), 3);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"alpha": 0.01, "output_dir": "charts"}"#).unwrap();
        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.z_threshold, 3.0);
        assert_eq!(config.regression_feature, "MDVP:Fo(Hz)");
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut config = PipelineConfig::default();
        config.test_ratio = 1.5;
        assert!(matches!(config.validate(), Err(AnalysisError::Config(_))));

        let mut config = PipelineConfig::default();
        config.numeric_columns.clear();
        assert!(config.validate().is_err());
    }
}
