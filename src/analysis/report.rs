//! Сводный отчёт статистического анализа

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::correlation::correlation_matrix;
use super::descriptive::descriptive_statistics;
use super::group_comparison::compare_groups;
use super::normality::check_normality;
use crate::error::Result;
use crate::types::{CorrelationMatrix, Dataset, DescriptiveStats, GroupComparison, NormalityResult};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Local>,
    pub alpha: f64,
    pub descriptive: Vec<DescriptiveStats>,
    pub normality: Vec<NormalityResult>,
    pub group_comparisons: Vec<GroupComparison>,
    pub correlation: CorrelationMatrix,
}

impl AnalysisReport {
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_string())?;
        Ok(())
    }
}

pub fn perform_analysis<S: AsRef<str>>(
    dataset: &Dataset,
    columns: &[S],
    label_column: &str,
    alpha: f64,
) -> Result<AnalysisReport> {
    let descriptive = descriptive_statistics(dataset, columns)?;

    let normality = columns
        .iter()
        .map(|c| check_normality(dataset, c.as_ref(), alpha))
        .collect::<Result<Vec<_>>>()?;

    let group_comparisons = columns
        .iter()
        .map(|c| compare_groups(dataset, c.as_ref(), label_column, alpha))
        .collect::<Result<Vec<_>>>()?;

    let correlation = correlation_matrix(dataset, columns)?;

    Ok(AnalysisReport {
        generated_at: Local::now(),
        alpha,
        descriptive,
        normality,
        group_comparisons,
        correlation,
    })
}

const LABEL_WIDTH: usize = 8;

fn column_width(names: &[&str]) -> usize {
    names.iter().map(|n| n.len()).max().unwrap_or(0).max(12) + 2
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f)?;

        writeln!(f, "Descriptive Statistics for Stability and Loudness:")?;
        let names: Vec<&str> = self.descriptive.iter().map(|d| d.column.as_str()).collect();
        let width = column_width(&names);
        let label_width = LABEL_WIDTH;
        write!(f, "{:<label_width$}", "")?;
        for name in &names {
            write!(f, "{:>width$}", name)?;
        }
        writeln!(f)?;

        let rows: [(&str, fn(&DescriptiveStats) -> f64); 8] = [
            ("count", |d: &DescriptiveStats| d.count as f64),
            ("mean", |d: &DescriptiveStats| d.mean),
            ("std", |d: &DescriptiveStats| d.std),
            ("min", |d: &DescriptiveStats| d.min),
            ("25%", |d: &DescriptiveStats| d.q25),
            ("50%", |d: &DescriptiveStats| d.median),
            ("75%", |d: &DescriptiveStats| d.q75),
            ("max", |d: &DescriptiveStats| d.max),
        ];
        for (label, value) in rows {
            write!(f, "{:<label_width$}", label)?;
            for stats in &self.descriptive {
                write!(f, "{:>width$.6}", value(stats))?;
            }
            writeln!(f)?;
        }

        for result in &self.normality {
            writeln!(f)?;
            writeln!(f, "Normality check for {}:", result.column)?;
            writeln!(
                f,
                "Shapiro-Wilk Test for {}: Stat={}, p-value={}",
                result.column, result.statistic, result.p_value
            )?;
            if result.is_normal {
                writeln!(f, "{} follows a normal distribution.", result.column)?;
            } else {
                writeln!(f, "{} does not follow a normal distribution.", result.column)?;
            }
        }

        for result in &self.group_comparisons {
            writeln!(f)?;
            writeln!(f, "Comparing groups for {}:", result.column)?;
            writeln!(
                f,
                "T-Test for {}: Stat={}, p-value={}",
                result.column, result.statistic, result.p_value
            )?;
            if result.significant {
                writeln!(
                    f,
                    "There is a significant difference in {} between healthy individuals and Parkinson's patients.",
                    result.column
                )?;
            } else {
                writeln!(
                    f,
                    "No significant difference in {} between healthy individuals and Parkinson's patients.",
                    result.column
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Correlation Matrix:")?;
        let names: Vec<&str> = self.correlation.columns.iter().map(String::as_str).collect();
        let width = column_width(&names);
        write!(f, "{:<width$}", "")?;
        for name in &names {
            write!(f, "{:>width$}", name)?;
        }
        writeln!(f)?;
        for (name, row) in names.iter().zip(&self.correlation.values) {
            write!(f, "{:<width$}", name)?;
            for value in row {
                write!(f, "{:>width$.6}", value)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
