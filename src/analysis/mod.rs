/// Статистический анализ и классификация

pub mod correlation;
pub mod descriptive;
pub mod group_comparison;
pub mod normality;
pub mod regression;
pub mod report;

pub use correlation::correlation_matrix;
pub use descriptive::descriptive_statistics;
pub use group_comparison::{compare_groups, ttest_ind};
pub use normality::{check_normality, shapiro_wilk};
pub use regression::{logistic_regression_analysis, train_test_split, LogisticModel};
pub use report::{perform_analysis, AnalysisReport};
