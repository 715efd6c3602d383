//! Parkinson's ML - Rust библиотека анализа голосовых данных

pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod preprocessing;
pub mod types;
pub mod visualization;

pub use types::*;
pub use analysis::*;
pub use preprocessing::*;

// Re-export для удобства
pub use config::PipelineConfig;
pub use error::{AnalysisError, Result};
pub use io::{load_csv, save_csv};
