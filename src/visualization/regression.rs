//! График логистической регрессии по одному признаку

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::{chart_error, CHART_SIZE};
use crate::error::{AnalysisError, Result};
use crate::types::RegressionOutput;

/// Точки для графика: истинные метки и кривая вероятностей, отсортированная по признаку
#[derive(Debug, Clone)]
pub struct RegressionCurve {
    pub feature: String,
    pub observed: Vec<(f64, f64)>,
    pub curve: Vec<(f64, f64)>,
}

impl RegressionCurve {
    pub fn from_output(output: &RegressionOutput) -> Result<Self> {
        if output.features.len() != 1 {
            return Err(AnalysisError::Chart(format!(
                "Regression plot supports exactly one feature, got {}",
                output.features.len()
            )));
        }
        if output.x_test.is_empty() {
            return Err(AnalysisError::InsufficientData("No test rows to plot".to_string()));
        }

        let xs: Vec<f64> = output
            .x_test
            .iter()
            .map(|row| {
                row.first()
                    .copied()
                    .ok_or_else(|| AnalysisError::Chart("Test row has no feature value".to_string()))
            })
            .collect::<Result<_>>()?;
        let observed = xs
            .iter()
            .zip(&output.y_test)
            .map(|(&x, &y)| (x, y as f64))
            .collect();

        let mut curve: Vec<(f64, f64)> = xs.iter().copied().zip(output.y_pred_probs.iter().copied()).collect();
        curve.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(Self {
            feature: output.features[0].clone(),
            observed,
            curve,
        })
    }

    fn x_range(&self) -> (f64, f64) {
        let lo = self.curve.first().map(|p| p.0).unwrap_or(0.0);
        let hi = self.curve.last().map(|p| p.0).unwrap_or(1.0);
        let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
        (lo - pad, hi + pad)
    }
}

pub fn create_logistic_regression_plot(output: &RegressionOutput, path: &Path) -> Result<()> {
    let curve = RegressionCurve::from_output(output)?;
    render(&curve, path).map_err(chart_error)?;
    tracing::info!("Saved plot: {}", path.display());
    Ok(())
}

fn render(curve: &RegressionCurve, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = curve.x_range();
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Logistic Regression: {}", curve.feature), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, -0.05f64..1.05f64)?;

    chart
        .configure_mesh()
        .x_desc(curve.feature.as_str())
        .y_desc("Predicted Probability")
        .draw()?;

    chart
        .draw_series(
            curve
                .observed
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())),
        )?
        .label("True values")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    chart
        .draw_series(LineSeries::new(curve.curve.iter().copied(), RED.stroke_width(2)))?
        .label("Regression line")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}
