//! Тепловая карта корреляционной матрицы

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{chart_error, CHART_SIZE};
use crate::error::{AnalysisError, Result};
use crate::types::CorrelationMatrix;

/// Синий (-1) -> белый (0) -> красный (1)
pub fn diverging_color(value: f64) -> RGBColor {
    let v = value.clamp(-1.0, 1.0);
    let fade = |t: f64| (255.0 * (1.0 - t)).round() as u8;
    if v < 0.0 {
        let t = -v;
        RGBColor(fade(t * 0.77), fade(t * 0.55), 255 - (t * 75.0).round() as u8)
    } else {
        let t = v;
        RGBColor(255 - (t * 75.0).round() as u8, fade(t * 0.85), fade(t * 0.85))
    }
}

/// Границы ячейки (row, col): строка 0 рисуется сверху, ровно `size` ячеек по каждой оси
pub fn cell_bounds(row: usize, col: usize, size: usize) -> ((f64, f64), (f64, f64)) {
    let y = (size - 1 - row) as f64;
    let x = col as f64;
    ((x, y), (x + 1.0, y + 1.0))
}

/// Центр ячейки с индексом `i`
fn cell_center(i: usize) -> f64 {
    i as f64 + 0.5
}

pub fn plot_correlation_matrix(matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
    if matrix.size() == 0 {
        return Err(AnalysisError::Chart("Correlation matrix is empty".to_string()));
    }
    render(matrix, path).map_err(chart_error)?;
    tracing::info!("Saved plot: {}", path.display());
    Ok(())
}

fn render(matrix: &CorrelationMatrix, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let size = matrix.size();
    let extent = size as f64;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation Matrix", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(130)
        .build_cartesian_2d(0.0..extent, 0.0..extent)?;

    let annotation = ("sans-serif", 18)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (row, values) in matrix.values.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            let (lo, hi) = cell_bounds(row, col, size);
            chart.draw_series(std::iter::once(Rectangle::new([lo, hi], diverging_color(value).filled())))?;
            chart.draw_series(std::iter::once(Rectangle::new([lo, hi], WHITE.stroke_width(1))))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.2}", value),
                (cell_center(col), lo.1 + 0.5),
                annotation.clone(),
            )))?;
        }
    }

    // Подписи колонок под осью X и строк слева от оси Y
    let x_label = ("sans-serif", 14).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top));
    let y_label = ("sans-serif", 14).into_font().color(&BLACK).pos(Pos::new(HPos::Right, VPos::Center));
    for (i, name) in matrix.columns.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(cell_center(i), 0.0));
        root.draw(&Text::new(name.clone(), (px, py + 6), x_label.clone()))?;

        let ((_, row_bottom), _) = cell_bounds(i, 0, size);
        let (px, py) = chart.backend_coord(&(0.0, row_bottom + 0.5));
        root.draw(&Text::new(name.clone(), (px - 6, py), y_label.clone()))?;
    }

    root.present()?;
    Ok(())
}
