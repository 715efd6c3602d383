//! Столбчатая диаграмма средних по группам

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{chart_error, CHART_SIZE};
use crate::error::Result;
use crate::types::GroupComparison;

pub const GROUP_NAMES: [&str; 2] = ["Healthy", "Parkinson's"];

#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans {
    pub column: String,
    pub healthy: f64,
    pub parkinson: f64,
}

impl From<&GroupComparison> for GroupMeans {
    fn from(comparison: &GroupComparison) -> Self {
        Self {
            column: comparison.column.clone(),
            healthy: comparison.healthy_mean,
            parkinson: comparison.parkinson_mean,
        }
    }
}

impl GroupMeans {
    pub fn values(&self) -> [f64; 2] {
        [self.healthy, self.parkinson]
    }

    /// Диапазон оси Y: включает ноль и запас сверху под подписи
    pub fn value_range(&self) -> (f64, f64) {
        let lo = self.healthy.min(self.parkinson).min(0.0);
        let hi = self.healthy.max(self.parkinson).max(0.0);
        let span = hi - lo;
        let pad = if span > 0.0 { span * 0.15 } else { 1.0 };
        (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
    }
}

/// Горизонтальные границы столбца `i`: по одному слоту шириной 1 на группу
pub fn bar_span(i: usize) -> (f64, f64) {
    let x = i as f64;
    (x + 0.2, x + 0.8)
}

pub fn plot_group_comparison(means: &GroupMeans, path: &Path) -> Result<()> {
    render(means, path).map_err(chart_error)?;
    tracing::info!("Saved plot: {}", path.display());
    Ok(())
}

fn render(means: &GroupMeans, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_min, y_max) = means.value_range();
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Comparison of {} between Groups", means.column), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..GROUP_NAMES.len() as f64, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .x_desc("Group")
        .y_desc(means.column.as_str())
        .draw()?;

    let colors = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];
    let value_style = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let group_style = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));

    for (i, value) in means.values().into_iter().enumerate() {
        let (left, right) = bar_span(i);
        let center = (left + right) / 2.0;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, 0.0), (right, value)],
            colors[i].filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{:.2}", value),
            (center, value.max(0.0)),
            value_style.clone(),
        )))?;

        let (px, py) = chart.backend_coord(&(center, y_min));
        root.draw(&Text::new(GROUP_NAMES[i].to_string(), (px, py + 6), group_style.clone()))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn means_come_from_group_comparison() {
        let comparison = GroupComparison {
            column: "MDVP:Fo(Hz)".to_string(),
            healthy_mean: 0.3,
            parkinson_mean: 0.9,
            statistic: -4.2,
            p_value: 0.01,
            significant: true,
        };
        let means = GroupMeans::from(&comparison);
        assert_eq!(means.column, "MDVP:Fo(Hz)");
        assert_eq!(means.values(), [0.3, 0.9]);
    }

    #[test]
    fn one_slot_per_group() {
        for i in 0..GROUP_NAMES.len() {
            let (left, right) = bar_span(i);
            assert!(left > i as f64 && right < (i + 1) as f64);
        }
        let (_, last) = bar_span(GROUP_NAMES.len() - 1);
        assert!(last < GROUP_NAMES.len() as f64);
    }

    #[test]
    fn axis_range_covers_zero_and_labels() {
        let means = GroupMeans {
            column: "a".to_string(),
            healthy: 2.0,
            parkinson: 4.0,
        };
        let (lo, hi) = means.value_range();
        assert_eq!(lo, 0.0);
        assert!(hi > 4.0);

        let negative = GroupMeans {
            column: "a".to_string(),
            healthy: -1.0,
            parkinson: 1.0,
        };
        let (lo, hi) = negative.value_range();
        assert!(lo < -1.0 && hi > 1.0);
    }
}
