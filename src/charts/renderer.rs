//! Static Chart Renderer
//! Exports the charts of a view as PNG images using plotters.
//!
//! Layout per image:
//! - Ranked bar: title, one colored bar per category, rotated category labels
//! - Proportion: title, donut with label and percentage annotations

use crate::charts::ChartData;
use crate::views::{ChartKind, ViewSpec};
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::{Path, PathBuf};
use tracing::info;

const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(121, 85, 72),
    RGBColor(96, 125, 139),
];

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every panel of a view to `<dir>/<view>-<n>.png`.
    pub fn export_view(spec: &ViewSpec, dir: &Path, width: u32, height: u32) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(spec.panels.len());

        for (idx, panel) in spec.panels.iter().enumerate() {
            let data = ChartData::from_panel(panel)?;
            let path = dir.join(Self::file_name(spec, idx));
            Self::render_png(&data, &path, width, height)
                .with_context(|| format!("rendering {}", path.display()))?;
            written.push(path);
        }

        info!(view = %spec.view, files = written.len(), dir = %dir.display(), "exported charts");
        Ok(written)
    }

    /// File name for the `idx`-th panel of a view
    pub fn file_name(spec: &ViewSpec, idx: usize) -> String {
        format!("{}-{}.png", spec.view.id(), idx + 1)
    }

    pub fn render_png(data: &ChartData, path: &Path, width: u32, height: u32) -> Result<()> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        match data.kind {
            ChartKind::RankedBar => Self::draw_bars(&root, data)?,
            ChartKind::Proportion => Self::draw_donut(&root, data)?,
        }

        root.present()?;
        Ok(())
    }

    fn draw_bars(root: &Area<'_>, data: &ChartData) -> Result<()> {
        let n = data.shares.len();
        let y_max = data
            .shares
            .iter()
            .map(|s| s.count)
            .fold(0.0_f64, f64::max);
        let labels: Vec<String> = data.shares.iter().map(|s| s.label.clone()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, ("sans-serif", 26))
            .margin(15)
            .x_label_area_size(180)
            .y_label_area_size(80)
            .build_cartesian_2d((0..n.max(1)).into_segmented(), 0.0..(y_max * 1.1).max(1.0))?;

        let label_for = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.max(1))
            .x_label_style(
                ("sans-serif", 13)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_label_formatter(&label_for)
            .y_desc("Number of Incidents")
            .draw()?;

        chart.draw_series(data.shares.iter().enumerate().map(|(i, share)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), share.count),
                ],
                PALETTE[i % PALETTE.len()].filled(),
            );
            bar.set_margin(0, 0, 4, 4);
            bar
        }))?;

        Ok(())
    }

    fn draw_donut(root: &Area<'_>, data: &ChartData) -> Result<()> {
        let area = root.titled(&data.title, ("sans-serif", 26))?;

        let total: f64 = data.shares.iter().map(|s| s.count).sum();
        if total <= 0.0 {
            return Ok(());
        }

        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.4;

        let sizes: Vec<f64> = data.shares.iter().map(|s| s.count).collect();
        let colors: Vec<RGBColor> = (0..sizes.len())
            .map(|i| PALETTE[i % PALETTE.len()])
            .collect();
        let labels: Vec<&str> = data.shares.iter().map(|s| s.label.as_str()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.donut_hole(radius * 0.3);
        pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 16).into_font().color(&WHITE));
        area.draw(&pie)?;

        Ok(())
    }
}
