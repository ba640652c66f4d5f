//! Chart Plotter Module
//! Draws ranked bar charts, donut charts and data grids with egui / egui_plot.

use crate::data::{DataProcessor, ProcessorError, Share};
use crate::views::{ChartKind, Panel};
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, Plot};
use polars::prelude::DataFrame;
use std::f32::consts::{FRAC_PI_2, TAU};

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Background of the per-column maximum in data grids
pub const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(144, 238, 144);

/// Donut hole as a fraction of the outer radius
const DONUT_HOLE: f32 = 0.3;
/// Slices narrower than this get no inline label
const MIN_LABELED_PERCENT: f64 = 3.0;

/// Chart-ready values of one panel
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub kind: ChartKind,
    pub shares: Vec<Share>,
}

impl ChartData {
    pub fn from_panel(panel: &Panel) -> Result<Self, ProcessorError> {
        let shares =
            DataProcessor::proportion_shares(&panel.data, panel.label_column(), panel.value_column())?;
        Ok(Self {
            title: panel.title.clone(),
            kind: panel.chart,
            shares,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// String cells of a DataFrame plus the rows to highlight
#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub headers: Vec<String>,
    /// Column-major cell text
    pub columns: Vec<Vec<String>>,
    /// Column-major mask of highlighted cells
    pub highlight: Vec<Vec<bool>>,
    pub row_count: usize,
}

impl TableData {
    /// Grid for a panel. Ranked grids highlight each column's maximum,
    /// proportion grids are shown plain.
    pub fn from_panel(panel: &Panel) -> Result<Self, ProcessorError> {
        let table = Self::from_frame(&panel.data)?;
        Ok(match panel.chart {
            ChartKind::RankedBar => table,
            ChartKind::Proportion => table.without_highlight(),
        })
    }

    pub fn from_frame(df: &DataFrame) -> Result<Self, ProcessorError> {
        let headers = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let columns = df
            .get_columns()
            .iter()
            .map(|col| {
                DataProcessor::label_values(col)
                    .map(|values| values.into_iter().map(Option::unwrap_or_default).collect())
            })
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(Self {
            headers,
            columns,
            highlight: DataProcessor::max_mask(df),
            row_count: df.height(),
        })
    }

    pub fn without_highlight(mut self) -> Self {
        self.highlight.clear();
        self
    }

    pub fn is_highlighted(&self, column: usize, row: usize) -> bool {
        self.highlight
            .get(column)
            .and_then(|cells| cells.get(row))
            .copied()
            .unwrap_or(false)
    }
}

/// Creates dashboard charts using egui_plot and the egui painter.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Ranked bar chart: one colored bar per category, largest first.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, data: &ChartData, height: f32) {
        ui.label(RichText::new(&data.title).size(14.0).strong());

        let labels: Vec<String> = data.shares.iter().map(|s| s.label.clone()).collect();
        let bars: Vec<Bar> = data
            .shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                Bar::new(i as f64, share.count)
                    .name(&share.label)
                    .fill(Self::color(i))
                    .width(0.7)
            })
            .collect();

        Plot::new(format!("bar_{}", id))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_x(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&data.title));
            });
    }

    /// Donut chart with percentage + label annotations and a legend.
    pub fn draw_donut_chart(ui: &mut egui::Ui, data: &ChartData, size: f32) {
        ui.label(RichText::new(&data.title).size(14.0).strong());

        let width = ui.available_width();
        let (response, painter) = ui.allocate_painter(egui::vec2(width, size), Sense::hover());
        let center = response.rect.center();
        let outer = size * 0.45;
        let inner = outer * DONUT_HOLE;

        let total: f64 = data.shares.iter().map(|s| s.count).sum();
        if total <= 0.0 {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No Data",
                FontId::proportional(16.0),
                ui.visuals().text_color(),
            );
            return;
        }

        let polar = |radius: f32, angle: f32| -> Pos2 {
            center + egui::vec2(angle.cos(), angle.sin()) * radius
        };

        // start at 12 o'clock, clockwise on screen
        let mut start = -FRAC_PI_2;
        for (i, share) in data.shares.iter().enumerate() {
            let sweep = TAU * (share.count / total) as f32;
            if sweep <= 0.0 {
                continue;
            }
            let color = Self::color(i);

            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            for k in 0..steps {
                let a0 = start + sweep * k as f32 / steps as f32;
                let a1 = start + sweep * (k + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![polar(outer, a0), polar(outer, a1), polar(inner, a1), polar(inner, a0)],
                    color,
                    Stroke::NONE,
                ));
            }

            if share.percent >= MIN_LABELED_PERCENT {
                painter.text(
                    polar((outer + inner) / 2.0, start + sweep / 2.0),
                    Align2::CENTER_CENTER,
                    format!("{}\n{:.1}%", share.label, share.percent),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }

            start += sweep;
        }

        Self::draw_legend(ui, data);
    }

    fn draw_legend(ui: &mut egui::Ui, data: &ChartData) {
        ui.horizontal_wrapped(|ui| {
            for (i, share) in data.shares.iter().enumerate() {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                ui.painter().rect_filled(rect, 3.0, Self::color(i));
                ui.label(RichText::new(format!("{} ({:.1}%)", share.label, share.percent)).size(12.0));
                ui.add_space(10.0);
            }
        });
    }

    /// Draw a panel's chart according to its kind
    pub fn draw_chart(ui: &mut egui::Ui, id: &str, data: &ChartData) {
        match data.kind {
            ChartKind::RankedBar => Self::draw_bar_chart(ui, id, data, 320.0),
            ChartKind::Proportion => Self::draw_donut_chart(ui, data, 320.0),
        }
    }

    /// Draw a data grid, highlighting each numeric column's maximum
    pub fn draw_data_table(ui: &mut egui::Ui, id: &str, table: &TableData) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("data_table_{}", id)))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in &table.headers {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in 0..table.row_count {
                            for (col, cells) in table.columns.iter().enumerate() {
                                let text = cells.get(row).map(String::as_str).unwrap_or("");
                                let mut cell = RichText::new(text).size(11.0);
                                if table.is_highlighted(col, row) {
                                    cell = cell.background_color(HIGHLIGHT_COLOR).color(Color32::BLACK);
                                }
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
