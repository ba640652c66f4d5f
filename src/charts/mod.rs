//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartData, ChartPlotter, TableData, HIGHLIGHT_COLOR, PALETTE};
pub use renderer::StaticChartRenderer;
