//! Crime Dashboard - pre-aggregated crime statistics as charts and tables
//!
//! Loads a fixed set of CSV tables once, reshapes and ranks them, and maps
//! each dashboard view to the charts it renders.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod views;

pub use config::DashboardConfig;
pub use data::{DataLoader, DataProcessor, DatasetCache, LoadFailure, Registry, TableName};
pub use views::{select_view, ChartKind, LayoutHint, ViewError, ViewId, ViewSpec};
