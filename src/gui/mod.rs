//! GUI module - User interface components

mod app;
mod navigation;
mod view_panel;

pub use app::DashboardApp;
pub use navigation::{NavigationAction, NavigationPanel};
pub use view_panel::ViewPanel;
