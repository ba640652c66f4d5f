//! Views module - Navigation choices and their render instructions

mod selector;

pub use selector::{
    build_view, select_view, ChartKind, LayoutHint, Panel, ViewError, ViewId, ViewSpec,
};
