//! Data module - CSV loading, caching and processing

pub mod cache;
mod catalog;
mod loader;
mod processor;

pub use cache::DatasetCache;
pub use catalog::{TableName, TableShape};
pub use loader::{DataLoader, LoadFailure, Registry, TableLoadError};
pub use processor::{
    DataProcessor, ProcessorError, Share, CATEGORY_COLUMN, COUNT_COLUMN, DEFAULT_TOP_N,
    KEY_COLUMN, VALUE_COLUMN,
};
