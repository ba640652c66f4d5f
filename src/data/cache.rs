//! Dataset Cache Module
//! Loads the registry once and serves the same outcome for the process lifetime.

use crate::data::loader::{DataLoader, LoadFailure, Registry};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::info;

/// Memoized loader outcome. Populated on first [`DatasetCache::get`],
/// never reloaded and never torn down.
pub struct DatasetCache {
    loader: DataLoader,
    outcome: OnceCell<Result<Registry, LoadFailure>>,
}

impl DatasetCache {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader: DataLoader::new(base_dir),
            outcome: OnceCell::new(),
        }
    }

    /// Registry, or the failure recorded by the first load attempt.
    pub fn get(&self) -> Result<&Registry, &LoadFailure> {
        self.outcome.get_or_init(|| self.loader.load()).as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.outcome.get().is_some()
    }

    pub fn base_dir(&self) -> &Path {
        self.loader.base_dir()
    }
}

static GLOBAL: OnceCell<DatasetCache> = OnceCell::new();

/// Install the process-wide cache. The first call wins; later calls
/// return the already-installed cache.
pub fn init_global(base_dir: impl Into<PathBuf>) -> &'static DatasetCache {
    GLOBAL.get_or_init(|| {
        let cache = DatasetCache::new(base_dir);
        info!(dir = %cache.base_dir().display(), "dataset cache installed");
        cache
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::TableName;
    use tempfile::tempdir;

    #[test]
    fn failure_is_cached() {
        let tmp = tempdir().unwrap();
        let cache = DatasetCache::new(tmp.path());
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap_err();
        assert_eq!(first.failures.len(), TableName::ALL.len());
        assert!(cache.is_loaded());

        // a file written after the first access is not picked up
        std::fs::write(
            tmp.path().join(TableName::OffenseLinked.file_name()),
            "key,value\na,1\n",
        )
        .unwrap();
        let second = cache.get().unwrap_err();
        assert_eq!(second.failures.len(), TableName::ALL.len());
    }

    #[test]
    fn first_global_install_wins() {
        let first_dir = tempdir().unwrap();
        let second_dir = tempdir().unwrap();

        let first = init_global(first_dir.path());
        let second = init_global(second_dir.path());

        assert!(std::ptr::eq(first, second));
        assert_eq!(second.base_dir(), first_dir.path());
    }
}
