//! CSV Data Loader Module
//! Loads the fixed table catalog from a data directory using Polars.

use crate::data::catalog::{TableName, TableShape};
use crate::data::processor::{DataProcessor, ProcessorError};
use polars::prelude::*;
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Why a single table could not be loaded.
#[derive(Error, Debug)]
pub enum TableLoadError {
    #[error("File not found: {}", .file.display())]
    FileNotFound { table: TableName, file: PathBuf },
    #[error("Failed to load CSV {}: {source}", .file.display())]
    Unreadable {
        table: TableName,
        file: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Failed to reshape {table}: {source}")]
    Reshape {
        table: TableName,
        #[source]
        source: ProcessorError,
    },
}

impl TableLoadError {
    pub fn table(&self) -> TableName {
        match self {
            TableLoadError::FileNotFound { table, .. }
            | TableLoadError::Unreadable { table, .. }
            | TableLoadError::Reshape { table, .. } => *table,
        }
    }
}

/// Every table that failed during one load attempt.
#[derive(Debug)]
pub struct LoadFailure {
    pub failures: Vec<TableLoadError>,
}

impl LoadFailure {
    /// File names of the failed tables, in catalog order.
    pub fn failed_files(&self) -> Vec<&'static str> {
        self.failures.iter().map(|f| f.table().file_name()).collect()
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} tables failed to load", self.failures.len(), TableName::ALL.len())?;
        for failure in &self.failures {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadFailure {}

/// Immutable set of all loaded tables. Only built when every table loaded.
#[derive(Debug, Clone)]
pub struct Registry {
    tables: Vec<DataFrame>,
}

impl Registry {
    /// Table for a logical name.
    pub fn get(&self, name: TableName) -> &DataFrame {
        &self.tables[name.index()]
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Loads the table catalog from a base directory.
pub struct DataLoader {
    base_dir: PathBuf,
}

impl DataLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Load all tables. Succeeds only if every table loads; otherwise
    /// reports every failing file.
    pub fn load(&self) -> Result<Registry, LoadFailure> {
        let started = Instant::now();
        info!(dir = %self.base_dir.display(), "loading {} tables", TableName::ALL.len());

        // par_iter + collect keeps catalog order
        let outcomes: Vec<Result<DataFrame, TableLoadError>> = TableName::ALL
            .par_iter()
            .map(|&table| self.load_table(table))
            .collect();

        let mut tables = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(df) => tables.push(df),
                Err(e) => {
                    warn!(table = %e.table(), "{}", e);
                    failures.push(e);
                }
            }
        }

        if !failures.is_empty() {
            return Err(LoadFailure { failures });
        }

        info!(elapsed_ms = started.elapsed().as_millis() as u64, "all tables loaded");
        Ok(Registry { tables })
    }

    /// Load a single table, reshaping it when it is stored wide.
    pub fn load_table(&self, table: TableName) -> Result<DataFrame, TableLoadError> {
        let file = self.base_dir.join(table.file_name());
        if !file.is_file() {
            return Err(TableLoadError::FileNotFound { table, file });
        }

        let df = Self::read_csv(&file).map_err(|source| TableLoadError::Unreadable {
            table,
            file: file.clone(),
            source,
        })?;

        let df = match table.shape() {
            TableShape::Long => df,
            TableShape::Wide => DataProcessor::reshape_wide_to_long(&df)
                .map_err(|source| TableLoadError::Reshape { table, source })?,
        };

        info!(table = %table, rows = df.height(), columns = df.width(), "loaded");
        Ok(df)
    }

    /// Read a CSV file with header and schema inference.
    pub fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()
    }
}
