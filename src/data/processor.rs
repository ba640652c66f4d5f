//! Data Processor Module
//! Reshapes wide tables and prepares ranked / proportion chart data.

use polars::prelude::*;
use std::cmp::Ordering;
use thiserror::Error;

/// Category column of long tables read from disk.
pub const KEY_COLUMN: &str = "key";
/// Count column of long tables read from disk.
pub const VALUE_COLUMN: &str = "value";
/// Category column produced by the wide-to-long reshape.
pub const CATEGORY_COLUMN: &str = "Category";
/// Count column produced by the wide-to-long reshape.
pub const COUNT_COLUMN: &str = "Count";

/// Number of rows kept by a ranked bar chart unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 20;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// One slice of a proportion chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: f64,
    pub percent: f64,
}

/// Handles data reshaping and chart-data preparation.
pub struct DataProcessor;

impl DataProcessor {
    /// Transform a wide table to long format (unpivot every column).
    ///
    /// Output columns: ["Category", "Count"], one row per source cell,
    /// column order first, then row order. Non-numeric cells become null.
    pub fn reshape_wide_to_long(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let cells = df.width() * df.height();
        let mut categories: Vec<String> = Vec::with_capacity(cells);
        let mut counts: Vec<Option<f64>> = Vec::with_capacity(cells);

        for column in df.get_columns() {
            let name = column.name().to_string();
            for value in Self::numeric_values(column)? {
                categories.push(name.clone());
                counts.push(value);
            }
        }

        let long = DataFrame::new(vec![
            Column::new(CATEGORY_COLUMN.into(), categories),
            Column::new(COUNT_COLUMN.into(), counts),
        ])?;

        Ok(long)
    }

    /// Keep the `n` rows with the largest `count_column`, largest first.
    ///
    /// Equal counts keep their input order. Null, NaN and non-numeric counts
    /// sort after every numeric count. Columns are returned unchanged.
    pub fn top_n_by_count(
        df: &DataFrame,
        category_column: &str,
        count_column: &str,
        n: usize,
    ) -> Result<DataFrame, ProcessorError> {
        Self::require_column(df, category_column)?;
        let counts = Self::numeric_values(Self::require_column(df, count_column)?)?;

        let indices: Vec<IdxSize> = Self::ranked_order(&counts)
            .into_iter()
            .take(n)
            .map(|i| i as IdxSize)
            .collect();
        let indices = IdxCa::from_vec("rank".into(), indices);

        Ok(df.take(&indices)?)
    }

    /// Proportion charts consume the long table as-is.
    pub fn proportions(df: &DataFrame) -> DataFrame {
        df.clone()
    }

    /// Percentage share of each row. Null counts contribute zero.
    pub fn proportion_shares(
        df: &DataFrame,
        label_column: &str,
        value_column: &str,
    ) -> Result<Vec<Share>, ProcessorError> {
        let labels = Self::label_values(Self::require_column(df, label_column)?)?;
        let counts = Self::numeric_values(Self::require_column(df, value_column)?)?;

        let total: f64 = counts.iter().flatten().sum();

        Ok(labels
            .into_iter()
            .zip(counts)
            .map(|(label, count)| {
                let count = count.unwrap_or(0.0);
                let percent = if total > 0.0 {
                    count / total * 100.0
                } else {
                    0.0
                };
                Share {
                    label: label.unwrap_or_default(),
                    count,
                    percent,
                }
            })
            .collect())
    }

    /// Maximum value of each numeric column.
    ///
    /// Non-numeric and all-null columns yield `None`.
    pub fn column_maxima(df: &DataFrame) -> Vec<Option<f64>> {
        df.get_columns()
            .iter()
            .map(|column| {
                if !Self::is_numeric(column.dtype()) {
                    return None;
                }
                Self::numeric_values(column)
                    .ok()?
                    .into_iter()
                    .flatten()
                    .reduce(f64::max)
            })
            .collect()
    }

    /// Column-major mask of the cells equal to their column's maximum.
    /// Every tied maximum is marked.
    pub fn max_mask(df: &DataFrame) -> Vec<Vec<bool>> {
        df.get_columns()
            .iter()
            .zip(Self::column_maxima(df))
            .map(|(column, max)| match max {
                Some(max) => Self::numeric_values(column)
                    .map(|values| values.into_iter().map(|v| v == Some(max)).collect())
                    .unwrap_or_else(|_| vec![false; df.height()]),
                None => vec![false; df.height()],
            })
            .collect()
    }

    /// Values of a column as `f64`, with NaN and unparsable cells as `None`.
    pub fn numeric_values(column: &Column) -> Result<Vec<Option<f64>>, ProcessorError> {
        let cast = column.cast(&DataType::Float64)?;
        let ca = cast.f64()?;
        Ok(ca
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Values of a column rendered as strings.
    pub fn label_values(column: &Column) -> Result<Vec<Option<String>>, ProcessorError> {
        let cast = column.cast(&DataType::String)?;
        let ca = cast.str()?;
        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    pub fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ProcessorError> {
        df.column(name)
            .map_err(|_| ProcessorError::ColumnNotFound(name.to_string()))
    }

    /// Stable descending order of row indices; missing counts last.
    fn ranked_order(counts: &[Option<f64>]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..counts.len()).collect();
        order.sort_by(|&a, &b| match (counts[a], counts[b]) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_table(rows: &[(&str, Option<i64>)]) -> DataFrame {
        let keys: Vec<&str> = rows.iter().map(|(k, _)| *k).collect();
        let values: Vec<Option<i64>> = rows.iter().map(|(_, v)| *v).collect();
        DataFrame::new(vec![
            Column::new(KEY_COLUMN.into(), keys),
            Column::new(VALUE_COLUMN.into(), values),
        ])
        .unwrap()
    }

    fn keys(df: &DataFrame) -> Vec<String> {
        DataProcessor::label_values(df.column(KEY_COLUMN).unwrap())
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap_or_default())
            .collect()
    }

    fn counts(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
        DataProcessor::numeric_values(df.column(column).unwrap()).unwrap()
    }

    #[test]
    fn reshape_keeps_column_order_and_sum() {
        let wide = DataFrame::new(vec![
            Column::new("Male".into(), vec![600i64]),
            Column::new("Female".into(), vec![400i64]),
            Column::new("Unknown".into(), vec![10i64]),
        ])
        .unwrap();

        let long = DataProcessor::reshape_wide_to_long(&wide).unwrap();

        assert_eq!(long.height(), 3);
        let categories: Vec<String> =
            DataProcessor::label_values(long.column(CATEGORY_COLUMN).unwrap())
                .unwrap()
                .into_iter()
                .flatten()
                .collect();
        assert_eq!(categories, vec!["Male", "Female", "Unknown"]);
        let values = counts(&long, COUNT_COLUMN);
        assert_eq!(values, vec![Some(600.0), Some(400.0), Some(10.0)]);
        assert_eq!(values.iter().flatten().sum::<f64>(), 1010.0);
    }

    #[test]
    fn reshape_turns_text_cells_into_nulls() {
        let wide = DataFrame::new(vec![
            Column::new("Male".into(), vec!["12"]),
            Column::new("Female".into(), vec!["n/a"]),
        ])
        .unwrap();

        let long = DataProcessor::reshape_wide_to_long(&wide).unwrap();

        assert_eq!(counts(&long, COUNT_COLUMN), vec![Some(12.0), None]);
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let rows: Vec<(String, Option<i64>)> =
            (0..30).map(|i| (format!("c{i}"), Some(i as i64))).collect();
        let borrowed: Vec<(&str, Option<i64>)> =
            rows.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let df = long_table(&borrowed);

        let ranked = DataProcessor::top_n_by_count(&df, KEY_COLUMN, VALUE_COLUMN, 20).unwrap();

        assert_eq!(ranked.height(), 20);
        let values: Vec<f64> = counts(&ranked, VALUE_COLUMN).into_iter().flatten().collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(values[0], 29.0);
        assert_eq!(values[19], 10.0);
    }

    #[test]
    fn top_n_returns_everything_for_short_tables() {
        let df = long_table(&[("a", Some(1)), ("b", Some(3))]);
        let ranked = DataProcessor::top_n_by_count(&df, KEY_COLUMN, VALUE_COLUMN, 20).unwrap();
        assert_eq!(keys(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let df = long_table(&[
            ("first", Some(5)),
            ("big", Some(9)),
            ("second", Some(5)),
            ("third", Some(5)),
        ]);
        let ranked = DataProcessor::top_n_by_count(&df, KEY_COLUMN, VALUE_COLUMN, 20).unwrap();
        assert_eq!(keys(&ranked), vec!["big", "first", "second", "third"]);
    }

    #[test]
    fn missing_counts_sort_last() {
        let df = long_table(&[("none", None), ("low", Some(1)), ("high", Some(7))]);
        let ranked = DataProcessor::top_n_by_count(&df, KEY_COLUMN, VALUE_COLUMN, 20).unwrap();
        assert_eq!(keys(&ranked), vec!["high", "low", "none"]);
    }

    #[test]
    fn top_n_keeps_original_dtype() {
        let df = long_table(&[("a", Some(1)), ("b", Some(2))]);
        let ranked = DataProcessor::top_n_by_count(&df, KEY_COLUMN, VALUE_COLUMN, 1).unwrap();
        assert_eq!(ranked.column(VALUE_COLUMN).unwrap().dtype(), &DataType::Int64);
        assert_eq!(ranked.width(), 2);
    }

    #[test]
    fn unknown_column_is_reported() {
        let df = long_table(&[("a", Some(1))]);
        let err = DataProcessor::top_n_by_count(&df, KEY_COLUMN, "missing", 20).unwrap_err();
        assert!(matches!(err, ProcessorError::ColumnNotFound(name) if name == "missing"));
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let df = DataFrame::new(vec![
            Column::new(CATEGORY_COLUMN.into(), vec!["Male", "Female", "Unknown"]),
            Column::new(COUNT_COLUMN.into(), vec![600.0, 400.0, 10.0]),
        ])
        .unwrap();

        let shares =
            DataProcessor::proportion_shares(&df, CATEGORY_COLUMN, COUNT_COLUMN).unwrap();

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].label, "Male");
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn shares_of_empty_total_are_zero() {
        let df = DataFrame::new(vec![
            Column::new(CATEGORY_COLUMN.into(), vec!["Male", "Female"]),
            Column::new(COUNT_COLUMN.into(), vec![0.0, 0.0]),
        ])
        .unwrap();

        let shares =
            DataProcessor::proportion_shares(&df, CATEGORY_COLUMN, COUNT_COLUMN).unwrap();
        assert!(shares.iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn maxima_skip_text_columns() {
        let df = long_table(&[("a", Some(4)), ("b", Some(9)), ("c", Some(9))]);
        assert_eq!(DataProcessor::column_maxima(&df), vec![None, Some(9.0)]);
    }

    #[test]
    fn max_mask_marks_every_tied_maximum() {
        let df = long_table(&[("a", Some(4)), ("b", Some(9)), ("c", None), ("d", Some(9))]);
        assert_eq!(
            DataProcessor::max_mask(&df),
            vec![
                vec![false, false, false, false],
                vec![false, true, false, true],
            ]
        );
    }
}
