use arrow::datatypes::DataType;
use ridefare_core::{ParseError, RequestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("parquet file not found: {0}")]
    ParquetNotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("missing column {0:?}")]
    MissingColumn(&'static str),

    #[error("column {column:?} has unsupported type {found}")]
    ColumnType {
        column: &'static str,
        found: DataType,
    },

    #[error("null {column:?} at row {row}")]
    NullValue { column: &'static str, row: usize },

    #[error("column {column:?} at row {row}: {value} is not a whole number")]
    NotInteger {
        column: &'static str,
        row: usize,
        value: f64,
    },

    #[error("row {row}: {source}")]
    InvalidCategory {
        row: usize,
        #[source]
        source: ParseError,
    },

    #[error("row {row}: {source}")]
    InvalidRequest {
        row: usize,
        #[source]
        source: RequestError,
    },

    #[error("{0}")]
    Other(String),
}
