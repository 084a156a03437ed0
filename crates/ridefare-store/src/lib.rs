//! Storage layer: Parquet files of ride rows in, priced rides out.

mod error;
pub use error::StoreError;

mod parquet_io;
pub use parquet_io::{read_parquet, write_parquet};

mod rides;
pub use rides::{outcomes_to_batch, requests_from_batches};
