//! Batch pricing pipeline: reads ride rows from Parquet, quotes each, writes priced rows.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use ridefare_ai::{PriceModel, quote_features};
use ridefare_core::{FeatureVector, SurgeLevel};
use tracing::info;

#[derive(Debug)]
pub struct BatchStats {
    pub total_rows: usize,
    pub surged_rows: usize,
    pub elapsed_secs: f64,
}

/// Run the full batch pipeline: read Parquet → encode → quote → write Parquet.
pub fn run_batch_pipeline<M: PriceModel + ?Sized>(
    model: &M,
    input: &Path,
    output: &Path,
) -> anyhow::Result<BatchStats> {
    let start = Instant::now();

    // 1. Read and validate source rows.
    let batches = ridefare_store::read_parquet(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let requests = ridefare_store::requests_from_batches(&batches)
        .with_context(|| format!("decoding ride rows from {}", input.display()))?;
    let total_rows = requests.len();
    anyhow::ensure!(total_rows > 0, "no ride rows in {}", input.display());

    // 2. Encode and quote every row.
    let mut priced = Vec::with_capacity(total_rows);
    for (row, req) in requests.iter().enumerate() {
        let features = FeatureVector::from_request(req);
        let outcome =
            quote_features(model, &features).with_context(|| format!("pricing row {row}"))?;
        priced.push((features, outcome));
    }
    let surged_rows = priced
        .iter()
        .filter(|(_, o)| o.surge.level != SurgeLevel::NoSurge)
        .count();

    // 3. Write one priced batch.
    let batch = ridefare_store::outcomes_to_batch(&priced, chrono::Utc::now())?;
    ridefare_store::write_parquet(output, &[batch])
        .with_context(|| format!("writing {}", output.display()))?;

    let elapsed_secs = start.elapsed().as_secs_f64();
    info!(total_rows, surged_rows, elapsed_secs, "batch priced");
    Ok(BatchStats {
        total_rows,
        surged_rows,
        elapsed_secs,
    })
}
