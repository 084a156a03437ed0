mod batch;
mod display;

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ridefare_core::ride::{
    DEFAULT_DRIVERS, DEFAULT_DURATION_MINUTES, DEFAULT_PAST_RIDES, DEFAULT_RATING, DEFAULT_RIDERS,
};
use ridefare_core::{
    FeatureVector, LocationCategory, LoyaltyStatus, RideRequest, TimeOfBooking, VehicleType,
    classify, model,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ridefare", version, about = "Dynamic ride pricing from a trained fare model")]
struct Cli {
    /// Price model artifact (.json linear model, or .onnx when built with `onnx`).
    #[arg(
        long,
        global = true,
        env = "RIDEFARE_MODEL",
        default_value = "model/dp_price_model.json"
    )]
    model: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Quote one ride and show base vs surge price.
    Quote {
        #[command(flatten)]
        ride: RideArgs,
        /// Emit the request, features, and outcome as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Classify a demand/supply ratio into a surge tier.
    Surge { ratio: f64 },
    /// Show the encoded model input for a ride, without loading a model.
    Features {
        #[command(flatten)]
        ride: RideArgs,
        #[arg(long)]
        json: bool,
    },
    /// Price every row of a Parquet file of rides.
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the model input contract.
    Schema,
}

#[derive(Args)]
struct RideArgs {
    #[arg(long, default_value_t = DEFAULT_RIDERS)]
    riders: NonZeroU32,
    #[arg(long, default_value_t = DEFAULT_DRIVERS)]
    drivers: NonZeroU32,
    /// Urban, Suburban, or Rural.
    #[arg(long, default_value_t = LocationCategory::Urban)]
    location: LocationCategory,
    /// Regular, Silver, or Gold.
    #[arg(long, default_value_t = LoyaltyStatus::Regular)]
    loyalty: LoyaltyStatus,
    #[arg(long, default_value_t = DEFAULT_PAST_RIDES)]
    past_rides: u32,
    /// Average customer rating, 1.0 to 5.0.
    #[arg(long, default_value_t = DEFAULT_RATING)]
    rating: f64,
    /// Morning, Afternoon, Evening, or Night.
    #[arg(long, default_value_t = TimeOfBooking::Morning)]
    time: TimeOfBooking,
    /// Economy or Premium.
    #[arg(long, default_value_t = VehicleType::Economy)]
    vehicle: VehicleType,
    /// Expected ride duration in minutes, 5 to 180.
    #[arg(long, default_value_t = DEFAULT_DURATION_MINUTES)]
    duration: u32,
}

impl From<RideArgs> for RideRequest {
    fn from(a: RideArgs) -> Self {
        Self {
            riders: a.riders,
            drivers: a.drivers,
            location: a.location,
            loyalty: a.loyalty,
            past_rides: a.past_rides,
            average_rating: a.rating,
            time_of_booking: a.time,
            vehicle: a.vehicle,
            expected_duration_minutes: a.duration,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("ridefare v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Quote { ride, json } => cmd_quote(&cli.model, ride.into(), json),
        Command::Surge { ratio } => cmd_surge(ratio),
        Command::Features { ride, json } => cmd_features(ride.into(), json),
        Command::Batch { input, output } => cmd_batch(&cli.model, &input, &output),
        Command::Schema => {
            println!("Price model input ({} features):", ridefare_core::FEATURE_COUNT);
            display::print_schema(&model::price_model_input_schema());
            Ok(())
        }
    }
}

fn cmd_quote(model_path: &Path, ride: RideRequest, json: bool) -> anyhow::Result<()> {
    ride.validate()?;
    let model = ridefare_ai::shared_model(model_path)
        .with_context(|| format!("loading price model {}", model_path.display()))?;
    let outcome = ridefare_ai::quote(model, &ride)?;

    if json {
        let doc = serde_json::json!({
            "request": ride,
            "features": FeatureVector::from_request(&ride),
            "outcome": outcome,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        display::print_quote(&ride, &outcome);
    }
    Ok(())
}

fn cmd_surge(ratio: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        ratio.is_finite() && ratio >= 0.0,
        "ratio must be a finite non-negative number, got {ratio}"
    );
    display::print_surge(ratio, &classify(ratio));
    Ok(())
}

fn cmd_features(ride: RideRequest, json: bool) -> anyhow::Result<()> {
    ride.validate()?;
    let features = FeatureVector::from_request(&ride);
    if json {
        println!("{}", serde_json::to_string_pretty(&features)?);
    } else {
        display::print_features(&features);
    }
    Ok(())
}

fn cmd_batch(model_path: &Path, input: &Path, output: &Path) -> anyhow::Result<()> {
    let model = ridefare_ai::shared_model(model_path)
        .with_context(|| format!("loading price model {}", model_path.display()))?;

    eprintln!("Pricing rides from {}...", input.display());
    let stats = batch::run_batch_pipeline(model, input, output)?;
    eprintln!(
        "  {} rows priced ({} with surge) in {:.2}s → {}",
        stats.total_rows,
        stats.surged_rows,
        stats.elapsed_secs,
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quote_defaults_match_form() {
        let cli = Cli::try_parse_from(["ridefare", "quote"]).unwrap();
        let Command::Quote { ride, json } = cli.command else {
            panic!("expected quote");
        };
        assert!(!json);
        assert_eq!(RideRequest::from(ride), RideRequest::default());
        assert_eq!(cli.model, PathBuf::from("model/dp_price_model.json"));
    }

    #[test]
    fn quote_flags_parse_case_insensitively() {
        let cli = Cli::try_parse_from([
            "ridefare", "quote", "--riders", "30", "--drivers", "30", "--location", "rural",
            "--loyalty", "gold", "--time", "night", "--vehicle", "premium", "--rating", "4.9",
            "--duration", "120", "--past-rides", "0",
        ])
        .unwrap();
        let Command::Quote { ride, .. } = cli.command else {
            panic!("expected quote");
        };
        let req = RideRequest::from(ride);
        assert_eq!(req.demand_supply_ratio(), 1.0);
        assert_eq!(req.location, LocationCategory::Rural);
        assert_eq!(req.loyalty, LoyaltyStatus::Gold);
        assert_eq!(req.time_of_booking, TimeOfBooking::Night);
        assert_eq!(req.vehicle, VehicleType::Premium);
        assert_eq!(req.past_rides, 0);
        assert_eq!(req.expected_duration_minutes, 120);
    }

    #[test]
    fn zero_drivers_rejected_by_parser() {
        assert!(Cli::try_parse_from(["ridefare", "quote", "--drivers", "0"]).is_err());
    }

    #[test]
    fn unknown_category_rejected_by_parser() {
        assert!(Cli::try_parse_from(["ridefare", "quote", "--vehicle", "Scooter"]).is_err());
    }

    #[test]
    fn model_path_flag_is_global() {
        let cli = Cli::try_parse_from([
            "ridefare", "batch", "--input", "a.parquet", "--output", "b.parquet", "--model",
            "m.json",
        ])
        .unwrap();
        assert_eq!(cli.model, PathBuf::from("m.json"));
    }

    #[test]
    fn out_of_range_rating_fails_validation() {
        let cli = Cli::try_parse_from(["ridefare", "features", "--rating", "6"]).unwrap();
        let Command::Features { ride, json } = cli.command else {
            panic!("expected features");
        };
        assert!(cmd_features(ride.into(), json).is_err());
    }

    fn bundled_model() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../model/dp_price_model.json")
    }

    // Both tests below load the bundled model through the process-wide slot.
    #[test]
    fn default_quote_through_bundled_model() {
        cmd_quote(&bundled_model(), RideRequest::default(), true).unwrap();

        let model = ridefare_ai::shared_model(&bundled_model()).unwrap();
        let outcome = ridefare_ai::quote(model, &RideRequest::default()).unwrap();
        assert_eq!(outcome.surge.level, ridefare_core::SurgeLevel::ExtremeSurge);
        assert!(outcome.predicted_price > 0.0);
        assert!((outcome.base_price * 2.0 - outcome.predicted_price).abs() < 1e-9);
    }

    #[test]
    fn batch_through_bundled_model() {
        use arrow::array::{Array, Float64Array};

        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("rides.parquet");
        let output = dir.path().join("priced.parquet");
        batch::tests::write_rides(&input, &[1, 30], &[1000, 20]);

        cmd_batch(&bundled_model(), &input, &output).unwrap();

        let priced = ridefare_store::read_parquet(&output).unwrap();
        let predicted = priced[0]
            .column_by_name("predicted_price")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(predicted.len(), 2);
        assert!(predicted.values().iter().all(|&p| p > 0.0));
    }

    #[test]
    fn negative_ratio_rejected() {
        assert!(cmd_surge(f64::NAN).is_err());
        assert!(cmd_surge(-0.5).is_err());
        assert!(cmd_surge(1.25).is_ok());
    }
}
