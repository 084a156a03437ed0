/// Arrow schema definitions for price model input and batch pricing.
pub mod model {
    use arrow::array::{ArrayRef, Float64Array, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    use crate::features::{FEATURE_NAMES, FeatureVector};

    /// Feature columns carried as floats; every other feature is an integer code.
    const FLOAT_FEATURES: &[&str] = &["Average_Ratings", "Demand_Supply_Ratio"];

    fn feature_fields() -> Vec<Field> {
        FEATURE_NAMES
            .iter()
            .map(|&name| {
                let dt = if FLOAT_FEATURES.contains(&name) {
                    DataType::Float64
                } else {
                    DataType::Int64
                };
                Field::new(name, dt, false)
            })
            .collect()
    }

    /// Schema of the encoded model input, columns in contract order.
    pub fn price_model_input_schema() -> Schema {
        Schema::new(feature_fields())
    }

    /// Schema of raw ride rows as found in the pricing dataset.
    ///
    /// Same column names as the model input minus the two derived features,
    /// with categorical columns as strings.
    pub fn ride_request_schema() -> Schema {
        Schema::new(vec![
            Field::new("Number_of_Riders", DataType::Int64, false),
            Field::new("Number_of_Drivers", DataType::Int64, false),
            Field::new("Location_Category", DataType::Utf8, false),
            Field::new("Customer_Loyalty_Status", DataType::Utf8, false),
            Field::new("Number_of_Past_Rides", DataType::Int64, false),
            Field::new("Average_Ratings", DataType::Float64, false),
            Field::new("Time_of_Booking", DataType::Utf8, false),
            Field::new("Vehicle_Type", DataType::Utf8, false),
            Field::new("Expected_Ride_Duration", DataType::Int64, false),
        ])
    }

    /// Schema of a priced batch: the model input followed by the quote.
    pub fn priced_ride_schema() -> Schema {
        let mut fields = feature_fields();
        fields.extend([
            Field::new("predicted_price", DataType::Float64, false),
            Field::new("base_price", DataType::Float64, false),
            Field::new("surge_multiplier", DataType::Float64, false),
            Field::new("surge_level", DataType::Utf8, false),
            Field::new(
                "priced_at",
                DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
                false,
            ),
        ]);
        Schema::new(fields)
    }

    /// One column per feature, in contract order.
    pub fn feature_columns(features: &[FeatureVector]) -> Vec<ArrayRef> {
        fn ints(features: &[FeatureVector], f: fn(&FeatureVector) -> i64) -> ArrayRef {
            Arc::new(Int64Array::from_iter_values(features.iter().map(f)))
        }
        fn floats(features: &[FeatureVector], f: fn(&FeatureVector) -> f64) -> ArrayRef {
            Arc::new(Float64Array::from_iter_values(features.iter().map(f)))
        }

        vec![
            ints(features, |f| f.riders),
            ints(features, |f| f.drivers),
            ints(features, |f| f.location_category),
            ints(features, |f| f.loyalty_status),
            ints(features, |f| f.past_rides),
            floats(features, |f| f.average_rating),
            ints(features, |f| f.time_of_booking),
            ints(features, |f| f.vehicle_type),
            ints(features, |f| f.expected_duration),
            floats(features, |f| f.demand_supply_ratio),
            ints(features, |f| f.peak_time),
        ]
    }

    /// Encode feature vectors as a RecordBatch in [`price_model_input_schema`].
    pub fn features_to_batch(features: &[FeatureVector]) -> Result<RecordBatch, ArrowError> {
        RecordBatch::try_new(
            Arc::new(price_model_input_schema()),
            feature_columns(features),
        )
    }
}
