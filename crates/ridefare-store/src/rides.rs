//! Conversion between Arrow batches and ride pricing types.
//!
//! Input rows follow [`ride_request_schema`](ridefare_core::model::ride_request_schema):
//! the pricing dataset's column names, categories as strings. Numeric columns
//! are accepted as Int32, Int64, or whole-valued Float64, since CSV-derived
//! Parquet files are not consistent about it. Category columns may also be
//! dictionary-encoded, as pandas writes its `category` dtype.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray, TimestampNanosecondArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use ridefare_core::ride::{non_negative_count, positive_count};
use ridefare_core::{FeatureVector, PricingOutcome, RideRequest, model};

use crate::StoreError;

const RIDERS: &str = "Number_of_Riders";
const DRIVERS: &str = "Number_of_Drivers";
const LOCATION: &str = "Location_Category";
const LOYALTY: &str = "Customer_Loyalty_Status";
const PAST_RIDES: &str = "Number_of_Past_Rides";
const RATING: &str = "Average_Ratings";
const TIME: &str = "Time_of_Booking";
const VEHICLE: &str = "Vehicle_Type";
const DURATION: &str = "Expected_Ride_Duration";

/// Build validated ride requests from raw ride rows.
///
/// Row numbers in errors count from zero across all batches.
pub fn requests_from_batches(batches: &[RecordBatch]) -> Result<Vec<RideRequest>, StoreError> {
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    let mut requests = Vec::with_capacity(total);
    let mut offset = 0;

    for batch in batches {
        let riders = column(batch, RIDERS)?;
        let drivers = column(batch, DRIVERS)?;
        let location = text_column(batch, LOCATION)?;
        let loyalty = text_column(batch, LOYALTY)?;
        let past_rides = column(batch, PAST_RIDES)?;
        let rating = column(batch, RATING)?;
        let time = text_column(batch, TIME)?;
        let vehicle = text_column(batch, VEHICLE)?;
        let duration = column(batch, DURATION)?;

        for i in 0..batch.num_rows() {
            let row = offset + i;
            let invalid = |source| StoreError::InvalidRequest { row, source };
            let category = |source| StoreError::InvalidCategory { row, source };

            let req = RideRequest {
                riders: positive_count(RIDERS, int_at(riders, RIDERS, i, row)?)
                    .map_err(invalid)?,
                drivers: positive_count(DRIVERS, int_at(drivers, DRIVERS, i, row)?)
                    .map_err(invalid)?,
                location: str_at(location.as_ref(), LOCATION, i, row)?
                    .parse()
                    .map_err(category)?,
                loyalty: str_at(loyalty.as_ref(), LOYALTY, i, row)?
                    .parse()
                    .map_err(category)?,
                past_rides: non_negative_count(PAST_RIDES, int_at(past_rides, PAST_RIDES, i, row)?)
                    .map_err(invalid)?,
                average_rating: float_at(rating, RATING, i, row)?,
                time_of_booking: str_at(time.as_ref(), TIME, i, row)?.parse().map_err(category)?,
                vehicle: str_at(vehicle.as_ref(), VEHICLE, i, row)?
                    .parse()
                    .map_err(category)?,
                expected_duration_minutes: non_negative_count(
                    DURATION,
                    int_at(duration, DURATION, i, row)?,
                )
                .map_err(invalid)?,
            };
            req.validate().map_err(invalid)?;
            requests.push(req);
        }
        offset += batch.num_rows();
    }

    Ok(requests)
}

/// Build one priced batch in [`model::priced_ride_schema`].
pub fn outcomes_to_batch(
    rows: &[(FeatureVector, PricingOutcome)],
    priced_at: DateTime<Utc>,
) -> Result<RecordBatch, StoreError> {
    let nanos = priced_at
        .timestamp_nanos_opt()
        .ok_or_else(|| StoreError::Other(format!("timestamp out of range: {priced_at}")))?;
    let n = rows.len();

    let features: Vec<FeatureVector> = rows.iter().map(|(f, _)| *f).collect();
    let mut columns = model::feature_columns(&features);

    let outcome_f64 = |f: fn(&PricingOutcome) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|(_, o)| f(o))))
    };
    columns.push(outcome_f64(|o| o.predicted_price));
    columns.push(outcome_f64(|o| o.base_price));
    columns.push(outcome_f64(|o| o.surge.multiplier));
    columns.push(Arc::new(StringArray::from_iter_values(
        rows.iter().map(|(_, o)| o.surge.level.label()),
    )));
    columns.push(Arc::new(
        TimestampNanosecondArray::from(vec![nanos; n]).with_timezone("UTC"),
    ));

    Ok(RecordBatch::try_new(
        Arc::new(model::priced_ride_schema()),
        columns,
    )?)
}

// ── Column access ──

fn column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a dyn Array, StoreError> {
    batch
        .column_by_name(name)
        .map(|c| c.as_ref())
        .ok_or(StoreError::MissingColumn(name))
}

/// Category column as plain strings; dictionary-encoded columns are decoded.
fn text_column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef, StoreError> {
    let col = batch
        .column_by_name(name)
        .ok_or(StoreError::MissingColumn(name))?;
    match col.data_type() {
        DataType::Dictionary(_, value) if value.as_ref() == &DataType::Utf8 => {
            Ok(cast(col.as_ref(), &DataType::Utf8)?)
        }
        DataType::Dictionary(_, value) if value.as_ref() == &DataType::LargeUtf8 => {
            Ok(cast(col.as_ref(), &DataType::LargeUtf8)?)
        }
        _ => Ok(Arc::clone(col)),
    }
}

fn check_null(col: &dyn Array, name: &'static str, i: usize, row: usize) -> Result<(), StoreError> {
    if col.is_null(i) {
        return Err(StoreError::NullValue { column: name, row });
    }
    Ok(())
}

/// Integer value from an Int32, Int64, or whole-valued Float64 column.
fn int_at(col: &dyn Array, name: &'static str, i: usize, row: usize) -> Result<i64, StoreError> {
    check_null(col, name, i, row)?;
    match col.data_type() {
        DataType::Int64 => Ok(col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(i))
            .unwrap_or_default()),
        DataType::Int32 => Ok(col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| i64::from(a.value(i)))
            .unwrap_or_default()),
        DataType::Float64 => {
            let value = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .map(|a| a.value(i))
                .unwrap_or_default();
            if value.fract() != 0.0 || !value.is_finite() {
                return Err(StoreError::NotInteger {
                    column: name,
                    row,
                    value,
                });
            }
            Ok(value as i64)
        }
        other => Err(StoreError::ColumnType {
            column: name,
            found: other.clone(),
        }),
    }
}

/// Float value from a Float64, Float32, or integer column.
///
/// Float32 values go through their shortest decimal form, so a stored 4.2
/// reads back as 4.2 rather than the widened 4.199999809265137.
fn float_at(col: &dyn Array, name: &'static str, i: usize, row: usize) -> Result<f64, StoreError> {
    check_null(col, name, i, row)?;
    match col.data_type() {
        DataType::Float64 => Ok(col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(i))
            .unwrap_or_default()),
        DataType::Float32 => Ok(col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| widen_f32(a.value(i)))
            .unwrap_or_default()),
        DataType::Int64 | DataType::Int32 => int_at(col, name, i, row).map(|v| v as f64),
        other => Err(StoreError::ColumnType {
            column: name,
            found: other.clone(),
        }),
    }
}

fn widen_f32(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(f64::from(v))
}

/// String value from a Utf8 or LargeUtf8 column.
fn str_at<'a>(
    col: &'a dyn Array,
    name: &'static str,
    i: usize,
    row: usize,
) -> Result<&'a str, StoreError> {
    check_null(col, name, i, row)?;
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        return Ok(arr.value(i));
    }
    if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        return Ok(arr.value(i));
    }
    Err(StoreError::ColumnType {
        column: name,
        found: col.data_type().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::DictionaryArray;
    use arrow::datatypes::{Field, Int32Type, Schema};
    use ridefare_core::{LocationCategory, LoyaltyStatus, SurgeLevel, TimeOfBooking, VehicleType};

    struct Row {
        riders: i64,
        drivers: i64,
        location: &'static str,
        loyalty: &'static str,
        past: i64,
        rating: f64,
        time: &'static str,
        vehicle: &'static str,
        duration: i64,
    }

    const BASE: Row = Row {
        riders: 90,
        drivers: 45,
        location: "Urban",
        loyalty: "Silver",
        past: 13,
        rating: 4.47,
        time: "Night",
        vehicle: "Premium",
        duration: 90,
    };

    fn rides_batch(rows: &[Row]) -> RecordBatch {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.riders))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.drivers))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.location))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.loyalty))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.past))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.rating))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.time))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.vehicle))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.duration))),
        ];
        RecordBatch::try_new(Arc::new(model::ride_request_schema()), columns).unwrap()
    }

    #[test]
    fn converts_dataset_rows() {
        let batch = rides_batch(&[
            BASE,
            Row {
                location: "rural",
                loyalty: "Regular",
                time: "Afternoon",
                vehicle: "Economy",
                ..BASE
            },
        ]);
        let reqs = requests_from_batches(&[batch]).unwrap();
        assert_eq!(reqs.len(), 2);

        assert_eq!(reqs[0].riders.get(), 90);
        assert_eq!(reqs[0].drivers.get(), 45);
        assert_eq!(reqs[0].location, LocationCategory::Urban);
        assert_eq!(reqs[0].loyalty, LoyaltyStatus::Silver);
        assert_eq!(reqs[0].past_rides, 13);
        assert_eq!(reqs[0].average_rating, 4.47);
        assert_eq!(reqs[0].time_of_booking, TimeOfBooking::Night);
        assert_eq!(reqs[0].vehicle, VehicleType::Premium);
        assert_eq!(reqs[0].expected_duration_minutes, 90);

        assert_eq!(reqs[1].location, LocationCategory::Rural);
        assert_eq!(reqs[1].time_of_booking, TimeOfBooking::Afternoon);
    }

    #[test]
    fn zero_drivers_rejected_with_row() {
        let batch = rides_batch(&[BASE, Row { drivers: 0, ..BASE }]);
        match requests_from_batches(&[batch]).unwrap_err() {
            StoreError::InvalidRequest { row, .. } => assert_eq!(row, 1),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn row_numbers_span_batches() {
        let first = rides_batch(&[BASE, BASE]);
        let second = rides_batch(&[Row {
            vehicle: "Helicopter",
            ..BASE
        }]);
        match requests_from_batches(&[first, second]).unwrap_err() {
            StoreError::InvalidCategory { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source.value, "Helicopter");
            }
            other => panic!("expected InvalidCategory, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_duration_rejected() {
        let batch = rides_batch(&[Row {
            duration: 200,
            ..BASE
        }]);
        assert!(matches!(
            requests_from_batches(&[batch]),
            Err(StoreError::InvalidRequest { row: 0, .. })
        ));
    }

    #[test]
    fn missing_column_reported() {
        let schema = Schema::new(vec![Field::new(RIDERS, DataType::Int64, false)]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(Int64Array::from(vec![10]))],
        )
        .unwrap();
        assert!(matches!(
            requests_from_batches(&[batch]),
            Err(StoreError::MissingColumn(DRIVERS))
        ));
    }

    #[test]
    fn int_column_accepts_whole_floats_only() {
        let ints = Float64Array::from(vec![12.0, 12.5]);
        assert_eq!(int_at(&ints, RIDERS, 0, 0).unwrap(), 12);
        assert!(matches!(
            int_at(&ints, RIDERS, 1, 1),
            Err(StoreError::NotInteger { row: 1, .. })
        ));
        let narrow = Int32Array::from(vec![7]);
        assert_eq!(int_at(&narrow, RIDERS, 0, 0).unwrap(), 7);
    }

    #[test]
    fn null_value_reported() {
        let col = Int64Array::from(vec![Some(3), None]);
        assert!(matches!(
            int_at(&col, DRIVERS, 1, 5),
            Err(StoreError::NullValue {
                column: DRIVERS,
                row: 5
            })
        ));
    }

    #[test]
    fn wrong_type_reported() {
        let col = StringArray::from(vec!["many"]);
        assert!(matches!(
            int_at(&col, RIDERS, 0, 0),
            Err(StoreError::ColumnType { column: RIDERS, .. })
        ));
    }

    #[test]
    fn dictionary_categories_decoded() {
        let plain = rides_batch(&[BASE, Row { location: "Rural", ..BASE }]);
        let dict: DictionaryArray<Int32Type> = vec!["Urban", "Rural"].into_iter().collect();
        let mut fields: Vec<Field> = plain
            .schema()
            .fields()
            .iter()
            .map(|f| f.as_ref().clone())
            .collect();
        let idx = plain.schema().index_of(LOCATION).unwrap();
        fields[idx] = Field::new(LOCATION, dict.data_type().clone(), false);
        let mut columns = plain.columns().to_vec();
        columns[idx] = Arc::new(dict);
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap();

        let reqs = requests_from_batches(&[batch]).unwrap();
        assert_eq!(reqs[0].location, LocationCategory::Urban);
        assert_eq!(reqs[1].location, LocationCategory::Rural);
    }

    #[test]
    fn float32_rating_keeps_decimal_value() {
        let col = Float32Array::from(vec![4.2_f32, 3.75]);
        assert_eq!(float_at(&col, RATING, 0, 0).unwrap(), 4.2);
        assert_eq!(float_at(&col, RATING, 1, 1).unwrap(), 3.75);
    }

    #[test]
    fn priced_batch_layout() {
        let req = RideRequest::default();
        let fv = FeatureVector::from_request(&req);
        let outcome = PricingOutcome::from_prediction(300.0, fv.demand_supply_ratio);
        let now = Utc::now();

        let batch = outcomes_to_batch(&[(fv, outcome)], now).unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.schema().as_ref(), &model::priced_ride_schema());

        let base = batch
            .column_by_name("base_price")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(base.value(0), 150.0);

        let level = batch
            .column_by_name("surge_level")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(level.value(0), SurgeLevel::ExtremeSurge.label());

        let ts = batch
            .column_by_name("priced_at")
            .unwrap()
            .as_any()
            .downcast_ref::<TimestampNanosecondArray>()
            .unwrap();
        assert_eq!(ts.value(0), now.timestamp_nanos_opt().unwrap());
    }
}
