//! Columnar tabulation of validated vehicle records.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Int64Array, StringArray};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use ev_insights_core::{VehicleRecord, ev};
use tracing::info;

use crate::StoreError;

/// In-memory registration table, one row per record in input order.
///
/// Backed by a single Arrow `RecordBatch` using
/// [`ev::registration_schema`]. An empty input still yields every column.
#[derive(Debug, Clone)]
pub struct VehicleTable {
    batch: RecordBatch,
}

impl VehicleTable {
    pub fn from_records(records: &[VehicleRecord]) -> Result<Self, StoreError> {
        let schema: SchemaRef = Arc::new(ev::registration_schema());
        let columns: Vec<ArrayRef> = vec![
            utf8(records, |r| r.vin.as_str()),
            utf8(records, |r| r.county.as_str()),
            utf8(records, |r| r.city.as_str()),
            utf8(records, |r| r.state.as_str()),
            int64(records, |r| r.postal_code),
            int64(records, |r| r.model_year),
            utf8(records, |r| r.make.as_str()),
            utf8(records, |r| r.model.as_str()),
            utf8(records, |r| r.electric_vehicle_type.as_str()),
            Arc::new(BooleanArray::from(
                records
                    .iter()
                    .map(|r| r.clean_fuel_eligible)
                    .collect::<Vec<_>>(),
            )),
            int64(records, |r| r.electric_range),
        ];

        let batch = RecordBatch::try_new(schema, columns)?;
        info!(rows = batch.num_rows(), "tabulated vehicle records");
        Ok(Self { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }
}

fn utf8(records: &[VehicleRecord], value: impl Fn(&VehicleRecord) -> &str) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(records.iter().map(value)))
}

fn int64(records: &[VehicleRecord], value: impl Fn(&VehicleRecord) -> i64) -> ArrayRef {
    Arc::new(Int64Array::from_iter_values(records.iter().map(value)))
}
