//! Typed rows of the three aggregation reports.
//!
//! Each report is decoded from the `RecordBatch`es DataFusion returns; the
//! first column is the group key and the second the aggregate.

use arrow::array::{
    Array, Float64Array, Int64Array, LargeStringArray, StringArray, StringViewArray,
};
use arrow::record_batch::RecordBatch;

use crate::StoreError;

/// Number of registrations for one make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeCount {
    pub make: String,
    pub vehicles: u64,
}

/// Mean electric range over one make's registrations.
#[derive(Debug, Clone, PartialEq)]
pub struct MakeRange {
    pub make: String,
    pub mean_range: f64,
}

/// Number of registrations for one model year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCount {
    pub model_year: i64,
    pub vehicles: u64,
}

impl MakeCount {
    pub(crate) fn from_batches(batches: &[RecordBatch]) -> Result<Vec<Self>, StoreError> {
        let mut out = Vec::new();
        for batch in batches {
            let counts = typed::<Int64Array>(batch, 1, "Int64")?;
            for i in 0..batch.num_rows() {
                out.push(Self {
                    make: string_at(batch, 0, i)?,
                    vehicles: counts.value(i) as u64,
                });
            }
        }
        Ok(out)
    }
}

impl MakeRange {
    pub(crate) fn from_batches(batches: &[RecordBatch]) -> Result<Vec<Self>, StoreError> {
        let mut out = Vec::new();
        for batch in batches {
            let means = typed::<Float64Array>(batch, 1, "Float64")?;
            for i in 0..batch.num_rows() {
                out.push(Self {
                    make: string_at(batch, 0, i)?,
                    mean_range: means.value(i),
                });
            }
        }
        Ok(out)
    }
}

impl YearCount {
    pub(crate) fn from_batches(batches: &[RecordBatch]) -> Result<Vec<Self>, StoreError> {
        let mut out = Vec::new();
        for batch in batches {
            let years = typed::<Int64Array>(batch, 0, "Int64")?;
            let counts = typed::<Int64Array>(batch, 1, "Int64")?;
            for i in 0..batch.num_rows() {
                out.push(Self {
                    model_year: years.value(i),
                    vehicles: counts.value(i) as u64,
                });
            }
        }
        Ok(out)
    }
}

// ── Helpers ──

fn typed<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    idx: usize,
    expected: &'static str,
) -> Result<&'a T, StoreError> {
    let col = batch.column(idx);
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| unexpected(batch, idx, expected))
}

/// Read a string cell from a column that might be Utf8, LargeUtf8, or Utf8View.
fn string_at(batch: &RecordBatch, idx: usize, row: usize) -> Result<String, StoreError> {
    let col = batch.column(idx);
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        return Ok(arr.value(row).to_string());
    }
    if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        return Ok(arr.value(row).to_string());
    }
    if let Some(arr) = col.as_any().downcast_ref::<StringViewArray>() {
        return Ok(arr.value(row).to_string());
    }
    Err(unexpected(batch, idx, "Utf8"))
}

fn unexpected(batch: &RecordBatch, idx: usize, expected: &'static str) -> StoreError {
    let schema = batch.schema();
    let field = schema.field(idx);
    StoreError::UnexpectedColumn {
        column: field.name().clone(),
        expected,
        found: field.data_type().to_string(),
    }
}
