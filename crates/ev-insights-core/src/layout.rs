//! Positional layout of upstream dataset rows.
//!
//! The upstream `rows.json` document carries each registration as a JSON
//! list. A handful of system columns (`:sid`, `:id`, `:created_at`, ...) come
//! first, followed by the dataset columns. [`RowLayout`] names the offset of
//! every field a [`VehicleRecord`] needs, so a shifted upstream schema fails
//! with a [`MappingError`] instead of silently producing wrong records.

use std::borrow::Cow;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::record::{RawRecord, RecordError, VehicleRecord, is_cafv_eligible};

/// One raw upstream row.
pub type RawRow = Vec<Value>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("row {row}: layout {layout} needs at least {expected} columns, found {found}")]
    RowTooShort {
        row: usize,
        layout: &'static str,
        expected: usize,
        found: usize,
    },
    #[error(
        "layout {layout}: upstream column {offset} is `{found}`, expected `{expected}` for {field}"
    )]
    ColumnMismatch {
        layout: &'static str,
        field: &'static str,
        offset: usize,
        expected: &'static str,
        found: String,
    },
    #[error("row {row}: {source}")]
    Record { row: usize, source: RecordError },
}

/// A field of [`VehicleRecord`] as it appears in the upstream dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Vin,
    County,
    City,
    State,
    PostalCode,
    ModelYear,
    Make,
    Model,
    ElectricVehicleType,
    CleanFuelEligibility,
    ElectricRange,
}

impl RecordField {
    /// Column name in the tabulated Arrow schema.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vin => "vin",
            Self::County => "county",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postal_code",
            Self::ModelYear => "model_year",
            Self::Make => "make",
            Self::Model => "model",
            Self::ElectricVehicleType => "electric_vehicle_type",
            Self::CleanFuelEligibility => "clean_fuel_eligible",
            Self::ElectricRange => "electric_range",
        }
    }

    /// `fieldName` of the column in the upstream `meta.view.columns` list.
    pub fn upstream_name(self) -> &'static str {
        match self {
            Self::Vin => "vin_1_10",
            Self::County => "county",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "zip_code",
            Self::ModelYear => "model_year",
            Self::Make => "make",
            Self::Model => "model",
            Self::ElectricVehicleType => "ev_type",
            Self::CleanFuelEligibility => "cafv_type",
            Self::ElectricRange => "electric_range",
        }
    }
}

/// Versioned table of record field → positional offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub version: &'static str,
    pub columns: &'static [(RecordField, usize)],
}

/// Washington State DOL "Electric Vehicle Population Data" (`f6w7-q2d2`).
pub const WA_DOL_V1: RowLayout = RowLayout {
    version: "wa-dol-v1",
    columns: &[
        (RecordField::Vin, 8),
        (RecordField::County, 9),
        (RecordField::City, 10),
        (RecordField::State, 11),
        (RecordField::PostalCode, 12),
        (RecordField::ModelYear, 13),
        (RecordField::Make, 14),
        (RecordField::Model, 15),
        (RecordField::ElectricVehicleType, 16),
        (RecordField::CleanFuelEligibility, 17),
        (RecordField::ElectricRange, 18),
    ],
};

impl Default for RowLayout {
    fn default() -> Self {
        WA_DOL_V1
    }
}

impl RowLayout {
    /// Offset of `field`, if this layout maps it.
    pub fn offset(&self, field: RecordField) -> Option<usize> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|&(_, offset)| offset)
    }

    /// Smallest row length that covers every mapped offset.
    pub fn min_width(&self) -> usize {
        self.columns
            .iter()
            .map(|&(_, offset)| offset + 1)
            .max()
            .unwrap_or(0)
    }

    /// Verify the upstream column list against this layout.
    ///
    /// `columns` are the upstream `fieldName`s in row order.
    pub fn check_columns(&self, columns: &[String]) -> Result<(), MappingError> {
        for &(field, offset) in self.columns {
            let found = columns.get(offset).map(String::as_str).unwrap_or("<absent>");
            if found != field.upstream_name() {
                return Err(MappingError::ColumnMismatch {
                    layout: self.version,
                    field: field.name(),
                    offset,
                    expected: field.upstream_name(),
                    found: found.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Map one upstream row into a validated record.
    ///
    /// `index` is only used for error reporting.
    pub fn map_row(&self, index: usize, row: &[Value]) -> Result<VehicleRecord, MappingError> {
        let expected = self.min_width();
        if row.len() < expected {
            return Err(MappingError::RowTooShort {
                row: index,
                layout: self.version,
                expected,
                found: row.len(),
            });
        }

        let mut raw = RawRecord::default();
        for &(field, offset) in self.columns {
            let cell = &row[offset];
            match field {
                RecordField::Vin => raw.vin = cell_text(cell),
                RecordField::County => raw.county = cell_text(cell),
                RecordField::City => raw.city = cell_text(cell),
                RecordField::State => raw.state = cell_text(cell),
                RecordField::PostalCode => raw.postal_code = cell_text(cell),
                RecordField::ModelYear => raw.model_year = cell_text(cell),
                RecordField::Make => raw.make = cell_text(cell),
                RecordField::Model => raw.model = cell_text(cell),
                RecordField::ElectricVehicleType => raw.electric_vehicle_type = cell_text(cell),
                RecordField::CleanFuelEligibility => {
                    raw.clean_fuel_eligible = is_cafv_eligible(cell.as_str())
                }
                RecordField::ElectricRange => raw.electric_range = cell_text(cell),
            }
        }

        VehicleRecord::try_from(raw).map_err(|source| MappingError::Record { row: index, source })
    }

    /// Map every row, stopping at the first failure.
    pub fn map_rows(&self, rows: &[RawRow]) -> Result<Vec<VehicleRecord>, MappingError> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.map_row(i, row))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(layout = self.version, count = records.len(), "mapped rows");
        Ok(records)
    }
}

/// Text of a scalar cell. Null and nested values count as absent.
///
/// Whole floats such as `250.0` render without the fraction so they coerce
/// like the integer they hold.
fn cell_text(cell: &Value) -> Option<Cow<'_, str>> {
    match cell {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 => Some(Cow::Owned(format!("{f:.0}"))),
            _ => Some(Cow::Owned(n.to_string())),
        },
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
