//! Validated electric vehicle registration records.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only eligibility text that marks a vehicle as CAFV eligible.
pub const CAFV_ELIGIBLE: &str = "Clean Alternative Fuel Vehicle Eligible";

/// Map the upstream CAFV eligibility text to a boolean.
///
/// Exact match only. Other known categories ("Not eligible due to low
/// battery range", "Eligibility unknown as battery range has not been
/// researched") and missing values all map to `false`.
pub fn is_cafv_eligible(raw: Option<&str>) -> bool {
    raw == Some(CAFV_ELIGIBLE)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("field `{field}` is not an integer: {value:?}")]
    NotAnInteger { field: &'static str, value: String },
}

/// One electric vehicle registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vin: String,
    pub county: String,
    pub city: String,
    pub state: String,
    pub postal_code: i64,
    pub model_year: i64,
    pub make: String,
    pub model: String,
    pub electric_vehicle_type: String,
    pub clean_fuel_eligible: bool,
    /// Zero in the source usually means the range was never researched.
    pub electric_range: i64,
}

/// Named field values pulled out of an upstream row, before coercion.
///
/// Text cells are `None` when the upstream cell was null. Eligibility has
/// already been reduced to a boolean by [`is_cafv_eligible`].
#[derive(Debug, Clone, Default)]
pub struct RawRecord<'a> {
    pub vin: Option<Cow<'a, str>>,
    pub county: Option<Cow<'a, str>>,
    pub city: Option<Cow<'a, str>>,
    pub state: Option<Cow<'a, str>>,
    pub postal_code: Option<Cow<'a, str>>,
    pub model_year: Option<Cow<'a, str>>,
    pub make: Option<Cow<'a, str>>,
    pub model: Option<Cow<'a, str>>,
    pub electric_vehicle_type: Option<Cow<'a, str>>,
    pub clean_fuel_eligible: bool,
    pub electric_range: Option<Cow<'a, str>>,
}

impl<'a> TryFrom<RawRecord<'a>> for VehicleRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord<'a>) -> Result<Self, Self::Error> {
        let vin = required("vin", raw.vin)?;
        if vin.is_empty() {
            return Err(RecordError::MissingField { field: "vin" });
        }
        Ok(Self {
            vin,
            county: required("county", raw.county)?,
            city: required("city", raw.city)?,
            state: required("state", raw.state)?,
            postal_code: integer("postal_code", raw.postal_code)?,
            model_year: integer("model_year", raw.model_year)?,
            make: required("make", raw.make)?,
            model: required("model", raw.model)?,
            electric_vehicle_type: required("electric_vehicle_type", raw.electric_vehicle_type)?,
            clean_fuel_eligible: raw.clean_fuel_eligible,
            electric_range: integer("electric_range", raw.electric_range)?,
        })
    }
}

fn required(field: &'static str, value: Option<Cow<'_, str>>) -> Result<String, RecordError> {
    value
        .map(Cow::into_owned)
        .ok_or(RecordError::MissingField { field })
}

fn integer(field: &'static str, value: Option<Cow<'_, str>>) -> Result<i64, RecordError> {
    let text = value.ok_or(RecordError::MissingField { field })?;
    let parsed = text.trim().parse::<i64>();
    parsed.map_err(|_| RecordError::NotAnInteger {
        field,
        value: text.into_owned(),
    })
}
