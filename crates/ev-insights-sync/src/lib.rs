//! Fetch layer: pulls the raw registration rows from the upstream open-data portal.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{DEFAULT_TIMEOUT, DatasetClient, FetchError, RowsPayload, WA_EV_DATA_URL, parse_rows};
