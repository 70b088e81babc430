//! HTTP client for the Socrata `rows.json` export of the registration dataset.

use std::time::Duration;

use ev_insights_core::RawRow;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Washington State Electric Vehicle Population Data, full JSON export.
pub const WA_EV_DATA_URL: &str =
    "https://data.wa.gov/api/views/f6w7-q2d2/rows.json?accessType=DOWNLOAD";

/// Upper bound on a single dataset download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload has no top-level `data` field")]
    MissingData,
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Raw rows of one dataset download.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowsPayload {
    /// Upstream column `fieldName`s in row order, when the document declares them.
    pub columns: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
}

/// Fetches the whole dataset in one GET. No paging, no retry, no caching.
pub struct DatasetClient {
    client: reqwest::Client,
    url: String,
}

impl DatasetClient {
    /// Create a client for the dataset at `url`.
    ///
    /// With `timeout` set, a request that has not completed in time fails
    /// with [`FetchError::Http`] instead of hanging.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and parse the dataset.
    pub async fn fetch_rows(&self) -> Result<RowsPayload, FetchError> {
        info!(url = %self.url, "fetching dataset");
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        info!(bytes = body.len(), "downloaded dataset");
        let payload = parse_rows(&body)?;
        info!(rows = payload.rows.len(), "parsed dataset rows");
        Ok(payload)
    }
}

/// Parse a `rows.json` document into raw rows.
///
/// The document must be an object with a `data` list whose items are lists.
/// Column names are taken from `meta.view.columns[*].fieldName` if present.
pub fn parse_rows(body: &[u8]) -> Result<RowsPayload, FetchError> {
    let Value::Object(mut doc) = serde_json::from_slice::<Value>(body)? else {
        return Err(FetchError::MalformedPayload(
            "document is not a JSON object".into(),
        ));
    };

    let Value::Array(items) = doc.remove("data").ok_or(FetchError::MissingData)? else {
        return Err(FetchError::MalformedPayload("`data` is not a list".into()));
    };

    let rows = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Array(cells) => Ok(cells),
            _ => Err(FetchError::MalformedPayload(format!(
                "row {i} is not a list"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let columns = doc
        .get("meta")
        .and_then(|meta| meta.pointer("/view/columns"))
        .and_then(Value::as_array)
        .map(|cols| {
            cols.iter()
                .map(|c| {
                    c.get("fieldName")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                })
                .collect()
        });

    Ok(RowsPayload { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_insights_core::WA_DOL_V1;

    const SAMPLE: &str = r#"{
        "meta": {
            "view": {
                "id": "f6w7-q2d2",
                "name": "Electric Vehicle Population Data",
                "columns": [
                    {"id": -1, "name": "sid", "fieldName": ":sid"},
                    {"id": -1, "name": "id", "fieldName": ":id"},
                    {"id": -1, "name": "position", "fieldName": ":position"},
                    {"id": -1, "name": "created_at", "fieldName": ":created_at"},
                    {"id": -1, "name": "created_meta", "fieldName": ":created_meta"},
                    {"id": -1, "name": "updated_at", "fieldName": ":updated_at"},
                    {"id": -1, "name": "updated_meta", "fieldName": ":updated_meta"},
                    {"id": -1, "name": "meta", "fieldName": ":meta"},
                    {"id": 1, "name": "VIN (1-10)", "fieldName": "vin_1_10"},
                    {"id": 2, "name": "County", "fieldName": "county"},
                    {"id": 3, "name": "City", "fieldName": "city"},
                    {"id": 4, "name": "State", "fieldName": "state"},
                    {"id": 5, "name": "Postal Code", "fieldName": "zip_code"},
                    {"id": 6, "name": "Model Year", "fieldName": "model_year"},
                    {"id": 7, "name": "Make", "fieldName": "make"},
                    {"id": 8, "name": "Model", "fieldName": "model"},
                    {"id": 9, "name": "Electric Vehicle Type", "fieldName": "ev_type"},
                    {"id": 10, "name": "Clean Alternative Fuel Vehicle (CAFV) Eligibility", "fieldName": "cafv_type"},
                    {"id": 11, "name": "Electric Range", "fieldName": "electric_range"}
                ]
            }
        },
        "data": [
            ["row-a", "id-a", 0, 1700000000, null, 1700000000, null, "{ }",
             "1FA", "King", "Seattle", "WA", "98101", "2020", "TESLA", "MODEL 3",
             "Battery Electric Vehicle (BEV)", "Clean Alternative Fuel Vehicle Eligible", "250"],
            ["row-b", "id-b", 0, 1700000000, null, 1700000000, null, "{ }",
             "2FB", "King", "Bellevue", "WA", "98004", "2020", "TESLA", "MODEL Y",
             "Battery Electric Vehicle (BEV)", "Not eligible due to low battery range", "0"]
        ]
    }"#;

    #[test]
    fn parses_rows_and_columns() {
        let payload = parse_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(payload.rows.len(), 2);
        assert_eq!(payload.rows[0].len(), 19);
        assert_eq!(payload.rows[1][8], "2FB");

        let columns = payload.columns.unwrap();
        assert_eq!(columns.len(), 19);
        assert_eq!(columns[0], ":sid");
        assert_eq!(columns[12], "zip_code");
    }

    #[test]
    fn sample_matches_default_layout() {
        let payload = parse_rows(SAMPLE.as_bytes()).unwrap();
        WA_DOL_V1
            .check_columns(payload.columns.as_deref().unwrap())
            .unwrap();
        let records = WA_DOL_V1.map_rows(&payload.rows).unwrap();
        assert!(records[0].clean_fuel_eligible);
        assert!(!records[1].clean_fuel_eligible);
    }

    #[test]
    fn missing_meta_leaves_columns_unset() {
        let payload = parse_rows(br#"{"data": [[1, 2, 3]]}"#).unwrap();
        assert!(payload.columns.is_none());
        assert_eq!(payload.rows, vec![vec![Value::from(1), Value::from(2), Value::from(3)]]);
    }

    #[test]
    fn empty_data_is_not_an_error() {
        let payload = parse_rows(br#"{"data": []}"#).unwrap();
        assert!(payload.rows.is_empty());
    }

    #[test]
    fn missing_data_is_rejected() {
        let err = parse_rows(br#"{"meta": {}}"#).unwrap_err();
        assert!(matches!(err, FetchError::MissingData));
    }

    #[test]
    fn non_list_data_is_rejected() {
        let err = parse_rows(br#"{"data": {"rows": []}}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[test]
    fn non_list_row_is_rejected() {
        let err = parse_rows(br#"{"data": [[1], "oops"]}"#).unwrap_err();
        assert_eq!(err.to_string(), "malformed payload: row 1 is not a list");
    }

    #[test]
    fn top_level_array_is_rejected() {
        let err = parse_rows(b"[[1, 2]]").unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = parse_rows(b"{\"data\": [").unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }

    #[test]
    fn client_keeps_url() {
        let client = DatasetClient::new(WA_EV_DATA_URL, Some(DEFAULT_TIMEOUT)).unwrap();
        assert_eq!(client.url(), WA_EV_DATA_URL);
    }

    #[tokio::test]
    async fn invalid_url_is_an_http_error() {
        let client = DatasetClient::new("not a url", None).unwrap();
        let err = client.fetch_rows().await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }
}
