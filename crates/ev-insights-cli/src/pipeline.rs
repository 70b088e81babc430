//! Fetch → map → tabulate, shared by every report command.

use anyhow::Context;
use ev_insights_core::{RowLayout, VehicleRecord};
use ev_insights_store::{FusionStore, VehicleTable};
use ev_insights_sync::{DatasetClient, RowsPayload};
use tracing::info;

use crate::config::Settings;

/// Download the dataset and load it into a fresh query store.
pub async fn load(settings: &Settings) -> anyhow::Result<FusionStore> {
    let client = DatasetClient::new(settings.url.as_str(), settings.timeout())
        .context("building HTTP client")?;
    let payload = client
        .fetch_rows()
        .await
        .with_context(|| format!("fetching {}", client.url()))?;
    let records = validate(&RowLayout::default(), &payload)?;
    tabulate(&records)
}

/// Check the declared upstream columns, then map every row.
pub fn validate(layout: &RowLayout, payload: &RowsPayload) -> anyhow::Result<Vec<VehicleRecord>> {
    if let Some(columns) = &payload.columns {
        layout
            .check_columns(columns)
            .context("upstream schema changed")?;
    }
    let records = layout
        .map_rows(&payload.rows)
        .context("validating dataset rows")?;
    info!(records = records.len(), layout = layout.version, "validated records");
    Ok(records)
}

pub fn tabulate(records: &[VehicleRecord]) -> anyhow::Result<FusionStore> {
    let table = VehicleTable::from_records(records).context("tabulating records")?;
    let store = FusionStore::new(&table).context("registering table")?;
    Ok(store)
}
