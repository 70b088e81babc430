//! DataFusion query layer over the in-memory registration table.
//!
//! `FusionStore` registers a [`VehicleTable`] as the `registrations` table of
//! a single-partition `SessionContext` and runs the aggregation reports as
//! SQL against it.

use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use datafusion::datasource::memory::MemTable;
use datafusion::prelude::{SessionConfig, SessionContext};
use tracing::{debug, info};

use crate::report::{MakeCount, MakeRange, YearCount};
use crate::{StoreError, VehicleTable};

/// Name the registration table is registered under.
pub const TABLE_NAME: &str = "registrations";

const POPULAR_MAKES_SQL: &str = "SELECT make, count(*) AS vehicle_count
     FROM registrations
     GROUP BY make
     ORDER BY vehicle_count DESC, make ASC";

const RANGE_BY_MAKE_SQL: &str = "SELECT make, avg(electric_range) AS mean_range
     FROM registrations
     GROUP BY make
     ORDER BY make ASC";

const COUNTS_BY_YEAR_SQL: &str = "SELECT model_year, count(*) AS vehicle_count
     FROM registrations
     GROUP BY model_year
     ORDER BY vehicle_count DESC, model_year ASC";

/// SQL query layer over one tabulated dataset.
pub struct FusionStore {
    ctx: SessionContext,
}

impl FusionStore {
    /// Register `table` with a fresh single-partition DataFusion context.
    pub fn new(table: &VehicleTable) -> Result<Self, StoreError> {
        let config = SessionConfig::new().with_target_partitions(1);
        let ctx = SessionContext::new_with_config(config);

        let mem = MemTable::try_new(table.schema(), vec![vec![table.batch().clone()]])?;
        ctx.register_table(TABLE_NAME, Arc::new(mem))?;

        info!(
            rows = table.num_rows(),
            table = TABLE_NAME,
            "DataFusion context ready"
        );
        Ok(Self { ctx })
    }

    /// Execute a SQL query and collect all result batches.
    pub async fn query(&self, sql: &str) -> Result<Vec<RecordBatch>, StoreError> {
        debug!(sql, "running query");
        let df = self.ctx.sql(sql).await?;
        let batches = df.collect().await?;
        Ok(batches)
    }

    /// Registrations per make, most common first. Ties sort by make.
    pub async fn popular_makes(&self) -> Result<Vec<MakeCount>, StoreError> {
        let batches = self.query(POPULAR_MAKES_SQL).await?;
        MakeCount::from_batches(&batches)
    }

    /// Mean electric range per make, sorted by make.
    pub async fn electric_range_by_make(&self) -> Result<Vec<MakeRange>, StoreError> {
        let batches = self.query(RANGE_BY_MAKE_SQL).await?;
        MakeRange::from_batches(&batches)
    }

    /// Registrations per model year, most common first. Ties sort by year.
    pub async fn vehicle_counts_by_model_year(&self) -> Result<Vec<YearCount>, StoreError> {
        let batches = self.query(COUNTS_BY_YEAR_SQL).await?;
        YearCount::from_batches(&batches)
    }
}
