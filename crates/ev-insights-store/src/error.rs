use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("datafusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    #[error("column `{column}` has type {found}, expected {expected}")]
    UnexpectedColumn {
        column: String,
        expected: &'static str,
        found: String,
    },
}
