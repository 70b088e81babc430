//! Storage layer: Arrow tabulation of validated records and DataFusion reports over it.

mod error;
pub use error::StoreError;

pub mod fusion;
pub mod report;
pub mod table;

pub use fusion::FusionStore;
pub use report::{MakeCount, MakeRange, YearCount};
pub use table::VehicleTable;
