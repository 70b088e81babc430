pub mod layout;
pub mod record;
pub mod schema;

pub use layout::{MappingError, RawRow, RecordField, RowLayout, WA_DOL_V1};
pub use record::{CAFV_ELIGIBLE, RawRecord, RecordError, VehicleRecord, is_cafv_eligible};
pub use schema::ev;
