pub mod config;
pub mod errors;
pub mod record;
pub mod value;

pub use config::{SplitCriterion, TreeConfig};
pub use errors::{DtreeError, ErrorKind, Result};
pub use record::{Record, RecordSet};
pub use value::{MISSING_KEY, Value, format_number_key};
