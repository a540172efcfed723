pub mod fixtures;
pub mod stubs;

pub use fixtures::{random_records, weather};
pub use stubs::EchoClassifier;
