mod store;
mod summary;
mod types;


pub use store::MeasurementStore;
pub use summary::RunSummary;
pub use types::{Measurement, Outcome, Snapshot};
