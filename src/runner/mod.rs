mod controller;
mod params;
mod pool;


pub use controller::{RunController, RunState};
pub use params::RunParameters;
pub use pool::partition;
