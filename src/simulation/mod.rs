pub mod driver;
pub mod params;
pub mod trajectory;

pub use driver::{simulate, simulate_observed, Simulation};
pub use params::{GlobalParams, IntegrationParams, StepParams, TimeSpan};
pub use trajectory::{Sample, Series, Trajectory};
