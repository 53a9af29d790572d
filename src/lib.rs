mod utils;

pub mod error;
pub mod ode;
pub mod simulation;
pub mod tumor;

pub use error::{ConfigError, ConfigResult};
pub use simulation::{
  simulate, simulate_observed, GlobalParams, IntegrationParams, Series,
  Simulation, Trajectory,
};
pub use tumor::{
  Burden, Compartments, ExposureSignal, GrowthLaw, ThreeCompartment,
  Topology, TumorParams, TwoCompartment,
};
