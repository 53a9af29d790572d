use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A parameter set that cannot describe a run.
///
/// Only configuration can fail. Once a run starts, every step produces a
/// state, including a diverging one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
  #[error("time step must be positive and finite, got {time_step}")]
  NonPositiveStep { time_step: f64 },

  #[error("time step {time_step} does not advance the clock at t = {time}")]
  StepBelowResolution { time_step: f64, time: f64 },

  #[error("simulation ends before it starts ({start} > {end})")]
  EmptySpan { start: f64, end: f64 },

  #[error("non-finite value for {what}: {value}")]
  NonFinite { what: &'static str, value: f64 },

  #[error("{what} must not be negative, got {value}")]
  Negative { what: &'static str, value: f64 },
}
