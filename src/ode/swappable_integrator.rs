use crate::ode::{
  Euler, EulerSettings, Integrator, Midpoint, MidpointSettings, Model, RK4,
  RK4Settings,
};
use clap::Subcommand;
use std::fmt;

#[cfg(test)]
use crate::ode::test_models::Growth;
#[cfg(test)]
use nalgebra::Vector1;

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegratorType {
  /// Forward Euler (first order)
  Euler(EulerSettings),
  /// Explicit midpoint (second order)
  Midpoint(MidpointSettings),
  /// Classic Runge-Kutta (fourth order)
  RK4(RK4Settings),
}

impl Default for IntegratorType {
  fn default() -> Self {
    Self::RK4(RK4Settings {})
  }
}

impl fmt::Display for IntegratorType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Euler(_) => "euler",
      Self::Midpoint(_) => "midpoint",
      Self::RK4(_) => "rk4",
    })
  }
}

/// An integrator picked at construction time from [`IntegratorType`].
pub enum SwappableIntegrator<M: Model>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  Euler(Euler<M>),
  Midpoint(Midpoint<M>),
  RK4(RK4<M>),
}

impl<M: Model> Integrator<M> for SwappableIntegrator<M>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  type Settings = IntegratorType;

  fn new(t: IntegratorType) -> Self {
    match t {
      IntegratorType::Euler(settings) => Self::Euler(Euler::new(settings)),
      IntegratorType::Midpoint(settings) => {
        Self::Midpoint(Midpoint::new(settings))
      }
      IntegratorType::RK4(settings) => Self::RK4(RK4::new(settings)),
    }
  }

  fn step_internal(
    &mut self,
    model: &M,
    state: &mut M::State,
    time: &M::S,
    time_step: &M::S,
  ) {
    match self {
      Self::Euler(method) => {
        method.step_internal(model, state, time, time_step)
      }
      Self::Midpoint(method) => {
        method.step_internal(model, state, time, time_step)
      }
      Self::RK4(method) => method.step_internal(model, state, time, time_step),
    }
  }
}

#[cfg(test)]
fn global_error(integrator_type: IntegratorType) -> f64 {
  let model = Growth { rate: 0.5 };
  let mut integrator: SwappableIntegrator<Growth> =
    SwappableIntegrator::new(integrator_type);
  let mut state = Vector1::new(1.0);
  let mut time = 0.0;

  integrator.n_steps(&model, &mut state, &mut time, &0.1, 40);

  (state[0] - (0.5 * time).exp()).abs()
}

#[test]
fn higher_order_is_more_accurate() {
  let euler = global_error(IntegratorType::Euler(EulerSettings {}));
  let midpoint = global_error(IntegratorType::Midpoint(MidpointSettings {}));
  let rk4 = global_error(IntegratorType::RK4(RK4Settings {}));

  assert!(rk4 < midpoint, "rk4 {} vs midpoint {}", rk4, midpoint);
  assert!(midpoint < euler, "midpoint {} vs euler {}", midpoint, euler);
  assert!(rk4 < 1e-5);
}

#[test]
fn default_is_rk4() {
  assert_eq!(IntegratorType::default(), IntegratorType::RK4(RK4Settings {}));
  assert_eq!(IntegratorType::default().to_string(), "rk4");
}
