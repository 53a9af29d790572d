use crate::ode::{Integrator, Model, ModelState, NullSettings};

#[cfg(test)]
use crate::{assert_float_eq, ode::test_models::Ramp};
#[cfg(test)]
use nalgebra::Vector1;

pub type EulerSettings = NullSettings;

/// Forward Euler: `y' = y + dt * f(t, y)`. First order.
pub struct Euler<M: Model>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  dxdt: M::State,
}

impl<M: Model> Integrator<M> for Euler<M>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  type Settings = EulerSettings;

  fn new(_: Self::Settings) -> Self {
    Self {
      dxdt: M::State::new(),
    }
  }

  fn step_internal(
    &mut self,
    model: &M,
    state: &mut M::State,
    time: &M::S,
    time_step: &M::S,
  ) {
    self.dxdt.zeros_as(state);

    model.derivative(state, &mut self.dxdt, time);

    for (state, dxdt) in state.into_iter().zip(&self.dxdt) {
      *state = *state + *time_step * *dxdt;
    }
  }
}

#[test]
fn euler_uses_start_of_step_slope() {
  let mut integrator = Euler::<Ramp>::new(EulerSettings {});
  let next = integrator.advance(&Ramp, &Vector1::new(1.0), &2.0, &0.5);

  assert_float_eq!(next[0], 2.0);
}
