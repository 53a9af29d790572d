use crate::ode::{Integrator, Model, ModelState, NullSettings};

#[cfg(test)]
use crate::{assert_float_eq, ode::test_models::Ramp};
#[cfg(test)]
use nalgebra::Vector1;

pub type MidpointSettings = NullSettings;

/// Explicit midpoint: take half an Euler step, then the full step with the
/// slope found there. Second order.
pub struct Midpoint<M: Model>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  dxdt: M::State,
  midpoint_state: M::State,
}

impl<M: Model> Integrator<M> for Midpoint<M>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  type Settings = MidpointSettings;

  fn new(_: Self::Settings) -> Self {
    Self {
      dxdt: M::State::new(),
      midpoint_state: M::State::new(),
    }
  }

  fn step_internal(
    &mut self,
    model: &M,
    state: &mut M::State,
    time: &M::S,
    time_step: &M::S,
  ) {
    let two: M::S = 2.0.into();

    self.dxdt.zeros_as(state);
    self.midpoint_state.zeros_as(state);

    model.derivative(state, &mut self.dxdt, time);

    for ((midpoint_state, state), dxdt) in (&mut self.midpoint_state)
      .into_iter()
      .zip(&*state)
      .zip(&self.dxdt)
    {
      *midpoint_state = *state + *time_step * *dxdt / two;
    }

    let midpoint_time = *time + *time_step / two;

    model.derivative(&self.midpoint_state, &mut self.dxdt, &midpoint_time);

    for (state, dxdt) in state.into_iter().zip(&self.dxdt) {
      *state = *state + *time_step * *dxdt;
    }
  }
}

#[test]
fn midpoint_is_exact_for_linear_in_time() {
  let mut integrator = Midpoint::<Ramp>::new(MidpointSettings {});
  let next = integrator.advance(&Ramp, &Vector1::new(1.0), &2.0, &0.5);

  assert_float_eq!(next[0], 2.125);
}
