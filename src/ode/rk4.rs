use crate::ode::{Integrator, Model, ModelState, NullSettings};

#[cfg(test)]
use crate::{
  assert_float_eq,
  ode::test_models::{Growth, Ramp},
};
#[cfg(test)]
use approx::assert_relative_eq;
#[cfg(test)]
use nalgebra::Vector1;

pub type RK4Settings = NullSettings;

/// Classic fourth order Runge-Kutta with a fixed step.
///
/// ```text
/// k1 = f(t,        y)
/// k2 = f(t + dt/2, y + dt * k1 / 2)
/// k3 = f(t + dt/2, y + dt * k2 / 2)
/// k4 = f(t + dt,   y + dt * k3)
/// y' = y + dt/6 * (k1 + 2 k2 + 2 k3 + k4)
/// ```
///
/// The model is sampled at the exact stage times, so a discontinuity in
/// `f` at some `t` in `(t, t + dt]` is seen by the later stages.
pub struct RK4<M: Model>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  intermediate_state: M::State,
  k: [M::State; 4],
}

impl<M: Model> Integrator<M> for RK4<M>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  type Settings = RK4Settings;

  fn new(_: Self::Settings) -> Self {
    Self {
      intermediate_state: M::State::new(),
      k: [
        M::State::new(),
        M::State::new(),
        M::State::new(),
        M::State::new(),
      ],
    }
  }

  fn step_internal(
    &mut self,
    model: &M,
    state: &mut M::State,
    time: &M::S,
    time_step: &M::S,
  ) {
    let one: M::S = 1.0.into();
    let two: M::S = 2.0.into();

    self.intermediate_state.zeros_as(state);
    for k in &mut self.k {
      k.zeros_as(state);
    }

    model.derivative(state, &mut self.k[0], time);

    // stages 2..=4 probe at y + dt * k_prev / divisor, t + dt / divisor
    for (k_idx, divisor) in [two, two, one].iter().enumerate() {
      for ((next_state, state), k_val) in (&mut self.intermediate_state)
        .into_iter()
        .zip(&*state)
        .zip(&self.k[k_idx])
      {
        *next_state = *state + *time_step * *k_val / *divisor;
      }

      let stage_time = *time + *time_step / *divisor;

      model.derivative(
        &self.intermediate_state,
        &mut self.k[k_idx + 1],
        &stage_time,
      );
    }

    let sixth_step = *time_step / 6.0.into();

    for ((((k_0, k_1), k_2), k_3), state) in (&self.k[0])
      .into_iter()
      .zip(&self.k[1])
      .zip(&self.k[2])
      .zip(&self.k[3])
      .zip(state)
    {
      *state = *state + sixth_step * (*k_0 + two * *k_1 + two * *k_2 + *k_3);
    }
  }
}

#[test]
fn rk4_is_exact_for_linear_in_time() {
  // x' = t integrates to x + t dt + dt^2 / 2 with no truncation error
  let mut integrator = RK4::<Ramp>::new(RK4Settings {});
  let next = integrator.advance(&Ramp, &Vector1::new(1.0), &2.0, &0.5);

  assert_float_eq!(next[0], 1.0 + 2.0 * 0.5 + 0.5 * 0.5 / 2.0);
}

#[test]
fn rk4_matches_exponential() {
  let model = Growth { rate: 0.1 };
  let mut integrator = RK4::<Growth>::new(RK4Settings {});
  let mut state = Vector1::new(30.0);
  let mut time = 0.0;

  integrator.n_steps(&model, &mut state, &mut time, &0.1, 500);

  assert_relative_eq!(time, 50.0, max_relative = 1e-12);
  assert_relative_eq!(
    state[0],
    30.0 * (0.1f64 * 50.0).exp(),
    max_relative = 1e-8
  );
}

#[test]
fn rk4_advance_leaves_input_alone() {
  let model = Growth { rate: -0.3 };
  let mut integrator = RK4::<Growth>::new(RK4Settings {});
  let state = Vector1::new(4.0);

  let next = integrator.advance(&model, &state, &0.0, &0.1);

  assert_eq!(state[0], 4.0);
  assert!(next[0] < 4.0);
}
