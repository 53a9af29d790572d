use crate::ode::Model;

/// A fixed-step explicit time integrator.
///
/// Implementations may keep scratch states between calls, which is why
/// stepping takes `&mut self`. Scratch contents never leak into results:
/// the same inputs always give the same output bits.
pub trait Integrator<M: Model>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  type Settings: Clone;

  fn new(settings: Self::Settings) -> Self;

  /// Replace `state` with the state one `time_step` after `time`.
  ///
  /// Does not touch the clock. Stability for the given step is the caller's
  /// problem: nothing here detects or damps divergence.
  fn step_internal(
    &mut self,
    model: &M,
    state: &mut M::State,
    time: &M::S,
    time_step: &M::S,
  );

  /// Produce the next state without modifying `state`.
  fn advance(
    &mut self,
    model: &M,
    state: &M::State,
    time: &M::S,
    time_step: &M::S,
  ) -> M::State {
    let mut next = state.clone();

    self.step_internal(model, &mut next, time, time_step);

    next
  }

  fn step(
    &mut self,
    model: &M,
    state: &mut M::State,
    time: &mut M::S,
    time_step: &M::S,
  ) {
    self.step_internal(model, state, time, time_step);

    *time += *time_step;
  }

  fn n_steps(
    &mut self,
    model: &M,
    state: &mut M::State,
    time: &mut M::S,
    time_step: &M::S,
    steps: usize,
  ) {
    for _ in 0..steps {
      self.step(model, state, time, time_step);
    }
  }
}
