use nalgebra::{RealField, SVector};

/// Storage for the state of a [`Model`], iterable component by component.
///
/// Integrators never index into a state directly: every update is a zip over
/// the components, so any fixed tuple of scalars can be a state.
pub trait ModelState<S>
where
  Self: Clone,
  for<'a> &'a Self: IntoIterator<Item = &'a S>,
  for<'a> &'a mut Self: IntoIterator<Item = &'a mut S>,
{
  fn new() -> Self;

  /// Resize to match `other` and set every component to zero.
  fn zeros_as(&mut self, other: &Self);
}

/// The right-hand side of an ODE system `dx/dt = f(t, x)`.
pub trait Model
where
  for<'a> &'a Self::State: IntoIterator<Item = &'a Self::S>,
  for<'a> &'a mut Self::State: IntoIterator<Item = &'a mut Self::S>,
{
  type S: RealField + Copy + From<f32>;

  type State: ModelState<Self::S>;

  /// Write the time derivative of `x` at time `t` into `dxdt`.
  ///
  /// Every component of `dxdt` must be overwritten.
  fn derivative(&self, x: &Self::State, dxdt: &mut Self::State, t: &Self::S);
}

// Fixed-arity compartment vectors. The dimension is part of the type, so
// there is nothing to resize.
impl<const N: usize> ModelState<f64> for SVector<f64, N> {
  fn new() -> Self {
    Self::zeros()
  }

  fn zeros_as(&mut self, _: &Self) {
    self.fill(0.0);
  }
}

#[test]
fn vector_state_zeros_as() {
  let mut state = nalgebra::Vector3::new(1.0, -2.0, 3.5);
  let other = state;

  state.zeros_as(&other);

  assert_eq!(state, nalgebra::Vector3::zeros());
  assert_eq!(<nalgebra::Vector2<f64> as ModelState<f64>>::new().len(), 2);
}
