use crate::{
  ode::Model,
  tumor::{TumorParams, S},
};

/// A tumor model whose state is a fixed set of named compartments.
pub trait Compartments: Model<S = S>
where
  for<'a> &'a Self::State: IntoIterator<Item = &'a Self::S>,
  for<'a> &'a mut Self::State: IntoIterator<Item = &'a mut Self::S>,
{
  /// Compartment labels in state order.
  const NAMES: &'static [&'static str];

  fn params(&self) -> &TumorParams;

  /// All cells viable, nothing affected or dead yet.
  fn initial_state(&self) -> Self::State;

  /// The aggregate reported next to each sample, per [`crate::tumor::Burden`].
  fn burden(&self, x: &Self::State) -> S;
}
