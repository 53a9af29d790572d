use crate::{
  ode::Model,
  tumor::{Burden, Compartments, TumorParams, S},
};
use nalgebra::Vector2;

#[cfg(test)]
use crate::assert_float_eq;

/// The drug kills viable cells `S` straight into the dead pool `D`.
///
/// ```text
/// dS/dt = growth(S) - k_d e(t) S
/// dD/dt = k_d e(t) S - d D
/// ```
///
/// The viable burden is `S` alone. [`Burden::Total`] gives `S + D`.
#[derive(Clone, Debug)]
pub struct TwoCompartment {
  params: TumorParams,
}

impl TwoCompartment {
  pub fn new(params: TumorParams) -> Self {
    Self { params }
  }
}

impl Model for TwoCompartment {
  type S = S;
  type State = Vector2<S>;

  fn derivative(&self, x: &Self::State, dxdt: &mut Self::State, t: &S) {
    let (viable, dead) = (x[0], x[1]);

    let killed =
      self.params.kill_rate * self.params.exposure.level(*t) * viable;

    dxdt[0] = self.params.growth.growth(viable) - killed;
    dxdt[1] = killed - self.params.clearance_rate * dead;
  }
}

impl Compartments for TwoCompartment {
  const NAMES: &'static [&'static str] = &["S", "D"];

  fn params(&self) -> &TumorParams {
    &self.params
  }

  fn initial_state(&self) -> Self::State {
    Vector2::new(self.params.initial_viable, 0.0)
  }

  fn burden(&self, x: &Self::State) -> S {
    match self.params.burden {
      Burden::Viable => x[0],
      Burden::Total => x[0] + x[1],
    }
  }
}

#[test]
fn killed_cells_go_straight_to_dead() {
  let model = TwoCompartment::new(TumorParams::default());
  let mut dxdt = Vector2::zeros();

  model.derivative(&Vector2::new(30.0, 2.0), &mut dxdt, &100.0);

  let killed = 0.04 * 15.0 * 30.0;
  assert_float_eq!(dxdt[0], 0.1 * 30.0 * 0.75 - killed);
  assert_float_eq!(dxdt[1], killed - 0.1 * 2.0);
}

#[test]
fn total_burden_counts_dead_cells() {
  let x = Vector2::new(5.0, 1.5);
  let model = TwoCompartment::new(TumorParams {
    burden: Burden::Total,
    ..TumorParams::default()
  });

  assert_eq!(model.burden(&x), 6.5);
  assert_eq!(
    TwoCompartment::new(TumorParams::default()).burden(&x),
    5.0
  );
}
