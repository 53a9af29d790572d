use crate::{
  ode::Model,
  tumor::{Burden, Compartments, TumorParams, S},
};
use nalgebra::Vector3;

#[cfg(test)]
use crate::{assert_float_eq, tumor::GrowthLaw};
#[cfg(test)]
use proptest::prelude::*;

/// Viable cells `S1` are moved by the drug into an affected pool `S2`,
/// which dies into `D` at the kill rate; `D` is cleared.
///
/// ```text
/// dS1/dt = growth(S1) - k_d e(t) S1
/// dS2/dt = k_d e(t) S1 - k_d S2
/// dD/dt  = k_d S2 - d D
/// ```
///
/// `D` is the only dead compartment, so the viable burden is `S1 + S2`.
#[derive(Clone, Debug)]
pub struct ThreeCompartment {
  params: TumorParams,
}

impl ThreeCompartment {
  pub fn new(params: TumorParams) -> Self {
    Self { params }
  }
}

impl Model for ThreeCompartment {
  type S = S;
  type State = Vector3<S>;

  fn derivative(&self, x: &Self::State, dxdt: &mut Self::State, t: &S) {
    let (viable, affected, dead) = (x[0], x[1], x[2]);
    let kill_rate = self.params.kill_rate;

    let transfer = kill_rate * self.params.exposure.level(*t) * viable;
    let dying = kill_rate * affected;

    dxdt[0] = self.params.growth.growth(viable) - transfer;
    dxdt[1] = transfer - dying;
    dxdt[2] = dying - self.params.clearance_rate * dead;
  }
}

impl Compartments for ThreeCompartment {
  const NAMES: &'static [&'static str] = &["S1", "S2", "D"];

  fn params(&self) -> &TumorParams {
    &self.params
  }

  fn initial_state(&self) -> Self::State {
    Vector3::new(self.params.initial_viable, 0.0, 0.0)
  }

  fn burden(&self, x: &Self::State) -> S {
    match self.params.burden {
      Burden::Viable => x[0] + x[1],
      Burden::Total => x[0] + x[1] + x[2],
    }
  }
}

#[cfg(test)]
fn derivative_at(model: &ThreeCompartment, t: S, x: Vector3<S>) -> Vector3<S> {
  let mut dxdt = Vector3::zeros();
  model.derivative(&x, &mut dxdt, &t);
  dxdt
}

#[test]
fn drug_moves_mass_down_the_chain() {
  let model = ThreeCompartment::new(TumorParams::default());
  // e(100) = 30 * 10 / (10 + 10)
  let dxdt = derivative_at(&model, 100.0, Vector3::new(30.0, 10.0, 5.0));

  let transfer = 0.04 * 15.0 * 30.0;
  let growth = 0.1 * 30.0 * (1.0 - 30.0 / 120.0);
  assert_float_eq!(dxdt[0], growth - transfer);
  assert_float_eq!(dxdt[1], transfer - 0.04 * 10.0);
  assert_float_eq!(dxdt[2], 0.04 * 10.0 - 0.1 * 5.0);
}

#[test]
fn no_transfer_after_treatment_end() {
  let mut params = TumorParams::default();
  params.exposure = params.exposure.with_treatment_end(30.0);
  let model = ThreeCompartment::new(params);

  let dxdt = derivative_at(&model, 30.0, Vector3::new(30.0, 10.0, 0.0));

  assert_float_eq!(dxdt[0], params.growth.growth(30.0));
  assert_float_eq!(dxdt[1], -0.04 * 10.0);
}

#[test]
fn burden_definitions() {
  let x = Vector3::new(1.0, 2.0, 4.0);
  let viable = ThreeCompartment::new(TumorParams::default());
  let total = ThreeCompartment::new(TumorParams {
    burden: Burden::Total,
    ..TumorParams::default()
  });

  assert_eq!(viable.burden(&x), 3.0);
  assert_eq!(total.burden(&x), 7.0);
  assert_eq!(viable.initial_state(), Vector3::new(30.0, 0.0, 0.0));
}

#[cfg(test)]
proptest! {
#[test]
fn zero_rates_are_an_equilibrium(
  t in 0.0f64..1000.0,
  x in prop::array::uniform3(-1000.0f64..1000.0),
  max_level in 0.0f64..100.0,
  logistic in any::<bool>(),
) {
  let mut params = TumorParams {
    growth: if logistic {
      GrowthLaw::Logistic { rate: 0.0, carrying_capacity: 120.0 }
    } else {
      GrowthLaw::Exponential { rate: 0.0 }
    },
    kill_rate: 0.0,
    clearance_rate: 0.0,
    ..TumorParams::default()
  };
  params.exposure.max_level = max_level;

  let dxdt = derivative_at(&ThreeCompartment::new(params), t, Vector3::from(x));

  prop_assert_eq!(dxdt, Vector3::zeros());
}
}
