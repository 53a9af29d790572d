use crate::ode::Model;
use nalgebra::Vector1;

/// `x' = rate * x`
pub struct Growth {
  pub rate: f64,
}

impl Model for Growth {
  type S = f64;
  type State = Vector1<f64>;

  fn derivative(&self, x: &Self::State, dxdt: &mut Self::State, _: &f64) {
    dxdt[0] = self.rate * x[0];
  }
}

/// `x' = t`
pub struct Ramp;

impl Model for Ramp {
  type S = f64;
  type State = Vector1<f64>;

  fn derivative(&self, _: &Self::State, dxdt: &mut Self::State, t: &f64) {
    dxdt[0] = *t;
  }
}
