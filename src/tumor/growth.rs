use crate::tumor::S;
use std::fmt;

#[cfg(test)]
use crate::assert_float_eq;

/// Unperturbed growth of the viable compartment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrowthLaw {
  /// `rate * n`
  Exponential { rate: S },
  /// `rate * n * (1 - n / carrying_capacity)`
  Logistic { rate: S, carrying_capacity: S },
}

impl GrowthLaw {
  pub fn rate(&self) -> S {
    match *self {
      Self::Exponential { rate } | Self::Logistic { rate, .. } => rate,
    }
  }

  /// Growth contribution to `dn/dt` for a viable population `n`.
  pub fn growth(&self, n: S) -> S {
    match *self {
      Self::Exponential { rate } => rate * n,
      Self::Logistic {
        rate,
        carrying_capacity,
      } => rate * n * (1.0 - n / carrying_capacity),
    }
  }
}

impl fmt::Display for GrowthLaw {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Exponential { rate } => write!(f, "exponential(rate={})", rate),
      Self::Logistic {
        rate,
        carrying_capacity,
      } => write!(
        f,
        "logistic(rate={}, capacity={})",
        rate, carrying_capacity
      ),
    }
  }
}

#[test]
fn logistic_stalls_at_capacity() {
  let law = GrowthLaw::Logistic {
    rate: 0.1,
    carrying_capacity: 120.0,
  };

  assert_eq!(law.growth(120.0), 0.0);
  assert_float_eq!(law.growth(60.0), 0.1 * 60.0 * 0.5);
  assert!(law.growth(150.0) < 0.0);
}

#[test]
fn exponential_is_proportional() {
  let law = GrowthLaw::Exponential { rate: 0.1 };

  assert_float_eq!(law.growth(30.0), 3.0);
  assert_eq!(law.rate(), 0.1);
}
