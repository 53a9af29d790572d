use crate::tumor::{
  params::{HALF_SATURATION, MAX_EXPOSURE},
  S,
};

#[cfg(test)]
use crate::{assert_float_eq, tumor::params::TREATMENT_END_TIME};
#[cfg(test)]
use proptest::prelude::*;

/// Drug exposure as a function of time.
///
/// A saturating rise on the square root of time,
/// `max_level * sqrt(t) / (sqrt(half_saturation) + sqrt(t))`, optionally
/// dropping to zero for good once treatment ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExposureSignal {
  pub max_level: S,
  pub half_saturation: S,
  /// Exposure is zero for every `t >= treatment_end`.
  pub treatment_end: Option<S>,
}

impl Default for ExposureSignal {
  fn default() -> Self {
    Self {
      max_level: MAX_EXPOSURE,
      half_saturation: HALF_SATURATION,
      treatment_end: None,
    }
  }
}

impl ExposureSignal {
  pub fn with_treatment_end(self, treatment_end: S) -> Self {
    Self {
      treatment_end: Some(treatment_end),
      ..self
    }
  }

  /// Exposure at exactly `t`. Zero before dosing starts.
  pub fn level(&self, t: S) -> S {
    if let Some(treatment_end) = self.treatment_end {
      if t >= treatment_end {
        return 0.0;
      }
    }

    if t <= 0.0 {
      return 0.0;
    }

    let root_t = t.sqrt();

    self.max_level * root_t / (self.half_saturation.sqrt() + root_t)
  }
}

#[test]
fn exposure_starts_at_zero() {
  let signal = ExposureSignal::default();

  assert_eq!(signal.level(0.0), 0.0);
  assert_eq!(signal.level(-3.0), 0.0);
}

#[test]
fn exposure_half_saturates() {
  let signal = ExposureSignal::default();

  assert_float_eq!(signal.level(HALF_SATURATION), MAX_EXPOSURE / 2.0);
  // sqrt(10000) = 100 against sqrt(K) = 10
  assert_float_eq!(signal.level(10_000.0), MAX_EXPOSURE * 100.0 / 110.0);
}

#[test]
fn exposure_approaches_max_level() {
  let signal = ExposureSignal::default();
  let far = signal.level(1e8);

  assert!(far < MAX_EXPOSURE);
  assert!((MAX_EXPOSURE - far) / MAX_EXPOSURE < 0.01);
}

#[test]
fn treatment_end_is_inclusive() {
  let signal = ExposureSignal::default().with_treatment_end(TREATMENT_END_TIME);

  assert_eq!(signal.level(30.0), 0.0);
  assert_eq!(signal.level(1e6), 0.0);
  assert!(signal.level(29.999) > 0.0);
  assert_eq!(
    signal.level(29.999),
    ExposureSignal::default().level(29.999)
  );
}

#[cfg(test)]
proptest! {
#[test]
fn exposure_is_monotone_and_bounded(
  t in 1e-6f64..1e6,
  dt in 1e-3f64..1e3,
  max_level in 0.1f64..100.0,
  half_saturation in 0.1f64..1000.0,
) {
  let signal = ExposureSignal {
    max_level,
    half_saturation,
    treatment_end: None,
  };

  let earlier = signal.level(t);
  let later = signal.level(t + dt);

  prop_assert!(earlier > 0.0);
  prop_assert!(earlier <= later);
  prop_assert!(later < max_level);
}
}
