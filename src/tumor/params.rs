use crate::{
  error::{ConfigError, ConfigResult},
  tumor::{ExposureSignal, GrowthLaw, S},
};
use clap::ValueEnum;

// -- Reference constants --

/// Growth rate of viable cells, `k_g` [1/time].
pub const GROWTH_RATE: S = 0.1;

/// Drug kill coefficient, `k_d`. Also the rate at which affected cells die.
pub const KILL_RATE: S = 0.04;

/// Clearance rate of dead cells, `d` [1/time].
pub const CLEARANCE_RATE: S = 0.10;

/// Plateau of the exposure signal, `e_max`.
pub const MAX_EXPOSURE: S = 30.0;

/// Time at which exposure reaches half of `e_max`, `K`.
pub const HALF_SATURATION: S = 100.0;

/// Carrying capacity for logistic growth, `T_max`.
pub const CARRYING_CAPACITY: S = 120.0;

/// Drug withdrawal time used when treatment end is enabled.
pub const TREATMENT_END_TIME: S = 30.0;

/// Viable cells at the start of a run.
pub const INITIAL_VIABLE: S = 30.0;

/// Which compartments count towards the reported tumor burden.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Burden {
  /// Every compartment except dead cells
  Viable,
  /// Every compartment, dead cells included
  Total,
}

impl Default for Burden {
  fn default() -> Self {
    Self::Viable
  }
}

/// Model constants for one run. Never changes while a run is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TumorParams {
  pub growth: GrowthLaw,
  pub kill_rate: S,
  pub clearance_rate: S,
  pub exposure: ExposureSignal,
  pub burden: Burden,
  pub initial_viable: S,
}

impl Default for TumorParams {
  fn default() -> Self {
    Self {
      growth: GrowthLaw::Logistic {
        rate: GROWTH_RATE,
        carrying_capacity: CARRYING_CAPACITY,
      },
      kill_rate: KILL_RATE,
      clearance_rate: CLEARANCE_RATE,
      exposure: ExposureSignal::default(),
      burden: Burden::default(),
      initial_viable: INITIAL_VIABLE,
    }
  }
}

fn finite(what: &'static str, value: S) -> ConfigResult<()> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(ConfigError::NonFinite { what, value })
  }
}

impl TumorParams {
  /// Rejects constants that would poison every sample with `NaN`.
  ///
  /// Signs are not checked: pathological rates are allowed and show up in
  /// the trajectory.
  pub fn validate(&self) -> ConfigResult<()> {
    finite("growth rate", self.growth.rate())?;
    if let GrowthLaw::Logistic {
      carrying_capacity, ..
    } = self.growth
    {
      finite("carrying capacity", carrying_capacity)?;
    }
    finite("kill rate", self.kill_rate)?;
    finite("clearance rate", self.clearance_rate)?;
    finite("max exposure", self.exposure.max_level)?;
    finite("half saturation", self.exposure.half_saturation)?;
    if self.exposure.half_saturation < 0.0 {
      return Err(ConfigError::Negative {
        what: "half saturation",
        value: self.exposure.half_saturation,
      });
    }
    if let Some(treatment_end) = self.exposure.treatment_end {
      // +inf is a valid "never"
      if treatment_end.is_nan() {
        return Err(ConfigError::NonFinite {
          what: "treatment end",
          value: treatment_end,
        });
      }
    }
    finite("initial viable cells", self.initial_viable)
  }
}

#[test]
fn defaults_are_valid() {
  assert_eq!(TumorParams::default().validate(), Ok(()));
  assert_eq!(TumorParams::default().exposure.treatment_end, None);
}

#[test]
fn rejects_nan_kill_rate() {
  let params = TumorParams {
    kill_rate: S::NAN,
    ..TumorParams::default()
  };

  assert!(matches!(
    params.validate(),
    Err(ConfigError::NonFinite {
      what: "kill rate",
      ..
    })
  ));
}

#[test]
fn rejects_negative_half_saturation() {
  let mut params = TumorParams::default();
  params.exposure.half_saturation = -1.0;

  assert!(matches!(
    params.validate(),
    Err(ConfigError::Negative { .. })
  ));
}

#[test]
fn allows_negative_rates() {
  let params = TumorParams {
    growth: GrowthLaw::Exponential { rate: -2.0 },
    ..TumorParams::default()
  };

  assert_eq!(params.validate(), Ok(()));
}
