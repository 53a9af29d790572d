use crate::{
  error::{ConfigError, ConfigResult},
  ode::IntegratorType,
  tumor::{Topology, TumorParams, S},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
  pub time_step: S,
}

/// Closed interval of simulated time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSpan {
  pub start: S,
  pub end: S,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationParams {
  pub integrator_type: IntegratorType,
  pub step_params: StepParams,
  pub span: TimeSpan,
}

impl Default for IntegrationParams {
  fn default() -> Self {
    Self {
      integrator_type: IntegratorType::default(),
      step_params: StepParams { time_step: 0.1 },
      span: TimeSpan {
        start: 0.0,
        end: 100.0,
      },
    }
  }
}

impl IntegrationParams {
  /// Samples a run produces, give or take one from clock rounding.
  pub fn expected_samples(&self) -> usize {
    let TimeSpan { start, end } = self.span;

    ((end - start) / self.step_params.time_step).floor() as usize + 1
  }

  pub fn validate(&self) -> ConfigResult<()> {
    let time_step = self.step_params.time_step;
    let TimeSpan { start, end } = self.span;

    if !(time_step.is_finite() && time_step > 0.0) {
      return Err(ConfigError::NonPositiveStep { time_step });
    }

    for (what, value) in [("start time", start), ("end time", end)] {
      if !value.is_finite() {
        return Err(ConfigError::NonFinite { what, value });
      }
    }

    if end < start {
      return Err(ConfigError::EmptySpan { start, end });
    }

    // the clock must keep moving all the way to `end`
    let time = if end.abs() > start.abs() { end } else { start };
    if time + time_step == time {
      return Err(ConfigError::StepBelowResolution { time_step, time });
    }

    Ok(())
  }
}

/// Everything needed for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobalParams {
  pub topology: Topology,
  pub tumor_params: TumorParams,
  pub integration_params: IntegrationParams,
}

impl GlobalParams {
  pub fn validate(&self) -> ConfigResult<()> {
    self.tumor_params.validate()?;
    self.integration_params.validate()
  }
}

#[cfg(test)]
fn with_span(start: S, end: S, time_step: S) -> IntegrationParams {
  IntegrationParams {
    step_params: StepParams { time_step },
    span: TimeSpan { start, end },
    ..IntegrationParams::default()
  }
}

#[test]
fn default_run_is_valid() {
  let params = GlobalParams::default();

  assert_eq!(params.validate(), Ok(()));
  assert_eq!(params.integration_params.expected_samples(), 1001);
  assert_eq!(params.topology, Topology::Three);
}

#[test]
fn rejects_steps_that_never_finish() {
  for time_step in [0.0, -0.1, S::NAN, S::INFINITY] {
    assert!(matches!(
      with_span(0.0, 1.0, time_step).validate(),
      Err(ConfigError::NonPositiveStep { .. })
    ));
  }

  assert_eq!(
    with_span(1e20, 2e20, 1.0).validate(),
    Err(ConfigError::StepBelowResolution {
      time_step: 1.0,
      time: 2e20
    })
  );
}

#[test]
fn rejects_backwards_span() {
  assert_eq!(
    with_span(10.0, 5.0, 0.1).validate(),
    Err(ConfigError::EmptySpan {
      start: 10.0,
      end: 5.0
    })
  );
  assert_eq!(with_span(5.0, 5.0, 0.1).validate(), Ok(()));
  assert!(matches!(
    with_span(0.0, S::INFINITY, 0.1).validate(),
    Err(ConfigError::NonFinite {
      what: "end time",
      ..
    })
  ));
}
