use crate::{
  error::ConfigResult,
  ode::{Integrator, IntegratorType, SwappableIntegrator},
  simulation::{
    GlobalParams, IntegrationParams, Sample, Series, StepParams, TimeSpan,
    Trajectory,
  },
  tumor::{Compartments, ThreeCompartment, Topology, TwoCompartment, S},
};
use tracing::{debug, info, warn};

#[cfg(test)]
use crate::{
  error::ConfigError,
  ode::{EulerSettings, RK4Settings},
  tumor::{GrowthLaw, TumorParams},
};
#[cfg(test)]
use approx::assert_relative_eq;
#[cfg(test)]
use nalgebra::Vector3;
#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;

/// Runs a tumor model over a fixed time span.
pub struct Simulation<M: Compartments>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  model: M,
  integrator_type: IntegratorType,
  integrator: SwappableIntegrator<M>,
  step_params: StepParams,
  span: TimeSpan,
}

impl<M: Compartments> Simulation<M>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  pub fn new(
    model: M,
    integration_params: IntegrationParams,
  ) -> ConfigResult<Self> {
    model.params().validate()?;
    integration_params.validate()?;

    let IntegrationParams {
      integrator_type,
      step_params,
      span,
    } = integration_params;

    Ok(Self {
      model,
      integrator_type,
      integrator: SwappableIntegrator::new(integrator_type),
      step_params,
      span,
    })
  }

  pub fn model(&self) -> &M {
    &self.model
  }

  pub fn run(&mut self, initial: &M::State) -> Trajectory<M::State> {
    self.run_observed(initial, |_| {})
  }

  /// Like [`Simulation::run`], calling `on_sample` for each sample as it is
  /// recorded.
  ///
  /// The clock advances by repeated addition of the time step, so the last
  /// sample may land a rounding error short of the end time. States are
  /// recorded as integrated: a diverging run is logged once and carried to
  /// the end unchanged.
  pub fn run_observed<F>(
    &mut self,
    initial: &M::State,
    mut on_sample: F,
  ) -> Trajectory<M::State>
  where
    F: FnMut(&Sample<M::State>),
  {
    let TimeSpan { start, end } = self.span;
    let time_step = self.step_params.time_step;

    debug!(
      compartments = M::NAMES.len(),
      growth = %self.model.params().growth,
      treatment_end = ?self.model.params().exposure.treatment_end,
      integrator = %self.integrator_type,
      start,
      end,
      time_step,
      "starting run"
    );

    let mut trajectory = Trajectory::with_capacity(
      ((end - start) / time_step).floor() as usize + 2,
    );
    let mut state = initial.clone();
    let mut time = start;
    let mut diverged = false;

    while time <= end {
      let sample = Sample {
        time,
        burden: self.model.burden(&state),
        state,
      };

      if !diverged && !sample.is_finite() {
        diverged = true;
        warn!(
          time,
          time_step, "state is no longer finite; time step may be too large"
        );
      }

      on_sample(&sample);

      state = self
        .integrator
        .advance(&self.model, &sample.state, &time, &time_step);
      time += time_step;

      trajectory.push(sample);
    }

    if let Some(last) = trajectory.last() {
      info!(
        samples = trajectory.len(),
        final_time = last.time,
        final_burden = last.burden,
        "run finished"
      );
    }

    trajectory
  }
}

fn run_series<M: Compartments>(
  model: M,
  integration_params: IntegrationParams,
  mut on_sample: impl FnMut(S),
) -> ConfigResult<Series>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  let mut simulation = Simulation::new(model, integration_params)?;
  let initial = simulation.model().initial_state();

  let trajectory =
    simulation.run_observed(&initial, |sample| on_sample(sample.time));

  Ok(trajectory.series(M::NAMES))
}

/// Run the configured topology from its initial state.
pub fn simulate(params: &GlobalParams) -> ConfigResult<Series> {
  simulate_observed(params, |_| {})
}

/// Like [`simulate`], calling `on_sample` with the time of each sample.
pub fn simulate_observed(
  params: &GlobalParams,
  on_sample: impl FnMut(S),
) -> ConfigResult<Series> {
  let GlobalParams {
    topology,
    tumor_params,
    integration_params,
  } = *params;

  match topology {
    Topology::Two => run_series(
      TwoCompartment::new(tumor_params),
      integration_params,
      on_sample,
    ),
    Topology::Three => run_series(
      ThreeCompartment::new(tumor_params),
      integration_params,
      on_sample,
    ),
  }
}

#[cfg(test)]
fn three_compartment(
  tumor_params: TumorParams,
  integration_params: IntegrationParams,
) -> Simulation<ThreeCompartment> {
  Simulation::new(ThreeCompartment::new(tumor_params), integration_params)
    .expect("test parameters are valid")
}

#[cfg(test)]
fn final_state(tumor_params: TumorParams) -> Vector3<S> {
  let mut simulation =
    three_compartment(tumor_params, IntegrationParams::default());
  let initial = simulation.model().initial_state();

  simulation
    .run(&initial)
    .last()
    .expect("non-empty span")
    .state
}

#[test]
fn sample_count_follows_span() {
  let mut simulation =
    three_compartment(TumorParams::default(), IntegrationParams::default());
  let initial = simulation.model().initial_state();
  let trajectory = simulation.run(&initial);

  assert!((1000..=1002).contains(&trajectory.len()));
  assert_eq!(trajectory.first().map(|sample| sample.time), Some(0.0));
  assert_relative_eq!(
    trajectory.last().expect("non-empty").time,
    100.0,
    max_relative = 1e-9
  );
  assert!(trajectory
    .samples()
    .windows(2)
    .all(|pair| pair[0].time < pair[1].time));
}

#[test]
fn empty_span_records_the_initial_state() {
  let integration_params = IntegrationParams {
    span: TimeSpan {
      start: 5.0,
      end: 5.0,
    },
    ..IntegrationParams::default()
  };
  let mut simulation =
    three_compartment(TumorParams::default(), integration_params);
  let initial = Vector3::new(1.0, 2.0, 3.0);

  let trajectory = simulation.run(&initial);

  assert_eq!(trajectory.len(), 1);
  assert_eq!(trajectory.samples()[0].time, 5.0);
  assert_eq!(trajectory.samples()[0].state, initial);
  assert_eq!(trajectory.samples()[0].burden, 3.0);
}

#[test]
fn nothing_moves_without_drug() {
  let tumor_params = TumorParams {
    kill_rate: 0.0,
    ..TumorParams::default()
  };
  let mut simulation =
    three_compartment(tumor_params, IntegrationParams::default());

  let trajectory = simulation.run(&Vector3::new(30.0, 7.0, 0.0));

  for sample in &trajectory {
    assert_eq!(sample.state[1], 7.0);
    assert_eq!(sample.state[2], 0.0);
  }
}

#[test]
fn rk4_tracks_closed_form_growth() {
  let tumor_params = TumorParams {
    growth: GrowthLaw::Exponential { rate: 0.1 },
    kill_rate: 0.0,
    ..TumorParams::default()
  };
  let mut simulation =
    three_compartment(tumor_params, IntegrationParams::default());
  let initial = simulation.model().initial_state();
  let trajectory = simulation.run(&initial);

  let sample = &trajectory.samples()[500];
  assert_relative_eq!(sample.time, 50.0, max_relative = 1e-9);
  assert_relative_eq!(
    sample.state[0],
    30.0 * (0.1 * sample.time).exp(),
    max_relative = 1e-4
  );
}

#[test]
fn sustained_treatment_clears_viable_cells() {
  for growth in [
    TumorParams::default().growth,
    GrowthLaw::Exponential { rate: 0.1 },
  ] {
    let last = final_state(TumorParams {
      growth,
      ..TumorParams::default()
    });

    assert!(last[0] < 1e-6, "S1(100) = {}", last[0]);
    assert!(last[1] > 0.0);
    assert!(last[2] > 0.0);
  }
}

#[test]
fn tumor_regrows_after_withdrawal() {
  let mut tumor_params = TumorParams::default();
  tumor_params.exposure = tumor_params.exposure.with_treatment_end(30.0);

  let last = final_state(tumor_params);

  assert!(last[0] > tumor_params.initial_viable, "S1(100) = {}", last[0]);
  assert!(last[2] > 0.0);
}

#[test]
fn withdrawal_inside_a_step_is_seen_by_later_stages() {
  let second_state = |treatment_end: Option<S>| {
    let mut tumor_params = TumorParams::default();
    tumor_params.exposure.treatment_end = treatment_end;
    let integration_params = IntegrationParams {
      span: TimeSpan {
        start: 0.0,
        end: 0.1,
      },
      ..IntegrationParams::default()
    };
    let mut simulation = three_compartment(tumor_params, integration_params);
    let initial = simulation.model().initial_state();

    simulation.run(&initial).samples()[1].state
  };

  // stages sample t, t + dt/2, t + dt/2, t + dt
  let cut_at_half_step = second_state(Some(0.05));
  let cut_at_full_step = second_state(Some(0.1));
  let uncut = second_state(None);

  assert_eq!(cut_at_half_step[1], 0.0);
  assert!(cut_at_half_step[1] < cut_at_full_step[1]);
  assert!(cut_at_full_step[1] < uncut[1]);
}

#[test]
fn divergence_is_not_masked() {
  let tumor_params = TumorParams {
    growth: GrowthLaw::Exponential { rate: -50.0 },
    kill_rate: 0.0,
    ..TumorParams::default()
  };
  let mut simulation =
    three_compartment(tumor_params, IntegrationParams::default());
  let initial = simulation.model().initial_state();

  let trajectory = simulation.run(&initial);

  assert!((1000..=1002).contains(&trajectory.len()));
  assert!(trajectory
    .iter()
    .any(|sample| !sample.is_finite() || sample.state[0].abs() > 1e6));
}

#[test]
fn observer_sees_every_sample() {
  let mut simulation =
    three_compartment(TumorParams::default(), IntegrationParams::default());
  let initial = simulation.model().initial_state();
  let mut times = Vec::new();

  let trajectory =
    simulation.run_observed(&initial, |sample| times.push(sample.time));

  assert_eq!(times.len(), trajectory.len());
  assert_eq!(times.last(), trajectory.last().map(|sample| &sample.time));
}

#[test]
fn integrator_choice_changes_the_result() {
  let run = |integrator_type| {
    let integration_params = IntegrationParams {
      integrator_type,
      ..IntegrationParams::default()
    };
    let mut simulation =
      three_compartment(TumorParams::default(), integration_params);
    let initial = simulation.model().initial_state();
    simulation.run(&initial)
  };

  let rk4 = run(IntegratorType::RK4(RK4Settings {}));
  let euler = run(IntegratorType::Euler(EulerSettings {}));

  assert_eq!(rk4.len(), euler.len());
  assert_ne!(rk4.last(), euler.last());
}

#[test]
fn series_lines_up_with_topology() {
  let three = simulate(&GlobalParams::default()).expect("valid");

  assert_eq!(three.names(), vec!["S1", "S2", "D"]);
  for (_, column) in &three.compartments {
    assert_eq!(column.len(), three.len());
  }
  assert_eq!(three.burden.len(), three.len());
  let (s1, s2) = (three.column("S1").unwrap(), three.column("S2").unwrap());
  for ((burden, s1), s2) in three.burden.iter().zip(s1).zip(s2) {
    assert_eq!(*burden, s1 + s2);
  }

  let two = simulate(&GlobalParams {
    topology: Topology::Two,
    ..GlobalParams::default()
  })
  .expect("valid");

  assert_eq!(two.names(), vec!["S", "D"]);
  assert_eq!(two.len(), three.len());
  assert_eq!(two.burden, two.column("S").unwrap());
}

#[test]
fn simulate_reports_bad_configuration() {
  let mut params = GlobalParams::default();
  params.integration_params.step_params.time_step = 0.0;

  assert_eq!(
    simulate(&params),
    Err(ConfigError::NonPositiveStep { time_step: 0.0 })
  );

  let mut params = GlobalParams::default();
  params.tumor_params.clearance_rate = S::INFINITY;

  assert!(matches!(
    simulate(&params),
    Err(ConfigError::NonFinite { .. })
  ));
}

#[cfg(test)]
#[derive(Debug, Arbitrary)]
enum ModelOptions {
  TwoCompartment,
  ThreeCompartment,
}

#[cfg(test)]
impl ModelOptions {
  fn topology(&self) -> Topology {
    match self {
      ModelOptions::TwoCompartment => Topology::Two,
      ModelOptions::ThreeCompartment => Topology::Three,
    }
  }
}

#[cfg(test)]
fn tumor_params(
  growth_rate: S,
  kill_rate: S,
  clearance_rate: S,
  max_level: S,
  logistic: bool,
) -> TumorParams {
  let mut params = TumorParams {
    growth: if logistic {
      GrowthLaw::Logistic {
        rate: growth_rate,
        carrying_capacity: 120.0,
      }
    } else {
      GrowthLaw::Exponential { rate: growth_rate }
    },
    kill_rate,
    clearance_rate,
    ..TumorParams::default()
  };
  params.exposure.max_level = max_level;
  params
}

#[cfg(test)]
proptest! {
#![proptest_config(ProptestConfig::with_cases(64))]

#[test]
fn runs_are_reproducible(
  model_option: ModelOptions,
  growth_rate in 0.0f64..0.2,
  kill_rate in 0.0f64..0.1,
  clearance_rate in 0.0f64..0.5,
  max_level in 0.0f64..50.0,
  logistic in any::<bool>(),
) {
  let params = GlobalParams {
    topology: model_option.topology(),
    tumor_params: tumor_params(
      growth_rate, kill_rate, clearance_rate, max_level, logistic,
    ),
    ..GlobalParams::default()
  };

  let first = simulate(&params).expect("valid");
  let second = simulate(&params).expect("valid");

  prop_assert_eq!(first, second);
}

#[test]
fn populations_stay_non_negative(
  model_option: ModelOptions,
  growth_rate in 0.0f64..0.2,
  kill_rate in 0.0f64..0.1,
  clearance_rate in 0.0f64..0.5,
  max_level in 0.0f64..50.0,
  logistic in any::<bool>(),
) {
  let params = GlobalParams {
    topology: model_option.topology(),
    tumor_params: tumor_params(
      growth_rate, kill_rate, clearance_rate, max_level, logistic,
    ),
    ..GlobalParams::default()
  };

  let series = simulate(&params).expect("valid");

  for (name, column) in &series.compartments {
    for value in column {
      prop_assert!(*value >= -1e-9, "{} went negative: {}", name, value);
    }
  }
}

#[test]
fn zero_rates_hold_any_state(
  x in prop::array::uniform3(0.0f64..1000.0),
  t in 0.0f64..100.0,
) {
  let model = ThreeCompartment::new(tumor_params(0.0, 0.0, 0.0, 30.0, false));
  let mut simulation = Simulation::new(model, IntegrationParams {
    span: TimeSpan { start: t, end: t + 1.0 },
    ..IntegrationParams::default()
  }).expect("valid");

  let trajectory = simulation.run(&Vector3::from(x));

  for sample in &trajectory {
    prop_assert_eq!(sample.state, Vector3::from(x));
  }
}
}
