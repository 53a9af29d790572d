use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tumor_sim::ode::{
  EulerSettings, Integrator, IntegratorType, MidpointSettings, RK4Settings,
  SwappableIntegrator,
};
use tumor_sim::simulation::{simulate, GlobalParams, IntegrationParams};
use tumor_sim::{Compartments, ThreeCompartment, Topology, TumorParams};

const INTEGRATOR_TYPES: [IntegratorType; 3] = [
  IntegratorType::Euler(EulerSettings {}),
  IntegratorType::Midpoint(MidpointSettings {}),
  IntegratorType::RK4(RK4Settings {}),
];

fn integrator(c: &mut Criterion) {
  for integrator_type in INTEGRATOR_TYPES.iter() {
    let model = ThreeCompartment::new(TumorParams::default());

    let mut integrator: SwappableIntegrator<ThreeCompartment> =
      SwappableIntegrator::new(*integrator_type);

    let mut state = model.initial_state();

    let mut time = 1.0;
    let time_step = 0.1;

    c.bench_function(
      &format!("integrator {} three-compartment step", integrator_type),
      |b| {
        b.iter(|| {
          integrator.step(
            black_box(&model),
            &mut state,
            &mut time,
            black_box(&time_step),
          )
        })
      },
    );
  }
}

fn full_run(c: &mut Criterion) {
  for topology in [Topology::Two, Topology::Three].iter() {
    for integrator_type in INTEGRATOR_TYPES.iter() {
      let params = GlobalParams {
        topology: *topology,
        integration_params: IntegrationParams {
          integrator_type: *integrator_type,
          ..IntegrationParams::default()
        },
        ..GlobalParams::default()
      };

      c.bench_function(
        &format!("run {} {} t=0..100", topology, integrator_type),
        |b| b.iter(|| simulate(black_box(&params))),
      );
    }
  }
}

criterion_group!(benches, integrator, full_run);
criterion_main!(benches);
