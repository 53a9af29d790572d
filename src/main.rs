use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use std::io::{self, BufWriter, Write};
use tumor_sim::{
  ode::IntegratorType,
  simulate_observed,
  tumor::params::{CARRYING_CAPACITY, GROWTH_RATE},
  Burden, GlobalParams, GrowthLaw, Series, Topology, TumorParams,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GrowthKind {
  Exponential,
  Logistic,
}

#[derive(Parser)]
#[command(version, about = "Tumor growth under drug exposure")]
struct Opts {
  #[arg(long, value_enum, default_value_t = Topology::Three)]
  topology: Topology,

  #[arg(long, value_enum, default_value_t = GrowthKind::Logistic)]
  growth: GrowthKind,

  /// Withdraw the drug at this time (30 when no value is given)
  #[arg(long, num_args = 0..=1, default_missing_value = "30")]
  treatment_end: Option<f64>,

  #[arg(long, value_enum, default_value_t = Burden::Viable)]
  burden: Burden,

  /// Print every n-th sample
  #[arg(
    long,
    default_value_t = 1,
    value_parser = clap::value_parser!(u64).range(1..)
  )]
  every: u64,

  #[arg(short = 'p', long = "progress")]
  progress: bool,

  /// Log verbosity (trace, debug, info, warn, error)
  #[arg(long, default_value = "warn")]
  log_level: tracing::Level,

  #[command(subcommand)]
  integrator: Option<IntegratorType>,
}

impl Opts {
  fn global_params(&self) -> GlobalParams {
    let growth = match self.growth {
      GrowthKind::Exponential => GrowthLaw::Exponential { rate: GROWTH_RATE },
      GrowthKind::Logistic => GrowthLaw::Logistic {
        rate: GROWTH_RATE,
        carrying_capacity: CARRYING_CAPACITY,
      },
    };

    let mut tumor_params = TumorParams {
      growth,
      burden: self.burden,
      ..TumorParams::default()
    };
    tumor_params.exposure.treatment_end = self.treatment_end;

    let mut global_params = GlobalParams {
      topology: self.topology,
      tumor_params,
      ..GlobalParams::default()
    };
    global_params.integration_params.integrator_type =
      self.integrator.unwrap_or_default();

    global_params
  }
}

fn write_table(
  out: &mut impl Write,
  series: &Series,
  every: usize,
) -> io::Result<()> {
  write!(out, "t")?;
  for name in series.names() {
    write!(out, ",{}", name)?;
  }
  writeln!(out, ",burden")?;

  for row in (0..series.len()).step_by(every) {
    write!(out, "{}", series.time[row])?;
    for (_, column) in &series.compartments {
      write!(out, ",{}", column[row])?;
    }
    writeln!(out, ",{}", series.burden[row])?;
  }

  out.flush()
}

fn main() -> anyhow::Result<()> {
  let opts = Opts::parse();

  tracing_subscriber::fmt()
    .with_max_level(opts.log_level)
    .with_target(false)
    .with_writer(io::stderr)
    .init();

  let global_params = opts.global_params();

  let progress_bar = if opts.progress {
    Some(ProgressBar::new(
      global_params.integration_params.expected_samples() as u64,
    ))
  } else {
    None
  };

  let series = simulate_observed(&global_params, |_| {
    if let Some(p_bar) = &progress_bar {
      p_bar.inc(1);
    }
  })?;

  if let Some(p_bar) = &progress_bar {
    p_bar.finish();
  }

  let stdout = io::stdout();
  let mut out = BufWriter::new(stdout.lock());
  write_table(&mut out, &series, opts.every as usize)?;

  Ok(())
}
