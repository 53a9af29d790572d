pub mod compartments;
pub mod exposure;
pub mod growth;
pub mod params;
pub mod three_compartment;
pub mod two_compartment;

pub use compartments::Compartments;
pub use exposure::ExposureSignal;
pub use growth::GrowthLaw;
pub use params::{Burden, TumorParams};
pub use three_compartment::ThreeCompartment;
pub use two_compartment::TwoCompartment;

use clap::ValueEnum;
use std::fmt;

pub type S = f64;

/// Number and wiring of compartments.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
  /// Viable and dead cells
  Two,
  /// Viable, drug-affected and dead cells
  Three,
}

impl Default for Topology {
  fn default() -> Self {
    Self::Three
  }
}

impl fmt::Display for Topology {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Two => "two-compartment",
      Self::Three => "three-compartment",
    })
  }
}
