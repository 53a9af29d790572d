use clap::Args;

/// Settings for integrators that have nothing to configure.
#[derive(Args, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullSettings {}
