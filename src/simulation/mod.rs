//! Monte Carlo demonstrations built on the generator and the fitter.

mod inflation;

pub use inflation::{InflationPoint, InflationStudy, SimulationError};
