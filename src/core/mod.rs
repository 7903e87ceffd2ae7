mod engine;
mod types;

pub use engine::{percentile, simulate};
pub use types::{Inputs, SimulationOutput};
