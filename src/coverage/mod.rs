//! Per-timestep visibility evaluation and trajectory coverage runs.

mod access_table;
mod checker;
mod run;
mod state;
#[cfg(test)]
mod tests;

pub use access_table::{AccessInterval, AccessRow, AccessTable};
pub use checker::{AccessGeometry, CoverageChecker, CoverageResult, TimestepGeometry};
pub use run::CoverageRun;
pub use state::{StateVector, Trajectory};
