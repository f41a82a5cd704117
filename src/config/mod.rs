//! Run switches and the serde facing input descriptions.

mod settings;
mod specs;
#[cfg(test)]
mod tests;

pub use settings::{PARALLEL_VAR, RECORD_GEOMETRY_VAR, RunSettings, YAW_180_VAR};
pub use specs::{FovSpec, InstrumentSpec, ManeuverSpecInput, OrientationConvention, OrientationSpec, SpacecraftSpec};
