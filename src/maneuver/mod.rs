//! Maneuver envelopes and their field of regard proxy sensors.

mod maneuver_spec;

pub use maneuver_spec::{ManeuverSpec, RollRange};
