//! Reference frames, orientations and the per-timestep transformation chain.

mod earth;
mod frame_chain;
mod orientation;

pub use earth::{
    EARTH_RADIUS_KM, EarthRotation, MeanSiderealRotation, NonRotatingEarth, julian_date,
    julian_date_at,
};
pub use frame_chain::FrameChain;
pub use orientation::{EulerSequence, Orientation, ReferenceFrame};
