#![allow(clippy::similar_names, clippy::module_name_repetitions)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
//! Ground point access computation for pointable spacecraft instruments.
//!
//! A [`CoverageRun`] walks a propagated [`Trajectory`], builds the frame chain of every
//! timestep and reports which points of a [`PointGroup`] fall inside the instrument's
//! field of view or field of regard.

pub mod logger;

pub mod config;
pub mod coverage;
pub mod error;
pub mod fov;
pub mod frames;
pub mod geometry;
pub mod instrument;
pub mod maneuver;
pub mod points;

pub use config::{InstrumentSpec, RunSettings, SpacecraftSpec};
pub use coverage::{AccessInterval, AccessTable, CoverageChecker, CoverageRun, StateVector, Trajectory};
pub use error::{ConfigError, CoverageError, FrameError, InputFormatError};
pub use fov::FovGeometry;
pub use frames::{EarthRotation, MeanSiderealRotation, NonRotatingEarth, Orientation, ReferenceFrame};
pub use instrument::{Instrument, Spacecraft, ViewMode};
pub use maneuver::ManeuverSpec;
pub use points::{LatLonBounds, PointGroup};
