use crate::frames::ReferenceFrame;
use strum_macros::Display;

/// Malformed or inconsistent static configuration. Raised while building sensors,
/// orientations and maneuvers, before any timestep is processed.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ConfigError {
    #[strum(to_string = "conical half angle {half_angle} rad is outside (0, pi]")]
    InvalidHalfAngle { half_angle: f64 },
    #[strum(to_string = "rectangular fov {width} x {height} rad must lie within (0, pi) on both axes")]
    InvalidRectangle { width: f64, height: f64 },
    #[strum(to_string = "custom fov needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[strum(to_string = "rectangle corner description needs 4 or 5 vertices, got {count}")]
    InvalidCornerCount { count: usize },
    #[strum(to_string = "custom fov vertex {index} has cone angle {cone} rad outside (0, pi/2)")]
    InvalidVertexCone { index: usize, cone: f64 },
    #[strum(to_string = "custom fov cone and clock lists differ in length ({cones} vs {clocks})")]
    VertexLengthMismatch { cones: usize, clocks: usize },
    #[strum(to_string = "custom fov is not a convex counter-clockwise polygon at edge {edge}")]
    NotCounterClockwise { edge: usize },
    #[strum(to_string = "euler sequence {first}-{second}-{third} is not a valid rotation sequence")]
    InvalidEulerSequence { first: u8, second: u8, third: u8 },
    #[strum(to_string = "angle {name} is not finite")]
    NonFiniteAngle { name: &'static str },
    #[strum(to_string = "a sensor orientation cannot be referenced to the {frame} frame")]
    InvalidSensorFrame { frame: ReferenceFrame },
    #[strum(to_string = "the spacecraft body orientation must be referenced to the nadir frame, got {frame}")]
    InvalidBodyFrame { frame: ReferenceFrame },
    #[strum(to_string = "circular maneuver diameter {diameter} rad is outside (0, pi]")]
    InvalidManeuverDiameter { diameter: f64 },
    #[strum(to_string = "roll range [{min}, {max}] rad is empty or exceeds [-pi, pi]")]
    InvalidRollRange { min: f64, max: f64 },
    #[strum(to_string = "maneuvers are only defined for conical and rectangular fields of view")]
    UnsupportedManeuverFov,
    #[strum(to_string = "field of regard diameter {diameter} rad exceeds the full sphere")]
    ProxyConeOutOfRange { diameter: f64 },
    #[strum(to_string = "field of regard {width} x {height} rad is no longer a valid rectangle")]
    ProxyRectangleOutOfRange { width: f64, height: f64 },
    #[strum(to_string = "only a single instrument per spacecraft is supported, got {count}")]
    UnsupportedInstrumentCount { count: usize },
    #[strum(to_string = "instrument has no {what} configured")]
    MissingViewMode { what: &'static str },
}

impl std::error::Error for ConfigError {}

/// Malformed trajectory or grid record. Fatal for a run, indices would misalign otherwise.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum InputFormatError {
    #[strum(to_string = "grid has {lats} latitudes but {lons} longitudes")]
    LengthMismatch { lats: usize, lons: usize },
    #[strum(to_string = "grid point {index}: latitude {lat} rad outside [-pi/2, pi/2]")]
    LatitudeOutOfRange { index: usize, lat: f64 },
    #[strum(to_string = "grid point {index}: longitude {lon} rad outside [-pi, pi]")]
    LongitudeOutOfRange { index: usize, lon: f64 },
    #[strum(to_string = "grid bounds or resolution are invalid")]
    InvalidGridSpec,
    #[strum(to_string = "state at time index {time_index} contains non-finite values")]
    NonFiniteState { time_index: usize },
    #[strum(to_string = "state at time index {time_index} has a zero position vector")]
    ZeroPosition { time_index: usize },
    #[strum(to_string = "record {position} carries time index {time_index}, expected strictly increasing indices")]
    OutOfOrder { position: usize, time_index: usize },
}

impl std::error::Error for InputFormatError {}

/// Per-timestep frame construction failure. Contained to the affected timestep.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[strum(to_string = "nadir frame undefined at time index {time_index}: velocity parallel to position")]
    Degenerate { time_index: usize },
}

impl std::error::Error for FrameError {}

/// Top level error of a coverage run.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum CoverageError {
    #[strum(to_string = "configuration error: {source}")]
    Configuration { source: ConfigError },
    #[strum(to_string = "input format error: {source}")]
    InputFormat { source: InputFormatError },
    #[strum(to_string = "frame error: {source}")]
    Frame { source: FrameError },
    #[strum(to_string = "run cancelled after {completed} timesteps")]
    Cancelled { completed: usize },
    #[strum(to_string = "coverage worker failed: {reason}")]
    WorkerFailed { reason: String },
}

impl std::error::Error for CoverageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoverageError::Configuration { source } => Some(source),
            CoverageError::InputFormat { source } => Some(source),
            CoverageError::Frame { source } => Some(source),
            CoverageError::Cancelled { .. } | CoverageError::WorkerFailed { .. } => None,
        }
    }
}

impl From<ConfigError> for CoverageError {
    fn from(source: ConfigError) -> Self { CoverageError::Configuration { source } }
}

impl From<InputFormatError> for CoverageError {
    fn from(source: InputFormatError) -> Self { CoverageError::InputFormat { source } }
}

impl From<FrameError> for CoverageError {
    fn from(source: FrameError) -> Self { CoverageError::Frame { source } }
}
