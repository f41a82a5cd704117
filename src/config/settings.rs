use crate::frames::EARTH_RADIUS_KM;
use crate::warn;
use std::env;

/// Enables the yaw-180 two-look pass.
pub const YAW_180_VAR: &str = "COVERAGE_YAW_180";
/// Enables data-parallel timestep evaluation.
pub const PARALLEL_VAR: &str = "COVERAGE_PARALLEL";
/// Enables per access geometry records.
pub const RECORD_GEOMETRY_VAR: &str = "COVERAGE_RECORD_GEOMETRY";

/// Switches of a coverage run.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunSettings {
    /// Union every timestep with a second pass yawed by 180 deg.
    pub yaw_180: bool,
    /// Evaluate timesteps on the rayon thread pool.
    pub parallel: bool,
    /// Radius of the spherical Earth model in km.
    pub earth_radius_km: f64,
    /// Attach range and angle records to every access row.
    pub record_geometry: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self { yaw_180: false, parallel: true, earth_radius_km: EARTH_RADIUS_KM, record_geometry: false }
    }
}

impl RunSettings {
    /// Defaults overlaid with the `COVERAGE_*` environment variables.
    pub fn from_env() -> Self { Self::default().overlay(|name| env::var(name).ok()) }

    /// Overlays switches looked up by variable name. Unparseable values are reported and
    /// leave the switch unchanged.
    pub fn overlay<F>(mut self, lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let flag = |name: &str, current: bool| match lookup(name) {
            None => current,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!("Ignoring {name}={raw}, expected a boolean switch");
                current
            }),
        };
        self.yaw_180 = flag(YAW_180_VAR, self.yaw_180);
        self.parallel = flag(PARALLEL_VAR, self.parallel);
        self.record_geometry = flag(RECORD_GEOMETRY_VAR, self.record_geometry);
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
