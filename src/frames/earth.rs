use crate::geometry::{Matrix3, wrap_two_pi};
use chrono::{DateTime, Utc};

/// Equatorial Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6378.1363;
/// Julian date of the unix epoch, 1970-01-01T00:00:00Z.
const JD_UNIX_EPOCH: f64 = 2_440_587.5;
/// Julian date of J2000, 2000-01-01T12:00:00 TT.
const JD_J2000: f64 = 2_451_545.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Source of the Earth orientation used to go from the inertial into the Earth fixed frame.
pub trait EarthRotation: Send + Sync {
    /// Rotation angle of the prime meridian from the inertial X axis, in radians.
    fn sidereal_angle(&self, julian_date: f64) -> f64;

    /// Coordinate rotation taking inertial components into Earth fixed components.
    fn inertial_to_fixed(&self, julian_date: f64) -> Matrix3 {
        Matrix3::z_rotation(self.sidereal_angle(julian_date))
    }
}

/// Mean sidereal rotation after the USNO approximation of Greenwich Mean Sidereal Time.
///
/// Precession, nutation and polar motion are ignored. The approximation loses about
/// 0.1 s of time per century.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSiderealRotation;

impl MeanSiderealRotation {
    /// Greenwich Mean Sidereal Time in hours, in `[0, 24)`.
    pub fn gmst_hours(julian_date: f64) -> f64 {
        let jd0 = (julian_date - 0.5).floor() + 0.5;
        let hours = (julian_date - jd0) * 24.0;
        let d0 = jd0 - JD_J2000;
        let t = (julian_date - JD_J2000) / 36_525.0;
        let gmst =
            6.697_374_558 + 0.065_709_824_419_08 * d0 + 1.002_737_909_35 * hours + 0.000_026 * t * t;
        gmst.rem_euclid(24.0)
    }
}

impl EarthRotation for MeanSiderealRotation {
    fn sidereal_angle(&self, julian_date: f64) -> f64 {
        wrap_two_pi(Self::gmst_hours(julian_date).to_radians() * 15.0)
    }
}

/// Earth fixed and inertial frames coincide at all times.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonRotatingEarth;

impl EarthRotation for NonRotatingEarth {
    fn sidereal_angle(&self, _julian_date: f64) -> f64 { 0.0 }
}

/// Julian date (UTC based) of a point in time.
#[allow(clippy::cast_precision_loss)]
pub fn julian_date(time: DateTime<Utc>) -> f64 {
    let seconds = time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY + JD_UNIX_EPOCH
}

/// Julian date of `epoch` advanced by `elapsed` seconds.
pub fn julian_date_at(epoch: DateTime<Utc>, elapsed: f64) -> f64 {
    julian_date(epoch) + elapsed / SECONDS_PER_DAY
}
