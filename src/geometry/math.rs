use super::vec3d::Vec3D;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Wraps an angle into `[0, 2pi)`.
///
/// # Arguments
/// - `angle`: Angle in radians, any sign or magnitude.
///
/// # Returns
/// - The equivalent angle in `[0, 2pi)`.
pub fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit vector from right ascension and declination.
///
/// # Arguments
/// - `ra`: Right ascension (azimuth from +X towards +Y) in radians.
/// - `dec`: Declination (elevation above the XY plane) in radians.
pub fn unit_vec_from_ra_dec(ra: f64, dec: f64) -> Vec3D<f64> {
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_ra, cos_ra) = ra.sin_cos();
    Vec3D::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Right ascension and declination of a direction.
///
/// # Returns
/// - `(ra, dec)` with `ra` in `[0, 2pi)` and `dec` in `[-pi/2, pi/2]`. A zero vector maps
///   to `(0, 0)`.
pub fn ra_dec_from_vec(v: Vec3D<f64>) -> (f64, f64) {
    let magnitude = v.abs();
    if magnitude == 0.0 {
        return (0.0, 0.0);
    }
    let dec = (v.z() / magnitude).clamp(-1.0, 1.0).asin();
    let ra = wrap_two_pi(v.y().atan2(v.x()));
    (ra, dec)
}

/// Unit vector from cone angle (measured from +Z) and clock angle (measured from +X
/// towards +Y around +Z).
pub fn unit_vec_from_cone_clock(cone: f64, clock: f64) -> Vec3D<f64> {
    unit_vec_from_ra_dec(clock, FRAC_PI_2 - cone)
}

/// Cone and clock angle of a direction, the inverse of [`unit_vec_from_cone_clock`].
///
/// The cone angle is taken from `acos` of the clamped Z component, which keeps full
/// precision near the pole where `pi/2 - asin` would not.
///
/// # Returns
/// - `(cone, clock)` with `cone` in `[0, pi]` and `clock` in `[0, 2pi)`.
pub fn cone_clock_from_vec(v: Vec3D<f64>) -> (f64, f64) {
    let magnitude = v.abs();
    if magnitude == 0.0 {
        return (0.0, 0.0);
    }
    let cone = (v.z() / magnitude).clamp(-1.0, 1.0).acos();
    let clock = wrap_two_pi(v.y().atan2(v.x()));
    (cone, clock)
}

/// Full diagonal angle of a spherical rectangle, `2 acos(cos(w/2) cos(h/2))`.
///
/// This is the diameter of the smallest circular field of view circumscribing a
/// rectangular one.
pub fn diagonal_angle(width: f64, height: f64) -> f64 {
    2.0 * ((0.5 * width).cos() * (0.5 * height).cos()).clamp(-1.0, 1.0).acos()
}

/// Recovers `(angle_height, angle_width)` of a spherical rectangle from its corner
/// cone angle `theta` and first-quadrant corner clock angle `omega`.
pub fn rectangle_from_corner(theta: f64, omega: f64) -> (f64, f64) {
    let alpha = (theta.sin() * omega.sin()).clamp(-1.0, 1.0).asin();
    let beta = (theta.cos() / alpha.cos()).clamp(-1.0, 1.0).acos();
    (2.0 * alpha, 2.0 * beta)
}

/// Checks whether two angles are equal within `tol`.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool { (a - b).abs() <= tol }
