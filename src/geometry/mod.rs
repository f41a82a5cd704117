//! Vector, matrix and spherical trigonometry primitives.

pub(crate) mod math;
mod matrix;
mod vec3d;

pub use math::{
    approx_eq, cone_clock_from_vec, diagonal_angle, ra_dec_from_vec, rectangle_from_corner,
    unit_vec_from_cone_clock, unit_vec_from_ra_dec, wrap_two_pi,
};
pub use matrix::{Matrix, Matrix3};
pub use vec3d::Vec3D;
