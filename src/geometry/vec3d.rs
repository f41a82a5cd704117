use num::traits::{Float, Num};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D vector generic over any numeric type.
///
/// Used for positions (km), velocities (km/s), rotation axes and unit line-of-sight
/// directions. It is a plain value type and is copied freely.
///
/// # Type Parameters
/// * `T` - The functionality for the vector depends on traits implemented by `T`.
#[derive(Debug, PartialEq, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct Vec3D<T> {
    /// The x-component of the vector.
    x: T,
    /// The y-component of the vector.
    y: T,
    /// The z-component of the vector.
    z: T,
}

impl<T: Copy> Vec3D<T> {
    /// Creates a new vector with the given components.
    ///
    /// # Arguments
    /// * `x` - The x-component of the vector.
    /// * `y` - The y-component of the vector.
    /// * `z` - The z-component of the vector.
    ///
    /// # Returns
    /// A new `Vec3D` object.
    pub const fn new(x: T, y: T, z: T) -> Self { Self { x, y, z } }

    /// Returns the x-component of the vector.
    pub const fn x(&self) -> T { self.x }

    /// Returns the y-component of the vector.
    pub const fn y(&self) -> T { self.y }

    /// Returns the z-component of the vector.
    pub const fn z(&self) -> T { self.z }

    /// Returns the components as an array `[x, y, z]`.
    pub const fn to_array(&self) -> [T; 3] { [self.x, self.y, self.z] }
}

impl<T: Num + Copy> Vec3D<T> {
    /// Creates a zero vector.
    pub fn zero() -> Self { Self::new(T::zero(), T::zero(), T::zero()) }

    /// Computes the dot product of the current vector with another vector.
    ///
    /// # Arguments
    /// * `other` - Another `Vec3D` vector to compute the dot product with.
    ///
    /// # Returns
    /// A scalar value of type `T`.
    pub fn dot(self, other: Vec3D<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the right handed cross product `self x other`.
    ///
    /// # Arguments
    /// * `other` - The right hand operand.
    ///
    /// # Returns
    /// A vector perpendicular to both operands.
    pub fn cross(self, other: Vec3D<T>) -> Vec3D<T> {
        Vec3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl<T: Float> Vec3D<T> {
    /// Computes the magnitude (absolute value) of the vector.
    pub fn abs(&self) -> T { self.dot(*self).sqrt() }

    /// Normalizes the vector to unit length.
    ///
    /// # Returns
    /// `None` if the magnitude is zero or not finite, the unit vector otherwise.
    pub fn normalize(self) -> Option<Self> {
        let magnitude = self.abs();
        if magnitude.is_zero() || !magnitude.is_finite() {
            None
        } else {
            Some(self / magnitude)
        }
    }

    /// Computes the angle between two vectors in radians, in `[0, pi]`.
    ///
    /// The cosine is clamped before `acos` so that nearly parallel unit vectors never
    /// yield `NaN`.
    pub fn angle_to(&self, other: &Self) -> T {
        let denom = self.abs() * other.abs();
        if denom.is_zero() {
            return T::zero();
        }
        (self.dot(*other) / denom).max(-T::one()).min(T::one()).acos()
    }

    /// Returns whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Checks whether two vectors agree component-wise within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: T) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }
}

impl<T: Num + Copy> Add for Vec3D<T> {
    type Output = Vec3D<T>;

    fn add(self, rhs: Vec3D<T>) -> Self::Output {
        Vec3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Num + Copy> Sub for Vec3D<T> {
    type Output = Vec3D<T>;

    fn sub(self, rhs: Vec3D<T>) -> Self::Output {
        Vec3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Num + Copy + Neg<Output = T>> Neg for Vec3D<T> {
    type Output = Vec3D<T>;

    fn neg(self) -> Self::Output { Vec3D::new(-self.x, -self.y, -self.z) }
}

impl<T: Num + Copy> Mul<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `*` operator for a `Vec3D` and a scalar.
    fn mul(self, rhs: T) -> Self::Output { Vec3D::new(self.x * rhs, self.y * rhs, self.z * rhs) }
}

impl<T: Num + Copy> Div<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `/` operator for a `Vec3D` and a scalar.
    fn div(self, rhs: T) -> Self::Output { Vec3D::new(self.x / rhs, self.y / rhs, self.z / rhs) }
}

impl<T: Copy> From<[T; 3]> for Vec3D<T> {
    fn from(arr: [T; 3]) -> Self { Vec3D::new(arr[0], arr[1], arr[2]) }
}

impl<T: Copy> From<(T, T, T)> for Vec3D<T> {
    fn from(tuple: (T, T, T)) -> Self { Vec3D::new(tuple.0, tuple.1, tuple.2) }
}

impl<T: Display> Display for Vec3D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
