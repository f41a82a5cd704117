use super::vec3d::Vec3D;
use num::traits::{Float, One, Zero};
use std::ops::{Add, Mul};

/// Fixed size row-major matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix<T, const M: usize, const N: usize> {
    pub(crate) data: [[T; N]; M],
}

/// 3x3 matrix of `f64` used for all frame transformations.
///
/// A rotation `R_ab` maps the components of a vector expressed in frame `a` to its
/// components in frame `b`: `v_b = R_ab * v_a`.
pub type Matrix3 = Matrix<f64, 3, 3>;

impl<T, const M: usize, const N: usize> Matrix<T, M, N>
where T: Copy
{
    pub fn new(data: [[T; N]; M]) -> Self { Matrix { data } }
}

impl<T, const N: usize> Matrix<T, N, N>
where T: Copy + Zero + One
{
    pub fn identity() -> Self {
        let mut result = [[T::zero(); N]; N];

        for (i, row) in result.iter_mut().enumerate() {
            row[i] = T::one();
        }

        Matrix::new(result)
    }
}

impl<T, const M: usize, const N: usize, const P: usize> Mul<Matrix<T, N, P>> for Matrix<T, M, N>
where T: Copy + Zero + Add<Output = T> + Mul<Output = T>
{
    type Output = Matrix<T, M, P>;

    fn mul(self, rhs: Matrix<T, N, P>) -> Self::Output {
        let mut result = [[T::zero(); P]; M];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut sum = T::zero();
                for k in 0..N {
                    sum = sum + self.data[i][k] * rhs.data[k][j];
                }
                *cell = sum;
            }
        }

        Matrix::new(result)
    }
}

impl<T, const M: usize, const N: usize> Matrix<T, M, N>
where T: Copy + Zero
{
    pub fn transpose(&self) -> Matrix<T, N, M> {
        let mut result = Matrix { data: [[T::zero(); M]; N] };

        for i in 0..M {
            for j in 0..N {
                result.data[j][i] = self.data[i][j];
            }
        }

        result
    }
}

impl<T: Float> Mul<Vec3D<T>> for Matrix<T, 3, 3> {
    type Output = Vec3D<T>;

    fn mul(self, rhs: Vec3D<T>) -> Self::Output {
        let row = |i: usize| Vec3D::new(self.data[i][0], self.data[i][1], self.data[i][2]);
        Vec3D::new(row(0).dot(rhs), row(1).dot(rhs), row(2).dot(rhs))
    }
}

impl<T: Float> Matrix<T, 3, 3> {
    /// Builds a matrix from three row vectors.
    ///
    /// With the unit axes of frame `b` expressed in frame `a` as rows, the result is the
    /// rotation `R_ab`.
    pub fn from_rows(r0: Vec3D<T>, r1: Vec3D<T>, r2: Vec3D<T>) -> Self {
        Matrix::new([r0.to_array(), r1.to_array(), r2.to_array()])
    }

    /// Returns row `i` as a vector, i.e. axis `i` of the target frame in source coordinates.
    pub fn row(&self, i: usize) -> Vec3D<T> { Vec3D::from(self.data[i]) }

    /// Checks `R * R^T == I` within `tol` for every element.
    pub fn is_orthonormal(&self, tol: T) -> bool {
        let product = *self * self.transpose();
        let eye = Self::identity();
        (0..3).all(|i| (0..3).all(|j| (product.data[i][j] - eye.data[i][j]).abs() <= tol))
    }
}

impl Matrix3 {
    /// Coordinate system rotation about a single principal axis.
    ///
    /// A positive angle rotates the frame counter-clockwise about the axis when looking
    /// down the axis towards the origin, so a fixed vector appears rotated by `-angle`.
    ///
    /// # Arguments
    /// * `axis` - Principal axis index, `1` = X, `2` = Y, `3` = Z.
    /// * `angle` - Rotation angle in radians.
    ///
    /// # Returns
    /// `None` if `axis` is not one of `1`, `2`, `3`.
    pub fn axis_rotation(axis: u8, angle: f64) -> Option<Self> {
        let (s, c) = angle.sin_cos();
        match axis {
            1 => Some(Matrix::new([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])),
            2 => Some(Matrix::new([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])),
            3 => Some(Matrix::new([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])),
            _ => None,
        }
    }

    /// Rotation about Z by `angle`, the most common single axis rotation in the frame
    /// chain (Earth rotation, yaw flips).
    pub fn z_rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Matrix::new([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }
}
