//! Vector and matrix primitives for the transform engine.
//!
//! Everything here is a plain `f32` value type with no hidden state:
//! [`Vec3`] for positions, directions and per-axis parameters, and [`Mat4`]
//! for the column-major 4×4 transforms the rest of the crate composes.
//!
//! Angles are taken in degrees throughout, matching how the demo records
//! store per-axis rotation. Multiplication follows the column-vector
//! convention `v' = M v`, so `a * b` applies `b` first and `a` second.

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

/// Errors from degenerate vector math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// A vector with zero length cannot be normalized.
    ZeroLengthVector,
}

impl std::fmt::Display for MathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MathError::ZeroLengthVector => {
                write!(f, "cannot normalize a zero-length vector")
            }
        }
    }
}

impl std::error::Error for MathError {}

/// A 3-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed cross product `self × rhs`.
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the unit-length vector pointing the same way as `self`.
    ///
    /// Fails on a zero-length input instead of returning a zero vector, so
    /// NaN never leaks into downstream matrix math.
    pub fn normalized(self) -> Result<Vec3, MathError> {
        let len = self.length();
        if len > 0.0 {
            Ok(Vec3::new(self.x / len, self.y / len, self.z / len))
        } else {
            Err(MathError::ZeroLengthVector)
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A 4×4 matrix stored as 16 floats in column-major order.
///
/// Element `(row, col)` lives at linear index `col * 4 + row`, the layout
/// GPU APIs expect for a `mat4x4<f32>` uniform upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Builds a matrix from 16 values in column-major order.
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub fn from_translation(t: Vec3) -> Self {
        let mut m = Mat4::IDENTITY;
        m[12] = t.x;
        m[13] = t.y;
        m[14] = t.z;
        m
    }

    pub fn from_scale(s: Vec3) -> Self {
        let mut m = Mat4::IDENTITY;
        m[0] = s.x;
        m[5] = s.y;
        m[10] = s.z;
        m
    }

    /// Rotation about the X axis by `degrees`.
    pub fn from_rotation_x(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let mut m = Mat4::IDENTITY;
        m[5] = cos;
        m[6] = sin;
        m[9] = -sin;
        m[10] = cos;
        m
    }

    /// Rotation about the Y axis by `degrees`.
    pub fn from_rotation_y(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let mut m = Mat4::IDENTITY;
        m[0] = cos;
        m[2] = -sin;
        m[8] = sin;
        m[10] = cos;
        m
    }

    /// Rotation about the Z axis by `degrees`.
    pub fn from_rotation_z(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let mut m = Mat4::IDENTITY;
        m[0] = cos;
        m[1] = sin;
        m[4] = -sin;
        m[5] = cos;
        m
    }

    /// Rotation about an arbitrary axis by `degrees`.
    ///
    /// The axis does not need to be unit length, but it must be nonzero.
    pub fn from_axis_angle(axis: Vec3, degrees: f32) -> Result<Self, MathError> {
        let n = axis.normalized()?;
        let (sin, cos) = degrees.to_radians().sin_cos();
        let k = 1.0 - cos;

        let mut m = Mat4::IDENTITY;
        m[0] = n.x * n.x * k + cos;
        m[1] = n.x * n.y * k + n.z * sin;
        m[2] = n.x * n.z * k - n.y * sin;
        m[4] = n.y * n.x * k - n.z * sin;
        m[5] = n.y * n.y * k + cos;
        m[6] = n.y * n.z * k + n.x * sin;
        m[8] = n.z * n.x * k + n.y * sin;
        m[9] = n.z * n.y * k - n.x * sin;
        m[10] = n.z * n.z * k + cos;
        Ok(m)
    }

    /// Transforms a homogeneous column vector, returning `M v`.
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for row in 0..4 {
            out[row] = self.m[row] * v[0]
                + self.m[4 + row] * v[1]
                + self.m[8 + row] * v[2]
                + self.m[12 + row] * v[3];
        }
        out
    }

    /// Column-major 2D array view for uniform upload.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let m = &self.m;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.m
    }
}

impl Index<usize> for Mat4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.m[index]
    }
}

impl IndexMut<usize> for Mat4 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.m[index]
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    /// `a * b` composes so that `b`'s transform applies first: for any
    /// column vector `v`, `(a * b).transform(v) == a.transform(b.transform(v))`.
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.m[k * 4 + row] * rhs.m[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        Mat4 { m: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_mat_eq(a: &Mat4, b: &glam::Mat4) {
        let b = b.to_cols_array();
        for i in 0..16 {
            assert!(
                (a[i] - b[i]).abs() < EPS,
                "element {} differs: {} vs {}",
                i,
                a[i],
                b[i]
            );
        }
    }

    #[test]
    fn cross_is_right_handed() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn normalize_rejects_zero() {
        assert_eq!(
            Vec3::ZERO.normalized(),
            Err(MathError::ZeroLengthVector)
        );

        let n = Vec3::new(3.0, 0.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < EPS);
        assert!((n.x - 0.6).abs() < EPS && (n.z - 0.8).abs() < EPS);
    }

    #[test]
    fn rotations_match_reference() {
        let deg = 37.0f32;
        let rad = deg.to_radians();
        assert_mat_eq(
            &Mat4::from_rotation_x(deg),
            &glam::Mat4::from_rotation_x(rad),
        );
        assert_mat_eq(
            &Mat4::from_rotation_y(deg),
            &glam::Mat4::from_rotation_y(rad),
        );
        assert_mat_eq(
            &Mat4::from_rotation_z(deg),
            &glam::Mat4::from_rotation_z(rad),
        );
    }

    #[test]
    fn axis_angle_matches_per_axis_constructors() {
        let a = Mat4::from_axis_angle(Vec3::new(0.0, 2.0, 0.0), 53.0).unwrap();
        let b = Mat4::from_rotation_y(53.0);
        for i in 0..16 {
            assert!((a[i] - b[i]).abs() < EPS);
        }

        assert_eq!(
            Mat4::from_axis_angle(Vec3::ZERO, 10.0),
            Err(MathError::ZeroLengthVector)
        );
    }

    #[test]
    fn multiply_applies_rhs_first() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let s = Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));

        // Scale first, then translate: the point (1,1,1) lands at (3,4,5).
        let p = (t * s).transform([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(p, [3.0, 4.0, 5.0, 1.0]);

        // Reversed order scales the translation too.
        let q = (s * t).transform([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(q, [4.0, 6.0, 8.0, 1.0]);
    }

    #[test]
    fn multiply_matches_reference() {
        let a = Mat4::from_rotation_y(30.0) * Mat4::from_translation(Vec3::new(1.0, -2.0, 0.5));
        let b = glam::Mat4::from_rotation_y(30.0f32.to_radians())
            * glam::Mat4::from_translation(glam::Vec3::new(1.0, -2.0, 0.5));
        assert_mat_eq(&a, &b);
    }

    #[test]
    fn translation_lives_in_last_column() {
        let t = Mat4::from_translation(Vec3::new(7.0, 8.0, 9.0));
        assert_eq!(t[12], 7.0);
        assert_eq!(t[13], 8.0);
        assert_eq!(t[14], 9.0);
        assert_eq!(t[15], 1.0);
    }
}
