//! Affine placement shared by every scene object.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// Row-major 4x4 matrix as laid out by the host.
pub type Matrix4 = [[f32; 4]; 4];

const IDENTITY: Matrix4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// An object's placement: translation in column 3 (rows 0-2), rotation and
/// scale in the upper-left 3x3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub matrix: Matrix4,
}

impl Default for Axis {
    fn default() -> Self {
        Self::identity()
    }
}

impl Axis {
    #[must_use]
    pub const fn identity() -> Self {
        Self { matrix: IDENTITY }
    }

    /// The all-zero matrix: no placement of its own.
    #[must_use]
    pub const fn zero() -> Self {
        Self { matrix: [[0.0; 4]; 4] }
    }

    #[must_use]
    pub const fn from_rows(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    #[must_use]
    pub fn from_translation(t: [f32; 3]) -> Self {
        let mut axis = Self::identity();
        axis.set_translation(t);
        axis
    }

    /// Translation column, i.e. the object's origin in world space.
    #[must_use]
    pub fn origin(&self) -> [f32; 3] {
        let m = &self.matrix;
        [m[0][3], m[1][3], m[2][3]]
    }

    pub fn set_translation(&mut self, t: [f32; 3]) {
        self.matrix[0][3] = t[0];
        self.matrix[1][3] = t[1];
        self.matrix[2][3] = t[2];
    }

    #[must_use]
    pub fn axis_x(&self) -> [f32; 3] {
        self.column(0)
    }

    #[must_use]
    pub fn axis_y(&self) -> [f32; 3] {
        self.column(1)
    }

    #[must_use]
    pub fn axis_z(&self) -> [f32; 3] {
        self.column(2)
    }

    fn column(&self, c: usize) -> [f32; 3] {
        let m = &self.matrix;
        [m[0][c], m[1][c], m[2][c]]
    }

    /// The 3x3 linear part (rotation and scale).
    #[must_use]
    pub fn linear(&self) -> Mat3 {
        Mat3::from_cols(
            Vec3::from_array(self.axis_x()),
            Vec3::from_array(self.axis_y()),
            Vec3::from_array(self.axis_z()),
        )
    }

    /// `M[0:3,0:3] * p + M[0:3,3]`, homogeneous w = 1.
    #[must_use]
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let m = &self.matrix;
        [
            m[0][0] * p[0] + m[0][1] * p[1] + m[0][2] * p[2] + m[0][3],
            m[1][0] * p[0] + m[1][1] * p[1] + m[1][2] * p[2] + m[1][3],
            m[2][0] * p[0] + m[2][1] * p[1] + m[2][2] * p[2] + m[2][3],
        ]
    }

    /// An all-zero matrix, used on write-back to mean "keep the host's transform".
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.matrix.iter().flatten().all(|&v| v == 0.0)
    }
}
