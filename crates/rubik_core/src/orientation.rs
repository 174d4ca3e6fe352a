use std::ops::Mul;

use cgmath::{Matrix3, Quaternion, Vector3};
use serde::Serialize;

use crate::{Axis, QuarterTurn};

/// Rotation of a piece relative to its solved orientation.
///
/// Every rotation reachable by quarter turns maps axes onto axes, so it is
/// stored exactly as a signed permutation matrix. Composing any number of
/// rotations never accumulates floating-point error.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Orientation {
    rows: [[i8; 3]; 3],
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Orientation {
    type Output = Self;

    /// Composes two rotations. The result applies `rhs` first, then `self`.
    fn mul(self, rhs: Self) -> Self::Output {
        let mut rows = [[0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = (0..3).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Self { rows }
    }
}

impl Orientation {
    /// No rotation.
    pub const IDENTITY: Self = Self {
        rows: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
    };

    /// Returns the rotation of a quarter turn around `axis`.
    ///
    /// [`QuarterTurn::Positive`] is clockwise when looking at the layer from
    /// the positive end of the axis.
    pub fn quarter_turn(axis: Axis, turn: QuarterTurn) -> Self {
        let positive = match axis {
            Axis::X => Self {
                rows: [[1, 0, 0], [0, 0, 1], [0, -1, 0]],
            },
            Axis::Y => Self {
                rows: [[0, 0, -1], [0, 1, 0], [1, 0, 0]],
            },
            Axis::Z => Self {
                rows: [[0, 1, 0], [-1, 0, 0], [0, 0, 1]],
            },
        };
        match turn {
            QuarterTurn::Positive => positive,
            QuarterTurn::Negative => positive.inverse(),
        }
    }

    /// Returns whether this is the identity rotation.
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Returns the inverse rotation.
    #[must_use]
    pub fn inverse(self) -> Self {
        let mut rows = [[0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = self.rows[j][i];
            }
        }
        Self { rows }
    }

    /// Applies the rotation to an integer vector.
    pub fn transform(self, v: [i8; 3]) -> [i8; 3] {
        self.rows
            .map(|row| row.iter().zip(v).map(|(&a, b)| a * b).sum())
    }

    /// Returns the rows of the rotation matrix.
    pub fn rows(self) -> [[i8; 3]; 3] {
        self.rows
    }

    /// Returns the rotation as a floating-point matrix.
    pub fn to_matrix(self) -> Matrix3<f32> {
        let col = |j: usize| {
            Vector3::new(self.rows[0][j], self.rows[1][j], self.rows[2][j]).map(f32::from)
        };
        Matrix3::from_cols(col(0), col(1), col(2))
    }

    /// Returns the rotation as a unit quaternion.
    pub fn to_quaternion(self) -> Quaternion<f32> {
        Quaternion::from(self.to_matrix())
    }
}
