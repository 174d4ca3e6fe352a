use cgmath::Vector3;
use serde::{Deserialize, Serialize};

/// Axis of the cube grid.
///
/// `Y` points up, `Z` points toward the front face, and `X` points toward the
/// right face.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
)]
pub enum Axis {
    /// Left-right axis.
    X,
    /// Down-up axis.
    Y,
    /// Back-front axis.
    Z,
}

impl Axis {
    /// Returns the index of the axis in a coordinate triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the unit vector pointing along the positive direction of the
    /// axis.
    pub fn unit_vector(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
}
