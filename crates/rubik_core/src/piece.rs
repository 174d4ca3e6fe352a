use std::fmt;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::{Axis, CUBE_SIZE, Orientation, PIECE_COUNT};

/// Identity of a piece, assigned when the cube is generated.
///
/// A piece keeps its ID for its whole life, no matter where it moves. A
/// frontend can use the ID to find the renderable object for a piece; the
/// grid itself never stores anything but logical state.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct PieceId(pub u8);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece #{}", self.0)
    }
}

impl PieceId {
    /// Returns the index of the piece.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns an iterator over all piece IDs.
    pub fn iter_all() -> impl Iterator<Item = Self> {
        (0..PIECE_COUNT as u8).map(Self)
    }

    /// Returns the position of the piece in a solved cube.
    pub fn home(self) -> GridPos {
        GridPos::from_index(self.index())
    }
}

/// Position of a cell in the 3x3x3 grid.
///
/// Each coordinate is in the range `0..3`.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "[u8; 3]", into = "[u8; 3]")]
pub struct GridPos([u8; 3]);

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "({x}, {y}, {z})")
    }
}

impl TryFrom<[u8; 3]> for GridPos {
    type Error = String;

    fn try_from(value: [u8; 3]) -> Result<Self, Self::Error> {
        let [x, y, z] = value;
        Self::new(x, y, z).ok_or_else(|| format!("grid position {value:?} out of range"))
    }
}

impl From<GridPos> for [u8; 3] {
    fn from(value: GridPos) -> Self {
        value.0
    }
}

impl GridPos {
    /// Constructs a grid position, or returns `None` if any coordinate is out
    /// of range.
    pub fn new(x: u8, y: u8, z: u8) -> Option<Self> {
        [x, y, z]
            .iter()
            .all(|&c| c < CUBE_SIZE)
            .then_some(Self([x, y, z]))
    }

    /// Returns an iterator over all cells, in order of increasing index.
    pub fn iter_all() -> impl Iterator<Item = Self> {
        (0..PIECE_COUNT).map(Self::from_index)
    }

    /// Returns the cell with a given index. The index is `x*9 + y*3 + z`.
    pub(crate) fn from_index(i: usize) -> Self {
        let n = CUBE_SIZE as usize;
        Self([(i / (n * n)) as u8, (i / n % n) as u8, (i % n) as u8])
    }

    /// Returns the index of the cell, which is unique among all cells.
    pub fn index(self) -> usize {
        let n = CUBE_SIZE as usize;
        let [x, y, z] = self.0.map(usize::from);
        x * n * n + y * n + z
    }

    /// Returns the coordinate along `axis`.
    pub fn get(self, axis: Axis) -> u8 {
        self.0[axis.index()]
    }

    /// Returns the X, Y, and Z coordinates.
    pub fn coords(self) -> [u8; 3] {
        self.0
    }

    /// Returns the offset of the cell from the center of the cube. Each
    /// component is `-1`, `0`, or `1`.
    pub fn offset(self) -> [i8; 3] {
        self.0.map(|c| c as i8 - 1)
    }

    /// Returns the cell at an offset from the center of the cube, clamping
    /// each component into the grid.
    pub fn from_offset_clamped(offset: [i8; 3]) -> Self {
        Self(offset.map(|c| (c.clamp(-1, 1) + 1) as u8))
    }

    /// Returns the center of the cell in world space, with the center of the
    /// cube at the origin and `spacing` between adjacent cells.
    pub fn to_world(self, spacing: f32) -> Vector3<f32> {
        let [x, y, z] = self.offset().map(|c| c as f32 * spacing);
        Vector3::new(x, y, z)
    }

    /// Returns the cell nearest to a point in world space. Points outside the
    /// cube are clamped to the nearest cell on the surface.
    pub fn nearest(point: Vector3<f32>, spacing: f32) -> Self {
        let [x, y, z]: [f32; 3] = point.into();
        let round = |c: f32| (c / spacing).round().clamp(-1.0, 1.0) as i8;
        Self::from_offset_clamped([round(x), round(y), round(z)])
    }
}

/// Logical state of one piece: where it is and how it is turned.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct PieceState {
    pub(crate) id: PieceId,
    pub(crate) pos: GridPos,
    pub(crate) orientation: Orientation,
}

impl PieceState {
    /// Returns the state of a piece in a solved cube.
    pub(crate) fn solved(id: PieceId) -> Self {
        Self {
            id,
            pos: id.home(),
            orientation: Orientation::IDENTITY,
        }
    }

    /// Returns the piece's ID.
    pub fn id(&self) -> PieceId {
        self.id
    }
    /// Returns the piece's current position.
    pub fn pos(&self) -> GridPos {
        self.pos
    }
    /// Returns the piece's accumulated orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns whether the piece is on a layer.
    pub fn is_on_layer(&self, axis: Axis, layer: u8) -> bool {
        self.pos.get(axis) == layer
    }

    /// Returns whether the piece is in its home position with no rotation.
    pub fn is_home(&self) -> bool {
        self.pos == self.id.home() && self.orientation.is_identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_pos_index_roundtrip() {
        for (i, pos) in GridPos::iter_all().enumerate() {
            assert_eq!(i, pos.index());
        }
        assert_eq!(GridPos::new(1, 2, 0), Some(GridPos::from_index(15)));
        assert_eq!(GridPos::new(3, 0, 0), None);
    }

    #[test]
    fn test_grid_pos_offset() {
        let pos = GridPos::new(0, 1, 2).unwrap();
        assert_eq!([-1, 0, 1], pos.offset());
        assert_eq!(pos, GridPos::from_offset_clamped(pos.offset()));
        assert_eq!(
            GridPos::new(2, 0, 1),
            Some(GridPos::from_offset_clamped([5, -3, 0])),
        );
    }

    #[test]
    fn test_grid_pos_nearest() {
        let spacing = 1.1;
        for pos in GridPos::iter_all() {
            let jitter = Vector3::new(0.04, -0.03, 0.02);
            assert_eq!(pos, GridPos::nearest(pos.to_world(spacing) + jitter, spacing));
        }
        assert_eq!(
            GridPos::new(2, 2, 0),
            Some(GridPos::nearest(Vector3::new(10.0, 3.0, -7.5), spacing)),
        );
    }

    #[test]
    fn test_grid_pos_serde_rejects_out_of_range() {
        assert_eq!(
            GridPos::try_from([1, 1, 1]),
            Ok(GridPos::new(1, 1, 1).unwrap()),
        );
        assert!(GridPos::try_from([1, 3, 1]).is_err());
    }
}
