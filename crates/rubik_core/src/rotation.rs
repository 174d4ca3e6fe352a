//! Quarter-turn rotation of a single layer.

use cgmath::{Deg, Quaternion, Rotation3, Vector3, Zero};
use smallvec::SmallVec;

use crate::{Axis, Grid, GridError, GridPos, LAYER_PIECE_COUNT, Layer, Move, Orientation, PieceId};

/// Returns the center of a layer in world space.
///
/// The cube is centered at the origin with `spacing` between adjacent cells,
/// so the pivot of a middle layer is the origin itself.
pub fn pivot_position(axis: Axis, layer: u8, spacing: f32) -> Vector3<f32> {
    let mut pivot = Vector3::zero();
    pivot[axis.index()] = (f32::from(layer) - 1.0) * spacing;
    pivot
}

/// Returns the rotation performed by a move, as a quaternion.
pub fn move_quaternion(m: Move) -> Quaternion<f32> {
    // Quarter turns are clockwise-positive; cgmath is counterclockwise-positive.
    Quaternion::from_axis_angle(m.axis.unit_vector(), Deg(-m.turn.degrees()))
}

/// Computes the new cell of each piece on the layer turned by `m`, without
/// modifying the grid.
pub fn compute_destinations(
    grid: &Grid,
    m: Move,
) -> Result<SmallVec<[(PieceId, GridPos); LAYER_PIECE_COUNT]>, GridError> {
    let rotation = Orientation::quarter_turn(m.axis, m.turn);
    let layer = grid.select_layer(m.axis, m.layer)?;
    Ok(layer
        .into_iter()
        .map(|id| {
            let offset = grid.piece(id).pos().offset();
            (id, GridPos::from_offset_clamped(rotation.transform(offset)))
        })
        .collect())
}

/// Applies a move to the grid and returns the pieces that were turned.
///
/// Each piece on the layer is moved to its rotated cell and has the quarter
/// turn composed onto its orientation. If the layer is invalid, the grid is
/// left unmodified.
pub fn apply_move(grid: &mut Grid, m: Move) -> Result<Layer, GridError> {
    let destinations = compute_destinations(grid, m)?;
    grid.commit(&destinations)?;

    let rotation = Orientation::quarter_turn(m.axis, m.turn);
    for &(id, _) in &destinations {
        grid.rotate_piece(id, rotation);
    }
    Ok(destinations.into_iter().map(|(id, _)| id).collect())
}
