use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    Axis, CUBE_SIZE, GridPos, LAYER_PIECE_COUNT, Orientation, PIECE_COUNT, PieceId, PieceState,
};

/// Pieces on a single layer of the grid.
pub type Layer = SmallVec<[PieceId; LAYER_PIECE_COUNT]>;

/// Error produced when querying or updating a [`Grid`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Layer index is not on the grid.
    #[error("layer {layer} is out of range on axis {axis}")]
    LayerOutOfRange {
        /// Axis of the layer.
        axis: Axis,
        /// Requested layer index.
        layer: u8,
    },
    /// Layer does not contain exactly 9 pieces, which means the grid is
    /// corrupted.
    #[error("incorrect number of pieces selected for axis {axis}, layer {layer}: {count}")]
    WrongLayerSize {
        /// Axis of the layer.
        axis: Axis,
        /// Layer index.
        layer: u8,
        /// Number of pieces found on the layer.
        count: usize,
    },
    /// Update would put two pieces in the same cell.
    #[error("{piece} and {other} cannot both occupy {pos}")]
    NotABijection {
        /// Cell that would be occupied twice.
        pos: GridPos,
        /// First piece assigned to the cell.
        other: PieceId,
        /// Second piece assigned to the cell.
        piece: PieceId,
    },
    /// Cell table disagrees with the position recorded by a piece.
    #[error("cell {pos} holds {piece}, which thinks it is at {recorded}")]
    Inconsistent {
        /// Cell being checked.
        pos: GridPos,
        /// Piece stored in the cell.
        piece: PieceId,
        /// Position stored in the piece.
        recorded: GridPos,
    },
}

/// 3x3x3 grid of pieces.
///
/// Every cell holds exactly one piece and every piece is in exactly one cell.
/// Rotations permute the pieces among the cells but never add or remove any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// State of each piece, indexed by [`PieceId`].
    pub(crate) pieces: [PieceState; PIECE_COUNT],
    /// Piece in each cell, indexed by [`GridPos::index()`].
    pub(crate) cells: [PieceId; PIECE_COUNT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new_solved()
    }
}

impl Grid {
    /// Constructs a grid with every piece in its home position.
    pub fn new_solved() -> Self {
        Self {
            pieces: std::array::from_fn(|i| PieceState::solved(PieceId(i as u8))),
            cells: std::array::from_fn(|i| PieceId(i as u8)),
        }
    }

    /// Returns the state of every piece, indexed by [`PieceId`].
    pub fn pieces(&self) -> &[PieceState] {
        &self.pieces
    }
    /// Returns the state of a piece.
    pub fn piece(&self, id: PieceId) -> &PieceState {
        &self.pieces[id.index()]
    }
    /// Returns the piece in a cell.
    pub fn piece_at(&self, pos: GridPos) -> PieceId {
        self.cells[pos.index()]
    }

    /// Returns whether every piece is in its home position with no rotation.
    pub fn is_solved(&self) -> bool {
        self.pieces.iter().all(|p| p.is_home())
    }

    /// Returns the pieces on a layer, in order of increasing cell index.
    ///
    /// Returns an error if the layer does not contain exactly 9 pieces.
    pub fn select_layer(&self, axis: Axis, layer: u8) -> Result<Layer, GridError> {
        if layer >= CUBE_SIZE {
            return Err(GridError::LayerOutOfRange { axis, layer });
        }

        let selected: Layer = self
            .cells
            .iter()
            .copied()
            .filter(|&id| self.piece(id).is_on_layer(axis, layer))
            .collect();

        if selected.len() != LAYER_PIECE_COUNT {
            return Err(GridError::WrongLayerSize {
                axis,
                layer,
                count: selected.len(),
            });
        }
        Ok(selected)
    }

    /// Moves pieces to new cells as a single update.
    ///
    /// Pieces not mentioned keep their cells. If the update would leave two
    /// pieces in the same cell, then the grid is left unmodified and an error
    /// is returned.
    pub fn commit(&mut self, updates: &[(PieceId, GridPos)]) -> Result<(), GridError> {
        let mut positions = self.pieces.map(|p| p.pos);
        for &(id, pos) in updates {
            positions[id.index()] = pos;
        }

        // 27 pieces in 27 cells with no collisions is a bijection.
        let mut cells: [Option<PieceId>; PIECE_COUNT] = [None; PIECE_COUNT];
        for (id, pos) in PieceId::iter_all().zip(positions) {
            let cell = &mut cells[pos.index()];
            if let Some(other) = *cell {
                return Err(GridError::NotABijection {
                    pos,
                    other,
                    piece: id,
                });
            }
            *cell = Some(id);
        }

        for (piece, pos) in self.pieces.iter_mut().zip(positions) {
            piece.pos = pos;
        }
        for (cell, id) in self.cells.iter_mut().zip(cells) {
            // Every cell was filled above.
            *cell = id.unwrap_or(*cell);
        }
        Ok(())
    }

    /// Composes a rotation onto a piece's orientation.
    pub(crate) fn rotate_piece(&mut self, id: PieceId, rotation: Orientation) {
        let piece = &mut self.pieces[id.index()];
        piece.orientation = rotation * piece.orientation;
    }

    /// Checks that the cell table agrees with every piece's recorded
    /// position.
    pub fn check_invariants(&self) -> Result<(), GridError> {
        let mut seen = [false; PIECE_COUNT];
        for pos in GridPos::iter_all() {
            let piece = self.piece_at(pos);
            let recorded = self.piece(piece).pos;
            if recorded != pos {
                return Err(GridError::Inconsistent {
                    pos,
                    piece,
                    recorded,
                });
            }
            seen[piece.index()] = true;
        }
        // Each piece records exactly one position, so a consistent table
        // cannot list a piece twice. This only fails if the above is wrong.
        debug_assert!(seen.iter().all(|&s| s));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_select_layer_solved() {
        let grid = Grid::new_solved();
        for axis in Axis::iter() {
            for layer in 0..CUBE_SIZE {
                let selected = grid.select_layer(axis, layer).unwrap();
                assert_eq!(9, selected.len());
                for id in PieceId::iter_all() {
                    assert_eq!(
                        selected.contains(&id),
                        id.home().get(axis) == layer,
                        "{id} on axis {axis} layer {layer}",
                    );
                }
            }
        }
    }

    #[test]
    fn test_select_layer_out_of_range() {
        let grid = Grid::new_solved();
        assert_eq!(
            Err(GridError::LayerOutOfRange {
                axis: Axis::Z,
                layer: 3,
            }),
            grid.select_layer(Axis::Z, 3),
        );
    }

    #[test]
    fn test_select_layer_detects_corruption() {
        let mut grid = Grid::new_solved();
        // Two pieces claim the same cell.
        grid.pieces[0].pos = grid.pieces[1].pos;
        assert_eq!(
            Err(GridError::WrongLayerSize {
                axis: Axis::Z,
                layer: 0,
                count: 8,
            }),
            grid.select_layer(Axis::Z, 0),
        );
        assert_eq!(
            Err(GridError::WrongLayerSize {
                axis: Axis::Z,
                layer: 1,
                count: 10,
            }),
            grid.select_layer(Axis::Z, 1),
        );
        assert!(grid.check_invariants().is_err());
    }

    #[test]
    fn test_commit_swap() {
        let mut grid = Grid::new_solved();
        let a = GridPos::new(0, 0, 0).unwrap();
        let b = GridPos::new(2, 2, 2).unwrap();
        let (pa, pb) = (grid.piece_at(a), grid.piece_at(b));
        grid.commit(&[(pa, b), (pb, a)]).unwrap();
        assert_eq!(pb, grid.piece_at(a));
        assert_eq!(pa, grid.piece_at(b));
        assert_eq!(b, grid.piece(pa).pos());
        grid.check_invariants().unwrap();
    }

    #[test]
    fn test_commit_rejects_collision() {
        let mut grid = Grid::new_solved();
        let before = grid.clone();
        let target = GridPos::new(1, 1, 1).unwrap();
        let err = grid.commit(&[(PieceId(0), target)]).unwrap_err();
        assert_eq!(
            GridError::NotABijection {
                pos: target,
                other: PieceId(0),
                piece: PieceId(13),
            },
            err,
        );
        assert_eq!(before, grid);
    }

    #[test]
    fn test_solved_grid_is_bijection() {
        let grid = Grid::new_solved();
        grid.check_invariants().unwrap();
        let cells: HashSet<GridPos> = grid.pieces().iter().map(|p| p.pos()).collect();
        assert_eq!(27, cells.len());
        assert!(grid.is_solved());
    }
}
