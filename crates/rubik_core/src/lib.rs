//! Logical state of a 3x3x3 Rubik's Cube.
//!
//! The cube is modeled as 27 pieces on a 3x3x3 grid. Each piece has a grid
//! position and an accumulated orientation. A [`Move`] rotates one layer of
//! nine pieces by a quarter turn, permuting their positions and composing
//! their orientations.
//!
//! # Example
//!
//! ```rust
//! use rubik_core::{Grid, parse_twists, rotation};
//!
//! let mut grid = Grid::new_solved();
//! let twists = parse_twists("U R U' R'").unwrap();
//! for twist in &twists {
//!     rotation::apply_move(&mut grid, twist.to_move()).unwrap();
//! }
//! assert!(!grid.is_solved());
//! for twist in twists.iter().rev() {
//!     rotation::apply_move(&mut grid, twist.rev().to_move()).unwrap();
//! }
//! assert!(grid.is_solved());
//! ```

mod axis;
mod grid;
mod history;
mod moves;
mod orientation;
mod piece;
pub mod rotation;
mod scramble;

pub use axis::Axis;
pub use grid::{Grid, GridError, Layer};
pub use history::MoveHistory;
pub use moves::{
    Direction, Face, FaceTwist, Move, ParseMoveError, QuarterTurn, format_twists, parse_twists,
};
pub use orientation::Orientation;
pub use piece::{GridPos, PieceId, PieceState};
pub use scramble::ScrambleParams;

/// Re-export of `cgmath`.
pub use cgmath;

/// Number of layers along each axis.
pub const CUBE_SIZE: u8 = 3;

/// Number of pieces in the cube, including the invisible core.
pub const PIECE_COUNT: usize = 27;

/// Number of pieces in a single layer.
pub const LAYER_PIECE_COUNT: usize = 9;

/// Number of twists in the scramble applied when a cube is first created.
pub const DEFAULT_SCRAMBLE_LENGTH: u32 = 20;
