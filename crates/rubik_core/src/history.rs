use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::Move;

/// Ordered record of every move executed on the cube, oldest first.
///
/// Moves are appended as they complete and consumed from the tail when the
/// cube is solved. No moves are merged or cancelled.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl fmt::Display for MoveHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.iter().join(" "))
    }
}

impl MoveHistory {
    /// Constructs an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move.
    pub fn record(&mut self, m: Move) {
        self.moves.push(m);
    }
    /// Removes and returns the most recent move.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }
    /// Removes every move.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }
    /// Returns whether there are no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
    /// Returns the moves, oldest first.
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }
    /// Returns an iterator over the moves, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }

    /// Returns the moves that undo the whole history, in the order they must
    /// be applied.
    pub fn inverse(&self) -> impl Iterator<Item = Move> + '_ {
        self.iter().rev().map(Move::rev)
    }
}
