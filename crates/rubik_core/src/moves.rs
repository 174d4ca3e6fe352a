//! Moves and face-turn notation.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Axis;

/// Direction of a quarter turn around an axis.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuarterTurn {
    /// +90 degrees, clockwise when looking at the layer from the positive end
    /// of the axis.
    Positive,
    /// -90 degrees.
    Negative,
}

impl Neg for QuarterTurn {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            QuarterTurn::Positive => QuarterTurn::Negative,
            QuarterTurn::Negative => QuarterTurn::Positive,
        }
    }
}

impl QuarterTurn {
    /// Returns the signed angle of the turn in degrees.
    pub fn degrees(self) -> f32 {
        match self {
            QuarterTurn::Positive => 90.0,
            QuarterTurn::Negative => -90.0,
        }
    }
}

/// Quarter turn of one layer of the cube.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Axis of rotation.
    pub axis: Axis,
    /// Layer index along the axis, from `0` to `2`.
    pub layer: u8,
    /// Direction of rotation.
    pub turn: QuarterTurn,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match FaceTwist::from_move(*self) {
            Some(twist) => write!(f, "{twist}"),
            None => {
                let sign = match self.turn {
                    QuarterTurn::Positive => '+',
                    QuarterTurn::Negative => '-',
                };
                write!(f, "{}{}{sign}", self.axis, self.layer)
            }
        }
    }
}

impl Move {
    /// Constructs a move.
    pub fn new(axis: Axis, layer: u8, turn: QuarterTurn) -> Self {
        Self { axis, layer, turn }
    }

    /// Returns the move that undoes this one: same layer, opposite direction.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            turn: -self.turn,
            ..self
        }
    }
}

/// Outer face of the cube.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    /// Top face (`U`).
    Up,
    /// Bottom face (`D`).
    Down,
    /// Front face (`F`).
    Front,
    /// Back face (`B`).
    Back,
    /// Left face (`L`).
    Left,
    /// Right face (`R`).
    Right,
}

impl Face {
    /// Returns the notation symbol for the face.
    pub fn symbol(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }

    /// Returns the face with a notation symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::Up),
            'D' => Some(Face::Down),
            'F' => Some(Face::Front),
            'B' => Some(Face::Back),
            'L' => Some(Face::Left),
            'R' => Some(Face::Right),
            _ => None,
        }
    }

    /// Returns the axis and layer index of the face, and the direction of its
    /// clockwise turn.
    fn layer_and_clockwise_turn(self) -> (Axis, u8, QuarterTurn) {
        use QuarterTurn::{Negative, Positive};

        match self {
            Face::Up => (Axis::Y, 2, Positive),
            Face::Down => (Axis::Y, 0, Negative),
            Face::Front => (Axis::Z, 2, Positive),
            Face::Back => (Axis::Z, 0, Negative),
            Face::Left => (Axis::X, 0, Negative),
            Face::Right => (Axis::X, 2, Positive),
        }
    }
}

/// Direction to turn a face.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Written without a suffix, such as `U`.
    Clockwise,
    /// Written with a prime, such as `U'`.
    CounterClockwise,
}

impl Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Quarter turn of an outer face, such as `U` or `R'`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceTwist {
    /// Face to turn.
    pub face: Face,
    /// Direction to turn it.
    pub direction: Direction,
}

impl fmt::Display for FaceTwist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face.symbol())?;
        if self.direction == Direction::CounterClockwise {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for FaceTwist {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMoveError::InvalidMove(s.to_owned());
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_symbol).ok_or_else(invalid)?;
        let direction = match chars.as_str() {
            "" => Direction::Clockwise,
            "'" => Direction::CounterClockwise,
            _ => return Err(invalid()),
        };
        Ok(Self { face, direction })
    }
}

impl FaceTwist {
    /// All twists used for scrambling, in the order `U U' D D' F F' B B' L L'
    /// R R'`.
    pub const ALL: [FaceTwist; 12] = {
        use Direction::{Clockwise as Cw, CounterClockwise as Ccw};

        const fn t(face: Face, direction: Direction) -> FaceTwist {
            FaceTwist { face, direction }
        }
        [
            t(Face::Up, Cw),
            t(Face::Up, Ccw),
            t(Face::Down, Cw),
            t(Face::Down, Ccw),
            t(Face::Front, Cw),
            t(Face::Front, Ccw),
            t(Face::Back, Cw),
            t(Face::Back, Ccw),
            t(Face::Left, Cw),
            t(Face::Left, Ccw),
            t(Face::Right, Cw),
            t(Face::Right, Ccw),
        ]
    };

    /// Constructs a face twist.
    pub fn new(face: Face, direction: Direction) -> Self {
        Self { face, direction }
    }

    /// Returns the layer move performed by the twist.
    pub fn to_move(self) -> Move {
        let (axis, layer, clockwise) = self.face.layer_and_clockwise_turn();
        let turn = match self.direction {
            Direction::Clockwise => clockwise,
            Direction::CounterClockwise => -clockwise,
        };
        Move { axis, layer, turn }
    }

    /// Returns the face twist that performs a move, or `None` if the move
    /// turns a middle layer.
    pub fn from_move(m: Move) -> Option<Self> {
        Self::ALL.into_iter().find(|twist| twist.to_move() == m)
    }

    /// Returns the twist that undoes this one.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            face: self.face,
            direction: -self.direction,
        }
    }
}

/// Error produced when parsing a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    /// Symbol is not one of the twelve face twists.
    #[error("invalid move: {0:?}")]
    InvalidMove(String),
}

/// Parses a whitespace-separated sequence of face twists, such as
/// `"U R U' R'"`. Fails if any twist is invalid.
pub fn parse_twists(s: &str) -> Result<Vec<FaceTwist>, ParseMoveError> {
    s.split_whitespace().map(str::parse::<FaceTwist>).collect()
}

/// Formats a sequence of face twists, separated by spaces.
pub fn format_twists(twists: impl IntoIterator<Item = FaceTwist>) -> String {
    twists.into_iter().join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_face_twist_table() {
        use QuarterTurn::{Negative as Minus, Positive as Plus};

        let expected = [
            ("U", Axis::Y, 2, Plus),
            ("U'", Axis::Y, 2, Minus),
            ("D", Axis::Y, 0, Minus),
            ("D'", Axis::Y, 0, Plus),
            ("F", Axis::Z, 2, Plus),
            ("F'", Axis::Z, 2, Minus),
            ("B", Axis::Z, 0, Minus),
            ("B'", Axis::Z, 0, Plus),
            ("L", Axis::X, 0, Minus),
            ("L'", Axis::X, 0, Plus),
            ("R", Axis::X, 2, Plus),
            ("R'", Axis::X, 2, Minus),
        ];
        for (twist, (symbol, axis, layer, turn)) in FaceTwist::ALL.into_iter().zip(expected) {
            assert_eq!(symbol, twist.to_string());
            assert_eq!(Ok(twist), symbol.parse());
            assert_eq!(Move::new(axis, layer, turn), twist.to_move());
            assert_eq!(Some(twist), FaceTwist::from_move(twist.to_move()));
            assert_eq!(twist.rev().to_move(), twist.to_move().rev());
        }
    }

    #[test]
    fn test_invalid_moves() {
        for s in ["", "X", "u", "U2", "U''", "'U", "M"] {
            assert_eq!(
                Err(ParseMoveError::InvalidMove(s.to_owned())),
                s.parse::<FaceTwist>(),
            );
        }
        assert_eq!(
            Err(ParseMoveError::InvalidMove("Q".to_owned())),
            parse_twists("U R Q R'"),
        );
    }

    #[test]
    fn test_sequence_notation() {
        let twists = parse_twists("  U R\tU'   R' ").unwrap();
        assert_eq!(4, twists.len());
        assert_eq!("U R U' R'", format_twists(twists));
        assert_eq!(Ok(vec![]), parse_twists(""));
    }

    #[test]
    fn test_middle_layer_move_display() {
        let m = Move::new(Axis::Y, 1, QuarterTurn::Negative);
        assert_eq!(None, FaceTwist::from_move(m));
        assert_eq!("Y1-", m.to_string());
        assert_eq!("X1+", Move::new(Axis::X, 1, QuarterTurn::Positive).to_string());
    }
}
