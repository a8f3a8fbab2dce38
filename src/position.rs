//! Board coordinates for the hexagonal and square topologies.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Axial hex coordinate. Every on-board cell satisfies `q + r + s == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Axial {
    pub const fn new(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }

    /// Builds a coordinate from `q` and `r`, deriving `s`.
    pub const fn from_qr(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub const fn is_valid(self) -> bool {
        self.q + self.r + self.s == 0
    }

    /// Hex distance (number of steps between two cells).
    pub fn distance(self, other: Self) -> i32 {
        (self.q - other.q)
            .abs()
            .max((self.r - other.r).abs())
            .max((self.s - other.s).abs())
    }

    pub fn is_adjacent(self, other: Self) -> bool {
        self.is_valid() && other.is_valid() && self.distance(other) == 1
    }

    /// True when both cells lie on one straight hex line.
    pub fn shares_axis(self, other: Self) -> bool {
        self != other && (self.q == other.q || self.r == other.r || self.s == other.s)
    }
}

/// Cartesian square-board coordinate, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cartesian {
    pub x: i32,
    pub y: i32,
}

impl Cartesian {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance.
    pub fn distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn is_adjacent(self, other: Self) -> bool {
        self.distance(other) == 1
    }

    /// True when both cells share a row, a column or a diagonal.
    pub fn shares_axis(self, other: Self) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        self != other && (dx == 0 || dy == 0 || dx == dy)
    }
}

/// A unit step along one of a topology's rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Axial { dq: i32, dr: i32, ds: i32 },
    Cartesian { dx: i32, dy: i32 },
}

/// Identifies one board slot on either topology.
///
/// Deserializes from `{ "q", "r", "s" }` or `{ "x", "y" }` objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Axial(Axial),
    Cartesian(Cartesian),
}

impl Position {
    pub const fn axial(q: i32, r: i32, s: i32) -> Self {
        Self::Axial(Axial::new(q, r, s))
    }

    pub const fn cartesian(x: i32, y: i32) -> Self {
        Self::Cartesian(Cartesian::new(x, y))
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        match (self, other) {
            (Self::Axial(a), Self::Axial(b)) => a.is_adjacent(*b),
            (Self::Cartesian(a), Self::Cartesian(b)) => a.is_adjacent(*b),
            _ => false,
        }
    }

    pub fn shares_axis(&self, other: &Position) -> bool {
        match (self, other) {
            (Self::Axial(a), Self::Axial(b)) => a.shares_axis(*b),
            (Self::Cartesian(a), Self::Cartesian(b)) => a.shares_axis(*b),
            _ => false,
        }
    }

    /// Moves one step along `direction`.
    ///
    /// Returns `None` when the direction belongs to the other topology.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        match (self, direction) {
            (Self::Axial(a), Direction::Axial { dq, dr, ds }) => {
                Some(Self::axial(a.q + dq, a.r + dr, a.s + ds))
            }
            (Self::Cartesian(c), Direction::Cartesian { dx, dy }) => {
                Some(Self::cartesian(c.x + dx, c.y + dy))
            }
            _ => None,
        }
    }

    /// Upper-leftmost-first ordering used to break ties between moves.
    ///
    /// Hex cells compare `s` descending, then `r` and `q` ascending.
    /// Square cells compare row-major.
    pub fn reading_order(&self, other: &Position) -> Ordering {
        match (self, other) {
            (Self::Axial(a), Self::Axial(b)) => b
                .s
                .cmp(&a.s)
                .then(a.r.cmp(&b.r))
                .then(a.q.cmp(&b.q)),
            (Self::Cartesian(a), Self::Cartesian(b)) => a.y.cmp(&b.y).then(a.x.cmp(&b.x)),
            _ => self.cmp(other),
        }
    }
}

impl From<Axial> for Position {
    fn from(value: Axial) -> Self {
        Self::Axial(value)
    }
}

impl From<Cartesian> for Position {
    fn from(value: Cartesian) -> Self {
        Self::Cartesian(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Axial(a) => write!(f, "({}, {}, {})", a.q, a.r, a.s),
            Self::Cartesian(c) => write!(f, "({}, {})", c.x, c.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axial_neighbors_are_adjacent_and_share_an_axis() {
        let origin = Axial::new(0, 0, 0);
        let neighbor = Axial::new(1, -1, 0);

        assert!(origin.is_adjacent(neighbor));
        assert!(origin.shares_axis(neighbor));
        assert!(!origin.is_adjacent(Axial::new(2, -1, -1)));
        assert!(!origin.shares_axis(Axial::new(2, -1, -1)));
    }

    #[test]
    fn invalid_axial_coordinates_are_never_adjacent() {
        let bogus = Axial::new(1, 0, 0);

        assert!(!bogus.is_valid());
        assert!(!Axial::new(0, 0, 0).is_adjacent(bogus));
    }

    #[test]
    fn cartesian_adjacency_includes_diagonals() {
        let center = Cartesian::new(2, 2);

        assert!(center.is_adjacent(Cartesian::new(3, 3)));
        assert!(center.is_adjacent(Cartesian::new(2, 1)));
        assert!(!center.is_adjacent(Cartesian::new(4, 2)));
        assert!(!center.is_adjacent(center));
    }

    #[test]
    fn cartesian_common_axis_covers_rows_columns_and_diagonals() {
        let a = Cartesian::new(0, 0);

        assert!(a.shares_axis(Cartesian::new(0, 5)));
        assert!(a.shares_axis(Cartesian::new(5, 0)));
        assert!(a.shares_axis(Cartesian::new(3, 3)));
        assert!(!a.shares_axis(Cartesian::new(1, 2)));
    }

    #[test]
    fn step_rejects_direction_of_other_topology() {
        let pos = Position::cartesian(1, 1);

        assert_eq!(
            pos.step(Direction::Cartesian { dx: 1, dy: -1 }),
            Some(Position::cartesian(2, 0))
        );
        assert_eq!(pos.step(Direction::Axial { dq: 1, dr: -1, ds: 0 }), None);
    }

    #[test]
    fn mixed_topologies_are_never_adjacent() {
        assert!(!Position::axial(0, 0, 0).is_adjacent(&Position::cartesian(0, 1)));
    }

    #[test]
    fn reading_order_prefers_higher_s_on_hex() {
        let upper = Position::axial(0, -1, 1);
        let lower = Position::axial(1, -1, 0);

        assert_eq!(upper.reading_order(&lower), Ordering::Less);
        assert_eq!(
            Position::axial(-1, 0, 1).reading_order(&upper),
            Ordering::Greater
        );
    }

    #[test]
    fn reading_order_is_row_major_on_square() {
        assert_eq!(
            Position::cartesian(3, 0).reading_order(&Position::cartesian(0, 1)),
            Ordering::Less
        );
        assert_eq!(
            Position::cartesian(1, 2).reading_order(&Position::cartesian(2, 2)),
            Ordering::Less
        );
    }
}
