//! Geometry shared by the rules engine: ray directions, key sets and corners.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::{Axial, Direction, Position};
use crate::types::Player;

const HEX_DIRECTIONS: [Direction; 6] = [
    Direction::Axial { dq: 1, dr: -1, ds: 0 },
    Direction::Axial { dq: 1, dr: 0, ds: -1 },
    Direction::Axial { dq: 0, dr: 1, ds: -1 },
    Direction::Axial { dq: -1, dr: 1, ds: 0 },
    Direction::Axial { dq: -1, dr: 0, ds: 1 },
    Direction::Axial { dq: 0, dr: -1, ds: 1 },
];

const SQUARE_DIRECTIONS: [Direction; 8] = [
    Direction::Cartesian { dx: -1, dy: -1 },
    Direction::Cartesian { dx: 0, dy: -1 },
    Direction::Cartesian { dx: 1, dy: -1 },
    Direction::Cartesian { dx: -1, dy: 0 },
    Direction::Cartesian { dx: 1, dy: 0 },
    Direction::Cartesian { dx: -1, dy: 1 },
    Direction::Cartesian { dx: 0, dy: 1 },
    Direction::Cartesian { dx: 1, dy: 1 },
];

/// Board shape family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Centered hexagon addressed with axial coordinates. Odd widths.
    Hex,
    /// Full grid addressed with Cartesian coordinates. Even widths.
    Square,
}

impl Topology {
    /// Unit steps of every ray leaving a cell.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Topology::Hex => &HEX_DIRECTIONS,
            Topology::Square => &SQUARE_DIRECTIONS,
        }
    }

    pub fn is_valid_width(self, width: usize) -> bool {
        match self {
            Topology::Hex => width >= 3 && width % 2 == 1,
            Topology::Square => width >= 2 && width % 2 == 0,
        }
    }

    /// Number of cells on a board of the given width.
    pub fn cell_count(self, width: usize) -> usize {
        match self {
            Topology::Hex => {
                let m = width.saturating_sub(1) / 2;
                3 * m * m + 3 * m + 1
            }
            Topology::Square => width * width,
        }
    }

    /// Every key of a board of the given width.
    ///
    /// Hex rows run from `r = -m` to `r = m`; each row sweeps `q` upwards so
    /// `s` falls from the row's upper bound.
    pub fn positions(self, width: usize) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.cell_count(width));
        match self {
            Topology::Hex => {
                let m = radius(width);
                for r in -m..=m {
                    let q_start = (-m).max(-r - m);
                    let q_end = m.min(m - r);
                    for q in q_start..=q_end {
                        positions.push(Position::Axial(Axial::from_qr(q, r)));
                    }
                }
            }
            Topology::Square => {
                let w = width as i32;
                for y in 0..w {
                    for x in 0..w {
                        positions.push(Position::cartesian(x, y));
                    }
                }
            }
        }
        positions
    }

    /// Corner cells: six for a hexagon, four for a square.
    pub fn corners(self, width: usize) -> Vec<Position> {
        match self {
            Topology::Hex => {
                let m = radius(width);
                vec![
                    Position::axial(m, -m, 0),
                    Position::axial(m, 0, -m),
                    Position::axial(0, m, -m),
                    Position::axial(-m, m, 0),
                    Position::axial(-m, 0, m),
                    Position::axial(0, -m, m),
                ]
            }
            Topology::Square => {
                let last = width as i32 - 1;
                vec![
                    Position::cartesian(0, 0),
                    Position::cartesian(last, 0),
                    Position::cartesian(0, last),
                    Position::cartesian(last, last),
                ]
            }
        }
    }

    /// Opening marks.
    ///
    /// Hex alternates around the origin's unit ring starting with White at
    /// `(1, -1, 0)`. Square puts White on the major diagonal of the central
    /// 2x2 block and Black on the anti-diagonal.
    pub fn starting_pieces(self, width: usize) -> Vec<(Position, Player)> {
        match self {
            Topology::Hex => HEX_DIRECTIONS
                .iter()
                .zip([Player::White, Player::Black].into_iter().cycle())
                .filter_map(|(&direction, player)| {
                    Position::axial(0, 0, 0)
                        .step(direction)
                        .map(|pos| (pos, player))
                })
                .collect(),
            Topology::Square => {
                let c = (width / 2) as i32;
                vec![
                    (Position::cartesian(c - 1, c - 1), Player::White),
                    (Position::cartesian(c, c - 1), Player::Black),
                    (Position::cartesian(c - 1, c), Player::Black),
                    (Position::cartesian(c, c), Player::White),
                ]
            }
        }
    }

    /// Off-board position whose coordinates all equal the width.
    pub fn pass_sentinel(self, width: usize) -> Position {
        let w = width as i32;
        match self {
            Topology::Hex => Position::axial(w, w, w),
            Topology::Square => Position::cartesian(w, w),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Hex => f.write_str("hex"),
            Topology::Square => f.write_str("square"),
        }
    }
}

fn radius(width: usize) -> i32 {
    (width as i32 - 1) / 2
}
