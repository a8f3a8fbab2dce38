use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::error::{GameError, Result};
use crate::position::{Axial, Position};
use crate::topology::Topology;
use crate::types::{Cell, Player};

/// Reversi board: a fixed set of positions mapped to cells.
///
/// The key set is established at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    topology: Topology,
    width: usize,
    cells: BTreeMap<Position, Cell>,
}

impl Board {
    /// Creates a board of the given shape holding no marks.
    pub fn empty(topology: Topology, width: usize) -> Result<Self> {
        if !topology.is_valid_width(width) {
            return Err(GameError::InvalidWidth { topology, width });
        }

        let cells = topology
            .positions(width)
            .into_iter()
            .map(|pos| (pos, Cell::Empty))
            .collect();

        Ok(Self {
            topology,
            width,
            cells,
        })
    }

    /// Creates the initial board: the hex rosette or the square cross.
    pub fn new(topology: Topology, width: usize) -> Result<Self> {
        let mut board = Self::empty(topology, width)?;
        for (pos, player) in topology.starting_pieces(width) {
            board.set(pos, Cell::Occupied(player))?;
        }
        Ok(board)
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn get(&self, pos: Position) -> Result<Cell> {
        self.cells
            .get(&pos)
            .copied()
            .ok_or(GameError::InvalidPosition { position: pos })
    }

    /// Overwrites one existing cell.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<()> {
        match self.cells.get_mut(&pos) {
            Some(slot) => {
                *slot = cell;
                Ok(())
            }
            None => Err(GameError::InvalidPosition { position: pos }),
        }
    }

    /// All cells, in storage order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().map(|(&pos, &cell)| (pos, cell))
    }

    /// Positions in upper-leftmost-first order.
    pub fn positions_in_reading_order(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.cells.keys().copied().collect();
        positions.sort_by(|a, b| a.reading_order(b));
        positions
    }

    /// On-board cells adjacent to `pos`.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        self.topology
            .directions()
            .iter()
            .filter_map(|&direction| pos.step(direction))
            .filter(|next| self.contains(*next))
            .collect()
    }

    pub fn corners(&self) -> Vec<Position> {
        self.topology.corners(self.width)
    }

    /// True when `pos` touches a corner without being one.
    pub fn is_next_to_corner(&self, pos: Position) -> bool {
        self.corners().iter().any(|corner| corner.is_adjacent(&pos))
    }

    pub fn pass_sentinel(&self) -> Position {
        self.topology.pass_sentinel(self.width)
    }

    /// Opponent cells that flip if `player` places at `pos`, in reading order.
    ///
    /// Empty when `pos` is off the board, occupied, or closes no line.
    pub fn captures_for(&self, pos: Position, player: Player) -> Vec<Position> {
        if self.cells.get(&pos) != Some(&Cell::Empty) {
            return Vec::new();
        }

        let opponent = player.opponent();
        let mut flips = Vec::new();

        for &direction in self.topology.directions() {
            let mut line = Vec::new();
            let mut cursor = pos.step(direction);

            while let Some(next) = cursor {
                match self.cells.get(&next) {
                    Some(&Cell::Occupied(owner)) if owner == opponent => {
                        line.push(next);
                        cursor = next.step(direction);
                    }
                    Some(&Cell::Occupied(_)) => {
                        flips.append(&mut line);
                        break;
                    }
                    _ => break,
                }
            }
        }

        flips.sort_by(|a, b| a.reading_order(b));
        trace!(%pos, %player, captures = flips.len(), "computed capture union");
        flips
    }

    pub fn is_legal(&self, pos: Position, player: Player) -> bool {
        !self.captures_for(pos, player).is_empty()
    }

    /// Every legal target for `player`, in reading order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        self.positions_in_reading_order()
            .into_iter()
            .filter(|&pos| self.is_legal(pos, player))
            .collect()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        self.cells
            .iter()
            .any(|(&pos, cell)| cell.is_empty() && self.is_legal(pos, player))
    }

    /// Places one mark and flips captured cells.
    /// Returns the flipped positions. Returns an empty list when the move is
    /// illegal and leaves the board unchanged.
    pub fn place(&mut self, pos: Position, player: Player) -> Vec<Position> {
        let flips = self.captures_for(pos, player);
        if flips.is_empty() {
            return flips;
        }

        self.cells.insert(pos, Cell::Occupied(player));
        for flipped in &flips {
            self.cells.insert(*flipped, Cell::Occupied(player));
        }

        flips
    }

    /// Number of cells owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .values()
            .filter(|cell| cell.is_owned_by(player))
            .count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.values().filter(|cell| cell.is_empty()).count()
    }

    fn token_at(&self, pos: Position) -> &'static str {
        self.cells.get(&pos).copied().unwrap_or_default().token()
    }
}

/// Text dump: `X` for Black, `O` for White, `.` for empty.
/// Hex rows are indented by their distance from the middle row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width as i32;
        match self.topology {
            Topology::Hex => {
                let m = (w - 1) / 2;
                for r in -m..=m {
                    let row: Vec<&str> = ((-m).max(-r - m)..=m.min(m - r))
                        .map(|q| self.token_at(Position::Axial(Axial::from_qr(q, r))))
                        .collect();
                    writeln!(f, "{}{}", " ".repeat(r.unsigned_abs() as usize), row.join(" "))?;
                }
            }
            Topology::Square => {
                for y in 0..w {
                    let row: Vec<&str> = (0..w)
                        .map(|x| self.token_at(Position::cartesian(x, y)))
                        .collect();
                    writeln!(f, "{}", row.join(" "))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black(pos: Position) -> (Position, Cell) {
        (pos, Cell::Occupied(Player::Black))
    }

    fn white(pos: Position) -> (Position, Cell) {
        (pos, Cell::Occupied(Player::White))
    }

    fn seeded(topology: Topology, width: usize, marks: &[(Position, Cell)]) -> Board {
        let mut board = Board::empty(topology, width).unwrap();
        for &(pos, cell) in marks {
            board.set(pos, cell).unwrap();
        }
        board
    }

    #[test]
    fn rejects_width_of_wrong_parity() {
        assert_eq!(
            Board::new(Topology::Hex, 6).unwrap_err(),
            GameError::InvalidWidth {
                topology: Topology::Hex,
                width: 6
            }
        );
        assert!(Board::new(Topology::Square, 7).is_err());
    }

    #[test]
    fn board_sizes_follow_topology() {
        assert_eq!(Board::new(Topology::Hex, 7).unwrap().len(), 37);
        assert_eq!(Board::new(Topology::Hex, 11).unwrap().len(), 91);
        assert_eq!(Board::new(Topology::Square, 4).unwrap().len(), 16);
    }

    #[test]
    fn t01_initial_hex_board_renders_rosette() {
        let board = Board::new(Topology::Hex, 7).unwrap();

        let expected = concat!(
            "   . . . .\n",
            "  . . . . .\n",
            " . . X O . .\n",
            ". . O . X . .\n",
            " . . X O . .\n",
            "  . . . . .\n",
            "   . . . .\n",
        );
        assert_eq!(board.to_string(), expected);
        assert_eq!(board.count(Player::Black), 3);
        assert_eq!(board.count(Player::White), 3);
        assert_eq!(board.empty_count(), 31);
    }

    #[test]
    fn t02_initial_square_board_renders_cross() {
        let board = Board::new(Topology::Square, 4).unwrap();

        let expected = concat!(". . . .\n", ". O X .\n", ". X O .\n", ". . . .\n");
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn t03_hex_capture_flips_only_cell_between_move_and_own_mark() {
        let board = Board::new(Topology::Hex, 7).unwrap();

        let flips = board.captures_for(Position::axial(1, -2, 1), Player::Black);

        assert_eq!(flips, vec![Position::axial(1, -1, 0)]);
    }

    #[test]
    fn place_flips_and_keeps_key_set() {
        let mut board = Board::new(Topology::Hex, 7).unwrap();

        let flips = board.place(Position::axial(1, -2, 1), Player::Black);

        assert_eq!(flips, vec![Position::axial(1, -1, 0)]);
        assert_eq!(
            board.get(Position::axial(1, -1, 0)).unwrap(),
            Cell::Occupied(Player::Black)
        );
        assert_eq!(
            board.get(Position::axial(1, -2, 1)).unwrap(),
            Cell::Occupied(Player::Black)
        );
        assert_eq!(board.count(Player::Black), 5);
        assert_eq!(board.count(Player::White), 2);
        assert_eq!(board.len(), 37);
    }

    #[test]
    fn illegal_place_returns_empty_and_keeps_board_unchanged() {
        let mut board = Board::new(Topology::Square, 4).unwrap();
        let before = board.clone();

        let flips = board.place(Position::cartesian(0, 0), Player::Black);

        assert!(flips.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn run_ending_in_empty_cell_captures_nothing() {
        let board = seeded(
            Topology::Square,
            6,
            &[
                white(Position::cartesian(1, 0)),
                white(Position::cartesian(2, 0)),
            ],
        );

        assert!(board.captures_for(Position::cartesian(0, 0), Player::Black).is_empty());
    }

    #[test]
    fn run_ending_at_edge_captures_nothing() {
        let board = seeded(
            Topology::Square,
            4,
            &[
                white(Position::cartesian(1, 0)),
                white(Position::cartesian(2, 0)),
                white(Position::cartesian(3, 0)),
            ],
        );

        assert!(board.captures_for(Position::cartesian(0, 0), Player::Black).is_empty());
    }

    #[test]
    fn captures_union_across_several_lines_including_diagonals() {
        let board = seeded(
            Topology::Square,
            6,
            &[
                white(Position::cartesian(1, 0)),
                white(Position::cartesian(2, 0)),
                black(Position::cartesian(3, 0)),
                white(Position::cartesian(1, 1)),
                black(Position::cartesian(2, 2)),
                white(Position::cartesian(0, 1)),
                // Column run is left open at the far end.
                white(Position::cartesian(0, 2)),
            ],
        );

        let flips = board.captures_for(Position::cartesian(0, 0), Player::Black);

        assert_eq!(
            flips,
            vec![
                Position::cartesian(1, 0),
                Position::cartesian(2, 0),
                Position::cartesian(1, 1),
            ]
        );
    }

    #[test]
    fn hex_capture_walks_long_rays() {
        let board = seeded(
            Topology::Hex,
            7,
            &[
                white(Position::axial(-1, 0, 1)),
                white(Position::axial(0, 0, 0)),
                white(Position::axial(1, 0, -1)),
                black(Position::axial(2, 0, -2)),
            ],
        );

        let flips = board.captures_for(Position::axial(-2, 0, 2), Player::Black);

        assert_eq!(flips.len(), 3);
        assert!(flips.contains(&Position::axial(0, 0, 0)));
    }

    #[test]
    fn occupied_or_off_board_targets_capture_nothing() {
        let mut board = Board::new(Topology::Hex, 7).unwrap();

        assert!(board.captures_for(Position::axial(1, 0, -1), Player::Black).is_empty());
        assert!(board.captures_for(Position::axial(9, -9, 0), Player::Black).is_empty());
        assert!(board.get(Position::axial(9, -9, 0)).is_err());
        assert!(board.set(Position::cartesian(0, 0), Cell::Empty).is_err());
    }

    #[test]
    fn initial_square_legal_moves_are_in_reading_order() {
        let board = Board::new(Topology::Square, 4).unwrap();

        assert_eq!(
            board.legal_moves(Player::Black),
            vec![
                Position::cartesian(1, 0),
                Position::cartesian(0, 1),
                Position::cartesian(3, 2),
                Position::cartesian(2, 3),
            ]
        );
    }

    #[test]
    fn smallest_hex_board_has_no_moves() {
        let board = Board::new(Topology::Hex, 3).unwrap();

        assert!(!board.has_legal_move(Player::Black));
        assert!(!board.has_legal_move(Player::White));
    }

    #[test]
    fn neighbors_are_clipped_at_the_edge() {
        let hex = Board::new(Topology::Hex, 7).unwrap();
        let square = Board::new(Topology::Square, 4).unwrap();

        assert_eq!(hex.neighbors(Position::axial(0, 0, 0)).len(), 6);
        assert_eq!(hex.neighbors(Position::axial(3, -3, 0)).len(), 3);
        assert_eq!(square.neighbors(Position::cartesian(1, 1)).len(), 8);
        assert_eq!(square.neighbors(Position::cartesian(0, 0)).len(), 3);
    }

    #[test]
    fn cells_next_to_corners_are_detected() {
        let board = Board::new(Topology::Square, 6).unwrap();

        assert!(board.is_next_to_corner(Position::cartesian(1, 1)));
        assert!(board.is_next_to_corner(Position::cartesian(4, 0)));
        assert!(!board.is_next_to_corner(Position::cartesian(0, 0)));
        assert!(!board.is_next_to_corner(Position::cartesian(2, 2)));
    }

    #[test]
    fn hex_cells_next_to_corners_are_detected() {
        let board = Board::new(Topology::Hex, 7).unwrap();

        assert!(board.is_next_to_corner(Position::axial(2, -2, 0)));
        assert!(board.is_next_to_corner(Position::axial(2, -3, 1)));
        assert!(board.is_next_to_corner(Position::axial(-2, 3, -1)));
        assert!(!board.is_next_to_corner(Position::axial(3, -3, 0)));
        assert!(!board.is_next_to_corner(Position::axial(-1, -1, 2)));
    }
}
