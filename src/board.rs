// Board model: a fixed rectangular grid of valued cells
//
// Cells are addressed by row-major index. Orthogonal adjacency is computed
// once when the board is built and shared by every copy of it, so cloning a
// board only copies cell occupancy.

use rand::Rng;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, WargameError};
use crate::moves::Move;
use crate::types::{Coord, Seat};

/// A single board position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    coord: Coord,
    value: u32,
    owner: Option<Seat>,
}

impl GridCell {
    fn new(coord: Coord, value: u32) -> Self {
        GridCell {
            coord,
            value,
            owner: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn row(&self) -> usize {
        self.coord.row
    }

    pub fn col(&self) -> usize {
        self.coord.col
    }

    /// Point value, fixed at board creation
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_occupied(&self) -> bool {
        self.owner.is_some()
    }

    /// Owning seat, `None` while unoccupied
    pub fn owner(&self) -> Option<Seat> {
        self.owner
    }

    pub fn is_owned_by(&self, seat: Seat) -> bool {
        self.owner == Some(seat)
    }
}

/// Rectangular grid of cells with precomputed adjacency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<GridCell>,
    /// Left, right, up, down neighbor indices per cell (fewer at edges)
    neighbors: Arc<Vec<Vec<usize>>>,
    unoccupied: usize,
}

impl Board {
    /// Builds an empty board from a row-major matrix of cell values
    ///
    /// # Errors
    /// * `EmptyBoard` - no rows, or a first row with no cells
    /// * `RaggedBoard` - rows of differing length
    pub fn new(values: Vec<Vec<u32>>) -> Result<Self> {
        let rows = values.len();
        let cols = values.first().map(|r| r.len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(WargameError::EmptyBoard);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, row_values) in values.iter().enumerate() {
            if row_values.len() != cols {
                return Err(WargameError::RaggedBoard {
                    row,
                    expected: cols,
                    found: row_values.len(),
                });
            }
            for (col, &value) in row_values.iter().enumerate() {
                cells.push(GridCell::new(Coord::new(row, col), value));
            }
        }

        let neighbors = (0..rows * cols)
            .map(|idx| Self::compute_neighbors(idx / cols, idx % cols, rows, cols))
            .collect();

        Ok(Board {
            rows,
            cols,
            cells,
            neighbors: Arc::new(neighbors),
            unoccupied: rows * cols,
        })
    }

    /// Generates a value matrix with every cell drawn from `1..=max_value`
    pub fn random_values<R: Rng>(rows: usize, cols: usize, max_value: u32, rng: &mut R) -> Vec<Vec<u32>> {
        (0..rows)
            .map(|_| (0..cols).map(|_| rng.random_range(1..=max_value.max(1))).collect())
            .collect()
    }

    fn compute_neighbors(row: usize, col: usize, rows: usize, cols: usize) -> Vec<usize> {
        let mut neighbors = Vec::with_capacity(4);
        if col > 0 {
            neighbors.push(row * cols + col - 1);
        }
        if col + 1 < cols {
            neighbors.push(row * cols + col + 1);
        }
        if row > 0 {
            neighbors.push((row - 1) * cols + col);
        }
        if row + 1 < rows {
            neighbors.push((row + 1) * cols + col);
        }
        neighbors
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if coord.row < self.rows && coord.col < self.cols {
            Some(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }

    pub fn cell(&self, coord: Coord) -> Option<&GridCell> {
        self.index_of(coord).map(|idx| &self.cells[idx])
    }

    pub(crate) fn cell_at(&self, idx: usize) -> &GridCell {
        &self.cells[idx]
    }

    pub(crate) fn neighbor_indices(&self, idx: usize) -> &[usize] {
        &self.neighbors[idx]
    }

    /// Orthogonal neighbors of a cell (empty when the coordinate is off the board)
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = &GridCell> + '_ {
        let indices: &[usize] = match self.index_of(coord) {
            Some(idx) => self.neighbors[idx].as_slice(),
            None => &[],
        };
        indices.iter().map(move |&n| &self.cells[n])
    }

    /// Sets or clears the owner of a cell, keeping the unoccupied count in step
    pub(crate) fn set_owner(&mut self, idx: usize, owner: Option<Seat>) {
        let cell = &mut self.cells[idx];
        match (cell.owner.is_some(), owner.is_some()) {
            (false, true) => self.unoccupied -= 1,
            (true, false) => self.unoccupied += 1,
            _ => {}
        }
        cell.owner = owner;
    }

    /// True once every cell is occupied
    pub fn is_full(&self) -> bool {
        self.unoccupied == 0
    }

    pub fn unoccupied_count(&self) -> usize {
        self.unoccupied
    }

    /// Total value of all occupied cells
    pub fn occupied_value(&self) -> i64 {
        self.cells
            .iter()
            .filter(|c| c.is_occupied())
            .map(|c| c.value as i64)
            .sum()
    }

    /// Total value held by one seat
    pub fn value_owned_by(&self, seat: Seat) -> i64 {
        self.cells
            .iter()
            .filter(|c| c.is_owned_by(seat))
            .map(|c| c.value as i64)
            .sum()
    }

    /// Enumerates every legal move for `seat`, in row-major order.
    ///
    /// Each unoccupied cell yields a ParaDrop, followed by a DeathBlitz when
    /// at least one orthogonal neighbor is already owned by `seat`. A full
    /// board yields nothing.
    pub fn legal_moves(&self, seat: Seat) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.unoccupied * 2);

        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.is_occupied() {
                continue;
            }

            moves.push(Move::ParaDrop {
                player: seat,
                target: cell.coord,
            });

            let neighbors = &self.neighbors[idx];
            if neighbors.iter().any(|&n| self.cells[n].is_owned_by(seat)) {
                let captures = neighbors
                    .iter()
                    .map(|&n| &self.cells[n])
                    .filter(|c| c.is_owned_by(seat.other()))
                    .map(|c| c.coord)
                    .collect();
                moves.push(Move::DeathBlitz {
                    player: seat,
                    target: cell.coord,
                    captures,
                });
            }
        }

        moves
    }
}

impl fmt::Display for Board {
    /// One line per row; each cell prints its value followed by the owner
    /// marker, or '.' when unoccupied
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: Vec<String> = row
                .iter()
                .map(|c| {
                    let marker = c.owner.map(|s| s.marker()).unwrap_or('.');
                    format!("{:>3}{}", c.value, marker)
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board_3x3() -> Board {
        Board::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap()
    }

    #[test]
    fn test_rejects_empty_board() {
        assert!(matches!(Board::new(vec![]), Err(WargameError::EmptyBoard)));
        assert!(matches!(Board::new(vec![vec![]]), Err(WargameError::EmptyBoard)));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = Board::new(vec![vec![1, 2], vec![3]]);
        match result {
            Err(WargameError::RaggedBoard { row, expected, found }) => {
                assert_eq!((row, expected, found), (1, 2, 1));
            }
            other => panic!("expected RaggedBoard, got {:?}", other),
        }
    }

    #[test]
    fn test_neighbor_counts_at_corner_edge_and_center() {
        let board = board_3x3();
        assert_eq!(board.neighbors(Coord::new(0, 0)).count(), 2);
        assert_eq!(board.neighbors(Coord::new(0, 1)).count(), 3);
        assert_eq!(board.neighbors(Coord::new(1, 1)).count(), 4);
        assert_eq!(board.neighbors(Coord::new(5, 5)).count(), 0);
    }

    #[test]
    fn test_neighbors_are_orthogonal() {
        let board = board_3x3();
        for cell in board.cells() {
            for n in board.neighbors(cell.coord()) {
                assert!(cell.coord().is_orthogonal_neighbor(&n.coord()));
            }
        }
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        let board = Board::new(vec![vec![7]]).unwrap();
        assert_eq!(board.neighbors(Coord::new(0, 0)).count(), 0);
        assert_eq!(board.legal_moves(Seat::First).len(), 1);
    }

    #[test]
    fn test_empty_board_offers_only_paradrops_in_row_major_order() {
        let board = board_3x3();
        let moves = board.legal_moves(Seat::First);
        assert_eq!(moves.len(), 9);
        let targets: Vec<Coord> = moves.iter().map(|m| m.target()).collect();
        let mut sorted = targets.clone();
        sorted.sort();
        assert_eq!(targets, sorted);
        assert!(moves.iter().all(|m| matches!(m, Move::ParaDrop { .. })));
    }

    #[test]
    fn test_deathblitz_offered_once_next_to_own_cells() {
        let mut board = board_3x3();
        // Two own cells both bordering (0,1)
        board.set_owner(0, Some(Seat::First));
        board.set_owner(4, Some(Seat::First));

        let moves = board.legal_moves(Seat::First);
        let blitzes_at_0_1 = moves
            .iter()
            .filter(|m| matches!(m, Move::DeathBlitz { .. }) && m.target() == Coord::new(0, 1))
            .count();
        assert_eq!(blitzes_at_0_1, 1);

        // The opponent owns nothing, so it gets no blitzes at all
        let opponent_moves = board.legal_moves(Seat::Second);
        assert!(opponent_moves.iter().all(|m| matches!(m, Move::ParaDrop { .. })));
        assert_eq!(opponent_moves.len(), 7);
    }

    #[test]
    fn test_deathblitz_lists_enemy_neighbors_as_captures() {
        let mut board = board_3x3();
        board.set_owner(0, Some(Seat::First)); // (0,0)
        board.set_owner(2, Some(Seat::Second)); // (0,2)
        board.set_owner(4, Some(Seat::Second)); // (1,1)

        let blitz = board
            .legal_moves(Seat::First)
            .into_iter()
            .find(|m| matches!(m, Move::DeathBlitz { .. }) && m.target() == Coord::new(0, 1))
            .expect("blitz at (0,1) should be legal");

        let mut captures = blitz.captures().to_vec();
        captures.sort();
        assert_eq!(captures, vec![Coord::new(0, 2), Coord::new(1, 1)]);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let mut board = Board::new(vec![vec![1, 1]]).unwrap();
        assert!(!board.is_full());
        board.set_owner(0, Some(Seat::First));
        board.set_owner(1, Some(Seat::Second));
        assert!(board.is_full());
        assert!(board.legal_moves(Seat::First).is_empty());
        assert!(board.legal_moves(Seat::Second).is_empty());
    }

    #[test]
    fn test_clones_share_adjacency() {
        let board = board_3x3();
        let copy = board.clone();
        assert!(Arc::ptr_eq(&board.neighbors, &copy.neighbors));
    }

    #[test]
    fn test_random_values_are_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = Board::random_values(4, 5, 9, &mut rng);
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|r| r.len() == 5));
        assert!(values.iter().flatten().all(|&v| (1..=9).contains(&v)));
    }

    #[test]
    fn test_display_marks_owners() {
        let mut board = Board::new(vec![vec![5, 3]]).unwrap();
        board.set_owner(1, Some(Seat::Second));
        assert_eq!(board.to_string(), "  5.   3B\n");
    }
}
