//! Sliding-tile puzzles.
//!
//! Generic over the board side (`SIDE`) and cell count (`CELLS = SIDE^2`).
//! The board is a flat row-major array of tile numbers with 0 for the blank.

use std::fmt;

use crate::heuristic::Heuristic;
use crate::state::State;

/// The classic 3x3 puzzle.
pub type EightPuzzle = TileState<3, 9>;

/// The 4x4 puzzle.
pub type FifteenPuzzle = TileState<4, 16>;

const BLANK: u8 = 0;

/// Blank moves in successor order: up, down, left, right.
const MOVES: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileState<const SIDE: usize, const CELLS: usize> {
    cells: [u8; CELLS],
    blank: u8,
}

impl<const SIDE: usize, const CELLS: usize> TileState<SIDE, CELLS> {
    /// Builds a board from row-major tiles.
    ///
    /// Returns `None` unless `cells` is a permutation of `0..CELLS`.
    pub fn new(cells: [u8; CELLS]) -> Option<Self> {
        const {
            assert!(SIDE * SIDE == CELLS, "CELLS must equal SIDE^2");
            assert!(CELLS <= 36, "tiles are rendered as single characters");
        };

        let mut seen = [false; CELLS];
        for &tile in &cells {
            let slot = seen.get_mut(tile as usize)?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        let blank = cells.iter().position(|&tile| tile == BLANK)? as u8;
        Some(Self { cells, blank })
    }

    /// The solved board: `1, 2, ..., CELLS - 1` followed by the blank.
    pub fn solved() -> Self {
        let mut cells = [BLANK; CELLS];
        for (i, cell) in cells.iter_mut().take(CELLS - 1).enumerate() {
            *cell = (i + 1) as u8;
        }
        Self {
            cells,
            blank: (CELLS - 1) as u8,
        }
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// `(row, column)` of `tile`, if it is on the board.
    pub fn position_of(&self, tile: u8) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&t| t == tile)
            .map(|index| (index / SIDE, index % SIDE))
    }

    /// The board after sliding the blank by `(d_row, d_col)`, if legal.
    fn shifted(&self, (d_row, d_col): (isize, isize)) -> Option<Self> {
        let blank = self.blank as usize;
        let row = (blank / SIDE).checked_add_signed(d_row)?;
        let col = (blank % SIDE).checked_add_signed(d_col)?;
        if row >= SIDE || col >= SIDE {
            return None;
        }
        let target = row * SIDE + col;
        let mut cells = self.cells;
        cells.swap(blank, target);
        Some(Self {
            cells,
            blank: target as u8,
        })
    }

    /// Whether this board can reach `other` by sliding tiles.
    ///
    /// Compares permutation parity, adjusted by the blank's row distance on
    /// even-sided boards.
    pub fn is_reachable_from(&self, other: &Self) -> bool {
        let parity = |state: &Self| {
            let tiles: Vec<u8> = state.cells.iter().copied().filter(|&t| t != BLANK).collect();
            let inversions: usize = tiles
                .iter()
                .enumerate()
                .map(|(i, a)| tiles[i + 1..].iter().filter(|&b| b < a).count())
                .sum();
            let blank_row = state.blank as usize / SIDE;
            if SIDE % 2 == 0 {
                (inversions + blank_row) % 2
            } else {
                inversions % 2
            }
        };
        parity(self) == parity(other)
    }
}

impl<const SIDE: usize, const CELLS: usize> State for TileState<SIDE, CELLS> {
    fn successors(&self) -> Vec<Self> {
        MOVES.iter().filter_map(|&step| self.shifted(step)).collect()
    }

    fn cost(&self, successor: &Self) -> Option<f64> {
        MOVES
            .iter()
            .any(|&step| self.shifted(step).as_ref() == Some(successor))
            .then_some(1.0)
    }
}

/// Character used for `tile` when rendering.
fn tile_char(tile: u8) -> char {
    match tile {
        BLANK => '_',
        1..=9 => char::from(b'0' + tile),
        _ => char::from(b'A' + tile - 10),
    }
}

/// Renders the board one row per line, `_` for the blank.
pub fn format_board<const SIDE: usize, const CELLS: usize>(
    state: &TileState<SIDE, CELLS>,
) -> String {
    let mut output = String::with_capacity(CELLS + SIDE);
    for row in state.cells.chunks(SIDE) {
        output.extend(row.iter().map(|&tile| tile_char(tile)));
        output.push('\n');
    }
    output
}

impl<const SIDE: usize, const CELLS: usize> fmt::Display for TileState<SIDE, CELLS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(SIDE).enumerate() {
            if row_index > 0 {
                f.write_str("/")?;
            }
            for &tile in row {
                write!(f, "{}", tile_char(tile))?;
            }
        }
        Ok(())
    }
}

/// Sum over every non-blank tile of its row plus column distance to the
/// tile's goal position. Admissible: each move shifts one tile by one cell.
#[derive(Debug, Clone)]
pub struct TotalManhattanDistance<const SIDE: usize, const CELLS: usize> {
    /// `goal_positions[tile]` is the tile's `(row, column)` in the goal.
    goal_positions: [(usize, usize); CELLS],
}

impl<const SIDE: usize, const CELLS: usize> TotalManhattanDistance<SIDE, CELLS> {
    pub fn new(goal: &TileState<SIDE, CELLS>) -> Self {
        let mut goal_positions = [(0, 0); CELLS];
        for (tile, position) in goal_positions.iter_mut().enumerate() {
            if let Some(found) = goal.position_of(tile as u8) {
                *position = found;
            }
        }
        Self { goal_positions }
    }
}

impl<const SIDE: usize, const CELLS: usize> Heuristic<TileState<SIDE, CELLS>>
    for TotalManhattanDistance<SIDE, CELLS>
{
    fn estimate(&self, state: &TileState<SIDE, CELLS>) -> f64 {
        let distance: usize = state
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile != BLANK)
            .map(|(index, &tile)| {
                let (goal_row, goal_col) = self.goal_positions[tile as usize];
                (index / SIDE).abs_diff(goal_row) + (index % SIDE).abs_diff(goal_col)
            })
            .sum();
        distance as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Search, Strategy, Termination};

    fn board(cells: [u8; 9]) -> EightPuzzle {
        EightPuzzle::new(cells).unwrap()
    }

    #[test]
    fn rejects_non_permutations() {
        assert!(EightPuzzle::new([1, 2, 3, 4, 5, 6, 7, 8, 8]).is_none());
        assert!(EightPuzzle::new([1, 2, 3, 4, 5, 6, 7, 8, 9]).is_none());
    }

    #[test]
    fn corner_blank_has_two_successors() {
        let solved = EightPuzzle::solved();
        let successors = solved.successors();
        // blank at bottom-right can only move up or left
        assert_eq!(
            successors,
            vec![
                board([1, 2, 3, 4, 5, 0, 7, 8, 6]),
                board([1, 2, 3, 4, 5, 6, 7, 0, 8]),
            ]
        );
    }

    #[test]
    fn centre_blank_has_four_successors() {
        let centre = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(centre.successors().len(), 4);
    }

    #[test]
    fn cost_is_one_for_a_single_slide_only() {
        let solved = EightPuzzle::solved();
        let one_away = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let two_away = board([1, 2, 3, 4, 5, 6, 0, 7, 8]);
        assert_eq!(solved.cost(&one_away), Some(1.0));
        assert_eq!(solved.cost(&two_away), None);
        assert_eq!(solved.cost(&solved), None);
    }

    #[test]
    fn position_of_reports_row_and_column() {
        let state = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(state.position_of(0), Some((1, 1)));
        assert_eq!(state.position_of(5), Some((1, 2)));
        assert_eq!(state.position_of(6), Some((2, 0)));
        assert_eq!(state.position_of(9), None);
    }

    #[test]
    fn manhattan_distance_sums_tile_offsets() {
        let goal = EightPuzzle::solved();
        let heuristic = TotalManhattanDistance::new(&goal);
        assert_eq!(heuristic.estimate(&goal), 0.0);
        assert_eq!(heuristic.estimate(&board([1, 2, 3, 4, 5, 6, 0, 7, 8])), 2.0);
        // 8 tiles reversed around the blank
        assert_eq!(heuristic.estimate(&board([8, 7, 6, 5, 4, 3, 2, 1, 0])), 16.0);
    }

    #[test]
    fn one_move_from_goal_takes_one_expansion() {
        let start = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let mut search = Search::new(start, EightPuzzle::solved(), Strategy::BreadthFirst);
        assert_eq!(search.run(), Ok(Termination::GoalFound));
        assert_eq!(search.goal_path().unwrap().len(), 2);
        assert_eq!(search.nodes_expanded(), 1);
    }

    #[test]
    fn best_first_with_manhattan_matches_breadth_first_length() {
        let start = board([4, 1, 3, 7, 2, 6, 0, 5, 8]);
        let goal = EightPuzzle::solved();

        let mut bfs = Search::new(start, goal, Strategy::BreadthFirst);
        bfs.run().unwrap();
        let mut astar = Search::new(start, goal, Strategy::BestFirst)
            .with_heuristic(TotalManhattanDistance::new(&goal));
        astar.run().unwrap();

        assert_eq!(bfs.path_cost(), Ok(6.0));
        assert_eq!(astar.path_cost(), bfs.path_cost());
    }

    #[test]
    fn unreachable_board_is_detected_by_parity() {
        let swapped = board([2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert!(!swapped.is_reachable_from(&EightPuzzle::solved()));
        assert!(board([1, 2, 3, 4, 5, 6, 7, 0, 8]).is_reachable_from(&EightPuzzle::solved()));
    }

    #[test]
    fn fifteen_puzzle_shares_the_machinery() {
        let goal = FifteenPuzzle::solved();
        let mut cells = *goal.cells();
        cells.swap(15, 14);
        let start = FifteenPuzzle::new(cells).unwrap();
        let mut search = Search::new(start, goal, Strategy::BestFirst)
            .with_heuristic(TotalManhattanDistance::new(&goal));
        search.run().unwrap();
        assert_eq!(search.path_cost(), Ok(1.0));
    }

    #[test]
    fn formats_rows_with_blank_marker() {
        let state = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(format_board(&state), "123\n4_5\n678\n");
        assert_eq!(state.to_string(), "123/4_5/678");
    }
}
