use core::fmt;
use smallvec::SmallVec;
use std::str::FromStr;
use thiserror::Error;

use crate::N_NEIGHBOURS;

/// A cell coordinate on the grid, addressed as `(row, col)` with the origin in the top-left
/// corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// The orthogonal neighbours in the order up, down, left, right. Neighbours that would need a
    /// negative coordinate are left out; the upper bounds are the business of the grid.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Position; N_NEIGHBOURS]> {
        let mut neighbours = SmallVec::new();
        if let Some(row) = self.row.checked_sub(1) {
            neighbours.push(Position::new(row, self.col));
        }
        neighbours.push(Position::new(self.row + 1, self.col));
        if let Some(col) = self.col.checked_sub(1) {
            neighbours.push(Position::new(self.row, col));
        }
        neighbours.push(Position::new(self.row, self.col + 1));
        neighbours
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Straight-line distance, used as the A* heuristic. Never larger than the Manhattan distance,
    /// so it is admissible for unit-cost orthogonal moves.
    pub fn euclidean_distance(&self, other: &Position) -> f32 {
        let d_row = self.row.abs_diff(other.row) as f32;
        let d_col = self.col.abs_diff(other.col) as f32;
        (d_row * d_row + d_col * d_col).sqrt()
    }

    /// Whether `other` is exactly one orthogonal step away.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Position {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected a position as `ROW,COL`, got `{0}`")]
pub struct ParsePositionError(String);

/// Parses `ROW,COL`, as accepted on the command line.
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Position, ParsePositionError> {
        let err = || ParsePositionError(s.to_owned());
        let (row, col) = s.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse::<usize>().map_err(|_| err())?;
        let col = col.trim().parse::<usize>().map_err(|_| err())?;
        Ok(Position::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_at_origin_skips_negative_coordinates() {
        let neighbours = Position::new(0, 0).neumann_neighborhood();
        assert_eq!(
            neighbours.as_slice(),
            &[Position::new(1, 0), Position::new(0, 1)]
        );
    }

    #[test]
    fn neighborhood_order_is_up_down_left_right() {
        let neighbours = Position::new(2, 2).neumann_neighborhood();
        assert_eq!(
            neighbours.as_slice(),
            &[
                Position::new(1, 2),
                Position::new(3, 2),
                Position::new(2, 1),
                Position::new(2, 3)
            ]
        );
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        let goal = Position::new(7, 3);
        for row in 0..10 {
            for col in 0..10 {
                let p = Position::new(row, col);
                assert!(p.euclidean_distance(&goal) <= p.manhattan_distance(&goal) as f32);
            }
        }
        assert_eq!(Position::new(0, 0).euclidean_distance(&Position::new(3, 4)), 5.0);
    }

    #[test]
    fn parse_position() {
        assert_eq!("3,4".parse::<Position>(), Ok(Position::new(3, 4)));
        assert_eq!(" 1 , 2 ".parse::<Position>(), Ok(Position::new(1, 2)));
        assert!("3;4".parse::<Position>().is_err());
        assert!("-1,4".parse::<Position>().is_err());
    }
}
