use crate::position::Position;
use itertools::Itertools;

/// A path found by the search: the visited positions from start to goal, both included.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    positions: Vec<Position>,
    cost: f32,
}

impl Path {
    pub(crate) fn new(positions: Vec<Position>, cost: f32) -> Path {
        debug_assert!(!positions.is_empty());
        Path { positions, cost }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    /// Number of positions, at least one.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; kept next to [len](Self::len) for the usual container API.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of moves, one less than the number of positions.
    pub fn steps(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    /// Accumulated step cost of the path.
    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn start(&self) -> Option<&Position> {
        self.positions.first()
    }

    pub fn goal(&self) -> Option<&Position> {
        self.positions.last()
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.positions.contains(pos)
    }

    /// Whether every pair of consecutive positions is one orthogonal step apart.
    pub fn is_connected(&self) -> bool {
        self.positions
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.is_adjacent(b))
    }

    pub fn into_vec(self) -> Vec<Position> {
        self.positions
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_and_connectivity() {
        let path = Path::new(
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ],
            2.0,
        );
        assert_eq!(path.len(), 3);
        assert_eq!(path.steps(), 2);
        assert!(path.is_connected());
        assert_eq!(path.start(), Some(&Position::new(0, 0)));
        assert_eq!(path.goal(), Some(&Position::new(1, 1)));

        let jump = Path::new(vec![Position::new(0, 0), Position::new(1, 1)], 1.0);
        assert!(!jump.is_connected());
    }

    #[test]
    fn single_position() {
        let path = Path::new(vec![Position::new(4, 2)], 0.0);
        assert_eq!(path.steps(), 0);
        assert!(path.is_connected());
        assert!(!path.is_empty());
    }
}
