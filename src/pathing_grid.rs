use crate::error::{PathError, Result};
use crate::path::Path;
use crate::position::Position;
use crate::{BLOCKED_VALUE, N_NEIGHBOURS, PATH_VALUE};
use core::fmt;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Label of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Traversable; keeps the terrain value the cell was loaded with.
    Free(i32),
    Blocked,
    /// Free cell overwritten by [PathingGrid::mark_path].
    Path,
}

impl Cell {
    /// [BLOCKED_VALUE] is blocked, every other value is free terrain.
    pub fn from_value(value: i32) -> Cell {
        if value == BLOCKED_VALUE {
            Cell::Blocked
        } else {
            Cell::Free(value)
        }
    }

    pub fn value(self) -> i32 {
        match self {
            Cell::Free(value) => value,
            Cell::Blocked => BLOCKED_VALUE,
            Cell::Path => PATH_VALUE,
        }
    }

    pub fn is_blocked(self) -> bool {
        self == Cell::Blocked
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::Free(0)
    }
}

/// [PathingGrid] stores the cell labels of a rectangular occupancy grid in row-major order and
/// maintains the 4-connected components of its free cells using a [UnionFind] structure, so that
/// unreachable goals can be rejected without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    /// A `rows` x `cols` grid filled with `cell`. Both dimensions must be at least one.
    pub fn new(rows: usize, cols: usize, cell: Cell) -> Result<PathingGrid> {
        if rows == 0 || cols == 0 {
            return Err(PathError::invalid_grid(format!(
                "grid must have at least one row and one column, got {rows}x{cols}"
            )));
        }
        let mut grid = PathingGrid {
            rows,
            cols,
            cells: vec![cell; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a grid from its rows. Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<PathingGrid> {
        let cols = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(PathError::invalid_grid("grid is empty")),
        };
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(PathError::invalid_grid(format!(
                "row {i} has {} cells, expected {cols}",
                row.len()
            )));
        }
        let n_rows = rows.len();
        let mut grid = PathingGrid {
            rows: n_rows,
            cols,
            cells: rows.into_iter().flatten().collect(),
            components: UnionFind::new(n_rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Returns [PathError::OutOfBounds] unless `pos` lies on the grid.
    pub fn check_bounds(&self, pos: &Position) -> Result<()> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(PathError::OutOfBounds {
                position: *pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get_ix_point(&self, pos: &Position) -> usize {
        pos.row * self.cols + pos.col
    }

    pub fn get(&self, pos: &Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.get_ix_point(pos)])
        } else {
            None
        }
    }

    pub fn is_blocked(&self, pos: &Position) -> bool {
        self.get(pos).is_some_and(Cell::is_blocked)
    }

    /// In bounds and not blocked.
    pub fn can_move_to(&self, pos: &Position) -> bool {
        self.get(pos).is_some_and(|cell| !cell.is_blocked())
    }

    /// The traversable orthogonal neighbours of `pos`, in the order up, down, left, right.
    pub fn neighbours(&self, pos: &Position) -> SmallVec<[Position; N_NEIGHBOURS]> {
        pos.neumann_neighborhood()
            .into_iter()
            .filter(|p| self.can_move_to(p))
            .collect()
    }

    pub fn row_cells(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Updates a position on the grid. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    pub fn set(&mut self, pos: &Position, cell: Cell) -> Result<()> {
        self.check_bounds(pos)?;
        let ix = self.get_ix_point(pos);
        if cell.is_blocked() {
            if !self.cells[ix].is_blocked() {
                self.components_dirty = true;
            }
        } else {
            for n in self.neighbours(pos) {
                let n_ix = self.get_ix_point(&n);
                self.components.union(ix, n_ix);
            }
        }
        self.cells[ix] = cell;
        Ok(())
    }

    /// Overwrites every cell of `path` with [Cell::Path]. Fails without touching the grid if a
    /// position of the path is off the grid.
    pub fn mark_path(&mut self, path: &Path) -> Result<()> {
        if let Some(p) = path.iter().find(|p| !self.in_bounds(p)) {
            return Err(PathError::OutOfBounds {
                position: *p,
                rows: self.rows,
                cols: self.cols,
            });
        }
        for p in path.iter() {
            let ix = self.get_ix_point(p);
            self.cells[ix] = Cell::Path;
        }
        Ok(())
    }

    /// Retrieves the component id a given [Position] belongs to.
    pub fn get_component(&self, pos: &Position) -> usize {
        self.components.find(self.get_ix_point(pos))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Position, goal: &Position) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Blocked or out of bounds
    /// endpoints are never reachable.
    pub fn unreachable(&self, start: &Position, goal: &Position) -> bool {
        if self.can_move_to(start) && self.can_move_to(goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components. Joining every free cell with the cell below and to the right covers all
    /// 4-connected edges.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let point = Position::new(row, col);
                if !self.can_move_to(&point) {
                    continue;
                }
                let parent_ix = self.get_ix_point(&point);
                for n in [Position::new(row + 1, col), Position::new(row, col + 1)] {
                    if self.can_move_to(&n) {
                        let ix = self.get_ix_point(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

/// Writes the grid in its text form: one line per row, cell values separated by single spaces.
impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(
                f,
                "{}",
                self.row_cells(row).iter().map(|c| c.value()).join(" ")
            )?;
        }
        Ok(())
    }
}
