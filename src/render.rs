//! Character renderings of a grid and of a search in progress, one character per cell:
//! `S` start, `G` goal, `*` path, `#` obstacle, `o` frontier, `,` closed and `.` free.
use crate::pathfinder::SearchView;
use crate::pathing_grid::{Cell, PathingGrid};
use crate::position::Position;

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Blocked => '#',
        Cell::Path => '*',
        Cell::Free(_) => '.',
    }
}

fn render_with<F>(grid: &PathingGrid, mut overlay: F) -> String
where
    F: FnMut(&Position) -> Option<char>,
{
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in 0..grid.rows() {
        for (col, cell) in grid.row_cells(row).iter().enumerate() {
            let p = Position::new(row, col);
            out.push(overlay(&p).unwrap_or_else(|| cell_char(*cell)));
        }
        out.push('\n');
    }
    out
}

/// The grid on its own.
pub fn render_grid(grid: &PathingGrid) -> String {
    render_with(grid, |_| None)
}

/// The grid with the state of a search drawn over it.
pub fn render_search(grid: &PathingGrid, view: &SearchView) -> String {
    render_with(grid, |p| {
        if *p == view.start() {
            Some('S')
        } else if *p == view.goal() {
            Some('G')
        } else if view.is_on_path(p) {
            Some('*')
        } else if grid.is_blocked(p) {
            None
        } else if view.is_open(p) {
            Some('o')
        } else if view.is_visited(p) {
            Some(',')
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinder::{PathFinder, SearchStep};

    #[test]
    fn plain_grid() {
        let mut grid = PathingGrid::new(2, 3, Cell::Free(0)).unwrap();
        grid.set(&Position::new(0, 1), Cell::Blocked).unwrap();
        grid.set(&Position::new(1, 2), Cell::Path).unwrap();
        assert_eq!(render_grid(&grid), ".#.\n..*\n");
    }

    #[test]
    fn search_overlay() {
        let mut grid = PathingGrid::new(3, 3, Cell::Free(0)).unwrap();
        grid.set(&Position::new(1, 1), Cell::Blocked).unwrap();
        let finder = PathFinder::new(grid);
        let mut search = finder
            .search(Position::new(0, 0), Position::new(2, 2))
            .unwrap();
        search.step();
        assert_eq!(render_search(finder.grid(), &search.view()), "So.\no#.\n..G\n");
        while !search.step().is_finished() {}
        let frame = render_search(finder.grid(), &search.view());
        assert_eq!(frame.chars().filter(|c| *c == '*').count(), 3);
        assert!(frame.starts_with('S'));
        assert!(matches!(search.step(), SearchStep::Found(_)));
    }
}
