use grid_astar::render::render_grid;
use grid_astar::{Cell, PathFinder, PathingGrid, Position};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = PathingGrid::new(3, 3, Cell::Free(0)).unwrap();
    grid.set(&Position::new(1, 1), Cell::Blocked).unwrap();
    let finder = PathFinder::new(grid);
    print!("{}", finder.grid());
    let start = Position::new(0, 0);
    let end = Position::new(2, 2);
    let path = finder.find_path(start, end).unwrap();
    println!("Path:");
    for p in &path {
        println!("{}", p);
    }
    let mut grid = finder.into_grid();
    grid.mark_path(&path).unwrap();
    print!("{}", render_grid(&grid));
}
