/// Fuzzes the pathfinding system by checking for many random grids that a path is found exactly
/// when the goal is on the same connected component as the start, and that its length matches the
/// breadth-first distance.
use grid_astar::render::render_grid;
use grid_astar::{Cell, PathError, PathFinder, PathingGrid, Position};
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(rows: usize, cols: usize, rng: &mut StdRng) -> PathingGrid {
    let mut grid = PathingGrid::new(rows, cols, Cell::Free(0)).unwrap();
    for row in 0..rows {
        for col in 0..cols {
            let cell = if rng.gen_bool(0.4) {
                Cell::Blocked
            } else {
                Cell::Free(rng.gen_range(0..5))
            };
            grid.set(&Position::new(row, col), cell).unwrap();
        }
    }
    grid.generate_components();
    grid
}

/// Reference distance by breadth-first search.
fn bfs_distance(grid: &PathingGrid, start: Position, goal: Position) -> Option<usize> {
    let mut dist = vec![usize::MAX; grid.rows() * grid.cols()];
    let mut queue = VecDeque::new();
    dist[grid.get_ix_point(&start)] = 0;
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        let d = dist[grid.get_ix_point(&p)];
        if p == goal {
            return Some(d);
        }
        for n in grid.neighbours(&p) {
            let ix = grid.get_ix_point(&n);
            if dist[ix] == usize::MAX {
                dist[ix] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Position::new(0, 0);
    let end = Position::new(N - 1, N - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        grid.set(&start, Cell::Free(0)).unwrap();
        grid.set(&end, Cell::Free(0)).unwrap();
        let reachable = grid.reachable(&start, &end);
        let finder = PathFinder::new(grid);
        let path = finder.find_path(start, end);
        // Show the grid if the outcome disagrees with the components
        if path.is_ok() != reachable {
            print!("{}", render_grid(finder.grid()));
        }
        assert_eq!(path.is_ok(), reachable);
        if let Err(err) = path {
            assert!(matches!(err, PathError::NoPathExists { .. }));
        }
    }
}

#[test]
fn fuzz_distance() {
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let rows = rng.gen_range(1..9);
        let cols = rng.gen_range(1..9);
        let grid = random_grid(rows, cols, &mut rng);
        let start = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        let goal = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        let finder = PathFinder::new(grid);
        let expected = if finder.grid().is_blocked(&start) || finder.grid().is_blocked(&goal) {
            None
        } else {
            bfs_distance(finder.grid(), start, goal)
        };
        let path = finder.find_path(start, goal).ok();
        let observed = finder
            .find_path_observed(start, goal, |_| {})
            .ok();
        if path.as_ref().map(|p| p.steps()) != expected {
            print!("{}", render_grid(finder.grid()));
        }
        assert_eq!(path.as_ref().map(|p| p.steps()), expected);
        assert_eq!(observed, path);
        if let Some(path) = path {
            assert!(path.is_connected());
            assert!(path.iter().all(|p| !finder.grid().is_blocked(p)));
            assert_eq!(path.start(), Some(&start));
            assert_eq!(path.goal(), Some(&goal));
            assert_eq!(path.cost(), path.steps() as f32);
        }
    }
}
