//! # grid_astar
//!
//! Shortest paths on 4-connected occupancy grids using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the Euclidean distance as
//! heuristic. Every move has the same cost, so the heuristic is consistent and no closed cell is
//! ever re-opened. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! Searches can either run to completion with [PathFinder::find_path] or be driven one expansion
//! at a time through [Search], whose [SearchView] exposes the frontier, the closed set and the
//! final path for rendering.
pub mod astar;
pub mod error;
pub mod grid_io;
pub mod path;
pub mod pathfinder;
pub mod pathing_grid;
pub mod position;
pub mod render;

pub use error::{PathError, Result};
pub use path::Path;
pub use pathfinder::{PathFinder, Search, SearchStep, SearchView};
pub use pathing_grid::{Cell, PathingGrid};
pub use position::Position;

/// Cell value marking an obstacle in the text format.
pub const BLOCKED_VALUE: i32 = 5;
/// Cell value written for cells on a found path.
pub const PATH_VALUE: i32 = 3;
/// Cost of a single orthogonal move.
pub const STEP_COST: f32 = 1.0;
/// Size of the von Neumann neighbourhood.
pub const N_NEIGHBOURS: usize = 4;
