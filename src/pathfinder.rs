use crate::astar::{SearchContext, Step};
use crate::error::{PathError, Result};
use crate::path::Path;
use crate::pathing_grid::{Cell, PathingGrid};
use crate::position::Position;
use crate::STEP_COST;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

/// Totally ordered path cost used inside the search.
pub type Cost = OrderedFloat<f32>;

/// Owns a [PathingGrid] and computes shortest 4-connected paths on it using A* with the
/// Euclidean distance as heuristic. Every move costs [STEP_COST].
#[derive(Clone, Debug)]
pub struct PathFinder {
    grid: PathingGrid,
}

impl PathFinder {
    pub fn new(mut grid: PathingGrid) -> PathFinder {
        grid.update();
        PathFinder { grid }
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PathingGrid {
        self.grid
    }

    /// Updates a cell and keeps the connected components current.
    pub fn set(&mut self, pos: &Position, cell: Cell) -> Result<()> {
        self.grid.set(pos, cell)?;
        self.grid.update();
        Ok(())
    }

    /// The top-left cell.
    pub fn default_start(&self) -> Position {
        Position::new(0, 0)
    }

    /// The bottom-right cell.
    pub fn default_goal(&self) -> Position {
        Position::new(self.grid.rows() - 1, self.grid.cols() - 1)
    }

    /// Endpoints must be on the grid. A blocked endpoint can never be part of a path and is
    /// rejected as [PathError::NoPathExists] before any search is done.
    fn validate(&self, start: &Position, goal: &Position) -> Result<()> {
        self.grid.check_bounds(start)?;
        self.grid.check_bounds(goal)?;
        if self.grid.is_blocked(start) || self.grid.is_blocked(goal) {
            info!("Start {} or goal {} is blocked", start, goal);
            return Err(PathError::NoPathExists {
                start: *start,
                goal: *goal,
            });
        }
        Ok(())
    }

    /// Computes a shortest path from start to goal. Returns [PathError::NoPathExists] without
    /// searching if start and goal are on different connected components.
    pub fn find_path(&self, start: Position, goal: Position) -> Result<Path> {
        self.validate(&start, &goal)?;
        // Check if start and goal are on the same connected component.
        if self.grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Err(PathError::NoPathExists { start, goal });
        }
        info!("{} is reachable from {}, computing path", goal, start);
        let result = Search::new(&self.grid, start, goal).run();
        if result.is_err() {
            warn!("Reachable goal could not be pathed to, is reachable graph correct?");
        }
        result
    }

    /// [find_path](Self::find_path) between the default corners.
    pub fn find_default_path(&self) -> Result<Path> {
        self.find_path(self.default_start(), self.default_goal())
    }

    /// Runs the full search, handing a [SearchView] to `observer` after every expansion and once
    /// more when the goal is reached. The component shortcut is not used so every expansion is
    /// observed; the outcome is the same as that of [find_path](Self::find_path).
    pub fn find_path_observed<F>(
        &self,
        start: Position,
        goal: Position,
        mut observer: F,
    ) -> Result<Path>
    where
        F: FnMut(&SearchView),
    {
        let mut search = self.search(start, goal)?;
        loop {
            let step = search.step();
            observer(&search.view());
            match step {
                SearchStep::Expanded(_) => {}
                SearchStep::Found(path) => return Ok(path),
                SearchStep::Exhausted => return Err(PathError::NoPathExists { start, goal }),
            }
        }
    }

    /// Prepares a search to be driven one expansion at a time with [Search::step].
    pub fn search(&self, start: Position, goal: Position) -> Result<Search<'_>> {
        self.validate(&start, &goal)?;
        Ok(Search::new(&self.grid, start, goal))
    }
}

/// Result of a single [Search::step].
#[derive(Clone, Debug, PartialEq)]
pub enum SearchStep {
    /// The position was closed and its neighbours relaxed.
    Expanded(Position),
    Found(Path),
    /// The frontier ran empty before the goal was reached.
    Exhausted,
}

impl SearchStep {
    pub fn is_finished(&self) -> bool {
        !matches!(self, SearchStep::Expanded(_))
    }
}

/// An A* search in progress. Dropping it abandons the search.
pub struct Search<'g> {
    grid: &'g PathingGrid,
    start: Position,
    goal: Position,
    context: SearchContext<Position, Cost>,
    finished: Option<SearchStep>,
}

impl<'g> Search<'g> {
    fn new(grid: &'g PathingGrid, start: Position, goal: Position) -> Search<'g> {
        let mut context = SearchContext::new();
        context.start(start, OrderedFloat(start.euclidean_distance(&goal)));
        Search {
            grid,
            start,
            goal,
            context,
            finished: None,
        }
    }

    /// Performs one expansion. Once the search has finished the final result is repeated.
    pub fn step(&mut self) -> SearchStep {
        if let Some(finished) = &self.finished {
            return finished.clone();
        }
        let grid = self.grid;
        let goal = self.goal;
        let step = self.context.step(
            |p: &Position| {
                grid.neighbours(p)
                    .into_iter()
                    .map(|n| (n, OrderedFloat(STEP_COST)))
            },
            |p: &Position| OrderedFloat(p.euclidean_distance(&goal)),
            |p: &Position| *p == goal,
        );
        match step {
            Step::Expanded(p) => SearchStep::Expanded(p),
            Step::Found { path, cost } => {
                debug!(
                    "Found path of {} steps from {} to {} after {} expansions",
                    path.len() - 1,
                    self.start,
                    goal,
                    self.context.expansions()
                );
                self.finish(SearchStep::Found(Path::new(path, cost.into_inner())))
            }
            Step::Exhausted => {
                debug!(
                    "Frontier exhausted after {} expansions, {} is unreachable",
                    self.context.expansions(),
                    goal
                );
                self.finish(SearchStep::Exhausted)
            }
        }
    }

    fn finish(&mut self, step: SearchStep) -> SearchStep {
        self.finished = Some(step.clone());
        step
    }

    /// Drives the search to completion.
    pub fn run(mut self) -> Result<Path> {
        loop {
            match self.step() {
                SearchStep::Expanded(_) => {}
                SearchStep::Found(path) => return Ok(path),
                SearchStep::Exhausted => {
                    return Err(PathError::NoPathExists {
                        start: self.start,
                        goal: self.goal,
                    })
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    pub fn view(&self) -> SearchView<'_> {
        let path = match &self.finished {
            Some(SearchStep::Found(path)) => Some(path),
            _ => None,
        };
        SearchView {
            context: &self.context,
            path,
            start: self.start,
            goal: self.goal,
        }
    }
}

/// Read-only snapshot of a [Search] for rendering and inspection.
#[derive(Clone, Copy)]
pub struct SearchView<'s> {
    context: &'s SearchContext<Position, Cost>,
    path: Option<&'s Path>,
    start: Position,
    goal: Position,
}

impl<'s> SearchView<'s> {
    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Whether the position is in the closed set.
    pub fn is_visited(&self, pos: &Position) -> bool {
        self.context.is_closed(pos)
    }

    /// Whether the position is in the frontier.
    pub fn is_open(&self, pos: &Position) -> bool {
        self.context.is_open(pos)
    }

    pub fn open_positions(&self) -> impl Iterator<Item = Position> + 's {
        self.context.open_nodes().copied()
    }

    pub fn visited_positions(&self) -> impl Iterator<Item = Position> + 's {
        self.context.closed_nodes().copied()
    }

    pub fn expansions(&self) -> usize {
        self.context.expansions()
    }

    /// Best known cost from the start, if the position has been discovered.
    pub fn g_cost(&self, pos: &Position) -> Option<f32> {
        self.context.node(pos).map(|n| n.cost.into_inner())
    }

    /// The path, once the goal has been reached.
    pub fn path(&self) -> Option<&'s Path> {
        self.path
    }

    pub fn is_on_path(&self, pos: &Position) -> bool {
        self.path.is_some_and(|path| path.contains(pos))
    }
}
