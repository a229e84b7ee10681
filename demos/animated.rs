use grid_astar::grid_io::parse_grid;
use grid_astar::render::render_search;
use grid_astar::{PathFinder, SearchStep};

// Drives a search one expansion at a time and prints every frame. `o` marks the frontier and
// `,` the closed set.
const MAZE: &str = "\
0 0 0 0 0 0 0
5 5 5 5 5 0 5
0 0 0 0 5 0 0
0 5 5 0 5 5 0
0 5 0 0 0 0 0
0 5 0 5 5 5 5
0 0 0 0 0 0 0
";

fn main() {
    let finder = PathFinder::new(parse_grid(MAZE).unwrap());
    let mut search = finder
        .search(finder.default_start(), finder.default_goal())
        .unwrap();
    loop {
        let step = search.step();
        let view = search.view();
        println!("expansions: {}", view.expansions());
        println!("{}", render_search(finder.grid(), &view));
        match step {
            SearchStep::Expanded(_) => {}
            SearchStep::Found(path) => {
                println!("Found a path of {} steps", path.steps());
                break;
            }
            SearchStep::Exhausted => {
                println!("No path");
                break;
            }
        }
    }
}
