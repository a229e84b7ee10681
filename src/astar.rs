//! A resumable variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! All discovered nodes live in one insertion-ordered arena and refer to their parent by arena
//! index. Cost improvements push a fresh heap entry; the superseded entry is recognised as stale
//! when it is popped and skipped, so expansions can be performed one at a time by the caller.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Parent index of the root node.
const NO_PARENT: usize = usize::MAX;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then favours the largest cost (the smallest heuristic
        // value) and finally the node that was discovered first.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Best-known state of a discovered node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchNode<C> {
    /// Arena index of the predecessor on the best known path.
    pub parent: usize,
    pub cost: C,
    pub heuristic: C,
    /// Set once the node is expanded; its cost is final from then on.
    pub closed: bool,
}

impl<C: Zero + Copy> SearchNode<C> {
    pub fn estimated_cost(&self) -> C {
        self.cost + self.heuristic
    }
}

/// Outcome of a single call to [SearchContext::step].
#[derive(Clone, Debug, PartialEq)]
pub enum Step<N, C> {
    /// A node was closed and its successors were relaxed.
    Expanded(N),
    /// A node satisfying the success predicate was popped.
    Found { path: Vec<N>, cost: C },
    /// The open set ran empty.
    Exhausted,
}

/// Open set, closed set and node arena of one search. Can be reused for multiple searches by
/// calling [start](Self::start) again.
pub struct SearchContext<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    nodes: FxIndexMap<N, SearchNode<C>>,
    expansions: usize,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> Self {
        SearchContext {
            to_see: BinaryHeap::new(),
            nodes: FxIndexMap::default(),
            expansions: 0,
        }
    }

    /// Clears the previous search and opens `start` with zero cost.
    pub fn start(&mut self, start: N, heuristic: C) {
        self.to_see.clear();
        self.nodes.clear();
        self.expansions = 0;
        self.nodes.insert(
            start,
            SearchNode {
                parent: NO_PARENT,
                cost: Zero::zero(),
                heuristic,
                closed: false,
            },
        );
        self.to_see.push(SmallestCostHolder {
            estimated_cost: heuristic,
            cost: Zero::zero(),
            index: 0,
        });
    }

    /// Pops the most promising open node. Returns [Step::Found] when it satisfies `success`,
    /// otherwise closes it and relaxes the edges produced by `successors`.
    pub fn step<FN, IN, FH, FS>(
        &mut self,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Step<N, C>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        let (index, cost, node) = loop {
            let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() else {
                return Step::Exhausted;
            };
            let Some((node, entry)) = self.nodes.get_index(index) else {
                continue;
            };
            // A node may sit in the heap several times if a better way to reach it was found
            // after it was pushed. Only the entry matching the best cost is live.
            if entry.closed || cost > entry.cost {
                continue;
            }
            if success(node) {
                return Step::Found {
                    path: self.reverse_path(index),
                    cost,
                };
            }
            break (index, cost, node.clone());
        };

        if let Some((_, entry)) = self.nodes.get_index_mut(index) {
            entry.closed = true;
        }
        self.expansions += 1;

        for (successor, move_cost) in successors(&node) {
            let new_cost = cost + move_cost;
            let (h, n) = match self.nodes.entry(successor) {
                Vacant(e) => {
                    let h = heuristic(e.key());
                    let n = e.index();
                    e.insert(SearchNode {
                        parent: index,
                        cost: new_cost,
                        heuristic: h,
                        closed: false,
                    });
                    (h, n)
                }
                Occupied(mut e) => {
                    let n = e.index();
                    let existing = e.get_mut();
                    if existing.closed || existing.estimated_cost() <= new_cost + existing.heuristic
                    {
                        continue;
                    }
                    existing.parent = index;
                    existing.cost = new_cost;
                    (existing.heuristic, n)
                }
            };
            self.to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
        Step::Expanded(node)
    }

    /// Runs a complete search from `start`; returns the path and its cost if a node satisfying
    /// `success` is reached.
    pub fn astar<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Option<(Vec<N>, C)>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        let h = heuristic(start);
        self.start(start.clone(), h);
        loop {
            match self.step(&mut successors, &mut heuristic, &mut success) {
                Step::Expanded(_) => {}
                Step::Found { path, cost } => return Some((path, cost)),
                Step::Exhausted => return None,
            }
        }
    }

    /// Follows the parent indices from `index` back to the root, returning root..=index.
    fn reverse_path(&self, index: usize) -> Vec<N> {
        let mut path: Vec<N> = std::iter::successors(Some(index), |&i| {
            self.nodes
                .get_index(i)
                .map(|(_, value)| value.parent)
                .filter(|&parent| parent != NO_PARENT)
        })
        .filter_map(|i| self.nodes.get_index(i).map(|(node, _)| node.clone()))
        .collect();
        path.reverse();
        path
    }

    /// Number of nodes closed so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn node(&self, node: &N) -> Option<&SearchNode<C>> {
        self.nodes.get(node)
    }

    pub fn is_closed(&self, node: &N) -> bool {
        self.nodes.get(node).is_some_and(|n| n.closed)
    }

    pub fn is_open(&self, node: &N) -> bool {
        self.nodes.get(node).is_some_and(|n| !n.closed)
    }

    /// Open nodes in discovery order.
    pub fn open_nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| !n.closed)
            .map(|(node, _)| node)
    }

    /// Closed nodes in discovery order.
    pub fn closed_nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.closed)
            .map(|(node, _)| node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Directed graph on 0..=4 where the cheap route to 3 (via 2) is only found after 3 has
    // already been opened through 1:
    //   0 -1-> 1 -5-> 3 -1-> 4
    //   0 -2-> 2 -1-> 3
    fn graph(node: &u32) -> Vec<(u32, u32)> {
        match node {
            0 => vec![(1, 1), (2, 2)],
            1 => vec![(3, 5)],
            2 => vec![(3, 1)],
            3 => vec![(4, 1)],
            _ => vec![],
        }
    }

    #[test]
    fn cheaper_route_replaces_queued_entry() {
        let mut ct: SearchContext<u32, u32> = SearchContext::new();
        let (path, cost) = ct.astar(&0, graph, |_| 0, |n| *n == 4).unwrap();
        assert_eq!(path, vec![0, 2, 3, 4]);
        assert_eq!(cost, 4);
        assert_eq!(ct.node(&3).unwrap().cost, 3);
    }

    #[test]
    fn stale_entries_are_not_expanded_twice() {
        let mut ct: SearchContext<u32, u32> = SearchContext::new();
        ct.start(0, 0);
        let mut expanded = Vec::new();
        loop {
            match ct.step(graph, |_| 0, |_| false) {
                Step::Expanded(n) => expanded.push(n),
                Step::Found { .. } => unreachable!(),
                Step::Exhausted => break,
            }
        }
        expanded.sort();
        assert_eq!(expanded, vec![0, 1, 2, 3, 4]);
        assert_eq!(ct.expansions(), 5);
        assert_eq!(ct.open_nodes().count(), 0);
    }

    #[test]
    fn start_is_goal() {
        let mut ct: SearchContext<u32, u32> = SearchContext::new();
        let (path, cost) = ct.astar(&2, graph, |_| 0, |n| *n == 2).unwrap();
        assert_eq!(path, vec![2]);
        assert_eq!(cost, 0);
        assert_eq!(ct.expansions(), 0);
    }

    #[test]
    fn unreachable_goal_exhausts() {
        let mut ct: SearchContext<u32, u32> = SearchContext::new();
        assert!(ct.astar(&3, graph, |_| 0, |n| *n == 0).is_none());
        assert!(ct.is_closed(&3));
        assert!(ct.is_closed(&4));
        assert!(!ct.is_open(&0));
    }

    #[test]
    fn ties_prefer_larger_cost_then_discovery_order() {
        let mut heap = BinaryHeap::new();
        heap.push(SmallestCostHolder {
            estimated_cost: 4,
            cost: 1,
            index: 0,
        });
        heap.push(SmallestCostHolder {
            estimated_cost: 4,
            cost: 3,
            index: 2,
        });
        heap.push(SmallestCostHolder {
            estimated_cost: 4,
            cost: 3,
            index: 1,
        });
        heap.push(SmallestCostHolder {
            estimated_cost: 2,
            cost: 0,
            index: 3,
        });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|h| h.index)).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }
}
