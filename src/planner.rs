//! Keeps the road network and the sorted location index side by side.

use log::debug;

use crate::error::{Outcome, PlannerResult};
use crate::graph::{Bfs, CityGraph};
use crate::tree::{AvlTree, Iter};

/// The road network plus a sorted index of every location name ever added.
///
/// The index is never pruned: a removed location disappears from the graph
/// but is still listed by [`CityPlanner::locations_sorted`].
#[derive(Debug, Default)]
pub struct CityPlanner {
    graph: CityGraph,
    index: AvlTree<String>,
}

impl CityPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The road network.
    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    /// The sorted index of location names.
    pub fn index(&self) -> &AvlTree<String> {
        &self.index
    }

    /// Adds a location to the graph and records its name in the index.
    /// The returned outcome is the graph's.
    pub fn add_location(&mut self, name: &str) -> Outcome {
        let outcome = self.graph.add_location(name);
        if self.index.insert(name.to_owned()) {
            debug!("indexed location {name:?}");
        }
        outcome
    }

    /// Removes a location and its roads from the graph. The index keeps the name.
    pub fn remove_location(&mut self, name: &str) -> PlannerResult<Outcome> {
        self.graph.remove_location(name)
    }

    pub fn add_road(&mut self, src: &str, dest: &str) -> PlannerResult<Outcome> {
        self.graph.add_road(src, dest)
    }

    pub fn remove_road(&mut self, src: &str, dest: &str) -> PlannerResult<Outcome> {
        self.graph.remove_road(src, dest)
    }

    pub fn connections(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.graph.connections()
    }

    pub fn bfs(&self, start: &str) -> PlannerResult<Bfs<'_>> {
        self.graph.bfs(start)
    }

    /// Every location name ever added, in ascending order.
    pub fn locations_sorted(&self) -> Iter<'_, String> {
        self.index.iter()
    }
}
