//! Undirected road network between named locations.

use std::collections::{HashSet, VecDeque};
use std::iter::FusedIterator;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::error::{Outcome, PlannerError, PlannerResult};

/// Locations connected by undirected roads, stored as adjacency lists.
///
/// Locations keep the order in which they were added, and each neighbor list
/// keeps the order in which its roads were added. Every road is recorded in
/// the lists of both endpoints.
#[derive(Debug, Clone, Default)]
pub struct CityGraph {
    adjacency: IndexMap<String, Vec<String>>,
}

/// Breadth-first iterator over the locations reachable from a start location.
///
/// Created by [`CityGraph::bfs`].
#[derive(Debug, Clone)]
pub struct Bfs<'a> {
    graph: &'a CityGraph,
    visited: HashSet<&'a str>,
    queue: VecDeque<&'a str>,
}

impl CityGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of roads. A road from a location to itself counts once.
    pub fn road_count(&self) -> usize {
        let mut endpoints = 0;
        let mut self_loops = 0;
        for (name, neighbors) in &self.adjacency {
            endpoints += neighbors.len();
            if neighbors.iter().any(|n| n == name) {
                self_loops += 1;
            }
        }
        (endpoints - self_loops) / 2 + self_loops
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Neighbors of a location in the order their roads were added.
    pub fn neighbors(&self, name: &str) -> Option<&[String]> {
        self.adjacency.get(name).map(Vec::as_slice)
    }

    /// Location names in the order they were added.
    pub fn locations(&self) -> impl Iterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }

    /// Every location with its full neighbor list, in the order locations were added.
    pub fn connections(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.adjacency
            .iter()
            .map(|(name, neighbors)| (name.as_str(), neighbors.as_slice()))
    }

    /// Adds a location without any roads.
    pub fn add_location(&mut self, name: &str) -> Outcome {
        if self.adjacency.contains_key(name) {
            trace!("location {name:?} already exists");
            return Outcome::AlreadyExists;
        }
        self.adjacency.insert(name.to_owned(), Vec::new());
        debug!("added location {name:?}");
        Outcome::Changed
    }

    /// Removes a location together with every road leading to it.
    pub fn remove_location(&mut self, name: &str) -> PlannerResult<Outcome> {
        if self.adjacency.shift_remove(name).is_none() {
            return Err(not_found(name));
        }
        for neighbors in self.adjacency.values_mut() {
            neighbors.retain(|n| n != name);
        }
        debug!("removed location {name:?}");
        Ok(Outcome::Changed)
    }

    /// Adds a road between two existing locations.
    ///
    /// A road from a location to itself is recorded once in its own list.
    pub fn add_road(&mut self, src: &str, dest: &str) -> PlannerResult<Outcome> {
        self.require(src)?;
        self.require(dest)?;

        let src_neighbors = self.adjacency.get_mut(src).ok_or_else(|| not_found(src))?;
        if src_neighbors.iter().any(|n| n == dest) {
            trace!("road {src:?} - {dest:?} already exists");
            return Ok(Outcome::AlreadyExists);
        }
        src_neighbors.push(dest.to_owned());
        if src != dest {
            self.adjacency
                .get_mut(dest)
                .ok_or_else(|| not_found(dest))?
                .push(src.to_owned());
        }
        debug!("added road {src:?} - {dest:?}");
        Ok(Outcome::Changed)
    }

    /// Removes the road between two existing locations.
    ///
    /// Removing a road that does not exist is not an error and yields
    /// [`Outcome::Unchanged`].
    pub fn remove_road(&mut self, src: &str, dest: &str) -> PlannerResult<Outcome> {
        self.require(src)?;
        self.require(dest)?;

        let mut removed = false;
        for (from, to) in [(src, dest), (dest, src)] {
            if let Some(neighbors) = self.adjacency.get_mut(from) {
                if let Some(pos) = neighbors.iter().position(|n| n == to) {
                    neighbors.remove(pos);
                    removed = true;
                }
            }
        }

        if removed {
            debug!("removed road {src:?} - {dest:?}");
            Ok(Outcome::Changed)
        } else {
            trace!("no road {src:?} - {dest:?} to remove");
            Ok(Outcome::Unchanged)
        }
    }

    /// Breadth-first traversal from `start`.
    ///
    /// Each location reachable from `start` is yielded exactly once, starting
    /// with `start` itself. Neighbors are visited in list order. Locations that
    /// cannot be reached are not yielded.
    pub fn bfs(&self, start: &str) -> PlannerResult<Bfs<'_>> {
        let (start, _) = self
            .adjacency
            .get_key_value(start)
            .ok_or_else(|| not_found(start))?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start.as_str());
        queue.push_back(start.as_str());

        Ok(Bfs {
            graph: self,
            visited,
            queue,
        })
    }

    fn require(&self, name: &str) -> PlannerResult<()> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(not_found(name))
        }
    }
}

fn not_found(name: &str) -> PlannerError {
    debug!("location {name:?} not found");
    PlannerError::NotFound(name.to_owned())
}

impl<'a> Iterator for Bfs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let node = self.queue.pop_front()?;
        if let Some(neighbors) = self.graph.adjacency.get(node) {
            for neighbor in neighbors {
                if self.visited.insert(neighbor.as_str()) {
                    self.queue.push_back(neighbor.as_str());
                }
            }
        }
        Some(node)
    }
}

impl FusedIterator for Bfs<'_> {}
