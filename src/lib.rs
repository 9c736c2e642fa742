//! Smart city route planner.
//!
//! Locations joined by undirected roads live in a [`CityGraph`]; every location
//! name ever added is also kept in an [`AvlTree`] for sorted display. A
//! [`CityPlanner`] owns one of each, and the [`cli`] module drives it from a
//! numbered text menu.

pub mod cli;
mod error;
mod graph;
mod planner;
mod tree;

pub use error::{Outcome, PlannerError, PlannerResult};
pub use graph::{Bfs, CityGraph};
pub use planner::CityPlanner;
pub use tree::{AvlTree, Iter};

#[cfg(test)]
mod tests;
