//! Queries over a finished [`ConnectivityGraph`].
//!
//! ```text
//! find_path(start, goal)          breadth-first, shortest in connections
//! find_initiator_target_paths     every initiator-to-memory route
//! translate_path(route)           base/remap offsets summed along a route
//! ```
//!
//! Searches keep their state in a [`SearchTree`] built per call, so a graph
//! can be searched through a shared reference from several places at once.

mod path;
mod translation;

pub use path::{SearchTree, find_initiator_target_paths, find_path};
pub use translation::{AddressTranslation, TranslatedHop, translate_path};

use crate::graph::{ConnectivityGraph, InterfaceId};

impl ConnectivityGraph {
    /// See [`find_path`].
    pub fn find_path(&self, start: InterfaceId, goal: InterfaceId) -> Option<Vec<InterfaceId>> {
        find_path(self, start, goal)
    }

    /// Breadth-first tree of everything reachable from `root`.
    pub fn search_tree(&self, root: InterfaceId) -> SearchTree {
        SearchTree::build(self, root)
    }
}
