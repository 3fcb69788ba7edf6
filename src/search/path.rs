use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::graph::{ConnectivityGraph, InterfaceId};

/// Breadth-first tree over the interfaces reachable from a root.
///
/// Children are recorded in discovery order, which follows the order of
/// each interface's incident connections.
#[derive(Clone, Debug)]
pub struct SearchTree {
    root: InterfaceId,
    parents: FxHashMap<InterfaceId, InterfaceId>,
    children: FxHashMap<InterfaceId, Vec<InterfaceId>>,
    visited: FxHashSet<InterfaceId>,
}

impl SearchTree {
    /// Explore everything reachable from `root`.
    pub fn build(graph: &ConnectivityGraph, root: InterfaceId) -> Self {
        let mut tree = Self::empty(root);
        tree.grow(graph, None);
        tree
    }

    fn empty(root: InterfaceId) -> Self {
        let mut visited = FxHashSet::default();
        visited.insert(root);
        Self {
            root,
            parents: FxHashMap::default(),
            children: FxHashMap::default(),
            visited,
        }
    }

    /// Expand breadth-first from the root, stopping early once `goal` is
    /// discovered. Returns whether the goal was reached.
    fn grow(&mut self, graph: &ConnectivityGraph, goal: Option<InterfaceId>) -> bool {
        if goal == Some(self.root) {
            return true;
        }

        let mut queue = VecDeque::from([self.root]);
        while let Some(current) = queue.pop_front() {
            for next in graph.neighbors(current) {
                if !self.visited.insert(next) {
                    continue;
                }
                self.parents.insert(next, current);
                self.children.entry(current).or_default().push(next);
                if goal == Some(next) {
                    return true;
                }
                queue.push_back(next);
            }
        }
        false
    }

    pub fn root(&self) -> InterfaceId {
        self.root
    }

    /// The interface `id` was discovered from. `None` for the root and for
    /// interfaces outside the tree.
    pub fn parent(&self, id: InterfaceId) -> Option<InterfaceId> {
        self.parents.get(&id).copied()
    }

    pub fn children(&self, id: InterfaceId) -> &[InterfaceId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, id: InterfaceId) -> bool {
        self.visited.contains(&id)
    }

    /// Number of interfaces in the tree, the root included.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// The tree path from the root to `goal`, both included.
    pub fn path_to(&self, goal: InterfaceId) -> Option<Vec<InterfaceId>> {
        if !self.contains(goal) {
            return None;
        }
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Shortest path (in connections) from `start` to `goal`.
///
/// Ties are broken by connection order, so the result is stable for a given
/// graph. A path from an interface to itself is that single interface.
pub fn find_path(
    graph: &ConnectivityGraph,
    start: InterfaceId,
    goal: InterfaceId,
) -> Option<Vec<InterfaceId>> {
    if graph.interface(start).is_none() || graph.interface(goal).is_none() {
        return None;
    }

    let mut tree = SearchTree::empty(start);
    if !tree.grow(graph, Some(goal)) {
        trace!("[SEARCH] no path from {:?} to {:?}", start, goal);
        return None;
    }
    tree.path_to(goal)
}

/// Every route from an initiator exposing memory to a target exposing
/// memory.
///
/// Routes are simple paths. They pass through interfaces without memory,
/// hierarchical interfaces, channels and bridges, and continue past bridged
/// or hierarchical targets. A route crosses a component with at most one
/// internal connection at a time: after entering through one interface and
/// moving to another of the same component, it has to leave through an
/// external connection. A memory-bound interface with a self-loop
/// contributes the two-element route `[i, i]` for its local memory map.
pub fn find_initiator_target_paths(graph: &ConnectivityGraph) -> Vec<Vec<InterfaceId>> {
    let mut paths = Vec::new();

    for (id, interface) in graph.interfaces() {
        if !interface.is_bound() {
            continue;
        }
        let has_self_loop = graph
            .connections_of(id)
            .iter()
            .any(|connection| graph[*connection].is_self_loop());
        if has_self_loop {
            paths.push(vec![id, id]);
        }
        if interface.mode.is_initiator() {
            let mut path = vec![id];
            extend_routes(graph, &mut path, &mut paths);
        }
    }

    trace!("[SEARCH] {} initiator to target routes", paths.len());
    paths
}

fn extend_routes(
    graph: &ConnectivityGraph,
    path: &mut Vec<InterfaceId>,
    paths: &mut Vec<Vec<InterfaceId>>,
) {
    let Some(&current) = path.last() else {
        return;
    };
    let owner = graph[current].component;
    let arrived_internally = path
        .len()
        .checked_sub(2)
        .is_some_and(|previous| graph[path[previous]].component == owner);

    for next in graph.neighbors(current) {
        if path.contains(&next) {
            continue;
        }
        if arrived_internally && graph[next].component == owner {
            continue;
        }
        path.push(next);

        let interface = &graph[next];
        let terminates = interface.mode.is_target() && interface.is_bound();
        if terminates {
            paths.push(path.clone());
        }
        if !terminates || interface.is_bridged || interface.is_hierarchical {
            extend_routes(graph, path, paths);
        }

        path.pop();
    }
}
