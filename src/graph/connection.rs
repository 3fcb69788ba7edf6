use smol_str::SmolStr;

use super::interface::InterfaceId;

/// Index of a [`ConnectivityConnection`] in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u32);

impl ConnectionId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An undirected edge between two interfaces. Both ends may be the same
/// interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectivityConnection {
    pub name: SmolStr,
    pub first: InterfaceId,
    pub second: InterfaceId,
}

impl ConnectivityConnection {
    pub fn new(name: impl Into<SmolStr>, first: InterfaceId, second: InterfaceId) -> Self {
        Self {
            name: name.into(),
            first,
            second,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.first == self.second
    }

    pub fn connects(&self, a: InterfaceId, b: InterfaceId) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }

    /// The endpoint opposite `end`, or `None` if `end` is not an endpoint.
    pub fn other_end(&self, end: InterfaceId) -> Option<InterfaceId> {
        if self.first == end {
            Some(self.second)
        } else if self.second == end {
            Some(self.first)
        } else {
            None
        }
    }
}
