//! The connectivity graph.
//!
//! Interfaces are the vertices and connections the undirected edges.
//! Components own their interfaces' memory: each [`ConnectivityComponent`]
//! holds a [`MemoryForest`], and an interface refers into it through a
//! [`MemoryRef`] instead of sharing the item.
//!
//! ```text
//! ConnectivityGraph
//! ├── components  ── ConnectivityComponent ── MemoryForest ── MemoryItem*
//! ├── interfaces  ── ConnectivityInterface ──(MemoryRef)──┘
//! └── connections ── ConnectivityConnection (InterfaceId, InterfaceId)
//! ```
//!
//! All collections are append-only arenas indexed by typed ids.

mod component;
mod connection;
mod connectivity;
mod interface;
mod memory_item;

pub use component::{ComponentId, ConnectivityComponent};
pub use connection::{ConnectionId, ConnectivityConnection};
pub use connectivity::ConnectivityGraph;
pub use interface::{ConnectivityInterface, InterfaceId, MemoryRef};
pub use memory_item::{MemoryForest, MemoryItem, MemoryItemId, MemoryItemKind};
