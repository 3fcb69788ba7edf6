//! # connectivity-base
//!
//! Connectivity graph and memory hierarchy resolution for hierarchical
//! hardware component descriptions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! search    → Path finding, initiator-to-memory routes, address translation
//!   ↓
//! build     → GraphFactory: hierarchical walk, memory, interfaces, routing
//!   ↓
//! graph     → ConnectivityGraph arena: components, interfaces, connections
//!   ↓
//! library   → DocumentLibrary trait, InMemoryLibrary
//! expr      → ExpressionEvaluator trait, SvEvaluator, ParameterScope
//!   ↓
//! model     → Input descriptions (components, designs, configurations)
//!   ↓
//! base      → Primitives (Vlnv, InterfaceMode, Usage, numeric helpers)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → expr/library → graph → build → search)
// ============================================================================

/// Foundation types: Vlnv, interface modes, numeric helpers
pub mod base;

/// Input descriptions consumed by the graph factory
pub mod model;

/// Expression evaluation and parameter scopes
pub mod expr;

/// Document retrieval by VLNV
pub mod library;

/// The connectivity graph and memory item forests
pub mod graph;

/// Graph construction from a top component
pub mod build;

/// Queries over a finished graph
pub mod search;

// Re-export the entry points
pub use build::{BuildError, BuildOptions, BuildOutput, BuildWarning, GraphFactory};
pub use expr::{ExpressionEvaluator, ParameterScope, SvEvaluator};
pub use graph::{
    ComponentId, ConnectionId, ConnectivityComponent, ConnectivityConnection, ConnectivityGraph,
    ConnectivityInterface, InterfaceId, MemoryForest, MemoryItem, MemoryItemId, MemoryItemKind,
    MemoryRef,
};
pub use library::{DocumentLibrary, InMemoryLibrary};

// Re-export foundation types
pub use base::{InterfaceMode, Usage, Vlnv};
