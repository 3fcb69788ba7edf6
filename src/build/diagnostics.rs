//! Build failures and warnings.
//!
//! Construction is best-effort. Missing documents, views and endpoints skip
//! the affected branch and are reported as [`BuildWarning`]s next to the
//! partial graph. Only the conditions in [`BuildError`] abort a build.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::Vlnv;
use crate::graph::ConnectivityGraph;

// ============================================================================
// ERRORS
// ============================================================================

/// A condition that aborts graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("top component {0} is not in the library")]
    MissingTopComponent(Vlnv),

    #[error("cyclic hierarchy: {}", join_chain(.chain))]
    CyclicHierarchy {
        /// Components under descent, outermost first, ending with the
        /// component that recurs.
        chain: Vec<Vlnv>,
    },

    #[error("hierarchy depth {depth} exceeds the limit of {limit}")]
    HierarchyTooDeep { depth: usize, limit: usize },
}

fn join_chain(chain: &[Vlnv]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

// ============================================================================
// WARNINGS
// ============================================================================

/// Partial-data conditions recorded while building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildWarning {
    #[error("instance '{instance}': component {vlnv} is not in the library")]
    MissingComponent { instance: SmolStr, vlnv: Vlnv },

    #[error("instance '{instance}': view '{view}' does not exist")]
    UnresolvedView { instance: SmolStr, view: SmolStr },

    #[error("instance '{instance}': design configuration '{reference}' could not be resolved")]
    MissingDesignConfiguration { instance: SmolStr, reference: SmolStr },

    #[error("instance '{instance}': design '{reference}' could not be resolved")]
    MissingDesign { instance: SmolStr, reference: SmolStr },

    #[error("interconnection '{interconnection}': endpoint '{}' not found", endpoint_label(.instance, .interface))]
    UnresolvedEndpoint {
        interconnection: SmolStr,
        /// `None` for a hierarchical endpoint.
        instance: Option<SmolStr>,
        interface: SmolStr,
    },

    #[error("instance '{instance}': channel '{channel}' lists unknown interface '{interface}'")]
    UnresolvedChannelInterface {
        instance: SmolStr,
        channel: SmolStr,
        interface: SmolStr,
    },

    #[error("instance '{instance}': bridge from '{target}' names unknown initiator '{interface}'")]
    UnresolvedBridgeInterface {
        instance: SmolStr,
        target: SmolStr,
        interface: SmolStr,
    },

    #[error("instance '{instance}': interface '{interface}' references unknown memory '{reference}'")]
    UnresolvedMemoryReference {
        instance: SmolStr,
        interface: SmolStr,
        reference: SmolStr,
    },

    #[error("register file '{identifier}' is not expanded")]
    RegisterFileSkipped { identifier: SmolStr },

    #[error("memory block '{identifier}' is not an address block and is not expanded")]
    UnsupportedMemoryBlock { identifier: SmolStr },

    #[error("memory identifier '{identifier}' is already used; renamed to '{renamed}'")]
    DuplicateMemoryIdentifier { identifier: SmolStr, renamed: SmolStr },
}

fn endpoint_label(instance: &Option<SmolStr>, interface: &SmolStr) -> String {
    match instance {
        Some(instance) => format!("{instance}.{interface}"),
        None => interface.to_string(),
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// A built graph and the warnings recorded while building it.
#[derive(Clone, Debug, Default)]
pub struct BuildOutput {
    pub graph: ConnectivityGraph,
    pub warnings: Vec<BuildWarning>,
}

impl BuildOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_parts(self) -> (ConnectivityGraph, Vec<BuildWarning>) {
        (self.graph, self.warnings)
    }
}
