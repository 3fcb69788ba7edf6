use smol_str::SmolStr;

use crate::base::{InterfaceMode, parse_u64};

use super::component::ComponentId;
use super::memory_item::MemoryItemId;

/// Index of a [`ConnectivityInterface`] in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(pub u32);

impl InterfaceId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Location of a memory item: the owning component and the item's index in
/// that component's forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRef {
    pub component: ComponentId,
    pub item: MemoryItemId,
}

/// A bus interface of one component instance. Vertices of the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectivityInterface {
    pub name: SmolStr,
    pub mode: InterfaceMode,
    /// Owning component instance.
    pub component: ComponentId,
    /// Initiator base address.
    pub base_address: Option<SmolStr>,
    /// Mirrored target remap address, from the first remap entry.
    pub remap_address: Option<SmolStr>,
    pub remap_range: Option<SmolStr>,
    /// The address space or memory map this interface exposes.
    pub memory: Option<MemoryRef>,
    /// Exposed upward to the design containing the instance.
    pub is_hierarchical: bool,
    /// Part of a transparent bridge.
    pub is_bridged: bool,
    /// Created for an address space's local memory map, not declared by the
    /// component.
    pub is_synthesized: bool,
}

impl ConnectivityInterface {
    pub fn new(name: impl Into<SmolStr>, mode: InterfaceMode, component: ComponentId) -> Self {
        Self {
            name: name.into(),
            mode,
            component,
            base_address: None,
            remap_address: None,
            remap_range: None,
            memory: None,
            is_hierarchical: false,
            is_bridged: false,
            is_synthesized: false,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.memory.is_some()
    }

    pub fn base_address_value(&self) -> Option<u64> {
        self.base_address.as_deref().and_then(parse_u64)
    }

    pub fn remap_address_value(&self) -> Option<u64> {
        self.remap_address.as_deref().and_then(parse_u64)
    }

    pub fn remap_range_value(&self) -> Option<u64> {
        self.remap_range.as_deref().and_then(parse_u64)
    }
}
