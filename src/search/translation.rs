use tracing::trace;

use crate::graph::{ConnectivityGraph, InterfaceId, MemoryRef};

/// One memory item seen along a route, placed in the initiator's address
/// space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslatedHop {
    pub interface: InterfaceId,
    pub memory: MemoryRef,
    pub base_address: u64,
    pub last_address: u64,
}

/// The address window of a route's memory as seen by its initiator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressTranslation {
    pub hops: Vec<TranslatedHop>,
}

impl AddressTranslation {
    /// Base address of the final memory on the route.
    pub fn base_address(&self) -> Option<u64> {
        self.hops.last().map(|hop| hop.base_address)
    }

    pub fn last_address(&self) -> Option<u64> {
        self.hops.last().map(|hop| hop.last_address)
    }

    pub fn range(&self) -> Option<u64> {
        let hop = self.hops.last()?;
        Some(hop.last_address.saturating_sub(hop.base_address).saturating_add(1))
    }
}

/// Accumulate base and remap addresses along `path`.
///
/// The walk starts at the first initiator with its base address. A mirrored
/// target with a remap address and range remaps the next memory on the
/// route. Every memory-bound initiator or target after that records a hop;
/// initiators then add their own base address for the rest of the route.
///
/// A route of one interface repeated (`[i, i]`) is a local memory map access.
pub fn translate_path(
    graph: &ConnectivityGraph,
    path: &[InterfaceId],
) -> Option<AddressTranslation> {
    if let [first, second] = path {
        if first == second {
            return translate_local(graph, *first);
        }
    }

    let start = path
        .iter()
        .position(|id| graph.interface(*id).is_some_and(|i| i.mode.is_initiator()))?;
    let mut current = graph[path[start]].base_address_value().unwrap_or(0);
    let mut remap: Option<(u64, u64)> = None;
    let mut translation = AddressTranslation::default();

    for &id in &path[start + 1..] {
        let interface = graph.interface(id)?;

        if interface.mode.is_mirrored_target() {
            if let (Some(address), Some(range)) =
                (interface.remap_address_value(), interface.remap_range_value())
            {
                remap = Some((address, range));
            }
            continue;
        }

        let Some(memory) = interface.memory else {
            continue;
        };
        if !(interface.mode.is_initiator() || interface.mode.is_target()) {
            continue;
        }

        let (base_address, last_address) = match remap.take() {
            Some((address, range)) => {
                current = current.saturating_add(address);
                (current, current.saturating_add(range.saturating_sub(1)))
            }
            None => {
                let (low, high) = graph[memory.component]
                    .memory
                    .address_bounds(memory.item)
                    .unwrap_or((0, 0));
                (current.saturating_add(low), current.saturating_add(high))
            }
        };
        trace!(
            "[TRANSLATE] {} at {:#x}..={:#x}",
            interface.name, base_address, last_address
        );
        translation.hops.push(TranslatedHop {
            interface: id,
            memory,
            base_address,
            last_address,
        });

        if interface.mode.is_initiator() {
            current = current.saturating_add(interface.base_address_value().unwrap_or(0));
        }
    }

    Some(translation)
}

fn translate_local(graph: &ConnectivityGraph, id: InterfaceId) -> Option<AddressTranslation> {
    let interface = graph.interface(id)?;
    let space = interface.memory?;
    let forest = &graph.component(space.component)?.memory;
    let local = forest.local_memory_map(space.item)?;
    let (low, high) = forest.address_bounds(local).unwrap_or((0, 0));
    let current = interface.base_address_value().unwrap_or(0);

    Some(AddressTranslation {
        hops: vec![TranslatedHop {
            interface: id,
            memory: MemoryRef {
                component: space.component,
                item: local,
            },
            base_address: current.saturating_add(low),
            last_address: current.saturating_add(high),
        }],
    })
}
