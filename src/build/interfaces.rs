use smol_str::SmolStr;
use tracing::trace;

use super::{BuildWarning, Builder};
use crate::graph::{ComponentId, ConnectivityInterface, InterfaceId, MemoryItemKind, MemoryRef};
use crate::model::{BusInterface, Component, InterfaceRole};

impl Builder<'_> {
    /// Create one interface per bus interface of `component`, in declaration
    /// order.
    pub(super) fn build_interfaces(
        &mut self,
        component: &Component,
        owner: ComponentId,
    ) -> Vec<InterfaceId> {
        component
            .bus_interfaces
            .iter()
            .map(|bus| self.build_interface(bus, owner))
            .collect()
    }

    fn build_interface(&mut self, bus: &BusInterface, owner: ComponentId) -> InterfaceId {
        let mut node = ConnectivityInterface::new(bus.name.as_str(), bus.mode(), owner);

        let reference = match &bus.role {
            InterfaceRole::Initiator {
                address_space_ref,
                base_address,
            } => {
                node.base_address = self.eval_opt(base_address.as_deref());
                address_space_ref
                    .as_deref()
                    .map(|space| (space, MemoryItemKind::AddressSpace))
            }
            InterfaceRole::Target { memory_map_ref, .. } => memory_map_ref
                .as_deref()
                .map(|map| (map, MemoryItemKind::MemoryMap)),
            InterfaceRole::MirroredTarget {
                range,
                remap_addresses,
            } => {
                // Only the first remap entry is used.
                if let Some(first) = remap_addresses.first() {
                    node.remap_address = Some(self.eval(&first.remap_address));
                    node.remap_range = self.eval_opt(range.as_deref());
                }
                None
            }
            _ => None,
        };

        if let Some((reference, kind)) = reference.filter(|(reference, _)| !reference.is_empty()) {
            match self.graph[owner].find_memory(reference, Some(kind)) {
                Some(item) => {
                    node.memory = Some(MemoryRef {
                        component: owner,
                        item,
                    });
                }
                None => {
                    let instance = self.graph[owner].instance_name.clone();
                    self.warn(BuildWarning::UnresolvedMemoryReference {
                        instance,
                        interface: SmolStr::new(&bus.name),
                        reference: SmolStr::new(reference),
                    });
                }
            }
        }

        trace!(
            "[INTERFACE] {} ({}) bound: {}",
            node.name,
            node.mode,
            node.is_bound()
        );
        self.graph.add_interface(node)
    }

    /// First interface named `name` among `candidates`, optionally restricted
    /// to an instance.
    pub(super) fn lookup_interface(
        &self,
        candidates: &[InterfaceId],
        instance: Option<&str>,
        name: &str,
    ) -> Option<InterfaceId> {
        candidates.iter().copied().find(|id| {
            let interface = &self.graph[*id];
            interface.name == name
                && instance.is_none_or(|instance| {
                    self.graph.instance_name(interface) == Some(instance)
                })
        })
    }
}
