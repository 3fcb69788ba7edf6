//! Connections inside one component instance: channels, transparent
//! bridges and address-space-to-local-memory-map links.

use smol_str::SmolStr;
use tracing::trace;

use super::{BuildWarning, Builder};
use crate::base::InterfaceMode;
use crate::base::constants::{
    BRIDGE_CONNECTION_INFIX, LOCAL_INTERFACE_SUFFIX, LOCAL_MAP_CONNECTION_INFIX,
};
use crate::graph::{ComponentId, ConnectivityInterface, InterfaceId, MemoryItemKind, MemoryRef};
use crate::model::{AddressSpace, BusInterface, Channel, Component};

impl Builder<'_> {
    pub(super) fn route_internally(
        &mut self,
        component: &Component,
        owner: ComponentId,
        interfaces: &[InterfaceId],
    ) {
        if !component.channels.is_empty() {
            if let Some(node) = self.graph.component_mut(owner) {
                node.is_channeled = true;
            }
        }
        for channel in &component.channels {
            self.route_channel(channel, owner, interfaces);
        }
        for bus in component.bus_interfaces.iter().filter(|bus| bus.has_bridge()) {
            self.route_bridges(bus, owner, interfaces);
        }
        for space in &component.address_spaces {
            if space.local_memory_map.is_some() {
                self.route_local_memory_map(component, space, owner, interfaces);
            }
        }
    }

    /// Connect every unordered pair of the channel's interfaces.
    fn route_channel(&mut self, channel: &Channel, owner: ComponentId, interfaces: &[InterfaceId]) {
        let mut members = Vec::with_capacity(channel.bus_interface_refs.len());
        for name in &channel.bus_interface_refs {
            match self.lookup_interface(interfaces, None, name) {
                Some(id) => members.push(id),
                None => {
                    let instance = self.graph[owner].instance_name.clone();
                    self.warn(BuildWarning::UnresolvedChannelInterface {
                        instance,
                        channel: SmolStr::new(&channel.name),
                        interface: SmolStr::new(name),
                    });
                }
            }
        }

        trace!("[ROUTING] channel '{}' with {} interfaces", channel.name, members.len());
        for (index, first) in members.iter().enumerate() {
            for second in &members[index + 1..] {
                self.graph.connect(channel.name.as_str(), *first, *second);
            }
        }
    }

    /// Mark a bridged target and its initiators, and connect each pair.
    fn route_bridges(
        &mut self,
        bus: &BusInterface,
        owner: ComponentId,
        interfaces: &[InterfaceId],
    ) {
        let Some(start) = self.lookup_interface(interfaces, None, &bus.name) else {
            return;
        };
        if let Some(node) = self.graph.interface_mut(start) {
            node.is_bridged = true;
        }

        for bridge in bus.bridges() {
            let Some(end) = self.lookup_interface(interfaces, None, &bridge.initiator_ref) else {
                let instance = self.graph[owner].instance_name.clone();
                self.warn(BuildWarning::UnresolvedBridgeInterface {
                    instance,
                    target: SmolStr::new(&bus.name),
                    interface: SmolStr::new(&bridge.initiator_ref),
                });
                continue;
            };
            if let Some(node) = self.graph.interface_mut(end) {
                node.is_bridged = true;
            }
            let name = format!("{}{BRIDGE_CONNECTION_INFIX}{}", bus.name, bridge.initiator_ref);
            self.graph.connect(name, start, end);
        }
    }

    /// Link an address space to its local memory map through a self-loop.
    ///
    /// The loop sits on the bus interface referencing the address space, or
    /// on a synthesized interface bound to the address space when none does.
    fn route_local_memory_map(
        &mut self,
        component: &Component,
        space: &AddressSpace,
        owner: ComponentId,
        interfaces: &[InterfaceId],
    ) {
        let Some(local) = &space.local_memory_map else {
            return;
        };
        let Some(space_item) =
            self.graph[owner].find_memory(&space.name, Some(MemoryItemKind::AddressSpace))
        else {
            trace!("[ROUTING] address space '{}' was not built", space.name);
            return;
        };

        let existing = component
            .bus_interface_for_space(&space.name)
            .and_then(|bus| self.lookup_interface(interfaces, None, &bus.name));
        let endpoint = match existing {
            Some(endpoint) => endpoint,
            None if self.options.synthesize_local_interfaces => {
                let mut node = ConnectivityInterface::new(
                    format!("{}{LOCAL_INTERFACE_SUFFIX}", space.name),
                    InterfaceMode::Undefined,
                    owner,
                );
                node.memory = Some(MemoryRef {
                    component: owner,
                    item: space_item,
                });
                node.is_synthesized = true;
                self.graph.add_interface(node)
            }
            None => return,
        };

        let name = format!("{}{LOCAL_MAP_CONNECTION_INFIX}{}", space.name, local.name);
        self.graph.connect(name, endpoint, endpoint);
    }
}
