use std::ops::Index;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::component::{ComponentId, ConnectivityComponent};
use super::connection::{ConnectionId, ConnectivityConnection};
use super::interface::{ConnectivityInterface, InterfaceId, MemoryRef};
use super::memory_item::MemoryItem;

/// Components, interfaces and connections of one analysis run.
///
/// Elements are only ever appended, so ids stay valid for the lifetime of
/// the graph. An incidence list per interface makes edge enumeration
/// proportional to the interface's degree.
#[derive(Clone, Debug, Default)]
pub struct ConnectivityGraph {
    components: Vec<ConnectivityComponent>,
    interfaces: Vec<ConnectivityInterface>,
    connections: Vec<ConnectivityConnection>,
    incidence: Vec<Vec<ConnectionId>>,
    memory_index: FxHashMap<SmolStr, MemoryRef>,
}

impl ConnectivityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Add a component and index the identifiers of its memory items.
    ///
    /// An identifier already indexed keeps pointing at its first owner.
    pub fn add_component(&mut self, component: ConnectivityComponent) -> ComponentId {
        let id = ComponentId::new(self.components.len());
        for (item_id, item) in component.memory.iter() {
            self.memory_index
                .entry(item.identifier.clone())
                .or_insert(MemoryRef {
                    component: id,
                    item: item_id,
                });
        }
        self.components.push(component);
        id
    }

    pub fn add_interface(&mut self, interface: ConnectivityInterface) -> InterfaceId {
        let id = InterfaceId::new(self.interfaces.len());
        self.interfaces.push(interface);
        self.incidence.push(Vec::new());
        id
    }

    /// Connect two interfaces. Returns `None`, storing nothing, when either
    /// endpoint is not part of this graph.
    pub fn connect(
        &mut self,
        name: impl Into<SmolStr>,
        first: InterfaceId,
        second: InterfaceId,
    ) -> Option<ConnectionId> {
        let name = name.into();
        if first.index() >= self.interfaces.len() || second.index() >= self.interfaces.len() {
            trace!("[GRAPH] dropping connection '{}' with a dangling endpoint", name);
            return None;
        }

        let id = ConnectionId::new(self.connections.len());
        trace!(
            "[GRAPH] connection '{}': {} <-> {}",
            name, self.interfaces[first.index()].name, self.interfaces[second.index()].name
        );
        self.connections
            .push(ConnectivityConnection::new(name, first, second));
        self.incidence[first.index()].push(id);
        if second != first {
            self.incidence[second.index()].push(id);
        }
        Some(id)
    }

    pub(crate) fn interface_mut(&mut self, id: InterfaceId) -> Option<&mut ConnectivityInterface> {
        self.interfaces.get_mut(id.index())
    }

    pub(crate) fn component_mut(&mut self, id: ComponentId) -> Option<&mut ConnectivityComponent> {
        self.components.get_mut(id.index())
    }

    // ========================================================================
    // ACCESS
    // ========================================================================

    pub fn component(&self, id: ComponentId) -> Option<&ConnectivityComponent> {
        self.components.get(id.index())
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&ConnectivityInterface> {
        self.interfaces.get(id.index())
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&ConnectivityConnection> {
        self.connections.get(id.index())
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &ConnectivityComponent)> {
        self.components
            .iter()
            .enumerate()
            .map(|(index, component)| (ComponentId::new(index), component))
    }

    pub fn interfaces(&self) -> impl Iterator<Item = (InterfaceId, &ConnectivityInterface)> {
        self.interfaces
            .iter()
            .enumerate()
            .map(|(index, interface)| (InterfaceId::new(index), interface))
    }

    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &ConnectivityConnection)> {
        self.connections
            .iter()
            .enumerate()
            .map(|(index, connection)| (ConnectionId::new(index), connection))
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// First component instance with the given name.
    pub fn find_component(&self, instance_name: &str) -> Option<ComponentId> {
        self.components()
            .find(|(_, component)| component.instance_name == instance_name)
            .map(|(id, _)| id)
    }

    /// First interface named `interface_name` on an instance named
    /// `instance_name`, in creation order.
    pub fn find_interface(&self, instance_name: &str, interface_name: &str) -> Option<InterfaceId> {
        self.interfaces()
            .find(|(_, interface)| {
                interface.name == interface_name
                    && self.instance_name(interface) == Some(instance_name)
            })
            .map(|(id, _)| id)
    }

    /// Instance name of the component owning `interface`.
    pub fn instance_name(&self, interface: &ConnectivityInterface) -> Option<&str> {
        self.component(interface.component)
            .map(|component| component.instance_name.as_str())
    }

    /// Connections incident to an interface. A self-loop is listed once.
    pub fn connections_of(&self, interface: InterfaceId) -> &[ConnectionId] {
        self.incidence
            .get(interface.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Opposite endpoints of the connections incident to `interface`, in
    /// connection order. A self-loop yields `interface` itself.
    pub fn neighbors(&self, interface: InterfaceId) -> impl Iterator<Item = InterfaceId> + '_ {
        self.connections_of(interface)
            .iter()
            .filter_map(move |id| self.connection(*id)?.other_end(interface))
    }

    pub fn memory_item(&self, reference: MemoryRef) -> Option<&MemoryItem> {
        self.component(reference.component)?
            .memory
            .get(reference.item)
    }

    /// The memory item an interface is bound to.
    pub fn interface_memory(&self, interface: InterfaceId) -> Option<&MemoryItem> {
        self.memory_item(self.interface(interface)?.memory?)
    }

    pub fn find_memory_item(&self, identifier: &str) -> Option<MemoryRef> {
        self.memory_index.get(identifier).copied()
    }
}

impl Index<ComponentId> for ConnectivityGraph {
    type Output = ConnectivityComponent;

    fn index(&self, id: ComponentId) -> &ConnectivityComponent {
        &self.components[id.index()]
    }
}

impl Index<InterfaceId> for ConnectivityGraph {
    type Output = ConnectivityInterface;

    fn index(&self, id: InterfaceId) -> &ConnectivityInterface {
        &self.interfaces[id.index()]
    }
}

impl Index<ConnectionId> for ConnectivityGraph {
    type Output = ConnectivityConnection;

    fn index(&self, id: ConnectionId) -> &ConnectivityConnection {
        &self.connections[id.index()]
    }
}
