use crate::base::{InterfaceMode, Vlnv};

use super::memory::{AddressSpace, MemoryMap};

// ============================================================================
// PARAMETERS
// ============================================================================

/// A named parameter whose value is an expression.
///
/// Expressions reference parameters by `id`; the `name` is accepted as well.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub id: String,
    pub name: String,
    pub value: String,
}

impl Parameter {
    /// Create a parameter whose id equals its name.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            value: value.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// An override of a parameter value, keyed by the parameter id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigurableElementValue {
    pub reference_id: String,
    pub value: String,
}

impl ConfigurableElementValue {
    pub fn new(reference_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            reference_id: reference_id.into(),
            value: value.into(),
        }
    }
}

// ============================================================================
// BUS INTERFACES
// ============================================================================

/// One remap address entry of a mirrored target interface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemapAddress {
    pub remap_address: String,
    pub state: Option<String>,
}

impl RemapAddress {
    pub fn new(remap_address: impl Into<String>) -> Self {
        Self {
            remap_address: remap_address.into(),
            state: None,
        }
    }
}

/// A transparent bridge from a target interface to an initiator interface
/// of the same component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransparentBridge {
    pub initiator_ref: String,
}

impl TransparentBridge {
    pub fn new(initiator_ref: impl Into<String>) -> Self {
        Self {
            initiator_ref: initiator_ref.into(),
        }
    }
}

/// Mode-specific data of a bus interface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterfaceRole {
    Initiator {
        address_space_ref: Option<String>,
        base_address: Option<String>,
    },
    Target {
        memory_map_ref: Option<String>,
        bridges: Vec<TransparentBridge>,
    },
    System {
        group: String,
    },
    MirroredInitiator,
    MirroredTarget {
        range: Option<String>,
        remap_addresses: Vec<RemapAddress>,
    },
    MirroredSystem {
        group: String,
    },
    Monitor,
    Undefined,
}

impl InterfaceRole {
    pub fn mode(&self) -> InterfaceMode {
        match self {
            Self::Initiator { .. } => InterfaceMode::Initiator,
            Self::Target { .. } => InterfaceMode::Target,
            Self::System { .. } => InterfaceMode::System,
            Self::MirroredInitiator => InterfaceMode::MirroredInitiator,
            Self::MirroredTarget { .. } => InterfaceMode::MirroredTarget,
            Self::MirroredSystem { .. } => InterfaceMode::MirroredSystem,
            Self::Monitor => InterfaceMode::Monitor,
            Self::Undefined => InterfaceMode::Undefined,
        }
    }
}

/// A bus-style interface of a component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusInterface {
    pub name: String,
    pub display_name: Option<String>,
    pub role: InterfaceRole,
}

impl BusInterface {
    pub fn new(name: impl Into<String>, role: InterfaceRole) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            role,
        }
    }

    pub fn initiator(name: impl Into<String>) -> Self {
        Self::new(
            name,
            InterfaceRole::Initiator {
                address_space_ref: None,
                base_address: None,
            },
        )
    }

    pub fn target(name: impl Into<String>) -> Self {
        Self::new(
            name,
            InterfaceRole::Target {
                memory_map_ref: None,
                bridges: Vec::new(),
            },
        )
    }

    pub fn mirrored_target(name: impl Into<String>) -> Self {
        Self::new(
            name,
            InterfaceRole::MirroredTarget {
                range: None,
                remap_addresses: Vec::new(),
            },
        )
    }

    /// Set the referenced address space. No effect unless this is an initiator.
    pub fn with_address_space(mut self, space: impl Into<String>) -> Self {
        if let InterfaceRole::Initiator {
            address_space_ref, ..
        } = &mut self.role
        {
            *address_space_ref = Some(space.into());
        }
        self
    }

    /// Set the initiator base address. No effect unless this is an initiator.
    pub fn with_base_address(mut self, address: impl Into<String>) -> Self {
        if let InterfaceRole::Initiator { base_address, .. } = &mut self.role {
            *base_address = Some(address.into());
        }
        self
    }

    /// Set the referenced memory map. No effect unless this is a target.
    pub fn with_memory_map(mut self, map: impl Into<String>) -> Self {
        if let InterfaceRole::Target { memory_map_ref, .. } = &mut self.role {
            *memory_map_ref = Some(map.into());
        }
        self
    }

    /// Add a transparent bridge. No effect unless this is a target.
    pub fn with_bridge(mut self, initiator_ref: impl Into<String>) -> Self {
        if let InterfaceRole::Target { bridges, .. } = &mut self.role {
            bridges.push(TransparentBridge::new(initiator_ref));
        }
        self
    }

    /// Add a remap entry. No effect unless this is a mirrored target.
    pub fn with_remap(
        mut self,
        remap_address: impl Into<String>,
        remap_range: impl Into<String>,
    ) -> Self {
        if let InterfaceRole::MirroredTarget {
            range,
            remap_addresses,
        } = &mut self.role
        {
            remap_addresses.push(RemapAddress::new(remap_address));
            *range = Some(remap_range.into());
        }
        self
    }

    pub fn mode(&self) -> InterfaceMode {
        self.role.mode()
    }

    pub fn address_space_ref(&self) -> Option<&str> {
        match &self.role {
            InterfaceRole::Initiator {
                address_space_ref, ..
            } => address_space_ref.as_deref(),
            _ => None,
        }
    }

    pub fn memory_map_ref(&self) -> Option<&str> {
        match &self.role {
            InterfaceRole::Target { memory_map_ref, .. } => memory_map_ref.as_deref(),
            _ => None,
        }
    }

    pub fn bridges(&self) -> &[TransparentBridge] {
        match &self.role {
            InterfaceRole::Target { bridges, .. } => bridges,
            _ => &[],
        }
    }

    pub fn has_bridge(&self) -> bool {
        !self.bridges().is_empty()
    }
}

/// A named group of interfaces routed to each other inside the component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    pub name: String,
    pub bus_interface_refs: Vec<String>,
}

impl Channel {
    pub fn new<I, S>(name: impl Into<String>, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            bus_interface_refs: interfaces.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// VIEWS AND INSTANTIATIONS
// ============================================================================

/// A component view. Views referencing a design or design configuration
/// instantiation are hierarchical.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct View {
    pub name: String,
    pub design_instantiation_ref: Option<String>,
    pub design_configuration_instantiation_ref: Option<String>,
}

impl View {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_design_instantiation(mut self, reference: impl Into<String>) -> Self {
        self.design_instantiation_ref = Some(reference.into());
        self
    }

    pub fn with_design_configuration_instantiation(mut self, reference: impl Into<String>) -> Self {
        self.design_configuration_instantiation_ref = Some(reference.into());
        self
    }

    pub fn is_hierarchical(&self) -> bool {
        let non_empty = |r: &Option<String>| r.as_deref().is_some_and(|r| !r.is_empty());
        non_empty(&self.design_instantiation_ref)
            || non_empty(&self.design_configuration_instantiation_ref)
    }
}

/// Named reference from a component to a design.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignInstantiation {
    pub name: String,
    pub design_ref: Vlnv,
    /// Overrides applied to the referenced design's parameters.
    pub configurable_element_values: Vec<ConfigurableElementValue>,
}

impl DesignInstantiation {
    pub fn new(name: impl Into<String>, design_ref: Vlnv) -> Self {
        Self {
            name: name.into(),
            design_ref,
            configurable_element_values: Vec::new(),
        }
    }

    pub fn with_override(
        mut self,
        reference_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.configurable_element_values
            .push(ConfigurableElementValue::new(reference_id, value));
        self
    }
}

/// Named reference from a component to a design configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignConfigurationInstantiation {
    pub name: String,
    pub design_configuration_ref: Vlnv,
}

impl DesignConfigurationInstantiation {
    pub fn new(name: impl Into<String>, design_configuration_ref: Vlnv) -> Self {
        Self {
            name: name.into(),
            design_configuration_ref,
        }
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

/// A component description.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub vlnv: Vlnv,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub bus_interfaces: Vec<BusInterface>,
    pub channels: Vec<Channel>,
    pub address_spaces: Vec<AddressSpace>,
    pub memory_maps: Vec<MemoryMap>,
    pub views: Vec<View>,
    pub design_instantiations: Vec<DesignInstantiation>,
    pub design_configuration_instantiations: Vec<DesignConfigurationInstantiation>,
}

impl Component {
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            description: None,
            parameters: Vec::new(),
            bus_interfaces: Vec::new(),
            channels: Vec::new(),
            address_spaces: Vec::new(),
            memory_maps: Vec::new(),
            views: Vec::new(),
            design_instantiations: Vec::new(),
            design_configuration_instantiations: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_bus_interface(mut self, bus_interface: BusInterface) -> Self {
        self.bus_interfaces.push(bus_interface);
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn with_address_space(mut self, space: AddressSpace) -> Self {
        self.address_spaces.push(space);
        self
    }

    pub fn with_memory_map(mut self, map: MemoryMap) -> Self {
        self.memory_maps.push(map);
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    pub fn with_design_instantiation(mut self, instantiation: DesignInstantiation) -> Self {
        self.design_instantiations.push(instantiation);
        self
    }

    pub fn with_design_configuration_instantiation(
        mut self,
        instantiation: DesignConfigurationInstantiation,
    ) -> Self {
        self.design_configuration_instantiations.push(instantiation);
        self
    }

    /// Find a view by name.
    ///
    /// An empty name selects the only view when the component has exactly one.
    pub fn find_view(&self, name: &str) -> Option<&View> {
        if name.is_empty() && self.views.len() == 1 {
            return self.views.first();
        }
        self.views.iter().find(|view| view.name == name)
    }

    pub fn bus_interface(&self, name: &str) -> Option<&BusInterface> {
        self.bus_interfaces.iter().find(|bus| bus.name == name)
    }

    /// The first bus interface referencing the named address space.
    pub fn bus_interface_for_space(&self, space: &str) -> Option<&BusInterface> {
        self.bus_interfaces
            .iter()
            .find(|bus| bus.address_space_ref() == Some(space))
    }

    pub fn design_instantiation(&self, name: &str) -> Option<&DesignInstantiation> {
        self.design_instantiations.iter().find(|i| i.name == name)
    }

    pub fn design_configuration_instantiation(
        &self,
        name: &str,
    ) -> Option<&DesignConfigurationInstantiation> {
        self.design_configuration_instantiations
            .iter()
            .find(|i| i.name == name)
    }
}
