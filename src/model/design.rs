//! Design and design configuration descriptions.

use uuid::Uuid;

use crate::base::Vlnv;

use super::component::{ConfigurableElementValue, Parameter};

/// An instance of a component inside a design.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentInstance {
    pub instance_name: String,
    pub uuid: String,
    pub component_ref: Vlnv,
    /// Overrides applied to the instanced component's parameters.
    pub configurable_element_values: Vec<ConfigurableElementValue>,
}

impl ComponentInstance {
    /// Create an instance with a freshly generated UUID.
    pub fn new(instance_name: impl Into<String>, component_ref: Vlnv) -> Self {
        Self {
            instance_name: instance_name.into(),
            uuid: Uuid::new_v4().to_string(),
            component_ref,
            configurable_element_values: Vec::new(),
        }
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
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

/// Interconnection endpoint on a component instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveInterface {
    /// Instance name of the component.
    pub component_ref: String,
    pub bus_ref: String,
}

impl ActiveInterface {
    pub fn new(component_ref: impl Into<String>, bus_ref: impl Into<String>) -> Self {
        Self {
            component_ref: component_ref.into(),
            bus_ref: bus_ref.into(),
        }
    }
}

/// Interconnection endpoint on the containing component's own interface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierInterface {
    pub bus_ref: String,
}

impl HierInterface {
    pub fn new(bus_ref: impl Into<String>) -> Self {
        Self {
            bus_ref: bus_ref.into(),
        }
    }
}

/// Connects a start interface to any number of other endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interconnection {
    pub name: String,
    pub start: ActiveInterface,
    pub active_interfaces: Vec<ActiveInterface>,
    pub hier_interfaces: Vec<HierInterface>,
}

impl Interconnection {
    pub fn new(name: impl Into<String>, start: ActiveInterface) -> Self {
        Self {
            name: name.into(),
            start,
            active_interfaces: Vec::new(),
            hier_interfaces: Vec::new(),
        }
    }

    pub fn with_active(
        mut self,
        component_ref: impl Into<String>,
        bus_ref: impl Into<String>,
    ) -> Self {
        self.active_interfaces
            .push(ActiveInterface::new(component_ref, bus_ref));
        self
    }

    pub fn with_hierarchical(mut self, bus_ref: impl Into<String>) -> Self {
        self.hier_interfaces.push(HierInterface::new(bus_ref));
        self
    }
}

/// A design: component instances and their interconnections.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Design {
    pub vlnv: Vlnv,
    pub parameters: Vec<Parameter>,
    pub component_instances: Vec<ComponentInstance>,
    pub interconnections: Vec<Interconnection>,
}

impl Design {
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            parameters: Vec::new(),
            component_instances: Vec::new(),
            interconnections: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_instance(mut self, instance: ComponentInstance) -> Self {
        self.component_instances.push(instance);
        self
    }

    pub fn with_interconnection(mut self, interconnection: Interconnection) -> Self {
        self.interconnections.push(interconnection);
        self
    }
}

/// Active view selection for one instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewConfiguration {
    pub instance_name: String,
    pub view_ref: String,
}

/// Selects the design and the active view of each instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignConfiguration {
    pub vlnv: Vlnv,
    pub design_ref: Option<Vlnv>,
    pub view_configurations: Vec<ViewConfiguration>,
}

impl DesignConfiguration {
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            design_ref: None,
            view_configurations: Vec::new(),
        }
    }

    pub fn with_design(mut self, design_ref: Vlnv) -> Self {
        self.design_ref = Some(design_ref);
        self
    }

    pub fn with_active_view(
        mut self,
        instance_name: impl Into<String>,
        view_ref: impl Into<String>,
    ) -> Self {
        self.view_configurations.push(ViewConfiguration {
            instance_name: instance_name.into(),
            view_ref: view_ref.into(),
        });
        self
    }

    /// The active view configured for an instance, if any.
    pub fn active_view(&self, instance_name: &str) -> Option<&str> {
        self.view_configurations
            .iter()
            .find(|config| config.instance_name == instance_name)
            .map(|config| config.view_ref.as_str())
    }
}
