//! Hierarchical descent.
//!
//! Each instance is built completely (memory, interfaces, internal routing)
//! before its active view is examined. A hierarchical view pulls in a design
//! whose instances are built in declaration order; the design's
//! interconnections are wired only after every instance of that level exists.

use std::sync::Arc;

use smol_str::SmolStr;
use tracing::{debug, warn};

use super::{BuildError, BuildWarning, Builder};
use crate::base::Vlnv;
use crate::base::constants::{TOP_INSTANCE_NAME, TOP_INSTANCE_UUID};
use crate::expr::ScopeFrame;
use crate::graph::{ComponentId, ConnectivityComponent, InterfaceId};
use crate::model::{
    Component, Design, DesignConfiguration, DesignInstantiation, Interconnection, View,
};

/// Identity of the instance being built.
struct InstanceInfo<'i> {
    name: &'i str,
    uuid: &'i str,
    vlnv: &'i Vlnv,
    view: &'i str,
}

impl Builder<'_> {
    pub(super) fn build_root(&mut self, top: &Component, view: &str) -> Result<(), BuildError> {
        self.scope.push(ScopeFrame::from_parameters(
            format!("component {}", top.vlnv),
            &top.parameters,
        ));
        let info = InstanceInfo {
            name: TOP_INSTANCE_NAME,
            uuid: TOP_INSTANCE_UUID,
            vlnv: &top.vlnv,
            view,
        };
        let result = self.build_instance(top, &info, 0);
        self.scope.pop();
        result.map(|_| ())
    }

    /// Build one instance and everything below it. Returns the instance's
    /// interfaces in bus interface order.
    fn build_instance(
        &mut self,
        component: &Component,
        info: &InstanceInfo<'_>,
        depth: usize,
    ) -> Result<Vec<InterfaceId>, BuildError> {
        if self.options.exceeds_depth(depth) {
            let limit = self.options.max_hierarchy_depth.unwrap_or(depth);
            warn!("[HIERARCHY] depth {} exceeds the limit of {}", depth, limit);
            return Err(BuildError::HierarchyTooDeep { depth, limit });
        }
        if self.chain.contains(&component.vlnv) {
            let mut chain = self.chain.clone();
            chain.push(component.vlnv.clone());
            warn!("[HIERARCHY] {} recurs inside itself", component.vlnv);
            return Err(BuildError::CyclicHierarchy { chain });
        }

        debug!(
            "[HIERARCHY] instance '{}' of {} (view '{}', depth {})",
            info.name, info.vlnv, info.view, depth
        );

        let mut node = ConnectivityComponent::new(info.name, info.uuid, info.vlnv.clone());
        node.active_view = component
            .find_view(info.view)
            .map_or_else(|| SmolStr::new(info.view), |view| SmolStr::new(&view.name));
        node.description = component.description.clone();
        node.memory = self.build_memory(component, &node.identifier_prefix());
        let owner = self.graph.add_component(node);

        let interfaces = self.build_interfaces(component, owner);
        self.route_internally(component, owner, &interfaces);

        self.chain.push(component.vlnv.clone());
        let result = self.descend(component, owner, info, &interfaces, depth);
        self.chain.pop();
        result?;

        Ok(interfaces)
    }

    /// Follow the instance's active view into its design, if hierarchical.
    fn descend(
        &mut self,
        component: &Component,
        owner: ComponentId,
        info: &InstanceInfo<'_>,
        interfaces: &[InterfaceId],
        depth: usize,
    ) -> Result<(), BuildError> {
        let Some(view) = component.find_view(info.view) else {
            if !info.view.is_empty() {
                self.warn(BuildWarning::UnresolvedView {
                    instance: SmolStr::new(info.name),
                    view: SmolStr::new(info.view),
                });
            }
            return Ok(());
        };
        if !view.is_hierarchical() {
            return Ok(());
        }

        for id in interfaces {
            if let Some(interface) = self.graph.interface_mut(*id) {
                interface.is_hierarchical = true;
            }
        }

        let configuration = self.hierarchical_configuration(component, view, info.name);
        let instantiation = view
            .design_instantiation_ref
            .as_deref()
            .filter(|reference| !reference.is_empty())
            .and_then(|reference| component.design_instantiation(reference));
        let configuration = configuration.as_deref();
        let Some(design) = self.hierarchical_design(instantiation, configuration, info.name) else {
            return Ok(());
        };

        debug!(
            "[HIERARCHY] '{}' ({:?}) descends into design {}",
            info.name, owner, design.vlnv
        );
        self.analyze_design(&design, instantiation, configuration, interfaces, depth + 1)
    }

    fn hierarchical_configuration(
        &mut self,
        component: &Component,
        view: &View,
        instance: &str,
    ) -> Option<Arc<DesignConfiguration>> {
        let reference = view
            .design_configuration_instantiation_ref
            .as_deref()
            .filter(|reference| !reference.is_empty())?;

        let resolved = component
            .design_configuration_instantiation(reference)
            .and_then(|instantiation| {
                self.library
                    .design_configuration(&instantiation.design_configuration_ref)
            });
        if resolved.is_none() {
            self.warn(BuildWarning::MissingDesignConfiguration {
                instance: SmolStr::new(instance),
                reference: SmolStr::new(reference),
            });
        }
        resolved
    }

    /// The design named by the design instantiation, or else by the design
    /// configuration.
    fn hierarchical_design(
        &mut self,
        instantiation: Option<&DesignInstantiation>,
        configuration: Option<&DesignConfiguration>,
        instance: &str,
    ) -> Option<Arc<Design>> {
        let vlnv = instantiation
            .map(|instantiation| &instantiation.design_ref)
            .filter(|vlnv| vlnv.is_valid())
            .or_else(|| configuration.and_then(|configuration| configuration.design_ref.as_ref()));

        let Some(vlnv) = vlnv else {
            self.warn(BuildWarning::MissingDesign {
                instance: SmolStr::new(instance),
                reference: SmolStr::default(),
            });
            return None;
        };

        let design = self.library.design(vlnv);
        if design.is_none() {
            self.warn(BuildWarning::MissingDesign {
                instance: SmolStr::new(instance),
                reference: SmolStr::new(vlnv.to_string()),
            });
        }
        design
    }

    /// Build every instance of `design` within a frame holding the design's
    /// parameters, then wire its interconnections.
    fn analyze_design(
        &mut self,
        design: &Design,
        instantiation: Option<&DesignInstantiation>,
        configuration: Option<&DesignConfiguration>,
        top_interfaces: &[InterfaceId],
        depth: usize,
    ) -> Result<(), BuildError> {
        let overrides = instantiation
            .map(|instantiation| instantiation.configurable_element_values.as_slice())
            .unwrap_or_default();
        self.scope.push(
            ScopeFrame::from_parameters(format!("design {}", design.vlnv), &design.parameters)
                .with_overrides(overrides),
        );
        let result = self.analyze_design_in_scope(design, configuration, top_interfaces, depth);
        self.scope.pop();
        result
    }

    fn analyze_design_in_scope(
        &mut self,
        design: &Design,
        configuration: Option<&DesignConfiguration>,
        top_interfaces: &[InterfaceId],
        depth: usize,
    ) -> Result<(), BuildError> {
        let mut design_interfaces = Vec::new();

        for instance in &design.component_instances {
            let Some(component) = self.library.component(&instance.component_ref) else {
                self.warn(BuildWarning::MissingComponent {
                    instance: SmolStr::new(&instance.instance_name),
                    vlnv: instance.component_ref.clone(),
                });
                continue;
            };
            let view = configuration
                .and_then(|configuration| configuration.active_view(&instance.instance_name))
                .unwrap_or_default();
            let info = InstanceInfo {
                name: &instance.instance_name,
                uuid: &instance.uuid,
                vlnv: &instance.component_ref,
                view,
            };

            self.scope.push(
                ScopeFrame::from_parameters(
                    format!("instance {}", instance.instance_name),
                    &component.parameters,
                )
                .with_overrides(&instance.configurable_element_values),
            );
            let result = self.build_instance(&component, &info, depth);
            self.scope.pop();
            design_interfaces.extend(result?);
        }

        for interconnection in &design.interconnections {
            self.connect_interconnection(interconnection, &design_interfaces, top_interfaces);
        }
        Ok(())
    }

    /// Connect the interconnection's start to each of its other endpoints.
    ///
    /// Hierarchical endpoints resolve against the containing instance's
    /// interfaces by name. Active endpoints resolve against this design
    /// level's interfaces by instance and name.
    fn connect_interconnection(
        &mut self,
        interconnection: &Interconnection,
        design_interfaces: &[InterfaceId],
        top_interfaces: &[InterfaceId],
    ) {
        let start_ref = &interconnection.start;
        let Some(start) = self.lookup_interface(
            design_interfaces,
            Some(&start_ref.component_ref),
            &start_ref.bus_ref,
        ) else {
            self.warn(BuildWarning::UnresolvedEndpoint {
                interconnection: SmolStr::new(&interconnection.name),
                instance: Some(SmolStr::new(&start_ref.component_ref)),
                interface: SmolStr::new(&start_ref.bus_ref),
            });
            return;
        };

        for hier in &interconnection.hier_interfaces {
            match self.lookup_interface(top_interfaces, None, &hier.bus_ref) {
                Some(end) => {
                    self.graph.connect(interconnection.name.as_str(), start, end);
                }
                None => self.warn(BuildWarning::UnresolvedEndpoint {
                    interconnection: SmolStr::new(&interconnection.name),
                    instance: None,
                    interface: SmolStr::new(&hier.bus_ref),
                }),
            }
        }

        for active in &interconnection.active_interfaces {
            match self.lookup_interface(
                design_interfaces,
                Some(&active.component_ref),
                &active.bus_ref,
            ) {
                Some(end) => {
                    self.graph.connect(interconnection.name.as_str(), start, end);
                }
                None => self.warn(BuildWarning::UnresolvedEndpoint {
                    interconnection: SmolStr::new(&interconnection.name),
                    instance: Some(SmolStr::new(&active.component_ref)),
                    interface: SmolStr::new(&active.bus_ref),
                }),
            }
        }
    }
}
