//! Partial input: every skipped branch is reported and the build goes on.

use connectivity::model::{
    ActiveInterface, BusInterface, Component, ComponentInstance, Design, DesignConfiguration,
    DesignConfigurationInstantiation, DesignInstantiation, Interconnection, View,
};
use connectivity::{BuildWarning, InMemoryLibrary};

use crate::helpers::fixtures::*;
use crate::helpers::graph_assertions::*;

#[test]
fn test_missing_instance_component_skips_it_and_its_connections() {
    let design = cpu_ram_design()
        .with_instance(ComponentInstance::new("dma0", vlnv("dma")).with_uuid("u-dma0"))
        .with_interconnection(
            Interconnection::new("dma_bus", ActiveInterface::new("dma0", "m"))
                .with_active("ram0", "s"),
        );
    let top = hierarchical("soc", &design.vlnv);
    let mut library = InMemoryLibrary::new();
    library.insert(cpu("cpu", "0")).unwrap();
    library.insert(ram("ram")).unwrap();
    library.insert(design).unwrap();

    let output = build(&library, &top, "hier");
    assert_eq!(output.graph.component_count(), 3);
    assert_eq!(connection_names(&output.graph), vec!["bus"]);
    assert_eq!(
        output.warnings,
        vec![
            BuildWarning::MissingComponent {
                instance: "dma0".into(),
                vlnv: vlnv("dma"),
            },
            BuildWarning::UnresolvedEndpoint {
                interconnection: "dma_bus".into(),
                instance: Some("dma0".into()),
                interface: "m".into(),
            },
        ]
    );
}

#[test]
fn test_unmatched_endpoints_drop_only_that_connection() {
    let design = cpu_ram_design().with_interconnection(
        Interconnection::new("fanout", ActiveInterface::new("cpu0", "m"))
            .with_active("ram0", "nope")
            .with_active("ram0", "s")
            .with_hierarchical("missing_port"),
    );
    let top = hierarchical("soc", &design.vlnv);
    let mut library = InMemoryLibrary::new();
    library.insert(cpu("cpu", "0")).unwrap();
    library.insert(ram("ram")).unwrap();
    library.insert(design).unwrap();

    let output = build(&library, &top, "hier");
    assert_eq!(connection_names(&output.graph), vec!["bus", "fanout"]);
    assert_eq!(output.warnings.len(), 2);
    assert!(output.warnings.contains(&BuildWarning::UnresolvedEndpoint {
        interconnection: "fanout".into(),
        instance: None,
        interface: "missing_port".into(),
    }));
    assert_eq!(
        output.warnings[1].to_string(),
        "interconnection 'fanout': endpoint 'ram0.nope' not found"
    );
}

#[test]
fn test_unknown_view_is_reported() {
    let design = Design::new(vlnv("d"))
        .with_instance(ComponentInstance::new("ram0", vlnv("ram")).with_uuid("u"));
    let configuration = DesignConfiguration::new(vlnv("cfg"))
        .with_design(design.vlnv.clone())
        .with_active_view("ram0", "gate_level");
    let top = Component::new(vlnv("soc"))
        .with_view(View::new("hier").with_design_configuration_instantiation("dci"))
        .with_design_configuration_instantiation(DesignConfigurationInstantiation::new(
            "dci",
            configuration.vlnv.clone(),
        ));
    let mut library = InMemoryLibrary::new();
    library.insert(ram("ram")).unwrap();
    library.insert(design).unwrap();
    library.insert(configuration).unwrap();

    let output = build(&library, &top, "hier");
    assert!(output.graph.find_component("ram0").is_some());
    assert_eq!(
        output.warnings,
        vec![BuildWarning::UnresolvedView {
            instance: "ram0".into(),
            view: "gate_level".into(),
        }]
    );

    let output = build(&library, &top, "schematic");
    assert_eq!(output.graph.component_count(), 1);
    assert_eq!(
        output.warnings,
        vec![BuildWarning::UnresolvedView {
            instance: "top".into(),
            view: "schematic".into(),
        }]
    );
}

#[test]
fn test_unresolved_design_references_are_reported() {
    let top = Component::new(vlnv("soc"))
        .with_view(
            View::new("hier")
                .with_design_instantiation("di")
                .with_design_configuration_instantiation("dci"),
        )
        .with_design_instantiation(DesignInstantiation::new("di", vlnv("nowhere")))
        .with_design_configuration_instantiation(DesignConfigurationInstantiation::new(
            "dci",
            vlnv("no_cfg"),
        ))
        .with_bus_interface(BusInterface::target("s"));

    let output = build(&InMemoryLibrary::new(), &top, "hier");
    let graph = &output.graph;
    assert_eq!(graph.component_count(), 1);
    // The view is hierarchical even though its design is missing.
    assert!(graph[interface(graph, "top", "s")].is_hierarchical);
    assert_eq!(
        output.warnings,
        vec![
            BuildWarning::MissingDesignConfiguration {
                instance: "top".into(),
                reference: "dci".into(),
            },
            BuildWarning::MissingDesign {
                instance: "top".into(),
                reference: "acme:ip:nowhere:1.0".into(),
            },
        ]
    );
}

#[test]
fn test_unresolved_memory_reference_leaves_interface_unbound() {
    let component = cpu("cpu", "0")
        .with_bus_interface(BusInterface::initiator("m2").with_address_space("missing"));

    let output = build_flat(&component);
    let graph = &output.graph;
    assert!(graph[interface(graph, "top", "m")].is_bound());
    assert!(!graph[interface(graph, "top", "m2")].is_bound());
    assert_eq!(
        output.warnings,
        vec![BuildWarning::UnresolvedMemoryReference {
            instance: "top".into(),
            interface: "m2".into(),
            reference: "missing".into(),
        }]
    );
}

#[test]
fn test_build_output_splits_into_parts() {
    let component = Component::new(vlnv("bridge"))
        .with_bus_interface(BusInterface::target("s").with_bridge("gone"));

    let output = build_flat(&component);
    assert!(output.has_warnings());
    let (graph, warnings) = output.into_parts();
    assert_eq!(graph.interface_count(), 1);
    assert_eq!(warnings.len(), 1);
}
