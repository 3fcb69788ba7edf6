//! Hierarchical descent: designs, design configurations and parameter
//! overrides.

use connectivity::model::{
    ActiveInterface, BusInterface, Component, ComponentInstance, Design, DesignConfiguration,
    DesignConfigurationInstantiation, DesignInstantiation, Interconnection, MemoryBlock, Parameter,
    View,
};
use connectivity::{
    BuildError, BuildOptions, GraphFactory, InMemoryLibrary, InterfaceMode, SvEvaluator,
};

use crate::helpers::fixtures::*;
use crate::helpers::graph_assertions::*;

// =============================================================================
// ONE LEVEL
// =============================================================================

#[test]
fn test_design_instances_follow_the_top_instance() {
    let (library, top) = soc();
    let output = build(&library, &top, "hier");
    let graph = &output.graph;

    let instances: Vec<_> = graph
        .components()
        .map(|(_, component)| component.instance_name.to_string())
        .collect();
    assert_eq!(instances, vec!["top", "cpu0", "ram0"]);

    let root = &graph[graph.find_component("top").unwrap()];
    assert_eq!(root.instance_uuid, "top");
    assert_eq!(root.active_view, "hier");
    assert_eq!(root.vlnv, vlnv("soc"));
    assert!(!output.has_warnings());
}

#[test]
fn test_interconnection_links_initiator_and_target() {
    let (library, top) = soc();
    let output = build(&library, &top, "hier");
    let graph = &output.graph;

    let m = interface(graph, "cpu0", "m");
    let s = interface(graph, "ram0", "s");
    assert_eq!(connection_names(graph), vec!["bus"]);
    assert_eq!(graph.find_path(m, s), Some(vec![m, s]));

    assert_eq!(graph[m].mode, InterfaceMode::Initiator);
    assert_eq!(graph[m].base_address_value(), Some(0x1000));

    // The register is reachable through the target's memory map.
    let map = graph[s].memory.unwrap();
    let forest = &graph[map.component].memory;
    let ctrl = forest
        .descendants(map.item)
        .into_iter()
        .find(|id| forest[*id].name == "ctrl")
        .unwrap();
    assert_eq!(forest[ctrl].address_value(), Some(0x10));
}

#[test]
fn test_hierarchical_view_marks_the_instance_interfaces() {
    let design = cpu_ram_design().with_interconnection(
        Interconnection::new("export", ActiveInterface::new("ram0", "s")).with_hierarchical("ext"),
    );
    let top = hierarchical("soc", &design.vlnv).with_bus_interface(BusInterface::target("ext"));
    let mut library = InMemoryLibrary::new();
    library.insert(cpu("cpu", "0")).unwrap();
    library.insert(ram("ram")).unwrap();
    library.insert(design).unwrap();

    let output = build(&library, &top, "hier");
    let graph = &output.graph;
    let ext = interface(graph, "top", "ext");
    let s = interface(graph, "ram0", "s");

    assert!(graph[ext].is_hierarchical);
    assert!(!graph[s].is_hierarchical);
    assert!(!graph[interface(graph, "cpu0", "m")].is_hierarchical);
    assert!(are_connected(graph, ext, s));
}

#[test]
fn test_flat_view_does_not_descend() {
    let (library, top) = soc();
    let top = top.with_view(View::new("rtl"));

    let output = build(&library, &top, "rtl");
    assert_eq!(output.graph.component_count(), 1);
    assert_eq!(output.graph.connection_count(), 0);
}

#[test]
fn test_implicit_single_view_is_recorded_by_name() {
    let (library, top) = soc();
    let output = build(&library, &top, "");
    let graph = &output.graph;

    let root = &graph[graph.find_component("top").unwrap()];
    assert_eq!(root.active_view, "hier");
    assert!(graph.find_component("cpu0").is_some());
}

#[test]
fn test_instance_overrides_reach_memory_expressions() {
    let mut ram_with_base = ram("ram").with_parameter(Parameter::new("BASE", "0"));
    if let Some(MemoryBlock::AddressBlock(block)) =
        ram_with_base.memory_maps[0].memory_blocks.first_mut()
    {
        block.base_address = "BASE".to_string();
    }

    let design = Design::new(vlnv("pair"))
        .with_instance(ComponentInstance::new("ram0", vlnv("ram")).with_uuid("a"))
        .with_instance(
            ComponentInstance::new("ram1", vlnv("ram"))
                .with_uuid("b")
                .with_override("BASE", "'h400"),
        );
    let top = hierarchical("pair_top", &design.vlnv);
    let mut library = InMemoryLibrary::new();
    library.insert(ram_with_base).unwrap();
    library.insert(design).unwrap();

    let output = build(&library, &top, "hier");
    let graph = &output.graph;
    let base_of = |uuid: &str, instance: &str| {
        memory_item(graph, &format!("{}.map.mem", prefix("ram", uuid, instance))).address_value()
    };
    assert_eq!(base_of("a", "ram0"), Some(0));
    assert_eq!(base_of("b", "ram1"), Some(0x400));
    // Registers follow their block.
    let ctrl = format!("{}.map.mem.ctrl", prefix("ram", "b", "ram1"));
    assert_eq!(memory_item(graph, &ctrl).address_value(), Some(0x410));
}

#[test]
fn test_design_instantiation_overrides_design_parameters() {
    let design = Design::new(vlnv("sized"))
        .with_parameter(Parameter::new("CPU_BASE", "'h10"))
        .with_instance(
            ComponentInstance::new("cpu0", vlnv("cpu"))
                .with_uuid("c")
                .with_override("OFFSET", "CPU_BASE * 2"),
        );
    let top = Component::new(vlnv("sized_top"))
        .with_view(View::new("hier").with_design_instantiation("di"))
        .with_design_instantiation(
            DesignInstantiation::new("di", design.vlnv.clone()).with_override("CPU_BASE", "'h100"),
        );
    let cpu = cpu("cpu", "OFFSET").with_parameter(Parameter::new("OFFSET", "0"));
    let mut library = InMemoryLibrary::new();
    library.insert(cpu).unwrap();
    library.insert(design).unwrap();

    let output = build(&library, &top, "hier");
    let graph = &output.graph;
    let m = interface(graph, "cpu0", "m");
    assert_eq!(graph[m].base_address_value(), Some(0x200));
}

// =============================================================================
// DESIGN CONFIGURATIONS AND NESTING
// =============================================================================

#[test]
fn test_design_configuration_selects_design_and_views() {
    let (library, top) = nested_soc();
    let output = build(&library, &top, "hier");
    let graph = &output.graph;

    let instances: Vec<_> = graph
        .components()
        .map(|(_, component)| component.instance_name.to_string())
        .collect();
    assert_eq!(instances, vec!["top", "cpu0", "sub0", "ram1"]);
    assert_eq!(graph[graph.find_component("sub0").unwrap()].active_view, "structure");
    assert!(!output.has_warnings(), "{:?}", output.warnings);

    let m = interface(graph, "cpu0", "m");
    let boundary = interface(graph, "sub0", "s");
    let s = interface(graph, "ram1", "s");
    assert!(graph[boundary].is_hierarchical);
    assert_eq!(graph.find_path(m, s), Some(vec![m, boundary, s]));
}

#[test]
fn test_design_instantiation_wins_over_configuration_design() {
    let (mut library, _) = soc();
    let other = Design::new(vlnv("other_design"))
        .with_instance(ComponentInstance::new("lonely", vlnv("ram")).with_uuid("x"));
    let configuration = DesignConfiguration::new(vlnv("cfg")).with_design(other.vlnv.clone());
    library.insert(other).unwrap();
    library.insert(configuration.clone()).unwrap();

    let top = Component::new(vlnv("soc"))
        .with_view(
            View::new("hier")
                .with_design_instantiation("di")
                .with_design_configuration_instantiation("dci"),
        )
        .with_design_instantiation(DesignInstantiation::new("di", vlnv("soc_design")))
        .with_design_configuration_instantiation(DesignConfigurationInstantiation::new(
            "dci",
            configuration.vlnv,
        ));

    let output = build(&library, &top, "hier");
    assert!(output.graph.find_component("cpu0").is_some());
    assert!(output.graph.find_component("lonely").is_none());
}

// =============================================================================
// HARD FAILURES
// =============================================================================

#[test]
fn test_recursive_hierarchy_is_an_error() {
    let design = Design::new(vlnv("loop_design"))
        .with_instance(ComponentInstance::new("again", vlnv("loop")).with_uuid("u"));
    let looping = hierarchical("loop", &design.vlnv);
    let mut library = InMemoryLibrary::new();
    library.insert(looping.clone()).unwrap();
    library.insert(design).unwrap();

    let err = try_build(&library, &looping, "hier").unwrap_err();
    assert_eq!(
        err,
        BuildError::CyclicHierarchy {
            chain: vec![vlnv("loop"), vlnv("loop")]
        }
    );
    assert_eq!(
        err.to_string(),
        "cyclic hierarchy: acme:ip:loop:1.0 -> acme:ip:loop:1.0"
    );
}

#[test]
fn test_depth_limit_is_enforced() {
    let (library, top) = soc();
    let options = BuildOptions {
        max_hierarchy_depth: Some(0),
        ..BuildOptions::default()
    };

    let err = try_build_with(&library, &top, "hier", options).unwrap_err();
    assert_eq!(err, BuildError::HierarchyTooDeep { depth: 1, limit: 0 });
}

#[test]
fn test_top_component_is_fetched_from_the_library() {
    let (mut library, top) = soc();
    library.insert(top).unwrap();
    let evaluator = SvEvaluator::new();
    let factory = GraphFactory::new(&library, &evaluator);

    let output = factory
        .create_connectivity_graph_for(&vlnv("soc"), "hier")
        .unwrap();
    assert_eq!(output.graph.component_count(), 3);

    let err = factory
        .create_connectivity_graph_for(&vlnv("absent"), "hier")
        .unwrap_err();
    assert_eq!(err, BuildError::MissingTopComponent(vlnv("absent")));
}
