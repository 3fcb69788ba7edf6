//! Routing inside one instance: channels, bridges and local memory maps.

use connectivity::model::{
    AddressBlock, AddressSpace, BusInterface, Channel, Component, InterfaceRole, LocalMemoryMap,
};
use connectivity::{BuildOptions, BuildWarning, InMemoryLibrary, InterfaceMode, MemoryItemKind};

use crate::helpers::fixtures::*;
use crate::helpers::graph_assertions::*;

fn undefined(name: &str) -> BusInterface {
    BusInterface::new(name, InterfaceRole::Undefined)
}

// =============================================================================
// CHANNELS
// =============================================================================

#[test]
fn test_channel_connects_every_pair_of_members() {
    let component = Component::new(vlnv("interconnect"))
        .with_bus_interface(BusInterface::mirrored_target("x"))
        .with_bus_interface(BusInterface::mirrored_target("y"))
        .with_bus_interface(undefined("z"))
        .with_bus_interface(undefined("outsider"))
        .with_channel(Channel::new("ch", ["x", "y", "z"]));

    let output = build_flat(&component);
    let graph = &output.graph;
    let [x, y, z, outsider] =
        ["x", "y", "z", "outsider"].map(|name| interface(graph, "top", name));

    assert!(graph[graph.find_component("top").unwrap()].is_channeled);
    assert_eq!(connection_names(graph), vec!["ch", "ch", "ch"]);
    for (a, b) in [(x, y), (x, z), (y, z)] {
        assert!(are_connected(graph, a, b));
    }
    for member in [x, y, z] {
        assert!(!are_connected(graph, member, outsider));
    }
    assert!(graph.connections_of(outsider).is_empty());
}

#[test]
fn test_channel_skips_missing_members() {
    let component = Component::new(vlnv("interconnect"))
        .with_bus_interface(undefined("x"))
        .with_bus_interface(undefined("y"))
        .with_channel(Channel::new("ch", ["x", "ghost", "y"]));

    let output = build_flat(&component);
    assert_eq!(output.graph.connection_count(), 1);
    assert_eq!(
        output.warnings,
        vec![BuildWarning::UnresolvedChannelInterface {
            instance: "top".into(),
            channel: "ch".into(),
            interface: "ghost".into(),
        }]
    );
}

#[test]
fn test_components_without_channels_are_not_channeled() {
    let output = build_flat(&ram("ram"));
    let graph = &output.graph;
    assert!(!graph[graph.find_component("top").unwrap()].is_channeled);
}

// =============================================================================
// BRIDGES
// =============================================================================

#[test]
fn test_bridge_connects_target_to_initiator() {
    let output = build_flat(&bridge("bridge", "'h2000"));
    let graph = &output.graph;
    let s = interface(graph, "top", "s");
    let m = interface(graph, "top", "m");

    assert!(graph[s].is_bridged);
    assert!(graph[m].is_bridged);
    assert_eq!(connection_names(graph), vec!["s_bridge_to_m"]);
    assert!(are_connected(graph, s, m));
}

#[test]
fn test_bridge_to_missing_initiator_is_reported() {
    let component = Component::new(vlnv("bridge"))
        .with_bus_interface(BusInterface::target("s").with_bridge("m"));

    let output = build_flat(&component);
    let graph = &output.graph;
    assert!(graph[interface(graph, "top", "s")].is_bridged);
    assert_eq!(graph.connection_count(), 0);
    assert_eq!(
        output.warnings,
        vec![BuildWarning::UnresolvedBridgeInterface {
            instance: "top".into(),
            target: "s".into(),
            interface: "m".into(),
        }]
    );
}

// =============================================================================
// LOCAL MEMORY MAPS
// =============================================================================

fn cpu_with_local_map(with_interface: bool) -> Component {
    let space = AddressSpace::new("as", "'h10000", "32").with_local_memory_map(
        LocalMemoryMap::new("local")
            .with_address_block(AddressBlock::new("tcm", "0", "'h400", "32")),
    );
    let component = Component::new(vlnv("cpu")).with_address_space(space);
    if with_interface {
        component.with_bus_interface(BusInterface::initiator("m").with_address_space("as"))
    } else {
        component
    }
}

#[test]
fn test_local_map_loops_on_the_interface_using_the_space() {
    let output = build_flat(&cpu_with_local_map(true));
    let graph = &output.graph;
    let m = interface(graph, "top", "m");

    assert_eq!(graph.interface_count(), 1);
    assert_eq!(connection_names(graph), vec!["as_to_local_memory_map_local"]);
    let loops: Vec<_> = graph.connections_of(m).iter().map(|id| &graph[*id]).collect();
    assert_eq!(loops.len(), 1);
    assert!(loops[0].is_self_loop());
}

#[test]
fn test_local_map_synthesizes_an_interface_when_none_uses_the_space() {
    let output = build_flat(&cpu_with_local_map(false));
    let graph = &output.graph;
    let local = interface(graph, "top", "as interface");

    assert!(graph[local].is_synthesized);
    assert_eq!(graph[local].mode, InterfaceMode::Undefined);
    assert_eq!(
        graph.interface_memory(local).map(|item| item.kind),
        Some(MemoryItemKind::AddressSpace)
    );
    assert_eq!(graph.neighbors(local).collect::<Vec<_>>(), vec![local]);
}

#[test]
fn test_local_interface_synthesis_can_be_disabled() {
    let options = BuildOptions {
        synthesize_local_interfaces: false,
        ..BuildOptions::default()
    };
    let output = try_build_with(
        &InMemoryLibrary::new(),
        &cpu_with_local_map(false),
        "",
        options,
    )
    .unwrap();

    assert_eq!(output.graph.interface_count(), 0);
    assert_eq!(output.graph.connection_count(), 0);
}
