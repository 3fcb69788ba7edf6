//! Address windows of built routes, as seen by their initiator.

use connectivity::model::{
    ActiveInterface, AddressBlock, AddressSpace, BusInterface, Channel, Component,
    ComponentInstance, Design, Interconnection, InterfaceRole, LocalMemoryMap, MemoryMap,
};
use connectivity::search::{find_initiator_target_paths, translate_path};
use connectivity::{ConnectivityGraph, InMemoryLibrary, InterfaceId};

use super::tests_paths::bridged_soc;
use crate::helpers::fixtures::*;
use crate::helpers::graph_assertions::*;

fn route(graph: &ConnectivityGraph, steps: &[(&str, &str)]) -> Vec<InterfaceId> {
    steps
        .iter()
        .map(|(instance, name)| interface(graph, instance, name))
        .collect()
}

#[test]
fn test_target_block_is_offset_by_the_initiator_base() {
    let design = Design::new(vlnv("pair"))
        .with_instance(ComponentInstance::new("a", vlnv("cpu")).with_uuid("u-a"))
        .with_instance(ComponentInstance::new("b", vlnv("dev")).with_uuid("u-b"))
        .with_interconnection(
            Interconnection::new("bus", ActiveInterface::new("a", "m")).with_active("b", "s"),
        );
    let device = Component::new(vlnv("dev"))
        .with_memory_map(
            MemoryMap::new("M")
                .with_address_block(AddressBlock::new("blk", "'h100", "'h100", "32")),
        )
        .with_bus_interface(BusInterface::target("s").with_memory_map("M"));
    let mut library = InMemoryLibrary::new();
    library.insert(cpu("cpu", "'h2000")).unwrap();
    library.insert(device).unwrap();
    library.insert(design.clone()).unwrap();

    let output = build(&library, &hierarchical("top", &design.vlnv), "hier");
    let graph = &output.graph;
    let path = route(graph, &[("a", "m"), ("b", "s")]);

    let translation = translate_path(graph, &path).unwrap();
    assert_eq!(translation.hops.len(), 1);
    assert_eq!(translation.base_address(), Some(0x2100));
    assert_eq!(translation.last_address(), Some(0x21FF));
    assert_eq!(translation.range(), Some(0x100));
}

#[test]
fn test_bridge_initiator_adds_its_base_address() {
    let graph = bridged_soc();
    let path = route(
        &graph,
        &[("cpu0", "m"), ("br0", "s"), ("br0", "m"), ("ram0", "s")],
    );

    let translation = translate_path(&graph, &path).unwrap();
    let windows: Vec<_> = translation
        .hops
        .iter()
        .map(|hop| (hop.base_address, hop.last_address))
        .collect();
    // The bridge's own address space, then the memory behind it.
    assert_eq!(windows, vec![(0x1000, 0x10FFF), (0x3000, 0x30FF)]);
    assert_eq!(translation.hops[1].interface, path[3]);
}

#[test]
fn test_mirrored_target_remaps_the_next_memory() {
    let interconnect = Component::new(vlnv("ic"))
        .with_bus_interface(BusInterface::new("mi", InterfaceRole::MirroredInitiator))
        .with_bus_interface(BusInterface::mirrored_target("mt").with_remap("'h4000", "'h100"))
        .with_channel(Channel::new("ch", ["mi", "mt"]));
    let design = Design::new(vlnv("remapped"))
        .with_instance(ComponentInstance::new("cpu0", vlnv("cpu")).with_uuid("u-cpu0"))
        .with_instance(ComponentInstance::new("ic0", vlnv("ic")).with_uuid("u-ic0"))
        .with_instance(ComponentInstance::new("ram0", vlnv("ram")).with_uuid("u-ram0"))
        .with_interconnection(
            Interconnection::new("cpu_side", ActiveInterface::new("cpu0", "m"))
                .with_active("ic0", "mi"),
        )
        .with_interconnection(
            Interconnection::new("ram_side", ActiveInterface::new("ic0", "mt"))
                .with_active("ram0", "s"),
        );
    let mut library = InMemoryLibrary::new();
    library.insert(cpu("cpu", "'h1000")).unwrap();
    library.insert(interconnect).unwrap();
    library.insert(ram("ram")).unwrap();
    library.insert(design.clone()).unwrap();

    let output = build(&library, &hierarchical("soc", &design.vlnv), "hier");
    let graph = &output.graph;
    let routes = find_initiator_target_paths(graph);
    assert_eq!(routes.len(), 1);
    assert_eq!(
        labels(graph, &routes[0]),
        ["cpu0.m", "ic0.mi", "ic0.mt", "ram0.s"]
    );

    let translation = translate_path(graph, &routes[0]).unwrap();
    assert_eq!(translation.base_address(), Some(0x5000));
    assert_eq!(translation.last_address(), Some(0x50FF));
}

#[test]
fn test_local_route_covers_the_local_memory_map() {
    let space = AddressSpace::new("as", "'h10000", "32").with_local_memory_map(
        LocalMemoryMap::new("local")
            .with_address_block(AddressBlock::new("tcm", "0", "'h400", "32")),
    );
    let component = Component::new(vlnv("cpu"))
        .with_address_space(space)
        .with_bus_interface(
            BusInterface::initiator("m")
                .with_address_space("as")
                .with_base_address("'h100"),
        );

    let output = build_flat(&component);
    let graph = &output.graph;
    let m = interface(graph, "top", "m");
    assert_eq!(find_initiator_target_paths(graph), vec![vec![m, m]]);

    let translation = translate_path(graph, &[m, m]).unwrap();
    assert_eq!(translation.hops.len(), 1);
    assert_eq!(translation.base_address(), Some(0x100));
    assert_eq!(translation.last_address(), Some(0x4FF));
    let local = graph.memory_item(translation.hops[0].memory).unwrap();
    assert_eq!(local.name, "local");
}

#[test]
fn test_route_without_initiator_has_no_window() {
    let graph = bridged_soc();
    let path = route(&graph, &[("ram0", "s")]);
    assert!(translate_path(&graph, &path).is_none());
}
