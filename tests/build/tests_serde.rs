//! Models loaded from JSON build the same graph as models built in code.

#![cfg(feature = "serde")]

use connectivity::model::{Component, Design};
use connectivity::InMemoryLibrary;

use crate::helpers::fixtures::*;
use crate::helpers::graph_assertions::*;

fn reload<T>(value: &T) -> T
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    let json = serde_json::to_string(value).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_component_survives_json() {
    let component = ram("ram");
    let reloaded: Component = reload(&component);
    assert_eq!(reloaded, component);

    let from_code = build_flat(&component);
    let from_json = build_flat(&reloaded);
    assert_eq!(
        all_identifiers(&from_json.graph),
        all_identifiers(&from_code.graph)
    );
}

#[test]
fn test_library_loaded_from_json_builds_the_hierarchy() {
    let design: Design = reload(&cpu_ram_design());
    let top: Component = reload(&hierarchical("soc", &design.vlnv));
    let mut library = InMemoryLibrary::new();
    library.insert(reload(&cpu("cpu", "'h1000"))).unwrap();
    library.insert(reload(&ram("ram"))).unwrap();
    library.insert(design).unwrap();

    let output = build(&library, &top, "hier");
    let graph = &output.graph;
    assert_eq!(connection_names(graph), vec!["bus"]);
    assert!(are_connected(
        graph,
        interface(graph, "cpu0", "m"),
        interface(graph, "ram0", "s")
    ));
}
