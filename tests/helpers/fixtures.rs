//! Component, design and library fixtures shared by the integration tests.

use connectivity::model::{
    ActiveInterface, AddressBlock, AddressSpace, BusInterface, Component, ComponentInstance,
    Design, DesignConfiguration, DesignConfigurationInstantiation, DesignInstantiation, Field,
    FieldReset, Interconnection, MemoryMap, Register, View,
};
use connectivity::{
    BuildError, BuildOptions, BuildOutput, GraphFactory, InMemoryLibrary, SvEvaluator, Usage,
    Vlnv,
};

pub fn vlnv(name: &str) -> Vlnv {
    Vlnv::new("acme", "ip", name, "1.0")
}

/// Identifier prefix of an instance of the fixture component `name`.
pub fn prefix(name: &str, uuid: &str, instance: &str) -> String {
    format!("acme.ip.{name}.1.0.{uuid}.{instance}")
}

// =============================================================================
// LEAF COMPONENTS
// =============================================================================

/// Initiator `m` over the 64 KiB address space `as`.
pub fn cpu(name: &str, base_address: &str) -> Component {
    Component::new(vlnv(name))
        .with_address_space(AddressSpace::new("as", "65536", "32"))
        .with_bus_interface(
            BusInterface::initiator("m")
                .with_address_space("as")
                .with_base_address(base_address),
        )
}

/// Target `s` over memory map `map`: one 0x100 unit memory block `mem`
/// holding the 32-bit register `ctrl` at offset 0x10, whose field `mode`
/// covers bits [7:0] with reset 'b1010 under mask 'b1111.
pub fn ram(name: &str) -> Component {
    let ctrl = Register::new("ctrl", "'h10", "32").with_field(
        Field::new("mode", "0", "8").with_reset(FieldReset::new("'b1010").with_mask("'b1111")),
    );
    Component::new(vlnv(name))
        .with_memory_map(
            MemoryMap::new("map").with_address_block(
                AddressBlock::new("mem", "0", "'h100", "32")
                    .with_usage(Usage::Memory)
                    .with_register(ctrl),
            ),
        )
        .with_bus_interface(BusInterface::target("s").with_memory_map("map"))
}

/// Transparent bridge: target `s` forwards to initiator `m`, which sees the
/// address space `as` at `base_address`.
pub fn bridge(name: &str, base_address: &str) -> Component {
    Component::new(vlnv(name))
        .with_address_space(AddressSpace::new("as", "65536", "32"))
        .with_bus_interface(BusInterface::target("s").with_bridge("m"))
        .with_bus_interface(
            BusInterface::initiator("m")
                .with_address_space("as")
                .with_base_address(base_address),
        )
}

// =============================================================================
// HIERARCHY
// =============================================================================

/// A component whose only view `hier` instantiates `design`.
pub fn hierarchical(name: &str, design: &Vlnv) -> Component {
    Component::new(vlnv(name))
        .with_view(View::new("hier").with_design_instantiation("di"))
        .with_design_instantiation(DesignInstantiation::new("di", design.clone()))
}

/// `cpu0.m` connected to `ram0.s` through the interconnection `bus`.
pub fn cpu_ram_design() -> Design {
    Design::new(vlnv("soc_design"))
        .with_instance(ComponentInstance::new("cpu0", vlnv("cpu")).with_uuid("u-cpu0"))
        .with_instance(ComponentInstance::new("ram0", vlnv("ram")).with_uuid("u-ram0"))
        .with_interconnection(
            Interconnection::new("bus", ActiveInterface::new("cpu0", "m")).with_active("ram0", "s"),
        )
}

/// Library holding `cpu` (base 'h1000), `ram` and the `cpu_ram_design`,
/// together with the top component `soc` instantiating that design.
pub fn soc() -> (InMemoryLibrary, Component) {
    let design = cpu_ram_design();
    let top = hierarchical("soc", &design.vlnv);

    let mut library = InMemoryLibrary::new();
    library.insert(cpu("cpu", "'h1000")).unwrap();
    library.insert(ram("ram")).unwrap();
    library.insert(design).unwrap();
    (library, top)
}

/// top (soc) -> cpu0, sub0 (hierarchical through a design configuration)
/// sub0 (subsystem) -> ram1, whose target is exported as sub0.s
pub fn nested_soc() -> (InMemoryLibrary, Component) {
    let inner = Design::new(vlnv("inner_design"))
        .with_instance(ComponentInstance::new("ram1", vlnv("ram")).with_uuid("u-ram1"))
        .with_interconnection(
            Interconnection::new("export", ActiveInterface::new("ram1", "s"))
                .with_hierarchical("s"),
        );
    let inner_configuration =
        DesignConfiguration::new(vlnv("inner_cfg")).with_design(inner.vlnv.clone());
    let subsystem = Component::new(vlnv("subsystem"))
        .with_bus_interface(BusInterface::target("s"))
        .with_view(View::new("rtl"))
        .with_view(View::new("structure").with_design_configuration_instantiation("dci"))
        .with_design_configuration_instantiation(DesignConfigurationInstantiation::new(
            "dci",
            inner_configuration.vlnv.clone(),
        ));

    let outer = Design::new(vlnv("outer_design"))
        .with_instance(ComponentInstance::new("cpu0", vlnv("cpu")).with_uuid("u-cpu0"))
        .with_instance(ComponentInstance::new("sub0", vlnv("subsystem")).with_uuid("u-sub0"))
        .with_interconnection(
            Interconnection::new("bus", ActiveInterface::new("cpu0", "m")).with_active("sub0", "s"),
        );
    let outer_configuration = DesignConfiguration::new(vlnv("outer_cfg"))
        .with_design(outer.vlnv.clone())
        .with_active_view("sub0", "structure");
    let top = Component::new(vlnv("soc"))
        .with_view(View::new("hier").with_design_configuration_instantiation("dci"))
        .with_design_configuration_instantiation(DesignConfigurationInstantiation::new(
            "dci",
            outer_configuration.vlnv.clone(),
        ));

    let mut library = InMemoryLibrary::new();
    library.insert(cpu("cpu", "0")).unwrap();
    library.insert(ram("ram")).unwrap();
    library.insert(subsystem).unwrap();
    library.insert(inner).unwrap();
    library.insert(inner_configuration).unwrap();
    library.insert(outer).unwrap();
    library.insert(outer_configuration).unwrap();
    (library, top)
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

pub fn try_build_with(
    library: &InMemoryLibrary,
    top: &Component,
    view: &str,
    options: BuildOptions,
) -> Result<BuildOutput, BuildError> {
    let evaluator = SvEvaluator::new();
    GraphFactory::new(library, &evaluator)
        .with_options(options)
        .create_connectivity_graph(top, view)
}

pub fn try_build(
    library: &InMemoryLibrary,
    top: &Component,
    view: &str,
) -> Result<BuildOutput, BuildError> {
    try_build_with(library, top, view, BuildOptions::default())
}

/// Build and fail the test on a hard error.
pub fn build(library: &InMemoryLibrary, top: &Component, view: &str) -> BuildOutput {
    match try_build(library, top, view) {
        Ok(output) => output,
        Err(err) => panic!("graph construction failed: {err}"),
    }
}

/// Build a single component as the top instance, with an empty library.
pub fn build_flat(top: &Component) -> BuildOutput {
    build(&InMemoryLibrary::new(), top, "")
}
