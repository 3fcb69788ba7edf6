//! Domain constants.

/// Reset type assumed when a field reset does not name one.
pub const HARD_RESET_TYPE: &str = "HARD";

/// Instance name given to the implicit root instance.
pub const TOP_INSTANCE_NAME: &str = "top";

/// Instance identifier given to the implicit root instance.
pub const TOP_INSTANCE_UUID: &str = "top";

/// Addressable unit bits used when a memory map leaves them unresolved or zero.
pub const DEFAULT_ADDRESS_UNIT_BITS: u64 = 8;

/// Suffix of the interface synthesized for an address space's local memory map.
pub const LOCAL_INTERFACE_SUFFIX: &str = " interface";

/// Infix of the connection linking an address space to its local memory map.
pub const LOCAL_MAP_CONNECTION_INFIX: &str = "_to_local_memory_map_";

/// Infix of the connection created for a transparent bridge.
pub const BRIDGE_CONNECTION_INFIX: &str = "_bridge_to_";
