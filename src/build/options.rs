use crate::base::constants::DEFAULT_ADDRESS_UNIT_BITS;

/// Options controlling graph construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Addressable unit bits used when a memory map or address space leaves
    /// them unresolved or zero.
    pub default_address_unit_bits: u64,
    /// Deepest hierarchy level to descend into. `None` means unbounded.
    pub max_hierarchy_depth: Option<usize>,
    /// Create an interface for an address space's local memory map when no
    /// bus interface references the address space.
    pub synthesize_local_interfaces: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_address_unit_bits: DEFAULT_ADDRESS_UNIT_BITS,
            max_hierarchy_depth: Some(64),
            synthesize_local_interfaces: true,
        }
    }
}

impl BuildOptions {
    /// Resolve addressable unit bits, falling back to the default for
    /// missing or zero values.
    pub fn address_unit_bits(&self, resolved: Option<u64>) -> u64 {
        match resolved {
            Some(bits) if bits > 0 => bits,
            _ => self.default_address_unit_bits.max(1),
        }
    }

    /// Whether `depth` is beyond the configured limit.
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.max_hierarchy_depth.is_some_and(|limit| depth > limit)
    }
}
