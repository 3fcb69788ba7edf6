//! Read-only input descriptions.
//!
//! These are the already-parsed component, design and design configuration
//! documents the graph factory consumes. Every numeric attribute is kept as
//! the symbolic expression text it was written with; resolution happens in
//! the builders through an [`ExpressionEvaluator`](crate::expr::ExpressionEvaluator).
//!
//! ```text
//! Component
//! ├── bus_interfaces ── role (initiator | target | mirrored target | ...)
//! ├── channels
//! ├── address_spaces ── segments, local memory map
//! ├── memory_maps ───── memory blocks, remaps
//! │                      └── address block ── registers ── fields ── resets, enumerated values
//! ├── views ─────────── design / design configuration instantiation references
//! └── design (configuration) instantiations ── VLNV references
//! ```
//!
//! Constructors and `with_*` methods exist to keep hand-written fixtures short.

mod component;
mod design;
mod memory;

pub use component::{
    BusInterface, Channel, Component, ConfigurableElementValue, DesignConfigurationInstantiation,
    DesignInstantiation, InterfaceRole, Parameter, RemapAddress, TransparentBridge, View,
};
pub use design::{
    ActiveInterface, ComponentInstance, Design, DesignConfiguration, HierInterface,
    Interconnection, ViewConfiguration,
};
pub use memory::{
    AddressBlock, AddressSpace, EnumeratedValue, Field, FieldReset, LocalMemoryMap, MemoryBlock,
    MemoryMap, MemoryRemap, Register, RegisterBase, RegisterFile, Segment, SubspaceMap,
};

/// Elements that carry an optional presence expression.
///
/// An absent or empty expression means the element is present.
pub trait Presence {
    fn presence(&self) -> Option<&str>;
}

macro_rules! impl_presence {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Presence for $ty {
                fn presence(&self) -> Option<&str> {
                    self.is_present.as_deref()
                }
            }
        )*
    };
}

impl_presence!(
    AddressSpace,
    Segment,
    MemoryMap,
    MemoryRemap,
    AddressBlock,
    SubspaceMap,
    Register,
    RegisterFile,
    Field,
);

impl Presence for MemoryBlock {
    fn presence(&self) -> Option<&str> {
        match self {
            MemoryBlock::AddressBlock(block) => block.presence(),
            MemoryBlock::SubspaceMap(map) => map.presence(),
        }
    }
}

impl Presence for RegisterBase {
    fn presence(&self) -> Option<&str> {
        match self {
            RegisterBase::Register(register) => register.presence(),
            RegisterBase::RegisterFile(file) => file.presence(),
        }
    }
}
