//! Memory description types: address spaces, memory maps and their contents.

use crate::base::Usage;

// ============================================================================
// ADDRESS SPACES
// ============================================================================

/// A segment of an address space.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub name: String,
    pub display_name: Option<String>,
    pub address_offset: String,
    pub range: String,
    pub is_present: Option<String>,
}

impl Segment {
    pub fn new(
        name: impl Into<String>,
        address_offset: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address_offset: address_offset.into(),
            range: range.into(),
            ..Self::default()
        }
    }

    pub fn with_presence(mut self, expression: impl Into<String>) -> Self {
        self.is_present = Some(expression.into());
        self
    }
}

/// An addressable region of a component, seen by its initiators.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressSpace {
    pub name: String,
    pub display_name: Option<String>,
    pub range: Option<String>,
    pub width: Option<String>,
    pub address_unit_bits: Option<String>,
    pub segments: Vec<Segment>,
    pub local_memory_map: Option<LocalMemoryMap>,
    pub is_present: Option<String>,
}

impl AddressSpace {
    pub fn new(
        name: impl Into<String>,
        range: impl Into<String>,
        width: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            range: Some(range.into()),
            width: Some(width.into()),
            ..Self::default()
        }
    }

    pub fn with_address_unit_bits(mut self, bits: impl Into<String>) -> Self {
        self.address_unit_bits = Some(bits.into());
        self
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn with_local_memory_map(mut self, map: LocalMemoryMap) -> Self {
        self.local_memory_map = Some(map);
        self
    }

    pub fn with_presence(mut self, expression: impl Into<String>) -> Self {
        self.is_present = Some(expression.into());
        self
    }
}

/// A memory map owned by an address space.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalMemoryMap {
    pub name: String,
    pub display_name: Option<String>,
    pub memory_blocks: Vec<MemoryBlock>,
}

impl LocalMemoryMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_address_block(mut self, block: AddressBlock) -> Self {
        self.memory_blocks.push(MemoryBlock::AddressBlock(block));
        self
    }
}

// ============================================================================
// MEMORY MAPS
// ============================================================================

/// A memory map exposed by a component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryMap {
    pub name: String,
    pub display_name: Option<String>,
    pub address_unit_bits: Option<String>,
    pub memory_blocks: Vec<MemoryBlock>,
    pub memory_remaps: Vec<MemoryRemap>,
    pub is_present: Option<String>,
}

impl MemoryMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_address_unit_bits(mut self, bits: impl Into<String>) -> Self {
        self.address_unit_bits = Some(bits.into());
        self
    }

    pub fn with_address_block(mut self, block: AddressBlock) -> Self {
        self.memory_blocks.push(MemoryBlock::AddressBlock(block));
        self
    }

    pub fn with_memory_block(mut self, block: MemoryBlock) -> Self {
        self.memory_blocks.push(block);
        self
    }

    pub fn with_remap(mut self, remap: MemoryRemap) -> Self {
        self.memory_remaps.push(remap);
        self
    }

    pub fn with_presence(mut self, expression: impl Into<String>) -> Self {
        self.is_present = Some(expression.into());
        self
    }
}

/// An alternate view of a memory map, selected by a mode condition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryRemap {
    pub name: String,
    pub display_name: Option<String>,
    pub memory_blocks: Vec<MemoryBlock>,
    pub is_present: Option<String>,
}

impl MemoryRemap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_address_block(mut self, block: AddressBlock) -> Self {
        self.memory_blocks.push(MemoryBlock::AddressBlock(block));
        self
    }
}

/// Content of a memory map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryBlock {
    AddressBlock(AddressBlock),
    /// Maps an initiator's address space into the memory map. Not expanded
    /// into memory items.
    SubspaceMap(SubspaceMap),
}

impl MemoryBlock {
    pub fn name(&self) -> &str {
        match self {
            Self::AddressBlock(block) => &block.name,
            Self::SubspaceMap(map) => &map.name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubspaceMap {
    pub name: String,
    pub initiator_ref: String,
    pub base_address: String,
    pub is_present: Option<String>,
}

/// A contiguous range of a memory map containing registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressBlock {
    pub name: String,
    pub display_name: Option<String>,
    pub base_address: String,
    pub range: String,
    pub width: String,
    pub usage: Option<Usage>,
    pub register_data: Vec<RegisterBase>,
    pub is_present: Option<String>,
}

impl AddressBlock {
    pub fn new(
        name: impl Into<String>,
        base_address: impl Into<String>,
        range: impl Into<String>,
        width: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_address: base_address.into(),
            range: range.into(),
            width: width.into(),
            ..Self::default()
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_register(mut self, register: Register) -> Self {
        self.register_data.push(RegisterBase::Register(register));
        self
    }

    pub fn with_register_file(mut self, file: RegisterFile) -> Self {
        self.register_data.push(RegisterBase::RegisterFile(file));
        self
    }

    pub fn with_presence(mut self, expression: impl Into<String>) -> Self {
        self.is_present = Some(expression.into());
        self
    }
}

// ============================================================================
// REGISTERS
// ============================================================================

/// Register data of an address block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterBase {
    Register(Register),
    RegisterFile(RegisterFile),
}

impl RegisterBase {
    pub fn name(&self) -> &str {
        match self {
            Self::Register(register) => &register.name,
            Self::RegisterFile(file) => &file.name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Register {
    pub name: String,
    pub display_name: Option<String>,
    pub address_offset: String,
    pub size: String,
    /// Number of identical registers laid out back to back.
    pub dimension: Option<String>,
    pub fields: Vec<Field>,
    pub is_present: Option<String>,
}

impl Register {
    pub fn new(
        name: impl Into<String>,
        address_offset: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address_offset: address_offset.into(),
            size: size.into(),
            ..Self::default()
        }
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = Some(dimension.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_presence(mut self, expression: impl Into<String>) -> Self {
        self.is_present = Some(expression.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegisterFile {
    pub name: String,
    pub address_offset: String,
    pub range: String,
    pub register_data: Vec<RegisterBase>,
    pub is_present: Option<String>,
}

impl RegisterFile {
    pub fn new(
        name: impl Into<String>,
        address_offset: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address_offset: address_offset.into(),
            range: range.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// FIELDS
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    pub display_name: Option<String>,
    pub bit_offset: String,
    pub bit_width: String,
    pub enumerated_values: Vec<EnumeratedValue>,
    pub resets: Vec<FieldReset>,
    pub is_present: Option<String>,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        bit_offset: impl Into<String>,
        bit_width: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            bit_offset: bit_offset.into(),
            bit_width: bit_width.into(),
            ..Self::default()
        }
    }

    pub fn with_reset(mut self, reset: FieldReset) -> Self {
        self.resets.push(reset);
        self
    }

    pub fn with_enumerated_value(mut self, value: EnumeratedValue) -> Self {
        self.enumerated_values.push(value);
        self
    }

    pub fn with_presence(mut self, expression: impl Into<String>) -> Self {
        self.is_present = Some(expression.into());
        self
    }
}

/// Reset value of a field for one reset type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldReset {
    /// `None` means the hard reset.
    pub reset_type_ref: Option<String>,
    pub value: String,
    /// `None` means every bit of the field is reset.
    pub mask: Option<String>,
}

impl FieldReset {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    pub fn with_reset_type(mut self, reset_type: impl Into<String>) -> Self {
        self.reset_type_ref = Some(reset_type.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumeratedValue {
    pub name: String,
    pub display_name: Option<String>,
    pub value: String,
}

impl EnumeratedValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }
}
