//! Memory forest construction.
//!
//! Identifiers are dotted paths below the instance prefix
//! `vendor.library.name.version.uuid.instance`:
//!
//! ```text
//! <prefix>.<space>                         address space
//! <prefix>.<space>.<segment>               segment
//! <prefix>.<space>.<local map>             local memory map
//! <prefix>.<map>                           memory map
//! <prefix>.<map>.<remap>                   memory remap
//! <map or remap>.<block>                   address block
//! <block>.<register>[<index>]              register (index only for arrays)
//! <register>.<field>                       field
//! <field>.<enumerated value>               enumerated value
//! <field>.<reset type>                     field reset
//! <register>.HARD                          register hard reset
//! ```

use smol_str::SmolStr;
use tracing::trace;

use super::{BuildWarning, Builder};
use crate::base::constants::HARD_RESET_TYPE;
use crate::base::{Usage, parse_u64, right_justify, to_binary};
use crate::graph::{MemoryForest, MemoryItem, MemoryItemId, MemoryItemKind};
use crate::model::{
    AddressBlock, AddressSpace, Component, Field, MemoryBlock, MemoryMap, Register, RegisterBase,
};

/// Placement of one field inside its register, used for reset aggregation.
struct FieldLayout {
    /// Bit offset from the register's least significant bit.
    start: u64,
    width: u64,
    /// Binary hard reset value and mask.
    hard_reset: Option<(SmolStr, SmolStr)>,
}

fn display_name(name: &Option<String>) -> Option<SmolStr> {
    name.as_deref().map(SmolStr::new)
}

impl Builder<'_> {
    /// Build the memory forest of one instance: address spaces first, then
    /// memory maps, in declaration order.
    pub(super) fn build_memory(&mut self, component: &Component, prefix: &str) -> MemoryForest {
        let mut forest = MemoryForest::new();
        for space in &component.address_spaces {
            if self.is_present(space) {
                self.add_address_space(&mut forest, space, prefix);
            } else {
                trace!("[MEMORY] address space '{}' not present", space.name);
            }
        }
        for map in &component.memory_maps {
            if self.is_present(map) {
                self.add_memory_map(&mut forest, map, prefix);
            } else {
                trace!("[MEMORY] memory map '{}' not present", map.name);
            }
        }
        forest
    }

    // ========================================================================
    // ADDRESS SPACES
    // ========================================================================

    fn add_address_space(&mut self, forest: &mut MemoryForest, space: &AddressSpace, prefix: &str) {
        let identifier = self.allocate_identifier(format!("{prefix}.{}", space.name));
        trace!("[MEMORY] address space {}", identifier);

        let address_unit_bits = self.eval_opt(space.address_unit_bits.as_deref());
        let mut item = MemoryItem::new(
            space.name.as_str(),
            MemoryItemKind::AddressSpace,
            identifier.clone(),
        );
        item.display_name = display_name(&space.display_name);
        item.address_unit_bits = address_unit_bits.clone();
        item.address = Some(SmolStr::new_static("0"));
        item.range = self.eval_opt(space.range.as_deref());
        item.width = self.eval_opt(space.width.as_deref());
        item.is_present = Some(SmolStr::new_static("1"));
        let space_id = forest.add_root(item);

        for segment in &space.segments {
            if !self.is_present(segment) {
                trace!("[MEMORY] segment '{}' not present", segment.name);
                continue;
            }
            let segment_identifier =
                self.allocate_identifier(format!("{identifier}.{}", segment.name));
            let mut item = MemoryItem::new(
                segment.name.as_str(),
                MemoryItemKind::Segment,
                segment_identifier,
            );
            item.display_name = display_name(&segment.display_name);
            item.address_unit_bits = address_unit_bits.clone();
            item.offset = Some(self.eval(&segment.address_offset));
            item.range = Some(self.eval(&segment.range));
            item.is_present = Some(SmolStr::new_static("1"));
            forest.add_child(space_id, item);
        }

        if let Some(local) = &space.local_memory_map {
            let aub = self
                .options
                .address_unit_bits(address_unit_bits.as_deref().and_then(parse_u64));
            self.add_map(
                forest,
                Some(space_id),
                MapSource {
                    name: &local.name,
                    display_name: local.display_name.as_deref(),
                    blocks: &local.memory_blocks,
                },
                format!("{identifier}.{}", local.name),
                aub,
            );
        }
    }

    // ========================================================================
    // MEMORY MAPS
    // ========================================================================

    fn add_memory_map(&mut self, forest: &mut MemoryForest, map: &MemoryMap, prefix: &str) {
        let resolved = map
            .address_unit_bits
            .as_deref()
            .and_then(|bits| self.eval_u64(bits));
        let aub = self.options.address_unit_bits(resolved);

        let map_id = self.add_map(
            forest,
            None,
            MapSource {
                name: &map.name,
                display_name: map.display_name.as_deref(),
                blocks: &map.memory_blocks,
            },
            format!("{prefix}.{}", map.name),
            aub,
        );
        let map_identifier = forest[map_id].identifier.clone();

        for remap in &map.memory_remaps {
            if !self.is_present(remap) {
                trace!("[MEMORY] remap '{}' not present", remap.name);
                continue;
            }
            let identifier = self.allocate_identifier(format!("{map_identifier}.{}", remap.name));
            trace!("[MEMORY] remap {}", identifier);

            let mut item = MemoryItem::new(
                remap.name.as_str(),
                MemoryItemKind::MemoryRemap,
                identifier.clone(),
            );
            item.display_name = display_name(&remap.display_name);
            item.address_unit_bits = Some(SmolStr::new(aub.to_string()));
            item.is_present = Some(SmolStr::new_static("1"));
            let remap_id = forest.add_child(map_id, item);

            self.add_memory_blocks(forest, remap_id, &remap.memory_blocks, &identifier, aub);
        }
    }

    /// Add a memory map item (top-level or local) with its address blocks.
    fn add_map(
        &mut self,
        forest: &mut MemoryForest,
        parent: Option<MemoryItemId>,
        source: MapSource<'_>,
        identifier: String,
        aub: u64,
    ) -> MemoryItemId {
        let identifier = self.allocate_identifier(identifier);
        trace!("[MEMORY] memory map {} (aub {})", identifier, aub);

        // A map holding a single memory block takes that block's usage.
        let present: Vec<&MemoryBlock> = source
            .blocks
            .iter()
            .filter(|block| self.is_present(*block))
            .collect();
        let usage = match present.as_slice() {
            [MemoryBlock::AddressBlock(block)] if block.usage == Some(Usage::Memory) => {
                Some(Usage::Memory)
            }
            _ => None,
        };

        let mut item = MemoryItem::new(source.name, MemoryItemKind::MemoryMap, identifier.clone());
        item.display_name = source.display_name.map(SmolStr::new);
        item.address_unit_bits = Some(SmolStr::new(aub.to_string()));
        item.usage = usage;
        item.is_present = Some(SmolStr::new_static("1"));
        let map_id = match parent {
            Some(parent) => forest.add_child(parent, item),
            None => forest.add_root(item),
        };

        self.add_memory_blocks(forest, map_id, source.blocks, &identifier, aub);
        map_id
    }

    fn add_memory_blocks(
        &mut self,
        forest: &mut MemoryForest,
        parent: MemoryItemId,
        blocks: &[MemoryBlock],
        parent_identifier: &str,
        aub: u64,
    ) {
        for block in blocks {
            if !self.is_present(block) {
                trace!("[MEMORY] block '{}' not present", block.name());
                continue;
            }
            match block {
                MemoryBlock::AddressBlock(block) => {
                    self.add_address_block(forest, parent, block, parent_identifier, aub);
                }
                MemoryBlock::SubspaceMap(map) => {
                    self.warn(BuildWarning::UnsupportedMemoryBlock {
                        identifier: SmolStr::new(format!("{parent_identifier}.{}", map.name)),
                    });
                }
            }
        }
    }

    // ========================================================================
    // ADDRESS BLOCKS AND REGISTERS
    // ========================================================================

    fn add_address_block(
        &mut self,
        forest: &mut MemoryForest,
        parent: MemoryItemId,
        block: &AddressBlock,
        parent_identifier: &str,
        aub: u64,
    ) {
        let identifier = self.allocate_identifier(format!("{parent_identifier}.{}", block.name));
        trace!("[MEMORY] address block {}", identifier);

        let address = self.eval(&block.base_address);
        let base = parse_u64(&address).unwrap_or(0);

        let mut item = MemoryItem::new(
            block.name.as_str(),
            MemoryItemKind::AddressBlock,
            identifier.clone(),
        );
        item.display_name = display_name(&block.display_name);
        item.address_unit_bits = Some(SmolStr::new(aub.to_string()));
        item.address = Some(address);
        item.range = Some(self.eval(&block.range));
        item.width = Some(self.eval(&block.width));
        item.usage = block.usage;
        item.is_present = Some(SmolStr::new_static("1"));
        let block_id = forest.add_child(parent, item);

        for data in &block.register_data {
            if !self.is_present(data) {
                trace!("[MEMORY] register '{}' not present", data.name());
                continue;
            }
            match data {
                RegisterBase::Register(register) => {
                    self.add_register(forest, block_id, register, base, &identifier, aub);
                }
                RegisterBase::RegisterFile(file) => {
                    self.warn(BuildWarning::RegisterFileSkipped {
                        identifier: SmolStr::new(format!("{identifier}.{}", file.name)),
                    });
                }
            }
        }
    }

    /// Add a register, or one register per index of a register array.
    fn add_register(
        &mut self,
        forest: &mut MemoryForest,
        block_id: MemoryItemId,
        register: &Register,
        block_base: u64,
        block_identifier: &str,
        aub: u64,
    ) {
        let offset = self.eval_u64(&register.address_offset).unwrap_or(0);
        let size_text = self.eval(&register.size);
        let size = parse_u64(&size_text).unwrap_or(0);
        let dimension = register
            .dimension
            .as_deref()
            .filter(|dimension| !dimension.trim().is_empty())
            .map(|dimension| self.eval_u64(dimension).unwrap_or(0));
        let count = dimension.map_or(1, |dimension| dimension.max(1));
        let stride = size / aub.max(1);

        let mut address = block_base.saturating_add(offset);
        for index in 0..count {
            let candidate = match dimension {
                Some(_) => format!("{block_identifier}.{}[{index}]", register.name),
                None => format!("{block_identifier}.{}", register.name),
            };
            let identifier = self.allocate_identifier(candidate);
            trace!("[MEMORY] register {} at {}", identifier, address);

            let mut item = MemoryItem::new(
                register.name.as_str(),
                MemoryItemKind::Register,
                identifier.clone(),
            );
            item.display_name = display_name(&register.display_name);
            item.address_unit_bits = Some(SmolStr::new(aub.to_string()));
            item.address = Some(SmolStr::new(address.to_string()));
            item.offset = Some(SmolStr::new(offset.to_string()));
            item.size = Some(size_text.clone());
            item.dimension = dimension.map(|dimension| SmolStr::new(dimension.to_string()));
            item.is_present = Some(SmolStr::new_static("1"));
            let register_id = forest.add_child(block_id, item);

            let layouts = self.add_fields(forest, register_id, register, address, &identifier, aub);
            self.add_register_reset(forest, register_id, &identifier, aub, size, &layouts);

            address = address.saturating_add(stride);
        }
    }

    // ========================================================================
    // FIELDS AND RESETS
    // ========================================================================

    /// Add the present fields of a register ordered by bit offset.
    fn add_fields(
        &mut self,
        forest: &mut MemoryForest,
        register_id: MemoryItemId,
        register: &Register,
        register_address: u64,
        register_identifier: &str,
        aub: u64,
    ) -> Vec<FieldLayout> {
        let aub = aub.max(1);
        let mut placed: Vec<(u64, &Field, u64, u64)> = Vec::new();
        for field in &register.fields {
            if !self.is_present(field) {
                trace!("[MEMORY] field '{}' not present", field.name);
                continue;
            }
            let bit_offset = self.eval_u64(&field.bit_offset).unwrap_or(0);
            let address = register_address.saturating_add(bit_offset / aub);
            let offset = bit_offset % aub;
            let start = (address - register_address) * aub + offset;
            placed.push((start, field, address, offset));
        }
        placed.sort_by_key(|(start, ..)| *start);

        let mut layouts = Vec::with_capacity(placed.len());
        for (start, field, address, offset) in placed {
            let identifier =
                self.allocate_identifier(format!("{register_identifier}.{}", field.name));
            let width_text = self.eval(&field.bit_width);
            let width = parse_u64(&width_text).unwrap_or(0);

            let mut item = MemoryItem::new(
                field.name.as_str(),
                MemoryItemKind::Field,
                identifier.clone(),
            );
            item.display_name = display_name(&field.display_name);
            item.address_unit_bits = Some(SmolStr::new(aub.to_string()));
            item.address = Some(SmolStr::new(address.to_string()));
            item.offset = Some(SmolStr::new(offset.to_string()));
            item.width = Some(width_text);
            item.is_present = Some(SmolStr::new_static("1"));
            let field_id = forest.add_child(register_id, item);

            for value in &field.enumerated_values {
                let mut item = MemoryItem::new(
                    value.name.as_str(),
                    MemoryItemKind::EnumeratedValue,
                    self.allocate_identifier(format!("{identifier}.{}", value.name)),
                );
                item.display_name = display_name(&value.display_name);
                item.address_unit_bits = Some(SmolStr::new(aub.to_string()));
                item.value = Some(self.eval(&value.value));
                forest.add_child(field_id, item);
            }

            let mut hard_reset = None;
            for reset in &field.resets {
                let reset_type = reset
                    .reset_type_ref
                    .as_deref()
                    .filter(|reset_type| !reset_type.is_empty())
                    .unwrap_or(HARD_RESET_TYPE);
                let value = SmolStr::new(to_binary(self.eval_u64(&reset.value).unwrap_or(0)));
                let mask = match reset.mask.as_deref().filter(|mask| !mask.trim().is_empty()) {
                    Some(mask) => to_binary(self.eval_u64(mask).unwrap_or(0)),
                    None => "1".repeat(usize::try_from(width).unwrap_or(0)),
                };
                let mask = SmolStr::new(mask);

                let mut item = MemoryItem::new(
                    reset_type,
                    MemoryItemKind::Reset,
                    self.allocate_identifier(format!("{identifier}.{reset_type}")),
                );
                item.address_unit_bits = Some(SmolStr::new(aub.to_string()));
                item.reset_value = Some(value.clone());
                item.reset_mask = Some(mask.clone());
                forest.add_child(field_id, item);

                if reset_type == HARD_RESET_TYPE && hard_reset.is_none() {
                    hard_reset = Some((value, mask));
                }
            }

            layouts.push(FieldLayout {
                start,
                width,
                hard_reset,
            });
        }
        layouts
    }

    /// Add the register's aggregate hard reset.
    ///
    /// Each field's hard reset is right-justified to the field width and
    /// placed at the field's bit offset. Bits outside any field, and fields
    /// without a hard reset, are zero. Overlapping fields are written in bit
    /// offset order.
    fn add_register_reset(
        &mut self,
        forest: &mut MemoryForest,
        register_id: MemoryItemId,
        register_identifier: &str,
        aub: u64,
        size: u64,
        layouts: &[FieldLayout],
    ) {
        let size = usize::try_from(size).unwrap_or(0);
        let mut value = vec!['0'; size];
        let mut mask = vec!['0'; size];

        for layout in layouts {
            let Some((field_value, field_mask)) = &layout.hard_reset else {
                continue;
            };
            let width = usize::try_from(layout.width).unwrap_or(0);
            let start = usize::try_from(layout.start).unwrap_or(usize::MAX);
            let field_value = right_justify(field_value, width);
            let field_mask = right_justify(field_mask, width);

            // Strings are most significant bit first; walk both from bit 0.
            let bits = field_value.chars().rev().zip(field_mask.chars().rev());
            for (index, (value_bit, mask_bit)) in bits.enumerate() {
                let Some(bit) = start.checked_add(index).filter(|bit| *bit < size) else {
                    break;
                };
                value[size - 1 - bit] = value_bit;
                mask[size - 1 - bit] = mask_bit;
            }
        }

        let identifier =
            self.allocate_identifier(format!("{register_identifier}.{HARD_RESET_TYPE}"));
        let mut item = MemoryItem::new(HARD_RESET_TYPE, MemoryItemKind::Reset, identifier);
        item.address_unit_bits = Some(SmolStr::new(aub.to_string()));
        item.reset_value = Some(value.into_iter().collect());
        item.reset_mask = Some(mask.into_iter().collect());
        forest.add_child(register_id, item);
    }
}

/// The parts of a memory map or local memory map the builder needs.
struct MapSource<'m> {
    name: &'m str,
    display_name: Option<&'m str>,
    blocks: &'m [MemoryBlock],
}
