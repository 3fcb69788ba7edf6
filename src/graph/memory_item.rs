//! Resolved memory elements and the per-instance forest that owns them.

use std::fmt;
use std::ops::Index;

use smol_str::SmolStr;

use crate::base::{Usage, parse_u64};

/// Index of a [`MemoryItem`] within its [`MemoryForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryItemId(pub u32);

impl MemoryItemId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a memory item was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryItemKind {
    AddressSpace,
    Segment,
    MemoryMap,
    MemoryRemap,
    AddressBlock,
    Register,
    Field,
    EnumeratedValue,
    Reset,
}

impl MemoryItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddressSpace => "addressSpace",
            Self::Segment => "segment",
            Self::MemoryMap => "memoryMap",
            Self::MemoryRemap => "memoryRemap",
            Self::AddressBlock => "addressBlock",
            Self::Register => "register",
            Self::Field => "field",
            Self::EnumeratedValue => "enumeratedValue",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for MemoryItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a memory forest.
///
/// Numeric attributes hold the evaluator's output verbatim. Text that is not
/// an unsigned decimal reads back as `None` through the `*_value` accessors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryItem {
    pub name: SmolStr,
    pub display_name: Option<SmolStr>,
    pub kind: MemoryItemKind,
    /// Unique within one graph.
    pub identifier: SmolStr,
    pub address_unit_bits: Option<SmolStr>,
    pub address: Option<SmolStr>,
    pub range: Option<SmolStr>,
    pub width: Option<SmolStr>,
    pub size: Option<SmolStr>,
    pub offset: Option<SmolStr>,
    pub dimension: Option<SmolStr>,
    pub is_present: Option<SmolStr>,
    pub usage: Option<Usage>,
    /// Value of an enumerated value.
    pub value: Option<SmolStr>,
    /// Binary reset value, most significant bit first.
    pub reset_value: Option<SmolStr>,
    /// Binary reset mask, most significant bit first.
    pub reset_mask: Option<SmolStr>,
    parent: Option<MemoryItemId>,
    children: Vec<MemoryItemId>,
}

impl MemoryItem {
    pub fn new(
        name: impl Into<SmolStr>,
        kind: MemoryItemKind,
        identifier: impl Into<SmolStr>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            kind,
            identifier: identifier.into(),
            address_unit_bits: None,
            address: None,
            range: None,
            width: None,
            size: None,
            offset: None,
            dimension: None,
            is_present: None,
            usage: None,
            value: None,
            reset_value: None,
            reset_mask: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<MemoryItemId> {
        self.parent
    }

    pub fn children(&self) -> &[MemoryItemId] {
        &self.children
    }

    pub fn address_value(&self) -> Option<u64> {
        numeric(&self.address)
    }

    pub fn range_value(&self) -> Option<u64> {
        numeric(&self.range)
    }

    pub fn width_value(&self) -> Option<u64> {
        numeric(&self.width)
    }

    pub fn size_value(&self) -> Option<u64> {
        numeric(&self.size)
    }

    pub fn offset_value(&self) -> Option<u64> {
        numeric(&self.offset)
    }

    pub fn dimension_value(&self) -> Option<u64> {
        numeric(&self.dimension)
    }

    pub fn address_unit_bits_value(&self) -> Option<u64> {
        numeric(&self.address_unit_bits)
    }
}

fn numeric(value: &Option<SmolStr>) -> Option<u64> {
    value.as_deref().and_then(parse_u64)
}

// ============================================================================
// FOREST
// ============================================================================

/// The memory items of one component instance, stored as an arena.
///
/// Roots are the instance's address spaces followed by its memory maps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryForest {
    items: Vec<MemoryItem>,
    roots: Vec<MemoryItemId>,
}

impl MemoryForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, item: MemoryItem) -> MemoryItemId {
        let id = self.push(item, None);
        self.roots.push(id);
        id
    }

    /// Append `item` as the last child of `parent`.
    pub fn add_child(&mut self, parent: MemoryItemId, item: MemoryItem) -> MemoryItemId {
        let id = self.push(item, Some(parent));
        if let Some(parent) = self.items.get_mut(parent.index()) {
            parent.children.push(id);
        }
        id
    }

    fn push(&mut self, mut item: MemoryItem, parent: Option<MemoryItemId>) -> MemoryItemId {
        let id = MemoryItemId::new(self.items.len());
        item.parent = parent;
        item.children.clear();
        self.items.push(item);
        id
    }

    pub fn get(&self, id: MemoryItemId) -> Option<&MemoryItem> {
        self.items.get(id.index())
    }

    pub fn roots(&self) -> &[MemoryItemId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (MemoryItemId, &MemoryItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (MemoryItemId::new(index), item))
    }

    pub fn children_of(
        &self,
        id: MemoryItemId,
    ) -> impl Iterator<Item = (MemoryItemId, &MemoryItem)> {
        self.get(id)
            .map(MemoryItem::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.get(*child).map(|item| (*child, item)))
    }

    /// First child of `id` with the given name and kind.
    pub fn find_child(
        &self,
        id: MemoryItemId,
        name: &str,
        kind: MemoryItemKind,
    ) -> Option<MemoryItemId> {
        self.children_of(id)
            .find(|(_, item)| item.kind == kind && item.name == name)
            .map(|(child, _)| child)
    }

    /// First root with the given name, preferring `kind` when given.
    pub fn find_root(&self, name: &str, kind: Option<MemoryItemKind>) -> Option<MemoryItemId> {
        let named = || {
            self.roots
                .iter()
                .copied()
                .filter(move |id| self.get(*id).is_some_and(|item| item.name == name))
        };
        kind.and_then(|kind| named().find(|id| self[*id].kind == kind))
            .or_else(|| named().next())
    }

    /// Items below `id` in depth-first pre-order, `id` excluded.
    pub fn descendants(&self, id: MemoryItemId) -> Vec<MemoryItemId> {
        let mut out = Vec::new();
        let mut stack: Vec<MemoryItemId> = self
            .get(id)
            .map(|item| item.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(item) = self.get(next) {
                stack.extend(item.children.iter().rev().copied());
            }
        }
        out
    }

    /// The local memory map of an address space item.
    pub fn local_memory_map(&self, space: MemoryItemId) -> Option<MemoryItemId> {
        let item = self.get(space)?;
        if item.kind != MemoryItemKind::AddressSpace {
            return None;
        }
        item.children
            .iter()
            .rev()
            .copied()
            .find(|child| self[*child].kind == MemoryItemKind::MemoryMap)
    }

    /// First and last address covered by an item, in addressable units.
    ///
    /// Address spaces start at zero. Memory maps cover their address blocks.
    /// Registers cover `size / address unit bits` units.
    pub fn address_bounds(&self, id: MemoryItemId) -> Option<(u64, u64)> {
        let item = self.get(id)?;
        match item.kind {
            MemoryItemKind::AddressSpace => {
                let range = item.range_value().filter(|range| *range > 0)?;
                Some((0, range - 1))
            }
            MemoryItemKind::MemoryMap | MemoryItemKind::MemoryRemap => self
                .children_of(id)
                .filter(|(_, child)| child.kind == MemoryItemKind::AddressBlock)
                .filter_map(|(block, _)| self.address_bounds(block))
                .reduce(|(low, high), (base, last)| (low.min(base), high.max(last))),
            MemoryItemKind::Register => {
                let aub = item.address_unit_bits_value().filter(|aub| *aub > 0)?;
                let units = item.size_value()?.div_ceil(aub).max(1);
                let base = item.address_value()?;
                Some((base, base.saturating_add(units - 1)))
            }
            _ => {
                let range = item.range_value().filter(|range| *range > 0)?;
                let base = item.address_value()?;
                Some((base, base.saturating_add(range - 1)))
            }
        }
    }
}

impl Index<MemoryItemId> for MemoryForest {
    type Output = MemoryItem;

    fn index(&self, id: MemoryItemId) -> &MemoryItem {
        &self.items[id.index()]
    }
}
