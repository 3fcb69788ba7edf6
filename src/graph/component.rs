use smol_str::SmolStr;

use crate::base::Vlnv;

use super::memory_item::{MemoryForest, MemoryItemId, MemoryItemKind};

/// Index of a [`ConnectivityComponent`] in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

impl ComponentId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One instantiated component, including the implicit top-level instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectivityComponent {
    pub instance_name: SmolStr,
    pub instance_uuid: SmolStr,
    pub vlnv: Vlnv,
    pub active_view: SmolStr,
    pub description: Option<String>,
    /// Set when the component routes interfaces through channels.
    pub is_channeled: bool,
    pub memory: MemoryForest,
}

impl ConnectivityComponent {
    pub fn new(
        instance_name: impl Into<SmolStr>,
        instance_uuid: impl Into<SmolStr>,
        vlnv: Vlnv,
    ) -> Self {
        Self {
            instance_name: instance_name.into(),
            instance_uuid: instance_uuid.into(),
            vlnv,
            active_view: SmolStr::default(),
            description: None,
            is_channeled: false,
            memory: MemoryForest::new(),
        }
    }

    /// `vendor.library.name.version.uuid.instance`, the prefix of every
    /// memory identifier of this instance.
    pub fn identifier_prefix(&self) -> String {
        format!(
            "{}.{}.{}",
            self.vlnv.to_identifier_prefix(),
            self.instance_uuid,
            self.instance_name
        )
    }

    /// Top-level memory item named `name`, preferring items of `kind`.
    pub fn find_memory(&self, name: &str, kind: Option<MemoryItemKind>) -> Option<MemoryItemId> {
        self.memory.find_root(name, kind)
    }
}
