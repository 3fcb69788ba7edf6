use std::fmt;
use std::str::FromStr;

/// The role a bus interface plays on its component.
///
/// Older descriptions use master/slave naming; both spellings parse to the
/// same variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum InterfaceMode {
    Initiator,
    Target,
    System,
    MirroredInitiator,
    MirroredTarget,
    MirroredSystem,
    Monitor,
    #[default]
    Undefined,
}

impl InterfaceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiator => "initiator",
            Self::Target => "target",
            Self::System => "system",
            Self::MirroredInitiator => "mirroredInitiator",
            Self::MirroredTarget => "mirroredTarget",
            Self::MirroredSystem => "mirroredSystem",
            Self::Monitor => "monitor",
            Self::Undefined => "undefined",
        }
    }

    /// True for modes that carry a base address into an address space.
    pub fn is_initiator(&self) -> bool {
        matches!(self, Self::Initiator)
    }

    /// True for modes that expose a memory map.
    pub fn is_target(&self) -> bool {
        matches!(self, Self::Target)
    }

    /// True for modes that may remap a target address range.
    pub fn is_mirrored_target(&self) -> bool {
        matches!(self, Self::MirroredTarget)
    }
}

impl fmt::Display for InterfaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterfaceMode {
    type Err = std::convert::Infallible;

    /// Unknown spellings map to [`InterfaceMode::Undefined`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "initiator" | "master" => Self::Initiator,
            "target" | "slave" => Self::Target,
            "system" => Self::System,
            "mirroredInitiator" | "mirroredMaster" => Self::MirroredInitiator,
            "mirroredTarget" | "mirroredSlave" => Self::MirroredTarget,
            "mirroredSystem" => Self::MirroredSystem,
            "monitor" => Self::Monitor,
            _ => Self::Undefined,
        })
    }
}

/// Usage classification of an address block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Usage {
    Memory,
    Register,
    Reserved,
}

impl Usage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Register => "register",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
