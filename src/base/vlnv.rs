use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Vendor/library/name/version identifier of a library document.
///
/// Displayed as `vendor:library:name:version`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vlnv {
    pub vendor: SmolStr,
    pub library: SmolStr,
    pub name: SmolStr,
    pub version: SmolStr,
}

impl Vlnv {
    pub fn new(
        vendor: impl Into<SmolStr>,
        library: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        version: impl Into<SmolStr>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            library: library.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// A VLNV is valid when every element is non-empty.
    pub fn is_valid(&self) -> bool {
        !(self.vendor.is_empty()
            || self.library.is_empty()
            || self.name.is_empty()
            || self.version.is_empty())
    }

    /// The VLNV with `:` separators replaced by `.`, used as the leading
    /// part of memory item identifiers.
    pub fn to_identifier_prefix(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.vendor, self.library, self.name, self.version
        )
    }
}

impl fmt::Display for Vlnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.vendor, self.library, self.name, self.version
        )
    }
}

/// Error returned when a string is not a four-part VLNV.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected vendor:library:name:version, got '{0}'")]
pub struct VlnvParseError(pub String);

impl FromStr for Vlnv {
    type Err = VlnvParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [vendor, library, name, version] => Ok(Self::new(*vendor, *library, *name, *version)),
            _ => Err(VlnvParseError(s.to_string())),
        }
    }
}
