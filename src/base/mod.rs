//! Foundation types for the connectivity toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Vlnv`] - Vendor/library/name/version document identifiers
//! - [`InterfaceMode`], [`Usage`] - Small closed tag sets shared by model and graph
//! - Numeric helpers for resolved expression values and binary reset strings
//! - Domain constants (reset type names, root instance naming)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod mode;
mod numeric;
mod vlnv;

pub use mode::{InterfaceMode, Usage};
pub use numeric::{parse_u64, right_justify, to_binary};
pub use vlnv::{Vlnv, VlnvParseError};

// Re-export the string type used for names and resolved values
pub use smol_str::SmolStr;
