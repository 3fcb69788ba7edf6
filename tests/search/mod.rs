//! Search tests
//!
//! Tests for routes through built graphs and the address windows they
//! translate to.

pub mod tests_translation;
